use eframe::egui::{self, RichText, Ui};
use egui_plot::{Corner, Line, Plot, PlotPoints, Points};

use super::color::with_alpha;
use super::figure::{Figure, Layer};
use super::render::{Legend, LegendPosition, LineSeries, RegressionOverlay, Renderer, ScatterSeries};
use crate::config::Settings;
use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// PlotWindow – renderer backed by a native egui window
// ---------------------------------------------------------------------------

/// Buffers primitives into a [`Figure`]; `show` opens a window and blocks
/// until it is closed.
pub struct PlotWindow {
    settings: Settings,
    current: Figure,
}

impl PlotWindow {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            current: Figure::default(),
        }
    }
}

impl Renderer for PlotWindow {
    fn scatter(&mut self, series: ScatterSeries) {
        self.current.layers.push(Layer::Scatter(series));
    }

    fn line(&mut self, series: LineSeries) {
        self.current.layers.push(Layer::Line(series));
    }

    fn regression(&mut self, overlay: RegressionOverlay) {
        self.current.layers.push(Layer::Regression(overlay));
    }

    fn title(&mut self, title: &str) {
        self.current.title = Some(title.to_string());
    }

    fn x_label(&mut self, label: &str) {
        self.current.x_label = Some(label.to_string());
    }

    fn y_label(&mut self, label: &str) {
        self.current.y_label = Some(label.to_string());
    }

    fn legend(&mut self, legend: Legend) {
        self.current.legend = Some(legend);
    }

    fn grid(&mut self, enabled: bool) {
        self.current.grid = enabled;
    }

    fn clear(&mut self) {
        self.current = Figure::default();
    }

    fn show(&mut self) -> Result<(), AnalysisError> {
        let figure = std::mem::take(&mut self.current);
        if figure.is_empty() {
            log::warn!("showing a figure with nothing drawn");
        }
        let app_name = figure.title.clone().unwrap_or_else(|| "courtside".to_string());
        let window = &self.settings.window;

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(window.inner_size)
                .with_min_inner_size(window.min_inner_size),
            ..Default::default()
        };
        let point_radius = self.settings.point_radius;

        log::info!("opening chart window '{app_name}'");
        eframe::run_native(
            &app_name,
            options,
            Box::new(move |_cc| {
                Ok(Box::new(FigureApp {
                    figure,
                    point_radius,
                }))
            }),
        )
        .map_err(|e| AnalysisError::Render(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

struct FigureApp {
    figure: Figure,
    point_radius: f32,
}

impl eframe::App for FigureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and legend heading ----
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                if let Some(title) = &self.figure.title {
                    ui.heading(title);
                }
                if let Some(legend) = &self.figure.legend {
                    ui.label(RichText::new(&legend.title).strong());
                }
            });
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            figure_plot(ui, &self.figure, self.point_radius);
        });
    }
}

fn corner(position: LegendPosition) -> Corner {
    match position {
        LegendPosition::UpperRight => Corner::RightTop,
        LegendPosition::UpperLeft => Corner::LeftTop,
        LegendPosition::LowerRight => Corner::RightBottom,
        LegendPosition::LowerLeft => Corner::LeftBottom,
    }
}

/// Draw every layer of `figure` into one plot.
fn figure_plot(ui: &mut Ui, figure: &Figure, radius: f32) {
    let mut plot = Plot::new("figure")
        .show_grid(figure.grid)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if let Some(label) = &figure.x_label {
        plot = plot.x_axis_label(label.as_str());
    }
    if let Some(label) = &figure.y_label {
        plot = plot.y_axis_label(label.as_str());
    }
    if let Some(legend) = &figure.legend {
        plot = plot.legend(egui_plot::Legend::default().position(corner(legend.position)));
    }

    plot.show(ui, |plot_ui| {
        for layer in &figure.layers {
            match layer {
                Layer::Scatter(s) => {
                    let scatter_points: PlotPoints = s.points.iter().copied().collect();
                    let mut p = Points::new(scatter_points)
                        .color(with_alpha(s.color, s.alpha))
                        .radius(radius);
                    if let Some(name) = &s.name {
                        p = p.name(name);
                    }
                    plot_ui.points(p);
                }
                Layer::Line(l) => {
                    let line_points: PlotPoints = l.points.iter().copied().collect();
                    let mut line = Line::new(line_points).color(l.color).width(1.5);
                    if let Some(name) = &l.name {
                        line = line.name(name);
                    }
                    plot_ui.line(line);
                }
                Layer::Regression(r) => {
                    let raw_points: PlotPoints = r.points.iter().copied().collect();
                    plot_ui.points(
                        Points::new(raw_points)
                            .color(with_alpha(r.point_color, r.point_alpha))
                            .radius(radius),
                    );
                    if let Some(segment) = r.fit_segment() {
                        let fit_points: PlotPoints = segment.into_iter().collect();
                        plot_ui.line(Line::new(fit_points).color(r.line_color).width(2.0));
                    }
                }
            }
        }
    });
}
