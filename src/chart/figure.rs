use super::render::{Legend, LineSeries, RegressionOverlay, Renderer, ScatterSeries};
use crate::error::AnalysisError;

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Scatter(ScatterSeries),
    Line(LineSeries),
    Regression(RegressionOverlay),
}

/// Everything one chart call produced, in drawing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Figure {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub legend: Option<Legend>,
    pub grid: bool,
    pub layers: Vec<Layer>,
}

impl Figure {
    pub fn is_empty(&self) -> bool {
        *self == Figure::default()
    }

    pub fn scatter_series(&self) -> impl Iterator<Item = &ScatterSeries> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Scatter(s) => Some(s),
            _ => None,
        })
    }

    pub fn line_series(&self) -> impl Iterator<Item = &LineSeries> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Line(l) => Some(l),
            _ => None,
        })
    }

    pub fn regressions(&self) -> impl Iterator<Item = &RegressionOverlay> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Regression(r) => Some(r),
            _ => None,
        })
    }

    /// Total points across scatter layers.
    pub fn point_count(&self) -> usize {
        self.scatter_series().map(|s| s.points.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Recorder – headless renderer
// ---------------------------------------------------------------------------

/// Keeps every shown figure in memory instead of drawing it.
#[derive(Debug, Default)]
pub struct Recorder {
    current: Figure,
    shown: Vec<Figure>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Figures handed to `show`, oldest first.
    pub fn shown(&self) -> &[Figure] {
        &self.shown
    }

    pub fn last(&self) -> Option<&Figure> {
        self.shown.last()
    }

    /// The figure being built, not yet shown.
    pub fn pending(&self) -> &Figure {
        &self.current
    }
}

impl Renderer for Recorder {
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
        log::info!(
            "figure '{}': {} layers, {} points",
            figure.title.as_deref().unwrap_or_default(),
            figure.layers.len(),
            figure.point_count()
        );
        self.shown.push(figure);
        Ok(())
    }
}
