use eframe::egui::Color32;

use super::spec::Alpha;
use crate::error::AnalysisError;
use crate::stats::LinearFit;

// ---------------------------------------------------------------------------
// Drawing primitives handed to a renderer
// ---------------------------------------------------------------------------

/// Discrete points, optionally named for the legend.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub name: Option<String>,
    pub points: Vec<[f64; 2]>,
    pub color: Color32,
    pub alpha: Alpha,
}

/// Connected line through points in the order given.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: Option<String>,
    pub points: Vec<[f64; 2]>,
    pub color: Color32,
}

/// Raw points plus their least-squares line across `x_range`.
/// `fit` is `None` when no line can be drawn (fewer than two points, or a
/// constant x).
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionOverlay {
    pub points: Vec<[f64; 2]>,
    pub point_color: Color32,
    pub point_alpha: Alpha,
    pub fit: Option<LinearFit>,
    pub x_range: Option<[f64; 2]>,
    pub line_color: Color32,
}

impl RegressionOverlay {
    /// End points of the fitted segment, if there is one.
    pub fn fit_segment(&self) -> Option<[[f64; 2]; 2]> {
        let fit = self.fit?;
        let [lo, hi] = self.x_range?;
        Some([[lo, fit.predict(lo)], [hi, fit.predict(hi)]])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    UpperRight,
    UpperLeft,
    LowerRight,
    LowerLeft,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub title: String,
    pub position: LegendPosition,
}

// ---------------------------------------------------------------------------
// Renderer – the rendering collaborator
// ---------------------------------------------------------------------------

/// Figure-building primitives plus a blocking `show`.
///
/// Primitives accumulate into the current figure; `show` hands it off and
/// starts a fresh one.
pub trait Renderer {
    fn scatter(&mut self, series: ScatterSeries);
    fn line(&mut self, series: LineSeries);
    fn regression(&mut self, overlay: RegressionOverlay);
    fn title(&mut self, title: &str);
    fn x_label(&mut self, label: &str);
    fn y_label(&mut self, label: &str);
    fn legend(&mut self, legend: Legend);
    fn grid(&mut self, enabled: bool);
    fn show(&mut self) -> Result<(), AnalysisError>;
    /// Drop whatever has been drawn since the last `show`.
    fn clear(&mut self);
}
