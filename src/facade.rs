//! One entry point for every analysis and chart.
//!
//! The free functions take the dataset explicitly; [`ShotAnalyzer`] binds a
//! dataset once and forwards each call to the same function.

use crate::chart::{ChartSpec, Renderer};
use crate::data::model::Dataset;
use crate::error::AnalysisError;
use crate::stats::{CorrelationMatrix, StatisticalSummary};

pub use crate::chart::{render_scatter, render_shot_distribution, render_trend};
pub use crate::stats::{analyze, correlate};

/// A dataset with every operation curried over it.
#[derive(Debug, Clone, Copy)]
pub struct ShotAnalyzer<'a> {
    dataset: &'a Dataset,
}

impl<'a> ShotAnalyzer<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    pub fn analyze(&self, column: &str) -> Result<StatisticalSummary, AnalysisError> {
        analyze(self.dataset, column)
    }

    pub fn correlate(&self, a: &str, b: &str) -> Result<CorrelationMatrix, AnalysisError> {
        correlate(self.dataset, a, b)
    }

    pub fn render_scatter(
        &self,
        x: &str,
        y: &str,
        renderer: &mut dyn Renderer,
    ) -> Result<(), AnalysisError> {
        render_scatter(self.dataset, x, y, renderer)
    }

    pub fn render_trend(
        &self,
        x: &str,
        y: &str,
        renderer: &mut dyn Renderer,
    ) -> Result<(), AnalysisError> {
        render_trend(self.dataset, x, y, renderer)
    }

    pub fn render_shot_distribution(
        &self,
        spec: &ChartSpec,
        renderer: &mut dyn Renderer,
    ) -> Result<(), AnalysisError> {
        render_shot_distribution(self.dataset, spec, renderer)
    }
}
