//! Statistics layer: single-column summaries, pairwise correlation, and the
//! least-squares fit behind the trend chart.

pub mod correlate;
pub mod describe;
pub mod regression;

pub use correlate::{correlate, CorrelationMatrix};
pub use describe::{analyze, StatisticalSummary};
pub use regression::{linear_fit, LinearFit};
