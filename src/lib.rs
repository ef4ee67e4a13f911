//! courtside: descriptive statistics and shot charts over basketball
//! shooting logs.
//!
//! ```text
//!   file ──► data::loader ──► Dataset ──┬──► stats   (summaries, correlation)
//!                                       └──► chart   (scatter, trend, shot chart)
//!                                              │
//!                                              ▼
//!                                   Renderer: Recorder | PlotWindow
//! ```
//!
//! [`facade`] gathers every operation in one place and [`harness`] runs a
//! declared list of them as named verification cases.

pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod facade;
pub mod harness;
pub mod stats;

pub use error::AnalysisError;
pub use facade::ShotAnalyzer;
