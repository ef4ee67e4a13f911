//! Verification harness: runs a declared list of operations against a
//! dataset, containing each case's failure so the rest still run.

pub mod suite;

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::chart::{ChartSpec, Renderer};
use crate::data::model::Dataset;
use crate::error::AnalysisError;
use crate::facade::ShotAnalyzer;
use crate::stats::{CorrelationMatrix, StatisticalSummary};

// ---------------------------------------------------------------------------
// Operations and their results
// ---------------------------------------------------------------------------

/// An analyzer or chart call together with its arguments.
///
/// Chart arguments stay unvalidated until the case runs, so a bad palette or
/// alpha fails that case only.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Analyze {
        column: String,
    },
    Correlate {
        a: String,
        b: String,
    },
    RenderScatter {
        x: String,
        y: String,
    },
    RenderTrend {
        x: String,
        y: String,
    },
    RenderShotDistribution {
        x: String,
        y: String,
        hue: String,
        palette: String,
        alpha: f64,
    },
}

impl Operation {
    pub fn analyze(column: &str) -> Self {
        Operation::Analyze {
            column: column.to_string(),
        }
    }

    pub fn correlate(a: &str, b: &str) -> Self {
        Operation::Correlate {
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub fn scatter(x: &str, y: &str) -> Self {
        Operation::RenderScatter {
            x: x.to_string(),
            y: y.to_string(),
        }
    }

    pub fn trend(x: &str, y: &str) -> Self {
        Operation::RenderTrend {
            x: x.to_string(),
            y: y.to_string(),
        }
    }

    pub fn shot_distribution(x: &str, y: &str, hue: &str, palette: &str, alpha: f64) -> Self {
        Operation::RenderShotDistribution {
            x: x.to_string(),
            y: y.to_string(),
            hue: hue.to_string(),
            palette: palette.to_string(),
            alpha,
        }
    }

    /// Run the operation through the facade.
    pub fn invoke(
        &self,
        analyzer: &ShotAnalyzer<'_>,
        renderer: &mut dyn Renderer,
    ) -> Result<OperationOutput, AnalysisError> {
        match self {
            Operation::Analyze { column } => analyzer.analyze(column).map(OperationOutput::Summary),
            Operation::Correlate { a, b } => {
                analyzer.correlate(a, b).map(OperationOutput::Correlation)
            }
            Operation::RenderScatter { x, y } => analyzer
                .render_scatter(x, y, renderer)
                .map(|()| OperationOutput::Rendered),
            Operation::RenderTrend { x, y } => analyzer
                .render_trend(x, y, renderer)
                .map(|()| OperationOutput::Rendered),
            Operation::RenderShotDistribution {
                x,
                y,
                hue,
                palette,
                alpha,
            } => {
                let spec = ChartSpec::shot_chart(x, y, hue, palette, *alpha)?;
                analyzer
                    .render_shot_distribution(&spec, renderer)
                    .map(|()| OperationOutput::Rendered)
            }
        }
    }
}

/// What a successful operation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutput {
    Summary(StatisticalSummary),
    Correlation(CorrelationMatrix),
    /// A chart was handed to the renderer.
    Rendered,
}

/// Result check run against a successful operation's output.
pub type Assertion = fn(&OperationOutput) -> Result<(), String>;

// ---------------------------------------------------------------------------
// Test cases, states and outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub operation: Operation,
    pub assertion: Option<Assertion>,
}

impl TestCase {
    pub fn new(name: impl Into<String>, operation: Operation) -> Self {
        Self {
            name: name.into(),
            operation,
            assertion: None,
        }
    }

    pub fn with_assertion(mut self, assertion: Assertion) -> Self {
        self.assertion = Some(assertion);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed { reason: String },
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }
}

/// Lifecycle of one case: Pending → Running → Done(Passed | Failed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseState {
    Pending,
    Running,
    Done(Outcome),
}

// ---------------------------------------------------------------------------
// Output sink
// ---------------------------------------------------------------------------

/// Receives one line of harness progress text at a time.
pub trait OutputSink {
    fn line(&mut self, text: &str);
}

/// Prints each line to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn line(&mut self, text: &str) {
        println!("{text}");
    }
}

impl OutputSink for Vec<String> {
    fn line(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub entries: Vec<(String, Outcome)>,
}

impl Report {
    pub fn passed(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    pub fn outcome(&self, name: &str) -> Option<&Outcome> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, o)| o)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cases: {} passed, {} failed",
            self.entries.len(),
            self.passed(),
            self.failed()
        )
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct Harness<'a, R, S> {
    analyzer: ShotAnalyzer<'a>,
    renderer: R,
    sink: S,
}

impl<'a, R: Renderer, S: OutputSink> Harness<'a, R, S> {
    pub fn new(dataset: &'a Dataset, renderer: R, sink: S) -> Self {
        Self {
            analyzer: ShotAnalyzer::new(dataset),
            renderer,
            sink,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_parts(self) -> (R, S) {
        (self.renderer, self.sink)
    }

    /// Run one case to a terminal outcome. Errors and panics from the
    /// operation or the assertion become `Failed`; nothing propagates.
    pub fn run_case(&mut self, case: &TestCase) -> Outcome {
        self.sink.line(&format!("Running test: {}...", case.name));

        let analyzer = self.analyzer;
        let renderer = &mut self.renderer;
        let attempt = panic::catch_unwind(AssertUnwindSafe(|| {
            let output = case.operation.invoke(&analyzer, renderer)?;
            if let Some(check) = case.assertion {
                check(&output).map_err(AnalysisError::Assertion)?;
            }
            Ok::<_, AnalysisError>(())
        }));

        let outcome = match attempt {
            Ok(Ok(())) => Outcome::Passed,
            Ok(Err(err)) => Outcome::Failed {
                reason: err.to_string(),
            },
            Err(payload) => Outcome::Failed {
                reason: panic_reason(payload.as_ref()),
            },
        };

        match &outcome {
            Outcome::Passed => self.sink.line(&format!("{} passed.", case.name)),
            Outcome::Failed { reason } => {
                // A chart that died mid-way must not bleed into the next case.
                self.renderer.clear();
                log::warn!("case '{}' failed: {reason}", case.name);
                self.sink.line(&format!("{} failed: {reason}", case.name));
            }
        }
        outcome
    }

    /// Run every case once, in order, whatever earlier cases did.
    pub fn run(&mut self, cases: &[TestCase]) -> Report {
        let mut states = vec![CaseState::Pending; cases.len()];
        for (state, case) in states.iter_mut().zip(cases) {
            *state = CaseState::Running;
            *state = CaseState::Done(self.run_case(case));
        }

        let entries = cases
            .iter()
            .zip(states)
            .filter_map(|(case, state)| match state {
                CaseState::Done(outcome) => Some((case.name.clone(), outcome)),
                CaseState::Pending | CaseState::Running => None,
            })
            .collect();
        let report = Report { entries };
        log::info!("verification finished: {report}");
        report
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
