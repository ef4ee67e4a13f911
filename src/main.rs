use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use courtside::chart::{ChartSpec, PlotWindow, Recorder, Renderer};
use courtside::config::Settings;
use courtside::data::loader::load_file;
use courtside::data::Dataset;
use courtside::harness::suite::{default_cases, sample_dataset};
use courtside::harness::{ConsoleSink, Harness};
use courtside::ShotAnalyzer;

/// Shooting statistics and shot charts from a game log.
#[derive(Parser, Debug)]
#[command(name = "courtside", version, about)]
struct Cli {
    /// Record charts instead of opening a window for each one
    #[arg(long, global = true)]
    headless: bool,

    /// JSON settings file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the standard verification cases
    Verify {
        /// Shot log to verify against (defaults to the built-in fixture)
        data: Option<PathBuf>,
    },
    /// Print descriptive statistics for one or more columns
    Describe {
        data: PathBuf,
        #[arg(required = true)]
        columns: Vec<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the correlation matrix of two columns
    Correlate {
        data: PathBuf,
        a: String,
        b: String,
        #[arg(long)]
        json: bool,
    },
    /// Scatter plot of two columns
    Scatter { data: PathBuf, x: String, y: String },
    /// Line plot with a fitted regression overlay
    Trend { data: PathBuf, x: String, y: String },
    /// Shot chart coloured by a category column
    Shots {
        data: PathBuf,
        x: String,
        y: String,
        #[arg(long)]
        hue: Option<String>,
        #[arg(long, default_value = "deep")]
        palette: String,
        #[arg(long, default_value_t = 1.0)]
        alpha: f64,
    },
}

fn main() -> Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    settings.headless |= cli.headless;
    log::debug!("settings: {settings:?}");

    if settings.headless {
        run(cli.command, Recorder::new())
    } else {
        run(cli.command, PlotWindow::new(settings))
    }
}

fn run<R: Renderer>(command: Command, mut renderer: R) -> Result<ExitCode> {
    match command {
        Command::Verify { data } => {
            let dataset = match data {
                Some(path) => load(&path)?,
                None => sample_dataset(),
            };
            let mut harness = Harness::new(&dataset, renderer, ConsoleSink);
            let report = harness.run(&default_cases());
            println!("{report}");
            if !report.all_passed() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Describe {
            data,
            columns,
            json,
        } => {
            let dataset = load(&data)?;
            let analyzer = ShotAnalyzer::new(&dataset);
            let summaries = columns
                .iter()
                .map(|column| analyzer.analyze(column))
                .collect::<Result<Vec<_>, _>>()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                for summary in &summaries {
                    println!("{summary}\n");
                }
            }
        }
        Command::Correlate { data, a, b, json } => {
            let dataset = load(&data)?;
            let matrix = ShotAnalyzer::new(&dataset).correlate(&a, &b)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&matrix)?);
            } else {
                println!("{matrix}");
            }
        }
        Command::Scatter { data, x, y } => {
            let dataset = load(&data)?;
            ShotAnalyzer::new(&dataset).render_scatter(&x, &y, &mut renderer)?;
        }
        Command::Trend { data, x, y } => {
            let dataset = load(&data)?;
            ShotAnalyzer::new(&dataset).render_trend(&x, &y, &mut renderer)?;
        }
        Command::Shots {
            data,
            x,
            y,
            hue,
            palette,
            alpha,
        } => {
            let dataset = load(&data)?;
            let mut spec = ChartSpec::new(&x, &y)
                .palette(palette.parse()?)
                .alpha(alpha.try_into()?);
            if let Some(hue) = &hue {
                spec = spec.hue(hue);
            }
            ShotAnalyzer::new(&dataset).render_shot_distribution(&spec, &mut renderer)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn load(path: &Path) -> Result<Dataset> {
    load_file(path).with_context(|| format!("could not load shot log {}", path.display()))
}
