//! The standard verification run and the fixture it was written against.

use super::{Operation, OperationOutput, TestCase};
use crate::data::model::{Column, Dataset, Value};

/// Eight quarters of made/attempted counts with court locations.
pub fn sample_dataset() -> Dataset {
    let made: [i64; 8] = [10, 8, 15, 9, 5, 7, 20, 27];
    let attempted: [i64; 8] = [15, 10, 20, 12, 7, 15, 25, 30];
    let games = [
        "Quarter 1", "Quarter 2", "Quarter 3", "Quarter 4", "Quarter_5", "Quarter_6", "Quarter_7",
        "Quarter_8",
    ];
    let location_x = [0.2, 0.3, 0.4, 0.5, 0.7, 0.6, 0.8, 0.1];
    let location_y = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8];

    let columns = vec![
        Column::new("Shots_Made", made.iter().map(|&v| Value::from(v)).collect()),
        Column::new(
            "Shots_Attempted",
            attempted.iter().map(|&v| Value::from(v)).collect(),
        ),
        Column::new("Game", games.iter().map(|&g| Value::from(g)).collect()),
        Column::new("Location_X", location_x.iter().map(|&v| Value::from(v)).collect()),
        Column::new("Location_Y", location_y.iter().map(|&v| Value::from(v)).collect()),
    ];
    match Dataset::from_columns(columns) {
        Ok(dataset) => dataset,
        Err(err) => unreachable!("fixture columns share one length: {err}"),
    }
}

fn is_summary(output: &OperationOutput) -> Result<(), String> {
    match output {
        OperationOutput::Summary(s) if s.count > 0 => Ok(()),
        OperationOutput::Summary(_) => Err("summary has no values".to_string()),
        other => Err(format!("expected a summary, got {other:?}")),
    }
}

/// The five standard cases: one per facade operation.
pub fn default_cases() -> Vec<TestCase> {
    vec![
        TestCase::new("column_analyzer", Operation::analyze("Shots_Made"))
            .with_assertion(is_summary),
        TestCase::new(
            "analyze_two_columns",
            Operation::correlate("Shots_Made", "Shots_Attempted"),
        ),
        TestCase::new(
            "compare_two_columns",
            Operation::scatter("Shots_Made", "Shots_Attempted"),
        ),
        TestCase::new(
            "create_line_plot",
            Operation::trend("Shots_Made", "Shots_Attempted"),
        ),
        TestCase::new(
            "shot_distribution",
            Operation::shot_distribution("Location_X", "Location_Y", "Shots_Made", "bright", 0.7),
        ),
    ]
}
