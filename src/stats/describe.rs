use std::fmt;

use serde::Serialize;

use crate::data::model::Dataset;
use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Column analyzer
// ---------------------------------------------------------------------------

/// Descriptive statistics for one numeric column.
///
/// Every field except `count` is NaN when the column has no present values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticalSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n − 1). NaN for fewer than two values.
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Summarise `column` over its non-missing values.
pub fn analyze(dataset: &Dataset, column: &str) -> Result<StatisticalSummary, AnalysisError> {
    let mut values: Vec<f64> = dataset.numeric_values(column)?.into_iter().flatten().collect();
    values.sort_by(f64::total_cmp);

    log::debug!("describing '{column}' over {} values", values.len());

    let count = values.len();
    let (min, max) = match (values.first(), values.last()) {
        (Some(&lo), Some(&hi)) => (lo, hi),
        _ => (f64::NAN, f64::NAN),
    };

    Ok(StatisticalSummary {
        column: column.to_string(),
        count,
        mean: mean(&values),
        std: sample_std(&values),
        min,
        q25: quantile_sorted(&values, 0.25),
        median: quantile_sorted(&values, 0.5),
        q75: quantile_sorted(&values, 0.75),
        max,
    })
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Linear interpolation between closest ranks: `h = (n − 1)·p`.
/// `sorted` must be ascending; returns NaN when empty.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
            let lo = h.floor() as usize;
            let hi = h.ceil() as usize;
            (sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])).min(sorted[hi])
        }
    }
}

impl fmt::Display for StatisticalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "count {:>12}", self.count)?;
        let rows = [
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.median),
            ("75%", self.q75),
            ("max", self.max),
        ];
        for (label, value) in rows {
            writeln!(f, "{label:<5} {value:>12.6}")?;
        }
        write!(f, "Name: {}", self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, Value};
    use proptest::prelude::*;

    fn frame(name: &str, values: Vec<Value>) -> Dataset {
        Dataset::from_columns(vec![Column::new(name, values)]).unwrap()
    }

    #[test]
    fn shots_made_summary() {
        let made = [10, 8, 15, 9, 5, 7, 20, 27];
        let df = frame("Shots_Made", made.iter().map(|&v| v.into()).collect());
        let s = analyze(&df, "Shots_Made").unwrap();

        assert_eq!(s.count, 8);
        assert!((s.mean - 12.625).abs() < 1e-12);
        assert_eq!(s.min, 5.0);
        assert_eq!(s.max, 27.0);
        // sorted: 5 7 8 9 10 15 20 27
        assert!((s.q25 - 7.75).abs() < 1e-12);
        assert!((s.median - 9.5).abs() < 1e-12);
        assert!((s.q75 - 16.25).abs() < 1e-12);
        assert!((s.std - 7.5392).abs() < 1e-3);
    }

    #[test]
    fn missing_values_are_skipped() {
        let df = frame("x", vec![1.into(), Value::Null, 3.0.into(), f64::NAN.into()]);
        let s = analyze(&df, "x").unwrap();
        assert_eq!(s.count, 2);
        assert_eq!(s.mean, 2.0);
    }

    #[test]
    fn empty_column_is_all_nan() {
        let df = frame("x", vec![Value::Null, Value::Null]);
        let s = analyze(&df, "x").unwrap();
        assert_eq!(s.count, 0);
        for v in [s.mean, s.std, s.min, s.q25, s.median, s.q75, s.max] {
            assert!(v.is_nan());
        }
    }

    #[test]
    fn single_value_has_undefined_std() {
        let df = frame("x", vec![4.into()]);
        let s = analyze(&df, "x").unwrap();
        assert_eq!(s.count, 1);
        assert!(s.std.is_nan());
        assert_eq!(s.min, 4.0);
        assert_eq!(s.median, 4.0);
        assert_eq!(s.max, 4.0);
    }

    #[test]
    fn text_column_is_a_type_mismatch() {
        let df = frame("Game", vec!["Quarter 1".into(), "Quarter 2".into()]);
        assert!(matches!(
            analyze(&df, "Game"),
            Err(AnalysisError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn unknown_column_is_not_found() {
        let df = frame("x", vec![1.into()]);
        assert!(matches!(
            analyze(&df, "NonexistentColumn"),
            Err(AnalysisError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn display_lists_describe_rows() {
        let df = frame("Shots_Made", vec![1.into(), 2.into()]);
        let text = analyze(&df, "Shots_Made").unwrap().to_string();
        assert!(text.starts_with("count"));
        assert!(text.contains("50%"));
        assert!(text.ends_with("Name: Shots_Made"));
    }

    proptest! {
        #[test]
        fn prop_count_and_quartile_order(
            cells in prop::collection::vec(prop::option::of(-1.0e6f64..1.0e6), 1..64)
        ) {
            prop_assume!(cells.iter().any(Option::is_some));
            let present = cells.iter().filter(|c| c.is_some()).count();
            let df = frame("x", cells.into_iter().map(Value::from).collect());
            let s = analyze(&df, "x").unwrap();

            prop_assert_eq!(s.count, present);
            prop_assert!(s.min <= s.q25);
            prop_assert!(s.q25 <= s.median);
            prop_assert!(s.median <= s.q75);
            prop_assert!(s.q75 <= s.max);
        }
    }
}
