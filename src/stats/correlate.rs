use std::fmt;

use serde::Serialize;

use crate::data::model::Dataset;
use crate::error::AnalysisError;

/// Symmetric 2×2 Pearson matrix for a pair of columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    columns: [String; 2],
    values: [[f64; 2]; 2],
}

impl CorrelationMatrix {
    pub fn columns(&self) -> [&str; 2] {
        [&self.columns[0], &self.columns[1]]
    }

    /// Entry at `(row, col)`; both indices must be 0 or 1.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }

    /// The off-diagonal coefficient between the two columns.
    pub fn coefficient(&self) -> f64 {
        self.values[0][1]
    }

    pub fn diagonal(&self) -> [f64; 2] {
        [self.values[0][0], self.values[1][1]]
    }
}

/// Pearson correlation of `a` and `b` over pairwise-complete rows.
///
/// Fewer than two complete rows, or a constant column, yields NaN rather
/// than an error.
pub fn correlate(dataset: &Dataset, a: &str, b: &str) -> Result<CorrelationMatrix, AnalysisError> {
    let pair = dataset.select(&[a, b])?;
    let xs = pair.numeric_values(a)?;
    let ys = pair.numeric_values(b)?;

    let (x, y): (Vec<f64>, Vec<f64>) = xs
        .into_iter()
        .zip(ys)
        .filter_map(|(x, y)| Some((x?, y?)))
        .unzip();

    log::debug!("correlating '{a}' and '{b}' over {} complete rows", x.len());

    let r = if a == b { self_correlation(&x) } else { pearson(&x, &y) };
    let self_a = self_correlation(&x);
    let self_b = self_correlation(&y);

    Ok(CorrelationMatrix {
        columns: [a.to_string(), b.to_string()],
        values: [[self_a, r], [r, self_b]],
    })
}

/// Exactly 1 for any column with spread, NaN otherwise.
fn self_correlation(x: &[f64]) -> f64 {
    let spread = x.windows(2).any(|w| w[0] != w[1]);
    if spread {
        1.0
    } else {
        f64::NAN
    }
}

/// Pearson coefficient of two equal-length samples, clamped to [-1, 1].
fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n < 2 || n != y.len() {
        return f64::NAN;
    }
    let mx = x.iter().sum::<f64>() / n as f64;
    let my = y.iter().sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mx;
        let dy = yi - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}

impl fmt::Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.columns.iter().map(String::len).max().unwrap_or(0).max(9);
        write!(f, "{:width$}", "")?;
        for name in &self.columns {
            write!(f, " {name:>width$}")?;
        }
        for (name, row) in self.columns.iter().zip(&self.values) {
            writeln!(f)?;
            write!(f, "{name:<width$}")?;
            for v in row {
                write!(f, " {v:>width$.6}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, Value};
    use proptest::prelude::*;

    fn shots() -> Dataset {
        let made = [10, 8, 15, 9, 5, 7, 20, 27];
        let attempted = [15, 10, 20, 12, 7, 15, 25, 30];
        Dataset::from_columns(vec![
            Column::new("Shots_Made", made.iter().map(|&v| v.into()).collect()),
            Column::new("Shots_Attempted", attempted.iter().map(|&v| v.into()).collect()),
            Column::new("Game", (1..=8).map(|q| format!("Quarter {q}").into()).collect()),
        ])
        .unwrap()
    }

    #[test]
    fn made_vs_attempted() {
        let m = correlate(&shots(), "Shots_Made", "Shots_Attempted").unwrap();
        assert_eq!(m.columns(), ["Shots_Made", "Shots_Attempted"]);
        assert!((m.get(0, 0) - 1.0).abs() < 1e-12);
        assert!((m.get(1, 1) - 1.0).abs() < 1e-12);
        assert_eq!(m.get(0, 1), m.get(1, 0));
        assert!(m.coefficient() > 0.95);
    }

    #[test]
    fn categorical_column_is_rejected() {
        assert!(matches!(
            correlate(&shots(), "Shots_Made", "Game"),
            Err(AnalysisError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn missing_column_is_rejected() {
        assert!(matches!(
            correlate(&shots(), "Shots_Made", "Free_Throws"),
            Err(AnalysisError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn column_against_itself_is_exactly_one() {
        let m = correlate(&shots(), "Shots_Made", "Shots_Made").unwrap();
        assert_eq!(m.columns(), ["Shots_Made", "Shots_Made"]);
        assert_eq!(m.values, [[1.0, 1.0], [1.0, 1.0]]);
    }

    #[test]
    fn constant_column_against_itself_is_nan() {
        let df = Dataset::from_columns(vec![Column::new("a", vec![3.into(); 4])]).unwrap();
        let m = correlate(&df, "a", "a").unwrap();
        assert!(m.coefficient().is_nan());
        assert!(m.diagonal()[1].is_nan());
    }

    #[test]
    fn pairwise_complete_rows_only() {
        let df = Dataset::from_columns(vec![
            Column::new("a", vec![1.into(), 2.into(), Value::Null, 4.into(), 5.into()]),
            Column::new("b", vec![2.into(), 4.into(), 6.into(), Value::Null, 10.into()]),
        ])
        .unwrap();
        // complete rows: (1,2) (2,4) (5,10) → perfectly linear
        let m = correlate(&df, "a", "b").unwrap();
        assert!((m.coefficient() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn too_few_rows_is_nan_not_error() {
        let df = Dataset::from_columns(vec![
            Column::new("a", vec![1.into(), Value::Null]),
            Column::new("b", vec![2.into(), 3.into()]),
        ])
        .unwrap();
        let m = correlate(&df, "a", "b").unwrap();
        assert!(m.coefficient().is_nan());
        assert!(m.diagonal()[0].is_nan());
    }

    #[test]
    fn constant_column_has_nan_coefficient() {
        let df = Dataset::from_columns(vec![
            Column::new("a", vec![3.into(), 3.into(), 3.into()]),
            Column::new("b", vec![1.into(), 2.into(), 3.into()]),
        ])
        .unwrap();
        let m = correlate(&df, "a", "b").unwrap();
        assert!(m.coefficient().is_nan());
        assert!((m.get(1, 1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn display_has_header_and_two_rows() {
        let text = correlate(&shots(), "Shots_Made", "Shots_Attempted")
            .unwrap()
            .to_string();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().next().unwrap().contains("Shots_Attempted"));
    }

    proptest! {
        #[test]
        fn prop_symmetric_with_unit_diagonal(
            rows in prop::collection::vec((-1.0e3f64..1.0e3, -1.0e3f64..1.0e3), 3..40)
        ) {
            let (a, b): (Vec<f64>, Vec<f64>) = rows.into_iter().unzip();
            let df = Dataset::from_columns(vec![
                Column::new("a", a.iter().map(|&v| v.into()).collect()),
                Column::new("b", b.iter().map(|&v| v.into()).collect()),
            ]).unwrap();

            let ab = correlate(&df, "a", "b").unwrap();
            let ba = correlate(&df, "b", "a").unwrap();
            let ab_r = ab.coefficient();
            let ba_r = ba.coefficient();
            prop_assert!(ab_r == ba_r || (ab_r.is_nan() && ba_r.is_nan()));

            let a_varies = a.iter().any(|&v| v != a[0]);
            if a_varies {
                prop_assert!((ab.get(0, 0) - 1.0).abs() < 1e-9);
            }
        }
    }
}
