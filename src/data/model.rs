use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Value – a single cell of the shot log
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a shot log carries.
/// Hue grouping puts values in a `BTreeSet`, so `Value` must be `Ord`.
/// Equality follows the ordering: floats compare by `total_cmp`.
#[derive(Debug, Clone)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put Value in BTreeSet --

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        use Value::*;
        // Integers and floats share one rank so numeric hues sort by magnitude.
        fn rank(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) | Float(_) => 2,
                Text(_) => 3,
            }
        }
        let ra = rank(self);
        let rb = rank(other);
        if ra != rb {
            return ra.cmp(&rb);
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Integer(a), Float(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (Float(a), Integer(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            (Text(a), Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Text(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    /// Numeric view of the cell. `None` for missing values (null or NaN)
    /// and for non-numeric cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) if !v.is_nan() => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Whether the cell counts as missing: null, or a NaN float.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Short dtype name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Null => "null",
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

// ---------------------------------------------------------------------------
// Column – one named field of the table
// ---------------------------------------------------------------------------

/// Whether a column supports ordering and correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Categorical => write!(f, "categorical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    /// Numeric when every present cell is an integer or float.
    /// A column with no present cells counts as numeric.
    pub fn kind(&self) -> ColumnKind {
        let numeric = self
            .values
            .iter()
            .filter(|v| !v.is_missing())
            .all(|v| matches!(v, Value::Integer(_) | Value::Float(_)));
        if numeric {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }

    /// The dtype of the first present cell that is not numeric, if any.
    fn offending_type(&self) -> &'static str {
        self.values
            .iter()
            .find(|v| !v.is_missing() && v.as_f64().is_none())
            .map_or("null", Value::type_name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded shot log
// ---------------------------------------------------------------------------

/// Column-major table with a name index. Built once, then read-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    index: BTreeMap<String, usize>,
    rows: usize,
}

impl Dataset {
    /// Build a dataset from columns sharing one row count.
    ///
    /// The first column fixes the row count; a later column of a different
    /// length is rejected. A repeated name replaces the earlier column.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, AnalysisError> {
        let rows = columns.first().map_or(0, Column::len);
        let mut dataset = Dataset {
            columns: Vec::with_capacity(columns.len()),
            index: BTreeMap::new(),
            rows,
        };
        for column in columns {
            let actual = column.len();
            if actual != rows {
                return Err(AnalysisError::LengthMismatch {
                    column: column.name,
                    expected: rows,
                    actual,
                });
            }
            match dataset.index.get(&column.name) {
                Some(&i) => dataset.columns[i] = column,
                None => {
                    dataset.index.insert(column.name.clone(), dataset.columns.len());
                    dataset.columns.push(column);
                }
            }
        }
        Ok(dataset)
    }

    /// Number of rows (shot events).
    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Result<&Column, AnalysisError> {
        self.index
            .get(name)
            .map(|&i| &self.columns[i])
            .ok_or_else(|| AnalysisError::ColumnNotFound {
                column: name.to_string(),
            })
    }

    pub fn is_numeric(&self, name: &str) -> Result<bool, AnalysisError> {
        Ok(self.column(name)?.kind() == ColumnKind::Numeric)
    }

    /// The column as `f64` cells, `None` marking a missing value.
    /// Fails with `TypeMismatch` on a categorical column.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<Option<f64>>, AnalysisError> {
        let column = self.column(name)?;
        if column.kind() != ColumnKind::Numeric {
            return Err(AnalysisError::TypeMismatch {
                column: name.to_string(),
                expected: ColumnKind::Numeric,
                found: column.offending_type(),
            });
        }
        Ok(column.values.iter().map(Value::as_f64).collect())
    }

    /// Sub-table holding only `names`, in the order given.
    pub fn select(&self, names: &[&str]) -> Result<Dataset, AnalysisError> {
        let columns = names
            .iter()
            .map(|name| self.column(name).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        if columns.is_empty() {
            return Ok(Dataset::default());
        }
        Dataset::from_columns(columns)
    }

    /// Sorted distinct values of a column, nulls included.
    pub fn unique_values(&self, name: &str) -> Result<BTreeSet<Value>, AnalysisError> {
        Ok(self.column(name)?.values.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shots() -> Dataset {
        Dataset::from_columns(vec![
            Column::new("Shots_Made", vec![10.into(), 8.into(), Value::Null]),
            Column::new("Game", vec!["Q1".into(), "Q2".into(), "Q3".into()]),
            Column::new("Location_X", vec![0.2.into(), f64::NAN.into(), 0.4.into()]),
        ])
        .unwrap()
    }

    #[test]
    fn column_kinds() {
        let df = shots();
        assert!(df.is_numeric("Shots_Made").unwrap());
        assert!(df.is_numeric("Location_X").unwrap());
        assert!(!df.is_numeric("Game").unwrap());
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let err = shots().column("Nope").unwrap_err();
        assert_eq!(
            err,
            AnalysisError::ColumnNotFound {
                column: "Nope".into()
            }
        );
    }

    #[test]
    fn numeric_values_mark_missing_cells() {
        let df = shots();
        assert_eq!(
            df.numeric_values("Shots_Made").unwrap(),
            vec![Some(10.0), Some(8.0), None]
        );
        assert_eq!(
            df.numeric_values("Location_X").unwrap(),
            vec![Some(0.2), None, Some(0.4)]
        );
    }

    #[test]
    fn numeric_values_reject_text() {
        let err = shots().numeric_values("Game").unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::TypeMismatch { found: "text", .. }
        ));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = Dataset::from_columns(vec![
            Column::new("a", vec![1.into(), 2.into()]),
            Column::new("b", vec![1.into()]),
        ])
        .unwrap_err();
        assert!(matches!(err, AnalysisError::LengthMismatch { actual: 1, .. }));
    }

    #[test]
    fn select_keeps_requested_order() {
        let sub = shots().select(&["Location_X", "Shots_Made"]).unwrap();
        assert_eq!(sub.column_names(), vec!["Location_X", "Shots_Made"]);
        assert_eq!(sub.row_count(), 3);
        assert!(shots().select(&["Location_X", "Missing"]).is_err());
    }

    #[test]
    fn all_null_column_is_numeric() {
        let df = Dataset::from_columns(vec![Column::new("x", vec![Value::Null; 4])]).unwrap();
        assert!(df.is_numeric("x").unwrap());
    }

    #[test]
    fn equality_agrees_with_ordering() {
        let pairs = [
            (Value::Float(0.0), Value::Float(-0.0)),
            (Value::Float(f64::NAN), Value::Float(f64::NAN)),
            (Value::Integer(1), Value::Float(1.0)),
            (Value::Text("a".into()), Value::Text("a".into())),
            (Value::Null, Value::Null),
        ];
        for (a, b) in pairs {
            assert_eq!(a == b, a.cmp(&b) == std::cmp::Ordering::Equal, "{a:?} vs {b:?}");
        }
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
    }

    #[test]
    fn length_mismatch_names_the_column() {
        let err = Dataset::from_columns(vec![
            Column::new("Shots_Made", vec![1.into(), 2.into(), 3.into()]),
            Column::new("Game", vec!["Q1".into()]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            AnalysisError::LengthMismatch {
                column: "Game".into(),
                expected: 3,
                actual: 1,
            }
        );
    }

    #[test]
    fn mixed_numeric_values_sort_by_magnitude() {
        let set: BTreeSet<Value> = [Value::Float(2.5), Value::Integer(3), Value::Integer(1)]
            .into_iter()
            .collect();
        let ordered: Vec<_> = set.into_iter().collect();
        assert_eq!(
            ordered,
            vec![Value::Integer(1), Value::Float(2.5), Value::Integer(3)]
        );
    }
}
