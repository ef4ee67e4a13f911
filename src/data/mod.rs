//! Data layer: the shot log table and its file loaders.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Dataset   │  Vec<Column>, name index, read-only
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;

pub use model::{Column, ColumnKind, Dataset, Value};
