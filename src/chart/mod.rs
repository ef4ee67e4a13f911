//! Chart layer: chart parameters, colours, the renderer seam, and the three
//! chart kinds.
//!
//! ```text
//!   ChartSpec / column names
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  engine   │  validate columns → build series → labels/legend/grid
//!   └──────────┘
//!        │  Renderer primitives
//!        ▼
//!   ┌─────────────────────────┐
//!   │ Recorder  |  PlotWindow  │  keep Figure  |  egui window, blocks
//!   └─────────────────────────┘
//! ```

pub mod color;
pub mod engine;
pub mod figure;
pub mod labels;
pub mod render;
pub mod spec;
pub mod window;

pub use engine::{render_scatter, render_shot_distribution, render_trend};
pub use figure::{Figure, Layer, Recorder};
pub use render::Renderer;
pub use spec::{Alpha, ChartSpec, Palette};
pub use window::PlotWindow;
