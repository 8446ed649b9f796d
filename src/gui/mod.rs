use std::f64::consts::PI;

pub mod chart;
pub mod theme;
pub(crate) mod view;

pub use chart::{ChartMsg, RingChart};

pub const CSS_CLASS: &str = "ring-chart";
/// Segment 0 starts at twelve o'clock, rotated back from cairo's
/// three o'clock angle zero.
pub const START_OFFSET: f64 = -PI / 2.0;
pub const LABEL_FONT_SIZE: f64 = 14.0;
pub const REFERENCE_SIZE: f64 = 120.0;
