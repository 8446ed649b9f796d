pub mod config;
pub mod events;
pub mod geometry;
pub mod gui;
pub mod render;

pub use config::{ChartConfig, ChartError, ColorToken, LineCap};
pub use events::{ChartEvent, Point};
pub use gui::{ChartMsg, RingChart};
