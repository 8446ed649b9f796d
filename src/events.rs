#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pointer interactions forwarded untouched to the embedding application.
/// The chart holds no interaction state of its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartEvent {
    Clicked { button: u32, position: Point },
    PointerEnter(Point),
    PointerLeave,
}
