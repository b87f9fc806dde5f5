use crate::Rgba;

/// A single position together with its color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColoredPoint {
    pub position: [f32; 3],
    pub rgba: Rgba,
}
