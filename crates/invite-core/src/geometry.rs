//! Geometry supplied by the host view.

use serde::{Deserialize, Serialize};

/// Horizontal extent of a container, in logical pixels.
///
/// Only the horizontal axis matters to the slider and swipe controllers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge in client coordinates.
    pub left: f64,

    /// Width of the container.
    pub width: f64,
}

impl Bounds {
    /// Create bounds from a left edge and a width.
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }
}
