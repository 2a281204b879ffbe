//! Menu panel shape
//!
//! The panel is an SVG path whose top edge is a Bézier curve. Two scalars
//! drive it: `y` (the height of the straight sides) and `c` (the control
//! point of the curve). Both sit at 100 while closed and at 0 while open.

use serde::{Deserialize, Serialize};

use folio_animation::lerp;

/// Per-frame blend rates for the two shape scalars
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LerpRates {
    pub y: f32,
    pub c: f32,
}

impl LerpRates {
    pub const OPEN: LerpRates = LerpRates { y: 0.099, c: 0.125 };
    pub const CLOSE_LARGE: LerpRates = LerpRates { y: 0.033, c: 0.041 };
    pub const CLOSE_SMALL: LerpRates = LerpRates { y: 0.099, c: 0.125 };
}

/// Current shape of the panel path
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathShape {
    pub y: f32,
    pub c: f32,
}

/// Result of one interpolation step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    /// Blended shape for this frame
    pub shape: PathShape,
    /// Both scalars are within the threshold of the target
    pub settled: bool,
}

impl PathShape {
    pub const CLOSED: PathShape = PathShape { y: 100.0, c: 100.0 };
    pub const OPEN: PathShape = PathShape { y: 0.0, c: 0.0 };

    pub fn target(open: bool) -> Self {
        if open {
            Self::OPEN
        } else {
            Self::CLOSED
        }
    }

    /// Blend toward `target` once
    pub fn step_toward(&self, target: PathShape, rates: LerpRates, threshold: f32) -> Step {
        let shape = PathShape {
            y: lerp(self.y, target.y, rates.y),
            c: lerp(self.c, target.c, rates.c),
        };
        let settled =
            (shape.y - target.y).abs() <= threshold && (shape.c - target.c).abs() <= threshold;
        Step { shape, settled }
    }

    /// The `d` attribute of the panel path
    pub fn path_data(&self) -> String {
        let (y, c) = (self.y, self.c);
        format!("M 0 {y} L 0 100 100 100 100 {y} C 50 {c}, 50 {c}, 0 {y}")
    }
}

impl Default for PathShape {
    fn default() -> Self {
        Self::CLOSED
    }
}
