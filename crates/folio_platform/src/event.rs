//! Page events delivered by the host

use crate::document::ElementId;
use crate::geometry::Point;

/// Events the host forwards to the page runtime
///
/// Animation frames are not events: the host drives them through
/// [`FrameDriver`](crate::FrameDriver) and the page's frame method.
#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    /// Primary click on `target`
    Click { target: ElementId },
    /// Pointer event (mouse, pen)
    Pointer(PointerEvent),
    /// Scroll position changed
    Scrolled,
    /// Viewport was resized
    Resized {
        /// New inner width in CSS pixels
        width: f32,
        /// New inner height in CSS pixels
        height: f32,
    },
    /// Web fonts finished loading
    FontsReady,
}

/// Pointer events in viewport coordinates
///
/// `target` is the innermost element under the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Entered { target: ElementId, position: Point },
    Moved { target: ElementId, position: Point },
    Left { target: ElementId, position: Point },
}

impl PointerEvent {
    pub fn target(&self) -> ElementId {
        match self {
            PointerEvent::Entered { target, .. }
            | PointerEvent::Moved { target, .. }
            | PointerEvent::Left { target, .. } => *target,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Entered { position, .. }
            | PointerEvent::Moved { position, .. }
            | PointerEvent::Left { position, .. } => *position,
        }
    }
}
