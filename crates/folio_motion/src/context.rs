//! Motion context - the capabilities a component works through
//!
//! Components hold no references to the page. Each operation borrows a
//! [`MotionContext`] for its duration, so the page runtime (or a test) stays
//! the single owner of the document, the frame driver and the timelines.

use folio_animation::TimelineEngine;
use folio_platform::{Document, FrameDriver, MediaQueries, MediaQuery};

/// Borrowed host capabilities for one component operation
pub struct MotionContext<'a> {
    pub document: &'a mut dyn Document,
    pub timelines: &'a mut dyn TimelineEngine,
    pub frames: &'a mut dyn FrameDriver,
    pub media: &'a dyn MediaQueries,
}

impl<'a> MotionContext<'a> {
    pub fn new(
        document: &'a mut dyn Document,
        timelines: &'a mut dyn TimelineEngine,
        frames: &'a mut dyn FrameDriver,
        media: &'a dyn MediaQueries,
    ) -> Self {
        Self {
            document,
            timelines,
            frames,
            media,
        }
    }

    pub fn prefers_reduced_motion(&self) -> bool {
        self.media.matches(MediaQuery::PrefersReducedMotion)
    }

    /// `(min-width: breakpoint)`
    pub fn is_at_least(&self, breakpoint: f32) -> bool {
        self.media.matches(MediaQuery::MinWidth(breakpoint))
    }

    pub fn viewport_width(&self) -> f32 {
        self.media.viewport_size().width
    }

    pub fn viewport_height(&self) -> f32 {
        self.media.viewport_size().height
    }
}
