//! Media queries
//!
//! Read synchronously at decision points; components never subscribe to
//! live updates.

use crate::geometry::Size;

/// Queries a component can ask the host about
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MediaQuery {
    /// `(min-width: N px)`
    MinWidth(f32),
    /// `(max-width: N px)`
    MaxWidth(f32),
    /// `(prefers-reduced-motion: reduce)`
    PrefersReducedMotion,
}

pub trait MediaQueries {
    fn matches(&self, query: MediaQuery) -> bool;

    /// Inner size of the viewport
    fn viewport_size(&self) -> Size;
}

/// Viewport state supplied by the host
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub reduced_motion: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            reduced_motion: false,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            reduced_motion: false,
        }
    }

    pub fn reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
}

impl MediaQueries for Viewport {
    fn matches(&self, query: MediaQuery) -> bool {
        match query {
            MediaQuery::MinWidth(min) => self.width >= min,
            MediaQuery::MaxWidth(max) => self.width <= max,
            MediaQuery::PrefersReducedMotion => self.reduced_motion,
        }
    }

    fn viewport_size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
