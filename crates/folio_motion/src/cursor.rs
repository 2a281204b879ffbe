//! Cursor follower
//!
//! A decorative element trailing the pointer inside the page wrapper. Only
//! active on viewports wider than the breakpoint; resizing across it
//! attaches or detaches the follower.

use folio_animation::Interpolate;
use folio_platform::{Document, ElementId, ListenerId, ListenerKind, Point, PointerEvent, Property};

use crate::config::CursorConfig;
use crate::context::MotionContext;

/// Distance at which the follower snaps onto the pointer
const SETTLE_DISTANCE: f32 = 0.01;

#[derive(Debug)]
pub struct CursorFollower {
    follower: ElementId,
    wrapper: Option<ElementId>,
    config: CursorConfig,
    target: Point,
    current: Point,
    /// Position last written to the follower
    written: Option<Point>,
    listener: Option<ListenerId>,
    attached: bool,
}

impl CursorFollower {
    /// Returns `None` when the page has no `#cursorFollower`
    pub fn mount(cx: &mut MotionContext<'_>, config: CursorConfig) -> Option<Self> {
        let follower = cx.document.query("#cursorFollower")?;
        let wrapper = cx.document.query(".page-wrapper");
        let mut cursor = Self {
            follower,
            wrapper,
            config,
            target: Point::ZERO,
            current: Point::ZERO,
            written: None,
            listener: None,
            attached: false,
        };
        if cx.viewport_width() > cursor.config.breakpoint {
            cursor.attach(cx.document);
        }
        Some(cursor)
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn position(&self) -> Point {
        self.current
    }

    pub fn target(&self) -> Point {
        self.target
    }

    /// Whether the follower has caught up with the pointer
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    fn attach(&mut self, doc: &mut dyn Document) {
        self.target = Point::ZERO;
        self.current = Point::ZERO;
        self.written = None;
        self.listener = self
            .wrapper
            .map(|wrapper| doc.add_listener(wrapper, ListenerKind::PointerMove));
        self.attached = true;
        tracing::debug!("CursorFollower: attached");
    }

    fn detach(&mut self, doc: &mut dyn Document) {
        if let Some(listener) = self.listener.take() {
            doc.remove_listener(listener);
        }
        self.attached = false;
        tracing::debug!("CursorFollower: detached");
    }

    /// Track pointer moves over the page wrapper
    pub fn on_pointer(&mut self, cx: &mut MotionContext<'_>, event: &PointerEvent) {
        let (true, Some(wrapper), PointerEvent::Moved { target, position }) =
            (self.attached, self.wrapper, event)
        else {
            return;
        };
        if self.listener.is_none() || !cx.document.is_within(*target, wrapper) {
            return;
        }
        self.target = cx.document.bounding_rect(wrapper).relative(*position);
    }

    /// Ease toward the pointer; runs every frame while attached
    ///
    /// Once settled the follower is left alone until the pointer moves.
    pub fn tick(&mut self, cx: &mut MotionContext<'_>) {
        if !self.attached {
            return;
        }
        let next = self.current.lerp(&self.target, self.config.lerp);
        self.current = if next.approx_eq(&self.target, SETTLE_DISTANCE) {
            self.target
        } else {
            next
        };
        if self.written == Some(self.current) {
            return;
        }
        self.written = Some(self.current);
        cx.document
            .set_style(self.follower, Property::X, self.current.x.into());
        cx.document
            .set_style(self.follower, Property::Y, self.current.y.into());
    }

    /// Re-evaluate the breakpoint after a resize
    pub fn on_resize(&mut self, cx: &mut MotionContext<'_>) {
        let wide = cx.viewport_width() > self.config.breakpoint;
        if wide && !self.attached {
            self.attach(cx.document);
        } else if !wide && self.attached {
            self.detach(cx.document);
        }
    }

    pub fn destroy(&mut self, cx: &mut MotionContext<'_>) {
        if self.attached {
            self.detach(cx.document);
        }
    }
}
