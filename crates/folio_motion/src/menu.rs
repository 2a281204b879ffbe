//! Hamburger menu controller
//!
//! Two tracks run for every transition:
//!
//! - **Timeline**: icon lines, panel interactivity, list visibility, logo color
//!   and the staggered item reveal, played by the [`TimelineEngine`].
//! - **Path morph**: the panel path's `y`/`c` scalars blended once per frame
//!   until they snap onto their target, driven by the [`FrameDriver`].
//!
//! Only the timeline gates re-entry: [`MenuController::is_animating`] clears
//! when the timeline completes, even if the path is still converging. A new
//! toggle cancels whatever is left of both tracks before starting its own.
//!
//! [`TimelineEngine`]: folio_animation::TimelineEngine
//! [`FrameDriver`]: folio_platform::FrameDriver

use folio_animation::{Action, Channel, Position, Timeline, TimelineId, Tween};
use folio_platform::{Document, ElementId, FrameHandle, ListenerId, ListenerKind, Property};

use crate::config::MenuConfig;
use crate::context::MotionContext;
use crate::error::{MotionError, Result};
use crate::shape::{LerpRates, PathShape};

/// Class locking page scroll while the menu is open
pub const SCROLL_LOCK_CLASS: &str = "no-scroll";

/// Class hiding the call-to-action
pub const HIDDEN_CLASS: &str = "hidden";

/// Elements the menu works on
#[derive(Clone, Debug, PartialEq)]
pub struct MenuElements {
    pub body: ElementId,
    /// `.header__menu .path`
    pub path: ElementId,
    /// `.header__toggler`
    pub toggle: ElementId,
    /// `.header__menu`
    pub panel: ElementId,
    /// `.logo__text`
    pub logo_text: ElementId,
    /// `.header__toggler .line-1`
    pub line_one: Option<ElementId>,
    /// `.header__toggler .line-2`
    pub line_two: Option<ElementId>,
    /// `.header__menu-list`
    pub list: Option<ElementId>,
    /// `.header__menu-list .header__menu-item`
    pub items: Vec<ElementId>,
    /// `.header__action`
    pub cta: Option<ElementId>,
}

impl MenuElements {
    /// Look the elements up, failing if any required one is absent
    pub fn query(doc: &dyn Document) -> Result<Self> {
        let path = doc.query(".header__menu .path");
        let toggle = doc.query(".header__toggler");
        let panel = doc.query(".header__menu");
        let logo_text = doc.query(".logo__text");

        let (Some(path), Some(toggle), Some(panel), Some(logo_text)) =
            (path, toggle, panel, logo_text)
        else {
            let missing = [
                (path.is_none(), "path"),
                (toggle.is_none(), "toggle"),
                (panel.is_none(), "panel"),
                (logo_text.is_none(), "logo text"),
            ]
            .into_iter()
            .filter_map(|(absent, name)| absent.then_some(name))
            .collect();
            return Err(MotionError::MissingElements {
                component: "Menu",
                missing,
            });
        };

        let list = doc.query(".header__menu-list");
        Ok(Self {
            body: doc.body(),
            path,
            toggle,
            panel,
            logo_text,
            line_one: doc.query_within(toggle, ".line-1"),
            line_two: doc.query_within(toggle, ".line-2"),
            list,
            items: list
                .map(|list| doc.query_all_within(list, ".header__menu-item"))
                .unwrap_or_default(),
            cta: doc.query(".header__action"),
        })
    }

    fn lines(&self) -> impl Iterator<Item = ElementId> {
        self.line_one.into_iter().chain(self.line_two)
    }
}

/// Frame request of the path morph, tagged with the transition it belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingFrame {
    handle: FrameHandle,
    generation: u64,
}

/// Open/closed state machine of the hamburger menu
#[derive(Debug)]
pub struct MenuController {
    elements: MenuElements,
    config: MenuConfig,
    is_open: bool,
    is_animating: bool,
    shape: PathShape,
    /// Incremented by every accepted toggle
    generation: u64,
    timeline: Option<TimelineId>,
    frame: Option<PendingFrame>,
    listener: Option<ListenerId>,
}

impl MenuController {
    /// Find the menu elements, apply the closed state and attach the click
    /// listener
    ///
    /// Nothing is written to the document when a required element is absent
    /// or when `config` would keep the path from converging.
    pub fn mount(cx: &mut MotionContext<'_>, config: MenuConfig) -> Result<Self> {
        let elements = match config
            .validate()
            .and_then(|()| MenuElements::query(&*cx.document))
        {
            Ok(elements) => elements,
            Err(err) => {
                tracing::warn!("{}", err);
                return Err(err);
            }
        };

        let doc = &mut *cx.document;
        doc.set_style(elements.panel, Property::PointerEvents, "none".into());
        doc.set_attribute(elements.toggle, "aria-expanded", "false");
        doc.set_attribute(elements.panel, "aria-hidden", "true");
        let listener = doc.add_listener(elements.toggle, ListenerKind::Click);

        tracing::debug!(
            "Menu: mounted with {} item(s), cta: {}",
            elements.items.len(),
            elements.cta.is_some()
        );

        Ok(Self {
            elements,
            config,
            is_open: false,
            is_animating: false,
            shape: PathShape::CLOSED,
            generation: 0,
            timeline: None,
            frame: None,
            listener: Some(listener),
        })
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn shape(&self) -> PathShape {
        self.shape
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn elements(&self) -> &MenuElements {
        &self.elements
    }

    /// Timeline of the transition in flight
    pub fn active_timeline(&self) -> Option<TimelineId> {
        self.timeline
    }

    /// Frame the path morph is waiting for
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.frame.map(|f| f.handle)
    }

    /// Whether the controller has been destroyed
    pub fn is_destroyed(&self) -> bool {
        self.listener.is_none()
    }

    /// Flip between open and closed
    ///
    /// Ignored while a transition's timeline is still playing. Returns whether
    /// the toggle was accepted.
    pub fn toggle(&mut self, cx: &mut MotionContext<'_>) -> bool {
        if self.is_destroyed() {
            return false;
        }
        if self.is_animating {
            tracing::trace!("Menu: toggle ignored, transition in flight");
            return false;
        }

        self.is_open = !self.is_open;
        self.is_animating = true;
        self.generation += 1;

        let doc = &mut *cx.document;
        doc.set_attribute(
            self.elements.toggle,
            "aria-expanded",
            if self.is_open { "true" } else { "false" },
        );
        doc.set_attribute(
            self.elements.panel,
            "aria-hidden",
            if self.is_open { "false" } else { "true" },
        );

        self.kill_current(cx);
        self.step_path(cx);

        let timeline = if self.is_open {
            self.open_timeline(cx.prefers_reduced_motion())
        } else {
            self.close_timeline()
        };
        self.timeline = Some(cx.timelines.play(timeline, cx.document));

        tracing::debug!(
            "Menu: {} (transition {})",
            if self.is_open { "opening" } else { "closing" },
            self.generation
        );
        true
    }

    /// Toggle only if closed
    pub fn open(&mut self, cx: &mut MotionContext<'_>) -> bool {
        !self.is_open && self.toggle(cx)
    }

    /// Toggle only if open
    pub fn close(&mut self, cx: &mut MotionContext<'_>) -> bool {
        self.is_open && self.toggle(cx)
    }

    /// Route a click; toggles when it landed on the toggle control
    pub fn handle_click(&mut self, cx: &mut MotionContext<'_>, target: ElementId) -> bool {
        if self.listener.is_none() || !cx.document.is_within(target, self.elements.toggle) {
            return false;
        }
        self.toggle(cx)
    }

    /// Advance the path morph for a due frame
    ///
    /// Frames other than the one this controller requested for its current
    /// transition are ignored.
    pub fn on_frame(&mut self, cx: &mut MotionContext<'_>, handle: FrameHandle) -> bool {
        match self.frame {
            Some(pending) if pending.handle == handle && pending.generation == self.generation => {
                self.frame = None;
                self.step_path(cx);
                true
            }
            _ => {
                tracing::trace!("Menu: stale frame {:?} ignored", handle);
                false
            }
        }
    }

    /// Completion of a timeline
    ///
    /// Clears `is_animating` when `id` is the current transition's timeline.
    pub fn on_timeline_complete(&mut self, id: TimelineId) -> bool {
        if self.timeline != Some(id) {
            return false;
        }
        self.timeline = None;
        self.is_animating = false;
        tracing::debug!(
            "Menu: transition {} timeline completed ({})",
            self.generation,
            if self.is_open { "open" } else { "closed" }
        );
        true
    }

    /// Stop both tracks and detach the click listener
    ///
    /// The document keeps whatever state the transition had reached.
    pub fn destroy(&mut self, cx: &mut MotionContext<'_>) {
        self.kill_current(cx);
        if let Some(listener) = self.listener.take() {
            cx.document.remove_listener(listener);
        }
        self.is_animating = false;
        tracing::debug!("Menu: destroyed");
    }

    fn kill_current(&mut self, cx: &mut MotionContext<'_>) {
        if let Some(id) = self.timeline.take() {
            cx.timelines.kill(id);
        }
        cx.timelines
            .kill_channels_of(self.elements.logo_text, &[Channel::Style(Property::Color)]);
        if let Some(pending) = self.frame.take() {
            cx.frames.cancel_frame(pending.handle);
        }
    }

    fn rates(&self, cx: &MotionContext<'_>) -> LerpRates {
        if self.is_open {
            self.config.lerp_open
        } else if cx.is_at_least(self.config.breakpoint) {
            self.config.lerp_close_large
        } else {
            self.config.lerp_close_small
        }
    }

    fn step_path(&mut self, cx: &mut MotionContext<'_>) {
        let target = PathShape::target(self.is_open);
        let step = self
            .shape
            .step_toward(target, self.rates(cx), self.config.threshold);
        self.shape = step.shape;
        self.write_path(cx.document);

        if step.settled {
            self.shape = target;
            self.write_path(cx.document);
            tracing::debug!("Menu: path settled at {:?}", target);
        } else {
            self.frame = Some(PendingFrame {
                handle: cx.frames.request_frame(),
                generation: self.generation,
            });
        }
    }

    fn write_path(&self, doc: &mut dyn Document) {
        doc.set_attribute(self.elements.path, "d", &self.shape.path_data());
    }

    fn open_timeline(&self, reduced_motion: bool) -> Timeline {
        let config = &self.config;
        let els = &self.elements;
        let (duration, stagger) = if reduced_motion {
            (config.reduced_duration_ms, 0.0)
        } else {
            (config.duration_ms, config.stagger_ms)
        };

        let mut timeline = Timeline::labeled("menu-open");
        timeline.add(
            Tween::set(els.lines()).to(Property::TransformOrigin, "50% 50%"),
            Position::Sequence,
        );
        if let Some(line) = els.line_one {
            timeline.add(
                Tween::set([line]).to(Property::Rotate, 45.0).to(Property::Y, 0.0),
                Position::Sequence,
            );
        }
        if let Some(line) = els.line_two {
            timeline.add(
                Tween::set([line]).to(Property::Rotate, -45.0).to(Property::Y, 0.0),
                Position::Sequence,
            );
        }
        timeline.call(Action::add_class(els.body, SCROLL_LOCK_CLASS), Position::Sequence);
        if let Some(list) = els.list {
            timeline.add(
                Tween::set([list]).to(Property::Display, "block"),
                Position::Sequence,
            );
        }
        timeline.add(
            Tween::set([els.panel]).to(Property::PointerEvents, "all"),
            Position::Sequence,
        );
        timeline.add(
            Tween::set(els.items.iter().copied())
                .to(Channel::AutoAlpha, 0.0)
                .to(Property::Y, config.item_offset),
            Position::Sequence,
        );
        if let Some(cta) = els.cta {
            timeline.call(
                Action::add_class(cta, HIDDEN_CLASS),
                Position::At(config.reveal_at_ms),
            );
        }
        timeline.add(
            Tween::new([els.logo_text])
                .to(Property::Color, config.text_dark)
                .duration_ms(duration),
            Position::At(config.reveal_at_ms),
        );
        timeline.add(
            Tween::new(els.items.iter().copied())
                .to(Channel::AutoAlpha, 1.0)
                .to(Property::Y, 0.0)
                .duration_ms(duration)
                .stagger_ms(stagger),
            Position::WithPrevious,
        );
        timeline
    }

    fn close_timeline(&self) -> Timeline {
        let config = &self.config;
        let els = &self.elements;

        let mut timeline = Timeline::labeled("menu-close");
        timeline.add(
            Tween::set(els.lines()).to(Property::TransformOrigin, "50% 50%"),
            Position::Sequence,
        );
        if let Some(line) = els.line_one {
            timeline.add(
                Tween::set([line])
                    .to(Property::Rotate, 0.0)
                    .to(Property::Y, -config.line_offset),
                Position::Sequence,
            );
        }
        if let Some(line) = els.line_two {
            timeline.add(
                Tween::set([line])
                    .to(Property::Rotate, 0.0)
                    .to(Property::Y, config.line_offset),
                Position::Sequence,
            );
        }
        timeline.add(
            Tween::set([els.panel]).to(Property::PointerEvents, "none"),
            Position::Sequence,
        );
        if let Some(list) = els.list {
            timeline.add(
                Tween::set([list]).to(Property::Display, "none"),
                Position::Sequence,
            );
        }
        timeline.add(
            Tween::set([els.logo_text]).to(Property::Color, config.text_light),
            Position::Sequence,
        );
        timeline.add(
            Tween::set(els.items.iter().copied())
                .to(Channel::AutoAlpha, 0.0)
                .to(Property::Y, config.item_offset),
            Position::Sequence,
        );
        timeline.call(
            Action::remove_class(els.body, SCROLL_LOCK_CLASS),
            Position::Sequence,
        );
        if let Some(cta) = els.cta {
            timeline.call(Action::remove_class(cta, HIDDEN_CLASS), Position::Sequence);
        }
        timeline
    }
}
