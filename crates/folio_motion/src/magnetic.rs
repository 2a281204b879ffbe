//! Magnetic buttons
//!
//! `.magnetic-button` elements lean toward the pointer while it hovers them
//! and spring back when it leaves. Their label leans independently, and the
//! `.btn__bg` fill grows from wherever the pointer entered or left.
//!
//! Strengths come from the `data-strength` and `data-strength-text`
//! attributes; a missing or unparsable value means the part stays put.

use folio_animation::{Channel, Easing, Position, Timeline, Tween};
use folio_platform::{
    Document, ElementId, ListenerId, ListenerKind, Point, PointerEvent, Property,
};
use smallvec::SmallVec;

use crate::config::ButtonConfig;
use crate::context::MotionContext;

/// Channels a lean owns; other tweens of the same element keep running
const LEAN_CHANNELS: [Channel; 2] = [Channel::Style(Property::X), Channel::Style(Property::Y)];

#[derive(Debug)]
struct MagneticButton {
    button: ElementId,
    text: ElementId,
    background: ElementId,
    strength: f32,
    text_strength: f32,
    listeners: SmallVec<[ListenerId; 3]>,
}

fn strength(doc: &dyn Document, element: ElementId, name: &str) -> f32 {
    doc.attribute(element, name)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0.0)
}

#[derive(Debug)]
pub struct MagneticButtons {
    buttons: Vec<MagneticButton>,
    config: ButtonConfig,
}

impl MagneticButtons {
    /// Bind every complete `.magnetic-button`
    ///
    /// Buttons without a `.btn .text` label or a `.btn__bg` fill are skipped.
    pub fn mount(cx: &mut MotionContext<'_>, config: ButtonConfig) -> Self {
        let doc = &mut *cx.document;
        let mut buttons = Vec::new();
        for button in doc.query_all(".magnetic-button") {
            let (Some(text), Some(background)) = (
                doc.query_within(button, ".btn .text"),
                doc.query_within(button, ".btn__bg"),
            ) else {
                tracing::debug!("MagneticButtons: incomplete button {:?} skipped", button);
                continue;
            };
            let listeners = [
                ListenerKind::PointerEnter,
                ListenerKind::PointerMove,
                ListenerKind::PointerLeave,
            ]
            .into_iter()
            .map(|kind| doc.add_listener(button, kind))
            .collect();
            buttons.push(MagneticButton {
                button,
                text,
                background,
                strength: strength(doc, button, "data-strength"),
                text_strength: strength(doc, button, "data-strength-text"),
                listeners,
            });
        }
        tracing::debug!("MagneticButtons: {} button(s) bound", buttons.len());
        Self { buttons, config }
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Route a pointer event; returns whether a button handled it
    pub fn on_pointer(&mut self, cx: &mut MotionContext<'_>, event: &PointerEvent) -> bool {
        let Some(button) = self
            .buttons
            .iter()
            .find(|b| !b.listeners.is_empty() && cx.document.is_within(event.target(), b.button))
        else {
            return false;
        };
        let config = &self.config;
        let rect = cx.document.bounding_rect(button.button);
        let position = event.position();

        match event {
            PointerEvent::Entered { .. } => {
                set_origin(cx.document, button.background, rect.relative(position));
            }
            PointerEvent::Moved { .. } => {
                let offset = rect.offset_from_center(position);
                let lean = |strength: f32| {
                    Point::new(
                        offset.x * config.magnet_factor * strength,
                        offset.y * config.magnet_factor * strength,
                    )
                };
                move_to(
                    cx,
                    button.button,
                    lean(button.strength),
                    config.magnet_duration_ms,
                    config.magnet_ease,
                );
                move_to(
                    cx,
                    button.text,
                    lean(button.text_strength),
                    config.magnet_duration_ms,
                    config.magnet_ease,
                );
            }
            PointerEvent::Left { .. } => {
                move_to(
                    cx,
                    button.button,
                    Point::ZERO,
                    config.reset_duration_ms,
                    config.reset_ease,
                );
                move_to(
                    cx,
                    button.text,
                    Point::ZERO,
                    config.text_reset_duration_ms,
                    config.text_reset_ease,
                );
                set_origin(cx.document, button.background, rect.relative(position));
            }
        }
        true
    }

    pub fn destroy(&mut self, cx: &mut MotionContext<'_>) {
        for button in &mut self.buttons {
            for listener in button.listeners.drain(..) {
                cx.document.remove_listener(listener);
            }
            cx.timelines.kill_channels_of(button.button, &LEAN_CHANNELS);
            cx.timelines.kill_channels_of(button.text, &LEAN_CHANNELS);
        }
    }
}

fn set_origin(doc: &mut dyn Document, background: ElementId, origin: Point) {
    doc.set_style(background, Property::Left, origin.x.into());
    doc.set_style(background, Property::Top, origin.y.into());
}

/// Tween `element` to `offset`, replacing any tween already moving it
fn move_to(
    cx: &mut MotionContext<'_>,
    element: ElementId,
    offset: Point,
    duration_ms: f32,
    easing: Easing,
) {
    cx.timelines.kill_channels_of(element, &LEAN_CHANNELS);
    let mut timeline = Timeline::new();
    timeline.add(
        Tween::new([element])
            .to(Property::X, offset.x)
            .to(Property::Y, offset.y)
            .duration_ms(duration_ms)
            .easing(easing),
        Position::Sequence,
    );
    cx.timelines.play(timeline, cx.document);
}
