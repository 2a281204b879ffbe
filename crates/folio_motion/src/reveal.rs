//! Scroll-triggered reveals
//!
//! - `.split-word` paragraphs brighten word by word, scrubbed by scroll
//! - `.skill__item` rows rise and fade in, scrubbed by scroll
//! - the `.sta` statement slides in line by line once, after fonts load
//!
//! Trigger positions compare the element's top edge against a fraction of the
//! viewport height. Scrubbed reveals map the distance between their start and
//! end positions onto timeline progress, so scrolling back reverses them.

use folio_animation::{Channel, Position, Timeline, TimelineId, Tween};
use folio_platform::{Document, ElementId, Property, SplitKind, StyleValue};

use crate::config::{SkillsConfig, TextConfig};
use crate::context::MotionContext;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerMode {
    /// Progress follows scroll between the start and `end` positions
    Scrub { end: f32 },
    /// Plays once when the start position is first reached
    PlayOnce { fired: bool },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollTrigger {
    pub element: ElementId,
    /// Fraction of the viewport height
    pub start: f32,
    pub mode: TriggerMode,
    pub timeline: TimelineId,
}

impl ScrollTrigger {
    /// Scrub progress for an element top at `top` in a viewport `height` tall
    pub fn progress(&self, top: f32, height: f32) -> f32 {
        let start = self.start * height;
        let end = match self.mode {
            TriggerMode::Scrub { end } => end * height,
            TriggerMode::PlayOnce { .. } => start,
        };
        if (start - end).abs() < f32::EPSILON {
            return if top <= start { 1.0 } else { 0.0 };
        }
        ((start - top) / (start - end)).clamp(0.0, 1.0)
    }
}

#[derive(Debug)]
pub struct ScrollReveals {
    triggers: Vec<ScrollTrigger>,
    /// Elements whose text was split
    split: Vec<ElementId>,
    text: TextConfig,
    skills: SkillsConfig,
    lines_mounted: bool,
}

impl ScrollReveals {
    /// Split and prepare the word and skill reveals, then evaluate them
    pub fn mount(cx: &mut MotionContext<'_>, text: TextConfig, skills: SkillsConfig) -> Self {
        let mut reveals = Self {
            triggers: Vec::new(),
            split: Vec::new(),
            text,
            skills,
            lines_mounted: false,
        };

        for element in cx.document.query_all(".split-word") {
            let words = cx.document.split_text(element, SplitKind::Words);
            reveals.split.push(element);
            let config = &reveals.text;
            let mut timeline = Timeline::labeled("split-word");
            timeline.add(
                Tween::new(words)
                    .from(Property::Opacity, config.word_start_opacity)
                    .to(Property::Opacity, 1.0)
                    .duration_ms(config.word_duration_ms)
                    .stagger_ms(config.word_stagger_ms)
                    .easing(config.word_ease),
                Position::Sequence,
            );
            let (start, end) = (config.word_start, config.word_end);
            reveals.scrub(cx, element, timeline, start, end);
        }

        for item in cx.document.query_all(".skill__item") {
            let config = &reveals.skills;
            let mut timeline = Timeline::labeled("skill");
            timeline.add(
                Tween::new([item])
                    .from(Property::Y, config.distance)
                    .from(Channel::AutoAlpha, 0.0)
                    .to(Channel::AutoAlpha, 1.0)
                    .to(Property::Y, 0.0)
                    .duration_ms(config.duration_ms)
                    .easing(config.ease),
                Position::Sequence,
            );
            let (start, end) = (config.start, config.end);
            reveals.scrub(cx, item, timeline, start, end);
        }

        tracing::debug!("ScrollReveals: {} trigger(s)", reveals.triggers.len());
        reveals.refresh(cx);
        reveals
    }

    fn scrub(
        &mut self,
        cx: &mut MotionContext<'_>,
        element: ElementId,
        timeline: Timeline,
        start: f32,
        end: f32,
    ) {
        let timeline = cx.timelines.add_paused(timeline, cx.document);
        self.triggers.push(ScrollTrigger {
            element,
            start,
            mode: TriggerMode::Scrub { end },
            timeline,
        });
    }

    pub fn triggers(&self) -> &[ScrollTrigger] {
        &self.triggers
    }

    /// Prepare the line reveal; needs final font metrics
    pub fn on_fonts_ready(&mut self, cx: &mut MotionContext<'_>) {
        if self.lines_mounted {
            return;
        }
        self.lines_mounted = true;
        let Some(element) = cx.document.query(".sta") else {
            return;
        };

        let lines = cx.document.split_text(element, SplitKind::Lines);
        self.split.push(element);
        cx.document
            .set_style(element, Property::Opacity, StyleValue::Number(1.0));

        let config = &self.text;
        let mut timeline = Timeline::labeled("lines");
        timeline.add(
            Tween::new(lines)
                .from(Property::YPercent, 100.0)
                .from(Property::Opacity, 0.0)
                .to(Property::YPercent, 0.0)
                .to(Property::Opacity, 1.0)
                .duration_ms(config.line_duration_ms)
                .stagger_ms(config.line_stagger_ms)
                .easing(config.line_ease),
            Position::Sequence,
        );
        let timeline = cx.timelines.add_paused(timeline, cx.document);
        self.triggers.push(ScrollTrigger {
            element,
            start: self.text.line_start,
            mode: TriggerMode::PlayOnce { fired: false },
            timeline,
        });
        self.refresh(cx);
    }

    /// Re-evaluate every trigger against the current layout and scroll
    pub fn refresh(&mut self, cx: &mut MotionContext<'_>) {
        let height = cx.viewport_height();
        for trigger in &mut self.triggers {
            let top = cx.document.bounding_rect(trigger.element).top();
            let progress = trigger.progress(top, height);
            match &mut trigger.mode {
                TriggerMode::Scrub { .. } => {
                    cx.timelines
                        .seek_progress(trigger.timeline, progress, cx.document);
                }
                TriggerMode::PlayOnce { fired } => {
                    if !*fired && progress >= 1.0 {
                        *fired = true;
                        cx.timelines.resume(trigger.timeline);
                        tracing::debug!("ScrollReveals: line reveal started");
                    }
                }
            }
        }
    }

    /// Kill every trigger and restore the split text
    pub fn destroy(&mut self, cx: &mut MotionContext<'_>) {
        for trigger in self.triggers.drain(..) {
            cx.timelines.kill(trigger.timeline);
        }
        for element in self.split.drain(..) {
            cx.document.revert_split(element);
        }
    }
}
