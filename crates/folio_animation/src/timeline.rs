//! Timeline orchestration
//!
//! A [`Timeline`] is an ordered list of entries placed on a millisecond
//! axis. Each entry is either a [`Tween`] (interpolates style channels of a
//! set of targets, optionally staggered) or a call [`Action`] (a one-shot
//! document mutation). Timelines are plain data until rendered against a
//! [`Document`]; the scheduler advances playing timelines each frame and
//! scroll triggers seek paused ones directly.
//!
//! ```
//! use folio_animation::{Easing, Position, Timeline, Tween};
//! use folio_platform::{Document, MemoryDocument, ElementSpec, Property};
//!
//! let mut doc = MemoryDocument::new();
//! let body = doc.body();
//! let item = doc.append(body, ElementSpec::new("li")).unwrap();
//!
//! let mut timeline = Timeline::new();
//! timeline.add(Tween::set([item]).to(Property::Y, 50.0), Position::Sequence);
//! timeline.add(
//!     Tween::new([item]).to(Property::Y, 0.0).duration_ms(500.0).easing(Easing::Linear),
//!     Position::Sequence,
//! );
//! timeline.start();
//! timeline.tick(250.0, &mut doc);
//! assert_eq!(doc.style(item, Property::Y).and_then(|v| v.as_number()), Some(25.0));
//! ```

use folio_platform::{Document, ElementId, Property, StyleValue};
use smallvec::SmallVec;

use crate::easing::Easing;
use crate::values::Interpolate;

/// Default tween duration
pub const DEFAULT_DURATION_MS: f32 = 500.0;

/// A style channel written by a tween
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Style(Property),
    /// Opacity that also toggles visibility (`hidden` at 0, `inherit` otherwise)
    AutoAlpha,
}

impl From<Property> for Channel {
    fn from(property: Property) -> Self {
        Channel::Style(property)
    }
}

impl Channel {
    fn read(&self, doc: &dyn Document, element: ElementId) -> Option<StyleValue> {
        let property = match self {
            Channel::Style(p) => *p,
            Channel::AutoAlpha => Property::Opacity,
        };
        doc.style(element, property)
            .or_else(|| property.initial_value())
    }

    fn write(&self, doc: &mut dyn Document, element: ElementId, value: StyleValue) {
        match self {
            Channel::Style(property) => doc.set_style(element, *property, value),
            Channel::AutoAlpha => {
                let visible = value.as_number().map(|o| o > 0.0).unwrap_or(true);
                doc.set_style(element, Property::Opacity, value);
                doc.set_style(
                    element,
                    Property::Visibility,
                    StyleValue::keyword(if visible { "inherit" } else { "hidden" }),
                );
            }
        }
    }
}

type ChannelValues = SmallVec<[(Channel, StyleValue); 4]>;

/// Interpolation of one or more channels across a set of targets
#[derive(Clone, Debug)]
pub struct Tween {
    targets: SmallVec<[ElementId; 4]>,
    to: ChannelValues,
    from: ChannelValues,
    duration_ms: f32,
    stagger_ms: f32,
    easing: Easing,
}

impl Tween {
    /// Tween from the targets' current values, 500 ms, default easing
    pub fn new(targets: impl IntoIterator<Item = ElementId>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            to: SmallVec::new(),
            from: SmallVec::new(),
            duration_ms: DEFAULT_DURATION_MS,
            stagger_ms: 0.0,
            easing: Easing::default(),
        }
    }

    /// Zero-duration tween: applies its values instantly
    pub fn set(targets: impl IntoIterator<Item = ElementId>) -> Self {
        Self::new(targets).duration_ms(0.0)
    }

    /// End value of a channel
    pub fn to(mut self, channel: impl Into<Channel>, value: impl Into<StyleValue>) -> Self {
        self.to.push((channel.into(), value.into()));
        self
    }

    /// Explicit start value of a channel
    ///
    /// Tweens with explicit start values render them immediately, before
    /// their start time is reached.
    pub fn from(mut self, channel: impl Into<Channel>, value: impl Into<StyleValue>) -> Self {
        self.from.push((channel.into(), value.into()));
        self
    }

    pub fn duration_ms(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms.max(0.0);
        self
    }

    /// Delay added per target, in target order
    pub fn stagger_ms(mut self, stagger_ms: f32) -> Self {
        self.stagger_ms = stagger_ms.max(0.0);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }

    /// Time from the first target's start to the last target's end
    pub fn span_ms(&self) -> f32 {
        let extra = self.targets.len().saturating_sub(1) as f32 * self.stagger_ms;
        self.duration_ms + extra
    }

    fn start_value(&self, channel: Channel) -> Option<&StyleValue> {
        self.from
            .iter()
            .find(|(c, _)| *c == channel)
            .map(|(_, v)| v)
    }
}

/// One-shot document mutation placed on a timeline
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    AddClass { element: ElementId, class: String },
    RemoveClass { element: ElementId, class: String },
    SetAttribute {
        element: ElementId,
        name: String,
        value: String,
    },
}

impl Action {
    pub fn add_class(element: ElementId, class: &str) -> Self {
        Action::AddClass {
            element,
            class: class.to_string(),
        }
    }

    pub fn remove_class(element: ElementId, class: &str) -> Self {
        Action::RemoveClass {
            element,
            class: class.to_string(),
        }
    }

    pub fn apply(&self, doc: &mut dyn Document) {
        match self {
            Action::AddClass { element, class } => doc.add_class(*element, class),
            Action::RemoveClass { element, class } => doc.remove_class(*element, class),
            Action::SetAttribute {
                element,
                name,
                value,
            } => doc.set_attribute(*element, name, value),
        }
    }
}

/// Where an entry is placed relative to the entries before it
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// At the current end of the timeline
    Sequence,
    /// At the start of the previously added entry
    WithPrevious,
    /// The given number of milliseconds after the previous entry's start
    AfterPreviousStart(f32),
    /// At an absolute time
    At(f32),
}

/// Identifier of an entry within its timeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimelineEntryId(usize);

/// Playback state of a timeline
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
    Completed,
}

#[derive(Clone, Debug)]
struct TweenTrack {
    tween: Tween,
    /// Start values per target, captured when the target first renders
    captured: Vec<Option<ChannelValues>>,
    /// Last progress written per target
    rendered: Vec<Option<f32>>,
    /// Channels no longer animated, per target
    killed: Vec<SmallVec<[Channel; 2]>>,
}

impl TweenTrack {
    fn is_target_dead(&self, index: usize) -> bool {
        let killed = &self.killed[index];
        !killed.is_empty() && self.tween.to.iter().all(|(channel, _)| killed.contains(channel))
    }

    fn is_dead(&self) -> bool {
        (0..self.tween.targets.len()).all(|index| self.is_target_dead(index))
    }

    /// Drop the channels of `element` matching `overlaps`, returning how many
    /// of its target slots lost a live channel
    fn kill(&mut self, element: ElementId, overlaps: &impl Fn(Channel) -> bool) -> usize {
        let mut affected = 0;
        for (index, target) in self.tween.targets.iter().enumerate() {
            if *target != element {
                continue;
            }
            let killed = &mut self.killed[index];
            let before = killed.len();
            for (channel, _) in &self.tween.to {
                if overlaps(*channel) && !killed.contains(channel) {
                    killed.push(*channel);
                }
            }
            if killed.len() > before {
                affected += 1;
            }
        }
        affected
    }
}

#[derive(Clone, Debug)]
enum EntryKind {
    Tween(TweenTrack),
    Call { action: Action, fired: bool },
}

#[derive(Clone, Debug)]
struct Entry {
    start_ms: f32,
    kind: EntryKind,
}

impl Entry {
    fn end_ms(&self) -> f32 {
        match &self.kind {
            EntryKind::Tween(track) => self.start_ms + track.tween.span_ms(),
            EntryKind::Call { .. } => self.start_ms,
        }
    }
}

/// Ordered set of tweens and calls
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    label: Option<String>,
    entries: Vec<Entry>,
    duration_ms: f32,
    time_ms: f32,
    previous_start_ms: f32,
    state: PlaybackState,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeline with a name used in logs
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn resolve(&self, position: Position) -> f32 {
        match position {
            Position::Sequence => self.duration_ms,
            Position::WithPrevious => self.previous_start_ms,
            Position::AfterPreviousStart(offset) => self.previous_start_ms + offset,
            Position::At(time) => time,
        }
        .max(0.0)
    }

    fn push(&mut self, position: Position, kind: EntryKind) -> TimelineEntryId {
        let start_ms = self.resolve(position);
        let entry = Entry { start_ms, kind };
        self.duration_ms = self.duration_ms.max(entry.end_ms());
        self.previous_start_ms = start_ms;
        self.entries.push(entry);
        TimelineEntryId(self.entries.len() - 1)
    }

    /// Add a tween at `position`
    pub fn add(&mut self, tween: Tween, position: Position) -> TimelineEntryId {
        let count = tween.targets.len();
        self.push(
            position,
            EntryKind::Tween(TweenTrack {
                tween,
                captured: vec![None; count],
                rendered: vec![None; count],
                killed: vec![SmallVec::new(); count],
            }),
        )
    }

    /// Add a one-shot action at `position`
    pub fn call(&mut self, action: Action, position: Position) -> TimelineEntryId {
        self.push(
            position,
            EntryKind::Call {
                action,
                fired: false,
            },
        )
    }

    /// Start time of an entry
    pub fn entry_start(&self, id: TimelineEntryId) -> Option<f32> {
        self.entries.get(id.0).map(|e| e.start_ms)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    pub fn time_ms(&self) -> f32 {
        self.time_ms
    }

    /// Overall progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return if self.state == PlaybackState::Idle { 0.0 } else { 1.0 };
        }
        (self.time_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn is_completed(&self) -> bool {
        self.state == PlaybackState::Completed
    }

    /// Stop animating `element`, returning how many tween targets were affected
    ///
    /// Other targets of the same tweens keep their stagger slots, and calls
    /// stay in place so the timeline still completes on schedule.
    pub fn kill_entries_targeting(&mut self, element: ElementId) -> usize {
        self.kill_where(element, &|_| true)
    }

    /// Stop animating only `channels` of `element`
    ///
    /// Tweens of that element on other channels keep running.
    pub fn kill_channels_targeting(&mut self, element: ElementId, channels: &[Channel]) -> usize {
        self.kill_where(element, &|channel| channels.contains(&channel))
    }

    fn kill_where(&mut self, element: ElementId, overlaps: &impl Fn(Channel) -> bool) -> usize {
        let mut killed = 0;
        for entry in &mut self.entries {
            if let EntryKind::Tween(track) = &mut entry.kind {
                killed += track.kill(element, overlaps);
            }
        }
        if killed > 0 {
            tracing::trace!(
                "Timeline {:?}: dropped {} tween target(s)",
                self.label.as_deref().unwrap_or("<unnamed>"),
                killed
            );
        }
        killed
    }

    /// Whether a call or a tween with a live target is left
    pub fn has_live_entries(&self) -> bool {
        self.entries.iter().any(|entry| match &entry.kind {
            EntryKind::Tween(track) => !track.is_dead(),
            EntryKind::Call { .. } => true,
        })
    }

    /// Start playing from time 0
    pub fn start(&mut self) {
        self.time_ms = 0.0;
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing || self.state == PlaybackState::Idle {
            self.state = PlaybackState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
        }
    }

    /// Advance a playing timeline by `dt_ms` and render it
    pub fn tick(&mut self, dt_ms: f32, doc: &mut dyn Document) -> PlaybackState {
        if self.state != PlaybackState::Playing {
            return self.state;
        }
        self.time_ms = (self.time_ms + dt_ms.max(0.0)).min(self.duration_ms);
        self.render(doc);
        if self.time_ms >= self.duration_ms {
            self.state = PlaybackState::Completed;
            tracing::debug!(
                "Timeline {:?} completed after {}ms",
                self.label.as_deref().unwrap_or("<unnamed>"),
                self.duration_ms
            );
        }
        self.state
    }

    /// Jump to `time_ms` and render, without changing the playback state
    pub fn seek(&mut self, time_ms: f32, doc: &mut dyn Document) {
        self.time_ms = time_ms.clamp(0.0, self.duration_ms);
        self.render(doc);
    }

    /// Jump to a fraction of the total duration
    pub fn seek_progress(&mut self, progress: f32, doc: &mut dyn Document) {
        self.seek(progress.clamp(0.0, 1.0) * self.duration_ms, doc);
    }

    /// Write the values of every entry at the current time
    pub fn render(&mut self, doc: &mut dyn Document) {
        let time = self.time_ms;
        for entry in &mut self.entries {
            let local = time - entry.start_ms;
            match &mut entry.kind {
                EntryKind::Call { action, fired } => {
                    if local >= 0.0 && !*fired {
                        action.apply(doc);
                        *fired = true;
                    } else if local < 0.0 && *fired {
                        // Rewound past the call: allow it to fire again
                        *fired = false;
                    }
                }
                EntryKind::Tween(track) => render_tween(track, local, doc),
            }
        }
    }
}

fn render_tween(track: &mut TweenTrack, local_ms: f32, doc: &mut dyn Document) {
    let tween = &track.tween;
    for (index, &target) in tween.targets.iter().enumerate() {
        if track.is_target_dead(index) {
            continue;
        }
        let target_local = local_ms - index as f32 * tween.stagger_ms;

        if track.captured[index].is_none() {
            // Relative tweens read their start values when they begin
            if target_local < 0.0 && tween.from.is_empty() {
                continue;
            }
            let start: ChannelValues = tween
                .to
                .iter()
                .map(|(channel, end)| {
                    let value = tween
                        .start_value(*channel)
                        .cloned()
                        .or_else(|| channel.read(doc, target))
                        .unwrap_or_else(|| end.clone());
                    (*channel, value)
                })
                .collect();
            track.captured[index] = Some(start);
        }

        let progress = if tween.duration_ms <= 0.0 {
            if target_local >= 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            (target_local / tween.duration_ms).clamp(0.0, 1.0)
        };
        if track.rendered[index] == Some(progress) {
            continue;
        }

        let eased = tween.easing.apply(progress);
        if let Some(start) = &track.captured[index] {
            for ((channel, from), (_, to)) in start.iter().zip(tween.to.iter()) {
                if track.killed[index].contains(channel) {
                    continue;
                }
                let value = if progress >= 1.0 {
                    to.clone()
                } else {
                    from.lerp(to, eased)
                };
                channel.write(doc, target, value);
            }
        }
        track.rendered[index] = Some(progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_platform::{ElementSpec, MemoryDocument};

    fn doc_with(count: usize) -> (MemoryDocument, Vec<ElementId>) {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let items = (0..count)
            .map(|_| doc.append(body, ElementSpec::new("li")).unwrap())
            .collect();
        (doc, items)
    }

    fn number(doc: &MemoryDocument, element: ElementId, property: Property) -> Option<f32> {
        doc.style(element, property).and_then(|v| v.as_number())
    }

    #[test]
    fn test_positions_resolve() {
        let (_, items) = doc_with(1);
        let mut timeline = Timeline::new();
        let a = timeline.add(Tween::new(items.clone()).duration_ms(300.0), Position::Sequence);
        let b = timeline.add(Tween::new(items.clone()).duration_ms(200.0), Position::Sequence);
        let c = timeline.add(Tween::new(items.clone()), Position::WithPrevious);
        let d = timeline.add(Tween::set(items.clone()), Position::AfterPreviousStart(50.0));
        let e = timeline.call(Action::add_class(items[0], "x"), Position::At(1000.0));

        assert_eq!(timeline.entry_start(a), Some(0.0));
        assert_eq!(timeline.entry_start(b), Some(300.0));
        assert_eq!(timeline.entry_start(c), Some(300.0));
        assert_eq!(timeline.entry_start(d), Some(350.0));
        assert_eq!(timeline.entry_start(e), Some(1000.0));
        assert_eq!(timeline.duration_ms(), 1000.0);
    }

    #[test]
    fn test_stagger_extends_span() {
        let (_, items) = doc_with(4);
        let tween = Tween::new(items).duration_ms(500.0).stagger_ms(100.0);
        assert_eq!(tween.span_ms(), 800.0);
    }

    #[test]
    fn test_relative_tween_reads_current_value() {
        let (mut doc, items) = doc_with(1);
        doc.set_style(items[0], Property::X, 100.0.into());

        let mut timeline = Timeline::new();
        timeline.add(
            Tween::new(items.clone())
                .to(Property::X, 0.0)
                .duration_ms(1000.0)
                .easing(Easing::Linear),
            Position::Sequence,
        );
        timeline.start();
        timeline.render(&mut doc);
        assert_eq!(number(&doc, items[0], Property::X), Some(100.0));

        timeline.tick(500.0, &mut doc);
        assert_eq!(number(&doc, items[0], Property::X), Some(50.0));

        assert_eq!(timeline.tick(600.0, &mut doc), PlaybackState::Completed);
        assert_eq!(number(&doc, items[0], Property::X), Some(0.0));
    }

    #[test]
    fn test_staggered_targets_start_in_order() {
        let (mut doc, items) = doc_with(3);
        let mut timeline = Timeline::new();
        timeline.add(
            Tween::new(items.clone())
                .to(Property::Y, 10.0)
                .duration_ms(100.0)
                .stagger_ms(100.0)
                .easing(Easing::Linear),
            Position::Sequence,
        );
        timeline.start();
        timeline.tick(150.0, &mut doc);

        assert_eq!(number(&doc, items[0], Property::Y), Some(10.0));
        assert_eq!(number(&doc, items[1], Property::Y), Some(5.0));
        assert_eq!(number(&doc, items[2], Property::Y), None);
    }

    #[test]
    fn test_from_values_render_immediately() {
        let (mut doc, items) = doc_with(2);
        let mut timeline = Timeline::new();
        timeline.add(
            Tween::new(items.clone())
                .from(Channel::AutoAlpha, 0.0)
                .to(Channel::AutoAlpha, 1.0)
                .stagger_ms(200.0),
            Position::Sequence,
        );
        timeline.pause();
        timeline.render(&mut doc);

        for item in &items {
            assert_eq!(number(&doc, *item, Property::Opacity), Some(0.0));
            assert_eq!(
                doc.style(*item, Property::Visibility),
                Some(StyleValue::keyword("hidden"))
            );
        }
    }

    #[test]
    fn test_seek_scrubs_both_ways() {
        let (mut doc, items) = doc_with(1);
        let mut timeline = Timeline::new();
        timeline.add(
            Tween::new(items.clone())
                .from(Property::Opacity, 0.2)
                .to(Property::Opacity, 1.0)
                .duration_ms(1000.0)
                .easing(Easing::Linear),
            Position::Sequence,
        );
        timeline.pause();

        timeline.seek_progress(1.0, &mut doc);
        assert_eq!(number(&doc, items[0], Property::Opacity), Some(1.0));
        timeline.seek_progress(0.0, &mut doc);
        assert_eq!(number(&doc, items[0], Property::Opacity), Some(0.2));
        assert_eq!(timeline.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_calls_fire_once_and_rearm_on_rewind() {
        let (mut doc, items) = doc_with(1);
        let mut timeline = Timeline::new();
        timeline.add(Tween::new(items.clone()).duration_ms(100.0), Position::Sequence);
        timeline.call(Action::add_class(items[0], "done"), Position::At(100.0));
        timeline.pause();

        timeline.seek(100.0, &mut doc);
        timeline.seek(100.0, &mut doc);
        let adds = doc
            .journal()
            .iter()
            .filter(|m| matches!(m, folio_platform::Mutation::ClassAdded { .. }))
            .count();
        assert_eq!(adds, 1);

        timeline.seek(0.0, &mut doc);
        timeline.seek(100.0, &mut doc);
        let adds = doc
            .journal()
            .iter()
            .filter(|m| matches!(m, folio_platform::Mutation::ClassAdded { .. }))
            .count();
        assert_eq!(adds, 2);
    }

    #[test]
    fn test_unchanged_progress_is_not_rewritten() {
        let (mut doc, items) = doc_with(1);
        let mut timeline = Timeline::new();
        timeline.add(Tween::set(items.clone()).to(Property::Y, 50.0), Position::Sequence);
        timeline.add(
            Tween::new(items.clone()).to(Property::X, 10.0).duration_ms(100.0),
            Position::Sequence,
        );
        timeline.start();
        timeline.render(&mut doc);
        let after_first = doc.mutation_count();
        timeline.render(&mut doc);
        assert_eq!(doc.mutation_count(), after_first);
    }

    #[test]
    fn test_zero_duration_timeline_completes_on_first_tick() {
        let (mut doc, items) = doc_with(1);
        let mut timeline = Timeline::new();
        timeline.add(
            Tween::set(items.clone()).to(Property::Display, "none"),
            Position::Sequence,
        );
        timeline.start();
        timeline.render(&mut doc);
        assert!(timeline.is_playing());
        assert_eq!(
            doc.style(items[0], Property::Display),
            Some(StyleValue::keyword("none"))
        );
        assert_eq!(timeline.tick(16.0, &mut doc), PlaybackState::Completed);
    }

    #[test]
    fn test_killed_target_stops_while_others_finish() {
        let (mut doc, items) = doc_with(3);
        let mut timeline = Timeline::new();
        timeline.add(
            Tween::new(items.clone())
                .to(Property::Y, 100.0)
                .duration_ms(100.0)
                .stagger_ms(50.0)
                .easing(Easing::Linear),
            Position::Sequence,
        );
        timeline.call(Action::add_class(items[2], "done"), Position::Sequence);
        timeline.start();
        timeline.tick(50.0, &mut doc);
        assert_eq!(number(&doc, items[0], Property::Y), Some(50.0));

        assert_eq!(timeline.kill_entries_targeting(items[0]), 1);
        assert_eq!(timeline.kill_entries_targeting(items[0]), 0);
        assert!(timeline.has_live_entries());

        let mut ticks = 0;
        while timeline.tick(50.0, &mut doc) != PlaybackState::Completed {
            ticks += 1;
            assert!(ticks < 100, "timeline never completed");
        }
        assert_eq!(number(&doc, items[0], Property::Y), Some(50.0));
        // Stagger slots are unchanged: the last target ends at 200ms
        assert_eq!(timeline.duration_ms(), 200.0);
        assert_eq!(number(&doc, items[1], Property::Y), Some(100.0));
        assert_eq!(number(&doc, items[2], Property::Y), Some(100.0));
        assert!(Document::has_class(&doc, items[2], "done"));
    }

    #[test]
    fn test_channel_kill_leaves_other_channels_running() {
        let (mut doc, items) = doc_with(1);
        let mut timeline = Timeline::new();
        timeline.add(
            Tween::new(items.clone())
                .to(Channel::AutoAlpha, 0.0)
                .to(Property::X, 100.0)
                .duration_ms(100.0)
                .easing(Easing::Linear),
            Position::Sequence,
        );
        timeline.start();
        timeline.tick(50.0, &mut doc);

        let moved = [Channel::Style(Property::X), Channel::Style(Property::Y)];
        assert_eq!(timeline.kill_channels_targeting(items[0], &moved), 1);
        assert_eq!(timeline.kill_channels_targeting(items[0], &moved), 0);
        assert!(timeline.has_live_entries());

        doc.set_style(items[0], Property::X, StyleValue::Number(7.0));
        timeline.tick(50.0, &mut doc);
        assert_eq!(number(&doc, items[0], Property::X), Some(7.0));
        assert_eq!(number(&doc, items[0], Property::Opacity), Some(0.0));
        assert_eq!(
            doc.style(items[0], Property::Visibility),
            Some(StyleValue::keyword("hidden"))
        );
    }

    #[test]
    fn test_timeline_without_live_entries() {
        let (_, items) = doc_with(2);
        let mut timeline = Timeline::new();
        timeline.add(Tween::new([items[0]]).to(Property::X, 10.0), Position::Sequence);
        timeline.add(Tween::new(items.clone()).to(Property::Y, 10.0), Position::Sequence);

        assert_eq!(timeline.kill_entries_targeting(items[0]), 2);
        assert!(timeline.has_live_entries());
        assert_eq!(timeline.kill_entries_targeting(items[1]), 1);
        assert!(!timeline.has_live_entries());
    }
}
