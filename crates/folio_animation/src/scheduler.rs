//! Animation scheduler
//!
//! Owns every registered timeline and advances the playing ones once per
//! frame. Components never hold timelines directly: they hand a built
//! [`Timeline`] to a [`TimelineEngine`] and keep the returned [`TimelineId`],
//! which stays valid until the timeline completes or is killed.
//!
//! Completion is reported by [`AnimationScheduler::tick`], never from inside
//! `play`, so callers can store the id before reacting to its completion.

use folio_platform::{Document, ElementId};
use slotmap::{new_key_type, SlotMap};

use crate::timeline::{Channel, PlaybackState, Timeline};

new_key_type! {
    /// Handle to a registered timeline
    pub struct TimelineId;
}

/// Timeline playback capability consumed by the motion components
pub trait TimelineEngine {
    /// Register `timeline`, start it and render its first instant
    fn play(&mut self, timeline: Timeline, doc: &mut dyn Document) -> TimelineId;

    /// Register `timeline` paused at time 0, rendering explicit start values
    fn add_paused(&mut self, timeline: Timeline, doc: &mut dyn Document) -> TimelineId;

    /// Start a paused timeline from where it is
    fn resume(&mut self, id: TimelineId) -> bool;

    /// Render a timeline at a fraction of its duration
    fn seek_progress(&mut self, id: TimelineId, progress: f32, doc: &mut dyn Document) -> bool;

    /// Stop and discard a timeline without reporting completion
    fn kill(&mut self, id: TimelineId) -> bool;

    /// Stop every tween animating `element`, returning how many tween targets
    /// were dropped
    ///
    /// Timelines keep running for their other targets and calls; one is
    /// discarded only when nothing is left on it.
    fn kill_tweens_of(&mut self, element: ElementId) -> usize;

    /// Stop only the given channels of `element`, leaving its other tweens
    /// running
    fn kill_channels_of(&mut self, element: ElementId, channels: &[Channel]) -> usize;

    /// Whether `id` is still registered (playing or paused)
    fn is_active(&self, id: TimelineId) -> bool;
}

// ============================================================================
// Animation Scheduler
// ============================================================================

/// Frame-ticked timeline engine
#[derive(Debug, Default)]
pub struct AnimationScheduler {
    timelines: SlotMap<TimelineId, Timeline>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every playing timeline by `dt_ms`
    ///
    /// Returns the ids of the timelines that completed during this tick.
    /// Completed timelines are removed.
    pub fn tick(&mut self, dt_ms: f32, doc: &mut dyn Document) -> Vec<TimelineId> {
        let mut completed = Vec::new();
        for (id, timeline) in self.timelines.iter_mut() {
            if timeline.is_playing() && timeline.tick(dt_ms, doc) == PlaybackState::Completed {
                completed.push(id);
            }
        }
        for id in &completed {
            self.timelines.remove(*id);
        }
        if !completed.is_empty() {
            tracing::debug!(
                "AnimationScheduler: {} timeline(s) completed, {} remaining",
                completed.len(),
                self.timelines.len()
            );
        }
        completed
    }

    /// Apply `kill` to every timeline, discarding the ones it leaves empty
    fn kill_entries(&mut self, mut kill: impl FnMut(&mut Timeline) -> usize) -> usize {
        let mut killed = 0;
        self.timelines.retain(|id, timeline| {
            let dropped = kill(timeline);
            killed += dropped;
            if dropped > 0 && !timeline.has_live_entries() {
                tracing::trace!("AnimationScheduler: discarded emptied timeline {:?}", id);
                return false;
            }
            true
        });
        killed
    }

    /// Number of registered timelines (playing or paused)
    pub fn timeline_count(&self) -> usize {
        self.timelines.len()
    }

    /// Whether any registered timeline is playing
    pub fn has_active_animations(&self) -> bool {
        self.timelines.values().any(Timeline::is_playing)
    }

    /// Inspect a registered timeline
    pub fn with_timeline<R>(&self, id: TimelineId, f: impl FnOnce(&Timeline) -> R) -> Option<R> {
        self.timelines.get(id).map(f)
    }

    /// Kill everything
    pub fn clear(&mut self) {
        self.timelines.clear();
    }

    fn insert(&mut self, timeline: Timeline) -> TimelineId {
        let label = timeline.label().map(str::to_string);
        let id = self.timelines.insert(timeline);
        tracing::debug!(
            "AnimationScheduler: registered timeline {:?} ({:?})",
            id,
            label.as_deref().unwrap_or("<unnamed>")
        );
        id
    }
}

impl TimelineEngine for AnimationScheduler {
    fn play(&mut self, mut timeline: Timeline, doc: &mut dyn Document) -> TimelineId {
        timeline.start();
        timeline.render(doc);
        self.insert(timeline)
    }

    fn add_paused(&mut self, mut timeline: Timeline, doc: &mut dyn Document) -> TimelineId {
        timeline.pause();
        timeline.render(doc);
        self.insert(timeline)
    }

    fn resume(&mut self, id: TimelineId) -> bool {
        match self.timelines.get_mut(id) {
            Some(timeline) => {
                timeline.resume();
                true
            }
            None => false,
        }
    }

    fn seek_progress(&mut self, id: TimelineId, progress: f32, doc: &mut dyn Document) -> bool {
        match self.timelines.get_mut(id) {
            Some(timeline) => {
                timeline.seek_progress(progress, doc);
                true
            }
            None => false,
        }
    }

    fn kill(&mut self, id: TimelineId) -> bool {
        let killed = self.timelines.remove(id).is_some();
        if killed {
            tracing::debug!("AnimationScheduler: killed timeline {:?}", id);
        }
        killed
    }

    fn kill_tweens_of(&mut self, element: ElementId) -> usize {
        self.kill_entries(|timeline| timeline.kill_entries_targeting(element))
    }

    fn kill_channels_of(&mut self, element: ElementId, channels: &[Channel]) -> usize {
        self.kill_entries(|timeline| timeline.kill_channels_targeting(element, channels))
    }

    fn is_active(&self, id: TimelineId) -> bool {
        self.timelines.contains_key(id)
    }
}
