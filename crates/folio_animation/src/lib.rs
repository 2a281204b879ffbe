//! Folio Animation System
//!
//! Easing curves, interpolation and timeline orchestration for the Folio
//! motion components.
//!
//! # Features
//!
//! - **Easing**: the `power*.out`, `expo.out` and `elastic.out(a, p)` curves,
//!   parseable from configuration strings
//! - **Interpolation**: numbers, points, colors and style values
//! - **Timelines**: tweens and one-shot calls placed with relative positions,
//!   staggered across targets, scrubbable
//! - **Scheduler**: frame-ticked [`TimelineEngine`] reporting completions

pub mod easing;
pub mod error;
pub mod scheduler;
pub mod timeline;
pub mod values;

pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use scheduler::{AnimationScheduler, TimelineEngine, TimelineId};
pub use timeline::{
    Action, Channel, PlaybackState, Position, Timeline, TimelineEntryId, Tween,
    DEFAULT_DURATION_MS,
};
pub use values::{lerp, Interpolate};
