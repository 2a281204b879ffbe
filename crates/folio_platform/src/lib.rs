//! Folio Platform Abstraction Layer
//!
//! Host-agnostic capabilities consumed by the Folio motion components:
//!
//! - [`Document`] - selector queries, attributes, typed styles, class list,
//!   listeners and text splitting
//! - [`FrameDriver`] - cancellable one-shot "next frame" scheduling
//! - [`MediaQueries`] - viewport width and reduced-motion preference
//! - [`PageEvent`] - clicks, pointer, scroll, resize and font readiness
//!
//! # Backends
//!
//! - [`MemoryDocument`] + [`ManualFrameDriver`] - headless, journaled, used
//!   by tests and the `folio` simulator
//!
//! # Example
//!
//! ```
//! use folio_platform::prelude::*;
//!
//! let mut doc = MemoryDocument::new();
//! let body = doc.body();
//! let toggle = doc
//!     .append(body, ElementSpec::new("button").class("header__toggler"))
//!     .unwrap();
//!
//! assert_eq!(doc.query(".header__toggler"), Some(toggle));
//! doc.set_attribute(toggle, "aria-expanded", "false");
//! assert_eq!(doc.mutation_count(), 1);
//! ```

mod document;
mod error;
mod event;
mod frame;
mod geometry;
mod media;
mod memory;
mod selector;
mod style;

// Re-export all public types
pub use document::{Document, ElementId, ListenerId, ListenerKind, SplitKind};
pub use error::{PlatformError, Result};
pub use event::{PageEvent, PointerEvent};
pub use frame::{FrameDriver, FrameHandle, ManualFrameDriver};
pub use geometry::{Color, Point, Rect, Size};
pub use media::{MediaQueries, MediaQuery, Viewport};
pub use memory::{ElementSpec, MemoryDocument, Mutation, DEFAULT_JOURNAL_LIMIT};
pub use selector::Selector;
pub use style::{Property, StyleValue};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::document::{Document, ElementId, ListenerId, ListenerKind, SplitKind};
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{PageEvent, PointerEvent};
    pub use crate::frame::{FrameDriver, FrameHandle, ManualFrameDriver};
    pub use crate::geometry::{Color, Point, Rect, Size};
    pub use crate::media::{MediaQueries, MediaQuery, Viewport};
    pub use crate::memory::{ElementSpec, MemoryDocument, Mutation};
    pub use crate::style::{Property, StyleValue};
}
