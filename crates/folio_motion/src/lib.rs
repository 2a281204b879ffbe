//! Folio Motion Components
//!
//! The interactive layer of the Folio portfolio site, written against the
//! [`Document`](folio_platform::Document) seam so it runs headless as well as
//! in a host.
//!
//! # Components
//!
//! - [`MenuController`]: hamburger menu with ARIA state, a declarative
//!   open/close timeline and a morphing SVG panel path
//! - [`Preloader`]: intro overlay handing over to the header once fonts load
//! - [`CursorFollower`]: element trailing the pointer on wide viewports
//! - [`MagneticButtons`]: buttons leaning toward the pointer
//! - [`ScrollReveals`]: word, skill and line reveals tied to scroll
//!
//! [`Page`] mounts all of them over one document and routes host events and
//! animation frames.
//!
//! # Example
//!
//! ```ignore
//! use folio_motion::prelude::*;
//!
//! let mut page = Page::new(document, frames, Viewport::new(1440.0, 900.0), MotionConfig::default());
//!
//! // Host event loop
//! page.handle(PageEvent::FontsReady);
//! page.handle(PageEvent::Click { target });
//! while page.frame(16.0) {}
//! ```

pub mod config;
pub mod context;
pub mod cursor;
pub mod error;
pub mod magnetic;
pub mod menu;
pub mod page;
pub mod preloader;
pub mod reveal;
pub mod shape;

pub use config::{
    ButtonConfig, CursorConfig, MenuConfig, MotionConfig, PreloaderConfig, SkillsConfig,
    TextConfig,
};
pub use context::MotionContext;
pub use cursor::CursorFollower;
pub use error::{MotionError, Result};
pub use magnetic::MagneticButtons;
pub use menu::{MenuController, MenuElements, HIDDEN_CLASS, SCROLL_LOCK_CLASS};
pub use page::{Host, Page};
pub use preloader::{Preloader, PreloaderElements, PreloaderState};
pub use reveal::{ScrollReveals, ScrollTrigger, TriggerMode};
pub use shape::{LerpRates, PathShape, Step};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::MotionConfig;
    pub use crate::context::MotionContext;
    pub use crate::menu::MenuController;
    pub use crate::page::Page;
    pub use folio_platform::{
        Document, FrameDriver, ManualFrameDriver, MemoryDocument, PageEvent, PointerEvent,
        Viewport,
    };
}
