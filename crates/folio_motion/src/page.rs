//! Page runtime
//!
//! [`Page`] owns the document, the frame driver, the timelines and every
//! mounted component. The host forwards [`PageEvent`]s to [`Page::handle`] and
//! calls [`Page::frame`] once per animation frame; the page routes both to the
//! components that care.
//!
//! Components that cannot find their markup are simply absent. A page without
//! a menu still runs its preloader, cursor and reveals.

use folio_animation::AnimationScheduler;
use folio_platform::{Document, FrameDriver, PageEvent, Viewport};

use crate::config::MotionConfig;
use crate::context::MotionContext;
use crate::cursor::CursorFollower;
use crate::magnetic::MagneticButtons;
use crate::menu::MenuController;
use crate::preloader::Preloader;
use crate::reveal::ScrollReveals;

// =============================================================================
// Host
// =============================================================================

/// The capabilities shared by every component
#[derive(Debug)]
pub struct Host<D: Document, F: FrameDriver> {
    pub document: D,
    pub frames: F,
    pub timelines: AnimationScheduler,
    pub viewport: Viewport,
}

impl<D: Document, F: FrameDriver> Host<D, F> {
    pub fn new(document: D, frames: F, viewport: Viewport) -> Self {
        Self {
            document,
            frames,
            timelines: AnimationScheduler::new(),
            viewport,
        }
    }

    pub fn cx(&mut self) -> MotionContext<'_> {
        MotionContext::new(
            &mut self.document,
            &mut self.timelines,
            &mut self.frames,
            &self.viewport,
        )
    }
}

// =============================================================================
// Page
// =============================================================================

pub struct Page<D: Document, F: FrameDriver> {
    host: Host<D, F>,
    menu: Option<MenuController>,
    preloader: Option<Preloader>,
    cursor: Option<CursorFollower>,
    buttons: MagneticButtons,
    reveals: ScrollReveals,
    destroyed: bool,
}

impl<D: Document, F: FrameDriver> Page<D, F> {
    /// Mount every component the document has markup for
    pub fn new(document: D, frames: F, viewport: Viewport, config: MotionConfig) -> Self {
        let mut host = Host::new(document, frames, viewport);
        let MotionConfig {
            menu,
            cursor,
            button,
            text,
            skills,
            preloader,
        } = config;

        let mut cx = host.cx();
        let preloader = Preloader::mount(&mut cx, preloader);
        let menu = match MenuController::mount(&mut cx, menu) {
            Ok(menu) => Some(menu),
            Err(e) => {
                tracing::warn!("Page: running without a menu: {}", e);
                None
            }
        };
        let cursor = CursorFollower::mount(&mut cx, cursor);
        let buttons = MagneticButtons::mount(&mut cx, button);
        let reveals = ScrollReveals::mount(&mut cx, text, skills);

        tracing::debug!(
            "Page: mounted (menu: {}, preloader: {}, cursor: {}, {} magnetic button(s))",
            menu.is_some(),
            preloader.is_some(),
            cursor.is_some(),
            buttons.len()
        );

        Self {
            host,
            menu,
            preloader,
            cursor,
            buttons,
            reveals,
            destroyed: false,
        }
    }

    /// Route a host event; returns whether any component reacted
    pub fn handle(&mut self, event: PageEvent) -> bool {
        if self.destroyed {
            return false;
        }
        if let PageEvent::Resized { width, height } = event {
            self.host.viewport.resize(width, height);
        }
        let mut cx = self.host.cx();
        match event {
            PageEvent::Click { target } => self
                .menu
                .as_mut()
                .is_some_and(|menu| menu.handle_click(&mut cx, target)),
            PageEvent::Pointer(pointer) => {
                let mut handled = self.buttons.on_pointer(&mut cx, &pointer);
                if let Some(cursor) = self.cursor.as_mut() {
                    cursor.on_pointer(&mut cx, &pointer);
                    handled |= cursor.is_attached();
                }
                handled
            }
            PageEvent::Scrolled => {
                self.reveals.refresh(&mut cx);
                true
            }
            PageEvent::Resized { .. } => {
                if let Some(cursor) = self.cursor.as_mut() {
                    cursor.on_resize(&mut cx);
                }
                self.reveals.refresh(&mut cx);
                true
            }
            PageEvent::FontsReady => {
                let started = self
                    .preloader
                    .as_mut()
                    .is_some_and(|preloader| preloader.on_fonts_ready(&mut cx));
                self.reveals.on_fonts_ready(&mut cx);
                started
            }
        }
    }

    /// Run one animation frame of `dt_ms`
    ///
    /// Due frame callbacks run first, then the timelines advance and their
    /// completions are delivered, then the cursor follower eases. Returns
    /// whether a frame callback or timeline is still pending; the cursor
    /// follower alone does not keep the page busy.
    pub fn frame(&mut self, dt_ms: f32) -> bool {
        if self.destroyed {
            return false;
        }

        for handle in self.host.frames.drain_due() {
            if let Some(menu) = self.menu.as_mut() {
                menu.on_frame(&mut self.host.cx(), handle);
            }
        }

        let completed = self.host.timelines.tick(dt_ms, &mut self.host.document);
        let mut cx = self.host.cx();
        for id in completed {
            if let Some(menu) = self.menu.as_mut() {
                if menu.on_timeline_complete(id) {
                    continue;
                }
            }
            if let Some(preloader) = self.preloader.as_mut() {
                preloader.on_timeline_complete(&mut cx, id);
            }
        }

        if let Some(cursor) = self.cursor.as_mut() {
            cursor.tick(&mut cx);
        }

        self.is_busy()
    }

    /// Whether a frame callback or a playing timeline is pending
    pub fn is_busy(&self) -> bool {
        self.host.frames.pending() > 0 || self.host.timelines.has_active_animations()
    }

    pub fn toggle_menu(&mut self) -> bool {
        let mut cx = self.host.cx();
        self.menu
            .as_mut()
            .is_some_and(|menu| menu.toggle(&mut cx))
    }

    pub fn open_menu(&mut self) -> bool {
        let mut cx = self.host.cx();
        self.menu.as_mut().is_some_and(|menu| menu.open(&mut cx))
    }

    pub fn close_menu(&mut self) -> bool {
        let mut cx = self.host.cx();
        self.menu.as_mut().is_some_and(|menu| menu.close(&mut cx))
    }

    /// Tear down every component; later events and frames are ignored
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        let mut cx = self.host.cx();
        if let Some(menu) = self.menu.as_mut() {
            menu.destroy(&mut cx);
        }
        if let Some(preloader) = self.preloader.as_mut() {
            preloader.destroy(&mut cx);
        }
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.destroy(&mut cx);
        }
        self.buttons.destroy(&mut cx);
        self.reveals.destroy(&mut cx);
        drop(cx);

        let leftover = self.host.timelines.timeline_count();
        if leftover > 0 {
            tracing::debug!("Page: killing {} leftover timeline(s)", leftover);
            self.host.timelines.clear();
        }
        self.destroyed = true;
        tracing::debug!("Page: destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn document(&self) -> &D {
        &self.host.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.host.document
    }

    pub fn frames(&self) -> &F {
        &self.host.frames
    }

    pub fn timelines(&self) -> &AnimationScheduler {
        &self.host.timelines
    }

    pub fn viewport(&self) -> &Viewport {
        &self.host.viewport
    }

    pub fn menu(&self) -> Option<&MenuController> {
        self.menu.as_ref()
    }

    pub fn preloader(&self) -> Option<&Preloader> {
        self.preloader.as_ref()
    }

    pub fn cursor(&self) -> Option<&CursorFollower> {
        self.cursor.as_ref()
    }

    pub fn buttons(&self) -> &MagneticButtons {
        &self.buttons
    }

    pub fn reveals(&self) -> &ScrollReveals {
        &self.reveals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::SCROLL_LOCK_CLASS;
    use crate::shape::PathShape;
    use folio_platform::{
        ElementId, ElementSpec, ManualFrameDriver, MemoryDocument, Point, PointerEvent, Property,
        Rect, StyleValue,
    };

    struct Fixture {
        toggler: ElementId,
        button: ElementId,
    }

    fn portfolio(with_menu: bool) -> (MemoryDocument, Fixture) {
        let mut doc = MemoryDocument::new();
        let body = doc.body();

        let header = doc
            .append(body, ElementSpec::new("header").class("header"))
            .unwrap();
        let logo = doc
            .append(
                header,
                ElementSpec::new("a")
                    .class("logo")
                    .rect(Rect::new(40.0, 24.0, 120.0, 32.0)),
            )
            .unwrap();
        doc.append(logo, ElementSpec::new("span").class("logo__text").text("Folio"))
            .unwrap();
        doc.append(header, ElementSpec::new("a").class("header__action"))
            .unwrap();
        let toggler = doc
            .append(header, ElementSpec::new("button").class("header__toggler"))
            .unwrap();
        doc.append(toggler, ElementSpec::new("span").class("line line-1"))
            .unwrap();
        doc.append(toggler, ElementSpec::new("span").class("line line-2"))
            .unwrap();
        if with_menu {
            let menu = doc
                .append(header, ElementSpec::new("nav").class("header__menu"))
                .unwrap();
            doc.append(menu, ElementSpec::new("path").class("path"))
                .unwrap();
            let list = doc
                .append(menu, ElementSpec::new("ul").class("header__menu-list"))
                .unwrap();
            for label in ["Work", "About", "Contact"] {
                doc.append(list, ElementSpec::new("li").class("header__menu-item").text(label))
                    .unwrap();
            }
        }

        let intro = doc
            .append(body, ElementSpec::new("div").class("intro"))
            .unwrap();
        doc.append(intro, ElementSpec::new("div").class("intro__wrapper"))
            .unwrap();
        let intro_logo = doc
            .append(
                intro,
                ElementSpec::new("div")
                    .class("logo")
                    .rect(Rect::new(600.0, 380.0, 240.0, 64.0)),
            )
            .unwrap();
        doc.append(intro_logo, ElementSpec::new("span").class("logo__text").text("Folio"))
            .unwrap();

        let wrapper = doc
            .append(
                body,
                ElementSpec::new("main")
                    .class("page-wrapper")
                    .rect(Rect::new(0.0, 0.0, 1280.0, 4000.0)),
            )
            .unwrap();
        doc.append(wrapper, ElementSpec::new("div").id("cursorFollower"))
            .unwrap();
        let button = doc
            .append(
                wrapper,
                ElementSpec::new("div")
                    .class("magnetic-button")
                    .attr("data-strength", "1")
                    .rect(Rect::new(100.0, 600.0, 200.0, 60.0)),
            )
            .unwrap();
        let btn = doc
            .append(button, ElementSpec::new("a").class("btn"))
            .unwrap();
        doc.append(btn, ElementSpec::new("span").class("btn__bg"))
            .unwrap();
        doc.append(btn, ElementSpec::new("span").class("text").text("Say hi"))
            .unwrap();
        doc.append(
            wrapper,
            ElementSpec::new("p")
                .class("split-word")
                .text("Small studio, big ideas")
                .rect(Rect::new(0.0, 1200.0, 1280.0, 200.0)),
        )
        .unwrap();
        doc.append(
            wrapper,
            ElementSpec::new("li")
                .class("skill__item")
                .rect(Rect::new(0.0, 1800.0, 1280.0, 80.0)),
        )
        .unwrap();
        doc.append(
            wrapper,
            ElementSpec::new("h2")
                .class("sta")
                .text("Made\nwith care")
                .rect(Rect::new(0.0, 2600.0, 1280.0, 200.0)),
        )
        .unwrap();

        (doc, Fixture { toggler, button })
    }

    fn page(with_menu: bool) -> (Page<MemoryDocument, ManualFrameDriver>, Fixture) {
        let (doc, fixture) = portfolio(with_menu);
        let page = Page::new(
            doc,
            ManualFrameDriver::new(),
            Viewport::new(1280.0, 800.0),
            MotionConfig::default(),
        );
        (page, fixture)
    }

    fn settle(page: &mut Page<MemoryDocument, ManualFrameDriver>) -> usize {
        let mut frames = 0;
        while page.frame(16.0) {
            frames += 1;
            assert!(frames < 10_000, "page never settled");
        }
        frames
    }

    #[test]
    fn test_mounts_every_component() {
        let (page, _) = page(true);
        assert!(page.menu().is_some());
        assert!(page.preloader().is_some());
        assert!(page.cursor().is_some_and(CursorFollower::is_attached));
        assert_eq!(page.buttons().len(), 1);
        assert_eq!(page.reveals().triggers().len(), 2);
        let body = page.document().body();
        assert!(page.document().has_class(body, SCROLL_LOCK_CLASS));
    }

    #[test]
    fn test_fonts_ready_runs_intro() {
        let (mut page, _) = page(true);
        assert!(page.handle(PageEvent::FontsReady));
        assert_eq!(page.reveals().triggers().len(), 3);
        settle(&mut page);

        assert!(page.preloader().is_some_and(Preloader::is_finished));
        let doc = page.document();
        assert!(!doc.has_class(doc.body(), SCROLL_LOCK_CLASS));
        let intro = doc.query(".intro").unwrap();
        assert_eq!(
            doc.style(intro, Property::Display),
            Some(StyleValue::keyword("none"))
        );

        // Fonts only load once
        assert!(!page.handle(PageEvent::FontsReady));
    }

    #[test]
    fn test_header_button_lean_keeps_intro_running() {
        let (mut doc, _) = portfolio(true);
        let cta = doc.query(".header__action").unwrap();
        doc.add_class(cta, "magnetic-button");
        doc.set_attribute(cta, "data-strength", "1");
        doc.set_rect(cta, Rect::new(1000.0, 24.0, 120.0, 40.0));
        let btn = doc.append(cta, ElementSpec::new("span").class("btn")).unwrap();
        doc.append(btn, ElementSpec::new("span").class("btn__bg"))
            .unwrap();
        doc.append(btn, ElementSpec::new("span").class("text").text("Contact"))
            .unwrap();
        let mut page = Page::new(
            doc,
            ManualFrameDriver::new(),
            Viewport::new(1280.0, 800.0),
            MotionConfig::default(),
        );
        assert_eq!(page.buttons().len(), 2);

        assert!(page.handle(PageEvent::FontsReady));
        for _ in 0..60 {
            page.frame(16.0);
        }
        let event = PointerEvent::Moved {
            target: cta,
            position: Point::new(1100.0, 44.0),
        };
        assert!(page.handle(PageEvent::Pointer(event)));
        settle(&mut page);

        assert!(page.preloader().is_some_and(Preloader::is_finished));
        let doc = page.document();
        assert!(!doc.has_class(doc.body(), SCROLL_LOCK_CLASS));
        let intro = doc.query(".intro").unwrap();
        assert_eq!(
            doc.style(intro, Property::Display),
            Some(StyleValue::keyword("none"))
        );
        // The lean and the fade-in both land on the button
        assert_eq!(doc.style(cta, Property::X), Some(StyleValue::Number(20.0)));
        assert_eq!(doc.style(cta, Property::Opacity), Some(StyleValue::Number(1.0)));
    }

    #[test]
    fn test_click_drives_menu() {
        let (mut page, fixture) = page(true);
        let line = page.document().query(".line-1").unwrap();
        assert!(page.handle(PageEvent::Click { target: line }));

        let menu = page.menu().unwrap();
        assert!(menu.is_open());
        assert!(menu.is_animating());
        assert_eq!(
            page.document().attribute(fixture.toggler, "aria-expanded").as_deref(),
            Some("true")
        );

        // Ignored mid-transition
        assert!(!page.handle(PageEvent::Click { target: fixture.toggler }));

        settle(&mut page);
        let menu = page.menu().unwrap();
        assert!(!menu.is_animating());
        assert_eq!(menu.shape(), PathShape::OPEN);
        let path = menu.elements().path;
        assert_eq!(
            page.document().attribute(path, "d"),
            Some(PathShape::OPEN.path_data())
        );

        assert!(page.close_menu());
        settle(&mut page);
        assert_eq!(page.menu().unwrap().shape(), PathShape::CLOSED);
        assert!(!page.close_menu());
    }

    #[test]
    fn test_pointer_reaches_button_and_cursor() {
        let (mut page, fixture) = page(true);
        let event = PointerEvent::Moved {
            target: fixture.button,
            position: Point::new(250.0, 630.0),
        };
        assert!(page.handle(PageEvent::Pointer(event)));
        assert_eq!(
            page.cursor().map(CursorFollower::target),
            Some(Point::new(250.0, 630.0))
        );

        settle(&mut page);
        let x = page
            .document()
            .style(fixture.button, Property::X)
            .and_then(|v| v.as_number());
        assert_eq!(x, Some(25.0));
    }

    #[test]
    fn test_resize_below_breakpoint_detaches_cursor() {
        let (mut page, _) = page(true);
        page.handle(PageEvent::Resized {
            width: 768.0,
            height: 1024.0,
        });
        assert_eq!(page.viewport().width, 768.0);
        assert!(!page.cursor().unwrap().is_attached());
    }

    #[test]
    fn test_scroll_scrubs_reveals() {
        let (mut page, _) = page(true);
        let skill = page.document().query(".skill__item").unwrap();
        page.document_mut().scroll_to(1800.0);
        assert!(page.handle(PageEvent::Scrolled));
        assert_eq!(
            page.document().style(skill, Property::Opacity),
            Some(StyleValue::Number(1.0))
        );
    }

    #[test]
    fn test_runs_without_menu() {
        let (mut page, _) = page(false);
        assert!(page.menu().is_none());
        assert!(!page.toggle_menu());
        assert!(page.handle(PageEvent::FontsReady));
        settle(&mut page);
        assert!(page.preloader().is_some_and(Preloader::is_finished));
    }

    #[test]
    fn test_destroy_detaches_everything() {
        let (mut page, fixture) = page(true);
        page.toggle_menu();
        page.handle(PageEvent::FontsReady);
        page.destroy();

        assert!(page.is_destroyed());
        assert_eq!(page.document().listener_count(), 0);
        assert_eq!(page.timelines().timeline_count(), 0);
        assert!(!page.frame(16.0));
        assert!(!page.handle(PageEvent::Click {
            target: fixture.toggler
        }));
    }
}
