//! Intro preloader
//!
//! While the intro overlay is up the header controls are hidden and the page
//! is scroll-locked. Once fonts are ready the intro logo assembles itself
//! (letters, icon, border), flies to the header logo's position and hands
//! over to the header; the overlay then disappears.

use folio_animation::{Channel, Position, Timeline, TimelineId, Tween};
use folio_platform::{Document, ElementId, Property, SplitKind};

use crate::config::PreloaderConfig;
use crate::context::MotionContext;
use crate::menu::SCROLL_LOCK_CLASS;

#[derive(Clone, Debug, PartialEq)]
pub struct PreloaderElements {
    pub body: ElementId,
    /// `.intro`
    pub intro: ElementId,
    /// `.intro .intro__wrapper`
    pub background: Option<ElementId>,
    /// `.intro .logo`
    pub logo: Option<ElementId>,
    /// `.intro .logo__icon`
    pub logo_icon: Option<ElementId>,
    /// `.intro .logo__text`
    pub logo_text: ElementId,
    /// `.intro .logo__border`
    pub logo_border: Option<ElementId>,
    /// `.header`
    pub header: Option<ElementId>,
    /// `.header .logo`
    pub header_logo: ElementId,
    /// `.header__action`
    pub header_button: Option<ElementId>,
    /// `.header__toggler`
    pub header_menu: Option<ElementId>,
}

impl PreloaderElements {
    pub fn query(doc: &dyn Document) -> Option<Self> {
        let intro = doc.query(".intro")?;
        let logo_text = doc.query(".intro .logo__text");
        let header_logo = doc.query(".header .logo");
        let (Some(logo_text), Some(header_logo)) = (logo_text, header_logo) else {
            tracing::debug!("Preloader: intro logo text or header logo missing, skipped");
            return None;
        };
        Some(Self {
            body: doc.body(),
            intro,
            background: doc.query(".intro .intro__wrapper"),
            logo: doc.query(".intro .logo"),
            logo_icon: doc.query(".intro .logo__icon"),
            logo_text,
            logo_border: doc.query(".intro .logo__border"),
            header: doc.query(".header"),
            header_logo,
            header_button: doc.query(".header__action"),
            header_menu: doc.query(".header__toggler"),
        })
    }

    fn header_controls(&self) -> impl Iterator<Item = ElementId> {
        self.header_button.into_iter().chain(self.header_menu)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreloaderState {
    /// Waiting for fonts
    Waiting,
    Playing(TimelineId),
    Finished,
}

#[derive(Debug)]
pub struct Preloader {
    elements: PreloaderElements,
    config: PreloaderConfig,
    state: PreloaderState,
}

impl Preloader {
    /// Hide the header controls and lock scrolling
    ///
    /// Returns `None` when the page has no intro.
    pub fn mount(cx: &mut MotionContext<'_>, config: PreloaderConfig) -> Option<Self> {
        let elements = PreloaderElements::query(&*cx.document)?;

        let mut hide = Timeline::labeled("preloader-hide");
        hide.add(
            Tween::set([elements.header_logo].into_iter().chain(elements.header_controls()))
                .to(Channel::AutoAlpha, 0.0),
            Position::Sequence,
        );
        cx.timelines.play(hide, cx.document);
        cx.document.add_class(elements.body, SCROLL_LOCK_CLASS);

        tracing::debug!("Preloader: mounted, waiting for fonts");
        Some(Self {
            elements,
            config,
            state: PreloaderState::Waiting,
        })
    }

    pub fn state(&self) -> PreloaderState {
        self.state
    }

    pub fn elements(&self) -> &PreloaderElements {
        &self.elements
    }

    pub fn is_finished(&self) -> bool {
        self.state == PreloaderState::Finished
    }

    /// Start the intro sequence; only the first call has an effect
    pub fn on_fonts_ready(&mut self, cx: &mut MotionContext<'_>) -> bool {
        if self.state != PreloaderState::Waiting {
            return false;
        }

        let chars = cx
            .document
            .split_text(self.elements.logo_text, SplitKind::Chars);
        let timeline = self.intro_timeline(cx.document, chars);
        let id = cx.timelines.play(timeline, cx.document);
        self.state = PreloaderState::Playing(id);

        tracing::debug!("Preloader: intro started");
        true
    }

    pub fn on_timeline_complete(&mut self, cx: &mut MotionContext<'_>, id: TimelineId) -> bool {
        if self.state != PreloaderState::Playing(id) {
            return false;
        }
        let doc = &mut *cx.document;
        doc.set_style(self.elements.intro, Property::Display, "none".into());
        doc.remove_class(self.elements.body, SCROLL_LOCK_CLASS);
        doc.revert_split(self.elements.logo_text);
        self.state = PreloaderState::Finished;

        tracing::debug!("Preloader: finished");
        true
    }

    /// Kill a running intro, leaving the page as it is
    pub fn destroy(&mut self, cx: &mut MotionContext<'_>) {
        if let PreloaderState::Playing(id) = self.state {
            cx.timelines.kill(id);
            cx.document.revert_split(self.elements.logo_text);
        }
        self.state = PreloaderState::Finished;
    }

    fn intro_timeline(&self, doc: &mut dyn Document, chars: Vec<ElementId>) -> Timeline {
        let config = &self.config;
        let els = &self.elements;
        let target = doc.bounding_rect(els.header_logo);

        let mut timeline = Timeline::labeled("preloader");
        timeline.add(
            Tween::new(els.logo.into_iter().chain([els.logo_text]))
                .to(Channel::AutoAlpha, 1.0)
                .duration_ms(config.fade_ms),
            Position::Sequence,
        );
        if let Some(icon) = els.logo_icon {
            timeline.add(
                Tween::new([icon])
                    .to(Channel::AutoAlpha, 1.0)
                    .to(Property::Scale, 1.0)
                    .duration_ms(config.icon_ms),
                Position::Sequence,
            );
        }
        timeline.add(
            Tween::new(chars)
                .to(Channel::AutoAlpha, 1.0)
                .to(Property::X, 0.0)
                .duration_ms(config.char_ms)
                .stagger_ms(config.char_stagger_ms),
            Position::Sequence,
        );
        if let Some(border) = els.logo_border {
            timeline.add(
                Tween::new([border])
                    .to(Property::StrokeDashoffset, 0.0)
                    .duration_ms(config.border_ms),
                Position::Sequence,
            );
        }
        if let Some(logo) = els.logo {
            // Offsets come from layout until the logo is first moved
            let current = doc.bounding_rect(logo);
            if doc.style(logo, Property::Left).is_none() {
                doc.set_style(logo, Property::Left, current.left().into());
            }
            if doc.style(logo, Property::Top).is_none() {
                doc.set_style(logo, Property::Top, current.top().into());
            }
            timeline.add(
                Tween::new([logo])
                    .to(Property::Left, target.left())
                    .to(Property::Top, target.top())
                    .to(Property::XPercent, 0.0)
                    .to(Property::YPercent, 0.0)
                    .duration_ms(config.move_ms),
                Position::Sequence,
            );
        }
        if let Some(header) = els.header {
            timeline.add(
                Tween::new([header])
                    .to(Channel::AutoAlpha, 1.0)
                    .duration_ms(config.fade_ms),
                Position::WithPrevious,
            );
        }
        timeline.add(
            Tween::new(els.header_controls())
                .to(Channel::AutoAlpha, 1.0)
                .duration_ms(config.fade_ms),
            Position::AfterPreviousStart(config.controls_delay_ms),
        );
        timeline.add(
            Tween::set([els.header_logo]).to(Channel::AutoAlpha, 1.0),
            Position::Sequence,
        );
        if let Some(background) = els.background {
            timeline.add(
                Tween::new([background])
                    .to(Channel::AutoAlpha, 0.0)
                    .duration_ms(config.fade_ms),
                Position::WithPrevious,
            );
        }
        timeline
    }
}
