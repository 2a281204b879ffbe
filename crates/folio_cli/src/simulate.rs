//! Headless simulations
//!
//! Each simulation mounts a [`Page`] over the demo portfolio, drives it with
//! fixed-length frames and prints what the document went through. The
//! returned reports carry the same numbers for callers that do not read
//! stdout.

use anyhow::{bail, Result};
use folio_motion::{MotionConfig, Page};
use folio_platform::{
    Document, ElementId, ManualFrameDriver, MemoryDocument, Mutation, PageEvent, Property,
    Viewport,
};

use crate::fixture::{self, Portfolio};

/// Upper bound on frames spent waiting for the page to go idle
const MAX_FRAMES: u64 = 100_000;

/// Last scroll offset of the scroll simulation
const SCROLL_END: f32 = 3200.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub open: bool,
    pub frames: u64,
    /// Every distinct `d` written to the panel path, in order
    pub path: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PreloadReport {
    pub elapsed_ms: f32,
    pub finished: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollRow {
    pub scroll_y: f32,
    /// Mean opacity of the split words
    pub words: f32,
    /// Opacity of each skill row
    pub skills: Vec<f32>,
    /// Opacity of the statement's first line
    pub lines: f32,
}

pub struct Simulation {
    page: Page<MemoryDocument, ManualFrameDriver>,
    path: ElementId,
    words: ElementId,
    skills: Vec<ElementId>,
    statement: ElementId,
    frame_ms: f32,
    elapsed_ms: f32,
}

impl Simulation {
    pub fn new(config: MotionConfig, viewport: Viewport, fps: f32) -> Result<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            bail!("Frame rate must be a positive number, got {}", fps);
        }
        let Portfolio {
            document,
            path,
            words,
            skills,
            statement,
        } = fixture::portfolio(viewport.width)?;
        tracing::debug!(
            "Simulating {}x{} at {} fps (reduced motion: {})",
            viewport.width,
            viewport.height,
            fps,
            viewport.reduced_motion
        );

        Ok(Self {
            page: Page::new(document, ManualFrameDriver::new(), viewport, config),
            path,
            words,
            skills,
            statement,
            frame_ms: 1000.0 / fps,
            elapsed_ms: 0.0,
        })
    }

    /// Run frames until the page is idle, calling `observe` after each one
    fn run_until_idle(&mut self, mut observe: impl FnMut(&Self)) -> Result<u64> {
        let mut frames = 0;
        loop {
            let busy = self.page.frame(self.frame_ms);
            self.elapsed_ms += self.frame_ms;
            frames += 1;
            observe(self);
            if !busy {
                return Ok(frames);
            }
            if frames >= MAX_FRAMES {
                bail!("Page still animating after {} frames", frames);
            }
        }
    }

    fn opacity(&self, element: ElementId) -> f32 {
        self.page
            .document()
            .style(element, Property::Opacity)
            .and_then(|v| v.as_number())
            .unwrap_or(1.0)
    }

    fn path_data(&self) -> Option<String> {
        self.page.document().attribute(self.path, "d")
    }

    // =========================================================================
    // Menu
    // =========================================================================

    /// Toggle the menu `toggles` times, letting each transition settle
    pub fn menu(&mut self, toggles: usize, journal: bool) -> Result<Vec<Transition>> {
        if self.page.menu().is_none() {
            bail!("The page has no menu to toggle");
        }

        let mut transitions = Vec::with_capacity(toggles);
        for n in 1..=toggles {
            self.page.document_mut().take_journal();
            if !self.page.toggle_menu() {
                bail!("Toggle {} was ignored", n);
            }
            let open = self.page.menu().is_some_and(|menu| menu.is_open());
            println!("toggle {} -> {}", n, if open { "open" } else { "closed" });

            let mut path: Vec<String> = self.path_data().into_iter().collect();
            let start_ms = self.elapsed_ms;
            if let Some(d) = path.first() {
                println!("  {:>8.1} ms  d=\"{}\"", 0.0, d);
            }
            let frames = self.run_until_idle(|sim| {
                let Some(d) = sim.path_data() else { return };
                if path.last() != Some(&d) {
                    println!("  {:>8.1} ms  d=\"{}\"", sim.elapsed_ms - start_ms, d);
                    path.push(d);
                }
            })?;
            println!(
                "  settled after {} frames ({:.0} ms)",
                frames,
                self.elapsed_ms - start_ms
            );

            if journal {
                let mutations = self.page.document_mut().take_journal();
                println!("  {} mutation(s):", mutations.len());
                for mutation in &mutations {
                    println!("    {}", describe(mutation));
                }
            }
            transitions.push(Transition { open, frames, path });
        }
        Ok(transitions)
    }

    // =========================================================================
    // Preloader
    // =========================================================================

    /// Deliver fonts-ready and run the intro to completion
    pub fn preload(&mut self) -> Result<PreloadReport> {
        if self.page.preloader().is_none() {
            bail!("The page has no intro to play");
        }
        let doc = self.page.document();
        let (Some(logo), header) = (doc.query(".intro .logo"), doc.query(".header")) else {
            bail!("The intro has no logo");
        };

        self.page.handle(PageEvent::FontsReady);
        let start_ms = self.elapsed_ms;
        let mut next_report = 0.0;
        self.run_until_idle(|sim| {
            let t = sim.elapsed_ms - start_ms;
            if t < next_report {
                return;
            }
            next_report += 250.0;
            let doc = sim.page.document();
            let number = |element, property| {
                doc.style(element, property)
                    .and_then(|v| v.as_number())
                    .unwrap_or(0.0)
            };
            println!(
                "  {:>8.1} ms  logo at ({:.1}, {:.1})  header opacity {:.2}",
                t,
                number(logo, Property::Left),
                number(logo, Property::Top),
                header.map(|h| sim.opacity(h)).unwrap_or(1.0)
            );
        })?;

        let report = PreloadReport {
            elapsed_ms: self.elapsed_ms - start_ms,
            finished: self.page.preloader().is_some_and(|p| p.is_finished()),
        };
        println!(
            "intro {} after {:.0} ms",
            if report.finished { "finished" } else { "still running" },
            report.elapsed_ms
        );
        Ok(report)
    }

    // =========================================================================
    // Scroll
    // =========================================================================

    /// Scroll down the page in `step` pixel increments
    pub fn scroll(&mut self, step: f32) -> Result<Vec<ScrollRow>> {
        if !step.is_finite() || step <= 0.0 {
            bail!("Scroll step must be a positive number, got {}", step);
        }

        // Line reveals need fonts; the intro plays out first
        self.page.handle(PageEvent::FontsReady);
        self.run_until_idle(|_| {})?;

        println!("  scroll   words   skills            lines");
        let mut rows = Vec::new();
        let mut scroll_y = 0.0;
        while scroll_y <= SCROLL_END {
            self.page.document_mut().scroll_to(scroll_y);
            self.page.handle(PageEvent::Scrolled);
            self.run_until_idle(|_| {})?;

            let row = self.row(scroll_y);
            let skills: Vec<String> = row.skills.iter().map(|o| format!("{:.2}", o)).collect();
            println!(
                "  {:>6.0}   {:.2}    {:<16}  {:.2}",
                row.scroll_y,
                row.words,
                skills.join(" "),
                row.lines
            );
            rows.push(row);
            scroll_y += step;
        }
        Ok(rows)
    }

    fn row(&self, scroll_y: f32) -> ScrollRow {
        let doc = self.page.document();
        let words = doc.children(self.words);
        let words = if words.is_empty() {
            self.opacity(self.words)
        } else {
            words.iter().map(|w| self.opacity(*w)).sum::<f32>() / words.len() as f32
        };
        let lines = doc
            .children(self.statement)
            .first()
            .map(|line| self.opacity(*line))
            .unwrap_or_else(|| self.opacity(self.statement));
        ScrollRow {
            scroll_y,
            words,
            skills: self.skills.iter().map(|s| self.opacity(*s)).collect(),
            lines,
        }
    }
}

/// One journal entry as a log line
pub fn describe(mutation: &Mutation) -> String {
    match mutation {
        Mutation::Attribute {
            element,
            name,
            value,
        } => format!("{:?} [{}] = \"{}\"", element, name, value),
        Mutation::Style {
            element,
            property,
            value,
        } => format!("{:?} {}: {}", element, property, value),
        Mutation::ClassAdded { element, class } => format!("{:?} +.{}", element, class),
        Mutation::ClassRemoved { element, class } => format!("{:?} -.{}", element, class),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_motion::PathShape;

    fn settled_path(open: bool) -> String {
        PathShape::target(open).path_data()
    }

    fn simulation(viewport: Viewport) -> Simulation {
        Simulation::new(MotionConfig::default(), viewport, 60.0).unwrap()
    }

    #[test]
    fn test_rejects_bad_frame_rate() {
        assert!(Simulation::new(MotionConfig::default(), Viewport::default(), 0.0).is_err());
        assert!(Simulation::new(MotionConfig::default(), Viewport::default(), f32::NAN).is_err());
    }

    #[test]
    fn test_menu_open_close() {
        let mut sim = simulation(Viewport::new(1440.0, 900.0));
        let transitions = sim.menu(2, true).unwrap();

        assert_eq!(transitions.len(), 2);
        assert!(transitions[0].open);
        assert!(!transitions[1].open);
        assert_eq!(transitions[0].path.last(), Some(&settled_path(true)));
        assert_eq!(transitions[1].path.last(), Some(&settled_path(false)));
        // Large screens close slower than they open
        assert!(transitions[1].frames > transitions[0].frames);
    }

    #[test]
    fn test_reduced_motion_menu_settles() {
        let mut sim = simulation(Viewport::new(800.0, 900.0).reduced_motion(true));
        let transitions = sim.menu(1, false).unwrap();
        assert_eq!(transitions[0].path.last(), Some(&settled_path(true)));
    }

    #[test]
    fn test_preload_finishes() {
        let mut sim = simulation(Viewport::new(1440.0, 900.0));
        let report = sim.preload().unwrap();
        assert!(report.finished);
        assert!(report.elapsed_ms >= 4000.0);
    }

    #[test]
    fn test_scroll_reveals_progress() {
        let mut sim = simulation(Viewport::new(1440.0, 900.0));
        let rows = sim.scroll(400.0).unwrap();

        let first = rows.first().unwrap();
        let last = rows.last().unwrap();
        assert!((first.words - 0.2).abs() < 1e-4);
        assert_eq!(first.lines, 0.0);
        assert_eq!(last.words, 1.0);
        assert!(last.skills.iter().all(|o| *o == 1.0));
        assert_eq!(last.lines, 1.0);
    }

    #[test]
    fn test_describe_mutation() {
        let element = ElementId::default();
        let line = describe(&Mutation::ClassAdded {
            element,
            class: "no-scroll".to_string(),
        });
        assert!(line.ends_with("+.no-scroll"));
    }
}
