//! The demo portfolio page the simulations run against

use anyhow::{Context, Result};
use folio_platform::{Document, ElementId, ElementSpec, MemoryDocument, Rect};

/// Elements the simulations report on
pub struct Portfolio {
    pub document: MemoryDocument,
    pub path: ElementId,
    pub words: ElementId,
    pub skills: Vec<ElementId>,
    pub statement: ElementId,
}

const MENU_ITEMS: [&str; 4] = ["Work", "About", "Journal", "Contact"];
const SKILLS: [&str; 3] = ["Art direction", "Motion", "Front-end"];

/// Header, intro overlay and a long page body laid out for `width`
pub fn portfolio(width: f32) -> Result<Portfolio> {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let header = add(&mut doc, body, ElementSpec::new("header").class("header"))?;
    let logo = add(
        &mut doc,
        header,
        ElementSpec::new("a")
            .class("logo")
            .rect(Rect::new(40.0, 24.0, 140.0, 32.0)),
    )?;
    add(
        &mut doc,
        logo,
        ElementSpec::new("span").class("logo__text").text("Folio"),
    )?;
    add(
        &mut doc,
        header,
        ElementSpec::new("a").class("header__action btn").text("Let's talk"),
    )?;
    let toggler = add(
        &mut doc,
        header,
        ElementSpec::new("button")
            .class("header__toggler")
            .attr("aria-label", "Menu"),
    )?;
    add(&mut doc, toggler, ElementSpec::new("span").class("line line-1"))?;
    add(&mut doc, toggler, ElementSpec::new("span").class("line line-2"))?;
    let menu = add(&mut doc, header, ElementSpec::new("nav").class("header__menu"))?;
    let svg = add(&mut doc, menu, ElementSpec::new("svg"))?;
    let path = add(&mut doc, svg, ElementSpec::new("path").class("path"))?;
    let list = add(
        &mut doc,
        menu,
        ElementSpec::new("ul").class("header__menu-list"),
    )?;
    for item in MENU_ITEMS {
        add(
            &mut doc,
            list,
            ElementSpec::new("li").class("header__menu-item").text(item),
        )?;
    }

    let intro = add(&mut doc, body, ElementSpec::new("div").class("intro"))?;
    add(&mut doc, intro, ElementSpec::new("div").class("intro__wrapper"))?;
    let intro_logo = add(
        &mut doc,
        intro,
        ElementSpec::new("div")
            .class("logo")
            .rect(Rect::new(width / 2.0 - 120.0, 380.0, 240.0, 64.0)),
    )?;
    add(&mut doc, intro_logo, ElementSpec::new("svg").class("logo__icon"))?;
    add(
        &mut doc,
        intro_logo,
        ElementSpec::new("span").class("logo__text").text("Folio"),
    )?;
    add(&mut doc, intro_logo, ElementSpec::new("path").class("logo__border"))?;

    let wrapper = add(
        &mut doc,
        body,
        ElementSpec::new("main")
            .class("page-wrapper")
            .rect(Rect::new(0.0, 0.0, width, 4200.0)),
    )?;
    add(&mut doc, wrapper, ElementSpec::new("div").id("cursorFollower"))?;
    let button = add(
        &mut doc,
        wrapper,
        ElementSpec::new("div")
            .class("magnetic-button")
            .attr("data-strength", "1.2")
            .attr("data-strength-text", "0.6")
            .rect(Rect::new(80.0, 620.0, 220.0, 64.0)),
    )?;
    let btn = add(&mut doc, button, ElementSpec::new("a").class("btn"))?;
    add(&mut doc, btn, ElementSpec::new("span").class("btn__bg"))?;
    add(
        &mut doc,
        btn,
        ElementSpec::new("span").class("text").text("See the work"),
    )?;

    let words = add(
        &mut doc,
        wrapper,
        ElementSpec::new("p")
            .class("split-word")
            .text("A small studio making quiet interfaces that move with purpose")
            .rect(Rect::new(80.0, 1200.0, width - 160.0, 240.0)),
    )?;
    let skills = SKILLS
        .iter()
        .enumerate()
        .map(|(i, skill)| {
            add(
                &mut doc,
                wrapper,
                ElementSpec::new("li")
                    .class("skill__item")
                    .text(*skill)
                    .rect(Rect::new(80.0, 1900.0 + i as f32 * 120.0, width - 160.0, 96.0)),
            )
        })
        .collect::<Result<Vec<_>>>()?;
    let statement = add(
        &mut doc,
        wrapper,
        ElementSpec::new("h2")
            .class("sta")
            .text("Less noise.\nMore motion.\nBetter stories.")
            .rect(Rect::new(80.0, 2900.0, width - 160.0, 360.0)),
    )?;

    Ok(Portfolio {
        document: doc,
        path,
        words,
        skills,
        statement,
    })
}

fn add(doc: &mut MemoryDocument, parent: ElementId, spec: ElementSpec) -> Result<ElementId> {
    doc.append(parent, spec)
        .context("fixture element appended to a missing parent")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_has_menu_markup() {
        let page = portfolio(1440.0).unwrap();
        let doc = &page.document;
        assert_eq!(doc.query(".header__menu .path"), Some(page.path));
        assert_eq!(doc.query_all(".header__menu-item").len(), MENU_ITEMS.len());
        assert_eq!(doc.query(".logo__text"), doc.query(".header .logo__text"));
    }

    #[test]
    fn test_portfolio_has_reveal_markup() {
        let page = portfolio(1440.0).unwrap();
        let doc = &page.document;
        assert_eq!(doc.query(".split-word"), Some(page.words));
        assert_eq!(page.skills.len(), SKILLS.len());
        assert_eq!(doc.query(".sta"), Some(page.statement));
        assert!(doc.query("#cursorFollower").is_some());
    }
}
