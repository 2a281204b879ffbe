//! In-memory document backend
//!
//! Used by tests and by the headless simulator. Every mutation is appended
//! to a journal so callers can observe exactly what the components wrote.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::document::{Document, ElementId, ListenerId, ListenerKind, SplitKind};
use crate::error::Result;
use crate::geometry::Rect;
use crate::selector::{Selector, SelectorTree};
use crate::style::{Property, StyleValue};

/// Description of an element to append
#[derive(Clone, Debug, Default)]
pub struct ElementSpec {
    tag: String,
    id: Option<String>,
    classes: SmallVec<[String; 4]>,
    attributes: Vec<(String, String)>,
    text: String,
    rect: Rect,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add one or more space-separated classes
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Layout box in page coordinates (before scrolling)
    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }
}

/// A recorded write
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    Attribute {
        element: ElementId,
        name: String,
        value: String,
    },
    Style {
        element: ElementId,
        property: Property,
        value: StyleValue,
    },
    ClassAdded {
        element: ElementId,
        class: String,
    },
    ClassRemoved {
        element: ElementId,
        class: String,
    },
}

impl Mutation {
    pub fn element(&self) -> ElementId {
        match self {
            Mutation::Attribute { element, .. }
            | Mutation::Style { element, .. }
            | Mutation::ClassAdded { element, .. }
            | Mutation::ClassRemoved { element, .. } => *element,
        }
    }
}

#[derive(Debug)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: SmallVec<[String; 4]>,
    attributes: FxHashMap<String, String>,
    styles: FxHashMap<Property, StyleValue>,
    text: String,
    rect: Rect,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    /// Elements created by `split_text`
    generated: Vec<ElementId>,
}

impl Node {
    fn from_spec(spec: ElementSpec, parent: Option<ElementId>) -> Self {
        Self {
            tag: spec.tag,
            id: spec.id,
            classes: spec.classes,
            attributes: spec.attributes.into_iter().collect(),
            styles: FxHashMap::default(),
            text: spec.text,
            rect: spec.rect,
            parent,
            children: Vec::new(),
            generated: Vec::new(),
        }
    }
}

/// Document held entirely in memory
#[derive(Debug)]
pub struct MemoryDocument {
    nodes: SlotMap<ElementId, Node>,
    root: ElementId,
    body: ElementId,
    listeners: SlotMap<ListenerId, (ElementId, ListenerKind)>,
    journal: VecDeque<Mutation>,
    journal_limit: usize,
    mutations: usize,
    scroll_y: f32,
}

/// Mutations kept by a new document before the oldest are dropped
pub const DEFAULT_JOURNAL_LIMIT: usize = 4096;

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create a document containing `<html><body></body></html>`
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::from_spec(ElementSpec::new("html"), None));
        let body = nodes.insert(Node::from_spec(ElementSpec::new("body"), Some(root)));
        nodes[root].children.push(body);
        Self {
            nodes,
            root,
            body,
            listeners: SlotMap::with_key(),
            journal: VecDeque::new(),
            journal_limit: DEFAULT_JOURNAL_LIMIT,
            mutations: 0,
            scroll_y: 0.0,
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Append a child element to `parent`
    ///
    /// Returns `None` if `parent` is not part of this document.
    pub fn append(&mut self, parent: ElementId, spec: ElementSpec) -> Option<ElementId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let id = self.nodes.insert(Node::from_spec(spec, Some(parent)));
        self.nodes[parent].children.push(id);
        Some(id)
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.nodes.contains_key(element)
    }

    pub fn children(&self, element: ElementId) -> &[ElementId] {
        self.nodes
            .get(element)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn text(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(element).map(|n| n.text.as_str())
    }

    pub fn set_rect(&mut self, element: ElementId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.rect = rect;
        }
    }

    /// Vertical scroll position of the viewport
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn scroll_to(&mut self, y: f32) {
        self.scroll_y = y.max(0.0);
    }

    /// Keep at most `limit` mutations, dropping the oldest first
    pub fn with_journal_limit(mut self, limit: usize) -> Self {
        self.journal_limit = limit;
        self.trim_journal();
        self
    }

    /// The most recent mutations, oldest first
    ///
    /// Long-running hosts should drain it with [`take_journal`] between
    /// frames; entries past the journal limit are discarded.
    ///
    /// [`take_journal`]: MemoryDocument::take_journal
    pub fn journal(&self) -> &VecDeque<Mutation> {
        &self.journal
    }

    /// Writes made since the document was created, including dropped ones
    pub fn mutation_count(&self) -> usize {
        self.mutations
    }

    pub fn take_journal(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.journal).into()
    }

    fn record(&mut self, mutation: Mutation) {
        self.mutations += 1;
        self.journal.push_back(mutation);
        self.trim_journal();
    }

    fn trim_journal(&mut self) {
        while self.journal.len() > self.journal_limit {
            self.journal.pop_front();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Query with selector errors surfaced instead of treated as no match
    pub fn try_query_all(&self, selector: &str) -> Result<Vec<ElementId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.matching(self.root, &selector))
    }

    /// Descendants of `scope` in document order
    fn descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self
            .children(scope)
            .iter()
            .rev()
            .copied()
            .collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    fn matching(&self, scope: ElementId, selector: &Selector) -> Vec<ElementId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| selector.matches(self, *id))
            .collect()
    }

    fn parse_or_log(selector: &str) -> Option<Selector> {
        match Selector::parse(selector) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::debug!("MemoryDocument: {}", err);
                None
            }
        }
    }

    fn remove_subtree(&mut self, element: ElementId) {
        if let Some(node) = self.nodes.remove(element) {
            for child in node.children {
                self.remove_subtree(child);
            }
            self.listeners.retain(|_, (el, _)| *el != element);
        }
    }
}

impl SelectorTree for MemoryDocument {
    fn tag(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(element).map(|n| n.tag.as_str())
    }

    fn element_id(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(element).and_then(|n| n.id.as_deref())
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.nodes
            .get(element)
            .map(|n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.get(element).and_then(|n| n.parent)
    }
}

impl Document for MemoryDocument {
    fn body(&self) -> ElementId {
        self.body
    }

    fn query(&self, selector: &str) -> Option<ElementId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<ElementId> {
        Self::parse_or_log(selector)
            .map(|s| self.matching(self.root, &s))
            .unwrap_or_default()
    }

    fn query_within(&self, scope: ElementId, selector: &str) -> Option<ElementId> {
        self.query_all_within(scope, selector).into_iter().next()
    }

    fn query_all_within(&self, scope: ElementId, selector: &str) -> Vec<ElementId> {
        if !self.nodes.contains_key(scope) {
            return Vec::new();
        }
        Self::parse_or_log(selector)
            .map(|s| self.matching(scope, &s))
            .unwrap_or_default()
    }

    fn parent_element(&self, element: ElementId) -> Option<ElementId> {
        SelectorTree::parent(self, element)
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.nodes
            .get(element)
            .and_then(|n| n.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.attributes.insert(name.to_string(), value.to_string());
            self.record(Mutation::Attribute {
                element,
                name: name.to_string(),
                value: value.to_string(),
            });
        }
    }

    fn style(&self, element: ElementId, property: Property) -> Option<StyleValue> {
        self.nodes
            .get(element)
            .and_then(|n| n.styles.get(&property).cloned())
    }

    fn set_style(&mut self, element: ElementId, property: Property, value: StyleValue) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.styles.insert(property, value.clone());
            self.record(Mutation::Style {
                element,
                property,
                value,
            });
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        SelectorTree::has_class(self, element, class)
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
            self.record(Mutation::ClassAdded {
                element,
                class: class.to_string(),
            });
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.classes.retain(|c| c != class);
            self.record(Mutation::ClassRemoved {
                element,
                class: class.to_string(),
            });
        }
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        self.nodes
            .get(element)
            .map(|n| n.rect.offset_y(-self.scroll_y))
            .unwrap_or(Rect::ZERO)
    }

    fn split_text(&mut self, element: ElementId, kind: SplitKind) -> Vec<ElementId> {
        let Some(node) = self.nodes.get(element) else {
            return Vec::new();
        };
        let rect = node.rect;
        let pieces: Vec<String> = match kind {
            SplitKind::Chars => node
                .text
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(String::from)
                .collect(),
            SplitKind::Words => node.text.split_whitespace().map(str::to_string).collect(),
            SplitKind::Lines => node
                .text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
        };

        let count = pieces.len().max(1) as f32;
        let mut created = Vec::with_capacity(pieces.len());
        for (i, piece) in pieces.into_iter().enumerate() {
            let piece_rect = match kind {
                SplitKind::Lines => {
                    let height = rect.height() / count;
                    Rect::new(rect.left(), rect.top() + height * i as f32, rect.width(), height)
                }
                _ => rect,
            };
            let spec = ElementSpec::new("div")
                .class(kind.class_name())
                .text(piece)
                .rect(piece_rect);
            if let Some(id) = self.append(element, spec) {
                created.push(id);
            }
        }
        if let Some(node) = self.nodes.get_mut(element) {
            node.generated.extend(created.iter().copied());
        }
        created
    }

    fn revert_split(&mut self, element: ElementId) {
        let generated = match self.nodes.get_mut(element) {
            Some(node) => std::mem::take(&mut node.generated),
            None => return,
        };
        if let Some(node) = self.nodes.get_mut(element) {
            node.children.retain(|c| !generated.contains(c));
        }
        for id in generated {
            self.remove_subtree(id);
        }
    }

    fn add_listener(&mut self, element: ElementId, kind: ListenerKind) -> ListenerId {
        self.listeners.insert((element, kind))
    }

    fn remove_listener(&mut self, listener: ListenerId) -> bool {
        self.listeners.remove(listener).is_some()
    }

    fn has_listener(&self, element: ElementId, kind: ListenerKind) -> bool {
        self.listeners
            .values()
            .any(|(el, k)| *el == element && *k == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_document() -> (MemoryDocument, ElementId, ElementId) {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let header = doc
            .append(body, ElementSpec::new("header").class("header"))
            .unwrap();
        let menu = doc
            .append(header, ElementSpec::new("nav").class("header__menu"))
            .unwrap();
        let path = doc
            .append(menu, ElementSpec::new("path").class("path"))
            .unwrap();
        (doc, menu, path)
    }

    #[test]
    fn test_query_descendant_selector() {
        let (doc, menu, path) = menu_document();
        assert_eq!(doc.query(".header__menu .path"), Some(path));
        assert_eq!(doc.query(".header .path"), Some(path));
        assert_eq!(doc.query("header nav.header__menu"), Some(menu));
        assert_eq!(doc.query(".path .header__menu"), None);
        assert_eq!(doc.query_within(menu, ".path"), Some(path));
        assert_eq!(doc.query_within(path, ".path"), None);
        assert!(doc.is_within(path, menu));
        assert!(!doc.is_within(menu, path));
    }

    #[test]
    fn test_query_document_order() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let list = doc.append(body, ElementSpec::new("ul")).unwrap();
        let a = doc
            .append(list, ElementSpec::new("li").class("item"))
            .unwrap();
        let nested = doc
            .append(a, ElementSpec::new("span").class("item"))
            .unwrap();
        let b = doc
            .append(list, ElementSpec::new("li").class("item"))
            .unwrap();
        assert_eq!(doc.query_all(".item"), vec![a, nested, b]);
        assert_eq!(doc.query_all("li.item"), vec![a, b]);
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let (doc, _, _) = menu_document();
        assert_eq!(doc.query("nav > .path"), None);
        assert!(doc.try_query_all("nav > .path").is_err());
    }

    #[test]
    fn test_mutations_are_journaled() {
        let (mut doc, menu, path) = menu_document();
        doc.set_attribute(path, "d", "M 0 0");
        doc.set_style(menu, Property::PointerEvents, "none".into());
        doc.add_class(menu, "open");
        doc.remove_class(menu, "open");

        assert_eq!(doc.mutation_count(), 4);
        assert_eq!(doc.attribute(path, "d").as_deref(), Some("M 0 0"));
        assert_eq!(
            doc.style(menu, Property::PointerEvents),
            Some(StyleValue::keyword("none"))
        );
        assert!(!Document::has_class(&doc, menu, "open"));
        assert_eq!(doc.journal()[0].element(), path);
    }

    #[test]
    fn test_journal_keeps_newest_mutations() {
        let (doc, _, path) = menu_document();
        let mut doc = doc.with_journal_limit(3);
        for i in 0..5 {
            doc.set_attribute(path, "d", &format!("M {i} 0"));
        }

        assert_eq!(doc.mutation_count(), 5);
        assert_eq!(doc.journal().len(), 3);
        let values: Vec<_> = doc
            .take_journal()
            .into_iter()
            .filter_map(|m| match m {
                Mutation::Attribute { value, .. } => Some(value),
                _ => None,
            })
            .collect();
        assert_eq!(values, ["M 2 0", "M 3 0", "M 4 0"]);
        assert!(doc.journal().is_empty());
        assert_eq!(doc.mutation_count(), 5);
    }

    #[test]
    fn test_split_and_revert() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let text = doc
            .append(
                body,
                ElementSpec::new("p")
                    .class("split-word")
                    .text("Design that moves")
                    .rect(Rect::new(0.0, 100.0, 300.0, 60.0)),
            )
            .unwrap();

        let words = doc.split_text(text, SplitKind::Words);
        assert_eq!(words.len(), 3);
        assert_eq!(doc.text(words[1]), Some("that"));
        assert_eq!(doc.query_all_within(text, ".word"), words);

        let chars = doc.split_text(text, SplitKind::Chars);
        assert_eq!(chars.len(), 15);

        doc.revert_split(text);
        assert!(doc.children(text).is_empty());
        assert!(!doc.contains(words[0]));
    }

    #[test]
    fn test_split_lines_stack_vertically() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let text = doc
            .append(
                body,
                ElementSpec::new("p")
                    .text("first\nsecond")
                    .rect(Rect::new(0.0, 100.0, 300.0, 60.0)),
            )
            .unwrap();
        let lines = doc.split_text(text, SplitKind::Lines);
        assert_eq!(lines.len(), 2);
        assert_eq!(doc.bounding_rect(lines[1]).top(), 130.0);
    }

    #[test]
    fn test_bounding_rect_follows_scroll() {
        let (mut doc, menu, _) = menu_document();
        doc.set_rect(menu, Rect::new(0.0, 800.0, 100.0, 100.0));
        doc.scroll_to(300.0);
        assert_eq!(doc.bounding_rect(menu).top(), 500.0);
    }

    #[test]
    fn test_listeners_attach_detach() {
        let (mut doc, menu, _) = menu_document();
        let listener = doc.add_listener(menu, ListenerKind::Click);
        assert!(doc.has_listener(menu, ListenerKind::Click));
        assert!(!doc.has_listener(menu, ListenerKind::PointerMove));
        assert!(doc.remove_listener(listener));
        assert!(!doc.remove_listener(listener));
        assert_eq!(doc.listener_count(), 0);
    }
}
