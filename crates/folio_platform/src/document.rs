//! Document surface consumed by the motion components
//!
//! [`Document`] is the only way the components touch the page. Hosts
//! implement it over their real tree; [`MemoryDocument`](crate::MemoryDocument)
//! implements it in memory for tests and headless simulation.

use slotmap::new_key_type;

use crate::geometry::Rect;
use crate::style::{Property, StyleValue};

new_key_type! {
    /// Handle to an element of a document
    pub struct ElementId;
    /// Handle to an attached event listener
    pub struct ListenerId;
}

/// Event kinds a component can listen for on an element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Click,
    PointerEnter,
    PointerMove,
    PointerLeave,
}

/// Granularity of a text split
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SplitKind {
    Chars,
    Words,
    Lines,
}

impl SplitKind {
    /// Class given to the generated elements
    pub fn class_name(&self) -> &'static str {
        match self {
            SplitKind::Chars => "char",
            SplitKind::Words => "word",
            SplitKind::Lines => "line",
        }
    }
}

/// A page document
///
/// Queries use a small selector language: compound selectors made of an
/// optional tag, `#id` and `.class` parts, joined by whitespace as descendant
/// combinators (`.header__menu .path`). Results are in document order.
///
/// Mutating methods are infallible: writes to unknown elements are ignored,
/// matching how DOM writes to detached nodes behave.
pub trait Document {
    /// The body element (target of the scroll lock)
    fn body(&self) -> ElementId;

    /// First element matching `selector` anywhere in the document
    fn query(&self, selector: &str) -> Option<ElementId>;

    /// All elements matching `selector`
    fn query_all(&self, selector: &str) -> Vec<ElementId>;

    /// First descendant of `scope` matching `selector`
    fn query_within(&self, scope: ElementId, selector: &str) -> Option<ElementId>;

    /// All descendants of `scope` matching `selector`
    fn query_all_within(&self, scope: ElementId, selector: &str) -> Vec<ElementId>;

    fn parent_element(&self, element: ElementId) -> Option<ElementId>;

    /// Whether `element` is `ancestor` or one of its descendants
    fn is_within(&self, element: ElementId, ancestor: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent_element(node);
        }
        false
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    /// Last written value of a style property
    fn style(&self, element: ElementId, property: Property) -> Option<StyleValue>;

    fn set_style(&mut self, element: ElementId, property: Property, value: StyleValue);

    fn has_class(&self, element: ElementId, class: &str) -> bool;

    fn add_class(&mut self, element: ElementId, class: &str);

    fn remove_class(&mut self, element: ElementId, class: &str);

    /// Border box of the element relative to the viewport
    fn bounding_rect(&self, element: ElementId) -> Rect;

    /// Split the element's text into child elements, returning them in order
    fn split_text(&mut self, element: ElementId, kind: SplitKind) -> Vec<ElementId>;

    /// Undo every split performed on `element`
    fn revert_split(&mut self, element: ElementId);

    fn add_listener(&mut self, element: ElementId, kind: ListenerKind) -> ListenerId;

    /// Detach a listener, returning whether it was attached
    fn remove_listener(&mut self, listener: ListenerId) -> bool;

    fn has_listener(&self, element: ElementId, kind: ListenerKind) -> bool;
}
