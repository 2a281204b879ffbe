//! Minimal selector parsing and matching
//!
//! Supports compound selectors (`tag#id.class.other`) joined by descendant
//! combinators. That covers every query the motion components issue.

use smallvec::SmallVec;

use crate::document::ElementId;
use crate::error::{PlatformError, Result};

/// Read access to a tree, as needed for matching
pub(crate) trait SelectorTree {
    fn tag(&self, element: ElementId) -> Option<&str>;
    fn element_id(&self, element: ElementId) -> Option<&str>;
    fn has_class(&self, element: ElementId, class: &str) -> bool;
    fn parent(&self, element: ElementId) -> Option<ElementId>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: SmallVec<[String; 2]>,
}

impl Compound {
    fn parse(token: &str, source: &str) -> Result<Self> {
        let invalid = || PlatformError::InvalidSelector(source.to_string());
        let mut compound = Compound::default();

        // Split at '.' / '#' while remembering which marker started each part
        let mut parts: SmallVec<[(Option<char>, &str); 4]> = SmallVec::new();
        let mut start = 0;
        let mut marker = None;
        for (i, ch) in token.char_indices() {
            if ch == '.' || ch == '#' {
                parts.push((marker, &token[start..i]));
                marker = Some(ch);
                start = i + ch.len_utf8();
            }
        }
        parts.push((marker, &token[start..]));

        for (i, (marker, ident)) in parts.into_iter().enumerate() {
            if ident.is_empty() {
                // Only a leading empty tag is allowed (".class", "#id")
                if i == 0 && marker.is_none() {
                    continue;
                }
                return Err(invalid());
            }
            if !ident
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                return Err(invalid());
            }
            match marker {
                None => compound.tag = Some(ident.to_ascii_lowercase()),
                Some('#') => compound.id = Some(ident.to_string()),
                Some(_) => compound.classes.push(ident.to_string()),
            }
        }

        if compound.tag.is_none() && compound.id.is_none() && compound.classes.is_empty() {
            return Err(invalid());
        }
        Ok(compound)
    }

    fn matches<T: SelectorTree + ?Sized>(&self, tree: &T, element: ElementId) -> bool {
        if let Some(tag) = &self.tag {
            if tree.tag(element) != Some(tag.as_str()) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if tree.element_id(element) != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| tree.has_class(element, c))
    }
}

/// A parsed selector
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    compounds: SmallVec<[Compound; 3]>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self> {
        let compounds = source
            .split_whitespace()
            .map(|token| Compound::parse(token, source))
            .collect::<Result<SmallVec<[Compound; 3]>>>()?;
        if compounds.is_empty() {
            return Err(PlatformError::InvalidSelector(source.to_string()));
        }
        Ok(Self { compounds })
    }

    pub(crate) fn matches<T: SelectorTree + ?Sized>(&self, tree: &T, element: ElementId) -> bool {
        let Some((last, ancestors)) = self.compounds.split_last() else {
            return false;
        };
        if !last.matches(tree, element) {
            return false;
        }

        // Descendant combinators only: greedy right-to-left matching is exact
        let mut current = tree.parent(element);
        for compound in ancestors.iter().rev() {
            loop {
                match current {
                    Some(node) => {
                        current = tree.parent(node);
                        if compound.matches(tree, node) {
                            break;
                        }
                    }
                    None => return false,
                }
            }
        }
        true
    }
}
