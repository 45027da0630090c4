//! Pane walking over the export's nested-table HTML
//!
//! A pane is a `<table>` holding one label cell (`<th>`) and one value cell
//! (`<td>`). A value cell either holds text or is itself a container whose
//! direct child tables are further panes.

use crate::dispatch::normalize_label;
use crate::error::{ParseError, Result};
use html5ever::{ParseOpts, parse_document};
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// A parsed export body
pub struct PaneDocument {
    dom: RcDom,
}

impl PaneDocument {
    #[must_use]
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
        Self { dom }
    }

    /// The node whose direct children are the top-level panes
    #[must_use]
    pub fn root(&self) -> Handle {
        find_first(&self.dom.document, "body").unwrap_or_else(|| self.dom.document.clone())
    }

    #[must_use]
    pub fn top_level_panes(&self) -> Vec<Pane> {
        child_panes(&self.root())
    }

    /// Top-level `<div>` wrappers, where the alternate layout keeps its logs
    #[must_use]
    pub fn top_level_divs(&self) -> Vec<Handle> {
        child_elements(&self.root(), "div")
    }

    /// `href` of the first anchor in the body
    #[must_use]
    pub fn first_link(&self) -> Option<String> {
        let anchor = find_first(&self.dom.document, "a")?;
        attribute(&anchor, "href")
    }
}

/// One label/value unit
#[derive(Clone)]
pub struct Pane {
    node: Handle,
}

impl Pane {
    #[must_use]
    pub const fn new(node: Handle) -> Self {
        Self { node }
    }

    /// Raw text of the label cell
    pub fn label(&self) -> Result<String> {
        find_first(&self.node, "th")
            .map(|th| text_of(&th))
            .ok_or_else(|| ParseError::Structure("pane has no label cell".into()))
    }

    /// Label lowercased and underscore-joined, e.g. `message_size`
    pub fn normalized_label(&self) -> Result<String> {
        self.label().map(|label| normalize_label(&label))
    }

    /// The value cell
    pub fn value(&self) -> Result<Handle> {
        find_first(&self.node, "td").ok_or_else(|| {
            let label = self.label().unwrap_or_default();
            ParseError::Structure(format!("pane {:?} has no value cell", label.trim()))
        })
    }

    /// Raw text of the value cell
    pub fn value_text(&self) -> Result<String> {
        self.value().map(|td| text_of(&td))
    }

    /// Panes held directly in this pane's value cell
    pub fn children(&self) -> Result<Vec<Self>> {
        self.value().map(|td| child_panes(&td))
    }
}

/// Direct child panes of a container, in document order
#[must_use]
pub fn child_panes(container: &Handle) -> Vec<Pane> {
    child_elements(container, "table")
        .into_iter()
        .map(Pane::new)
        .collect()
}

/// Every pane nested anywhere below a container, in document order
#[must_use]
pub fn descendant_panes(container: &Handle) -> Vec<Pane> {
    let mut panes = Vec::new();
    collect_elements(container, "table", &mut panes);
    panes.into_iter().map(Pane::new).collect()
}

/// Concatenated text of a node and everything below it
#[must_use]
pub fn text_of(handle: &Handle) -> String {
    let mut out = String::new();
    collect_text(handle, &mut out);
    out
}

fn collect_text(handle: &Handle, out: &mut String) {
    if let NodeData::Text { contents } = &handle.data {
        out.push_str(&contents.borrow());
    }
    for child in handle.children.borrow().iter() {
        collect_text(child, out);
    }
}

fn is_element(handle: &Handle, tag: &str) -> bool {
    matches!(&handle.data, NodeData::Element { name, .. } if &*name.local == tag)
}

pub fn child_elements(container: &Handle, tag: &str) -> Vec<Handle> {
    container
        .children
        .borrow()
        .iter()
        .filter(|child| is_element(child, tag))
        .cloned()
        .collect()
}

fn collect_elements(handle: &Handle, tag: &str, out: &mut Vec<Handle>) {
    for child in handle.children.borrow().iter() {
        if is_element(child, tag) {
            out.push(child.clone());
        }
        collect_elements(child, tag, out);
    }
}

/// First descendant element named `tag`, in document order
fn find_first(handle: &Handle, tag: &str) -> Option<Handle> {
    for child in handle.children.borrow().iter() {
        if is_element(child, tag) {
            return Some(child.clone());
        }
        if let Some(found) = find_first(child, tag) {
            return Some(found);
        }
    }
    None
}

fn attribute(handle: &Handle, name: &str) -> Option<String> {
    match &handle.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}
