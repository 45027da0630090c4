#![allow(dead_code)]
//! HTML fixtures shaped like a records export.

use records_extract::{Pane, PaneDocument};

/// One label/value pane
pub fn pane(label: &str, value: &str) -> String {
    format!("<table><tr><th>{label}</th><td>{value}</td></tr></table>")
}

/// Concatenate panes into one container body
pub fn panes(items: &[(&str, &str)]) -> String {
    items.iter().map(|(label, value)| pane(label, value)).collect()
}

/// Parse `html` and return its first top-level pane
///
/// The document is leaked so the DOM outlives the returned pane: dropping an
/// `RcDom` detaches the children of every node, including ones still held.
pub fn first_pane(html: &str) -> Pane {
    let document: &'static PaneDocument = Box::leak(Box::new(PaneDocument::parse(html)));
    document
        .top_level_panes()
        .into_iter()
        .next()
        .expect("fixture has a top-level pane")
}

pub fn message_pane(fields: &[(&str, &str)]) -> String {
    pane("Message", &panes(fields))
}

pub fn call_pane(fields: &[(&str, &str)]) -> String {
    pane("Call", &panes(fields))
}

pub const JAN_1_2023: i64 = 1_672_531_200;
