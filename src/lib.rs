// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Legal-records export parser
//!
//! Extracts a normalized record from the nested label/value tables that a
//! communications service embeds in the body of a records-export email:
//! account metadata, the message log, and the call log with each call's
//! event timeline.
//!
//! # Features
//!
//! - Phone numbers normalized to E.164, dates to Unix epoch seconds
//! - Unrecognized labels kept verbatim instead of failing the parse
//! - Both the flat and the `Additional Properties` document layouts
//! - Flat event pane runs regrouped into a per-call timeline
//!
//! # Example
//!
//! ```rust
//! use records_extract::{SourceDocument, parse_document};
//!
//! let source = SourceDocument {
//!     body: "<table><tr><th>Service</th><td>Messenger</td></tr></table>".into(),
//!     ..SourceDocument::default()
//! };
//! let record = parse_document(&source).unwrap();
//!
//! assert_eq!(record.service.as_deref(), Some("Messenger"));
//! assert!(record.messages.is_empty());
//! ```

mod dispatch;
mod document;
mod envelope;
mod error;
mod normalize;
mod pane;
mod records;
mod timeline;
mod types;

pub use dispatch::{
    CALL_FIELDS, EVENT_FIELDS, LabelTable, MESSAGE_FIELDS, Normalizer, Section, normalize_label,
};
pub use document::{parse_body, parse_document};
pub use envelope::parse_eml;
pub use error::{FormatError, ParseError, Result};
pub use normalize::{
    DEFAULT_REGION, RANGE_SEPARATOR, normalize_date, normalize_date_range, normalize_int,
    normalize_phone,
};
pub use pane::{Pane, PaneDocument, child_panes, descendant_panes, text_of};
pub use records::{parse_call, parse_calls, parse_message, parse_message_log};
pub use timeline::{TimelineBuilder, UNTYPED_EVENT, parse_events, parse_participants};
pub use types::*;
