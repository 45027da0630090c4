//! Label dispatch: routing pane labels to normalizers
//!
//! Each parsing context (message, call, event, document) owns its own table.
//! Labels missing from a record-level table are stored as raw text, so a new
//! label in an export never aborts parsing.

use crate::error::{FormatError, ParseError, Result};
use crate::normalize::{normalize_date, normalize_int, normalize_phone};
use crate::types::FieldValue;

/// Lowercase a label and join its whitespace-separated words with `_`.
///
/// `"Sender Port"` becomes `"sender_port"`.
#[must_use]
pub fn normalize_label(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Conversion applied to a recognized label's raw text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    Phone,
    /// Phone number, or [`FieldValue::Absent`] for an empty cell
    OptionalPhone,
    /// One phone number, or several separated by `", "`; always a list
    PhoneList,
    Date,
    Integer,
}

impl Normalizer {
    pub fn apply(self, raw: &str) -> std::result::Result<FieldValue, FormatError> {
        Ok(match self {
            Self::Phone => FieldValue::Text(normalize_phone(raw)?),
            Self::OptionalPhone if raw.trim().is_empty() => FieldValue::Absent,
            Self::OptionalPhone => FieldValue::Text(normalize_phone(raw)?),
            Self::PhoneList => {
                let numbers = if raw.contains(',') {
                    raw.split(", ")
                        .map(|n| normalize_phone(n).map(FieldValue::Text))
                        .collect::<std::result::Result<Vec<_>, _>>()?
                } else {
                    vec![FieldValue::Text(normalize_phone(raw)?)]
                };
                FieldValue::List(numbers)
            }
            Self::Date => FieldValue::Integer(normalize_date(raw)?),
            Self::Integer => FieldValue::Integer(normalize_int(raw)?),
        })
    }
}

/// Exact-label → normalizer table for one parsing context
#[derive(Debug, Clone, Copy)]
pub struct LabelTable {
    context: &'static str,
    entries: &'static [(&'static str, Normalizer)],
}

impl LabelTable {
    #[must_use]
    pub const fn new(context: &'static str, entries: &'static [(&'static str, Normalizer)]) -> Self {
        Self { context, entries }
    }

    #[must_use]
    pub fn lookup(&self, label: &str) -> Option<Normalizer> {
        self.entries
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, normalizer)| *normalizer)
    }

    /// Normalize `raw` if `label` is registered, otherwise keep it verbatim
    pub fn dispatch(&self, label: &str, raw: &str) -> Result<FieldValue> {
        match self.lookup(label) {
            Some(normalizer) => normalizer
                .apply(raw)
                .map_err(|e| ParseError::format(format!("{}.{label}", self.context), e)),
            None => Ok(FieldValue::Text(raw.to_string())),
        }
    }
}

pub const MESSAGE_FIELDS: LabelTable = LabelTable::new(
    "message",
    &[
        ("timestamp", Normalizer::Date),
        ("sender", Normalizer::Phone),
        ("recipients", Normalizer::PhoneList),
        ("sender_port", Normalizer::Integer),
        ("message_size", Normalizer::Integer),
    ],
);

pub const CALL_FIELDS: LabelTable =
    LabelTable::new("call", &[("call_creator", Normalizer::Phone)]);

pub const EVENT_FIELDS: LabelTable = LabelTable::new(
    "event",
    &[
        ("timestamp", Normalizer::Date),
        ("from", Normalizer::OptionalPhone),
        ("to", Normalizer::OptionalPhone),
        ("from_port", Normalizer::Integer),
    ],
);

/// How a document-level label is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelMatch {
    Exact(&'static str),
    /// Log labels carry a variable suffix such as an entry count
    Contains(&'static str),
}

impl LabelMatch {
    fn matches(self, label: &str) -> bool {
        match self {
            Self::Exact(expected) => label == expected,
            Self::Contains(needle) => label.contains(needle),
        }
    }
}

/// Top-level pane kinds the document parser acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Service,
    Identifier,
    AccountType,
    Generated,
    DateRange,
    MessageLog,
    CallLog,
    AdditionalProperties,
}

const DOCUMENT_SECTIONS: &[(LabelMatch, Section)] = &[
    (LabelMatch::Exact("Service"), Section::Service),
    (LabelMatch::Contains("Identifier"), Section::Identifier),
    (LabelMatch::Exact("Account Type"), Section::AccountType),
    (LabelMatch::Exact("Generated"), Section::Generated),
    (LabelMatch::Exact("Date Range"), Section::DateRange),
    (LabelMatch::Exact("Message Log"), Section::MessageLog),
    (LabelMatch::Contains("Call Log"), Section::CallLog),
    (
        LabelMatch::Exact("Additional Properties"),
        Section::AdditionalProperties,
    ),
];

const LOG_SECTIONS: &[(LabelMatch, Section)] = &[
    (LabelMatch::Exact("Message Log"), Section::MessageLog),
    (LabelMatch::Contains("Call Log"), Section::CallLog),
];

fn classify_in(table: &[(LabelMatch, Section)], label: &str) -> Option<Section> {
    let label = label.trim();
    table
        .iter()
        .find(|(pattern, _)| pattern.matches(label))
        .map(|(_, section)| *section)
}

impl Section {
    /// Classify a raw top-level label; `None` for labels the document ignores
    #[must_use]
    pub fn classify(label: &str) -> Option<Self> {
        classify_in(DOCUMENT_SECTIONS, label)
    }

    /// Classify a label inside an additional-properties container, where
    /// only logs are recognized
    #[must_use]
    pub fn classify_log(label: &str) -> Option<Self> {
        classify_in(LOG_SECTIONS, label)
    }
}
