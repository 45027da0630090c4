//! Core types for extracted records

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A normalized field value
///
/// Phone numbers are stored as [`FieldValue::Text`] in E.164 form and
/// timestamps as [`FieldValue::Integer`] epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Explicitly empty source field, serialized as `null`
    Absent,
    Integer(i64),
    Text(String),
    List(Vec<FieldValue>),
}

impl FieldValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

/// String-keyed map that keeps keys in insertion order.
///
/// Re-inserting an existing key replaces its value in place, so the key
/// keeps the position of its first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the one it replaced
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        self.entries.push((key, value));
        None
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

/// Normalized label → value pairs in document order
pub type Fields = OrderedMap<FieldValue>;

/// One entry of the message log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MessageRecord {
    pub fields: Fields,
}

impl MessageRecord {
    #[must_use]
    pub fn timestamp(&self) -> Option<i64> {
        self.fields.get("timestamp").and_then(FieldValue::as_i64)
    }

    #[must_use]
    pub fn sender(&self) -> Option<&str> {
        self.fields.get("sender").and_then(FieldValue::as_str)
    }

    /// Recipient phone numbers; always a list when the field is present
    #[must_use]
    pub fn recipients(&self) -> Vec<&str> {
        self.fields
            .get("recipients")
            .and_then(FieldValue::as_list)
            .map(|items| items.iter().filter_map(FieldValue::as_str).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&FieldValue> {
        self.fields.get(label)
    }
}

/// One event of a call, keyed in its [`Timeline`] by event type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Event {
    pub fields: Fields,
}

impl Event {
    #[must_use]
    pub fn timestamp(&self) -> Option<i64> {
        self.fields.get("timestamp").and_then(FieldValue::as_i64)
    }

    /// The `from` field; [`FieldValue::Absent`] when the source cell was empty
    #[must_use]
    pub fn origin(&self) -> Option<&FieldValue> {
        self.fields.get("from")
    }

    /// The `to` field; [`FieldValue::Absent`] when the source cell was empty
    #[must_use]
    pub fn destination(&self) -> Option<&FieldValue> {
        self.fields.get("to")
    }

    #[must_use]
    pub fn participants(&self) -> Option<&[FieldValue]> {
        self.fields.get("participants").and_then(FieldValue::as_list)
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&FieldValue> {
        self.fields.get(label)
    }
}

/// Event type → event, last occurrence of a type wins
pub type Timeline = OrderedMap<Event>;

/// One entry of the call log
///
/// Serializes as one map with `events` at the position its pane had among
/// the call's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallRecord {
    /// Every field other than the event timeline
    pub fields: Fields,

    pub events: Option<Timeline>,

    /// Number of `fields` entries that preceded the `events` pane
    pub(crate) events_position: usize,
}

impl CallRecord {
    pub(crate) fn set_events(&mut self, timeline: Timeline) {
        self.events_position = self.fields.len();
        self.events = Some(timeline);
    }

    /// Phone number of the party that placed the call, in E.164 form
    #[must_use]
    pub fn call_creator(&self) -> Option<&str> {
        self.fields.get("call_creator").and_then(FieldValue::as_str)
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&FieldValue> {
        self.fields.get(label)
    }
}

impl Serialize for CallRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.fields.len() + usize::from(self.events.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        let position = self.events_position.min(self.fields.len());

        for (index, (key, value)) in self.fields.iter().enumerate() {
            if index == position
                && let Some(events) = &self.events
            {
                map.serialize_entry("events", events)?;
            }
            map.serialize_entry(key, value)?;
        }
        if position == self.fields.len()
            && let Some(events) = &self.events
        {
            map.serialize_entry("events", events)?;
        }
        map.end()
    }
}

/// Inclusive span covered by the export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: i64,
    pub to: i64,
}

/// Header values lifted from the carrying email
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub to: Option<String>,
    pub subject: Option<String>,

    /// Send date in epoch seconds
    pub date: i64,

    #[serde(rename = "message-id")]
    pub message_id: Option<String>,
}

/// A loaded export: envelope headers plus the HTML body holding the panes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDocument {
    pub envelope: Envelope,
    pub body: String,
}

/// The fully extracted export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    /// Basename of the source file, set by the caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(flatten)]
    pub envelope: Envelope,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    /// Account phone number in E.164 form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,

    pub messages: Vec<MessageRecord>,
    pub calls: Vec<CallRecord>,
}

impl DocumentRecord {
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}
