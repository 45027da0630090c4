//! Message and call log parsing

use crate::dispatch::{CALL_FIELDS, MESSAGE_FIELDS};
use crate::error::Result;
use crate::pane::{Pane, child_panes};
use crate::timeline::parse_events;
use crate::types::{CallRecord, MessageRecord};
use markup5ever_rcdom::Handle;
use tracing::debug;

const EVENTS_LABEL: &str = "events";

/// Parse one message pane; its value cell holds the field panes
pub fn parse_message(pane: &Pane) -> Result<MessageRecord> {
    let mut record = MessageRecord::default();

    for field in pane.children()? {
        let label = field.normalized_label()?;
        let value = MESSAGE_FIELDS.dispatch(&label, &field.value_text()?)?;
        record.fields.insert(label, value);
    }

    Ok(record)
}

/// Parse every message held directly in a message log's value cell
pub fn parse_message_log(container: &Handle) -> Result<Vec<MessageRecord>> {
    let messages = child_panes(container)
        .iter()
        .map(parse_message)
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed message log with {} message(s)", messages.len());
    Ok(messages)
}

/// Parse one call pane; `events` is expanded into a timeline
pub fn parse_call(pane: &Pane) -> Result<CallRecord> {
    let mut record = CallRecord::default();

    for field in pane.children()? {
        let label = field.normalized_label()?;
        if label == EVENTS_LABEL {
            record.set_events(parse_events(&field.value()?)?);
        } else {
            let value = CALL_FIELDS.dispatch(&label, &field.value_text()?)?;
            record.fields.insert(label, value);
        }
    }

    Ok(record)
}

/// Parse every call held directly in a call log's value cell
pub fn parse_calls(container: &Handle) -> Result<Vec<CallRecord>> {
    let calls = child_panes(container)
        .iter()
        .map(parse_call)
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed call log with {} call(s)", calls.len());
    Ok(calls)
}
