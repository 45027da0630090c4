//! Top-level document parsing
//!
//! Account metadata sits in the top-level panes. The message and call logs
//! sit either beside it or, in the alternate layout, inside an
//! `Additional Properties` container. Layout is inferred from the labels
//! alone.

use crate::dispatch::Section;
use crate::error::{ParseError, Result};
use crate::normalize::{normalize_date, normalize_date_range, normalize_phone};
use crate::pane::{Pane, PaneDocument, child_elements, child_panes};
use crate::records::{parse_calls, parse_message_log};
use crate::types::{CallRecord, DocumentRecord, MessageRecord, SourceDocument};
use markup5ever_rcdom::Handle;
use tracing::debug;

/// Convert a loaded export into a [`DocumentRecord`]
pub fn parse_document(source: &SourceDocument) -> Result<DocumentRecord> {
    let mut record = parse_body(&source.body)?;
    record.envelope = source.envelope.clone();
    Ok(record)
}

/// Logs found so far; the first occurrence of each log is kept
#[derive(Default)]
struct LogSlots {
    messages: Option<Vec<MessageRecord>>,
    calls: Option<Vec<CallRecord>>,
}

impl LogSlots {
    fn offer(&mut self, section: Section, pane: &Pane) -> Result<()> {
        match section {
            Section::MessageLog if self.messages.is_none() => {
                self.messages = Some(parse_message_log(&pane.value()?)?);
            }
            Section::CallLog if self.calls.is_none() => {
                self.calls = Some(parse_calls(&pane.value()?)?);
            }
            _ => debug!("Ignoring repeated {section:?} pane"),
        }
        Ok(())
    }
}

/// Parse the HTML body of an export; envelope fields are left at defaults
pub fn parse_body(html: &str) -> Result<DocumentRecord> {
    let document = PaneDocument::parse(html);
    let mut record = DocumentRecord {
        link: document.first_link(),
        ..DocumentRecord::default()
    };
    let mut logs = LogSlots::default();
    let mut additional = Vec::new();

    for pane in document.top_level_panes() {
        let label = pane.label()?;
        let Some(section) = Section::classify(&label) else {
            debug!("Skipping top-level pane {:?}", label.trim());
            continue;
        };
        let label = label.trim();

        match section {
            Section::Service => record.service = Some(pane.value_text()?),
            Section::Identifier => {
                let phone = normalize_phone(&pane.value_text()?)
                    .map_err(|e| ParseError::format(label, e))?;
                record.identifier = Some(phone);
            }
            Section::AccountType => record.account_type = Some(pane.value_text()?),
            Section::Generated => {
                let generated = normalize_date(&pane.value_text()?)
                    .map_err(|e| ParseError::format(label, e))?;
                record.generated = Some(generated);
            }
            Section::DateRange => {
                let range = normalize_date_range(&pane.value_text()?)
                    .map_err(|e| ParseError::format(label, e))?;
                record.date_range = Some(range);
            }
            Section::MessageLog | Section::CallLog => logs.offer(section, &pane)?,
            Section::AdditionalProperties => additional.push(pane.value()?),
        }
    }

    if !additional.is_empty() {
        debug!("Found additional properties, scanning nested containers for logs");
        let mut containers: Vec<Handle> = Vec::new();
        for cell in additional {
            containers.extend(child_elements(&cell, "div"));
            containers.push(cell);
        }
        containers.extend(document.top_level_divs());
        for container in &containers {
            scan_for_logs(container, &mut logs)?;
        }
    }

    record.messages = logs.messages.unwrap_or_default();
    record.calls = logs.calls.unwrap_or_default();
    Ok(record)
}

fn scan_for_logs(container: &Handle, logs: &mut LogSlots) -> Result<()> {
    for pane in child_panes(container) {
        if let Some(section) = Section::classify_log(&pane.label()?) {
            logs.offer(section, &pane)?;
        }
    }
    Ok(())
}
