//! Call event timelines
//!
//! An export lists a call's events as one flat run of panes. A `type` pane
//! opens a new event and every pane up to the next `type` belongs to it.

use crate::dispatch::EVENT_FIELDS;
use crate::error::{ParseError, Result};
use crate::normalize::normalize_phone;
use crate::pane::{Pane, child_panes, descendant_panes};
use crate::types::{Event, FieldValue, Timeline};
use markup5ever_rcdom::Handle;
use tracing::{debug, warn};

/// Timeline key for fields that appear before any `type` pane
pub const UNTYPED_EVENT: &str = "untyped";

const TYPE_LABEL: &str = "type";
const PARTICIPANTS_LABEL: &str = "participants";
const PHONE_NUMBER_LABEL: &str = "Phone Number";

#[derive(Debug)]
enum BuildState {
    NoCurrentEvent,
    Building { event_type: String, event: Event },
}

/// Groups a flat run of event panes into a [`Timeline`]
#[derive(Debug)]
pub struct TimelineBuilder {
    timeline: Timeline,
    state: BuildState,
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeline: Timeline::new(),
            state: BuildState::NoCurrentEvent,
        }
    }

    /// Feed one pane of the events container
    pub fn push(&mut self, pane: &Pane) -> Result<()> {
        let label = pane.normalized_label()?;

        if label == TYPE_LABEL {
            self.commit();
            self.state = BuildState::Building {
                event_type: pane.value_text()?,
                event: Event::default(),
            };
            return Ok(());
        }

        let value = if label == PARTICIPANTS_LABEL {
            FieldValue::List(parse_participants(&pane.value()?)?)
        } else {
            EVENT_FIELDS.dispatch(&label, &pane.value_text()?)?
        };
        self.record(label, value);
        Ok(())
    }

    /// Commit the open event and return the timeline
    #[must_use]
    pub fn finish(mut self) -> Timeline {
        self.commit();
        self.timeline
    }

    fn record(&mut self, label: String, value: FieldValue) {
        match &mut self.state {
            BuildState::Building { event, .. } => {
                event.fields.insert(label, value);
            }
            BuildState::NoCurrentEvent => {
                warn!(
                    "call event field {label:?} seen before any event type, keying it as {UNTYPED_EVENT:?}"
                );
                let mut event = Event::default();
                event.fields.insert(label, value);
                self.state = BuildState::Building {
                    event_type: UNTYPED_EVENT.to_string(),
                    event,
                };
            }
        }
    }

    fn commit(&mut self) {
        if let BuildState::Building { event_type, event } =
            std::mem::replace(&mut self.state, BuildState::NoCurrentEvent)
            && let Some(previous) = self.timeline.insert(event_type.clone(), event)
        {
            debug!(
                "event type {event_type:?} repeated, dropping earlier event with {} field(s)",
                previous.fields.len()
            );
        }
    }
}

/// Build the timeline held in a call's `events` value cell
pub fn parse_events(container: &Handle) -> Result<Timeline> {
    let mut builder = TimelineBuilder::new();
    for pane in child_panes(container) {
        builder.push(&pane)?;
    }
    Ok(builder.finish())
}

/// Participants of a call event, by phone number or descriptive text
pub fn parse_participants(container: &Handle) -> Result<Vec<FieldValue>> {
    descendant_panes(container)
        .iter()
        .map(|pane| {
            let label = pane.label()?;
            let value = pane.value_text()?;
            if label.trim() == PHONE_NUMBER_LABEL {
                normalize_phone(&value)
                    .map(FieldValue::Text)
                    .map_err(|e| ParseError::format("event.participants", e))
            } else {
                Ok(FieldValue::Text(value))
            }
        })
        .collect()
}
