mod common;

use common::*;
use records_extract::*;
use serde_json::json;

#[test]
fn test_parse_message_fields() {
    let html = message_pane(&[
        ("Timestamp", "2023-01-01 00:00:00 UTC"),
        ("Sender", "+1 555 123 4567"),
        ("Recipients", "5557654321"),
        ("Sender Port", "5060"),
        ("Message Size", "42"),
        ("Message Type", "SMS"),
    ]);

    let message = parse_message(&first_pane(&html)).unwrap();

    assert_eq!(message.timestamp(), Some(JAN_1_2023));
    assert_eq!(message.sender(), Some("+15551234567"));
    assert_eq!(message.recipients(), vec!["+15557654321"]);
    assert_eq!(message.get("sender_port"), Some(&FieldValue::Integer(5060)));
    assert_eq!(message.get("message_size"), Some(&FieldValue::Integer(42)));
    assert_eq!(
        message.get("message_type"),
        Some(&FieldValue::Text("SMS".into()))
    );
}

#[test]
fn test_single_recipient_is_a_list() {
    let html = message_pane(&[("Recipients", "+15557654321")]);
    let message = parse_message(&first_pane(&html)).unwrap();

    assert_eq!(
        serde_json::to_value(&message).unwrap(),
        json!({ "recipients": ["+15557654321"] })
    );
}

#[test]
fn test_multiple_recipients() {
    let html = message_pane(&[("Recipients", "5551234567, 5557654321")]);
    let message = parse_message(&first_pane(&html)).unwrap();

    assert_eq!(message.recipients(), vec!["+15551234567", "+15557654321"]);
}

#[test]
fn test_international_recipient_keeps_country_code() {
    let html = message_pane(&[("Recipients", "+6561234567, 5551234567")]);
    let message = parse_message(&first_pane(&html)).unwrap();

    assert_eq!(message.recipients(), vec!["+6561234567", "+15551234567"]);
}

#[test]
fn test_message_keeps_document_order() {
    let html = message_pane(&[
        ("Zeta", "z"),
        ("Sender", "15551234567"),
        ("Alpha", "a"),
    ]);
    let message = parse_message(&first_pane(&html)).unwrap();

    let keys: Vec<&str> = message.fields.keys().collect();
    assert_eq!(keys, vec!["zeta", "sender", "alpha"]);
}

#[test]
fn test_unknown_label_passes_through_verbatim() {
    let html = message_pane(&[("Some New Field", "  spaced value ")]);
    let message = parse_message(&first_pane(&html)).unwrap();

    assert_eq!(
        message.get("some_new_field"),
        Some(&FieldValue::Text("  spaced value ".into()))
    );
}

#[test]
fn test_malformed_message_value_fails() {
    let html = message_pane(&[("Sender Port", "not-a-port")]);
    let err = parse_message(&first_pane(&html)).unwrap_err();

    match err {
        ParseError::Format { label, source } => {
            assert_eq!(label, "message.sender_port");
            assert_eq!(source, FormatError::Integer("not-a-port".into()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_message_log_preserves_order() {
    let log = [
        message_pane(&[("Timestamp", "2023-01-01T00:00:02Z")]),
        message_pane(&[("Timestamp", "2023-01-01T00:00:01Z")]),
        message_pane(&[("Timestamp", "2023-01-01T00:00:03Z")]),
    ]
    .concat();
    let log_pane = first_pane(&pane("Message Log", &log));

    let messages = parse_message_log(&log_pane.value().unwrap()).unwrap();

    let stamps: Vec<Option<i64>> = messages.iter().map(MessageRecord::timestamp).collect();
    assert_eq!(
        stamps,
        vec![Some(JAN_1_2023 + 2), Some(JAN_1_2023 + 1), Some(JAN_1_2023 + 3)]
    );
}

#[test]
fn test_empty_message_log() {
    let log_pane = first_pane(&pane("Message Log", ""));
    assert!(parse_message_log(&log_pane.value().unwrap()).unwrap().is_empty());
}

#[test]
fn test_parse_call() {
    let events = panes(&[
        ("Type", "Outgoing"),
        ("Timestamp", "2023-01-01T00:00:00Z"),
    ]);
    let html = call_pane(&[
        ("Call Creator", "+1 555 123 4567"),
        ("Events", &events),
        ("Duration", "00:01:05"),
    ]);

    let call = parse_call(&first_pane(&html)).unwrap();

    assert_eq!(call.call_creator(), Some("+15551234567"));
    assert_eq!(call.get("duration"), Some(&FieldValue::Text("00:01:05".into())));
    let timeline = call.events.as_ref().unwrap();
    assert_eq!(timeline.get("Outgoing").unwrap().timestamp(), Some(JAN_1_2023));

    assert_eq!(
        serde_json::to_value(&call).unwrap(),
        json!({
            "call_creator": "+15551234567",
            "duration": "00:01:05",
            "events": { "Outgoing": { "timestamp": JAN_1_2023 } }
        })
    );
}

#[test]
fn test_call_events_serialize_in_document_order() {
    let events = panes(&[("Type", "Missed")]);
    let html = call_pane(&[
        ("Call Creator", "15551234567"),
        ("Events", &events),
        ("Duration", "00:00:00"),
    ]);

    let call = parse_call(&first_pane(&html)).unwrap();
    let json = serde_json::to_string(&call).unwrap();

    assert_eq!(
        json,
        r#"{"call_creator":"+15551234567","events":{"Missed":{}},"duration":"00:00:00"}"#
    );
}

#[test]
fn test_call_events_last_field_serializes_last() {
    let events = panes(&[("Type", "Missed")]);
    let html = call_pane(&[("Call Creator", "15551234567"), ("Events", &events)]);

    let json = serde_json::to_string(&parse_call(&first_pane(&html)).unwrap()).unwrap();
    assert_eq!(
        json,
        r#"{"call_creator":"+15551234567","events":{"Missed":{}}}"#
    );
}

#[test]
fn test_call_without_events_omits_key() {
    let html = call_pane(&[("Call Creator", "15551234567")]);
    let call = parse_call(&first_pane(&html)).unwrap();

    assert!(call.events.is_none());
    assert_eq!(
        serde_json::to_value(&call).unwrap(),
        json!({ "call_creator": "+15551234567" })
    );
}

#[test]
fn test_call_log() {
    let log = [
        call_pane(&[("Call Creator", "15551234567")]),
        call_pane(&[("Call Creator", "15557654321")]),
    ]
    .concat();
    let log_pane = first_pane(&pane("Call Log (2)", &log));

    let calls = parse_calls(&log_pane.value().unwrap()).unwrap();

    let creators: Vec<Option<&str>> = calls.iter().map(CallRecord::call_creator).collect();
    assert_eq!(creators, vec![Some("+15551234567"), Some("+15557654321")]);
}

#[test]
fn test_field_without_label_cell_is_structure_error() {
    let html = pane("Message", "<table><tr><td>orphan</td></tr></table>");
    let err = parse_message(&first_pane(&html)).unwrap_err();

    assert!(matches!(err, ParseError::Structure(_)));
}
