//! Loading an export from raw RFC 5322 email bytes

use crate::error::{ParseError, Result};
use crate::types::{Envelope, SourceDocument};
use chrono::DateTime;
use tracing::debug;

/// Parse raw email bytes into the headers and HTML body of an export
pub fn parse_eml(raw: &[u8]) -> Result<SourceDocument> {
    let parsed = mailparse::parse_mail(raw).map_err(|e| ParseError::Envelope(e.to_string()))?;

    let envelope = Envelope {
        to: header(&parsed.headers, "to"),
        subject: header(&parsed.headers, "subject"),
        date: extract_date(&parsed.headers)?,
        message_id: header(&parsed.headers, "message-id"),
    };
    let body = extract_body(&parsed)?;

    debug!(
        "Loaded export email {:?} with {} byte body",
        envelope.subject.as_deref().unwrap_or("(no subject)"),
        body.len()
    );

    Ok(SourceDocument { envelope, body })
}

fn header(headers: &[mailparse::MailHeader], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|h| h.get_key().eq_ignore_ascii_case(name))
        .map(mailparse::MailHeader::get_value)
}

fn extract_date(headers: &[mailparse::MailHeader]) -> Result<i64> {
    let date = header(headers, "date").ok_or_else(|| ParseError::MissingHeader("Date".into()))?;

    DateTime::parse_from_rfc2822(date.trim())
        .map(|dt| dt.timestamp())
        .map_err(|e| ParseError::InvalidHeader {
            header: "Date".into(),
            details: format!("{e}: {date}"),
        })
}

/// The HTML part of the message, falling back to the first plain-text part
fn extract_body(parsed: &mailparse::ParsedMail) -> Result<String> {
    let mut text: Option<String> = None;
    let mut html: Option<String> = None;

    if parsed.subparts.is_empty() {
        let body = parsed
            .get_body()
            .map_err(|e| ParseError::Envelope(e.to_string()))?;
        if parsed.ctype.mimetype.to_lowercase().contains("text/html") {
            html = Some(body);
        } else {
            text = Some(body);
        }
    } else {
        extract_body_recursive(parsed, &mut text, &mut html);
    }

    html.or(text)
        .ok_or_else(|| ParseError::Envelope("message has no text or HTML body".into()))
}

fn extract_body_recursive(
    parsed: &mailparse::ParsedMail,
    text: &mut Option<String>,
    html: &mut Option<String>,
) {
    for part in &parsed.subparts {
        let content_type = part.ctype.mimetype.to_lowercase();

        if part.subparts.is_empty() {
            if let Ok(body) = part.get_body() {
                if content_type.contains("text/plain") && text.is_none() {
                    *text = Some(body);
                } else if content_type.contains("text/html") && html.is_none() {
                    *html = Some(body);
                }
            }
        } else {
            extract_body_recursive(part, text, html);
        }
    }
}
