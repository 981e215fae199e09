use crate::reporter::model::method::Method;
use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde_derive::Serialize;
use std::iter::FromIterator;
use std::time::Duration;

/// Insertion-ordered header map with case-insensitive names.
///
/// Request headers use [`set`](Headers::set) (last write wins, the casing of
/// the first write is kept). Response headers use
/// [`append_folded`](Headers::append_folded): a duplicate name concatenates
/// the new value with `", "`, reproducing multi-value header folding as
/// observed on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: &str) {
        match self.position(name) {
            Some(index) => self.entries[index].1 = value.to_owned(),
            None => self.entries.push((name.to_owned(), value.to_owned())),
        }
    }

    pub fn append_folded(&mut self, name: &str, value: &str) {
        match self.position(name) {
            Some(index) => {
                let existing = &mut self.entries[index].1;
                existing.push_str(", ");
                existing.push_str(value);
            }
            None => self.entries.push((name.to_owned(), value.to_owned())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|index| self.entries[index].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Builds a folded map from raw `(name, value)` pairs, comma-joining
    /// duplicates in observed order.
    pub fn folded<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.append_folded(&name, &value);
        }
        headers
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }
}

impl FromIterator<(String, String)> for Headers {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.set(&name, &value);
        }
        headers
    }
}

impl serde::Serialize for Headers {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// One recorded HTTP exchange. `response` stays `None` until the harness
/// reports the matching response and is written at most once.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEntry {
    method: Method,
    endpoint: String,
    request_headers: Headers,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_body: Option<String>,
    sent_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<ResponseTelemetry>,
}

impl TelemetryEntry {
    pub(crate) fn new(
        method: Method,
        endpoint: &str,
        request_headers: Headers,
        request_body: Option<String>,
    ) -> Self {
        Self {
            method,
            endpoint: endpoint.to_owned(),
            request_headers,
            request_body,
            sent_at: Utc::now(),
            response: None,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn request_headers(&self) -> &Headers {
        &self.request_headers
    }

    pub fn request_body(&self) -> Option<&str> {
        self.request_body.as_deref()
    }

    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    pub fn response(&self) -> Option<&ResponseTelemetry> {
        self.response.as_ref()
    }

    pub fn is_answered(&self) -> bool {
        self.response.is_some()
    }

    /// Single-shot write: a second attach attempt is refused.
    pub(crate) fn attach_response(&mut self, response: ResponseTelemetry) -> bool {
        if self.response.is_some() {
            return false;
        }
        self.response = Some(response);
        true
    }
}

/// The resolved response half of a telemetry entry.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ResponseTelemetry {
    status_code: u16,
    status_text: String,
    headers: Headers,
    body: String,
    content_type: String,
    #[serde(rename = "durationMs", with = "crate::reporter::serialize::duration_millis")]
    duration: Duration,
    received_at: DateTime<Utc>,
}

impl ResponseTelemetry {
    pub(crate) fn new(
        status_code: u16,
        status_text: &str,
        headers: Headers,
        body: &str,
        content_type: &str,
        duration: Duration,
    ) -> Self {
        Self {
            status_code,
            status_text: status_text.to_owned(),
            headers,
            body: body.to_owned(),
            content_type: content_type.to_owned(),
            duration,
            received_at: Utc::now(),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}
