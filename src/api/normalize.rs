//! Response normalization.
//!
//! Maps whatever the transport produced into one `Envelope`. Upstream bodies
//! are first classified into an `UpstreamBody` variant and then handled by
//! exactly one rule, so the first matching shape always wins. Nothing in this
//! module returns an error to its caller.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::api::envelope::Envelope;
use crate::api::status::StatusMessageTable;
use crate::api::transport::{RawResponse, TransportError};

/// Keys that mark an upstream body as carrying its own envelope.
const ENVELOPE_KEYS: [&str; 4] = ["status", "message", "success", "data"];

const TIMEOUT_MESSAGE: &str = "Server response timeout";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
const INTERFACE_ERROR_MESSAGE: &str = "Interface Error";

/// Shape of an upstream body, decided once before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpstreamBody<'a> {
    /// Absent, `null`, or `""`.
    Empty,
    /// A non-empty string.
    Text(&'a str),
    /// An object with at least one of `status`, `message`, `success`, `data`.
    SelfDescribing(&'a Map<String, Value>),
    /// Any other object.
    PlainObject(&'a Map<String, Value>),
    Array(&'a [Value]),
    /// A number or boolean.
    Scalar(&'a Value),
}

impl<'a> UpstreamBody<'a> {
    /// Pick the variant for a decoded body, first match wins.
    pub fn classify(body: Option<&'a Value>) -> Self {
        match body {
            None | Some(Value::Null) => UpstreamBody::Empty,
            Some(Value::String(s)) if s.is_empty() => UpstreamBody::Empty,
            Some(Value::String(s)) => UpstreamBody::Text(s),
            Some(Value::Object(map)) if ENVELOPE_KEYS.iter().any(|k| map.contains_key(*k)) => {
                UpstreamBody::SelfDescribing(map)
            }
            Some(Value::Object(map)) => UpstreamBody::PlainObject(map),
            Some(Value::Array(items)) => UpstreamBody::Array(items),
            Some(other) => UpstreamBody::Scalar(other),
        }
    }
}

/// A self-describing body whose fields have the wrong types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnwrapError {
    #[error("`success` must be a boolean, got {0}")]
    Success(Value),

    #[error("`status` is not a valid status code: {0}")]
    Status(Value),

    #[error("`message` must be a string, got {0}")]
    Message(Value),
}

/// Turns transport results into envelopes using a fixed status table.
#[derive(Debug, Clone)]
pub struct Normalizer {
    table: StatusMessageTable,
    log_failures: bool,
}

impl Normalizer {
    /// `log_failures` enables error logging of raw transport failures.
    pub fn new(table: StatusMessageTable, log_failures: bool) -> Self {
        Self {
            table,
            log_failures,
        }
    }

    /// Status table used for failure messages.
    pub fn table(&self) -> &StatusMessageTable {
        &self.table
    }

    /// Normalize one transport outcome.
    pub fn normalize(&self, result: &Result<RawResponse, TransportError>) -> Envelope {
        match result {
            Ok(raw) => self.normalize_success(raw),
            Err(error) => self.normalize_failure(error),
        }
    }

    /// Normalize a completed exchange.
    pub fn normalize_success(&self, raw: &RawResponse) -> Envelope {
        match UpstreamBody::classify(raw.body.as_ref()) {
            UpstreamBody::Empty => {
                let status = if raw.status == 0 { 500 } else { raw.status };
                Envelope::failure(status, self.describe(status, &raw.status_text))
            }
            UpstreamBody::Text(text) => Envelope::success(
                serde_json::json!({ "value": text }),
                raw.status,
                Some(text.to_string()),
            ),
            UpstreamBody::SelfDescribing(map) => match self.unwrap_envelope(map, raw) {
                Ok(envelope) => envelope,
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        status = raw.status,
                        "Failed to unwrap self-describing response body"
                    );
                    Envelope::failure(502, Some(INTERFACE_ERROR_MESSAGE.to_string()))
                }
            },
            UpstreamBody::PlainObject(map) => Envelope::success(
                Value::Object(map.clone()),
                raw.status,
                self.describe(raw.status, &raw.status_text),
            ),
            UpstreamBody::Array(items) => Envelope::success(
                Value::Array(items.to_vec()),
                raw.status,
                self.describe(raw.status, &raw.status_text),
            ),
            UpstreamBody::Scalar(value) => Envelope::success(
                value.clone(),
                raw.status,
                self.describe(raw.status, &raw.status_text),
            ),
        }
    }

    /// Normalize a failed exchange.
    pub fn normalize_failure(&self, error: &TransportError) -> Envelope {
        if self.log_failures {
            tracing::error!(
                kind = ?error.kind,
                error = %error,
                status = ?error.response.as_ref().map(|r| r.status),
                "Upstream request failed"
            );
        }

        let Some(response) = &error.response else {
            // The request never reached or never returned from the server.
            let message = self.table.lookup(408).unwrap_or(TIMEOUT_MESSAGE);
            return Envelope::failure(408, Some(message.to_string()));
        };

        let message = self
            .table
            .lookup(response.status)
            .or_else(|| Some(error.message.as_str()).filter(|m| !m.is_empty()))
            .unwrap_or(INTERNAL_ERROR_MESSAGE);

        Envelope::failure(response.status, Some(message.to_string()))
    }

    fn unwrap_envelope(
        &self,
        map: &Map<String, Value>,
        raw: &RawResponse,
    ) -> Result<Envelope, UnwrapError> {
        let success = match map.get("success") {
            None => true,
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Null) => false,
            Some(other) => return Err(UnwrapError::Success(other.clone())),
        };

        let declared = match map.get("status") {
            Some(value) => coerce_status(value)?,
            None => None,
        };
        let status = if !success && !map.contains_key("status") {
            503
        } else {
            declared.unwrap_or(raw.status)
        };

        let message = match map.get("message") {
            Some(Value::String(msg)) if !msg.is_empty() => Some(msg.clone()),
            None | Some(Value::Null) | Some(Value::String(_)) => {
                self.describe(status, &raw.status_text)
            }
            Some(other) => return Err(UnwrapError::Message(other.clone())),
        };

        let data = match map.get("data") {
            Some(data) if !is_blank(data) => data.clone(),
            _ => Value::Object(
                map.iter()
                    .filter(|(key, _)| !ENVELOPE_KEYS.contains(&key.as_str()))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
            ),
        };

        Ok(Envelope {
            data,
            success,
            status,
            message,
        })
    }

    /// Table phrase for `status`, else the transport's reason phrase.
    fn describe(&self, status: u16, status_text: &str) -> Option<String> {
        self.table
            .lookup(status)
            .or(Some(status_text).filter(|text| !text.is_empty()))
            .map(str::to_string)
    }
}

/// A declared `status`, where falsy values (`null`, `0`, `""`, `false`)
/// defer to the transport status.
fn coerce_status(value: &Value) -> Result<Option<u16>, UnwrapError> {
    let invalid = || UnwrapError::Status(value.clone());
    let code = match value {
        Value::Null | Value::Bool(false) => return Ok(None),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
            .ok_or_else(invalid)?,
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim().parse::<u64>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };

    if code == 0 {
        return Ok(None);
    }
    u16::try_from(code).map(Some).map_err(|_| invalid())
}

/// Payloads that do not count as a `data` field.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}
