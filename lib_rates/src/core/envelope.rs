//! # Response Envelope
//!
//! Every operation answers with a status code and a JSON body, the same pair
//! whether it is driven by the HTTP server or by a one-shot trigger.

use serde::Serialize;
use serde_json::{json, Value};

/// A `{statusCode, body}` response pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// HTTP-style status: 200 on success, 500 on any failure.
    pub status_code: u16,
    /// The JSON body.
    pub body: Value,
}

impl Envelope {
    /// A 200 envelope around any serializable body.
    ///
    /// Falls back to a 500 envelope if the body cannot be represented as JSON.
    pub fn ok<T: Serialize>(body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status_code: 200, body },
            Err(e) => {
                tracing::error!(error = %e, "response body could not be serialized");
                Self::failure("Failed to serialize response.")
            }
        }
    }

    /// A 200 envelope carrying `{ "message": message }`.
    pub fn message(message: &str) -> Self {
        Self {
            status_code: 200,
            body: json!({ "message": message }),
        }
    }

    /// A 500 envelope carrying `{ "error": message }`.
    pub fn failure(message: &str) -> Self {
        Self {
            status_code: 500,
            body: json!({ "error": message }),
        }
    }

    /// True for 2xx envelopes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_status_code_in_camel_case() {
        let env = Envelope::message("done");
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value, json!({ "statusCode": 200, "body": { "message": "done" } }));
    }

    #[test]
    fn test_failure_is_500_with_error_field() {
        let env = Envelope::failure("boom");
        assert_eq!(env.status_code, 500);
        assert!(!env.is_success());
        assert_eq!(env.body["error"], "boom");
    }
}
