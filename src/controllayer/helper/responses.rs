use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use opentelemetry::{KeyValue, metrics::Counter};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{error, warn};

use crate::errors::errors::ServiceResult;
use crate::logging::create_counter;

/// Uniform response body written for every CRUD request.
///
/// ```json
/// { "status": "success", "data": ... }
/// { "status": "error", "message": "..." }
/// ```
///
/// An empty result is a success envelope whose `data` is `[]`. Successful
/// payloads are never empty, so callers can tell "nothing found" apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    Success { data: Value },
    Error { message: String },
}

impl Envelope {
    pub fn success<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(data) => Envelope::Success { data },
            Err(e) => {
                error!(error = %e, "Failed to serialize response payload");
                Envelope::error(format!("Failed to serialize response: {}", e))
            }
        }
    }

    pub fn empty() -> Self {
        Envelope::Success {
            data: Value::Array(Vec::new()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Envelope::Error {
            message: message.into(),
        }
    }

    /// Success envelope from a list, or the empty envelope if there is nothing to send
    pub fn from_list<T: Serialize>(items: &[T]) -> Self {
        if items.is_empty() {
            Envelope::empty()
        } else {
            Envelope::success(&items)
        }
    }

    /// Success envelope from an optional entity, or the empty envelope
    pub fn from_option<T: Serialize>(item: Option<&T>) -> Self {
        match item {
            Some(item) => Envelope::success(item),
            None => Envelope::empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Envelope::Success { data } => match data {
                Value::Array(items) => items.is_empty(),
                Value::Object(fields) => fields.is_empty(),
                _ => false,
            },
            Envelope::Error { .. } => false,
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            Envelope::Success { .. } if self.is_empty() => "empty",
            Envelope::Success { .. } => "success",
            Envelope::Error { .. } => "error",
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

static ENVELOPE_COUNTER: OnceLock<Counter<u64>> = OnceLock::new();

fn envelope_counter() -> &'static Counter<u64> {
    ENVELOPE_COUNTER.get_or_init(|| {
        create_counter(
            "envelope_responses_total",
            "Envelopes written, by route and outcome",
        )
    })
}

/// Turn the outcome of a control-layer operation into the single response
/// written for the request. Errors are logged and folded into the error
/// envelope.
pub fn respond(route: &'static str, outcome: ServiceResult<Envelope>) -> Response {
    let envelope = match outcome {
        Ok(envelope) => envelope,
        Err(e) => {
            if e.is_validation() {
                warn!(route, message = %e, "Request rejected by validation");
            } else {
                error!(route, code = e.error_code(), error = %e, "Store operation failed");
            }
            Envelope::error(e.to_string())
        }
    };

    envelope_counter().add(
        1,
        &[
            KeyValue::new("route", route),
            KeyValue::new("status", envelope.status_label()),
        ],
    );

    envelope.into_response()
}
