use axum::{extract::rejection::JsonRejection, Json};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

// ===== REQUEST DTO =====

/// Raw body fields shared by every entity route.
///
/// Fields are kept as untyped JSON so the validators can report what was
/// actually sent (`"Car id abc is not a valid number !"`).
#[derive(Debug, Default, Clone, Deserialize)]
pub struct EntityRequest {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub code: Option<Value>,
}

impl EntityRequest {
    /// A missing or malformed body counts as a body with no fields
    pub fn from_payload(payload: Result<Json<EntityRequest>, JsonRejection>) -> Self {
        match payload {
            Ok(Json(request)) => request,
            Err(rejection) => {
                warn!(reason = %rejection.body_text(), "Unreadable request body, using no fields");
                Self::default()
            }
        }
    }
}
