//! HTTP endpoint modules; the shared error response type lives here.

mod catalog;
mod flow;
mod health;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub(crate) fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub use catalog::{apps, participants};
pub use flow::flow;
pub use health::health;
