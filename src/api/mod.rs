// src/api/mod.rs
pub mod handlers;
pub mod types;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::warn;

use crate::utils::error::KycError;

impl ResponseError for KycError {
    fn status_code(&self) -> StatusCode {
        match self {
            KycError::Validation(_) => StatusCode::BAD_REQUEST,
            KycError::Verification(_) => StatusCode::UNPROCESSABLE_ENTITY,
            KycError::Session(_) => StatusCode::NOT_FOUND,
            KycError::Transition(_) | KycError::Submission(_) => StatusCode::CONFLICT,
            KycError::Backend(_) => StatusCode::BAD_GATEWAY,
            KycError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        warn!("Request failed: {}", self);
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}
