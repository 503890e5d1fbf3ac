use crate::fixtures::Resource;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub type GpResult<T, E = GpError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum GpError {
    /// The request failed, or its body was not JSON of the expected shape.
    #[error("failed to fetch or parse {resource}: {reason}")]
    FetchOrParse { resource: Resource, reason: String },

    #[error("{0} fixture not found")]
    FixtureNotFound(Resource),

    #[error("malformed {resource} fixture: {reason}")]
    MalformedFixture { resource: Resource, reason: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("at least {required} profile(s) required, found {found}")]
    NotEnoughProfiles { required: usize, found: usize },

    #[error("an internal server error occurred")]
    Anyhow(#[from] anyhow::Error),
}

impl GpError {
    pub fn fetch_or_parse(resource: Resource, reason: impl std::fmt::Display) -> Self {
        Self::FetchOrParse {
            resource,
            reason: reason.to_string(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::FetchOrParse { .. } => StatusCode::BAD_GATEWAY,
            Self::FixtureNotFound(_) => StatusCode::NOT_FOUND,
            Self::MalformedFixture { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotEnoughProfiles { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Body of every status response the backend sends.
#[derive(serde::Serialize, Debug)]
pub struct JsonStatus {
    pub status: &'static str,
    pub message: String,
}

impl JsonStatus {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok",
            message: message.into(),
        }
    }
}

impl IntoResponse for GpError {
    fn into_response(self) -> Response {
        match self {
            Self::Anyhow(ref e) => {
                tracing::error!("Generic error: {:?}", e);
            }
            Self::MalformedFixture { .. } => {
                tracing::error!("{}", self);
            }
            _ => {}
        }

        (
            self.status_code(),
            Json(JsonStatus {
                status: "error",
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            StatusCode::NOT_FOUND,
            GpError::FixtureNotFound(Resource::Profiles).status_code()
        );
        assert_eq!(
            StatusCode::UNPROCESSABLE_ENTITY,
            GpError::NotEnoughProfiles {
                required: 1,
                found: 0
            }
            .status_code()
        );
        assert_eq!(
            StatusCode::INTERNAL_SERVER_ERROR,
            GpError::from(anyhow::anyhow!("boom")).status_code()
        );
        assert_eq!(
            StatusCode::BAD_REQUEST,
            GpError::InvalidRequest("count".to_string()).status_code()
        );
    }

    #[test]
    fn fetch_or_parse_message_names_the_resource() {
        let error = GpError::fetch_or_parse(Resource::Passwords, "connection refused");
        assert_eq!(
            "failed to fetch or parse passwords: connection refused",
            error.to_string()
        );
    }
}
