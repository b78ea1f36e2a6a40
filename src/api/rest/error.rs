//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::AromaError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// A URI reference that identifies the specific occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add instance URI
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: AromaError) -> Problem {
    match error {
        AromaError::NotFound { resource, id } => Problem::new(
            StatusCode::NOT_FOUND,
            format!("{} Not Found", capitalize(&resource)),
        )
        .with_detail(format!("{resource} with id '{id}' was not found")),

        AromaError::Validation { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error").with_detail(message)
        }

        AromaError::Conflict { reason } => {
            Problem::new(StatusCode::CONFLICT, "Conflict").with_detail(reason)
        }

        AromaError::Forbidden => Problem::new(StatusCode::FORBIDDEN, "Forbidden")
            .with_detail("This operation requires the admin role"),

        AromaError::Internal => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
        )
        .with_detail("An unexpected error occurred"),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let problem = map_domain_error(AromaError::not_found("ingredient", "abc"));
        assert_eq!(problem.status, 404);
        assert_eq!(problem.title, "Ingredient Not Found");
    }

    #[test]
    fn validation_maps_to_400() {
        let problem = map_domain_error(AromaError::validation("bad range"));
        assert_eq!(problem.status, 400);
        assert_eq!(problem.detail.as_deref(), Some("bad range"));
    }

    #[test]
    fn forbidden_maps_to_403() {
        let problem = map_domain_error(AromaError::Forbidden);
        assert_eq!(problem.status, 403);
    }

    #[test]
    fn conflict_maps_to_409() {
        let problem = map_domain_error(AromaError::conflict("phase 'A' already exists"));
        assert_eq!(problem.status, 409);
    }
}
