// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for nimbus-api.

use serde::Deserialize;
use thiserror::Error;

use nimbus_store::Verb;

/// Result type using ApiError.
pub type Result<T> = std::result::Result<T, ApiError>;

/// One field-scoped failure reason from an API error body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiFieldError {
    /// Offending request field; absent for request-level failures.
    pub field: Option<String>,
    /// Human-readable reason.
    pub reason: String,
}

/// Wire shape of an API failure body: `{"errors": [{"field": ..., "reason": ...}]}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub errors: Vec<ApiFieldError>,
}

/// Errors that can occur when talking to the console API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Configuration error (missing or invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection-level failure: DNS, TLS, timeout, malformed response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("api error [{}]: {}", .status, join_reasons(.errors))]
    Api {
        /// HTTP status code.
        status: u16,
        /// Parsed failure reasons; at least one entry.
        errors: Vec<ApiFieldError>,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The entity kind does not allow this operation.
    #[error("{entity} does not support {verb}")]
    Unsupported {
        /// Rejected operation.
        verb: Verb,
        /// Plural name of the entity kind.
        entity: &'static str,
    },
}

impl ApiError {
    /// True for a 404 API response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Api { status: 404, .. })
    }

    /// True for a validation failure (4xx with field-scoped reasons).
    pub fn field_errors(&self) -> &[ApiFieldError] {
        match self {
            ApiError::Api { errors, .. } => errors,
            _ => &[],
        }
    }
}

fn join_reasons(errors: &[ApiFieldError]) -> String {
    errors
        .iter()
        .map(|e| match &e.field {
            Some(field) => format!("{field}: {}", e.reason),
            None => e.reason.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Serialization(err.to_string())
    }
}
