use std::fmt;

use reqwest::StatusCode;

use crate::api::Payload;

/// Errors surfaced by client operations.
///
/// Every command catches these at its boundary and turns them into user
/// feedback: field errors inline, everything else as a one-line notice.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{0}")]
    NotFound(String),

    #[error("Not signed in")]
    Unauthenticated,

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// A non-2xx response from the API.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: u16,
    pub payload: Payload,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, payload: Payload) -> Self {
        let message = resolve_message(status, &payload);
        Self {
            status: status.as_u16(),
            payload,
            message,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND.as_u16()
    }
}

/// Picks the message shown to the user for a failed request.
///
/// Order: `message`, `detail`, `error` from a JSON payload, then a text
/// body, then the status phrase.
fn resolve_message(status: StatusCode, payload: &Payload) -> String {
    let from_body = match payload {
        Payload::Json(value) => ["message", "detail", "error"]
            .iter()
            .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
            .find(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| value.as_str().map(str::to_string)),
        Payload::Text(text) => Some(text.clone()),
        Payload::Empty => None,
    };

    from_body
        .filter(|s| !s.trim().is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "Request failed".to_string())
}

/// Per-field validation messages, in the order the fields were checked.
///
/// Only the first failing rule of each field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(&'static str, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.errors.push((field, message.into()));
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(name, message)| (*name, message.as_str()))
    }

    /// `Ok(())` when nothing failed, otherwise [`AppError::Validation`].
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}
