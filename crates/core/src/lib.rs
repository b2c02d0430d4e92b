//! Shared primitives for all Rust crates in the permission service.

#![forbid(unsafe_code)]

/// Player identity primitives shared across services.
pub mod player;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use player::PlayerId;

/// Result type used across permission service crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Machine-readable detail attached to `NotFound` and `Conflict` errors.
///
/// Callers branch on this value instead of matching error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorReason {
    /// The referenced role does not exist.
    RoleNotFound,
    /// The referenced player has no record yet.
    PlayerNotFound,
    /// The player exists but is not a member of the role.
    DoesNotHaveRole,
    /// The player is already a member of the role.
    AlreadyHasRole,
    /// A role with the same identifier already exists.
    RoleAlreadyExists,
}

impl ErrorReason {
    /// Returns the stable transport value for this reason.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoleNotFound => "ROLE_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::DoesNotHaveRole => "DOES_NOT_HAVE_ROLE",
            Self::AlreadyHasRole => "ALREADY_HAS_ROLE",
            Self::RoleAlreadyExists => "ROLE_ALREADY_EXISTS",
        }
    }
}

impl Display for ErrorReason {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {message}")]
    NotFound {
        /// Human-readable description.
        message: String,
        /// Optional machine-readable detail.
        reason: Option<ErrorReason>,
    },

    /// Write operation conflicts with existing state.
    #[error("conflict: {message}")]
    Conflict {
        /// Human-readable description.
        message: String,
        /// Optional machine-readable detail.
        reason: Option<ErrorReason>,
    },

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Creates a `NotFound` error without a reason detail.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            reason: None,
        }
    }

    /// Creates a `NotFound` error carrying a reason detail.
    #[must_use]
    pub fn not_found_because(reason: ErrorReason, message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            reason: Some(reason),
        }
    }

    /// Creates a `Conflict` error without a reason detail.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            reason: None,
        }
    }

    /// Creates a `Conflict` error carrying a reason detail.
    #[must_use]
    pub fn conflict_because(reason: ErrorReason, message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            reason: Some(reason),
        }
    }

    /// Returns the machine-readable reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<ErrorReason> {
        match self {
            Self::NotFound { reason, .. } | Self::Conflict { reason, .. } => *reason,
            Self::Validation(_) | Self::Internal(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, ErrorReason, NonEmptyString};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(result.is_err());
    }

    #[test]
    fn non_empty_string_deserialization_is_validated() {
        let parsed = serde_json::from_str::<NonEmptyString>("\"\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn reason_is_exposed_for_classified_errors() {
        let error = AppError::conflict_because(ErrorReason::AlreadyHasRole, "duplicate");
        assert_eq!(error.reason(), Some(ErrorReason::AlreadyHasRole));
        assert_eq!(AppError::not_found("gone").reason(), None);
        assert_eq!(AppError::Internal("boom".to_owned()).reason(), None);
    }

    #[test]
    fn reason_transport_values_are_screaming_snake_case() {
        assert_eq!(ErrorReason::DoesNotHaveRole.as_str(), "DOES_NOT_HAVE_ROLE");
        assert_eq!(
            serde_json::to_string(&ErrorReason::PlayerNotFound).ok(),
            Some("\"PLAYER_NOT_FOUND\"".to_owned())
        );
    }
}
