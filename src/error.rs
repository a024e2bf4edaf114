// src/error.rs
//! Error taxonomy shared by the API client and the screens built on it

use std::fmt;
use thiserror::Error;

use crate::types::models::ApplicationStatus;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Unable to reach the server. Please check your network or contact support.")]
    Network(#[source] reqwest::Error),

    #[error("Unauthorized. Please log in again.")]
    Unauthorized,

    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// Blocked before submission, or the server's validation message verbatim
    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response format")]
    UnexpectedResponse,

    #[error("Cannot {action} an application that is {from}")]
    InvalidTransition {
        from: ApplicationStatus,
        action: &'static str,
    },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    /// Map a non-success HTTP status to the taxonomy
    pub fn from_status(
        status: u16,
        server_message: Option<String>,
        resource: &'static str,
    ) -> Self {
        match status {
            401 => ClientError::Unauthorized,
            404 => ClientError::NotFound { resource },
            _ => ClientError::Server {
                status,
                message: server_message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| "An error occurred".to_string()),
            },
        }
    }

    /// Whether the user should be sent back to the login form
    pub fn requires_login(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Transient notification shown after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

impl From<&ClientError> for Notice {
    fn from(err: &ClientError) -> Self {
        Notice::error(err.to_string())
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.level {
            NoticeLevel::Success => "✅",
            NoticeLevel::Info => "ℹ️ ",
            NoticeLevel::Warning => "⚠️ ",
            NoticeLevel::Error => "❌",
        };
        write!(f, "{} {}", marker, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            ClientError::from_status(401, None, "Application"),
            ClientError::Unauthorized
        ));
        assert_eq!(
            ClientError::from_status(404, None, "Application").to_string(),
            "Application not found"
        );
        assert_eq!(
            ClientError::from_status(422, Some("Email already registered".into()), "User")
                .to_string(),
            "Email already registered"
        );
        assert_eq!(
            ClientError::from_status(500, Some("  ".into()), "Job").to_string(),
            "An error occurred"
        );
    }

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            ClientError::Unauthorized.to_string(),
            "Unauthorized. Please log in again."
        );
        assert!(ClientError::Unauthorized.requires_login());

        let err = ClientError::InvalidTransition {
            from: ApplicationStatus::Accepted,
            action: "reject",
        };
        assert_eq!(
            err.to_string(),
            "Cannot reject an application that is ACCEPTED"
        );
        assert_eq!(Notice::from(&err).level, NoticeLevel::Error);
    }
}
