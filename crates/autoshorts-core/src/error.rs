// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the autoshorts pipeline.

use thiserror::Error;

/// Message recorded on a run when a fault carries no usable text.
pub const UNKNOWN_FAILURE: &str = "Unknown pipeline failure.";

/// The primary error type used across all stage collaborators and the pipeline.
#[derive(Debug, Error)]
pub enum AutoshortsError {
    /// Configuration errors (missing credentials, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Topic discovery failures (transport, unexpected status, unparseable feed).
    #[error("trends error: {message}")]
    Trends {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Generation provider failures (script drafting, video synthesis).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Publishing failures. Publishers normally fold these into an
    /// [`UploadResult`](crate::types::UploadResult) instead of returning them.
    #[error("publish error: {message}")]
    Publish {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Topic discovery returned no candidates.
    #[error("no trending topics found for region {region}")]
    NoTopics { region: String },

    /// The requested run id is not registered in the store.
    #[error("run not found: {id}")]
    RunNotFound { id: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AutoshortsError {
    /// Shorthand for a [`AutoshortsError::Provider`] without a source.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a [`AutoshortsError::Trends`] without a source.
    pub fn trends(message: impl Into<String>) -> Self {
        Self::Trends {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a [`AutoshortsError::Publish`] without a source.
    pub fn publish(message: impl Into<String>) -> Self {
        Self::Publish {
            message: message.into(),
            source: None,
        }
    }

    /// The short, human-readable message recorded as a run's `error`.
    ///
    /// Collaborator faults surface their own message without the category
    /// prefix used by `Display`. Empty messages normalize to [`UNKNOWN_FAILURE`].
    pub fn summary(&self) -> String {
        let message = match self {
            Self::Config(message) => message.clone(),
            Self::Trends { message, .. }
            | Self::Provider { message, .. }
            | Self::Publish { message, .. } => message.clone(),
            Self::NoTopics { .. } => "No trending topics found.".to_string(),
            Self::Internal(message) => message.clone(),
            other => other.to_string(),
        };

        if message.trim().is_empty() {
            UNKNOWN_FAILURE.to_string()
        } else {
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_strips_category_prefix() {
        let err = AutoshortsError::provider("rate limited");
        assert_eq!(err.to_string(), "provider error: rate limited");
        assert_eq!(err.summary(), "rate limited");
    }

    #[test]
    fn summary_for_empty_topics() {
        let err = AutoshortsError::NoTopics {
            region: "US".into(),
        };
        assert_eq!(err.summary(), "No trending topics found.");
    }

    #[test]
    fn empty_message_falls_back_to_unknown() {
        assert_eq!(AutoshortsError::provider("  ").summary(), UNKNOWN_FAILURE);
        assert_eq!(AutoshortsError::Internal(String::new()).summary(), UNKNOWN_FAILURE);
    }

    #[test]
    fn run_not_found_names_the_id() {
        let err = AutoshortsError::RunNotFound { id: "abc".into() };
        assert_eq!(err.to_string(), "run not found: abc");
        assert_eq!(err.summary(), "run not found: abc");
    }

    #[test]
    fn timeout_summary_uses_display() {
        let err = AutoshortsError::Timeout {
            duration: std::time::Duration::from_secs(5),
        };
        assert_eq!(err.summary(), "operation timed out after 5s");
    }
}
