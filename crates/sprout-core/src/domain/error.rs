// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (the pipeline keeps them in reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid template reference '{input}': {reason}")]
    InvalidTemplateRef { input: String, reason: &'static str },

    #[error("Invalid endpoint base URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidTemplateRef { input, .. } => vec![
                format!("'{}' is not of the form <owner>/<repo>", input),
                "Example: sprout my-app --template=alreadyExisted/das-react-template".into(),
            ],
            Self::InvalidEndpoint { url, .. } => vec![
                format!("Check the configured source URL: {}", url),
                "Endpoints must start with http:// or https://".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTemplateRef { .. } => ErrorCategory::Validation,
            Self::InvalidEndpoint { .. } => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}
