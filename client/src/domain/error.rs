//! Domain-level error types.
//!
//! These errors are presentation agnostic. The selection flow turns them into
//! the user-visible message and, for failed user lookups, a redirect to the
//! landing page.

use std::fmt;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// A read call (current user, major list) failed in transport or status.
    FetchFailure,
    /// Local preconditions failed; no network call was made for the action.
    ValidationFailure,
    /// The major update call was rejected or failed in transport.
    MutationFailure,
    /// The session cache adapter could not read or write its slot.
    CacheFailure,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use stitch_client::domain::{Error, ErrorCode};
///
/// let err = Error::validation("Please select a major.");
/// assert_eq!(err.code(), ErrorCode::ValidationFailure);
/// assert!(!err.redirects_to_landing());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    redirect_to_landing: bool,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValidationError {
    /// The message was empty or whitespace.
    EmptyMessage,
}

impl fmt::Display for ErrorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for ErrorValidationError {}

impl Error {
    /// Create a new error, panicking if validation fails.
    ///
    /// # Panics
    ///
    /// Panics when `message` is blank. Use [`Error::try_new`] for messages
    /// that come from outside the crate.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            redirect_to_landing: false,
        })
    }

    /// Stable machine-readable error code.
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message shown to the user.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Whether the session should fall back to the unauthenticated landing page.
    pub const fn redirects_to_landing(&self) -> bool {
        self.redirect_to_landing
    }

    /// Flag the error as ending the session on the landing page.
    #[must_use]
    pub fn with_landing_redirect(mut self) -> Self {
        self.redirect_to_landing = true;
        self
    }

    /// Convenience constructor for [`ErrorCode::FetchFailure`].
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::FetchFailure, message)
    }

    /// Convenience constructor for [`ErrorCode::ValidationFailure`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailure, message)
    }

    /// Convenience constructor for [`ErrorCode::MutationFailure`].
    pub fn mutation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MutationFailure, message)
    }

    /// Convenience constructor for [`ErrorCode::CacheFailure`].
    pub fn cache(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CacheFailure, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
