use plp_files::StoreError;
use plp_types::{IdError, PayloadError};

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(#[from] IdError),
    #[error("a version selector is only allowed when reading")]
    VersionNotAllowed,
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] PayloadError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

pub type PromptResult<T> = std::result::Result<T, PromptError>;

/// How a failure should be reported at the protocol boundary.
///
/// Absence is not an error and has no class: operations report it as `None` or `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request itself is wrong; retrying it unchanged cannot succeed.
    BadRequest,
    /// The environment failed (I/O, permissions, corrupt data, configuration).
    Internal,
}

impl PromptError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidIdentifier(_)
            | Self::VersionNotAllowed
            | Self::MalformedPayload(_)
            | Self::Store(StoreError::PathTraversal(_)) => ErrorClass::BadRequest,
            Self::InvalidConfig(_) | Self::StorageDirCreation(_) | Self::Store(_) => {
                ErrorClass::Internal
            }
        }
    }

    /// A message safe to return to clients.
    ///
    /// Internal failures are reported generically so storage paths and OS error details stay in
    /// the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::Store(StoreError::PathTraversal(_)) => "invalid identifier".into(),
            _ if self.class() == ErrorClass::Internal => "internal error".into(),
            other => other.to_string(),
        }
    }
}
