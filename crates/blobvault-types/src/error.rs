use thiserror::Error;

use crate::digest::Algorithm;

/// Errors from digest parsing and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DigestError {
    /// The digest string or its hex payload is empty.
    #[error("digest must not be empty")]
    Empty,

    /// The digest string has no `algorithm:hex` separator.
    #[error("digest missing ':' separator")]
    MissingSeparator,

    /// The algorithm tag names an algorithm this build does not support.
    #[error("unsupported digest algorithm: {0:?}")]
    UnsupportedAlgorithm(String),

    /// The hex payload length does not match the algorithm's output size.
    #[error("digest hex for {algorithm} must be {expected} characters, got {actual}")]
    WrongLength {
        algorithm: Algorithm,
        expected: usize,
        actual: usize,
    },

    /// The hex payload contains a character outside lowercase `[0-9a-f]`.
    #[error("digest hex contains invalid character {found:?}")]
    InvalidHexCharacter { found: char },
}

/// Errors from descriptor validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    /// The descriptor's own digest is malformed.
    #[error("descriptor digest is invalid: {0}")]
    Digest(#[from] DigestError),

    /// The descriptor carries no media type.
    #[error("descriptor media type must not be empty")]
    EmptyMediaType,
}

/// A repository name failed namespace validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid repository name {name:?}: {reason}")]
pub struct NameError {
    pub name: String,
    pub reason: String,
}

impl NameError {
    pub(crate) fn new(name: &str, reason: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
