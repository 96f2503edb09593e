use thiserror::Error;

use blobvault_types::{DescriptorError, DigestError, NameError};

/// Errors surfaced by descriptor cache operations.
///
/// All four outcomes are reported to the immediate caller; nothing is
/// logged, retried, or suppressed inside the cache. [`CacheError::BlobUnknown`]
/// is expected and common — a miss, not a fault.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The digest key failed syntactic validation.
    #[error("invalid digest: {0}")]
    InvalidDigest(#[from] DigestError),

    /// The descriptor payload failed validation.
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(#[from] DescriptorError),

    /// The repository name failed namespace validation.
    #[error(transparent)]
    InvalidRepositoryName(#[from] NameError),

    /// No descriptor is cached for the requested digest in this scope.
    #[error("blob unknown to cache")]
    BlobUnknown,
}

/// Result alias for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
