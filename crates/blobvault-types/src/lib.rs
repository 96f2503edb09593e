//! Foundation types for Blobvault.
//!
//! This crate provides the value types and pure validators shared by the
//! Blobvault storage crates. It holds no state and takes no locks; every
//! function here is a plain computation.
//!
//! # Key Types
//!
//! - [`Digest`] — algorithm-tagged content hash in `algorithm:hex` form
//! - [`Algorithm`] — supported hash algorithms (SHA-256, SHA-512, BLAKE3)
//! - [`Descriptor`] — blob metadata: canonical digest, size, media type
//! - [`validate_repository_name`] — namespace-format check for repository
//!   names
//!
//! Digest and descriptor validation are deliberately separate from
//! construction: callers such as the descriptor cache run them as
//! precondition checks and propagate their errors verbatim.

pub mod descriptor;
pub mod digest;
pub mod error;
pub mod repository;

pub use descriptor::Descriptor;
pub use digest::{Algorithm, Digest};
pub use error::{DescriptorError, DigestError, NameError};
pub use repository::{validate_repository_name, REPOSITORY_NAME_MAX_LEN};
