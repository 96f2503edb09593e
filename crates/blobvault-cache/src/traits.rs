use blobvault_types::{Descriptor, Digest};

use crate::error::CacheResult;

/// Read/write access to cached blob descriptors.
///
/// All implementations must satisfy these invariants:
/// - `stat` and `set_descriptor` validate the digest (and, for writes, the
///   descriptor) before touching any state, and propagate validator errors
///   verbatim.
/// - A missing entry is reported as [`CacheError::BlobUnknown`], never as a
///   silent default.
/// - Writes are serialized per cache instance; reads may proceed in
///   parallel.
/// - Entries live until the process exits. There is no eviction, expiry,
///   or size bound.
///
/// [`CacheError::BlobUnknown`]: crate::CacheError::BlobUnknown
pub trait DescriptorCache: Send + Sync {
    /// Look up the descriptor cached for `digest`.
    ///
    /// Fails with `InvalidDigest` on a malformed digest and `BlobUnknown`
    /// when no entry exists.
    fn stat(&self, digest: &Digest) -> CacheResult<Descriptor>;

    /// Cache `descriptor` under `digest`.
    ///
    /// Fails with `InvalidDigest` or `InvalidDescriptor` when either input
    /// is malformed. Overwrite semantics are implementation-defined: the
    /// leaf cache is last-write-wins, the global provider keeps the
    /// first-seen descriptor for a digest.
    fn set_descriptor(&self, digest: &Digest, descriptor: Descriptor) -> CacheResult<()>;
}
