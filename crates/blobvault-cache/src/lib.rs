//! Blob descriptor caching for Blobvault.
//!
//! This crate fronts the content store with a two-tier, in-memory cache
//! mapping digests to blob [`Descriptor`]s. The global tier answers
//! store-wide lookups by digest alone; repository tiers partition lookups
//! by namespace while mirroring every write into the global tier.
//!
//! # Components
//!
//! - [`MapDescriptorCache`] — single-tier `RwLock<HashMap>` cache
//! - [`InMemoryCacheProvider`] — owns the global tier and the lazily
//!   allocated per-repository tiers
//! - [`RepositoryScopedCache`] — transient per-caller view bound to one
//!   repository
//!
//! # Design Rules
//!
//! 1. Digests, descriptors, and repository names are validated before any
//!    state is touched; validator errors propagate to the caller verbatim.
//! 2. The global tier keeps the first-seen descriptor for a digest; a
//!    descriptor whose canonical digest differs from the lookup key is also
//!    stored under its canonical digest.
//! 3. Repository tiers are allocated lazily on first write, exactly once
//!    per repository, and never removed.
//! 4. Each tier has its own reader/writer lock; the provider's repository
//!    table lock is independent of every tier's lock, so no nested
//!    cross-instance locking occurs.
//! 5. All state is volatile and unbounded: no persistence, eviction,
//!    expiry, or size cap. Long-lived processes grow without limit.
//!
//! [`Descriptor`]: blobvault_types::Descriptor

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{CacheError, CacheResult};
pub use memory::{InMemoryCacheProvider, MapDescriptorCache, RepositoryScopedCache};
pub use traits::DescriptorCache;
