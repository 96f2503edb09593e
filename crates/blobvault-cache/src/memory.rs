//! In-memory descriptor cache: a global digest-keyed tier plus lazily
//! allocated per-repository tiers.
//!
//! [`InMemoryCacheProvider`] owns one store-wide [`MapDescriptorCache`] and
//! a table of per-repository caches. Callers obtain a
//! [`RepositoryScopedCache`] view for a repository; reads on the view see
//! only that repository's entries, while every successful write is also
//! mirrored into the global tier so the blob becomes visible store-wide by
//! digest alone.
//!
//! All state is volatile and unbounded: entries are kept for the process
//! lifetime with no eviction, expiry, or size cap.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use blobvault_types::{validate_repository_name, Descriptor, Digest};

use crate::error::{CacheError, CacheResult};
use crate::traits::DescriptorCache;

/// A single-tier digest-to-descriptor cache.
///
/// A `HashMap` behind a `RwLock`: any number of concurrent `stat` calls,
/// writes exclusive per instance. Within one instance the descriptor stored
/// under a digest of the same algorithm always carries that digest; entries
/// under a different algorithm's digest are aliases installed by the
/// provider's canonical-digest logic.
#[derive(Debug)]
pub struct MapDescriptorCache {
    descriptors: RwLock<HashMap<Digest, Descriptor>>,
}

impl MapDescriptorCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self {
            descriptors: RwLock::new(HashMap::new()),
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.descriptors.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.descriptors.read().expect("lock poisoned").is_empty()
    }
}

impl Default for MapDescriptorCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorCache for MapDescriptorCache {
    fn stat(&self, digest: &Digest) -> CacheResult<Descriptor> {
        digest.validate()?;

        let descriptors = self.descriptors.read().expect("lock poisoned");
        descriptors
            .get(digest)
            .cloned()
            .ok_or(CacheError::BlobUnknown)
    }

    fn set_descriptor(&self, digest: &Digest, descriptor: Descriptor) -> CacheResult<()> {
        digest.validate()?;
        descriptor.validate()?;

        let mut descriptors = self.descriptors.write().expect("lock poisoned");
        // Last write wins at this tier; first-write-wins is enforced one
        // level up by the provider.
        descriptors.insert(digest.clone(), descriptor);
        Ok(())
    }
}

/// The store-wide descriptor cache provider.
///
/// Owns the global tier and the repository-name table. The table lock is
/// independent of any individual cache's lock: binding or allocating a
/// repository cache never blocks on that cache's own reads or writes.
pub struct InMemoryCacheProvider {
    global: MapDescriptorCache,
    repositories: RwLock<HashMap<String, Arc<MapDescriptorCache>>>,
}

impl InMemoryCacheProvider {
    /// Create a provider with an empty global tier and no repository caches.
    pub fn new() -> Self {
        Self {
            global: MapDescriptorCache::new(),
            repositories: RwLock::new(HashMap::new()),
        }
    }

    /// Obtain a view scoped to `repository`.
    ///
    /// Fails with `InvalidRepositoryName` on a malformed name. The view is
    /// bound to the repository's cache if one already exists; otherwise it
    /// starts unbound and allocation is deferred to its first write. Looking
    /// up a scope never allocates.
    ///
    /// Views are cheap and intended to be per-caller; obtain a fresh one
    /// rather than sharing.
    pub fn repository_scoped(&self, repository: &str) -> CacheResult<RepositoryScopedCache<'_>> {
        validate_repository_name(repository)?;

        let repositories = self.repositories.read().expect("lock poisoned");
        Ok(RepositoryScopedCache {
            repository: repository.to_string(),
            parent: self,
            cache: repositories.get(repository).cloned(),
        })
    }

    /// Number of repositories with an allocated cache.
    pub fn repository_count(&self) -> usize {
        self.repositories.read().expect("lock poisoned").len()
    }

    /// Number of entries in the global tier.
    pub fn global_len(&self) -> usize {
        self.global.len()
    }
}

impl Default for InMemoryCacheProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorCache for InMemoryCacheProvider {
    fn stat(&self, digest: &Digest) -> CacheResult<Descriptor> {
        self.global.stat(digest)
    }

    /// Store-wide write with canonical-digest deduplication.
    ///
    /// A digest already known to the global tier is never overwritten: the
    /// first-seen descriptor for a digest wins permanently. For a new digest
    /// whose key differs from the descriptor's own canonical digest, the
    /// canonical entry is written first and the requested key becomes an
    /// alias to the same payload. The two writes are not atomic: if the
    /// alias write fails the canonical entry is not rolled back, and the
    /// caller sees the error despite the partial progress.
    fn set_descriptor(&self, digest: &Digest, descriptor: Descriptor) -> CacheResult<()> {
        match self.global.stat(digest) {
            Err(CacheError::BlobUnknown) => {
                if digest != &descriptor.digest {
                    let canonical = descriptor.digest.clone();
                    self.global.set_descriptor(&canonical, descriptor.clone())?;
                }
                self.global.set_descriptor(digest, descriptor)
            }
            // Already known: keep the first-seen descriptor.
            Ok(_) => Ok(()),
            Err(err) => Err(err),
        }
    }
}

impl std::fmt::Debug for InMemoryCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCacheProvider")
            .field("global_entries", &self.global.len())
            .field("repositories", &self.repository_count())
            .finish()
    }
}

/// A descriptor cache view bound to one repository.
///
/// The view holds a borrow of its provider and a possibly-unbound handle to
/// the repository's cache; an unbound view belongs to a repository that has
/// never been written to and answers every `stat` with `BlobUnknown`. The
/// first write allocates (or picks up) the repository's cache, and the view
/// stays bound from then on.
///
/// A view is a transient, single-caller handle: writing takes `&mut self`,
/// so sharing one across threads does not compile. Concurrent callers each
/// take their own view from [`InMemoryCacheProvider::repository_scoped`];
/// first writes racing on the same repository converge on one shared cache.
pub struct RepositoryScopedCache<'a> {
    repository: String,
    parent: &'a InMemoryCacheProvider,
    cache: Option<Arc<MapDescriptorCache>>,
}

impl RepositoryScopedCache<'_> {
    /// The repository this view is scoped to.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Returns `true` if the view is not yet bound to a repository cache.
    pub fn is_unbound(&self) -> bool {
        self.cache.is_none()
    }

    /// Look up a descriptor within this repository's scope.
    ///
    /// A repository with no prior writes knows nothing: an unbound view
    /// fails immediately with `BlobUnknown`, without allocating storage
    /// just to answer a read.
    pub fn stat(&self, digest: &Digest) -> CacheResult<Descriptor> {
        match &self.cache {
            Some(cache) => cache.stat(digest),
            None => Err(CacheError::BlobUnknown),
        }
    }

    /// Cache `descriptor` under `digest` in this repository's scope, and
    /// mirror it into the global tier.
    ///
    /// If the repository write fails the global tier is left untouched; a
    /// global-tier failure is propagated after the repository write has
    /// succeeded.
    pub fn set_descriptor(&mut self, digest: &Digest, descriptor: Descriptor) -> CacheResult<()> {
        let cache = match &self.cache {
            Some(cache) => Arc::clone(cache),
            None => {
                let mut repositories = self.parent.repositories.write().expect("lock poisoned");
                // Re-read under the lock: another view may have allocated
                // this repository's cache since ours was created.
                let cache = repositories
                    .entry(self.repository.clone())
                    .or_insert_with(|| {
                        debug!(repository = %self.repository, "allocating repository descriptor cache");
                        Arc::new(MapDescriptorCache::new())
                    })
                    .clone();
                drop(repositories);
                self.cache = Some(Arc::clone(&cache));
                cache
            }
        };

        cache.set_descriptor(digest, descriptor.clone())?;
        self.parent.set_descriptor(digest, descriptor)
    }
}

impl std::fmt::Debug for RepositoryScopedCache<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryScopedCache")
            .field("repository", &self.repository)
            .field("bound", &self.cache.is_some())
            .finish()
    }
}
