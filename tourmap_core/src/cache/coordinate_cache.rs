//! The in-memory coordinate cache shared by all resolution requests.

use super::CacheFile;
use crate::types::{GeocodeResult, LocationToken};
use anyhow::Result;
use parking_lot::RwLock;
use std::{collections::HashMap, path::Path, sync::Arc};

/// Thread-safe mapping from location token to geocode result.
///
/// The cache is constructed once and shared by reference (typically in an
/// [`Arc`]) between all request workers. Reads take a shared lock, writes an
/// exclusive one; neither ever waits on disk. A file-backed cache snapshots
/// its full contents asynchronously after every write, so no write is
/// durable until its snapshot completes. Entries are never evicted.
#[derive(Debug, Default)]
pub struct CoordinateCache {
	entries: RwLock<HashMap<String, GeocodeResult>>,
	store: Option<Arc<CacheFile>>,
}

impl CoordinateCache {
	/// A memory-only cache that never touches disk.
	pub fn new() -> CoordinateCache {
		CoordinateCache::default()
	}

	/// A file-backed cache, populated from the snapshot at `path`.
	///
	/// A missing or unreadable snapshot is logged and treated as an empty
	/// cache; opening never fails.
	pub fn open(path: impl AsRef<Path>) -> CoordinateCache {
		let store = CacheFile::new(path.as_ref());
		let entries = store.load();
		CoordinateCache {
			entries: RwLock::new(entries),
			store: Some(Arc::new(store)),
		}
	}

	/// Looks up a token. Never blocks on network or disk.
	pub fn get(&self, token: &LocationToken) -> Option<GeocodeResult> {
		self.entries.read().get(token.as_str()).cloned()
	}

	/// Inserts or replaces the entry for `token` and returns immediately.
	///
	/// File-backed caches then persist the full mapping in the background;
	/// a failed snapshot is logged and does not affect the in-memory write.
	pub fn put(&self, token: &LocationToken, result: GeocodeResult) {
		self.entries.write().insert(token.as_str().to_string(), result);
		self.snapshot();
	}

	/// Number of cached tokens.
	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}

	/// Synchronously writes the current mapping to disk.
	///
	/// Lets an embedder drain the cache on shutdown instead of relying on
	/// the last background snapshot having finished. A no-op for
	/// memory-only caches.
	pub fn flush(&self) -> Result<()> {
		if let Some(store) = &self.store {
			store.save(&self.copy_entries())?;
		}
		Ok(())
	}

	// Copies the mapping under a brief shared lock so snapshots can write
	// outside of it.
	fn copy_entries(&self) -> HashMap<String, GeocodeResult> {
		self.entries.read().clone()
	}

	// Fire-and-forget snapshot of the full mapping. On a tokio runtime the
	// disk write runs on the blocking pool; without one it happens inline.
	fn snapshot(&self) {
		let Some(store) = &self.store else {
			return;
		};
		let store = Arc::clone(store);
		let copy = self.copy_entries();
		let save = move || {
			if let Err(err) = store.save(&copy) {
				log::warn!("failed to persist coordinate cache: {err:#}");
			}
		};
		match tokio::runtime::Handle::try_current() {
			Ok(handle) => {
				let _ = handle.spawn_blocking(save);
			}
			Err(_) => save(),
		}
	}
}
