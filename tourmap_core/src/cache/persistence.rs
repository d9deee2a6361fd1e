//! Disk persistence for the coordinate cache.
//!
//! The cache file is a pretty-printed JSON object mapping location tokens to
//! arrays of zero or one geocode record. Loading never fails: a missing,
//! empty or corrupt file behaves as an empty cache, since the file is only
//! an optimization to avoid re-querying a rate-limited public service after
//! a restart. The in-memory cache stays the source of truth.

use crate::types::GeocodeResult;
use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::{
	collections::HashMap,
	fs,
	path::{Path, PathBuf},
};

/// Default file name of the coordinate cache snapshot.
pub const COORDINATES_CACHE_FILE: &str = "coordinates_cache.json";

/// Reads and writes the coordinate cache snapshot file.
#[derive(Debug)]
pub struct CacheFile {
	path: PathBuf,
	// serializes concurrent saves so the last completed snapshot wins
	io_lock: Mutex<()>,
}

impl CacheFile {
	pub fn new(path: impl Into<PathBuf>) -> CacheFile {
		CacheFile {
			path: path.into(),
			io_lock: Mutex::new(()),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Loads the snapshot, treating every failure as an empty cache.
	pub fn load(&self) -> HashMap<String, GeocodeResult> {
		if !self.path.exists() {
			log::info!("no coordinate cache file at {:?}, starting empty", self.path);
			return HashMap::new();
		}
		let raw = match fs::read_to_string(&self.path) {
			Ok(raw) => raw,
			Err(err) => {
				log::warn!("failed to read coordinate cache file {:?}: {err}", self.path);
				return HashMap::new();
			}
		};
		match serde_json::from_str::<HashMap<String, GeocodeResult>>(&raw) {
			Ok(entries) => {
				log::info!("loaded coordinate cache with {} entries from {:?}", entries.len(), self.path);
				entries
			}
			Err(err) => {
				log::warn!("failed to decode coordinate cache file {:?}: {err}", self.path);
				HashMap::new()
			}
		}
	}

	/// Overwrites the snapshot with the full mapping.
	///
	/// The JSON is written to a sibling temp file and renamed into place, so
	/// a process opening the path concurrently never sees a torn snapshot.
	pub fn save(&self, entries: &HashMap<String, GeocodeResult>) -> Result<()> {
		let json = serde_json::to_string_pretty(entries).context("serializing coordinate cache")?;
		let tmp_path = self.path.with_extension("tmp");

		let _guard = self.io_lock.lock();
		fs::write(&tmp_path, json).with_context(|| format!("writing coordinate cache to {tmp_path:?}"))?;
		fs::rename(&tmp_path, &self.path)
			.with_context(|| format!("renaming {tmp_path:?} to {:?}", self.path))?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::Place;
	use tempfile::TempDir;

	fn cache_file(dir: &TempDir) -> CacheFile {
		CacheFile::new(dir.path().join(COORDINATES_CACHE_FILE))
	}

	fn sample_entries() -> HashMap<String, GeocodeResult> {
		let place = Place {
			place_id: 42,
			lat: "48.8588897".to_string(),
			lon: "2.3200410".to_string(),
			display_name: "Paris, France".to_string(),
			..Place::default()
		};
		HashMap::from([
			("paris-france".to_string(), GeocodeResult::from_matches(vec![place])),
			("nowhere-atall".to_string(), GeocodeResult::empty()),
		])
	}

	#[test]
	fn missing_file_loads_as_empty() {
		let dir = TempDir::new().unwrap();
		assert!(cache_file(&dir).load().is_empty());
	}

	#[test]
	fn empty_file_loads_as_empty() {
		let dir = TempDir::new().unwrap();
		let file = cache_file(&dir);
		fs::write(file.path(), "").unwrap();
		assert!(file.load().is_empty());
	}

	#[test]
	fn corrupt_file_loads_as_empty() {
		let dir = TempDir::new().unwrap();
		let file = cache_file(&dir);
		fs::write(file.path(), "{\"paris-france\": [{,,,").unwrap();
		assert!(file.load().is_empty());
	}

	#[test]
	fn save_then_load_round_trips() {
		let dir = TempDir::new().unwrap();
		let file = cache_file(&dir);
		let entries = sample_entries();
		file.save(&entries).unwrap();

		// a fresh CacheFile stands in for a fresh process
		let reloaded = cache_file(&dir).load();
		assert_eq!(reloaded, entries);
	}

	#[test]
	fn snapshot_is_pretty_printed() {
		let dir = TempDir::new().unwrap();
		let file = cache_file(&dir);
		file.save(&sample_entries()).unwrap();

		let raw = fs::read_to_string(file.path()).unwrap();
		assert!(raw.lines().count() > 1);
		assert!(raw.contains("  \"paris-france\""));
	}

	#[test]
	fn save_leaves_no_temp_file_behind() {
		let dir = TempDir::new().unwrap();
		let file = cache_file(&dir);
		file.save(&sample_entries()).unwrap();
		assert!(!file.path().with_extension("tmp").exists());
	}
}
