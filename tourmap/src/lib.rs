//! # Tourmap
//!
//! Backend aggregator for concert data: fetches artist, concert-date and
//! concert-location records from the public concert API, combines them into
//! per-artist schedules and resolves every concert location to geographic
//! coordinates through the cached geocoding pipeline in [`tourmap_core`].
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tourmap::aggregate::artist_atlas;
//! use tourmap::upstream::UpstreamClient;
//! use tourmap::core::{CoordinateCache, GeocodeResolver, NominatimClient, COORDINATES_CACHE_FILE};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let upstream = UpstreamClient::new()?;
//!     let cache = Arc::new(CoordinateCache::open(COORDINATES_CACHE_FILE));
//!     let resolver = GeocodeResolver::new(cache.clone(), Arc::new(NominatimClient::new()?));
//!
//!     let atlas = artist_atlas(&upstream, &resolver, 1).await?;
//!     println!("{} dates, {} resolved locations", atlas.schedule.concerts.len(), atlas.coordinates.len());
//!
//!     cache.flush()?;
//!     Ok(())
//! }
//! ```

pub mod aggregate;

pub mod upstream;

pub use tourmap_core as core;
