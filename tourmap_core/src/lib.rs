//! Core of the tourmap backend: location tokens, geocode records, the
//! coordinate cache with its disk snapshot, and the geocode resolver.

pub mod cache;

pub mod geocode;

pub mod types;

pub use cache::{CacheFile, CoordinateCache, COORDINATES_CACHE_FILE};
pub use geocode::{GeocodeError, GeocodeProvider, GeocodeResolver, NominatimClient};
pub use types::{GeocodeResult, LocationToken, Place};
