//! Geocode records as returned by the Nominatim `jsonv2` search endpoint.

use serde::{Deserialize, Serialize};

/// One match returned by the geocoding service.
///
/// Latitude, longitude and the bounding box are kept as strings for wire
/// compatibility with the upstream response and the cache file. Missing
/// fields default to their zero values; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Place {
	pub place_id: u64,
	pub licence: String,
	pub osm_type: String,
	pub osm_id: u64,
	/// South, north, west and east bounds.
	pub boundingbox: [String; 4],
	pub lat: String,
	pub lon: String,
	pub name: String,
	pub display_name: String,
	pub category: String,
	#[serde(rename = "addresstype")]
	pub address_type: String,
	pub importance: f64,
}

/// The outcome of geocoding one location token: zero or one [`Place`].
///
/// The upstream service answers with a list; only the best (first) match is
/// kept. An empty result is a valid outcome and is cached like any other,
/// so an unresolvable token is not looked up again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeocodeResult(Vec<Place>);

impl GeocodeResult {
	/// A result with no match.
	pub fn empty() -> GeocodeResult {
		GeocodeResult(Vec::new())
	}

	/// Keeps the first of the service's matches, if any.
	pub fn from_matches(mut matches: Vec<Place>) -> GeocodeResult {
		matches.truncate(1);
		GeocodeResult(matches)
	}

	pub fn best(&self) -> Option<&Place> {
		self.0.first()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
