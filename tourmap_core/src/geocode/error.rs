use thiserror::Error;

/// Failure modes of a single location resolution.
///
/// Callers decide per variant: an invalid token should be skipped or
/// reported, while network and decode failures are transient and leave the
/// token uncached, so a later resolution retries the lookup.
#[derive(Debug, Error)]
pub enum GeocodeError {
	/// The token could not be split into city and country.
	#[error("invalid location format '{0}', expected '<city>-<country>'")]
	InvalidLocation(String),

	/// Transport-level failure reaching the geocoding service.
	#[error("geocoding request failed: {0}")]
	Network(#[from] reqwest::Error),

	/// The response body did not parse into the expected shape.
	#[error("malformed geocoding response: {0}")]
	Decode(#[from] serde_json::Error),
}
