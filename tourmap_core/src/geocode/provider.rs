//! The network side of location resolution.
//!
//! [`GeocodeProvider`] is the seam between the resolver and the outside
//! world; [`NominatimClient`] is the production implementation backed by the
//! public Nominatim search endpoint.

use super::GeocodeError;
use crate::types::{GeocodeResult, Place};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Default endpoint of the public geocoding service.
pub const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

// The service is free and rate-limited; a hung request must not stall a
// whole aggregation request indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A service that turns a city/country pair into a geocode result.
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
	async fn lookup(&self, city: &str, country: &str) -> Result<GeocodeResult, GeocodeError>;
}

/// Geocode provider backed by the Nominatim search endpoint.
#[derive(Debug, Clone)]
pub struct NominatimClient {
	client: Client,
	search_url: String,
}

impl NominatimClient {
	pub fn new() -> Result<NominatimClient, GeocodeError> {
		NominatimClient::with_search_url(NOMINATIM_SEARCH_URL)
	}

	/// Uses a different search endpoint, e.g. a self-hosted instance.
	pub fn with_search_url(search_url: impl Into<String>) -> Result<NominatimClient, GeocodeError> {
		// Nominatim's usage policy rejects clients without a User-Agent
		let client = Client::builder()
			.timeout(REQUEST_TIMEOUT)
			.user_agent(concat!("tourmap/", env!("CARGO_PKG_VERSION")))
			.use_rustls_tls()
			.build()?;
		Ok(NominatimClient {
			client,
			search_url: search_url.into(),
		})
	}
}

#[async_trait]
impl GeocodeProvider for NominatimClient {
	/// Free-text search for `"<city>,<country>"`, keeping the first match.
	///
	/// Transport failures and non-success statuses surface as
	/// [`GeocodeError::Network`], unparsable bodies as
	/// [`GeocodeError::Decode`]; both leave the token eligible for retry.
	async fn lookup(&self, city: &str, country: &str) -> Result<GeocodeResult, GeocodeError> {
		let query = format!("{city},{country}");
		let response = self
			.client
			.get(&self.search_url)
			.query(&[
				("q", query.as_str()),
				("format", "jsonv2"),
				("accept-language", "fr"),
			])
			.send()
			.await?
			.error_for_status()?;

		let body = response.text().await?;
		let matches: Vec<Place> = serde_json::from_str(&body)?;
		Ok(GeocodeResult::from_matches(matches))
	}
}
