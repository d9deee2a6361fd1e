use super::{Artist, DatesEntry, LocationsEntry, Relation};
use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Root of the public concert API.
pub const DEFAULT_BASE_URL: &str = "https://groupietrackers.herokuapp.com/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-only client for the upstream artist/date/location API.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
	client: Client,
	base_url: String,
}

impl UpstreamClient {
	pub fn new() -> Result<UpstreamClient> {
		UpstreamClient::with_base_url(DEFAULT_BASE_URL)
	}

	/// Uses a different API root, e.g. a local fixture server in tests.
	pub fn with_base_url(base_url: impl Into<String>) -> Result<UpstreamClient> {
		let client = Client::builder()
			.timeout(REQUEST_TIMEOUT)
			.user_agent(concat!("tourmap/", env!("CARGO_PKG_VERSION")))
			.use_rustls_tls()
			.build()
			.context("building upstream HTTP client")?;
		let base_url: String = base_url.into();
		Ok(UpstreamClient {
			client,
			base_url: base_url.trim_end_matches('/').to_string(),
		})
	}

	/// All artists known to the upstream API.
	pub async fn fetch_artists(&self) -> Result<Vec<Artist>> {
		self.fetch_json("/artists").await
	}

	/// Concert dates of one artist.
	pub async fn fetch_dates(&self, artist_id: u32) -> Result<DatesEntry> {
		self.fetch_json(&format!("/dates/{artist_id}")).await
	}

	/// Concert locations of one artist.
	pub async fn fetch_locations(&self, artist_id: u32) -> Result<LocationsEntry> {
		self.fetch_json(&format!("/locations/{artist_id}")).await
	}

	/// Date-to-locations relation of one artist.
	pub async fn fetch_relation(&self, artist_id: u32) -> Result<Relation> {
		self.fetch_json(&format!("/relation/{artist_id}")).await
	}

	async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		let url = format!("{}{path}", self.base_url);
		log::debug!("fetching {url}");

		let response = self
			.client
			.get(&url)
			.send()
			.await
			.with_context(|| format!("requesting {url}"))?;
		if !response.status().is_success() {
			bail!("request to {url} failed with status {}", response.status());
		}

		let body = response
			.text()
			.await
			.with_context(|| format!("reading response body from {url}"))?;
		serde_json::from_str(&body).with_context(|| format!("decoding response from {url}"))
	}
}
