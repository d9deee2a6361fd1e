//! Cache-first resolution of location tokens to geographic coordinates.

use super::{GeocodeError, GeocodeProvider};
use crate::cache::CoordinateCache;
use crate::types::{GeocodeResult, LocationToken};
use std::fmt;
use std::sync::Arc;

/// Resolves location tokens to geocode results, consulting the shared
/// [`CoordinateCache`] before the network.
///
/// Successful lookups are cached, including empty ones, so a token that
/// resolved to nothing is not queried again. Failed lookups cache nothing;
/// the next resolution of the same token retries the network. Two workers
/// racing on the same unseen token may both query the provider; the last
/// write wins, which is benign since both hold the same answer.
pub struct GeocodeResolver {
	cache: Arc<CoordinateCache>,
	provider: Arc<dyn GeocodeProvider>,
}

impl GeocodeResolver {
	pub fn new(cache: Arc<CoordinateCache>, provider: Arc<dyn GeocodeProvider>) -> GeocodeResolver {
		GeocodeResolver { cache, provider }
	}

	/// Resolves one token to its coordinates.
	pub async fn resolve(&self, token: &LocationToken) -> Result<GeocodeResult, GeocodeError> {
		if let Some(cached) = self.cache.get(token) {
			return Ok(cached);
		}

		let (city, country) = token
			.city_country()
			.ok_or_else(|| GeocodeError::InvalidLocation(token.as_str().to_string()))?;

		let result = self.provider.lookup(city, country).await?;
		self.cache.put(token, result.clone());
		Ok(result)
	}

	/// Number of tokens currently cached.
	pub fn cache_entry_count(&self) -> usize {
		self.cache.len()
	}
}

impl fmt::Debug for GeocodeResolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("GeocodeResolver")
			.field("cached_entries", &self.cache.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::Place;
	use async_trait::async_trait;
	use parking_lot::Mutex;
	use std::sync::atomic::{AtomicUsize, Ordering};

	struct MockProvider {
		calls: AtomicUsize,
		queries: Mutex<Vec<(String, String)>>,
		response: GeocodeResult,
		fail: bool,
	}

	impl MockProvider {
		fn returning(response: GeocodeResult) -> MockProvider {
			MockProvider {
				calls: AtomicUsize::new(0),
				queries: Mutex::new(Vec::new()),
				response,
				fail: false,
			}
		}

		fn failing() -> MockProvider {
			MockProvider {
				calls: AtomicUsize::new(0),
				queries: Mutex::new(Vec::new()),
				response: GeocodeResult::empty(),
				fail: true,
			}
		}

		fn calls(&self) -> usize {
			self.calls.load(Ordering::SeqCst)
		}
	}

	#[async_trait]
	impl GeocodeProvider for MockProvider {
		async fn lookup(&self, city: &str, country: &str) -> Result<GeocodeResult, GeocodeError> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			self.queries.lock().push((city.to_string(), country.to_string()));
			if self.fail {
				return Err(decode_error());
			}
			Ok(self.response.clone())
		}
	}

	fn decode_error() -> GeocodeError {
		GeocodeError::from(serde_json::from_str::<Vec<Place>>("not json").unwrap_err())
	}

	fn paris() -> GeocodeResult {
		GeocodeResult::from_matches(vec![Place {
			lat: "48.8588897".to_string(),
			lon: "2.3200410".to_string(),
			display_name: "Paris, France".to_string(),
			..Place::default()
		}])
	}

	fn resolver_with(provider: Arc<MockProvider>) -> GeocodeResolver {
		GeocodeResolver::new(Arc::new(CoordinateCache::new()), provider)
	}

	#[tokio::test]
	async fn a_miss_queries_the_provider_once_then_hits_the_cache() {
		let provider = Arc::new(MockProvider::returning(paris()));
		let resolver = resolver_with(Arc::clone(&provider));
		let token = LocationToken::new("paris-france");

		let first = resolver.resolve(&token).await.unwrap();
		let second = resolver.resolve(&token).await.unwrap();

		assert_eq!(provider.calls(), 1);
		assert_eq!(first, second);
		assert_eq!(first, paris());
		assert_eq!(resolver.cache_entry_count(), 1);
	}

	#[tokio::test]
	async fn the_token_is_split_on_its_first_dash() {
		let provider = Arc::new(MockProvider::returning(paris()));
		let resolver = resolver_with(Arc::clone(&provider));

		resolver.resolve(&LocationToken::new("new_york-usa")).await.unwrap();

		let queries = provider.queries.lock();
		assert_eq!(*queries, vec![("new_york".to_string(), "usa".to_string())]);
	}

	#[tokio::test]
	async fn an_invalid_token_never_touches_network_or_cache() {
		let provider = Arc::new(MockProvider::returning(paris()));
		let resolver = resolver_with(Arc::clone(&provider));

		let err = resolver.resolve(&LocationToken::new("montreal")).await.unwrap_err();

		assert!(matches!(err, GeocodeError::InvalidLocation(token) if token == "montreal"));
		assert_eq!(provider.calls(), 0);
		assert_eq!(resolver.cache_entry_count(), 0);
	}

	#[tokio::test]
	async fn an_empty_result_is_cached_like_any_other() {
		let provider = Arc::new(MockProvider::returning(GeocodeResult::empty()));
		let resolver = resolver_with(Arc::clone(&provider));
		let token = LocationToken::new("atlantis-ocean");

		let first = resolver.resolve(&token).await.unwrap();
		let second = resolver.resolve(&token).await.unwrap();

		assert!(first.is_empty());
		assert!(second.is_empty());
		assert_eq!(provider.calls(), 1);
		assert_eq!(resolver.cache_entry_count(), 1);
	}

	#[tokio::test]
	async fn a_failed_lookup_is_not_cached_and_retries() {
		let provider = Arc::new(MockProvider::failing());
		let resolver = resolver_with(Arc::clone(&provider));
		let token = LocationToken::new("paris-france");

		assert!(matches!(
			resolver.resolve(&token).await.unwrap_err(),
			GeocodeError::Decode(_)
		));
		assert_eq!(resolver.cache_entry_count(), 0);

		// nothing was cached, so the next call hits the provider again
		assert!(resolver.resolve(&token).await.is_err());
		assert_eq!(provider.calls(), 2);
	}

	#[tokio::test(flavor = "multi_thread")]
	async fn concurrent_resolutions_of_distinct_tokens_all_land() {
		let provider = Arc::new(MockProvider::returning(paris()));
		let resolver = Arc::new(resolver_with(Arc::clone(&provider)));

		let tasks = (0..8).map(|i| {
			let resolver = Arc::clone(&resolver);
			async move {
				let token = LocationToken::new(format!("city{i}-country"));
				resolver.resolve(&token).await.unwrap();
			}
		});
		futures::future::join_all(tasks).await;

		assert_eq!(resolver.cache_entry_count(), 8);
		assert_eq!(provider.calls(), 8);
	}
}
