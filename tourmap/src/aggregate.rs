//! Combines raw upstream date/location arrays into per-artist concert
//! schedules and resolves their locations through the geocoding pipeline.

use crate::upstream::{DatesEntry, LocationsEntry, UpstreamClient};
use anyhow::Result;
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;
use tourmap_core::{GeocodeResolver, GeocodeResult, LocationToken};

/// One concert stop: the raw upstream token plus its display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConcertStop {
	pub token: LocationToken,
	pub display: String,
}

/// The concert schedule of one artist: cleaned date to the stops played on
/// that date, in upstream order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConcertSchedule {
	pub artist_id: u32,
	pub concerts: BTreeMap<String, Vec<ConcertStop>>,
}

/// A schedule together with the resolved coordinates of every distinct
/// location in it: the complete per-artist payload for a route handler.
#[derive(Debug, Clone, Serialize)]
pub struct ArtistAtlas {
	pub schedule: ConcertSchedule,
	pub coordinates: BTreeMap<String, GeocodeResult>,
}

/// Pairs dates with locations index-wise, up to the shorter of the two
/// arrays. Dates lose their leading `*` marker; each location keeps its raw
/// token next to its pretty-printed form.
pub fn build_schedule(
	artist_id: u32,
	dates: &DatesEntry,
	locations: &LocationsEntry,
) -> ConcertSchedule {
	let mut concerts: BTreeMap<String, Vec<ConcertStop>> = BTreeMap::new();
	for (date, location) in dates.dates.iter().zip(locations.locations.iter()) {
		let date = date.trim_start_matches('*').to_string();
		let token = LocationToken::new(location.as_str());
		let display = token.pretty();
		concerts.entry(date).or_default().push(ConcertStop { token, display });
	}
	ConcertSchedule { artist_id, concerts }
}

/// Resolves every distinct token exactly once, sequentially.
///
/// The upstream geocoder is rate-limited, so tokens are not resolved in
/// parallel; the cache makes repeat traffic cheap anyway. A token that
/// fails to resolve is logged and omitted from the mapping, so one bad
/// location does not fail the whole aggregation.
pub async fn resolve_locations<I>(
	resolver: &GeocodeResolver,
	tokens: I,
) -> BTreeMap<String, GeocodeResult>
where
	I: IntoIterator<Item = LocationToken>,
{
	let mut resolved = BTreeMap::new();
	for token in tokens.into_iter().unique() {
		match resolver.resolve(&token).await {
			Ok(result) => {
				resolved.insert(token.as_str().to_string(), result);
			}
			Err(err) => log::warn!("skipping location '{token}': {err}"),
		}
	}
	resolved
}

/// Fetches one artist's dates and locations, builds the schedule and
/// attaches the resolved coordinate mapping.
pub async fn artist_atlas(
	upstream: &UpstreamClient,
	resolver: &GeocodeResolver,
	artist_id: u32,
) -> Result<ArtistAtlas> {
	let dates = upstream.fetch_dates(artist_id).await?;
	let locations = upstream.fetch_locations(artist_id).await?;

	let schedule = build_schedule(artist_id, &dates, &locations);
	let tokens: Vec<LocationToken> = schedule
		.concerts
		.values()
		.flatten()
		.map(|stop| stop.token.clone())
		.collect();
	let coordinates = resolve_locations(resolver, tokens).await;

	Ok(ArtistAtlas { schedule, coordinates })
}
