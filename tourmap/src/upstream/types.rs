use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An artist record as returned by the upstream API.
///
/// `locations`, `concert_dates` and `relations` are URLs to the per-artist
/// detail endpoints, not the data itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
	pub id: u32,
	pub name: String,
	pub image: String,
	pub members: Vec<String>,
	#[serde(rename = "creationDate")]
	pub creation_date: u32,
	#[serde(rename = "firstAlbum")]
	pub first_album: String,
	pub locations: String,
	#[serde(rename = "concertDates")]
	pub concert_dates: String,
	pub relations: String,
}

/// Concert dates of one artist. Entries may carry a leading `*` marker,
/// which the aggregation strips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatesEntry {
	pub id: u32,
	pub dates: Vec<String>,
}

/// Concert locations of one artist, as raw `"city-country"` tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationsEntry {
	pub id: u32,
	pub locations: Vec<String>,
}

/// Date-to-locations relation of one artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
	pub id: u32,
	#[serde(rename = "datesLocations")]
	pub dates_locations: BTreeMap<String, Vec<String>>,
}
