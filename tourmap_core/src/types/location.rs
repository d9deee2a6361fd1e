//! Location tokens in the canonical upstream format `"<city>-<country>"`,
//! where underscores inside the city stand for spaces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `"city-country"` string identifying a concert location.
///
/// Tokens are not validated on construction; [`LocationToken::city_country`]
/// reports whether the token can be split into its two parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationToken(String);

impl LocationToken {
	pub fn new(raw: impl Into<String>) -> LocationToken {
		LocationToken(raw.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Splits the token on its first `-` into city and country.
	///
	/// Returns `None` if the token contains no `-` at all.
	pub fn city_country(&self) -> Option<(&str, &str)> {
		self.0.split_once('-')
	}

	/// Human-readable form: `"new_york-usa"` becomes `"New York, USA"`.
	///
	/// Only the city part has its underscores replaced; the country is
	/// upper-cased as-is. A token without a `-` is cleaned up whole.
	pub fn pretty(&self) -> String {
		match self.city_country() {
			Some((city, country)) => {
				format!("{}, {}", title_case(&city.replace('_', " ")), country.to_uppercase())
			}
			None => title_case(&self.0.replace('_', " ")),
		}
	}
}

impl fmt::Display for LocationToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for LocationToken {
	fn from(raw: &str) -> LocationToken {
		LocationToken::new(raw)
	}
}

fn title_case(input: &str) -> String {
	input
		.split(' ')
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
				None => String::new(),
			}
		})
		.collect::<Vec<String>>()
		.join(" ")
}
