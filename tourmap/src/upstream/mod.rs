//! Read-only client for the upstream artist/date/location API.

mod client;
mod types;

pub use client::*;
pub use types::*;
