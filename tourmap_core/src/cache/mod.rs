mod coordinate_cache;
mod persistence;

pub use coordinate_cache::*;
pub use persistence::*;
