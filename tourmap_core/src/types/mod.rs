mod location;
mod place;

pub use location::*;
pub use place::*;
