pub(crate) mod prefix;

pub use prefix::{Prefix, RouteEntry, RouteMatch};

pub mod errors;
pub mod stats;
