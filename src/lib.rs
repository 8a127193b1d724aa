mod combine;
pub mod defs;
mod distribution;
mod indexed;
mod stats;
mod strategy;
mod table;
pub mod threshold;
mod util;

pub use combine::flatten;
pub use distribution::{Distribution, Iter};
pub use indexed::IndexedDistribution;
pub use stats::Quotient;
pub use strategy::{indexed_threshold, Combiner, Strategy};
pub use table::AdditiveEvents;
pub use threshold::Buckets;
pub use util::{event_map, BigRatio, Error, Event, EventMap, InvalidEvents, Occurrence, Result};

/// Increments with at least this many total occurrences are never flattened.
pub const FLATTEN_CEILING: u64 = 10_000;
/// `(numer, denom)`: increments averaging more occurrences per event are never flattened.
pub const FLATTEN_MAX_RATIO: (u64, u64) = (13, 10);
/// Distributions spanning more than this many integers per event are never indexed.
pub const INDEXED_MAX_SPREAD: u64 = 16;
