use std::collections::BTreeMap;

use num::{BigInt, BigUint, ToPrimitive};
use thiserror::Error;

pub type Event = BigInt;
pub type Occurrence = BigUint;
pub type EventMap = BTreeMap<Event, Occurrence>;
pub type Entry<'a> = std::collections::btree_map::Entry<'a, Event, Occurrence>;
pub type BigRatio = num::BigRational;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidEvents {
    #[error("events may not be empty, a good alternative is the identity {{0: 1}}")]
    Empty,
    #[error("event {event} has occurrence {occurrence}, occurrences must be positive")]
    NonPositive { event: Event, occurrence: BigInt },
    #[error("event {0} appears more than once")]
    Duplicate(Event),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidEvents(#[from] InvalidEvents),
    #[error("out of resources: cannot materialize {0} elements")]
    OutOfResources(BigUint),
    #[error("division by a zero occurrence")]
    ZeroOccurrence,
}

pub type Result<T> = core::result::Result<T, Error>;

#[inline]
pub fn event_map() -> EventMap {
    EventMap::new()
}

/// Allocates an empty vector able to hold `len` elements, or reports why it can't.
pub(crate) fn try_vec<T>(len: &BigUint) -> Result<Vec<T>> {
    let n = to_len(len)?;
    let mut out = Vec::new();
    out.try_reserve_exact(n)
        .map_err(|_| Error::OutOfResources(len.clone()))?;
    Ok(out)
}

/// `len` zeros, or the reason they can't be allocated.
pub(crate) fn zeros(len: &BigUint) -> Result<Vec<Occurrence>> {
    let mut out = try_vec(len)?;
    out.resize(to_len(len)?, Occurrence::ZERO);
    Ok(out)
}

pub(crate) fn to_len(len: &BigUint) -> Result<usize> {
    len.to_usize()
        .ok_or_else(|| Error::OutOfResources(len.clone()))
}

/// Number of positions in the inclusive span `start..=stop`.
pub(crate) fn span_len(start: &Event, stop: &Event) -> BigUint {
    (stop - start + 1u8).to_biguint().unwrap_or_default()
}

#[inline]
pub(crate) fn add_to(map: &mut EventMap, event: Event, occurrence: Occurrence) {
    match map.entry(event) {
        Entry::Vacant(e) => {
            e.insert(occurrence);
        }
        Entry::Occupied(mut e) => {
            *e.get_mut() += occurrence;
        }
    }
}
