use std::collections::btree_map;
use std::fmt;

use num::{BigInt, One, Zero};

use crate::util::{event_map, span_len, Entry, Event, EventMap, InvalidEvents, Occurrence, Result};

/// Validated map of events to strictly positive occurrence counts.
///
/// Never empty. Every enumeration is in ascending event order.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Distribution {
    events: EventMap,
}

pub type Iter<'a> = btree_map::Iter<'a, Event, Occurrence>;

impl Distribution {
    /// Builds a distribution from `(event, occurrence)` pairs.
    ///
    /// Fails if there are no pairs, if an event repeats, or if any occurrence is zero or
    /// negative.
    pub fn new<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Event>,
        V: Into<BigInt>,
    {
        let mut events = event_map();
        for (event, occurrence) in pairs {
            let event = event.into();
            let occurrence = occurrence.into();
            let occurrence = match occurrence.to_biguint() {
                Some(x) if !x.is_zero() => x,
                _ => return Err(InvalidEvents::NonPositive { event, occurrence }.into()),
            };
            match events.entry(event) {
                Entry::Vacant(e) => {
                    e.insert(occurrence);
                }
                Entry::Occupied(e) => return Err(InvalidEvents::Duplicate(e.key().clone()).into()),
            }
        }
        Self::from_map(events)
    }

    /// Like [`Distribution::new`], but zero occurrences are dropped instead of rejected.
    pub fn from_occurrences<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Event>,
        V: Into<BigInt>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .filter(|(_, v)| !v.is_zero()),
        )
    }

    /// Every event once.
    pub fn uniform<I, K>(events: I) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<Event>,
    {
        Self::new(events.into_iter().map(|k| (k, BigInt::one())))
    }

    #[must_use]
    pub fn identity() -> Self {
        Self::from_map_unchecked(EventMap::from([(Event::zero(), Occurrence::one())]))
    }

    pub fn from_map(events: EventMap) -> Result<Self> {
        Self::validate(&events)?;
        Ok(Self { events })
    }

    pub(crate) fn from_map_unchecked(events: EventMap) -> Self {
        debug_assert!(Self::validate(&events).is_ok());
        Self { events }
    }

    pub fn validate(events: &EventMap) -> Result<()> {
        if events.is_empty() {
            return Err(InvalidEvents::Empty.into());
        }
        if let Some((event, _)) = events.iter().find(|(_, o)| o.is_zero()) {
            return Err(InvalidEvents::NonPositive {
                event: event.clone(),
                occurrence: BigInt::zero(),
            }
            .into());
        }
        Ok(())
    }

    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn event_keys(&self) -> Vec<Event> {
        self.events.keys().cloned().collect()
    }

    #[must_use]
    pub fn event_range(&self) -> (Event, Event) {
        (self.min_event().clone(), self.max_event().clone())
    }

    #[must_use]
    pub fn min_event(&self) -> &Event {
        self.events.keys().next().expect("distribution is never empty")
    }

    #[must_use]
    pub fn max_event(&self) -> &Event {
        self.events
            .keys()
            .next_back()
            .expect("distribution is never empty")
    }

    #[must_use]
    pub fn all_events(&self) -> Vec<(Event, Occurrence)> {
        self.iter().map(|(e, o)| (e.clone(), o.clone())).collect()
    }

    /// The lowest event with the highest occurrence.
    #[must_use]
    pub fn biggest_event(&self) -> (Event, Occurrence) {
        // max_by_key keeps the last of equal maxima, so walk from the top down
        self.iter()
            .rev()
            .max_by_key(|(_, o)| *o)
            .map(|(e, o)| (e.clone(), o.clone()))
            .expect("distribution is never empty")
    }

    #[must_use]
    pub fn total_occurrences(&self) -> Occurrence {
        self.events.values().sum()
    }

    #[must_use]
    pub fn get_occurrence<E>(&self, event: E) -> Occurrence
    where
        E: Into<Event>,
    {
        self.events.get(&event.into()).cloned().unwrap_or_default()
    }

    /// Every event in `start..stop_before`, with zero for events that never occur.
    #[must_use]
    pub fn get_range<E>(&self, start: E, stop_before: E) -> Vec<(Event, Occurrence)>
    where
        E: Into<Event>,
    {
        num::range(start.into(), stop_before.into())
            .map(|e| {
                let o = self.events.get(&e).cloned().unwrap_or_default();
                (e, o)
            })
            .collect()
    }

    pub fn iter(&self) -> Iter<'_> {
        self.events.iter()
    }

    #[must_use]
    pub fn as_map(&self) -> &EventMap {
        &self.events
    }

    #[must_use]
    pub fn into_map(self) -> EventMap {
        self.events
    }

    /// Number of integers from the lowest to the highest event, inclusive.
    #[must_use]
    pub fn span(&self) -> Occurrence {
        span_len(self.min_event(), self.max_event())
    }

    /// True when the occurrences are strictly more concentrated than `numer / denom` per
    /// event.
    pub(crate) fn density_exceeds(&self, numer: u64, denom: u64) -> bool {
        self.total_occurrences() * denom > Occurrence::from(self.event_count()) * numer
    }
}

impl Default for Distribution {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table from {} to {}", self.min_event(), self.max_event())
    }
}

impl<'a> IntoIterator for &'a Distribution {
    type Item = (&'a Event, &'a Occurrence);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<EventMap> for Distribution {
    type Error = crate::Error;

    fn try_from(value: EventMap) -> Result<Self> {
        Self::from_map(value)
    }
}

impl From<Distribution> for EventMap {
    fn from(value: Distribution) -> Self {
        value.events
    }
}
