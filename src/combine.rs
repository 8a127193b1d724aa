use std::collections::BTreeMap;

use num::{BigInt, Signed, Zero};

use crate::util::{add_to, event_map, to_len, try_vec, Error, Event, EventMap, Occurrence, Result};
use crate::{Distribution, IndexedDistribution};

/// One convolution step, repeated by [`run`].
///
/// `State` is whatever form the current distribution is kept in between steps.
pub(crate) trait CombineStep {
    type State;

    fn load(&self, current: &Distribution) -> Result<Self::State>;

    fn step(&self, state: Self::State) -> Result<Self::State>;

    fn finish(&self, state: Self::State) -> Result<Distribution>;
}

pub(crate) fn run<C>(combiner: &C, current: &Distribution, times: usize) -> Result<Distribution>
where
    C: CombineStep,
{
    let mut state = combiner.load(current)?;
    for _ in 0..times {
        state = combiner.step(state)?;
    }
    combiner.finish(state)
}

/// Every event repeated once per occurrence, in ascending order.
///
/// The result has `distribution.total_occurrences()` elements. Sizes that can't be
/// allocated return [`Error::OutOfResources`] instead of aborting.
pub fn flatten(distribution: &Distribution) -> Result<Vec<Event>> {
    let mut out = try_vec(&distribution.total_occurrences())?;
    for (event, occurrence) in distribution {
        out.extend(itertools::repeat_n(event.clone(), to_len(occurrence)?));
    }
    Ok(out)
}

pub(crate) struct Flattened {
    values: Vec<Event>,
}

impl Flattened {
    pub(crate) fn new(increment: &Distribution) -> Result<Self> {
        Ok(Self {
            values: flatten(increment)?,
        })
    }
}

impl CombineStep for Flattened {
    type State = EventMap;

    fn load(&self, current: &Distribution) -> Result<EventMap> {
        Ok(current.as_map().clone())
    }

    fn step(&self, state: EventMap) -> Result<EventMap> {
        let mut out = event_map();
        for (event, occurrence) in &state {
            for value in &self.values {
                add_to(&mut out, event + value, occurrence.clone());
            }
        }
        Ok(out)
    }

    fn finish(&self, state: EventMap) -> Result<Distribution> {
        Distribution::from_map(state)
    }
}

pub(crate) struct Dictionary {
    pairs: Vec<(Event, Occurrence)>,
}

impl Dictionary {
    pub(crate) fn new(increment: &Distribution) -> Self {
        Self {
            pairs: increment.all_events(),
        }
    }
}

impl CombineStep for Dictionary {
    type State = EventMap;

    fn load(&self, current: &Distribution) -> Result<EventMap> {
        Ok(current.as_map().clone())
    }

    fn step(&self, state: EventMap) -> Result<EventMap> {
        let mut out = event_map();
        for (e1, o1) in &state {
            for (e2, o2) in &self.pairs {
                add_to(&mut out, e1 + e2, o1 * o2);
            }
        }
        Ok(out)
    }

    fn finish(&self, state: EventMap) -> Result<Distribution> {
        Distribution::from_map(state)
    }
}

pub(crate) struct Indexed {
    increment: IndexedDistribution,
}

impl Indexed {
    pub(crate) fn new(increment: &Distribution) -> Result<Self> {
        Ok(Self {
            increment: IndexedDistribution::from_distribution(increment)?,
        })
    }
}

impl CombineStep for Indexed {
    type State = IndexedDistribution;

    fn load(&self, current: &Distribution) -> Result<IndexedDistribution> {
        IndexedDistribution::from_distribution(current)
    }

    fn step(&self, state: IndexedDistribution) -> Result<IndexedDistribution> {
        state.convolve(&self.increment)
    }

    fn finish(&self, state: IndexedDistribution) -> Result<Distribution> {
        state.to_distribution()
    }
}

/// Inverse of a convolution step: long division of the current distribution by the
/// increment, lowest event first.
pub(crate) struct Removal {
    lowest: (Event, BigInt),
    highest: Event,
    rest: Vec<(Event, BigInt)>,
}

impl Removal {
    pub(crate) fn new(increment: &Distribution) -> Self {
        let mut pairs = increment
            .iter()
            .map(|(e, o)| (e.clone(), BigInt::from(o.clone())));
        let lowest = pairs.next().unwrap_or_default();
        Self {
            lowest,
            highest: increment.max_event().clone(),
            rest: pairs.collect(),
        }
    }
}

impl CombineStep for Removal {
    /// Signed, since an unchecked removal may drive counts below zero.
    type State = BTreeMap<Event, BigInt>;

    fn load(&self, current: &Distribution) -> Result<Self::State> {
        Ok(current
            .iter()
            .map(|(e, o)| (e.clone(), BigInt::from(o.clone())))
            .collect())
    }

    fn step(&self, state: Self::State) -> Result<Self::State> {
        let mut out = BTreeMap::new();
        let Some(last) = state.keys().next_back() else {
            return Ok(out);
        };
        let (low_event, low_occurrence) = &self.lowest;
        let stop = last - &self.highest;

        // A quotient entry at `k` can only be non-zero where `k + low_event` is in the
        // dividend, so only those positions are visited.
        for (total, occurrence) in &state {
            let event = total - low_event;
            if event > stop {
                break;
            }
            let mut remaining = occurrence.clone();
            for (e, o) in &self.rest {
                if let Some(earlier) = out.get(&(total - e)) {
                    remaining -= earlier * o;
                }
            }
            let value = remaining
                .checked_div(low_occurrence)
                .ok_or(Error::ZeroOccurrence)?;
            if !value.is_zero() {
                out.insert(event, value);
            }
        }
        Ok(out)
    }

    fn finish(&self, state: Self::State) -> Result<Distribution> {
        let events: EventMap = state
            .into_iter()
            .filter(|(_, o)| o.is_positive())
            .filter_map(|(e, o)| o.to_biguint().map(|o| (e, o)))
            .collect();
        Distribution::from_map(events)
    }
}
