use bon::Builder;
use num::BigUint;

use crate::combine::{self, Dictionary, Flattened, Indexed, Removal};
use crate::threshold::{INDEXED_OVER_DICTIONARY, INDEXED_OVER_FLATTENED};
use crate::util::Result;
use crate::{Distribution, FLATTEN_CEILING, FLATTEN_MAX_RATIO, INDEXED_MAX_SPREAD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Expand the increment into one entry per occurrence and tally every sum.
    Flattened,
    /// Sparse polynomial multiplication over the two maps.
    Dictionary,
    /// Dense arrays aligned on their start index.
    Indexed,
}

/// Chooses and runs a convolution strategy.
///
/// The limits only steer [`Combiner::select`]; calling a strategy directly through
/// [`Combiner::combine_with`] ignores them.
#[derive(Debug, Clone, Builder)]
pub struct Combiner {
    /// Increments with this many total occurrences or more are never flattened.
    #[builder(default = FLATTEN_CEILING)]
    flatten_ceiling: u64,
    /// `(numer, denom)`; increments denser than this per event are never flattened.
    #[builder(default = FLATTEN_MAX_RATIO)]
    flatten_max_ratio: (u64, u64),
    /// Integers spanned per event above which a distribution is too sparse to index.
    #[builder(default = INDEXED_MAX_SPREAD)]
    indexed_max_spread: u64,
}

impl Default for Combiner {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Combiner {
    #[must_use]
    pub fn flatten_ceiling(&self) -> u64 {
        self.flatten_ceiling
    }

    #[must_use]
    pub fn flatten_max_ratio(&self) -> (u64, u64) {
        self.flatten_max_ratio
    }

    #[must_use]
    pub fn indexed_max_spread(&self) -> u64 {
        self.indexed_max_spread
    }

    /// Picks the strategy expected to be fastest for adding `increment` to `current`
    /// `times` times, never picking one that could not materialize its inputs.
    #[must_use]
    pub fn select(&self, current: &Distribution, times: usize, increment: &Distribution) -> Strategy {
        let baseline = self.baseline(increment);
        if !(self.indexable(current) && self.indexable(increment)) {
            return baseline;
        }
        match indexed_threshold(baseline, increment.event_count(), times) {
            Some(min) if current.event_count() >= min => Strategy::Indexed,
            _ => baseline,
        }
    }

    fn indexable(&self, distribution: &Distribution) -> bool {
        distribution.span() <= BigUint::from(distribution.event_count()) * self.indexed_max_spread
    }

    fn baseline(&self, increment: &Distribution) -> Strategy {
        let (numer, denom) = self.flatten_max_ratio;
        if increment.density_exceeds(numer, denom)
            || increment.total_occurrences() >= BigUint::from(self.flatten_ceiling)
        {
            Strategy::Dictionary
        } else {
            Strategy::Flattened
        }
    }

    /// Adds `increment` to `current` `times` times with the selected strategy.
    pub fn combine(
        &self,
        current: &Distribution,
        times: usize,
        increment: &Distribution,
    ) -> Result<Distribution> {
        let strategy = self.select(current, times, increment);
        self.combine_with(strategy, current, times, increment)
    }

    /// Adds `increment` to `current` `times` times with a caller-chosen strategy.
    ///
    /// [`Strategy::Flattened`] materializes `increment.total_occurrences()` events and
    /// returns [`crate::Error::OutOfResources`] when that can't be done.
    pub fn combine_with(
        &self,
        strategy: Strategy,
        current: &Distribution,
        times: usize,
        increment: &Distribution,
    ) -> Result<Distribution> {
        if times == 0 {
            return Ok(current.clone());
        }
        match strategy {
            Strategy::Flattened => combine::run(&Flattened::new(increment)?, current, times),
            Strategy::Dictionary => combine::run(&Dictionary::new(increment), current, times),
            Strategy::Indexed => combine::run(&Indexed::new(increment)?, current, times),
        }
    }

    /// Takes `increment` back out of `current` `times` times.
    ///
    /// Unchecked: nothing records what was combined into `current`. Removing something
    /// that was never added yields a well-formed but meaningless distribution rather
    /// than an error.
    pub fn remove(
        &self,
        current: &Distribution,
        times: usize,
        increment: &Distribution,
    ) -> Result<Distribution> {
        if times == 0 {
            return Ok(current.clone());
        }
        combine::run(&Removal::new(increment), current, times)
    }
}

/// Smallest current-map size at which [`Strategy::Indexed`] beats `baseline` for an
/// increment of `increment_size` events added `times` times.
///
/// `None` when `baseline` has no table, which is only the case for `Indexed` itself.
#[must_use]
pub fn indexed_threshold(baseline: Strategy, increment_size: usize, times: usize) -> Option<usize> {
    let table = match baseline {
        Strategy::Flattened => INDEXED_OVER_FLATTENED,
        Strategy::Dictionary => INDEXED_OVER_DICTIONARY,
        Strategy::Indexed => return None,
    };
    table
        .get(increment_size)
        .and_then(|by_times| by_times.get(times))
        .copied()
}
