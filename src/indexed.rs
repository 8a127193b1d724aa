use num::{One, ToPrimitive, Zero};

use crate::util::{span_len, zeros, Error, Event, EventMap, Occurrence, Result};
use crate::Distribution;

/// Occurrences laid out densely from `start_index`; position `i` holds event
/// `start_index + i`. Gaps are zeros.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexedDistribution {
    start_index: Event,
    values: Vec<Occurrence>,
}

impl IndexedDistribution {
    /// An empty `values` is taken as the identity `[1]` at `start_index`.
    #[must_use]
    pub fn new(start_index: Event, values: Vec<Occurrence>) -> Self {
        let values = if values.is_empty() {
            vec![Occurrence::one()]
        } else {
            values
        };
        Self {
            start_index,
            values,
        }
    }

    #[must_use]
    pub fn identity() -> Self {
        Self::new(Event::zero(), Vec::new())
    }

    pub fn from_distribution(distribution: &Distribution) -> Result<Self> {
        let (start, stop) = distribution.event_range();
        let mut values = zeros(&span_len(&start, &stop))?;
        for (event, occurrence) in distribution {
            if let Some(slot) = (event - &start).to_usize().and_then(|i| values.get_mut(i)) {
                *slot = occurrence.clone();
            }
        }
        Ok(Self::new(start, values))
    }

    /// Drops the zeros; fails only if every position is zero.
    pub fn to_distribution(&self) -> Result<Distribution> {
        let events: EventMap = self.items().into_iter().collect();
        Distribution::from_map(events)
    }

    #[must_use]
    pub fn raw_values(&self) -> Vec<Occurrence> {
        self.values.clone()
    }

    #[must_use]
    pub fn values(&self) -> &[Occurrence] {
        &self.values
    }

    #[must_use]
    pub fn start_index(&self) -> &Event {
        &self.start_index
    }

    #[must_use]
    pub fn index_range(&self) -> (Event, Event) {
        (self.start_index.clone(), self.end_index())
    }

    fn end_index(&self) -> Event {
        &self.start_index + self.values.len() - 1u8
    }

    /// Ascending `(event, occurrence)` pairs, skipping zeros.
    #[must_use]
    pub fn items(&self) -> Vec<(Event, Occurrence)> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_zero())
            .map(|(i, v)| (&self.start_index + i, v.clone()))
            .collect()
    }

    #[must_use]
    pub fn value_at(&self, event: &Event) -> Occurrence {
        (event - &self.start_index)
            .to_usize()
            .and_then(|i| self.values.get(i))
            .cloned()
            .unwrap_or_default()
    }

    /// Element-wise sum over the union of both index ranges.
    pub fn add(&self, other: &Self) -> Result<Self> {
        let (lower, higher) = if self.start_index <= other.start_index {
            (self, other)
        } else {
            (other, self)
        };
        let total = span_len(&lower.start_index, &lower.end_index().max(higher.end_index()));
        let offset = (&higher.start_index - &lower.start_index)
            .to_usize()
            .ok_or_else(|| Error::OutOfResources(total.clone()))?;

        let mut values = zeros(&total)?;
        for (v, l) in values.iter_mut().zip(&lower.values) {
            *v += l;
        }
        for (v, h) in values[offset..].iter_mut().zip(&higher.values) {
            *v += h;
        }
        Ok(Self::new(lower.start_index.clone(), values))
    }

    /// Distribution of the sum of both; one offset-aligned, scaled copy of `self` per
    /// event of `other`, added up.
    pub fn convolve(&self, other: &Self) -> Result<Self> {
        let mut result: Option<Self> = None;
        for (event, occurrence) in other.items() {
            let shifted = self.shift_scale(&event, &occurrence);
            result = Some(match result {
                None => shifted,
                Some(acc) => acc.add(&shifted)?,
            });
        }
        Ok(result.unwrap_or_else(|| Self {
            start_index: &self.start_index + &other.start_index,
            values: vec![Occurrence::zero()],
        }))
    }

    fn shift_scale(&self, by: &Event, factor: &Occurrence) -> Self {
        Self {
            start_index: &self.start_index + by,
            values: self.values.iter().map(|v| v * factor).collect(),
        }
    }
}

impl Default for IndexedDistribution {
    fn default() -> Self {
        Self::identity()
    }
}

impl TryFrom<&Distribution> for IndexedDistribution {
    type Error = Error;

    fn try_from(value: &Distribution) -> Result<Self> {
        Self::from_distribution(value)
    }
}
