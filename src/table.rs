use crate::strategy::{Combiner, Strategy};
use crate::util::Result;
use crate::Distribution;

/// Owns one distribution and replaces it wholesale on every combine or remove.
///
/// A failed call leaves the stored distribution as it was.
#[derive(Debug, Clone, Default)]
pub struct AdditiveEvents {
    events: Distribution,
    combiner: Combiner,
}

impl AdditiveEvents {
    #[must_use]
    pub fn new(events: Distribution) -> Self {
        Self::with_combiner(events, Combiner::default())
    }

    #[must_use]
    pub fn with_combiner(events: Distribution, combiner: Combiner) -> Self {
        Self { events, combiner }
    }

    #[must_use]
    pub fn events(&self) -> &Distribution {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Distribution {
        self.events
    }

    #[must_use]
    pub fn combiner(&self) -> &Combiner {
        &self.combiner
    }

    pub fn combine(&mut self, times: usize, increment: &Distribution) -> Result<()> {
        self.events = self.combiner.combine(&self.events, times, increment)?;
        Ok(())
    }

    /// Always flattens.
    ///
    /// Unsafe for large increments: the flattened list holds
    /// `increment.total_occurrences()` events, and building it fails with
    /// [`crate::Error::OutOfResources`] when that is too many.
    pub fn combine_by_flattened(&mut self, times: usize, increment: &Distribution) -> Result<()> {
        self.combine_by(Strategy::Flattened, times, increment)
    }

    pub fn combine_by_dictionary(&mut self, times: usize, increment: &Distribution) -> Result<()> {
        self.combine_by(Strategy::Dictionary, times, increment)
    }

    pub fn combine_by_indexed(&mut self, times: usize, increment: &Distribution) -> Result<()> {
        self.combine_by(Strategy::Indexed, times, increment)
    }

    fn combine_by(&mut self, strategy: Strategy, times: usize, increment: &Distribution) -> Result<()> {
        self.events = self
            .combiner
            .combine_with(strategy, &self.events, times, increment)?;
        Ok(())
    }

    /// Unchecked: there is no record of what was added. Removing what was never
    /// combined in raises no error, it just leaves a wrong distribution behind.
    pub fn remove(&mut self, times: usize, increment: &Distribution) -> Result<()> {
        self.events = self.combiner.remove(&self.events, times, increment)?;
        Ok(())
    }
}

impl From<Distribution> for AdditiveEvents {
    fn from(value: Distribution) -> Self {
        Self::new(value)
    }
}
