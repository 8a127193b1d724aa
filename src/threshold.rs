/// Sparse lookup table over representative sizes, sorted ascending by bucket.
///
/// Lookups floor to the nearest bucket at or below the query and clamp to the first
/// and last bucket outside the covered range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Buckets<V: 'static>(pub &'static [(usize, V)]);

impl<V> Buckets<V> {
    #[must_use]
    pub fn best_key(&self, query: usize) -> Option<usize> {
        self.floor(query).map(|(k, _)| *k)
    }

    #[must_use]
    pub fn get(&self, query: usize) -> Option<&V> {
        self.floor(query).map(|(_, v)| v)
    }

    fn floor(&self, query: usize) -> Option<&(usize, V)> {
        let above = self.0.partition_point(|(k, _)| *k <= query);
        self.0.get(above.saturating_sub(1))
    }
}

/// `{increment size: {times: minimum current size}}` at which the indexed algorithm
/// overtakes flattened enumeration.
pub(crate) const INDEXED_OVER_FLATTENED: Buckets<Buckets<usize>> = Buckets(&[
    (2, Buckets(&[(10, 200), (20, 100), (100, 50), (500, 1)])),
    (4, Buckets(&[(2, 100), (5, 50), (10, 10), (20, 1)])),
    (6, Buckets(&[(1, 100), (4, 50), (10, 1)])),
    (8, Buckets(&[(1, 100), (3, 50), (5, 10), (10, 1)])),
    (20, Buckets(&[(1, 50), (3, 10), (4, 1)])),
    (50, Buckets(&[(1, 50), (3, 1)])),
    (100, Buckets(&[(1, 100), (2, 1)])),
]);

/// Same shape as [`INDEXED_OVER_FLATTENED`], against dictionary convolution.
pub(crate) const INDEXED_OVER_DICTIONARY: Buckets<Buckets<usize>> = Buckets(&[
    (2, Buckets(&[(10, 100), (50, 50), (100, 1)])),
    (4, Buckets(&[(2, 100), (10, 50), (50, 1)])),
    (6, Buckets(&[(2, 50), (10, 10), (20, 1)])),
    (8, Buckets(&[(1, 100), (3, 50), (10, 1)])),
    (10, Buckets(&[(1, 100), (3, 50), (5, 1)])),
    (20, Buckets(&[(1, 50), (3, 10), (4, 1)])),
    (50, Buckets(&[(1, 50), (2, 10), (3, 1)])),
    (100, Buckets(&[(1, 100), (2, 1)])),
]);
