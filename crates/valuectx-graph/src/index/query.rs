//! Range queries over a numeric index key.

use valuectx_core::index::NumericRangeScan;
use valuectx_core::{CoreError, IndexTarget, Numeric, NumericKind};

/// How the results of a numeric query are ordered.
///
/// The order itself comes from the index key layout, which sorts entries by
/// kind and then by encoded value. `key` and `kind` must therefore name the
/// queried key and its numeric kind, and `NumericIndex::query` rejects any
/// other combination. Only `reverse` changes the result order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    /// The index key the results are sorted by.
    pub key: String,
    /// Numeric kind used for comparison.
    pub kind: NumericKind,
    /// Sort descending instead of ascending.
    pub reverse: bool,
}

impl SortField {
    /// Ascending sort on `key` using the numeric comparison of `kind`.
    #[must_use]
    pub fn new(key: impl Into<String>, kind: NumericKind) -> Self {
        Self { key: key.into(), kind, reverse: false }
    }
}

/// A range query over the values recorded under one index key.
///
/// # Example
///
/// ```
/// use valuectx_graph::index::NumericRangeQuery;
///
/// let query = NumericRangeQuery::new_range("timestamp", None, Some(30i64));
/// assert_eq!(query.min, i64::MIN);
/// assert!(query.min_inclusive && query.max_inclusive);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NumericRangeQuery<N: Numeric> {
    /// The index key to search under.
    pub key: String,
    /// Lower bound.
    pub min: N,
    /// Upper bound.
    pub max: N,
    /// Whether `min` itself matches.
    pub min_inclusive: bool,
    /// Whether `max` itself matches.
    pub max_inclusive: bool,
    /// Result ordering.
    pub sort: SortField,
}

impl<N: Numeric> NumericRangeQuery<N> {
    /// Inclusive range; a missing bound becomes `N::MIN` or `N::MAX`.
    #[must_use]
    pub fn new_range(key: impl Into<String>, min: Option<N>, max: Option<N>) -> Self {
        let key = key.into();
        Self {
            sort: SortField::new(key.clone(), N::KIND),
            key,
            min: min.unwrap_or(N::MIN),
            max: max.unwrap_or(N::MAX),
            min_inclusive: true,
            max_inclusive: true,
        }
    }

    /// Range with explicit inclusivity at each end.
    #[must_use]
    pub fn with_bounds(
        key: impl Into<String>,
        min: N,
        min_inclusive: bool,
        max: N,
        max_inclusive: bool,
    ) -> Self {
        let key = key.into();
        Self { sort: SortField::new(key.clone(), N::KIND), key, min, max, min_inclusive, max_inclusive }
    }

    /// Return results in descending order.
    #[must_use]
    pub fn reversed(mut self) -> Self {
        self.sort.reverse = true;
        self
    }

    /// Storage key bounds for this query within one named index.
    pub(crate) fn scan(&self, target: IndexTarget, index: &str) -> Result<NumericRangeScan, CoreError> {
        NumericRangeScan::new(
            target,
            index,
            &self.key,
            self.min,
            self.min_inclusive,
            self.max,
            self.max_inclusive,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_bounds_use_type_extremes() {
        let q = NumericRangeQuery::<i32>::new_range("k", None, None);
        assert_eq!((q.min, q.max), (i32::MIN, i32::MAX));

        let q = NumericRangeQuery::<f64>::new_range("k", None, Some(1.0));
        assert_eq!(q.min, f64::MIN);
        assert_eq!(q.sort.kind, NumericKind::Double);
        assert!(!q.sort.reverse);
    }

    #[test]
    fn reversed_sets_sort_flag() {
        let q = NumericRangeQuery::new_range("k", Some(1i64), Some(2)).reversed();
        assert!(q.sort.reverse);
        assert_eq!(q.sort.key, "k");
    }
}
