// Page cache - memoised trip-listing pages keyed by page and filter snapshot
use crate::domain::filters::FilterState;
use crate::domain::trips::TripPage;
use std::collections::HashMap;

/// Trip pages already fetched during this session.
///
/// Keys compare the full filter snapshot structurally. There is no size bound
/// and no expiry: the owner must call [`PageCache::clear`] whenever the
/// filters change, before issuing any fetch under the new filters.
#[derive(Debug, Default)]
pub struct PageCache {
    entries: HashMap<FilterState, HashMap<u32, TripPage>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, page: u32, filters: &FilterState) -> Option<&TripPage> {
        self.entries.get(filters)?.get(&page)
    }

    /// Store `trip_page` unless the key is already present; existing entries
    /// are never replaced. Returns the entry now held for the key.
    pub fn put(&mut self, page: u32, filters: FilterState, trip_page: TripPage) -> &TripPage {
        self.entries
            .entry(filters)
            .or_default()
            .entry(page)
            .or_insert(trip_page)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{january, trip_page};
    use crate::domain::filters::BoroughFilter;

    #[test]
    fn test_get_is_stable() {
        let mut cache = PageCache::new();
        cache.put(1, january(), trip_page(1, 3, 120));

        let first = cache.get(1, &january()).cloned();
        let second = cache.get(1, &january()).cloned();
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_keys_include_filters() {
        let mut cache = PageCache::new();
        let manhattan = january().with_borough(BoroughFilter::Named("Manhattan".to_string()));
        cache.put(1, january(), trip_page(1, 3, 120));

        assert!(cache.get(1, &manhattan).is_none());
        assert!(cache.get(2, &january()).is_none());
    }

    #[test]
    fn test_put_does_not_replace() {
        let mut cache = PageCache::new();
        cache.put(1, january(), trip_page(1, 3, 120));
        let held = cache.put(1, january(), trip_page(1, 5, 999)).clone();

        assert_eq!(held.total_count, 120);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut cache = PageCache::new();
        cache.put(1, january(), trip_page(1, 3, 120));
        cache.put(2, january(), trip_page(2, 3, 120));
        cache.clear();

        assert!(cache.is_empty());
        assert!(cache.get(1, &january()).is_none());
        assert!(cache.get(2, &january()).is_none());
    }
}
