// Session state - the single owner of filters, paging and the page cache
use crate::application::page_cache::PageCache;
use crate::domain::dashboard::RefreshState;
use crate::domain::filters::FilterState;

/// Mutable state of one dashboard session.
///
/// `generation` is bumped on every filter change. Requests carry the
/// generation they were issued under so late responses for older filters
/// can be recognised and dropped.
#[derive(Debug)]
pub struct Session {
    filters: FilterState,
    generation: u64,
    current_page: u32,
    total_pages: Option<u32>,
    shown_page: Option<u32>,
    cache: PageCache,
    boroughs: Vec<String>,
    refresh_state: RefreshState,
}

impl Session {
    pub fn new(filters: FilterState) -> Self {
        Self {
            filters,
            generation: 0,
            current_page: 1,
            total_pages: None,
            shown_page: None,
            cache: PageCache::new(),
            boroughs: Vec::new(),
            refresh_state: RefreshState::Idle,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Install a new filter snapshot: clears the page cache, returns to page 1
    /// and starts a new generation.
    pub fn replace_filters(&mut self, filters: FilterState) {
        self.cache.clear();
        self.filters = filters;
        self.generation += 1;
        self.current_page = 1;
        self.total_pages = None;
        self.shown_page = None;
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn set_current_page(&mut self, page: u32) {
        self.current_page = page;
    }

    /// Page count of the listing last shown, unknown until one has loaded
    /// under the current filters.
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Page of the listing currently on screen for these filters.
    pub fn shown_page(&self) -> Option<u32> {
        self.shown_page
    }

    /// Record that `page` of `total_pages` is now on screen.
    pub fn mark_shown(&mut self, page: u32, total_pages: u32) {
        self.shown_page = Some(page);
        self.total_pages = Some(total_pages);
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut PageCache {
        &mut self.cache
    }

    pub fn boroughs(&self) -> &[String] {
        &self.boroughs
    }

    pub fn set_boroughs(&mut self, boroughs: Vec<String>) {
        self.boroughs = boroughs;
    }

    pub fn refresh_state(&self) -> &RefreshState {
        &self.refresh_state
    }

    pub fn set_refresh_state(&mut self, state: RefreshState) {
        self.refresh_state = state;
    }
}
