//! Single source of truth for what the UI displays.
//!
//! The [`Coordinator`] owns the loaded character page, the active page and
//! filters, the favorite set and the selected character. Changing the page
//! or the filters reloads the listing; toggling a favorite persists the
//! whole set. One instance is created per running application and handed to
//! whatever needs it.

use super::tasks::Tasks;
use crate::domain::{CatalogResult, Character, FavoriteSet, FilterCriteria, PageResult, PersistenceError};
use crate::infrastructure::{AppConfig, CatalogApi, FavoriteStore};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Behaviour switches for the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorOptions {
    /// Go back to page 1 whenever the filters are replaced.
    pub reset_page_on_filter_change: bool,
    /// Ignore reload results that are not the most recently issued request.
    /// When off, whichever request resolves last wins.
    pub discard_stale_responses: bool,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            reset_page_on_filter_change: false,
            discard_stale_responses: true,
        }
    }
}

impl From<&AppConfig> for CoordinatorOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            reset_page_on_filter_change: config.reset_page_on_filter_change,
            discard_stale_responses: config.discard_stale_responses,
        }
    }
}

/// Identifies one reload request and the parameters it was issued with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadTicket {
    pub token: u64,
    pub page: u32,
    pub filters: FilterCriteria,
}

/// A finished background reload waiting to be applied.
pub struct PageLoad {
    pub ticket: ReloadTicket,
    pub result: CatalogResult<PageResult<Character>>,
}

pub struct Coordinator {
    api: Arc<dyn CatalogApi>,
    store: Box<dyn FavoriteStore>,
    options: CoordinatorOptions,
    loads: Tasks<PageLoad>,
    current_page: u32,
    filters: FilterCriteria,
    characters: Vec<Character>,
    total_pages: u32,
    filtered_count: u32,
    favorites: FavoriteSet,
    selected_character: Option<Character>,
    loading: bool,
    last_error: Option<String>,
    latest_token: u64,
}

impl Coordinator {
    /// Creates the coordinator, restores favorites from `store` and requests
    /// the first page with no filters.
    ///
    /// Unreadable or malformed favorites storage starts an empty set.
    pub fn new(
        api: Arc<dyn CatalogApi>,
        store: Box<dyn FavoriteStore>,
        options: CoordinatorOptions,
        loads: Tasks<PageLoad>,
    ) -> Self {
        let favorites = match store.load() {
            Ok(favorites) => favorites,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable favorites storage");
                FavoriteSet::new()
            }
        };
        info!(favorites = favorites.len(), "favorites restored");

        let mut coordinator = Self {
            api,
            store,
            options,
            loads,
            current_page: 1,
            filters: FilterCriteria::default(),
            characters: Vec::new(),
            total_pages: 0,
            filtered_count: 0,
            favorites,
            selected_character: None,
            loading: false,
            last_error: None,
            latest_token: 0,
        };
        coordinator.request_reload();
        coordinator
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn filtered_count(&self) -> u32 {
        self.filtered_count
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.contains(id)
    }

    pub fn selected_character(&self) -> Option<&Character> {
        self.selected_character.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn options(&self) -> CoordinatorOptions {
        self.options
    }

    pub fn api(&self) -> Arc<dyn CatalogApi> {
        Arc::clone(&self.api)
    }

    /// Moves to `page` (pages start at 1) and reloads.
    pub fn set_current_page(&mut self, page: u32) {
        self.current_page = page.max(1);
        self.request_reload();
    }

    /// Replaces the filters wholesale and reloads.
    pub fn set_filters(&mut self, filters: FilterCriteria) {
        self.filters = filters;
        if self.options.reset_page_on_filter_change {
            self.current_page = 1;
        }
        self.request_reload();
    }

    /// Fetches the current page on the calling thread and applies the result.
    ///
    /// Returns whether the result was applied.
    pub fn reload(&mut self) -> bool {
        let ticket = self.begin_reload();
        let result = self.api.fetch_character_page(ticket.page, &ticket.filters);
        self.finish_reload(ticket, result)
    }

    /// Fetches the current page in the background. The result is applied by
    /// a later [`Coordinator::poll`].
    pub fn request_reload(&mut self) {
        let ticket = self.begin_reload();
        let api = Arc::clone(&self.api);
        self.loads.spawn(move || {
            let result = api.fetch_character_page(ticket.page, &ticket.filters);
            PageLoad { ticket, result }
        });
    }

    /// Applies every background reload that has completed. Returns how many
    /// were applied (stale results are not counted).
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        for load in self.loads.drain() {
            if self.finish_reload(load.ticket, load.result) {
                applied += 1;
            }
        }
        applied
    }

    /// Enters the loading state and issues a ticket for the current page and
    /// filters.
    pub fn begin_reload(&mut self) -> ReloadTicket {
        self.latest_token += 1;
        self.loading = true;
        self.last_error = None;
        debug!(token = self.latest_token, page = self.current_page, "reload issued");
        ReloadTicket {
            token: self.latest_token,
            page: self.current_page,
            filters: self.filters.clone(),
        }
    }

    /// Applies the outcome of `ticket`.
    ///
    /// On success the characters, page count and match count are replaced
    /// together. On failure the error is recorded and the previous page is
    /// kept. A stale ticket is dropped without touching any state when
    /// stale responses are discarded. Returns whether the result was applied.
    pub fn finish_reload(&mut self, ticket: ReloadTicket, result: CatalogResult<PageResult<Character>>) -> bool {
        if self.options.discard_stale_responses && ticket.token != self.latest_token {
            debug!(token = ticket.token, latest = self.latest_token, "discarding stale reload");
            return false;
        }

        match result {
            Ok(page) => {
                debug!(
                    token = ticket.token,
                    count = page.count(),
                    pages = page.pages(),
                    "character page loaded"
                );
                self.total_pages = page.pages();
                self.filtered_count = page.count();
                self.characters = page.results;
            }
            Err(e) => {
                warn!(token = ticket.token, page = ticket.page, error = %e, "failed to load characters");
                self.last_error = Some(format!("Failed to load characters: {e}"));
            }
        }
        self.loading = false;
        true
    }

    /// Flips the favorite status of `id` and persists the full set.
    ///
    /// The in-memory change stands even if persisting fails. Returns the new
    /// membership.
    pub fn toggle_favorite(&mut self, id: u32) -> Result<bool, PersistenceError> {
        let now_favorite = self.favorites.toggle(id);
        info!(id, favorite = now_favorite, "favorite toggled");
        if let Err(e) = self.store.save(&self.favorites) {
            warn!(error = %e, "failed to persist favorites");
            return Err(e);
        }
        Ok(now_favorite)
    }

    pub fn select_character(&mut self, character: Option<Character>) {
        self.selected_character = character;
    }
}
