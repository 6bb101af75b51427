//! Application state management for the terminal catalog viewer.
//!
//! [`App`] wraps the [`Coordinator`] with everything that only matters to the
//! terminal UI: the active tab and mode, the list cursor, input buffers, the
//! detail view and the favorites view.

use super::coordinator::Coordinator;
use super::tasks::Tasks;
use crate::domain::{
    CatalogResult, Character, Episode, FilterCriteria, Gender, LifeStatus, episode_ids, next_page, previous_page,
};
use tracing::{debug, warn};

/// Represents the current mode of the application.
///
/// The mode determines how key presses are interpreted and which popups are
/// drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Browsing the character table
    Browse,
    /// Typing a name to search for
    Search,
    /// Advanced filter dialog is open
    Filters,
    /// Character detail popup is open
    Details,
    /// Help screen is displayed
    Help,
}

/// Which collection the table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// The current catalog page
    All,
    /// Every favorite, fetched by id
    Favorites,
}

/// Field with focus in the advanced filter dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Species,
    Subtype,
    Gender,
}

impl FilterField {
    fn next(self) -> Self {
        match self {
            FilterField::Species => FilterField::Subtype,
            FilterField::Subtype => FilterField::Gender,
            FilterField::Gender => FilterField::Species,
        }
    }

    fn previous(self) -> Self {
        match self {
            FilterField::Species => FilterField::Gender,
            FilterField::Subtype => FilterField::Species,
            FilterField::Gender => FilterField::Subtype,
        }
    }
}

/// Data fetched on demand for a view.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

/// Results of background fetches started by the UI.
#[derive(Debug)]
pub enum AppEvent {
    EpisodesLoaded {
        character_id: u32,
        result: CatalogResult<Vec<Episode>>,
    },
    FavoritesLoaded {
        ids: Vec<u32>,
        result: CatalogResult<Vec<Character>>,
    },
}

/// Main application state.
///
/// # Examples
///
/// ```no_run
/// use rmdex::application::{App, Coordinator, CoordinatorOptions, Tasks, Tab};
/// use rmdex::infrastructure::{FileFavoriteStore, HttpCatalogClient};
/// use std::sync::Arc;
///
/// let coordinator = Coordinator::new(
///     Arc::new(HttpCatalogClient::new("https://rickandmortyapi.com/api")),
///     Box::new(FileFavoriteStore::new("favorites.json")),
///     CoordinatorOptions::default(),
///     Tasks::threaded(),
/// );
/// let app = App::new(coordinator, Tasks::threaded());
/// assert_eq!(app.tab, Tab::All);
/// ```
pub struct App {
    /// Catalog data, filters, pagination and favorites
    pub coordinator: Coordinator,
    /// Current application mode
    pub mode: AppMode,
    /// Active tab
    pub tab: Tab,
    /// Highlighted row in the displayed list
    pub cursor: usize,
    /// Name search input buffer
    pub search_input: String,
    /// Filters being edited in the advanced dialog
    pub filter_draft: FilterCriteria,
    /// Focused field in the advanced dialog
    pub filter_field: FilterField,
    /// Episodes of the selected character
    pub episodes: Loadable<Vec<Episode>>,
    /// Scroll position in the episode list
    pub episode_scroll: usize,
    /// Characters shown in the favorites tab
    pub favorite_characters: Loadable<Vec<Character>>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    events: Tasks<AppEvent>,
}

impl App {
    pub fn new(coordinator: Coordinator, events: Tasks<AppEvent>) -> Self {
        Self {
            coordinator,
            mode: AppMode::Browse,
            tab: Tab::All,
            cursor: 0,
            search_input: String::new(),
            filter_draft: FilterCriteria::default(),
            filter_field: FilterField::Species,
            episodes: Loadable::Idle,
            episode_scroll: 0,
            favorite_characters: Loadable::Idle,
            help_scroll: 0,
            status_message: None,
            events,
        }
    }

    /// Characters listed in the active tab.
    pub fn displayed_characters(&self) -> &[Character] {
        match self.tab {
            Tab::All => self.coordinator.characters(),
            Tab::Favorites => match &self.favorite_characters {
                Loadable::Loaded(characters) => characters,
                _ => &[],
            },
        }
    }

    pub fn highlighted(&self) -> Option<&Character> {
        self.displayed_characters().get(self.cursor)
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor + 1 < self.displayed_characters().len() {
            self.cursor += 1;
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.displayed_characters().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Applies finished background work. Returns whether anything changed.
    pub fn poll_background(&mut self) -> bool {
        let mut changed = self.coordinator.poll() > 0;
        for event in self.events.drain() {
            changed |= self.apply_event(event);
        }
        if changed {
            self.clamp_cursor();
        }
        changed
    }

    fn apply_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::EpisodesLoaded { character_id, result } => {
                let showing = self.mode == AppMode::Details
                    && self.coordinator.selected_character().map(|c| c.id) == Some(character_id);
                if !showing {
                    debug!(character_id, "dropping episodes for a closed detail view");
                    return false;
                }
                self.episodes = match result {
                    Ok(episodes) => Loadable::Loaded(episodes),
                    Err(e) => {
                        warn!(character_id, error = %e, "failed to fetch episodes");
                        Loadable::Failed(format!("Failed to load episodes: {e}"))
                    }
                };
                true
            }
            AppEvent::FavoritesLoaded { ids, result } => {
                if ids.as_slice() != self.coordinator.favorites().ids() {
                    debug!("dropping favorites fetched for an outdated set");
                    return false;
                }
                self.favorite_characters = match result {
                    Ok(characters) => Loadable::Loaded(characters),
                    Err(e) => {
                        warn!(error = %e, "failed to fetch favorite characters");
                        Loadable::Failed(format!("Failed to load favorite characters: {e}"))
                    }
                };
                true
            }
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.cursor = 0;
        if tab == Tab::Favorites {
            self.refresh_favorites();
        }
    }

    pub fn switch_tab(&mut self) {
        let next = match self.tab {
            Tab::All => Tab::Favorites,
            Tab::Favorites => Tab::All,
        };
        self.set_tab(next);
    }

    /// Fetches every favorite character by id, in favorite order.
    pub fn refresh_favorites(&mut self) {
        let ids = self.coordinator.favorites().ids().to_vec();
        if ids.is_empty() {
            self.favorite_characters = Loadable::Loaded(Vec::new());
            return;
        }
        self.favorite_characters = Loadable::Loading;
        let api = self.coordinator.api();
        self.events.spawn(move || {
            let result = ids.iter().map(|&id| api.fetch_character_by_id(id)).collect();
            AppEvent::FavoritesLoaded { ids, result }
        });
    }

    pub fn reload(&mut self) {
        match self.tab {
            Tab::All => self.coordinator.request_reload(),
            Tab::Favorites => self.refresh_favorites(),
        }
    }

    fn go_to_page(&mut self, page: Option<u32>) {
        if self.tab != Tab::All {
            return;
        }
        if let Some(page) = page {
            self.coordinator.set_current_page(page);
            self.cursor = 0;
        }
    }

    pub fn next_page(&mut self) {
        let page = next_page(self.coordinator.current_page(), self.coordinator.total_pages());
        self.go_to_page(page);
    }

    pub fn previous_page(&mut self) {
        let page = previous_page(self.coordinator.current_page());
        self.go_to_page(page);
    }

    pub fn first_page(&mut self) {
        let page = (self.coordinator.current_page() != 1).then_some(1);
        self.go_to_page(page);
    }

    pub fn last_page(&mut self) {
        let total = self.coordinator.total_pages();
        let page = (total > 0 && self.coordinator.current_page() != total).then_some(total);
        self.go_to_page(page);
    }

    /// Toggles the favorite status of `id`, reporting storage failures in
    /// the status bar.
    pub fn toggle_favorite(&mut self, id: u32) {
        match self.coordinator.toggle_favorite(id) {
            Ok(true) => self.status_message = Some(format!("Added character {id} to favorites")),
            Ok(false) => self.status_message = Some(format!("Removed character {id} from favorites")),
            Err(e) => self.status_message = Some(format!("Could not save favorites: {e}")),
        }
        if self.tab == Tab::Favorites {
            self.refresh_favorites();
        }
    }

    pub fn toggle_highlighted_favorite(&mut self) {
        if let Some(id) = self.highlighted().map(|c| c.id) {
            self.toggle_favorite(id);
        }
    }

    pub fn toggle_selected_favorite(&mut self) {
        if let Some(id) = self.coordinator.selected_character().map(|c| c.id) {
            self.toggle_favorite(id);
        }
    }

    /// Opens the detail popup for the highlighted character and fetches its
    /// episodes in one batch.
    pub fn open_details(&mut self) {
        let Some(character) = self.highlighted().cloned() else {
            return;
        };
        let ids = episode_ids(&character);
        let character_id = character.id;
        self.coordinator.select_character(Some(character));
        self.mode = AppMode::Details;
        self.episode_scroll = 0;

        if ids.is_empty() {
            self.episodes = Loadable::Loaded(Vec::new());
            return;
        }
        self.episodes = Loadable::Loading;
        let api = self.coordinator.api();
        self.events.spawn(move || AppEvent::EpisodesLoaded {
            character_id,
            result: api.fetch_episodes_by_ids(&ids),
        });
    }

    pub fn close_details(&mut self) {
        self.coordinator.select_character(None);
        self.episodes = Loadable::Idle;
        self.mode = AppMode::Browse;
    }

    pub fn scroll_episodes_down(&mut self) {
        if let Loadable::Loaded(episodes) = &self.episodes {
            if self.episode_scroll + 1 < episodes.len() {
                self.episode_scroll += 1;
            }
        }
    }

    pub fn scroll_episodes_up(&mut self) {
        self.episode_scroll = self.episode_scroll.saturating_sub(1);
    }

    /// Status chip behaviour: choosing the active status clears it.
    /// Other filters are kept.
    pub fn toggle_status_filter(&mut self, status: LifeStatus) {
        let mut filters = self.coordinator.filters().clone();
        filters.status = if filters.status == Some(status) { None } else { Some(status) };
        self.apply_filters_now(filters);
    }

    fn apply_filters_now(&mut self, filters: FilterCriteria) {
        self.tab = Tab::All;
        self.cursor = 0;
        self.coordinator.set_filters(filters);
    }

    pub fn start_search(&mut self) {
        self.mode = AppMode::Search;
        self.search_input = self.coordinator.filters().name().unwrap_or_default().to_string();
        self.status_message = None;
    }

    /// Applies the typed name, unless it is the name already searched for.
    pub fn apply_search(&mut self) {
        self.mode = AppMode::Browse;
        let name = self.search_input.trim();
        if self.coordinator.filters().name().unwrap_or_default() == name {
            return;
        }
        let mut filters = self.coordinator.filters().clone();
        filters.name = (!name.is_empty()).then(|| name.to_string());
        self.apply_filters_now(filters);
    }

    pub fn cancel_search(&mut self) {
        self.mode = AppMode::Browse;
        self.search_input.clear();
    }

    /// Opens the advanced filter dialog with a copy of the active filters.
    pub fn open_filters(&mut self) {
        self.filter_draft = self.coordinator.filters().clone();
        self.filter_field = FilterField::Species;
        self.mode = AppMode::Filters;
        self.status_message = None;
    }

    pub fn next_filter_field(&mut self) {
        self.filter_field = self.filter_field.next();
    }

    pub fn previous_filter_field(&mut self) {
        self.filter_field = self.filter_field.previous();
    }

    fn draft_text_mut(&mut self) -> Option<&mut Option<String>> {
        match self.filter_field {
            FilterField::Species => Some(&mut self.filter_draft.species),
            FilterField::Subtype => Some(&mut self.filter_draft.subtype),
            FilterField::Gender => None,
        }
    }

    pub fn push_filter_char(&mut self, c: char) {
        if let Some(text) = self.draft_text_mut() {
            text.get_or_insert_with(String::new).push(c);
        }
    }

    pub fn pop_filter_char(&mut self) {
        if let Some(text) = self.draft_text_mut() {
            if let Some(value) = text.as_mut() {
                value.pop();
                if value.is_empty() {
                    *text = None;
                }
            }
        }
    }

    /// Steps the drafted gender through unset and each gender value.
    pub fn cycle_gender(&mut self, forward: bool) {
        let mut options: Vec<Option<Gender>> = vec![None];
        options.extend(Gender::ALL.into_iter().map(Some));
        let len = options.len();
        let pos = options.iter().position(|g| *g == self.filter_draft.gender).unwrap_or(0);
        let next = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
        self.filter_draft.gender = options[next];
    }

    /// Replaces the active filters with the draft.
    pub fn apply_filters(&mut self) {
        self.mode = AppMode::Browse;
        let filters = self.filter_draft.clone();
        self.apply_filters_now(filters);
    }

    pub fn cancel_filters(&mut self) {
        self.mode = AppMode::Browse;
    }

    /// Clears the draft and the active filters.
    pub fn reset_filters(&mut self) {
        self.filter_draft = FilterCriteria::default();
        self.search_input.clear();
        self.mode = AppMode::Browse;
        self.apply_filters_now(FilterCriteria::default());
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Browse;
    }
}
