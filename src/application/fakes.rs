//! In-process stand-ins for the catalog and the favorite store.
//!
//! The fake catalog serves a fixed roster with the same paging and filtering
//! rules as the real one, and records every call so tests can assert on the
//! traffic a workflow generates.

use crate::domain::{
    CatalogError, CatalogResult, Character, Episode, FavoriteSet, FilterCriteria, LifeStatus, PageInfo, PageResult,
    PersistenceError, ResourceLink,
};
use crate::infrastructure::{CatalogApi, FavoriteStore};
use std::sync::{Arc, Mutex};

pub const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Page(u32, FilterCriteria),
    Character(u32),
    Episodes(Vec<u32>),
}

pub struct FakeCatalog {
    roster: Vec<Character>,
    calls: Mutex<Vec<Call>>,
    fail_with: Mutex<Option<CatalogError>>,
}

impl FakeCatalog {
    pub fn new(roster: Vec<Character>) -> Arc<Self> {
        Arc::new(Self { roster, calls: Mutex::new(Vec::new()), fail_with: Mutex::new(None) })
    }

    /// A roster of `count` characters cycling through the three statuses.
    pub fn with_roster(count: u32) -> Arc<Self> {
        Self::new((1..=count).map(character).collect())
    }

    pub fn fail_with(&self, error: Option<CatalogError>) {
        *self.fail_with.lock().unwrap() = error;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> CatalogResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn matches(character: &Character, filters: &FilterCriteria) -> bool {
        let contains = |haystack: &str, needle: &Option<String>| match needle.as_deref() {
            Some(needle) if !needle.is_empty() => haystack.to_lowercase().contains(&needle.to_lowercase()),
            _ => true,
        };
        contains(&character.name, &filters.name)
            && contains(&character.species, &filters.species)
            && contains(&character.subtype, &filters.subtype)
            && filters.status.is_none_or(|status| status == character.status)
            && filters
                .gender
                .is_none_or(|gender| character.gender.eq_ignore_ascii_case(gender.query_value()))
    }
}

impl CatalogApi for FakeCatalog {
    fn fetch_character_page(&self, page: u32, filters: &FilterCriteria) -> CatalogResult<PageResult<Character>> {
        self.record(Call::Page(page, filters.clone()))?;
        let matching: Vec<Character> =
            self.roster.iter().filter(|c| Self::matches(c, filters)).cloned().collect();
        if matching.is_empty() {
            return Err(CatalogError::Remote { status: 404 });
        }
        let pages = matching.len().div_ceil(PAGE_SIZE) as u32;
        let start = (page.max(1) as usize - 1) * PAGE_SIZE;
        if start >= matching.len() {
            return Err(CatalogError::Remote { status: 404 });
        }
        let results = matching.iter().skip(start).take(PAGE_SIZE).cloned().collect();
        Ok(PageResult {
            info: PageInfo { count: matching.len() as u32, pages, next: None, prev: None },
            results,
        })
    }

    fn fetch_character_by_id(&self, id: u32) -> CatalogResult<Character> {
        self.record(Call::Character(id))?;
        self.roster
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound { resource: format!("Character {id}") })
    }

    fn fetch_episodes_by_ids(&self, ids: &[u32]) -> CatalogResult<Vec<Episode>> {
        self.record(Call::Episodes(ids.to_vec()))?;
        Ok(ids.iter().map(|&id| episode(id)).collect())
    }
}

pub fn character(id: u32) -> Character {
    let status = LifeStatus::ALL[(id as usize - 1) % 3];
    Character {
        id,
        name: format!("Character {id}"),
        status,
        species: if id % 2 == 0 { "Alien".to_string() } else { "Human".to_string() },
        subtype: String::new(),
        gender: if id % 2 == 0 { "Female".to_string() } else { "Male".to_string() },
        origin: ResourceLink { name: "Earth (C-137)".to_string(), url: String::new() },
        location: ResourceLink { name: "Citadel of Ricks".to_string(), url: String::new() },
        image: format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
        episode: vec![
            "https://rickandmortyapi.com/api/episode/1".to_string(),
            format!("https://rickandmortyapi.com/api/episode/{}", id + 1),
        ],
        url: format!("https://rickandmortyapi.com/api/character/{id}"),
        created: "2017-11-04T18:48:46.250Z".to_string(),
    }
}

pub fn episode(id: u32) -> Episode {
    Episode {
        id,
        name: format!("Episode {id}"),
        air_date: "December 2, 2013".to_string(),
        episode: format!("S01E{id:02}"),
        characters: Vec::new(),
        url: format!("https://rickandmortyapi.com/api/episode/{id}"),
        created: "2017-11-10T12:56:33.798Z".to_string(),
    }
}

/// Shared view of what a [`MemoryFavoriteStore`] holds.
#[derive(Debug, Default)]
pub struct StoreState {
    pub slot: Option<String>,
    pub writes: usize,
}

/// Favorite store keeping the raw JSON slot in memory.
#[derive(Clone, Default)]
pub struct MemoryFavoriteStore {
    pub state: Arc<Mutex<StoreState>>,
}

impl MemoryFavoriteStore {
    pub fn with_slot(slot: &str) -> Self {
        let store = Self::default();
        store.state.lock().unwrap().slot = Some(slot.to_string());
        store
    }

    pub fn writes(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    pub fn slot(&self) -> Option<String> {
        self.state.lock().unwrap().slot.clone()
    }
}

impl FavoriteStore for MemoryFavoriteStore {
    fn load(&self) -> Result<FavoriteSet, PersistenceError> {
        match self.state.lock().unwrap().slot.as_deref() {
            Some(slot) => Ok(serde_json::from_str(slot)?),
            None => Ok(FavoriteSet::new()),
        }
    }

    fn save(&mut self, favorites: &FavoriteSet) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(favorites)?;
        let mut state = self.state.lock().unwrap();
        state.slot = Some(json);
        state.writes += 1;
        Ok(())
    }
}
