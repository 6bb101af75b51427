//! REST client for the remote character catalog.
//!
//! Wraps the catalog's read-only HTTP endpoints (character listing, single
//! character, episode batches) using the blocking [`reqwest`] client. Calls
//! are issued from background worker threads, never from the UI loop.

use crate::domain::{CatalogError, CatalogResult, Character, Episode, FilterCriteria, PageResult};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Base endpoint of the public catalog.
pub const DEFAULT_API_URL: &str = "https://rickandmortyapi.com/api";

/// Read-only operations against the catalog.
pub trait CatalogApi: Send + Sync {
    /// Fetches one page of characters matching `filters`.
    fn fetch_character_page(&self, page: u32, filters: &FilterCriteria) -> CatalogResult<PageResult<Character>>;

    /// Fetches a single character.
    fn fetch_character_by_id(&self, id: u32) -> CatalogResult<Character>;

    /// Fetches a batch of episodes in a single call.
    fn fetch_episodes_by_ids(&self, ids: &[u32]) -> CatalogResult<Vec<Episode>>;
}

/// HTTP client for a catalog instance.
pub struct HttpCatalogClient {
    client: Client,
    api_url: String,
}

impl HttpCatalogClient {
    /// Create a client for the catalog at `api_url`, e.g.
    /// `https://rickandmortyapi.com/api`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_url)
    }

    /// Create a client reusing an existing [`Client`].
    pub fn with_client(client: Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn get(&self, path: &str, query: &[(&str, String)]) -> CatalogResult<Response> {
        let url = format!("{}{}", self.api_url, path);
        debug!(%url, ?query, "catalog request");
        let response = self.client.get(&url).query(query).send()?;
        debug!(%url, status = response.status().as_u16(), "catalog response");
        Ok(response)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, mapping failures to
    /// [`CatalogError::Remote`] without reading the body.
    fn ensure_success(response: Response) -> CatalogResult<Response> {
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), url = %response.url(), "catalog returned an error status");
            return Err(CatalogError::Remote { status: status.as_u16() });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    fn parse_response<T: DeserializeOwned>(response: Response) -> CatalogResult<T> {
        let response = Self::ensure_success(response)?;
        let body = response.text()?;
        decode(&body)
    }
}

impl CatalogApi for HttpCatalogClient {
    fn fetch_character_page(&self, page: u32, filters: &FilterCriteria) -> CatalogResult<PageResult<Character>> {
        let query = character_query(page, filters);
        let response = self.get("/character", &query)?;
        Self::parse_response(response)
    }

    fn fetch_character_by_id(&self, id: u32) -> CatalogResult<Character> {
        let response = self.get(&format!("/character/{id}"), &[])?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound { resource: format!("Character {id}") });
        }
        Self::parse_response(response)
    }

    fn fetch_episodes_by_ids(&self, ids: &[u32]) -> CatalogResult<Vec<Episode>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let response = self.get(&episode_batch_path(ids), &[])?;
        let body = Self::ensure_success(response)?.text()?;
        decode_episodes(&body)
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Transport(err.to_string())
    }
}

/// Query parameters for a character listing: `page` first, then every
/// non-empty filter.
pub fn character_query(page: u32, filters: &FilterCriteria) -> Vec<(&'static str, String)> {
    let mut query = vec![("page", page.to_string())];
    query.extend(filters.query_pairs());
    query
}

/// Path of a batched episode request, e.g. `/episode/1,2,3`.
pub fn episode_batch_path(ids: &[u32]) -> String {
    let joined = ids.iter().map(u32::to_string).collect::<Vec<_>>().join(",");
    format!("/episode/{joined}")
}

/// The episode endpoint answers a one-id batch with a bare object.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// Decodes an episode batch body, normalizing a bare object into a
/// one-element vector.
pub fn decode_episodes(body: &str) -> CatalogResult<Vec<Episode>> {
    Ok(match decode::<OneOrMany<Episode>>(body)? {
        OneOrMany::Many(episodes) => episodes,
        OneOrMany::One(episode) => vec![episode],
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> CatalogResult<T> {
    serde_json::from_str(body).map_err(|e| CatalogError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, LifeStatus};

    const PILOT: &str = r#"{
        "id": 1,
        "name": "Pilot",
        "air_date": "December 2, 2013",
        "episode": "S01E01",
        "characters": ["https://rickandmortyapi.com/api/character/1"],
        "url": "https://rickandmortyapi.com/api/episode/1",
        "created": "2017-11-10T12:56:33.798Z"
    }"#;

    #[test]
    fn test_character_query_starts_with_page() {
        let query = character_query(3, &FilterCriteria::default());
        assert_eq!(query, vec![("page", "3".to_string())]);
    }

    #[test]
    fn test_character_query_skips_empty_filters() {
        let filters = FilterCriteria {
            name: Some("morty".to_string()),
            status: Some(LifeStatus::Alive),
            species: Some(String::new()),
            subtype: None,
            gender: Some(Gender::Male),
        };
        let query = character_query(1, &filters);
        assert_eq!(
            query,
            vec![
                ("page", "1".to_string()),
                ("name", "morty".to_string()),
                ("status", "alive".to_string()),
                ("gender", "male".to_string()),
            ]
        );
    }

    #[test]
    fn test_episode_batch_path_joins_ids() {
        assert_eq!(episode_batch_path(&[1]), "/episode/1");
        assert_eq!(episode_batch_path(&[1, 2, 28]), "/episode/1,2,28");
    }

    #[test]
    fn test_single_episode_is_wrapped() {
        let episodes = decode_episodes(PILOT).unwrap();
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].episode, "S01E01");
    }

    #[test]
    fn test_episode_array_is_kept_in_order() {
        let second = PILOT.replace("\"id\": 1", "\"id\": 2").replace("S01E01", "S01E02");
        let body = format!("[{PILOT}, {second}]");
        let episodes = decode_episodes(&body).unwrap();
        assert_eq!(episodes.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_garbage_body_is_a_decode_error() {
        assert!(matches!(decode_episodes("{\"error\": 1}"), Err(CatalogError::Decode(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = HttpCatalogClient::new("http://localhost:9/api/");
        assert_eq!(client.api_url(), "http://localhost:9/api");
    }
}
