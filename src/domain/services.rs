//! Pure helpers over catalog data: reference parsing and pagination math.
//!
//! Nothing here performs I/O. The remote client and the application layer
//! both build on these functions.

use super::errors::{CatalogError, CatalogResult};
use super::models::Character;
use regex::Regex;
use std::sync::LazyLock;

static EPISODE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/episode/(\d+)$").expect("episode reference pattern is valid"));

/// Number of page buttons shown before the window collapses into gaps.
pub const MAX_PAGES_SHOWN: u32 = 5;

/// Extracts the trailing numeric identifier of an episode reference.
///
/// # Errors
///
/// Returns [`CatalogError::MalformedReference`] when the reference does not
/// end in `/episode/<digits>` or the identifier does not fit in a `u32`.
///
/// # Examples
///
/// ```
/// use rmdex::domain::parse_episode_reference;
///
/// assert_eq!(parse_episode_reference("https://rickandmortyapi.com/api/episode/7"), Ok(7));
/// assert!(parse_episode_reference("https://rickandmortyapi.com/api/episode/abc").is_err());
/// ```
pub fn parse_episode_reference(reference: &str) -> CatalogResult<u32> {
    EPISODE_REFERENCE
        .captures(reference)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .ok_or_else(|| CatalogError::MalformedReference(reference.to_string()))
}

/// Like [`parse_episode_reference`], but yields `0` ("no identifier") instead
/// of an error. Callers must drop zeros before batching.
pub fn episode_id_from_url(reference: &str) -> u32 {
    parse_episode_reference(reference).unwrap_or(0)
}

/// Episode identifiers of a character, malformed references dropped.
pub fn episode_ids(character: &Character) -> Vec<u32> {
    character
        .episode
        .iter()
        .map(|reference| episode_id_from_url(reference))
        .filter(|&id| id > 0)
        .collect()
}

/// An entry of the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(u32),
    Gap,
}

/// Computes the page buttons shown around `current`.
///
/// Up to [`MAX_PAGES_SHOWN`] pages are listed in full. Beyond that the first
/// and last page are always shown, with the current page's neighbours in
/// between and a [`PageSlot::Gap`] wherever pages are skipped.
///
/// # Examples
///
/// ```
/// use rmdex::domain::{page_window, PageSlot::{Gap, Page}};
///
/// assert_eq!(page_window(5, 10), vec![Page(1), Gap, Page(4), Page(5), Page(6), Gap, Page(10)]);
/// ```
pub fn page_window(current: u32, total: u32) -> Vec<PageSlot> {
    if total <= MAX_PAGES_SHOWN {
        return (1..=total).map(PageSlot::Page).collect();
    }

    let mut start = current.saturating_sub(1).max(2);
    let mut end = (total - 1).min(current + 1);

    if current <= 3 {
        end = 4;
    }
    if current >= total - 2 {
        start = total - 3;
    }

    let mut slots = vec![PageSlot::Page(1)];
    if start > 2 {
        slots.push(PageSlot::Gap);
    }
    slots.extend((start..=end).map(PageSlot::Page));
    if end < total - 1 {
        slots.push(PageSlot::Gap);
    }
    slots.push(PageSlot::Page(total));
    slots
}

/// Page before `current`, if the previous button is enabled.
pub fn previous_page(current: u32) -> Option<u32> {
    (current > 1).then(|| current - 1)
}

/// Page after `current`, if the next button is enabled.
pub fn next_page(current: u32, total: u32) -> Option<u32> {
    (current < total).then(|| current + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::PageSlot::{Gap, Page};

    #[test]
    fn test_episode_id_extraction() {
        assert_eq!(episode_id_from_url("https://rickandmortyapi.com/api/episode/7"), 7);
        assert_eq!(episode_id_from_url(".../episode/51"), 51);
        assert_eq!(episode_id_from_url(".../episode/abc"), 0);
        assert_eq!(episode_id_from_url(".../episode/7/"), 0);
        assert_eq!(episode_id_from_url(".../character/7"), 0);
        assert_eq!(episode_id_from_url(""), 0);
    }

    #[test]
    fn test_parse_reports_malformed_reference() {
        let err = parse_episode_reference(".../episode/abc").unwrap_err();
        assert_eq!(err, CatalogError::MalformedReference(".../episode/abc".to_string()));
        assert!(parse_episode_reference(".../episode/99999999999").is_err());
    }

    #[test]
    fn test_episode_ids_drop_malformed_references() {
        let character = Character {
            id: 1,
            name: "Rick Sanchez".to_string(),
            status: crate::domain::LifeStatus::Alive,
            species: "Human".to_string(),
            subtype: String::new(),
            gender: "Male".to_string(),
            origin: Default::default(),
            location: Default::default(),
            image: String::new(),
            episode: vec![
                ".../episode/1".to_string(),
                ".../episode/abc".to_string(),
                ".../episode/3".to_string(),
            ],
            url: String::new(),
            created: String::new(),
        };
        assert_eq!(episode_ids(&character), vec![1, 3]);
    }

    #[test]
    fn test_small_totals_list_every_page() {
        assert_eq!(page_window(1, 0), vec![]);
        assert_eq!(page_window(1, 1), vec![Page(1)]);
        assert_eq!(page_window(3, 5), vec![Page(1), Page(2), Page(3), Page(4), Page(5)]);
    }

    #[test]
    fn test_window_near_start() {
        assert_eq!(page_window(1, 42), vec![Page(1), Page(2), Page(3), Page(4), Gap, Page(42)]);
        assert_eq!(page_window(3, 42), vec![Page(1), Page(2), Page(3), Page(4), Gap, Page(42)]);
    }

    #[test]
    fn test_window_in_the_middle() {
        assert_eq!(
            page_window(20, 42),
            vec![Page(1), Gap, Page(19), Page(20), Page(21), Gap, Page(42)]
        );
    }

    #[test]
    fn test_window_near_end() {
        assert_eq!(page_window(42, 42), vec![Page(1), Gap, Page(39), Page(40), Page(41), Page(42)]);
        assert_eq!(page_window(40, 42), vec![Page(1), Gap, Page(39), Page(40), Page(41), Page(42)]);
    }

    #[test]
    fn test_window_with_stale_page_beyond_total() {
        assert_eq!(page_window(12, 10), vec![Page(1), Gap, Page(7), Page(8), Page(9), Page(10)]);
    }

    #[test]
    fn test_previous_and_next() {
        assert_eq!(previous_page(1), None);
        assert_eq!(previous_page(2), Some(1));
        assert_eq!(next_page(3, 3), None);
        assert_eq!(next_page(2, 3), Some(3));
        assert_eq!(next_page(1, 0), None);
    }
}
