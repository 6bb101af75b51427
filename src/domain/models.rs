use serde::{Deserialize, Serialize};
use std::fmt;

/// Life status of a character as reported by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifeStatus {
    Alive,
    Dead,
    #[serde(rename = "unknown")]
    Unknown,
}

impl LifeStatus {
    pub const ALL: [LifeStatus; 3] = [LifeStatus::Alive, LifeStatus::Dead, LifeStatus::Unknown];

    /// Value used in the `status` query parameter.
    pub fn query_value(self) -> &'static str {
        match self {
            LifeStatus::Alive => "alive",
            LifeStatus::Dead => "dead",
            LifeStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LifeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LifeStatus::Alive => "Alive",
            LifeStatus::Dead => "Dead",
            LifeStatus::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Gender values accepted by the `gender` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Genderless,
    Unknown,
}

impl Gender {
    pub const ALL: [Gender; 4] = [Gender::Female, Gender::Male, Gender::Genderless, Gender::Unknown];

    pub fn query_value(self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Genderless => "genderless",
            Gender::Unknown => "unknown",
        }
    }
}

/// A named link to another catalog resource (origin or last known location).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub status: LifeStatus,
    pub species: String,
    /// Subtype; the catalog sends an empty string when there is none.
    #[serde(rename = "type", default)]
    pub subtype: String,
    pub gender: String,
    pub origin: ResourceLink,
    pub location: ResourceLink,
    pub image: String,
    /// Episode references in airing order.
    pub episode: Vec<String>,
    pub url: String,
    pub created: String,
}

impl Character {
    pub fn subtype(&self) -> Option<&str> {
        if self.subtype.is_empty() {
            None
        } else {
            Some(&self.subtype)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u32,
    pub name: String,
    pub air_date: String,
    /// In-universe code such as `S01E01`.
    pub episode: String,
    pub characters: Vec<String>,
    pub url: String,
    pub created: String,
}

/// Constraints applied to the character listing.
///
/// `None` and the empty string both mean "no constraint" for the text fields,
/// and compare equal.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub name: Option<String>,
    pub status: Option<LifeStatus>,
    pub species: Option<String>,
    pub subtype: Option<String>,
    pub gender: Option<Gender>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }

    /// Non-empty filters as query parameters, in catalog order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(name) = non_empty(&self.name) {
            pairs.push(("name", name.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.query_value().to_string()));
        }
        if let Some(species) = non_empty(&self.species) {
            pairs.push(("species", species.to_string()));
        }
        if let Some(subtype) = non_empty(&self.subtype) {
            pairs.push(("type", subtype.to_string()));
        }
        if let Some(gender) = self.gender {
            pairs.push(("gender", gender.query_value().to_string()));
        }
        pairs
    }

    /// Name constraint, treating an empty string as unset.
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }
}

impl PartialEq for FilterCriteria {
    fn eq(&self, other: &Self) -> bool {
        self.query_pairs() == other.query_pairs()
    }
}

impl Eq for FilterCriteria {}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Pagination metadata of a catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageInfo {
    pub count: u32,
    pub pages: u32,
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// One page of a paginated collection, as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub info: PageInfo,
    pub results: Vec<T>,
}

impl<T> PageResult<T> {
    pub fn count(&self) -> u32 {
        self.info.count
    }

    pub fn pages(&self) -> u32 {
        self.info.pages
    }
}
