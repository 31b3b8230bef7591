//! Rick and Morty API data transfer objects
//!
//! These types mirror the JSON returned by the public REST API.
//! Field names follow Rust conventions; serde renames map them back
//! to the wire names (`episode`, `air_date`, `characters`, ...).

use serde::{Deserialize, Serialize};

/// Numeric identifier of a character
pub type CharacterId = u32;

/// Numeric identifier of an episode
pub type EpisodeId = u32;

/// A character from the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Character id (e.g., 1 for Rick Sanchez)
    pub id: CharacterId,

    /// Display name
    pub name: String,

    /// Life status
    pub status: CharacterStatus,

    /// Species (e.g., "Human", "Alien")
    pub species: String,

    /// Sub-type, often empty
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Gender
    #[serde(default)]
    pub gender: CharacterGender,

    /// Place of origin
    #[serde(default)]
    pub origin: LocationRef,

    /// Last known location
    #[serde(default)]
    pub location: LocationRef,

    /// Avatar image URL
    #[serde(default)]
    pub image: String,

    /// Resource URLs of the episodes this character appears in
    #[serde(rename = "episode")]
    pub episode_refs: Vec<String>,

    /// Resource URL of this character
    #[serde(default)]
    pub url: String,

    /// Record creation timestamp as sent by the API
    #[serde(default)]
    pub created: String,
}

/// Life status of a character
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterStatus {
    Alive,
    Dead,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl std::fmt::Display for CharacterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharacterStatus::Alive => f.pad("Alive"),
            CharacterStatus::Dead => f.pad("Dead"),
            CharacterStatus::Unknown => f.pad("unknown"),
        }
    }
}

/// Gender of a character
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterGender {
    Female,
    Male,
    Genderless,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl std::fmt::Display for CharacterGender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharacterGender::Female => f.pad("Female"),
            CharacterGender::Male => f.pad("Male"),
            CharacterGender::Genderless => f.pad("Genderless"),
            CharacterGender::Unknown => f.pad("unknown"),
        }
    }
}

/// Named link to a location resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRef {
    pub name: String,
    pub url: String,
}

/// An episode from the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Episode id
    pub id: EpisodeId,

    /// Episode title
    pub name: String,

    /// Air date as formatted by the API (e.g., "December 2, 2013")
    pub air_date: String,

    /// Season/episode code (e.g., "S01E01")
    #[serde(rename = "episode")]
    pub code: String,

    /// Resource URLs of the characters in this episode
    #[serde(rename = "characters", default)]
    pub character_refs: Vec<String>,

    /// Resource URL of this episode
    #[serde(default)]
    pub url: String,

    /// Record creation timestamp as sent by the API
    #[serde(default)]
    pub created: String,
}

/// Pagination block returned with every list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of records
    pub count: u32,

    /// Total number of pages
    pub pages: u32,

    /// Link to the next page (None on the last page)
    pub next: Option<String>,

    /// Link to the previous page (None on the first page)
    pub prev: Option<String>,
}

impl PageInfo {
    /// Page number encoded in the `next` link
    pub fn next_page(&self) -> Option<u32> {
        self.next.as_deref().and_then(page_param)
    }

    /// Page number encoded in the `prev` link
    pub fn prev_page(&self) -> Option<u32> {
        self.prev.as_deref().and_then(page_param)
    }
}

/// Read the `page` query parameter from a page link
fn page_param(link: &str) -> Option<u32> {
    let url = reqwest::Url::parse(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

/// One page of a paginated list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub info: PageInfo,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Total number of pages in the catalog
    pub fn total_pages(&self) -> u32 {
        self.info.pages
    }

    /// An empty page, as returned for searches without matches
    pub fn empty() -> Self {
        Self {
            info: PageInfo::default(),
            results: Vec::new(),
        }
    }
}

/// Filters for a character search, unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterFilters {
    /// Substring of the character name
    pub name: Option<String>,
    pub status: Option<CharacterStatus>,
    pub species: Option<String>,
    pub gender: Option<CharacterGender>,
}

impl CharacterFilters {
    pub fn is_empty(&self) -> bool {
        self.query_params().is_empty()
    }

    /// Query parameters in wire form, blank text filters are skipped
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let text = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        [
            ("name", text(&self.name)),
            ("status", self.status.map(|s| s.to_string())),
            ("species", text(&self.species)),
            ("gender", self.gender.map(|g| g.to_string())),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}

/// Error body the API sends with non-success responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
