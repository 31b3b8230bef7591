//! API client trait and cache mode definitions
//!
//! This module defines the core `RickAndMortyClient` trait that all client
//! implementations must satisfy, as well as the `CacheMode` enum for
//! controlling caching behavior.

use crate::types::{Character, CharacterFilters, CharacterId, Episode, EpisodeId, Page};
use async_trait::async_trait;

/// Cache behavior mode for API clients
///
/// Controls how the client interacts with the cache layer.
/// This is set at client construction time, not per-request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheMode {
    /// No caching - neither read nor write
    None,

    /// Write-only - skip cache reads, but write responses to cache
    /// Use for "force refresh" to get fresh data while populating cache
    WriteOnly,

    /// Read-only - read from cache, but don't update it
    ReadOnly,

    /// Full caching - read from cache, write to cache
    #[default]
    ReadWrite,
}

impl CacheMode {
    /// Should we attempt to read from cache before making API call?
    pub fn should_read(&self) -> bool {
        matches!(self, CacheMode::ReadOnly | CacheMode::ReadWrite)
    }

    /// Should we write API responses to cache?
    pub fn should_write(&self) -> bool {
        matches!(self, CacheMode::WriteOnly | CacheMode::ReadWrite)
    }
}

/// Rick and Morty API client trait
///
/// The read-only surface the comparison engine needs from the catalog.
/// Implementations can be direct (hitting the API) or decorated
/// with caching.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
///
/// # Example
///
/// ```rust,ignore
/// use rm_client::{RickAndMortyClient, Character};
///
/// async fn first_page(client: &dyn RickAndMortyClient) -> anyhow::Result<Vec<Character>> {
///     Ok(client.fetch_character_page(1).await?.results)
/// }
/// ```
#[async_trait]
pub trait RickAndMortyClient: Send + Sync {
    /// Fetch one page of the character catalog
    ///
    /// # Arguments
    ///
    /// * `page` - 1-indexed page number; the page size is fixed by the server
    ///
    /// # Returns
    ///
    /// The characters of that page together with the pagination info.
    async fn fetch_character_page(&self, page: u32) -> anyhow::Result<Page<Character>>;

    /// Search the character catalog
    ///
    /// Same paging as [`fetch_character_page`](Self::fetch_character_page).
    /// A search without matches yields an empty page, not an error.
    async fn search_characters(
        &self,
        page: u32,
        filters: &CharacterFilters,
    ) -> anyhow::Result<Page<Character>>;

    /// Fetch a single character by id
    async fn fetch_character(&self, id: CharacterId) -> anyhow::Result<Character>;

    /// Fetch a batch of episodes in a single request
    ///
    /// # Arguments
    ///
    /// * `ids` - Episode ids; an empty slice yields an empty result without a request
    ///
    /// # Returns
    ///
    /// Whatever episodes the API returned. Unknown ids are simply absent.
    /// A transport failure fails the whole batch.
    async fn fetch_episodes_by_ids(&self, ids: &[EpisodeId]) -> anyhow::Result<Vec<Episode>>;
}
