//! Cached API client (decorator pattern)
//!
//! Wraps any `RickAndMortyClient` implementation to add caching behavior.
//! The cache mode determines whether to read from cache, write to cache, or both.

use crate::cache::{ApiCache, CachedResponse};
use crate::client::{CacheMode, RickAndMortyClient};
use crate::http_client::episodes_path;
use crate::types::{Character, CharacterFilters, CharacterId, Episode, EpisodeId, Page};
use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Cached API client using the decorator pattern
///
/// Wraps an inner `RickAndMortyClient` and adds caching behavior based on the
/// configured `CacheMode`. This allows transparent caching without the caller
/// needing to be aware of the cache.
///
/// # Example
///
/// ```rust,ignore
/// use rm_client::{ApiCache, CacheMode, CachedClient, HttpClient};
/// use std::sync::{Arc, Mutex};
///
/// let inner = HttpClient::from_config(&config)?;
/// let cache = Arc::new(Mutex::new(ApiCache::default()));
///
/// let client = CachedClient::new(inner, cache, CacheMode::ReadWrite);
/// ```
#[derive(Debug, Clone)]
pub struct CachedClient<C: RickAndMortyClient + Clone> {
    inner: C,
    cache: Arc<Mutex<ApiCache>>,
    mode: CacheMode,
}

impl<C: RickAndMortyClient + Clone> CachedClient<C> {
    /// Create a new cached client
    ///
    /// # Arguments
    ///
    /// * `inner` - The inner client to delegate API calls to
    /// * `cache` - Shared cache instance
    /// * `mode` - Cache behavior mode
    pub fn new(inner: C, cache: Arc<Mutex<ApiCache>>, mode: CacheMode) -> Self {
        Self { inner, cache, mode }
    }

    /// Get the current cache mode
    pub fn cache_mode(&self) -> CacheMode {
        self.mode
    }

    /// Create a new client with a different cache mode
    ///
    /// This is useful for creating a "force refresh" client without
    /// constructing a new inner client.
    pub fn with_mode(&self, mode: CacheMode) -> CachedClient<C> {
        CachedClient {
            inner: self.inner.clone(),
            cache: Arc::clone(&self.cache),
            mode,
        }
    }

    /// Try to decode a cached value for the request
    fn try_cache_get<T: DeserializeOwned>(&self, url: &str, params: &[(&str, &str)]) -> Option<T> {
        if !self.mode.should_read() {
            return None;
        }

        let cached = {
            let mut cache = self.cache.lock().ok()?;
            cache.get("GET", url, params)?
        };

        match serde_json::from_str(&cached.body) {
            Ok(value) => {
                debug!("Cache HIT for {}", url);
                Some(value)
            }
            Err(e) => {
                debug!("Failed to parse cached body for {}: {}", url, e);
                None
            }
        }
    }

    /// Write a value to the cache
    fn cache_set<T: Serialize>(&self, url: &str, params: &[(&str, &str)], value: &T) {
        if !self.mode.should_write() {
            return;
        }

        let body = match serde_json::to_string(value) {
            Ok(body) => body,
            Err(e) => {
                debug!("Failed to serialize response for {}: {}", url, e);
                return;
            }
        };

        let response = CachedResponse {
            body,
            status_code: 200,
        };

        match self.cache.lock() {
            Ok(mut cache) => cache.set("GET", url, params, &response),
            Err(e) => debug!("Failed to write to cache: {}", e),
        }
    }
}

#[async_trait]
impl<C: RickAndMortyClient + Clone> RickAndMortyClient for CachedClient<C> {
    async fn fetch_character_page(&self, page: u32) -> anyhow::Result<Page<Character>> {
        let page_param = page.to_string();
        let params = [("page", page_param.as_str())];

        if let Some(cached) = self.try_cache_get::<Page<Character>>("/character", &params) {
            return Ok(cached);
        }

        debug!("Cache MISS for character page {}", page);
        let fetched = self.inner.fetch_character_page(page).await?;
        self.cache_set("/character", &params, &fetched);

        Ok(fetched)
    }

    async fn search_characters(
        &self,
        page: u32,
        filters: &CharacterFilters,
    ) -> anyhow::Result<Page<Character>> {
        let mut owned = vec![("page", page.to_string())];
        owned.extend(filters.query_params());
        let params: Vec<(&str, &str)> = owned.iter().map(|(k, v)| (*k, v.as_str())).collect();

        if let Some(cached) = self.try_cache_get::<Page<Character>>("/character", &params) {
            return Ok(cached);
        }

        debug!("Cache MISS for character search {:?}", params);
        let fetched = self.inner.search_characters(page, filters).await?;
        self.cache_set("/character", &params, &fetched);

        Ok(fetched)
    }

    async fn fetch_character(&self, id: CharacterId) -> anyhow::Result<Character> {
        let url = format!("/character/{}", id);

        if let Some(cached) = self.try_cache_get::<Character>(&url, &[]) {
            return Ok(cached);
        }

        debug!("Cache MISS for character {}", id);
        let character = self.inner.fetch_character(id).await?;
        self.cache_set(&url, &[], &character);

        Ok(character)
    }

    async fn fetch_episodes_by_ids(&self, ids: &[EpisodeId]) -> anyhow::Result<Vec<Episode>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        // Same id set in any order shares one entry
        let mut key_ids = ids.to_vec();
        key_ids.sort_unstable();
        key_ids.dedup();
        let url = episodes_path(&key_ids);

        if let Some(cached) = self.try_cache_get::<Vec<Episode>>(&url, &[]) {
            debug!("Cache HIT for {} episodes", cached.len());
            return Ok(cached);
        }

        debug!("Cache MISS for episodes {}", url);
        let episodes = self.inner.fetch_episodes_by_ids(ids).await?;
        self.cache_set(&url, &[], &episodes);

        Ok(episodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CharacterGender, CharacterStatus, LocationRef, PageInfo};

    /// Mock client that counts API calls
    #[derive(Clone)]
    struct MockClient {
        episodes: Vec<Episode>,
        call_count: Arc<Mutex<usize>>,
    }

    impl MockClient {
        fn new(episodes: Vec<Episode>) -> Self {
            Self {
                episodes,
                call_count: Arc::new(Mutex::new(0)),
            }
        }

        fn call_count(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    #[async_trait]
    impl RickAndMortyClient for MockClient {
        async fn fetch_character_page(&self, _page: u32) -> anyhow::Result<Page<Character>> {
            *self.call_count.lock().unwrap() += 1;
            Ok(Page {
                info: PageInfo {
                    count: 1,
                    pages: 1,
                    next: None,
                    prev: None,
                },
                results: vec![create_test_character(1)],
            })
        }

        async fn search_characters(
            &self,
            page: u32,
            _filters: &CharacterFilters,
        ) -> anyhow::Result<Page<Character>> {
            self.fetch_character_page(page).await
        }

        async fn fetch_character(&self, id: CharacterId) -> anyhow::Result<Character> {
            *self.call_count.lock().unwrap() += 1;
            Ok(create_test_character(id))
        }

        async fn fetch_episodes_by_ids(&self, ids: &[EpisodeId]) -> anyhow::Result<Vec<Episode>> {
            *self.call_count.lock().unwrap() += 1;
            Ok(self
                .episodes
                .iter()
                .filter(|e| ids.contains(&e.id))
                .cloned()
                .collect())
        }
    }

    fn create_test_character(id: CharacterId) -> Character {
        Character {
            id,
            name: format!("Character {}", id),
            status: CharacterStatus::Alive,
            species: "Human".to_string(),
            kind: String::new(),
            gender: CharacterGender::Male,
            origin: LocationRef::default(),
            location: LocationRef::default(),
            image: String::new(),
            episode_refs: vec![],
            url: String::new(),
            created: String::new(),
        }
    }

    fn create_test_episode(id: EpisodeId) -> Episode {
        Episode {
            id,
            name: format!("Episode {}", id),
            air_date: "December 2, 2013".to_string(),
            code: format!("S01E{:02}", id),
            character_refs: vec![],
            url: String::new(),
            created: String::new(),
        }
    }

    #[tokio::test]
    async fn test_cache_mode_none_skips_cache() {
        let mock = MockClient::new(vec![create_test_episode(1)]);
        let cache = Arc::new(Mutex::new(ApiCache::default()));
        let client = CachedClient::new(mock.clone(), cache, CacheMode::None);

        client.fetch_episodes_by_ids(&[1]).await.unwrap();
        client.fetch_episodes_by_ids(&[1]).await.unwrap();

        assert_eq!(mock.call_count(), 2); // Called again, not cached
    }

    #[tokio::test]
    async fn test_cache_mode_read_write_caches() {
        let mock = MockClient::new(vec![create_test_episode(1), create_test_episode(2)]);
        let cache = Arc::new(Mutex::new(ApiCache::default()));
        let client = CachedClient::new(mock.clone(), cache, CacheMode::ReadWrite);

        let first = client.fetch_episodes_by_ids(&[1, 2]).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(mock.call_count(), 1);

        let second = client.fetch_episodes_by_ids(&[1, 2]).await.unwrap();
        assert_eq!(second, first);
        assert_eq!(mock.call_count(), 1); // Still 1, used cache
    }

    #[tokio::test]
    async fn test_episode_key_ignores_order() {
        let mock = MockClient::new(vec![create_test_episode(1), create_test_episode(2)]);
        let cache = Arc::new(Mutex::new(ApiCache::default()));
        let client = CachedClient::new(mock.clone(), cache, CacheMode::ReadWrite);

        client.fetch_episodes_by_ids(&[2, 1]).await.unwrap();
        client.fetch_episodes_by_ids(&[1, 2]).await.unwrap();

        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_cache_mode_write_only_skips_read() {
        let mock = MockClient::new(vec![]);
        let cache = Arc::new(Mutex::new(ApiCache::default()));
        let client = CachedClient::new(mock.clone(), cache.clone(), CacheMode::WriteOnly);

        client.fetch_character(1).await.unwrap();
        client.fetch_character(1).await.unwrap();
        assert_eq!(mock.call_count(), 2);

        // But cache should have the data (verify with ReadWrite mode)
        let read_client = CachedClient::new(mock.clone(), cache, CacheMode::ReadWrite);
        read_client.fetch_character(1).await.unwrap();
        assert_eq!(mock.call_count(), 2); // Still 2, used cache
    }

    #[tokio::test]
    async fn test_cache_mode_read_only_skips_write() {
        let mock = MockClient::new(vec![]);
        let cache = Arc::new(Mutex::new(ApiCache::default()));

        let read_client = CachedClient::new(mock.clone(), cache.clone(), CacheMode::ReadOnly);
        read_client.fetch_character_page(1).await.unwrap();
        read_client.fetch_character_page(1).await.unwrap();

        assert_eq!(mock.call_count(), 2);
        assert_eq!(cache.lock().unwrap().stats().entries, 0);
    }

    #[tokio::test]
    async fn test_empty_episode_batch_skips_inner() {
        let mock = MockClient::new(vec![]);
        let cache = Arc::new(Mutex::new(ApiCache::default()));
        let client = CachedClient::new(mock.clone(), cache, CacheMode::ReadWrite);

        assert!(client.fetch_episodes_by_ids(&[]).await.unwrap().is_empty());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_with_mode_creates_new_client() {
        let mock = MockClient::new(vec![]);
        let cache = Arc::new(Mutex::new(ApiCache::default()));
        let client = CachedClient::new(mock, cache, CacheMode::ReadWrite);

        let force_refresh = client.with_mode(CacheMode::WriteOnly);
        assert_eq!(force_refresh.cache_mode(), CacheMode::WriteOnly);
        assert_eq!(client.cache_mode(), CacheMode::ReadWrite);
    }

    #[tokio::test]
    async fn test_search_filters_are_part_of_cache_key() {
        let mock = MockClient::new(vec![]);
        let cache = Arc::new(Mutex::new(ApiCache::default()));
        let client = CachedClient::new(mock.clone(), cache, CacheMode::ReadWrite);

        let rick = CharacterFilters {
            name: Some("rick".to_string()),
            ..CharacterFilters::default()
        };
        let morty = CharacterFilters {
            name: Some("morty".to_string()),
            ..CharacterFilters::default()
        };

        client.search_characters(1, &rick).await.unwrap();
        client.search_characters(1, &rick).await.unwrap();
        assert_eq!(mock.call_count(), 1);

        client.search_characters(1, &morty).await.unwrap();
        client.search_characters(2, &rick).await.unwrap();
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_unfiltered_search_shares_page_entry() {
        let mock = MockClient::new(vec![]);
        let cache = Arc::new(Mutex::new(ApiCache::default()));
        let client = CachedClient::new(mock.clone(), cache, CacheMode::ReadWrite);

        client.fetch_character_page(1).await.unwrap();
        client
            .search_characters(1, &CharacterFilters::default())
            .await
            .unwrap();
        assert_eq!(mock.call_count(), 1);
    }
}
