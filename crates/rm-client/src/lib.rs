//! Rick and Morty API client with caching support
//!
//! This crate provides a trait-based client for the public Rick and Morty
//! REST API with optional caching. The design follows the decorator pattern,
//! allowing caching behavior to be composed with the base client.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │           RickAndMortyClient trait               │
//! │  - fetch_character_page()                        │
//! │  - fetch_character()                             │
//! │  - fetch_episodes_by_ids()                       │
//! └─────────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//! ┌─────────────────┐         ┌─────────────────────┐
//! │   HttpClient    │         │    CachedClient     │
//! │ (direct API)    │◄────────│    (decorator)      │
//! └─────────────────┘         └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use rm_client::{ApiCache, CacheMode, CachedClient, HttpClient, RickAndMortyClient};
//! use rm_config::AppConfig;
//! use std::sync::{Arc, Mutex};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::default();
//!
//! // Cached client with full read/write caching
//! let cache = Arc::new(Mutex::new(ApiCache::default()));
//! let client = CachedClient::new(HttpClient::from_config(&config)?, cache, CacheMode::ReadWrite);
//!
//! let page = client.fetch_character_page(1).await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cached_client;
pub mod client;
pub mod http_client;
pub mod types;

pub use cache::{ApiCache, CacheStats, CachedResponse};
pub use cached_client::CachedClient;
pub use client::{CacheMode, RickAndMortyClient};
pub use http_client::{ApiError, HttpClient, RetryPolicy};
pub use types::{
    Character, CharacterFilters, CharacterGender, CharacterId, CharacterStatus, Episode, EpisodeId,
    LocationRef, Page, PageInfo,
};
