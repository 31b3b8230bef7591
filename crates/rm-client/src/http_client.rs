//! reqwest-based Rick and Morty API client
//!
//! Direct implementation of the `RickAndMortyClient` trait. This client makes
//! real API calls without any caching, retrying transport failures with an
//! optional exponential backoff.

use crate::client::RickAndMortyClient;
use crate::types::{
    ApiErrorBody, Character, CharacterFilters, CharacterId, Episode, EpisodeId, Page,
};
use async_trait::async_trait;
use log::{debug, warn};
use rm_config::AppConfig;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Errors returned by [`HttpClient`]
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested resource does not exist
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The API answered with a non-success status
    #[error("HTTP {status} from {url}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    /// The response body did not match the expected shape
    #[error("Invalid response from {url}: {source}")]
    InvalidResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Pages are 1-indexed
    #[error("Invalid page number {0}, pages start at 1")]
    InvalidPage(u32),

    /// Connection, timeout or body read failure
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Retry behavior for transport failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Base delay between attempts
    pub delay: Duration,
    /// Double the delay after every failed attempt
    pub backoff: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_millis(1000),
            backoff: true,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the given (0-based) failed attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if self.backoff {
            self.delay.saturating_mul(2u32.saturating_pow(attempt))
        } else {
            self.delay
        }
    }
}

/// Direct API client using reqwest
///
/// This is the base implementation that makes actual API calls.
/// It can be wrapped by `CachedClient` to add caching behavior.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl HttpClient {
    /// Create a client for the given base URL (e.g., "https://rickandmortyapi.com/api")
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            retry,
        })
    }

    /// Create a client from the application configuration
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
            RetryPolicy {
                max_retries: config.max_retries,
                delay: Duration::from_millis(config.retry_delay_ms),
                backoff: config.retry_backoff,
            },
        )
    }

    /// GET `path` and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let body = self.get_with_retry(&url, query).await?;

        serde_json::from_str(&body).map_err(|source| ApiError::InvalidResponse { url, source })
    }

    /// GET with retries on transport errors; HTTP error statuses are never retried
    async fn get_with_retry(&self, url: &str, query: &[(&str, String)]) -> Result<String, ApiError> {
        let mut attempt = 0;

        loop {
            match self.http.get(url).query(query).send().await {
                Ok(response) => return read_body(url, response).await,
                Err(e) if attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        "Request to {} failed (attempt {}): {}, retrying in {:?}",
                        url,
                        attempt + 1,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(ApiError::Transport(e)),
            }
        }
    }
}

/// Turn a response into its body text, mapping error statuses to `ApiError`
async fn read_body(url: &str, response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.text().await?);
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(url.to_string()));
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });

    Err(ApiError::Status {
        status: status.as_u16(),
        url: url.to_string(),
        message,
    })
}

/// Path for a batch of episodes, e.g. `/episode/1,2,3`
pub fn episodes_path(ids: &[EpisodeId]) -> String {
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("/episode/{}", joined)
}

#[async_trait]
impl RickAndMortyClient for HttpClient {
    async fn fetch_character_page(&self, page: u32) -> anyhow::Result<Page<Character>> {
        if page == 0 {
            return Err(ApiError::InvalidPage(page).into());
        }

        debug!("Fetching character page {}", page);
        let page_data: Page<Character> = self
            .get_json("/character", &[("page", page.to_string())])
            .await?;

        debug!(
            "Fetched {} characters (page {} of {})",
            page_data.results.len(),
            page,
            page_data.total_pages()
        );
        Ok(page_data)
    }

    async fn search_characters(
        &self,
        page: u32,
        filters: &CharacterFilters,
    ) -> anyhow::Result<Page<Character>> {
        if page == 0 {
            return Err(ApiError::InvalidPage(page).into());
        }

        let mut query = vec![("page", page.to_string())];
        query.extend(filters.query_params());

        debug!("Searching characters with {:?}", query);
        match self.get_json::<Page<Character>>("/character", &query).await {
            Ok(page_data) => Ok(page_data),
            // The API answers a search without matches with 404
            Err(ApiError::NotFound(_)) => {
                debug!("No characters match {:?}", filters);
                Ok(Page::empty())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch_character(&self, id: CharacterId) -> anyhow::Result<Character> {
        debug!("Fetching character {}", id);
        let character = self.get_json(&format!("/character/{}", id), &[]).await?;
        Ok(character)
    }

    async fn fetch_episodes_by_ids(&self, ids: &[EpisodeId]) -> anyhow::Result<Vec<Episode>> {
        match ids {
            [] => Ok(Vec::new()),
            // A single id returns an object instead of an array
            [id] => match self.get_json::<Episode>(&format!("/episode/{}", id), &[]).await {
                Ok(episode) => Ok(vec![episode]),
                Err(ApiError::NotFound(_)) => {
                    debug!("Episode {} not found, returning empty batch", id);
                    Ok(Vec::new())
                }
                Err(e) => Err(e.into()),
            },
            _ => {
                debug!("Fetching {} episodes in one batch", ids.len());
                let episodes: Vec<Episode> = self.get_json(&episodes_path(ids), &[]).await?;
                Ok(episodes)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpClient {
        HttpClient::new(
            server.uri(),
            Duration::from_secs(5),
            RetryPolicy {
                max_retries: 0,
                delay: Duration::from_millis(1),
                backoff: false,
            },
        )
        .unwrap()
    }

    fn episode_json(id: u32) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": format!("Episode {}", id),
            "air_date": "December 2, 2013",
            "episode": format!("S01E{:02}", id),
            "characters": [],
            "url": format!("https://rickandmortyapi.com/api/episode/{}", id),
            "created": "2017-11-10T12:56:33.798Z"
        })
    }

    fn character_json(id: u32) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": "Rick Sanchez",
            "status": "Alive",
            "species": "Human",
            "type": "",
            "gender": "Male",
            "origin": {"name": "Earth", "url": ""},
            "location": {"name": "Earth", "url": ""},
            "image": "",
            "episode": ["https://rickandmortyapi.com/api/episode/1"],
            "url": format!("https://rickandmortyapi.com/api/character/{}", id),
            "created": "2017-11-04T18:48:46.250Z"
        })
    }

    #[test]
    fn test_retry_delay_with_backoff() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(1), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(4000));
    }

    #[test]
    fn test_retry_delay_without_backoff() {
        let policy = RetryPolicy {
            backoff: false,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.delay_for(3), Duration::from_millis(1000));
    }

    #[test]
    fn test_episodes_path() {
        assert_eq!(episodes_path(&[1, 2, 3]), "/episode/1,2,3");
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash_is_trimmed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(character_json(1)))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(
            format!("{}/", server.uri()),
            Duration::from_secs(5),
            RetryPolicy::default(),
        )
        .unwrap();
        assert_eq!(client.fetch_character(1).await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_fetch_character_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "info": {"count": 826, "pages": 42, "next": null, "prev": null},
                "results": [character_json(21)]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server).fetch_character_page(2).await.unwrap();
        assert_eq!(page.total_pages(), 42);
        assert_eq!(page.results[0].id, 21);
    }

    #[tokio::test]
    async fn test_page_zero_is_rejected_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_character_page(0).await.unwrap_err();
        assert!(err.to_string().contains("pages start at 1"));
    }

    #[tokio::test]
    async fn test_fetch_character_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character/9999"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"error": "Character not found"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_character(9999).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_server_error_carries_api_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character/1"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({"error": "boom"})),
            )
            // Error statuses are never retried
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(
            server.uri(),
            Duration::from_secs(5),
            RetryPolicy {
                max_retries: 3,
                delay: Duration::from_millis(1),
                backoff: false,
            },
        )
        .unwrap();
        let err = client.fetch_character(1).await.unwrap_err();
        match err.downcast_ref::<ApiError>() {
            Some(ApiError::Status {
                status, message, ..
            }) => {
                assert_eq!(*status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_body_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\": \"one\"}"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_character(1).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::InvalidResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_episode_batch_uses_one_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/episode/1,2,4"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([episode_json(1), episode_json(4)])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let episodes = client_for(&server)
            .fetch_episodes_by_ids(&[1, 2, 4])
            .await
            .unwrap();
        let ids: Vec<_> = episodes.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[tokio::test]
    async fn test_fetch_single_episode_is_wrapped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/episode/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(episode_json(7)))
            .expect(1)
            .mount(&server)
            .await;

        let episodes = client_for(&server).fetch_episodes_by_ids(&[7]).await.unwrap();
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].code, "S01E07");
    }

    #[tokio::test]
    async fn test_fetch_single_missing_episode_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/episode/999"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let episodes = client_for(&server)
            .fetch_episodes_by_ids(&[999])
            .await
            .unwrap();
        assert!(episodes.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_no_episodes_skips_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let episodes = client_for(&server).fetch_episodes_by_ids(&[]).await.unwrap();
        assert!(episodes.is_empty());
    }

    #[tokio::test]
    async fn test_timeout_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character/1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(character_json(1))
                    .set_delay(Duration::from_millis(500)),
            )
            .expect(2)
            .mount(&server)
            .await;

        let client = HttpClient::new(
            server.uri(),
            Duration::from_millis(100),
            RetryPolicy {
                max_retries: 1,
                delay: Duration::from_millis(10),
                backoff: true,
            },
        )
        .unwrap();

        let err = client.fetch_character(1).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_search_characters_sends_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character"))
            .and(query_param("page", "1"))
            .and(query_param("name", "rick"))
            .and(query_param("status", "Alive"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "info": {"count": 1, "pages": 1, "next": null, "prev": null},
                "results": [character_json(1)]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let filters = CharacterFilters {
            name: Some("rick".to_string()),
            status: Some(crate::types::CharacterStatus::Alive),
            ..CharacterFilters::default()
        };
        let page = client_for(&server)
            .search_characters(1, &filters)
            .await
            .unwrap();
        assert_eq!(page.info.count, 1);
        assert_eq!(page.results[0].name, "Rick Sanchez");
    }

    #[tokio::test]
    async fn test_search_without_matches_is_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character"))
            .and(query_param("name", "nobody"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"error": "There is nothing here"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let filters = CharacterFilters {
            name: Some("nobody".to_string()),
            ..CharacterFilters::default()
        };
        let page = client_for(&server)
            .search_characters(1, &filters)
            .await
            .unwrap();
        assert_eq!(page.info.count, 0);
        assert_eq!(page.total_pages(), 0);
        assert!(page.results.is_empty());
    }

    #[tokio::test]
    async fn test_search_server_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let filters = CharacterFilters {
            species: Some("Alien".to_string()),
            ..CharacterFilters::default()
        };
        assert!(client_for(&server)
            .search_characters(1, &filters)
            .await
            .is_err());
    }
}
