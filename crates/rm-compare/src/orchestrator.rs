//! Comparison orchestration
//!
//! Turns a pair of selected characters into an [`EpisodeComparison`]:
//! union of referenced ids → one batched episode fetch → comparison ids →
//! hydration.
//!
//! Every call to [`ComparisonOrchestrator::compare`] starts a new request
//! generation. A response is only applied while its generation is still the
//! latest one, so a slow response for an old pair never overwrites the state
//! of a newer pair. Fetched episodes are memoized under the sorted union id
//! set; a new key replaces the previous entry.

use crate::comparison::{all_referenced_ids, compare_character_episodes};
use crate::hydrate::{organize_by_comparison, EpisodeComparison};
use crate::selection::Selection;
use log::{debug, warn};
use rm_client::{Character, Episode, EpisodeId, RickAndMortyClient};
use std::sync::{Arc, Mutex, MutexGuard};

/// Derived comparison state exposed to the front-end
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ComparisonState {
    /// Fewer than two characters selected
    #[default]
    Idle,
    /// Episode fetch in flight
    Loading,
    /// Comparison available
    Ready(EpisodeComparison),
    /// Episode fetch failed; no partial data is kept
    Failed(String),
}

impl ComparisonState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ComparisonState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ComparisonState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// The comparison, or an empty one unless the state is `Ready`
    pub fn comparison(&self) -> EpisodeComparison {
        match self {
            ComparisonState::Ready(comparison) => comparison.clone(),
            _ => EpisodeComparison::default(),
        }
    }
}

/// Sorted, deduplicated union of episode ids
pub type EpisodeKey = Vec<EpisodeId>;

/// Memo key for a pair of characters
pub fn episode_key(a: &Character, b: &Character) -> EpisodeKey {
    let mut key = all_referenced_ids(Some(a), Some(b));
    key.sort_unstable();
    key
}

#[derive(Debug)]
struct Memo {
    key: EpisodeKey,
    episodes: Arc<Vec<Episode>>,
}

#[derive(Debug, Default)]
struct Inner {
    generation: u64,
    state: ComparisonState,
    memo: Option<Memo>,
}

/// Computes episode comparisons for the selected character pair
pub struct ComparisonOrchestrator {
    client: Arc<dyn RickAndMortyClient>,
    inner: Mutex<Inner>,
}

impl ComparisonOrchestrator {
    pub fn new(client: Arc<dyn RickAndMortyClient>) -> Self {
        Self {
            client,
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // State stays consistent on panic, every write is a single assignment
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current state
    pub fn state(&self) -> ComparisonState {
        self.lock().state.clone()
    }

    /// Drop memoized episodes so the next comparison fetches again
    pub fn clear_memo(&self) {
        self.lock().memo = None;
    }

    /// Start a new generation, superseding any request in flight
    fn begin(&self) -> u64 {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.generation
    }

    /// Apply `state` if `generation` is still the latest
    fn commit(&self, generation: u64, state: ComparisonState) -> bool {
        let mut inner = self.lock();
        if inner.generation != generation {
            return false;
        }
        inner.state = state;
        true
    }

    fn memoized(&self, key: &EpisodeKey) -> Option<Arc<Vec<Episode>>> {
        let inner = self.lock();
        inner
            .memo
            .as_ref()
            .filter(|memo| &memo.key == key)
            .map(|memo| Arc::clone(&memo.episodes))
    }

    /// Compare the episodes of the selected slots
    pub async fn compare_selection(&self, selection: &Selection) -> ComparisonState {
        self.compare(selection.first.as_ref(), selection.second.as_ref())
            .await
    }

    /// Compare the episodes of two characters
    ///
    /// Returns the orchestrator state after this call. For a call that was
    /// superseded by a newer one while its fetch was in flight, that is the
    /// state left by the newer call, and this call's response is discarded.
    pub async fn compare(&self, a: Option<&Character>, b: Option<&Character>) -> ComparisonState {
        let generation = self.begin();

        let (Some(a), Some(b)) = (a, b) else {
            debug!("Comparison idle, both slots must be selected");
            self.commit(generation, ComparisonState::Idle);
            return self.state();
        };

        let key = episode_key(a, b);

        let episodes = match self.memoized(&key) {
            Some(episodes) => {
                debug!("Memo HIT for {} episodes", key.len());
                episodes
            }
            None => {
                debug!(
                    "Memo MISS, fetching {} episodes for characters {} and {}",
                    key.len(),
                    a.id,
                    b.id
                );
                self.commit(generation, ComparisonState::Loading);

                let result = self.client.fetch_episodes_by_ids(&key).await;

                let mut inner = self.lock();
                if inner.generation != generation {
                    debug!(
                        "Discarding stale episode response (generation {}, latest {})",
                        generation, inner.generation
                    );
                    return inner.state.clone();
                }

                match result {
                    Ok(episodes) => {
                        let episodes = Arc::new(episodes);
                        inner.memo = Some(Memo {
                            key,
                            episodes: Arc::clone(&episodes),
                        });
                        episodes
                    }
                    Err(e) => {
                        warn!("Episode fetch failed: {:#}", e);
                        inner.state = ComparisonState::Failed(format!("{:#}", e));
                        return inner.state.clone();
                    }
                }
            }
        };

        let ids = compare_character_episodes(Some(a), Some(b));
        let comparison = organize_by_comparison(&episodes, &ids);

        self.commit(generation, ComparisonState::Ready(comparison));
        self.state()
    }
}
