//! Episode comparison engine for two Rick and Morty characters
//!
//! Given two selected characters, this crate works out which episodes only
//! the first appears in, which they share and which only the second appears
//! in, and resolves those ids into full episode records.
//!
//! # Pipeline
//!
//! ```text
//! Selection (two slots)
//!        │
//!        ▼
//! compare_character_episodes()   ids via extract_id()
//!        │
//!        ▼
//! ComparisonOrchestrator ──► RickAndMortyClient::fetch_episodes_by_ids()
//!        │                     (one batched request, memoized)
//!        ▼
//! organize_by_comparison() ──► EpisodeComparison
//! ```

pub mod comparison;
pub mod extractor;
pub mod format;
pub mod hydrate;
pub mod orchestrator;
pub mod pagination;
pub mod selection;
pub mod stats;

pub use comparison::{
    all_referenced_ids, compare_character_episodes, compare_episode_ids, ComparisonIdSets,
};
pub use extractor::extract_id;
pub use format::{format_air_date, format_episode_code, season_number};
pub use hydrate::{organize_by_comparison, EpisodeComparison};
pub use orchestrator::{episode_key, ComparisonOrchestrator, ComparisonState, EpisodeKey};
pub use pagination::Pagination;
pub use selection::{
    persist_selection, reduce, MemorySelectionStore, Selection, SelectionAction, SelectionStore,
    Slot,
};
pub use stats::{character_stats, episode_stats, season_label, CharacterStats, EpisodeStats};
