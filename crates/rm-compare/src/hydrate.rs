//! Episode hydration
//!
//! Resolves the id groups of a [`ComparisonIdSets`] against fetched episode
//! records.

use crate::comparison::ComparisonIdSets;
use rm_client::{Episode, EpisodeId};
use serde::Serialize;
use std::collections::HashMap;

/// Episodes grouped by which of the two characters appears in them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EpisodeComparison {
    pub only_a: Vec<Episode>,
    pub shared: Vec<Episode>,
    pub only_b: Vec<Episode>,
}

impl EpisodeComparison {
    pub fn is_empty(&self) -> bool {
        self.only_a.is_empty() && self.shared.is_empty() && self.only_b.is_empty()
    }

    /// All episodes of the three groups, in group order
    pub fn all_episodes(&self) -> impl Iterator<Item = &Episode> {
        self.only_a.iter().chain(&self.shared).chain(&self.only_b)
    }
}

/// Partition fetched episodes into the groups named by `ids`
///
/// Each group keeps the order of its id list. Ids without a fetched episode
/// are dropped; when `episodes` holds the same id twice the last one wins.
pub fn organize_by_comparison(episodes: &[Episode], ids: &ComparisonIdSets) -> EpisodeComparison {
    let by_id: HashMap<EpisodeId, &Episode> = episodes.iter().map(|e| (e.id, e)).collect();

    let resolve = |group: &[EpisodeId]| -> Vec<Episode> {
        group
            .iter()
            .filter_map(|id| by_id.get(id).map(|e| (*e).clone()))
            .collect()
    };

    EpisodeComparison {
        only_a: resolve(&ids.only_a),
        shared: resolve(&ids.shared),
        only_b: resolve(&ids.only_b),
    }
}
