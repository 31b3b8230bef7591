//! Episode set comparison
//!
//! Splits two characters' episode references into three disjoint id lists:
//! episodes only the first character appears in, shared episodes, and
//! episodes only the second character appears in.

use crate::extractor::extract_id;
use rm_client::{Character, EpisodeId};
use serde::Serialize;
use std::collections::HashSet;

/// Episode ids partitioned by which character appears in them
///
/// The three lists are pairwise disjoint and free of duplicates. Ids keep the
/// order of their first occurrence in the source reference list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonIdSets {
    pub only_a: Vec<EpisodeId>,
    pub shared: Vec<EpisodeId>,
    pub only_b: Vec<EpisodeId>,
}

impl ComparisonIdSets {
    /// True when no episode is referenced at all
    pub fn is_empty(&self) -> bool {
        self.only_a.is_empty() && self.shared.is_empty() && self.only_b.is_empty()
    }

    /// Number of distinct episodes across all three groups
    pub fn len(&self) -> usize {
        self.only_a.len() + self.shared.len() + self.only_b.len()
    }
}

/// Extract ids from refs, silently skipping malformed ones
fn extract_ids<S: AsRef<str>>(refs: &[S]) -> Vec<EpisodeId> {
    refs.iter().filter_map(|r| extract_id(r.as_ref())).collect()
}

/// Keep ids matching `keep`, dropping repeats while preserving first-occurrence order
fn dedup_filtered(ids: &[EpisodeId], keep: impl Fn(&EpisodeId) -> bool) -> Vec<EpisodeId> {
    let mut seen = HashSet::new();
    ids.iter()
        .copied()
        .filter(|id| keep(id) && seen.insert(*id))
        .collect()
}

/// Compare two lists of episode resource URLs
///
/// `only_a` and `shared` follow the order of `a_refs`, `only_b` follows the
/// order of `b_refs`. Refs whose id cannot be extracted are ignored.
pub fn compare_episode_ids<A, B>(a_refs: &[A], b_refs: &[B]) -> ComparisonIdSets
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let a_ids = extract_ids(a_refs);
    let b_ids = extract_ids(b_refs);

    let a_set: HashSet<EpisodeId> = a_ids.iter().copied().collect();
    let b_set: HashSet<EpisodeId> = b_ids.iter().copied().collect();

    ComparisonIdSets {
        only_a: dedup_filtered(&a_ids, |id| !b_set.contains(id)),
        shared: dedup_filtered(&a_ids, |id| b_set.contains(id)),
        only_b: dedup_filtered(&b_ids, |id| !a_set.contains(id)),
    }
}

/// Compare the episodes of two optional characters
///
/// An absent character contributes no episodes, so comparing one present
/// character with an absent one puts all of its episodes in its "only" group.
pub fn compare_character_episodes(a: Option<&Character>, b: Option<&Character>) -> ComparisonIdSets {
    compare_episode_ids(episode_refs(a), episode_refs(b))
}

/// Distinct episode ids referenced by either character, in first-occurrence order
///
/// A superset of every group [`compare_character_episodes`] can produce for
/// the same pair, used to fetch all episodes in one request.
pub fn all_referenced_ids(a: Option<&Character>, b: Option<&Character>) -> Vec<EpisodeId> {
    let mut seen = HashSet::new();
    episode_refs(a)
        .iter()
        .chain(episode_refs(b))
        .filter_map(|r| extract_id(r))
        .filter(|id| seen.insert(*id))
        .collect()
}

fn episode_refs(character: Option<&Character>) -> &[String] {
    character.map(|c| c.episode_refs.as_slice()).unwrap_or(&[])
}
