//! Aggregate statistics over characters and episodes

use crate::format::season_digits;
use rm_client::{Character, CharacterStatus, Episode};
use serde::Serialize;
use std::collections::BTreeMap;

/// Label used for episodes whose code carries no season
pub const UNKNOWN_SEASON: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CharacterStats {
    pub total: usize,
    pub alive: usize,
    pub dead: usize,
    pub unknown: usize,
    pub species: BTreeMap<String, usize>,
    pub genders: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EpisodeStats {
    pub total: usize,
    /// Keyed `Season NN` with the digits as they appear in the code
    pub seasons: BTreeMap<String, usize>,
    /// Rounded to the nearest whole character
    pub average_characters_per_episode: usize,
}

pub fn character_stats(characters: &[Character]) -> CharacterStats {
    let mut stats = CharacterStats {
        total: characters.len(),
        ..CharacterStats::default()
    };

    for character in characters {
        match character.status {
            CharacterStatus::Alive => stats.alive += 1,
            CharacterStatus::Dead => stats.dead += 1,
            CharacterStatus::Unknown => stats.unknown += 1,
        }
        *stats.species.entry(character.species.clone()).or_default() += 1;
        *stats.genders.entry(character.gender.to_string()).or_default() += 1;
    }

    stats
}

/// Season label of an episode code
pub fn season_label(code: &str) -> String {
    match season_digits(code) {
        Some(digits) => format!("Season {}", digits),
        None => UNKNOWN_SEASON.to_string(),
    }
}

pub fn episode_stats(episodes: &[Episode]) -> EpisodeStats {
    let mut stats = EpisodeStats {
        total: episodes.len(),
        ..EpisodeStats::default()
    };

    let mut total_characters = 0usize;
    for episode in episodes {
        *stats.seasons.entry(season_label(&episode.code)).or_default() += 1;
        total_characters += episode.character_refs.len();
    }

    if !episodes.is_empty() {
        stats.average_characters_per_episode =
            (total_characters as f64 / episodes.len() as f64).round() as usize;
    }

    stats
}
