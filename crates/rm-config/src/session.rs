//! Session state persistence
//!
//! Stores the selected characters. A `.rm-episodes.session.toml` in the
//! working directory takes over from `~/.config/rm-episodes/session.toml`
//! once it exists; loads and saves both go to whichever file wins.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::paths;

const SESSION_VERSION: u32 = 1;

/// Session metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMeta {
    pub last_modified: DateTime<Utc>,
    pub version: u32,
}

/// Session data - the actual persisted state
///
/// Only character ids are stored; the characters themselves are
/// fetched again when the session is restored.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SessionData {
    pub first_character_id: Option<u32>,
    pub second_character_id: Option<u32>,
}

/// Complete session with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub meta: SessionMeta,
    #[serde(default)]
    pub session: SessionData,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            meta: SessionMeta {
                last_modified: Utc::now(),
                version: SESSION_VERSION,
            },
            session: SessionData::default(),
        }
    }
}

impl Session {
    /// Load the session from [`paths::session_path`], or defaults when there is none
    pub fn load() -> Self {
        match paths::session_path() {
            Ok(path) if path.exists() => match Self::load_from_path(&path) {
                Ok(session) => {
                    log::info!("Loaded session from {:?}", path);
                    return session;
                }
                Err(e) => log::warn!("Ignoring unreadable session: {:#}", e),
            },
            Ok(_) => {}
            Err(e) => log::warn!("No session location: {:#}", e),
        }

        log::info!("No existing session found, using defaults");
        Self::default()
    }

    /// Load session from specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file: {:?}", path))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse session file: {:?}", path))
    }

    /// Save session to the file it would be loaded from
    pub fn save(&mut self) -> Result<()> {
        let path = paths::session_path()?;
        self.save_to_path(&path)
    }

    /// Save session to specific path
    pub fn save_to_path(&mut self, path: &Path) -> Result<()> {
        self.meta.last_modified = Utc::now();

        let content = toml::to_string_pretty(self).context("Failed to serialize session")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write session file: {:?}", path))?;

        log::info!("Saved session to {:?}", path);
        Ok(())
    }

    pub fn first_character_id(&self) -> Option<u32> {
        self.session.first_character_id
    }

    pub fn second_character_id(&self) -> Option<u32> {
        self.session.second_character_id
    }

    pub fn set_first_character_id(&mut self, id: Option<u32>) {
        self.session.first_character_id = id;
    }

    pub fn set_second_character_id(&mut self, id: Option<u32>) {
        self.session.second_character_id = id;
    }
}
