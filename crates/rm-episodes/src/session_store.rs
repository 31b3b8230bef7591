//! Selection persistence backed by the session file

use anyhow::Result;
use rm_client::CharacterId;
use rm_compare::{SelectionStore, Slot};
use rm_config::Session;

/// [`SelectionStore`] over the persisted [`Session`]
pub struct SessionSelectionStore {
    session: Session,
}

impl SessionSelectionStore {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Load the session with local > global precedence
    pub fn load() -> Self {
        Self::new(Session::load())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn save(&mut self) -> Result<()> {
        self.session.save()
    }
}

impl SelectionStore for SessionSelectionStore {
    fn get(&self, slot: Slot) -> Option<CharacterId> {
        match slot {
            Slot::First => self.session.first_character_id(),
            Slot::Second => self.session.second_character_id(),
        }
    }

    fn set(&mut self, slot: Slot, id: Option<CharacterId>) {
        match slot {
            Slot::First => self.session.set_first_character_id(id),
            Slot::Second => self.session.set_second_character_id(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_map_to_session_fields() {
        let mut store = SessionSelectionStore::new(Session::default());

        store.set(Slot::First, Some(1));
        store.set(Slot::Second, Some(2));

        assert_eq!(store.session().first_character_id(), Some(1));
        assert_eq!(store.session().second_character_id(), Some(2));
        assert_eq!(store.get(Slot::First), Some(1));

        store.set(Slot::First, None);
        assert_eq!(store.get(Slot::First), None);
        assert_eq!(store.get(Slot::Second), Some(2));
    }

    #[test]
    fn test_restored_from_saved_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");

        let mut session = Session::default();
        session.set_second_character_id(Some(183));
        session.save_to_path(&path).unwrap();

        let store = SessionSelectionStore::new(Session::load_from_path(&path).unwrap());
        assert_eq!(store.get(Slot::First), None);
        assert_eq!(store.get(Slot::Second), Some(183));
    }
}
