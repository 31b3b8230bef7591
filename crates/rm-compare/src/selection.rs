//! Character selection state
//!
//! The two comparison slots are plain state passed to whoever needs it.
//! Changes go through [`reduce`]; persistence goes through the narrow
//! [`SelectionStore`] contract.

use rm_client::{Character, CharacterId};
use std::collections::HashMap;

/// One of the two selection positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::First, Slot::Second];
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::First => f.pad("first"),
            Slot::Second => f.pad("second"),
        }
    }
}

/// Currently selected characters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub first: Option<Character>,
    pub second: Option<Character>,
}

impl Selection {
    pub fn get(&self, slot: Slot) -> Option<&Character> {
        match slot {
            Slot::First => self.first.as_ref(),
            Slot::Second => self.second.as_ref(),
        }
    }

    pub fn has_both(&self) -> bool {
        self.first.is_some() && self.second.is_some()
    }

    pub fn any_selected(&self) -> bool {
        self.first.is_some() || self.second.is_some()
    }

    /// Character id held by a slot
    pub fn id(&self, slot: Slot) -> Option<CharacterId> {
        self.get(slot).map(|c| c.id)
    }
}

/// Selection changes triggered by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction {
    Select(Slot, Character),
    Clear(Slot),
    ClearAll,
}

/// Apply an action, returning the new selection
pub fn reduce(mut selection: Selection, action: &SelectionAction) -> Selection {
    match action {
        SelectionAction::Select(Slot::First, character) => {
            selection.first = Some(character.clone());
        }
        SelectionAction::Select(Slot::Second, character) => {
            selection.second = Some(character.clone());
        }
        SelectionAction::Clear(Slot::First) => {
            selection.first = None;
        }
        SelectionAction::Clear(Slot::Second) => {
            selection.second = None;
        }
        SelectionAction::ClearAll => {
            selection = Selection::default();
        }
    }
    selection
}

/// Key-value store for the ids of the selected characters
pub trait SelectionStore {
    fn get(&self, slot: Slot) -> Option<CharacterId>;
    fn set(&mut self, slot: Slot, id: Option<CharacterId>);
}

/// In-process [`SelectionStore`]
#[derive(Debug, Clone, Default)]
pub struct MemorySelectionStore {
    ids: HashMap<Slot, CharacterId>,
}

impl SelectionStore for MemorySelectionStore {
    fn get(&self, slot: Slot) -> Option<CharacterId> {
        self.ids.get(&slot).copied()
    }

    fn set(&mut self, slot: Slot, id: Option<CharacterId>) {
        match id {
            Some(id) => {
                self.ids.insert(slot, id);
            }
            None => {
                self.ids.remove(&slot);
            }
        }
    }
}

/// Write the ids of both slots into `store`
pub fn persist_selection(selection: &Selection, store: &mut dyn SelectionStore) {
    for slot in Slot::ALL {
        store.set(slot, selection.id(slot));
    }
}
