//! The set of slots picked for the next booking.

use padelbook_common::models::SlotId;

/// Slot ids chosen on the booking screen.
///
/// Toggling an id that is present removes it, otherwise it is appended, so
/// ids never repeat and toggling twice is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<SlotId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips `id` in or out. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: SlotId) -> bool {
        match self.ids.iter().position(|&selected| selected == id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id);
                true
            }
        }
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[SlotId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl FromIterator<SlotId> for Selection {
    fn from_iter<I: IntoIterator<Item = SlotId>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for id in iter {
            if !selection.contains(id) {
                selection.ids.push(id);
            }
        }
        selection
    }
}
