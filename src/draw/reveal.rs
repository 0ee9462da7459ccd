use std::collections::HashSet;

use crate::model::{Assignment, Id};

/// Which draw results are currently shown on screen.
///
/// Session-local only: it never writes `Assignment::is_revealed` and anyone
/// viewing the results can reveal any entry.
#[derive(Debug, Default, Clone)]
pub struct RevealState {
    revealed: HashSet<Id<Assignment>>,
}

impl RevealState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything; used when another group's results are loaded.
    pub fn reset(&mut self) {
        self.revealed.clear();
    }

    /// Flips one entry. Returns whether it is now revealed.
    pub fn toggle_reveal(&mut self, id: Id<Assignment>) -> bool {
        if self.revealed.remove(&id) {
            false
        } else {
            self.revealed.insert(id);
            true
        }
    }

    pub fn reveal_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = Id<Assignment>>,
    {
        self.revealed = ids.into_iter().collect();
    }

    pub fn hide_all(&mut self) {
        self.revealed.clear();
    }

    pub fn is_revealed(&self, id: Id<Assignment>) -> bool {
        self.revealed.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }
}
