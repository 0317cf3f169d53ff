//! The single "current" entry.
//!
//! Selection is one optional handle rather than a flag on every entry, so at
//! most one entry can ever be selected.

use crate::ids::EntryId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    current: Option<EntryId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Previous,
    Next,
}

impl SelectionState {
    pub fn current(&self) -> Option<&EntryId> {
        self.current.as_ref()
    }

    pub fn is_selected(&self, id: &EntryId) -> bool {
        self.current.as_ref() == Some(id)
    }

    /// Makes `id` the only selected entry. Returns `true` if it changed.
    pub fn select(&mut self, id: EntryId) -> bool {
        if self.is_selected(&id) {
            return false;
        }
        self.current = Some(id);
        true
    }

    /// Drops the selection if it points at `id`. Returns `true` if it did.
    pub fn forget(&mut self, id: &EntryId) -> bool {
        if self.is_selected(id) {
            self.current = None;
            return true;
        }
        false
    }
}

/// Index of the entry before or after `current` in `order`, wrapping at
/// both ends. `None` if `current` is not in `order`.
pub fn cycle_index(order: &[EntryId], current: &EntryId, direction: CycleDirection) -> Option<usize> {
    let pos = order.iter().position(|id| id == current)?;
    let len = order.len();
    let target = match direction {
        CycleDirection::Previous => (pos + len - 1) % len,
        CycleDirection::Next => (pos + 1) % len,
    };
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<EntryId> {
        (0..n).map(|i| EntryId::from(format!("e{i}"))).collect()
    }

    #[test]
    fn select_is_exclusive() {
        let order = ids(2);
        let mut state = SelectionState::default();
        assert!(state.select(order[0].clone()));
        assert!(state.select(order[1].clone()));
        assert!(!state.is_selected(&order[0]));
        assert!(state.is_selected(&order[1]));
        assert!(!state.select(order[1].clone()));
    }

    #[test]
    fn forget_only_clears_matching_handle() {
        let order = ids(2);
        let mut state = SelectionState::default();
        state.select(order[0].clone());
        assert!(!state.forget(&order[1]));
        assert!(state.forget(&order[0]));
        assert_eq!(state.current(), None);
    }

    #[test]
    fn cycle_wraps_both_ways() {
        let order = ids(3);
        assert_eq!(cycle_index(&order, &order[2], CycleDirection::Next), Some(0));
        assert_eq!(cycle_index(&order, &order[0], CycleDirection::Previous), Some(2));
        assert_eq!(cycle_index(&order, &order[1], CycleDirection::Next), Some(2));
        assert_eq!(cycle_index(&order, &order[1], CycleDirection::Previous), Some(0));
    }

    #[test]
    fn cycle_single_entry_stays_put() {
        let order = ids(1);
        assert_eq!(cycle_index(&order, &order[0], CycleDirection::Next), Some(0));
    }

    #[test]
    fn cycle_unknown_current_is_none() {
        let order = ids(2);
        let stranger = EntryId::from("stranger");
        assert_eq!(cycle_index(&order, &stranger, CycleDirection::Next), None);
    }
}
