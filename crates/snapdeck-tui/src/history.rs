//! In-memory navigation history
//!
//! Stands in for the browser history: gesture and API navigation push entries,
//! back/forward walk them and feed the result to the controller as pop-state
//! navigation.

/// Oldest entries are dropped beyond this
pub const MAX_ENTRIES: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<usize>,
    /// Current position (1-indexed, 0 means empty)
    position: usize,
}

impl History {
    pub fn new(initial: usize) -> Self {
        Self {
            entries: vec![initial],
            position: 1,
        }
    }

    /// Record a visit, dropping any forward entries
    pub fn push(&mut self, index: usize) {
        if self.position < self.entries.len() {
            self.entries.truncate(self.position);
        }

        if self.entries.last() != Some(&index) {
            self.entries.push(index);
        }
        if self.entries.len() > MAX_ENTRIES {
            let excess = self.entries.len() - MAX_ENTRIES;
            self.entries.drain(..excess);
        }
        self.position = self.entries.len();
    }

    /// Overwrite the current entry without touching forward entries
    pub fn replace_current(&mut self, index: usize) {
        match self.position.checked_sub(1) {
            Some(pos) => {
                self.entries[pos] = index;
                // Collapse with the previous entry so back never lands on the same section
                if pos > 0 && self.entries[pos - 1] == index {
                    self.entries.remove(pos);
                    self.position -= 1;
                }
            }
            None => {
                self.entries = vec![index];
                self.position = 1;
            }
        }
    }

    pub fn back(&mut self) -> Option<usize> {
        if self.position > 1 {
            self.position -= 1;
            self.entries.get(self.position - 1).copied()
        } else {
            None
        }
    }

    pub fn forward(&mut self) -> Option<usize> {
        if self.position < self.entries.len() {
            self.position += 1;
            self.entries.get(self.position - 1).copied()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_and_forward() {
        let mut history = History::new(0);
        history.push(1);
        history.push(2);

        assert_eq!(history.back(), Some(1));
        assert_eq!(history.back(), Some(0));
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), Some(1));
        assert_eq!(history.forward(), Some(2));
        assert_eq!(history.forward(), None);
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut history = History::new(0);
        history.push(1);
        history.push(2);
        history.back();

        history.push(4);
        assert_eq!(history.forward(), None);
        assert_eq!(history.back(), Some(1));
    }

    #[test]
    fn test_duplicate_push_ignored() {
        let mut history = History::new(3);
        history.push(3);
        assert_eq!(history.back(), None);
    }

    #[test]
    fn test_replace_current() {
        let mut history = History::new(0);
        history.replace_current(3);
        assert_eq!(history.back(), None);

        history.push(5);
        assert_eq!(history.back(), Some(3));
    }

    #[test]
    fn test_replace_collapses_with_previous_entry() {
        let mut history = History::new(1);
        history.push(2);
        history.replace_current(1);
        assert_eq!(history.back(), None);
    }

    #[test]
    fn test_entries_are_capped() {
        let mut history = History::new(0);
        for index in 1..=250 {
            history.push(index);
        }
        assert_eq!(history.entries.len(), MAX_ENTRIES);

        let mut steps = 0;
        while history.back().is_some() {
            steps += 1;
        }
        assert_eq!(steps, MAX_ENTRIES - 1);
        assert_eq!(history.forward(), Some(152));
    }
}
