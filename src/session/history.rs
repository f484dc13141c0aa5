//! Bounded command history with a navigation cursor.

use std::collections::VecDeque;

/// What a navigation step asks the input buffer to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recall<'a> {
    Entry(&'a str),
    /// Cursor moved past the newest entry.
    Empty,
    /// Nothing to navigate; leave the buffer alone.
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    capacity: usize,
    /// `None` while not navigating (positioned after the newest entry).
    cursor: Option<usize>,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity: capacity.max(1),
            cursor: None,
        }
    }

    /// Append a line, evicting the oldest past capacity. Resets navigation.
    pub fn push(&mut self, line: &str) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line.to_string());
        self.cursor = None;
    }

    /// Step back toward the oldest entry, stopping there.
    pub fn previous(&mut self) -> Recall<'_> {
        if self.entries.is_empty() {
            return Recall::Unchanged;
        }
        let index = match self.cursor {
            None => self.entries.len() - 1,
            Some(c) => c.saturating_sub(1),
        };
        self.cursor = Some(index);
        Recall::Entry(&self.entries[index])
    }

    /// Step forward; passing the newest entry snaps to an empty buffer.
    pub fn next(&mut self) -> Recall<'_> {
        match self.cursor {
            None => Recall::Unchanged,
            Some(c) if c + 1 < self.entries.len() => {
                self.cursor = Some(c + 1);
                Recall::Entry(&self.entries[c + 1])
            }
            Some(_) => {
                self.cursor = None;
                Recall::Empty
            }
        }
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = History::new(100);
        for i in 0..105 {
            history.push(&format!("cmd{}", i));
        }
        assert_eq!(history.len(), 100);
        assert_eq!(history.iter().next(), Some("cmd5"));
        assert_eq!(history.iter().last(), Some("cmd104"));
    }

    #[test]
    fn test_previous_stops_at_oldest() {
        let mut history = History::new(10);
        history.push("a");
        history.push("b");
        assert_eq!(history.previous(), Recall::Entry("b"));
        assert_eq!(history.previous(), Recall::Entry("a"));
        assert_eq!(history.previous(), Recall::Entry("a"));
    }

    #[test]
    fn test_next_snaps_to_empty() {
        let mut history = History::new(10);
        history.push("a");
        history.push("b");
        assert_eq!(history.next(), Recall::Unchanged);
        history.previous();
        history.previous();
        assert_eq!(history.next(), Recall::Entry("b"));
        assert_eq!(history.next(), Recall::Empty);
        assert_eq!(history.cursor(), None);
        assert_eq!(history.next(), Recall::Unchanged);
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::new(10);
        assert_eq!(history.previous(), Recall::Unchanged);
        assert!(history.is_empty());
    }
}
