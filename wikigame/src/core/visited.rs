//! Visited-article bookkeeping for cycle detection.

use std::collections::HashMap;

use crate::core::title::normalize_title;

/// Ordered mapping from normalized title to the step it was first visited at.
///
/// Keys are unique and case-folded. Entries are never removed; iteration
/// yields them in insertion order.
#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    steps: HashMap<String, u32>,
    order: Vec<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step at which `title` was first visited, if it was.
    pub fn first_seen(&self, title: &str) -> Option<u32> {
        self.steps.get(&normalize_title(title)).copied()
    }

    /// Record `title` at `step`.
    ///
    /// Returns the earlier step if the title was already present; the
    /// existing entry is left untouched in that case.
    pub fn record(&mut self, title: &str, step: u32) -> Option<u32> {
        let key = normalize_title(title);
        if let Some(&seen) = self.steps.get(&key) {
            return Some(seen);
        }
        self.order.push(key.clone());
        self.steps.insert(key, step);
        None
    }

    /// `(normalized_title, step)` pairs in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.order
            .iter()
            .map(|key| (key.as_str(), self.steps[key.as_str()]))
    }
}
