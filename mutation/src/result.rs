//! Edit result types.

use std::collections::HashSet;

/// Elements an edit added to and removed from the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOutcome {
    /// Ids present after the edit but not before, sorted.
    pub created: Vec<String>,
    /// Ids present before the edit but not after, sorted.
    pub removed: Vec<String>,
}

impl EditOutcome {
    /// Compare the document id sets taken before and after an edit.
    pub fn diff(before: &HashSet<String>, after: &HashSet<String>) -> Self {
        let mut created: Vec<String> = after.difference(before).cloned().collect();
        let mut removed: Vec<String> = before.difference(after).cloned().collect();
        created.sort();
        removed.sort();
        Self { created, removed }
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.removed.is_empty()
    }

    pub fn was_created(&self, id: &str) -> bool {
        self.created.iter().any(|c| c == id)
    }

    pub fn was_removed(&self, id: &str) -> bool {
        self.removed.iter().any(|r| r == id)
    }
}
