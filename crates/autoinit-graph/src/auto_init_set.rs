//! Insertion-ordered set of auto-init module ids

use autoinit_resolver::ModuleId;
use indexmap::IndexSet;

/// Deduplicates module ids while keeping first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoInitSet {
    ids: IndexSet<ModuleId>,
}

impl AutoInitSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id`; returns `false` if it was already present, in which case its
    /// position is unchanged.
    pub fn insert(&mut self, id: ModuleId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleId> {
        self.ids.iter()
    }

    pub fn into_vec(self) -> Vec<ModuleId> {
        self.ids.into_iter().collect()
    }
}
