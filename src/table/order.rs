//! Row ordering: lexicographic, or important keys pinned first.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::row::{RowId, RowRegistry};

/// Sort mode selected by the pin-important toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    Alphabetical,
    Pinned,
}

/// Rank lookup for the important-key list. The first occurrence of a
/// duplicated key decides its rank.
#[derive(Debug, Clone, Default)]
pub struct Importance {
    ranks: HashMap<String, usize>,
}

impl Importance {
    pub fn new(order: &[String]) -> Self {
        let mut ranks = HashMap::with_capacity(order.len());
        for (i, key) in order.iter().enumerate() {
            ranks.entry(key.clone()).or_insert(i);
        }
        Self { ranks }
    }

    pub fn rank(&self, key: &str) -> Option<usize> {
        self.ranks.get(key).copied()
    }

    pub fn compare(&self, mode: SortMode, a: &str, b: &str) -> Ordering {
        match mode {
            SortMode::Alphabetical => a.cmp(b),
            SortMode::Pinned => match (self.rank(a), self.rank(b)) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => a.cmp(b),
            },
        }
    }
}

/// Reorders row handles in place; rows themselves are untouched.
pub fn sort_rows(order: &mut [RowId], registry: &RowRegistry, mode: SortMode, imp: &Importance) {
    order.sort_by(|&a, &b| imp.compare(mode, &registry.get(a).key, &registry.get(b).key));
}
