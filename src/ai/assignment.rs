//! Assignment purposes and the bidirectional claim index behind the registries

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Why an agent claims a tile or an area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Assignment {
    Exploration,
    Transport,
    Settling,
    Working,
}

impl Assignment {
    pub const COUNT: usize = 4;

    pub const ALL: [Assignment; Assignment::COUNT] = [
        Assignment::Exploration,
        Assignment::Transport,
        Assignment::Settling,
        Assignment::Working,
    ];

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Many-to-many relation between keys and assignments
///
/// The forward side lists the keys claimed for each assignment, the reverse
/// side the assignments held on each key. Both sides change together, and a
/// key is present on the reverse side only while it holds a claim.
#[derive(Debug, Clone)]
pub struct ClaimIndex<K> {
    by_assignment: [AHashSet<K>; Assignment::COUNT],
    by_key: AHashMap<K, AHashSet<Assignment>>,
}

impl<K> Default for ClaimIndex<K> {
    fn default() -> Self {
        Self {
            by_assignment: Default::default(),
            by_key: AHashMap::default(),
        }
    }
}

impl<K: Copy + Eq + Hash> ClaimIndex<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a claim; returns false if it already existed
    pub fn insert(&mut self, key: K, assignment: Assignment) -> bool {
        self.by_assignment[assignment.index()].insert(key);
        self.by_key.entry(key).or_default().insert(assignment)
    }

    /// Release a claim; returns false if there was none
    pub fn remove(&mut self, key: K, assignment: Assignment) -> bool {
        let Some(kinds) = self.by_key.get_mut(&key) else {
            return false;
        };
        if !kinds.remove(&assignment) {
            return false;
        }
        if kinds.is_empty() {
            self.by_key.remove(&key);
        }
        self.by_assignment[assignment.index()].remove(&key);
        true
    }

    pub fn contains(&self, key: K, assignment: Assignment) -> bool {
        self.by_assignment[assignment.index()].contains(&key)
    }

    /// Keys currently claimed for an assignment
    pub fn keys_for(&self, assignment: Assignment) -> &AHashSet<K> {
        &self.by_assignment[assignment.index()]
    }

    /// Assignments held on a key; `None` when the key holds no claim
    pub fn kinds_of(&self, key: K) -> Option<&AHashSet<Assignment>> {
        self.by_key.get(&key)
    }

    /// Number of claimed keys
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn clear(&mut self) {
        for set in &mut self.by_assignment {
            set.clear();
        }
        self.by_key.clear();
    }

    /// Forward and reverse sides describe the same relation
    pub fn is_consistent(&self) -> bool {
        let forward_total: usize = self.by_assignment.iter().map(|s| s.len()).sum();
        let reverse_total: usize = self.by_key.values().map(|s| s.len()).sum();
        forward_total == reverse_total
            && self.by_key.values().all(|kinds| !kinds.is_empty())
            && self.by_key.iter().all(|(key, kinds)| {
                kinds
                    .iter()
                    .all(|a| self.by_assignment[a.index()].contains(key))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_indices_are_dense() {
        for (i, assignment) in Assignment::ALL.iter().enumerate() {
            assert_eq!(assignment.index(), i);
        }
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut index = ClaimIndex::new();
        assert!(index.insert(7u32, Assignment::Working));
        assert!(!index.insert(7u32, Assignment::Working));
        assert_eq!(index.len(), 1);
        assert_eq!(index.kinds_of(7).unwrap().len(), 1);
        assert!(index.is_consistent());
    }

    #[test]
    fn test_remove_prunes_both_sides() {
        let mut index = ClaimIndex::new();
        index.insert(1u32, Assignment::Exploration);
        index.insert(1u32, Assignment::Transport);

        assert!(index.remove(1, Assignment::Exploration));
        assert!(!index.contains(1, Assignment::Exploration));
        assert!(index.contains(1, Assignment::Transport));
        assert!(index.is_consistent());

        assert!(index.remove(1, Assignment::Transport));
        assert!(index.kinds_of(1).is_none());
        assert!(index.keys_for(Assignment::Transport).is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn test_remove_missing_claim() {
        let mut index: ClaimIndex<u32> = ClaimIndex::new();
        assert!(!index.remove(3, Assignment::Settling));
        index.insert(3, Assignment::Working);
        assert!(!index.remove(3, Assignment::Settling));
        assert!(index.contains(3, Assignment::Working));
    }
}
