//! Per-area AI claim counters
//!
//! Unlike tiles, an area can be claimed for the same purpose by several agents
//! at once, so claims are counted.

use ahash::{AHashMap, AHashSet};

use crate::ai::assignment::Assignment;
use crate::core::types::AreaId;

/// Concurrent claims per purpose over passable areas
///
/// An area has a record only while at least one of its counts is positive,
/// and it is listed under a purpose exactly while that count is positive.
#[derive(Debug, Clone, Default)]
pub struct AiAreasRegistry {
    counts: AHashMap<AreaId, [u32; Assignment::COUNT]>,
    by_assignment: [AHashSet<AreaId>; Assignment::COUNT],
}

impl AiAreasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one claim; `None` is ignored
    pub fn assign(&mut self, area: Option<AreaId>, assignment: Assignment) {
        let Some(area) = area else {
            return;
        };
        let counts = self.counts.entry(area).or_default();
        counts[assignment.index()] += 1;
        self.by_assignment[assignment.index()].insert(area);
        tracing::trace!(%area, ?assignment, count = counts[assignment.index()], "area assigned");
    }

    /// Release one claim; returns false if there was nothing to release
    ///
    /// Releasing more claims than were made leaves the count at zero.
    pub fn unassign(&mut self, area: Option<AreaId>, assignment: Assignment) -> bool {
        let Some(area) = area else {
            return false;
        };
        let Some(counts) = self.counts.get_mut(&area) else {
            return false;
        };

        let slot = &mut counts[assignment.index()];
        if *slot == 0 {
            tracing::warn!(%area, ?assignment, "unbalanced area unassign ignored");
            return false;
        }
        *slot -= 1;

        if *slot == 0 {
            self.by_assignment[assignment.index()].remove(&area);
            if counts.iter().all(|c| *c == 0) {
                self.counts.remove(&area);
            }
        }
        true
    }

    /// Number of live claims on an area for a purpose; 0 if never claimed
    pub fn area_assignments(&self, area: AreaId, assignment: Assignment) -> u32 {
        self.counts
            .get(&area)
            .map_or(0, |counts| counts[assignment.index()])
    }

    /// Areas with at least one claim for a purpose
    pub fn areas_for(&self, assignment: Assignment) -> &AHashSet<AreaId> {
        &self.by_assignment[assignment.index()]
    }

    /// Number of areas with any claim
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Drop every claim; area ids are invalidated when connectivity is recomputed
    pub fn clear(&mut self) {
        self.counts.clear();
        for set in &mut self.by_assignment {
            set.clear();
        }
    }

    pub fn is_consistent(&self) -> bool {
        let listed_ok = Assignment::ALL.iter().all(|a| {
            self.by_assignment[a.index()]
                .iter()
                .all(|area| self.area_assignments(*area, *a) > 0)
        });
        let counted_ok = self.counts.iter().all(|(area, counts)| {
            counts.iter().any(|c| *c > 0)
                && Assignment::ALL.iter().all(|a| {
                    (counts[a.index()] > 0) == self.by_assignment[a.index()].contains(area)
                })
        });
        listed_ok && counted_ok
    }
}
