//! Per-tile AI claims and temporary exclusions

use ahash::{AHashMap, AHashSet};

use crate::ai::assignment::{Assignment, ClaimIndex};
use crate::core::config::TILE_EXCLUSION_DURATION;
use crate::core::types::Turn;
use crate::map::TileCoord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TileExclusion {
    since: Turn,
    duration: Turn,
}

/// Tiles claimed by one player's agents, by purpose
///
/// A tile may be claimed for several purposes at once; each (tile, purpose)
/// pair is held at most once. Excluded tiles are ones an agent gave up on and
/// should not retry for a while.
#[derive(Debug, Clone, Default)]
pub struct AiTilesRegistry {
    claims: ClaimIndex<TileCoord>,
    exclusions: [AHashMap<TileCoord, TileExclusion>; Assignment::COUNT],
}

impl AiTilesRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a tile; `None` is ignored
    pub fn assign(&mut self, tile: Option<TileCoord>, assignment: Assignment) {
        let Some(tile) = tile else {
            return;
        };
        if self.claims.insert(tile, assignment) {
            tracing::trace!(%tile, ?assignment, "tile assigned");
        }
    }

    /// Release a claim; returns false if the tile did not hold it
    pub fn unassign(&mut self, tile: Option<TileCoord>, assignment: Assignment) -> bool {
        let Some(tile) = tile else {
            return false;
        };
        let released = self.claims.remove(tile, assignment);
        if released {
            tracing::trace!(%tile, ?assignment, "tile unassigned");
        }
        released
    }

    pub fn is_assigned(&self, tile: TileCoord, assignment: Assignment) -> bool {
        self.claims.contains(tile, assignment)
    }

    /// All tiles claimed for a purpose
    pub fn tiles_for(&self, assignment: Assignment) -> &AHashSet<TileCoord> {
        self.claims.keys_for(assignment)
    }

    /// Purposes a tile is claimed for; `None` if it is unclaimed
    pub fn assignments_of(&self, tile: TileCoord) -> Option<&AHashSet<Assignment>> {
        self.claims.kinds_of(tile)
    }

    /// Number of claimed tiles
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn is_consistent(&self) -> bool {
        self.claims.is_consistent()
    }

    /// Keep agents away from a tile for the next few turns
    pub fn exclude(&mut self, tile: Option<TileCoord>, assignment: Assignment, turn: Turn) {
        let Some(tile) = tile else {
            return;
        };
        self.exclusions[assignment.index()].insert(
            tile,
            TileExclusion {
                since: turn,
                duration: TILE_EXCLUSION_DURATION,
            },
        );
    }

    pub fn is_excluded(&self, tile: TileCoord, assignment: Assignment) -> bool {
        self.exclusions[assignment.index()].contains_key(&tile)
    }

    /// Expire exclusions that have run their course; call once per turn
    pub fn update(&mut self, turn: Turn) {
        let mut expired = 0;
        for exclusions in &mut self.exclusions {
            let before = exclusions.len();
            exclusions.retain(|_, e| turn < e.since.saturating_add(e.duration));
            expired += before - exclusions.len();
        }
        if expired > 0 {
            tracing::debug!(turn, expired, "tile exclusions expired");
        }
    }
}
