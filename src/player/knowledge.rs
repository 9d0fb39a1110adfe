//! What a player has discovered so far

use ahash::{AHashMap, AHashSet};

use crate::core::error::{HexforgeError, Result};
use crate::core::types::PlayerId;
use crate::data::{Catalog, ImprovementId, UnitDefinition, UnitId};

/// Discovered unit types and tile improvements of one player
#[derive(Debug, Clone)]
pub struct Knowledge {
    player: PlayerId,
    units: AHashMap<UnitId, UnitDefinition>,
    improvements: AHashSet<ImprovementId>,
}

impl Knowledge {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            units: AHashMap::new(),
            improvements: AHashSet::new(),
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Record a unit type; returns false if it was already known
    pub fn discover_unit(&mut self, unit: &UnitDefinition) -> bool {
        if self.units.contains_key(&unit.id) {
            return false;
        }
        tracing::trace!(player = %self.player, unit = %unit.name, "unit discovered");
        self.units.insert(unit.id, unit.clone());
        true
    }

    /// Look a unit up in the catalog and record it
    pub fn discover_unit_named(&mut self, catalog: &Catalog, name: &str) -> Result<bool> {
        let unit = catalog
            .unit_by_name(name)
            .ok_or_else(|| HexforgeError::UnknownEntity(format!("unit `{name}`")))?;
        Ok(self.discover_unit(unit))
    }

    pub fn discover_improvement(&mut self, improvement: ImprovementId) -> bool {
        self.improvements.insert(improvement)
    }

    pub fn has_discovered_unit(&self, unit: UnitId) -> bool {
        self.units.contains_key(&unit)
    }

    pub fn has_discovered_improvement(&self, improvement: ImprovementId) -> bool {
        self.improvements.contains(&improvement)
    }

    /// Discovered unit definitions, in no particular order
    pub fn discovered_units(&self) -> impl Iterator<Item = &UnitDefinition> {
        self.units.values()
    }
}
