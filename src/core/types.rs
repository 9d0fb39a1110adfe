//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Game turn counter
pub type Turn = u32;

/// Unique identifier for players (human or AI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

/// Unique identifier for cities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CityId(pub u32);

impl CityId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Handle of a passable area produced by the connectivity pass
///
/// Ids are only meaningful until the next `precompute_passable_areas` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AreaId(pub u32);

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "area#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_equality() {
        let a = PlayerId(1);
        let b = PlayerId::new(1);
        let c = PlayerId(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_area_id_hash() {
        use std::collections::HashMap;
        let mut map: HashMap<AreaId, &str> = HashMap::new();
        map.insert(AreaId(3), "continent");
        assert_eq!(map.get(&AreaId(3)), Some(&"continent"));
        assert_eq!(map.get(&AreaId(4)), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(PlayerId(7).to_string(), "player#7");
        assert_eq!(AreaId(2).to_string(), "area#2");
    }
}
