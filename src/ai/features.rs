//! Per-turn cache of what an AI player's unit roster can do

use crate::core::types::PlayerId;
use crate::data::UnitTrait;
use crate::player::Knowledge;

/// Strategic capability derived from discovered units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    NavalExplorers,
    NavalTransport,
    Settlers,
}

impl Capability {
    pub const ALL: [Capability; 3] = [
        Capability::NavalExplorers,
        Capability::NavalTransport,
        Capability::Settlers,
    ];

    /// Traits a single unit must carry to provide the capability
    pub fn required_traits(self) -> &'static [UnitTrait] {
        match self {
            Capability::NavalExplorers => &[UnitTrait::Naval, UnitTrait::Explorer],
            Capability::NavalTransport => &[UnitTrait::Naval, UnitTrait::Transport],
            Capability::Settlers => &[UnitTrait::Settler],
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Lazily computed capability flags for one player
///
/// Each flag is computed on first read and kept until `update`, even if the
/// player discovers new units in between.
#[derive(Debug, Clone)]
pub struct AiFeatures {
    player: PlayerId,
    cache: [Option<bool>; 3],
    scans: u32,
}

impl AiFeatures {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            cache: [None; 3],
            scans: 0,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Forget all cached flags; call at each turn boundary
    pub fn update(&mut self) {
        self.cache = [None; 3];
    }

    pub fn know_naval_explorers(&mut self, knowledge: &Knowledge) -> bool {
        self.capability(Capability::NavalExplorers, knowledge)
    }

    pub fn know_naval_transport(&mut self, knowledge: &Knowledge) -> bool {
        self.capability(Capability::NavalTransport, knowledge)
    }

    pub fn know_settlers(&mut self, knowledge: &Knowledge) -> bool {
        self.capability(Capability::Settlers, knowledge)
    }

    pub fn capability(&mut self, capability: Capability, knowledge: &Knowledge) -> bool {
        debug_assert_eq!(knowledge.player(), self.player, "knowledge of another player");
        if let Some(known) = self.cache[capability.index()] {
            return known;
        }
        let required = capability.required_traits();
        let known = knowledge.discovered_units().any(|unit| unit.has_traits(required));
        self.scans += 1;
        self.cache[capability.index()] = Some(known);
        known
    }

    /// Whether a flag currently holds a cached value
    pub fn is_cached(&self, capability: Capability) -> bool {
        self.cache[capability.index()].is_some()
    }

    /// Number of roster scans performed so far
    pub fn scan_count(&self) -> u32 {
        self.scans
    }
}
