//! Static game-data catalog: resources, tile improvements and units.
//!
//! Definitions are registered programmatically or loaded from TOML. The
//! catalog assigns ids in registration order and keeps per-category indexes
//! so generators can draw from a category without rescanning everything.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{HexforgeError, Result};
use crate::data::terrain::{Climate, LandForm, SeaLevel};

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId(pub u16);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImprovementId(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u16);

/// Quantity tier of a resource deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Richness {
    VeryPoor,
    Poor,
    Rich,
    VeryRich,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    /// Deposits scattered by the map generator
    Natural,
    Strategic,
    Luxury,
    Food,
    Mineral,
    Organic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitTrait {
    Settler,
    Worker,
    Military,
    Explorer,
    Supply,
    Land,
    Naval,
    Siege,
    Transport,
}

/// Terrain constraints deciding where a resource occurs naturally
///
/// Every `None` field is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceDistribution {
    pub sea_levels: Option<Vec<SeaLevel>>,
    pub land_forms: Option<Vec<LandForm>>,
    pub climates: Option<Vec<Climate>>,
    pub forest: Option<bool>,
}

impl ResourceDistribution {
    pub fn with_sea_levels(mut self, sea_levels: &[SeaLevel]) -> Self {
        self.sea_levels = Some(sea_levels.to_vec());
        self
    }

    pub fn with_land_forms(mut self, land_forms: &[LandForm]) -> Self {
        self.land_forms = Some(land_forms.to_vec());
        self
    }

    pub fn with_climates(mut self, climates: &[Climate]) -> Self {
        self.climates = Some(climates.to_vec());
        self
    }

    pub fn with_forest(mut self, forest: bool) -> Self {
        self.forest = Some(forest);
        self
    }
}

/// How a resource appears on the map and how it is harvested
#[derive(Debug, Clone, PartialEq)]
pub struct DepositDefinition {
    pub distribution: Option<ResourceDistribution>,
    pub richness: Richness,
    /// Improvement a worker must build to harvest the deposit
    pub required_improvement: Option<ImprovementId>,
}

impl DepositDefinition {
    pub fn new(richness: Richness) -> Self {
        Self {
            distribution: None,
            richness,
            required_improvement: None,
        }
    }

    pub fn with_distribution(mut self, distribution: ResourceDistribution) -> Self {
        self.distribution = Some(distribution);
        self
    }

    pub fn with_required_improvement(mut self, improvement: ImprovementId) -> Self {
        self.required_improvement = Some(improvement);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDefinition {
    pub id: ResourceId,
    pub name: String,
    pub categories: Vec<ResourceCategory>,
    pub deposit: Option<DepositDefinition>,
}

impl ResourceDefinition {
    /// New definition; the id is assigned on registration
    pub fn new(name: &str) -> Self {
        Self {
            id: ResourceId(0),
            name: name.to_string(),
            categories: Vec::new(),
            deposit: None,
        }
    }

    pub fn with_category(mut self, category: ResourceCategory) -> Self {
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
        self
    }

    pub fn with_deposit(mut self, deposit: DepositDefinition) -> Self {
        self.deposit = Some(deposit);
        self
    }

    pub fn distribution(&self) -> Option<&ResourceDistribution> {
        self.deposit.as_ref().and_then(|d| d.distribution.as_ref())
    }

    pub fn required_improvement(&self) -> Option<ImprovementId> {
        self.deposit.as_ref().and_then(|d| d.required_improvement)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileImprovementDefinition {
    pub id: ImprovementId,
    pub name: String,
    pub climates: Option<Vec<Climate>>,
    pub land_forms: Option<Vec<LandForm>>,
    /// `Some(true)` requires a river, `Some(false)` forbids one
    pub river: Option<bool>,
    /// `Some(true)` requires a forest, `Some(false)` forbids one
    pub forest: Option<bool>,
    /// Only buildable on a deposit that calls for this improvement
    pub require_resource: bool,
}

impl TileImprovementDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_climates(mut self, climates: &[Climate]) -> Self {
        self.climates = Some(climates.to_vec());
        self
    }

    pub fn with_land_forms(mut self, land_forms: &[LandForm]) -> Self {
        self.land_forms = Some(land_forms.to_vec());
        self
    }

    pub fn with_river(mut self, river: bool) -> Self {
        self.river = Some(river);
        self
    }

    pub fn with_forest(mut self, forest: bool) -> Self {
        self.forest = Some(forest);
        self
    }

    pub fn requiring_resource(mut self) -> Self {
        self.require_resource = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitDefinition {
    pub id: UnitId,
    pub name: String,
    pub traits: Vec<UnitTrait>,
}

impl UnitDefinition {
    pub fn new(name: &str, traits: &[UnitTrait]) -> Self {
        Self {
            id: UnitId(0),
            name: name.to_string(),
            traits: traits.to_vec(),
        }
    }

    /// True if the unit carries every listed trait
    pub fn has_traits(&self, required: &[UnitTrait]) -> bool {
        required.iter().all(|t| self.traits.contains(t))
    }
}

/// Registry of all static definitions
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    resources: Vec<ResourceDefinition>,
    improvements: Vec<TileImprovementDefinition>,
    units: Vec<UnitDefinition>,
    by_category: AHashMap<ResourceCategory, Vec<ResourceId>>,
    by_name: AHashMap<String, ResourceId>,
    improvements_by_name: AHashMap<String, ImprovementId>,
    units_by_name: AHashMap<String, UnitId>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog shipped with the crate (`data/catalog.toml`)
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Register a resource and return its assigned ID
    pub fn add_resource(&mut self, mut def: ResourceDefinition) -> Result<ResourceId> {
        let id = ResourceId(next_id(self.resources.len(), "resource")?);
        def.id = id;
        for category in &def.categories {
            self.by_category.entry(*category).or_default().push(id);
        }
        self.by_name.insert(def.name.clone(), id);
        self.resources.push(def);
        Ok(id)
    }

    /// Register a tile improvement and return its assigned ID
    pub fn add_improvement(&mut self, mut def: TileImprovementDefinition) -> Result<ImprovementId> {
        let id = ImprovementId(next_id(self.improvements.len(), "improvement")?);
        def.id = id;
        self.improvements_by_name.insert(def.name.clone(), id);
        self.improvements.push(def);
        Ok(id)
    }

    /// Register a unit type and return its assigned ID
    pub fn add_unit(&mut self, mut def: UnitDefinition) -> Result<UnitId> {
        let id = UnitId(next_id(self.units.len(), "unit")?);
        def.id = id;
        self.units_by_name.insert(def.name.clone(), id);
        self.units.push(def);
        Ok(id)
    }

    pub fn resource(&self, id: ResourceId) -> Option<&ResourceDefinition> {
        self.resources.get(id.0 as usize)
    }

    pub fn improvement(&self, id: ImprovementId) -> Option<&TileImprovementDefinition> {
        self.improvements.get(id.0 as usize)
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitDefinition> {
        self.units.get(id.0 as usize)
    }

    pub fn resource_by_name(&self, name: &str) -> Option<&ResourceDefinition> {
        self.by_name.get(name).and_then(|id| self.resource(*id))
    }

    pub fn improvement_by_name(&self, name: &str) -> Option<&TileImprovementDefinition> {
        self.improvements_by_name
            .get(name)
            .and_then(|id| self.improvement(*id))
    }

    pub fn unit_by_name(&self, name: &str) -> Option<&UnitDefinition> {
        self.units_by_name.get(name).and_then(|id| self.unit(*id))
    }

    /// Resources of a category, in registration order
    pub fn resources_in(&self, category: ResourceCategory) -> Vec<&ResourceDefinition> {
        self.by_category
            .get(&category)
            .map(|ids| ids.iter().filter_map(|id| self.resource(*id)).collect())
            .unwrap_or_default()
    }

    pub fn resources(&self) -> &[ResourceDefinition] {
        &self.resources
    }

    pub fn improvements(&self) -> &[TileImprovementDefinition] {
        &self.improvements
    }

    pub fn units(&self) -> &[UnitDefinition] {
        &self.units
    }

    /// Load a catalog from a TOML file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a catalog from TOML text
    ///
    /// Improvements are registered first so deposits can refer to them by name.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawCatalog = toml::from_str(content)?;
        let mut catalog = Catalog::new();

        for improvement in raw.improvements {
            if catalog.improvements_by_name.contains_key(&improvement.name) {
                return Err(HexforgeError::CatalogError(format!(
                    "duplicate improvement `{}`",
                    improvement.name
                )));
            }
            catalog.add_improvement(TileImprovementDefinition {
                id: ImprovementId(0),
                name: improvement.name,
                climates: improvement.climates,
                land_forms: improvement.land_forms,
                river: improvement.river,
                forest: improvement.forest,
                require_resource: improvement.require_resource,
            })?;
        }

        for resource in raw.resources {
            if catalog.by_name.contains_key(&resource.name) {
                return Err(HexforgeError::CatalogError(format!(
                    "duplicate resource `{}`",
                    resource.name
                )));
            }
            let deposit = match resource.deposit {
                Some(raw_deposit) => {
                    let required_improvement = match raw_deposit.required_improvement {
                        Some(name) => Some(catalog.improvements_by_name.get(&name).copied().ok_or_else(
                            || {
                                HexforgeError::CatalogError(format!(
                                    "resource `{}` requires unknown improvement `{}`",
                                    resource.name, name
                                ))
                            },
                        )?),
                        None => None,
                    };
                    Some(DepositDefinition {
                        distribution: raw_deposit.distribution,
                        richness: raw_deposit.richness,
                        required_improvement,
                    })
                }
                None => None,
            };
            catalog.add_resource(ResourceDefinition {
                id: ResourceId(0),
                name: resource.name,
                categories: resource.categories,
                deposit,
            })?;
        }

        for unit in raw.units {
            if catalog.units_by_name.contains_key(&unit.name) {
                return Err(HexforgeError::CatalogError(format!(
                    "duplicate unit `{}`",
                    unit.name
                )));
            }
            catalog.add_unit(UnitDefinition::new(&unit.name, &unit.traits))?;
        }

        tracing::debug!(
            resources = catalog.resources.len(),
            improvements = catalog.improvements.len(),
            units = catalog.units.len(),
            "catalog loaded"
        );

        Ok(catalog)
    }
}

/// Id for the next entry of a category holding `len` entries
fn next_id(len: usize, kind: &str) -> Result<u16> {
    u16::try_from(len).map_err(|_| {
        HexforgeError::CatalogError(format!("too many {} definitions (limit {})", kind, u16::MAX as usize + 1))
    })
}

// TOML shapes; names are resolved to ids after parsing

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default, rename = "improvement")]
    improvements: Vec<RawImprovement>,
    #[serde(default, rename = "resource")]
    resources: Vec<RawResource>,
    #[serde(default, rename = "unit")]
    units: Vec<RawUnit>,
}

#[derive(Debug, Deserialize)]
struct RawImprovement {
    name: String,
    #[serde(default)]
    climates: Option<Vec<Climate>>,
    #[serde(default)]
    land_forms: Option<Vec<LandForm>>,
    #[serde(default)]
    river: Option<bool>,
    #[serde(default)]
    forest: Option<bool>,
    #[serde(default)]
    require_resource: bool,
}

#[derive(Debug, Deserialize)]
struct RawResource {
    name: String,
    #[serde(default)]
    categories: Vec<ResourceCategory>,
    #[serde(default)]
    deposit: Option<RawDeposit>,
}

#[derive(Debug, Deserialize)]
struct RawDeposit {
    richness: Richness,
    #[serde(default)]
    required_improvement: Option<String>,
    #[serde(default)]
    distribution: Option<ResourceDistribution>,
}

#[derive(Debug, Deserialize)]
struct RawUnit {
    name: String,
    #[serde(default)]
    traits: Vec<UnitTrait>,
}
