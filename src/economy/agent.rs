//! Economic agents - one per simulated villager
//!
//! Production and consumption follow fixed per-profession multipliers,
//! further scaled by the agent's skill proficiency.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, Profession, ResourceKind};

/// A held resource with a quality scalar that creeps upward with
/// repeated production
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ResourceStock {
    pub quantity: f32,
    pub quality: f32,
}

/// A single economic actor with a profession and personal stores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicAgent {
    pub id: AgentId,
    pub name: String,
    profession: Profession,
    resources: AHashMap<ResourceKind, ResourceStock>,
    /// 0.0 to 1.0, never decreases except through `reset_skill`
    skill: f32,
}

impl EconomicAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: AgentId::new(),
            name: name.into(),
            profession: Profession::Farmer,
            resources: AHashMap::new(),
            skill: 0.1,
        }
    }

    pub fn with_profession(mut self, profession: Profession) -> Self {
        self.profession = profession;
        self
    }

    pub fn add_resource(&mut self, kind: ResourceKind, quantity: f32) {
        let stock = self.resources.entry(kind).or_default();
        stock.quantity += quantity;
        stock.quality = (stock.quality + 0.01).min(1.0);
    }

    pub fn resource_quantity(&self, kind: ResourceKind) -> f32 {
        self.resources.get(&kind).map(|s| s.quantity).unwrap_or(0.0)
    }

    pub fn resource_quality(&self, kind: ResourceKind) -> f32 {
        self.resources.get(&kind).map(|s| s.quality).unwrap_or(0.0)
    }

    pub fn consume_resource(&mut self, kind: ResourceKind, amount: f32) {
        if let Some(stock) = self.resources.get_mut(&kind) {
            stock.quantity = (stock.quantity - amount).max(0.0);
        }
    }

    pub fn set_profession(&mut self, profession: Profession) {
        self.profession = profession;
    }

    pub fn profession(&self) -> Profession {
        self.profession
    }

    pub fn skill(&self) -> f32 {
        self.skill
    }

    pub fn improve_skill(&mut self, amount: f32) {
        self.skill = (self.skill + amount).min(1.0);
    }

    pub fn reset_skill(&mut self) {
        self.skill = 0.1;
    }

    /// Units produced per day, before the village-level modifiers
    pub fn production_output(&self) -> f32 {
        let base = 1.0;
        let skill_multiplier = 1.0 + self.skill;

        let profession_multiplier = match self.profession {
            Profession::Farmer => 1.5,
            Profession::Blacksmith => 1.2,
            Profession::Carpenter => 1.1,
            Profession::Weaver => 1.0,
            Profession::Miner => 1.3,
            Profession::Merchant => 0.8,
            Profession::Soldier => 0.5,
        };

        base * skill_multiplier * profession_multiplier
    }

    /// Units of essentials needed per day
    pub fn consumption_needs(&self) -> f32 {
        let base = 1.0;

        let profession_multiplier = match self.profession {
            Profession::Farmer => 1.2,
            Profession::Blacksmith => 1.5,
            Profession::Carpenter => 1.3,
            Profession::Weaver => 1.0,
            Profession::Miner => 1.4,
            Profession::Merchant => 1.1,
            Profession::Soldier => 1.6,
        };

        base * profession_multiplier
    }

    /// What this profession yields per unit of production output
    pub fn produced_resources(&self) -> &'static [(ResourceKind, f32)] {
        match self.profession {
            Profession::Farmer => &[(ResourceKind::Food, 1.0)],
            Profession::Blacksmith => &[(ResourceKind::Metal, 0.5), (ResourceKind::Tools, 0.3)],
            Profession::Carpenter => &[(ResourceKind::Wood, 1.0)],
            Profession::Weaver => &[(ResourceKind::Cloth, 1.0)],
            Profession::Miner => &[(ResourceKind::Stone, 0.6), (ResourceKind::Metal, 0.4)],
            Profession::Merchant | Profession::Soldier => &[],
        }
    }
}
