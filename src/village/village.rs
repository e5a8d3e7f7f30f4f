//! Village entity and its per-pair relation records

use std::collections::HashSet;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{ResourceKind, Vec2, VillageId};

/// One side's view of its standing with another village.
///
/// Each village keeps its own copy; the two sides of a pair are updated
/// together on trade but nothing enforces symmetry afterwards, so
/// one-sided grudges are representable.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Relation {
    /// -1.0 to 1.0
    pub trust: f32,
    /// Cumulative trade volume
    pub trade: f32,
    /// Diplomatic standing
    pub diplomacy: f32,
}

impl Relation {
    /// Fold a completed trade into this side of the relationship
    pub fn record_trade(&mut self, amount: f32, trust_gain: f32) {
        self.trust = (self.trust + amount * trust_gain).clamp(-1.0, 1.0);
        self.trade += amount;
    }
}

/// A settlement with population, stores, known technologies, and
/// relations to its neighbors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Village {
    pub id: VillageId,
    pub name: String,
    pub position: Vec2,
    /// Continuous accumulator; whole-person counts truncate via
    /// `population_count`
    pub population: f32,
    pub resources: AHashMap<ResourceKind, f32>,
    pub technologies: HashSet<String>,
    /// 0.0 to 1.0
    pub prosperity: f32,
    /// 0.0 to 1.0
    pub influence: f32,
    pub relations: AHashMap<VillageId, Relation>,
}

impl Village {
    pub fn new(id: VillageId, name: impl Into<String>, position: Vec2, population: f32) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            population,
            resources: AHashMap::new(),
            technologies: HashSet::new(),
            prosperity: 0.5,
            influence: 0.0,
            relations: AHashMap::new(),
        }
    }

    /// Whole-person population for display
    pub fn population_count(&self) -> u32 {
        self.population.max(0.0) as u32
    }

    pub fn resource(&self, kind: ResourceKind) -> f32 {
        self.resources.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn set_resource(&mut self, kind: ResourceKind, quantity: f32) {
        self.resources.insert(kind, quantity.max(0.0));
    }

    pub fn add_resource(&mut self, kind: ResourceKind, delta: f32) {
        let entry = self.resources.entry(kind).or_insert(0.0);
        *entry = (*entry + delta).max(0.0);
    }

    pub fn knows_technology(&self, name: &str) -> bool {
        self.technologies.contains(name)
    }

    pub fn learn_technology(&mut self, name: impl Into<String>) {
        self.technologies.insert(name.into());
    }

    /// This village's view of another, if any contact has been recorded
    pub fn relation(&self, other: VillageId) -> Option<&Relation> {
        self.relations.get(&other)
    }

    /// This village's view of another, created lazily on first contact.
    /// A village never holds a relation entry for itself.
    pub fn relation_mut(&mut self, other: VillageId) -> &mut Relation {
        debug_assert_ne!(other, self.id, "village relation to itself");
        self.relations.entry(other).or_default()
    }
}
