//! Persisted-state shape
//!
//! A self-describing JSON snapshot of everything the save system needs:
//! villages with their relations, standing routes and agreements, the
//! technology tree's progress, the climate and active environmental
//! events, and ongoing story arcs. No binary format is mandated.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coordinator::VillageCoordinator;
use crate::core::error::Result;
use crate::environment::climate::Climate;
use crate::environment::events::EnvironmentalEvent;
use crate::story::tracker::StoryArc;
use crate::technology::tree::Technology;
use crate::village::diplomacy::DiplomaticAgreement;
use crate::village::route::TradeRoute;
use crate::village::village::Village;

/// Everything worth writing to disk, in one serializable aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub villages: Vec<Village>,
    pub routes: Vec<TradeRoute>,
    pub agreements: Vec<DiplomaticAgreement>,
    pub technologies: Vec<Technology>,
    pub climate: Climate,
    pub environmental_events: Vec<EnvironmentalEvent>,
    pub story_arcs: Vec<StoryArc>,
}

impl WorldSnapshot {
    /// Capture the current world state
    pub fn capture(coordinator: &VillageCoordinator, story_arcs: &[StoryArc]) -> Self {
        Self {
            villages: coordinator.registry().villages().to_vec(),
            routes: coordinator.routes().to_vec(),
            agreements: coordinator.agreements().to_vec(),
            technologies: coordinator.technology().technologies().to_vec(),
            climate: coordinator.environment().current_climate().clone(),
            environmental_events: coordinator.environment().active_events().to_vec(),
            story_arcs: story_arcs.to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
