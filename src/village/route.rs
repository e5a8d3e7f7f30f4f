//! Trade routes - standing channels for periodic resource transfer

use serde::{Deserialize, Serialize};

use crate::core::types::{ResourceKind, VillageId};

/// A standing route between two villages.
///
/// Directed by construction but settled bidirectionally in practice:
/// resources flow source to target, goodwill accrues on both sides.
/// Routes reference villages by id so a removed village can never leave
/// a dangling pointer behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRoute {
    pub source: VillageId,
    pub target: VillageId,
    pub traded: Vec<ResourceKind>,
    /// Euclidean distance between the endpoints at creation
    pub distance: f32,
    /// 0.1 to 1.0, derived from distance and weather
    pub safety: f32,
    pub active: bool,
}

impl TradeRoute {
    pub fn new(
        source: VillageId,
        target: VillageId,
        traded: Vec<ResourceKind>,
        distance: f32,
        safety: f32,
    ) -> Self {
        Self {
            source,
            target,
            traded,
            distance,
            safety,
            active: true,
        }
    }
}
