//! Market demand per resource kind

use serde::{Deserialize, Serialize};

use crate::core::types::ResourceKind;
use crate::environment::climate::Season;

/// Demand never leaves this band, whatever the weather does
pub const DEMAND_MIN: f32 = 0.5;
pub const DEMAND_MAX: f32 = 2.0;

/// Demand state for one resource on the market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDemand {
    pub resource: ResourceKind,
    pub base_price: f32,
    /// 0.5 to 2.0, 1.0 is normal
    pub current_demand: f32,
    /// How strongly price responds to demand swings
    pub elasticity: f32,
}

impl MarketDemand {
    pub fn new(resource: ResourceKind, base_price: f32, elasticity: f32) -> Self {
        Self {
            resource,
            base_price,
            current_demand: 1.0,
            elasticity,
        }
    }
}

/// Season-driven demand weighting.
///
/// Winter drives up food and firewood; wood demand slackens the rest of
/// the year.
pub fn seasonal_demand(kind: ResourceKind, season: Season) -> f32 {
    match kind {
        ResourceKind::Food => {
            if season == Season::Winter {
                1.5
            } else {
                1.0
            }
        }
        ResourceKind::Wood => {
            if season == Season::Winter {
                1.8
            } else {
                0.8
            }
        }
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winter_raises_food_and_wood_demand() {
        assert!(seasonal_demand(ResourceKind::Food, Season::Winter) > 1.0);
        assert!(seasonal_demand(ResourceKind::Wood, Season::Winter) > 1.0);
        assert_eq!(seasonal_demand(ResourceKind::Stone, Season::Winter), 1.0);
    }

    #[test]
    fn test_wood_demand_slackens_off_season() {
        assert!(seasonal_demand(ResourceKind::Wood, Season::Summer) < 1.0);
    }
}
