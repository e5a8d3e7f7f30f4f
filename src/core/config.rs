//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use crate::core::error::{Result, SimError};

/// Configuration for the simulation systems
///
/// These values have been tuned to produce good emergent behavior.
/// Changing them will affect gameplay pacing and feel.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    // === VILLAGES ===
    /// Population assigned to a newly founded village
    pub starting_population: f32,

    /// Base population growth in people per day
    ///
    /// Scaled by food-per-capita and tools-per-capita, so growth
    /// collapses toward zero when either resource runs short and has
    /// no upper bound when both are abundant.
    pub base_growth_rate: f32,

    /// Base resource production in units per day, before the
    /// population, technology, and environmental factors
    pub base_production: f32,

    /// Resource consumption in units per person per day
    pub base_consumption: f32,

    // === TRADE ROUTES ===
    /// Base trade volume in units per day at zero distance
    ///
    /// Effective volume falls off linearly with route distance and is
    /// scaled by route safety, reaching zero at 1000 world units.
    pub base_trade_volume: f32,

    /// Trust gained per unit of resources successfully traded
    ///
    /// At 0.001, moving 1000 units shifts trust by a full point, so
    /// sustained trade saturates the [-1, 1] trust range in roughly a
    /// season of heavy traffic.
    pub trade_trust_gain: f32,

    // === DIPLOMACY ===
    /// Lifetime of a new diplomatic agreement in days
    pub default_agreement_days: f32,

    // === ENVIRONMENT ===
    /// Length of a season in simulated days
    pub season_length_days: f32,

    /// Days between weather re-rolls
    pub weather_change_days: f32,

    /// Days between environmental event spawn checks
    pub event_check_days: f32,

    /// Probability of an event spawning at each check
    pub event_chance: f64,

    // === TECHNOLOGY ===
    /// Diffusion probability per day between villages at ideal
    /// conditions (full trust, saturated trade, zero distance)
    pub diffusion_base_chance: f64,

    // === MARKET ===
    /// Days a recurring contract runs after each renewal
    pub contract_renewal_days: f32,

    /// Lowest price the market will quote for any resource
    pub price_floor: f32,

    /// Highest price the market will quote for any resource
    pub price_ceiling: f32,

    // === PARALLELIZATION ===
    /// Minimum batch size before using parallel processing
    ///
    /// Below this threshold, thread overhead exceeds benefits. Demand
    /// updates and diffusion scans fall back to the serial path.
    pub parallel_threshold: usize,

    /// Seed for the simulation's random number generators
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            starting_population: 100.0,
            base_growth_rate: 0.1,
            base_production: 10.0,
            base_consumption: 1.0,

            base_trade_volume: 10.0,
            trade_trust_gain: 0.001,

            default_agreement_days: 30.0,

            season_length_days: 90.0,
            weather_change_days: 3.0,
            event_check_days: 30.0,
            event_chance: 0.1,

            diffusion_base_chance: 0.1,

            contract_renewal_days: 30.0,
            price_floor: 1.0,
            price_ceiling: 100.0,

            parallel_threshold: 64,
            seed: 12345,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.price_floor >= self.price_ceiling {
            return Err(SimError::InvalidConfig(format!(
                "price_floor ({}) must be < price_ceiling ({})",
                self.price_floor, self.price_ceiling
            )));
        }

        if self.season_length_days <= 0.0 || self.weather_change_days <= 0.0 {
            return Err(SimError::InvalidConfig(
                "season and weather intervals must be positive".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.event_chance)
            || !(0.0..=1.0).contains(&self.diffusion_base_chance)
        {
            return Err(SimError::InvalidConfig(
                "event_chance and diffusion_base_chance must be in [0, 1]".into(),
            ));
        }

        if self.base_growth_rate < 0.0 || self.base_production < 0.0 {
            return Err(SimError::InvalidConfig(
                "growth and production rates must be non-negative".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_price_band_rejected() {
        let config = SimulationConfig {
            price_floor: 200.0,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
