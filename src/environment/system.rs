//! Environmental model - climate progression, event lifecycle, and
//! per-resource production modifiers
//!
//! Consumers poll `production_modifier` every tick; the modifier table is
//! recomputed at the end of `update` so readers in the same tick always
//! see settled state.

use ahash::AHashMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::core::types::ResourceKind;
use crate::environment::climate::{Climate, WeatherKind};
use crate::environment::events::{EnvironmentalEvent, EnvironmentalEventKind};

/// Climate, weather, and environmental event state machine
#[derive(Debug)]
pub struct EnvironmentalSystem {
    climate: Climate,
    active_events: Vec<EnvironmentalEvent>,
    season_timer: f32,
    weather_timer: f32,
    event_timer: f32,
    modifiers: AHashMap<ResourceKind, f32>,
    rng: ChaCha8Rng,
    config: SimulationConfig,
}

impl EnvironmentalSystem {
    pub fn new(config: &SimulationConfig) -> Self {
        let mut system = Self {
            climate: Climate::default(),
            active_events: Vec::new(),
            season_timer: 0.0,
            weather_timer: 0.0,
            event_timer: 0.0,
            modifiers: AHashMap::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config: config.clone(),
        };
        system.recompute_modifiers();
        system
    }

    /// Advance climate, weather, and event state by `dt` simulated days
    pub fn update(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        self.advance_season(dt);
        self.advance_weather(dt);
        self.advance_events(dt);
        self.spawn_events(dt);

        self.recompute_modifiers();
    }

    /// Multiplicative production factor for a resource kind under the
    /// current climate and active events
    pub fn production_modifier(&self, kind: ResourceKind) -> f32 {
        self.modifiers.get(&kind).copied().unwrap_or(1.0)
    }

    pub fn current_climate(&self) -> &Climate {
        &self.climate
    }

    pub fn active_events(&self) -> &[EnvironmentalEvent] {
        &self.active_events
    }

    /// Force a weather condition, refreshing the modifier table
    pub fn set_weather(&mut self, weather: WeatherKind) {
        self.climate.weather = weather;
        self.recompute_modifiers();
    }

    fn advance_season(&mut self, dt: f32) {
        self.season_timer += dt;
        if self.season_timer >= self.config.season_length_days {
            self.season_timer = 0.0;
            self.climate.season = self.climate.season.next();
            tracing::debug!(season = ?self.climate.season, "season changed");
        }

        let target = self.climate.season.target_temperature();
        let blend = (dt * 0.1).min(1.0);
        self.climate.temperature += (target - self.climate.temperature) * blend;
    }

    fn advance_weather(&mut self, dt: f32) {
        self.weather_timer += dt;
        if self.weather_timer >= self.config.weather_change_days {
            self.weather_timer = 0.0;
            let roll: f32 = self.rng.gen();
            self.climate.weather = self.climate.season.roll_weather(roll);
        }
    }

    fn advance_events(&mut self, dt: f32) {
        self.active_events.retain_mut(|event| {
            event.duration_days -= dt;
            event.duration_days > 0.0
        });
    }

    fn spawn_events(&mut self, dt: f32) {
        self.event_timer += dt;
        if self.event_timer < self.config.event_check_days {
            return;
        }
        self.event_timer = 0.0;

        if self.rng.gen_bool(self.config.event_chance) {
            let kind = EnvironmentalEventKind::ALL
                [self.rng.gen_range(0..EnvironmentalEventKind::ALL.len())];
            let severity = self.rng.gen_range(0.3..=1.0);
            let duration = self.rng.gen_range(3.0..=30.0);
            let event = EnvironmentalEvent::new(kind, severity, duration);
            tracing::info!(?kind, severity, duration, "environmental event");
            self.active_events.push(event);
        }
    }

    fn recompute_modifiers(&mut self) {
        for kind in ResourceKind::ALL {
            let modifier = self.compute_modifier(kind);
            self.modifiers.insert(kind, modifier);
        }
    }

    fn compute_modifier(&self, kind: ResourceKind) -> f32 {
        let mut modifier = 1.0;

        // Temperature extremes ruin harvests; storms halt logging
        match kind {
            ResourceKind::Food => {
                if self.climate.temperature < 5.0 || self.climate.temperature > 35.0 {
                    modifier *= 0.5;
                }
            }
            ResourceKind::Wood => {
                if self.climate.weather == WeatherKind::Stormy {
                    modifier *= 0.7;
                }
            }
            _ => {}
        }

        match self.climate.weather {
            WeatherKind::Stormy => modifier *= 0.7,
            WeatherKind::Drought => {
                if kind == ResourceKind::Food {
                    modifier *= 0.3;
                }
            }
            _ => {}
        }

        for event in &self.active_events {
            if event.affects(kind) {
                modifier *= 1.0 - event.severity * 0.5;
            }
        }

        modifier
    }
}
