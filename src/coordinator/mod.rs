//! Multi-village coordinator - the apex of the simulation
//!
//! Drives the full cross-village tick: subsystem updates, per-village
//! population and resource dynamics, prosperity and influence scoring,
//! trade-route settlement, diplomacy expiry, and technology diffusion,
//! emitting story events to an external sink along the way.

mod diffusion;
mod trade;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::core::types::{ResourceKind, Vec2, VillageId};
use crate::economy::{ResourceSupply, VillageEconomy};
use crate::environment::climate::WeatherKind;
use crate::environment::system::EnvironmentalSystem;
use crate::market::system::MarketSystem;
use crate::story::event::{StoryEvent, StoryKind, StorySink};
use crate::technology::tree::TechnologyTree;
use crate::village::diplomacy::{AgreementKind, DiplomaticAgreement};
use crate::village::registry::VillageRegistry;
use crate::village::route::TradeRoute;
use crate::village::village::Village;

/// Coordinator-side valuation weights for prosperity scoring.
///
/// Deliberately different from the economic ledger's weights: the
/// village score prizes worked goods over raw stores.
fn settlement_resource_value(kind: ResourceKind) -> f32 {
    match kind {
        ResourceKind::Food => 1.0,
        ResourceKind::Wood => 2.0,
        ResourceKind::Stone => 3.0,
        ResourceKind::Metal => 5.0,
        ResourceKind::Tools => 8.0,
        ResourceKind::Cloth => 1.0,
    }
}

/// Orchestrates every subsystem across all villages, one tick at a time
pub struct VillageCoordinator {
    config: SimulationConfig,
    registry: VillageRegistry,
    routes: Vec<TradeRoute>,
    agreements: Vec<DiplomaticAgreement>,
    environment: EnvironmentalSystem,
    market: MarketSystem,
    technology: TechnologyTree,
    /// Agent-level ledger for the home settlement; optional so the
    /// coordinator stays usable in partial configurations
    economy: Option<VillageEconomy>,
    rng: ChaCha8Rng,
}

impl VillageCoordinator {
    pub fn new(config: SimulationConfig) -> Self {
        let environment = EnvironmentalSystem::new(&config);
        let market = MarketSystem::with_defaults(&config);
        let rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(1));

        Self {
            registry: VillageRegistry::new(),
            routes: Vec::new(),
            agreements: Vec::new(),
            environment,
            market,
            technology: TechnologyTree::with_defaults(),
            economy: None,
            rng,
            config,
        }
    }

    /// Attach an agent-level economy; its stocks feed research throttling
    pub fn with_home_economy(mut self, initial_agents: usize) -> Self {
        self.economy = Some(VillageEconomy::new(
            initial_agents,
            self.config.seed.wrapping_add(2),
        ));
        self
    }

    /// Found a new village with the standard starting stores
    pub fn add_village(&mut self, name: impl Into<String>, position: Vec2) -> VillageId {
        let id = self
            .registry
            .add_village(name, position, self.config.starting_population);
        tracing::debug!(%id, "village founded");
        id
    }

    /// Open a trade route between two existing villages.
    ///
    /// Fails (returns false, no state change) when either id is unknown
    /// or the endpoints are the same village.
    pub fn create_trade_route(
        &mut self,
        source: VillageId,
        target: VillageId,
        traded: Vec<ResourceKind>,
    ) -> bool {
        if source == target {
            return false;
        }
        let (Some(from), Some(to)) = (self.registry.get(source), self.registry.get(target)) else {
            return false;
        };

        let distance = from.position.distance(&to.position);
        let safety = self.route_safety(distance);
        self.routes
            .push(TradeRoute::new(source, target, traded, distance, safety));
        true
    }

    /// Strike a pact between two existing villages with the default
    /// duration. Fails gracefully on unknown ids or a self-pact.
    pub fn create_diplomatic_agreement(
        &mut self,
        first: VillageId,
        second: VillageId,
        kind: AgreementKind,
        terms: Vec<String>,
    ) -> bool {
        if first == second {
            return false;
        }
        if !self.registry.contains(first) || !self.registry.contains(second) {
            return false;
        }

        self.agreements.push(DiplomaticAgreement::new(
            kind,
            first,
            second,
            terms,
            self.config.default_agreement_days,
        ));
        true
    }

    /// Create a one-shot trade contract at the current market price.
    /// Fails (returns false, no state change) when the quote is not
    /// positive.
    pub fn create_trade_contract(
        &mut self,
        seller: VillageId,
        buyer: VillageId,
        kind: ResourceKind,
        quantity: f32,
        duration_days: f32,
    ) -> bool {
        self.market.create_contract(
            &seller.to_string(),
            &buyer.to_string(),
            kind,
            quantity,
            duration_days,
            &self.environment,
        )
    }

    /// Advance the whole simulation by `dt` days. A non-positive `dt`
    /// changes nothing.
    pub fn update(&mut self, dt: f32, sink: &mut dyn StorySink) {
        if dt <= 0.0 {
            return;
        }

        // Subsystems settle first; each batch completes before anything
        // later in the tick reads its output
        self.environment.update(dt);
        self.market.update(dt, &self.environment);
        if let Some(economy) = self.economy.as_mut() {
            economy.simulate_cycle(dt);
        }

        let supply = self.economy.as_ref().map(|e| e as &dyn ResourceSupply);
        let discovered = self.technology.update(dt, supply);
        for name in discovered {
            sink.add_event(breakthrough_event(&name));
        }

        self.update_villages(dt);

        trade::settle_routes(
            &mut self.registry,
            &self.routes,
            self.config.base_trade_volume,
            self.config.trade_trust_gain,
            dt,
        );

        self.age_agreements(dt, sink);

        diffusion::diffuse_technologies(
            &mut self.registry,
            &mut self.rng,
            self.config.diffusion_base_chance as f32,
            self.config.parallel_threshold,
            dt,
            sink,
        );

        self.generate_trade_events(sink);
        self.generate_diplomatic_events(sink);
        self.generate_cultural_events(sink);
    }

    fn update_villages(&mut self, dt: f32) {
        let village_count = self.registry.len() as f32;

        for village in self.registry.iter_mut() {
            grow_population(village, self.config.base_growth_rate, dt);

            let population = village.population.max(0.0);
            let population_factor = (population / 100.0).sqrt();
            let technology_factor = 1.0 + village.technologies.len() as f32 * 0.1;

            // Only stocks the village already holds evolve; new kinds
            // appear through trade, not spontaneously
            let held: Vec<ResourceKind> = village.resources.keys().copied().collect();
            for kind in held {
                let production = self.config.base_production
                    * population_factor
                    * technology_factor
                    * self.environment.production_modifier(kind);
                let consumption = self.config.base_consumption * population;
                village.add_resource(kind, (production - consumption) * dt);
            }

            update_prosperity(village);
            update_influence(village, village_count);
        }
    }

    fn age_agreements(&mut self, dt: f32, sink: &mut dyn StorySink) {
        for agreement in &mut self.agreements {
            if !agreement.active {
                continue;
            }

            agreement.days_remaining -= dt;
            if agreement.days_remaining > 0.0 {
                continue;
            }

            agreement.active = false;
            let first_name = village_name(&self.registry, agreement.first);
            let second_name = village_name(&self.registry, agreement.second);
            tracing::info!(
                kind = ?agreement.kind,
                first = %first_name,
                second = %second_name,
                "diplomatic agreement expired"
            );

            sink.add_event(StoryEvent {
                kind: StoryKind::Political,
                title: "Diplomatic Agreement Expired".into(),
                description: format!(
                    "The agreement between {} and {} has expired",
                    first_name, second_name
                ),
                importance: 0.5,
                tension: 0.3,
                involved: vec![agreement.first.to_string(), agreement.second.to_string()],
                consequences: vec!["Diplomatic relations may change".into()],
                requires_resolution: false,
            });
        }
    }

    fn route_safety(&self, distance: f32) -> f32 {
        let mut safety = 1.0 - distance / 1000.0;
        if self.environment.current_climate().weather == WeatherKind::Stormy {
            safety *= 0.7;
        }
        safety.clamp(0.1, 1.0)
    }

    // Aggregate event hooks: extension points, nothing generated yet

    fn generate_trade_events(&mut self, _sink: &mut dyn StorySink) {}

    fn generate_diplomatic_events(&mut self, _sink: &mut dyn StorySink) {}

    fn generate_cultural_events(&mut self, _sink: &mut dyn StorySink) {}

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn registry(&self) -> &VillageRegistry {
        &self.registry
    }

    pub fn village(&self, id: VillageId) -> Option<&Village> {
        self.registry.get(id)
    }

    pub fn village_mut(&mut self, id: VillageId) -> Option<&mut Village> {
        self.registry.get_mut(id)
    }

    pub fn routes(&self) -> &[TradeRoute] {
        &self.routes
    }

    pub fn agreements(&self) -> &[DiplomaticAgreement] {
        &self.agreements
    }

    pub fn environment(&self) -> &EnvironmentalSystem {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut EnvironmentalSystem {
        &mut self.environment
    }

    pub fn market(&self) -> &MarketSystem {
        &self.market
    }

    pub fn market_mut(&mut self) -> &mut MarketSystem {
        &mut self.market
    }

    pub fn technology(&self) -> &TechnologyTree {
        &self.technology
    }

    pub fn technology_mut(&mut self) -> &mut TechnologyTree {
        &mut self.technology
    }

    pub fn economy(&self) -> Option<&VillageEconomy> {
        self.economy.as_ref()
    }

    pub fn economy_mut(&mut self) -> Option<&mut VillageEconomy> {
        self.economy.as_mut()
    }
}

/// Population advances by a base rate scaled by food and tool abundance
/// per head; scarcity of either collapses growth toward zero. There is
/// no upper clamp.
fn grow_population(village: &mut Village, base_rate: f32, dt: f32) {
    let population = village.population;
    if population < 1.0 {
        return;
    }

    let food_factor = village.resource(ResourceKind::Food) / population;
    let tools_factor = village.resource(ResourceKind::Tools) / population;
    village.population += base_rate * food_factor * tools_factor * dt;
}

/// Prosperity is the mean of a capped resource score, an uncapped
/// population score, and a capped technology score, clamped into [0, 1]
/// as the final step.
fn update_prosperity(village: &mut Village) {
    let total_value: f32 = ResourceKind::ALL
        .iter()
        .map(|&kind| village.resource(kind) * settlement_resource_value(kind))
        .sum();
    let resource_score = (total_value / 10_000.0).min(1.0);
    let population_score = village.population.max(0.0) / 1000.0;
    let technology_score = (village.technologies.len() as f32 * 0.1).min(1.0);

    village.prosperity =
        ((resource_score + population_score + technology_score) / 3.0).clamp(0.0, 1.0);
}

/// Influence averages prosperity with an aggregate-trust factor (which
/// can be negative before clamping) and a cumulative-trade factor.
fn update_influence(village: &mut Village, village_count: f32) {
    let trust_sum: f32 = village.relations.values().map(|r| r.trust).sum();
    let relations_factor = if village_count > 0.0 {
        (trust_sum / village_count).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let trade_sum: f32 = village.relations.values().map(|r| r.trade).sum();
    let trade_factor = (trade_sum / 1000.0).min(1.0);

    village.influence = (village.prosperity + relations_factor + trade_factor) / 3.0;
}

fn village_name(registry: &VillageRegistry, id: VillageId) -> String {
    registry
        .get(id)
        .map(|v| v.name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn breakthrough_event(technology: &str) -> StoryEvent {
    StoryEvent {
        kind: StoryKind::Technological,
        title: "Technology Breakthrough".into(),
        description: format!("New discovery: {}", technology),
        importance: 0.8,
        tension: 0.6,
        involved: Vec::new(),
        consequences: vec!["Improved efficiency".into(), "New opportunities".into()],
        requires_resolution: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::event::EventLog;

    fn coordinator() -> VillageCoordinator {
        VillageCoordinator::new(SimulationConfig::default())
    }

    #[test]
    fn test_route_creation_requires_both_villages() {
        let mut sim = coordinator();
        let a = sim.add_village("A", Vec2::new(0.0, 0.0));
        assert!(!sim.create_trade_route(a, VillageId(99), vec![ResourceKind::Food]));
        assert!(!sim.create_trade_route(a, a, vec![ResourceKind::Food]));
        assert!(sim.routes().is_empty());
    }

    #[test]
    fn test_route_safety_band() {
        let mut sim = coordinator();
        let a = sim.add_village("A", Vec2::new(0.0, 0.0));
        let b = sim.add_village("B", Vec2::new(2000.0, 0.0));
        assert!(sim.create_trade_route(a, b, vec![ResourceKind::Food]));
        let safety = sim.routes()[0].safety;
        assert!((0.1..=1.0).contains(&safety));
    }

    #[test]
    fn test_agreement_creation_requires_both_villages() {
        let mut sim = coordinator();
        let a = sim.add_village("A", Vec2::new(0.0, 0.0));
        assert!(!sim.create_diplomatic_agreement(
            a,
            VillageId(42),
            AgreementKind::Alliance,
            vec![]
        ));
        assert!(sim.agreements().is_empty());
    }

    #[test]
    fn test_prosperity_counts_population_without_cap_but_clamps() {
        let mut sim = coordinator();
        let a = sim.add_village("A", Vec2::new(0.0, 0.0));
        let village = sim.village_mut(a).unwrap();
        village.population = 50_000.0;
        update_prosperity(village);
        assert_eq!(village.prosperity, 1.0);
    }

    #[test]
    fn test_influence_clamps_negative_trust() {
        let mut sim = coordinator();
        let a = sim.add_village("A", Vec2::new(0.0, 0.0));
        let b = sim.add_village("B", Vec2::new(10.0, 0.0));
        let village = sim.village_mut(a).unwrap();
        village.relation_mut(b).trust = -1.0;
        village.prosperity = 0.0;
        update_influence(village, 2.0);
        assert!(village.influence >= 0.0);
    }

    #[test]
    fn test_breakthrough_emits_story_event() {
        let mut sim = coordinator();
        assert!(sim.technology_mut().start_research("Three-Field Rotation"));
        let mut log = EventLog::new();
        for _ in 0..120 {
            sim.update(1.0, &mut log);
        }
        assert!(sim.technology().is_discovered("Three-Field Rotation"));
        let breakthroughs: Vec<_> = log
            .events_of_kind(StoryKind::Technological)
            .filter(|e| e.title == "Technology Breakthrough")
            .collect();
        assert_eq!(breakthroughs.len(), 1);
    }
}
