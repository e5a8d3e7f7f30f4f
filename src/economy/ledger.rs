//! Village economy - the per-agent ledger and its daily cycle
//!
//! Each cycle runs produce, consume, redistribute, and the pairwise trade
//! hook in that order. Amounts scale with `dt`; a non-positive `dt` is a
//! no-op.

use ahash::AHashMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::types::{Profession, ResourceKind};
use crate::economy::agent::EconomicAgent;
use crate::economy::negotiation;
use crate::economy::ResourceSupply;

/// Food level below which an agent draws from the communal pool
const COMMUNAL_FOOD_FLOOR: f32 = 0.5;
/// Largest communal handout per agent per cycle
const COMMUNAL_FOOD_RATION: f32 = 0.5;

/// Fixed valuation weights for the ledger's aggregate queries
fn resource_value(kind: ResourceKind) -> f32 {
    match kind {
        ResourceKind::Food => 1.0,
        ResourceKind::Wood => 0.5,
        ResourceKind::Stone => 0.7,
        ResourceKind::Metal => 1.2,
        ResourceKind::Cloth => 0.8,
        ResourceKind::Tools => 1.5,
    }
}

/// The economic ledger for one village's population
#[derive(Debug)]
pub struct VillageEconomy {
    agents: Vec<EconomicAgent>,
    communal: AHashMap<ResourceKind, f32>,
    rng: ChaCha8Rng,
}

impl VillageEconomy {
    /// Create a ledger with `initial_population` agents, professions
    /// assigned at random
    pub fn new(initial_population: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let agents = (0..initial_population)
            .map(|i| {
                let profession = Profession::ALL[rng.gen_range(0..Profession::ALL.len())];
                EconomicAgent::new(format!("Agent_{}", i)).with_profession(profession)
            })
            .collect();

        Self {
            agents,
            communal: AHashMap::new(),
            rng,
        }
    }

    pub fn agents(&self) -> &[EconomicAgent] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [EconomicAgent] {
        &mut self.agents
    }

    pub fn add_agent(&mut self, agent: EconomicAgent) {
        self.agents.push(agent);
    }

    pub fn communal_stock(&self, kind: ResourceKind) -> f32 {
        self.communal.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn add_communal(&mut self, kind: ResourceKind, amount: f32) {
        *self.communal.entry(kind).or_insert(0.0) += amount;
    }

    /// Run one economic cycle covering `dt` simulated days
    pub fn simulate_cycle(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        self.produce(dt);
        self.consume(dt);
        self.redistribute();
        self.exchange();
    }

    fn produce(&mut self, dt: f32) {
        for agent in &mut self.agents {
            let output = agent.production_output() * dt;
            for &(kind, share) in agent.produced_resources() {
                agent.add_resource(kind, output * share);
            }
        }
    }

    fn consume(&mut self, dt: f32) {
        for agent in &mut self.agents {
            let needs = agent.consumption_needs() * dt;
            agent.consume_resource(ResourceKind::Food, needs);
            agent.consume_resource(ResourceKind::Wood, needs * 0.2);
        }
    }

    fn redistribute(&mut self) {
        for agent in &mut self.agents {
            if agent.resource_quantity(ResourceKind::Food) >= COMMUNAL_FOOD_FLOOR {
                continue;
            }

            let available = self.communal.entry(ResourceKind::Food).or_insert(0.0);
            let handout = available.min(COMMUNAL_FOOD_RATION);
            if handout > 0.0 {
                agent.add_resource(ResourceKind::Food, handout);
                *available -= handout;
            }
        }
    }

    // Trade hook: negotiations run but nothing changes hands yet. The
    // call site is the extension point for a fuller exchange model.
    fn exchange(&mut self) {
        for i in 0..self.agents.len() {
            for j in (i + 1)..self.agents.len() {
                let _agreed = negotiation::negotiate(&self.agents[j], &self.agents[i], &mut self.rng);
            }
        }
    }

    /// Total weighted value of every agent's holdings
    pub fn total_resource_value(&self) -> f32 {
        self.agents
            .iter()
            .map(|agent| {
                ResourceKind::ALL
                    .iter()
                    .map(|&kind| agent.resource_quantity(kind) * resource_value(kind))
                    .sum::<f32>()
            })
            .sum()
    }

    pub fn average_wealth_per_capita(&self) -> f32 {
        if self.agents.is_empty() {
            return 0.0;
        }
        self.total_resource_value() / self.agents.len() as f32
    }
}

impl ResourceSupply for VillageEconomy {
    fn resource_quantity(&self, kind: ResourceKind) -> f32 {
        let held: f32 = self
            .agents
            .iter()
            .map(|agent| agent.resource_quantity(kind))
            .sum();
        held + self.communal_stock(kind)
    }
}
