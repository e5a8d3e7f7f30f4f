//! Market system - dynamic pricing from supply and demand
//!
//! Demand updates are batch work: above the parallel threshold they run
//! on the rayon pool, and the parallel iterator completes before the
//! price computation that reads the demand table begins.

use ahash::AHashMap;
use rayon::prelude::*;

use crate::core::config::SimulationConfig;
use crate::core::types::ResourceKind;
use crate::environment::system::EnvironmentalSystem;
use crate::market::contract::TradeContract;
use crate::market::demand::{seasonal_demand, MarketDemand, DEMAND_MAX, DEMAND_MIN};

/// Per-resource demand table and the active contract book
#[derive(Debug)]
pub struct MarketSystem {
    demands: AHashMap<ResourceKind, MarketDemand>,
    active_contracts: Vec<TradeContract>,
    config: SimulationConfig,
}

impl MarketSystem {
    /// An empty market with no demand entries; prices quote as zero
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            demands: AHashMap::new(),
            active_contracts: Vec::new(),
            config: config.clone(),
        }
    }

    /// A market stocked with the standard resource entries
    pub fn with_defaults(config: &SimulationConfig) -> Self {
        let mut market = Self::new(config);
        market.add_demand(MarketDemand::new(ResourceKind::Food, 10.0, 0.5));
        market.add_demand(MarketDemand::new(ResourceKind::Wood, 5.0, 0.3));
        market.add_demand(MarketDemand::new(ResourceKind::Stone, 8.0, 0.2));
        market.add_demand(MarketDemand::new(ResourceKind::Metal, 20.0, 0.4));
        market.add_demand(MarketDemand::new(ResourceKind::Cloth, 12.0, 0.3));
        market.add_demand(MarketDemand::new(ResourceKind::Tools, 25.0, 0.35));
        market
    }

    pub fn add_demand(&mut self, demand: MarketDemand) {
        self.demands.insert(demand.resource, demand);
    }

    pub fn demands(&self) -> impl Iterator<Item = &MarketDemand> {
        self.demands.values()
    }

    pub fn demand(&self, kind: ResourceKind) -> Option<&MarketDemand> {
        self.demands.get(&kind)
    }

    pub fn active_contracts(&self) -> &[TradeContract] {
        &self.active_contracts
    }

    pub fn add_contract(&mut self, contract: TradeContract) {
        self.active_contracts.push(contract);
    }

    /// Current unit price: base price scaled by demand and divided by the
    /// environmental production modifier, so scarcity-inducing weather
    /// raises prices. Zero for a resource the market does not list.
    pub fn current_price(&self, kind: ResourceKind, env: &EnvironmentalSystem) -> f32 {
        match self.demands.get(&kind) {
            Some(demand) => {
                demand.base_price * demand.current_demand / env.production_modifier(kind)
            }
            None => 0.0,
        }
    }

    /// Create a one-shot contract at the current market price.
    ///
    /// Fails (returns false, no state change) when the quoted price is
    /// not positive.
    pub fn create_contract(
        &mut self,
        seller_id: &str,
        buyer_id: &str,
        kind: ResourceKind,
        quantity: f32,
        duration_days: f32,
        env: &EnvironmentalSystem,
    ) -> bool {
        let price = self.current_price(kind, env);
        if price <= 0.0 {
            return false;
        }

        self.active_contracts.push(TradeContract::new(
            kind, quantity, price, seller_id, buyer_id, duration_days,
        ));
        true
    }

    /// Advance demand, contract aging, and prices by `dt` days
    pub fn update(&mut self, dt: f32, env: &EnvironmentalSystem) {
        if dt <= 0.0 {
            return;
        }

        self.update_demands(env);
        self.process_contracts(dt, env);
        self.generate_trade_opportunities();
        self.update_prices(env);
    }

    // Extension point: react to demand extremes with buy/sell offers.
    // Nothing is generated yet; the call site keeps the hook alive.
    fn generate_trade_opportunities(&mut self) {}

    fn update_demands(&mut self, env: &EnvironmentalSystem) {
        let season = env.current_climate().season;
        let entries: Vec<&mut MarketDemand> = self.demands.values_mut().collect();

        let apply = |demand: &mut MarketDemand| {
            let env_modifier = env.production_modifier(demand.resource);
            let seasonal = seasonal_demand(demand.resource, season);
            demand.current_demand =
                (demand.current_demand * env_modifier * seasonal).clamp(DEMAND_MIN, DEMAND_MAX);
        };

        if entries.len() >= self.config.parallel_threshold {
            // The parallel iterator completes before this returns, so
            // price updates below never read half-written demand state
            entries.into_par_iter().for_each(apply);
        } else {
            for demand in entries {
                apply(demand);
            }
        }
    }

    fn process_contracts(&mut self, dt: f32, env: &EnvironmentalSystem) {
        // Renewal prices come from the table as it stands this tick
        let mut renewal_prices = AHashMap::new();
        for &kind in self.demands.keys() {
            renewal_prices.insert(kind, self.current_price(kind, env));
        }
        let renewal_days = self.config.contract_renewal_days;

        self.active_contracts.retain_mut(|contract| {
            contract.duration_days -= dt;
            if contract.duration_days > 0.0 {
                return true;
            }
            if contract.is_recurring {
                contract.price_per_unit = renewal_prices
                    .get(&contract.resource)
                    .copied()
                    .unwrap_or(contract.price_per_unit);
                contract.duration_days = renewal_days;
                true
            } else {
                false
            }
        });
    }

    fn update_prices(&mut self, env: &EnvironmentalSystem) {
        let mut contract_supply: AHashMap<ResourceKind, f32> = AHashMap::new();
        for contract in &self.active_contracts {
            *contract_supply.entry(contract.resource).or_insert(0.0) += contract.quantity;
        }

        for demand in self.demands.values_mut() {
            let env_modifier = env.production_modifier(demand.resource);

            demand.base_price *= 1.0 + (demand.current_demand - 1.0) * demand.elasticity;
            demand.base_price /= env_modifier;

            let base_demand = demand.current_demand * 100.0;
            let supply = contract_supply.get(&demand.resource).copied().unwrap_or(0.0);
            let surplus = (supply - base_demand) / base_demand;
            demand.base_price *= 1.0 - surplus * 0.1;

            demand.base_price = demand
                .base_price
                .clamp(self.config.price_floor, self.config.price_ceiling);
        }
    }
}
