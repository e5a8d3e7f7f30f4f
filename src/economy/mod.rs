//! Economic ledger - agents, professions, and the village economic cycle

pub mod agent;
pub mod ledger;
pub mod negotiation;

pub use agent::{EconomicAgent, ResourceStock};
pub use ledger::VillageEconomy;

use crate::core::types::ResourceKind;

/// Seam for resource-availability checks.
///
/// Consumers that can run without an economy (the technology tree in
/// partial configurations) take an `Option<&dyn ResourceSupply>` and
/// treat `None` as unconstrained.
pub trait ResourceSupply {
    fn resource_quantity(&self, kind: ResourceKind) -> f32;
}
