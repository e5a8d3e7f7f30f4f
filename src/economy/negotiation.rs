//! Pairwise trade negotiation between agents
//!
//! Backs the economic cycle's trade hook: success is decided by weighing
//! the buyer's need and the seller's surplus against a random risk roll.
//! No resources move yet - the hook's caller decides what a successful
//! negotiation means.

use rand::Rng;

use crate::core::types::ResourceKind;
use crate::economy::agent::EconomicAgent;

/// Whether a trade between the two agents would go through
pub fn negotiate(buyer: &EconomicAgent, seller: &EconomicAgent, rng: &mut impl Rng) -> bool {
    let desirability = trade_desirability(buyer, seller);
    let risk: f32 = rng.gen();
    desirability > risk
}

fn trade_desirability(buyer: &EconomicAgent, seller: &EconomicAgent) -> f32 {
    let buyer_need = 1.0 - buyer.resource_quantity(ResourceKind::Food);
    let seller_surplus = seller.resource_quantity(ResourceKind::Food);
    (buyer_need + seller_surplus) / 2.0
}
