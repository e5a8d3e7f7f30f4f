//! Trade-route settlement
//!
//! Each active route moves goods from source to target once per tick.
//! A transfer happens only when the source can cover the full amount;
//! short stock skips the resource this tick and retries next tick.

use crate::village::registry::VillageRegistry;
use crate::village::route::TradeRoute;

/// Settle every active route for one tick of `dt` days
pub(crate) fn settle_routes(
    registry: &mut VillageRegistry,
    routes: &[TradeRoute],
    base_volume: f32,
    trust_gain: f32,
    dt: f32,
) {
    for route in routes.iter().filter(|r| r.active) {
        let Some((source, target)) = registry.get_pair_mut(route.source, route.target) else {
            continue;
        };

        // Volume falls off with distance and floors at zero; a route
        // longer than 1000 units moves nothing rather than un-trading
        let distance_factor = (1.0 - route.distance / 1000.0).max(0.0);
        let volume = base_volume * distance_factor * route.safety;
        let amount = volume * dt;
        if amount <= 0.0 {
            continue;
        }

        for &kind in &route.traded {
            if source.resource(kind) < amount {
                continue;
            }

            source.add_resource(kind, -amount);
            target.add_resource(kind, amount);

            let (source_id, target_id) = (source.id, target.id);
            source.relation_mut(target_id).record_trade(amount, trust_gain);
            target.relation_mut(source_id).record_trade(amount, trust_gain);
        }
    }
}
