//! Village registry - flat arena keyed by stable monotonic ids
//!
//! Villages reference each other by id, never by pointer; lookups return
//! `None` for unknown ids rather than faulting.

use crate::core::types::{ResourceKind, Vec2, VillageId};
use crate::village::village::Village;

/// Stores granted to every newly founded village
const STARTING_RESOURCES: [(ResourceKind, f32); 5] = [
    (ResourceKind::Food, 1000.0),
    (ResourceKind::Wood, 500.0),
    (ResourceKind::Stone, 300.0),
    (ResourceKind::Metal, 100.0),
    (ResourceKind::Tools, 50.0),
];

#[derive(Debug, Default)]
pub struct VillageRegistry {
    villages: Vec<Village>,
    next_id: u32,
}

impl VillageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Found a new village with the standard starting stores
    pub fn add_village(
        &mut self,
        name: impl Into<String>,
        position: Vec2,
        population: f32,
    ) -> VillageId {
        self.next_id += 1;
        let id = VillageId(self.next_id);

        let mut village = Village::new(id, name, position, population);
        for (kind, quantity) in STARTING_RESOURCES {
            village.set_resource(kind, quantity);
        }

        self.villages.push(village);
        id
    }

    pub fn get(&self, id: VillageId) -> Option<&Village> {
        self.villages.iter().find(|v| v.id == id)
    }

    pub fn get_mut(&mut self, id: VillageId) -> Option<&mut Village> {
        self.villages.iter_mut().find(|v| v.id == id)
    }

    /// Mutable access to two distinct villages at once
    pub fn get_pair_mut(
        &mut self,
        a: VillageId,
        b: VillageId,
    ) -> Option<(&mut Village, &mut Village)> {
        if a == b {
            return None;
        }
        let pos_a = self.villages.iter().position(|v| v.id == a)?;
        let pos_b = self.villages.iter().position(|v| v.id == b)?;

        if pos_a < pos_b {
            let (left, right) = self.villages.split_at_mut(pos_b);
            Some((&mut left[pos_a], &mut right[0]))
        } else {
            let (left, right) = self.villages.split_at_mut(pos_a);
            Some((&mut right[0], &mut left[pos_b]))
        }
    }

    pub fn contains(&self, id: VillageId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.villages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.villages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Village> {
        self.villages.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Village> {
        self.villages.iter_mut()
    }

    pub fn villages(&self) -> &[Village] {
        &self.villages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic() {
        let mut registry = VillageRegistry::new();
        let a = registry.add_village("A", Vec2::new(0.0, 0.0), 100.0);
        let b = registry.add_village("B", Vec2::new(1.0, 0.0), 100.0);
        assert!(b.0 > a.0);
    }

    #[test]
    fn test_new_village_has_starting_stores() {
        let mut registry = VillageRegistry::new();
        let id = registry.add_village("A", Vec2::new(0.0, 0.0), 100.0);
        let village = registry.get(id).unwrap();
        assert_eq!(village.resource(ResourceKind::Food), 1000.0);
        assert_eq!(village.resource(ResourceKind::Tools), 50.0);
        assert_eq!(village.resource(ResourceKind::Cloth), 0.0);
    }

    #[test]
    fn test_unknown_lookup_returns_none() {
        let registry = VillageRegistry::new();
        assert!(registry.get(VillageId(99)).is_none());
    }

    #[test]
    fn test_pair_borrow_both_orders() {
        let mut registry = VillageRegistry::new();
        let a = registry.add_village("A", Vec2::new(0.0, 0.0), 100.0);
        let b = registry.add_village("B", Vec2::new(1.0, 0.0), 100.0);

        let (first, second) = registry.get_pair_mut(a, b).unwrap();
        assert_eq!(first.id, a);
        assert_eq!(second.id, b);

        let (first, second) = registry.get_pair_mut(b, a).unwrap();
        assert_eq!(first.id, b);
        assert_eq!(second.id, a);
    }

    #[test]
    fn test_pair_borrow_rejects_same_id() {
        let mut registry = VillageRegistry::new();
        let a = registry.add_village("A", Vec2::new(0.0, 0.0), 100.0);
        assert!(registry.get_pair_mut(a, a).is_none());
    }
}
