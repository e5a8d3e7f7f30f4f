//! Environmental events - floods, droughts, plagues and the like
//!
//! Events carry a typed list of affected resource kinds; production
//! modifiers are looked up by variant, never by name.

use serde::{Deserialize, Serialize};

use crate::core::types::ResourceKind;

/// Kind of environmental event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvironmentalEventKind {
    Flood,
    Drought,
    Plague,
    Famine,
    Storm,
    Fire,
    Earthquake,
}

impl EnvironmentalEventKind {
    pub const ALL: [EnvironmentalEventKind; 7] = [
        EnvironmentalEventKind::Flood,
        EnvironmentalEventKind::Drought,
        EnvironmentalEventKind::Plague,
        EnvironmentalEventKind::Famine,
        EnvironmentalEventKind::Storm,
        EnvironmentalEventKind::Fire,
        EnvironmentalEventKind::Earthquake,
    ];

    /// Resource kinds whose production suffers while this event is active
    pub fn affected_resources(&self) -> &'static [ResourceKind] {
        match self {
            Self::Flood => &[ResourceKind::Food, ResourceKind::Wood],
            Self::Drought => &[ResourceKind::Food],
            Self::Plague => &[ResourceKind::Food],
            Self::Famine => &[ResourceKind::Food],
            Self::Storm => &[ResourceKind::Food, ResourceKind::Wood],
            Self::Fire => &[ResourceKind::Wood, ResourceKind::Cloth],
            Self::Earthquake => &[ResourceKind::Stone, ResourceKind::Tools],
        }
    }
}

/// An active environmental event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentalEvent {
    pub kind: EnvironmentalEventKind,
    /// 0.3 to 1.0
    pub severity: f32,
    /// Days until the event subsides
    pub duration_days: f32,
    /// Affected area in km
    pub radius: f32,
    pub affected: Vec<ResourceKind>,
}

impl EnvironmentalEvent {
    pub fn new(kind: EnvironmentalEventKind, severity: f32, duration_days: f32) -> Self {
        Self {
            kind,
            severity,
            duration_days,
            radius: 10.0 + severity * 20.0,
            affected: kind.affected_resources().to_vec(),
        }
    }

    pub fn affects(&self, kind: ResourceKind) -> bool {
        self.affected.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drought_hits_food_only() {
        let event = EnvironmentalEvent::new(EnvironmentalEventKind::Drought, 0.8, 10.0);
        assert!(event.affects(ResourceKind::Food));
        assert!(!event.affects(ResourceKind::Wood));
    }

    #[test]
    fn test_radius_scales_with_severity() {
        let mild = EnvironmentalEvent::new(EnvironmentalEventKind::Flood, 0.3, 5.0);
        let severe = EnvironmentalEvent::new(EnvironmentalEventKind::Flood, 1.0, 5.0);
        assert!(severe.radius > mild.radius);
    }
}
