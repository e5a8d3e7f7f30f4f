//! Technology tree - discovery progress, prerequisite gating, and the
//! bottleneck-resource research throttle
//!
//! Each technology moves Locked -> Researchable -> InProgress ->
//! Discovered; discovery is terminal. Research progress is throttled by
//! the scarcest required resource, not the average.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{Profession, ResourceKind};
use crate::economy::ResourceSupply;
use crate::technology::research::ResearchProject;

/// A discoverable capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technology {
    pub name: String,
    pub description: String,
    pub progress_points: f32,
    pub required_points: f32,
    pub discovered: bool,
    pub prerequisites: Vec<String>,
    pub resource_requirements: AHashMap<ResourceKind, f32>,
    pub enabled_professions: Vec<Profession>,
    pub productivity_bonus: f32,
}

impl Technology {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: f32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            progress_points: 0.0,
            required_points: required,
            discovered: false,
            prerequisites: Vec::new(),
            resource_requirements: AHashMap::new(),
            enabled_professions: Vec::new(),
            productivity_bonus: 0.0,
        }
    }

    pub fn with_prerequisite(mut self, name: impl Into<String>) -> Self {
        self.prerequisites.push(name.into());
        self
    }

    pub fn with_requirement(mut self, kind: ResourceKind, amount: f32) -> Self {
        self.resource_requirements.insert(kind, amount);
        self
    }

    pub fn with_profession(mut self, profession: Profession) -> Self {
        self.enabled_professions.push(profession);
        self
    }

    pub fn with_bonus(mut self, bonus: f32) -> Self {
        self.productivity_bonus = bonus;
        self
    }
}

/// Lifecycle state derived from discovery, prerequisites, and projects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechState {
    Locked,
    Researchable,
    InProgress,
    Discovered,
}

/// The full tree plus its active research projects
#[derive(Debug, Default)]
pub struct TechnologyTree {
    technologies: Vec<Technology>,
    active_projects: Vec<ResearchProject>,
}

impl TechnologyTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// The medieval starting catalog
    pub fn with_defaults() -> Self {
        let mut tree = Self::new();

        tree.add_technology(
            Technology::new(
                "Basic Metallurgy",
                "Smelting and shaping of common ores",
                120.0,
            )
            .with_requirement(ResourceKind::Metal, 40.0)
            .with_profession(Profession::Blacksmith)
            .with_bonus(0.1),
        );

        tree.add_technology(
            Technology::new(
                "Three-Field Rotation",
                "Advanced farming technique that improves crop yield",
                100.0,
            )
            .with_requirement(ResourceKind::Food, 50.0)
            .with_profession(Profession::Farmer)
            .with_bonus(0.2),
        );

        tree.add_technology(
            Technology::new("Water Mill", "Mechanical power from water flow", 150.0)
                .with_requirement(ResourceKind::Wood, 100.0)
                .with_requirement(ResourceKind::Stone, 50.0)
                .with_profession(Profession::Farmer)
                .with_bonus(0.3),
        );

        tree.add_technology(
            Technology::new("Steel Forging", "Advanced metalworking techniques", 200.0)
                .with_prerequisite("Basic Metallurgy")
                .with_requirement(ResourceKind::Metal, 100.0)
                .with_requirement(ResourceKind::Tools, 50.0)
                .with_profession(Profession::Blacksmith)
                .with_bonus(0.4),
        );

        tree
    }

    pub fn add_technology(&mut self, technology: Technology) {
        self.technologies.push(technology);
    }

    pub fn technologies(&self) -> &[Technology] {
        &self.technologies
    }

    pub fn active_projects(&self) -> &[ResearchProject] {
        &self.active_projects
    }

    pub fn find(&self, name: &str) -> Option<&Technology> {
        self.technologies.iter().find(|t| t.name == name)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut Technology> {
        self.technologies.iter_mut().find(|t| t.name == name)
    }

    pub fn is_discovered(&self, name: &str) -> bool {
        self.find(name).map(|t| t.discovered).unwrap_or(false)
    }

    pub fn prerequisites_met(&self, technology: &Technology) -> bool {
        technology
            .prerequisites
            .iter()
            .all(|prereq| self.is_discovered(prereq))
    }

    /// Current lifecycle state of a technology, if it exists
    pub fn state(&self, name: &str) -> Option<TechState> {
        let technology = self.find(name)?;
        if technology.discovered {
            return Some(TechState::Discovered);
        }
        if self.active_projects.iter().any(|p| p.technology == name) {
            return Some(TechState::InProgress);
        }
        if self.prerequisites_met(technology) {
            Some(TechState::Researchable)
        } else {
            Some(TechState::Locked)
        }
    }

    /// Begin researching a technology.
    ///
    /// Fails (returns false, no state change) when the technology is
    /// unknown, already discovered, already under research, or any
    /// prerequisite is undiscovered.
    pub fn start_research(&mut self, name: &str) -> bool {
        match self.state(name) {
            Some(TechState::Researchable) => {}
            _ => return false,
        }

        tracing::debug!(technology = name, "research started");
        self.active_projects.push(ResearchProject::new(name));
        true
    }

    /// Advance all research projects by `dt` days.
    ///
    /// Progress is throttled by the scarcest required resource; with no
    /// supply wired in, availability is treated as unconstrained. Returns
    /// the names of technologies discovered this tick.
    pub fn update(&mut self, dt: f32, supply: Option<&dyn ResourceSupply>) -> Vec<String> {
        if dt <= 0.0 {
            return Vec::new();
        }

        for project in &self.active_projects {
            let Some(technology) = self
                .technologies
                .iter()
                .position(|t| t.name == project.technology)
            else {
                continue;
            };

            let throttle = bottleneck_ratio(&self.technologies[technology], supply);
            self.technologies[technology].progress_points += project.progress_rate * dt * throttle;
        }

        let discovered = self.check_breakthroughs();
        self.active_projects
            .retain(|project| !discovered.contains(&project.technology));
        discovered
    }

    fn check_breakthroughs(&mut self) -> Vec<String> {
        let mut discovered = Vec::new();
        for technology in &mut self.technologies {
            if !technology.discovered && technology.progress_points >= technology.required_points {
                technology.discovered = true;
                tracing::info!(technology = %technology.name, "technology discovered");
                discovered.push(technology.name.clone());
            }
        }
        discovered
    }

    /// 1.0 once discovered, otherwise the fraction of progress made
    pub fn technology_level(&self, name: &str) -> f32 {
        match self.find(name) {
            Some(t) if t.discovered => 1.0,
            Some(t) => t.progress_points / t.required_points,
            None => 0.0,
        }
    }

    /// Undiscovered technologies whose prerequisites are all met
    pub fn available_technologies(&self) -> Vec<&Technology> {
        self.technologies
            .iter()
            .filter(|t| !t.discovered && self.prerequisites_met(t))
            .collect()
    }

    /// Names of every discovered technology
    pub fn discovered_technologies(&self) -> Vec<&Technology> {
        self.technologies.iter().filter(|t| t.discovered).collect()
    }

    /// Combined productivity bonus that discovered technologies grant a
    /// profession
    pub fn productivity_bonus(&self, profession: Profession) -> f32 {
        self.technologies
            .iter()
            .filter(|t| t.discovered && t.enabled_professions.contains(&profession))
            .map(|t| t.productivity_bonus)
            .sum()
    }
}

/// Minimum availability ratio across required resources, clamped to [0, 1]
fn bottleneck_ratio(technology: &Technology, supply: Option<&dyn ResourceSupply>) -> f32 {
    let Some(supply) = supply else {
        return 1.0;
    };

    technology
        .resource_requirements
        .iter()
        .map(|(&kind, &amount)| {
            if amount <= 0.0 {
                1.0
            } else {
                (supply.resource_quantity(kind) / amount).clamp(0.0, 1.0)
            }
        })
        .fold(1.0, f32::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSupply(AHashMap<ResourceKind, f32>);

    impl ResourceSupply for FixedSupply {
        fn resource_quantity(&self, kind: ResourceKind) -> f32 {
            self.0.get(&kind).copied().unwrap_or(0.0)
        }
    }

    #[test]
    fn test_prerequisite_gating() {
        let mut tree = TechnologyTree::with_defaults();
        assert_eq!(tree.state("Steel Forging"), Some(TechState::Locked));
        assert!(!tree.start_research("Steel Forging"));
        assert!(tree.active_projects().is_empty());
    }

    #[test]
    fn test_research_lifecycle() {
        let mut tree = TechnologyTree::with_defaults();
        assert!(tree.start_research("Basic Metallurgy"));
        assert_eq!(tree.state("Basic Metallurgy"), Some(TechState::InProgress));

        // 120 required points at 1 point/day, unconstrained supply
        let mut discovered = Vec::new();
        for _ in 0..120 {
            discovered.extend(tree.update(1.0, None));
        }
        assert_eq!(discovered, vec!["Basic Metallurgy".to_string()]);
        assert_eq!(tree.state("Basic Metallurgy"), Some(TechState::Discovered));
        assert!(tree.active_projects().is_empty());

        // Prerequisite satisfied, Steel Forging opens up
        assert_eq!(tree.state("Steel Forging"), Some(TechState::Researchable));
        assert!(tree.start_research("Steel Forging"));
    }

    #[test]
    fn test_duplicate_research_rejected() {
        let mut tree = TechnologyTree::with_defaults();
        assert!(tree.start_research("Water Mill"));
        assert!(!tree.start_research("Water Mill"));
        assert_eq!(tree.active_projects().len(), 1);
    }

    #[test]
    fn test_discovered_research_rejected() {
        let mut tree = TechnologyTree::with_defaults();
        assert!(tree.start_research("Three-Field Rotation"));
        for _ in 0..100 {
            tree.update(1.0, None);
        }
        assert!(tree.is_discovered("Three-Field Rotation"));
        assert!(!tree.start_research("Three-Field Rotation"));
    }

    #[test]
    fn test_bottleneck_uses_scarcest_resource() {
        let mut supply = AHashMap::new();
        supply.insert(ResourceKind::Wood, 100.0);
        supply.insert(ResourceKind::Stone, 10.0);
        let supply = FixedSupply(supply);

        let mut tree = TechnologyTree::with_defaults();
        assert!(tree.start_research("Water Mill"));
        tree.update(1.0, Some(&supply));

        // Wood fully covers its 100 requirement; stone covers 10/50 and
        // becomes the throttle
        let progress = tree.find("Water Mill").unwrap().progress_points;
        assert!((progress - 0.2).abs() < 1e-5, "progress {}", progress);
    }

    #[test]
    fn test_missing_supply_is_unconstrained() {
        let mut tree = TechnologyTree::with_defaults();
        assert!(tree.start_research("Water Mill"));
        tree.update(1.0, None);
        assert!((tree.find("Water Mill").unwrap().progress_points - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_discovery_is_monotonic() {
        let mut tree = TechnologyTree::with_defaults();
        assert!(tree.start_research("Three-Field Rotation"));
        for _ in 0..500 {
            tree.update(1.0, None);
        }
        assert!(tree.is_discovered("Three-Field Rotation"));
    }

    #[test]
    fn test_productivity_bonus_accumulates() {
        let mut tree = TechnologyTree::with_defaults();
        assert_eq!(tree.productivity_bonus(Profession::Farmer), 0.0);
        tree.find_mut("Three-Field Rotation").unwrap().discovered = true;
        tree.find_mut("Water Mill").unwrap().discovered = true;
        assert!((tree.productivity_bonus(Profession::Farmer) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_technology_level() {
        let mut tree = TechnologyTree::with_defaults();
        assert_eq!(tree.technology_level("Water Mill"), 0.0);
        assert_eq!(tree.technology_level("No Such Tech"), 0.0);
        assert!(tree.start_research("Water Mill"));
        tree.update(75.0, None);
        assert!((tree.technology_level("Water Mill") - 0.5).abs() < 1e-5);
    }
}
