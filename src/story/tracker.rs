//! Story tracker - folds pushed events into ongoing arcs
//!
//! Arcs follow loose patterns (a romance, a trade dispute, an
//! innovation) and carry a tension score shaped like a dramatic arc:
//! rising toward the middle of the arc's life, falling toward its end.

use serde::{Deserialize, Serialize};

use crate::story::event::{StoryEvent, StoryKind, StorySink};

/// Fallback arc length when no pattern matches, in days
const DEFAULT_ARC_DAYS: f32 = 30.0;
/// Global tension decay per day while no arcs are active
const IDLE_TENSION_DECAY: f32 = 0.1;

/// A loose narrative template an arc can follow
#[derive(Debug, Clone)]
pub struct StoryPattern {
    pub name: &'static str,
    pub sequence: Vec<StoryKind>,
    pub min_days: f32,
    pub max_days: f32,
}

impl StoryPattern {
    fn expected_days(&self) -> f32 {
        (self.min_days + self.max_days) * 0.5
    }
}

/// An ongoing narrative thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryArc {
    pub name: String,
    pub events: Vec<StoryEvent>,
    /// 0.0 to 1.0
    pub progression: f32,
    pub complete: bool,
    pub tension: f32,
    pub participants: Vec<String>,
}

/// Receives events from the simulation and weaves them into arcs
#[derive(Debug)]
pub struct StoryTracker {
    arcs: Vec<StoryArc>,
    patterns: Vec<StoryPattern>,
    global_tension: f32,
}

impl StoryTracker {
    pub fn new() -> Self {
        Self {
            arcs: Vec::new(),
            patterns: default_patterns(),
            global_tension: 0.0,
        }
    }

    pub fn arcs(&self) -> &[StoryArc] {
        &self.arcs
    }

    pub fn global_tension(&self) -> f32 {
        self.global_tension
    }

    /// Advance arc progression and tension by `dt` days
    pub fn update(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        for arc in &mut self.arcs {
            let duration = self
                .patterns
                .iter()
                .find(|p| p.name == arc.name)
                .map(|p| p.expected_days())
                .unwrap_or(DEFAULT_ARC_DAYS);
            arc.progression = (arc.progression + dt / duration).min(1.0);

            let event_tension = if arc.events.is_empty() {
                0.0
            } else {
                arc.events.iter().map(|e| e.tension).sum::<f32>() / arc.events.len() as f32
            };
            let dramatic = (arc.progression * std::f32::consts::PI).sin();
            arc.tension = event_tension * 0.7 + dramatic * 0.3;

            if arc.progression >= 1.0 && arc.events.iter().all(|e| !e.requires_resolution) {
                arc.complete = true;
            }
        }

        self.arcs.retain(|arc| !arc.complete);

        if self.arcs.is_empty() {
            self.global_tension = (self.global_tension - dt * IDLE_TENSION_DECAY).max(0.0);
        } else {
            self.global_tension =
                self.arcs.iter().map(|a| a.tension).sum::<f32>() / self.arcs.len() as f32;
        }
    }

    fn fold_into_arc(&mut self, event: StoryEvent) {
        // Prefer an ongoing arc that shares a participant
        let shared = self.arcs.iter_mut().find(|arc| {
            !arc.complete
                && event
                    .involved
                    .iter()
                    .any(|id| arc.participants.contains(id))
        });

        if let Some(arc) = shared {
            arc.events.push(event);
            return;
        }

        // Otherwise seed a new arc from a pattern opening with this kind
        let Some(pattern) = self.patterns.iter().find(|p| p.sequence[0] == event.kind) else {
            return;
        };

        self.arcs.push(StoryArc {
            name: pattern.name.to_string(),
            tension: event.tension,
            participants: event.involved.clone(),
            events: vec![event],
            progression: 0.0,
            complete: false,
        });
    }
}

impl Default for StoryTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StorySink for StoryTracker {
    fn add_event(&mut self, event: StoryEvent) {
        self.fold_into_arc(event);
    }
}

fn default_patterns() -> Vec<StoryPattern> {
    vec![
        StoryPattern {
            name: "Romance",
            sequence: vec![StoryKind::Personal, StoryKind::Social, StoryKind::Cultural],
            min_days: 30.0,
            max_days: 90.0,
        },
        StoryPattern {
            name: "Trade Dispute",
            sequence: vec![StoryKind::Economic, StoryKind::Social, StoryKind::Political],
            min_days: 15.0,
            max_days: 45.0,
        },
        StoryPattern {
            name: "Innovation",
            sequence: vec![
                StoryKind::Technological,
                StoryKind::Economic,
                StoryKind::Cultural,
            ],
            min_days: 60.0,
            max_days: 180.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: StoryKind, involved: &[&str], tension: f32) -> StoryEvent {
        StoryEvent {
            kind,
            title: "test".into(),
            description: "test".into(),
            importance: 0.5,
            tension,
            involved: involved.iter().map(|s| s.to_string()).collect(),
            consequences: vec![],
            requires_resolution: false,
        }
    }

    #[test]
    fn test_technological_event_seeds_innovation_arc() {
        let mut tracker = StoryTracker::new();
        tracker.add_event(event(StoryKind::Technological, &["village-1"], 0.4));
        assert_eq!(tracker.arcs().len(), 1);
        assert_eq!(tracker.arcs()[0].name, "Innovation");
    }

    #[test]
    fn test_shared_participant_joins_existing_arc() {
        let mut tracker = StoryTracker::new();
        tracker.add_event(event(StoryKind::Technological, &["village-1"], 0.4));
        tracker.add_event(event(StoryKind::Economic, &["village-1", "village-2"], 0.6));
        assert_eq!(tracker.arcs().len(), 1);
        assert_eq!(tracker.arcs()[0].events.len(), 2);
    }

    #[test]
    fn test_unmatched_opening_kind_is_dropped() {
        let mut tracker = StoryTracker::new();
        tracker.add_event(event(StoryKind::Environmental, &["village-1"], 0.9));
        assert!(tracker.arcs().is_empty());
    }

    #[test]
    fn test_arcs_complete_and_retire() {
        let mut tracker = StoryTracker::new();
        tracker.add_event(event(StoryKind::Economic, &["village-1"], 0.5));
        // Trade Dispute runs ~30 days; push well past it
        for _ in 0..40 {
            tracker.update(1.0);
        }
        assert!(tracker.arcs().is_empty());
    }

    #[test]
    fn test_idle_tension_decays() {
        let mut tracker = StoryTracker::new();
        tracker.global_tension = 0.8;
        tracker.update(2.0);
        assert!(tracker.global_tension() < 0.8);
    }
}
