//! Story events and the push interface to the narrative layer

use serde::{Deserialize, Serialize};

/// Narrative category of a story event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoryKind {
    Personal,
    Social,
    Environmental,
    Economic,
    Political,
    Technological,
    Cultural,
}

/// A structured notification of something narratively significant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryEvent {
    pub kind: StoryKind,
    pub title: String,
    pub description: String,
    /// 0.0 to 1.0
    pub importance: f32,
    /// 0.0 to 1.0
    pub tension: f32,
    /// Ids of the villages or characters involved
    pub involved: Vec<String>,
    pub consequences: Vec<String>,
    pub requires_resolution: bool,
}

/// One-way push interface the simulation uses to report events.
///
/// The coordinator never reads anything back from this call.
pub trait StorySink {
    fn add_event(&mut self, event: StoryEvent);
}

/// Flat event capture - the simplest sink, used by tests and the demo
/// runner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<StoryEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[StoryEvent] {
        &self.events
    }

    pub fn events_of_kind(&self, kind: StoryKind) -> impl Iterator<Item = &StoryEvent> {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    pub fn events_involving<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a StoryEvent> {
        self.events
            .iter()
            .filter(move |e| e.involved.iter().any(|involved| involved == id))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl StorySink for EventLog {
    fn add_event(&mut self, event: StoryEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: StoryKind, involved: &[&str]) -> StoryEvent {
        StoryEvent {
            kind,
            title: "test".into(),
            description: "test".into(),
            importance: 0.5,
            tension: 0.5,
            involved: involved.iter().map(|s| s.to_string()).collect(),
            consequences: vec![],
            requires_resolution: false,
        }
    }

    #[test]
    fn test_log_filters_by_kind_and_participant() {
        let mut log = EventLog::new();
        log.add_event(event(StoryKind::Political, &["village-1", "village-2"]));
        log.add_event(event(StoryKind::Technological, &["village-2"]));

        assert_eq!(log.events_of_kind(StoryKind::Political).count(), 1);
        assert_eq!(log.events_involving("village-2").count(), 2);
        assert_eq!(log.events_involving("village-3").count(), 0);
    }
}
