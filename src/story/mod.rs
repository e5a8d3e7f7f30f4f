//! Story events and the narrative tracker that consumes them

pub mod event;
pub mod tracker;

pub use event::{EventLog, StoryEvent, StoryKind, StorySink};
pub use tracker::{StoryArc, StoryTracker};
