//! Technology tree and research tracking

pub mod research;
pub mod tree;

pub use research::ResearchProject;
pub use tree::{TechState, Technology, TechnologyTree};
