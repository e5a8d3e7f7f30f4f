//! Hearthvale - Medieval Village Life Simulator
//!
//! A real-time multi-agent simulation core: settlements, their
//! populations, economies, environment, technology diffusion, and the
//! structured story events that fall out of them. The coordinator
//! advances every interacting village per tick and pushes
//! narrative-relevant events to an external story sink.

pub mod coordinator;
pub mod core;
pub mod economy;
pub mod environment;
pub mod market;
pub mod save;
pub mod story;
pub mod technology;
pub mod village;
