//! Environmental model - climate, weather, and natural events

pub mod climate;
pub mod events;
pub mod system;

pub use climate::{Climate, Season, WeatherKind};
pub use events::{EnvironmentalEvent, EnvironmentalEventKind};
pub use system::EnvironmentalSystem;
