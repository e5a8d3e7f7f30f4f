//! Trade and market system - demand, contracts, and dynamic pricing

pub mod contract;
pub mod demand;
pub mod system;

pub use contract::TradeContract;
pub use demand::MarketDemand;
pub use system::MarketSystem;
