//! Villages, their registry, and the standing structures between them

pub mod diplomacy;
pub mod registry;
pub mod route;
pub mod village;

pub use diplomacy::{AgreementKind, DiplomaticAgreement};
pub use registry::VillageRegistry;
pub use route::TradeRoute;
pub use village::{Relation, Village};
