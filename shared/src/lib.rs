//! FitCoach Shared Library
//!
//! Pure domain code shared by the backend service and the WASM bindings:
//! body-composition classification, trend analysis, the base plan catalog,
//! and the models and wire types built on them.

pub mod catalog;
pub mod classification;
pub mod errors;
pub mod models;
pub mod trend;
pub mod types;

// Re-export commonly used items
pub use catalog::{BasePlan, CatalogError, Goal, PlanCatalog, PlanDay, Slot};
pub use classification::{AgeGroup, BodyFatChart, BodyFatTier, LeanMassTier};
pub use errors::*;
pub use models::*;
pub use trend::{TrendSignal, TrendSignals};
pub use types::*;
