//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and external systems.

pub mod fitness;
pub mod recommendation;

pub use fitness::FitnessService;
pub use recommendation::{RecommendationEngine, RecommendationError};
