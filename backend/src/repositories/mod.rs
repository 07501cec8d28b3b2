//! Database repositories
//!
//! PostgreSQL implementations of the recommendation service's data ports.

pub mod exercise;
pub mod measurement;
pub mod profile;
pub mod video;

pub use exercise::PgExerciseRepository;
pub use measurement::PgMeasurementRepository;
pub use profile::PgProfileRepository;
pub use video::PgVideoRepository;
