//! School timetable generation engine.
//!
//! Builds weekly class timetables (class × subject × teacher × room ×
//! day/period) with a genetic algorithm:
//!
//! - **Models**: Classes, teachers, rooms, courses, the working calendar,
//!   and the schedule itself.
//! - **Feasibility**: Counts double-bookings, availability violations,
//!   schedule gaps, and subject clustering.
//! - **Generator**: Builds random conflict-free candidates by rejection
//!   sampling.
//! - **Fitness**: Weighted scoring of coverage, violations, and
//!   requirement fulfilment.
//! - **GA**: Trait-based evolutionary loop with day-based crossover,
//!   conflict repair, and move/swap/room mutations.
//! - **Refine**: Post-optimization teacher-gap reduction.
//! - **Engine**: Request-in, timetable-out entry point with name resolution.
//!
//! # Example
//!
//! ```
//! use u_timetable::config::EngineConfig;
//! use u_timetable::engine::{generate, GenerateRequest};
//! use u_timetable::ga::GaConfig;
//! use u_timetable::models::{Calendar, Class, Course, Room, Teacher};
//!
//! let calendar = Calendar::new(["monday", "tuesday"], 2);
//! let request = GenerateRequest::new(
//!     vec![Class::new("10A").with_subject("Math")],
//!     vec![Teacher::new("T1").with_subject("Math").with_full_availability(&calendar)],
//!     vec![Room::new("R1")],
//!     vec![Course::new("c1", "Math", 2)],
//!     calendar,
//! )
//! .with_seed(42);
//!
//! let config = EngineConfig::default()
//!     .with_ga(GaConfig::default().with_population_size(20).with_max_generations(20));
//! let result = generate(&request, &config).unwrap();
//! assert_eq!(result.schedule.len(), 2);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod feasibility;
pub mod fitness;
pub mod ga;
pub mod generator;
pub mod models;
pub mod problem;
pub mod random;
pub mod refine;
pub mod validation;

pub use config::EngineConfig;
pub use engine::{generate, generate_with_cancel, GenerateRequest, GenerateResult};
pub use error::{Result, TimetableError};
