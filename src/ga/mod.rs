//! Genetic Algorithm framework.
//!
//! A trait-based evolutionary loop. A problem implements [`GaProblem`],
//! which specifies how to create, evaluate, crossover, and mutate
//! individuals; [`GaRunner`] drives the generations. The timetable
//! operators live in [`operators`].
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution with a cached `f64` fitness (higher is better)
//! - [`GaProblem`]: Problem definition: initialization, evaluation, operators
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population, selection, rates, elitism)
//! - [`GaOverrides`]: Optional per-request parameter overrides
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final optimization result with statistics
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::{GaConfig, GaOverrides};
pub use runner::{GaResult, GaRunner, GenerationStats};
pub use selection::Selection;
pub use types::{GaProblem, Individual};
