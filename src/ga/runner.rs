//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → elitism → selection → crossover →
//! mutation → repeat.
//!
//! All randomness is drawn on the calling thread. Only fitness evaluation
//! fans out to rayon, with the generation boundary acting as the barrier,
//! so a fixed seed yields the same result with or without parallelism.

use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::GaConfig;
use super::types::{GaProblem, Individual};
use crate::error::Result;
use crate::random::rng_from_option;

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual seen in any generation (an independent copy).
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Generations executed.
    pub generations: usize,

    /// Whether the run stopped on the stagnation limit.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run stopped on the time limit.
    pub timed_out: bool,

    /// Best fitness after initialization and after each generation.
    pub fitness_history: Vec<f64>,

    /// Final population, evaluated.
    pub population: Vec<I>,
}

/// Per-generation summary passed to tracing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,
    /// Best fitness in this generation's population.
    pub best: f64,
    /// Mean fitness in this generation's population.
    pub mean: f64,
    /// Worst fitness in this generation's population.
    pub worst: f64,
}

impl GenerationStats {
    fn of<I: Individual>(generation: usize, population: &[I]) -> Self {
        let (mut best, mut worst, mut sum) = (f64::NEG_INFINITY, f64::INFINITY, 0.0);
        for ind in population {
            let f = ind.fitness();
            best = best.max(f);
            worst = worst.min(f);
            sum += f;
        }
        Self {
            generation,
            best,
            mean: sum / population.len().max(1) as f64,
            worst,
        }
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = TimetableProblem::new(classes, teachers, rooms, courses, calendar);
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// # Errors
    /// Returns [`TimetableError::InvalidConfig`](crate::error::TimetableError::InvalidConfig)
    /// if `config` fails validation.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Individual>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// The flag is checked at each generation boundary. When set, the run
    /// stops and returns the best individual found so far.
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Individual>> {
        config.validate()?;

        let started = Instant::now();
        let deadline = config
            .time_limit_ms
            .map(|ms| started + Duration::from_millis(ms));
        let mut rng = rng_from_option(config.seed);

        info!(
            population = config.population_size,
            generations = config.max_generations,
            seed = ?config.seed,
            "ga run start"
        );

        // 1. Initialize population
        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();

        // 2. Evaluate initial population
        evaluate_population(problem, &mut population, config.parallel);
        sort_best_first(&mut population);

        // 3. Track best (deep copy, never aliased with the population)
        let mut best = population[0].clone();
        let mut fitness_history = Vec::with_capacity(config.max_generations.min(4096) + 1);
        fitness_history.push(best.fitness());

        let mut generations = 0usize;
        let mut stagnation_counter = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;
        let mut timed_out = false;

        // 4. Evolutionary loop
        for gen in 0..config.max_generations {
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                break;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                timed_out = true;
                break;
            }

            // Elites: population is sorted best-first
            let mut next_gen: Vec<P::Individual> =
                population[..config.elitism_count].to_vec();

            // Offspring
            while next_gen.len() < config.population_size {
                let p1_idx = config.selection.select(&population, &mut rng);
                let p2_idx = config.selection.select(&population, &mut rng);

                let mut child = if rng.random_range(0.0..1.0) < config.crossover_rate {
                    problem.crossover(&population[p1_idx], &population[p2_idx], &mut rng)
                } else {
                    population[p1_idx].clone()
                };

                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    problem.mutate(&mut child, &mut rng);
                }

                next_gen.push(child);
            }

            // Elites are already evaluated
            evaluate_population(
                problem,
                &mut next_gen[config.elitism_count..],
                config.parallel,
            );
            sort_best_first(&mut next_gen);
            population = next_gen;
            generations = gen + 1;

            let stats = GenerationStats::of(generations, &population);
            debug!(
                generation = stats.generation,
                best = stats.best,
                mean = stats.mean,
                worst = stats.worst,
                "generation complete"
            );

            if population[0].fitness() > best.fitness() {
                best = population[0].clone();
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }
            fitness_history.push(best.fitness());

            problem.on_generation(generations, best.fitness());

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        info!(
            generations,
            best_fitness = best.fitness(),
            stagnated,
            cancelled,
            timed_out,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "ga run end"
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations,
            stagnated,
            cancelled,
            timed_out,
            fitness_history,
            population,
        })
    }
}

/// Evaluates individuals and stores their fitness.
fn evaluate_population<P: GaProblem>(problem: &P, population: &mut [P::Individual], parallel: bool) {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            population.par_iter_mut().for_each(|ind| {
                let f = problem.evaluate(ind);
                ind.set_fitness(f);
            });
            return;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for ind in population.iter_mut() {
        let f = problem.evaluate(ind);
        ind.set_fitness(f);
    }
}

/// Stable sort by fitness, highest first.
fn sort_best_first<I: Individual>(population: &mut [I]) {
    population.sort_by(|a, b| {
        b.fitness()
            .partial_cmp(&a.fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

// ============================================================================
// Tests
// ============================================================================
