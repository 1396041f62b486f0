//! The generational evolutionary loop.
//!
//! [`Evolver`] owns one [`Population`] and drives it generation by
//! generation: preserve the elites, refill the remaining slots through
//! selection → ordered crossover → swap mutation, re-sort, and track the
//! best tour ever seen. Each [`step`](Evolver::step) yields an immutable
//! [`Generation`] snapshot; [`snapshots`](Evolver::snapshots) exposes the
//! whole run as a lazy iterator, and [`run`](Evolver::run) drives it to the
//! terminal [`RunResult`].

use crate::config::EvolveConfig;
use crate::error::EvolveError;
use crate::operators::{order_crossover, swap_mutation};
use crate::population::Population;
use crate::random::create_rng;
use crate::report::FrameSink;
use crate::tour::{CitySet, Tour};
use rand::rngs::StdRng;
use rand::Rng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Immutable view of one completed generation.
#[derive(Debug, Clone)]
pub struct Generation {
    /// 1-based index of the generation that just completed.
    pub index: usize,

    /// Best tour seen so far across the whole run.
    pub best: Tour,

    /// Generation in which [`best`](Self::best) was found; `0` means the
    /// initial random population.
    pub best_generation: usize,

    /// The fittest tour of this generation's population.
    pub leader: Tour,

    /// Lengths of this generation's valid tours, shortest first — the
    /// sorted prefix reporting layers plot as a distribution.
    pub lengths: Vec<f64>,
}

/// Terminal result of a completed (or cancelled) run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// The best tour found during the entire run.
    pub best: Tour,

    /// Open-path length of the best tour in kilometers.
    pub best_length_km: f64,

    /// Generation in which the best tour first appeared (`0` = initial
    /// population).
    pub generation_found: usize,

    /// Generations actually executed.
    pub generations: usize,

    /// Whether the run stopped on an external cancellation signal.
    pub cancelled: bool,

    /// Best length so far after seeding and after each generation.
    pub length_history: Vec<f64>,

    /// The configuration the run executed with.
    pub config: EvolveConfig,
}

impl RunResult {
    /// The best route as city labels.
    pub fn route(&self) -> Vec<&str> {
        self.best.labels()
    }
}

/// Drives the evolutionary search over a fixed city set.
///
/// # Usage
///
/// ```
/// use evoroute::{CitySet, Evolver, EvolveConfig, Location};
/// use std::sync::Arc;
///
/// let cities = Arc::new(CitySet::new(vec![
///     Location::new(37.39, -5.98, "Sevilla"),
///     Location::new(36.53, -6.29, "Cadiz"),
///     Location::new(36.72, -4.42, "Malaga"),
///     Location::new(37.18, -3.60, "Granada"),
/// ]));
/// let config = EvolveConfig::default()
///     .with_population_size(30)
///     .with_elite_count(3)
///     .with_generations(20)
///     .with_seed(42);
///
/// let result = Evolver::seed(cities, config).unwrap().run().unwrap();
/// assert_eq!(result.route().len(), 4);
/// ```
#[derive(Debug)]
pub struct Evolver {
    cities: Arc<CitySet>,
    config: EvolveConfig,
    population: Population,
    best: Tour,
    best_generation: usize,
    completed: usize,
    rng: StdRng,
}

impl Evolver {
    /// Validates the configuration and seeds the initial random population.
    ///
    /// Fails with a [`ConfigError`](crate::ConfigError) on invalid
    /// parameters, or with [`EvolveError::PopulationCollapse`] when every
    /// seeded tour is degenerate (e.g. all cities coincident).
    pub fn seed(cities: Arc<CitySet>, config: EvolveConfig) -> Result<Self, EvolveError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        let population = Population::from_random(config.population_size, &cities, &mut rng);
        let best = match population.best() {
            Some(tour) => tour.clone(),
            None => return Err(EvolveError::PopulationCollapse),
        };
        debug!(
            cities = cities.len(),
            population = population.len(),
            best_length_km = best.length(),
            "seeded initial population"
        );

        Ok(Self {
            cities,
            config,
            population,
            best,
            best_generation: 0,
            completed: 0,
            rng,
        })
    }

    /// The city set this evolver routes over.
    pub fn cities(&self) -> &Arc<CitySet> {
        &self.cities
    }

    /// The configuration of this run.
    pub fn config(&self) -> &EvolveConfig {
        &self.config
    }

    /// The current population, sorted by descending fitness.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Best tour seen so far.
    pub fn best(&self) -> &Tour {
        &self.best
    }

    /// Generations completed so far.
    pub fn generation(&self) -> usize {
        self.completed
    }

    /// Whether the configured generation count has completed.
    pub fn is_finished(&self) -> bool {
        self.completed >= self.config.generations
    }

    /// Runs exactly one generation and returns its snapshot.
    ///
    /// Fails with [`EvolveError::Finished`] once the configured generation
    /// count has completed, and with a collapse or selection-precondition
    /// error when the population degenerates.
    pub fn step(&mut self) -> Result<Generation, EvolveError> {
        if self.is_finished() {
            return Err(EvolveError::Finished);
        }

        let offspring_count = self.config.population_size - self.config.elite_count;
        let offspring = if self.config.parallel {
            self.breed_parallel(offspring_count)?
        } else {
            self.breed_sequential(offspring_count)?
        };
        self.population
            .replace_non_elite(self.config.elite_count, offspring);

        let leader = match self.population.best() {
            Some(tour) => tour.clone(),
            None => return Err(EvolveError::PopulationCollapse),
        };
        self.completed += 1;
        if leader.length() < self.best.length() {
            self.best = leader.clone();
            self.best_generation = self.completed;
        }

        debug!(
            generation = self.completed,
            leader_length_km = leader.length(),
            best_length_km = self.best.length(),
            "generation complete"
        );

        let lengths = self.population.individuals()[..self.population.valid_count()]
            .iter()
            .map(Tour::length)
            .collect();
        Ok(Generation {
            index: self.completed,
            best: self.best.clone(),
            best_generation: self.best_generation,
            leader,
            lengths,
        })
    }

    /// The remaining generations as a lazy iterator of snapshots.
    ///
    /// The iterator ends after the configured generation count, or fuses
    /// after yielding a fatal error.
    pub fn snapshots(&mut self) -> Snapshots<'_> {
        Snapshots {
            evolver: self,
            failed: false,
        }
    }

    /// Runs every remaining generation and returns the terminal result.
    pub fn run(self) -> Result<RunResult, EvolveError> {
        self.run_inner(None, None)
    }

    /// Runs to completion unless `cancel` becomes true; the flag is checked
    /// between generations only, never mid-step.
    pub fn run_with_cancel(self, cancel: Arc<AtomicBool>) -> Result<RunResult, EvolveError> {
        self.run_inner(Some(cancel), None)
    }

    /// Runs to completion, feeding every snapshot to `sink` between its
    /// `open` and `close` calls.
    pub fn run_with_sink(
        self,
        sink: &mut dyn FrameSink,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RunResult, EvolveError> {
        self.run_inner(cancel, Some(sink))
    }

    fn run_inner(
        mut self,
        cancel: Option<Arc<AtomicBool>>,
        mut sink: Option<&mut dyn FrameSink>,
    ) -> Result<RunResult, EvolveError> {
        let mut history = Vec::with_capacity(self.config.generations + 1);
        history.push(self.best.length());
        if let Some(sink) = sink.as_deref_mut() {
            sink.open(&self.cities, &self.config);
        }

        let mut cancelled = false;
        while !self.is_finished() {
            if let Some(flag) = &cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            let generation = self.step()?;
            history.push(generation.best.length());
            if let Some(sink) = sink.as_deref_mut() {
                sink.frame(&generation);
            }
        }
        if let Some(sink) = sink.as_deref_mut() {
            sink.close();
        }

        info!(
            best_length_km = self.best.length(),
            generation_found = self.best_generation,
            generations = self.completed,
            cancelled,
            "run finished"
        );
        Ok(RunResult {
            best_length_km: self.best.length(),
            best: self.best,
            generation_found: self.best_generation,
            generations: self.completed,
            cancelled,
            length_history: history,
            config: self.config,
        })
    }

    fn breed_sequential(&mut self, count: usize) -> Result<Vec<Tour>, EvolveError> {
        let mut offspring = Vec::with_capacity(count);
        for _ in 0..count {
            let p1 = self.config.selection.select(&self.population, &mut self.rng)?;
            let p2 = self.config.selection.select(&self.population, &mut self.rng)?;
            let child = order_crossover(
                self.population.get(p1),
                self.population.get(p2),
                &mut self.rng,
            );
            offspring.push(swap_mutation(&child, self.config.mutation_rate, &mut self.rng));
        }
        Ok(offspring)
    }

    /// Offspring construction is the parallelism boundary: parents and
    /// per-slot seeds are drawn sequentially (selection order is observable
    /// behavior), then children are built on the rayon pool against the
    /// immutable current population and joined before the re-sort.
    fn breed_parallel(&mut self, count: usize) -> Result<Vec<Tour>, EvolveError> {
        let mut picks = Vec::with_capacity(count);
        for _ in 0..count {
            let p1 = self.config.selection.select(&self.population, &mut self.rng)?;
            let p2 = self.config.selection.select(&self.population, &mut self.rng)?;
            picks.push((p1, p2, self.rng.random::<u64>()));
        }

        let population = &self.population;
        let rate = self.config.mutation_rate;
        let offspring = picks
            .into_par_iter()
            .map(|(p1, p2, seed)| {
                let mut rng = create_rng(seed);
                let child = order_crossover(population.get(p1), population.get(p2), &mut rng);
                swap_mutation(&child, rate, &mut rng)
            })
            .collect();
        Ok(offspring)
    }
}

/// Lazy per-generation snapshot iterator returned by
/// [`Evolver::snapshots`].
pub struct Snapshots<'a> {
    evolver: &'a mut Evolver,
    failed: bool,
}

impl Iterator for Snapshots<'_> {
    type Item = Result<Generation, EvolveError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.evolver.is_finished() {
            return None;
        }
        let item = self.evolver.step();
        self.failed = item.is_err();
        Some(item)
    }
}
