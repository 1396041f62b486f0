//! Genetic-algorithm search for short routes through geographic locations.
//!
//! A population of candidate [`Tour`]s over a fixed [`CitySet`] is evolved
//! generation by generation: parents are drawn by a pluggable [`Selection`]
//! strategy, recombined with ordered crossover, perturbed by swap mutation,
//! and the fittest tours are carried over unchanged (elitism). Fitness is
//! the inverse of a tour's open-path length under an injectable
//! [`DistanceMetric`] (great-circle kilometers by default).
//!
//! # Key Types
//!
//! - [`Location`] / [`CitySet`]: the problem definition
//! - [`EvolveConfig`]: run parameters with builder-style setters
//! - [`Evolver`]: the generational loop — step-by-step snapshots or a full
//!   [`RunResult`]
//! - [`FrameSink`]: the boundary where plotting/animation layers consume
//!   per-generation snapshots
//!
//! # Example
//!
//! ```
//! use evoroute::{CitySet, Evolver, EvolveConfig, Location, Selection};
//! use std::sync::Arc;
//!
//! let cities = Arc::new(CitySet::new(vec![
//!     Location::new(37.3891, -5.9845, "Sevilla"),
//!     Location::new(36.5271, -6.2886, "Cadiz"),
//!     Location::new(36.7213, -4.4214, "Malaga"),
//!     Location::new(37.1773, -3.5986, "Granada"),
//!     Location::new(37.8882, -4.7794, "Cordoba"),
//! ]));
//!
//! let config = EvolveConfig::default()
//!     .with_population_size(50)
//!     .with_elite_count(5)
//!     .with_mutation_rate(0.1)
//!     .with_selection(Selection::Tournament(5))
//!     .with_generations(30)
//!     .with_seed(42);
//!
//! let result = Evolver::seed(cities, config)
//!     .and_then(|evolver| evolver.run())
//!     .unwrap();
//! println!("{} km: {}", result.best_length_km, result.route().join(" - "));
//! ```
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

mod config;
mod error;
mod evolver;
mod geo;
mod operators;
mod population;
mod provider;
mod random;
mod report;
mod selection;
mod tour;

pub use config::{ConfigError, EvolveConfig};
pub use error::{EvolveError, UnresolvedLocation};
pub use evolver::{Evolver, Generation, RunResult, Snapshots};
pub use geo::{DistanceMetric, Euclidean, Haversine, Location};
pub use operators::{order_crossover, swap_mutation};
pub use population::Population;
pub use provider::{LocationProvider, TableProvider};
pub use random::create_rng;
pub use report::{FrameSink, TraceSink};
pub use selection::Selection;
pub use tour::{CitySet, Tour};
