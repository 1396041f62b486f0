//! Error taxonomy for the evolutionary engine.
//!
//! Configuration and location-resolution problems are fatal and surface
//! before any generation runs. A single degenerate tour is not an error at
//! all — it is marked invalid on the [`Tour`](crate::Tour) itself and
//! excluded from ranking — but a population with no valid individuals left
//! cannot continue and collapses the run.

use crate::config::ConfigError;

/// Fatal errors raised by [`Evolver`](crate::Evolver).
#[derive(Debug, thiserror::Error)]
pub enum EvolveError {
    /// The configuration was rejected at construction time.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Every individual in the population is invalid (zero-length tours);
    /// there is nothing left to select or rank.
    #[error("population collapsed: no valid tours remain")]
    PopulationCollapse,

    /// Fitness-proportionate selection requires a strictly positive fitness
    /// sum over the valid individuals.
    #[error("fitness-proportionate selection requires a positive fitness sum")]
    SelectionPrecondition,

    /// `step()` was called after the configured generation count completed.
    #[error("the run has already finished")]
    Finished,
}

/// A place name the location provider could not resolve.
///
/// Propagated before seeding; the engine never starts a run with a
/// partially resolved city set.
#[derive(Debug, thiserror::Error)]
#[error("unable to resolve location {name:?}")]
pub struct UnresolvedLocation {
    /// The name that failed to resolve.
    pub name: String,
}
