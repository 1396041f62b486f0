//! Snapshot consumers: the reporting/rendering boundary.
//!
//! Plotting, animation export, and map rendering live outside this crate;
//! what they all need is the per-generation snapshot stream. [`FrameSink`]
//! is that interface, with an explicit lifecycle — `open` once, `frame` per
//! generation, `close` once — instead of any global figure state.

use crate::config::EvolveConfig;
use crate::evolver::Generation;
use crate::tour::CitySet;
use tracing::info;

/// Receives the snapshot stream of one run.
///
/// Implementations append one frame per generation: a plot, an animation
/// frame, a progress line. `open` and `close` bracket the run exactly once
/// each.
pub trait FrameSink {
    /// Called once before the first generation.
    fn open(&mut self, _cities: &CitySet, _config: &EvolveConfig) {}

    /// Called once per completed generation.
    fn frame(&mut self, generation: &Generation);

    /// Called once after the last generation, even when the run was
    /// cancelled.
    fn close(&mut self) {}
}

/// A sink that logs each generation through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceSink;

impl FrameSink for TraceSink {
    fn open(&mut self, cities: &CitySet, config: &EvolveConfig) {
        info!(
            cities = cities.len(),
            population_size = config.population_size,
            generations = config.generations,
            "run started"
        );
    }

    fn frame(&mut self, generation: &Generation) {
        info!(
            generation = generation.index,
            leader_length_km = generation.leader.length(),
            best_length_km = generation.best.length(),
            best_generation = generation.best_generation,
            "generation"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolver::Evolver;
    use crate::geo::{Euclidean, Location};
    use crate::tour::CitySet;
    use std::sync::Arc;

    #[derive(Default)]
    struct RecordingSink {
        opened: usize,
        frames: Vec<usize>,
        closed: usize,
    }

    impl FrameSink for RecordingSink {
        fn open(&mut self, _cities: &CitySet, _config: &EvolveConfig) {
            self.opened += 1;
        }

        fn frame(&mut self, generation: &Generation) {
            self.frames.push(generation.index);
        }

        fn close(&mut self) {
            self.closed += 1;
        }
    }

    fn cities() -> Arc<CitySet> {
        let locations = (0..5)
            .map(|i| Location::new(i as f64, (i * i) as f64, format!("c{i}")))
            .collect();
        Arc::new(CitySet::with_metric(locations, Euclidean))
    }

    #[test]
    fn test_sink_lifecycle_open_frames_close() {
        let config = EvolveConfig::default()
            .with_population_size(20)
            .with_elite_count(2)
            .with_generations(6)
            .with_seed(42);
        let evolver = Evolver::seed(cities(), config).unwrap();

        let mut sink = RecordingSink::default();
        let result = evolver.run_with_sink(&mut sink, None).unwrap();

        assert_eq!(sink.opened, 1);
        assert_eq!(sink.closed, 1);
        assert_eq!(sink.frames, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(result.generations, 6);
    }

    #[test]
    fn test_sink_closed_on_cancellation() {
        use std::sync::atomic::AtomicBool;

        let config = EvolveConfig::default()
            .with_population_size(20)
            .with_elite_count(2)
            .with_generations(100)
            .with_seed(42);
        let evolver = Evolver::seed(cities(), config).unwrap();

        let mut sink = RecordingSink::default();
        let cancel = Arc::new(AtomicBool::new(true));
        let result = evolver.run_with_sink(&mut sink, Some(cancel)).unwrap();

        assert!(result.cancelled);
        assert_eq!(sink.opened, 1);
        assert!(sink.frames.is_empty());
        assert_eq!(sink.closed, 1);
    }
}
