//! The population: a fitness-sorted collection of tours.

use crate::tour::{CitySet, Tour};
use rand::Rng;
use std::cmp::Ordering;
use std::sync::Arc;

/// An ordered collection of [`Tour`]s, kept sorted by descending fitness.
///
/// Invalid tours (no fitness) always sort after every valid one, so the
/// valid individuals form a prefix and `individuals[0]` is the current best
/// whenever any valid tour exists. Sorting is stable: ties keep their
/// insertion order.
#[derive(Debug)]
pub struct Population {
    individuals: Vec<Tour>,
}

impl Population {
    /// Seeds a population of `n` independent uniformly-random tours.
    pub fn from_random<R: Rng>(n: usize, cities: &Arc<CitySet>, rng: &mut R) -> Self {
        let individuals = (0..n).map(|_| Tour::random(cities.clone(), rng)).collect();
        Self::from_tours(individuals)
    }

    /// Builds a population from existing tours, sorting them.
    pub fn from_tours(individuals: Vec<Tour>) -> Self {
        let mut population = Self { individuals };
        population.sort();
        population
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// The individual at rank `i` (0 = fittest).
    pub fn get(&self, i: usize) -> &Tour {
        &self.individuals[i]
    }

    /// All individuals in rank order.
    pub fn individuals(&self) -> &[Tour] {
        &self.individuals
    }

    /// The fittest individual, if any valid tour exists.
    pub fn best(&self) -> Option<&Tour> {
        self.individuals.first().filter(|tour| tour.is_valid())
    }

    /// Number of valid individuals. Because the population is sorted, the
    /// valid tours occupy ranks `0..valid_count()`.
    pub fn valid_count(&self) -> usize {
        self.individuals
            .iter()
            .take_while(|tour| tour.is_valid())
            .count()
    }

    /// Keeps the top `elite_count` individuals unchanged, replaces the rest
    /// with `offspring`, and re-sorts.
    ///
    /// The caller supplies exactly `len() - elite_count` offspring to keep
    /// the population size fixed. `elite_count == 0` replaces everything.
    pub fn replace_non_elite(&mut self, elite_count: usize, offspring: Vec<Tour>) {
        debug_assert!(elite_count <= self.individuals.len());
        self.individuals.truncate(elite_count);
        self.individuals.extend(offspring);
        self.sort();
    }

    fn sort(&mut self) {
        self.individuals.sort_by(compare_fitness_desc);
    }
}

/// Descending fitness; invalid tours after all valid ones.
fn compare_fitness_desc(a: &Tour, b: &Tour) -> Ordering {
    match (a.fitness(), b.fitness()) {
        (Some(fa), Some(fb)) => fb.partial_cmp(&fa).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
