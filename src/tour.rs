//! Candidate routes over a shared, immutable city set.
//!
//! A [`CitySet`] owns the resolved locations of one problem instance plus
//! the [`DistanceMetric`] used to score routes. A [`Tour`] is an immutable
//! permutation of indices into that set with its total length and fitness
//! computed once at construction. Crossover and mutation never modify a
//! tour in place; they always build a new one.

use crate::geo::{DistanceMetric, Haversine, Location};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::sync::Arc;

/// The fixed set of cities one run optimizes over.
///
/// Shared read-only by every [`Tour`] via `Arc`, so a tour is just a thin
/// index vector.
pub struct CitySet {
    locations: Vec<Location>,
    metric: Box<dyn DistanceMetric>,
}

impl CitySet {
    /// Builds a city set scored by great-circle distance.
    pub fn new(locations: Vec<Location>) -> Self {
        Self::with_metric(locations, Haversine)
    }

    /// Builds a city set with a custom distance metric.
    pub fn with_metric(locations: Vec<Location>, metric: impl DistanceMetric + 'static) -> Self {
        Self {
            locations,
            metric: Box::new(metric),
        }
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// The location at index `i`.
    pub fn location(&self, i: usize) -> &Location {
        &self.locations[i]
    }

    /// All locations, in problem-definition order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Distance in kilometers between the cities at indices `i` and `j`.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.metric.distance(&self.locations[i], &self.locations[j])
    }
}

impl fmt::Debug for CitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CitySet")
            .field("locations", &self.locations)
            .finish_non_exhaustive()
    }
}

/// One candidate route: an ordered permutation of the full city set.
///
/// Length is the **open-path** sum over the `N-1` consecutive edges; there
/// is no implicit closing edge back to the first city. Fitness is
/// `1 / length`, or `None` when the length is zero (all cities coincident),
/// which marks the tour invalid without aborting the run.
#[derive(Clone)]
pub struct Tour {
    cities: Arc<CitySet>,
    order: Vec<usize>,
    length: f64,
    fitness: Option<f64>,
}

impl Tour {
    /// Constructs a tour from a permutation of city indices.
    ///
    /// `order` must be a permutation of `0..cities.len()`; engine code only
    /// ever builds tours through paths that guarantee this.
    pub fn new(cities: Arc<CitySet>, order: Vec<usize>) -> Self {
        debug_assert!(is_permutation(&order, cities.len()), "order must be a permutation");

        let length: f64 = order
            .windows(2)
            .map(|pair| cities.distance(pair[0], pair[1]))
            .sum();
        let fitness = if length > 0.0 {
            Some(1.0 / length)
        } else {
            tracing::warn!(route = ?labels_of(&cities, &order), "tour length is zero, fitness undefined");
            None
        };

        Self {
            cities,
            order,
            length,
            fitness,
        }
    }

    /// Builds a uniformly random tour (Fisher–Yates shuffle).
    pub fn random<R: Rng>(cities: Arc<CitySet>, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..cities.len()).collect();
        order.shuffle(rng);
        Self::new(cities, order)
    }

    /// The visiting order as city indices.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// The city set this tour routes over.
    pub fn cities(&self) -> &Arc<CitySet> {
        &self.cities
    }

    /// Total open-path length in kilometers.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// `1 / length`, or `None` for a degenerate zero-length tour.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Whether this tour has a defined fitness.
    pub fn is_valid(&self) -> bool {
        self.fitness.is_some()
    }

    /// The visiting order as city labels.
    pub fn labels(&self) -> Vec<&str> {
        self.order
            .iter()
            .map(|&i| self.cities.location(i).label.as_str())
            .collect()
    }
}

impl fmt::Debug for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tour")
            .field("route", &self.labels())
            .field("length", &self.length)
            .field("fitness", &self.fitness)
            .finish()
    }
}

fn labels_of<'a>(cities: &'a CitySet, order: &[usize]) -> Vec<&'a str> {
    order
        .iter()
        .map(|&i| cities.location(i).label.as_str())
        .collect()
}

fn is_permutation(order: &[usize], n: usize) -> bool {
    if order.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &i in order {
        if i >= n || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Euclidean;
    use crate::random::create_rng;

    fn grid(coords: &[(f64, f64)]) -> Arc<CitySet> {
        let locations = coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Location::new(x, y, format!("c{i}")))
            .collect();
        Arc::new(CitySet::with_metric(locations, Euclidean))
    }

    #[test]
    fn test_three_city_open_path_length() {
        // c0=(0,0), c1=(3,4), c2=(3,0): edges are 5 and 4, no closing edge.
        let cities = grid(&[(0.0, 0.0), (3.0, 4.0), (3.0, 0.0)]);
        let tour = Tour::new(cities, vec![0, 1, 2]);
        assert!((tour.length() - 9.0).abs() < 1e-12);
        assert!((tour.fitness().unwrap() - 1.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_four_city_open_path_length() {
        // Unit square walked around: 3 edges of length 1. A closed circuit
        // would measure 4.
        let cities = grid(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let tour = Tour::new(cities, vec![0, 1, 2, 3]);
        assert!((tour.length() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_length_depends_on_order() {
        let cities = grid(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let around = Tour::new(cities.clone(), vec![0, 1, 2, 3]);
        let zigzag = Tour::new(cities, vec![0, 2, 1, 3]);
        assert!(zigzag.length() > around.length());
    }

    #[test]
    fn test_coincident_cities_invalid_not_fatal() {
        let cities = grid(&[(2.0, 2.0), (2.0, 2.0)]);
        let tour = Tour::new(cities, vec![0, 1]);
        assert_eq!(tour.length(), 0.0);
        assert!(tour.fitness().is_none());
        assert!(!tour.is_valid());
    }

    #[test]
    fn test_labels_follow_order() {
        let cities = grid(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let tour = Tour::new(cities, vec![2, 0, 1]);
        assert_eq!(tour.labels(), ["c2", "c0", "c1"]);
    }

    #[test]
    fn test_random_tour_is_permutation() {
        let cities = grid(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)]);
        let mut rng = create_rng(42);
        for _ in 0..50 {
            let tour = Tour::random(cities.clone(), &mut rng);
            assert!(is_permutation(tour.order(), 5));
        }
    }

    #[test]
    fn test_single_city_tour_is_degenerate() {
        let cities = grid(&[(1.0, 1.0)]);
        let tour = Tour::new(cities, vec![0]);
        assert_eq!(tour.length(), 0.0);
        assert!(!tour.is_valid());
    }
}
