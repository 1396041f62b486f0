//! Genetic operators: ordered crossover and swap mutation.
//!
//! Both operators build a **new** [`Tour`]; parents are never modified.
//! The child is always a valid permutation of the full city set, for every
//! possible cut-point pair including the degenerate empty segment.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

use crate::tour::Tour;
use rand::Rng;

/// Ordered crossover of two parent tours.
///
/// Two cut points are drawn independently and uniformly from `[0, N-1]`.
/// The child starts with `parent1.order[start..end]` copied verbatim (empty
/// when the cuts coincide), followed by every city of `parent2` not already
/// in that segment, in `parent2`'s relative order. The segment is a subset
/// of the city set and the tail is its exact complement, so the child is a
/// permutation by construction.
///
/// # Panics
///
/// Panics if the parents route over different numbers of cities or none.
pub fn order_crossover<R: Rng>(parent1: &Tour, parent2: &Tour, rng: &mut R) -> Tour {
    let n = parent1.order().len();
    assert_eq!(n, parent2.order().len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    let g1 = rng.random_range(0..n);
    let g2 = rng.random_range(0..n);
    let order = ordered_fill(parent1.order(), parent2.order(), g1.min(g2), g1.max(g2));
    Tour::new(parent1.cities().clone(), order)
}

/// Copy `parent1[start..end]`, then append the complement in `parent2`'s
/// order.
fn ordered_fill(parent1: &[usize], parent2: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = parent1.len();
    let mut child = Vec::with_capacity(n);
    let mut in_segment = vec![false; n];

    for &city in &parent1[start..end] {
        child.push(city);
        in_segment[city] = true;
    }
    for &city in parent2 {
        if !in_segment[city] {
            child.push(city);
        }
    }
    child
}

/// Swap mutation at a per-position rate.
///
/// Walks the positions left to right; each position independently mutates
/// with probability `rate` by swapping with a uniformly drawn position
/// (possibly itself). Swaps apply in place as the walk proceeds, so a later
/// swap can move a city an earlier swap already relocated — the sequential
/// dependency is part of the operator's definition.
///
/// `rate == 0.0` returns a tour with the input's exact order.
pub fn swap_mutation<R: Rng>(tour: &Tour, rate: f64, rng: &mut R) -> Tour {
    let mut order = tour.order().to_vec();
    let n = order.len();
    for i in 0..n {
        if rng.random_range(0.0..1.0) < rate {
            let j = rng.random_range(0..n);
            order.swap(i, j);
        }
    }
    Tour::new(tour.cities().clone(), order)
}
