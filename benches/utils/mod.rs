use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use sg_kdtree::{City, Coordinate};

//// Utility functions

pub(crate) fn get_random_cities(n: usize, seed: u64) -> Vec<City> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut results = Vec::with_capacity(n);
    for i in 0..n {
        results.push(City::new(
            format!("c{}", i),
            rng.gen_range(0., 10_000.),
            rng.gen_range(0., 10_000.),
        ));
    }

    results
}

/// Points along a diagonal, in order: the worst case for an unbalanced tree.
pub(crate) fn get_sorted_cities(n: usize) -> Vec<City> {
    (0..n)
        .map(|i| City::new(format!("s{}", i), i as f64, i as f64 / 2.))
        .collect()
}

pub(crate) fn get_random_points(n: usize, seed: u64) -> Vec<Coordinate> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut results = Vec::with_capacity(n);
    for _i in 0..n {
        results.push(Coordinate::new(
            rng.gen_range(0., 10_000.),
            rng.gen_range(0., 10_000.),
        ));
    }

    results
}
