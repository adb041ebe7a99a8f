#![allow(dead_code)]

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::Path;

use sg_kdtree::from_wkt::parse_cities;
use sg_kdtree::{City, Coordinate, NamedPoint};

//// Utility functions

/// Each blank-line separated WKT block of `tests/testdata/{name}.wkt`,
/// parsed into cities named `{name}.{block}.{index}`.
pub(crate) fn read_test_case(name: &str) -> Vec<Vec<City>> {
    let filename = format!("tests/testdata/{}.wkt", name);
    let filepath = Path::new(env!("CARGO_MANIFEST_DIR")).join(Path::new(&filename));
    let contents = fs::read_to_string(&filepath).unwrap();

    contents
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .enumerate()
        .map(|(idx, block)| parse_cities(block, &format!("{}.{}.", name, idx)).unwrap())
        .collect()
}

pub(crate) fn get_random_points(n: usize, seed: u64) -> Vec<Coordinate> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut results = Vec::new();
    for _i in 0..n {
        results.push(Coordinate::new(
            rng.gen_range(-10., 110.),
            rng.gen_range(-10., 110.),
        ));
    }

    results
}

pub(crate) fn brute_force_nearest<'a>(query: &Coordinate, cities: &'a [City]) -> &'a City {
    let mut best = &cities[0];
    for city in cities {
        if city.distance(query) < best.distance(query) {
            best = city;
        }
    }
    best
}

pub(crate) fn sorted_names<'a>(cities: impl IntoIterator<Item = &'a City>) -> Vec<String> {
    let mut names: Vec<String> = cities.into_iter().map(|c| c.name().to_string()).collect();
    names.sort();
    names
}
