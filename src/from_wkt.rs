//! Loading point sets from WKT text.
//!
//! Accepts `POINT`, `MULTIPOINT` and (nested) `GEOMETRYCOLLECTION` items.
//! Empty points are skipped.
use std::str::FromStr;

use wkt::{Geometry, Wkt};

use crate::error::{Result, TreeError};
use crate::{City, Coordinate};

pub fn parse_coordinates(text: &str) -> Result<Vec<Coordinate>> {
    let parsed: Wkt<f64> = Wkt::from_str(text).map_err(|e| TreeError::Wkt(e.to_string()))?;
    let mut coords = Vec::new();
    for geometry in parsed.items {
        collect_coordinates(geometry, &mut coords)?;
    }
    Ok(coords)
}

/// Parse points and name them `{prefix}{index}` in input order.
pub fn parse_cities(text: &str, prefix: &str) -> Result<Vec<City>> {
    Ok(parse_coordinates(text)?
        .into_iter()
        .enumerate()
        .map(|(i, c)| City::new(format!("{}{}", prefix, i), c.x, c.y))
        .collect())
}

fn collect_coordinates(geometry: Geometry<f64>, coords: &mut Vec<Coordinate>) -> Result<()> {
    match geometry {
        Geometry::Point(point) => {
            if let Some(coord) = point.0 {
                coords.push(Coordinate::new(coord.x, coord.y));
            }
        }
        Geometry::MultiPoint(multi) => {
            coords.extend(
                multi
                    .0
                    .into_iter()
                    .filter_map(|p| p.0)
                    .map(|c| Coordinate::new(c.x, c.y)),
            );
        }
        Geometry::GeometryCollection(collection) => {
            for geometry in collection.0 {
                collect_coordinates(geometry, coords)?;
            }
        }
        _ => {
            return Err(TreeError::Wkt(
                "expected POINT, MULTIPOINT or GEOMETRYCOLLECTION".to_string(),
            ))
        }
    }
    Ok(())
}
