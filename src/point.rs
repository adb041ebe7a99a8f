use std::fmt;

use crate::Coordinate;

/// The record type an `SgTree` stores: a location plus a name.
///
/// Only the location drives ordering, lookup and deletion. Names are
/// carried through to results and structural dumps.
pub trait NamedPoint {
    fn coordinate(&self) -> Coordinate;

    fn name(&self) -> &str;

    fn distance(&self, other: &Coordinate) -> f64 {
        self.coordinate().distance(other)
    }
}

impl NamedPoint for Coordinate {
    fn coordinate(&self) -> Coordinate {
        *self
    }

    fn name(&self) -> &str {
        ""
    }
}

impl<P: NamedPoint + ?Sized> NamedPoint for &P {
    fn coordinate(&self) -> Coordinate {
        (**self).coordinate()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct City {
    name: String,
    coordinate: Coordinate,
    color: String,
    radius: f64,
}

impl City {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        City {
            name: name.into(),
            coordinate: Coordinate::new(x, y),
            color: "black".to_string(),
            radius: 0.,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn x(&self) -> f64 {
        self.coordinate.x
    }

    pub fn y(&self) -> f64 {
        self.coordinate.y
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl NamedPoint for City {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({},{})",
            self.name, self.coordinate.x as i64, self.coordinate.y as i64
        )
    }
}
