use crate::{Axis, Coordinate, NamedPoint};

/// Axis-aligned extent of a point set. Used by the build engine to find
/// the axis with the widest spread.
#[derive(Copy, Clone, Debug)]
pub struct Rectangle {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl PartialEq for Rectangle {
    fn eq(&self, other: &Self) -> bool {
        if self.is_empty() {
            other.is_empty()
        } else {
            self.x_min == other.x_min
                && self.y_min == other.y_min
                && self.x_max == other.x_max
                && self.y_max == other.y_max
        }
    }
}

impl Rectangle {
    pub fn new(p1: Coordinate, p2: Coordinate) -> Self {
        Rectangle {
            x_min: p1.x.min(p2.x),
            y_min: p1.y.min(p2.y),
            x_max: p1.x.max(p2.x),
            y_max: p1.y.max(p2.y),
        }
    }

    pub fn new_empty() -> Self {
        Rectangle {
            x_min: f64::NAN,
            y_min: f64::NAN,
            x_max: f64::NAN,
            y_max: f64::NAN,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x_min.is_nan() || self.y_min.is_nan() || self.x_max.is_nan() || self.y_max.is_nan()
    }

    pub fn of<P: NamedPoint>(points: &[P]) -> Self {
        points.iter().fold(Rectangle::new_empty(), |mut s, p| {
            s.expand(p.coordinate());
            s
        })
    }

    pub fn expand(&mut self, coord: Coordinate) {
        self.x_min = self.x_min.min(coord.x);
        self.y_min = self.y_min.min(coord.y);
        self.x_max = self.x_max.max(coord.x);
        self.y_max = self.y_max.max(coord.y);
    }

    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x_max - self.x_min,
            Axis::Y => self.y_max - self.y_min,
        }
    }

    /// The axis with the larger extent; ties (and empty rectangles) favor x.
    pub fn widest_axis(&self) -> Axis {
        if self.extent(Axis::X) < self.extent(Axis::Y) {
            Axis::Y
        } else {
            Axis::X
        }
    }
}
