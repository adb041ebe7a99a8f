use std::cmp::Ordering;

use crate::Coordinate;

/// Split axis of a branch. Each axis carries a total order over
/// coordinates: primary on the axis itself, ties broken by the other.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Index as printed in `splitDim` (0 for x, 1 for y).
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }

    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    pub fn compare(self, a: &Coordinate, b: &Coordinate) -> Ordering {
        let other = self.other();
        total_cmp(a.get(self), b.get(self)).then_with(|| total_cmp(a.get(other), b.get(other)))
    }
}

/// Order floats, NaNs last.
pub(crate) fn total_cmp(x1: f64, x2: f64) -> Ordering {
    match x1.partial_cmp(&x2) {
        Some(ord) => ord,
        None => {
            // One or both is a NaN
            if x1.is_nan() {
                if x2.is_nan() {
                    Ordering::Equal
                } else {
                    Ordering::Greater
                }
            } else {
                Ordering::Less
            }
        }
    }
}
