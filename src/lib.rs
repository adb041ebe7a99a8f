mod axis;
mod build;
mod config;
mod coordinate;
mod error;
pub mod from_wkt;
mod node;
mod point;
mod print;
mod rectangle;
mod tree;

pub use axis::Axis;
pub use config::BalanceConfig;
pub use coordinate::Coordinate;
pub use error::{Result, TreeError};
pub use point::{City, NamedPoint};
pub use print::{TreeSink, XmlSink};
pub use rectangle::Rectangle;
pub use tree::{RebuildStats, SgTree};
