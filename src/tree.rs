use std::fmt;
use std::iter::FromIterator;

use tracing::{debug, error};

use crate::build::{build_tree, rebuild};
use crate::error::{Result, TreeError};
use crate::node::{Deletion, Node, Rebalance};
use crate::{BalanceConfig, Coordinate, NamedPoint, TreeSink, XmlSink};

/// Counters for the two kinds of reconstruction the tree performs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RebuildStats {
    /// Subtrees rebuilt at a scapegoat after an insertion.
    pub scapegoat_rebuilds: usize,
    /// Whole-tree rebuilds after deletions shrank the tree below half
    /// its high-water mark.
    pub global_rebuilds: usize,
}

/// A scapegoat kd-tree over named 2D points.
///
/// Points live in leaves; branches split on x or y at a median splitter.
/// Insertions rebuild the shallowest too-heavy ancestor when the tree grows
/// taller than `floor(log(max_items) / log(3/2))`, and deletions rebuild
/// the whole tree once fewer than half of `max_items` points remain.
///
/// Points are matched by coordinates only. Inserting a point whose
/// coordinates are already stored is not rejected.
#[derive(Debug, Clone)]
pub struct SgTree<P> {
    root: Option<Node<P>>,
    n_items: usize,
    // high-water mark since the last global rebuild
    max_items: usize,
    config: BalanceConfig,
    stats: RebuildStats,
}

impl<P: NamedPoint> Default for SgTree<P> {
    fn default() -> Self {
        SgTree::new()
    }
}

impl<P: NamedPoint> SgTree<P> {
    pub fn new() -> Self {
        SgTree {
            root: None,
            n_items: 0,
            max_items: 0,
            config: BalanceConfig::default(),
            stats: RebuildStats::default(),
        }
    }

    pub fn with_config(config: BalanceConfig) -> Result<Self> {
        config.validate()?;
        Ok(SgTree {
            config,
            ..SgTree::new()
        })
    }

    /// Build a balanced tree over `points` in one pass.
    pub fn from_points(points: impl IntoIterator<Item = P>) -> Self {
        let points: Vec<P> = points.into_iter().collect();
        let n_items = points.len();
        SgTree {
            root: build_tree(points),
            n_items,
            max_items: n_items,
            ..SgTree::new()
        }
    }

    pub fn len(&self) -> usize {
        self.n_items
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Max number of edges from the root to a leaf; 0 when empty.
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, Node::height)
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Height the tree may reach before an insertion triggers a rebalance.
    pub fn max_height(&self) -> usize {
        self.config.max_height(self.max_items)
    }

    pub fn config(&self) -> BalanceConfig {
        self.config
    }

    pub fn stats(&self) -> RebuildStats {
        self.stats
    }

    /// Find the stored point with the same coordinates as `query`.
    pub fn find<Q: NamedPoint + ?Sized>(&self, query: &Q) -> Option<&P> {
        self.root
            .as_ref()
            .and_then(|root| root.find(&query.coordinate()))
    }

    pub fn contains<Q: NamedPoint + ?Sized>(&self, query: &Q) -> bool {
        self.find(query).is_some()
    }

    /// Insert a point. Fails only if the tree's balance invariant is broken;
    /// the point is stored and counted even when `Err` is returned.
    pub fn insert(&mut self, point: P) -> Result<()> {
        let coord = point.coordinate();
        let root = match self.root.take() {
            None => Node::Leaf(point),
            Some(root) => root.insert(point),
        };
        self.n_items += 1;
        self.max_items += 1;
        debug_assert_eq!(self.n_items, root.size());

        let max_height = self.config.max_height(self.max_items);
        if root.height() <= max_height {
            self.root = Some(root);
            return Ok(());
        }
        match root.rebalance(&coord, &self.config, 0) {
            Rebalance::Rebuilt(root) => {
                self.stats.scapegoat_rebuilds += 1;
                self.root = Some(root);
                Ok(())
            }
            Rebalance::Balanced(root) => {
                let height = root.height();
                self.root = Some(root);
                error!(height, max_height, "no scapegoat on the insertion path");
                Err(TreeError::InvalidState(format!(
                    "height {} exceeds {} but no scapegoat was found",
                    height, max_height
                )))
            }
        }
    }

    /// Delete the point with the same coordinates as `query`, returning it.
    /// On failure the tree is left unchanged.
    pub fn delete<Q: NamedPoint + ?Sized>(&mut self, query: &Q) -> Result<P> {
        let coord = query.coordinate();
        let root = match self.root.take() {
            None => return Err(not_found(&coord)),
            Some(root) => root,
        };
        let removed = match root.delete(&coord) {
            Deletion::Missing(root) => {
                self.root = Some(root);
                return Err(not_found(&coord));
            }
            Deletion::Emptied(removed) => removed,
            Deletion::Kept(root, removed) => {
                self.root = Some(root);
                removed
            }
        };

        self.n_items -= 1;
        if 2 * self.n_items < self.max_items {
            debug!(
                n_items = self.n_items,
                max_items = self.max_items,
                "triggered rebuild after deletion"
            );
            self.root = self.root.take().map(rebuild);
            self.max_items = self.n_items;
            self.stats.global_rebuilds += 1;
        }
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.n_items = 0;
        self.max_items = 0;
        self.stats = RebuildStats::default();
    }

    /// All stored points, left to right. The order follows each branch's
    /// split axis, not one global ordering.
    pub fn entry_list(&self) -> Vec<&P> {
        let mut entries = Vec::with_capacity(self.n_items);
        if let Some(root) = &self.root {
            root.entries(&mut entries);
        }
        entries
    }

    /// Consume the tree, yielding its points in `entry_list` order.
    pub fn into_points(self) -> Vec<P> {
        let mut points = Vec::with_capacity(self.n_items);
        if let Some(root) = self.root {
            root.into_points(&mut points);
        }
        points
    }

    /// Closest stored point to `query` by Euclidean distance. Every leaf is
    /// examined; ties keep the leftmost point.
    pub fn nearest_neighbor<Q: NamedPoint + ?Sized>(&self, query: &Q) -> Result<&P> {
        match &self.root {
            None => Err(TreeError::EmptyTree),
            Some(root) => Ok(root.nearest_neighbor_step(&query.coordinate(), None)),
        }
    }

    pub fn print<S: TreeSink + ?Sized>(&self, sink: &mut S) -> fmt::Result {
        sink.begin_tree()?;
        if let Some(root) = &self.root {
            root.print(sink)?;
        }
        sink.end_tree()
    }

    /// The `<KdTree>` XML dump, as written by `XmlSink`.
    pub fn to_xml(&self) -> String {
        let mut sink = XmlSink::new(String::new());
        match self.print(&mut sink) {
            Ok(()) => sink.into_inner(),
            // writing into a String cannot fail
            Err(fmt::Error) => String::new(),
        }
    }

    /// Check the cached sizes and heights, splitter sides, and the item
    /// counters against the actual structure.
    pub fn check_invariants(&self) -> Result<()> {
        let size = self.root.as_ref().map_or(0, Node::size);
        if size != self.n_items {
            return Err(TreeError::InvalidState(format!(
                "tree holds {} points but counts {}",
                size, self.n_items
            )));
        }
        if self.max_items < self.n_items {
            return Err(TreeError::InvalidState(format!(
                "high-water mark {} below item count {}",
                self.max_items, self.n_items
            )));
        }
        match &self.root {
            Some(root) => root.check(),
            None => Ok(()),
        }
    }
}

fn not_found(coord: &Coordinate) -> TreeError {
    TreeError::PointNotFound {
        x: coord.x,
        y: coord.y,
    }
}

impl<P: NamedPoint> FromIterator<P> for SgTree<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        SgTree::from_points(iter)
    }
}

/// Renders the `<KdTree>` XML dump.
impl<P: NamedPoint> fmt::Display for SgTree<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(&mut XmlSink::new(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Axis, City};

    fn x_chain(xs: &[f64]) -> Node<City> {
        let leaf = Node::Leaf(City::new(format!("c{}", xs[0]), xs[0], 0.));
        if xs.len() == 1 {
            return leaf;
        }
        Node::branch(Axis::X, Coordinate::new(xs[0], 0.), leaf, x_chain(&xs[1..]))
    }

    #[test]
    fn test_empty_tree() {
        let tree: SgTree<City> = SgTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert!(tree.find(&Coordinate::new(0., 0.)).is_none());
        assert!(tree.entry_list().is_empty());
        assert_eq!(tree.to_string(), "<KdTree/>\n");
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn test_single_insert_is_leaf() {
        let mut tree = SgTree::new();
        tree.insert(City::new("A", 3., 4.)).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.max_items(), 1);
        assert_eq!(
            tree.to_string(),
            "<KdTree>\n  <external name=\"A\" x=\"3\" y=\"4\"/>\n</KdTree>\n"
        );
    }

    #[test]
    fn test_delete_missing_leaves_tree_unchanged() {
        let mut tree: SgTree<City> = SgTree::new();
        assert_eq!(
            tree.delete(&Coordinate::new(1., 1.)),
            Err(TreeError::PointNotFound { x: 1., y: 1. })
        );
        tree.insert(City::new("A", 0., 0.)).unwrap();
        tree.insert(City::new("B", 10., 0.)).unwrap();
        let before = tree.to_string();
        assert!(tree.delete(&Coordinate::new(5., 5.)).is_err());
        assert_eq!(tree.to_string(), before);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.max_items(), 2);
    }

    #[test]
    fn test_delete_last_point_empties() {
        let mut tree = SgTree::new();
        tree.insert(City::new("A", 0., 0.)).unwrap();
        let removed = tree.delete(&City::new("ignored name", 0., 0.)).unwrap();
        assert_eq!(removed.name(), "A");
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.max_items(), 0);
    }

    #[test]
    fn test_clear() {
        let mut tree = SgTree::new();
        for i in 0..10 {
            tree.insert(City::new(format!("c{}", i), i as f64, 0.)).unwrap();
        }
        for i in 0..6 {
            tree.delete(&Coordinate::new(i as f64, 0.)).unwrap();
        }
        assert_eq!(tree.len(), 4);
        assert!(tree.stats().scapegoat_rebuilds > 0);
        assert!(tree.stats().global_rebuilds > 0);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.max_items(), 0);
        assert_eq!(tree.stats(), RebuildStats::default());
        tree.insert(City::new("again", 1., 1.)).unwrap();
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_to_xml_matches_display() {
        let mut tree = SgTree::new();
        assert_eq!(tree.to_xml(), "<KdTree/>\n");
        tree.insert(City::new("A", 0., 0.)).unwrap();
        tree.insert(City::new("B", 10.9, 0.)).unwrap();
        let expected = concat!(
            "<KdTree>\n",
            "  <internal splitDim=\"0\" x=\"0\" y=\"0\">\n",
            "    <external name=\"A\" x=\"0\" y=\"0\"/>\n",
            "    <external name=\"B\" x=\"10\" y=\"0\"/>\n",
            "  </internal>\n",
            "</KdTree>\n",
        );
        assert_eq!(tree.to_xml(), expected);
        assert_eq!(tree.to_xml(), tree.to_string());
    }

    #[test]
    fn test_insert_without_scapegoat_keeps_point() {
        // The left chain is already taller than the bound; the new point
        // lands on the light right side, where nothing is a scapegoat.
        let root = Node::branch(
            Axis::X,
            Coordinate::new(4., 0.),
            x_chain(&[0., 1., 2., 3., 4.]),
            Node::Leaf(City::new("e", 10., 0.)),
        );
        let mut tree = SgTree {
            root: Some(root),
            n_items: 6,
            max_items: 6,
            ..SgTree::new()
        };
        let late = City::new("f", 11., 0.);
        match tree.insert(late.clone()) {
            Err(TreeError::InvalidState(_)) => {}
            other => panic!("expected InvalidState, got {:?}", other),
        }
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.max_items(), 7);
        assert_eq!(tree.find(&late), Some(&late));
        assert_eq!(tree.height(), 5);
        assert_eq!(tree.stats().scapegoat_rebuilds, 0);
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn test_nearest_neighbor_empty_fails() {
        let tree: SgTree<City> = SgTree::new();
        assert_eq!(
            tree.nearest_neighbor(&Coordinate::new(0., 0.)),
            Err(TreeError::EmptyTree)
        );
    }

    #[test]
    fn test_with_config_validates() {
        assert!(SgTree::<City>::with_config(BalanceConfig::new(3, 4).unwrap()).is_ok());
        let bad = BalanceConfig {
            numerator: 1,
            denominator: 2,
        };
        assert!(SgTree::<City>::with_config(bad).is_err());
    }
}
