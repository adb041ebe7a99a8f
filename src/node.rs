use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

use crate::build::{build_subtree, rebuild};
use crate::error::{Result, TreeError};
use crate::{Axis, BalanceConfig, Coordinate, NamedPoint, TreeSink};

/// A subtree. Leaves hold the stored points; branches hold only a splitter
/// coordinate and route lookups: `<=` splitter goes left, `>` goes right.
#[derive(Debug, Clone)]
pub(crate) enum Node<P> {
    Leaf(P),
    Branch(Box<Branch<P>>),
}

#[derive(Debug, Clone)]
pub(crate) struct Branch<P> {
    pub(crate) axis: Axis,
    pub(crate) splitter: Coordinate,
    pub(crate) left: Node<P>,
    pub(crate) right: Node<P>,
    // number of leaves below
    pub(crate) size: usize,
    // max number of edges to a leaf
    pub(crate) height: usize,
}

/// Result of deleting from a subtree.
pub(crate) enum Deletion<P> {
    /// The subtree was the matching leaf; the caller collapses into the sibling.
    Emptied(P),
    /// The point was removed; the updated subtree is returned.
    Kept(Node<P>, P),
    /// No match on the search path; the subtree is handed back untouched.
    Missing(Node<P>),
}

/// Result of a scapegoat search along an insertion path.
pub(crate) enum Rebalance<P> {
    Rebuilt(Node<P>),
    /// The search reached a leaf without finding a scapegoat.
    Balanced(Node<P>),
}

impl<P> Branch<P> {
    fn goes_left(&self, coord: &Coordinate) -> bool {
        goes_left(self.axis, &self.splitter, coord)
    }

    fn child_toward(&self, coord: &Coordinate) -> &Node<P> {
        if self.goes_left(coord) {
            &self.left
        } else {
            &self.right
        }
    }
}

fn goes_left(axis: Axis, splitter: &Coordinate, coord: &Coordinate) -> bool {
    axis.compare(coord, splitter) != Ordering::Greater
}

impl<P> Node<P> {
    pub(crate) fn branch(axis: Axis, splitter: Coordinate, left: Node<P>, right: Node<P>) -> Self {
        let size = left.size() + right.size();
        let height = 1 + left.height().max(right.height());
        Node::Branch(Box::new(Branch {
            axis,
            splitter,
            left,
            right,
            size,
            height,
        }))
    }

    pub(crate) fn size(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Branch(branch) => branch.size,
        }
    }

    pub(crate) fn height(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Branch(branch) => branch.height,
        }
    }

    /// Append the points of this subtree, left to right.
    pub(crate) fn entries<'a>(&'a self, out: &mut Vec<&'a P>) {
        match self {
            Node::Leaf(point) => out.push(point),
            Node::Branch(branch) => {
                branch.left.entries(out);
                branch.right.entries(out);
            }
        }
    }

    /// Tear the subtree down into its points, left to right.
    pub(crate) fn into_points(self, out: &mut Vec<P>) {
        match self {
            Node::Leaf(point) => out.push(point),
            Node::Branch(branch) => {
                let Branch { left, right, .. } = *branch;
                left.into_points(out);
                right.into_points(out);
            }
        }
    }
}

impl<P: NamedPoint> Node<P> {
    pub(crate) fn find(&self, coord: &Coordinate) -> Option<&P> {
        let mut node = self;
        loop {
            match node {
                Node::Leaf(point) => {
                    return if Axis::X.compare(coord, &point.coordinate()) == Ordering::Equal {
                        Some(point)
                    } else {
                        None
                    };
                }
                Node::Branch(branch) => node = branch.child_toward(coord),
            }
        }
    }

    /// Insert below this node, returning the new subtree root. A leaf always
    /// splits into a two-leaf subtree; equal points are not rejected.
    pub(crate) fn insert(self, point: P) -> Node<P> {
        match self {
            Node::Leaf(stored) => {
                trace!(name = point.name(), "splitting leaf");
                build_subtree(vec![point, stored])
            }
            Node::Branch(branch) => {
                let Branch {
                    axis,
                    splitter,
                    left,
                    right,
                    ..
                } = *branch;
                if goes_left(axis, &splitter, &point.coordinate()) {
                    Node::branch(axis, splitter, left.insert(point), right)
                } else {
                    Node::branch(axis, splitter, left, right.insert(point))
                }
            }
        }
    }

    pub(crate) fn delete(self, coord: &Coordinate) -> Deletion<P> {
        match self {
            Node::Leaf(stored) => {
                if Axis::X.compare(coord, &stored.coordinate()) == Ordering::Equal {
                    Deletion::Emptied(stored)
                } else {
                    Deletion::Missing(Node::Leaf(stored))
                }
            }
            Node::Branch(branch) => {
                let Branch {
                    axis,
                    splitter,
                    left,
                    right,
                    ..
                } = *branch;
                if goes_left(axis, &splitter, coord) {
                    match left.delete(coord) {
                        Deletion::Emptied(removed) => Deletion::Kept(right, removed),
                        Deletion::Kept(left, removed) => {
                            Deletion::Kept(Node::branch(axis, splitter, left, right), removed)
                        }
                        Deletion::Missing(left) => {
                            Deletion::Missing(Node::branch(axis, splitter, left, right))
                        }
                    }
                } else {
                    match right.delete(coord) {
                        Deletion::Emptied(removed) => Deletion::Kept(left, removed),
                        Deletion::Kept(right, removed) => {
                            Deletion::Kept(Node::branch(axis, splitter, left, right), removed)
                        }
                        Deletion::Missing(right) => {
                            Deletion::Missing(Node::branch(axis, splitter, left, right))
                        }
                    }
                }
            }
        }
    }

    /// Retrace the path to `coord` and rebuild the shallowest node whose
    /// child on that path is too heavy.
    pub(crate) fn rebalance(
        self,
        coord: &Coordinate,
        config: &BalanceConfig,
        depth: usize,
    ) -> Rebalance<P> {
        let branch = match self {
            leaf @ Node::Leaf(_) => return Rebalance::Balanced(leaf),
            Node::Branch(branch) => branch,
        };

        let to_left = branch.goes_left(coord);
        let child_size = if to_left {
            branch.left.size()
        } else {
            branch.right.size()
        };
        if config.is_scapegoat(branch.size, child_size) {
            debug!(
                size = branch.size,
                child_size, depth, "rebuilding scapegoat subtree"
            );
            let rebuilt = rebuild(Node::Branch(branch));
            debug_assert!(rebuilt.check_weight_balance(config).is_ok());
            return Rebalance::Rebuilt(rebuilt);
        }

        let Branch {
            axis,
            splitter,
            left,
            right,
            ..
        } = *branch;
        if to_left {
            match left.rebalance(coord, config, depth + 1) {
                Rebalance::Rebuilt(left) => Rebalance::Rebuilt(Node::branch(axis, splitter, left, right)),
                Rebalance::Balanced(left) => {
                    Rebalance::Balanced(Node::branch(axis, splitter, left, right))
                }
            }
        } else {
            match right.rebalance(coord, config, depth + 1) {
                Rebalance::Rebuilt(right) => Rebalance::Rebuilt(Node::branch(axis, splitter, left, right)),
                Rebalance::Balanced(right) => {
                    Rebalance::Balanced(Node::branch(axis, splitter, left, right))
                }
            }
        }
    }

    /// Exhaustive search: every leaf is visited, no subtree is pruned.
    /// On equal distance the incumbent is kept.
    pub(crate) fn nearest_neighbor_step<'a>(
        &'a self,
        query: &Coordinate,
        best: Option<&'a P>,
    ) -> &'a P {
        match self {
            Node::Leaf(point) => match best {
                None => point,
                Some(best) => {
                    if point.distance(query) < best.distance(query) {
                        point
                    } else {
                        best
                    }
                }
            },
            Node::Branch(branch) => {
                let best = branch.left.nearest_neighbor_step(query, best);
                branch.right.nearest_neighbor_step(query, Some(best))
            }
        }
    }

    pub(crate) fn print<S: TreeSink + ?Sized>(&self, sink: &mut S) -> fmt::Result {
        match self {
            Node::Leaf(point) => sink.leaf(point.name(), point.coordinate()),
            Node::Branch(branch) => {
                sink.begin_branch(branch.axis, branch.splitter)?;
                branch.left.print(sink)?;
                branch.right.print(sink)?;
                sink.end_branch()
            }
        }
    }

    /// Verify cached aggregates and splitter sides for every branch.
    /// Fails if any branch below `self` has a child heavy enough to be a
    /// scapegoat under `config`.
    pub(crate) fn check_weight_balance(&self, config: &BalanceConfig) -> Result<()> {
        let branch = match self {
            Node::Leaf(_) => return Ok(()),
            Node::Branch(branch) => branch,
        };
        for child in &[&branch.left, &branch.right] {
            if config.is_scapegoat(branch.size, child.size()) {
                return Err(TreeError::InvalidState(format!(
                    "child of size {} outweighs branch of size {}",
                    child.size(),
                    branch.size
                )));
            }
        }
        branch.left.check_weight_balance(config)?;
        branch.right.check_weight_balance(config)
    }

    pub(crate) fn check(&self) -> Result<()> {
        let branch = match self {
            Node::Leaf(_) => return Ok(()),
            Node::Branch(branch) => branch,
        };
        branch.left.check()?;
        branch.right.check()?;

        let size = branch.left.size() + branch.right.size();
        if branch.size != size {
            return Err(TreeError::InvalidState(format!(
                "branch size {} != {} children",
                branch.size, size
            )));
        }
        let height = 1 + branch.left.height().max(branch.right.height());
        if branch.height != height {
            return Err(TreeError::InvalidState(format!(
                "branch height {} != {}",
                branch.height, height
            )));
        }

        let mut left = Vec::new();
        branch.left.entries(&mut left);
        if left
            .iter()
            .any(|p| branch.axis.compare(&p.coordinate(), &branch.splitter) == Ordering::Greater)
        {
            return Err(TreeError::InvalidState(
                "left subtree holds a point above its splitter".to_string(),
            ));
        }
        // Points identical to the splitter may sit on either side.
        let mut right = Vec::new();
        branch.right.entries(&mut right);
        if right
            .iter()
            .any(|p| branch.axis.compare(&p.coordinate(), &branch.splitter) == Ordering::Less)
        {
            return Err(TreeError::InvalidState(
                "right subtree holds a point below its splitter".to_string(),
            ));
        }
        Ok(())
    }
}
