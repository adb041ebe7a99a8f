use crate::node::Node;
use crate::{NamedPoint, Rectangle};

/// Build a balanced subtree from an unordered point set.
///
/// Each level splits on the axis with the widest coordinate range (ties
/// favor x) at the median: the lower half gets `n - n / 2` points and its
/// last point becomes the splitter.
pub(crate) fn build_tree<P: NamedPoint>(points: Vec<P>) -> Option<Node<P>> {
    if points.is_empty() {
        None
    } else {
        Some(build_subtree(points))
    }
}

/// `points` must be non-empty.
pub(crate) fn build_subtree<P: NamedPoint>(mut points: Vec<P>) -> Node<P> {
    debug_assert!(!points.is_empty());
    let num_points = points.len();
    if num_points == 1 {
        return Node::Leaf(points.swap_remove(0));
    }

    let axis = Rectangle::of(&points).widest_axis();
    points.sort_by(|a, b| axis.compare(&a.coordinate(), &b.coordinate()));

    let mid = num_points - num_points / 2;
    let upper = points.split_off(mid);
    let splitter = points[mid - 1].coordinate();
    let left = build_subtree(points);
    let right = build_subtree(upper);
    Node::branch(axis, splitter, left, right)
}

/// Replace a subtree by a freshly built one over the same points.
pub(crate) fn rebuild<P: NamedPoint>(node: Node<P>) -> Node<P> {
    if let Node::Leaf(_) = node {
        return node;
    }
    let mut points = Vec::with_capacity(node.size());
    node.into_points(&mut points);
    build_subtree(points)
}
