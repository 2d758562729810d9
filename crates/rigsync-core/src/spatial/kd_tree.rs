use std::ops::Range;

use glam::Vec3;

#[derive(Debug, Clone)]
struct KdNode {
    point: Vec3,
    /// Index of `point` in the array the tree was built from
    index: usize,
    axis: usize,
    left: Option<usize>,
    right: Option<usize>,
}

/// Static 3D k-d tree
///
/// The points are copied into the tree nodes at build time; the input array
/// is never reordered. Queries return indices into that original array.
#[derive(Debug, Clone, Default)]
pub struct KdTree {
    nodes: Vec<KdNode>,
    root: Option<usize>,
}

impl KdTree {
    pub fn build(points: &[Vec3]) -> Self {
        Self::build_range(points, 0..points.len())
    }

    /// Build over `points[range]`; the range is clamped to the array
    ///
    /// Returned indices still refer to positions in the full `points` array.
    pub fn build_range(points: &[Vec3], range: Range<usize>) -> Self {
        let end = range.end.min(points.len());
        let start = range.start.min(end);
        let mut order: Vec<usize> = (start..end).collect();
        let mut tree = Self {
            nodes: Vec::with_capacity(order.len()),
            root: None,
        };
        tree.root = tree.build_node(points, &mut order, 0);
        tree
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn build_node(&mut self, points: &[Vec3], order: &mut [usize], depth: usize) -> Option<usize> {
        if order.is_empty() {
            return None;
        }
        let axis = depth % 3;
        let last = order.len() - 1;

        let pivot = median_of_three(points, order, axis);
        order.swap(pivot, last);
        let pivot_value = points[order[last]][axis];

        // Lomuto partition: strictly smaller values go left
        let mut store = 0;
        for i in 0..last {
            if points[order[i]][axis] < pivot_value {
                order.swap(i, store);
                store += 1;
            }
        }
        order.swap(store, last);

        let index = order[store];
        let id = self.nodes.len();
        self.nodes.push(KdNode {
            point: points[index],
            index,
            axis,
            left: None,
            right: None,
        });

        let (left, rest) = order.split_at_mut(store);
        let left = self.build_node(points, left, depth + 1);
        let right = self.build_node(points, &mut rest[1..], depth + 1);
        self.nodes[id].left = left;
        self.nodes[id].right = right;
        Some(id)
    }

    /// Index of the point closest to `query`, `None` for an empty tree
    ///
    /// Among equally distant points the first one reached wins.
    pub fn find_nearest(&self, query: Vec3) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        self.search(self.root, query, &mut best);
        best.map(|(index, _)| index)
    }

    fn search(&self, node: Option<usize>, query: Vec3, best: &mut Option<(usize, f32)>) {
        let Some(id) = node else {
            return;
        };
        let node = &self.nodes[id];

        let dist = node.point.distance_squared(query);
        if best.map_or(true, |(_, d)| dist < d) {
            *best = Some((node.index, dist));
        }

        let diff = query[node.axis] - node.point[node.axis];
        let (near, far) = if diff < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        self.search(near, query, best);
        if best.map_or(true, |(_, d)| diff * diff < d) {
            self.search(far, query, best);
        }
    }
}

/// Position within `order` of the median of its first, middle and last values
fn median_of_three(points: &[Vec3], order: &[usize], axis: usize) -> usize {
    let first = 0;
    let last = order.len() - 1;
    let mid = (first + last) / 2;

    let a = points[order[first]][axis];
    let b = points[order[mid]][axis];
    let c = points[order[last]][axis];

    if a < b {
        if b < c {
            mid
        } else if a < c {
            last
        } else {
            first
        }
    } else if a < c {
        first
    } else if b < c {
        last
    } else {
        mid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_tree_has_no_nearest() {
        let tree = KdTree::build(&[]);
        assert!(tree.is_empty());
        assert_eq!(tree.find_nearest(Vec3::ZERO), None);
    }

    #[test]
    fn test_single_point_is_always_nearest() {
        let tree = KdTree::build(&[Vec3::new(3.0, -1.0, 2.0)]);
        assert_eq!(tree.find_nearest(Vec3::new(100.0, 0.0, 0.0)), Some(0));
    }

    #[test]
    fn test_nearest_on_a_line() {
        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(5.0, 0.0, 0.0),
        ];
        let tree = KdTree::build(&points);
        assert_eq!(tree.find_nearest(Vec3::new(4.0, 0.0, 0.0)), Some(2));
        assert_eq!(tree.find_nearest(Vec3::new(9.0, 0.0, 0.0)), Some(1));
        assert_eq!(tree.find_nearest(Vec3::new(-3.0, 0.0, 0.0)), Some(0));
    }

    #[test]
    fn test_exact_match_returns_that_index() {
        let points: Vec<Vec3> = (0..20)
            .map(|i| Vec3::new(i as f32, (i * 7 % 5) as f32, (i * 3 % 4) as f32))
            .collect();
        let tree = KdTree::build(&points);
        for (i, p) in points.iter().enumerate() {
            assert_eq!(tree.find_nearest(*p), Some(i));
        }
    }

    #[test]
    fn test_build_range_keeps_original_indices() {
        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
        ];
        let tree = KdTree::build_range(&points, 2..4);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.find_nearest(Vec3::ZERO), Some(2));

        let clamped = KdTree::build_range(&points, 3..10);
        assert_eq!(clamped.find_nearest(Vec3::ZERO), Some(3));
    }

    #[test]
    fn test_median_of_three_uses_lower_middle() {
        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ];
        // first=0, middle=3, last=2 on x: the median is the last value
        assert_eq!(median_of_three(&points, &[0, 1, 2, 3], 0), 3);
        // two values: middle and first coincide
        assert_eq!(median_of_three(&points, &[1, 3], 0), 0);
    }

    #[test]
    fn test_duplicate_points_resolve_to_first_reached() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(KdTree::build(&[p, p]).find_nearest(p), Some(0));
        // the median pivot becomes the root and is reached first
        assert_eq!(KdTree::build(&[p, p, p]).find_nearest(p), Some(1));
    }

    fn point() -> impl Strategy<Value = Vec3> {
        (-50i32..50, -50i32..50, -50i32..50)
            .prop_map(|(x, y, z)| Vec3::new(x as f32, y as f32, z as f32))
    }

    proptest! {
        #[test]
        fn prop_matches_brute_force_distance(
            points in prop::collection::vec(point(), 1..60),
            query in point(),
        ) {
            let tree = KdTree::build(&points);
            let found = tree.find_nearest(query).unwrap();
            let best = points
                .iter()
                .map(|p| p.distance_squared(query))
                .fold(f32::INFINITY, f32::min);
            prop_assert_eq!(points[found].distance_squared(query), best);
        }
    }
}
