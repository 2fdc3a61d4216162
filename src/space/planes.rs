// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Dense plane-count pruning over direction sets.
//!
//! The [`Points`](crate::space::Points) plane counts recompute dot products
//! per query; during a search the same question is asked millions of times
//! for symmetric candidate sets, so this module stores, for each direction,
//! the bitset of orthogonal directions. A symmetric point set is described
//! by its direction bitset and a plane count is twice an intersection
//! cardinality.

use fixedbitset::FixedBitSet;

use crate::space::Space;

/// All planes through the origin of a Space, as orthogonal-direction
/// bitsets.
#[derive(Debug, Clone)]
pub struct Planes {
    space: &'static Space,
    /// For each direction, the set of orthogonal directions.
    planes: Vec<FixedBitSet>,
}

impl Planes {
    pub fn new(space: &'static Space) -> Self {
        let l = space.directions.len();
        let mut planes = Vec::with_capacity(l);
        for &p in &space.directions {
            let mut plane = FixedBitSet::with_capacity(l);
            for (i, &q) in space.directions.iter().enumerate() {
                if space.coords.dot(p, q) == 0 {
                    plane.insert(i);
                }
            }
            planes.push(plane);
        }
        Self { space, planes }
    }

    /// The direction bitset of a point set (points that are not direction
    /// representatives are ignored; a symmetric set is fully described by
    /// its representatives).
    pub fn direction_set(&self, pts: &[usize]) -> FixedBitSet {
        let mut directions = FixedBitSet::with_capacity(self.space.directions.len());
        for &p in pts {
            if let Some(dir) = self.space.pt_to_direction[p] {
                directions.insert(dir);
            }
        }
        directions
    }

    fn plane_count(&self, directions: &FixedBitSet, index: usize) -> usize {
        // Each direction stands for a {v, -v} pair.
        2 * self.planes[index].intersection(directions).count()
    }

    /// Whether any plane holds more than `max` points of the set.
    pub fn count_exceeds(&self, directions: &FixedBitSet, max: usize) -> bool {
        (0..self.planes.len()).any(|i| self.plane_count(directions, i) > max)
    }

    /// Plane counts as `"[keys] => [values]"`, sorted by key.
    pub fn plane_counts_string(&self, directions: &FixedBitSet) -> String {
        let mut counts = std::collections::BTreeMap::new();
        for i in 0..self.planes.len() {
            *counts.entry(self.plane_count(directions, i)).or_insert(0usize) += 1;
        }
        let keys: Vec<usize> = counts.keys().copied().collect();
        let values: Vec<usize> = counts.values().copied().collect();
        format!("{:?} => {:?}", keys, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_counts_string() {
        let space = Space::get(2);
        let planes = Planes::new(space);
        let directions = planes.direction_set(&[3, 4, 5, 6, 7, 8]);
        assert_eq!(planes.plane_counts_string(&directions), "[0, 2] => [1, 3]");
    }

    #[test]
    fn test_count_exceeds() {
        let space = Space::get(2);
        let planes = Planes::new(space);
        let directions = planes.direction_set(&[3, 4, 5, 6, 7, 8]);
        assert!(planes.count_exceeds(&directions, 1));
        assert!(!planes.count_exceeds(&directions, 2));
    }

    #[test]
    fn test_matches_points_counts() {
        use crate::space::Points;

        let space = Space::get(3);
        let pts: Vec<usize> = vec![1, 2, 3, 6, 9, 18];
        let planes = Planes::new(space);
        let directions = planes.direction_set(&pts);
        let points = Points::new(space, pts);
        assert_eq!(
            planes.plane_counts_string(&directions),
            points.plane_counts_string()
        );
    }
}
