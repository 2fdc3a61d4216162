// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Point sets with plane-count invariants.
//!
//! The multiset of plane counts (how many points of a set lie in each plane
//! through the origin) is invariant under linear isomorphisms, so two sets
//! with differing plane counts cannot be isomorphic. Outer search drivers
//! use this as a cheap non-isomorphism certificate.

use std::collections::BTreeMap;
use std::fmt;

use crate::space::{Space, ORIGIN};

/// A sorted set of point indices in a Space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Points {
    pub space: &'static Space,
    pub pts: Vec<usize>,
}

impl Points {
    pub fn new(space: &'static Space, pts: Vec<usize>) -> Self {
        Self { space, pts }
    }

    /// The number of points lying in the plane orthogonal to `normal`.
    pub fn plane_count(&self, normal: usize) -> usize {
        assert_ne!(normal, ORIGIN, "plane normal must be nonzero");
        let perp = &self.space.perp[normal];
        self.pts.iter().filter(|&&p| perp[p]).count()
    }

    /// Map each plane count to the number of origin planes with that count.
    pub fn plane_counts(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for &normal in &self.space.directions {
            *counts.entry(self.plane_count(normal)).or_insert(0) += 1;
        }
        counts
    }

    /// Plane counts as `"[keys] => [values]"`, sorted by key.
    pub fn plane_counts_string(&self) -> String {
        let counts = self.plane_counts();
        let keys: Vec<usize> = counts.keys().copied().collect();
        let values: Vec<usize> = counts.values().copied().collect();
        format!("{:?} => {:?}", keys, values)
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Points{:?}", self.pts)
    }
}
