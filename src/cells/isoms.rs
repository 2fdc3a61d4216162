// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Cell-preserving isomorphism classes.
//!
//! Write a point of a cell-partitioned space as p = (x, y), with x the
//! quotient coordinates (which cell) and y the in-cell coordinates. A
//! linear isomorphism preserving the set of cells is a block matrix
//!
//! ```text
//!     |A 0|
//!     |C D|
//! ```
//!
//! with A invertible over QSpace, D invertible over CSpace and C an
//! arbitrary CDim×QDim matrix (the upper-right block must vanish: all
//! points of a cell share x, so their images must too). The group
//! therefore decomposes into three classes, commuting up to reordering
//! their own elements:
//!
//! 1. **QIsoms** (A): rigidly permute cells, points fixed within cells.
//! 2. **CIsoms** (D): one linear isom applied to every cell in parallel.
//! 3. **Shears** (C): map (x, y) to (x, Cx + y) — translate within cells
//!    as one moves along quotient directions (see
//!    [`Shearer`](crate::Shearer)).
//!
//! Together with in-cell translations these generate all cell-preserving
//! affine isomorphisms.

use rustc_hash::FxHashSet;

use crate::cells::{Bits32, CellPerms, Cells};
use crate::perms::{compose, Perms};

impl Cells {
    /// The subset of CIsoms sending `root` to its minimal image, as a
    /// permutation class ready for MinImage queries.
    pub fn cisoms_minimizing_root(&self, root: Bits32) -> CellPerms {
        let mut perms = Vec::new();
        // The empty word is the maximum of the order, so any image
        // replaces it.
        let mut min_image = Bits32::default();

        for perm1 in &self.cisoms.perms1.perms {
            let image1 = root.apply(perm1);
            for perm2 in &self.cisoms.perms2.perms {
                let image2 = image1.apply(perm2);

                if image2 < min_image {
                    min_image = image2;
                    perms.clear();
                }
                if image2 == min_image {
                    perms.push(compose(perm1, perm2));
                }
            }
        }
        self.new_cell_perms(perms)
    }

    /// The subset of QIsoms preserving `counts`, deduplicated by their
    /// action on the nonzero-count cells.
    pub fn qisoms_fixing_counts(&self, counts: &[usize]) -> Perms {
        assert_eq!(counts.len(), self.cells.len(), "counts: length mismatch");

        let nonzero: Vec<usize> = counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(i, _)| i)
            .collect();

        let mut seen: FxHashSet<Vec<usize>> = FxHashSet::default();
        let mut perms = Vec::new();
        for perm in &self.qisoms.perms {
            if (0..perm.len()).all(|i| counts[perm[i]] == counts[i]) {
                let nonzero_perm: Vec<usize> = nonzero.iter().map(|&i| perm[i]).collect();
                if seen.insert(nonzero_perm) {
                    perms.push(perm.clone());
                }
            }
        }
        Perms::new(perms)
    }
}
