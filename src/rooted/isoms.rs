// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Isomorphism classes specialized to a fixed root.
//!
//! Once a root is fixed, only the CIsoms minimizing it can map candidate
//! extensions onto each other, and at depth k of the projective walk only
//! the QIsoms fixing the first k cell counts remain usable. Both
//! restrictions are precomputed here, together with each QIsom's preimages
//! of the standard and nonzero bases (the bases an outer driver needs to
//! re-shear a permuted candidate).

use crate::cells::CellPerms;
use crate::perms::{self, Perms};
use crate::rooted::Rooted;

/// The isom classes available to a search with a fixed root.
#[derive(Debug)]
pub struct Isoms {
    /// CIsoms that minimize the root.
    pub cisoms: CellPerms,
    /// For each projective depth, the QIsoms preserving the counts fixed
    /// so far.
    pub qisoms: Vec<Perms>,
    /// For each depth and QIsom, the basis mapped to the standard basis.
    pub qbases: Vec<Vec<Vec<usize>>>,
    /// For each depth and QIsom, the basis mapped to the nonzero basis.
    pub qnz_bases: Vec<Vec<Vec<usize>>>,
}

impl Isoms {
    pub fn new(rooted: &Rooted) -> Isoms {
        let c = rooted.cells;
        let cisoms = c.cisoms_minimizing_root(rooted.root);

        // Walk the projective cells, fixing each count (and its inverse
        // cell's) in turn.
        let mut qisoms = Vec::with_capacity(c.proj_cells.indices.len());
        let mut counts_prefix = vec![0; c.cells.len()];
        for &cell in &c.proj_cells.indices {
            let count = c.counts[cell];
            counts_prefix[cell] = count;
            counts_prefix[c.qspace.inv[cell]] = count;

            qisoms.push(c.qisoms_fixing_counts(&counts_prefix));
        }

        let mut qbases = Vec::with_capacity(qisoms.len());
        let mut qnz_bases = Vec::with_capacity(qisoms.len());
        for depth_isoms in &qisoms {
            let mut bases = Vec::with_capacity(depth_isoms.len());
            let mut nz_bases = Vec::with_capacity(depth_isoms.len());
            for qisom in &depth_isoms.perms {
                let qinv = perms::inverse(qisom);
                bases.push(c.qspace.std_basis.iter().map(|&b| qinv[b]).collect());
                nz_bases.push(c.nonzero_basis.iter().map(|&b| qinv[b]).collect());
            }
            qbases.push(bases);
            qnz_bases.push(nz_bases);
        }

        Isoms {
            cisoms,
            qisoms,
            qbases,
            qnz_bases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::{Bits32, Cells};
    use crate::space::Space;

    fn standard_rooted(cells: &Cells) -> Rooted<'_> {
        Rooted::new(cells, Bits32::from_bits(78))
    }

    #[test]
    fn test_depths_match_projective_cells() {
        let cells = Cells::new(Space::get(4), vec![4, 2, 2, 2, 2, 2, 2, 2, 2]);
        let isoms = Isoms::new(&standard_rooted(&cells));

        assert_eq!(isoms.qisoms.len(), cells.proj_cells.indices.len());
        assert_eq!(isoms.cisoms.len(), 8);

        // Fixing further counts never enlarges the class.
        for depth in 1..isoms.qisoms.len() {
            assert!(isoms.qisoms[depth].len() <= isoms.qisoms[depth - 1].len());
        }
    }

    #[test]
    fn test_qisoms_fix_count_prefixes() {
        let cells = Cells::new(Space::get(4), vec![4, 2, 2, 2, 2, 2, 2, 2, 2]);
        let isoms = Isoms::new(&standard_rooted(&cells));

        let mut counts_prefix = vec![0; 9];
        for (depth, &cell) in cells.proj_cells.indices.iter().enumerate() {
            counts_prefix[cell] = cells.counts[cell];
            counts_prefix[cells.qspace.inv[cell]] = cells.counts[cell];

            for perm in &isoms.qisoms[depth].perms {
                for q in 0..9 {
                    assert_eq!(counts_prefix[perm[q]], counts_prefix[q]);
                }
            }
        }
    }

    #[test]
    fn test_qbases_invert_the_isoms() {
        let cells = Cells::new(Space::get(4), vec![4, 2, 2, 2, 2, 2, 2, 2, 2]);
        let isoms = Isoms::new(&standard_rooted(&cells));

        for (depth, depth_isoms) in isoms.qisoms.iter().enumerate() {
            for (i, qisom) in depth_isoms.perms.iter().enumerate() {
                for (j, &b) in cells.qspace.std_basis.iter().enumerate() {
                    assert_eq!(qisom[isoms.qbases[depth][i][j]], b);
                }
                for (j, &b) in cells.nonzero_basis.iter().enumerate() {
                    assert_eq!(qisom[isoms.qnz_bases[depth][i][j]], b);
                }
            }
        }
    }
}
