// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Cell partitions of a ternary Space.
//!
//! Overlaying cells is one of the primary ways the cap search tames its
//! exponential tree: a [`Cells`] partitions the points of a Space into
//! equal-size translation cosets of a subspace, assigns a target count to
//! each cell, and carries the classes of cell-preserving isomorphisms used
//! to enumerate candidates modulo symmetry.
//!
//! Each cell is isomorphic to a "cell space" (`CSpace`) of dimension
//! k ≤ 3; the cells themselves form a quotient space (`QSpace`) of
//! dimension d − k.

pub mod bits;
pub mod isoms;
pub mod perms;
pub mod shear;

pub use bits::{Bits32, BitsVec};
pub use perms::CellPerms;
pub use shear::Shearer;

use std::ops::Range;

use log::debug;

use crate::perms::{Perms, PermsProduct};
use crate::space::{Space, ORIGIN};

/// A partition of a Space's points into equal-size cells, with a target
/// count per cell.
#[derive(Debug)]
pub struct Cells {
    /// The partitioned Space.
    pub space: &'static Space,
    /// The cells: contiguous index ranges, one per quotient point.
    pub cells: Vec<Range<usize>>,
    /// Target count for each cell; symmetric under QSpace inversion.
    pub counts: Vec<usize>,
    /// Number of points per cell (3^k).
    pub cell_size: usize,

    /// The cell space (isomorphic to every cell).
    pub cspace: &'static Space,
    /// The quotient space (one point per cell).
    pub qspace: &'static Space,

    /// The projective subset of cells.
    pub proj_cells: ProjCells,
    /// Smallest-index QSpace basis drawn from positive-count cells; may be
    /// shorter than the quotient dimension when those cells do not span.
    pub nonzero_basis: Vec<usize>,

    /// The in-cell translation class.
    pub translations: CellPerms,
    /// Linear isoms of the cell space, kept factored.
    pub cisoms: PermsProduct,
    /// Linear isoms of the quotient space that fix the counts.
    pub qisoms: Perms,
}

impl Cells {
    /// Partition `space` by a count vector of length 3^q.
    ///
    /// Fatal unless the length is a positive power of 3, the cell dimension
    /// lands in 1..=3, and the counts are symmetric under QSpace inversion.
    pub fn new(space: &'static Space, counts: Vec<usize>) -> Cells {
        let n_cells = counts.len();
        let qdim = exact_log3(n_cells);
        assert!(qdim >= 1, "counts length must be a positive power of 3");
        assert!(space.d > qdim, "cell dimension must be >= 1");
        let cdim = space.d - qdim;
        assert!(cdim <= 3, "cell dimension must be <= 3");

        let cspace = Space::get(cdim);
        let qspace = Space::get(qdim);

        let cell_size = cspace.size();
        let cells: Vec<Range<usize>> = (0..n_cells)
            .map(|i| i * cell_size..(i + 1) * cell_size)
            .collect();

        for (i, &count) in counts.iter().enumerate() {
            assert_eq!(
                counts[qspace.inv[i]], count,
                "counts must be symmetric under inversion"
            );
        }

        let proj_cells = ProjCells::new(qspace, &counts);
        let nonzero_basis = nonzero_basis(qspace, &counts);

        let translations = CellPerms::new(cell_size, cspace.translations().perms);
        let cisoms = cspace.linear_isoms();
        debug!("# of CIsoms: {}", cisoms.len());
        let qisoms = qspace.linear_isoms_fixing_counts(&counts);
        debug!("# of QIsoms: {}", qisoms.len());

        Cells {
            space,
            cells,
            counts,
            cell_size,
            cspace,
            qspace,
            proj_cells,
            nonzero_basis,
            translations,
            cisoms,
            qisoms,
        }
    }

    /// An empty per-cell bit vector for this partition.
    pub fn new_bits_vec(&self) -> BitsVec {
        BitsVec::new(self.cells.len())
    }

    /// Wrap a class of in-cell permutations with this partition's cell
    /// size.
    pub fn new_cell_perms(&self, perms: Vec<Vec<usize>>) -> CellPerms {
        CellPerms::new(self.cell_size, perms)
    }
}

/// The "projective" subset of a Cells: the origin cell plus one cell per
/// QSpace direction. Symmetric point sets are determined by their content
/// on these cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjCells {
    /// Projective cell indices.
    pub indices: Vec<usize>,
    /// Corresponding counts.
    pub counts: Vec<usize>,
    /// Cumulative counts up to each cell, inclusive; non-origin cells
    /// count double to cover the paired inverse cell.
    pub sizes: Vec<usize>,
}

impl ProjCells {
    fn new(qspace: &Space, counts: &[usize]) -> ProjCells {
        let mut indices = vec![ORIGIN];
        indices.extend_from_slice(&qspace.directions);
        let counts: Vec<usize> = indices.iter().map(|&i| counts[i]).collect();

        let mut sizes = Vec::with_capacity(indices.len());
        sizes.push(counts[0]);
        for i in 1..indices.len() {
            sizes.push(sizes[i - 1] + 2 * counts[i]);
        }

        ProjCells {
            indices,
            counts,
            sizes,
        }
    }
}

/// The exact base-3 logarithm of `n`, or 0 when `n` is not a positive
/// power of 3.
fn exact_log3(n: usize) -> usize {
    let mut rest = n;
    let mut log = 0;
    while rest > 1 && rest % 3 == 0 {
        rest /= 3;
        log += 1;
    }
    if rest == 1 {
        log
    } else {
        0
    }
}

/// Greedy smallest-index basis of the quotient space using only
/// positive-count cells.
fn nonzero_basis(qspace: &Space, counts: &[usize]) -> Vec<usize> {
    let mut basis = Vec::new();
    let mut span = vec![ORIGIN];
    for p in 0..qspace.size() {
        if basis.len() == qspace.d {
            break;
        }
        if counts[p] > 0 && !span.contains(&p) {
            basis.push(p);
            span = qspace.span(&basis);
        }
    }
    basis
}
