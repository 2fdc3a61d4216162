// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Rooted enumeration: in-cell caps compatible with a fixed origin root.
//!
//! A [`Rooted`] is a cell partition together with a symmetric,
//! CIsom-minimal point set chosen in the origin cell. Fixing the root fixes
//! the symmetry class of a search; the enumerator then produces the caps a
//! single cell can hold given the points other cells have already
//! eliminated.
//!
//! The root's symmetry does work here: the root contains −r whenever it
//! contains r, and any candidate cell is implicitly paired with the inverse
//! cell holding the inverted candidate, so pairing the root with the
//! *inverse* of the candidate accounts for lines through the paired cell
//! as well.

pub mod isoms;

pub use isoms::Isoms;

use log::debug;

use crate::cells::{Bits32, Cells};

/// A cell partition with a fixed origin-cell root.
#[derive(Debug, Clone, Copy)]
pub struct Rooted<'a> {
    pub cells: &'a Cells,
    pub root: Bits32,
}

impl<'a> Rooted<'a> {
    pub fn new(cells: &'a Cells, root: Bits32) -> Rooted<'a> {
        Rooted { cells, root }
    }

    /// All caps of exactly `size` points in a single cell that avoid
    /// `elim` and are compatible with the root, appended to `out`.
    ///
    /// Results are produced in ascending order of their smallest point;
    /// each cap appears exactly once.
    pub fn cell_caps(&self, size: usize, elim: Bits32, out: &mut Vec<Bits32>) {
        self.extend_bits(Bits32::default(), size, elim, out);
    }

    /// Extend a partial cap by every admissible larger index.
    fn extend_bits(&self, bits: Bits32, size: usize, elim: Bits32, out: &mut Vec<Bits32>) {
        if bits.len() == size {
            out.push(bits);
            return;
        }

        // Points eliminated by pairs within bits, and by [root, -bits].
        let mut el = elim;
        el |= self.cells.eliminated(bits, bits);
        el |= self.cells.eliminated(self.root, bits.inv(self.cells.cspace));

        // Only change larger indices.
        let next = bits.maximum().map_or(0, |max| max + 1);
        for i in next..self.cells.cell_size {
            if !el.contains(i) {
                self.extend_bits(bits.set(i), size, elim, out);
            }
        }
    }
}

/// All symmetric root caps in the origin cell that are minimal in their
/// CIsom orbit.
pub fn min_roots(cells: &Cells) -> Vec<Rooted<'_>> {
    let caps = root_caps(cells, cells.counts[0]);
    debug!("# of roots in cell 0: {}", caps.len());

    let res: Vec<Rooted<'_>> = caps
        .into_iter()
        .filter(|&root| is_min_root(cells, root))
        .map(|root| Rooted::new(cells, root))
        .collect();
    debug!("# of unique roots: {}", res.len());
    res
}

/// All symmetric caps of a given size in the origin cell.
fn root_caps(cells: &Cells, size: usize) -> Vec<Bits32> {
    assert_eq!(size % 2, 0, "root size must be even");
    add_pairs(cells, vec![Bits32::default()], size / 2)
}

/// Extend each cap by `n_pairs` direction pairs {p, −p}, avoiding
/// eliminated points and keeping directions ascending.
fn add_pairs(cells: &Cells, caps: Vec<Bits32>, n_pairs: usize) -> Vec<Bits32> {
    if n_pairs == 0 {
        return caps;
    }

    let prev_caps = add_pairs(cells, caps, n_pairs - 1);
    let directions = &cells.cspace.directions;

    let mut next_caps = Vec::new();
    for cap in prev_caps {
        let elim = cells.eliminated(cap, cap);
        let max_dir = cap.intersect(directions).maximum();

        for &p in directions {
            if max_dir.map_or(true, |max| p > max) && !elim.contains(p) {
                next_caps.push(cap.set(p).set(cells.cspace.inv[p]));
            }
        }
    }
    next_caps
}

/// Whether `root` is minimal in its CIsom orbit.
fn is_min_root(cells: &Cells, root: Bits32) -> bool {
    for perm1 in &cells.cisoms.perms1.perms {
        let im1 = root.apply(perm1);
        for perm2 in &cells.cisoms.perms2.perms {
            if im1.apply(perm2) < root {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::Space;

    fn standard_cells() -> Cells {
        Cells::new(Space::get(4), vec![4, 2, 2, 2, 2, 2, 2, 2, 2])
    }

    fn caps_bits(rooted: &Rooted, size: usize, elim: Bits32) -> Vec<u32> {
        let mut out = Vec::new();
        rooted.cell_caps(size, elim, &mut out);
        out.iter().map(|b| b.bits()).collect()
    }

    #[test]
    fn test_cell_caps() {
        let cells = standard_cells();
        let rooted = Rooted::new(&cells, Bits32::from_bits(78));

        assert_eq!(
            caps_bits(&rooted, 1, Bits32::default()),
            vec![1, 2, 4, 8, 16, 32, 64, 128, 256]
        );
        assert_eq!(
            caps_bits(&rooted, 2, Bits32::default()),
            vec![17, 33, 129, 257, 10, 34, 66, 258, 12, 20, 68, 132, 136, 264, 80, 272, 96, 160]
        );
    }

    #[test]
    fn test_cell_caps_respects_elim() {
        let cells = standard_cells();
        let rooted = Rooted::new(&cells, Bits32::from_bits(78));

        // Forbid point 0: every cap through it disappears.
        let elim = Bits32::new(&[0]);
        let caps = caps_bits(&rooted, 2, elim);
        assert_eq!(caps, vec![10, 34, 66, 258, 12, 20, 68, 132, 136, 264, 80, 272, 96, 160]);
        for &cap in &caps {
            assert_eq!(cap & 1, 0);
        }
    }

    #[test]
    fn test_cell_caps_properties() {
        let cells = standard_cells();
        let rooted = Rooted::new(&cells, Bits32::from_bits(78));
        let cspace = cells.cspace;

        let mut out = Vec::new();
        rooted.cell_caps(2, Bits32::new(&[2]), &mut out);
        assert_eq!(out.len(), 14);

        let mut seen = std::collections::HashSet::new();
        for &cap in &out {
            assert_eq!(cap.len(), 2);
            assert!(!cap.contains(2));
            assert!(seen.insert(cap), "cap emitted twice");

            // No two cap points eliminate a third cap point.
            for p in 0..9 {
                for q in p + 1..9 {
                    if cap.contains(p) && cap.contains(q) {
                        assert!(!cap.contains(cspace.elim[p][q]));
                    }
                }
            }
            // No root point r and cap point c eliminate a cap point,
            // pairing r with -c for the implicit inverse cell.
            let inv_cap = cap.inv(cspace);
            for r in 0..9 {
                for c in 0..9 {
                    if rooted.root.contains(r) && inv_cap.contains(c) {
                        assert!(!cap.contains(cspace.elim[r][c]));
                    }
                }
            }
        }
    }

    #[test]
    fn test_cell_caps_empty_results() {
        let cells = standard_cells();
        let rooted = Rooted::new(&cells, Bits32::from_bits(78));
        // A cell holds at most 4 cap points in dimension 2.
        assert!(caps_bits(&rooted, 5, Bits32::default()).is_empty());
    }

    #[test]
    fn test_add_pairs_sequence() {
        let cells = standard_cells();
        let caps = add_pairs(&cells, vec![Bits32::default()], 2);
        let raw: Vec<u32> = caps.iter().map(|b| b.bits()).collect();
        assert_eq!(raw, vec![78, 278, 166, 344, 232, 432]);
    }

    #[test]
    fn test_min_roots() {
        let cells = standard_cells();
        let roots = min_roots(&cells);
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].root.bits(), 78);
    }

    #[test]
    #[should_panic(expected = "even")]
    fn test_odd_root_size() {
        let cells = Cells::new(Space::get(4), vec![3, 2, 2, 2, 2, 2, 2, 2, 2]);
        min_roots(&cells);
    }
}
