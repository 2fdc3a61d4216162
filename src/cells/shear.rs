// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Minimal shears: canonicalizing a point set under the shear class.
//!
//! A shear translates the content of each cell by an amount linear in the
//! cell's quotient coordinates (the C block of the cell-preserving
//! decomposition, see [`cells::isoms`](crate::cells::isoms)). The minimal
//! shear of a vector translates each basis cell of the quotient space to
//! its minimum under in-cell translations, then extends linearly to all
//! cells.
//!
//! The extension must compose translations in the CSpace additive group:
//! the translation applied at cell q is the CSpace sum of the per-basis
//! translations weighted by q's coefficients in the basis.

use rustc_hash::FxHashMap;

use crate::cells::{BitsVec, Cells};
use crate::space::ORIGIN;

/// Computes minimal shears for one cell partition, caching the per-cell
/// translation arrays by basis translation choice.
#[derive(Debug)]
pub struct Shearer<'a> {
    cells: &'a Cells,
    /// Points of the quotient space in coefficient order over the nonzero
    /// basis: `qspan[i]` has the base-3 digits of i as coefficients.
    qspan: Vec<usize>,
    /// Basis translation indices -> translation index per cell.
    translate: FxHashMap<Vec<usize>, Vec<usize>>,
}

impl<'a> Shearer<'a> {
    /// Fatal when the positive-count cells do not span the quotient space:
    /// a shear is determined by its action on a full basis.
    pub fn new(cells: &'a Cells) -> Shearer<'a> {
        assert_eq!(
            cells.nonzero_basis.len(),
            cells.qspace.d,
            "positive-count cells must span the quotient space"
        );
        let qspan = cells.qspace.span(&cells.nonzero_basis);
        Shearer {
            cells,
            qspan,
            translate: FxHashMap::default(),
        }
    }

    /// Minimize `vec` under the shear class, in place: each nonzero-basis
    /// cell ends at its translation minimum, the origin cell is untouched.
    ///
    /// Idempotent: a second pass finds every basis cell already minimal and
    /// applies the identity.
    pub fn min_shear(&mut self, vec: &mut BitsVec) {
        let cells = self.cells;
        let t_basis: Vec<usize> = cells
            .nonzero_basis
            .iter()
            .map(|&b| cells.translations.min_image_index(vec[b]))
            .collect();

        let qdim = cells.qspace.d;
        let qspan = &self.qspan;
        let shear = self
            .translate
            .entry(t_basis.clone())
            .or_insert_with(|| {
                let mut shear = vec![ORIGIN; qspan.len()];
                let mut coeffs = vec![0; qdim];
                for (i, &q) in qspan.iter().enumerate() {
                    let mut rest = i;
                    for c in coeffs.iter_mut() {
                        *c = rest % 3;
                        rest /= 3;
                    }
                    shear[q] = cells.cspace.linear_combo(&t_basis, &coeffs);
                }
                shear
            });

        for q in 0..vec.len() {
            vec[q] = cells.translations.apply(shear[q], vec[q]);
        }
    }
}
