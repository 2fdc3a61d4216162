// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Classes of in-cell permutations with byte-image tables.
//!
//! Applying a permutation to a [`Bits32`] bit by bit costs a 32-iteration
//! loop; a [`CellPerms`] precomputes, for each permutation, the image of
//! every byte at every byte position, so an application is four table
//! lookups ORed together.
//!
//! The class also answers MinImage queries: the lexicographically smallest
//! image of a word under the class. The minimum is always achieved by a
//! permutation whose image contains index 0 (a word with bit 0 set precedes
//! every word without it), so only permutations k with
//! `b.contains(zero_preimage[k])` need be examined. Results are memoized
//! for the lifetime of the class; the memo is not synchronized, so a class
//! must not be shared across threads.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::cells::{Bits32, BitsVec};

/// A class of permutations of a cell's points.
pub struct CellPerms {
    /// The permutations, as index maps.
    pub perms: Vec<Vec<usize>>,
    /// byte_image[k][pos][b]: image of byte b at byte position pos under
    /// perm k; zero when the byte has bits outside the cell.
    byte_image: Vec<[[Bits32; 256]; 4]>,
    /// zero_preimage[k] = perm_k[perm_k[0]]: the point perm k sends to
    /// index 0, for translation-like classes.
    zero_preimage: Vec<usize>,
    /// Memoized MinImage results.
    min_image: RefCell<FxHashMap<Bits32, Bits32>>,
}

impl CellPerms {
    pub(crate) fn new(cell_size: usize, perms: Vec<Vec<usize>>) -> CellPerms {
        let mut mask = Bits32::default();
        for i in 0..cell_size {
            mask = mask.set(i);
        }

        let mut byte_image = Vec::with_capacity(perms.len());
        let mut zero_preimage = Vec::with_capacity(perms.len());
        for perm in &perms {
            let mut image = [[Bits32::default(); 256]; 4];
            for (shift, table) in image.iter_mut().enumerate() {
                for (k, entry) in table.iter_mut().enumerate() {
                    let preimage = Bits32::from_bits((k as u32) << (8 * shift));
                    if preimage & mask == preimage {
                        *entry = preimage.apply(perm);
                    }
                }
            }
            byte_image.push(image);
            zero_preimage.push(perm[perm[0]]);
        }

        CellPerms {
            perms,
            byte_image,
            zero_preimage,
            min_image: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.perms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.perms.is_empty()
    }

    /// The image of `b` under the k-th permutation, via the byte tables.
    pub fn apply(&self, k: usize, b: Bits32) -> Bits32 {
        let im = &self.byte_image[k];
        let bits = b.bits();
        im[0][(bits & 0xff) as usize]
            | im[1][((bits >> 8) & 0xff) as usize]
            | im[2][((bits >> 16) & 0xff) as usize]
            | im[3][((bits >> 24) & 0xff) as usize]
    }

    /// Apply the k-th permutation to every cell of a vector.
    pub fn apply_vec(&self, k: usize, vec: &BitsVec, out: &mut BitsVec) {
        assert_eq!(vec.len(), out.len(), "BitsVec: length mismatch");
        for i in 0..vec.len() {
            out[i] = self.apply(k, vec[i]);
        }
    }

    /// The smallest permutation index whose image of `b` is minimal.
    ///
    /// Only permutations bringing some bit of `b` to index 0 are examined;
    /// 0 is returned when none improves on `b` (in particular when `b` is
    /// already minimal).
    pub fn min_image_index(&self, b: Bits32) -> usize {
        let mut index = 0;
        let mut min_image = b;

        for (k, &preimage) in self.zero_preimage.iter().enumerate() {
            if b.contains(preimage) {
                let image = self.apply(k, b);
                if image < min_image {
                    index = k;
                    min_image = image;
                }
            }
        }
        index
    }

    /// The smallest image of `b` under the class. Memoized.
    pub fn min_image(&self, b: Bits32) -> Bits32 {
        if let Some(&image) = self.min_image.borrow().get(&b) {
            return image;
        }

        let image = self.apply(self.min_image_index(b), b);
        self.min_image.borrow_mut().insert(b, image);
        image
    }

    /// MinImage of every cell of a vector.
    pub fn min_images(&self, vec: &BitsVec, out: &mut BitsVec) {
        assert_eq!(vec.len(), out.len(), "BitsVec: length mismatch");
        for i in 0..vec.len() {
            out[i] = self.min_image(vec[i]);
        }
    }
}

impl std::fmt::Debug for CellPerms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellPerms")
            .field("perms", &self.perms)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::Cells;
    use crate::space::Space;

    fn standard_cells() -> Cells {
        Cells::new(Space::get(4), vec![4, 2, 2, 2, 2, 2, 2, 2, 2])
    }

    #[test]
    fn test_min_image() {
        let cells = standard_cells();
        let translations = &cells.translations;

        let bits = Bits32::new(&[4, 8]);
        assert_eq!(translations.min_image_index(bits), 8);
        assert_eq!(translations.min_image(bits).bits(), 17);

        let bits = Bits32::new(&[0, 4]);
        assert_eq!(bits.bits(), 17);
        assert_eq!(translations.min_image_index(bits), 0);
        assert_eq!(translations.min_image(bits).bits(), 17);
    }

    #[test]
    fn test_min_image_idempotent() {
        let cells = standard_cells();
        let translations = &cells.translations;
        for seed in 0..200u32 {
            let bits = Bits32::from_bits(seed.wrapping_mul(2654435761) & 0x1ff);
            let min = translations.min_image(bits);
            assert!(min <= bits);
            assert_eq!(translations.min_image(min), min);
        }
    }

    #[test]
    fn test_apply_matches_scalar() {
        let cells = standard_cells();
        let translations = &cells.translations;
        for k in 0..translations.len() {
            for seed in 0..100u32 {
                let bits = Bits32::from_bits(seed.wrapping_mul(2654435761) & 0x1ff);
                assert_eq!(
                    translations.apply(k, bits),
                    bits.apply(&translations.perms[k])
                );
            }
        }
    }

    #[test]
    fn test_apply_vec() {
        let cells = standard_cells();
        let mut vec = cells.new_bits_vec();
        vec[0] = Bits32::new(&[0, 1]);
        vec[5] = Bits32::new(&[4]);
        let mut out = cells.new_bits_vec();
        // Translation by 3 in the dim-2 cell space.
        cells.translations.apply_vec(3, &vec, &mut out);
        assert_eq!(out[0], Bits32::new(&[3, 4]));
        assert_eq!(out[5], Bits32::new(&[7]));
    }

    #[test]
    fn test_min_image_of_empty() {
        let cells = standard_cells();
        let empty = Bits32::default();
        assert_eq!(cells.translations.min_image_index(empty), 0);
        assert_eq!(cells.translations.min_image(empty), empty);
    }
}
