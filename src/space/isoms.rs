// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Enumeration of the isomorphisms of a ternary Space.
//!
//! A linear isomorphism is determined by the images of the standard basis,
//! so enumerating linear isoms means enumerating ordered bases. The full
//! group is large (≈24M for d = 4), so it is kept factored as a
//! [`PermsProduct`]: the coordinate class (coordinate permutations composed
//! with per-coordinate reflections) times one representative per coset
//! modulo that class.

use log::debug;

use crate::perms::{self, Perms, PermsProduct};
use crate::space::Space;

impl Space {
    /// The group of all translations. These are affine (not linear)
    /// isomorphisms; translation `p` maps `q` to `p + q`.
    pub fn translations(&self) -> Perms {
        let perms = self
            .pts
            .iter()
            .map(|&p1| self.sum[p1].clone())
            .collect();
        Perms::new(perms)
    }

    /// The group generated by coordinate permutations (d! elements).
    pub fn coord_perms(&self) -> Perms {
        let mut perms = Vec::new();
        for d_perm in perms::permutations(self.d) {
            let mut perm = Vec::with_capacity(self.size());
            let mut image = vec![0; self.d];
            for vec in &self.coords.vecs {
                for (i, &src) in d_perm.iter().enumerate() {
                    image[i] = vec[src];
                }
                perm.push(self.coords.vec_to_index(&image));
            }
            perms.push(perm);
        }
        Perms::new(perms)
    }

    /// The group generated by reflecting each coordinate independently
    /// (2^d elements).
    pub fn coord_reflections(&self) -> Perms {
        let mut perms = Vec::new();
        let mut image = vec![0; self.d];
        // Iterate over all ±1 d-tuples, (1,…,1) first.
        for signs in 0..(1usize << self.d) {
            let mut perm = Vec::with_capacity(self.size());
            for vec in &self.coords.vecs {
                for (i, &v) in vec.iter().enumerate() {
                    let flip = (signs >> (self.d - 1 - i)) & 1 == 1;
                    image[i] = if flip { (3 - v) % 3 } else { v };
                }
                perm.push(self.coords.vec_to_index(&image));
            }
            perms.push(perm);
        }
        Perms::new(perms)
    }

    /// All linear isomorphisms, factored as the coordinate class times
    /// [`Space::linear_isoms_mod_coords`].
    ///
    /// In d = 4 there are ~24M linear isoms, factoring into classes of
    /// size 384 and 63180; the product is never flattened.
    pub fn linear_isoms(&self) -> PermsProduct {
        debug!("computing linear isoms (d = {})", self.d);
        let perms1 = self.coord_perms().product(&self.coord_reflections());
        let perms2 = self.linear_isoms_mod_coords();
        let product = PermsProduct::new(perms1, perms2);
        debug!("...done ({} isoms)", product.len());
        product
    }

    /// One representative of every class of linear isoms modulo the
    /// coordinate class: the permutations of all sorted bases whose vectors
    /// all have a leading 1.
    pub fn linear_isoms_mod_coords(&self) -> Perms {
        debug!("computing linear isoms mod coords (d = {})", self.d);
        let mut perms = Vec::new();
        for basis in self.sorted1_bases(&[]) {
            perms.push(self.basis_to_perm(&basis));
        }
        debug!("...done ({} isoms)", perms.len());
        Perms::new(perms)
    }

    /// All linear isoms whose induced permutation fixes `counts` as a
    /// sequence.
    pub fn linear_isoms_fixing_counts(&self, counts: &[usize]) -> Perms {
        assert_eq!(counts.len(), self.size(), "counts: length mismatch");
        debug!("computing linear isoms fixing counts (d = {})", self.d);

        let mut perms = Vec::new();
        for basis in self.bases_fixing_counts(counts, &[]) {
            perms.push(self.basis_to_perm(&basis));
        }
        debug!("...done ({} isoms)", perms.len());
        Perms::new(perms)
    }

    /// The linear map taking the standard basis to `basis`, as a point
    /// permutation. This is how a linear isom is specified by its image
    /// basis: the i-th point maps to the i-th element of the image span.
    pub fn basis_to_perm(&self, basis: &[usize]) -> Vec<usize> {
        assert_eq!(basis.len(), self.d, "basis must have dimension d");
        let images = self.span(basis);
        assert_eq!(
            images.len(),
            self.size(),
            "basis is not linearly independent"
        );
        images
    }

    /// The linear map taking `basis` to the standard basis.
    pub fn basis_to_inv_perm(&self, basis: &[usize]) -> Vec<usize> {
        perms::inverse(&self.basis_to_perm(basis))
    }

    /// All sorted bases consisting only of leading-1 vectors: a single
    /// representative for each basis class modulo the coordinate class.
    fn sorted1_bases(&self, partial: &[usize]) -> Vec<Vec<usize>> {
        if partial.len() == self.d {
            return vec![partial.to_vec()];
        }

        // The partial basis is ascending, so its maximum is its last entry.
        let start = partial.last().map_or(0, |&max| max + 1);
        let partial_span = self.span(partial);

        let mut bases = Vec::new();
        for p in start..self.size() {
            if self.pt_to_direction[p].is_some() && !partial_span.contains(&p) {
                let mut next = partial.to_vec();
                next.push(p);
                bases.extend(self.sorted1_bases(&next));
            }
        }
        bases
    }

    /// All bases whose induced permutation preserves `counts`.
    ///
    /// Incremental DFS: the partial basis maps the span of the first k
    /// standard basis vectors (the index prefix `0..3^k`) onto the partial
    /// span, element by element. Extending by p keeps counts fixed iff p
    /// matches the count of the next standard basis vector and every newly
    /// covered point `p + q` matches its standard counterpart.
    fn bases_fixing_counts(&self, counts: &[usize], partial: &[usize]) -> Vec<Vec<usize>> {
        assert_eq!(counts.len(), self.size(), "counts: length mismatch");

        if partial.len() == self.d {
            return vec![partial.to_vec()];
        }

        let partial_span = self.span(partial);
        let next_std = self.std_basis[partial.len()];
        let std_counts: Vec<usize> = (0..partial_span.len())
            .map(|q| counts[self.sum[next_std][q]])
            .collect();

        let mut bases = Vec::new();
        for p in 0..self.size() {
            if partial_span.contains(&p) || counts[p] != counts[next_std] {
                continue;
            }
            let next_counts: Vec<usize> = partial_span
                .iter()
                .map(|&q| counts[self.sum[p][q]])
                .collect();
            if next_counts == std_counts {
                let mut next = partial.to_vec();
                next.push(p);
                bases.extend(self.bases_fixing_counts(counts, &next));
            }
        }
        bases
    }
}
