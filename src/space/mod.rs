// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Ternary spaces with precomputed arithmetic tables.
//!
//! A [`Space`] is the d-dimensional vector space over ℤ/3ℤ with every
//! pairwise operation materialized as a table: `sum[p][q]`, the inverse map,
//! the elimination map `elim[p][q]` (the third point on the line through p
//! and q), and orthogonality. For d ≤ 6 the square tables hold at most
//! 3^12 entries, so building them eagerly is cheap and makes every
//! downstream operation a lookup.
//!
//! Spaces are process-wide singletons keyed by dimension; [`Space::get`]
//! returns a `&'static` handle.

pub mod coords;
pub mod isoms;
pub mod planes;
pub mod points;

pub use coords::CoordSpace;
pub use planes::Planes;
pub use points::Points;

use std::fmt;
use std::sync::{Mutex, OnceLock};

use rustc_hash::FxHashMap;

/// The index of the zero vector in every coordinate space.
pub const ORIGIN: usize = 0;

/// A d-dimensional vector space over ℤ/3ℤ, with all arithmetic precomputed.
///
/// Instead of dealing with coordinate vectors, we work with their indices
/// ("points").
#[derive(Debug, PartialEq, Eq)]
pub struct Space {
    /// Dimension.
    pub d: usize,
    /// The backing space of coordinate d-vectors.
    pub coords: CoordSpace,

    /// The point indices `0..3^d` (the identity sequence).
    pub pts: Vec<usize>,
    /// Map each point p to −p.
    pub inv: Vec<usize>,
    /// Map (p, q) to p + q.
    pub sum: Vec<Vec<usize>>,
    /// Map (p, q) to the eliminated point: the third point on the line
    /// through p and q, i.e. −(p + q).
    pub elim: Vec<Vec<usize>>,
    /// Map (p, q) to whether p and q are orthogonal.
    pub perp: Vec<Vec<bool>>,

    /// Standard basis indices `[1, 3, 9, …]`.
    pub std_basis: Vec<usize>,
    /// Indices of the unique directions (first nonzero coordinate 1).
    pub directions: Vec<usize>,
    /// Map each point to its position in `directions`, if it is one.
    pub pt_to_direction: Vec<Option<usize>>,
}

/// One Space per dimension, built under the lock and leaked.
static SPACE_CACHE: OnceLock<Mutex<FxHashMap<usize, &'static Space>>> = OnceLock::new();

impl Space {
    /// The ternary Space of dimension `d` (singleton per dimension).
    pub fn get(d: usize) -> &'static Space {
        assert!(d >= 1, "Space dimension must be >= 1");
        let cache = SPACE_CACHE.get_or_init(|| Mutex::new(FxHashMap::default()));
        let mut map = cache.lock().expect("Space cache poisoned");
        *map.entry(d).or_insert_with(|| Box::leak(Box::new(Space::build(d))))
    }

    fn build(d: usize) -> Space {
        let coords = CoordSpace::new(3, d);
        let size = coords.size();

        let pts: Vec<usize> = (0..size).collect();
        let inv: Vec<usize> = pts.iter().map(|&i| coords.inv(i)).collect();

        let mut sum = Vec::with_capacity(size);
        let mut elim = Vec::with_capacity(size);
        let mut perp = Vec::with_capacity(size);
        for i in 0..size {
            let mut sum_row = Vec::with_capacity(size);
            let mut elim_row = Vec::with_capacity(size);
            let mut perp_row = Vec::with_capacity(size);
            for j in 0..size {
                let s = coords.sum(i, j);
                sum_row.push(s);
                elim_row.push(coords.inv(s));
                perp_row.push(coords.dot(i, j) == 0);
            }
            sum.push(sum_row);
            elim.push(elim_row);
            perp.push(perp_row);
        }

        let std_basis = coords.std_basis();
        let directions = coords.directions();
        let mut pt_to_direction = vec![None; size];
        for (k, &p) in directions.iter().enumerate() {
            pt_to_direction[p] = Some(k);
        }

        Space {
            d,
            coords,
            pts,
            inv,
            sum,
            elim,
            perp,
            std_basis,
            directions,
            pt_to_direction,
        }
    }

    /// Number of points in the Space.
    pub fn size(&self) -> usize {
        self.pts.len()
    }

    /// The span of the points with the given indices, in coefficient-vector
    /// order (see [`CoordSpace::span`]); the i-th element equals
    /// `linear_combo(indices, digits of i)`.
    pub fn span(&self, indices: &[usize]) -> Vec<usize> {
        match indices.split_last() {
            None => vec![ORIGIN],
            Some((&last, head)) => {
                let head_span = self.span(head);
                if head_span.contains(&last) {
                    return head_span;
                }
                let last_inv = self.inv[last];
                let mut span = Vec::with_capacity(3 * head_span.len());
                span.extend_from_slice(&head_span);
                for &p in &head_span {
                    span.push(self.sum[p][last]);
                }
                for &p in &head_span {
                    span.push(self.sum[p][last_inv]);
                }
                span
            }
        }
    }

    /// The linear combination Σ coeffs[i] · pts[i].
    pub fn linear_combo(&self, pts: &[usize], coeffs: &[usize]) -> usize {
        assert_eq!(pts.len(), coeffs.len(), "linear_combo: length mismatch");

        let mut res = ORIGIN;
        for (&p, &c) in pts.iter().zip(coeffs) {
            match c {
                0 => {}
                1 => res = self.sum[res][p],
                2 => {
                    res = self.sum[res][p];
                    res = self.sum[res][p];
                }
                _ => panic!("linear_combo: coeffs must be 0, 1, or 2"),
            }
        }
        res
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Space[d = {}]", self.d)
    }
}
