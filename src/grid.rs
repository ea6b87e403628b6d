//! Square simulation grid with a one-cell ghost border.
//!
//! Every field is a flat `Vec<f32>` of `(N+2)²` cells. Interior cells run
//! `1..=N` on both axes; index `0` and `N+1` are ghost cells written only by
//! [`crate::boundary::enforce`].

/// Flat offset of cell `(x, y)` in a grid of interior resolution `n`.
#[inline]
pub fn idx(n: usize, x: usize, y: usize) -> usize {
    x + (n + 2) * y
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    n: usize,
}

impl Grid {
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "grid resolution must be positive, got {}", n);
        Self { n }
    }

    /// Interior cells per axis.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Cells per axis including the ghost border.
    #[inline]
    pub fn stride(&self) -> usize {
        self.n + 2
    }

    /// Total stored cells per field.
    #[inline]
    pub fn size(&self) -> usize {
        self.stride() * self.stride()
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        idx(self.n, x, y)
    }

    /// A zero-filled field of this grid's size.
    pub fn alloc(&self) -> Vec<f32> {
        vec![0.0; self.size()]
    }

    /// Row-major iterator over interior `(x, y)` coordinates.
    pub fn interior(&self) -> impl Iterator<Item = (usize, usize)> {
        let n = self.n;
        (1..=n).flat_map(move |y| (1..=n).map(move |x| (x, y)))
    }

    /// Sum of all interior cells of `field`.
    pub fn interior_sum(&self, field: &[f32]) -> f32 {
        self.interior().map(|(x, y)| field[self.idx(x, y)]).sum()
    }
}
