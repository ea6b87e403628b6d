//! Stable-fluids operators: implicit diffusion, semi-Lagrangian advection and
//! pressure projection over a ghost-bordered [`Grid`].

use crate::boundary::{enforce, Boundary};
use crate::grid::Grid;

/// Gauss-Seidel sweeps per linear solve.
pub const DEFAULT_ITERATIONS: usize = 20;

#[derive(Debug, Clone, Copy)]
pub struct Solver {
    grid: Grid,
    iterations: usize,
}

impl Solver {
    pub fn new(grid: Grid) -> Self {
        Self::with_iterations(grid, DEFAULT_ITERATIONS)
    }

    pub fn with_iterations(grid: Grid, iterations: usize) -> Self {
        Self { grid, iterations }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Relax `x = (x0 + a * (sum of 4 neighbours of x)) / c` for a fixed number
    /// of sweeps, re-applying `kind` to the border after each sweep.
    pub fn lin_solve(&self, kind: Boundary, x: &mut [f32], x0: &[f32], a: f32, c: f32) {
        let grid = self.grid;
        let n = grid.n();
        let stride = grid.stride();
        let inv_c = 1.0 / c;

        for _ in 0..self.iterations {
            for j in 1..=n {
                for i in 1..=n {
                    let idx = grid.idx(i, j);
                    x[idx] = (x0[idx]
                        + a * (x[idx - 1] + x[idx + 1] + x[idx - stride] + x[idx + stride]))
                        * inv_c;
                }
            }
            enforce(grid, kind, x);
        }
    }

    /// Implicit diffusion of `source` into `field` at `rate` over `dt`.
    pub fn diffuse(&self, kind: Boundary, field: &mut [f32], source: &[f32], rate: f32, dt: f32) {
        let n = self.grid.n() as f32;
        let a = dt * rate * n * n;
        self.lin_solve(kind, field, source, a, 1.0 + 4.0 * a);
    }

    /// Transport `src` along `(vel_x, vel_y)` into `dst` by tracing each cell
    /// backwards one step and sampling bilinearly.
    ///
    /// Trace positions are clamped to `[0.5, N + 0.5]`, so samples never leave
    /// `[0, N + 1]` whatever the velocity magnitude.
    pub fn advect(
        &self,
        kind: Boundary,
        dst: &mut [f32],
        src: &[f32],
        vel_x: &[f32],
        vel_y: &[f32],
        dt: f32,
    ) {
        let grid = self.grid;
        let n = grid.n();
        let dt0 = dt * n as f32;
        let max = n as f32 + 0.5;

        for j in 1..=n {
            for i in 1..=n {
                let idx = grid.idx(i, j);
                let x = (i as f32 - dt0 * vel_x[idx]).clamp(0.5, max);
                let y = (j as f32 - dt0 * vel_y[idx]).clamp(0.5, max);

                // NaN survives clamp; the saturating cast maps it to cell 0.
                let i0 = (x.floor() as usize).min(n);
                let j0 = (y.floor() as usize).min(n);
                let i1 = i0 + 1;
                let j1 = j0 + 1;

                let s1 = x - i0 as f32;
                let s0 = 1.0 - s1;
                let t1 = y - j0 as f32;
                let t0 = 1.0 - t1;

                dst[idx] = s0 * (t0 * src[grid.idx(i0, j0)] + t1 * src[grid.idx(i0, j1)])
                    + s1 * (t0 * src[grid.idx(i1, j0)] + t1 * src[grid.idx(i1, j1)]);
            }
        }

        enforce(grid, kind, dst);
    }

    /// Central-difference divergence of the velocity field, scaled by
    /// `-0.5 * h`, written into the interior of `out`.
    pub fn divergence(&self, vel_x: &[f32], vel_y: &[f32], out: &mut [f32]) {
        let grid = self.grid;
        let n = grid.n();
        let stride = grid.stride();
        let h = 1.0 / n as f32;

        for j in 1..=n {
            for i in 1..=n {
                let idx = grid.idx(i, j);
                out[idx] = -0.5
                    * h
                    * (vel_x[idx + 1] - vel_x[idx - 1] + vel_y[idx + stride]
                        - vel_y[idx - stride]);
            }
        }
    }

    /// Remove the divergent part of `(vel_x, vel_y)`.
    ///
    /// `pressure` and `divergence` are scratch and fully rewritten.
    pub fn project(
        &self,
        vel_x: &mut [f32],
        vel_y: &mut [f32],
        pressure: &mut [f32],
        divergence: &mut [f32],
    ) {
        let grid = self.grid;
        let n = grid.n();
        let stride = grid.stride();
        let h = 1.0 / n as f32;

        self.divergence(vel_x, vel_y, divergence);
        pressure.fill(0.0);
        enforce(grid, Boundary::None, divergence);
        enforce(grid, Boundary::None, pressure);

        self.lin_solve(Boundary::None, pressure, divergence, 1.0, 4.0);

        for j in 1..=n {
            for i in 1..=n {
                let idx = grid.idx(i, j);
                vel_x[idx] -= 0.5 * (pressure[idx + 1] - pressure[idx - 1]) / h;
                vel_y[idx] -= 0.5 * (pressure[idx + stride] - pressure[idx - stride]) / h;
            }
        }

        enforce(grid, Boundary::MirrorX, vel_x);
        enforce(grid, Boundary::MirrorY, vel_y);
    }
}
