use crate::grid::Grid;

/// Edge condition applied to the ghost border of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Ghost cell copies its interior neighbour. Density and pressure.
    None,
    /// Left/right walls negate, top/bottom copy. Horizontal velocity.
    MirrorX,
    /// Top/bottom walls negate, left/right copy. Vertical velocity.
    MirrorY,
}

/// Rewrite the ghost border of `field` from its adjacent interior cells.
///
/// Corners are set last, to the average of their two adjacent edge cells.
pub fn enforce(grid: Grid, kind: Boundary, field: &mut [f32]) {
    let n = grid.n();
    let sx = if kind == Boundary::MirrorX { -1.0 } else { 1.0 };
    let sy = if kind == Boundary::MirrorY { -1.0 } else { 1.0 };

    for i in 1..=n {
        field[grid.idx(0, i)] = sx * field[grid.idx(1, i)];
        field[grid.idx(n + 1, i)] = sx * field[grid.idx(n, i)];
        field[grid.idx(i, 0)] = sy * field[grid.idx(i, 1)];
        field[grid.idx(i, n + 1)] = sy * field[grid.idx(i, n)];
    }

    field[grid.idx(0, 0)] = 0.5 * (field[grid.idx(1, 0)] + field[grid.idx(0, 1)]);
    field[grid.idx(0, n + 1)] = 0.5 * (field[grid.idx(1, n + 1)] + field[grid.idx(0, n)]);
    field[grid.idx(n + 1, 0)] = 0.5 * (field[grid.idx(n, 0)] + field[grid.idx(n + 1, 1)]);
    field[grid.idx(n + 1, n + 1)] =
        0.5 * (field[grid.idx(n, n + 1)] + field[grid.idx(n + 1, n)]);
}
