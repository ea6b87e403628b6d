use crate::grid::Grid;
use std::mem;

/// Density and velocity grids plus their `*_prev` counterparts.
///
/// The `*_prev` buffers hold the current frame's injected sources until the
/// solve consumes them as scratch. Current/previous roles are exchanged by
/// swapping the owned buffers, never by copying.
#[derive(Debug, Clone)]
pub struct FieldStore {
    pub density: Vec<f32>,
    pub density_prev: Vec<f32>,
    pub velocity_x: Vec<f32>,
    pub velocity_x_prev: Vec<f32>,
    pub velocity_y: Vec<f32>,
    pub velocity_y_prev: Vec<f32>,
}

impl FieldStore {
    pub fn new(grid: Grid) -> Self {
        Self {
            density: grid.alloc(),
            density_prev: grid.alloc(),
            velocity_x: grid.alloc(),
            velocity_x_prev: grid.alloc(),
            velocity_y: grid.alloc(),
            velocity_y_prev: grid.alloc(),
        }
    }

    pub fn swap_density(&mut self) {
        mem::swap(&mut self.density, &mut self.density_prev);
    }

    pub fn swap_velocity(&mut self) {
        mem::swap(&mut self.velocity_x, &mut self.velocity_x_prev);
        mem::swap(&mut self.velocity_y, &mut self.velocity_y_prev);
    }

    /// Zero the three source buffers.
    pub fn clear_sources(&mut self) {
        self.density_prev.fill(0.0);
        self.velocity_x_prev.fill(0.0);
        self.velocity_y_prev.fill(0.0);
    }

    /// Add each source buffer onto its current field.
    pub fn apply_sources(&mut self) {
        add_source(&mut self.velocity_x, &self.velocity_x_prev);
        add_source(&mut self.velocity_y, &self.velocity_y_prev);
        add_source(&mut self.density, &self.density_prev);
    }

    /// Zero every buffer.
    pub fn reset(&mut self) {
        self.density.fill(0.0);
        self.velocity_x.fill(0.0);
        self.velocity_y.fill(0.0);
        self.clear_sources();
    }
}

fn add_source(field: &mut [f32], source: &[f32]) {
    for (value, s) in field.iter_mut().zip(source) {
        *value += s;
    }
}
