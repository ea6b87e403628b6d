use crate::FluidSimulation;
use crate::ambient::{AmbientSwirl, SourceDriver};
use crate::boundary::Boundary;
use crate::config::FluidConfig;
use crate::fields::FieldStore;
use crate::grid::Grid;
use crate::solver::Solver;
use glam::Vec2;

/// A source added to the next frame, in interior grid coordinates (`1..=N`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Impulse {
    Density { x: usize, y: usize, amount: f32 },
    Velocity { x: usize, y: usize, delta: Vec2 },
}

/// Stable-fluids simulation of one density field carried by a velocity field.
#[derive(Debug)]
pub struct StableFluid {
    grid: Grid,
    solver: Solver,
    fields: FieldStore,
    pressure: Vec<f32>,
    divergence: Vec<f32>,
    dt: f32,
    diffusion: f32,
    viscosity: f32,
    pending: Vec<Impulse>,
    driver: Option<Box<dyn SourceDriver>>,
    frame: u64,
}

impl FluidSimulation for StableFluid {
    fn step(&mut self) {
        self.step()
    }

    fn add_force(&mut self, x: usize, y: usize, force: Vec2) {
        self.inject_velocity(x, y, force.x, force.y)
    }

    fn add_density(&mut self, x: usize, y: usize, amount: f32) {
        self.inject_density(x, y, amount)
    }

    fn resolution(&self) -> usize {
        self.grid.n()
    }
}

impl StableFluid {
    pub fn new(n: usize, dt: f32, diffusion: f32, viscosity: f32) -> Self {
        let grid = Grid::new(n);
        Self::build(grid, Solver::new(grid), dt, diffusion, viscosity)
    }

    /// Build from a validated config, installing the ambient swirl if enabled.
    pub fn from_config(config: &FluidConfig) -> Self {
        let grid = Grid::new(config.resolution);
        let solver = Solver::with_iterations(grid, config.solver_iterations);
        let mut fluid = Self::build(grid, solver, config.dt, config.diffusion, config.viscosity);
        if config.ambient.enabled {
            fluid.set_driver(Some(Box::new(AmbientSwirl::from_config(&config.ambient))));
        }
        fluid
    }

    fn build(grid: Grid, solver: Solver, dt: f32, diffusion: f32, viscosity: f32) -> Self {
        log::debug!(
            "stable fluid {}x{} dt={} diffusion={} viscosity={} iterations={}",
            grid.n(),
            grid.n(),
            dt,
            diffusion,
            viscosity,
            solver.iterations()
        );
        Self {
            grid,
            solver,
            fields: FieldStore::new(grid),
            pressure: grid.alloc(),
            divergence: grid.alloc(),
            dt,
            diffusion,
            viscosity,
            pending: Vec::new(),
            driver: None,
            frame: 0,
        }
    }

    pub fn set_driver(&mut self, driver: Option<Box<dyn SourceDriver>>) {
        self.driver = driver;
    }

    pub fn has_driver(&self) -> bool {
        self.driver.is_some()
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Interior cells per axis (N).
    pub fn resolution(&self) -> usize {
        self.grid.n()
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Queue density for the next step. Coordinates must already be clamped
    /// to `1..=N`.
    pub fn inject_density(&mut self, x: usize, y: usize, amount: f32) {
        self.apply(Impulse::Density { x, y, amount });
    }

    /// Queue a velocity impulse for the next step. Coordinates must already
    /// be clamped to `1..=N`.
    pub fn inject_velocity(&mut self, x: usize, y: usize, dvx: f32, dvy: f32) {
        self.apply(Impulse::Velocity {
            x,
            y,
            delta: Vec2::new(dvx, dvy),
        });
    }

    pub fn apply(&mut self, impulse: Impulse) {
        debug_assert!(
            self.in_interior(impulse),
            "impulse outside interior 1..={}: {:?}",
            self.grid.n(),
            impulse
        );
        self.pending.push(impulse);
    }

    pub fn pending(&self) -> &[Impulse] {
        &self.pending
    }

    fn in_interior(&self, impulse: Impulse) -> bool {
        let n = self.grid.n();
        let (x, y) = match impulse {
            Impulse::Density { x, y, .. } | Impulse::Velocity { x, y, .. } => (x, y),
        };
        (1..=n).contains(&x) && (1..=n).contains(&y)
    }

    pub fn density_at(&self, x: usize, y: usize) -> f32 {
        self.fields.density[self.grid.idx(x, y)]
    }

    pub fn velocity_at(&self, x: usize, y: usize) -> Vec2 {
        let idx = self.grid.idx(x, y);
        Vec2::new(self.fields.velocity_x[idx], self.fields.velocity_y[idx])
    }

    /// Full density grid, ghost border included.
    pub fn density(&self) -> &[f32] {
        &self.fields.density
    }

    pub fn velocity_x(&self) -> &[f32] {
        &self.fields.velocity_x
    }

    pub fn velocity_y(&self) -> &[f32] {
        &self.fields.velocity_y
    }

    /// Row-major copy of the `N × N` interior density.
    pub fn interior_density(&self) -> Vec<f32> {
        self.grid
            .interior()
            .map(|(x, y)| self.fields.density[self.grid.idx(x, y)])
            .collect()
    }

    /// Zero every field and drop queued impulses. Frame count restarts.
    pub fn reset(&mut self) {
        self.fields.reset();
        self.pressure.fill(0.0);
        self.divergence.fill(0.0);
        self.pending.clear();
        self.frame = 0;
        log::debug!("stable fluid reset");
    }

    /// Advance one frame.
    pub fn step(&mut self) {
        self.frame += 1;
        self.fields.clear_sources();

        if let Some(driver) = self.driver.as_mut() {
            driver.drive(self.frame, self.grid, &mut self.pending);
        }
        let injected = self.pending.len();
        for impulse in self.pending.drain(..) {
            match impulse {
                Impulse::Density { x, y, amount } => {
                    self.fields.density_prev[self.grid.idx(x, y)] += amount;
                }
                Impulse::Velocity { x, y, delta } => {
                    let idx = self.grid.idx(x, y);
                    self.fields.velocity_x_prev[idx] += delta.x;
                    self.fields.velocity_y_prev[idx] += delta.y;
                }
            }
        }
        self.fields.apply_sources();

        self.velocity_step();
        self.density_step();

        log::trace!("frame {} stepped with {} impulses", self.frame, injected);
    }

    fn velocity_step(&mut self) {
        let solver = self.solver;
        let f = &mut self.fields;

        f.swap_velocity();
        solver.diffuse(Boundary::MirrorX, &mut f.velocity_x, &f.velocity_x_prev, self.viscosity, self.dt);
        solver.diffuse(Boundary::MirrorY, &mut f.velocity_y, &f.velocity_y_prev, self.viscosity, self.dt);
        solver.project(&mut f.velocity_x, &mut f.velocity_y, &mut self.pressure, &mut self.divergence);

        f.swap_velocity();
        solver.advect(
            Boundary::MirrorX,
            &mut f.velocity_x,
            &f.velocity_x_prev,
            &f.velocity_x_prev,
            &f.velocity_y_prev,
            self.dt,
        );
        solver.advect(
            Boundary::MirrorY,
            &mut f.velocity_y,
            &f.velocity_y_prev,
            &f.velocity_x_prev,
            &f.velocity_y_prev,
            self.dt,
        );
        solver.project(&mut f.velocity_x, &mut f.velocity_y, &mut self.pressure, &mut self.divergence);
    }

    fn density_step(&mut self) {
        let solver = self.solver;
        let f = &mut self.fields;

        f.swap_density();
        solver.diffuse(Boundary::None, &mut f.density, &f.density_prev, self.diffusion, self.dt);

        f.swap_density();
        solver.advect(
            Boundary::None,
            &mut f.density,
            &f.density_prev,
            &f.velocity_x,
            &f.velocity_y,
            self.dt,
        );
    }
}
