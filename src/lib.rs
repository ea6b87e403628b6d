//! Real-time stable-fluids ink simulation for a portfolio canvas

pub mod ambient;
pub mod analysis;
pub mod boundary;
pub mod config;
pub mod desktop;
pub mod error;
pub mod export;
pub mod fields;
pub mod fluid;
pub mod grid;
pub mod input;
pub mod render;
pub mod solver;

#[cfg(target_arch = "wasm32")]
pub mod web;

// Steppable simulation driven by a frame loop
pub trait FluidSimulation {
    fn step(&mut self);
    fn add_force(&mut self, x: usize, y: usize, force: glam::Vec2);
    fn add_density(&mut self, x: usize, y: usize, amount: f32);
    fn resolution(&self) -> usize;
}

pub use ambient::{AmbientSwirl, SourceDriver};
pub use analysis::{AnalysisRecorder, FluidMetrics};
pub use boundary::{enforce, Boundary};
pub use config::{AmbientConfig, DisplayConfig, FluidConfig, PointerConfig};
pub use desktop::InteractiveApp;
pub use error::{FluidError, FluidResult};
pub use export::{FluidData, ImageExporter};
pub use fields::FieldStore;
pub use fluid::{Impulse, StableFluid};
pub use grid::Grid;
pub use input::{PointerInput, Viewport};
pub use render::{ColorRamp, Renderer};
pub use solver::Solver;
