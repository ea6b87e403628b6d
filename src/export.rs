use crate::FluidSimulation;
use crate::error::FluidResult;
use crate::fluid::StableFluid;
use crate::render::Renderer;
use std::path::Path;

/// Read access to a simulation's fields for rendering and analysis.
///
/// Slices cover the full `(N+2)²` grid, ghost border included.
pub trait FluidData {
    fn resolution(&self) -> usize;
    fn density(&self) -> &[f32];
    fn velocity_x(&self) -> &[f32];
    fn velocity_y(&self) -> &[f32];
}

impl FluidData for StableFluid {
    fn resolution(&self) -> usize { self.grid().n() }
    fn density(&self) -> &[f32] { self.density() }
    fn velocity_x(&self) -> &[f32] { self.velocity_x() }
    fn velocity_y(&self) -> &[f32] { self.velocity_y() }
}

pub struct ImageExporter {
    renderer: Renderer,
}

impl ImageExporter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            renderer: Renderer::new(width, height),
        }
    }

    pub fn export_density_png(&self, simulation: &impl FluidData, path: &Path) -> FluidResult<()> {
        let img = self.renderer.render_to_image(simulation);
        img.save(path)?;
        log::debug!("wrote density frame {}", path.display());
        Ok(())
    }

    pub fn export_velocity_png(&self, simulation: &impl FluidData, path: &Path) -> FluidResult<()> {
        let img = self.renderer.render_velocity_field(simulation);
        img.save(path)?;
        log::debug!("wrote velocity frame {}", path.display());
        Ok(())
    }

    /// Step `steps` times, writing `{prefix}_frame_NNNN.png` after each step.
    pub fn export_frame_sequence(
        &self,
        simulation: &mut (impl FluidData + FluidSimulation),
        steps: usize,
        output_dir: &Path,
        prefix: &str,
    ) -> FluidResult<()> {
        for i in 0..steps {
            simulation.step();

            let filename = format!("{}_frame_{:04}.png", prefix, i);
            self.export_density_png(simulation, &output_dir.join(filename))?;
        }
        Ok(())
    }
}
