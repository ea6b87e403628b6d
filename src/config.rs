use crate::error::{FluidError, FluidResult};
use crate::solver::DEFAULT_ITERATIONS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Construction parameters for a simulation and the surfaces around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidConfig {
    /// Interior cells per axis (N).
    pub resolution: usize,
    pub dt: f32,
    pub diffusion: f32,
    pub viscosity: f32,
    pub solver_iterations: usize,
    pub ambient: AmbientConfig,
    pub pointer: PointerConfig,
    pub display: DisplayConfig,
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            resolution: 128,
            dt: 0.15,
            diffusion: 0.000_02,
            viscosity: 0.000_000_1,
            solver_iterations: DEFAULT_ITERATIONS,
            ambient: AmbientConfig::default(),
            pointer: PointerConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    pub enabled: bool,
    /// Frames between injections.
    pub interval: u64,
    /// Orbit radius in cells.
    pub radius: f32,
    /// Radians per frame.
    pub angular_speed: f32,
    pub density: f32,
    pub impulse: f32,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: 8,
            radius: 16.0,
            angular_speed: 0.04,
            density: 2.0,
            impulse: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Density added at the pointer on every drag event.
    pub density: f32,
    /// Velocity per grid cell of pointer travel.
    pub velocity_scale: f32,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            density: 80.0,
            velocity_scale: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
        }
    }
}

impl FluidConfig {
    pub fn load(path: &Path) -> FluidResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| FluidError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> FluidResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> FluidResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> FluidResult<()> {
        if self.resolution == 0 {
            return Err(invalid("resolution", "must be at least 1"));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(invalid("dt", format!("must be finite and positive, got {}", self.dt)));
        }
        non_negative("diffusion", self.diffusion)?;
        non_negative("viscosity", self.viscosity)?;
        if self.solver_iterations == 0 {
            return Err(invalid("solver_iterations", "must be at least 1"));
        }
        if self.ambient.interval == 0 {
            return Err(invalid("ambient.interval", "must be at least 1"));
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(invalid("display", "width and height must be at least 1"));
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> FluidResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite and non-negative, got {}", value)))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> FluidError {
    FluidError::InvalidConfig {
        field,
        reason: reason.into(),
    }
}
