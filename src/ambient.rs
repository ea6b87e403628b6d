use crate::config::AmbientConfig;
use crate::fluid::Impulse;
use crate::grid::Grid;
use glam::Vec2;
use std::f32::consts::FRAC_PI_2;
use std::fmt::Debug;

/// Something that adds sources at the start of every frame, independent of
/// user input.
pub trait SourceDriver: Debug + Send + Sync {
    /// Push this frame's impulses onto `out`. `frame` starts at 1.
    fn drive(&mut self, frame: u64, grid: Grid, out: &mut Vec<Impulse>);
}

/// Slowly orbiting point source that keeps an idle canvas moving.
#[derive(Debug, Clone)]
pub struct AmbientSwirl {
    pub interval: u64,
    pub radius: f32,
    pub angular_speed: f32,
    pub density: f32,
    pub impulse: f32,
}

impl Default for AmbientSwirl {
    fn default() -> Self {
        Self::from_config(&AmbientConfig::default())
    }
}

impl AmbientSwirl {
    pub fn from_config(config: &AmbientConfig) -> Self {
        Self {
            interval: config.interval.max(1),
            radius: config.radius,
            angular_speed: config.angular_speed,
            density: config.density,
            impulse: config.impulse,
        }
    }

    /// Grid cell the source sits on at `frame`, clamped into the interior.
    pub fn position(&self, frame: u64, grid: Grid) -> (usize, usize) {
        let n = grid.n();
        let center = (n as f32 / 2.0).round();
        let angle = frame as f32 * self.angular_speed;
        let clamp = |v: f32| (v.round().max(1.0) as usize).min(n);
        (
            clamp(center + (angle.cos() * self.radius).round()),
            clamp(center + (angle.sin() * self.radius).round()),
        )
    }
}

impl SourceDriver for AmbientSwirl {
    fn drive(&mut self, frame: u64, grid: Grid, out: &mut Vec<Impulse>) {
        if frame % self.interval != 0 {
            return;
        }

        let (x, y) = self.position(frame, grid);
        let tangent = frame as f32 * self.angular_speed + FRAC_PI_2;

        out.push(Impulse::Density {
            x,
            y,
            amount: self.density,
        });
        out.push(Impulse::Velocity {
            x,
            y,
            delta: Vec2::from_angle(tangent) * self.impulse,
        });
    }
}
