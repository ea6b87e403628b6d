//! Maps pointer and touch positions on the canvas to grid impulses.

use crate::config::PointerConfig;
use crate::fluid::Impulse;
use glam::Vec2;

/// Screen-space rectangle the simulation is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Viewport {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Interior grid cell under `pos`, clamped to `1..=n` on both axes.
    pub fn grid_coord(&self, pos: Vec2, n: usize) -> (usize, usize) {
        let g = ((pos - self.origin) / self.size * n as f32).round();
        let max = n as f32;
        // A degenerate viewport yields NaN, which casts to 0.
        let axis = |v: f32| (v.clamp(1.0, max) as usize).max(1);
        (axis(g.x), axis(g.y))
    }
}

/// Drag state for a single pointer.
#[derive(Debug, Clone)]
pub struct PointerInput {
    config: PointerConfig,
    pressed: bool,
    previous: Option<Vec2>,
}

impl PointerInput {
    pub fn new(config: PointerConfig) -> Self {
        Self {
            config,
            pressed: false,
            previous: None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Mouse down or touch start.
    pub fn begin(&mut self, pos: Vec2) {
        self.pressed = true;
        self.previous = Some(pos);
    }

    /// Mouse up or touch end.
    pub fn end(&mut self) {
        self.pressed = false;
        self.previous = None;
    }

    /// Pointer left the canvas. The last position is kept.
    pub fn leave(&mut self) {
        self.pressed = false;
    }

    /// Pointer moved to `pos`. Returns the impulses a drag produces; nothing
    /// when the pointer is not pressed.
    pub fn moved(&mut self, pos: Vec2, viewport: Viewport, n: usize) -> Vec<Impulse> {
        if !self.pressed {
            return Vec::new();
        }

        let (gx, gy) = viewport.grid_coord(pos, n);
        let mut impulses = vec![Impulse::Density {
            x: gx,
            y: gy,
            amount: self.config.density,
        }];

        if let Some(prev) = self.previous {
            let (px, py) = viewport.grid_coord(prev, n);
            let travel = Vec2::new(gx as f32 - px as f32, gy as f32 - py as f32);
            impulses.push(Impulse::Velocity {
                x: gx,
                y: gy,
                delta: travel * self.config.velocity_scale,
            });
        }

        self.previous = Some(pos);
        impulses
    }
}
