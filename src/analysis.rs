use crate::export::FluidData;
use crate::grid::idx;
use std::collections::HashMap;

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

/// Whole-field diagnostics over the interior cells of one frame.
#[derive(Debug, Clone)]
pub struct FluidMetrics {
    pub total_mass: f32,
    pub max_density: f32,
    pub avg_density: f32,
    pub total_kinetic_energy: f32,
    pub max_velocity: f32,
    pub avg_velocity: f32,
    pub density_entropy: f32,
    /// Mean absolute central-difference divergence, in cells.
    pub velocity_divergence: f32,
    /// Mean absolute curl.
    pub vorticity: f32,
    pub frame: u64,
}

#[derive(Default, Clone, Copy)]
struct RowSums {
    mass: f32,
    max_density: f32,
    kinetic: f32,
    max_velocity: f32,
    velocity: f32,
    divergence: f32,
    vorticity: f32,
}

impl RowSums {
    fn merge(self, other: Self) -> Self {
        Self {
            mass: self.mass + other.mass,
            max_density: self.max_density.max(other.max_density),
            kinetic: self.kinetic + other.kinetic,
            max_velocity: self.max_velocity.max(other.max_velocity),
            velocity: self.velocity + other.velocity,
            divergence: self.divergence + other.divergence,
            vorticity: self.vorticity + other.vorticity,
        }
    }
}

fn row_sums(simulation: &impl FluidData, j: usize) -> RowSums {
    let n = simulation.resolution();
    let stride = n + 2;
    let density = simulation.density();
    let u = simulation.velocity_x();
    let v = simulation.velocity_y();
    let mut sums = RowSums::default();

    for i in 1..=n {
        let c = idx(n, i, j);
        let d = density[c];
        let speed = (u[c] * u[c] + v[c] * v[c]).sqrt();

        sums.mass += d;
        sums.max_density = sums.max_density.max(d);
        sums.kinetic += 0.5 * d * speed * speed;
        sums.max_velocity = sums.max_velocity.max(speed);
        sums.velocity += speed;
        sums.divergence += ((u[c + 1] - u[c - 1] + v[c + stride] - v[c - stride]) / 2.0).abs();
        sums.vorticity += ((v[c + 1] - v[c - 1] - (u[c + stride] - u[c - stride])) / 2.0).abs();
    }

    sums
}

impl FluidMetrics {
    pub fn analyze<S: FluidData + Sync>(simulation: &S, frame: u64) -> Self {
        let n = simulation.resolution();
        let cells = (n * n) as f32;

        #[cfg(not(target_arch = "wasm32"))]
        let sums = (1..=n)
            .into_par_iter()
            .map(|j| row_sums(simulation, j))
            .reduce(RowSums::default, RowSums::merge);

        #[cfg(target_arch = "wasm32")]
        let sums = (1..=n)
            .map(|j| row_sums(simulation, j))
            .fold(RowSums::default(), RowSums::merge);

        // Entropy of the density distribution, quantized to tenths.
        let density = simulation.density();
        let mut histogram: HashMap<i64, usize> = HashMap::new();
        for j in 1..=n {
            for i in 1..=n {
                let bucket = (density[idx(n, i, j)] * 10.0).floor() as i64;
                *histogram.entry(bucket).or_insert(0) += 1;
            }
        }
        let density_entropy = histogram
            .values()
            .map(|&count| count as f32 / cells)
            .filter(|&p| p > 0.0)
            .map(|p| -p * p.log2())
            .sum();

        Self {
            total_mass: sums.mass,
            max_density: sums.max_density,
            avg_density: sums.mass / cells,
            total_kinetic_energy: sums.kinetic,
            max_velocity: sums.max_velocity,
            avg_velocity: sums.velocity / cells,
            density_entropy,
            velocity_divergence: sums.divergence / cells,
            vorticity: sums.vorticity / cells,
            frame,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "frame {}: mass {:.6}, max density {:.6}, avg density {:.6}, kinetic {:.6}, \
             max velocity {:.6}, avg velocity {:.6}, entropy {:.6}, divergence {:.6}, vorticity {:.6}",
            self.frame,
            self.total_mass,
            self.max_density,
            self.avg_density,
            self.total_kinetic_energy,
            self.max_velocity,
            self.avg_velocity,
            self.density_entropy,
            self.velocity_divergence,
            self.vorticity,
        )
    }
}

#[derive(Debug, Default)]
pub struct AnalysisRecorder {
    pub metrics_history: Vec<FluidMetrics>,
}

impl AnalysisRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame<S: FluidData + Sync>(&mut self, simulation: &S, frame: u64) -> &FluidMetrics {
        self.metrics_history.push(FluidMetrics::analyze(simulation, frame));
        &self.metrics_history[self.metrics_history.len() - 1]
    }

    /// First-to-last change of mass, kinetic energy and entropy, or `None`
    /// with fewer than two frames recorded.
    pub fn trends(&self) -> Option<String> {
        let (first, last) = match self.metrics_history.as_slice() {
            [first, .., last] => (first, last),
            _ => return None,
        };

        let pct = |a: f32, b: f32| (b - a) / a.abs().max(0.001) * 100.0;
        Some(format!(
            "mass {:.6} -> {:.6} ({:+.3}%), kinetic {:.6} -> {:.6} ({:+.3}%), entropy {:.6} -> {:.6} ({:+.3}%)",
            first.total_mass,
            last.total_mass,
            pct(first.total_mass, last.total_mass),
            first.total_kinetic_energy,
            last.total_kinetic_energy,
            pct(first.total_kinetic_energy, last.total_kinetic_energy),
            first.density_entropy,
            last.density_entropy,
            pct(first.density_entropy, last.density_entropy),
        ))
    }
}
