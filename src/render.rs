use crate::export::FluidData;
use crate::grid::idx;
use image::{ImageBuffer, Rgb, RgbImage, RgbaImage};

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

/// Piecewise-linear colour ramp over density in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    stops: Vec<(f32, [f32; 3])>,
}

impl ColorRamp {
    /// Deep forest through moss to warm amber.
    pub fn forest() -> Self {
        Self::new(vec![
            (0.0, [27.0, 67.0, 50.0]),
            (0.4, [45.0, 106.0, 79.0]),
            (0.75, [82.0, 183.0, 136.0]),
            (1.0, [200.0, 140.0, 40.0]),
        ])
    }

    /// `stops` must be sorted by position and non-empty.
    pub fn new(stops: Vec<(f32, [f32; 3])>) -> Self {
        assert!(!stops.is_empty(), "colour ramp needs at least one stop");
        Self { stops }
    }

    pub fn color(&self, density: f32) -> [u8; 3] {
        let d = density.clamp(0.0, 1.0);
        let last = self.stops.len() - 1;
        let upper = self
            .stops
            .iter()
            .position(|&(at, _)| d < at)
            .unwrap_or(last)
            .max(1)
            .min(last);
        let (lo_at, lo) = self.stops[upper.saturating_sub(1)];
        let (hi_at, hi) = self.stops[upper];

        let span = hi_at - lo_at;
        let t = if span > 0.0 { ((d - lo_at) / span).clamp(0.0, 1.0) } else { 0.0 };
        [0, 1, 2].map(|c| (lo[c] + t * (hi[c] - lo[c])).round() as u8)
    }

    /// Colour plus opacity proportional to clamped density.
    pub fn rgba(&self, density: f32) -> [u8; 4] {
        let [r, g, b] = self.color(density);
        let a = (density.clamp(0.0, 1.0) * 255.0).round() as u8;
        [r, g, b, a]
    }
}

/// Rasterizes simulation fields into images of a fixed output size.
pub struct Renderer {
    width: u32,
    height: u32,
    ramp: ColorRamp,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_ramp(width, height, ColorRamp::forest())
    }

    pub fn with_ramp(width: u32, height: u32, ramp: ColorRamp) -> Self {
        Self { width, height, ramp }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// RGBA8 pixels, row-major. Each interior cell fills one rectangular tile
    /// of roughly `width / N` by `height / N` pixels.
    pub fn rasterize(&self, simulation: &impl FluidData) -> Vec<u8> {
        let n = simulation.resolution();
        let density = simulation.density();
        let width = self.width as usize;

        let cell_colors: Vec<[u8; 4]> = (1..=n)
            .flat_map(|j| (1..=n).map(move |i| (i, j)))
            .map(|(i, j)| self.ramp.rgba(density[idx(n, i, j)]))
            .collect();
        let col_cell = tile_map(self.width, n);
        let row_cell = tile_map(self.height, n);

        let mut pixels = vec![0u8; width * self.height as usize * 4];
        if pixels.is_empty() {
            return pixels;
        }
        let fill_row = |(py, row): (usize, &mut [u8])| {
            let base = row_cell[py] * n;
            let row: &mut [[u8; 4]] = bytemuck::cast_slice_mut(row);
            for (px, pixel) in row.iter_mut().enumerate() {
                *pixel = cell_colors[base + col_cell[px]];
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        pixels.par_chunks_mut(width * 4).enumerate().for_each(fill_row);

        #[cfg(target_arch = "wasm32")]
        pixels.chunks_mut(width * 4).enumerate().for_each(fill_row);

        pixels
    }

    pub fn render_to_image(&self, simulation: &impl FluidData) -> RgbaImage {
        let pixels = self.rasterize(simulation);
        ImageBuffer::from_raw(self.width, self.height, pixels)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    /// Debug view: red for `|u|`, green for `|v|`.
    pub fn render_velocity_field(&self, simulation: &impl FluidData) -> RgbImage {
        let n = simulation.resolution();
        let col_cell = tile_map(self.width, n);
        let row_cell = tile_map(self.height, n);
        let mut img = ImageBuffer::new(self.width, self.height);

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let cell = idx(n, col_cell[x as usize] + 1, row_cell[y as usize] + 1);
            let r = (simulation.velocity_x()[cell].abs() * 255.0).min(255.0) as u8;
            let g = (simulation.velocity_y()[cell].abs() * 255.0).min(255.0) as u8;
            *pixel = Rgb([r, g, 128]);
        }

        img
    }
}

/// Zero-based cell index covering each of `pixels` output pixels along one
/// axis. Cell `k` spans `round(k * pixels / n) .. round((k + 1) * pixels / n)`.
fn tile_map(pixels: u32, n: usize) -> Vec<usize> {
    let cell = pixels as f32 / n as f32;
    let mut map = vec![n - 1; pixels as usize];
    for k in 0..n {
        let start = ((k as f32 * cell).round() as usize).min(map.len());
        let end = (((k + 1) as f32 * cell).round() as usize).min(map.len());
        map[start..end].fill(k);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_cover_every_pixel_in_order() {
        let map = tile_map(10, 4);
        assert_eq!(map.len(), 10);
        assert_eq!(map[0], 0);
        assert_eq!(map[9], 3);
        assert!(map.windows(2).all(|w| w[1] == w[0] || w[1] == w[0] + 1));
    }

    #[test]
    fn more_cells_than_pixels_still_maps() {
        let map = tile_map(3, 8);
        assert_eq!(map.len(), 3);
        assert!(map.iter().all(|&c| c < 8));
    }
}
