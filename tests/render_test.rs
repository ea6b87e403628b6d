use folio_fluid::grid::idx;
use folio_fluid::{ColorRamp, FluidData, Renderer, StableFluid};

struct StillField {
    n: usize,
    density: Vec<f32>,
    velocity: Vec<f32>,
}

impl StillField {
    fn new(n: usize) -> Self {
        let size = (n + 2) * (n + 2);
        Self {
            n,
            density: vec![0.0; size],
            velocity: vec![0.0; size],
        }
    }
}

impl FluidData for StillField {
    fn resolution(&self) -> usize { self.n }
    fn density(&self) -> &[f32] { &self.density }
    fn velocity_x(&self) -> &[f32] { &self.velocity }
    fn velocity_y(&self) -> &[f32] { &self.velocity }
}

fn pixel(pixels: &[u8], width: usize, x: usize, y: usize) -> [u8; 4] {
    let off = (y * width + x) * 4;
    [pixels[off], pixels[off + 1], pixels[off + 2], pixels[off + 3]]
}

#[test]
fn test_ramp_hits_each_stop() {
    let ramp = ColorRamp::forest();
    assert_eq!(ramp.color(0.0), [27, 67, 50]);
    assert_eq!(ramp.color(0.4), [45, 106, 79]);
    assert_eq!(ramp.color(0.75), [82, 183, 136]);
    assert_eq!(ramp.color(1.0), [200, 140, 40]);
}

#[test]
fn test_ramp_clamps_out_of_range_density() {
    let ramp = ColorRamp::forest();
    assert_eq!(ramp.color(-3.0), ramp.color(0.0));
    assert_eq!(ramp.color(12.0), ramp.color(1.0));
    assert_eq!(ramp.rgba(12.0)[3], 255);
    assert_eq!(ramp.rgba(-1.0)[3], 0);
}

#[test]
fn test_ramp_interpolates_between_stops() {
    let ramp = ColorRamp::forest();
    // Halfway through the first segment
    assert_eq!(ramp.color(0.2), [36, 87, 65]);
    assert_eq!(ramp.rgba(0.5)[3], 128);
}

#[test]
fn test_rasterize_fills_cell_tiles() {
    let mut field = StillField::new(4);
    field.density[idx(4, 1, 1)] = 1.0;
    let renderer = Renderer::new(8, 8);

    let pixels = renderer.rasterize(&field);

    assert_eq!(pixels.len(), 8 * 8 * 4);
    for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        assert_eq!(pixel(&pixels, 8, x, y), [200, 140, 40, 255]);
    }
    assert_eq!(pixel(&pixels, 8, 2, 0), [27, 67, 50, 0]);
    assert_eq!(pixel(&pixels, 8, 7, 7), [27, 67, 50, 0]);
}

#[test]
fn test_rasterize_covers_uneven_sizes() {
    let mut field = StillField::new(4);
    field.density[idx(4, 4, 4)] = 0.75;
    let renderer = Renderer::new(10, 7);

    let pixels = renderer.rasterize(&field);

    assert_eq!(pixels.len(), 10 * 7 * 4);
    assert_eq!(pixel(&pixels, 10, 9, 6), [82, 183, 136, 191]);
    assert_eq!(pixel(&pixels, 10, 0, 0)[3], 0);
}

#[test]
fn test_render_to_image_matches_display_size() {
    let sim = StableFluid::new(16, 0.15, 0.000_02, 0.000_000_1);
    let renderer = Renderer::new(64, 48);

    let image = renderer.render_to_image(&sim);
    assert_eq!(image.dimensions(), (64, 48));

    let velocity = renderer.render_velocity_field(&sim);
    assert_eq!(velocity.dimensions(), (64, 48));
}
