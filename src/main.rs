#[cfg(not(target_arch = "wasm32"))]
use folio_fluid::{
    AnalysisRecorder, FluidConfig, ImageExporter, InteractiveApp, PointerInput, StableFluid, Viewport,
};
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

#[cfg(not(target_arch = "wasm32"))]
const OUTPUT_DIR: &str = "fluid_output";

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let headless = args.get(1).is_some_and(|arg| arg == "test");
    let config_arg = if headless { args.get(2) } else { args.get(1) };

    let config = match config_arg {
        Some(path) => FluidConfig::load(Path::new(path))?,
        None => FluidConfig::default(),
    };

    if headless {
        // Run headless test and export PNGs
        run_headless_test(&config)?;
    } else {
        run_gui_app(config)?;
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn run_headless_test(config: &FluidConfig) -> Result<(), Box<dyn std::error::Error>> {
    log::info!(
        "headless run: {0}x{0} grid, {1}x{2} output",
        config.resolution,
        config.display.width,
        config.display.height
    );

    let mut simulation = StableFluid::from_config(config);
    let exporter = ImageExporter::new(config.display.width, config.display.height);
    let mut recorder = AnalysisRecorder::new();
    let mut pointer = PointerInput::new(config.pointer.clone());

    let size = glam::Vec2::new(config.display.width as f32, config.display.height as f32);
    let viewport = Viewport::new(glam::Vec2::ZERO, size);
    let n = simulation.resolution();

    std::fs::create_dir_all(OUTPUT_DIR)?;
    let output = Path::new(OUTPUT_DIR);

    // Drag a diagonal stroke across the middle of the canvas for the first 20 frames
    let stroke_frames = 20;
    pointer.begin(size * 0.3);

    for frame in 1..=60u64 {
        if frame <= stroke_frames {
            let t = frame as f32 / stroke_frames as f32;
            let pos = size * (0.3 + 0.4 * t);
            for impulse in pointer.moved(pos, viewport, n) {
                simulation.apply(impulse);
            }
        } else if frame == stroke_frames + 1 {
            pointer.end();
        }

        simulation.step();
        let metrics = recorder.record_frame(&simulation, frame);

        if frame % 10 == 0 {
            log::info!("{}", metrics.summary());
            let path = output.join(format!("density_{:04}.png", frame));
            exporter.export_density_png(&simulation, &path)?;
        }
    }

    exporter.export_velocity_png(&simulation, &output.join("velocity_final.png"))?;

    if let Some(trends) = recorder.trends() {
        log::info!("trends: {}", trends);
    }
    log::info!("frames written to {}/", OUTPUT_DIR);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn run_gui_app(config: FluidConfig) -> Result<(), Box<dyn std::error::Error>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 780.0])
            .with_title("folio-fluid"),
        ..Default::default()
    };

    eframe::run_native(
        "folio-fluid",
        options,
        Box::new(|_cc| Box::new(InteractiveApp::new(config))),
    )?;
    Ok(())
}
