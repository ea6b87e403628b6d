use crate::config::FluidConfig;
use crate::export::ImageExporter;
use crate::fluid::StableFluid;
use crate::input::{PointerInput, Viewport};
use crate::render::Renderer;
use crate::AmbientSwirl;
use eframe::egui;
use rand::Rng;
use std::path::Path;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(12, 24, 18);

pub struct InteractiveApp {
    simulation: StableFluid,
    config: FluidConfig,
    pointer: PointerInput,
    renderer: Renderer,
    exporter: ImageExporter,
    texture: Option<egui::TextureHandle>,
    paused: bool,
    ambient: bool,
}

impl InteractiveApp {
    pub fn new(config: FluidConfig) -> Self {
        let display = &config.display;
        Self {
            simulation: StableFluid::from_config(&config),
            pointer: PointerInput::new(config.pointer.clone()),
            renderer: Renderer::new(display.width, display.height),
            exporter: ImageExporter::new(display.width, display.height),
            texture: None,
            paused: false,
            ambient: config.ambient.enabled,
            config,
        }
    }

    fn set_ambient(&mut self, enabled: bool) {
        let driver = enabled.then(|| {
            Box::new(AmbientSwirl::from_config(&self.config.ambient)) as Box<dyn crate::SourceDriver>
        });
        self.simulation.set_driver(driver);
        log::info!("ambient swirl {}", if enabled { "on" } else { "off" });
    }

    fn splash(&mut self) {
        let n = self.simulation.resolution();
        let mut rng = rand::thread_rng();
        let x = rng.gen_range(1..=n);
        let y = rng.gen_range(1..=n);
        let scale = self.config.pointer.velocity_scale;

        self.simulation.inject_density(x, y, self.config.pointer.density);
        self.simulation.inject_velocity(
            x,
            y,
            rng.gen_range(-1.0f32..=1.0) * scale,
            rng.gen_range(-1.0f32..=1.0) * scale,
        );
    }

    fn handle_pointer(&mut self, response: &egui::Response, rect: egui::Rect) {
        let viewport = Viewport::new(
            glam::Vec2::new(rect.left(), rect.top()),
            glam::Vec2::new(rect.width(), rect.height()),
        );
        let pos = response
            .interact_pointer_pos()
            .map(|p| glam::Vec2::new(p.x, p.y));

        if response.drag_started() {
            if let Some(pos) = pos {
                self.pointer.begin(pos);
            }
        }

        if response.dragged() {
            if let Some(pos) = pos {
                let n = self.simulation.resolution();
                for impulse in self.pointer.moved(pos, viewport, n) {
                    self.simulation.apply(impulse);
                }
            }
        } else if response.drag_stopped() {
            self.pointer.end();
        } else if self.pointer.is_pressed() {
            // Drag lost without a release event, e.g. focus change.
            self.pointer.leave();
        }
    }

    fn paint(&mut self, ctx: &egui::Context, ui: &egui::Ui, rect: egui::Rect) {
        let (width, height) = self.renderer.size();
        let pixels = self.renderer.rasterize(&self.simulation);
        let image = egui::ColorImage::from_rgba_unmultiplied([width as usize, height as usize], &pixels);

        if let Some(texture) = self.texture.as_mut() {
            texture.set(image, egui::TextureOptions::LINEAR);
        } else {
            self.texture = Some(ctx.load_texture("fluid", image, egui::TextureOptions::LINEAR));
        }
        let Some(texture) = self.texture.as_ref() else {
            return;
        };

        let painter = ui.painter();
        painter.rect_filled(rect, 0.0, BACKGROUND);
        painter.image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }
}

impl eframe::App for InteractiveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(if self.paused { "Resume" } else { "Pause" }).clicked() {
                    self.paused = !self.paused;
                }

                if ui.button("Reset").clicked() {
                    self.simulation.reset();
                }

                if ui.button("Splash").clicked() {
                    self.splash();
                }

                if ui.checkbox(&mut self.ambient, "Ambient swirl").changed() {
                    self.set_ambient(self.ambient);
                }

                if ui.button("Export PNG").clicked() {
                    let path = Path::new("fluid_frame.png");
                    match self.exporter.export_density_png(&self.simulation, path) {
                        Ok(()) => log::info!("exported {}", path.display()),
                        Err(err) => log::warn!("export failed: {}", err),
                    }
                }
            });

            ui.separator();

            let available = ui.available_size();
            let side = available.x.min(available.y - 24.0).max(1.0);
            let (rect, response) =
                ui.allocate_exact_size(egui::Vec2::splat(side), egui::Sense::click_and_drag());

            self.handle_pointer(&response, rect);

            if !self.paused {
                self.simulation.step();
            }

            self.paint(ctx, ui, rect);

            ui.label(format!(
                "Frame {} | {}x{} cells | drag to stir the ink",
                self.simulation.frame(),
                self.simulation.resolution(),
                self.simulation.resolution()
            ));
        });

        ctx.request_repaint();
    }
}
