//! Browser entry point: runs [`InteractiveApp`] on an existing canvas.

use crate::config::FluidConfig;
use crate::desktop::InteractiveApp;
use wasm_bindgen::prelude::*;

/// Start the simulation on the canvas with id `canvas_id`.
///
/// `config_json` may be empty for defaults.
#[wasm_bindgen]
pub async fn start(canvas_id: String, config_json: String) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger already set: {}", err).into());
    }

    let config = if config_json.trim().is_empty() {
        FluidConfig::default()
    } else {
        FluidConfig::from_json(&config_json).map_err(|err| JsValue::from_str(&err.to_string()))?
    };
    log::info!("starting fluid canvas #{} at {}x{}", canvas_id, config.resolution, config.resolution);

    eframe::WebRunner::new()
        .start(
            &canvas_id,
            eframe::WebOptions::default(),
            Box::new(move |_cc| Box::new(InteractiveApp::new(config))),
        )
        .await
}
