//! WASM bindings for the namecloud-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here. Every entry
//! point returns `CloudOutput` JSON; failures are reported in its `error` field.

use log::{error, Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;

use crate::cloud::{cloud_from_json, cloud_from_roster_json, InputError};
use crate::output::CloudOutput;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    pub fn console_log(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    pub fn console_warn(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.target(), record.args());
        match record.level() {
            Level::Error => console_error(&line),
            Level::Warn => console_warn(&line),
            _ => console_log(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Route log output to the console. `level` is a `log` level name ("warn", "debug", ...);
/// anything unrecognised means "warn". Safe to call more than once.
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    // Only the first call installs the logger; later calls just adjust the level.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level.parse().unwrap_or(LevelFilter::Warn));
}

fn respond(result: Result<CloudOutput, InputError>) -> String {
    match result {
        Ok(output) => output.to_json(),
        Err(e) => {
            error!("Error laying out cloud: {e}");
            CloudOutput::error(e.to_string()).to_json()
        }
    }
}

/// Lay out a JSON array of names (rank = index) with the default palette.
#[wasm_bindgen]
pub fn layout_cloud(names_json: &str, width: f64, height: f64, seed: f64) -> String {
    respond(cloud_from_json(names_json, "", "", width, height, seed))
}

/// Lay out names with an explicit palette and config.
/// Pass an empty string for either to use the default.
#[wasm_bindgen]
pub fn layout_cloud_with(
    names_json: &str,
    palette_json: &str,
    config_json: &str,
    width: f64,
    height: f64,
    seed: f64,
) -> String {
    respond(cloud_from_json(names_json, palette_json, config_json, width, height, seed))
}

/// Filter a roster by `now_ms` (epoch milliseconds), rank it and lay it out.
/// An empty `roster_json` uses the built-in roster.
#[wasm_bindgen]
pub fn layout_roster(roster_json: &str, now_ms: f64, width: f64, height: f64, seed: f64) -> String {
    respond(cloud_from_roster_json(roster_json, now_ms, width, height, seed))
}

/// Lay out the built-in roster over the whole browser window.
/// The window size is read once, here; call again after a resize.
#[wasm_bindgen]
pub fn layout_window(seed: f64, now_ms: f64) -> String {
    let Some(window) = web_sys::window() else {
        error!("No window available");
        return CloudOutput::error("no window available").to_json();
    };
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);

    respond(cloud_from_roster_json("", now_ms, width, height, seed))
}
