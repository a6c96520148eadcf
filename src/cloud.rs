//! Request handling between the JS boundary and the layout engine.
//!
//! Inputs arrive as JSON strings and plain numbers. Everything is validated here so the
//! engine only ever sees a positive viewport and well-formed lists.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;

use crate::layout::{layout_with_config, LayoutConfig, Viewport};
use crate::names::Roster;
use crate::output::CloudOutput;
use crate::palette::{default_palette, ColorScheme};

/// Why a request was rejected before layout.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// A JSON argument did not parse into the expected shape.
    Json { what: &'static str, msg: String },
    /// Width or height is zero, negative or not finite.
    Viewport { width: f64, height: f64 },
    /// The supplied clock reading is outside the representable range.
    Timestamp(f64),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Json { what, msg } => write!(f, "invalid {what}: {msg}"),
            InputError::Viewport { width, height } => {
                write!(f, "viewport must be positive, got {width}x{height}")
            }
            InputError::Timestamp(ms) => write!(f, "timestamp out of range: {ms}"),
        }
    }
}

impl std::error::Error for InputError {}

fn parse_json<T: DeserializeOwned>(what: &'static str, json: &str) -> Result<T, InputError> {
    serde_json::from_str(json).map_err(|e| InputError::Json { what, msg: e.to_string() })
}

/// Like `parse_json`, but a blank string means "use the default".
fn parse_json_or_default<T: DeserializeOwned + Default>(
    what: &'static str,
    json: &str,
) -> Result<T, InputError> {
    if json.trim().is_empty() {
        Ok(T::default())
    } else {
        parse_json(what, json)
    }
}

pub fn checked_viewport(width: f64, height: f64) -> Result<Viewport, InputError> {
    let viewport = Viewport::new(width, height);
    if viewport.is_valid() {
        Ok(viewport)
    } else {
        Err(InputError::Viewport { width, height })
    }
}

pub fn timestamp_from_millis(ms: f64) -> Result<DateTime<Utc>, InputError> {
    if !ms.is_finite() {
        return Err(InputError::Timestamp(ms));
    }
    DateTime::from_timestamp_millis(ms as i64).ok_or(InputError::Timestamp(ms))
}

/// JS numbers are doubles; anything non-finite or negative collapses to 0.
fn seed_from_f64(seed: f64) -> u64 {
    if seed.is_finite() && seed > 0.0 { seed as u64 } else { 0 }
}

/// Run one layout pass over an already ranked list.
pub fn render_cloud(
    names: &[String],
    viewport: Viewport,
    palette: &[ColorScheme],
    cfg: &LayoutConfig,
    rng: &mut StdRng,
) -> CloudOutput {
    let placed = layout_with_config(names, viewport, palette, cfg, rng);
    CloudOutput::from_layout(names, &placed)
}

/// `names_json` is an array of strings in rank order. Blank palette/config select defaults.
pub fn cloud_from_json(
    names_json: &str,
    palette_json: &str,
    config_json: &str,
    width: f64,
    height: f64,
    seed: f64,
) -> Result<CloudOutput, InputError> {
    let names: Vec<String> = parse_json("names", names_json)?;
    let palette: Vec<ColorScheme> = if palette_json.trim().is_empty() {
        default_palette()
    } else {
        parse_json("palette", palette_json)?
    };
    let cfg: LayoutConfig = parse_json_or_default("config", config_json)?;
    let viewport = checked_viewport(width, height)?;

    let mut rng = StdRng::seed_from_u64(seed_from_f64(seed));
    Ok(render_cloud(&names, viewport, &palette, &cfg, &mut rng))
}

/// Filter and rank a roster at `now_ms`, then lay it out with the default palette.
/// A blank `roster_json` selects the built-in roster.
pub fn cloud_from_roster_json(
    roster_json: &str,
    now_ms: f64,
    width: f64,
    height: f64,
    seed: f64,
) -> Result<CloudOutput, InputError> {
    let roster: Roster = parse_json_or_default("roster", roster_json)?;
    let now = timestamp_from_millis(now_ms)?;
    let viewport = checked_viewport(width, height)?;

    let mut rng = StdRng::seed_from_u64(seed_from_f64(seed));
    let names = roster.ranked(now, &mut rng);
    Ok(render_cloud(&names, viewport, &default_palette(), &LayoutConfig::default(), &mut rng))
}
