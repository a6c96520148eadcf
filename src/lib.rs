//! Packed "name cloud" layout.
//!
//! Given ranked names and a viewport, computes non-overlapping boxes, font sizes and
//! colors for every name that fits. The browser build drives it through `wasm`.

pub mod cloud;
pub mod layout;
pub mod names;
pub mod output;
pub mod palette;
pub mod wasm;

pub use cloud::InputError;
pub use layout::{layout, layout_with_config, LayoutConfig, PlacedName, Rect, Viewport};
pub use names::{active_names, rank_names, NameEntry, Roster};
pub use output::{CloudOutput, StyledName};
pub use palette::{default_palette, ColorScheme};
