// Box sizing from an area budget.
//
// No font metrics: the text's width-to-height ratio is approximated from its character
// count, and the box is never taller than it is wide.

use serde::Serialize;

use super::LayoutConfig;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
}

impl BoxSize {
    pub fn scaled(&self, factor: f64) -> BoxSize {
        BoxSize {
            width: self.width * factor,
            height: self.height * factor,
            font_size: self.font_size * factor,
        }
    }
}

/// Size a box of roughly `area` square pixels for `name`, clamped to `max_width`.
pub fn size_box(name: &str, area: f64, max_width: f64, cfg: &LayoutConfig) -> BoxSize {
    let text_aspect = name.chars().count() as f64 * cfg.char_aspect;
    let aspect = text_aspect.max(1.0);

    let height = (area / aspect).sqrt();
    let size = BoxSize {
        width: height * aspect,
        height,
        font_size: height / cfg.line_height,
    };

    if size.width > max_width {
        size.scaled(max_width / size.width)
    } else {
        size
    }
}
