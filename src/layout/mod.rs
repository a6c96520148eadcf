// Packed name-cloud layouter.
//
// Goals:
// - Area-budgeted: each rank gets a power-law share of the viewport area
// - Rank 0 is pinned at the viewport center, everything else spirals out from it
// - No overlap (with a fixed margin), everything inside the viewport
// - Bounded work: a name that cannot be fitted after shrinking is dropped, not an error
// - Deterministic for a given RNG seed
//
// Submodules:
// - weights: rank -> area share
// - sizing: area + text length -> box size and font size
// - spatial_grid: overlap detection for placed rects
// - spiral: spiral search with shrink-retry
//
// Output:
// - Vec<PlacedName> in rank order, minus any dropped names.

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::palette::{scheme_for_rank, shuffled_palette, ColorScheme};

mod sizing;
mod spatial_grid;
mod spiral;
mod weights;

pub use sizing::{size_box, BoxSize};
pub use spatial_grid::SpatialGrid;
pub use spiral::{place_on_spiral, Placement};
pub use weights::{area_shares, rank_weight};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned box in viewport pixels, top-left origin.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn centered(center: Point, w: f64, h: f64) -> Rect {
        Rect { x: center.x - w / 2.0, y: center.y - h / 2.0, w, h }
    }

    pub fn right(&self) -> f64 { self.x + self.w }
    pub fn bottom(&self) -> f64 { self.y + self.h }

    /// Overlap test with `margin` of breathing room around `other`.
    /// With `margin == 0.0` this is the plain open-interval AABB test.
    pub fn collides(&self, other: &Rect, margin: f64) -> bool {
        self.x < other.right() + margin
            && self.right() + margin > other.x
            && self.y < other.bottom() + margin
            && self.bottom() + margin > other.y
    }

    pub fn inflate(&self, by: f64) -> Rect {
        Rect { x: self.x - by, y: self.y - by, w: self.w + 2.0 * by, h: self.h + 2.0 * by }
    }
}

/// Measured size of the drawing surface. Read once per pass.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Viewport {
        Viewport { width, height }
    }

    pub fn center(&self) -> Point {
        Point { x: self.width / 2.0, y: self.height / 2.0 }
    }

    pub fn area(&self) -> f64 { self.width * self.height }

    pub fn contains(&self, rect: &Rect) -> bool {
        rect.x >= 0.0
            && rect.y >= 0.0
            && rect.right() <= self.width
            && rect.bottom() <= self.height
    }

    /// Positive and finite in both dimensions.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Tuning knobs for a layout pass. Defaults reproduce the classic cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Fraction of the viewport area handed out to names.
    pub area_fill: f64,
    /// Power-law exponent for rank weights.
    pub weight_exponent: f64,
    /// Width-to-height ratio contributed by each character.
    pub char_aspect: f64,
    /// Box height as a multiple of font size.
    pub line_height: f64,
    /// Minimum gap between placed boxes.
    pub margin: f64,
    /// Shrink-and-retry rounds before a name is dropped.
    pub shrink_rounds: u32,
    /// Spiral steps per round.
    pub search_steps: u32,
    /// Scale applied to a box after a failed round.
    pub shrink_factor: f64,
    /// Radians added to the spiral angle per step.
    pub angle_step: f64,
    /// Pixels added to the spiral radius per step.
    pub radius_step: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            area_fill: 0.9,
            weight_exponent: 1.5,
            char_aspect: 0.6,
            line_height: 1.2,
            margin: 5.0,
            shrink_rounds: 10,
            search_steps: 3000,
            shrink_factor: 0.95,
            angle_step: 0.25,
            radius_step: 1.0,
        }
    }
}

/// A name with its final position, size and colors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedName {
    pub name: String,
    pub rank: usize,
    /// Center of the box.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub color: ColorScheme,
}

impl PlacedName {
    pub fn rect(&self) -> Rect {
        Rect::centered(Point { x: self.x, y: self.y }, self.width, self.height)
    }
}

/// Lay out `names` (rank = index) with the default configuration.
pub fn layout<S, R>(names: &[S], viewport: Viewport, palette: &[ColorScheme], rng: &mut R) -> Vec<PlacedName>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    layout_with_config(names, viewport, palette, &LayoutConfig::default(), rng)
}

/// Lay out `names` inside `viewport`.
///
/// The palette is shuffled once up front, then every name is sized from its area share
/// and placed in rank order. Names that do not fit are left out of the result.
/// The viewport must be positive in both dimensions.
pub fn layout_with_config<S, R>(
    names: &[S],
    viewport: Viewport,
    palette: &[ColorScheme],
    cfg: &LayoutConfig,
    rng: &mut R,
) -> Vec<PlacedName>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    if names.is_empty() {
        return Vec::new();
    }

    let palette = shuffled_palette(palette, rng);
    let areas = area_shares(names.len(), viewport, cfg);
    let mut spatial = SpatialGrid::for_viewport(viewport);
    let mut placed = Vec::with_capacity(names.len());

    for (rank, (name, area)) in names.iter().zip(areas).enumerate() {
        let name = name.as_ref();
        let size = size_box(name, area, viewport.width, cfg);

        // Rank 0 owns the center; nothing has been placed yet to collide with.
        let placement = if rank == 0 {
            Some(Placement { center: viewport.center(), size })
        } else {
            place_on_spiral(size, viewport, &spatial, cfg, rng)
        };

        let Some(placement) = placement else {
            warn!(
                "could not place {name:?} (rank {rank}) after {} shrink rounds",
                cfg.shrink_rounds
            );
            continue;
        };

        spatial.insert(placement.rect());
        placed.push(PlacedName {
            name: name.to_string(),
            rank,
            x: placement.center.x,
            y: placement.center.y,
            width: placement.size.width,
            height: placement.size.height,
            font_size: placement.size.font_size,
            color: scheme_for_rank(&palette, rank),
        });
    }

    debug!(
        "placed {} of {} names in {}x{}",
        placed.len(),
        names.len(),
        viewport.width,
        viewport.height
    );
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::default_palette;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f64 = 1e-9;

    fn assert_packed(placed: &[PlacedName], viewport: Viewport, margin: f64) {
        for (i, a) in placed.iter().enumerate() {
            let r = a.rect();
            assert!(
                r.x >= -EPS && r.y >= -EPS
                    && r.right() <= viewport.width + EPS
                    && r.bottom() <= viewport.height + EPS,
                "{} out of bounds: {:?}",
                a.name,
                r
            );
            for b in &placed[i + 1..] {
                assert!(!b.rect().collides(&r, margin), "{} overlaps {}", a.name, b.name);
            }
        }
    }

    fn sample_names() -> Vec<String> {
        [
            "MK TheBoss", "Mohamed", "Wafa", "Fouad", "Khawla", "Soumaya", "Lina",
            "Youssef", "Wala", "Ikhlass", "Siby", "Naïa", "Zoé", "Liam",
            "Kyrie Elijah", "Djibril", "Ornella", "Jonas", "Kiara",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn test_rect_collides_with_margin() {
        let a = Rect { x: 0.0, y: 0.0, w: 10.0, h: 10.0 };
        let touching = Rect { x: 10.0, y: 0.0, w: 10.0, h: 10.0 };
        let gap = Rect { x: 15.0, y: 0.0, w: 10.0, h: 10.0 };
        let far = Rect { x: 15.5, y: 0.0, w: 10.0, h: 10.0 };

        assert!(!a.collides(&touching, 0.0));
        assert!(a.collides(&touching, 5.0));
        // Exactly `margin` apart is not a collision (strict comparison).
        assert!(!a.collides(&gap, 5.0));
        assert!(!a.collides(&far, 5.0));
    }

    #[test]
    fn test_viewport_contains() {
        let vp = Viewport::new(100.0, 50.0);
        assert!(vp.contains(&Rect { x: 0.0, y: 0.0, w: 100.0, h: 50.0 }));
        assert!(!vp.contains(&Rect { x: -0.1, y: 0.0, w: 10.0, h: 10.0 }));
        assert!(!vp.contains(&Rect { x: 95.0, y: 0.0, w: 10.0, h: 10.0 }));
        assert!(!vp.contains(&Rect { x: 0.0, y: 45.0, w: 10.0, h: 10.0 }));
    }

    #[test]
    fn test_empty_input() {
        let mut rng = StdRng::seed_from_u64(1);
        let names: Vec<String> = Vec::new();
        let placed = layout(&names, Viewport::new(800.0, 600.0), &default_palette(), &mut rng);
        assert!(placed.is_empty());
    }

    #[test]
    fn test_single_name_is_centered() {
        let mut rng = StdRng::seed_from_u64(7);
        let placed = layout(&["Solo"], Viewport::new(1000.0, 1000.0), &default_palette(), &mut rng);
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].rank, 0);
        assert_eq!((placed[0].x, placed[0].y), (500.0, 500.0));
    }

    #[test]
    fn test_two_names() {
        let vp = Viewport::new(1000.0, 1000.0);
        let mut rng = StdRng::seed_from_u64(42);
        let placed = layout(&["A", "B"], vp, &default_palette(), &mut rng);

        assert_eq!(placed[0].name, "A");
        assert_eq!((placed[0].x, placed[0].y), (500.0, 500.0));
        // "A" claims most of a square viewport, so "B" may legitimately be dropped.
        assert!(placed.len() <= 2);
        if let Some(b) = placed.get(1) {
            assert!(!b.rect().collides(&placed[0].rect(), 5.0));
            assert!(vp.contains(&b.rect()));
        }
    }

    #[test]
    fn test_second_name_fits_beside_wide_headliner() {
        // Long names give flat full-width bands, leaving room above and below the first.
        let vp = Viewport::new(1000.0, 1000.0);
        let mut rng = StdRng::seed_from_u64(42);
        let placed = layout(&["Alexandria Ocasio", "Bartholomew"], vp, &default_palette(), &mut rng);

        assert_eq!(placed.len(), 2);
        assert_eq!((placed[0].x, placed[0].y), (500.0, 500.0));
        assert!(placed[1].width < 1000.0);
        assert!(!placed[1].rect().collides(&placed[0].rect(), 5.0));
        assert!(vp.contains(&placed[1].rect()));
    }

    #[test]
    fn test_realistic_list_is_packed() {
        let vp = Viewport::new(1280.0, 720.0);
        let names = sample_names();
        let mut rng = StdRng::seed_from_u64(2024);
        let placed = layout(&names, vp, &default_palette(), &mut rng);

        assert!(placed.len() <= names.len());
        assert_eq!(placed[0].name, "MK TheBoss");
        assert_eq!((placed[0].x, placed[0].y), (640.0, 360.0));
        assert_packed(&placed, vp, 5.0);

        // Rank order is preserved.
        for pair in placed.windows(2) {
            assert!(pair[0].rank < pair[1].rank);
            assert_eq!(names[pair[0].rank], pair[0].name);
        }
    }

    #[test]
    fn test_dense_input_terminates_and_stays_valid() {
        let vp = Viewport::new(100.0, 100.0);
        let names: Vec<String> = (0..50).map(|i| format!("An Extremely Long Name Number {i}")).collect();
        let cfg = LayoutConfig::default();
        let mut rng = StdRng::seed_from_u64(99);
        let placed = layout_with_config(&names, vp, &default_palette(), &cfg, &mut rng);

        assert!(placed.len() <= names.len());
        assert_eq!(placed[0].rank, 0);
        assert_eq!((placed[0].x, placed[0].y), (50.0, 50.0));
        assert_packed(&placed, vp, cfg.margin);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let vp = Viewport::new(900.0, 700.0);
        let names = sample_names();
        let a = layout(&names, vp, &default_palette(), &mut StdRng::seed_from_u64(5));
        let b = layout(&names, vp, &default_palette(), &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_colors_cycle_through_shuffled_palette() {
        let vp = Viewport::new(1600.0, 1200.0);
        let palette = default_palette();
        let names = sample_names();
        let placed = layout(&names, vp, &palette, &mut StdRng::seed_from_u64(11));

        for p in &placed {
            assert!(palette.contains(&p.color));
        }
        // Same rank modulo palette length means same scheme within one pass.
        for a in &placed {
            for b in &placed {
                if a.rank % palette.len() == b.rank % palette.len() {
                    assert_eq!(a.color, b.color);
                }
            }
        }
    }

    #[test]
    fn test_empty_palette_uses_default_scheme() {
        let mut rng = StdRng::seed_from_u64(3);
        let placed = layout(&["A", "B", "C"], Viewport::new(600.0, 600.0), &[], &mut rng);
        assert!(!placed.is_empty());
        assert!(placed.iter().all(|p| p.color == ColorScheme::default()));
    }

    #[test]
    fn test_config_deserializes_partial_overrides() {
        let cfg: LayoutConfig = serde_json::from_str(r#"{"margin": 2.0, "search_steps": 10}"#).unwrap();
        assert_eq!(cfg.margin, 2.0);
        assert_eq!(cfg.search_steps, 10);
        assert_eq!(cfg.shrink_rounds, LayoutConfig::default().shrink_rounds);
    }
}
