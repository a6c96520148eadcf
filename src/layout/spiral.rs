// Spiral placement search.
//
// Candidates are walked along an outward Archimedean spiral around the viewport center.
// When a whole spiral fails, the box shrinks and the search restarts from a fresh random
// angle. Work per name is bounded by shrink_rounds * search_steps candidate checks.

use std::f64::consts::TAU;

use rand::Rng;

use super::{BoxSize, LayoutConfig, Point, Rect, SpatialGrid, Viewport};

/// Where a box ended up and at what size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placement {
    pub center: Point,
    pub size: BoxSize,
}

impl Placement {
    pub fn rect(&self) -> Rect {
        Rect::centered(self.center, self.size.width, self.size.height)
    }
}

/// Search for a free, in-bounds spot for a box of `size`.
/// Returns `None` once every shrink round has been exhausted.
pub fn place_on_spiral<R>(
    size: BoxSize,
    viewport: Viewport,
    placed: &SpatialGrid,
    cfg: &LayoutConfig,
    rng: &mut R,
) -> Option<Placement>
where
    R: Rng + ?Sized,
{
    let mut size = size;

    for _round in 0..cfg.shrink_rounds {
        let start_angle = rng.gen_range(0.0..TAU);
        if let Some(center) = walk_spiral(size, start_angle, viewport, placed, cfg) {
            return Some(Placement { center, size });
        }
        size = size.scaled(cfg.shrink_factor);
    }
    None
}

/// One spiral walk at a fixed box size.
fn walk_spiral(
    size: BoxSize,
    start_angle: f64,
    viewport: Viewport,
    placed: &SpatialGrid,
    cfg: &LayoutConfig,
) -> Option<Point> {
    let origin = viewport.center();
    let mut angle = start_angle;
    let mut radius = 0.5 * size.width.min(size.height);

    for _step in 0..cfg.search_steps {
        let center = Point {
            x: origin.x + radius * angle.cos(),
            y: origin.y + radius * angle.sin(),
        };
        let rect = Rect::centered(center, size.width, size.height);

        // Bounds first: it is the cheaper of the two checks.
        if viewport.contains(&rect) && !placed.collides_any(&rect, cfg.margin) {
            return Some(center);
        }

        angle += cfg.angle_step;
        radius += cfg.radius_step;
    }
    None
}
