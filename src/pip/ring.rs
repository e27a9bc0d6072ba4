//! Even-odd ray casting against a single ring.

use geo_types::{Coord, Polygon};

/// Whether `point` lies inside `ring`.
///
/// Casts a horizontal ray towards +x and counts edge crossings. The ring is
/// treated as cyclic, so a repeated closing vertex is optional. Winding order
/// does not matter. Points on the boundary may land on either side.
pub fn contains(point: Coord<f64>, ring: &[Coord<f64>]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let Coord { x, y } = point;
    let mut inside = false;

    for i in 0..n {
        let p1 = ring[i];
        let p2 = ring[(i + 1) % n];

        // Half-open span: above the lower vertex, at or below the upper one.
        // Keeps a scanline through a shared vertex from toggling twice.
        if y <= p1.y.min(p2.y) || y > p1.y.max(p2.y) {
            continue;
        }
        if x > p1.x.max(p2.x) {
            continue;
        }
        // Horizontal edges never cross (and would divide by zero below)
        if p1.y == p2.y {
            continue;
        }

        if p1.x == p2.x {
            inside = !inside;
            continue;
        }

        let xint = p1.x + (y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y);
        if x <= xint {
            inside = !inside;
        }
    }

    inside
}

/// Polygon containment. Tests the exterior ring only unless `subtract_holes`
/// is set, in which case parity runs across every ring.
pub fn polygon_contains(point: Coord<f64>, polygon: &Polygon<f64>, subtract_holes: bool) -> bool {
    let inside = contains(point, &polygon.exterior().0);
    if !subtract_holes {
        return inside;
    }

    polygon
        .interiors()
        .iter()
        .fold(inside, |acc, hole| acc ^ contains(point, &hole.0))
}
