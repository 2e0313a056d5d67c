use std::cmp::Ordering;

use crate::{Point, SiteIdx};

/// What the sweep knows about one site's cell: its neighbors, counter-clockwise, and the Voronoi
/// vertices between consecutive neighbors.
#[derive(Clone, Debug, Default)]
pub struct SiteCell {
    /// Neighbors sorted by the polar angle of `neighbor - site`, counter-clockwise from +x.
    pub neighbors: Vec<SiteIdx>,
    /// `points[i]` is where the bisectors with `neighbors[i]` and `neighbors[i + 1]` meet,
    /// wrapping around. [`Point::NAN`] where they never meet, i.e. where the cell is unbounded.
    pub points: Vec<Point>,
}
impl SiteCell {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Insert `neighbor` in angular order, unless already present. Returns its index.
    pub(super) fn add_neighbor(
        &mut self,
        sites: &[Point],
        this: SiteIdx,
        neighbor: SiteIdx,
    ) -> usize {
        for i in 0..self.neighbors.len() {
            let other = self.neighbors[i];
            if neighbor == other {
                return i;
            }

            if angle_cmp(sites, this, neighbor, other).is_lt() {
                self.neighbors.insert(i, neighbor);
                self.points.insert(i, Point::NAN);
                return i;
            }
        }

        self.neighbors.push(neighbor);
        self.points.push(Point::NAN);
        self.neighbors.len() - 1
    }

    /// Record `point` as the vertex shared with neighbors `a` and `b`, in either order.
    pub(super) fn add_vertex(
        &mut self,
        sites: &[Point],
        point: Point,
        this: SiteIdx,
        mut a: SiteIdx,
        mut b: SiteIdx,
    ) {
        debug_assert!(point.is_finite());

        // `a` must be the neighbor that comes first counter-clockwise.
        let da = offset(sites, this, a);
        let db = offset(sites, this, b);
        if da.perp_dot(db) < 0.0 {
            std::mem::swap(&mut a, &mut b);
        }

        self.add_neighbor(sites, this, b);
        let i = self.add_neighbor(sites, this, a);

        debug_assert!(self.points[i].is_nan());
        self.points[i] = point;

        log::trace!(
            "{}: vertex {:?} between {} and {} -> {:?}",
            this,
            point,
            a,
            b,
            self.neighbors
        );
    }

    /// Whether the vertices found so far form a convex chain.
    #[cfg(test)]
    pub(crate) fn is_convex(&self) -> bool {
        let n = self.points.len();
        if n < 3 {
            return true;
        }

        (0..n).all(|i| {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let c = self.points[(i + 2) % n];
            let (ab, bc) = (b - a, c - b);
            let cross = ab.perp_dot(bc);
            // open cells have NaN vertices
            cross.is_nan() || cross >= -ab.dot(bc).abs() * 1e-6
        })
    }
}

/// `neighbor - this`, with coincident sites pushed apart horizontally by index.
fn offset(sites: &[Point], this: SiteIdx, neighbor: SiteIdx) -> Point {
    let mut d = sites[neighbor as usize] - sites[this as usize];
    if d == Point::new(0.0, 0.0) {
        d.x = if neighbor < this { -1.0 } else { 1.0 };
    }
    d
}

/// Order neighbors `a` and `b` of `this` counter-clockwise.
pub(crate) fn angle_cmp(sites: &[Point], this: SiteIdx, a: SiteIdx, b: SiteIdx) -> Ordering {
    let da = offset(sites, this, a);
    let db = offset(sites, this, b);

    vec2_angle_cmp(da, db).then_with(|| {
        // same direction: the smaller index is to the left
        let ord = a.cmp(&b);
        if db.y > 0.0 {
            ord.reverse()
        } else {
            ord
        }
    })
}

/// Compare the polar angles of `a` and `b`, in `[0, τ)`. Zero vectors compare equal to
/// everything.
///
/// Based on: https://stackoverflow.com/a/39420680
pub fn vec2_angle_cmp(a: Point, b: Point) -> Ordering {
    // false for [0, π), true for [π, τ)
    let lower_a = (a.y < 0.0) || ((a.y == 0.0) && (a.x < 0.0));
    let lower_b = (b.y < 0.0) || ((b.y == 0.0) && (b.x < 0.0));

    if lower_a == lower_b {
        return b.perp_dot(a).partial_cmp(&0.0).unwrap_or(Ordering::Equal);
    }

    if lower_a {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}
