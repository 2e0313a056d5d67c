use std::cmp::Ordering;

use super::{line_equation, next_down, next_up, star_map};
use crate::{Point, SiteIdx};

/// A piece of the bisector between two sites, restricted to an x-domain `[min_x, max_x)`.
///
/// In the *-mapped plane the bisector of two sites at different heights becomes a hyperbola; the
/// sweep keeps its left half (`C-`) and right half (`C+`) as separate boundaries.
#[derive(Clone, Copy)]
pub struct Bisector {
    /// The higher site, whose position is the minimum of the *-mapped hyperbola.
    pub a: SiteIdx,
    /// The lower site.
    pub b: SiteIdx,
    /// Leftmost x of the domain, inclusive.
    pub min_x: f64,
    /// Rightmost x of the domain, exclusive.
    pub max_x: f64,
}

impl std::fmt::Debug for Bisector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Bisector")
            .field(&self.a)
            .field(&self.b)
            .field(&(self.min_x..self.max_x))
            .finish()
    }
}

impl Bisector {
    /// Placeholder for the missing right boundary of the last beachline region.
    pub(super) fn nil() -> Self {
        Self {
            a: SiteIdx::MAX,
            b: SiteIdx::MAX,
            min_x: 0.,
            max_x: 0.,
        }
    }

    pub fn new(sites: &[Point], mut a: SiteIdx, mut b: SiteIdx) -> Self {
        let (p, q) = (sites[a as usize], sites[b as usize]);

        if p < q {
            std::mem::swap(&mut a, &mut b);
        }

        // Cohorizontal sites: the *-mapped bisector is a vertical half-line. Give it a one ulp
        // wide domain so that domain checks still see it.
        if p.y == q.y {
            let mx = (p.x + q.x) / 2.0;
            debug_assert!(next_up(mx) > mx);

            return Self {
                a,
                b,
                min_x: mx,
                max_x: next_up(mx),
            };
        }

        Self {
            a,
            b,
            min_x: f64::NEG_INFINITY,
            max_x: f64::INFINITY,
        }
    }

    /// `C-`: the half left of, and excluding, the higher site.
    pub(super) fn c_minus(self, sites: &[Point]) -> Bisector {
        let (a, b) = self.ab(sites);

        // Cohorizontal sites have an empty `C-`; everything lives in `C+`.
        if a.y == b.y {
            return Self {
                min_x: f64::INFINITY,
                max_x: f64::NEG_INFINITY,
                ..self
            };
        }

        Bisector { max_x: a.x, ..self }
    }

    /// `C+`: the half right of, and including, the higher site.
    pub(super) fn c_plus(self, sites: &[Point]) -> Bisector {
        let (a, b) = self.ab(sites);

        if a.y == b.y {
            return self;
        }

        Bisector { min_x: a.x, ..self }
    }

    /// `y` of the (unmapped) bisector line at `x`.
    pub fn y_at(&self, sites: &[Point], x: f64) -> f64 {
        let (a, b) = self.ab(sites);
        line_equation(x, a.x, a.y, b.x, b.y)
    }

    /// `y` of the *-mapped hyperbola at `x`.
    pub fn y_star_at(&self, sites: &[Point], x: f64) -> f64 {
        let y = self.y_at(sites, x);
        y + sites[self.a as usize].dist(Point::new(x, y))
    }

    /// Whether `point` is left or right of the *-mapped boundary.
    ///
    /// A point exactly on the boundary counts as left, so that a `C+` starting at that point
    /// can still intersect it.
    pub(super) fn star_cmp(&self, sites: &[Point], point: Point) -> Ordering {
        let (a, b) = self.ab(sites);

        if point.x < self.min_x {
            return Ordering::Less;
        }
        if point.x >= self.max_x {
            return Ordering::Greater;
        }

        if b.y == a.y {
            // vertical boundary; a site coincident with `a` goes right, it has the larger index.
            return point
                .x
                .partial_cmp(&a.x)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    if point == a {
                        Ordering::Greater
                    } else {
                        Ordering::Less
                    }
                });
        }

        let boundary_x = self.x_at_y_star(sites, point.y);
        log::trace!("star_cmp {} <=> {} ({})", point.x, boundary_x, a.x);

        point
            .x
            .partial_cmp(&boundary_x)
            .unwrap_or(Ordering::Equal)
            .then(Ordering::Less)
    }

    /// `x` where the *-mapped boundary crosses the horizontal line at `y`.
    pub fn x_at_y_star(&self, sites: &[Point], y: f64) -> f64 {
        let (a, b) = self.ab(sites);

        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let y = y - a.y;

        if dy == 0.0 {
            return (a.x + b.x) / 2.0;
        }

        let t1 = (y * (-dy + y)).sqrt();
        let t2 = (dx * dx + dy * dy).sqrt();

        // pick the root on our half of the hyperbola
        if self.min_x.is_finite() == (dy > 0.0) {
            a.x + (dx * y + t1 * t2) / dy
        } else {
            a.x + (dx * y - t1 * t2) / dy
        }
    }

    /// Intersection of two bisectors, if it falls inside both domains.
    pub(super) fn intersection(&self, sites: &[Point], other: Bisector) -> Option<Point> {
        let (a, b) = self.ab(sites);
        let (oa, ob) = other.ab(sites);

        if self.min_x >= other.max_x || self.max_x <= other.min_x {
            return None;
        }

        let (px, py, qx, qy) = (a.x, a.y, b.x, b.y);

        if py == qy {
            let x = (px + qx) / 2.0;
            return Some(Point::new(x, other.y_at(sites, x)));
        }

        let (rx, ry, sx, sy) = (oa.x, oa.y, ob.x, ob.y);

        if ry == sy {
            let x = (rx + sx) / 2.0;
            return Some(Point::new(x, self.y_at(sites, x)));
        }

        // Solve |X-p| = |X-q|, |X-r| = |X-s| as two linear equations (Cramer's rule).
        let (a1, b1) = (qx - px, qy - py);
        let c1 = (qx * qx + qy * qy - px * px - py * py) / 2.0;
        let (a2, b2) = (sx - rx, sy - ry);
        let c2 = (sx * sx + sy * sy - rx * rx - ry * ry) / 2.0;

        let d = a1 * b2 - a2 * b1;
        if d == 0.0 {
            log::trace!("parallel bisectors {:?} {:?}", self, other);
            return None;
        }

        let mut x = (c1 * b2 - c2 * b1) / d;
        let y = (a1 * c2 - a2 * c1) / d;

        // Landing exactly on our exclusive end, while our origin is right of `other`, still
        // counts: that intersection has to happen.
        if self.max_x.is_finite()
            && x == self.max_x
            && other.star_cmp(sites, sites[self.a as usize]) == Ordering::Greater
        {
            x = next_down(x);
        }

        if x < self.min_x || x >= self.max_x || x < other.min_x || x >= other.max_x {
            log::trace!(
                "intersection {} outside [{}, {}) / [{}, {})",
                x,
                self.min_x,
                self.max_x,
                other.min_x,
                other.max_x
            );
            return None;
        }

        Some(Point::new(x, y))
    }

    /// Intersection of two bisectors, *-mapped.
    pub(super) fn star_intersection(&self, sites: &[Point], other: Bisector) -> Option<Point> {
        let (a, _) = self.ab(sites);
        self.intersection(sites, other).map(|p| star_map(p, a))
    }

    fn ab(&self, sites: &[Point]) -> (Point, Point) {
        (sites[self.a as usize], sites[self.b as usize])
    }

    /// The boundary `Cqs` that replaces `Cqr, Rr, Crs` when region `r` vanishes at `p`.
    ///
    /// `Cqs+` if `p` is right of the higher of `q` and `s`, `Cqs-` otherwise, and the full
    /// vertical boundary when `q` and `s` are cohorizontal.
    pub(super) fn c_merge(sites: &[Point], p: Point, q_idx: SiteIdx, s_idx: SiteIdx) -> Bisector {
        let q = sites[q_idx as usize];
        let s = sites[s_idx as usize];
        let bqs = Bisector::new(sites, q_idx, s_idx);

        if q.y == s.y {
            return bqs;
        }

        if p.x >= q.max(s).x {
            Bisector { min_x: p.x, ..bqs }
        } else {
            Bisector { max_x: p.x, ..bqs }
        }
    }
}
