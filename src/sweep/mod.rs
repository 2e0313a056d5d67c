//! Fortune's sweepline algorithm for planar point sites.
//!
//! Based primarily on "A sweepline algorithm for Voronoi diagrams" by Steven Fortune, with some
//! handling of degenerate input from "An Efficient Implementation of Fortune's Plane-Sweep
//! Algorithm for Voronoi Diagrams" by Kenny Wong and Hausi A. Müller.
//!
//! Two conventions go beyond the papers and are needed for cohorizontal and coincident sites:
//! - The domain of `Cqr-` is left of `max(q, r)`, *excluding* that point. The domain of `Cqr+` is
//!   right of `min(q, r)`, *including* it.
//! - A point on a *-mapped boundary is on its left side.
//!
//! References:
//! - S.J. Fortune, A sweepline algorithm for Voronoi diagrams, Algorithmica 2 (1987), 153–174.
//! - Kenny Wong, Hausi A. Müller, An Efficient Implementation of Fortune's Plane-Sweep Algorithm
//!   for Voronoi Diagrams.

use std::cmp::Ordering;

mod beachline;
mod bisector;
mod cell;

pub use beachline::Beachline;
pub use bisector::Bisector;
pub use cell::{vec2_angle_cmp, SiteCell};

use crate::error::BuildError;
use crate::heap::Heap;
use crate::{Point, SiteIdx};

#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone)]
pub enum Event {
    /// A site.
    Site(SiteIdx),
    /// `(p, (q, r, s))`: `p` is where `Cqr*` and `Crs*` meet, i.e. where region `r` vanishes.
    Intersection(Point, (SiteIdx, SiteIdx, SiteIdx)),
}
impl Event {
    /// Where this event happens.
    pub fn pos(&self, sites: &[Point]) -> Point {
        match self {
            Event::Site(p) => sites[*p as usize],
            Event::Intersection(p, _) => *p,
        }
    }
}

/// Compute the cell of every site. `cells[i]` belongs to `sites[i]`.
pub fn compute_cells(sites: &[Point]) -> Result<Vec<SiteCell>, BuildError> {
    compute_cells_observed(sites, &mut |_| {})
}

/// Same as [`compute_cells`], calling `on_event` with the beachline after each step.
pub fn compute_cells_observed(
    sites: &[Point],
    on_event: &mut impl FnMut(&Beachline),
) -> Result<Vec<SiteCell>, BuildError> {
    let mut cells = vec![SiteCell::new(); sites.len()];

    let mut events = Heap::new(|a: &Event, b: &Event| event_cmp(sites, a, b));
    for site in 0..sites.len() {
        events.push(Event::Site(site as SiteIdx));
    }

    let Some(Event::Site(p)) = events.pop() else {
        return Ok(cells);
    };
    let mut beachline = Beachline::new(p);

    // All sites sharing the lowest y start side by side, split by vertical boundaries.
    while let Some(&Event::Site(q)) = events.peek() {
        if sites[q as usize].y != sites[p as usize].y {
            break;
        }
        events.pop();

        let p = beachline.push_cohorizontal(sites, q);
        cells[p as usize].add_neighbor(sites, p, q);
        cells[q as usize].add_neighbor(sites, q, p);
    }
    log::trace!("initial beachline: {:?}", beachline);

    on_event(&beachline);

    while let Some(event) = events.pop() {
        log::trace!("event {:?}, {} queued, {:?}", event, events.len(), beachline);
        match event {
            Event::Site(p_idx) => {
                site_event(sites, &mut beachline, &mut events, &mut cells, p_idx)?
            }
            Event::Intersection(p, (q_idx, r_idx, s_idx)) => intersection_event(
                sites,
                &mut beachline,
                &mut events,
                &mut cells,
                p,
                (q_idx, r_idx, s_idx),
            )?,
        }
        on_event(&beachline);
    }

    Ok(cells)
}

fn event_cmp(sites: &[Point], a: &Event, b: &Event) -> Ordering {
    let ord = a.pos(sites).cmp(&b.pos(sites));
    if ord != Ordering::Equal {
        return ord;
    }

    match (a, b) {
        (Event::Site(a), Event::Site(b)) => a.cmp(b),
        (Event::Site(_), Event::Intersection(..)) => Ordering::Less,
        (Event::Intersection(..), Event::Site(_)) => Ordering::Greater,
        (&Event::Intersection(p1, (q, _, s)), &Event::Intersection(p2, (t, _, v))) => {
            // Of two coincident intersections, the one merging into a `C+` goes first. Otherwise
            // the `C-` would remove the other one and, due to its exclusive end, never meet it
            // again.
            let plus1 = Bisector::c_merge(sites, p1, q, s).min_x.is_finite();
            let plus2 = Bisector::c_merge(sites, p2, t, v).min_x.is_finite();
            plus2.cmp(&plus1).then_with(|| a.cmp(b))
        }
    }
}

type EventQueue<F> = Heap<Event, F>;

/// Is `e` an intersection `(q, r, s)` with `q`, `r` and `s` taken from the given boundaries?
fn is_intersection_of(e: &Event, from_q: Bisector, from_r: Bisector, from_s: Bisector) -> bool {
    let on = |site: SiteIdx, b: Bisector| site == b.a || site == b.b;
    match *e {
        Event::Intersection(_, (q, r, s)) => on(q, from_q) && on(r, from_r) && on(s, from_s),
        _ => false,
    }
}

fn site_event<F: Fn(&Event, &Event) -> Ordering>(
    sites: &[Point],
    beachline: &mut Beachline,
    events: &mut EventQueue<F>,
    cells: &mut [SiteCell],
    p_idx: SiteIdx,
) -> Result<(), BuildError> {
    let p = sites[p_idx as usize];

    let reg_q = beachline.find_region(sites, p);
    let q_idx = beachline.region(reg_q);

    cells[p_idx as usize].add_neighbor(sites, p_idx, q_idx);
    cells[q_idx as usize].add_neighbor(sites, q_idx, p_idx);

    // Coincident with q: put p right next to q behind a vertical boundary.
    if p == sites[q_idx as usize] {
        log::trace!("coincident sites {} and {}", p_idx, q_idx);
        let bpq = Bisector::new(sites, p_idx, q_idx);

        let cqr = beachline
            .right_boundary(reg_q)
            .ok_or(BuildError::SweepFailed("coincident site on the last region"))?;
        beachline.split2(reg_q, (bpq, p_idx));

        let r = beachline.region(reg_q + 2);
        let vy = Bisector::new(sites, p_idx, r).y_at(sites, p.x);
        let v = Point::new(p.x, vy);
        cells[p_idx as usize].add_vertex(sites, v, p_idx, q_idx, r);
        cells[q_idx as usize].add_vertex(sites, v, q_idx, p_idx, r);
        cells[r as usize].add_vertex(sites, v, r, p_idx, q_idx);

        // The pending intersection of Cqr+ with its right neighbor now belongs to Cpr+, at the
        // same point.
        if let Some(right) = beachline.right_boundary(reg_q + 2) {
            events.update_where(
                |e| is_intersection_of(e, cqr, cqr, right),
                |e| {
                    if let Event::Intersection(_, (a, _, _)) = e {
                        *a = p_idx;
                    }
                },
            );
        }

        return Ok(());
    }

    let bpq = Bisector::new(sites, p_idx, q_idx);

    // ..., Rq, Cpq-, Rp, Cpq+, Rq, ... in place of Rq
    beachline.split3(reg_q, (bpq.c_minus(sites), p_idx, bpq.c_plus(sites)));

    // The boundaries around the old Rq no longer meet.
    if let (Some(left), Some(right)) = (
        beachline.left_boundary(reg_q),
        beachline.right_boundary(reg_q + 2),
    ) {
        if let Some(e) = events.remove_where(|e| is_intersection_of(e, left, right, right)) {
            log::trace!("dropped {:?}", e);
        }
    }

    if let Some(left) = beachline.left_boundary(reg_q) {
        if let Some(i) = bpq.c_minus(sites).star_intersection(sites, left) {
            let qrs = (
                beachline.region(reg_q - 1),
                beachline.region(reg_q),
                beachline.region(reg_q + 1),
            );
            events.push(Event::Intersection(i, qrs));
        }
    }

    if let Some(right) = beachline.right_boundary(reg_q + 2) {
        if let Some(i) = bpq.c_plus(sites).star_intersection(sites, right) {
            let qrs = (
                beachline.region(reg_q + 1),
                beachline.region(reg_q + 2),
                beachline.region(reg_q + 3),
            );
            events.push(Event::Intersection(i, qrs));
        }
    }

    Ok(())
}

fn intersection_event<F: Fn(&Event, &Event) -> Ordering>(
    sites: &[Point],
    beachline: &mut Beachline,
    events: &mut EventQueue<F>,
    cells: &mut [SiteCell],
    p: Point,
    (q_idx, r_idx, s_idx): (SiteIdx, SiteIdx, SiteIdx),
) -> Result<(), BuildError> {
    let (q, r, s) = (
        sites[q_idx as usize],
        sites[r_idx as usize],
        sites[s_idx as usize],
    );

    let reg_r = beachline
        .find_region3(q_idx, r_idx, s_idx)
        .ok_or(BuildError::SweepFailed("vanishing region not on the beachline"))?;

    let cqs = Bisector::c_merge(sites, p, q_idx, s_idx);
    let (Some(cqr), Some(crs)) = (beachline.left_boundary(reg_r), beachline.right_boundary(reg_r))
    else {
        return Err(BuildError::SweepFailed("vanishing region without two boundaries"));
    };

    // Cqs replaces Cqr, Rr, Crs
    beachline.merge(reg_r, cqs);

    // Cqr and Crs are gone, and so are their pending intersections.
    if let Some(left) = beachline.left_boundary(reg_r - 1) {
        events.remove_where(|e| is_intersection_of(e, left, cqr, cqr));
    }
    if let Some(right) = beachline.right_boundary(reg_r) {
        events.remove_where(|e| is_intersection_of(e, crs, crs, right));
    }

    // A Cqs- must still meet a boundary starting exactly at its end.
    let cqs = if cqs.max_x.is_finite() {
        Bisector {
            max_x: next_up(cqs.max_x),
            ..cqs
        }
    } else {
        cqs
    };

    if let Some(left) = beachline.left_boundary(reg_r - 1) {
        if let Some(i) = cqs.star_intersection(sites, left) {
            // Meeting again at this very point means the other boundary passes through it, and
            // we treat it as being left of Cqs.
            if !(i == p && p == sites[cqs.a as usize]) {
                let qrs = (
                    beachline.region(reg_r - 2),
                    beachline.region(reg_r - 1),
                    beachline.region(reg_r),
                );
                events.push(Event::Intersection(i, qrs));
            }
        }
    }

    if let Some(mut right) = beachline.right_boundary(reg_r) {
        // intersecting a neighbor that starts here handles coincident intersections
        if right.max_x.is_finite() {
            right.max_x = next_up(right.max_x);
        }
        if let Some(i) = cqs.star_intersection(sites, right) {
            let qrs = (
                beachline.region(reg_r - 1),
                beachline.region(reg_r),
                beachline.region(reg_r + 1),
            );
            events.push(Event::Intersection(i, qrs));
        }
    }

    let vertex = circumcenter(q, r, s)
        .ok_or(BuildError::SweepFailed("collinear sites at an intersection event"))?;
    log::trace!("vertex {} {} {}: {:?}", q_idx, r_idx, s_idx, vertex);
    cells[q_idx as usize].add_vertex(sites, vertex, q_idx, r_idx, s_idx);
    cells[r_idx as usize].add_vertex(sites, vertex, r_idx, q_idx, s_idx);
    cells[s_idx as usize].add_vertex(sites, vertex, s_idx, q_idx, r_idx);

    Ok(())
}

/// `y` of the bisector of `a` and `b` at `x`.
fn line_equation(x: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let x = x - ax;
    let dx = bx - ax;
    let dy = by - ay;

    ay + (dx * dx - 2.0 * dx * x + dy * dy) / (2.0 * dy)
}

/// The *-mapping of `p` with respect to the region of site `q`:
///
/// *(x, y) = (x, y + dist(q, (x, y)))
fn star_map(p: Point, q: Point) -> Point {
    Point::new(p.x, p.y + q.dist(p))
}

/// Circumcenter of the triangle `a`, `b`, `c`.
///
/// Two coincident corners are treated as horizontally side by side. `None` for any other
/// collinear triple.
pub(crate) fn circumcenter(a: Point, b: Point, c: Point) -> Option<Point> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));

    if d == 0.0 {
        let (a, b) = if a == b {
            (a, c)
        } else if a == c {
            (a, b)
        } else if b == c {
            (c, a)
        } else {
            return None;
        };
        if a.y == b.y {
            return None;
        }

        return Some(Point::new(a.x, line_equation(a.x, a.x, a.y, b.x, b.y)));
    }

    let (a2, b2, c2) = (a.dot(a), b.dot(b), c.dot(c));
    let ux = a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y);
    let uy = a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x);

    Some(Point::new(ux / d, uy / d))
}

/// The least `f64` greater than `x`. Same as the `f64::next_up` of newer toolchains.
fn next_up(x: f64) -> f64 {
    const TINY_BITS: u64 = 0x1;
    const CLEAR_SIGN_MASK: u64 = 0x7fff_ffff_ffff_ffff;

    let bits = x.to_bits();
    if x.is_nan() || bits == f64::INFINITY.to_bits() {
        return x;
    }

    let abs = bits & CLEAR_SIGN_MASK;
    let next_bits = if abs == 0 {
        TINY_BITS
    } else if bits == abs {
        bits + 1
    } else {
        bits - 1
    };
    f64::from_bits(next_bits)
}

/// The greatest `f64` less than `x`.
fn next_down(x: f64) -> f64 {
    -next_up(-x)
}
