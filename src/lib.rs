use std::cmp::Ordering;

pub mod clip;
pub mod config;
pub mod diagram;
pub mod error;
mod heap;
pub mod render;
pub mod scale;
pub mod sites;
pub mod sweep;

pub use clip::{clip_infinite_edge, renderable_edge, ClippedEdge};
pub use config::{RebuildTrigger, ViewerConfig};
pub use diagram::{Diagram, DiagramBuilder, Segment, SweepBuilder};
pub use error::{BuildError, TopologyError};
pub use render::{Key, KeyResponse, PaintOutcome, Phase, RenderState, Surface};
pub use scale::ScaleTransform;
pub use sites::SiteGenerator;

/// A point in 2D space. it is ordered in lexicographic order, by `y` first.
#[derive(PartialEq, Clone, Copy, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}
impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
impl std::ops::Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}
impl Point {
    /// A Point whose x and y are both NaN. Marks a vertex that does not exist.
    pub const NAN: Self = Self::new(f64::NAN, f64::NAN);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check if both coordinates are NaN.
    pub fn is_nan(&self) -> bool {
        self.x.is_nan() && self.y.is_nan()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn perp_dot(&self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn dist(self, other: Self) -> f64 {
        let d = self - other;
        d.dot(d).sqrt()
    }
}
impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Point")
            .field(&self.x)
            .field(&self.y)
            .finish()
    }
}
impl std::hash::Hash for Point {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}
impl Eq for Point {}
impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        // NaN sites are rejected before they reach the sweep.
        if self.y == other.y {
            self.x.partial_cmp(&other.x).unwrap_or(Ordering::Equal)
        } else {
            self.y.partial_cmp(&other.y).unwrap_or(Ordering::Equal)
        }
    }
}

/// Index of a site in the slice handed to the sweep.
pub type SiteIdx = u32;
