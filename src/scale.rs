use crate::Point;

/// Fraction of the shorter viewport side taken by the unit square.
pub const MARGIN_FRACTION: f64 = 0.9;

/// Affine map from the unit square to viewport pixels.
///
/// `px(x) = (x - x0) * dx`, `py(y) = (y - y0) * dy`. The unit square is centered in the
/// viewport, keeps its aspect ratio, and is flipped vertically (`dy = -dx`) so that unit-square
/// "up" is towards the top of the window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScaleTransform {
    pub x0: f64,
    pub y0: f64,
    pub dx: f64,
    pub dy: f64,
}

impl ScaleTransform {
    /// Compute the transform for a `width` by `height` pixel viewport.
    ///
    /// A viewport with no area, or with non-finite dimensions, gives the all-zero transform;
    /// check [`is_degenerate`](Self::is_degenerate) before drawing with it.
    pub fn compute(width: f64, height: f64) -> Self {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Self::default();
        }

        let dx = MARGIN_FRACTION * width.min(height);
        Self {
            x0: -(width / dx - 1.0) / 2.0,
            y0: 1.0 + (height / dx - 1.0) / 2.0,
            dx,
            dy: -dx,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.dx.is_nan() || self.dx <= 0.0
    }

    /// Side of the unit square in pixels; the clipper's "one viewport unit".
    pub fn span(&self) -> f64 {
        self.dx
    }

    pub fn px(&self, x: f64) -> f64 {
        (x - self.x0) * self.dx
    }

    pub fn py(&self, y: f64) -> f64 {
        (y - self.y0) * self.dy
    }

    pub fn to_pixel(&self, p: Point) -> Point {
        Point::new(self.px(p.x), self.py(p.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn viewport_400_by_300() {
        let (w, h) = (400.0, 300.0);
        let s = ScaleTransform::compute(w, h);
        let dx = 0.9 * 300.0;

        assert_eq!(s.dx, dx);
        assert_eq!(s.dy, -dx);

        // straight from the definition: x0 = -(w/dx - 1)/2, y0 = 1 + (h/dx - 1)/2
        let x0 = -(w / dx - 1.0) / 2.0;
        let y0 = 1.0 + (h / dx - 1.0) / 2.0;
        let center = s.to_pixel(Point::new(0.5, 0.5));
        assert!(close(center.x, (0.5 - x0) * dx));
        assert!(close(center.y, (0.5 - y0) * -dx));

        // which lands in the middle of the viewport
        assert!(close(center.x, w / 2.0));
        assert!(close(center.y, h / 2.0));
    }

    #[test]
    fn y_is_flipped() {
        let s = ScaleTransform::compute(400.0, 300.0);
        let bottom = s.to_pixel(Point::new(0.5, 0.0));
        let top = s.to_pixel(Point::new(0.5, 1.0));
        assert!(top.y < bottom.y);
        assert!(close(bottom.y - top.y, s.span()));
    }

    #[test]
    fn degenerate() {
        for (w, h) in [(0.0, 300.0), (400.0, 0.0), (-5.0, 10.0), (f64::NAN, 1.0)] {
            let s = ScaleTransform::compute(w, h);
            assert!(s.is_degenerate(), "{w}x{h}");
            assert_eq!(s.dx, 0.0);
            assert!(s.to_pixel(Point::new(0.3, 0.7)).is_finite());
        }
        assert!(!ScaleTransform::compute(1.0, 1.0).is_degenerate());
    }

    proptest! {
        #[test]
        fn corners_inside_viewport(w in 1.0f64..5000.0, h in 1.0f64..5000.0) {
            let s = ScaleTransform::compute(w, h);
            prop_assert!(close(s.dx, 0.9 * w.min(h)));

            for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
                let p = s.to_pixel(Point::new(x, y));
                prop_assert!(p.x > 0.0 && p.x < w, "{:?} in {}x{}", p, w, h);
                prop_assert!(p.y > 0.0 && p.y < h, "{:?} in {}x{}", p, w, h);
            }
        }

        #[test]
        fn idempotent(w in -10.0f64..5000.0, h in -10.0f64..5000.0) {
            prop_assert_eq!(ScaleTransform::compute(w, h), ScaleTransform::compute(w, h));
        }
    }
}
