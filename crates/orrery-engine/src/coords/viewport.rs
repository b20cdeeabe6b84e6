use super::Rect;

/// Viewport size in logical pixels.
///
/// Renderers use it as the basis for camera aspect ratios and scissor conversion.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height; 1.0 for degenerate (minimized) viewports.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Largest square anchored at the top-left corner.
    ///
    /// Side is `min(width, height)`, so the canvas stays square through resizes.
    #[inline]
    pub fn square(self) -> Rect {
        let side = self.width.min(self.height).max(0.0);
        Rect::new(0.0, 0.0, side, side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_of_wide_viewport() {
        assert!((Viewport::new(1600.0, 800.0).aspect() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn aspect_of_degenerate_viewport_is_one() {
        assert_eq!(Viewport::new(800.0, 0.0).aspect(), 1.0);
    }

    #[test]
    fn square_follows_shorter_side() {
        assert_eq!(Viewport::new(900.0, 500.0).square(), Rect::new(0.0, 0.0, 500.0, 500.0));
        assert_eq!(Viewport::new(400.0, 700.0).square(), Rect::new(0.0, 0.0, 400.0, 400.0));
    }
}
