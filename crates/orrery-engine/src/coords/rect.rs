/// Axis-aligned rectangle in logical pixels (top-left origin, +Y down).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Splits into four equal quadrants:
    /// `[top_left, top_right, bottom_left, bottom_right]`.
    pub fn quadrants(self) -> [Rect; 4] {
        let hw = self.w * 0.5;
        let hh = self.h * 0.5;
        [
            Rect::new(self.x, self.y, hw, hh),
            Rect::new(self.x + hw, self.y, hw, hh),
            Rect::new(self.x, self.y + hh, hw, hh),
            Rect::new(self.x + hw, self.y + hh, hw, hh),
        ]
    }

    /// Converts to a physical-pixel scissor rect `(x, y, w, h)` clamped to `bounds`.
    ///
    /// Returns `None` when nothing of the rect is visible; wgpu rejects zero-area
    /// scissors, so callers skip the draw instead.
    pub fn to_scissor(self, scale: f32, bounds: (u32, u32)) -> Option<(u32, u32, u32, u32)> {
        let (bw, bh) = bounds;
        let px = |v: f32, max: u32| ((v * scale).round().max(0.0) as u32).min(max);

        let x0 = px(self.x, bw);
        let y0 = px(self.y, bh);
        let x1 = px(self.right(), bw);
        let y1 = px(self.bottom(), bh);

        let w = x1.saturating_sub(x0);
        let h = y1.saturating_sub(y0);
        if w == 0 || h == 0 { None } else { Some((x0, y0, w, h)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrants_tile_the_rect() {
        let [tl, tr, bl, br] = Rect::new(0.0, 0.0, 500.0, 500.0).quadrants();
        assert_eq!(tl, Rect::new(0.0, 0.0, 250.0, 250.0));
        assert_eq!(tr, Rect::new(250.0, 0.0, 250.0, 250.0));
        assert_eq!(bl, Rect::new(0.0, 250.0, 250.0, 250.0));
        assert_eq!(br, Rect::new(250.0, 250.0, 250.0, 250.0));
    }

    #[test]
    fn quadrants_respect_offset() {
        let q = Rect::new(10.0, 20.0, 100.0, 50.0).quadrants();
        assert_eq!(q[3], Rect::new(60.0, 45.0, 50.0, 25.0));
    }

    #[test]
    fn scissor_scales_to_physical_pixels() {
        let r = Rect::new(250.0, 0.0, 250.0, 250.0);
        assert_eq!(r.to_scissor(2.0, (1000, 1000)), Some((500, 0, 500, 500)));
    }

    #[test]
    fn scissor_is_clamped_to_bounds() {
        let r = Rect::new(-10.0, 90.0, 50.0, 50.0);
        assert_eq!(r.to_scissor(1.0, (100, 100)), Some((0, 90, 40, 10)));
    }

    #[test]
    fn scissor_outside_bounds_is_none() {
        let r = Rect::new(200.0, 0.0, 50.0, 50.0);
        assert_eq!(r.to_scissor(1.0, (100, 100)), None);
    }

    #[test]
    fn empty_rect() {
        assert!(Rect::new(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
