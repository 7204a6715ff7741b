use super::Vec2;

/// Axis-aligned rectangle (top-left origin).
///
/// Viewports store this in normalized canvas fractions; [`to_pixels`] maps it
/// onto a concrete canvas size.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// The full unit rect `(0, 0, 1, 1)`.
    #[inline]
    pub const fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.origin.x
            && p.y >= self.origin.y
            && p.x < (self.origin.x + self.size.x)
            && p.y < (self.origin.y + self.size.y)
    }

    /// Scales a normalized rect onto a canvas, rounding to whole pixels.
    pub fn to_pixels(self, canvas_width: u32, canvas_height: u32) -> RectPx {
        let w = canvas_width as f32;
        let h = canvas_height as f32;
        RectPx {
            x: (self.origin.x * w).round() as i32,
            y: (self.origin.y * h).round() as i32,
            width: (self.size.x * w).round().max(0.0) as u32,
            height: (self.size.y * h).round().max(0.0) as u32,
        }
    }
}

/// Integer pixel rectangle handed to the backend as viewport/scissor.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RectPx {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl RectPx {
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height; 1.0 for degenerate rects.
    pub fn aspect(self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(r.contains(Vec2::new(9.9, 9.9)));
        assert!(!r.contains(Vec2::new(10.0, 10.0)));
        assert!(!r.contains(Vec2::new(-0.1, 5.0)));
    }

    // ── to_pixels ─────────────────────────────────────────────────────────

    #[test]
    fn to_pixels_scales_fractions() {
        let r = Rect::new(0.25, 0.5, 0.5, 0.5);
        let px = r.to_pixels(800, 600);
        assert_eq!(px, RectPx::new(200, 300, 400, 300));
    }

    #[test]
    fn to_pixels_unit_covers_canvas() {
        let px = Rect::unit().to_pixels(1920, 1080);
        assert_eq!(px, RectPx::new(0, 0, 1920, 1080));
    }

    // ── aspect ────────────────────────────────────────────────────────────

    #[test]
    fn aspect_of_degenerate_rect_is_one() {
        assert_eq!(RectPx::new(0, 0, 100, 0).aspect(), 1.0);
        assert_eq!(RectPx::new(0, 0, 200, 100).aspect(), 2.0);
    }
}
