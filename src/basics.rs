//! Basic geometry and conversion helpers shared by the kernels.

// ============================================================================
// Conversion
// ============================================================================

/// Scale a normalized intensity to a channel byte, truncating toward zero.
///
/// Values outside `[0, 1]` saturate at 0 and 255; NaN maps to 0.
#[inline]
pub fn gray_u8(v: f64) -> u8 {
    (v * 255.0) as u8
}

/// Truncate an accumulated channel sum divided by `divisor` to a byte.
///
/// Saturates like [`gray_u8`].
#[inline]
pub fn mean_u8(sum: f32, divisor: f32) -> u8 {
    (sum / divisor) as u8
}

// ============================================================================
// Rect
// ============================================================================

/// A half-open rectangle `[x1, x2) × [y1, y2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<T: Copy> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: Copy + PartialOrd> Rect<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Returns `true` if the rectangle covers at least one pixel.
    pub fn is_valid(&self) -> bool {
        self.x1 < self.x2 && self.y1 < self.y2
    }

    /// Returns `true` if `r` lies entirely inside this rectangle.
    pub fn contains(&self, r: &Self) -> bool {
        r.x1 >= self.x1 && r.y1 >= self.y1 && r.x2 <= self.x2 && r.y2 <= self.y2
    }
}

impl Rect<i32> {
    /// `x2 - x1`, widened so that extreme coordinates cannot overflow.
    pub fn width(&self) -> i64 {
        self.x2 as i64 - self.x1 as i64
    }

    pub fn height(&self) -> i64 {
        self.y2 as i64 - self.y1 as i64
    }

    /// The same rectangle with `i64` coordinates.
    pub fn widen(&self) -> Rect<i64> {
        Rect::new(self.x1 as i64, self.y1 as i64, self.x2 as i64, self.y2 as i64)
    }
}

/// Rectangle with `i32` coordinates.
pub type RectI = Rect<i32>;

// ============================================================================
// Tests
// ============================================================================
