//! Error type shared by the shading and accumulation kernels.

use thiserror::Error;

/// Failures reported by the pixel kernels.
///
/// Every variant is a caller contract violation detected before any pixel
/// is written.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("rectangle ({x1}, {y1})-({x2}, {y2}) has non-positive width or height")]
    InvalidGeometry { x1: i32, y1: i32, x2: i32, y2: i32 },

    #[error("rectangle ({x1}, {y1})-({x2}, {y2}) exceeds {width}x{height} buffer")]
    OutOfBounds {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        width: u32,
        height: u32,
    },

    #[error("stride {stride} is smaller than the {min} bytes of one pixel row")]
    InvalidStride { stride: usize, min: usize },

    #[error("buffer holds {len} bytes, geometry requires {required}")]
    BufferTooSmall { len: usize, required: usize },

    #[error("divisor must be finite and positive, got {0}")]
    InvalidDivisor(f32),

    #[error("dimension mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("accumulation buffer holds {found} values, geometry requires {expected}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("shading parameter `{0}` is not finite")]
    NonFinite(&'static str),

    #[error("no frames to average")]
    NoFrames,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = Error::InvalidGeometry {
            x1: 0,
            y1: 0,
            x2: 0,
            y2: 4,
        };
        assert_eq!(
            e.to_string(),
            "rectangle (0, 0)-(0, 4) has non-positive width or height"
        );
        assert_eq!(
            Error::InvalidDivisor(0.0).to_string(),
            "divisor must be finite and positive, got 0"
        );
        let e = Error::DimensionMismatch {
            expected: (4, 2),
            found: (2, 4),
        };
        assert_eq!(e.to_string(), "dimension mismatch: expected (4, 2), found (2, 4)");
    }
}
