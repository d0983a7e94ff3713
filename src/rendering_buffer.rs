//! Rendering buffer: row-oriented access to RGBA pixel data.
//!
//! [`RowAccessor`] wraps any byte storage (`&[u8]`, `&mut [u8]`, `Vec<u8>`)
//! together with its `width`, `height` and `stride`. The geometry is checked
//! once at construction, so row access afterwards is plain slicing:
//!
//! - pixel byte offset is `y * stride + x * 4`
//! - `stride` may exceed `width * 4`; padding bytes are never touched
//! - the last row need not carry padding, so a buffer of
//!   `(height - 1) * stride + width * 4` bytes is enough

use crate::error::{Error, Result};

/// Bytes per RGBA pixel.
pub const PIX_WIDTH: usize = 4;

/// Minimum byte length of a buffer with the given geometry.
pub fn required_len(width: u32, height: u32, stride: usize) -> usize {
    if width == 0 || height == 0 {
        return 0;
    }
    (height as usize - 1)
        .saturating_mul(stride)
        .saturating_add(width as usize * PIX_WIDTH)
}

// ============================================================================
// RowAccessor
// ============================================================================

/// Stride-aware view over a caller-owned RGBA buffer.
#[derive(Debug, Clone)]
pub struct RowAccessor<B> {
    buf: B,
    width: u32,
    height: u32,
    stride: usize,
}

impl<B: AsRef<[u8]>> RowAccessor<B> {
    /// Attach to a buffer, validating stride and length.
    pub fn new(buf: B, width: u32, height: u32, stride: usize) -> Result<Self> {
        let min = width as usize * PIX_WIDTH;
        if stride < min {
            log::warn!("rendering buffer: stride {} < row size {}", stride, min);
            return Err(Error::InvalidStride { stride, min });
        }
        let required = required_len(width, height, stride);
        let len = buf.as_ref().len();
        if len < required {
            log::warn!("rendering buffer: {} bytes for {}x{} stride {}", len, width, height, stride);
            return Err(Error::BufferTooSmall { len, required });
        }
        Ok(Self {
            buf,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of pixel bytes in one row (`width * 4`), excluding padding.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * PIX_WIDTH
    }

    /// The pixel bytes of row `y`.
    pub fn row_slice(&self, y: u32) -> &[u8] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let start = y as usize * self.stride;
        &self.buf.as_ref()[start..start + self.row_bytes()]
    }

    /// RGBA channels of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width, "column {} out of bounds (width={})", x, self.width);
        let off = x as usize * PIX_WIDTH;
        let row = self.row_slice(y);
        [row[off], row[off + 1], row[off + 2], row[off + 3]]
    }

    /// Iterate over the pixel bytes of every row, top to bottom.
    ///
    /// Yields nothing for an empty (zero width or height) buffer.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let row_bytes = self.row_bytes();
        let used = required_len(self.width, self.height, self.stride);
        self.buf.as_ref()[..used]
            .chunks(self.stride.max(1))
            .map(move |row| &row[..row_bytes])
    }

    /// The whole underlying buffer, padding included.
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_ref()
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> RowAccessor<B> {
    /// Mutable pixel bytes of row `y`.
    pub fn row_slice_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let start = y as usize * self.stride;
        let end = start + self.row_bytes();
        &mut self.buf.as_mut()[start..end]
    }

    /// Iterate mutably over the pixel bytes of every row, top to bottom.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        let row_bytes = self.row_bytes();
        let used = required_len(self.width, self.height, self.stride);
        let stride = self.stride.max(1);
        self.buf.as_mut()[..used]
            .chunks_mut(stride)
            .map(move |row| &mut row[..row_bytes])
    }
}

impl RowAccessor<Vec<u8>> {
    /// Allocate a zeroed, tightly packed buffer (`stride == width * 4`).
    pub fn new_owned(width: u32, height: u32) -> Self {
        let stride = width as usize * PIX_WIDTH;
        Self {
            buf: vec![0u8; stride * height as usize],
            width,
            height,
            stride,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
