//! Frame accumulation and averaging.
//!
//! Averaging N frames is a two-phase protocol:
//!
//! 1. accumulate every frame into an `f32` [`AccumulationBuffer`]
//!    (channel-wise sums, 4 values per pixel, rows tightly packed);
//! 2. divide the sums by N into an 8-bit output buffer.
//!
//! Summing in `f32` avoids the rounding that successive 8-bit averaging
//! would accumulate. Division truncates toward zero and saturates at 0
//! and 255.
//!
//! [`image_accumulate`] and [`image_divide`] operate on raw slices with an
//! explicit stride; [`AccumulationBuffer`] is the typed equivalent and also
//! counts frames, so [`AccumulationBuffer::average_into`] needs no divisor.

use crate::basics::mean_u8;
use crate::error::{Error, Result};
use crate::parallel::{for_each_row, Parallelism};
use crate::rendering_buffer::{RowAccessor, PIX_WIDTH};

// ============================================================================
// Row kernels
// ============================================================================

fn check_divisor(divisor: f32) -> Result<()> {
    if divisor.is_finite() && divisor > 0.0 {
        Ok(())
    } else {
        log::warn!("divide: invalid divisor {}", divisor);
        Err(Error::InvalidDivisor(divisor))
    }
}

fn check_geometry(expected: (u32, u32), found: (u32, u32)) -> Result<()> {
    if expected == found {
        return Ok(());
    }
    log::warn!(
        "accumulation geometry {}x{} does not match {}x{}",
        found.0,
        found.1,
        expected.0,
        expected.1
    );
    Err(Error::DimensionMismatch {
        expected: (expected.0 as usize, expected.1 as usize),
        found: (found.0 as usize, found.1 as usize),
    })
}

/// `acc += frame`, channel-wise. Geometry must already be checked.
fn accumulate_rows<B: AsRef<[u8]>>(acc: &mut [f32], frame: &RowAccessor<B>, par: Parallelism) {
    let row_len = frame.row_bytes();
    let rows: Vec<_> = acc
        .chunks_mut(row_len.max(1))
        .zip(frame.rows())
        .enumerate()
        .collect();
    for_each_row(par, rows, |_, (sums, pixels)| {
        for (sum, &v) in sums.iter_mut().zip(pixels) {
            *sum += v as f32;
        }
    });
}

/// `out = acc / divisor`, channel-wise. Geometry and divisor must already
/// be checked.
fn divide_rows<B>(out: &mut RowAccessor<B>, acc: &[f32], divisor: f32, par: Parallelism)
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    let row_len = out.row_bytes();
    let rows: Vec<_> = out
        .rows_mut()
        .zip(acc.chunks(row_len.max(1)))
        .enumerate()
        .collect();
    for_each_row(par, rows, |_, (pixels, sums)| {
        for (pix, &sum) in pixels.iter_mut().zip(sums) {
            *pix = mean_u8(sum, divisor);
        }
    });
}

fn expected_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * PIX_WIDTH
}

fn check_len(acc_len: usize, width: u32, height: u32) -> Result<()> {
    let expected = expected_len(width, height);
    if acc_len == expected {
        return Ok(());
    }
    log::warn!(
        "accumulation buffer of {} values used for {}x{} frames",
        acc_len,
        width,
        height
    );
    Err(Error::LengthMismatch {
        expected,
        found: acc_len,
    })
}

// ============================================================================
// Raw slice API
// ============================================================================

/// Add every channel of `data` into `acc`.
///
/// `data` is an RGBA frame addressed as `y * stride + x * 4`; `acc` holds
/// `width * height * 4` sums, tightly packed. Call once per frame.
pub fn image_accumulate(
    acc: &mut [f32],
    data: &[u8],
    stride: usize,
    width: u32,
    height: u32,
) -> Result<()> {
    check_len(acc.len(), width, height)?;
    let frame = RowAccessor::new(data, width, height, stride)?;
    log::trace!("image_accumulate: {}x{} stride {}", width, height, stride);
    accumulate_rows(acc, &frame, Parallelism::default());
    Ok(())
}

/// Write `acc / divisor` into the RGBA buffer `buffer`, truncating each
/// channel to a byte.
///
/// `divisor` is normally the number of frames accumulated and must be
/// finite and positive. `acc` is not modified.
pub fn image_divide(
    buffer: &mut [u8],
    acc: &[f32],
    divisor: f32,
    stride: usize,
    width: u32,
    height: u32,
) -> Result<()> {
    check_divisor(divisor)?;
    check_len(acc.len(), width, height)?;
    let mut out = RowAccessor::new(buffer, width, height, stride)?;
    log::trace!("image_divide: {}x{} by {}", width, height, divisor);
    divide_rows(&mut out, acc, divisor, Parallelism::default());
    Ok(())
}

// ============================================================================
// AccumulationBuffer
// ============================================================================

/// Channel sums of a sequence of same-sized RGBA frames.
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulationBuffer {
    data: Vec<f32>,
    width: u32,
    height: u32,
    frames: u32,
}

impl AccumulationBuffer {
    /// Zeroed buffer for `width × height` frames.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0.0; expected_len(width, height)],
            width,
            height,
            frames: 0,
        }
    }

    /// Wrap existing sums. The frame count starts at zero.
    pub fn from_vec(data: Vec<f32>, width: u32, height: u32) -> Result<Self> {
        check_len(data.len(), width, height)?;
        Ok(Self {
            data,
            width,
            height,
            frames: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of frames accumulated since creation or the last `clear`.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Reset all sums and the frame count.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
        self.frames = 0;
    }

    /// Add one frame. Its geometry must match the buffer's.
    pub fn accumulate<B: AsRef<[u8]>>(&mut self, frame: &RowAccessor<B>) -> Result<()> {
        self.accumulate_with(frame, Parallelism::default())
    }

    pub fn accumulate_with<B: AsRef<[u8]>>(
        &mut self,
        frame: &RowAccessor<B>,
        par: Parallelism,
    ) -> Result<()> {
        check_geometry(
            (self.width, self.height),
            (frame.width(), frame.height()),
        )?;
        accumulate_rows(&mut self.data, frame, par);
        self.frames = self.frames.saturating_add(1);
        log::trace!("accumulate: frame {} ({}x{})", self.frames, self.width, self.height);
        Ok(())
    }

    /// Write the sums divided by `divisor` into `out`.
    pub fn divide<B>(&self, out: &mut RowAccessor<B>, divisor: f32) -> Result<()>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        self.divide_with(out, divisor, Parallelism::default())
    }

    pub fn divide_with<B>(&self, out: &mut RowAccessor<B>, divisor: f32, par: Parallelism) -> Result<()>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        check_divisor(divisor)?;
        check_geometry((self.width, self.height), (out.width(), out.height()))?;
        divide_rows(out, &self.data, divisor, par);
        Ok(())
    }

    /// Write the mean of every accumulated frame into `out`.
    pub fn average_into<B>(&self, out: &mut RowAccessor<B>) -> Result<()>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        self.divide(out, self.frames as f32)
    }
}

/// Average a set of same-sized frames into a new, tightly packed image.
pub fn average<B: AsRef<[u8]>>(frames: &[RowAccessor<B>]) -> Result<RowAccessor<Vec<u8>>> {
    let first = frames.first().ok_or(Error::NoFrames)?;
    let (width, height) = (first.width(), first.height());
    log::trace!("average: {} frames of {}x{}", frames.len(), width, height);

    let mut acc = AccumulationBuffer::new(width, height);
    for frame in frames {
        acc.accumulate(frame)?;
    }
    let mut out = RowAccessor::new_owned(width, height);
    acc.average_into(&mut out)?;
    Ok(out)
}

// ============================================================================
// Tests
// ============================================================================
