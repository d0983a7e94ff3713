//! Shading fills: clamped linear gradients and per-pixel math fills.
//!
//! A [`ShadingFunction`] maps a normalized pixel coordinate to a gray
//! intensity. [`shade_rect`] evaluates it over a rectangle of an RGBA buffer
//! and writes `R = G = B = value * 255` (truncated) with opaque alpha.
//!
//! Coordinates are normalized by the size of the *filled rectangle*, not of
//! the buffer, and the rectangle origin is not subtracted: pixel `(x, y)` of
//! a `w × h` rectangle is evaluated at `(x / w, y / h)`. For a rectangle that
//! spans the whole buffer this is the usual `[0, 1)` range.

use crate::basics::{gray_u8, Rect, RectI};
use crate::error::{Error, Result};
use crate::parallel::{for_each_row, Parallelism};
use crate::rendering_buffer::{RowAccessor, PIX_WIDTH};

// ============================================================================
// ShadingFunction trait
// ============================================================================

/// Maps normalized coordinates `(xx, yy)` to a gray intensity in `[0, 1]`.
///
/// Results outside `[0, 1]` saturate when written to the buffer.
pub trait ShadingFunction {
    fn value(&self, xx: f64, yy: f64) -> f64;
}

impl<F: Fn(f64, f64) -> f64> ShadingFunction for F {
    #[inline]
    fn value(&self, xx: f64, yy: f64) -> f64 {
        self(xx, yy)
    }
}

// ============================================================================
// LinearShading
// ============================================================================

/// Clamped linear gradient between two gray stops.
///
/// Each point is projected onto the direction `d = end - start`. Points whose
/// projection falls before `start` take `start_color`, points past `end` take
/// `end_color`, and points in between are interpolated linearly. The bands
/// are perpendicular to `d`.
///
/// A zero-length direction has no meaningful projection; such a gradient is
/// [degenerate](LinearShading::is_degenerate) and evaluates to `start_color`
/// everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearShading {
    start_color: f64,
    end_color: f64,
    xd: f64,
    yd: f64,
    c1: f64,
    c2: f64,
    cd: f64,
}

impl LinearShading {
    /// Build a gradient from `start` to `end` in normalized coordinates.
    ///
    /// Fails with [`Error::NonFinite`] if any parameter is NaN or infinite,
    /// or if the projection of the endpoints onto the direction overflows.
    pub fn new(start_color: f64, end_color: f64, start: (f64, f64), end: (f64, f64)) -> Result<Self> {
        let params = [
            ("start_color", start_color),
            ("end_color", end_color),
            ("sx", start.0),
            ("sy", start.1),
            ("ex", end.0),
            ("ey", end.1),
        ];
        if let Some(&(name, _)) = params.iter().find(|(_, v)| !v.is_finite()) {
            log::warn!("linear shading: parameter {} is not finite", name);
            return Err(Error::NonFinite(name));
        }

        let xd = end.0 - start.0;
        let yd = end.1 - start.1;
        let c1 = xd * start.0 + yd * start.1;
        let c2 = xd * end.0 + yd * end.1;
        let cd = c2 - c1;
        if ![xd, yd, c1, c2, cd].iter().all(|v| v.is_finite()) {
            log::warn!(
                "linear shading: direction ({}, {})->({}, {}) overflows",
                start.0,
                start.1,
                end.0,
                end.1
            );
            return Err(Error::NonFinite("direction"));
        }
        Ok(Self {
            start_color,
            end_color,
            xd,
            yd,
            c1,
            c2,
            cd,
        })
    }

    /// `true` when the projected segment has no length.
    pub fn is_degenerate(&self) -> bool {
        self.cd <= 0.0
    }
}

impl ShadingFunction for LinearShading {
    #[inline]
    fn value(&self, xx: f64, yy: f64) -> f64 {
        if self.is_degenerate() {
            return self.start_color;
        }
        let c = self.xd * xx + self.yd * yy;
        if c <= self.c1 {
            self.start_color
        } else if c >= self.c2 {
            self.end_color
        } else {
            (self.start_color * (self.c2 - c) + self.end_color * (c - self.c1)) / self.cd
        }
    }
}

// ============================================================================
// Fills
// ============================================================================

/// Evaluate `func` over `rect` and write opaque gray pixels into `rbuf`.
///
/// The rectangle must be non-empty and lie inside the buffer; nothing is
/// written otherwise.
pub fn shade_rect<B, S>(
    rbuf: &mut RowAccessor<B>,
    rect: RectI,
    func: &S,
    par: Parallelism,
) -> Result<()>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
    S: ShadingFunction + Sync + ?Sized,
{
    let RectI { x1, y1, x2, y2 } = rect;
    if !rect.is_valid() {
        log::warn!("shade_rect: empty rectangle ({}, {})-({}, {})", x1, y1, x2, y2);
        return Err(Error::InvalidGeometry { x1, y1, x2, y2 });
    }
    let (width, height) = (rbuf.width(), rbuf.height());
    let bounds = Rect::new(0, 0, width as i64, height as i64);
    if !bounds.contains(&rect.widen()) {
        log::warn!(
            "shade_rect: ({}, {})-({}, {}) outside {}x{} buffer",
            x1,
            y1,
            x2,
            y2,
            width,
            height
        );
        return Err(Error::OutOfBounds {
            x1,
            y1,
            x2,
            y2,
            width,
            height,
        });
    }
    log::trace!("shade_rect: ({}, {})-({}, {})", x1, y1, x2, y2);

    let w = rect.width() as f64;
    let h = rect.height() as f64;
    let (x1, x2) = (x1 as usize, x2 as usize);
    let (y1, y2) = (y1 as usize, y2 as usize);

    let rows: Vec<_> = rbuf
        .rows_mut()
        .enumerate()
        .skip(y1)
        .take(y2 - y1)
        .collect();
    for_each_row(par, rows, |y, row| {
        let yy = y as f64 / h;
        let span = &mut row[x1 * PIX_WIDTH..x2 * PIX_WIDTH];
        for (x, pix) in (x1..).zip(span.chunks_exact_mut(PIX_WIDTH)) {
            let xx = x as f64 / w;
            let v = gray_u8(func.value(xx, yy));
            pix.copy_from_slice(&[v, v, v, 0xff]);
        }
    });
    Ok(())
}

/// Fill `[x1, x2) × [y1, y2)` of a raw RGBA buffer with a clamped linear
/// gradient from `(sx, sy)` to `(ex, ey)`.
///
/// `buffer` is addressed as `y * stride + x * 4`; it must extend at least to
/// the last pixel of the rectangle. See [`LinearShading`] for the color rule
/// and the module docs for the coordinate normalization.
#[allow(clippy::too_many_arguments)]
pub fn linear_shade(
    buffer: &mut [u8],
    stride: usize,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    start_color: f64,
    end_color: f64,
    sx: f64,
    sy: f64,
    ex: f64,
    ey: f64,
) -> Result<()> {
    let rect = RectI::new(x1, y1, x2, y2);
    if !rect.is_valid() {
        log::warn!("linear_shade: empty rectangle ({}, {})-({}, {})", x1, y1, x2, y2);
        return Err(Error::InvalidGeometry { x1, y1, x2, y2 });
    }
    // Only the area up to the rectangle's far corner needs to be addressable.
    let mut rbuf = RowAccessor::new(buffer, x2.max(0) as u32, y2.max(0) as u32, stride)?;
    let shading = LinearShading::new(start_color, end_color, (sx, sy), (ex, ey))?;
    if shading.is_degenerate() {
        log::debug!(
            "linear_shade: zero-length direction ({}, {})->({}, {}), filling with start color",
            sx,
            sy,
            ex,
            ey
        );
    }
    shade_rect(&mut rbuf, rect, &shading, Parallelism::default())
}

/// Fill the fractional region `[w*min_x, w*max_x) × [h*min_y, h*max_y)` of
/// the buffer with `func`, normalized by the region size.
pub fn fill_math<B, S>(
    rbuf: &mut RowAccessor<B>,
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    func: &S,
    par: Parallelism,
) -> Result<()>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
    S: ShadingFunction + Sync + ?Sized,
{
    for (name, v) in [("min_x", min_x), ("min_y", min_y), ("max_x", max_x), ("max_y", max_y)] {
        if !v.is_finite() {
            log::warn!("fill_math: bound {} is not finite", name);
            return Err(Error::NonFinite(name));
        }
    }
    let w = rbuf.width() as f64;
    let h = rbuf.height() as f64;
    let rect = RectI::new(
        (w * min_x).floor() as i32,
        (h * min_y).floor() as i32,
        (w * max_x).floor() as i32,
        (h * max_y).floor() as i32,
    );
    shade_rect(rbuf, rect, func, par)
}

/// [`fill_math`] over the whole buffer.
pub fn fill_math_bounds<B, S>(rbuf: &mut RowAccessor<B>, func: &S) -> Result<()>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
    S: ShadingFunction + Sync + ?Sized,
{
    fill_math(rbuf, 0.0, 0.0, 1.0, 1.0, func, Parallelism::default())
}

// ============================================================================
// Tests
// ============================================================================
