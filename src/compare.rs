//! Frame comparison.

use crate::error::{Error, Result};
use crate::rendering_buffer::{RowAccessor, PIX_WIDTH};

/// Root-mean-square difference of the red channel of two same-sized frames.
///
/// Gray images (as produced by the shading fills) carry the same value in
/// R, G and B, so the red channel stands for the whole pixel. Empty frames
/// compare equal.
pub fn pixel_rmse<A, B>(a: &RowAccessor<A>, b: &RowAccessor<B>) -> Result<f64>
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    if (a.width(), a.height()) != (b.width(), b.height()) {
        log::warn!(
            "pixel_rmse: {}x{} vs {}x{}",
            a.width(),
            a.height(),
            b.width(),
            b.height()
        );
        return Err(Error::DimensionMismatch {
            expected: (a.width() as usize, a.height() as usize),
            found: (b.width() as usize, b.height() as usize),
        });
    }

    let count = a.width() as usize * a.height() as usize;
    if count == 0 {
        return Ok(0.0);
    }
    let sum: f64 = a
        .rows()
        .zip(b.rows())
        .flat_map(|(ra, rb)| ra.chunks_exact(PIX_WIDTH).zip(rb.chunks_exact(PIX_WIDTH)))
        .map(|(pa, pb)| {
            let diff = pa[0] as f64 - pb[0] as f64;
            diff * diff
        })
        .sum();
    Ok((sum / count as f64).sqrt())
}
