//! # imgut
//!
//! Pixel-buffer kernels for a 2D drawing library.
//!
//! Two independent routines operate on caller-owned RGBA buffers
//! (8 bits per channel, row-major, `stride` bytes per row):
//!
//! - **Linear shading** ([`shading`]): fill a rectangle with a clamped linear
//!   gray gradient between two stops, projected onto a direction vector.
//! - **Frame averaging** ([`accumulator`]): sum same-sized frames into an
//!   `f32` accumulation buffer, then divide to get their mean, e.g. for
//!   supersampled antialiasing.
//!
//! Both kernels are row-parallel (see [`parallel`]) and validate their inputs
//! up front, returning an [`Error`] instead of writing out of bounds or
//! dividing by zero.
//!
//! ```
//! use imgut::{image_accumulate, image_divide, linear_shade};
//!
//! let (w, h, stride) = (4u32, 4u32, 16usize);
//! let mut frame = vec![0u8; stride * h as usize];
//! linear_shade(&mut frame, stride, 0, 0, 4, 4, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0)?;
//!
//! let mut acc = vec![0.0f32; (w * h * 4) as usize];
//! image_accumulate(&mut acc, &frame, stride, w, h)?;
//! image_accumulate(&mut acc, &frame, stride, w, h)?;
//!
//! let mut out = vec![0u8; frame.len()];
//! image_divide(&mut out, &acc, 2.0, stride, w, h)?;
//! assert_eq!(out, frame);
//! # Ok::<(), imgut::Error>(())
//! ```

// Foundation
pub mod basics;
pub mod error;
pub mod parallel;
pub mod rendering_buffer;

// Kernels
pub mod accumulator;
pub mod compare;
pub mod shading;

pub use accumulator::{average, image_accumulate, image_divide, AccumulationBuffer};
pub use basics::{Rect, RectI};
pub use compare::pixel_rmse;
pub use error::{Error, Result};
pub use parallel::Parallelism;
pub use rendering_buffer::RowAccessor;
pub use shading::{
    fill_math, fill_math_bounds, linear_shade, shade_rect, LinearShading, ShadingFunction,
};
