//! End-to-end checks of the public kernels: shade several frames, average
//! them, compare the result.

use imgut::{
    average, image_accumulate, image_divide, linear_shade, pixel_rmse, shade_rect,
    AccumulationBuffer, Error, LinearShading, Parallelism, RectI, RowAccessor,
};
use std::num::NonZeroUsize;

const W: u32 = 24;
const H: u32 = 16;
const STRIDE: usize = W as usize * 4 + 12;

fn shaded_frame(start: f64, end: f64) -> Vec<u8> {
    let mut buf = vec![0u8; STRIDE * H as usize];
    linear_shade(
        &mut buf, STRIDE, 0, 0, W as i32, H as i32, start, end, 0.1, 0.2, 0.9, 0.6,
    )
    .unwrap();
    buf
}

#[test]
fn test_average_of_identical_shaded_frames() {
    let frame = shaded_frame(0.0, 1.0);
    let mut acc = vec![0.0f32; (W * H * 4) as usize];
    for _ in 0..5 {
        image_accumulate(&mut acc, &frame, STRIDE, W, H).unwrap();
    }
    let mut out = vec![0u8; frame.len()];
    image_divide(&mut out, &acc, 5.0, STRIDE, W, H).unwrap();

    let a = RowAccessor::new(&frame[..], W, H, STRIDE).unwrap();
    let b = RowAccessor::new(&out[..], W, H, STRIDE).unwrap();
    assert_eq!(pixel_rmse(&a, &b).unwrap(), 0.0);
    assert_eq!(a.rows().collect::<Vec<_>>(), b.rows().collect::<Vec<_>>());
}

#[test]
fn test_average_lies_between_inputs() {
    let dark = shaded_frame(0.0, 0.5);
    let light = shaded_frame(0.5, 1.0);
    let frames = [
        RowAccessor::new(&dark[..], W, H, STRIDE).unwrap(),
        RowAccessor::new(&light[..], W, H, STRIDE).unwrap(),
    ];
    let avg = average(&frames).unwrap();
    for y in 0..H {
        for x in 0..W {
            let lo = frames[0].pixel(x, y)[0];
            let hi = frames[1].pixel(x, y)[0];
            let v = avg.pixel(x, y);
            assert!(lo <= v[0] && v[0] <= hi, "({}, {}): {} {} {}", x, y, lo, v[0], hi);
            assert_eq!(v[3], 255);
        }
    }
}

#[test]
fn test_typed_and_raw_api_agree() {
    let frame = shaded_frame(0.2, 0.7);
    let rb = RowAccessor::new(&frame[..], W, H, STRIDE).unwrap();

    let mut typed = AccumulationBuffer::new(W, H);
    typed.accumulate(&rb).unwrap();
    typed.accumulate(&rb).unwrap();

    let mut raw = vec![0.0f32; (W * H * 4) as usize];
    image_accumulate(&mut raw, &frame, STRIDE, W, H).unwrap();
    image_accumulate(&mut raw, &frame, STRIDE, W, H).unwrap();
    assert_eq!(typed.as_slice(), &raw[..]);

    let mut out = RowAccessor::new_owned(W, H);
    typed.average_into(&mut out).unwrap();
    assert_eq!(pixel_rmse(&rb, &out).unwrap(), 0.0);
}

#[test]
fn test_shading_thread_counts_agree() {
    let shading = LinearShading::new(0.0, 1.0, (1.0, 0.0), (0.0, 1.0)).unwrap();
    let rect = RectI::new(2, 1, W as i32 - 3, H as i32);
    let mut reference = RowAccessor::new_owned(W, H);
    shade_rect(&mut reference, rect, &shading, Parallelism::Sequential).unwrap();

    for n in [1, 2, 5, 64] {
        let mut rb = RowAccessor::new_owned(W, H);
        let par = Parallelism::Threads(NonZeroUsize::new(n).unwrap());
        shade_rect(&mut rb, rect, &shading, par).unwrap();
        assert_eq!(rb.as_bytes(), reference.as_bytes(), "{} threads", n);
    }
}

#[test]
fn test_errors_leave_buffers_untouched() {
    let mut buf = vec![3u8; STRIDE * H as usize];
    let err = linear_shade(&mut buf, STRIDE, 5, 5, 5, 9, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0).unwrap_err();
    assert!(matches!(err, Error::InvalidGeometry { .. }));

    let acc = vec![100.0f32; (W * H * 4) as usize];
    let err = image_divide(&mut buf, &acc, 0.0, STRIDE, W, H).unwrap_err();
    assert_eq!(err, Error::InvalidDivisor(0.0));
    assert!(buf.iter().all(|&b| b == 3));
}
