use criterion::{black_box, criterion_group, criterion_main, Criterion};
use imgut::{image_accumulate, image_divide, linear_shade};

const W: u32 = 512;
const H: u32 = 512;
const STRIDE: usize = W as usize * 4;

fn bench_linear_shade(c: &mut Criterion) {
    let mut buf = vec![0u8; STRIDE * H as usize];
    c.bench_function("linear_shade 512x512", |b| {
        b.iter(|| {
            linear_shade(
                black_box(&mut buf),
                STRIDE,
                0,
                0,
                W as i32,
                H as i32,
                0.0,
                1.0,
                0.1,
                0.2,
                0.8,
                0.9,
            )
            .unwrap()
        })
    });
}

fn bench_accumulate_divide(c: &mut Criterion) {
    let frame = vec![128u8; STRIDE * H as usize];
    let mut acc = vec![0.0f32; (W * H * 4) as usize];
    let mut out = vec![0u8; STRIDE * H as usize];

    c.bench_function("image_accumulate 512x512", |b| {
        b.iter(|| image_accumulate(black_box(&mut acc), &frame, STRIDE, W, H).unwrap())
    });
    c.bench_function("image_divide 512x512", |b| {
        b.iter(|| image_divide(black_box(&mut out), &acc, 8.0, STRIDE, W, H).unwrap())
    });
}

criterion_group!(benches, bench_linear_shade, bench_accumulate_divide);
criterion_main!(benches);
