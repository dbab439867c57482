use criterion::{criterion_group, criterion_main, Criterion};
use image::{GrayImage, Luma};
use stega_core::{CodecOptions, Method, Payload, PayloadShape};

pub fn image_decoding(c: &mut Criterion) {
    let cover = GrayImage::from_fn(256, 256, |x, y| {
        Luma([(60 + (x * 37 + y * 91 + x * y * 13) % 131) as u8])
    });

    for method in [Method::Lsb, Method::Pvd] {
        let options = CodecOptions::for_method(method);
        let img = stega_core::hide(&cover, &Payload::text("Hello World!"), &options)
            .expect("Cannot hide secret message");

        c.bench_function(&format!("Image Decoding {method}"), |b| {
            b.iter(|| {
                stega_core::unveil(&img, &options, PayloadShape::Text { chars: 12 })
                    .expect("Failed to unveil 12 chars")
            })
        });
    }
}

criterion_group!(benches, image_decoding);
criterion_main!(benches);
