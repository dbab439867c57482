use criterion::{criterion_group, criterion_main, Criterion};
use image::{GrayImage, Luma};
use stega_core::{CodecOptions, Method, Payload};

fn carrier_image() -> GrayImage {
    GrayImage::from_fn(256, 256, |x, y| {
        Luma([(60 + (x * 37 + y * 91 + x * y * 13) % 131) as u8])
    })
}

pub fn image_encoding(c: &mut Criterion) {
    let cover = carrier_image();
    let secret_message = Payload::text("Hello World!");

    for method in Method::ALL {
        let options = CodecOptions::for_method(method);
        c.bench_function(&format!("Image Encoding {method}"), |b| {
            b.iter(|| {
                stega_core::hide(&cover, &secret_message, &options)
                    .expect("Cannot hide secret message")
            })
        });
    }
}

criterion_group!(benches, image_encoding);
criterion_main!(benches);
