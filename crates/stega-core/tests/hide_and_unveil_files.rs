use image::{GrayImage, Luma};
use tempfile::TempDir;

use stega_core::{
    commands, load_gray, CodecOptions, Method, Payload, PayloadShape, Persist, SteganoError,
};

fn carrier_image() -> GrayImage {
    GrayImage::from_fn(256, 256, |x, y| {
        Luma([(60 + (x * 37 + y * 91 + x * y * 13) % 131) as u8])
    })
}

fn write_carrier(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("carrier-image.png");
    carrier_image()
        .save_as(&path)
        .expect("Failed to write the carrier image");
    path
}

#[test]
fn should_hide_and_unveil_text_through_png_files() {
    let out_dir = TempDir::new().unwrap();
    let carrier = write_carrier(&out_dir);
    let stego = out_dir.path().join("stego.png");

    for method in [Method::Lsb, Method::Pvd] {
        commands::hide(
            &carrier,
            &stego,
            Some("TRY TO FIND ME".to_string()),
            None,
            method.into(),
        )
        .unwrap();

        let secret = commands::unveil(
            &stego,
            PayloadShape::Text { chars: 14 },
            None,
            method.into(),
        )
        .unwrap();

        assert_eq!(secret, Payload::text("TRY TO FIND ME"), "{method}");
    }
}

#[test]
fn should_hide_and_unveil_a_secret_image_through_png_files() {
    let out_dir = TempDir::new().unwrap();
    let carrier = write_carrier(&out_dir);
    let secret_file = out_dir.path().join("secret.png");
    let stego = out_dir.path().join("stego.png");
    let unveiled = out_dir.path().join("unveiled.png");
    let secret = GrayImage::from_fn(16, 12, |x, y| Luma([(x * 15 + y * 3) as u8]));
    secret.save_as(&secret_file).unwrap();

    commands::hide(
        &carrier,
        &stego,
        None,
        Some(secret_file),
        CodecOptions::for_method(Method::Pvd),
    )
    .unwrap();
    commands::unveil(
        &stego,
        PayloadShape::Image {
            width: 16,
            height: 12,
        },
        Some(&unveiled),
        CodecOptions::for_method(Method::Pvd),
    )
    .unwrap();

    assert_eq!(load_gray(&unveiled).unwrap(), secret);
}

#[test]
fn hide_only_methods_still_write_a_stego_image() {
    let out_dir = TempDir::new().unwrap();
    let carrier = write_carrier(&out_dir);

    for method in [Method::Dct, Method::Dhwt] {
        let stego = out_dir.path().join(format!("stego-{method}.png"));
        commands::hide(
            &carrier,
            &stego,
            Some("TRY TO FIND ME".to_string()),
            None,
            method.into(),
        )
        .unwrap();

        let img = load_gray(&stego).unwrap();
        assert_eq!(img.dimensions(), (256, 256));
        let metrics = commands::quality(&carrier, &stego).unwrap();
        assert!(metrics.mse > 0.0, "{method} left the carrier untouched");
    }
}

#[test]
fn should_report_a_missing_cover() {
    let out_dir = TempDir::new().unwrap();

    let result = commands::hide(
        &out_dir.path().join("nope.png"),
        &out_dir.path().join("stego.png"),
        Some("hi".to_string()),
        None,
        CodecOptions::default(),
    );

    assert!(matches!(result, Err(SteganoError::MissingCover)));
    assert!(!out_dir.path().join("stego.png").exists());
}

#[test]
fn should_not_write_output_when_capacity_is_exceeded() {
    let out_dir = TempDir::new().unwrap();
    let carrier = out_dir.path().join("tiny.png");
    GrayImage::from_pixel(4, 4, Luma([100]))
        .save_as(&carrier)
        .unwrap();
    let stego = out_dir.path().join("stego.png");

    let result = commands::hide(
        &carrier,
        &stego,
        Some("too long for sixteen samples".to_string()),
        None,
        CodecOptions::default(),
    );

    assert!(matches!(result, Err(SteganoError::CapacityExceeded { .. })));
    assert!(!stego.exists());
}
