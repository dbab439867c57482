use std::path::{Path, PathBuf};

use crate::{load_gray, CodecOptions, Payload, PayloadShape, QualityMetrics, SteganoError};

pub fn hide(
    media: &Path,
    write_to_file: &Path,
    message: Option<String>,
    secret_image: Option<PathBuf>,
    options: CodecOptions,
) -> Result<(), SteganoError> {
    crate::api::hide::prepare()
        .with_options(options)
        .with_image(media)
        .with_output(write_to_file)
        .use_message(message)
        .use_secret_image(secret_image)
        .execute()
}

/// unveils a payload of the given shape, optionally writing it to `destination`
pub fn unveil(
    secret_media: &Path,
    shape: PayloadShape,
    destination: Option<&Path>,
    options: CodecOptions,
) -> Result<Payload, SteganoError> {
    let api = crate::api::unveil::prepare()
        .with_options(options)
        .from_secret_file(secret_media);
    let api = match shape {
        PayloadShape::Text { chars } => api.expect_text(chars),
        PayloadShape::Image { width, height } => api.expect_image(width, height),
    };
    let api = match destination {
        Some(destination) => api.into_output_file(destination),
        None => api,
    };

    api.execute()
}

/// MSE and PSNR of `candidate` compared to `original`
pub fn quality(original: &Path, candidate: &Path) -> Result<QualityMetrics, SteganoError> {
    let original = load_gray(original)?;
    let candidate = load_gray(candidate)?;

    crate::compute_quality_metrics(&original, &candidate)
}
