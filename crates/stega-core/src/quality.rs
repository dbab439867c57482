//! Distortion of a stego image compared to its cover.
//!
//! Diagnostic only, none of the codecs depend on these numbers.

use image::GrayImage;

use crate::{Result, SteganoError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityMetrics {
    pub mse: f64,
    /// in dB, infinite for identical images
    pub psnr: f64,
}

/// Mean squared error over all samples, `0.0` for empty images.
pub fn mse(original: &GrayImage, candidate: &GrayImage) -> Result<f64> {
    if original.dimensions() != candidate.dimensions() {
        return Err(SteganoError::MismatchedDimensions(
            original.dimensions(),
            candidate.dimensions(),
        ));
    }
    if original.is_empty() {
        return Ok(0.0);
    }

    let sum: f64 = original
        .iter()
        .zip(candidate.iter())
        .map(|(&x, &y)| {
            let diff = f64::from(x) - f64::from(y);
            diff * diff
        })
        .sum();
    Ok(sum / original.len() as f64)
}

/// `10 * log10(255^2 / mse)`
pub fn psnr(original: &GrayImage, candidate: &GrayImage) -> Result<f64> {
    let mse = mse(original, candidate)?;

    Ok(psnr_of_mse(mse))
}

fn psnr_of_mse(mse: f64) -> f64 {
    if mse == 0.0 {
        return f64::INFINITY;
    }
    10.0 * (255.0_f64 * 255.0 / mse).log10()
}

pub fn compute_quality_metrics(
    original: &GrayImage,
    candidate: &GrayImage,
) -> Result<QualityMetrics> {
    let mse = mse(original, candidate)?;

    Ok(QualityMetrics {
        mse,
        psnr: psnr_of_mse(mse),
    })
}
