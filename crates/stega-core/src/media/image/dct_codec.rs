//! Block DCT marking.
//!
//! The image is cut into square blocks, each block goes through an orthonormal 2D DCT-II, the
//! leading coefficients of its first row are zeroed and the block is transformed back. Only the
//! number of zeroed coefficients depends on the payload, so nothing can be read back.

use image::imageops::{self, FilterType};
use image::GrayImage;
use log::debug;

use super::blocks::BlockGrid;
use super::concealer::Concealer;
use crate::media::codec_options::DctCodecOptions;
use crate::{payload, Payload, Result, SteganoError};

/// Separable orthonormal DCT-II of one square block
#[derive(Debug, Clone)]
pub struct Dct2d {
    size: usize,
    /// `basis[k * size + n] = alpha(k) * cos((2n + 1) k PI / 2size)`
    basis: Vec<f64>,
}

impl Dct2d {
    pub fn new(size: usize) -> Self {
        let n = size as f64;
        let mut basis = vec![0.0; size * size];
        for k in 0..size {
            let alpha = if k == 0 {
                (1.0 / n).sqrt()
            } else {
                (2.0 / n).sqrt()
            };
            for x in 0..size {
                basis[k * size + x] = alpha
                    * ((2 * x + 1) as f64 * k as f64 * std::f64::consts::PI / (2.0 * n)).cos();
            }
        }

        Self { size, basis }
    }

    /// Block in, coefficients out, both indexed by row * size + col.
    pub fn forward(&self, block: &[f64]) -> Vec<f64> {
        let n = self.size;
        let mut temp = vec![0.0; n * n];
        for row in 0..n {
            for u in 0..n {
                temp[row * n + u] = (0..n)
                    .map(|x| block[row * n + x] * self.basis[u * n + x])
                    .sum();
            }
        }

        let mut coeffs = vec![0.0; n * n];
        for v in 0..n {
            for col in 0..n {
                coeffs[v * n + col] = (0..n)
                    .map(|y| temp[y * n + col] * self.basis[v * n + y])
                    .sum();
            }
        }
        coeffs
    }

    pub fn inverse(&self, coeffs: &[f64]) -> Vec<f64> {
        let n = self.size;
        let mut temp = vec![0.0; n * n];
        for y in 0..n {
            for col in 0..n {
                temp[y * n + col] = (0..n)
                    .map(|v| coeffs[v * n + col] * self.basis[v * n + y])
                    .sum();
            }
        }

        let mut block = vec![0.0; n * n];
        for row in 0..n {
            for x in 0..n {
                block[row * n + x] = (0..n)
                    .map(|u| temp[row * n + u] * self.basis[u * n + x])
                    .sum();
            }
        }
        block
    }
}

/// Zeroes the first `count` coefficients of the first row, limited to the row length.
pub fn hide_in_block(coeffs: &mut [f64], size: usize, count: usize) {
    for c in coeffs.iter_mut().take(count.min(size)) {
        *c = 0.0;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DctCodec {
    block_size: u32,
}

impl DctCodec {
    pub fn new(opts: &DctCodecOptions) -> Self {
        Self {
            block_size: opts.block_size,
        }
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// How many coefficients the payload asks to zero: the bit length of a text, or the number
    /// of white samples of a secret image once it is scaled to the cover size.
    pub fn pixels_to_hide(&self, cover: &GrayImage, secret: &Payload) -> Result<usize> {
        match secret {
            Payload::Text(_) => Ok(payload::encode(secret)?.len()),
            Payload::Image(img) => {
                let resized = if img.dimensions() == cover.dimensions() {
                    img.clone()
                } else {
                    imageops::resize(img, cover.width(), cover.height(), FilterType::Triangle)
                };
                Ok(resized.iter().filter(|s| **s == u8::MAX).count())
            }
        }
    }

    /// zeroes `count` leading first-row coefficients in every block
    pub fn embed(&self, cover: &GrayImage, count: usize) -> Result<GrayImage> {
        let grid = BlockGrid::new(cover, self.block_size)?;
        let available = grid.total_blocks() * self.block_size as usize;
        if count > available {
            return Err(SteganoError::CapacityExceeded {
                required: count,
                available,
            });
        }
        let size = self.block_size as usize;
        debug!(
            "DCT: zeroing {} coefficients in each of {} blocks",
            count.min(size),
            grid.total_blocks()
        );

        let dct = Dct2d::new(size);
        let mut stego = cover.clone();
        for origin in grid.origins() {
            let mut coeffs = dct.forward(&grid.read(cover, origin));
            hide_in_block(&mut coeffs, size, count);
            grid.write(&mut stego, origin, &dct.inverse(&coeffs));
        }

        Ok(stego)
    }
}

impl Default for DctCodec {
    fn default() -> Self {
        Self::new(&DctCodecOptions::default())
    }
}

impl Concealer for DctCodec {
    fn capacity(&self, cover: &GrayImage) -> Result<usize> {
        let grid = BlockGrid::new(cover, self.block_size)?;

        Ok(grid.total_blocks() * self.block_size as usize)
    }

    fn hide(&self, cover: &GrayImage, secret: &Payload) -> Result<GrayImage> {
        BlockGrid::new(cover, self.block_size)?;
        let count = self.pixels_to_hide(cover, secret)?;

        self.embed(cover, count)
    }
}
