//! Haar wavelet hiding.
//!
//! Each square block is decomposed one level into the LL, LH, HL and HH sub-bands. Text is
//! written into the parity of the HH coefficients, a secret image replaces them outright. The
//! block is rebuilt with the inverse transform afterwards.

use image::GrayImage;
use log::{debug, info};

use super::blocks::BlockGrid;
use super::concealer::Concealer;
use crate::media::codec_options::HaarCodecOptions;
use crate::quality::compute_quality_metrics;
use crate::{payload, BitSequence, Payload, Result, SteganoError};

/// One level 2D Haar decomposition of a block, every band is `(size/2)^2` row-major values.
#[derive(Debug, Clone, PartialEq)]
pub struct SubBands {
    half: usize,
    pub ll: Vec<f64>,
    pub lh: Vec<f64>,
    pub hl: Vec<f64>,
    pub hh: Vec<f64>,
}

impl SubBands {
    /// decomposes a `size`x`size` block, `size` must be even
    pub fn decompose(block: &[f64], size: usize) -> Self {
        let half = size / 2;
        let len = half * half;
        let mut bands = Self {
            half,
            ll: Vec::with_capacity(len),
            lh: Vec::with_capacity(len),
            hl: Vec::with_capacity(len),
            hh: Vec::with_capacity(len),
        };
        for r in 0..half {
            for c in 0..half {
                let a = block[2 * r * size + 2 * c];
                let b = block[2 * r * size + 2 * c + 1];
                let d = block[(2 * r + 1) * size + 2 * c];
                let e = block[(2 * r + 1) * size + 2 * c + 1];
                bands.ll.push((a + b + d + e) / 2.0);
                bands.lh.push((a + b - d - e) / 2.0);
                bands.hl.push((a - b + d - e) / 2.0);
                bands.hh.push((a - b - d + e) / 2.0);
            }
        }
        bands
    }

    /// inverse transform back into a `size`x`size` block
    pub fn reconstruct(&self) -> Vec<f64> {
        let size = self.half * 2;
        let mut block = vec![0.0; size * size];
        for r in 0..self.half {
            for c in 0..self.half {
                let i = r * self.half + c;
                let (ll, lh, hl, hh) = (self.ll[i], self.lh[i], self.hl[i], self.hh[i]);
                block[2 * r * size + 2 * c] = (ll + lh + hl + hh) / 2.0;
                block[2 * r * size + 2 * c + 1] = (ll + lh - hl - hh) / 2.0;
                block[(2 * r + 1) * size + 2 * c] = (ll - lh + hl - hh) / 2.0;
                block[(2 * r + 1) * size + 2 * c + 1] = (ll - lh - hl + hh) / 2.0;
            }
        }
        block
    }
}

/// `floor(log2(max |coeff|))`, limited to the number of coefficients.
///
/// A band without any coefficient of magnitude 1 or more has capacity 0.
pub fn bit_capacity(band: &[f64]) -> usize {
    let max = band.iter().fold(0.0_f64, |m, c| m.max(c.abs()));
    if max < 1.0 {
        return 0;
    }

    (max.log2().floor() as usize).min(band.len())
}

/// writes `bits` into the parity of the leading coefficients, truncated to integers first
pub fn embed_message_bits(band: &[f64], bits: &[bool]) -> Result<Vec<f64>> {
    let available = bit_capacity(band);
    if bits.len() > available {
        return Err(SteganoError::CapacityExceeded {
            required: bits.len(),
            available,
        });
    }

    let mut band = band.to_vec();
    for (c, bit) in band.iter_mut().zip(bits.iter()) {
        *c = ((c.trunc() as i64 & !1) | i64::from(*bit)) as f64;
    }
    Ok(band)
}

/// replaces the leading coefficients with secret samples, as many as both sides have
pub fn embed_image_bits(band: &[f64], secret: &[u8]) -> Vec<f64> {
    let mut band = band.to_vec();
    for (c, s) in band.iter_mut().zip(secret.iter()) {
        *c = f64::from(*s);
    }
    band
}

#[derive(Debug, Clone, Copy)]
pub struct HaarCodec {
    block_size: u32,
}

impl HaarCodec {
    pub fn new(opts: &HaarCodecOptions) -> Self {
        Self {
            block_size: opts.block_size,
        }
    }

    fn grid(&self, cover: &GrayImage) -> Result<BlockGrid> {
        let grid = BlockGrid::new(cover, self.block_size)?;
        if self.block_size % 2 != 0 {
            return Err(SteganoError::InvalidBlockGeometry {
                width: cover.width(),
                height: cover.height(),
                block_size: self.block_size,
            });
        }
        Ok(grid)
    }

    /// Hides bits in block order, every block takes as many as its HH band allows.
    pub fn embed_message(&self, cover: &GrayImage, bits: &BitSequence) -> Result<GrayImage> {
        let grid = self.grid(cover)?;
        let size = grid.size() as usize;
        let blocks: Vec<_> = grid
            .origins()
            .map(|origin| (origin, SubBands::decompose(&grid.read(cover, origin), size)))
            .collect();

        let available: usize = blocks.iter().map(|(_, b)| bit_capacity(&b.hh)).sum();
        if bits.len() > available {
            return Err(SteganoError::CapacityExceeded {
                required: bits.len(),
                available,
            });
        }
        debug!("DHWT: hiding {} bits, capacity is {available}", bits.len());

        let mut stego = cover.clone();
        let mut remaining = bits.as_slice();
        for (origin, mut bands) in blocks {
            if remaining.is_empty() {
                break;
            }
            let take = bit_capacity(&bands.hh).min(remaining.len());
            if take == 0 {
                continue;
            }
            let (chunk, rest) = remaining.split_at(take);
            bands.hh = embed_message_bits(&bands.hh, chunk)?;
            grid.write(&mut stego, origin, &bands.reconstruct());
            remaining = rest;
        }

        Ok(stego)
    }

    /// Replaces the HH band of block `k` with the `k`-th run of secret samples.
    pub fn embed_image(&self, cover: &GrayImage, secret: &GrayImage) -> Result<GrayImage> {
        let grid = self.grid(cover)?;
        let size = grid.size() as usize;
        let band_len = (size / 2) * (size / 2);
        let samples = secret.as_raw();
        let available = grid.total_blocks() * band_len;
        if samples.len() > available {
            return Err(SteganoError::CapacityExceeded {
                required: samples.len() * 8,
                available: available * 8,
            });
        }
        debug!(
            "DHWT: replacing HH bands with {} secret samples",
            samples.len()
        );

        let mut stego = cover.clone();
        for (origin, run) in grid.origins().zip(samples.chunks(band_len)) {
            let mut bands = SubBands::decompose(&grid.read(cover, origin), size);
            bands.hh = embed_image_bits(&bands.hh, run);
            grid.write(&mut stego, origin, &bands.reconstruct());
        }

        Ok(stego)
    }
}

impl Default for HaarCodec {
    fn default() -> Self {
        Self::new(&HaarCodecOptions::default())
    }
}

impl Concealer for HaarCodec {
    fn capacity(&self, cover: &GrayImage) -> Result<usize> {
        let grid = self.grid(cover)?;
        let size = grid.size() as usize;

        Ok(grid
            .origins()
            .map(|origin| bit_capacity(&SubBands::decompose(&grid.read(cover, origin), size).hh))
            .sum())
    }

    fn hide(&self, cover: &GrayImage, secret: &Payload) -> Result<GrayImage> {
        let stego = match secret {
            Payload::Text(_) => self.embed_message(cover, &payload::encode(secret)?)?,
            Payload::Image(img) => self.embed_image(cover, img)?,
        };

        let metrics = compute_quality_metrics(cover, &stego)?;
        info!("DHWT: MSE {:.4}, PSNR {:.2} dB", metrics.mse, metrics.psnr);

        Ok(stego)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::prepare_noisy_image;
    use image::Luma;

    #[test]
    fn flat_block_has_no_high_frequencies() {
        let bands = SubBands::decompose(&[128.0; 64], 8);

        assert_eq!(bands.hh, vec![0.0; 16]);
        assert_eq!(bands.lh, vec![0.0; 16]);
        assert_eq!(bands.hl, vec![0.0; 16]);
        assert_eq!(bands.ll, vec![256.0; 16]);
        assert_eq!(bit_capacity(&bands.hh), 0);
    }

    #[test]
    fn zero_capacity_band_rejects_any_bit() {
        let bands = SubBands::decompose(&[128.0; 64], 8);

        match embed_message_bits(&bands.hh, &[true]) {
            Err(SteganoError::CapacityExceeded {
                required: 1,
                available: 0,
            }) => (),
            other => panic!("unexpected result {other:?}"),
        }
        assert_eq!(embed_message_bits(&bands.hh, &[]).unwrap(), bands.hh);
    }

    #[test]
    fn reconstruct_undoes_decompose() {
        let block: Vec<f64> = (0..64).map(|i| ((i * 53) % 256) as f64).collect();

        assert_eq!(SubBands::decompose(&block, 8).reconstruct(), block);
    }

    #[test]
    fn capacity_follows_the_largest_coefficient() {
        assert_eq!(bit_capacity(&[0.5, -0.5]), 0);
        assert_eq!(bit_capacity(&[1.0, 0.0]), 0);
        assert_eq!(bit_capacity(&[0.0, -4.0, 3.0, 0.0]), 2);
        assert_eq!(bit_capacity(&[-9.5, 1.0, 0.0, 0.0]), 3);
        assert_eq!(bit_capacity(&[200.0, 0.0]), 2, "limited to the band length");
    }

    #[test]
    fn should_write_parity_bits() {
        let band = [9.5, -6.0, 4.0, 3.0, 0.0];
        let hidden = embed_message_bits(&band, &[false, true, true]).unwrap();

        assert_eq!(hidden, vec![8.0, -5.0, 5.0, 3.0, 0.0]);
    }

    #[test]
    fn should_replace_coefficients_with_secret_samples() {
        let band = [1.0, 2.0, 3.0];

        assert_eq!(embed_image_bits(&band, &[7, 8]), vec![7.0, 8.0, 3.0]);
        assert_eq!(embed_image_bits(&band, &[7, 8, 9, 10]), vec![7.0, 8.0, 9.0]);
    }

    #[test]
    fn flat_cover_cannot_carry_text() {
        let cover = GrayImage::from_pixel(16, 16, Luma([128]));
        let codec = HaarCodec::default();

        assert_eq!(codec.capacity(&cover).unwrap(), 0);
        assert!(matches!(
            codec.hide(&cover, &Payload::text("1")),
            Err(SteganoError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn should_hide_text_in_textured_cover() {
        let cover = prepare_noisy_image(64, 64);
        let codec = HaarCodec::default();
        assert!(codec.capacity(&cover).unwrap() >= 16);

        let stego = codec.hide(&cover, &Payload::text("hi")).unwrap();

        assert_eq!(stego.dimensions(), cover.dimensions());
    }

    #[test]
    fn should_hide_a_secret_image() {
        let cover = prepare_noisy_image(16, 16);
        let secret = GrayImage::from_pixel(4, 4, Luma([10]));

        let stego = HaarCodec::default()
            .hide(&cover, &Payload::Image(secret))
            .unwrap();

        let grid = BlockGrid::new(&stego, 8).unwrap();
        let first = SubBands::decompose(&grid.read(&stego, (0, 0)), 8);
        assert!(first.hh.iter().all(|c| (c - 10.0).abs() <= 1.0));
        let second = SubBands::decompose(&grid.read(&stego, (8, 0)), 8);
        let untouched = SubBands::decompose(&grid.read(&cover, (8, 0)), 8);
        assert_eq!(second, untouched);
    }

    #[test]
    fn should_refuse_secret_image_larger_than_hh_space() {
        let cover = prepare_noisy_image(16, 16);
        let secret = GrayImage::new(9, 8);

        assert!(matches!(
            HaarCodec::default().hide(&cover, &Payload::Image(secret)),
            Err(SteganoError::CapacityExceeded {
                required: 576,
                available: 512
            })
        ));
    }

    #[test]
    fn should_refuse_odd_block_sizes() {
        let cover = prepare_noisy_image(9, 9);
        let codec = HaarCodec::new(&HaarCodecOptions { block_size: 3 });

        assert!(matches!(
            codec.capacity(&cover),
            Err(SteganoError::InvalidBlockGeometry { .. })
        ));
    }
}
