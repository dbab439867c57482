use image::GrayImage;
use log::debug;

use super::concealer::{Concealer, Unveiler};
use crate::media::codec_options::LsbCodecOptions;
use crate::{payload, BitSequence, Payload, Result, SteganoError};

/// Hides one bit in the least significant bit of every gray sample, row-major.
#[derive(Debug, Default, Clone, Copy)]
pub struct LsbCodec;

impl LsbCodec {
    pub fn new(_opts: &LsbCodecOptions) -> Self {
        Self
    }

    /// rewrites the lowest bit of the first `bits.len()` samples, the rest is copied
    pub fn embed(&self, cover: &GrayImage, bits: &BitSequence) -> Result<GrayImage> {
        let available = self.capacity(cover)?;
        if bits.len() > available {
            return Err(SteganoError::CapacityExceeded {
                required: bits.len(),
                available,
            });
        }
        debug!("LSB: hiding {} bits in {available} samples", bits.len());

        let mut stego = cover.clone();
        for (sample, bit) in stego.iter_mut().zip(bits.iter()) {
            *sample = *sample - (*sample % 2) + u8::from(*bit);
        }

        Ok(stego)
    }

    /// reads the lowest bit of the first `length` samples
    pub fn extract(&self, stego: &GrayImage, length: usize) -> Result<BitSequence> {
        let available = stego.as_raw().len();
        if length > available {
            return Err(SteganoError::InsufficientData {
                expected: length,
                available,
            });
        }

        Ok(stego.iter().take(length).map(|s| s & 1 == 1).collect())
    }
}

impl Concealer for LsbCodec {
    fn capacity(&self, cover: &GrayImage) -> Result<usize> {
        Ok(cover.as_raw().len())
    }

    fn hide(&self, cover: &GrayImage, secret: &Payload) -> Result<GrayImage> {
        self.embed(cover, &payload::encode(secret)?)
    }
}

impl Unveiler for LsbCodec {
    fn unveil_bits(&self, stego: &GrayImage, length: usize) -> Result<BitSequence> {
        self.extract(stego, length)
    }
}
