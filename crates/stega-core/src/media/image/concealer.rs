use enum_dispatch::enum_dispatch;
use image::GrayImage;

use super::{DctCodec, HaarCodec, LsbCodec, PvdCodec};
use crate::media::codec_options::{CodecOptions, Method};
use crate::{BitSequence, Payload, Result, SteganoError};

/// Hiding strategy of one method
#[enum_dispatch]
pub trait Concealer {
    /// How many payload bits the cover can carry with this method.
    fn capacity(&self, cover: &GrayImage) -> Result<usize>;

    /// Produces the stego image, the cover stays untouched. Fails before any sample is
    /// written when the payload does not fit.
    fn hide(&self, cover: &GrayImage, secret: &Payload) -> Result<GrayImage>;
}

/// Unveiling counterpart, only the spatial methods have one
pub trait Unveiler {
    fn unveil_bits(&self, stego: &GrayImage, length: usize) -> Result<BitSequence>;
}

#[enum_dispatch(Concealer)]
#[derive(Debug, Clone, Copy)]
pub enum ImageCodec {
    LsbCodec,
    PvdCodec,
    DctCodec,
    HaarCodec,
}

impl ImageCodec {
    pub fn new(opts: &CodecOptions) -> Self {
        match opts {
            CodecOptions::Lsb(o) => LsbCodec::new(o).into(),
            CodecOptions::Pvd(o) => PvdCodec::new(o).into(),
            CodecOptions::Dct(o) => DctCodec::new(o).into(),
            CodecOptions::Dhwt(o) => HaarCodec::new(o).into(),
        }
    }

    /// reads `length` payload bits, fails for the methods that can only hide
    pub fn unveil_bits(&self, stego: &GrayImage, length: usize) -> Result<BitSequence> {
        match self {
            ImageCodec::LsbCodec(c) => c.unveil_bits(stego, length),
            ImageCodec::PvdCodec(c) => c.unveil_bits(stego, length),
            ImageCodec::DctCodec(_) => Err(SteganoError::UnveilNotSupported(Method::Dct)),
            ImageCodec::HaarCodec(_) => Err(SteganoError::UnveilNotSupported(Method::Dhwt)),
        }
    }
}
