//! # Stega Core API
//!
//! Hides a text or a secondary gray image inside a gray cover image. Four methods are offered,
//! selected via [`Method`] or the matching [`CodecOptions`] variant:
//! - `LSB` rewrites the least significant bit of every sample, can be unveiled
//! - `PVD` pixel value differencing on horizontal pixel pairs, can be unveiled
//! - `DCT` zeroes first row coefficients of 8x8 block DCTs, hide only
//! - `DHWT` rewrites the HH band of a Haar wavelet decomposition per block, hide only
//!
//! The payload length is not stored in the stego image, unveiling needs a [`PayloadShape`].
//!
//! # Usage Examples
//!
//! ## Hide and unveil a text in memory
//!
//! ```rust
//! use image::{GrayImage, Luma};
//! use stega_core::{CodecOptions, Method, Payload, PayloadShape};
//!
//! let cover = GrayImage::from_fn(64, 64, |x, y| Luma([(x * 3 + y * 2) as u8]));
//! let options = CodecOptions::for_method(Method::Lsb);
//!
//! let stego = stega_core::hide(&cover, &Payload::text("TRY TO FIND ME"), &options)
//!     .expect("Failed to hide the text");
//! let secret = stega_core::unveil(&stego, &options, PayloadShape::Text { chars: 14 })
//!     .expect("Failed to unveil the text");
//!
//! assert_eq!(secret, Payload::text("TRY TO FIND ME"));
//! ```
//!
//! ## Hide a message inside an image file
//!
//! ```rust,no_run
//! stega_core::api::hide::prepare()
//!     .with_message("Hello, World!")
//!     .with_method(stega_core::Method::Pvd)
//!     .with_image("cover.png")
//!     .with_output("image-with-a-secret.png")
//!     .execute()
//!     .expect("Failed to hide message in image");
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod bit_sequence;
pub mod commands;
pub mod error;
pub mod media;
pub mod payload;
pub mod quality;
pub mod result;

use image::GrayImage;
use log::debug;

pub use crate::bit_sequence::BitSequence;
pub use crate::error::SteganoError;
pub use crate::media::image::{Concealer, ImageCodec};
pub use crate::media::{load_gray, CodecOptions, Method, Persist};
pub use crate::payload::{Payload, PayloadShape};
pub use crate::quality::{compute_quality_metrics, QualityMetrics};
pub use crate::result::Result;

use crate::media::image::{DctCodec, HaarCodec, LsbCodec, PvdCodec};
use crate::media::{DctCodecOptions, HaarCodecOptions};

/// Conceals `secret` in a copy of `cover` with the method of `options`.
pub fn hide(cover: &GrayImage, secret: &Payload, options: &CodecOptions) -> Result<GrayImage> {
    debug!(
        "hiding a {} bit payload with {}",
        secret.bit_len(),
        options.method()
    );
    ImageCodec::new(options).hide(cover, secret)
}

/// Recovers a payload of the given shape, only LSB and PVD can do that.
pub fn unveil(stego: &GrayImage, options: &CodecOptions, shape: PayloadShape) -> Result<Payload> {
    let codec = ImageCodec::new(options);
    let bits = codec.unveil_bits(stego, shape.bit_len()?)?;

    payload::decode(&bits, shape)
}

/// Capacity in bits of `cover` for the method of `options`.
pub fn capacity(cover: &GrayImage, options: &CodecOptions) -> Result<usize> {
    ImageCodec::new(options).capacity(cover)
}

/// LSB only, same as [`hide`] with [`Method::Lsb`].
pub fn encode_lsb(cover: &GrayImage, secret: &Payload) -> Result<GrayImage> {
    LsbCodec.hide(cover, secret)
}

/// Reads `expected_length` raw payload bits, [`unveil`] turns them into a typed [`Payload`].
pub fn decode_lsb(stego: &GrayImage, expected_length: usize) -> Result<BitSequence> {
    LsbCodec.extract(stego, expected_length)
}

/// PVD only, same as [`hide`] with [`Method::Pvd`].
pub fn encode_pvd(cover: &GrayImage, secret: &Payload) -> Result<GrayImage> {
    PvdCodec.hide(cover, secret)
}

/// Reads `expected_length` raw payload bits, [`unveil`] turns them into a typed [`Payload`].
pub fn decode_pvd(stego: &GrayImage, expected_length: usize) -> Result<BitSequence> {
    PvdCodec.extract(stego, expected_length)
}

/// Block DCT marking with square blocks of `block_size`, cannot be unveiled.
pub fn encode_dct(cover: &GrayImage, secret: &Payload, block_size: u32) -> Result<GrayImage> {
    DctCodec::new(&DctCodecOptions { block_size }).hide(cover, secret)
}

/// Haar wavelet hiding with the default 8x8 blocks, cannot be unveiled.
pub fn encode_wavelet(cover: &GrayImage, secret: &Payload) -> Result<GrayImage> {
    HaarCodec::new(&HaarCodecOptions::default()).hide(cover, secret)
}
