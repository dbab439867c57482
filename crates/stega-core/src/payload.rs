//! Turns a secret into a flat [`BitSequence`] and back.
//!
//! Text is stored with one byte per character, so only characters with a code point below 256
//! can be hidden. Image payloads are stored sample by sample in row-major order. Neither form
//! carries its own length, decoding needs a [`PayloadShape`].

use image::GrayImage;

use crate::{BitSequence, Result, SteganoError};

/// The secret that is going to be concealed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Image(GrayImage),
}

impl Payload {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// the shape a decoder needs to rebuild this payload
    pub fn shape(&self) -> PayloadShape {
        match self {
            Payload::Text(t) => PayloadShape::Text {
                chars: t.chars().count(),
            },
            Payload::Image(i) => PayloadShape::Image {
                width: i.width(),
                height: i.height(),
            },
        }
    }

    /// number of bits [`encode`] produces for this payload
    pub fn bit_len(&self) -> usize {
        match self {
            Payload::Text(t) => t.chars().count().saturating_mul(8),
            Payload::Image(i) => i.len().saturating_mul(8),
        }
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<GrayImage> for Payload {
    fn from(value: GrayImage) -> Self {
        Self::Image(value)
    }
}

/// What a decoder has to rebuild, the carrier itself does not store it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    Text { chars: usize },
    Image { width: u32, height: u32 },
}

impl PayloadShape {
    /// Fails with `InsufficientData` when the length does not fit into `usize`, no image
    /// could ever hold that many bits.
    pub fn bit_len(&self) -> Result<usize> {
        let samples = match self {
            PayloadShape::Text { chars } => Some(*chars),
            PayloadShape::Image { width, height } => {
                (*width as usize).checked_mul(*height as usize)
            }
        };

        samples
            .and_then(|s| s.checked_mul(8))
            .ok_or(SteganoError::InsufficientData {
                expected: usize::MAX,
                available: 0,
            })
    }
}

/// converts a payload into its bit sequence
pub fn encode(payload: &Payload) -> Result<BitSequence> {
    match payload {
        Payload::Text(text) => {
            let bytes = text
                .chars()
                .map(|c| u8::try_from(c).map_err(|_| SteganoError::UnsupportedPayloadType))
                .collect::<Result<Vec<u8>>>()?;
            Ok(BitSequence::from_bytes(&bytes))
        }
        Payload::Image(image) => Ok(BitSequence::from_bytes(image.as_raw())),
    }
}

/// groups the bits into bytes and maps every byte to the character with that code point
pub fn decode_text(bits: &BitSequence) -> Result<String> {
    let bytes = bits.to_bytes()?;

    Ok(bytes.into_iter().map(char::from).collect())
}

pub fn decode_image(bits: &BitSequence, width: u32, height: u32) -> Result<GrayImage> {
    let expected = PayloadShape::Image { width, height }.bit_len()?;
    if bits.len() != expected {
        return Err(SteganoError::InsufficientData {
            expected,
            available: bits.len(),
        });
    }

    GrayImage::from_raw(width, height, bits.to_bytes()?).ok_or(SteganoError::InsufficientData {
        expected,
        available: bits.len(),
    })
}

/// decodes into whatever `shape` asks for
pub fn decode(bits: &BitSequence, shape: PayloadShape) -> Result<Payload> {
    match shape {
        PayloadShape::Text { .. } => {
            let expected = shape.bit_len()?;
            if bits.len() < expected {
                return Err(SteganoError::InsufficientData {
                    expected,
                    available: bits.len(),
                });
            }
            decode_text(bits).map(Payload::Text)
        }
        PayloadShape::Image { width, height } => {
            decode_image(bits, width, height).map(Payload::Image)
        }
    }
}
