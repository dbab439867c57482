use std::fmt;
use std::str::FromStr;

use crate::SteganoError;

/// Default edge length of the square blocks used by the transform based methods
pub const DEFAULT_BLOCK_SIZE: u32 = 8;

/// The hiding technique, selected by name: `LSB`, `PVD`, `DCT` or `DHWT`
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Method {
    Lsb,
    Pvd,
    Dct,
    Dhwt,
}

impl Method {
    pub const ALL: [Method; 4] = [Method::Lsb, Method::Pvd, Method::Dct, Method::Dhwt];

    /// Only the spatial methods can bring the payload back
    pub fn supports_unveil(&self) -> bool {
        matches!(self, Method::Lsb | Method::Pvd)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Method::Lsb => "LSB",
            Method::Pvd => "PVD",
            Method::Dct => "DCT",
            Method::Dhwt => "DHWT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = SteganoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lsb" => Ok(Method::Lsb),
            "pvd" => Ok(Method::Pvd),
            "dct" => Ok(Method::Dct),
            "dhwt" | "haar" | "wavelet" => Ok(Method::Dhwt),
            _ => Err(SteganoError::UnknownMethod(s.to_string())),
        }
    }
}

/// Codec configuration for hiding and unveiling
///
/// The variant decides the method, its payload carries the method specific tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecOptions {
    Lsb(LsbCodecOptions),
    Pvd(PvdCodecOptions),
    Dct(DctCodecOptions),
    Dhwt(HaarCodecOptions),
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self::Lsb(LsbCodecOptions)
    }
}

impl CodecOptions {
    /// default options of the given method
    pub fn for_method(method: Method) -> Self {
        match method {
            Method::Lsb => Self::Lsb(LsbCodecOptions),
            Method::Pvd => Self::Pvd(PvdCodecOptions),
            Method::Dct => Self::Dct(DctCodecOptions::default()),
            Method::Dhwt => Self::Dhwt(HaarCodecOptions::default()),
        }
    }

    pub fn method(&self) -> Method {
        match self {
            CodecOptions::Lsb(_) => Method::Lsb,
            CodecOptions::Pvd(_) => Method::Pvd,
            CodecOptions::Dct(_) => Method::Dct,
            CodecOptions::Dhwt(_) => Method::Dhwt,
        }
    }

    /// Changes the block size of the transform based methods, the spatial ones ignore it.
    pub fn with_block_size(self, block_size: u32) -> Self {
        match self {
            CodecOptions::Dct(_) => CodecOptions::Dct(DctCodecOptions { block_size }),
            CodecOptions::Dhwt(_) => CodecOptions::Dhwt(HaarCodecOptions { block_size }),
            other => other,
        }
    }
}

impl From<Method> for CodecOptions {
    fn from(method: Method) -> Self {
        Self::for_method(method)
    }
}

/// Options for LSB encoding, one bit per gray sample in row-major order
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LsbCodecOptions;

/// Options for pixel value differencing, pairs are taken from each row left to right
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PvdCodecOptions;

/// Options for the block DCT method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DctCodecOptions {
    /// Edge length of the square blocks, image dimensions must be a multiple of it
    pub block_size: u32,
}

impl Default for DctCodecOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

/// Options for the Haar wavelet method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HaarCodecOptions {
    /// Edge length of the square blocks, must be even and divide both image dimensions
    pub block_size: u32,
}

impl Default for HaarCodecOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}
