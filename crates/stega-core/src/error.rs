use thiserror::Error;

use crate::media::codec_options::Method;

#[derive(Error, Debug)]
pub enum SteganoError {
    /// Represents a payload that is neither text nor a gray image, or text that has characters
    /// outside of the 8 bit range
    #[error("Payload type is not supported")]
    UnsupportedPayloadType,

    /// Represents a cover image whose dimensions are not a multiple of the transform block size
    #[error(
        "Block geometry error: an image of {width}x{height} cannot be split into {block_size}x{block_size} blocks"
    )]
    InvalidBlockGeometry {
        width: u32,
        height: u32,
        block_size: u32,
    },

    /// Represents a payload that does not fit into the cover image with the chosen method
    #[error("Capacity Error: payload requires {required} bits but the cover image only offers {available}")]
    CapacityExceeded { required: usize, available: usize },

    /// Represents a bit sequence that cannot be grouped into whole bytes
    #[error("Malformed payload: {bits} bits are not a multiple of 8")]
    MalformedPayload { bits: usize },

    /// Represents a bit sequence that is shorter than the expected payload shape
    #[error("Insufficient data: expected {expected} bits but only {available} are available")]
    InsufficientData { expected: usize, available: usize },

    /// Represents a cover image that does not exist
    #[error("Cover image is missing")]
    MissingCover,

    /// Represents an invalid carrier image media. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a request to unveil data with a method that only hides
    #[error("Method {0} can only hide data, unveiling is not supported")]
    UnveilNotSupported(Method),

    /// Represents a method name that is none of LSB, PVD, DCT or DHWT
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// Represents two images that are compared but differ in size
    #[error("Image dimensions do not match: {0:?} vs {1:?}")]
    MismatchedDimensions((u32, u32), (u32, u32)),

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing payload")]
    MissingPayload,
}
