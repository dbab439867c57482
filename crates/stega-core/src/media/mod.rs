pub mod codec_options;
pub mod image;
mod types;

use std::path::Path;

pub use codec_options::{
    CodecOptions, DctCodecOptions, HaarCodecOptions, LsbCodecOptions, Method, PvdCodecOptions,
};
pub use types::*;

pub trait Persist {
    fn save_as(&self, _: &Path) -> crate::Result<()>;
}
