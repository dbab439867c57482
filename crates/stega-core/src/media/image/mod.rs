pub mod blocks;
pub mod concealer;
pub mod dct_codec;
pub mod haar_codec;
pub mod lsb_codec;
pub mod pvd_codec;

pub use concealer::{Concealer, ImageCodec, Unveiler};
pub use dct_codec::DctCodec;
pub use haar_codec::HaarCodec;
pub use lsb_codec::LsbCodec;
pub use pvd_codec::PvdCodec;
