use std::path::PathBuf;

use clap::Args;
use log::debug;
use stega_core::{CodecOptions, Method};

use crate::CliResult;

/// Hides a text message or a gray image in a cover image
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Cover image, used readonly. Color images are converted to gray.
    #[arg(short = 'i', long = "in", value_name = "cover image", required = true)]
    pub media: PathBuf,

    /// Final image will be stored as PNG file
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        required = true
    )]
    pub write_to_file: PathBuf,

    /// Hiding method: LSB, PVD, DCT or DHWT
    #[arg(short = 'x', long, value_name = "method", default_value = "lsb")]
    pub method: Method,

    /// A text message that will be hidden
    #[arg(
        short,
        long,
        value_name = "text message",
        required_unless_present = "secret_image",
        conflicts_with = "secret_image"
    )]
    pub message: Option<String>,

    /// A gray image that will be hidden
    #[arg(short = 's', long = "secret", value_name = "secret image")]
    pub secret_image: Option<PathBuf>,

    /// Block edge length for DCT and DHWT
    #[arg(long, value_name = "pixels")]
    pub block_size: Option<u32>,
}

impl HideArgs {
    pub fn run(self) -> CliResult<()> {
        let options = options_of(self.method, self.block_size);
        debug!("hiding in {:?} with {options:?}", self.media);

        stega_core::commands::hide(
            &self.media,
            &self.write_to_file,
            self.message,
            self.secret_image,
            options,
        )
    }
}

fn options_of(method: Method, block_size: Option<u32>) -> CodecOptions {
    let options = CodecOptions::for_method(method);
    match block_size {
        Some(size) => options.with_block_size(size),
        None => options,
    }
}
