use std::path::PathBuf;

use clap::Args;
use log::debug;
use stega_core::{CodecOptions, Method, Payload, PayloadShape};

use crate::CliResult;

/// Unveils a text or a gray image from a LSB or PVD stego image
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Stego image that contains secret data
    #[arg(
        short = 'i',
        long = "in",
        value_name = "stego image",
        required = true
    )]
    pub media: PathBuf,

    /// Hiding method the image was created with: LSB or PVD
    #[arg(short = 'x', long, value_name = "method", default_value = "lsb")]
    pub method: Method,

    /// Number of characters of the hidden text
    #[arg(
        long,
        value_name = "count",
        required_unless_present = "width",
        conflicts_with_all = ["width", "height"]
    )]
    pub chars: Option<usize>,

    /// Width of the hidden image
    #[arg(long, value_name = "pixels", requires = "height")]
    pub width: Option<u32>,

    /// Height of the hidden image
    #[arg(long, value_name = "pixels", requires = "width")]
    pub height: Option<u32>,

    /// Unveiled data will be stored in that file, required for images
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output file",
        required_unless_present = "chars"
    )]
    pub output_file: Option<PathBuf>,
}

impl UnveilArgs {
    pub fn run(self) -> CliResult<()> {
        let shape = match (self.chars, self.width, self.height) {
            (Some(chars), _, _) => PayloadShape::Text { chars },
            (None, Some(width), Some(height)) => PayloadShape::Image { width, height },
            _ => return Err(stega_core::SteganoError::MissingPayload),
        };

        debug!("unveiling {shape:?} from {:?} with {}", self.media, self.method);

        let payload = stega_core::commands::unveil(
            &self.media,
            shape,
            self.output_file.as_deref(),
            CodecOptions::for_method(self.method),
        )?;

        if let Payload::Text(text) = payload {
            if self.output_file.is_none() {
                println!("{text}");
            }
        }

        Ok(())
    }
}
