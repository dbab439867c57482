use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Prints MSE and PSNR of a stego image compared to its cover
#[derive(Args, Debug)]
pub struct QualityArgs {
    /// The unmodified cover image
    #[arg(short = 'i', long = "in", value_name = "cover image", required = true)]
    pub original: PathBuf,

    /// The image to compare against the cover
    #[arg(
        short = 'c',
        long = "candidate",
        value_name = "stego image",
        required = true
    )]
    pub candidate: PathBuf,
}

impl QualityArgs {
    pub fn run(self) -> CliResult<()> {
        let metrics = stega_core::commands::quality(&self.original, &self.candidate)?;

        println!("MSE:  {:.4}", metrics.mse);
        println!("PSNR: {:.2} dB", metrics.psnr);

        Ok(())
    }
}
