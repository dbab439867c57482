use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

pub use image::GrayImage;
use log::error;

use super::Persist;
use crate::error::SteganoError;
use crate::result::Result;

/// Loads any raster the `image` crate understands and converts it to 8 bit gray.
pub fn load_gray(f: &Path) -> Result<GrayImage> {
    if !f.is_file() {
        error!("Cover image {f:?} does not exist");
        return Err(SteganoError::MissingCover);
    }

    Ok(image::open(f)
        .map_err(|e| {
            error!("Error reading image {f:?}: {e}");
            SteganoError::InvalidImageMedia
        })?
        .to_luma8())
}

/// writes the image as PNG, whatever the writer is
pub fn save_to_writer<W: Write + Seek>(img: &GrayImage, mut writer: W) -> Result<()> {
    img.write_to(&mut writer, image::ImageFormat::Png)
        .map_err(|e| {
            error!("Error saving image: {e}");
            SteganoError::ImageEncodingError
        })
}

impl Persist for GrayImage {
    fn save_as(&self, file: &Path) -> Result<()> {
        let f = File::create(file).map_err(|e| {
            error!("Error creating file {file:?}: {e}");
            SteganoError::WriteError { source: e }
        })?;
        let mut writer = BufWriter::new(f);
        save_to_writer(self, &mut writer)?;
        writer
            .flush()
            .map_err(|source| SteganoError::WriteError { source })
    }
}
