//! Square block partitioning of gray images, shared by the transform based codecs.

use image::GrayImage;

use crate::{Result, SteganoError};

/// Non overlapping `size`x`size` tiling of an image, blocks are visited row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    size: u32,
    blocks_wide: u32,
    blocks_tall: u32,
}

impl BlockGrid {
    /// fails when the image cannot be tiled without remainder
    pub fn new(image: &GrayImage, size: u32) -> Result<Self> {
        let (width, height) = image.dimensions();
        if size == 0 || width % size != 0 || height % size != 0 {
            return Err(SteganoError::InvalidBlockGeometry {
                width,
                height,
                block_size: size,
            });
        }

        Ok(Self {
            size,
            blocks_wide: width / size,
            blocks_tall: height / size,
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn total_blocks(&self) -> usize {
        self.blocks_wide as usize * self.blocks_tall as usize
    }

    /// top left pixel of every block, row-major
    pub fn origins(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.blocks_tall).flat_map(move |by| {
            (0..self.blocks_wide).map(move |bx| (bx * self.size, by * self.size))
        })
    }

    /// Copies one block out, index = row * size + col.
    pub fn read(&self, image: &GrayImage, origin: (u32, u32)) -> Vec<f64> {
        let (x0, y0) = origin;
        let mut block = Vec::with_capacity((self.size * self.size) as usize);
        for y in y0..y0 + self.size {
            for x in x0..x0 + self.size {
                block.push(f64::from(image.get_pixel(x, y).0[0]));
            }
        }
        block
    }

    /// Writes one block back, values are rounded and clamped to the 8 bit range.
    pub fn write(&self, image: &mut GrayImage, origin: (u32, u32), block: &[f64]) {
        let (x0, y0) = origin;
        let size = self.size as usize;
        for (i, value) in block.iter().enumerate() {
            let x = x0 + (i % size) as u32;
            let y = y0 + (i / size) as u32;
            image.get_pixel_mut(x, y).0[0] = to_sample(*value);
        }
    }
}

pub(crate) fn to_sample(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
