use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use std::io::Cursor;
use std::ops::Index;

use crate::{Result, SteganoError};

/// Ordered sequence of single bits, most significant bit of every byte first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BitSequence {
    bits: Vec<bool>,
}

impl BitSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// reads every byte MSB first, so `[0b1000_0001]` becomes `1 0 0 0 0 0 0 1`
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut reader = BitReader::endian(Cursor::new(bytes), BigEndian);
        let mut seq = Self::with_capacity(bytes.len() * 8);
        while let Ok(bit) = reader.read_bit() {
            seq.push(bit);
        }

        seq
    }

    /// packs the bits back into bytes, fails if the bits do not form whole bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.bits.len() % 8 != 0 {
            return Err(SteganoError::MalformedPayload {
                bits: self.bits.len(),
            });
        }
        let mut writer = BitWriter::endian(Vec::with_capacity(self.bits.len() / 8), BigEndian);
        for bit in self.bits.iter() {
            writer.write_bit(*bit)?;
        }

        Ok(writer.into_writer())
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// appends the lowest `count` bits of `value`, highest of them first
    pub fn push_value(&mut self, value: u32, count: u32) {
        for shift in (0..count).rev() {
            self.bits.push((value >> shift) & 1 == 1);
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, bool> {
        self.bits.iter()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    pub fn truncate(&mut self, len: usize) {
        self.bits.truncate(len);
    }
}

impl Index<usize> for BitSequence {
    type Output = bool;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bits[index]
    }
}

impl From<Vec<bool>> for BitSequence {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromIterator<bool> for BitSequence {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a BitSequence {
    type Item = &'a bool;
    type IntoIter = std::slice::Iter<'a, bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.iter()
    }
}

/// Reads fixed width unsigned values out of a bit slice, MSB first.
///
/// Reading past the end yields zero bits, so the last value may be padded.
pub(crate) struct BitCursor<'a> {
    bits: &'a [bool],
    pos: usize,
}

impl<'a> BitCursor<'a> {
    pub fn new(bits: &'a [bool]) -> Self {
        Self { bits, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.bits.len().saturating_sub(self.pos)
    }

    pub fn read_value(&mut self, count: u32) -> u32 {
        let mut value = 0;
        for _ in 0..count {
            let bit = self.bits.get(self.pos).copied().unwrap_or(false);
            value = (value << 1) | u32::from(bit);
            self.pos += 1;
        }
        value
    }
}
