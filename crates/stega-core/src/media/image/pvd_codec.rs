//! Pixel value differencing.
//!
//! Every row is split into horizontal pairs `(p[2j], p[2j + 1])`. The absolute difference of a
//! pair picks a [`SmoothnessClass`], rough pairs carry more bits than smooth ones. The hidden
//! value `b` is stored by moving the pair difference to `l + b`, keeping its sign and the
//! floored mean of the pair. Because the mean and the class survive, the unveil side can
//! recompute everything from the stego pair alone.

use image::GrayImage;
use log::debug;

use super::concealer::{Concealer, Unveiler};
use crate::bit_sequence::BitCursor;
use crate::media::codec_options::PvdCodecOptions;
use crate::{payload, BitSequence, Payload, Result, SteganoError};

/// Range bucket of a pair difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SmoothnessClass(u8);

impl SmoothnessClass {
    /// Class 0 covers `[0, 8)`, class `k > 0` covers `[2^(k-1) * 8, 2^k * 8)`.
    pub fn of(difference: u8) -> Self {
        if difference < 8 {
            Self(0)
        } else {
            let log2 = 7 - difference.leading_zeros() as u8;
            Self(log2 - 2)
        }
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    /// smallest difference of the class, `l`
    pub fn lower(&self) -> i16 {
        match self.0 {
            0 => 0,
            k => 8 << (k - 1),
        }
    }

    /// largest difference of the class, `u`
    pub fn upper(&self) -> i16 {
        match self.0 {
            0 => 7,
            _ => 2 * self.lower() - 1,
        }
    }

    /// bits a pair of this class carries, `t`
    pub fn capacity(&self) -> u32 {
        match self.0 {
            0 => 3,
            k => u32::from(k) + 2,
        }
    }
}

/// `|p[2j] - p[2j + 1]|` for every pair of every row
pub fn compute_differences(cover: &GrayImage) -> Vec<Vec<u8>> {
    cover
        .rows()
        .map(|row| {
            let row: Vec<u8> = row.map(|p| p.0[0]).collect();
            row.chunks_exact(2).map(|c| c[0].abs_diff(c[1])).collect()
        })
        .collect()
}

/// A pair can only carry data when every difference of its class fits around the pair mean.
pub fn is_usable(p: u8, q: u8) -> bool {
    let class = SmoothnessClass::of(p.abs_diff(q));
    let mean = (i16::from(p) + i16::from(q)) / 2;
    let upper = class.upper();

    mean - upper.div_euclid(2) >= 0 && mean + (upper - upper.div_euclid(2)) <= 255
}

/// Moves the pair difference to `l + value`.
///
/// With `m` the signed change of the difference, odd differences take `ceil(m/2)` from the left
/// pixel and add `floor(m/2)` to the right one, even differences swap the rounding. That keeps
/// `floor((p + q) / 2)` unchanged. The plain rule on the unsigned `m` rounds even differences
/// the other way and can shift the mean by one, which breaks extraction.
pub fn embed_pair(p: u8, q: u8, value: u32) -> (u8, u8) {
    let signed = i16::from(q) - i16::from(p);
    let class = SmoothnessClass::of(signed.unsigned_abs() as u8);
    let target = class.lower() + value as i16;
    let target = if signed < 0 { -target } else { target };

    let m = target - signed;
    let floor_half = m.div_euclid(2);
    let ceil_half = m - floor_half;
    let (p, q) = (i16::from(p), i16::from(q));
    let (p, q) = if signed.rem_euclid(2) == 1 {
        (p - ceil_half, q + floor_half)
    } else {
        (p - floor_half, q + ceil_half)
    };

    (p as u8, q as u8)
}

/// the value hidden in a stego pair
pub fn extract_pair(p: u8, q: u8) -> u32 {
    let difference = p.abs_diff(q);
    let class = SmoothnessClass::of(difference);

    (i16::from(difference) - class.lower()) as u32
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PvdCodec;

impl PvdCodec {
    pub fn new(_opts: &PvdCodecOptions) -> Self {
        Self
    }

    pub fn embed(&self, cover: &GrayImage, bits: &BitSequence) -> Result<GrayImage> {
        let available = self.capacity(cover)?;
        if bits.len() > available {
            return Err(SteganoError::CapacityExceeded {
                required: bits.len(),
                available,
            });
        }
        debug!("PVD: hiding {} bits, capacity is {available}", bits.len());

        let mut stego = cover.clone();
        let width = cover.width() as usize;
        if width == 0 {
            return Ok(stego);
        }
        let mut cursor = BitCursor::new(bits.as_slice());
        for row in stego.chunks_exact_mut(width) {
            for pair in row.chunks_exact_mut(2) {
                if cursor.remaining() == 0 {
                    return Ok(stego);
                }
                if !is_usable(pair[0], pair[1]) {
                    continue;
                }
                let t = SmoothnessClass::of(pair[0].abs_diff(pair[1])).capacity();
                let (p, q) = embed_pair(pair[0], pair[1], cursor.read_value(t));
                pair[0] = p;
                pair[1] = q;
            }
        }

        Ok(stego)
    }

    pub fn extract(&self, stego: &GrayImage, length: usize) -> Result<BitSequence> {
        let mut bits = BitSequence::with_capacity(length);
        let width = stego.width() as usize;
        if width == 0 {
            if length == 0 {
                return Ok(bits);
            }
            return Err(SteganoError::InsufficientData {
                expected: length,
                available: 0,
            });
        }
        'rows: for row in stego.chunks_exact(width) {
            for pair in row.chunks_exact(2) {
                if bits.len() >= length {
                    break 'rows;
                }
                if !is_usable(pair[0], pair[1]) {
                    continue;
                }
                let t = SmoothnessClass::of(pair[0].abs_diff(pair[1])).capacity();
                bits.push_value(extract_pair(pair[0], pair[1]), t);
            }
        }

        if bits.len() < length {
            return Err(SteganoError::InsufficientData {
                expected: length,
                available: bits.len(),
            });
        }
        bits.truncate(length);

        Ok(bits)
    }
}

impl Concealer for PvdCodec {
    fn capacity(&self, cover: &GrayImage) -> Result<usize> {
        let width = cover.width() as usize;
        if width == 0 {
            return Ok(0);
        }

        Ok(cover
            .chunks_exact(width)
            .flat_map(|row| row.chunks_exact(2))
            .filter(|pair| is_usable(pair[0], pair[1]))
            .map(|pair| SmoothnessClass::of(pair[0].abs_diff(pair[1])).capacity() as usize)
            .sum())
    }

    fn hide(&self, cover: &GrayImage, secret: &Payload) -> Result<GrayImage> {
        self.embed(cover, &payload::encode(secret)?)
    }
}

impl Unveiler for PvdCodec {
    fn unveil_bits(&self, stego: &GrayImage, length: usize) -> Result<BitSequence> {
        self.extract(stego, length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{prepare_gradient_image, prepare_noisy_image};
    use image::Luma;

    #[test]
    fn classes_cover_the_documented_ranges() {
        let expected = [
            (0u8, 0i16, 7i16, 3u32),
            (1, 8, 15, 3),
            (2, 16, 31, 4),
            (3, 32, 63, 5),
            (4, 64, 127, 6),
            (5, 128, 255, 7),
        ];
        for (level, l, u, t) in expected {
            let class = SmoothnessClass::of(l as u8);
            assert_eq!(class.level(), level);
            assert_eq!(class.lower(), l);
            assert_eq!(class.upper(), u);
            assert_eq!(class.capacity(), t);
            assert_eq!(SmoothnessClass::of(u as u8), class, "{u} left its class");
            assert_eq!((u - l + 1) as u32, 1 << t, "t bits must span the class");
        }
    }

    #[test]
    fn capacity_is_monotonic_in_the_difference() {
        for d in 0..255u8 {
            let c1 = SmoothnessClass::of(d);
            let c2 = SmoothnessClass::of(d + 1);
            assert!(c1 <= c2);
            assert!(c1.capacity() <= c2.capacity());
        }
    }

    #[test]
    fn should_compute_pair_differences_per_row() {
        let img = GrayImage::from_raw(5, 2, vec![10, 20, 30, 25, 99, 0, 0, 255, 7, 1]).unwrap();

        assert_eq!(compute_differences(&img), vec![vec![10, 5], vec![0, 248]]);
    }

    #[test]
    fn embedding_keeps_sign_mean_and_class() {
        for p in (0..=255u8).step_by(5) {
            for q in (0..=255u8).step_by(7) {
                if !is_usable(p, q) {
                    continue;
                }
                let class = SmoothnessClass::of(p.abs_diff(q));
                for value in [0, 1, (1 << class.capacity()) - 1] {
                    let (a, b) = embed_pair(p, q, value);
                    assert_eq!(extract_pair(a, b), value, "pair ({p}, {q}) value {value}");
                    assert_eq!(SmoothnessClass::of(a.abs_diff(b)), class);
                    assert_eq!(
                        (u16::from(a) + u16::from(b)) / 2,
                        (u16::from(p) + u16::from(q)) / 2
                    );
                    assert!(is_usable(a, b));
                    if q < p && a != b {
                        assert!(b < a, "sign of ({p}, {q}) flipped");
                    }
                }
            }
        }
    }

    #[test]
    fn pairs_at_the_range_border_are_skipped() {
        assert!(!is_usable(0, 0));
        assert!(!is_usable(255, 250));
        assert!(!is_usable(0, 200));
        assert!(is_usable(128, 128));
    }

    #[test]
    fn should_round_trip_bits() {
        let cover = prepare_noisy_image(32, 32);
        let bits: BitSequence = (0..1000).map(|i| (i * 7) % 5 < 2).collect();

        let stego = PvdCodec.embed(&cover, &bits).unwrap();

        assert_eq!(PvdCodec.extract(&stego, bits.len()).unwrap(), bits);
    }

    #[test]
    fn should_round_trip_a_partial_last_pair() {
        let cover = GrayImage::from_pixel(4, 1, Luma([100]));
        let bits: BitSequence = vec![true, false, true, true].into();

        let stego = PvdCodec.embed(&cover, &bits).unwrap();

        assert_eq!(PvdCodec.extract(&stego, 4).unwrap(), bits);
    }

    #[test]
    fn should_leave_odd_last_column_alone() {
        let cover = prepare_gradient_image(9, 4);
        let bits: BitSequence = vec![true; 40].into();

        let stego = PvdCodec.embed(&cover, &bits).unwrap();

        for y in 0..4 {
            assert_eq!(stego.get_pixel(8, y), cover.get_pixel(8, y));
        }
    }

    #[test]
    fn should_refuse_payload_beyond_capacity() {
        let cover = GrayImage::from_pixel(4, 2, Luma([100]));
        assert_eq!(PvdCodec.capacity(&cover).unwrap(), 12);
        let bits: BitSequence = vec![true; 13].into();

        match PvdCodec.embed(&cover, &bits) {
            Err(SteganoError::CapacityExceeded {
                required: 13,
                available: 12,
            }) => (),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn should_fail_to_extract_more_than_the_image_holds() {
        let cover = GrayImage::from_pixel(4, 2, Luma([100]));

        assert!(matches!(
            PvdCodec.extract(&cover, 13),
            Err(SteganoError::InsufficientData {
                expected: 13,
                available: 12
            })
        ));
    }

    #[test]
    fn should_handle_an_empty_image() {
        let empty = GrayImage::new(0, 0);

        assert!(PvdCodec.extract(&empty, 0).unwrap().is_empty());
        assert!(matches!(
            PvdCodec.extract(&empty, 3),
            Err(SteganoError::InsufficientData {
                expected: 3,
                available: 0
            })
        ));
        assert_eq!(PvdCodec.capacity(&empty).unwrap(), 0);
        assert_eq!(PvdCodec.embed(&empty, &BitSequence::new()).unwrap(), empty);
    }

    #[test]
    fn should_hide_and_unveil_text() {
        let cover = prepare_noisy_image(64, 64);
        let secret = Payload::text("TRY TO FIND ME");

        let stego = PvdCodec.hide(&cover, &secret).unwrap();
        let bits = PvdCodec.unveil_bits(&stego, 112).unwrap();

        assert_eq!(payload::decode_text(&bits).unwrap(), "TRY TO FIND ME");
    }
}
