//! Doodle pixel codec.
//!
//! A drawing is a row-major string of `'0'`/`'1'` pixels. The packed form
//! stores 16 pixels per UTF-16 code unit, most significant bit first, so a
//! 32x32 drawing travels as 64 units instead of 1024 characters.

pub mod edge;
pub mod packed;

pub use edge::Edge;
pub use packed::PackedPixels;

use thiserror::Error;

/// Pixels carried by one packed code unit.
pub const BITS_PER_UNIT: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("malformed input: expected '0' or '1' at bit {index}, found {found:?}")]
    MalformedBit { index: usize, found: char },

    #[error("malformed input: {len} bits is not a multiple of 16")]
    MalformedLength { len: usize },

    #[error("expected {expected} {unit} for a {edge}x{edge} doodle, got {actual}")]
    EdgeMismatch {
        edge: Edge,
        unit: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid edge {0}: must be a positive multiple of 4")]
    InvalidEdge(usize),

    #[error("packed bytes must come in pairs, got {0} bytes")]
    OddByteCount(usize),
}

/// Pack a pixel string into one code unit per 16 pixels.
pub fn compress(bits: &str) -> Result<PackedPixels, CodecError> {
    check_bits(bits)?;
    if bits.len() % BITS_PER_UNIT != 0 {
        return Err(CodecError::MalformedLength { len: bits.len() });
    }

    let units = bits
        .as_bytes()
        .chunks_exact(BITS_PER_UNIT)
        .map(|group| {
            group
                .iter()
                .fold(0u16, |acc, &b| (acc << 1) | u16::from(b == b'1'))
        })
        .collect();

    Ok(PackedPixels::from_units(units))
}

/// Every char must be `'0'` or `'1'`; afterwards byte length is pixel count.
fn check_bits(bits: &str) -> Result<(), CodecError> {
    // Everything before the first bad char is ASCII, so the byte index is the bit index.
    match bits.char_indices().find(|&(_, c)| c != '0' && c != '1') {
        Some((index, found)) => Err(CodecError::MalformedBit { index, found }),
        None => Ok(()),
    }
}

/// Expand packed units back into a pixel string of `16 * packed.len()` characters.
pub fn decompress(packed: &PackedPixels) -> String {
    let mut bits = String::with_capacity(packed.len() * BITS_PER_UNIT);
    for &unit in packed.units() {
        for shift in (0..BITS_PER_UNIT).rev() {
            bits.push(if (unit >> shift) & 1 == 1 { '1' } else { '0' });
        }
    }
    bits
}

/// [`compress`], additionally requiring exactly `edge²` pixels.
pub fn compress_drawing(bits: &str, edge: Edge) -> Result<PackedPixels, CodecError> {
    check_bits(bits)?;
    if bits.len() != edge.pixel_count() {
        return Err(CodecError::EdgeMismatch {
            edge,
            unit: "pixels",
            expected: edge.pixel_count(),
            actual: bits.len(),
        });
    }
    compress(bits)
}

/// [`decompress`], additionally requiring exactly `edge² / 16` units.
pub fn decompress_drawing(packed: &PackedPixels, edge: Edge) -> Result<String, CodecError> {
    edge.check_packed(packed)?;
    Ok(decompress(packed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_bits(rng: &mut StdRng, len: usize) -> String {
        (0..len)
            .map(|_| if rng.random_bool(0.5) { '1' } else { '0' })
            .collect()
    }

    #[test]
    fn high_bit_packs_to_32768() {
        let packed = compress("1000000000000000").unwrap();
        assert_eq!(packed.units(), &[32768]);
        assert_eq!(packed.to_string(), "\u{8000}");
        assert_eq!(decompress(&packed), "1000000000000000");
    }

    #[test]
    fn groups_are_msb_first() {
        let packed = compress("00000000000000010000000000000011").unwrap();
        assert_eq!(packed.units(), &[1, 3]);
    }

    #[test]
    fn random_drawings_roundtrip() {
        let mut rng = StdRng::seed_from_u64(0x0d00d1e);
        for edge in [16, 32, 64] {
            let edge = Edge::new(edge).unwrap();
            for _ in 0..50 {
                let bits = random_bits(&mut rng, edge.pixel_count());
                let packed = compress_drawing(&bits, edge).unwrap();
                assert_eq!(packed.len(), edge.pixel_count() / 16);
                assert_eq!(decompress_drawing(&packed, edge).unwrap(), bits);
            }
        }
    }

    #[test]
    fn extreme_groups_roundtrip() {
        let bits = "1".repeat(16) + &"0".repeat(16) + "1101100000000000";
        let packed = compress(&bits).unwrap();
        assert_eq!(packed.units(), &[0xFFFF, 0x0000, 0xD800]);
        assert_eq!(decompress(&packed), bits);
    }

    #[test]
    fn empty_input_packs_to_nothing() {
        let packed = compress("").unwrap();
        assert!(packed.is_empty());
        assert_eq!(decompress(&packed), "");
    }

    #[test]
    fn rejects_partial_group() {
        let err = compress("101").unwrap_err();
        assert_eq!(err, CodecError::MalformedLength { len: 3 });
    }

    #[test]
    fn rejects_non_binary_chars() {
        let err = compress("0000000020000000").unwrap_err();
        assert_eq!(err, CodecError::MalformedBit { index: 8, found: '2' });

        let err = compress("01é").unwrap_err();
        assert_eq!(err, CodecError::MalformedBit { index: 2, found: 'é' });
    }

    #[test]
    fn drawing_length_must_match_edge() {
        let edge = Edge::new(16).unwrap();
        let err = compress_drawing(&"0".repeat(32 * 32), edge).unwrap_err();
        assert!(matches!(err, CodecError::EdgeMismatch { expected: 256, actual: 1024, .. }));

        // Bad characters are reported before the length.
        let bits = "é".repeat(128);
        assert_eq!(bits.len(), 256);
        let err = compress_drawing(&bits, edge).unwrap_err();
        assert_eq!(err, CodecError::MalformedBit { index: 0, found: 'é' });

        let packed = compress(&"0".repeat(32)).unwrap();
        let err = decompress_drawing(&packed, edge).unwrap_err();
        assert!(matches!(err, CodecError::EdgeMismatch { expected: 16, actual: 2, .. }));
    }
}
