//! Format information: EC level L plus the mask number, BCH-protected.

use crate::mask::Mask;
use crate::matrix::{get_bit, Matrix};

/// 15-bit format words for EC level L, indexed by mask number.
static FORMAT_WORDS_L: [u32; 8] = [
    0x77c4, 0x72f3, 0x7daa, 0x789d, 0x662f, 0x6318, 0x6c41, 0x6976,
];

/// Returns the format word for `mask` at EC level L.
pub fn format_word(mask: Mask) -> u32 {
    FORMAT_WORDS_L[usize::from(mask.value())]
}

/// Writes the format word into both copies and forces the dark module on.
pub fn draw_format_bits(matrix: &mut Matrix, mask: Mask) {
    let bits = format_word(mask);

    // Around the top-left finder
    for i in 0..6 {
        matrix.set(8, usize::from(i), get_bit(bits, i));
    }
    matrix.set(8, 7, get_bit(bits, 6));
    matrix.set(8, 8, get_bit(bits, 7));
    matrix.set(7, 8, get_bit(bits, 8));
    for i in 9..15 {
        matrix.set(usize::from(14 - i), 8, get_bit(bits, i));
    }

    // Split between the other two finders
    let size = matrix.size();
    for i in 0..8 {
        matrix.set(size - 1 - usize::from(i), 8, get_bit(bits, i));
    }
    for i in 8..15 {
        matrix.set(8, size - 15 + usize::from(i), get_bit(bits, i));
    }
    matrix.set(8, size - 8, true);
}

/// Reads the mask number back out of the top-left format copy.
pub fn read_mask(matrix: &Matrix) -> Option<Mask> {
    let mut bits: u32 = 0;
    for i in 0..6u8 {
        bits |= u32::from(matrix.get(8, usize::from(i))) << i;
    }
    bits |= u32::from(matrix.get(8, 7)) << 6;
    bits |= u32::from(matrix.get(8, 8)) << 7;
    bits |= u32::from(matrix.get(7, 8)) << 8;
    for i in 9..15u8 {
        bits |= u32::from(matrix.get(usize::from(14 - i), 8)) << i;
    }
    FORMAT_WORDS_L
        .iter()
        .position(|&w| w == bits)
        .map(|m| Mask::new(m as u8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;

    // EC level L has format bits 01.
    fn bch_format_word(mask: u8) -> u32 {
        let data = (1u32 << 3) | u32::from(mask);
        let mut rem: u32 = data;
        for _ in 0..10 {
            rem = (rem << 1) ^ ((rem >> 9) * 0x537);
        }
        ((data << 10) | rem) ^ 0x5412
    }

    #[test]
    fn test_table_matches_bch() {
        for m in 0..8u8 {
            assert_eq!(format_word(Mask::new(m)), bch_format_word(m), "mask {}", m);
        }
    }

    #[test]
    fn test_draw_and_read_back() {
        for v in [1u8, 4, 10] {
            for m in 0..8u8 {
                let mut matrix = Matrix::with_function_patterns(Version::new(v));
                draw_format_bits(&mut matrix, Mask::new(m));
                assert_eq!(read_mask(&matrix), Some(Mask::new(m)));
                assert!(matrix.get(8, matrix.size() - 8));
            }
        }
    }

    #[test]
    fn test_copies_agree() {
        let mut matrix = Matrix::with_function_patterns(Version::MIN);
        draw_format_bits(&mut matrix, Mask::new(3));
        let size = matrix.size();
        let bits = format_word(Mask::new(3));
        for i in 0..8u8 {
            assert_eq!(matrix.get(size - 1 - usize::from(i), 8), get_bit(bits, i));
        }
        for i in 8..15u8 {
            assert_eq!(matrix.get(8, size - 15 + usize::from(i)), get_bit(bits, i));
        }
    }

    #[test]
    fn test_format_cells_are_reserved() {
        let before = Matrix::with_function_patterns(Version::new(2));
        let mut matrix = before.clone();
        draw_format_bits(&mut matrix, Mask::new(6));
        let size = matrix.size();
        for y in 0..size {
            for x in 0..size {
                if matrix.get(x, y) != before.get(x, y) {
                    assert!(before.is_reserved(x, y), "({}, {})", x, y);
                }
            }
        }
    }
}
