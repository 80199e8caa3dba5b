//! Reed-Solomon error correction codewords over GF(256).

use crate::gf::GaloisField;

/// Computes the error correction codewords for one block of data.
///
/// The generator polynomial is built once per encoder and reused for every block
/// of the same EC length.
pub struct ReedSolomonEncoder {
    /// Monic generator, highest-degree coefficient first.
    generator: Vec<u8>,
}

impl ReedSolomonEncoder {
    /// Creates an encoder producing `degree` EC codewords per block.
    pub fn new(degree: usize) -> Self {
        Self {
            generator: generator_poly(degree),
        }
    }

    /// Number of EC codewords produced per block.
    pub fn degree(&self) -> usize {
        self.generator.len() - 1
    }

    /// Returns the remainder of `data * x^degree` divided by the generator.
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let gf = GaloisField::get();
        let ec_len = self.degree();
        let mut remainder = Vec::with_capacity(data.len() + ec_len);
        remainder.extend_from_slice(data);
        remainder.resize(data.len() + ec_len, 0);

        for i in 0..data.len() {
            let factor = remainder[i];
            if factor == 0 {
                continue;
            }
            for (r, &g) in remainder[i..].iter_mut().zip(self.generator.iter()) {
                *r ^= gf.mul(g, factor);
            }
        }
        remainder.split_off(data.len())
    }
}

/// Builds the product of (x - alpha^i) for i in [0, degree).
///
/// Returns `degree + 1` coefficients, highest degree first; the leading one is always 1.
pub fn generator_poly(degree: usize) -> Vec<u8> {
    let gf = GaloisField::get();
    let mut poly = vec![1u8];
    for i in 0..degree {
        let root = gf.exp(i);
        let mut next = vec![0u8; poly.len() + 1];
        for (j, &c) in poly.iter().enumerate() {
            next[j] ^= c;
            next[j + 1] ^= gf.mul(c, root);
        }
        poly = next;
    }
    poly
}
