//! Arithmetic over GF(2^8), reduced by x^8 + x^4 + x^3 + x^2 + 1 (0x11D).
//!
//! The exponent and logarithm tables are built at compile time and shared by every
//! encoder in the process. The exponent table is doubled to 512 entries so that
//! `exp[log[a] + log[b]]` never needs a modulo.

const REDUCING_POLY: u16 = 0x11D;

/// Exponent/logarithm tables for the field, generator alpha = 2.
pub struct GaloisField {
    exp: [u8; 512],
    log: [u8; 256],
}

static FIELD: GaloisField = GaloisField::build();

impl GaloisField {
    const fn build() -> Self {
        let mut exp = [0u8; 512];
        let mut log = [0u8; 256];
        let mut x: u16 = 1;
        let mut i = 0;
        while i < 255 {
            exp[i] = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= REDUCING_POLY;
            }
            i += 1;
        }
        while i < 512 {
            exp[i] = exp[i - 255];
            i += 1;
        }
        Self { exp, log }
    }

    /// Returns the process-wide field tables.
    pub fn get() -> &'static Self {
        &FIELD
    }

    /// Multiplies two field elements.
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp[usize::from(self.log[usize::from(a)]) + usize::from(self.log[usize::from(b)])]
    }

    /// Returns alpha^power.
    pub fn exp(&self, power: usize) -> u8 {
        self.exp[power % 255]
    }

    /// Returns the discrete logarithm of `a`, or `None` for zero.
    pub fn log(&self, a: u8) -> Option<u8> {
        (a != 0).then(|| self.log[usize::from(a)])
    }
}

/// Shorthand for [`GaloisField::mul`] on the shared tables.
pub fn gf_mul(a: u8, b: u8) -> u8 {
    FIELD.mul(a, b)
}
