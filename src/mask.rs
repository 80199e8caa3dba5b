//! Data masks and the penalty rules used to pick one.

use tracing::trace;

use crate::matrix::{Matrix, ModuleGrid};

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;

/// A mask pattern (0–7).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Mask(u8);

impl Mask {
    /// Creates a mask object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [0, 7].
    pub const fn new(mask: u8) -> Self {
        assert!(mask <= 7, "Mask value out of range");
        Self(mask)
    }

    /// Returns the value, which is in the range [0, 7].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether this mask flips the module at row `y`, column `x`.
    pub fn inverts(self, x: usize, y: usize) -> bool {
        match self.0 {
            0 => (x + y) % 2 == 0,
            1 => y % 2 == 0,
            2 => x % 3 == 0,
            3 => (x + y) % 3 == 0,
            4 => (x / 3 + y / 2) % 2 == 0,
            5 => ((x * y) % 2) + ((x * y) % 3) == 0,
            6 => (((x * y) % 2) + ((x * y) % 3)) % 2 == 0,
            7 => (((x + y) % 2) + ((x * y) % 3)) % 2 == 0,
            _ => unreachable!(),
        }
    }

    fn all() -> impl Iterator<Item = Mask> {
        (0u8..8).map(Mask)
    }
}

/// XORs the mask into every non-reserved module.
pub fn apply_mask(matrix: &mut Matrix, mask: Mask) {
    let size = matrix.size();
    for y in 0..size {
        for x in 0..size {
            if matrix.is_reserved(x, y) || !mask.inverts(x, y) {
                continue;
            }
            let dark = matrix.get(x, y);
            matrix.set(x, y, !dark);
        }
    }
}

/// Scores a grid with the run-length and 2x2 block rules.
///
/// Every run of five or more same-colored modules in a row or column costs
/// `length - 2`; every 2x2 square of one color costs 3.
pub fn penalty_score(grid: &ModuleGrid) -> u32 {
    let size = grid.size();
    let mut result: u32 = 0;

    for transposed in [false, true] {
        for a in 0..size {
            let mut runcolor = false;
            let mut run: u32 = 0;
            for b in 0..size {
                let color = if transposed { grid.get(a, b) } else { grid.get(b, a) };
                if b > 0 && color == runcolor {
                    run += 1;
                    if run == 5 {
                        result += PENALTY_N1;
                    } else if run > 5 {
                        result += 1;
                    }
                } else {
                    runcolor = color;
                    run = 1;
                }
            }
        }
    }

    for y in 0..size.saturating_sub(1) {
        for x in 0..size - 1 {
            let color = grid.get(x, y);
            if color == grid.get(x + 1, y)
                && color == grid.get(x, y + 1)
                && color == grid.get(x + 1, y + 1)
            {
                result += PENALTY_N2;
            }
        }
    }
    result
}

/// Tries all eight masks on copies of `matrix` and returns the one with the lowest
/// penalty. Ties go to the lower mask number.
pub fn select_mask(matrix: &Matrix) -> Mask {
    let mut best = Mask(0);
    let mut best_score = u32::MAX;
    for mask in Mask::all() {
        let mut candidate = matrix.clone();
        apply_mask(&mut candidate, mask);
        let score = penalty_score(candidate.modules());
        trace!(mask = mask.value(), score, "mask penalty");
        if score < best_score {
            best = mask;
            best_score = score;
        }
    }
    best
}
