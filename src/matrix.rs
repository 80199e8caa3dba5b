//! Module grid construction: function patterns, reservations and data placement.
//!
//! Coordinates are `(x, y)` with x the column and y the row, both counted from the
//! top-left corner.

use crate::codewords::BitBuffer;
use crate::version::Version;

/// A square grid of bits, packed eight to a byte.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ModuleGrid {
    size: usize,
    bits: Vec<u8>,
}

impl ModuleGrid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            bits: vec![0; (size * size + 7) / 8],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        assert!(x < self.size && y < self.size);
        let index = y * self.size + x;
        get_bit(self.bits[index >> 3].into(), (index & 7) as u8)
    }

    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        assert!(x < self.size && y < self.size);
        let index = y * self.size + x;
        if value {
            self.bits[index >> 3] |= 1u8 << (index & 7);
        } else {
            self.bits[index >> 3] &= !(1u8 << (index & 7));
        }
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }
}

/// The module grid together with its same-shaped reservation grid.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Matrix {
    version: Version,
    modules: ModuleGrid,
    reserved: ModuleGrid,
}

impl Matrix {
    /// An all-light matrix with nothing reserved.
    pub fn new(version: Version) -> Self {
        let size = version.size();
        Self {
            version,
            modules: ModuleGrid::new(size),
            reserved: ModuleGrid::new(size),
        }
    }

    /// Builds a matrix with every function pattern drawn and every
    /// function area, format areas included, reserved.
    pub fn with_function_patterns(version: Version) -> Self {
        let mut m = Self::new(version);
        let size = m.size();
        m.draw_finder(0, 0);
        m.draw_finder(size - 7, 0);
        m.draw_finder(0, size - 7);
        m.draw_alignment_patterns();
        m.draw_timing_patterns();
        m.reserve_format_areas();
        m.draw_version_info();
        m
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn size(&self) -> usize {
        self.modules.size()
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.modules.get(x, y)
    }

    pub fn set(&mut self, x: usize, y: usize, dark: bool) {
        self.modules.set(x, y, dark);
    }

    pub fn is_reserved(&self, x: usize, y: usize) -> bool {
        self.reserved.get(x, y)
    }

    pub fn modules(&self) -> &ModuleGrid {
        &self.modules
    }

    /// Sets a module and marks it reserved.
    pub fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        self.modules.set(x, y, dark);
        self.reserved.set(x, y, true);
    }

    /// Number of modules available for codewords.
    pub fn data_capacity(&self) -> usize {
        self.size() * self.size() - self.reserved.count_ones()
    }

    /// Draws a 7x7 finder with its light separator, top-left corner at `(left, top)`.
    /// Separator cells falling outside the symbol are skipped.
    fn draw_finder(&mut self, left: usize, top: usize) {
        let size = self.size() as i32;
        for dy in -1i32..=7 {
            for dx in -1i32..=7 {
                let x = left as i32 + dx;
                let y = top as i32 + dy;
                if !(0..size).contains(&x) || !(0..size).contains(&y) {
                    continue;
                }
                let dist = (dx - 3).abs().max((dy - 3).abs());
                self.set_function(x as usize, y as usize, dist != 2 && dist != 4);
            }
        }
    }

    /// Draws a 5x5 alignment pattern at every coordinate pair whose footprint is free.
    fn draw_alignment_patterns(&mut self) {
        let positions = self.version.alignment_positions();
        for &cy in positions {
            for &cx in positions {
                let overlaps = (cy - 2..=cy + 2)
                    .any(|y| (cx - 2..=cx + 2).any(|x| self.is_reserved(x, y)));
                if overlaps {
                    continue;
                }
                for dy in -2i32..=2 {
                    for dx in -2i32..=2 {
                        let x = (cx as i32 + dx) as usize;
                        let y = (cy as i32 + dy) as usize;
                        self.set_function(x, y, dx.abs().max(dy.abs()) != 1);
                    }
                }
            }
        }
    }

    fn draw_timing_patterns(&mut self) {
        let size = self.size();
        for i in 8..=size - 9 {
            if !self.is_reserved(i, 6) {
                self.set_function(i, 6, i % 2 == 0);
            }
            if !self.is_reserved(6, i) {
                self.set_function(6, i, i % 2 == 0);
            }
        }
    }

    /// Reserves both format information copies and sets the dark module.
    fn reserve_format_areas(&mut self) {
        let size = self.size();
        for i in 0..=8 {
            if !self.is_reserved(i, 8) {
                self.set_function(i, 8, false);
            }
            if !self.is_reserved(8, i) {
                self.set_function(8, i, false);
            }
        }
        for i in 0..8 {
            self.set_function(size - 1 - i, 8, false);
        }
        for i in 0..7 {
            self.set_function(8, size - 1 - i, false);
        }
        self.set_function(8, size - 8, true);
    }

    /// Draws the two 6x3 version information blocks (versions 7 and up).
    fn draw_version_info(&mut self) {
        let Some(bits) = self.version.info_bits() else {
            return;
        };
        let size = self.size();
        for i in 0u8..18 {
            let bit = get_bit(bits, i);
            let a = size - 11 + usize::from(i % 3);
            let b = usize::from(i / 3);
            self.set_function(a, b, bit);
            self.set_function(b, a, bit);
        }
    }

    /// Places `bits` along the two-column zigzag, right to left, skipping the
    /// vertical timing column and every reserved module. Cells left over once the
    /// stream runs out stay light.
    ///
    /// Returns how many bits were consumed.
    pub fn place_data(&mut self, bits: &BitBuffer) -> usize {
        let size = self.size();
        let mut i: usize = 0;
        let mut right = size - 1;
        loop {
            if right == 6 {
                right = 5;
            }
            let upward = ((right + 1) & 2) == 0;
            for vert in 0..size {
                let y = if upward { size - 1 - vert } else { vert };
                for x in [right, right - 1] {
                    if self.is_reserved(x, y) {
                        continue;
                    }
                    let bit = bits.get(i).unwrap_or(false);
                    self.set(x, y, bit);
                    if i < bits.len() {
                        i += 1;
                    }
                }
            }
            if right < 2 {
                break;
            }
            right -= 2;
        }
        i
    }
}

pub(crate) fn get_bit(x: u32, i: u8) -> bool {
    ((x >> i) & 1) != 0
}
