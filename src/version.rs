//! Version profiles for byte mode at error correction level L, versions 1 to 10.

/// Fixed capacity figures for one version at EC level L.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct VersionProfile {
    pub version: u8,
    /// Data codewords across all blocks.
    pub max_data_bytes: usize,
    pub ec_bytes_per_block: usize,
    pub num_blocks: usize,
}

static PROFILES: [VersionProfile; 10] = [
    VersionProfile { version: 1, max_data_bytes: 19, ec_bytes_per_block: 7, num_blocks: 1 },
    VersionProfile { version: 2, max_data_bytes: 34, ec_bytes_per_block: 10, num_blocks: 1 },
    VersionProfile { version: 3, max_data_bytes: 55, ec_bytes_per_block: 15, num_blocks: 1 },
    VersionProfile { version: 4, max_data_bytes: 80, ec_bytes_per_block: 20, num_blocks: 1 },
    VersionProfile { version: 5, max_data_bytes: 108, ec_bytes_per_block: 26, num_blocks: 1 },
    VersionProfile { version: 6, max_data_bytes: 136, ec_bytes_per_block: 18, num_blocks: 2 },
    VersionProfile { version: 7, max_data_bytes: 156, ec_bytes_per_block: 20, num_blocks: 2 },
    VersionProfile { version: 8, max_data_bytes: 194, ec_bytes_per_block: 24, num_blocks: 2 },
    VersionProfile { version: 9, max_data_bytes: 232, ec_bytes_per_block: 30, num_blocks: 2 },
    VersionProfile { version: 10, max_data_bytes: 274, ec_bytes_per_block: 18, num_blocks: 4 },
];

static ALIGNMENT_POSITIONS: [&[usize]; 10] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
];

/// A QR code version (1–10).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Version(u8);

impl Version {
    /// The smallest supported version.
    pub const MIN: Version = Version(1);

    /// The largest supported version.
    pub const MAX: Version = Version(10);

    /// Creates a version object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [1, 10].
    pub const fn new(ver: u8) -> Self {
        assert!(
            Version::MIN.value() <= ver && ver <= Version::MAX.value(),
            "Version number out of range"
        );
        Self(ver)
    }

    /// Returns the value, which is in the range [1, 10].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Width and height of the symbol in modules.
    pub const fn size(self) -> usize {
        self.0 as usize * 4 + 17
    }

    pub fn profile(self) -> &'static VersionProfile {
        &PROFILES[usize::from(self.0 - 1)]
    }

    /// Width of the character count field in byte mode.
    pub const fn char_count_bits(self) -> u8 {
        if self.0 <= 9 {
            8
        } else {
            16
        }
    }

    /// Bytes taken by the mode indicator and character count field, rounded up.
    pub const fn header_bytes(self) -> usize {
        (4 + self.char_count_bits() as usize + 7) / 8
    }

    /// Largest payload, in bytes, that fits this version.
    pub fn max_payload_len(self) -> usize {
        self.profile().max_data_bytes - self.header_bytes()
    }

    /// Centre coordinates of the alignment patterns along either axis.
    pub fn alignment_positions(self) -> &'static [usize] {
        ALIGNMENT_POSITIONS[usize::from(self.0 - 1)]
    }

    /// Returns the smallest version that can hold `payload_len` bytes, if any.
    pub fn select(payload_len: usize) -> Option<Version> {
        (Self::MIN.0..=Self::MAX.0)
            .map(Version)
            .find(|v| payload_len + v.header_bytes() <= v.profile().max_data_bytes)
    }

    /// The 18-bit version information word (versions 7 and up only).
    pub fn info_bits(self) -> Option<u32> {
        if self.0 < 7 {
            return None;
        }
        let ver = u32::from(self.0);
        let mut rem: u32 = ver;
        for _ in 0..12 {
            rem = (rem << 1) ^ ((rem >> 11) * 0x1f25);
        }
        Some((ver << 12) | rem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Modules left for codewords once every function pattern is placed.
    fn num_raw_data_modules(ver: usize) -> usize {
        let mut result: usize = (16 * ver + 128) * ver + 64;
        if ver >= 2 {
            let numalign: usize = ver / 7 + 2;
            result -= (25 * numalign - 10) * numalign - 55;
            if ver >= 7 {
                result -= 36;
            }
        }
        result
    }

    #[test]
    fn test_profiles_fill_the_symbol() {
        for v in 1..=10u8 {
            let p = Version::new(v).profile();
            assert_eq!(p.version, v);
            let total = p.max_data_bytes + p.ec_bytes_per_block * p.num_blocks;
            assert_eq!(total, num_raw_data_modules(usize::from(v)) / 8, "version {}", v);
        }
    }

    #[test]
    fn test_size() {
        assert_eq!(Version::MIN.size(), 21);
        assert_eq!(Version::new(2).size(), 25);
        assert_eq!(Version::MAX.size(), 57);
    }

    #[test]
    fn test_select_boundaries() {
        assert_eq!(Version::select(0), Some(Version::new(1)));
        assert_eq!(Version::select(17), Some(Version::new(1)));
        assert_eq!(Version::select(18), Some(Version::new(2)));
        assert_eq!(Version::select(19), Some(Version::new(2)));
        assert_eq!(Version::select(230), Some(Version::new(9)));
        assert_eq!(Version::select(231), Some(Version::new(10)));
        assert_eq!(Version::select(271), Some(Version::new(10)));
        assert_eq!(Version::select(272), None);
    }

    #[test]
    fn test_header_bytes() {
        assert_eq!(Version::new(9).header_bytes(), 2);
        assert_eq!(Version::MAX.header_bytes(), 3);
        assert_eq!(Version::MAX.max_payload_len(), 271);
    }

    #[test]
    fn test_info_bits() {
        assert_eq!(Version::new(6).info_bits(), None);
        assert_eq!(Version::new(7).info_bits(), Some(0x07C94));
        assert_eq!(Version::new(10).info_bits(), Some(0x0A4D3));
    }

    #[test]
    #[should_panic(expected = "Version number out of range")]
    fn test_version_out_of_range() {
        Version::new(11);
    }
}
