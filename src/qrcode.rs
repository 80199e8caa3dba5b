//! QR code encoding.
//!
//! Byte mode only, error correction level L, versions 1 to 10. The pipeline is:
//! version selection, codeword assembly with Reed-Solomon EC, function patterns,
//! data placement, mask selection and finally the format information.

use tracing::{debug, warn};

use crate::codewords::assemble;
use crate::error::QrError;
use crate::format::draw_format_bits;
use crate::mask::{apply_mask, select_mask, Mask};
use crate::matrix::Matrix;
use crate::version::Version;

/// A QR Code symbol, representing a square grid of dark and light modules.
///
/// Instances are immutable after creation.
///
/// # Example
///
/// ```rust
/// use qrsvg::QrCode;
///
/// let qr = QrCode::encode_text("Hello, World!");
/// assert_eq!(qr.version().value(), 1);
/// assert_eq!(qr.size(), 21);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QrCode {
    matrix: Matrix,
    mask: Mask,
}

impl QrCode {
    /// Encodes a text string as its UTF-8 bytes.
    ///
    /// Never fails: text longer than version 10 can hold is cut off at the
    /// version-10 capacity. Use [`QrCode::try_encode_text`] to reject it instead.
    pub fn encode_text(text: &str) -> Self {
        Self::encode_binary(text.as_bytes())
    }

    /// Encodes arbitrary bytes, clamping oversize input to version 10.
    pub fn encode_binary(data: &[u8]) -> Self {
        let version = Version::select(data.len()).unwrap_or_else(|| {
            warn!(
                len = data.len(),
                capacity = Version::MAX.max_payload_len(),
                "payload exceeds version 10 capacity, truncating"
            );
            Version::MAX
        });
        Self::encode_with_version(data, version)
    }

    /// Encodes a text string, failing if it does not fit version 10.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qrsvg::{QrCode, QrError};
    ///
    /// let long = "x".repeat(300);
    /// assert!(matches!(QrCode::try_encode_text(&long), Err(QrError::DataTooLong { .. })));
    /// ```
    pub fn try_encode_text(text: &str) -> Result<Self, QrError> {
        Self::try_encode_binary(text.as_bytes())
    }

    /// Encodes arbitrary bytes, failing if they do not fit version 10.
    pub fn try_encode_binary(data: &[u8]) -> Result<Self, QrError> {
        let version = Version::select(data.len()).ok_or(QrError::DataTooLong {
            len: data.len(),
            capacity: Version::MAX.max_payload_len(),
        })?;
        Ok(Self::encode_with_version(data, version))
    }

    /// Encodes `data` into a symbol of exactly the given version.
    ///
    /// Data beyond the version's capacity is dropped.
    pub fn encode_with_version(data: &[u8], version: Version) -> Self {
        let bits = assemble(data, version);

        let mut matrix = Matrix::with_function_patterns(version);
        matrix.place_data(&bits);

        let mask = select_mask(&matrix);
        apply_mask(&mut matrix, mask);
        draw_format_bits(&mut matrix, mask);

        debug!(
            version = version.value(),
            mask = mask.value(),
            len = data.len(),
            "encoded qr code"
        );
        Self { matrix, mask }
    }

    /// Returns this QR Code's version, in the range [1, 10].
    pub fn version(&self) -> Version {
        self.matrix.version()
    }

    /// Returns this QR Code's size, in the range [21, 57].
    pub fn size(&self) -> i32 {
        self.matrix.size() as i32
    }

    /// Returns this QR Code's mask, in the range [0, 7].
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Returns the color of the module at the given coordinates.
    ///
    /// Returns `true` for dark modules and `false` for light modules. Coordinates outside the QR
    /// code's bounds return `false`.
    ///
    /// # Arguments
    ///
    /// * `x` - X-coordinate (0 is left).
    /// * `y` - Y-coordinate (0 is top).
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        let range = 0..self.size();
        range.contains(&x) && range.contains(&y) && self.matrix.get(x as usize, y as usize)
    }

    /// Whether the module belongs to a finder, alignment, timing, format or version area.
    pub fn is_function_module(&self, x: i32, y: i32) -> bool {
        let range = 0..self.size();
        range.contains(&x) && range.contains(&y) && self.matrix.is_reserved(x as usize, y as usize)
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::read_mask;

    #[test]
    fn test_empty_text() {
        let qr = QrCode::encode_text("");
        assert_eq!(qr.version(), Version::MIN);
        assert_eq!(qr.size(), 21);
        assert!(qr.matrix().modules().count_ones() > 0);
    }

    #[test]
    fn test_mask_recorded_in_format_bits() {
        for text in ["", "hello", "https://example.com/invite/abc123"] {
            let qr = QrCode::encode_text(text);
            assert_eq!(read_mask(qr.matrix()), Some(qr.mask()));
        }
    }

    #[test]
    fn test_get_module_out_of_range() {
        let qr = QrCode::encode_text("hello");
        assert!(!qr.get_module(-1, 0));
        assert!(!qr.get_module(0, 21));
        // top-left finder corner
        assert!(qr.get_module(0, 0));
        assert!(qr.is_function_module(0, 0));
        assert!(!qr.is_function_module(21, 21));
    }

    #[test]
    fn test_utf8_length_drives_version() {
        // 9 characters, 18 bytes
        let text = "ééééééééé";
        assert_eq!(text.len(), 18);
        assert_eq!(QrCode::encode_text(text).version().value(), 2);
    }

    #[test]
    fn test_oversize_clamps_or_fails() {
        let long = "a".repeat(400);
        let qr = QrCode::encode_text(&long);
        assert_eq!(qr.version(), Version::MAX);
        match QrCode::try_encode_text(&long) {
            Err(QrError::DataTooLong { len, capacity }) => {
                assert_eq!(len, 400);
                assert_eq!(capacity, 271);
            }
            other => panic!("unexpected result: {:?}", other.map(|q| q.version())),
        }
        assert!(QrCode::try_encode_text(&"a".repeat(271)).is_ok());
    }

    #[test]
    fn test_function_modules_survive_masking() {
        let text = "function modules are never touched by data or mask";
        let qr = QrCode::encode_text(text);
        let reference = Matrix::with_function_patterns(qr.version());
        let size = qr.size();
        for y in 0..size {
            for x in 0..size {
                let (ux, uy) = (x as usize, y as usize);
                let in_format = (ux == 8 && (uy <= 8 || uy >= reference.size() - 8))
                    || (uy == 8 && (ux <= 8 || ux >= reference.size() - 8));
                if reference.is_reserved(ux, uy) && !in_format {
                    assert_eq!(qr.get_module(x, y), reference.get(ux, uy), "({}, {})", x, y);
                }
            }
        }
    }
}
