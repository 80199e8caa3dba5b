use crate::error::QrError;
use crate::qrcode::QrCode;

use image::{ImageBuffer, Rgb, RgbImage};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Pixels per module when none is given.
pub const DEFAULT_PIXEL_SIZE: u32 = 8;
/// Light modules around the symbol when none is given.
pub const DEFAULT_MARGIN: u32 = 4;

/// How a [`QrCode`] is drawn.
///
/// # Example
///
/// ```rust
/// use qrsvg::RenderOptions;
///
/// let options = RenderOptions::default().with_pixel_size(10).with_margin(2);
/// assert_eq!(options.total_size(21), 250);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RenderOptions {
    /// Edge length of one module in pixels.
    pub pixel_size: u32,
    /// Quiet zone width, in modules, on every side.
    pub margin: u32,
    pub dark: [u8; 3],
    pub light: [u8; 3],
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pixel_size: DEFAULT_PIXEL_SIZE,
            margin: DEFAULT_MARGIN,
            dark: [0, 0, 0],
            light: [255, 255, 255],
        }
    }
}

impl RenderOptions {
    /// Defaults, overridden by whichever values are given.
    pub fn new(pixel_size: Option<u32>, margin: Option<u32>) -> Self {
        let defaults = Self::default();
        Self {
            pixel_size: pixel_size.unwrap_or(defaults.pixel_size),
            margin: margin.unwrap_or(defaults.margin),
            ..defaults
        }
    }

    pub fn with_pixel_size(mut self, pixel_size: u32) -> Self {
        self.pixel_size = pixel_size;
        self
    }

    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_colors(mut self, dark: [u8; 3], light: [u8; 3]) -> Self {
        self.dark = dark;
        self.light = light;
        self
    }

    /// Canvas edge length in pixels for a symbol of `grid_size` modules.
    pub fn total_size(&self, grid_size: u32) -> u32 {
        (grid_size + 2 * self.margin) * self.pixel_size
    }
}

fn hex_color([r, g, b]: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Returns SVG markup for the given QR Code: a background rectangle covering the
/// whole canvas and a single path holding one square per dark module.
/// The string always uses Unix newlines (\n), regardless of the platform.
pub fn to_svg_string(qr: &QrCode, options: &RenderOptions) -> String {
    let p = options.pixel_size;
    let total = options.total_size(qr.size() as u32);

    let mut result = String::new();
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    let _ = writeln!(
        result,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{0}\" height=\"{0}\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">",
        total
    );
    let _ = writeln!(
        result,
        "\t<rect width=\"{0}\" height=\"{0}\" fill=\"{1}\"/>",
        total,
        hex_color(options.light)
    );
    result += "\t<path d=\"";
    let mut first = true;
    for y in 0..qr.size() {
        for x in 0..qr.size() {
            if !qr.get_module(x, y) {
                continue;
            }
            if !first {
                result += " ";
            }
            first = false;
            let px = (x as u32 + options.margin) * p;
            let py = (y as u32 + options.margin) * p;
            let _ = write!(result, "M{},{}h{}v{}h-{}z", px, py, p, p, p);
        }
    }
    let _ = writeln!(result, "\" fill=\"{}\"/>", hex_color(options.dark));
    result += "</svg>\n";
    result
}

/// Wraps the SVG markup in a `data:image/svg+xml,` URL, percent-encoded.
pub fn to_data_url(qr: &QrCode, options: &RenderOptions) -> String {
    format!("data:image/svg+xml,{}", urlencoding::encode(&to_svg_string(qr, options)))
}

/// Rasterizes the QR Code at the same geometry as the SVG output.
pub fn to_image_buffer(qr: &QrCode, options: &RenderOptions) -> RgbImage {
    let total = options.total_size(qr.size() as u32);
    let margin = i64::from(options.margin);
    let pixel_size = i64::from(options.pixel_size.max(1));
    ImageBuffer::from_fn(total, total, |px, py| {
        let x = i64::from(px) / pixel_size - margin;
        let y = i64::from(py) / pixel_size - margin;
        let dark = i32::try_from(x)
            .ok()
            .zip(i32::try_from(y).ok())
            .is_some_and(|(x, y)| qr.get_module(x, y));
        Rgb(if dark { options.dark } else { options.light })
    })
}

/// Rasterizes the QR Code and writes it to `path`; the format follows the extension.
///
/// Missing parent directories are created.
pub fn save_image(qr: &QrCode, path: impl AsRef<Path>, options: &RenderOptions) -> Result<(), QrError> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }
    to_image_buffer(qr, options).save(path)?;
    Ok(())
}

/// Generates SVG markup for `text`.
///
/// `pixel_size` defaults to 8 and `margin` to 4. Text too long for version 10 is
/// truncated rather than rejected.
///
/// # Example
///
/// ```
/// use qrsvg::generate_qr_svg;
///
/// let svg = generate_qr_svg("Hello, World!", None, None);
/// assert!(svg.contains("viewBox=\"0 0 232 232\""));
/// ```
pub fn generate_qr_svg(text: &str, pixel_size: Option<u32>, margin: Option<u32>) -> String {
    let qr = QrCode::encode_text(text);
    to_svg_string(&qr, &RenderOptions::new(pixel_size, margin))
}

/// Generates a `data:image/svg+xml,` URL for `text`, ready for an `<img src>`.
///
/// # Example
///
/// ```
/// use qrsvg::generate_qr_data_url;
///
/// let url = generate_qr_data_url("https://example.com/invite/abc123", None, None);
/// assert!(url.starts_with("data:image/svg+xml,"));
/// ```
pub fn generate_qr_data_url(text: &str, pixel_size: Option<u32>, margin: Option<u32>) -> String {
    let qr = QrCode::encode_text(text);
    to_data_url(&qr, &RenderOptions::new(pixel_size, margin))
}

/// Generates a QR Code image buffer for `text`.
///
/// # Example
///
/// ```
/// use qrsvg::{helper::generate_image_buffer, RenderOptions};
///
/// let img = generate_image_buffer("Hello, World!", &RenderOptions::default().with_pixel_size(1));
/// assert_eq!(img.dimensions(), (29, 29));
/// ```
pub fn generate_image_buffer(text: &str, options: &RenderOptions) -> RgbImage {
    to_image_buffer(&QrCode::encode_text(text), options)
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_svg_string() {
        let qr = QrCode::encode_text("HELLO WORLD");
        let svg = to_svg_string(&qr, &RenderOptions::default());

        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(svg.contains("viewBox=\"0 0 232 232\""));
        assert!(svg.contains("<rect width=\"232\" height=\"232\" fill=\"#FFFFFF\"/>"));
        assert!(svg.contains("fill=\"#000000\"/>"));
        // top-left finder corner sits at the margin
        assert!(svg.contains("<path d=\"M32,32h8v8h-8z"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_one_square_per_dark_module() {
        let qr = QrCode::encode_text("count me");
        let svg = to_svg_string(&qr, &RenderOptions::default());
        let squares = svg.matches("h-8z").count();
        assert_eq!(squares, qr.matrix().modules().count_ones());
    }

    #[test]
    fn test_custom_colors() {
        let qr = QrCode::encode_text("colors");
        let options = RenderOptions::default().with_colors([0x12, 0x34, 0x56], [0xff, 0xee, 0xdd]);
        let svg = to_svg_string(&qr, &options);
        assert!(svg.contains("fill=\"#FFEEDD\""));
        assert!(svg.contains("fill=\"#123456\""));
    }

    #[test]
    fn test_render_options_new() {
        assert_eq!(RenderOptions::new(None, None), RenderOptions::default());
        let o = RenderOptions::new(Some(10), Some(2));
        assert_eq!((o.pixel_size, o.margin), (10, 2));
        assert_eq!(o.total_size(21), 250);
    }

    #[test]
    fn test_generate_image_buffer() {
        let img = generate_image_buffer("Hello, world!", &RenderOptions::default().with_pixel_size(1));

        // Version 1 (21 modules) plus a margin of 4 on each side
        assert_eq!(img.dimensions(), (29, 29));
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(img.get_pixel(4, 4), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_image_matches_modules() {
        let qr = QrCode::encode_text("raster");
        let options = RenderOptions::default().with_pixel_size(3).with_margin(1);
        let img = to_image_buffer(&qr, &options);
        assert_eq!(img.width(), (21 + 2) * 3);
        for y in 0..qr.size() {
            for x in 0..qr.size() {
                let px = (x as u32 + 1) * 3 + 1;
                let py = (y as u32 + 1) * 3 + 1;
                let expected = if qr.get_module(x, y) { [0, 0, 0] } else { [255, 255, 255] };
                assert_eq!(img.get_pixel(px, py).0, expected);
            }
        }
    }

    #[test]
    fn test_data_url_is_percent_encoded() {
        let qr = QrCode::encode_text("data url");
        let url = to_data_url(&qr, &RenderOptions::default());
        let body = url.strip_prefix("data:image/svg+xml,").unwrap();
        assert!(!body.contains('<') && !body.contains('"') && !body.contains(' '));
        let decoded = urlencoding::decode(body).unwrap();
        assert_eq!(decoded, to_svg_string(&qr, &RenderOptions::default()));
    }
}
