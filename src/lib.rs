//! # qrsvg
//!
//! A small QR code encoder that renders to SVG.
//!
//! `qrsvg` turns a UTF-8 string (typically a shareable link) into a QR Code Model 2
//! symbol and draws it as SVG markup or a `data:` URL ready to drop into an `<img>`.
//! It covers the subset such links need: byte mode, error correction level L and
//! versions 1 to 10 (21×21 up to 57×57 modules, at most 271 bytes of payload).
//!
//! ## Features
//!
//! - Reed-Solomon error correction over GF(256), block interleaving.
//! - Automatic version selection and mask selection.
//! - SVG, `data:image/svg+xml` URL and raster (`image` crate) output.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qrsvg = "0.1"
//! ```
//!
//! ## Example
//!
//! ```rust
//! use qrsvg::{generate_qr_data_url, generate_qr_svg};
//!
//! let svg = generate_qr_svg("https://example.com/invite/abc123", None, None);
//! assert!(svg.contains("<path d=\"M"));
//!
//! let url = generate_qr_data_url("https://example.com/invite/abc123", Some(4), Some(2));
//! assert!(url.starts_with("data:image/svg+xml,"));
//! ```
//!
//! Text longer than version 10 can hold is truncated by the functions above. Use
//! [`QrCode::try_encode_text`] to get an error instead:
//!
//! ```rust
//! use qrsvg::{helper::to_svg_string, QrCode, RenderOptions};
//!
//! # fn main() -> Result<(), qrsvg::QrError> {
//! let qr = QrCode::try_encode_text("Hello, World!")?;
//! let svg = to_svg_string(&qr, &RenderOptions::default().with_margin(2));
//! # assert!(svg.ends_with("</svg>\n"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`qrcode`]: The encoding pipeline and the [`QrCode`] symbol.
//! - [`helper`]: SVG, data URL and raster rendering.
//! - [`gf`], [`reed_solomon`], [`version`], [`codewords`], [`matrix`], [`mask`],
//!   [`format`]: the individual encoding stages.

#![forbid(unsafe_code)]

pub mod codewords;
pub mod error;
pub mod format;
pub mod gf;
pub mod helper;
pub mod mask;
pub mod matrix;
pub mod qrcode;
pub mod reed_solomon;
pub mod version;

pub use error::QrError;
pub use helper::{generate_qr_data_url, generate_qr_svg, RenderOptions};
pub use mask::Mask;
pub use qrcode::QrCode;
pub use version::Version;
