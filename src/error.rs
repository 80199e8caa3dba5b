use thiserror::Error;

/// Errors from the strict encoding API and from file output.
///
/// Ways to handle [`QrError::DataTooLong`]:
///
/// - Shorten the text, e.g. use a shorter link.
/// - Fall back to [`QrCode::encode_text`](crate::QrCode::encode_text), which clamps to
///   version 10 and truncates.
/// - Propagate the error upward to the caller/user.
#[derive(Debug, Error)]
pub enum QrError {
    #[error("data length = {len} bytes, max capacity = {capacity} bytes")]
    DataTooLong { len: usize, capacity: usize },

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
