use alloc::string::String;
use enough::StopReason;

/// Errors from PCX decoding.
///
/// Every variant is terminal: malformed input is not retried.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PcxError {
    #[error("truncated header: need 128 bytes, got {actual}")]
    TruncatedHeader { actual: usize },

    #[error("invalid dimensions: x {x_min}..={x_max}, y {y_min}..={y_max}")]
    InvalidDimensions {
        x_min: u16,
        x_max: u16,
        y_min: u16,
        y_max: u16,
    },

    #[error("unsupported pixel format: {bits_per_pixel} bits per pixel, {planes} plane(s)")]
    UnsupportedPixelFormat { bits_per_pixel: u8, planes: u8 },

    #[error("truncated RLE stream: run header at offset {offset} has no data byte")]
    TruncatedRleStream { offset: usize },

    #[error("insufficient pixel data: need {expected} indices, decoded {actual}")]
    InsufficientPixelData { expected: usize, actual: usize },

    #[error("palette index {index} out of range (palette has {palette_len} entries) at pixel {pixel}")]
    PaletteIndexOutOfRange {
        index: u8,
        palette_len: usize,
        pixel: usize,
    },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StopReason> for PcxError {
    fn from(r: StopReason) -> Self {
        PcxError::Cancelled(r)
    }
}
