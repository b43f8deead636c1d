use crate::error::PcxError;
use crate::header::PcxHeader;

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit). Checked against the parsed
/// header before the pixel stream is touched.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the RGB8 output buffer (3 bytes per pixel).
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    pub(crate) fn check(&self, header: &PcxHeader) -> Result<(), PcxError> {
        let width = u64::from(header.width());
        let height = u64::from(header.height());

        let exceeded = |what: &str, value: u64, max: u64| {
            PcxError::LimitExceeded(alloc::format!("{what} {value} exceeds limit {max}"))
        };

        if let Some(max_w) = self.max_width {
            if width > max_w {
                return Err(exceeded("width", width, max_w));
            }
        }
        if let Some(max_h) = self.max_height {
            if height > max_h {
                return Err(exceeded("height", height, max_h));
            }
        }
        let pixels = width * height;
        if let Some(max_px) = self.max_pixels {
            if pixels > max_px {
                return Err(exceeded("pixel count", pixels, max_px));
            }
        }
        if let Some(max_mem) = self.max_memory_bytes {
            let bytes = pixels * 3;
            if bytes > max_mem {
                return Err(exceeded("output buffer bytes", bytes, max_mem));
            }
        }
        Ok(())
    }
}
