//! PCX file header (first 128 bytes).

use core::fmt;

use log::debug;

use crate::error::PcxError;

/// Size of the fixed header; the pixel stream starts right after it.
pub const HEADER_LEN: usize = 128;

/// Offset and length of the 16-color palette stored inside the header.
const EMBEDDED_PALETTE_OFFSET: usize = 16;
const EMBEDDED_PALETTE_LEN: usize = 48;

/// Parsed PCX header.
///
/// Populated once from bytes 0–127. `width` and `height` are derived from
/// the window bounds and are always at least 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcxHeader {
    pub manufacturer: u8,
    pub version: u8,
    pub encoding: u8,
    pub bits_per_pixel: u8,
    pub x_min: u16,
    pub y_min: u16,
    pub x_max: u16,
    pub y_max: u16,
    pub h_dpi: u16,
    pub v_dpi: u16,
    /// 16 RGB triples from header bytes 16..64, present in every file.
    pub embedded_palette: [[u8; 3]; 16],
    pub planes: u8,
    pub bytes_per_line: u16,
    pub palette_info: u16,
    pub h_screen_size: u16,
    pub v_screen_size: u16,
    width: u32,
    height: u32,
}

impl PcxHeader {
    /// Parse the header from the start of `data`.
    ///
    /// Manufacturer and version are informational and not validated.
    pub fn parse(data: &[u8]) -> Result<Self, PcxError> {
        let h: &[u8; HEADER_LEN] = data
            .get(..HEADER_LEN)
            .and_then(|s| s.try_into().ok())
            .ok_or(PcxError::TruncatedHeader { actual: data.len() })?;

        let le16 = |off: usize| u16::from_le_bytes([h[off], h[off + 1]]);

        let x_min = le16(4);
        let y_min = le16(6);
        let x_max = le16(8);
        let y_max = le16(10);

        let width = i32::from(x_max) - i32::from(x_min) + 1;
        let height = i32::from(y_max) - i32::from(y_min) + 1;
        if width <= 0 || height <= 0 {
            return Err(PcxError::InvalidDimensions {
                x_min,
                x_max,
                y_min,
                y_max,
            });
        }

        let mut embedded_palette = [[0u8; 3]; 16];
        let region = &h[EMBEDDED_PALETTE_OFFSET..EMBEDDED_PALETTE_OFFSET + EMBEDDED_PALETTE_LEN];
        for (entry, rgb) in embedded_palette.iter_mut().zip(region.chunks_exact(3)) {
            entry.copy_from_slice(rgb);
        }

        let header = Self {
            manufacturer: h[0],
            version: h[1],
            encoding: h[2],
            bits_per_pixel: h[3],
            x_min,
            y_min,
            x_max,
            y_max,
            h_dpi: le16(12),
            v_dpi: le16(14),
            embedded_palette,
            planes: h[65],
            bytes_per_line: le16(66),
            palette_info: le16(68),
            h_screen_size: le16(70),
            v_screen_size: le16(72),
            width: width as u32,
            height: height as u32,
        };
        debug!(
            "pcx header: {}x{}, {} bpp, {} plane(s)",
            header.width, header.height, header.bits_per_pixel, header.planes
        );
        Ok(header)
    }

    /// Image width in pixels (`x_max - x_min + 1`).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels (`y_max - y_min + 1`).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether this header describes the one layout the decoder handles:
    /// 8 bits per pixel in a single plane.
    pub fn is_supported(&self) -> bool {
        self.bits_per_pixel == 8 && self.planes == 1
    }

    pub(crate) fn require_supported(&self) -> Result<(), PcxError> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(PcxError::UnsupportedPixelFormat {
                bits_per_pixel: self.bits_per_pixel,
                planes: self.planes,
            })
        }
    }
}

impl fmt::Display for PcxHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Manufacturer: {}", self.manufacturer)?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "Encoding: {}", self.encoding)?;
        writeln!(f, "Bits per Pixel: {}", self.bits_per_pixel)?;
        writeln!(f, "Dimensions: {}x{}", self.width, self.height)?;
        writeln!(f, "Color Planes: {}", self.planes)?;
        write!(f, "Bytes per Line: {}", self.bytes_per_line)
    }
}
