//! # zenpcx
//!
//! Decoder for ZSoft PCX images with 8 bits per pixel in a single plane.
//!
//! A PCX file is a 128-byte header, a run-length-encoded stream of palette
//! indices, and (for 256-color images) a palette trailer: a `0x0C` marker
//! followed by 768 bytes of RGB at the very end of the file. Decoding maps
//! every index through the palette and returns a packed RGB8 raster along
//! with the parsed header and the palette that was applied.
//!
//! ## Palette resolution
//!
//! 1. If the byte at `len - 769` is `0x0C`, the last 768 bytes are a
//!    256-entry palette and the pixel stream ends at the marker.
//! 2. Otherwise, for 4 bits per pixel or fewer, the 16-entry table in the
//!    header is used (index 0 is always kept; later all-black slots are not).
//! 3. Otherwise there is no palette and any pixel fails to map.
//!
//! ## Non-Goals
//!
//! - Multi-plane (24-bit) and sub-byte pixel layouts: rejected with
//!   [`PcxError::UnsupportedPixelFormat`]
//! - Encoding
//! - Per-scanline `bytes_per_line` realignment: the index stream is read as
//!   one contiguous run and trailing padding is discarded
//!
//! ## Usage
//!
//! ```no_run
//! use zenpcx::Unstoppable;
//!
//! let data: &[u8] = &[]; // your PCX bytes
//!
//! // Header only, works for layouts the decoder rejects
//! let header = zenpcx::probe(data)?;
//! println!("{header}");
//!
//! let out = zenpcx::decode(data, Unstoppable)?;
//! assert_eq!(out.image.pixels().len(), (out.image.width() * out.image.height() * 3) as usize);
//! println!("{} palette entries from {:?}", out.palette.len(), out.palette.source());
//! # Ok::<(), zenpcx::PcxError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod assemble;
mod decode;
mod error;
mod header;
mod limits;
mod palette;
mod rle;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest, DecodedImage};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::PcxError;
pub use header::{HEADER_LEN, PcxHeader};
pub use limits::Limits;
pub use palette::{PALETTE_MARKER, Palette, PaletteSource, resolve_palette};

/// Decode a PCX file held in memory.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, PcxError> {
    DecodeRequest::new(data).decode(stop)
}

/// Parse the header without decoding pixels.
///
/// Unlike [`decode`], this accepts any bit depth and plane count.
pub fn probe(data: &[u8]) -> Result<PcxHeader, PcxError> {
    PcxHeader::parse(data)
}

/// Read a whole PCX file from `reader` and decode it.
#[cfg(feature = "std")]
pub fn decode_reader<R: std::io::Read>(
    mut reader: R,
    stop: impl Stop,
) -> Result<DecodeOutput, PcxError> {
    let mut data = alloc::vec::Vec::new();
    reader.read_to_end(&mut data)?;
    decode(&data, stop)
}
