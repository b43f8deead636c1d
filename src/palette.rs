//! Palette resolution.
//!
//! A PCX file can carry its colors in two places: a 256-entry table after a
//! `0x0C` marker at the very end of the file, or the 16-entry table inside
//! the header. The trailer always wins when its marker is present.

use alloc::vec::Vec;

use log::debug;

use crate::header::PcxHeader;

/// Marker byte preceding the 256-color trailer.
pub const PALETTE_MARKER: u8 = 0x0C;

/// Marker byte plus 256 RGB triples.
pub const TRAILER_LEN: usize = 1 + 256 * 3;

/// Where a resolved palette came from.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteSource {
    /// 256 entries following the `0x0C` marker at `len - 769`.
    Trailer256,
    /// Up to 16 entries from the header's embedded table.
    Header16,
    /// No applicable palette (true-color or unsupported layout).
    None,
}

/// Ordered RGB color table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
    source: PaletteSource,
}

impl Palette {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for palette index `index`, if present.
    pub fn get(&self, index: u8) -> Option<[u8; 3]> {
        self.colors.get(usize::from(index)).copied()
    }

    pub fn colors(&self) -> &[[u8; 3]] {
        &self.colors
    }

    pub fn source(&self) -> PaletteSource {
        self.source
    }

    fn empty() -> Self {
        Self {
            colors: Vec::new(),
            source: PaletteSource::None,
        }
    }
}

/// Offset of the trailer marker, if `data` ends with a 256-color palette.
pub(crate) fn trailer_offset(data: &[u8]) -> Option<usize> {
    let offset = data.len().checked_sub(TRAILER_LEN)?;
    (data[offset] == PALETTE_MARKER).then_some(offset)
}

/// Resolve the palette for `data`.
///
/// Checked in order: the 256-color trailer, then (for 4 bits per pixel or
/// fewer) the header table, else an empty palette. An empty palette is not
/// an error here; mapping pixels through it is.
pub fn resolve_palette(data: &[u8], header: &PcxHeader) -> Palette {
    if let Some(offset) = trailer_offset(data) {
        let colors: Vec<[u8; 3]> = data[offset + 1..]
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        debug!("pcx palette: 256-color trailer at offset {offset}");
        return Palette {
            colors,
            source: PaletteSource::Trailer256,
        };
    }

    if header.bits_per_pixel <= 4 {
        // Index 0 stays even when black; later all-zero entries are unused slots.
        let colors: Vec<[u8; 3]> = header
            .embedded_palette
            .iter()
            .enumerate()
            .filter(|&(i, rgb)| i == 0 || *rgb != [0, 0, 0])
            .map(|(_, rgb)| *rgb)
            .collect();
        debug!("pcx palette: {} entries from header", colors.len());
        return Palette {
            colors,
            source: PaletteSource::Header16,
        };
    }

    debug!(
        "pcx palette: none for {} bpp without trailer marker",
        header.bits_per_pixel
    );
    Palette::empty()
}
