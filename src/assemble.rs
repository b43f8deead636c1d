//! Map decoded palette indices to an RGB raster.

use alloc::vec::Vec;

use enough::Stop;
use log::debug;

use crate::decode::DecodedImage;
use crate::error::PcxError;
use crate::header::PcxHeader;
use crate::palette::Palette;

/// Build the RGB8 raster for `header` from `indices`.
///
/// Indices past `width * height` are row padding and are dropped.
pub(crate) fn assemble(
    header: &PcxHeader,
    palette: &Palette,
    indices: &[u8],
    stop: &dyn Stop,
) -> Result<DecodedImage, PcxError> {
    header.require_supported()?;

    let width = header.width();
    let height = header.height();
    let w = width as usize;
    let required = w
        .checked_mul(height as usize)
        .ok_or(PcxError::DimensionsTooLarge { width, height })?;
    let out_bytes = required
        .checked_mul(3)
        .ok_or(PcxError::DimensionsTooLarge { width, height })?;

    if indices.len() < required {
        return Err(PcxError::InsufficientPixelData {
            expected: required,
            actual: indices.len(),
        });
    }
    if indices.len() > required {
        debug!("pcx assemble: discarding {} trailing indices", indices.len() - required);
    }

    let colors = palette.colors();
    let mut out = Vec::with_capacity(out_bytes);
    for (row_idx, row) in indices[..required].chunks_exact(w).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for (x, &index) in row.iter().enumerate() {
            let rgb = colors
                .get(usize::from(index))
                .ok_or(PcxError::PaletteIndexOutOfRange {
                    index,
                    palette_len: colors.len(),
                    pixel: row_idx * w + x,
                })?;
            out.extend_from_slice(rgb);
        }
    }

    Ok(DecodedImage::new(out, width, height))
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use core::sync::atomic::{AtomicU32, Ordering};

    use enough::{StopReason, Unstoppable};

    use super::*;
    use crate::header::HEADER_LEN;
    use crate::palette::{PALETTE_MARKER, resolve_palette};

    /// 3x2 8-bit file with a grayscale trailer palette and no pixel stream.
    fn gray_file(bpp: u8, planes: u8) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data[3] = bpp;
        data[8] = 2; // x_max
        data[10] = 1; // y_max
        data[65] = planes;
        data.push(PALETTE_MARKER);
        for i in 0..=255u8 {
            data.extend_from_slice(&[i, i, i]);
        }
        data
    }

    /// Passes `allowed` checks, then reports cancellation.
    struct StopAfter {
        allowed: u32,
        calls: AtomicU32,
    }

    impl Stop for StopAfter {
        fn check(&self) -> Result<(), StopReason> {
            if self.calls.fetch_add(1, Ordering::Relaxed) < self.allowed {
                Ok(())
            } else {
                Err(StopReason::Cancelled)
            }
        }
    }

    fn stop_after(allowed: u32) -> StopAfter {
        StopAfter {
            allowed,
            calls: AtomicU32::new(0),
        }
    }

    fn parts(data: &[u8]) -> (PcxHeader, Palette) {
        let header = PcxHeader::parse(data).unwrap();
        let palette = resolve_palette(data, &header);
        (header, palette)
    }

    #[test]
    fn maps_row_major() {
        let data = gray_file(8, 1);
        let (header, palette) = parts(&data);
        let image = assemble(&header, &palette, &[0, 1, 2, 10, 20, 30], &Unstoppable).unwrap();
        assert_eq!((image.width(), image.height()), (3, 2));
        assert_eq!(image.pixels().len(), 18);
        assert_eq!(image.pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(image.pixel(2, 0), Some([2, 2, 2]));
        assert_eq!(image.pixel(0, 1), Some([10, 10, 10]));
        assert_eq!(image.pixel(2, 1), Some([30, 30, 30]));
        assert_eq!(image.pixel(3, 0), None);
    }

    #[test]
    fn excess_indices_are_dropped() {
        let data = gray_file(8, 1);
        let (header, palette) = parts(&data);
        let image = assemble(&header, &palette, &[7; 9], &Unstoppable).unwrap();
        assert_eq!(image.pixels(), &[7u8; 18][..]);
    }

    #[test]
    fn short_index_stream() {
        let data = gray_file(8, 1);
        let (header, palette) = parts(&data);
        match assemble(&header, &palette, &[1, 2, 3, 4, 5], &Unstoppable) {
            Err(PcxError::InsufficientPixelData { expected: 6, actual: 5 }) => {}
            other => panic!("expected InsufficientPixelData, got {other:?}"),
        }
    }

    #[test]
    fn rejects_other_layouts() {
        for (bpp, planes) in [(4, 1), (8, 3), (1, 4)] {
            let data = gray_file(bpp, planes);
            let (header, palette) = parts(&data);
            assert!(matches!(
                assemble(&header, &palette, &[0; 6], &Unstoppable),
                Err(PcxError::UnsupportedPixelFormat { .. })
            ));
        }
    }

    #[test]
    fn index_past_palette_end() {
        let mut data = gray_file(8, 1);
        // drop the trailer: 8-bit without marker resolves to an empty palette
        data.truncate(HEADER_LEN);
        let (header, palette) = parts(&data);
        assert!(palette.is_empty());
        match assemble(&header, &palette, &[0; 6], &Unstoppable) {
            Err(PcxError::PaletteIndexOutOfRange {
                index: 0,
                palette_len: 0,
                pixel: 0,
            }) => {}
            other => panic!("expected PaletteIndexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn polls_stop_every_16_rows() {
        let mut data = gray_file(8, 1);
        data[10] = 16; // y_max: 17 rows
        let (header, palette) = parts(&data);
        let indices = [1u8; 3 * 17];

        // rows 0 and 16 are checked
        assert!(assemble(&header, &palette, &indices, &stop_after(2)).is_ok());
        assert!(matches!(
            assemble(&header, &palette, &indices, &stop_after(1)),
            Err(PcxError::Cancelled(StopReason::Cancelled))
        ));

        data[10] = 15; // 16 rows: only row 0 is checked
        let (header, palette) = parts(&data);
        assert!(assemble(&header, &palette, &indices[..3 * 16], &stop_after(1)).is_ok());
    }
}
