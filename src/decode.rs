use alloc::vec::Vec;

use enough::Stop;
use log::debug;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::assemble::assemble;
use crate::error::PcxError;
use crate::header::{HEADER_LEN, PcxHeader};
use crate::limits::Limits;
use crate::palette::{Palette, resolve_palette, trailer_offset};
use crate::rle::decode_rle;

/// RGB raster produced by a decode. Owns its pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl DecodedImage {
    pub(crate) fn new(pixels: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed RGB8 pixels, row-major, `width * height * 3` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Color at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = (y as usize * self.width as usize + x as usize) * 3;
        let p = self.pixels.get(off..off + 3)?;
        Some([p[0], p[1], p[2]])
    }

    /// Reinterpret pixel data as typed RGB8 pixels.
    #[cfg(feature = "rgb")]
    pub fn as_rgb(&self) -> &[rgb::RGB8] {
        self.pixels().as_pixels()
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, rgb::RGB8> {
        imgref::ImgRef::new(self.as_rgb(), self.width as usize, self.height as usize)
    }

    /// Copy into an [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGB8> {
        imgref::ImgVec::new(
            self.as_rgb().to_vec(),
            self.width as usize,
            self.height as usize,
        )
    }
}

/// Everything a decode produces: the parsed header, the palette that was
/// applied, and the RGB raster.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    pub header: PcxHeader,
    pub palette: Palette,
    pub image: DecodedImage,
}

/// Decode request builder.
///
/// ```no_run
/// use zenpcx::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your PCX bytes
/// let limits = Limits {
///     max_pixels: Some(4096 * 4096),
///     ..Default::default()
/// };
/// let out = DecodeRequest::new(data).with_limits(&limits).decode(Unstoppable)?;
/// println!("{}x{}", out.image.width(), out.image.height());
/// # Ok::<(), zenpcx::PcxError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Run the decode: header, palette, pixel stream, then assembly.
    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, PcxError> {
        decode_with(self.data, self.limits, &stop)
    }
}

fn decode_with(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, PcxError> {
    let header = PcxHeader::parse(data)?;
    header.require_supported()?;

    let (width, height) = (header.width(), header.height());
    let required = (width as usize)
        .checked_mul(height as usize)
        .ok_or(PcxError::DimensionsTooLarge { width, height })?;
    if let Some(limits) = limits {
        limits.check(&header)?;
    }
    stop.check()?;

    let palette = resolve_palette(data, &header);
    // The pixel stream ends where the 256-color trailer begins, if there is one.
    let stream_end = trailer_offset(data).unwrap_or(data.len());
    debug!("pcx stream: {HEADER_LEN}..{stream_end} of {} bytes", data.len());

    let indices = decode_rle(data, HEADER_LEN, stream_end, required, stop)?;
    let image = assemble(&header, &palette, &indices, stop)?;

    Ok(DecodeOutput {
        header,
        palette,
        image,
    })
}
