//! PCX run-length decoding.
//!
//! A byte with both high bits set is a run header: its low 6 bits are a
//! repeat count for the byte that follows. Anything else is a literal.

use alloc::vec::Vec;

use enough::Stop;
use log::debug;

use crate::error::PcxError;

const RUN_FLAG: u8 = 0xC0;
const COUNT_MASK: u8 = 0x3F;

/// Expand `data[start..end]` into palette indices.
///
/// Decoding never reads at or past `end`; a run header whose data byte
/// would lie there is a truncated stream. At most `cap` indices are kept.
/// The rest of the stream is still scanned so framing errors surface.
pub(crate) fn decode_rle(
    data: &[u8],
    start: usize,
    end: usize,
    cap: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PcxError> {
    let end = end.min(data.len());
    let stream = data.get(start..end).unwrap_or(&[]);

    // Each input byte yields at most 63 indices.
    let mut out = Vec::with_capacity(cap.min(stream.len().saturating_mul(63)));
    let mut discarded = 0usize;

    let mut pos = 0;
    let mut check_counter = 0u32;
    while pos < stream.len() {
        check_counter = check_counter.wrapping_add(1);
        if check_counter % 4096 == 0 {
            stop.check()?;
        }

        let byte = stream[pos];
        if byte & RUN_FLAG == RUN_FLAG {
            let value = *stream
                .get(pos + 1)
                .ok_or(PcxError::TruncatedRleStream { offset: start + pos })?;
            let count = usize::from(byte & COUNT_MASK);
            let kept = count.min(cap - out.len());
            out.resize(out.len() + kept, value);
            discarded = discarded.saturating_add(count - kept);
            pos += 2;
        } else {
            if out.len() < cap {
                out.push(byte);
            } else {
                discarded = discarded.saturating_add(1);
            }
            pos += 1;
        }
    }

    debug!(
        "pcx rle: {} stream bytes at {start}..{end} -> {} indices, {discarded} past the image",
        stream.len(),
        out.len()
    );
    Ok(out)
}
