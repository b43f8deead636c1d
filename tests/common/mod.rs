//! Synthetic PCX builders shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};

use zenpcx::{Stop, StopReason};

pub const MARKER: u8 = 0x0C;

/// Standard PCX run-length encoding of `indices` (runs of at most 63;
/// lone values >= 0xC0 still need a run header).
pub fn rle_encode(indices: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < indices.len() {
        let value = indices[i];
        let mut run = 1;
        while run < 63 && i + run < indices.len() && indices[i + run] == value {
            run += 1;
        }
        if run > 1 || value >= 0xC0 {
            out.push(0xC0 | run as u8);
        }
        out.push(value);
        i += run;
    }
    out
}

/// 128-byte header for a `width` x `height` image.
pub fn header(width: u16, height: u16, bpp: u8, planes: u8) -> Vec<u8> {
    let mut h = vec![0u8; 128];
    h[0] = 0x0A; // ZSoft
    h[1] = 5;
    h[2] = 1;
    h[3] = bpp;
    h[8..10].copy_from_slice(&(width - 1).to_le_bytes());
    h[10..12].copy_from_slice(&(height - 1).to_le_bytes());
    h[12..14].copy_from_slice(&300u16.to_le_bytes());
    h[14..16].copy_from_slice(&300u16.to_le_bytes());
    h[65] = planes;
    h[66..68].copy_from_slice(&width.to_le_bytes());
    h[68..70].copy_from_slice(&1u16.to_le_bytes());
    h
}

/// Palette where entry `i` is `(i, 255 - i, i ^ 0x55)`.
pub fn test_palette() -> Vec<[u8; 3]> {
    (0..=255u8).map(|i| [i, 255 - i, i ^ 0x55]).collect()
}

/// Append the `0x0C` marker and a 256-color palette.
pub fn push_trailer(data: &mut Vec<u8>, palette: &[[u8; 3]]) {
    assert_eq!(palette.len(), 256);
    data.push(MARKER);
    for rgb in palette {
        data.extend_from_slice(rgb);
    }
}

/// Complete 8-bit, single-plane file for `indices` with the test palette.
pub fn pcx8(width: u16, height: u16, indices: &[u8]) -> Vec<u8> {
    let mut data = header(width, height, 8, 1);
    data.extend_from_slice(&rle_encode(indices));
    push_trailer(&mut data, &test_palette());
    data
}

/// Expected RGB8 output for `indices` through the test palette.
pub fn expected_rgb(indices: &[u8]) -> Vec<u8> {
    let palette = test_palette();
    indices
        .iter()
        .flat_map(|&i| palette[usize::from(i)])
        .collect()
}

pub fn gradient(w: usize, h: usize) -> Vec<u8> {
    (0..w * h).map(|i| ((i % w) * 255 / w.max(1)) as u8).collect()
}

pub fn noise(len: usize) -> Vec<u8> {
    let mut state: u32 = 0xDEAD_BEEF;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

/// Passes `allowed` checks, then reports cancellation. Every call is
/// counted in `calls`.
pub struct StopAfter<'a> {
    pub allowed: u32,
    pub calls: &'a AtomicU32,
}

impl Stop for StopAfter<'_> {
    fn check(&self) -> Result<(), StopReason> {
        if self.calls.fetch_add(1, Ordering::Relaxed) < self.allowed {
            Ok(())
        } else {
            Err(StopReason::Cancelled)
        }
    }
}
