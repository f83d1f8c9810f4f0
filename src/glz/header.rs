//! The GLZ frame header.
//!
//! GLZ frames are prefixed by a fixed-layout, fully big-endian header: magic,
//! version, a type+flags byte, the frame geometry, the 64-bit monotonic image
//! id, and the retention hint consumed by the decoder window.

use crate::error::DecodeError;
use crate::lz::header::{read_be32, read_be64, FLAG_TOP_DOWN, TYPE_MASK};
use crate::pixel::{PixelFormat, PIXEL_SIZE};

// ─────────────────────────────────────────────────────────────────────────────
// Wire constants
// ─────────────────────────────────────────────────────────────────────────────

/// `"  ZL"` interpreted as a big-endian `u32`.
pub const GLZ_MAGIC: u32 = 0x2020_5A4C;

/// The only supported GLZ format version.
pub const GLZ_VERSION: u32 = 0x0001_0001;

/// Total header size in bytes.
pub const GLZ_HEADER_SIZE: usize = 33;

// ─────────────────────────────────────────────────────────────────────────────
// Header
// ─────────────────────────────────────────────────────────────────────────────

/// Decoded GLZ frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlzHeader {
    /// Monotonic per-stream image identifier.
    pub id: u64,
    /// On-wire pixel format of the body.
    pub format: PixelFormat,
    /// `true` when rows are stored top-down.
    pub top_down: bool,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// `width * height`: the pixel count of the frame.
    pub gross_pixels: u64,
    /// Retention hint: how far back any future frame may reference from this
    /// frame's position.  The encoder guarantees `win_head_dist <= id`.
    pub win_head_dist: u32,
}

impl GlzHeader {
    /// Parse the header at the start of `src`.  Returns the header and the
    /// number of bytes consumed ([`GLZ_HEADER_SIZE`]).
    pub fn parse(src: &[u8]) -> Result<(Self, usize), DecodeError> {
        if src.len() < GLZ_HEADER_SIZE {
            return Err(DecodeError::CorruptedStream);
        }
        if read_be32(src, 0) != GLZ_MAGIC {
            return Err(DecodeError::InvalidMagic);
        }
        if read_be32(src, 4) != GLZ_VERSION {
            return Err(DecodeError::InvalidVersion);
        }
        let type_flags = src[8];
        let format = PixelFormat::from_tag(type_flags & TYPE_MASK)?;
        let width = read_be32(src, 9);
        let height = read_be32(src, 13);
        // Stride at offset 17 is declared by the encoder but not used here.
        let id = read_be64(src, 21);
        let win_head_dist = read_be32(src, 29);

        let gross_pixels = width as u64 * height as u64;
        // Reject frames whose byte size cannot be addressed.
        if gross_pixels
            .checked_mul(PIXEL_SIZE as u64)
            .and_then(|n| usize::try_from(n).ok())
            .is_none()
        {
            return Err(DecodeError::InvalidFrameSize);
        }
        Ok((
            GlzHeader {
                id,
                format,
                top_down: type_flags & FLAG_TOP_DOWN != 0,
                width,
                height,
                gross_pixels,
                win_head_dist,
            },
            GLZ_HEADER_SIZE,
        ))
    }

    /// Required output size in bytes for this frame.
    #[inline]
    pub fn byte_size(&self) -> usize {
        (self.gross_pixels as usize) * PIXEL_SIZE
    }
}
