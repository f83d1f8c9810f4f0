//! LZ image decompression.
//!
//! The LZ codec is the intra-frame half of the SPICE image pipeline: a
//! byte-oriented back-reference format derived from FastLZ, extended with
//! pixel-granular copies and per-format literal payloads (spice-common's
//! `lz.c` / `lz_decompress_tmpl.c`).  Every op either emits a literal run of
//! pixels or copies previously written pixels from a distance behind the
//! output cursor.
//!
//! # Submodules
//!
//! * [`header`] — the 24-byte frame header used by LZ frame files.
//! * [`decode`] — the op-stream state machine and the copy primitives shared
//!   with the GLZ decoder.

pub mod decode;
pub mod header;

pub use decode::decode_lz;
pub use header::{LzHeader, LZ_HEADER_SIZE, LZ_MAGIC, LZ_VERSION};

use crate::error::DecodeError;

/// Decode a complete LZ frame (header + body) into `output`.
///
/// Parses the [`LzHeader`], decodes the body per the header's pixel format,
/// and row-flips the result when the frame was encoded bottom-up.  Returns
/// the parsed header so the caller learns the frame geometry.
pub fn decode_lz_frame(frame: &[u8], output: &mut [u8]) -> Result<LzHeader, DecodeError> {
    let header = LzHeader::parse(frame)?;
    decode_lz(
        header.width,
        header.height,
        &frame[LZ_HEADER_SIZE..],
        header.format,
        header.top_down,
        output,
    )?;
    Ok(header)
}
