//! SPICE composite image types.
//!
//! The display channel wraps its codecs in image-type envelopes (the
//! `SPICE_IMAGE_TYPE_*` constants of spice-protocol's `enums.h`).  This
//! module decodes the LZ/GLZ-related envelopes, wiring in the two provided
//! primitives the protocol composes around them:
//!
//! * `ZLIB_GLZ_RGB` — a GLZ frame compressed once more with zlib, prefixed
//!   by the 4-byte big-endian size of the inflated GLZ payload.
//! * `LZ4` — a sequence of 4-byte big-endian length-prefixed LZ4 blocks,
//!   linked: each block may reference the bytes the previous blocks produced.
//!
//! Both primitives are well-specified public algorithms; this crate never
//! reimplements them.

use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::error::{stream_error, DecodeError};
use crate::glz::{GlzDecoder, GlzHeader};
use crate::lz::header::read_be32;
use crate::lz::{decode_lz_frame, LzHeader};

// ─────────────────────────────────────────────────────────────────────────────
// Image types
// ─────────────────────────────────────────────────────────────────────────────

/// SPICE image-type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ImageType {
    Bitmap = 0,
    Quic = 1,
    Reserved = 2,
    LzPlt = 3,
    LzRgb = 4,
    GlzRgb = 5,
    FromCache = 6,
    Surface = 7,
    Jpeg = 8,
    FromCacheLossless = 9,
    ZlibGlzRgb = 10,
    JpegAlpha = 11,
    Lz4 = 12,
}

impl ImageType {
    /// Parse a wire tag.
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => ImageType::Bitmap,
            1 => ImageType::Quic,
            2 => ImageType::Reserved,
            3 => ImageType::LzPlt,
            4 => ImageType::LzRgb,
            5 => ImageType::GlzRgb,
            6 => ImageType::FromCache,
            7 => ImageType::Surface,
            8 => ImageType::Jpeg,
            9 => ImageType::FromCacheLossless,
            10 => ImageType::ZlibGlzRgb,
            11 => ImageType::JpegAlpha,
            12 => ImageType::Lz4,
            _ => return None,
        })
    }

    /// The wire tag for this image type.
    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// What a composite decode produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedImage {
    /// An LZ frame; carries the parsed frame header.
    Lz(LzHeader),
    /// A GLZ frame (possibly zlib-wrapped); carries the parsed frame header.
    Glz(GlzHeader),
    /// Raw bytes with no frame header of their own (LZ4 envelope).
    Raw {
        /// Bytes written to the output.
        len: usize,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Envelope decoders
// ─────────────────────────────────────────────────────────────────────────────

/// Decode a `ZLIB_GLZ_RGB` payload: inflate the zlib stream, then decode the
/// inflated bytes as one GLZ frame through `decoder`.
pub fn decode_zlib_glz(
    decoder: &mut GlzDecoder,
    data: &[u8],
    output: &mut [u8],
) -> Result<GlzHeader, DecodeError> {
    if data.len() < 4 {
        return stream_error();
    }
    let glz_size = read_be32(data, 0) as usize;
    let mut glz = Vec::new();
    glz.try_reserve_exact(glz_size)
        .map_err(|_| DecodeError::OutOfMemory)?;
    // Read one byte past the declared size so an over-long stream is caught.
    let mut inflater = ZlibDecoder::new(&data[4..]).take(glz_size as u64 + 1);
    inflater
        .read_to_end(&mut glz)
        .map_err(|_| DecodeError::CorruptedStream)?;
    if glz.len() != glz_size {
        return stream_error();
    }
    decoder.decode(&glz, output)
}

/// Decode an `LZ4` payload: length-prefixed LZ4 blocks, concatenated into
/// `output`.  Blocks are linked — each may back-reference the output of the
/// blocks before it.  Returns the total number of bytes written.
pub fn decode_lz4(data: &[u8], output: &mut [u8]) -> Result<usize, DecodeError> {
    let mut pos = 0usize;
    let mut written = 0usize;
    while pos < data.len() {
        if data.len() - pos < 4 {
            return stream_error();
        }
        let block_len = read_be32(data, pos) as usize;
        pos += 4;
        if block_len == 0 || block_len > data.len() - pos {
            return stream_error();
        }
        let (done, rest) = output.split_at_mut(written);
        let n = lz4_flex::block::decompress_into_with_dict(
            &data[pos..pos + block_len],
            rest,
            done,
        )
        .map_err(|e| match e {
            lz4_flex::block::DecompressError::OutputTooSmall { .. } => {
                DecodeError::OutputOverflow
            }
            _ => DecodeError::CorruptedStream,
        })?;
        written += n;
        pos += block_len;
    }
    Ok(written)
}

/// Decode one composite image payload into a caller-owned buffer.
///
/// Dispatches on the image type; tags outside the LZ/GLZ family are rejected
/// with [`DecodeError::InvalidImageType`] — bitmap, QUIC, JPEG and cache
/// lookups belong to other layers of the display pipeline.
pub fn decode_image(
    image_type: ImageType,
    data: &[u8],
    decoder: &mut GlzDecoder,
    output: &mut [u8],
) -> Result<DecodedImage, DecodeError> {
    match image_type {
        ImageType::LzRgb => decode_lz_frame(data, output).map(DecodedImage::Lz),
        ImageType::GlzRgb => decoder.decode(data, output).map(DecodedImage::Glz),
        ImageType::ZlibGlzRgb => decode_zlib_glz(decoder, data, output).map(DecodedImage::Glz),
        ImageType::Lz4 => decode_lz4(data, output).map(|len| DecodedImage::Raw { len }),
        other => Err(DecodeError::InvalidImageType(other.tag())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_type_tags_round_trip() {
        for tag in 0u8..=12 {
            assert_eq!(ImageType::from_tag(tag).unwrap().tag(), tag);
        }
        assert!(ImageType::from_tag(13).is_none());
    }

    #[test]
    fn non_lz_types_are_rejected() {
        let mut decoder = GlzDecoder::new();
        let mut out = [0u8; 4];
        for ty in [ImageType::Bitmap, ImageType::Quic, ImageType::Jpeg] {
            assert_eq!(
                decode_image(ty, &[], &mut decoder, &mut out),
                Err(DecodeError::InvalidImageType(ty.tag()))
            );
        }
    }

    #[test]
    fn zlib_glz_rejects_short_prefix() {
        let mut decoder = GlzDecoder::new();
        let mut out = [0u8; 4];
        assert_eq!(
            decode_zlib_glz(&mut decoder, &[0, 0, 1], &mut out),
            Err(DecodeError::CorruptedStream)
        );
    }

    #[test]
    fn lz4_rejects_truncated_block() {
        let mut out = [0u8; 16];
        // Declares an 8-byte block but carries only 2 bytes.
        let data = [0u8, 0, 0, 8, 0xAA, 0xBB];
        assert_eq!(
            decode_lz4(&data, &mut out),
            Err(DecodeError::CorruptedStream)
        );
    }
}
