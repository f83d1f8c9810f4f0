//! Decode error taxonomy.
//!
//! Every failure the LZ/GLZ decoders can produce is one of the kinds below.
//! Errors are surfaced immediately and terminate the current frame; no partial
//! output is considered valid, and a failed decode never leaves a partially
//! constructed entry in the decoder window.

use core::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by the LZ and GLZ decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A frame header did not start with the `"  ZL"` magic.
    InvalidMagic,
    /// A frame header carried a version other than `0x0001_0001`.
    InvalidVersion,
    /// The pixel-format tag is outside the supported set {8, 9, 10}.
    InvalidImageType(u8),
    /// Declared dimensions overflow, or the caller's output buffer is smaller
    /// than `width * height * 4` bytes.
    InvalidFrameSize,
    /// The encoded stream is malformed or truncated: a literal payload or a
    /// variable-length field runs past the end of the input, an intra-image
    /// reference reaches before the start of the output, or an inter-image
    /// reference runs past the end of its source image.
    CorruptedStream,
    /// An inter-image reference targets an id not present in the window, or
    /// an image whose pixel count is smaller than the requested offset.
    ReferenceNotFound,
    /// A fully decoded op would write past the end of the caller's output.
    OutputOverflow,
    /// Window growth or an owned entry copy could not allocate.
    OutOfMemory,
}

impl DecodeError {
    /// Stable name string for the error kind.
    pub fn error_name(&self) -> &'static str {
        match self {
            DecodeError::InvalidMagic => "invalid_magic",
            DecodeError::InvalidVersion => "invalid_version",
            DecodeError::InvalidImageType(_) => "invalid_image_type",
            DecodeError::InvalidFrameSize => "invalid_frame_size",
            DecodeError::CorruptedStream => "corrupted_stream",
            DecodeError::ReferenceNotFound => "reference_not_found",
            DecodeError::OutputOverflow => "output_overflow",
            DecodeError::OutOfMemory => "out_of_memory",
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidMagic => f.write_str("invalid frame magic"),
            DecodeError::InvalidVersion => f.write_str("unsupported frame version"),
            DecodeError::InvalidImageType(tag) => {
                write!(f, "invalid image type tag {tag}")
            }
            DecodeError::InvalidFrameSize => f.write_str("invalid frame size"),
            DecodeError::CorruptedStream => f.write_str("corrupted stream"),
            DecodeError::ReferenceNotFound => {
                f.write_str("referenced image not found in window")
            }
            DecodeError::OutputOverflow => f.write_str("output buffer overflow"),
            DecodeError::OutOfMemory => f.write_str("out of memory"),
        }
    }
}

impl std::error::Error for DecodeError {}

// ─────────────────────────────────────────────────────────────────────────────
// Shared error constructors
//
// The decode loops return through these so the hot paths stay free of
// `Err(...)` construction noise.
// ─────────────────────────────────────────────────────────────────────────────

/// The catch-all for malformed or truncated input.
#[inline(always)]
pub(crate) fn stream_error<T>() -> Result<T, DecodeError> {
    Err(DecodeError::CorruptedStream)
}

/// A fully decoded op does not fit in the remaining output.
#[inline(always)]
pub(crate) fn overflow_error<T>() -> Result<T, DecodeError> {
    Err(DecodeError::OutputOverflow)
}
