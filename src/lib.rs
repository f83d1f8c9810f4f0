//! `spicelz` — SPICE LZ/GLZ image decompression into 32-bit BGRA frames.
//!
//! The SPICE display channel streams two kinds of encoded frames in one
//! temporal sequence: self-contained LZ frames, and GLZ frames that reference
//! pixels of previously decoded frames through a shared dictionary window.
//! This crate turns that sequence into BGRA rasters written directly into
//! caller-owned buffers.
//!
//! # Crate layout
//!
//! | Module      | Contents |
//! |-------------|----------|
//! | `pixel`     | Pixel-format tags, BGRA addressing, row flipping. |
//! | `lz`        | LZ frame header and the op-stream decompression core. |
//! | `glz`       | GLZ header, dictionary window, decoder facade. |
//! | `composite` | SPICE image-type envelopes (zlib-GLZ, LZ4 primitives). |
//! | `error`     | The decode error taxonomy. |
//!
//! # Decoding frames
//!
//! ```
//! use spicelz::{GlzDecoder, PixelFormat};
//!
//! // A 1x1 GLZ frame: one literal pixel, id 1, retention hint 0.
//! let mut frame = Vec::new();
//! frame.extend_from_slice(b"  ZL");                       // magic
//! frame.extend_from_slice(&0x0001_0001u32.to_be_bytes()); // version
//! frame.push(0x10 | PixelFormat::Rgb32.tag());            // top-down RGB32
//! frame.extend_from_slice(&1u32.to_be_bytes());           // width
//! frame.extend_from_slice(&1u32.to_be_bytes());           // height
//! frame.extend_from_slice(&4u32.to_be_bytes());           // stride
//! frame.extend_from_slice(&1u64.to_be_bytes());           // id
//! frame.extend_from_slice(&0u32.to_be_bytes());           // win_head_dist
//! frame.extend_from_slice(&[0x00, 0x10, 0x20, 0x30]);     // literal B,G,R
//!
//! let mut decoder = GlzDecoder::new();
//! let mut output = [0u8; 4];
//! let header = decoder.decode(&frame, &mut output).unwrap();
//! assert_eq!(header.id, 1);
//! assert_eq!(output, [0x10, 0x20, 0x30, 0x00]);
//! ```
//!
//! Decoders are single-threaded: a [`GlzDecoder`] owns its window and must
//! not be shared without external synchronisation.  Frames must be fed in
//! monotonic id order.

pub mod composite;
pub mod error;
pub mod glz;
pub mod lz;
pub mod pixel;

// ── Top-level re-exports ──────────────────────────────────────────────────────

pub use composite::{decode_image, decode_lz4, decode_zlib_glz, DecodedImage, ImageType};
pub use error::DecodeError;
pub use glz::{GlzDecoder, GlzDecoderWindow, GlzHeader, GLZ_HEADER_SIZE, GLZ_MAGIC, GLZ_VERSION};
pub use lz::{decode_lz, decode_lz_frame, LzHeader, LZ_HEADER_SIZE, LZ_MAGIC, LZ_VERSION};
pub use pixel::{flip_rows, PixelFormat, PIXEL_SIZE};
