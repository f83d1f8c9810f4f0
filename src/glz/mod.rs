//! GLZ ("global LZ") image decompression.
//!
//! GLZ extends the LZ op vocabulary with an *inter-image* distance: a
//! back-reference may name pixels in any prior decoded frame still held in a
//! shared dictionary window, keyed by how many frames back the target lies
//! (spice-gtk's `decode-glz.c`).  Frames arrive in monotonic id order; each
//! carries a retention hint that drives tail-based eviction of the window.
//!
//! # Submodules
//!
//! * [`header`] — the big-endian GLZ frame header.
//! * [`window`] — the dictionary window of retained decoded images.
//! * [`decode`] — the body grammar and the [`GlzDecoder`] facade.

pub mod decode;
pub mod header;
pub mod window;

pub use decode::GlzDecoder;
pub use header::{GlzHeader, GLZ_HEADER_SIZE, GLZ_MAGIC, GLZ_VERSION};
pub use window::{GlzDecoderWindow, WindowEntry};
