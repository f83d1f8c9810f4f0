//! GLZ body decompression and the decoder facade.
//!
//! The GLZ body shares the LZ literal vocabulary and intra-image references,
//! and adds inter-image references that name pixels in prior frames through
//! the dictionary window.  RGBA frames carry two consecutive op streams: the
//! color body, then an alpha body decoded over the same output with only the
//! alpha byte of each pixel written.
//!
//! [`GlzDecoder`] owns the window and provides the one-call-per-frame entry
//! point: parse the header, run the body passes, register the decoded image
//! with the window, and advance eviction.

use crate::error::{overflow_error, stream_error, DecodeError};
use crate::glz::header::GlzHeader;
use crate::glz::window::{GlzDecoderWindow, WindowEntry};
use crate::lz::decode::{
    copy_alpha_bytes, copy_pixels, expand_bgr_literals, read_run_extension, read_u8,
    write_alpha_literals, MAX_COPY,
};
use crate::pixel::{flip_rows, PixelFormat, PIXEL_SIZE};

// ─────────────────────────────────────────────────────────────────────────────
// Body passes
// ─────────────────────────────────────────────────────────────────────────────

/// Which channel a body pass writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    /// B, G, R literal payload; alpha byte written as 0.
    Rgb,
    /// Second pass over an RGBA frame: alpha bytes only.
    AlphaOverlay,
    /// Standalone alpha frame (XXXA): alpha plus zeroed color bytes.
    AlphaOnly,
}

impl Pass {
    #[inline]
    fn is_alpha(self) -> bool {
        !matches!(self, Pass::Rgb)
    }
}

/// Decode one GLZ body pass from `input[at..]` into `out`.
///
/// `current_id` is the id of the frame being decoded; inter-image references
/// resolve against `window` as `current_id - image_dist`.  Returns the number
/// of input bytes consumed from `at`.
fn decode_body(
    window: &GlzDecoderWindow,
    current_id: u64,
    input: &[u8],
    at: usize,
    out: &mut [u8],
    pass: Pass,
) -> Result<usize, DecodeError> {
    debug_assert!(out.len() % PIXEL_SIZE == 0);
    let out_pixels = out.len() / PIXEL_SIZE;
    let mut pos = at;
    let mut op = 0usize;
    // Last inter-image resolution; consecutive references usually share an
    // image distance, so one window lookup serves a run of ops.
    let mut cached: Option<(u64, &[u8])> = None;

    while op < out_pixels {
        let ctrl = read_u8(input, &mut pos)?;

        // ── Literal run ───────────────────────────────────────────────────────
        if ctrl < MAX_COPY {
            let run = ctrl as usize + 1;
            if op + run > out_pixels {
                return overflow_error();
            }
            if pass == Pass::Rgb {
                if pos + 3 * run > input.len() {
                    return stream_error();
                }
                expand_bgr_literals(input, pos, out, op, run, 0);
                pos += 3 * run;
            } else {
                if pos + run > input.len() {
                    return stream_error();
                }
                write_alpha_literals(input, pos, out, op, run, pass == Pass::AlphaOnly);
                pos += run;
            }
            op += run;
            continue;
        }

        // ── Reference fields ──────────────────────────────────────────────────
        let mut len = (ctrl >> 5) as usize;
        if len == 7 {
            len = read_run_extension(input, &mut pos, len)?;
        }
        let pixel_flag = (ctrl >> 4) & 1;
        let mut pixel_ofs = (ctrl & 0x0F) as u64;
        let c1 = read_u8(input, &mut pos)?;
        pixel_ofs += (c1 as u64) << 4;
        let c2 = read_u8(input, &mut pos)?;
        let image_flag = (c2 >> 6) & 0x3;
        let mut image_dist: u64;
        if pixel_flag == 0 {
            image_dist = (c2 & 0x3F) as u64;
            for i in 0..image_flag {
                let b = read_u8(input, &mut pos)?;
                image_dist += (b as u64) << (6 + 8 * i as u32);
            }
        } else {
            let pixel_flag2 = (c2 >> 5) & 1;
            pixel_ofs += ((c2 & 0x1F) as u64) << 12;
            image_dist = 0;
            for i in 0..image_flag {
                let b = read_u8(input, &mut pos)?;
                image_dist += (b as u64) << (8 * i as u32);
            }
            if pixel_flag2 == 1 {
                let b = read_u8(input, &mut pos)?;
                pixel_ofs += (b as u64) << 17;
            }
        }

        // The alpha pass carries a +2 length bias on top of the +1.
        let count = len + if pass.is_alpha() { 3 } else { 1 };

        if image_dist == 0 {
            // ── Intra-image reference ─────────────────────────────────────────
            pixel_ofs += 1;
            let ofs = usize::try_from(pixel_ofs).map_err(|_| DecodeError::CorruptedStream)?;
            if pass == Pass::AlphaOverlay {
                copy_alpha_bytes(out, op, ofs, count)?;
            } else {
                copy_pixels(out, op, ofs, count)?;
            }
        } else {
            // ── Inter-image reference ─────────────────────────────────────────
            let view = match cached {
                Some((dist, view)) if dist == image_dist => view,
                _ => {
                    let view = window
                        .bits(current_id, image_dist, 0)
                        .ok_or(DecodeError::ReferenceNotFound)?;
                    cached = Some((image_dist, view));
                    view
                }
            };
            let src_pixels = view.len() / PIXEL_SIZE;
            if pixel_ofs > src_pixels as u64 {
                return Err(DecodeError::ReferenceNotFound);
            }
            let ofs = pixel_ofs as usize;
            if count > src_pixels - ofs {
                return stream_error();
            }
            if op + count > out_pixels {
                return overflow_error();
            }
            let src = ofs * PIXEL_SIZE;
            let dst = op * PIXEL_SIZE;
            if pass == Pass::AlphaOverlay {
                for i in 0..count {
                    out[dst + i * PIXEL_SIZE + 3] = view[src + i * PIXEL_SIZE + 3];
                }
            } else {
                out[dst..dst + count * PIXEL_SIZE]
                    .copy_from_slice(&view[src..src + count * PIXEL_SIZE]);
            }
        }
        op += count;
    }
    Ok(pos - at)
}

// ─────────────────────────────────────────────────────────────────────────────
// Decoder facade
// ─────────────────────────────────────────────────────────────────────────────

/// GLZ frame decoder bound to a dictionary window.
///
/// One decoder serves one frame stream: frames must be fed in monotonic id
/// order, and references always name smaller ids.  The decoder is not safe
/// for concurrent use; independent decoders with disjoint windows may run in
/// parallel.
pub struct GlzDecoder {
    window: GlzDecoderWindow,
}

impl GlzDecoder {
    /// Create a decoder with a fresh, empty window.
    pub fn new() -> Self {
        Self::with_window(GlzDecoderWindow::new())
    }

    /// Create a decoder bound to an existing window.
    pub fn with_window(window: GlzDecoderWindow) -> Self {
        GlzDecoder { window }
    }

    /// The decoder's window.
    #[inline]
    pub fn window(&self) -> &GlzDecoderWindow {
        &self.window
    }

    /// Clear the window, e.g. on session reset.
    pub fn reset(&mut self) {
        self.window.clear();
    }

    /// Tear down the decoder, handing back its window.
    pub fn into_window(self) -> GlzDecoderWindow {
        self.window
    }

    /// Decode one GLZ frame into a caller-owned buffer.
    ///
    /// Parses the header, verifies `output` holds at least
    /// `gross_pixels * 4` bytes, runs the color body (and the alpha body for
    /// RGBA frames), registers an owned copy of the decoded image with the
    /// window, and advances eviction.  Bottom-up frames are row-flipped after
    /// the window copy is taken, so window references always see pixels in
    /// encoding order and the caller always receives top-down output.
    ///
    /// On error the window is left unchanged and the output content is
    /// unspecified.
    pub fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<GlzHeader, DecodeError> {
        self.decode_impl(input, output, false)
    }

    /// Decode one GLZ frame, borrowing the caller's buffer for the window
    /// entry when the frame's retention hint is zero.
    ///
    /// A hint of zero marks the frame as terminal: no later frame will
    /// reference it, so the window can skip the owned copy and hold a view of
    /// `output` instead.
    ///
    /// # Safety
    /// The caller must keep `output` alive and unmoved for as long as the
    /// borrowed entry is live — conservatively, until the next call on this
    /// decoder returns, or until [`GlzDecoder::reset`] or drop.  The decoder
    /// itself only mutates the buffer through the row flip this call
    /// performs, which is covered by the hint's no-future-reference
    /// guarantee.
    pub unsafe fn decode_zero_copy(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<GlzHeader, DecodeError> {
        self.decode_impl(input, output, true)
    }

    fn decode_impl(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        zero_copy: bool,
    ) -> Result<GlzHeader, DecodeError> {
        let (header, body_at) = GlzHeader::parse(input)?;
        if (header.win_head_dist as u64) > header.id {
            return stream_error();
        }
        let need = header.byte_size();
        if output.len() < need {
            return Err(DecodeError::InvalidFrameSize);
        }
        let out = &mut output[..need];

        match header.format {
            PixelFormat::Rgb32 => {
                decode_body(&self.window, header.id, input, body_at, out, Pass::Rgb)?;
            }
            PixelFormat::Rgba => {
                // Two consecutive op streams: the alpha body starts where the
                // color body stopped.
                let rgb = decode_body(&self.window, header.id, input, body_at, out, Pass::Rgb)?;
                decode_body(
                    &self.window,
                    header.id,
                    input,
                    body_at + rgb,
                    out,
                    Pass::AlphaOverlay,
                )?;
            }
            PixelFormat::Xxxa => {
                decode_body(&self.window, header.id, input, body_at, out, Pass::AlphaOnly)?;
            }
        }

        let entry = if zero_copy && header.win_head_dist == 0 {
            // SAFETY: forwarded from `decode_zero_copy`'s contract — the
            // caller keeps `output` alive and unmoved while the entry lives.
            unsafe {
                WindowEntry::new_borrowed(
                    header.id,
                    header.win_head_dist,
                    header.gross_pixels,
                    out.as_ptr(),
                    need,
                )
            }
        } else {
            let mut copy = Vec::new();
            copy.try_reserve_exact(need)
                .map_err(|_| DecodeError::OutOfMemory)?;
            copy.extend_from_slice(out);
            WindowEntry::new_owned(
                header.id,
                header.win_head_dist,
                header.gross_pixels,
                copy.into_boxed_slice(),
            )
        };
        self.window.add(entry)?;
        self.window.release_from_tail();

        if !header.top_down {
            flip_rows(out, header.width as usize, header.height as usize);
        }
        Ok(header)
    }
}

impl Default for GlzDecoder {
    fn default() -> Self {
        Self::new()
    }
}
