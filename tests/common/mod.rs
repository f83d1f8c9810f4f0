//! Shared test-side stream emitters.
//!
//! The crate ships no encoder, so the suites synthesize conformant LZ and GLZ
//! byte streams by hand: header builders plus op emitters for literal runs
//! and back-references in both the color and alpha vocabularies.

#![allow(dead_code)]

use spicelz::{GLZ_MAGIC, GLZ_VERSION, LZ_MAGIC, LZ_VERSION};

/// Build a 24-byte LZ frame header.
pub fn lz_header_bytes(format_tag: u8, top_down: bool, width: u32, height: u32) -> Vec<u8> {
    let mut h = Vec::with_capacity(24);
    h.extend_from_slice(&LZ_MAGIC.to_le_bytes());
    h.extend_from_slice(&LZ_VERSION.to_le_bytes());
    h.push(format_tag | if top_down { 0x10 } else { 0 });
    h.extend_from_slice(&[0, 0, 0]); // padding
    h.extend_from_slice(&width.to_be_bytes());
    h.extend_from_slice(&height.to_be_bytes());
    h.extend_from_slice(&(width * 4).to_be_bytes());
    h
}

/// Build a 33-byte GLZ frame header.
pub fn glz_header_bytes(
    format_tag: u8,
    top_down: bool,
    width: u32,
    height: u32,
    id: u64,
    win_head_dist: u32,
) -> Vec<u8> {
    let mut h = Vec::with_capacity(33);
    h.extend_from_slice(&GLZ_MAGIC.to_be_bytes());
    h.extend_from_slice(&GLZ_VERSION.to_be_bytes());
    h.push(format_tag | if top_down { 0x10 } else { 0 });
    h.extend_from_slice(&width.to_be_bytes());
    h.extend_from_slice(&height.to_be_bytes());
    h.extend_from_slice(&(width * 4).to_be_bytes());
    h.extend_from_slice(&id.to_be_bytes());
    h.extend_from_slice(&win_head_dist.to_be_bytes());
    h
}

/// Emit literal runs for B,G,R pixel triplets (32 pixels per op at most).
pub fn push_rgb_literals(out: &mut Vec<u8>, pixels: &[[u8; 3]]) {
    for chunk in pixels.chunks(32) {
        out.push((chunk.len() - 1) as u8);
        for px in chunk {
            out.extend_from_slice(px);
        }
    }
}

/// Emit literal runs for alpha bytes (32 pixels per op at most).
pub fn push_alpha_literals(out: &mut Vec<u8>, alphas: &[u8]) {
    for chunk in alphas.chunks(32) {
        out.push((chunk.len() - 1) as u8);
        out.extend_from_slice(chunk);
    }
}

/// Length field for a reference copying `count` pixels in the given pass.
fn length_field(count: usize, alpha_pass: bool) -> usize {
    let bias = if alpha_pass { 3 } else { 1 };
    assert!(count >= bias, "reference too short for this pass");
    count - bias
}

/// Emit the 255-terminated extension for a length field of 7 or more.
fn push_length_extension(out: &mut Vec<u8>, len_field: usize) {
    let mut rest = len_field - 7;
    while rest >= 255 {
        out.push(255);
        rest -= 255;
    }
    out.push(rest as u8);
}

/// Emit an LZ back-reference copying `count` pixels from `ofs` pixels behind
/// the cursor.
pub fn push_lz_ref(out: &mut Vec<u8>, count: usize, ofs: usize, alpha_pass: bool) {
    let len_field = length_field(count, alpha_pass);
    assert!(len_field >= 1, "control byte would not select a reference");
    let o = ofs - 1;
    if o < 8191 {
        out.push(((len_field.min(7) as u8) << 5) | (o >> 8) as u8);
        if len_field >= 7 {
            push_length_extension(out, len_field);
        }
        out.push((o & 0xFF) as u8);
    } else {
        // Escaped long offset: saturated 5-bit field, a 255 offset byte, then
        // the 16-bit big-endian remainder.
        out.push(((len_field.min(7) as u8) << 5) | 31);
        if len_field >= 7 {
            push_length_extension(out, len_field);
        }
        out.push(255);
        let far = o - 8191;
        assert!(far <= 0xFFFF);
        out.push((far >> 8) as u8);
        out.push((far & 0xFF) as u8);
    }
}

/// Emit a GLZ reference copying `count` pixels.
///
/// `image_dist == 0` encodes an intra-image reference `pixel_ofs` pixels
/// behind the cursor; a non-zero distance names a prior image and an
/// absolute pixel offset into it.  Uses the short (`pixel_flag == 0`)
/// encoding, which covers distances up to 63 and offsets up to 4095.
pub fn push_glz_ref(
    out: &mut Vec<u8>,
    count: usize,
    image_dist: u64,
    pixel_ofs: u64,
    alpha_pass: bool,
) {
    let len_field = length_field(count, alpha_pass);
    assert!(len_field >= 1, "control byte would not select a reference");
    let ofs = if image_dist == 0 {
        assert!(pixel_ofs >= 1);
        pixel_ofs - 1
    } else {
        pixel_ofs
    };
    assert!(ofs < 1 << 12, "offset needs the extended encoding");
    assert!(image_dist < 64, "distance needs the extended encoding");

    out.push(((len_field.min(7) as u8) << 5) | (ofs & 0x0F) as u8);
    if len_field >= 7 {
        push_length_extension(out, len_field);
    }
    out.push((ofs >> 4) as u8);
    out.push(image_dist as u8);
}
