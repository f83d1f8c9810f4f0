#![no_main]
use libfuzzer_sys::fuzz_target;
use spicelz::{decode_lz, decode_lz_frame, PixelFormat};

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary bytes through the LZ body decoder in every pixel format.
    // Err results are expected and fine; what we verify is no panics or UB.
    for format in [PixelFormat::Rgb32, PixelFormat::Rgba, PixelFormat::Xxxa] {
        let mut out = vec![0u8; 64 * 64 * 4];
        let _ = decode_lz(64, 64, data, format, false, &mut out);
    }

    // A tiny frame stresses the output-overflow paths.
    {
        let mut out = vec![0u8; 4];
        let _ = decode_lz(1, 1, data, PixelFormat::Rgb32, true, &mut out);
    }

    // And the header parser in front of it.
    {
        let mut out = vec![0u8; 4096];
        let _ = decode_lz_frame(data, &mut out);
    }
});
