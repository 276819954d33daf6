#![no_main]

//! Fuzz target for Verifier::verify_bytes()
//!
//! Wraps arbitrary text in a real PNG `watermark` field so the fuzzer reaches
//! token decoding and marker parsing, not just container parsing.
//!
//! Run with: cargo +nightly fuzz run fuzz_verify

use image::{DynamicImage, RgbImage};
use libfuzzer_sys::fuzz_target;
use stegatool_core::metadata::embed_text_field;
use stegatool_core::{BatchKey, Roster, Verifier, WATERMARK_FIELD};

fuzz_target!(|data: &[u8]| {
    let Ok(token) = std::str::from_utf8(data) else {
        return;
    };
    let image = DynamicImage::ImageRgb8(RgbImage::new(1, 1));
    // tEXt values must be Latin-1; the encoder rejects the rest
    let Ok(bytes) = embed_text_field(&image, WATERMARK_FIELD, token) else {
        return;
    };

    let verifier = Verifier::new(Roster::from_text("alice"), BatchKey::from_bytes([7u8; 32]));
    // Must never panic and never identify anyone without the key
    assert!(!verifier.verify_bytes("fuzz", &bytes).is_identified());
});
