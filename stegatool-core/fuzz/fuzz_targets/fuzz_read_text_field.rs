#![no_main]

//! Fuzz target for metadata::read_text_field()
//!
//! Suspect images come from untrusted sources. Arbitrary bytes, with or
//! without a PNG signature, must produce `Ok` or `Err` and never panic.
//!
//! Run with: cargo +nightly fuzz run fuzz_read_text_field

use libfuzzer_sys::fuzz_target;
use stegatool_core::metadata::read_text_field;
use stegatool_core::WATERMARK_FIELD;

fuzz_target!(|data: &[u8]| {
    let _ = read_text_field(data, WATERMARK_FIELD);
});
