#![no_main]

use libfuzzer_sys::fuzz_target;
use sfx::{decode_bytes, EncodeConfig};

fuzz_target!(|data: &[u8]| {
    // Malformed streams must fail with an error, never panic
    let _ = decode_bytes(data, &EncodeConfig::default());
});
