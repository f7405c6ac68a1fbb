//! Fuzz target for annotation XML parsing and box extraction.
//!
//! Feeds arbitrary bytes through both the polygon and the rbox extractors,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use geolabel::annotation::from_annotation_slice;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid excessive memory usage.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_annotation_slice(data);
});
