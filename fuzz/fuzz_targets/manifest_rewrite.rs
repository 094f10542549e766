//! Fuzz target for manifest parsing and piece renaming.
//!
//! Run with: cargo +nightly fuzz run manifest_rewrite
//!
//! Any manifest that parses must rewrite to a fixpoint: every piece name
//! carries the suffix, a second rewrite changes nothing, and the pretty
//! output parses back to the same manifest.

#![no_main]

use libfuzzer_sys::fuzz_target;
use minipack::archive::{Manifest, PIECE_SUFFIX};

fuzz_target!(|data: &[u8]| {
    let Ok(mut manifest) = Manifest::from_slice(data) else {
        return;
    };
    let original = manifest.clone();

    manifest.suffix_pieces();
    assert!(manifest.pieces().all(|p| p.name.ends_with(PIECE_SUFFIX)));
    assert_eq!(manifest.total_size, original.total_size);

    let mut again = manifest.clone();
    assert_eq!(again.suffix_pieces(), 0, "rewrite is not idempotent");

    let json = manifest.to_pretty_json().expect("serialize");
    let parsed = Manifest::from_slice(&json).expect("reparse");
    assert_eq!(parsed, manifest);
});
