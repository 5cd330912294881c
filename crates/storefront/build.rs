//! Build script for storefront crate.
//!
//! Generates a content-based hash of the static assets (CSS and JS) so the
//! page templates can bust browser caches with a `?v=` query parameter.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Static assets covered by the hash, relative to the crate root.
const HASHED_ASSETS: &[&str] = &["static/css/main.css", "static/js/app.js"];

fn main() {
    hash_assets();
}

/// Hash the static assets.
///
/// Sets `ASSET_HASH` environment variable for use with `env!("ASSET_HASH")`.
fn hash_assets() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");

    let mut hasher = Sha256::new();
    for asset in HASHED_ASSETS {
        let path = Path::new(&manifest_dir).join(asset);

        // Tell Cargo to rerun if the asset changes
        println!("cargo:rerun-if-changed={}", path.display());

        match fs::read(&path) {
            Ok(content) => hasher.update(&content),
            Err(e) => {
                println!("cargo:warning=Could not read {asset}: {e}");
            }
        }
    }

    // First 8 chars of SHA256 over all assets
    let hash = format!("{:x}", hasher.finalize());
    let short_hash = hash.get(..8).unwrap_or(&hash);

    // Set environment variable for compile-time access
    println!("cargo:rustc-env=ASSET_HASH={short_hash}");
}
