//! Build script for the web crate.
//!
//! Fingerprints the stylesheet so templates can link `main.{hash}.css`
//! and the file can be cached forever.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

const HASH_LEN: usize = 8;

fn main() {
    fingerprint_stylesheet();
    println!("cargo:rerun-if-changed=migrations");
}

/// Copy `static/css/main.css` to `static/css/derived/main.{hash}.css`.
///
/// Exposes the hash as `CSS_HASH` for `env!("CSS_HASH")`. An empty hash
/// means templates fall back to the unhashed file.
fn fingerprint_stylesheet() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let static_dir = Path::new(&manifest_dir).join("static/css");
    let source = static_dir.join("main.css");

    println!("cargo:rerun-if-changed={}", source.display());

    let Ok(content) = fs::read(&source) else {
        println!("cargo:warning=main.css not found, serving it unhashed");
        println!("cargo:rustc-env=CSS_HASH=");
        return;
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let hash = digest.get(..HASH_LEN).unwrap_or(&digest);
    println!("cargo:rustc-env=CSS_HASH={hash}");

    let derived = static_dir.join("derived");
    fs::create_dir_all(&derived).expect("failed to create static/css/derived");
    fs::write(derived.join(format!("main.{hash}.css")), &content)
        .expect("failed to write hashed stylesheet");
}
