//! Build script - places the nRF52840 memory layout where `link.x`
//! can `INCLUDE` it.

use std::env;
use std::fs;
use std::path::PathBuf;

const MEMORY_LAYOUT: &str = "memory.x";

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("cargo always sets OUT_DIR"));

    fs::copy(MEMORY_LAYOUT, out_dir.join(MEMORY_LAYOUT))
        .expect("memory.x missing from crate root");
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed={MEMORY_LAYOUT}");
    println!("cargo:rerun-if-changed=build.rs");
}
