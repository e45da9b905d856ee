//! Generates `include/toy_runtime.h` from the `extern "C"` surface.

use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=cbindgen.toml");
    println!("cargo:rerun-if-env-changed=DOCS_RS");

    // docs.rs builds from a read-only source tree.
    if std::env::var_os("DOCS_RS").is_some() {
        return;
    }

    let crate_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap());
    let config = cbindgen::Config::from_file(crate_dir.join("cbindgen.toml"))
        .expect("failed to read cbindgen.toml");

    let include_dir = crate_dir.join("include");
    std::fs::create_dir_all(&include_dir).expect("failed to create include/ directory");

    cbindgen::generate_with_config(&crate_dir, config)
        .expect("cbindgen failed to generate bindings")
        .write_to_file(include_dir.join("toy_runtime.h"));
}
