//! Embeds the workspace `VERSION` file as `SNEAKER_LENS_VERSION`.

use std::path::Path;

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir");
    let version_path = Path::new(&manifest_dir)
        .ancestors()
        .nth(2)
        .expect("workspace root above crates/")
        .join("VERSION");

    println!("cargo:rerun-if-changed={}", version_path.display());

    let version = std::fs::read_to_string(&version_path)
        .unwrap_or_else(|error| panic!("read {}: {error}", version_path.display()));
    let version = version.trim();

    let well_formed = !version.is_empty()
        && version
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));
    assert!(well_formed, "VERSION must look like MAJOR.MINOR.PATCH, got {version:?}");

    println!("cargo:rustc-env=SNEAKER_LENS_VERSION={version}");
}
