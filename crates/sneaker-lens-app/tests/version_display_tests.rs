//! Integration tests for VERSION propagation into runtime display.

use sneaker_lens_app::app_version;

#[test]
fn version_display_tests_matches_root_version_file() {
    let root_version = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../VERSION"));
    assert_eq!(app_version(), root_version.trim());
}
