//! Integration tests for image selection.

mod common;

use sneaker_lens_app::{ControllerError, INVALID_FILE_MESSAGE};
use sneaker_lens_ui::{UiState, render_text};

#[test]
fn select_image_tests_rejects_non_image_file() {
    let transport = common::ScriptedTransport::replying(200, common::AIR_JORDAN_BODY);
    let mut controller = common::controller_with(&transport);

    let error = controller
        .select_image(common::text_input())
        .expect_err("text file must be rejected");

    assert!(matches!(error, ControllerError::InvalidFile(_)));
    assert!(error.to_string().contains("valid image file"));
    assert_eq!(controller.state(), UiState::Error);
    assert_eq!(controller.error_message(), Some(INVALID_FILE_MESSAGE));
    assert!(controller.selected_image().is_none());
    assert!(!controller.analyze_enabled());
}

#[test]
fn select_image_tests_accepts_image_and_enables_analyze() {
    let transport = common::ScriptedTransport::replying(200, common::AIR_JORDAN_BODY);
    let mut controller = common::controller_with(&transport);

    let preview = controller
        .select_image(common::png_input())
        .expect("png should be accepted")
        .clone();

    assert_eq!(preview.dimensions, Some((2, 2)));
    assert_eq!(controller.state(), UiState::ImageSelected);
    assert!(controller.analyze_enabled());
    assert!(render_text(&controller.snapshot()).contains("Selected aj1.png (image/png, 2x2"));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn select_image_tests_reselect_replaces_selection() {
    let transport = common::ScriptedTransport::replying(200, common::AIR_JORDAN_BODY);
    let mut controller = common::controller_with(&transport);
    controller
        .select_image(common::png_input())
        .expect("png should be accepted");

    let mut second = common::png_input();
    second.file_name = "other.png".to_string();
    controller
        .select_image(second)
        .expect("second png should be accepted");

    assert_eq!(controller.state(), UiState::ImageSelected);
    assert_eq!(
        controller.selected_image().map(|image| image.file_name()),
        Some("other.png")
    );
}

#[test]
fn select_image_tests_drop_takes_first_file() {
    let transport = common::ScriptedTransport::replying(200, common::AIR_JORDAN_BODY);
    let mut controller = common::controller_with(&transport);

    let none = controller
        .select_first(Vec::new())
        .expect("empty drop should be ignored");
    assert!(none.is_none());
    assert_eq!(controller.state(), UiState::Idle);

    controller
        .select_first(vec![common::png_input(), common::text_input()])
        .expect("first dropped file is a png");
    assert_eq!(controller.state(), UiState::ImageSelected);
}

#[test]
fn select_image_tests_invalid_reselect_clears_prior_selection() {
    let transport = common::ScriptedTransport::replying(200, common::AIR_JORDAN_BODY);
    let mut controller = common::controller_with(&transport);
    controller
        .select_image(common::png_input())
        .expect("png should be accepted");
    assert_eq!(controller.state(), UiState::ImageSelected);

    let error = controller
        .select_image(common::text_input())
        .expect_err("text file must be rejected");

    assert!(matches!(error, ControllerError::InvalidFile(_)));
    assert_eq!(controller.state(), UiState::Error);
    assert!(controller.selected_image().is_none());
    assert!(!controller.analyze_enabled());
    assert_eq!(controller.snapshot().preview, None);
    assert_eq!(
        render_text(&controller.snapshot()),
        format!("Error: {INVALID_FILE_MESSAGE}\n")
    );
}
