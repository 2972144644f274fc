//! Integration tests for failed analyses.

mod common;

use sneaker_lens_app::{ControllerError, DECODE_FAILURE_MESSAGE, NO_IMAGE_MESSAGE};
use sneaker_lens_ui::{UiState, render_text};

async fn analyze_with(status: u16, body: &str) -> (sneaker_lens_app::UploadAnalyzeController, ControllerError) {
    let transport = common::ScriptedTransport::replying(status, body);
    let mut controller = common::controller_with(&transport);
    controller
        .select_image(common::png_input())
        .expect("png should be accepted");
    let error = controller.analyze().await.expect_err("analysis should fail");
    (controller, error)
}

#[tokio::test]
async fn analyze_failure_tests_uses_backend_error_message() {
    let (controller, error) = analyze_with(500, r#"{"error":"model unavailable"}"#).await;

    assert!(matches!(error, ControllerError::Backend { status: 500, .. }));
    assert_eq!(controller.state(), UiState::Error);
    assert_eq!(controller.error_message(), Some("model unavailable"));
    assert!(controller.result().is_none());
    assert!(controller.chart().current().is_none());
}

#[tokio::test]
async fn analyze_failure_tests_falls_back_to_status_message() {
    let (controller, _) = analyze_with(500, "Internal Server Error").await;

    assert_eq!(controller.state(), UiState::Error);
    assert_eq!(
        controller.error_message(),
        Some("Request failed with status 500")
    );
    assert_eq!(
        render_text(&controller.snapshot()),
        "Error: Request failed with status 500\n"
    );
}

#[tokio::test]
async fn analyze_failure_tests_malformed_success_surfaces_as_error() {
    let (controller, error) =
        analyze_with(200, r#"{"sneaker_info":{"name":"Air Jordan 1"}}"#).await;

    assert!(matches!(error, ControllerError::Decode(_)));
    assert_eq!(controller.state(), UiState::Error);
    assert_eq!(controller.error_message(), Some(DECODE_FAILURE_MESSAGE));
    assert!(controller.header().is_none());
    assert!(controller.listings().rows().is_empty());
}

#[tokio::test]
async fn analyze_failure_tests_network_failure_is_terminal() {
    let transport = common::ScriptedTransport::unreachable();
    let mut controller = common::controller_with(&transport);
    controller
        .select_image(common::png_input())
        .expect("png should be accepted");

    let error = controller.analyze().await.expect_err("analysis should fail");

    assert!(matches!(error, ControllerError::Network(_)));
    assert_eq!(controller.state(), UiState::Error);
    assert_eq!(
        controller.error_message(),
        Some("network failure: connection refused")
    );
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn analyze_failure_tests_requires_selection() {
    let transport = common::ScriptedTransport::replying(200, common::AIR_JORDAN_BODY);
    let mut controller = common::controller_with(&transport);

    let error = controller.analyze().await.expect_err("nothing is selected");

    assert!(matches!(error, ControllerError::NoImage));
    assert_eq!(controller.state(), UiState::Error);
    assert_eq!(controller.error_message(), Some(NO_IMAGE_MESSAGE));
    assert_eq!(transport.calls(), 0);
}
