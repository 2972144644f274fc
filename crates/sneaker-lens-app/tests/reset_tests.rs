//! Integration tests for reset semantics.

mod common;

use sneaker_lens_ui::UiState;

#[tokio::test]
async fn reset_tests_clears_everything_from_result_state() {
    let transport = common::ScriptedTransport::replying(200, common::AIR_JORDAN_BODY);
    let mut controller = common::controller_with(&transport);
    controller
        .select_image(common::png_input())
        .expect("png should be accepted");
    controller.analyze().await.expect("analysis should succeed");
    assert_eq!(controller.chart().live_charts(), 1);

    controller.reset();

    assert_eq!(controller.state(), UiState::Idle);
    assert!(controller.selected_image().is_none());
    assert!(controller.result().is_none());
    assert!(controller.header().is_none());
    assert!(controller.listings().rows().is_empty());
    assert_eq!(controller.chart().live_charts(), 0);
    assert!(controller.chart().current().is_none());
}

#[test]
fn reset_tests_is_idempotent_from_every_reachable_state() {
    let transport = common::ScriptedTransport::replying(200, common::AIR_JORDAN_BODY);
    let mut controller = common::controller_with(&transport);

    controller.reset();
    controller.reset();
    assert_eq!(controller.state(), UiState::Idle);

    controller
        .select_image(common::png_input())
        .expect("png should be accepted");
    controller.reset();
    assert_eq!(controller.state(), UiState::Idle);

    let _ = controller.select_image(common::text_input());
    assert_eq!(controller.state(), UiState::Error);
    controller.reset();
    controller.reset();
    assert_eq!(controller.state(), UiState::Idle);
    assert!(controller.error_message().is_none());
}
