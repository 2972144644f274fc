//! Integration tests for the successful analysis path.

mod common;

use rust_decimal::Decimal;
use sneaker_lens_ui::{PROGRESS_COMPLETE, UiState, render_text};

#[tokio::test]
async fn analyze_success_tests_renders_identity_listings_and_chart() {
    let transport = common::ScriptedTransport::replying(200, common::AIR_JORDAN_BODY);
    let mut controller = common::controller_with(&transport);
    controller
        .select_image(common::png_input())
        .expect("png should be accepted");

    controller.analyze().await.expect("analysis should succeed");

    assert_eq!(controller.state(), UiState::Result);
    let header = controller.header().expect("header should be rendered");
    assert_eq!(header.name, "Air Jordan 1");
    assert_eq!(header.style_line, "Style Code: 555088-134");

    let rows = controller.listings().rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].price, "$150.50");
    assert_eq!(
        controller.result().map(|result| result.price_listings[0].price),
        Some(Decimal::new(1505, 1))
    );

    let chart = controller.chart().current().expect("chart should be rendered");
    assert_eq!(chart.points, vec![140.0, 150.5]);

    let text = render_text(&controller.snapshot());
    assert!(text.contains(PROGRESS_COMPLETE));
    assert!(text.contains("Air Jordan 1"));
    assert!(text.contains("Style Code: 555088-134"));
    assert!(text.contains("$150.50"));
}

#[tokio::test]
async fn analyze_success_tests_sends_data_uri_once() {
    let transport = common::ScriptedTransport::replying(200, common::AIR_JORDAN_BODY);
    let mut controller = common::controller_with(&transport);
    controller
        .select_image(common::png_input())
        .expect("png should be accepted");

    controller.analyze().await.expect("analysis should succeed");

    assert_eq!(transport.calls(), 1);
    let body = transport.last_body().expect("request should be captured");
    let image = body["image"].as_str().expect("image field should be a string");
    assert!(image.starts_with("data:image/png;base64,iVBORw0KGgo"));
    assert_eq!(body.as_object().map(|fields| fields.len()), Some(1));
}

#[tokio::test]
async fn analyze_success_tests_empty_listings_show_sentinel() {
    let body = common::AIR_JORDAN_BODY.replace(
        r#"{"name": "StockX", "logo": "x.png", "condition": "New", "size": "10", "price": 150.5}"#,
        "",
    );
    let transport = common::ScriptedTransport::replying(200, &body);
    let mut controller = common::controller_with(&transport);
    controller
        .select_image(common::png_input())
        .expect("png should be accepted");

    controller.analyze().await.expect("analysis should succeed");

    assert!(controller.listings().rows().is_empty());
    assert_eq!(
        controller.listings().empty_notice(),
        Some(sneaker_lens_ui::NO_LISTINGS_MESSAGE)
    );
    assert!(render_text(&controller.snapshot()).contains("No price listings found."));
}

#[tokio::test]
async fn analyze_success_tests_second_analysis_is_rejected_until_reset() {
    let transport = common::ScriptedTransport::replying(200, common::AIR_JORDAN_BODY);
    let mut controller = common::controller_with(&transport);
    controller
        .select_image(common::png_input())
        .expect("png should be accepted");
    controller.analyze().await.expect("analysis should succeed");

    assert!(controller.analyze().await.is_err());
    assert_eq!(controller.state(), UiState::Result);
    assert_eq!(transport.calls(), 1);
}
