//! Shared fixtures for app integration tests.

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sneaker_lens_app::UploadAnalyzeController;
use sneaker_lens_core::ImageInput;
use sneaker_lens_upload::{AnalysisTransport, AnalyzeClient, TransportResponse, UploadError};
use url::Url;

/// Success body for the Air Jordan 1 scenario.
#[allow(dead_code)]
pub const AIR_JORDAN_BODY: &str = r#"{
    "sneaker_info": {"name": "Air Jordan 1", "style_code": "555088-134"},
    "price_listings": [
        {"name": "StockX", "logo": "x.png", "condition": "New", "size": "10", "price": 150.5}
    ],
    "price_history": {"labels": ["Jan", "Feb"], "data": [140, 150.5]}
}"#;

/// Creates a small valid PNG input.
#[allow(dead_code)]
pub fn png_input() -> ImageInput {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(image::RgbImage::new(2, 2))
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("png fixture should encode");
    ImageInput::new("aj1.png", Some("image/png"), bytes)
}

/// Creates a non-image input.
#[allow(dead_code)]
pub fn text_input() -> ImageInput {
    ImageInput::new("notes.txt", Some("text/plain"), b"not a sneaker".to_vec())
}

/// Transport answering every request with one scripted reply.
#[derive(Debug)]
pub struct ScriptedTransport {
    reply: Option<(u16, String)>,
    calls: AtomicUsize,
    bodies: Mutex<Vec<Vec<u8>>>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    /// Replies with `status` and `body`.
    pub fn replying(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some((status, body.to_string())),
            calls: AtomicUsize::new(0),
            bodies: Mutex::new(Vec::new()),
        })
    }

    /// Fails every request at the network layer.
    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
            bodies: Mutex::new(Vec::new()),
        })
    }

    /// Number of requests received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Last request body as JSON.
    pub fn last_body(&self) -> Option<serde_json::Value> {
        self.bodies
            .lock()
            .expect("body lock should work")
            .last()
            .map(|body| serde_json::from_slice(body).expect("request body should be json"))
    }
}

#[async_trait]
impl AnalysisTransport for ScriptedTransport {
    async fn post_json(
        &self,
        endpoint: &Url,
        body: Vec<u8>,
    ) -> Result<TransportResponse, UploadError> {
        assert_eq!(endpoint.path(), "/api/analyze");
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies.lock().expect("body lock should work").push(body);

        match &self.reply {
            Some((status, body)) => Ok(TransportResponse {
                status: *status,
                body: body.clone(),
            }),
            None => Err(UploadError::Network("connection refused".to_string())),
        }
    }
}

/// Creates a controller backed by `transport`.
#[allow(dead_code)]
pub fn controller_with(transport: &Arc<ScriptedTransport>) -> UploadAnalyzeController {
    let client = AnalyzeClient::new("https://api.example.test", transport.clone())
        .expect("client should build");
    UploadAnalyzeController::new(client)
}
