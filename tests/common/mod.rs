//! Shared helpers for integration tests

#![allow(dead_code)]

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Same builders the unit tests use
#[path = "../../src/extract/fixtures.rs"]
mod fixtures;

pub use fixtures::{docx, pdf, xlsx_from_sheet_data};

pub const PDF_MIME: &str = "application/pdf";
pub const WORD_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const EXCEL_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Mounts a GET route answering 200 with the given body and content type
pub async fn serve(server: &MockServer, route: &str, content_type: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .insert_header("content-type", content_type),
        )
        .mount(server)
        .await;
}

/// Mounts a GET route answering with a bare status code
pub async fn serve_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// A URL on localhost where nothing is expected to listen
pub fn unreachable_url() -> String {
    "http://127.0.0.1:9/unreachable".to_string()
}
