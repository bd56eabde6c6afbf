/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for creator-dashboard-adapter tests

use creator_dashboard_adapter::{ClientConfig, CreatorClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> CreatorClient {
    CreatorClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init")
}

/// Reply body for a generate call that published successfully
pub fn published_reply(title: &str) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "message": "内容生成并发布成功",
        "data": {
            "title": title,
            "content": "body",
            "tags": ["tag"],
            "images": [],
            "publish_status": creator_dashboard_adapter::PUBLISH_SUCCESS_MARKER,
            "publish_time": "2026-10-01 09:30:00",
        },
    })
}
