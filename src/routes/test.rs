//! Static test page for smoke-checking deployments.

use axum::response::Html;

/// Test page handler: a fixed HTML body confirming the service is reachable.
pub async fn test_page() -> Html<&'static str> {
    Html("<h1>InsideOut API is up and serving requests</h1>")
}
