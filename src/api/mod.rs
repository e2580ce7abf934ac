pub mod assets;
pub mod server;
pub mod vocabs;

use axum::{
    http::HeaderMap,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router / 构建路由
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(vocabs::index))
        .route("/api/health", get(server::health_check))
        .route("/vocabs", get(vocabs::list_vocabs))
        .route("/vocabs", post(vocabs::create_vocab))
        .route("/vocabs", delete(vocabs::delete_vocabs))
        .route("/vocabs/count", get(vocabs::count_vocabs))
        .route("/vocabs/new", get(vocabs::new_vocab_form))
        .route("/vocabs/:id", get(vocabs::get_vocab))
        .route("/vocabs/:id", delete(vocabs::delete_vocab))
        .route("/static/*path", get(assets::serve_asset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// htmx partial request (not boosted, not a history restore) / 是否为片段请求
pub fn is_fragment_request(headers: &HeaderMap) -> bool {
    let flag = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
    flag("hx-request") && !flag("hx-boosted") && !flag("hx-history-restore-request")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_is_fragment_request() {
        let mut headers = HeaderMap::new();
        assert!(!is_fragment_request(&headers));

        headers.insert("hx-request", HeaderValue::from_static("true"));
        assert!(is_fragment_request(&headers));

        headers.insert("hx-boosted", HeaderValue::from_static("true"));
        assert!(!is_fragment_request(&headers));

        let mut restore = HeaderMap::new();
        restore.insert("hx-request", HeaderValue::from_static("true"));
        restore.insert("hx-history-restore-request", HeaderValue::from_static("true"));
        assert!(!is_fragment_request(&restore));
    }
}
