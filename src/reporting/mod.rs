//! Reporting views.
//!
//! Mounted only when a reporting-capable adapter is selected. The views
//! report which adapter backs them; report generation itself lives with the
//! backend, not here.

pub mod handlers;

use axum::routing::get;

use crate::app::{Adapter, Blueprint};
use self::handlers::{index, status};

/// Blueprint name used for registration and lookups.
pub const NAME: &str = "reporting";

pub const INDEX_PATH: &str = "/reporting";
pub const STATUS_PATH: &str = "/reporting/status";

/// Build the reporting blueprint for the given adapter.
pub fn blueprint(adapter: Adapter) -> Blueprint {
    Blueprint::builder(NAME)
        .route(INDEX_PATH, get(index))
        .route(STATUS_PATH, get(status))
        .with_state(adapter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    #[test]
    fn test_declares_its_paths() {
        assert_eq!(blueprint(Adapter::Random).paths(), &[INDEX_PATH, STATUS_PATH]);
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_index_names_adapter() {
        let router = blueprint(Adapter::Mysql).into_router();
        let (status, body) = get_json(router, INDEX_PATH).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["blueprint"], "reporting");
        assert_eq!(body["adapter"], "MYSQL");
        assert_eq!(body["endpoints"][1], STATUS_PATH);
    }

    #[tokio::test]
    async fn test_status() {
        let router = blueprint(Adapter::Random).into_router();
        let (status, body) = get_json(router, STATUS_PATH).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "status": "ok", "adapter": "RANDOM" }));
    }
}
