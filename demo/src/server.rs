use std::net::SocketAddr;

use axum::Router;
use axum::routing::get;
use coded_error_axum::log_error_responses;
use coded_error_config::Config;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::items::{self, ItemStore};

/// Demo server with its routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    pub fn new(config: &Config) -> Self {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let mut app = items::router(ItemStore::default());

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(health));
        }

        let responder = config.responder.clone();
        app = app
            .layer(axum::middleware::from_fn(move |req, next| {
                let responder = responder.clone();
                async move { log_error_responses(responder, req, next).await }
            }))
            .layer(TraceLayer::new_for_http());

        Self { router: app, listen_address }
    }

    #[cfg(test)]
    pub fn into_router(self) -> Router {
        self.router
    }

    pub async fn serve(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;

        Ok(())
    }
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::response::Response;
    use http::{Request, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    async fn send(router: &Router, request: Request<Body>) -> Response {
        router.clone().oneshot(request).await.unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn router() -> Router {
        Server::new(&Config::default()).into_router()
    }

    #[tokio::test]
    async fn health_responds_ok() {
        let response = send(&router(), get_request("/health")).await;
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn health_can_be_disabled() {
        let config = Config::parse("[server.health]\nenabled = false\n").unwrap();
        let router = Server::new(&config).into_router();

        let response = send(&router, get_request("/health")).await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn created_item_can_be_fetched() {
        let router = router();

        let response = send(&router, post_json("/items", r#"{"name":" lamp "}"#)).await;
        assert_eq!(response.status(), 201);
        assert_eq!(json_body(response).await, json!({"id": 1, "name": "lamp"}));

        let response = send(&router, get_request("/items/1")).await;
        assert_eq!(response.status(), 200);
        assert_eq!(json_body(response).await, json!({"id": 1, "name": "lamp"}));
    }

    #[tokio::test]
    async fn unknown_item_is_not_found() {
        let response = send(&router(), get_request("/items/42")).await;
        assert_eq!(response.status(), 404);
        assert_eq!(json_body(response).await, json!({"code": 404, "message": "item 42 not found"}));
    }

    #[tokio::test]
    async fn malformed_id_is_invalid_argument() {
        let response = send(&router(), get_request("/items/lamp")).await;
        assert_eq!(response.status(), 400);
        assert_eq!(
            json_body(response).await,
            json!({"code": 400, "message": "item id must be a number"})
        );
    }

    #[tokio::test]
    async fn blank_name_returns_payload() {
        let response = send(&router(), post_json("/items", r#"{"name":"  "}"#)).await;
        assert_eq!(response.status(), 400);
        assert_eq!(
            json_body(response).await,
            json!({"field": "name", "reason": "must not be empty"})
        );
    }

    #[tokio::test]
    async fn internal_failure_hides_details() {
        let response = send(&router(), get_request("/fail")).await;
        assert_eq!(response.status(), 500);
        assert_eq!(
            json_body(response).await,
            json!({"code": 500, "message": "Internal Server Error"})
        );
    }
}
