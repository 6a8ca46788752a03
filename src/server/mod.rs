mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::location::TimezoneResolver;

pub fn build_router(resolver: TimezoneResolver) -> Router {
    let state = Arc::new(AppState { resolver });

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/zones", get(handlers::zone_list))
        .route("/api/zones/{*identifier}", get(handlers::zone))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, resolver: TimezoneResolver) {
    // Pay the parse before accepting connections.
    resolver.preload();

    let app = build_router(resolver);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    tracing::info!("zonepin server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Server error: {}", e);
            std::process::exit(1);
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::DatasetSource;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    const SAMPLE: &str = "\
DE\t+5230+01322\tEurope/Berlin\tmost of Germany
DE\t+4742+00841\tEurope/Busingen\tBusingen
US\t+404251-0740023\tAmerica/New_York\tEastern (most areas)
";

    fn router() -> Router {
        build_router(TimezoneResolver::with_source(DatasetSource::Inline(SAMPLE.into())))
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let resp = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_router_zone_with_slash() {
        let (status, json) = get_json("/api/zones/America/New_York").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["identifier"], "America/New_York");
        assert_eq!(json["country_code"], "US");
    }

    #[tokio::test]
    async fn test_router_unknown_zone() {
        let (status, json) = get_json("/api/zones/Etc/UTC").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["code"], 404);
    }

    #[tokio::test]
    async fn test_router_country_list() {
        let (status, json) = get_json("/api/zones?country=de").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["identifiers"],
            serde_json::json!(["Europe/Berlin", "Europe/Busingen"])
        );
    }
}
