//! HTTP transport for the schema.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQL;
use axum::{Json, Router, http::HeaderValue, response::Html, routing::get};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::schema::LedgerSchema;
use crate::config::ServerSettings;
use crate::error::{RegistryError, Result};

/// Router serving GraphQL (POST) and GraphiQL (GET) at `settings.path`,
/// plus `/health`.
pub fn router(schema: LedgerSchema, settings: &ServerSettings) -> Result<Router> {
    if !settings.path.starts_with('/') || settings.path == "/health" {
        return Err(RegistryError::Config(format!(
            "Invalid GraphQL path '{}'",
            settings.path
        )));
    }

    let endpoint = settings.path.clone();
    let graphiql = get(move || {
        let endpoint = endpoint.clone();
        async move { Html(GraphiQLSource::build().endpoint(&endpoint).finish()) }
    });

    Ok(Router::new()
        .route(&settings.path, graphiql.post_service(GraphQL::new(schema)))
        .route("/health", get(health))
        .layer(cors_layer(&settings.cors_origins))
        .layer(TraceLayer::new_for_http()))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Serve `app` on an already bound listener until Ctrl-C.
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

/// Bind `settings.socket_addr()` and serve the schema.
pub async fn run_server(schema: LedgerSchema, settings: &ServerSettings) -> Result<()> {
    let app = router(schema, settings)?;
    let listener = TcpListener::bind(settings.socket_addr()).await?;
    info!(addr = %listener.local_addr()?, path = %settings.path, "GraphQL server listening");
    serve(listener, app).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MakeCatalog;
    use crate::graphql::{AppState, build_schema};
    use crate::lookup::StaticModelLookup;
    use crate::storage::Registry;
    use std::sync::Arc;

    fn schema() -> LedgerSchema {
        build_schema(AppState::new(
            Registry::new(),
            MakeCatalog::default(),
            Arc::new(StaticModelLookup::new()),
        ))
    }

    #[test]
    fn test_router_rejects_relative_path() {
        let settings = ServerSettings {
            path: "graphql".to_string(),
            ..ServerSettings::default()
        };
        assert!(router(schema(), &settings).is_err());
    }

    #[test]
    fn test_router_accepts_default_settings() {
        let settings = ServerSettings {
            cors_origins: vec!["http://localhost:3000".to_string()],
            ..ServerSettings::default()
        };
        assert!(router(schema(), &settings).is_ok());
    }
}
