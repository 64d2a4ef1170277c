pub mod error;
pub mod handlers;

use std::future::Future;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

pub use error::ApiError;
pub use handlers::ApiState;

/// Largest register body accepted.
pub const MAX_REGISTER_BODY: usize = 16 * 1024;

/// Build the HTTP surface over `state`.
pub fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::handle_root))
        .route("/health", get(handlers::handle_health))
        .route(
            "/register/{device_id}",
            post(handlers::handle_register).layer(DefaultBodyLimit::max(MAX_REGISTER_BODY)),
        )
        .route("/lookup/{device_id}", get(handlers::handle_lookup))
        .route("/devices", get(handlers::handle_devices))
        .with_state(state)
        .layer(cors)
}

/// Serve on an already-bound listener until `shutdown` resolves.
/// In-flight requests are allowed to finish.
pub async fn serve<F>(listener: TcpListener, state: ApiState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "API listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
