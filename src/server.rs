use crate::routes::{create_handler, list_handler, root_handler};
use crate::service::SubmissionService;
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use log::info;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal::{self, ctrl_c};
use tower_http::cors::{Any, CorsLayer};

pub fn router(service: Arc<SubmissionService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(root_handler))
        .route("/api/sightings", get(list_handler).post(create_handler))
        .layer(cors)
        .with_state(service)
}

pub async fn start_server(service: Arc<SubmissionService>, port: u16) -> std::io::Result<()> {
    let app = router(service);

    let address = format!("0.0.0.0:{}", port);
    info!("Binding to {}", address);

    let listener = TcpListener::bind(&address).await?;
    info!("Tick backend listening on http://localhost:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        } else {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
