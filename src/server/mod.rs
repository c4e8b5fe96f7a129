mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::Extension, routing::any, Router};

use crate::api::API;
use crate::server::handlers::places;

pub type DynAPI = Arc<dyn API + Send + Sync>;

pub fn app<T: API + Sync + Send + 'static>(api: T) -> Router {
    let api = Arc::new(api) as DynAPI;

    Router::new()
        .route("/api/extract", any(places::extract))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(
    api: T,
    addr: SocketAddr,
) -> Result<(), hyper::Error> {
    let app = app(api);

    tracing::info!("listening on {}", addr);

    axum::Server::try_bind(&addr)?
        .serve(app.into_make_service())
        .await
}
