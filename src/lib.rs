use axum::{routing::get, Router};

pub mod config;
pub mod error;
pub mod openelectricity;
pub mod routes;
pub mod tariff;

#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub config: config::Config,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index::handler))
        .route("/average-price", get(routes::average_price::handler))
        .with_state(state)
}
