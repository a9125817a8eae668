use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use config::Config;
use infrastructure::{ChatApi, FileStore};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

pub mod announcer;
pub mod chat_log;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod middleware;
pub mod models;
pub mod moderation;
pub mod roster;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub chat: Arc<dyn ChatApi>,
    pub store: Arc<dyn FileStore>,
    /// Serializes member syncs so overlapping runs never race on the snapshot.
    pub sync_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: Config, chat: Arc<dyn ChatApi>, store: Arc<dyn FileStore>) -> Self {
        Self {
            config,
            chat,
            store,
            sync_lock: Arc::new(Mutex::new(())),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(routes::webhook::receive_event))
        .route("/update_members", get(routes::members::update_members))
        .route("/ping", get(routes::ping::ping))
        .layer(axum::middleware::from_fn(middleware::log_errors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
