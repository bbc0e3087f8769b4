use std::sync::Arc;

use axum::{Json, response::IntoResponse};
use tracing::info;

use crate::api::Envelope;
use crate::db::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(Envelope::msg("ok"))
}
