use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_books))
        .route("/", post(handler::create_book))
        .route("/:id", get(handler::get_book))
        .route("/:id", put(handler::update_book))
        .route("/:id", delete(handler::delete_book))
}
