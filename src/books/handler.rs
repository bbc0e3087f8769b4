//! HTTP Handlers for the Books API

use axum::{
    Json,
    body::Bytes,
    extract::{
        Path, State,
        rejection::{BytesRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use libsql::Connection;
use serde::Serialize;

use super::Books;
use crate::api::Envelope;
use crate::error::ApiError;
use crate::handler::AppState;
use crate::model::NewBook;

type HandlerResult = Result<Response, ApiError>;
type IdParam = Result<Path<String>, PathRejection>;
type RawBody = Result<Bytes, BytesRejection>;

fn respond<T: Serialize>(status: StatusCode, body: Envelope<T>) -> Response {
    (status, Json(body)).into_response()
}

fn connect(state: &AppState) -> Result<Connection, ApiError> {
    state.db.connect().map_err(ApiError::Connect)
}

/// Checks for a body before attempting to decode it.
fn parse_body(body: &Bytes) -> Result<NewBook, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::MissingBody);
    }
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

pub async fn list_books(State(state): State<AppState>) -> HandlerResult {
    let conn = connect(&state)?;
    let books = Books::new(&conn).list().await?;

    tracing::info!(count = books.len(), "got books");
    Ok(respond(StatusCode::OK, Envelope::data(books)))
}

pub async fn get_book(State(state): State<AppState>, id: IdParam) -> HandlerResult {
    let Path(id) = id?;
    let conn = connect(&state)?;
    let Some(book) = Books::new(&conn).get(&id).await? else {
        return Err(ApiError::NotFound(id));
    };

    tracing::info!(id = %id, "got book");
    Ok(respond(StatusCode::OK, Envelope::data(book)))
}

pub async fn create_book(State(state): State<AppState>, body: RawBody) -> HandlerResult {
    let input = parse_body(&body?)?;

    let conn = connect(&state)?;
    Books::new(&conn).create(input).await?;

    tracing::info!("saved new book");
    Ok(respond(StatusCode::CREATED, Envelope::msg("a new book has been saved!")))
}

pub async fn update_book(State(state): State<AppState>, id: IdParam, body: RawBody) -> HandlerResult {
    let Path(id) = id?;
    let conn = connect(&state)?;
    let books = Books::new(&conn);

    if !books.exists(&id).await? {
        return Err(ApiError::NotFound(id));
    }
    let input = parse_body(&body?)?;
    // the row can go away between the check and the write
    if books.update(&id, input).await? == 0 {
        return Err(ApiError::NotFound(id));
    }

    tracing::info!(id = %id, "updated book");
    Ok(respond(
        StatusCode::OK,
        Envelope::msg(format!("data with id {} has been updated.", id)),
    ))
}

pub async fn delete_book(State(state): State<AppState>, id: IdParam) -> HandlerResult {
    let Path(id) = id?;
    let conn = connect(&state)?;
    let books = Books::new(&conn);

    if !books.exists(&id).await? || books.delete(&id).await? == 0 {
        return Err(ApiError::NotFound(id));
    }

    tracing::info!(id = %id, "deleted book");
    Ok(StatusCode::NO_CONTENT.into_response())
}
