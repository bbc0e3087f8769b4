//! Books Module
//!
//! CRUD over the single `books` table, exposed under `/a/v1/books`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bookstore::books;
//!
//! let app = Router::new()
//!     .nest("/a/v1/books", books::routes())
//!     .with_state(app_state);
//!
//! // Use the store directly
//! let conn = db.connect()?;
//! let all = books::Books::new(&conn).list().await?;
//! ```

mod handler;
mod lib;
mod routes;

pub use lib::*;
pub use routes::routes;

/// DDL for the `books` table. Safe to run on every startup.
pub fn schema() -> &'static str {
    include_str!("schema.sql")
}
