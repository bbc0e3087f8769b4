use libsql::{Connection, Value};
use std::collections::HashMap;

use crate::error::StoreError;
use crate::model::{Book, NewBook};

/// A decoded row keyed by column name, as reported by the driver.
pub type Record = HashMap<String, Value>;

pub type StoreResult<T> = Result<T, StoreError>;

pub struct Books<'a> {
    conn: &'a Connection,
}

impl<'a> Books<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> StoreResult<Vec<Book>> {
        let mut rows = self.conn.query("SELECT * FROM books", ()).await?;
        let mut books = Vec::new();

        while let Some(row) = rows.next().await? {
            books.push(record_to_book(row_to_record(&row)?)?);
        }

        Ok(books)
    }

    /// `id` is bound as-is; a value that matches no row simply yields `None`.
    pub async fn get(&self, id: &str) -> StoreResult<Option<Book>> {
        let mut rows = self
            .conn
            .query("SELECT * FROM books WHERE id = ?", libsql::params![id])
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(record_to_book(row_to_record(&row)?)?)),
            None => Ok(None),
        }
    }

    pub async fn exists(&self, id: &str) -> StoreResult<bool> {
        let mut rows = self
            .conn
            .query("SELECT 1 FROM books WHERE id = ?", libsql::params![id])
            .await?;
        Ok(rows.next().await?.is_some())
    }

    pub async fn create(&self, input: NewBook) -> StoreResult<u64> {
        let affected = self
            .conn
            .execute(
                "INSERT INTO books (title, author, price, stock) VALUES (?, ?, ?, ?)",
                libsql::params![input.title, input.author, input.price, input.stock],
            )
            .await?;
        Ok(affected)
    }

    pub async fn update(&self, id: &str, input: NewBook) -> StoreResult<u64> {
        let affected = self
            .conn
            .execute(
                "UPDATE books SET title = ?, author = ?, price = ?, stock = ? WHERE id = ?",
                libsql::params![input.title, input.author, input.price, input.stock, id],
            )
            .await?;
        Ok(affected)
    }

    pub async fn delete(&self, id: &str) -> StoreResult<u64> {
        let affected = self
            .conn
            .execute("DELETE FROM books WHERE id = ?", libsql::params![id])
            .await?;
        Ok(affected)
    }
}

pub fn row_to_record(row: &libsql::Row) -> StoreResult<Record> {
    let mut record = Record::new();
    for idx in 0..row.column_count() {
        let name = row
            .column_name(idx)
            .ok_or_else(|| StoreError::Decode(format!("column {idx} has no name")))?;
        record.insert(name.to_string(), row.get_value(idx)?);
    }
    Ok(record)
}

pub fn record_to_book(mut record: Record) -> StoreResult<Book> {
    Ok(Book {
        id: take_integer(&mut record, "id")?,
        title: take_text(&mut record, "title")?,
        author: take_text(&mut record, "author")?,
        price: take_real(&mut record, "price")?,
        stock: take_integer(&mut record, "stock")?,
    })
}

fn take(record: &mut Record, column: &str) -> StoreResult<Value> {
    record
        .remove(column)
        .ok_or_else(|| StoreError::Decode(format!("missing column {column}")))
}

fn unexpected(column: &str, value: &Value) -> StoreError {
    StoreError::Decode(format!("unexpected value for {column}: {value:?}"))
}

fn take_integer(record: &mut Record, column: &str) -> StoreResult<i64> {
    match take(record, column)? {
        Value::Integer(v) => Ok(v),
        other => Err(unexpected(column, &other)),
    }
}

fn take_real(record: &mut Record, column: &str) -> StoreResult<f64> {
    match take(record, column)? {
        Value::Real(v) => Ok(v),
        Value::Integer(v) => Ok(v as f64),
        other => Err(unexpected(column, &other)),
    }
}

fn take_text(record: &mut Record, column: &str) -> StoreResult<String> {
    match take(record, column)? {
        Value::Text(v) => Ok(v),
        other => Err(unexpected(column, &other)),
    }
}
