use axum::{extract::State, http::StatusCode, Json};
use shelf_db::DbError;
use shelf_http::error::AppError;

use super::models::{Book, Confirmation};
use super::store::SharedBookStore;
use super::validators::{BookId, CreateBook, UpdateBook};
use crate::extract::Validated;

pub const NOT_FOUND: &str = "Book not found";

/// Store failures surface as 400 with the driver's message
fn store_error(error: DbError) -> AppError {
    AppError::bad_request(error.to_string())
}

pub async fn create_book(
    State(store): State<SharedBookStore>,
    Validated(CreateBook(book)): Validated<CreateBook>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let created = store.create(book).await.map_err(store_error)?;
    tracing::info!(book_id = %created.id, "book created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_books(State(store): State<SharedBookStore>) -> Result<Json<Vec<Book>>, AppError> {
    let books = store.list().await.map_err(store_error)?;
    Ok(Json(books))
}

pub async fn get_book(
    State(store): State<SharedBookStore>,
    Validated(BookId(id)): Validated<BookId>,
) -> Result<Json<Book>, AppError> {
    store
        .get(&id)
        .await
        .map_err(store_error)?
        .map(Json)
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

pub async fn update_book(
    State(store): State<SharedBookStore>,
    Validated(UpdateBook { id, patch }): Validated<UpdateBook>,
) -> Result<Json<Confirmation>, AppError> {
    let updated = store.update(&id, patch).await.map_err(store_error)?;
    if updated.is_none() {
        return Err(AppError::not_found(NOT_FOUND));
    }

    tracing::info!(book_id = %id, "book updated");
    Ok(Json(Confirmation::new("Book updated successfully")))
}

pub async fn delete_book(
    State(store): State<SharedBookStore>,
    Validated(BookId(id)): Validated<BookId>,
) -> Result<Json<Confirmation>, AppError> {
    let deleted = store.delete(&id).await.map_err(store_error)?;
    if deleted.is_none() {
        return Err(AppError::not_found(NOT_FOUND));
    }

    tracing::info!(book_id = %id, "book deleted");
    Ok(Json(Confirmation::new("Book deleted successfully")))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "books module is healthy"
}
