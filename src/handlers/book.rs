use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::{ApiError, StoreError};
use crate::models::{Book, BookUpdate};
use crate::state::AppState;

// Handler for POST /books
pub async fn create_book(
    state: web::Data<AppState>,
    new_book: web::Json<Book>,
) -> Result<HttpResponse, ApiError> {
    let ack = state.books.insert(new_book.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ack))
}

// Handler for GET /books
pub async fn get_books(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let books = state.books.find_all().await?;
    Ok(HttpResponse::Ok().json(books))
}

// Handler for GET /books/{id}
pub async fn get_book_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let book = state.books.find_by_id(&path).await?;
    Ok(HttpResponse::Ok().json(book))
}

// Handler for PUT /books/{id}
pub async fn update_book(
    state: web::Data<AppState>,
    path: web::Path<String>,
    update: web::Json<BookUpdate>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let matched = state.books.replace_fields(&id, update.into_inner()).await?;
    if matched == 0 {
        return Err(StoreError::NotFound(id).into());
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Book updated successfully" })))
}

// Handler for DELETE /books/{id}
pub async fn delete_book(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let deleted = state.books.delete_by_id(&id).await?;
    if deleted == 0 {
        return Err(StoreError::NotFound(id).into());
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Book deleted successfully" })))
}
