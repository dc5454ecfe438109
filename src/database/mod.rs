//! Persistence for the `books` collection.
//!
//! Handlers only see the `BookStore` trait. `MongoBookStore` is the production
//! implementation; `MemoryBookStore` keeps everything in process and backs the
//! handler tests.
//!
//! `id` is not unique. Lookups, updates and deletes act on the first document
//! whose `id` matches.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{Book, BookUpdate, InsertAck};

pub mod memory;
pub mod mongo;

pub use memory::MemoryBookStore;
pub use mongo::MongoBookStore;

pub const BOOKS_COLLECTION: &str = "books";

#[async_trait]
pub trait BookStore: Send + Sync {
    /// Stores `book` as given. No uniqueness check on `id`.
    async fn insert(&self, book: Book) -> StoreResult<InsertAck>;

    /// Every stored book, in no particular order.
    async fn find_all(&self) -> StoreResult<Vec<Book>>;

    /// The first book whose `id` equals `id`, or `StoreError::NotFound`.
    async fn find_by_id(&self, id: &str) -> StoreResult<Book>;

    /// Sets the fields present in `update` on the first match. Returns the
    /// number of matched documents.
    async fn replace_fields(&self, id: &str, update: BookUpdate) -> StoreResult<u64>;

    /// Removes the first match. Returns the number of deleted documents.
    async fn delete_by_id(&self, id: &str) -> StoreResult<u64>;
}
