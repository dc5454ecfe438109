use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::Mutex;

use super::BookStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{Book, BookUpdate, InsertAck};

#[derive(Debug, Clone)]
struct StoredBook {
    _id: ObjectId,
    book: Book,
}

/// In-process `BookStore`, kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: Mutex<Vec<StoredBook>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.books.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.lock().await.is_empty()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn insert(&self, book: Book) -> StoreResult<InsertAck> {
        let _id = ObjectId::new();
        self.books.lock().await.push(StoredBook { _id, book });
        Ok(_id.into())
    }

    async fn find_all(&self) -> StoreResult<Vec<Book>> {
        let books = self.books.lock().await;
        Ok(books.iter().map(|stored| stored.book.clone()).collect())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Book> {
        let books = self.books.lock().await;
        books
            .iter()
            .find(|stored| stored.book.id == id)
            .map(|stored| stored.book.clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn replace_fields(&self, id: &str, update: BookUpdate) -> StoreResult<u64> {
        let mut books = self.books.lock().await;
        match books.iter_mut().find(|stored| stored.book.id == id) {
            Some(stored) => {
                update.apply_to(&mut stored.book);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<u64> {
        let mut books = self.books.lock().await;
        match books.iter().position(|stored| stored.book.id == id) {
            Some(index) => {
                books.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
