use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    options::{ClientOptions, CountOptions},
    Client, Collection, Database,
};

use super::{BookStore, BOOKS_COLLECTION};
use crate::error::{BootError, StoreError, StoreResult};
use crate::models::{Book, BookUpdate, InsertAck};

/// Upper bound on the startup connection attempt.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// `BookStore` over a MongoDB collection. Cloning shares the driver's pool.
#[derive(Clone, Debug)]
pub struct MongoBookStore {
    collection: Collection<Book>,
}

impl MongoBookStore {
    pub fn new(collection: Collection<Book>) -> Self {
        MongoBookStore { collection }
    }

    pub fn from_database(db: &Database) -> Self {
        Self::new(db.collection::<Book>(BOOKS_COLLECTION))
    }

    /// Opens a client on `mongo_url` and pings the server before returning.
    pub async fn connect(mongo_url: &str, database: &str) -> Result<Self, BootError> {
        let mut options = ClientOptions::parse(mongo_url).await?;
        options.connect_timeout = Some(CONNECT_TIMEOUT);
        options.server_selection_timeout = Some(CONNECT_TIMEOUT);

        let client = Client::with_options(options)?;
        let db = client.database(database);

        let ping = db.run_command(doc! { "ping": 1 }, None);
        tokio::time::timeout(CONNECT_TIMEOUT, ping)
            .await
            .map_err(|_| BootError::ConnectionTimeout(CONNECT_TIMEOUT.as_secs()))??;

        Ok(Self::from_database(&db))
    }
}

fn by_id(id: &str) -> Document {
    doc! { "id": id }
}

fn insert_ack(inserted_id: Bson) -> InsertAck {
    match inserted_id {
        Bson::ObjectId(oid) => oid.into(),
        other => InsertAck {
            inserted_id: other.to_string(),
        },
    }
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn insert(&self, book: Book) -> StoreResult<InsertAck> {
        let result = self.collection.insert_one(book, None).await?;
        Ok(insert_ack(result.inserted_id))
    }

    async fn find_all(&self) -> StoreResult<Vec<Book>> {
        let cursor = self.collection.find(doc! {}, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Book> {
        self.collection
            .find_one(by_id(id), None)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn replace_fields(&self, id: &str, update: BookUpdate) -> StoreResult<u64> {
        // An empty `$set` is rejected by the server, so only report the match.
        if update.is_empty() {
            let options = CountOptions::builder().limit(1).build();
            return Ok(self.collection.count_documents(by_id(id), options).await?);
        }

        let set = update.to_set_document()?;
        let result = self
            .collection
            .update_one(by_id(id), doc! { "$set": set }, None)
            .await?;
        Ok(result.matched_count)
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<u64> {
        let result = self.collection.delete_one(by_id(id), None).await?;
        Ok(result.deleted_count)
    }
}
