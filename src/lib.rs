//! CRUD HTTP service over a MongoDB `books` collection.

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

pub use config::Config;
pub use database::{BookStore, MemoryBookStore, MongoBookStore};
pub use error::{ApiError, BootError, StoreError};
pub use state::AppState;
