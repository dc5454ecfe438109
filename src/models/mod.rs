pub mod book;

pub use book::{Book, BookUpdate, InsertAck};
