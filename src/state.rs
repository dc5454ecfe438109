use std::sync::Arc;

use crate::database::BookStore;

/// Shared across workers through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookStore>,
}

impl AppState {
    pub fn new<S: BookStore + 'static>(store: S) -> Self {
        AppState {
            books: Arc::new(store),
        }
    }
}
