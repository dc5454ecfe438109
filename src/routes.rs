use actix_web::web;

use crate::error::ApiError;
use crate::handlers;

/// JSON bodies are accepted without a JSON content type; malformed ones are
/// answered with 400 `{"error": ...}`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::resource("/books")
                .route(web::get().to(handlers::book::get_books))
                .route(web::post().to(handlers::book::create_book)),
        )
        .service(
            web::resource("/books/{id}")
                .route(web::get().to(handlers::book::get_book_by_id))
                .route(web::put().to(handlers::book::update_book))
                .route(web::delete().to(handlers::book::delete_book)),
        );
}
