use crate::domain::DomainError;
use crate::presentation::http_handlers::{self, error_to_response};
use actix_web::{error::InternalError, web};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Unparseable date segments are a missing page, not a bad request.
        .app_data(web::PathConfig::default().error_handler(|err, _req| {
            InternalError::from_response(err, error_to_response(DomainError::PostNotFound)).into()
        }))
        .app_data(web::FormConfig::default().error_handler(|err, _req| {
            let response =
                error_to_response(DomainError::ValidationError("Malformed form data".to_string()));
            InternalError::from_response(err, response).into()
        }))
        .route("/", web::get().to(http_handlers::post_list))
        .service(
            web::resource("/{year}/{month}/{day}/{slug}/")
                .name("post_detail")
                .route(web::get().to(http_handlers::post_detail))
                .route(web::post().to(http_handlers::post_comment)),
        )
        .default_service(web::to(http_handlers::not_found));
}
