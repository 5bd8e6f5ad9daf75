//! HTTP handlers and route configuration.

mod admin;
mod health;
mod items;

use actix_web::web;

/// Header carrying the admin API key.
pub static API_KEY_HEADER: &str = "x-api-key";

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/items")
                    .route("", web::get().to(items::list_items))
                    .route("", web::post().to(items::create_item))
                    .route("/{id}", web::get().to(items::get_item))
                    .route("/{id}", web::delete().to(items::delete_item)),
            )
            .route("/admin/maintenance", web::put().to(admin::set_maintenance)),
    );
}
