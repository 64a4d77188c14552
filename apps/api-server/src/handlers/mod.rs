//! HTTP handlers and route configuration.

mod auth;
mod health;
mod images;
mod posts;
mod users;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // User profile routes
            .service(
                web::scope("/users")
                    .route("/profile", web::get().to(users::get_profile))
                    .route("/profile", web::put().to(users::update_profile))
                    .route(
                        "/onboarding/complete",
                        web::post().to(users::complete_onboarding),
                    )
                    .route(
                        "/social-media/connect",
                        web::post().to(users::connect_social),
                    ),
            )
            // Post pipeline routes
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::generate))
                    .route("", web::get().to(posts::list))
                    .route("/analytics/all", web::get().to(posts::analytics))
                    .route("/{post_id}", web::get().to(posts::get))
                    .route("/{post_id}", web::put().to(posts::update))
                    .route("/{post_id}/approve", web::post().to(posts::approve))
                    .route("/{post_id}", web::delete().to(posts::delete)),
            )
            // Image pool routes
            .service(
                web::scope("/images")
                    .route("", web::get().to(images::list))
                    .route("/{filename}/metadata", web::get().to(images::metadata))
                    .route("/{filename}", web::delete().to(images::delete)),
            ),
    );
}
