use actix_web::web;

use crate::middleware::JwtExtract;

pub mod auth;
pub mod health;
pub mod posts;
pub mod profile;
pub mod users;

/// Configure application routes for tests and non-HttpServer contexts.
///
/// `main.rs` registers the same paths and adds rate limiting on the
/// registration and login endpoints. Token checks live here, on the
/// routes that need them, so tests exercise them too.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check route: /health
    cfg.configure(health::configure_routes);

    // Registration: /api/users
    cfg.service(web::scope("/api/users").configure(users::configure_routes));

    // Login and session: /api/auth
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));

    configure_resources(cfg);
}

/// Profile and post routes, shared verbatim by `main.rs`.
pub fn configure_resources(cfg: &mut web::ServiceConfig) {
    // Profiles: /api/profile/**
    cfg.service(web::scope("/api/profile").configure(profile::configure_routes));

    // Posts: /api/posts/** (all private)
    cfg.service(
        web::scope("/api/posts")
            .wrap(JwtExtract)
            .configure(posts::configure_routes),
    );
}
