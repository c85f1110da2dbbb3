use actix_extensible_rate_limit::RateLimiter;
use actix_web::{web, App, HttpServer};
use devconnect::config::{AppConfig, StoreKind};
use devconnect::infra::mongo;
use devconnect::infra::state::build_state;
use devconnect::middleware::cors::cors_middleware;
use devconnect::middleware::rate_limit::{auth_rate_limit_backend, auth_rate_limit_config};
use devconnect::middleware::request_trace::RequestTrace;
use devconnect::middleware::security_headers::SecurityHeaders;
use devconnect::middleware::structured_logger::StructuredLogger;
use devconnect::middleware::trace_span::TraceSpan;
use devconnect::routes;
use devconnect::state::security_config::SecurityConfig;
use devconnect::telemetry;
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: docker-compose env_file or docker run --env-file
    // - Local dev: set -a; . ./.env; set +a
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let security_config = SecurityConfig::new(config.jwt_secret.as_bytes())
        .with_token_ttl(time::Duration::seconds(config.token_ttl_secs));

    let builder = build_state()
        .with_security(security_config)
        .with_github_base(config.github_api_base.clone());

    let builder = match config.store {
        StoreKind::Mongo => match mongo::connect(&config.mongo_uri, &config.mongo_db).await {
            Ok(db) => {
                info!(db = %config.mongo_db, "MongoDB connected");
                builder.with_mongo(db)
            }
            Err(e) => {
                error!(error = %e, "Failed to connect to MongoDB");
                std::process::exit(1);
            }
        },
        StoreKind::Memory => {
            warn!("Using the in-memory store; data is lost on restart");
            builder.with_memory_store()
        }
    };

    let app_state = match builder.build().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    info!(host = %config.host, port = config.port, "Starting DevConnect backend");

    let data = web::Data::new(app_state);
    let auth_backend = auth_rate_limit_backend();
    let allowed_origins = config.cors_allowed_origins.clone();
    let max_json_payload_size = config.max_json_payload_size;

    HttpServer::new(move || {
        let register_limiter =
            RateLimiter::builder(auth_backend.clone(), auth_rate_limit_config().build())
                .add_headers()
                .build();
        let login_limiter =
            RateLimiter::builder(auth_backend.clone(), auth_rate_limit_config().build())
                .add_headers()
                .build();

        App::new()
            .wrap(cors_middleware(&allowed_origins))
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .app_data(web::JsonConfig::default().limit(max_json_payload_size))
            .app_data(web::PayloadConfig::new(max_json_payload_size))
            .route("/", web::get().to(routes::health::root))
            .configure(routes::health::configure_routes)
            .service(
                web::scope("/api/users")
                    .wrap(register_limiter)
                    .configure(routes::users::configure_routes),
            )
            .service(
                web::scope("/api/auth").service(
                    web::resource("")
                        .route(routes::auth::session_route())
                        .route(routes::auth::login_route().wrap(login_limiter)),
                ),
            )
            .configure(routes::configure_resources)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
