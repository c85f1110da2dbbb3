#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use devconnect::infra::state::build_state;
use devconnect::middleware::request_trace::RequestTrace;
use devconnect::middleware::structured_logger::StructuredLogger;
use devconnect::middleware::trace_span::TraceSpan;
use devconnect::routes;
use devconnect::state::app_state::AppState;
use devconnect::state::security_config::SecurityConfig;
use devconnect::AppError;

use crate::common::TEST_SECRET;

/// Type alias for route configuration functions
type RouteConfigFn = Box<dyn Fn(&mut web::ServiceConfig) + Send + Sync>;

/// In-memory state signed with [`TEST_SECRET`].
pub async fn memory_state() -> Result<AppState, AppError> {
    build_state()
        .with_security(SecurityConfig::new(TEST_SECRET.as_bytes()))
        .with_memory_store()
        .build()
        .await
}

/// Builder for creating test Actix service instances
pub struct TestAppBuilder {
    state: AppState,
    route_config: Option<RouteConfigFn>,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            route_config: None,
        }
    }

    /// Register the application routes (without rate limiting).
    pub fn with_prod_routes(mut self) -> Self {
        self.route_config = Some(Box::new(routes::configure) as RouteConfigFn);
        self
    }

    /// Configure the app with custom routes
    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.route_config = Some(Box::new(config_fn) as RouteConfigFn);
        self
    }

    pub async fn build(
        self,
    ) -> Result<impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>, AppError>
    {
        let data = web::Data::new(self.state);
        let route_config = self.route_config;

        let service = test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(move |cfg| {
                    if let Some(config_fn) = &route_config {
                        config_fn(cfg);
                    }
                }),
        )
        .await;

        Ok(service)
    }
}

/// ```rust,ignore
/// let app = create_test_app(memory_state().await?).with_prod_routes().build().await?;
/// ```
pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
