//! Per-request tracing span.
//!
//! Every event logged while serving the request (handlers, services, store
//! adapters) is recorded inside a `request` span carrying the trace id, the
//! method and the matched route pattern. Needs the [`TraceId`] that
//! `RequestTrace` stores, so it must sit inside that middleware.

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{info_span, Instrument, Span};

use crate::trace_ctx::TraceId;

#[derive(Clone, Default)]
pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

fn request_span(req: &ServiceRequest) -> Span {
    let trace_id = req
        .extensions()
        .get::<TraceId>()
        .map(TraceId::to_string)
        .unwrap_or_else(|| "missing-trace-id".to_string());

    // Route patterns keep ids out of the span; fall back to the raw path
    // for requests no route matched.
    let route = req
        .match_pattern()
        .unwrap_or_else(|| req.path().to_string());

    info_span!(
        "request",
        trace_id = %trace_id,
        method = %req.method(),
        route = %route,
    )
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let span = request_span(&req);

        // Part of the downstream work runs synchronously in `call`.
        let fut = span.in_scope(|| self.service.call(req));
        Box::pin(fut.instrument(span))
    }
}
