//! Request-processing pipeline.
//!
//! Three wrappers composed outer-to-inner as Metrics → Tracing → Logging
//! around the router (see [`crate::server::build_router`]). Metrics and
//! logging do their "after" work from guard destructors, so a request that
//! panics or is cancelled by the transport deadline is still observed.

use axum::extract::{ConnectInfo, Request};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use std::net::SocketAddr;
use std::time::Instant;

/// Header used to propagate the per-request trace identifier.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Sentinel used when a lookup on the request context fails. A missing
/// value must never fail the request.
const UNKNOWN: &str = "unknown";

/// Per-request trace context, stored in request extensions by the tracing
/// middleware. Downstream layers read the identifier from here, never by
/// re-parsing headers.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Tracing middleware: reads an inbound `x-request-id` header or generates
/// a fresh UUID, attaches it to the request context, and echoes it back as
/// a response header.
pub async fn propagate_request_id(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

struct RequestLog {
    request_id: String,
    method: String,
    path: String,
    remote_addr: String,
    user_agent: String,
    started: Instant,
}

impl Drop for RequestLog {
    fn drop(&mut self) {
        tracing::info!(
            request_id = %self.request_id,
            method = %self.method,
            path = %self.path,
            remote_addr = %self.remote_addr,
            user_agent = %self.user_agent,
            latency_ms = self.started.elapsed().as_millis() as u64,
            "request completed"
        );
    }
}

/// Logging middleware: one structured line per request with the trace
/// identifier, method, path, remote address, user agent and latency.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let user_agent = request
        .headers()
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(UNKNOWN)
        .to_string();

    let _log = RequestLog {
        request_id,
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        remote_addr,
        user_agent,
        started: Instant::now(),
    };

    next.run(request).await
}

struct MetricsGuard {
    method: String,
    path: String,
    started: Instant,
}

impl Drop for MetricsGuard {
    fn drop(&mut self) {
        // The histogram's _sum and _count series carry the cumulative
        // request duration and request count per (method, path).
        metrics::histogram!(
            "http_request_duration_seconds",
            "method" => self.method.clone(),
            "path" => self.path.clone(),
        )
        .record(self.started.elapsed().as_secs_f64());
    }
}

/// Metrics middleware: records request duration and count per
/// `(method, path)` once the inner chain completes.
pub async fn record_metrics(request: Request, next: Next) -> Response {
    let _guard = MetricsGuard {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        started: Instant::now(),
    };

    next.run(request).await
}
