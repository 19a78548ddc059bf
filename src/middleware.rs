//! Request-pipeline middleware: per-client rate limiting and request IDs.
//!
//! The rate limiter caps each client (keyed by source IP) to a fixed request
//! quota per rolling window and answers HTTP 429 beyond it. The request ID
//! middleware generates a UUID v4 per request and wraps processing in a
//! tracing span so all logs within a request can be correlated.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::Instrument;
use uuid::Uuid;

use crate::state::AppState;

/// Extension type for accessing the request ID in handlers if needed.
#[derive(Clone, Debug)]
pub struct RequestId(pub Uuid);

/// Per-client request window.
struct Window {
    count: u32,
    started: Instant,
}

/// Fixed-quota rolling-window rate limiter keyed by client IP.
///
/// Counters live behind a mutex and are pruned whenever a window has fully
/// elapsed, so memory stays bounded by the number of recently active clients.
pub struct RateLimiter {
    windows: Mutex<HashMap<IpAddr, Window>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_requests,
            window,
        }
    }

    /// Record one request from `client`. Returns `false` when the client has
    /// exhausted its quota for the current window.
    pub fn check(&self, client: IpAddr) -> bool {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: IpAddr, now: Instant) -> bool {
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");

        // Drop every expired window, not just the caller's
        windows.retain(|_, w| now.duration_since(w.started) < self.window);

        let window = windows.entry(client).or_insert(Window {
            count: 0,
            started: now,
        });

        if window.count < self.max_requests {
            window.count += 1;
            true
        } else {
            false
        }
    }
}

/// Middleware enforcing the per-client request quota.
///
/// Requests within quota pass through untouched; excess requests are answered
/// with 429 without reaching the handler.
pub async fn rate_limit_layer(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    if state.limiter.check(addr.ip()) {
        next.run(request).await
    } else {
        tracing::warn!(client = %addr.ip(), "Rate limit exceeded");
        (StatusCode::TOO_MANY_REQUESTS, "Too many requests").into_response()
    }
}

/// Middleware that generates a request ID and creates a request span.
///
/// This should be the outermost middleware layer so the span wraps
/// all request processing, including other middleware and handlers.
pub async fn request_id_layer(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let path = uri.path();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();

    let mut request = request;
    request.extensions_mut().insert(RequestId(request_id));

    async move {
        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(last_octet: u8) -> IpAddr {
        IpAddr::from([127, 0, 0, last_octet])
    }

    #[test]
    fn allows_requests_within_quota() {
        let limiter = RateLimiter::new(5, Duration::from_secs(60));
        for _ in 0..5 {
            assert!(limiter.check(client(1)));
        }
    }

    #[test]
    fn rejects_requests_beyond_quota() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        for _ in 0..3 {
            assert!(limiter.check(client(1)));
        }
        assert!(!limiter.check(client(1)));
        assert!(!limiter.check(client(1)));
    }

    #[test]
    fn clients_are_limited_independently() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.check(client(1)));
        assert!(!limiter.check(client(1)));

        // A different client still has its full quota
        assert!(limiter.check(client(2)));
    }

    #[test]
    fn quota_resets_after_window_elapses() {
        let window = Duration::from_secs(60);
        let limiter = RateLimiter::new(1, window);
        let start = Instant::now();

        assert!(limiter.check_at(client(1), start));
        assert!(!limiter.check_at(client(1), start + Duration::from_secs(1)));

        // One full window later the counter has been pruned
        assert!(limiter.check_at(client(1), start + window));
    }
}
