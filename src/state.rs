//! Shared application state for request handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{AppConfig, RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW_SECS};
use crate::middleware::RateLimiter;
use crate::service::GreetingService;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Contains the validated configuration, the greeting/health service, and the
/// rate limiter counters shared by every connection.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service: GreetingService,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Creates application state from the given configuration and service.
    pub fn new(config: AppConfig, service: GreetingService) -> Self {
        Self {
            config: Arc::new(config),
            service,
            limiter: Arc::new(RateLimiter::new(
                RATE_LIMIT_MAX_REQUESTS,
                Duration::from_secs(RATE_LIMIT_WINDOW_SECS),
            )),
        }
    }
}
