//! Greeting and health service.
//!
//! Both operations are pure and deterministic: the greeting is a fixed string
//! and the health status is a constant object. The service is constructed
//! explicitly and handed to the router through [`crate::state::AppState`].

use serde::Serialize;

/// The greeting returned from the root route.
pub const GREETING: &str = "Hello World!";

/// Health status payload for liveness/readiness probes.
///
/// Serializes to exactly `{"status":"ok"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    /// Status indicator, always "ok" while the process can respond.
    pub status: &'static str,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Service providing the two fixed responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreetingService;

impl GreetingService {
    /// Returns the fixed greeting string.
    pub fn greeting(&self) -> &'static str {
        GREETING
    }

    /// Returns the constant health status.
    pub fn health(&self) -> HealthStatus {
        HealthStatus::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_is_constant() {
        let service = GreetingService;
        assert_eq!(service.greeting(), "Hello World!");
        assert_eq!(service.greeting(), service.greeting());
    }

    #[test]
    fn health_status_is_ok() {
        let service = GreetingService;
        assert_eq!(service.health(), HealthStatus::ok());
        assert_eq!(service.health().status, "ok");
    }

    #[test]
    fn health_status_serialization() {
        let json = serde_json::to_string(&HealthStatus::ok()).unwrap();
        assert_eq!(json, r#"{"status":"ok"}"#);
    }
}
