//! Gatehouse - a minimal hardened HTTP service skeleton.
//!
//! Exposes a greeting route and a liveness/readiness health route behind
//! response header hardening and per-client rate limiting, with environment
//! configuration validated before the server starts accepting connections.

pub mod config;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod state;
