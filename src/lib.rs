//! heartbeatd - a standalone heartbeat endpoint for load-balancer health checks.
//!
//! The service loads a small XML configuration (bind address, port, path),
//! starts an HTTP listener, and answers GET requests with 200 while the
//! monitored application reports itself ready, 503 otherwise.

pub mod config;
pub mod error;
pub mod metrics;
pub mod readiness;
pub mod routes;
pub mod server;
pub mod state;
