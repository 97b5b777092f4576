//! Alumnitrack Observability
//!
//! - Structured logging through `tracing-subscriber` (compact or JSON)
//! - Per-request logging middleware with a request id
//! - Prometheus metrics for HTTP traffic and domain events
//!
//! Compiled in with the `observability` feature (default). Without it every
//! function here is a no-op stub with the same signature. At runtime,
//! metrics can also be switched off with `METRICS_ENABLED=false`.
//!
//! # Examples
//!
//! ```no_run
//! use alumnitrack_observability::{init_metrics, init_tracing};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     let handle = init_metrics().expect("metrics recorder");
//!     // ... application code ...
//! }
//! ```

pub mod request_log;

pub use request_log::logging_middleware;

#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

#[cfg(feature = "observability")]
pub use logging::init_tracing;
#[cfg(feature = "observability")]
pub use metrics::{
    MetricsHandle, init_metrics, is_metrics_enabled, metrics_middleware, track_alumni_created,
    track_job_transition, track_login_failure, track_login_success, track_token_issued,
    track_user_registered,
};

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{extract::Request, middleware::Next, response::Response};

    /// Stand-in for the Prometheus handle.
    #[derive(Clone, Debug)]
    pub struct MetricsHandle;

    impl MetricsHandle {
        pub fn render(&self) -> String {
            String::new()
        }
    }

    pub fn is_metrics_enabled() -> bool {
        false
    }

    pub fn init_tracing() {}

    pub fn init_metrics() -> Result<Option<MetricsHandle>, std::convert::Infallible> {
        Ok(None)
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn track_login_success(_role: &str) {}
    pub fn track_login_failure(_reason: &str) {}
    pub fn track_token_issued() {}
    pub fn track_user_registered() {}
    pub fn track_alumni_created() {}
    pub fn track_job_transition(_kind: &'static str, _affected: u64) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
