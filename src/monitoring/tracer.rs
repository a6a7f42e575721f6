/*!
 * Tracing
 * Structured logging setup and per-operation spans
 */

use tracing::{info, span, Level, Span, Subscriber};
use tracing_subscriber::{
    fmt::{format::FmtSpan, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};
use uuid::Uuid;

/// Environment variable enabling JSON output
pub const TRACE_JSON_ENV: &str = "TEMP_TRACE_JSON";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - TEMP_TRACE_JSON: Enable JSON output (default: false)
///
/// Logs go to stderr; stdout is left for command output.
///
/// Returns false if a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let installed = build_subscriber(env_filter, use_json, std::io::stderr)
        .try_init()
        .is_ok();

    if installed {
        info!(json = use_json, "Structured tracing initialized");
    }
    installed
}

/// Assemble the filter and formatting layers over `writer`
pub fn build_subscriber<W>(
    env_filter: EnvFilter,
    json: bool,
    writer: W,
) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        Box::new(
            registry.with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            ),
        )
    } else {
        Box::new(
            registry.with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            ),
        )
    }
}

/// Generate a unique trace ID for request correlation
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span wrapping one temp operation, correlated by a fresh trace ID
pub fn operation_span(operation: &'static str) -> Span {
    span!(
        Level::DEBUG,
        "temp_op",
        trace_id = %generate_trace_id(),
        operation = operation,
    )
}
