/*!
 * Monitoring Module
 * Structured tracing for temp operations
 */

pub mod tracer;

pub use tracer::{generate_trace_id, init_tracing, operation_span};
