//! Observability
//!
//! - Logging: `tracing` events rendered by a `tracing-subscriber` fmt layer
//! - API call history: best-effort, non-blocking record of every `/api` call

mod call_log;
mod logging;

pub use call_log::{CallLog, CallSink, MemoryCallSink};
pub use logging::{init_logging, parse_level};
