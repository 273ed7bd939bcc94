//! Canonical schema constants for structured logging and events
//!
//! `tracing` macros take field names as identifiers, so emitting code writes
//! them literally (`tracked_len = ..`). Everything that reads events back,
//! such as the test capture layer and log assertions, goes through these
//! constants, and the names here must match what the engine writes.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Entity identifiers
pub const FIELD_PATH: &str = "path";
pub const FIELD_FINGERPRINT: &str = "fingerprint";
pub const FIELD_COMMIT_ID: &str = "commit_id";

// Collection sizes
pub const FIELD_TRACKED_LEN: &str = "tracked_len";
pub const FIELD_LOG_LEN: &str = "log_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

/// Event names an engine operation emits, in order; an operation ends with
/// exactly one of the last two
pub const LIFECYCLE_EVENTS: [&str; 3] = [EVENT_START, EVENT_END, EVENT_END_ERROR];

/// Whether `event` closes an operation
pub fn is_terminal_event(event: &str) -> bool {
    event == EVENT_END || event == EVENT_END_ERROR
}
