//! Utility modules.

/// Log sanitization so response bodies and signatures stay readable but bounded in logs.
pub mod log_sanitizer;
