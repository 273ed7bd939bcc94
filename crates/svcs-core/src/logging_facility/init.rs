//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.
//! All output goes to stderr so command outcomes on stdout stay clean.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output
    Development,
    /// JSON structured output
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is not set
    pub fn default_filter(&self) -> &'static str {
        match self {
            Profile::Development => "svcs=debug",
            Profile::Production => "svcs=info",
            Profile::Test => "off",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility with the profile's default filter
///
/// # Profiles
///
/// - **Development**: Human-readable logs with debug level
/// - **Production**: JSON structured logs with info level
/// - **Test**: Capture mode for test assertions
///
/// # Example
///
/// ```
/// use svcs_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    init_with_default_filter(profile, profile.default_filter());
}

/// Initialize the logging facility with an explicit fallback filter
///
/// `RUST_LOG` still wins when set. Only the first call in a process has any
/// effect.
pub fn init_with_default_filter(profile: Profile, default_filter: &str) {
    INIT_ONCE.call_once(|| {
        let filter = || {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
        };
        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(filter())
                    .init();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_env_filter(filter())
                    .init();
            }
            Profile::Test => {
                // Test capture is initialized separately via init_test_capture()
                tracing_subscriber::registry().init();
            }
        }
    });
}
