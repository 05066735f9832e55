//! JSON structured logger built on `tracing`.
//!
//! - **`config`**: [`LoggerConfig`] builder, [`LoggerSettings`], [`parse_level`]
//! - **`layer`**: [`JsonLayer`], the `tracing_subscriber::Layer` writing JSON lines
//! - **`context`**: [`LogContext`], request-scoped attributes
//!
//! # Example
//!
//! ```rust,no_run
//! use logz::{LoggerConfig, MaskRegistry, mask_email, set_context_attrs};
//!
//! let registry = MaskRegistry::new().with("email", mask_email);
//! logz::init(
//!     "billing",
//!     LoggerConfig::new()
//!         .with_level("debug")
//!         .with_service_version("1.4.0")
//!         .with_registry(registry)
//!         .with_replacer_enabled(true),
//! )
//! .expect("logger already installed");
//!
//! let _ctx = set_context_attrs([("request_id", "r-42")]);
//! tracing::info!(email = "john@doe.com", "invoice sent");
//! ```

mod config;
mod context;
mod layer;

use tracing_subscriber::{Registry, layer::Layered, prelude::*};

pub use config::{DEFAULT_ENV, LoggerConfig, LoggerSettings, Replacer, parse_level};
pub use context::{ContextGuard, LogContext, WithLogContext, set_context_attrs};
pub use layer::JsonLayer;

/// Keys used in every record.
pub mod keys {
    pub const TIME: &str = "time";
    pub const LEVEL: &str = "level";
    pub const MESSAGE: &str = "msg";
    pub const SOURCE: &str = "source";

    // OpenTelemetry semantic conventions.
    pub const SERVICE_NAME: &str = "service.name";
    pub const SERVICE_VERSION: &str = "service.version";
    pub const DEPLOYMENT_ENVIRONMENT_NAME: &str = "deployment.environment.name";

    /// Context attribute key for an OpenTelemetry trace id.
    pub const TRACE_ID: &str = "trace_id";
    /// Context attribute key for an OpenTelemetry span id.
    pub const SPAN_ID: &str = "span_id";
    /// Context attribute key for an OpenTelemetry parent span id.
    pub const PARENT_SPAN_ID: &str = "parent_span_id";
}

/// Message logged once the global logger is installed.
pub const INIT_MESSAGE: &str = "[LOGZ] logz initialized";

/// The subscriber type produced by [`subscriber`].
pub type JsonSubscriber = Layered<JsonLayer, Registry>;

/// Errors returned by [`init`].
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("failed to install the global logger: {0}")]
    SetGlobalDefault(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Builds the JSON subscriber without installing it.
///
/// Useful with `tracing::subscriber::with_default` or `tracing::Dispatch`.
#[must_use]
pub fn subscriber(service_name: &str, config: LoggerConfig) -> JsonSubscriber {
    Registry::default().with(JsonLayer::new(service_name, config))
}

/// Installs the JSON logger as the global default and logs [`INIT_MESSAGE`].
///
/// Use the `tracing` macros afterwards. Fails if a global subscriber is
/// already installed.
pub fn init(service_name: &str, config: LoggerConfig) -> Result<(), InitError> {
    tracing::subscriber::set_global_default(subscriber(service_name, config))?;
    tracing::info!("{INIT_MESSAGE}");
    Ok(())
}
