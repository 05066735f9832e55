//! Logger configuration.
//!
//! [`LoggerConfig`] is built with `with_*` methods; [`LoggerSettings`] is its
//! plain-data subset that can be deserialized from a configuration file.

use std::{fmt, sync::Arc};

use serde::Deserialize;
use serde_json::Value;
use tracing::Level;
use tracing_subscriber::fmt::{MakeWriter, writer::BoxMakeWriter};

use crate::policy::MaskRegistry;

/// Environment name used when none is configured.
pub const DEFAULT_ENV: &str = "SIT";

/// Rewrites an attribute value before it is written.
///
/// The first argument is the attribute key as it appears in the record.
pub type Replacer = Arc<dyn Fn(&str, Value) -> Value + Send + Sync>;

/// Parses a level name, ignoring case.
///
/// Recognizes `trace`, `debug`, `info`, `warn` and `error`; anything else
/// yields [`Level::INFO`].
pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Builder for the JSON logger.
///
/// Defaults: stdout, `INFO`, environment [`DEFAULT_ENV`], no source
/// location, no replacer.
pub struct LoggerConfig {
    pub(crate) writer: BoxMakeWriter,
    pub(crate) source_enabled: bool,
    pub(crate) level: Level,
    pub(crate) replacer: Option<Replacer>,
    pub(crate) replacer_enabled: bool,
    pub(crate) service_version: String,
    pub(crate) env: String,
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from deserialized settings.
    #[must_use]
    pub fn from_settings(settings: LoggerSettings) -> Self {
        Self::new()
            .with_level(&settings.level)
            .with_source_enabled(settings.source_enabled)
            .with_replacer_enabled(settings.replacer_enabled)
            .with_service_version(settings.service_version)
            .with_env(settings.env)
    }

    /// Writes records to `writer` instead of stdout.
    #[must_use]
    pub fn with_writer<W>(mut self, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        self.writer = BoxMakeWriter::new(writer);
        self
    }

    /// Adds the event's file, line and module to every record.
    #[must_use]
    pub fn with_source_enabled(mut self, enabled: bool) -> Self {
        self.source_enabled = enabled;
        self
    }

    /// Sets the minimum level from its name (see [`parse_level`]).
    #[must_use]
    pub fn with_level(mut self, level: &str) -> Self {
        self.level = parse_level(level);
        self
    }

    /// Installs a replacer. It only runs when
    /// [`with_replacer_enabled`](Self::with_replacer_enabled) is set.
    #[must_use]
    pub fn with_replacer<F>(mut self, replacer: F) -> Self
    where
        F: Fn(&str, Value) -> Value + Send + Sync + 'static,
    {
        self.replacer = Some(Arc::new(replacer));
        self
    }

    /// Installs a replacer that masks attributes through `registry`.
    ///
    /// String attributes under a registered key are masked; object and array
    /// attributes are redacted structurally. Like any replacer it only runs
    /// when enabled.
    #[must_use]
    pub fn with_registry(self, registry: MaskRegistry) -> Self {
        self.with_replacer(move |key, value| registry.redact_field(key, &value))
    }

    #[must_use]
    pub fn with_replacer_enabled(mut self, enabled: bool) -> Self {
        self.replacer_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_service_version<S: Into<String>>(mut self, version: S) -> Self {
        self.service_version = version.into();
        self
    }

    /// Sets the deployment environment. An empty name keeps the default.
    #[must_use]
    pub fn with_env<S: Into<String>>(mut self, env: S) -> Self {
        let env = env.into();
        if !env.is_empty() {
            self.env = env;
        }
        self
    }

    /// The replacer that will run, if any.
    pub(crate) fn active_replacer(&self) -> Option<Replacer> {
        if self.replacer_enabled {
            self.replacer.clone()
        } else {
            None
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            writer: BoxMakeWriter::new(std::io::stdout),
            source_enabled: false,
            level: Level::INFO,
            replacer: None,
            replacer_enabled: false,
            service_version: String::new(),
            env: DEFAULT_ENV.to_string(),
        }
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("source_enabled", &self.source_enabled)
            .field("level", &self.level)
            .field("replacer", &self.replacer.as_ref().map(|_| ".."))
            .field("replacer_enabled", &self.replacer_enabled)
            .field("service_version", &self.service_version)
            .field("env", &self.env)
            .finish_non_exhaustive()
    }
}

/// Serializable logger settings.
///
/// Every field is optional in the source document.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggerSettings {
    pub level: String,
    pub source_enabled: bool,
    pub replacer_enabled: bool,
    pub service_version: String,
    pub env: String,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            source_enabled: false,
            replacer_enabled: false,
            service_version: String::new(),
            env: DEFAULT_ENV.to_string(),
        }
    }
}
