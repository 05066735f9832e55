//! A `tracing` layer that writes each event as one JSON object per line.
//!
//! Record layout, in the order attributes are merged (later keys win):
//!
//! 1. `time`, `level`, `msg` and, when enabled, `source`
//! 2. service attributes (`service.name`, `service.version`,
//!    `deployment.environment.name`)
//! 3. fields of the enclosing spans, from the root to the innermost
//! 4. fields of the event
//! 5. attributes of the active [`LogContext`]
//!
//! Attributes from 3-5 go through the configured replacer, if any.

use std::{fmt, io::Write};

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Number, Value};
use tracing::{
    Event, Level, Metadata, Subscriber,
    field::{Field, Visit},
    span,
};
use tracing_subscriber::{
    fmt::{MakeWriter, writer::BoxMakeWriter},
    layer::{Context, Layer},
    registry::LookupSpan,
};

use super::{
    LoggerConfig, Replacer,
    context::LogContext,
    keys::{
        DEPLOYMENT_ENVIRONMENT_NAME, LEVEL, MESSAGE, SERVICE_NAME, SERVICE_VERSION, SOURCE, TIME,
    },
};

/// Field name `tracing` uses for the event message.
const TRACING_MESSAGE_FIELD: &str = "message";

/// Writes events as JSON lines.
///
/// Build one with [`JsonLayer::new`] and add it to a
/// `tracing_subscriber::Registry`, or use [`subscriber`](super::subscriber).
pub struct JsonLayer {
    writer: BoxMakeWriter,
    level: Level,
    source_enabled: bool,
    replacer: Option<Replacer>,
    service: Map<String, Value>,
}

impl JsonLayer {
    #[must_use]
    pub fn new(service_name: &str, config: LoggerConfig) -> Self {
        let replacer = config.active_replacer();
        let mut service = Map::new();
        service.insert(SERVICE_NAME.into(), Value::String(service_name.to_string()));
        service.insert(SERVICE_VERSION.into(), Value::String(config.service_version));
        service.insert(DEPLOYMENT_ENVIRONMENT_NAME.into(), Value::String(config.env));

        Self {
            writer: config.writer,
            level: config.level,
            source_enabled: config.source_enabled,
            replacer,
            service,
        }
    }

    fn replace(&self, key: &str, value: Value) -> Value {
        match &self.replacer {
            Some(replacer) => replacer(key, value),
            None => value,
        }
    }

    fn source(metadata: &Metadata<'_>) -> Value {
        let mut source = Map::new();
        if let Some(file) = metadata.file() {
            source.insert("file".into(), Value::String(file.to_string()));
        }
        if let Some(line) = metadata.line() {
            source.insert("line".into(), Value::from(line));
        }
        if let Some(module) = metadata.module_path() {
            source.insert("module".into(), Value::String(module.to_string()));
        }
        Value::Object(source)
    }

    fn write_record(&self, metadata: &Metadata<'_>, record: Map<String, Value>) {
        let Ok(mut line) = serde_json::to_vec(&record) else {
            return;
        };
        line.push(b'\n');
        // A failing sink must not take the caller down with it.
        let _ = self.writer.make_writer_for(metadata).write_all(&line);
    }
}

impl fmt::Debug for JsonLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonLayer")
            .field("level", &self.level)
            .field("source_enabled", &self.source_enabled)
            .field("replacer", &self.replacer.as_ref().map(|_| ".."))
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

/// Span fields, stored in the span's extensions.
#[derive(Debug, Default)]
struct SpanAttrs(Map<String, Value>);

impl<S> Layer<S> for JsonLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        // Spans carry context for events, so they are kept at every level.
        metadata.is_span() || *metadata.level() <= self.level
    }

    fn on_new_span(&self, attrs: &span::Attributes<'_>, id: &span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut visitor = JsonVisitor::default();
        attrs.record(&mut visitor);
        span.extensions_mut()
            .insert(SpanAttrs(visitor.into_span_fields()));
    }

    fn on_record(&self, id: &span::Id, values: &span::Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut visitor = JsonVisitor::default();
        values.record(&mut visitor);
        let mut extensions = span.extensions_mut();
        if let Some(SpanAttrs(fields)) = extensions.get_mut::<SpanAttrs>() {
            fields.extend(visitor.into_span_fields());
        } else {
            extensions.insert(SpanAttrs(visitor.into_span_fields()));
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        let mut record = Map::new();
        record.insert(
            TIME.into(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)),
        );
        record.insert(LEVEL.into(), Value::String(metadata.level().to_string()));
        record.insert(
            MESSAGE.into(),
            Value::String(visitor.message.take().unwrap_or_default()),
        );
        if self.source_enabled {
            record.insert(SOURCE.into(), Self::source(metadata));
        }
        record.extend(self.service.clone());

        let mut attrs = Map::new();
        if let Some(scope) = ctx.event_scope(event) {
            for span in scope.from_root() {
                if let Some(SpanAttrs(fields)) = span.extensions().get::<SpanAttrs>() {
                    attrs.extend(fields.clone());
                }
            }
        }
        attrs.extend(visitor.fields);
        for (key, value) in LogContext::current().attrs() {
            attrs.insert(key.to_string(), value.clone());
        }

        for (key, value) in attrs {
            let value = self.replace(&key, value);
            record.insert(key, value);
        }

        self.write_record(metadata, record);
    }
}

/// Collects `tracing` fields as JSON values.
#[derive(Default)]
struct JsonVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl JsonVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        if field.name() == TRACING_MESSAGE_FIELD {
            self.message = Some(match value {
                Value::String(text) => text,
                other => other.to_string(),
            });
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }

    /// Span fields keep a `message` field as a regular attribute.
    fn into_span_fields(self) -> Map<String, Value> {
        let mut fields = self.fields;
        if let Some(message) = self.message {
            fields.insert(TRACING_MESSAGE_FIELD.into(), Value::String(message));
        }
        fields
    }
}

impl Visit for JsonVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        // NaN and infinities have no JSON number form.
        let value = Number::from_f64(value)
            .map_or_else(|| Value::String(value.to_string()), Value::Number);
        self.insert(field, value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::Bool(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::String(value.to_string()));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, Value::String(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, Value::String(format!("{value:?}")));
    }
}
