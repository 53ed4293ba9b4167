//! Logging for hebrides tools.
//!
//! The library logs through the `log` facade. [`init_logging`] installs a
//! `LogTracer` so those records reach `tracing`, filters them, optionally
//! prints them to stderr and hands every event to the hook registered with
//! [`set_log_hook`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::subscriber::DefaultGuard;
use tracing::Subscriber;
use tracing_log::LogTracer;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Filter used when neither the environment nor the caller sets one.
pub const DEFAULT_LEVEL: &str = "warn";

/// One event as seen by the log hook.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub ts: String,
    pub level: String,
    pub target: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<JsonValue>,
}

/// How events are printed on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
    Off,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            "off" | "none" => Ok(LogFormat::Off),
            other => Err(format!("unknown log format `{other}`")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
            LogFormat::Off => "off",
        })
    }
}

type LogHook = Arc<dyn Fn(&LogRecord) + Send + Sync>;

static LOG_HOOK: OnceCell<LogHook> = OnceCell::new();

/// Keeps a thread-local subscriber alive when a global one was already set.
pub struct LoggingGuard {
    _guard: Option<DefaultGuard>,
}

#[derive(Debug, Clone, Default)]
pub struct LoggingOptions {
    /// Filter directive such as `info` or `hebrides=debug`.
    pub level: Option<String>,
    pub format: LogFormat,
}

/// Registers the process-wide log hook. Only the first call has an effect.
pub fn set_log_hook<F>(hook: F)
where
    F: Fn(&LogRecord) + Send + Sync + 'static,
{
    let _ = LOG_HOOK.set(Arc::new(hook));
}

pub fn init_logging(opts: LoggingOptions) -> LoggingGuard {
    // Route log:: macros into tracing
    let _ = LogTracer::init();

    let build_subscriber = || {
        tracing_subscriber::registry()
            .with(env_filter(opts.level.as_deref()))
            .with(LogBridgeLayer)
            .with(stderr_layer(opts.format))
    };

    let guard = match tracing::subscriber::set_global_default(build_subscriber()) {
        Ok(()) => None,
        Err(_) => Some(tracing::subscriber::set_default(build_subscriber())),
    };

    LoggingGuard { _guard: guard }
}

/// `RUST_LOG`, then `HEBRIDES_LOG`, then the configured level.
fn env_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("HEBRIDES_LOG"))
        .or_else(|_| EnvFilter::try_new(level.unwrap_or(DEFAULT_LEVEL)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

fn stderr_layer<S>(format: LogFormat) -> Option<Box<dyn Layer<S> + Send + Sync>>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    match format {
        LogFormat::Compact => Some(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .boxed(),
        ),
        LogFormat::Json => Some(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .boxed(),
        ),
        LogFormat::Off => None,
    }
}

struct LogBridgeLayer;

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

impl<S> Layer<S> for LogBridgeLayer
where
    S: Subscriber,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let Some(hook) = LOG_HOOK.get() else {
            return;
        };

        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        // Events bridged from `log` carry their origin in `log.*` fields
        let target = visitor
            .log_target
            .take()
            .unwrap_or_else(|| event.metadata().target().to_string());

        let record = LogRecord {
            ts: now_rfc3339(),
            level: event.metadata().level().to_string(),
            target,
            message: visitor
                .message
                .unwrap_or_else(|| event.metadata().name().to_string()),
            fields: visitor
                .fields
                .filter(|obj| obj.as_object().map(|m| !m.is_empty()).unwrap_or(false)),
        };

        hook(&record);
    }
}

#[derive(Default)]
struct JsonVisitor {
    message: Option<String>,
    log_target: Option<String>,
    fields: Option<JsonValue>,
}

impl JsonVisitor {
    fn insert(&mut self, field: &tracing::field::Field, entry: JsonValue) {
        match field.name() {
            "log.target" => self.log_target = entry.as_str().map(str::to_string),
            name if name.starts_with("log.") => {}
            name => {
                let obj = self
                    .fields
                    .get_or_insert_with(|| JsonValue::Object(Default::default()));
                if let JsonValue::Object(map) = obj {
                    map.insert(name.to_string(), entry);
                }
            }
        }
    }
}

impl tracing::field::Visit for JsonVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        let text = format!("{value:?}");
        if field.name() == "message" {
            self.message = Some(text);
        } else {
            self.insert(field, JsonValue::String(text));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.insert(field, JsonValue::String(value.to_string()));
        }
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.insert(field, serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.insert(field, serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.insert(field, serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.insert(field, JsonValue::Bool(value));
    }
}
