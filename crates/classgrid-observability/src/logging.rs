use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt as tfmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "compact" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Logging settings.
///
/// # Environment Variables
///
/// - `RUST_LOG`: full filter directive, takes precedence over `LOG_LEVEL`
/// - `LOG_LEVEL`: default level for the application (default: `info`)
/// - `LOG_FORMAT`: `pretty` (default) or `json`
/// - `LOG_DIR`: when set, JSON logs are also written to a daily rolling file there
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            dir: None,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: env::var("LOG_FORMAT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            dir: env::var("LOG_DIR")
                .ok()
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Filter used when `RUST_LOG` is not set. Noisy dependencies are held at `warn`.
    pub fn default_directives(&self) -> String {
        format!(
            "{},tower_http=warn,hyper=warn,sqlx=warn",
            self.level
        )
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directives()))
    }
}

/// Installs the global subscriber.
///
/// Returns the file writer's guard when `LOG_DIR` is set; keep it alive for the
/// lifetime of the process or buffered lines are lost on exit.
pub fn init_tracing(config: &LoggingConfig) -> Option<WorkerGuard> {
    let console_layer = match config.format {
        LogFormat::Pretty => tfmt::layer()
            .compact()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(config.env_filter())
            .boxed(),
        LogFormat::Json => tfmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_filter(config.env_filter())
            .boxed(),
    };

    let (file_layer, guard) = match &config.dir {
        Some(dir) => {
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, "classgrid.json");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tfmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(config.env_filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::debug!(format = %config.format, dir = ?config.dir, "Tracing initialized");
    guard
}
