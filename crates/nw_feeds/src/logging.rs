use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Tags every message with a chain of prefixes, e.g. `[ingest] [newsapi]`.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    prefixes: Vec<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: String) -> Self {
        self.prefixes.push(prefix);
        self
    }

    fn tagged(&self, message: &str) -> String {
        let mut line = self.prefixes.join(" ");
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(message);
        line
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}", self.tagged(message));
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{}", self.tagged(message));
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}", self.tagged(message));
    }
}

/// Install the global subscriber once. `RUST_LOG` overrides `default_filter`.
pub fn init_logging(default_filter: &str) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    INIT.call_once(|| {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    });
}
