use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_PREFIX: &str = "ma-valuation.log";

/// Directives applied when `RUST_LOG` is not set. Dependency chatter is kept at warn.
const DEFAULT_DIRECTIVES: &str = "info,hyper=warn,h2=warn,tower=warn,sqlx=warn";

/// Installs the global tracing subscriber.
///
/// Logs always go to stderr, leaving stdout to command output. With a `log_dir`
/// they are also written to a daily rolling file through a non-blocking writer;
/// the returned guard must be held for the lifetime of the process or buffered
/// lines are lost.
///
/// Installing twice is a no-op, which keeps tests that share a process quiet.
pub fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer().with_ansi(false).with_writer(writer);

            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(console_layer)
                .with(file_layer)
                .try_init();
            Some(guard)
        }
        None => {
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(console_layer)
                .try_init();
            None
        }
    }
}
