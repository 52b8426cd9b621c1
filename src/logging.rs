//! Tracing subscriber setup
//!
//! Logs go to stderr so stdout stays reserved for sink output.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LOG_ENV;

/// Install the global subscriber.
///
/// The filter comes from `DEPCHECK_LOG` (default `info`). The returned guard
/// must be held until exit so buffered lines are flushed.
pub fn init(json: bool) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }

    guard
}
