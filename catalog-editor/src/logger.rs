//! Logging Infrastructure

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger with optional file output
///
/// `RUST_LOG` takes precedence over `log_level`. Console output goes to
/// stderr so stdout stays machine readable.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if log_dir is provided
    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists() {
            let file_appender = tracing_appender::rolling::daily(log_path, "catalog-editor");
            let _ = subscriber
                .with_ansi(false)
                .with_writer(file_appender)
                .try_init();
            return;
        }
    }

    let _ = subscriber.with_writer(std::io::stderr).try_init();
}
