use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes the logging system: console output always, plus a
/// daily-rotated JSON file when AGENDA_LOG_DIR points at a directory.
pub fn init_logging() {
    let filter = EnvFilter::from_default_env().add_directive("bxl_agenda=info".parse().unwrap());

    let file_layer = std::env::var("AGENDA_LOG_DIR").ok().map(|dir| {
        let _ = fs::create_dir_all(&dir);
        let file_appender = tracing_appender::rolling::daily(dir, "agenda.log");
        let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
        // The guard must outlive the process so logs are flushed on exit
        std::mem::forget(guard);
        fmt::layer().json().with_writer(non_blocking_writer)
    });

    let console_layer = fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();
}
