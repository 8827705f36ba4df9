use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_DIR: &str = "target/logs";
pub const LOG_FILE_NAME: &str = "stock_sync.log";

/// Открыть (или создать) файл общего лога в `dir`
pub fn open_log_file(dir: &Path) -> std::io::Result<File> {
    std::fs::create_dir_all(dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))
}

/// Консоль + файл `dir/stock_sync.log`.
///
/// Если файл открыть не удалось, пишем только в консоль: лог не должен мешать синхронизации.
pub fn init_tracing(dir: &Path) {
    let (log_file, file_error) = match open_log_file(dir) {
        Ok(file) => (Some(file), None),
        Err(e) => (None, Some(e)),
    };

    let file_layer = log_file.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_writer(Arc::new(file))
            .with_ansi(false)
    });

    let initialized = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                // Логи транспорта только при проблемах
                "info,hyper=warn,reqwest=warn".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .try_init();

    if let Err(e) = initialized {
        eprintln!("tracing is already initialized: {}", e);
    }

    if let Some(e) = file_error {
        tracing::warn!(
            "Log file {} is unavailable, logging to console only: {}",
            dir.join(LOG_FILE_NAME).display(),
            e
        );
    }
}
