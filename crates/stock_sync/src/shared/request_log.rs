use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Журнал обмена с внешним API (по файлу на API).
///
/// Ошибки записи игнорируются: журнал не должен прерывать синхронизацию.
#[derive(Debug, Clone)]
pub struct RequestLog {
    path: Option<PathBuf>,
}

impl RequestLog {
    pub fn new(dir: Option<&Path>, file_name: &str) -> Self {
        let path = dir.map(|dir| {
            let _ = std::fs::create_dir_all(dir);
            dir.join(file_name)
        });
        Self { path }
    }

    /// Записать в лог-файл
    pub fn write(&self, message: &str) {
        let Some(path) = &self.path else {
            return;
        };
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let _ = writeln!(file, "[{}] {}", timestamp, message);
        }
    }
}

/// Первые 500 символов тела ответа для сообщений об ошибках
pub fn preview(body: &str) -> String {
    let preview: String = body.chars().take(500).collect();
    if preview.len() < body.len() {
        format!("{}...", preview)
    } else {
        preview
    }
}
