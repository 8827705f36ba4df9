//! Ошибки синхронизации

use thiserror::Error;

/// Закрытый набор видов ошибок. Любая ошибка прерывает текущий прогон маркетплейса.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Превышено время ожидания ответа
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Ошибка соединения (DNS, отказ, разрыв)
    #[error("connection failure: {0}")]
    ConnectionFailure(String),

    /// Ответ с кодом, отличным от 2xx
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Битый архив, таблица или данные в ней, некорректный JSON
    #[error("data error: {0}")]
    Data(String),
}

pub type SyncResult<T> = Result<T, SyncError>;

impl SyncError {
    pub fn data(message: impl Into<String>) -> Self {
        SyncError::Data(message.into())
    }

    /// Ключи доступа отклонены маркетплейсом
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SyncError::Http { status: 401 | 403, .. })
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SyncError::Timeout(err.to_string())
        } else if err.is_decode() {
            SyncError::Data(err.to_string())
        } else if let Some(status) = err.status() {
            SyncError::Http {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            SyncError::ConnectionFailure(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Data(err.to_string())
    }
}

impl From<zip::result::ZipError> for SyncError {
    fn from(err: zip::result::ZipError) -> Self {
        SyncError::Data(format!("archive: {}", err))
    }
}

impl From<calamine::Error> for SyncError {
    fn from(err: calamine::Error) -> Self {
        SyncError::Data(format!("spreadsheet: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_statuses() {
        let err = SyncError::Http {
            status: 401,
            body: String::new(),
        };
        assert!(err.is_unauthorized());
        let err = SyncError::Http {
            status: 403,
            body: String::new(),
        };
        assert!(err.is_unauthorized());
        let err = SyncError::Http {
            status: 500,
            body: String::new(),
        };
        assert!(!err.is_unauthorized());
        assert!(!SyncError::data("bad row").is_unauthorized());
    }

    #[test]
    fn test_json_error_is_data() {
        let err: SyncError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(matches!(err, SyncError::Data(_)));
    }
}
