use serde::de::DeserializeOwned;
use std::time::Duration;

use super::error::{SyncError, SyncResult};
use super::request_log::{preview, RequestLog};

/// HTTP-клиент с общим таймаутом
pub fn build_client(timeout: Duration) -> SyncResult<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Прочитать тело ответа; статус вне 2xx превращается в `SyncError::Http`
pub async fn read_body(response: reqwest::Response, log: &RequestLog) -> SyncResult<String> {
    let status = response.status();
    log.write(&format!("Response status: {}", status));

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        log.write(&format!("ERROR Response body:\n{}", body));
        return Err(SyncError::Http {
            status: status.as_u16(),
            body: preview(&body),
        });
    }

    let body = response.text().await?;
    log.write(&format!("=== RESPONSE BODY ===\n{}\n", body));
    Ok(body)
}

pub fn parse_json<T: DeserializeOwned>(body: &str, api: &str, log: &RequestLog) -> SyncResult<T> {
    serde_json::from_str::<T>(body).map_err(|e| {
        let error_msg = format!("Failed to parse {} JSON: {}", api, e);
        log.write(&error_msg);
        tracing::error!("{}", error_msg);
        SyncError::Data(format!("{}. Response: {}", error_msg, preview(body)))
    })
}
