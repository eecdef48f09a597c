//! Fetching every group's CSV export before a rebuild.

use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use crate::services::dataset::{schedule_path, SheetAddress};
use crate::utils::logging::log_build_event;

/// Pause between attempts when the export host cannot be reached.
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

async fn fetch(client: &reqwest::Client, url: &str) -> reqwest::Result<Vec<u8>> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

/// Downloads `url` into `path`, returning the number of bytes written.
///
/// Connection failures and timeouts are retried until the host answers.
/// An error status from the host is not retried.
pub async fn download_export(
    client: &reqwest::Client,
    url: &str,
    path: &Path,
    retry_delay: Duration,
) -> Result<usize> {
    let body = loop {
        match fetch(client, url).await {
            Ok(body) => break body,
            Err(e) if e.is_connect() || e.is_timeout() => {
                tracing::warn!("BUILD: cannot reach {}, retrying: {}", url, e);
                tokio::time::sleep(retry_delay).await;
            }
            Err(e) => return Err(anyhow!("Failed to download {}: {}", url, e)),
        }
    };

    tokio::fs::write(path, &body)
        .await
        .map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))?;
    Ok(body.len())
}

/// Saves each group's export as `schedule_dir/schedule_<group>.csv`.
pub async fn download_all(
    client: &reqwest::Client,
    base_url: &str,
    addresses: &BTreeMap<String, SheetAddress>,
    schedule_dir: &Path,
    retry_delay: Duration,
) -> Result<usize> {
    tokio::fs::create_dir_all(schedule_dir)
        .await
        .map_err(|e| anyhow!("Failed to create {}: {}", schedule_dir.display(), e))?;

    for (group, address) in addresses {
        let url = address.export_url(base_url);
        let path = schedule_path(schedule_dir, group);
        let size = download_export(client, &url, &path, retry_delay).await?;
        log_build_event("downloaded schedule", &format!("{group}: {size} bytes from {url}"));
    }
    Ok(addresses.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path as UrlPath, Query},
        http::StatusCode,
        routing::get,
        Router,
    };
    use std::collections::HashMap;
    use tempfile::tempdir;

    async fn export(
        UrlPath(doc_id): UrlPath<String>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Result<String, StatusCode> {
        if doc_id == "missing" {
            return Err(StatusCode::NOT_FOUND);
        }
        let gid = params.get("gid").cloned().unwrap_or_default();
        Ok(format!("\"\",15.янв\nвремя,{doc_id}/{gid}\n"))
    }

    fn export_app() -> Router {
        Router::new().route("/spreadsheets/d/:doc_id/export", get(export))
    }

    async fn serve_on(listener: tokio::net::TcpListener) -> String {
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, export_app()).await.unwrap();
        });
        format!("http://{addr}/spreadsheets")
    }

    fn local_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    fn address(doc_id: &str, sheet_id: &str) -> SheetAddress {
        SheetAddress {
            doc_id: doc_id.to_string(),
            sheet_id: sheet_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_download_all_writes_each_group() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = serve_on(listener).await;
        let dir = tempdir().unwrap();
        let schedule_dir = dir.path().join("schedules");

        let mut addresses = BTreeMap::new();
        addresses.insert("Э-101".to_string(), address("doc-a", "0"));
        addresses.insert("Э-102".to_string(), address("doc-b", "7"));

        let client = local_client();
        let count = download_all(&client, &base_url, &addresses, &schedule_dir, RETRY_DELAY)
            .await
            .unwrap();

        assert_eq!(count, 2);
        let first = std::fs::read_to_string(schedule_dir.join("schedule_Э-101.csv")).unwrap();
        assert_eq!(first, "\"\",15.янв\nвремя,doc-a/0\n");
        let second = std::fs::read_to_string(schedule_dir.join("schedule_Э-102.csv")).unwrap();
        assert!(second.ends_with("doc-b/7\n"));
    }

    #[tokio::test]
    async fn test_download_retries_until_host_comes_up() {
        let reserved = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = reserved.local_addr().unwrap();
        drop(reserved);

        let dir = tempdir().unwrap();
        let path = dir.path().join("schedule_Э-101.csv");
        let url = address("doc-a", "3").export_url(&format!("http://{addr}/spreadsheets"));

        let download = tokio::spawn({
            let path = path.clone();
            async move {
                let client = local_client();
                download_export(&client, &url, &path, Duration::from_millis(50)).await
            }
        });

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!download.is_finished());
        let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
        serve_on(listener).await;

        let written = tokio::time::timeout(Duration::from_secs(10), download)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert!(written > 0);
        assert!(std::fs::read_to_string(&path).unwrap().ends_with("doc-a/3\n"));
    }

    #[tokio::test]
    async fn test_error_status_is_not_retried() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = serve_on(listener).await;
        let dir = tempdir().unwrap();
        let path = dir.path().join("schedule_x.csv");

        let client = local_client();
        let url = address("missing", "0").export_url(&base_url);
        let result = tokio::time::timeout(
            Duration::from_secs(10),
            download_export(&client, &url, &path, RETRY_DELAY),
        )
        .await
        .unwrap();

        assert!(result.unwrap_err().to_string().contains("404"));
        assert!(!path.exists());
    }
}
