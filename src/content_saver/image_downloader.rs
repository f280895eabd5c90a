//! Image asset downloading

use futures::future::join_all;
use reqwest::Client;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::errors::{ConvertError, ConvertResult};
use crate::page_extractor::AssetReference;

/// Result of fetching one asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadOutcome {
    pub url: String,
    pub local_path: PathBuf,
    /// `None` on success
    pub error: Option<String>,
}

impl DownloadOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Download all assets concurrently into `dir`
///
/// Creates `dir` when missing. Every asset yields exactly one outcome, in
/// input order; a failed fetch never aborts the others. Only the first
/// asset per file name is fetched, later ones targeting the same file are
/// reported as failures so no two requests ever write one path.
pub async fn download_assets(
    assets: &[AssetReference],
    dir: &Path,
    client: &Client,
) -> ConvertResult<Vec<DownloadOutcome>> {
    if assets.is_empty() {
        return Ok(Vec::new());
    }

    tokio::fs::create_dir_all(dir).await?;

    let mut owners: HashMap<String, &str> = HashMap::new();
    let futures = assets.iter().map(|asset| {
        let client = client.clone();
        let file_name = asset.file_name();
        let local_path = dir.join(&file_name);
        let duplicate_of = match owners.get(&file_name) {
            Some(owner) => Some((*owner).to_string()),
            None => {
                owners.insert(file_name, &asset.remote_url);
                None
            }
        };

        async move {
            if let Some(owner) = duplicate_of {
                log::warn!("Skipping {}: same file name as {owner}", asset.remote_url);
                return DownloadOutcome {
                    url: asset.remote_url.clone(),
                    local_path,
                    error: Some(format!("skipped, same file name as {owner}")),
                };
            }

            let error = match download_one(&client, &asset.remote_url, &local_path).await {
                Ok(bytes) => {
                    log::debug!("Downloaded {} ({bytes} bytes)", asset.remote_url);
                    None
                }
                Err(e) => {
                    log::warn!("{e}");
                    Some(e.to_string())
                }
            };

            DownloadOutcome {
                url: asset.remote_url.clone(),
                local_path,
                error,
            }
        }
    });

    // Execute all downloads concurrently
    let outcomes = join_all(futures).await;

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    log::info!(
        "Downloaded {}/{} images into {}",
        outcomes.len() - failed,
        outcomes.len(),
        dir.display()
    );

    Ok(outcomes)
}

async fn download_one(client: &Client, url: &str, path: &Path) -> ConvertResult<usize> {
    let failure = |message: String| ConvertError::Download {
        url: url.to_string(),
        message,
    };

    let response = client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| failure(e.to_string()))?;

    let bytes = response.bytes().await.map_err(|e| failure(e.to_string()))?;

    tokio::fs::write(path, &bytes)
        .await
        .map_err(|e| failure(format!("writing {}: {e}", path.display())))?;

    Ok(bytes.len())
}
