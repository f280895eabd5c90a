use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::errors::ConvertResult;
use crate::page_extractor::AssetReference;
use crate::utils::IMAGE_LIST_SUFFIX;

/// Write `{output_dir}/{basename}.md`, creating the directory if needed
///
/// # Returns
///
/// * `ConvertResult<PathBuf>` - The written file's path
pub async fn save_markdown_content(
    content: &str,
    output_dir: &Path,
    output_basename: &str,
) -> ConvertResult<PathBuf> {
    tokio::fs::create_dir_all(output_dir).await?;

    let path = output_dir.join(format!("{output_basename}.md"));
    tokio::fs::write(&path, content).await?;

    log::debug!("Saved markdown ({} bytes) to {}", content.len(), path.display());
    Ok(path)
}

/// One `url` line plus an indented `dir=` option per asset.
///
/// This is the input-file format `aria2c -i` understands.
#[must_use]
pub fn format_image_list(assets: &[AssetReference], download_dir: &Path) -> String {
    let dir = std::path::absolute(download_dir).unwrap_or_else(|_| download_dir.to_path_buf());

    let mut list = String::new();
    for asset in assets {
        let _ = write!(list, "{}\n  dir={}\n", asset.remote_url, dir.display());
    }
    list
}

/// Write `{output_dir}/{basename}.images.txt` listing every asset
pub async fn save_image_list(
    assets: &[AssetReference],
    download_dir: &Path,
    output_dir: &Path,
    output_basename: &str,
) -> ConvertResult<PathBuf> {
    let path = output_dir.join(format!("{output_basename}{IMAGE_LIST_SUFFIX}"));
    tokio::fs::write(&path, format_image_list(assets, download_dir)).await?;

    log::debug!("Saved image list with {} entries to {}", assets.len(), path.display());
    Ok(path)
}
