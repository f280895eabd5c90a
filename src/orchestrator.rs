//! Batch conversion of exported posts
//!
//! Every input file is converted concurrently, each on its own blocking
//! task. A skip or failure is recorded against its file and never touches
//! the others. Image downloads start only once every Markdown file has been
//! written.

use futures::future::join_all;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tracing::Instrument;

use crate::config::ConverterOptions;
use crate::content_saver::{
    DownloadOutcome, convert_post_html, download_assets, save_image_list, save_markdown_content,
};
use crate::errors::{ConvertError, ConvertResult};
use crate::page_extractor::AssetReference;

/// A successfully written post
#[derive(Debug, Clone)]
pub struct FileConversion {
    pub source: PathBuf,
    pub output_path: PathBuf,
    pub image_list_path: Option<PathBuf>,
    pub assets: Vec<AssetReference>,
    pub download_dir: PathBuf,
}

#[derive(Debug)]
pub enum FileStatus {
    Converted(FileConversion),
    /// Classified as a non-post
    Skipped(String),
    Failed(ConvertError),
}

#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
}

/// Per-file results plus the download phase outcomes
#[derive(Debug, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    pub downloads: Vec<DownloadOutcome>,
}

impl BatchReport {
    pub fn converted(&self) -> impl Iterator<Item = &FileConversion> {
        self.files.iter().filter_map(|f| match &f.status {
            FileStatus::Converted(conversion) => Some(conversion),
            _ => None,
        })
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Skipped(_)))
            .count()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Failed(_)))
            .count()
    }

    /// Skips are not failures
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }

    #[must_use]
    pub fn failed_downloads(&self) -> usize {
        self.downloads.iter().filter(|d| !d.is_success()).count()
    }
}

/// Convert one export and write `{name}.md` next to it
pub async fn convert_file(path: &Path, options: &ConverterOptions) -> ConvertResult<FileConversion> {
    let html = tokio::fs::read_to_string(path).await?;
    let result = convert_post_html(&html, path, options).await?;

    let input_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let output_path = save_markdown_content(&result.content, input_dir, &result.output_basename).await?;
    let download_dir = options.download_dir_for(input_dir, &result.output_basename);

    let image_list_path = if options.write_image_list() && !result.assets.is_empty() {
        Some(save_image_list(&result.assets, &download_dir, input_dir, &result.output_basename).await?)
    } else {
        None
    };

    Ok(FileConversion {
        source: path.to_path_buf(),
        output_path,
        image_list_path,
        assets: result.assets,
        download_dir,
    })
}

/// Convert all files concurrently, then download their images
pub async fn convert_files(paths: &[PathBuf], options: &ConverterOptions) -> BatchReport {
    let conversions = paths.iter().map(|path| {
        let span = tracing::info_span!("convert", file = %path.display());
        async move {
            let status = match convert_file(path, options).await {
                Ok(conversion) => FileStatus::Converted(conversion),
                Err(e) if e.is_skip() => {
                    log::info!("{e}");
                    FileStatus::Skipped(e.to_string())
                }
                Err(e) => {
                    log::error!("Failed to convert {}: {e}", path.display());
                    FileStatus::Failed(e)
                }
            };
            FileReport {
                path: path.clone(),
                status,
            }
        }
        .instrument(span)
    });

    let mut report = BatchReport {
        files: join_all(conversions).await,
        downloads: Vec::new(),
    };

    if options.download_images() {
        report.downloads = download_phase(&report).await;
    }

    log::info!(
        "{} converted, {} skipped, {} failed",
        report.converted().count(),
        report.skipped_count(),
        report.failed_count()
    );
    report
}

async fn download_phase(report: &BatchReport) -> Vec<DownloadOutcome> {
    let client = match Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            log::error!("Cannot create HTTP client, skipping image downloads: {e}");
            return Vec::new();
        }
    };

    let batches = report
        .converted()
        .filter(|conversion| !conversion.assets.is_empty())
        .map(|conversion| {
            let client = &client;
            let span = tracing::info_span!("download", file = %conversion.source.display());
            async move {
                match download_assets(&conversion.assets, &conversion.download_dir, client).await {
                    Ok(outcomes) => outcomes,
                    Err(e) => {
                        log::error!(
                            "Cannot prepare {}: {e}",
                            conversion.download_dir.display()
                        );
                        conversion
                            .assets
                            .iter()
                            .map(|asset| DownloadOutcome {
                                url: asset.remote_url.clone(),
                                local_path: conversion.download_dir.join(asset.file_name()),
                                error: Some(e.to_string()),
                            })
                            .collect()
                    }
                }
            }
            .instrument(span)
        });

    join_all(batches).await.into_iter().flatten().collect()
}
