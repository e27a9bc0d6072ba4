//! Boundary dataset downloader with a fallback source.

use reqwest::Client;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{info, warn};
use xxhash_rust::xxh64::xxh64;

use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::models::FeatureCollection;

/// What a successful download produced
#[derive(Debug, Clone)]
pub struct DownloadReport {
    pub url: String,
    pub path: PathBuf,
    pub bytes: usize,
    pub features: usize,
    pub countries: usize,
    pub digest: u64,
}

/// Fetches the boundary dataset, trying the fallback source when the primary fails
pub struct Downloader {
    client: Client,
    source: SourceConfig,
    id_properties: Vec<String>,
}

impl Downloader {
    pub fn new(source: SourceConfig, id_properties: Vec<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("asciimap/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(source.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            source,
            id_properties,
        })
    }

    /// Download to `dest`. The file is only replaced once a body parsed as a
    /// FeatureCollection.
    pub async fn fetch(&self, dest: &Path) -> Result<DownloadReport> {
        let primary_err = match self.fetch_from(&self.source.primary_url, dest).await {
            Ok(report) => return Ok(report),
            Err(e) => e,
        };
        warn!(
            "Primary source {} failed: {}",
            self.source.primary_url, primary_err
        );

        let Some(fallback) = &self.source.fallback_url else {
            return Err(Error::SourcesExhausted {
                primary: primary_err.to_string(),
                fallback: "not configured".to_string(),
            });
        };

        info!("Trying alternative source...");
        self.fetch_from(fallback, dest)
            .await
            .map_err(|fallback_err| Error::SourcesExhausted {
                primary: primary_err.to_string(),
                fallback: fallback_err.to_string(),
            })
    }

    async fn fetch_from(&self, url: &str, dest: &Path) -> Result<DownloadReport> {
        let bytes = self.get_with_retry(url).await?;
        let collection = FeatureCollection::from_slice(&bytes, &self.id_properties)?;

        let countries: BTreeSet<&str> = collection
            .iter()
            .filter_map(|f| f.id.as_deref())
            .collect();
        info!(
            "Downloaded {} features spanning {} country codes",
            collection.len(),
            countries.len()
        );

        write_atomically(dest, &bytes)?;
        info!("Saved {} bytes to {}", bytes.len(), dest.display());

        Ok(DownloadReport {
            url: url.to_string(),
            path: dest.to_path_buf(),
            bytes: bytes.len(),
            features: collection.len(),
            countries: countries.len(),
            digest: xxh64(&bytes, 0),
        })
    }

    async fn get_with_retry(&self, url: &str) -> Result<Vec<u8>> {
        let max_attempts = self.source.max_attempts.max(1);
        let mut attempts = 0;

        loop {
            attempts += 1;
            info!(
                "Downloading {} (attempt {}/{})...",
                url, attempts, max_attempts
            );

            match self.get_once(url).await {
                Ok(bytes) => return Ok(bytes),
                Err(e) if attempts < max_attempts => {
                    warn!(
                        "Request to {} failed (attempt {}/{}): {}",
                        url, attempts, max_attempts, e
                    );
                    tokio::time::sleep(Duration::from_secs(2)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_once(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::HttpStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Write through a temp file in the destination directory, then rename over `dest`
pub fn write_atomically(dest: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(dest).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
