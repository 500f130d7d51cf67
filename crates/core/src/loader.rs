use std::path::PathBuf;
use std::time::Duration;

use crate::dataset::DatasetDescriptor;
use crate::error::{ChartError, Result};
use crate::model::DatasetNode;

/// Where a render pass gets its dataset document from.
pub trait DatasetSource: Send + Sync {
    fn fetch(&self, dataset: &DatasetDescriptor) -> Result<DatasetNode>;
}

pub fn parse_dataset(body: &str) -> Result<DatasetNode> {
    Ok(serde_json::from_str(body)?)
}

/// Fetches the dataset's published URL over HTTP(S).
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self { client }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl DatasetSource for HttpSource {
    fn fetch(&self, dataset: &DatasetDescriptor) -> Result<DatasetNode> {
        let url = dataset.source_url;
        tracing::info!(%url, "fetching dataset");
        let fetch_err = |source: reqwest::Error| ChartError::Fetch {
            url: url.to_string(),
            source,
        };
        let resp = self.client.get(url).send().map_err(fetch_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ChartError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = resp.text().map_err(fetch_err)?;
        tracing::debug!(bytes = body.len(), "dataset downloaded");
        parse_dataset(&body)
    }
}

/// Reads a dataset document from disk regardless of which dataset was
/// selected; the descriptor still supplies title and description.
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for FileSource {
    fn fetch(&self, _dataset: &DatasetDescriptor) -> Result<DatasetNode> {
        tracing::info!(path = %self.path.display(), "reading dataset file");
        let body = std::fs::read_to_string(&self.path)?;
        parse_dataset(&body)
    }
}
