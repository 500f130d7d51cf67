use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to fetch dataset from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("dataset request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("dataset payload is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("dataset root has neither children nor a value")]
    Empty,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
