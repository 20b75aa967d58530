use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/1TU93SnjbyWffcUas3nl2r6B0wQhOZrc_IAPvLDlNIDM/export?format=csv";

/// The one failure the pipeline reports: the raw text never arrived.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("{url} returned non-text content ({content_type})")]
    NotText { url: String, content_type: String },
    #[error("could not read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{origin} is not valid UTF-8 text")]
    Decode { origin: String },
}

/// Where registration text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    pub fn describe(&self) -> String {
        match self {
            DataSource::Url(url) => url.clone(),
            DataSource::File(path) => path.display().to_string(),
        }
    }

    /// Single attempt, no retry.
    pub async fn fetch(&self, timeout: Duration) -> Result<String, FetchError> {
        let start = Instant::now();
        debug!("Fetching registrations - source={}", self.describe());

        let text = match self {
            DataSource::Url(url) => fetch_url(url, timeout).await?,
            DataSource::File(path) => read_file(path).await?,
        };

        info!(
            "Registration fetch completed - source={}, bytes={}, duration={:.2}s",
            self.describe(),
            text.len(),
            start.elapsed().as_secs_f32()
        );
        Ok(text)
    }
}

async fn fetch_url(url: &str, timeout: Duration) -> Result<String, FetchError> {
    let request_error = |source| FetchError::Request {
        url: url.to_string(),
        source,
    };

    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(request_error)?;
    let resp = client.get(url).send().await.map_err(request_error)?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    if let Some(content_type) = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    {
        if !is_text_content(content_type) {
            return Err(FetchError::NotText {
                url: url.to_string(),
                content_type: content_type.to_string(),
            });
        }
    }

    let bytes = resp.bytes().await.map_err(request_error)?;
    decode(bytes.to_vec(), url)
}

async fn read_file(path: &Path) -> Result<String, FetchError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| FetchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode(bytes, &path.display().to_string())
}

fn decode(bytes: Vec<u8>, origin: &str) -> Result<String, FetchError> {
    String::from_utf8(bytes).map_err(|_| FetchError::Decode {
        origin: origin.to_string(),
    })
}

pub fn is_text_content(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime.starts_with("text/") || mime.ends_with("/csv")
}
