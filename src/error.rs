use thiserror::Error;

/// Failure talking to the gallery backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The two retrieval failures the gallery knows about. Both are logged and dropped.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Error loading dates: {0}")]
    Dates(#[source] ApiError),
    #[error("Error loading images ({filter}): {source}")]
    Images {
        filter: String,
        #[source]
        source: ApiError,
    },
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to download {label}: {source}")]
    Download {
        label: String,
        #[source]
        source: ApiError,
    },
    #[error("failed to decode image data for {label}: {reason}")]
    Decode { label: String, reason: String },
    #[error("failed to create texture for {label}: {reason}")]
    Upload { label: String, reason: String },
}
