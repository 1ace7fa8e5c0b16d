use std::time::Duration;
use log::debug;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

use crate::constants::*;
use crate::error::ApiError;
use crate::model::{image_source, DateEntry, ImageEntry};

/// The three retrievals the gallery needs from its backend.
pub trait Backend: Send + Sync {
    fn dates(&self) -> Result<Vec<DateEntry>, ApiError>;
    fn images(&self, date: Option<&str>) -> Result<Vec<ImageEntry>, ApiError>;
    fn image_bytes(&self, label: &str) -> Result<Vec<u8>, ApiError>;
}

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Transport { url: base_url.clone(), source })?;
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<u8>, ApiError> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(|source| ApiError::Transport { url: url.clone(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { url, status });
        }

        let body = response
            .bytes()
            .map_err(|source| ApiError::Transport { url: url.clone(), source })?;
        Ok(body.to_vec())
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ApiError> {
        let body = self.get(path, query)?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode { url: self.url(path), source })
    }
}

impl Backend for HttpBackend {
    fn dates(&self) -> Result<Vec<DateEntry>, ApiError> {
        self.get_json(DATES_ROUTE, &[])
    }

    fn images(&self, date: Option<&str>) -> Result<Vec<ImageEntry>, ApiError> {
        match date {
            Some(date) => self.get_json(IMAGES_ROUTE, &[("date", date)]),
            None => self.get_json(IMAGES_ROUTE, &[]),
        }
    }

    fn image_bytes(&self, label: &str) -> Result<Vec<u8>, ApiError> {
        self.get(&image_source(label), &[])
    }
}
