//! Background retrievals.
//!
//! Every request runs on its own short-lived worker thread against the blocking
//! backend. Results come back over a channel that the UI thread drains once per
//! frame, so all gallery state stays on the UI thread.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use log::{debug, error};

use crate::api::Backend;
use crate::error::{ApiError, LoadError};
use crate::model::{DateEntry, ImageEntry};

/// Tags an image-list request; only the newest ticket's answer is rendered.
pub type Ticket = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Dates,
    Images { ticket: Ticket, filter: Option<DateEntry> },
    ImageBytes { widget: u64, index: usize, label: String },
}

#[derive(Debug)]
pub enum Response {
    Dates(Result<Vec<DateEntry>, LoadError>),
    Images { ticket: Ticket, result: Result<Vec<ImageEntry>, LoadError> },
    ImageBytes { widget: u64, index: usize, label: String, result: Result<Vec<u8>, ApiError> },
}

/// Where the gallery sends the retrievals it wants performed.
pub trait RequestSink {
    fn submit(&mut self, request: Request);
}

pub struct Fetcher {
    backend: Arc<dyn Backend>,
    tx: Sender<Response>,
    rx: Receiver<Response>,
}

impl Fetcher {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { backend, tx, rx }
    }

    /// Everything that finished since the last call, without blocking.
    pub fn drain(&self) -> Vec<Response> {
        self.rx.try_iter().collect()
    }

    #[cfg(test)]
    fn wait(&self, timeout: std::time::Duration) -> Option<Response> {
        self.rx.recv_timeout(timeout).ok()
    }
}

fn perform(backend: &dyn Backend, request: Request) -> Response {
    match request {
        Request::Dates => Response::Dates(backend.dates().map_err(LoadError::Dates)),
        Request::Images { ticket, filter } => {
            let result = backend.images(filter.as_deref()).map_err(|source| LoadError::Images {
                filter: filter.clone().unwrap_or_else(|| "all".to_string()),
                source,
            });
            Response::Images { ticket, result }
        }
        Request::ImageBytes { widget, index, label } => {
            let result = backend.image_bytes(&label);
            Response::ImageBytes { widget, index, label, result }
        }
    }
}

impl RequestSink for Fetcher {
    fn submit(&mut self, request: Request) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        let name = match &request {
            Request::Dates => "fetch-dates".to_string(),
            Request::Images { ticket, .. } => format!("fetch-images-{}", ticket),
            Request::ImageBytes { index, .. } => format!("fetch-bytes-{}", index),
        };

        let spawned = thread::Builder::new().name(name.clone()).spawn(move || {
            let response = perform(backend.as_ref(), request);
            if tx.send(response).is_err() {
                debug!("Receiver gone, dropping response");
            }
        });

        if let Err(e) = spawned {
            error!("Failed to spawn {} worker: {}", name, e);
        }
    }
}
