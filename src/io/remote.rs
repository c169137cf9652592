use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use crate::model::config::RemoteConfig;
use crate::model::link::LinkDraft;
use crate::ops::normalize::normalize;

/// Error type for the one-shot remote import
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("could not build http client: {0}")]
    Client(reqwest::Error),
    #[error("request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        source: reqwest::Error,
    },
    #[error("{endpoint} answered with status {status}")]
    Status { endpoint: String, status: u16 },
    #[error("could not read response body: {0}")]
    Body(reqwest::Error),
    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a response body and normalize whatever links it holds
pub fn parse_remote_body(body: &str) -> Result<Vec<LinkDraft>, RemoteError> {
    let raw: Value = serde_json::from_str(body)?;
    Ok(normalize(&raw))
}

/// One GET against the configured endpoint. No retry.
pub fn fetch_remote_links(config: &RemoteConfig) -> Result<Vec<LinkDraft>, RemoteError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(RemoteError::Client)?;
    let response = client
        .get(&config.endpoint)
        .send()
        .map_err(|source| RemoteError::Network {
            endpoint: config.endpoint.clone(),
            source,
        })?;
    let status = response.status();
    if !status.is_success() {
        return Err(RemoteError::Status {
            endpoint: config.endpoint.clone(),
            status: status.as_u16(),
        });
    }
    let body = response.text().map_err(RemoteError::Body)?;
    let drafts = parse_remote_body(&body)?;
    log::debug!("remote returned {} candidate links", drafts.len());
    Ok(drafts)
}

/// Like [`fetch_remote_links`], but any failure is logged and yields nothing
pub fn fetch_remote_links_soft(config: &RemoteConfig) -> Vec<LinkDraft> {
    if !config.enabled {
        log::debug!("remote import disabled");
        return Vec::new();
    }
    match fetch_remote_links(config) {
        Ok(drafts) => drafts,
        Err(e) => {
            log::warn!("failed to fetch remote links: {e}");
            Vec::new()
        }
    }
}

/// A remote import running in the background.
///
/// Dropping the handle abandons the result; the worker's send then fails
/// and is ignored.
pub struct RemoteFetch {
    rx: mpsc::Receiver<Vec<LinkDraft>>,
    delivered: bool,
}

impl RemoteFetch {
    /// Start the fetch on its own thread
    pub fn spawn(config: RemoteConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let drafts = fetch_remote_links_soft(&config);
            let _ = tx.send(drafts);
        });
        RemoteFetch {
            rx,
            delivered: false,
        }
    }

    /// A fetch that has already completed with `drafts`
    pub fn ready(drafts: Vec<LinkDraft>) -> Self {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(drafts);
        RemoteFetch {
            rx,
            delivered: false,
        }
    }

    /// Non-blocking poll. Yields the result exactly once.
    pub fn poll(&mut self) -> Option<Vec<LinkDraft>> {
        if self.delivered {
            return None;
        }
        match self.rx.try_recv() {
            Ok(drafts) => {
                self.delivered = true;
                Some(drafts)
            }
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.delivered = true;
                None
            }
        }
    }

    pub fn is_done(&self) -> bool {
        self.delivered
    }
}
