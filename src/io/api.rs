// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! NVR backend HTTP API.
//!
//! All calls are blocking and meant to run on a background thread; results
//! are handed to the UI through a channel. Nothing is retried.

use crate::models::camera::NvrConfig;
use crate::models::stats::{CameraStorageMap, Stats};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;
use std::time::Duration;
use thiserror::Error;

const TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("failed to read response from {url}: {source}")]
    Read {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// Why a `config/set` update did not go through.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    /// The backend answered with an error payload.
    #[error("{0}")]
    Rejected(String),

    /// No structured answer: connection failure or an unreadable error response.
    #[error("{0}")]
    Transport(String),
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

/// Ensure the host ends with exactly one `/`.
pub fn normalize_host(host: &str) -> String {
    format!("{}/", host.trim().trim_end_matches('/'))
}

/// Interpret the status and body of a `config/set` response.
pub fn persist_outcome(status: u16, body: &str) -> Result<String, PersistError> {
    let message = serde_json::from_str::<MessageBody>(body)
        .ok()
        .and_then(|parsed| parsed.message);
    if (200..300).contains(&status) {
        return Ok(message.unwrap_or_else(|| body.trim().to_string()));
    }
    match message {
        Some(message) => Err(PersistError::Rejected(message)),
        None => Err(PersistError::Transport(format!(
            "Request failed with status code {}",
            status
        ))),
    }
}

/// Client for one NVR instance.
#[derive(Clone)]
pub struct ApiClient {
    host: String,
    agent: ureq::Agent,
}

impl ApiClient {
    pub fn new(host: &str) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(TIMEOUT).build();
        Self {
            host: normalize_host(host),
            agent,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Absolute URL of an API path (`config`, `front/latest.jpg`, ...).
    pub fn url(&self, path: &str) -> String {
        format!("{}api/{}", self.host, path.trim_start_matches('/'))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self.agent.get(&url).call().map_err(|e| ApiError::Http {
            url: url.clone(),
            source: Box::new(e),
        })?;
        response.into_json().map_err(|source| ApiError::Read { url, source })
    }

    pub fn fetch_config(&self) -> Result<NvrConfig, ApiError> {
        self.get_json("config")
    }

    pub fn fetch_stats(&self) -> Result<Stats, ApiError> {
        self.get_json("stats")
    }

    pub fn fetch_storage(&self) -> Result<CameraStorageMap, ApiError> {
        self.get_json("recordings/storage")
    }

    /// Raw bytes of the camera's latest still image.
    pub fn fetch_snapshot(&self, camera: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.url(&format!("{}/latest.jpg", camera));
        let response = self.agent.get(&url).call().map_err(|e| ApiError::Http {
            url: url.clone(),
            source: Box::new(e),
        })?;
        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|source| ApiError::Read { url, source })?;
        Ok(bytes)
    }

    /// Send one `config/set` update and return the backend's confirmation.
    pub fn set_config(&self, pairs: &[(String, String)]) -> Result<String, PersistError> {
        let url = self.url("config/set");
        let request = pairs
            .iter()
            .fold(self.agent.put(&url), |request, (key, value)| request.query(key, value));

        match request.call() {
            Ok(response) => {
                let status = response.status();
                let body = response
                    .into_string()
                    .map_err(|e| PersistError::Transport(e.to_string()))?;
                persist_outcome(status, &body)
            }
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                persist_outcome(status, &body)
            }
            Err(ureq::Error::Transport(transport)) => Err(PersistError::Transport(transport.to_string())),
        }
    }
}
