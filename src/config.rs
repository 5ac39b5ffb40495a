// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Configuration for capture limits and history bounds.

use serde::Deserialize;

use crate::repository::LogRepository;

#[derive(Debug, Clone, Deserialize)]
pub struct CaptureConfig {
    /// Truncation limit per captured body, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Capture request payloads.
    #[serde(default = "default_capture_bodies")]
    pub request_bodies: bool,

    /// Capture response payloads.
    #[serde(default = "default_capture_bodies")]
    pub response_bodies: bool,
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

fn default_capture_bodies() -> bool {
    true
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
            request_bodies: default_capture_bodies(),
            response_bodies: default_capture_bodies(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct HistoryConfig {
    /// Maximum entries retained; 0 means unbounded.
    #[serde(default)]
    pub max_entries: usize,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub capture: CaptureConfig,

    #[serde(default)]
    pub history: HistoryConfig,
}

impl Config {
    /// Load configuration from a TOML file. Absent sections and fields fall
    /// back to their defaults.
    pub async fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let s = tokio::fs::read_to_string(path.as_ref()).await?;
        let cfg: Self = toml::from_str(&s)?;
        Ok(cfg)
    }

    /// Build the repository this config describes (bounded or unbounded).
    pub fn repository(&self) -> LogRepository {
        if self.history.max_entries > 0 {
            LogRepository::bounded(self.history.max_entries)
        } else {
            LogRepository::new()
        }
    }
}
