use std::collections::HashSet;

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCheckResult {
    pub update_available: bool,
    pub is_dev: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UpdateCheckResult {
    pub fn dev_mode() -> Self {
        Self {
            update_available: false,
            is_dev: true,
            error: None,
        }
    }

    pub fn checked(update_available: bool) -> Self {
        Self {
            update_available,
            is_dev: false,
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            update_available: false,
            is_dev: false,
            error: Some(error),
        }
    }
}

/// Normalizes feed version strings so `v1.4.0` and `1.4.0` count as one release.
pub fn version_key(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_prefix = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    match semver::Version::parse(without_prefix) {
        Ok(version) => version.to_string(),
        Err(_) => trimmed.to_string(),
    }
}

#[derive(Debug, Default)]
pub struct UpdateTracker {
    announced: HashSet<String>,
    downloaded: Option<String>,
    available: bool,
}

impl UpdateTracker {
    /// Returns true the first time a version is seen.
    pub fn should_announce(&mut self, version: &str) -> bool {
        self.available = true;
        self.announced.insert(version_key(version))
    }

    pub fn mark_downloaded(&mut self, version: &str) {
        self.downloaded = Some(version_key(version));
    }

    pub fn is_downloaded(&self, version: &str) -> bool {
        self.downloaded.as_deref() == Some(version_key(version).as_str())
    }

    pub fn update_available(&self) -> bool {
        self.available
    }
}

#[derive(Debug, Default)]
pub struct DownloadProgress {
    downloaded: u64,
    total: Option<u64>,
}

impl DownloadProgress {
    /// Records a received chunk and returns the overall percentage when the
    /// total size is known.
    pub fn record(&mut self, chunk_len: usize, content_length: Option<u64>) -> Option<f64> {
        self.downloaded = self.downloaded.saturating_add(chunk_len as u64);
        if content_length.is_some() {
            self.total = content_length;
        }
        let total = self.total.filter(|total| *total > 0)?;
        Some(((self.downloaded as f64 / total as f64) * 100.0).min(100.0))
    }

    pub fn downloaded(&self) -> u64 {
        self.downloaded
    }
}
