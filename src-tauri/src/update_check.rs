use std::{cmp::Ordering, time::Duration};

use async_trait::async_trait;
use log::{debug, info, warn};
use semver::Version;
use serde::Deserialize;
use thiserror::Error;

use crate::{shell_config::ShellConfig, UPDATE_CHECK_USER_AGENT};

/// Newest published build as reported by the release service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReleaseInfo {
    pub(crate) version: String,
    pub(crate) url: String,
}

#[derive(Debug, Deserialize)]
struct LatestReleasePayload {
    tag_name: String,
    html_url: String,
}

impl From<LatestReleasePayload> for ReleaseInfo {
    fn from(payload: LatestReleasePayload) -> Self {
        Self {
            version: payload.tag_name,
            url: payload.html_url,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum UpdateCheckError {
    #[error("failed to request latest release: {0}")]
    Request(#[source] reqwest::Error),
    #[error("latest release request failed with HTTP {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("failed to parse latest release response: {0}")]
    Parse(String),
    #[error("latest release request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UpdateCheckOutcome {
    UpdateAvailable {
        current_version: String,
        latest_version: String,
        release_url: String,
    },
    UpToDate {
        current_version: String,
        latest_version: String,
    },
    Failed {
        reason: String,
    },
}

#[async_trait]
pub(crate) trait ReleaseSource: Send + Sync {
    async fn latest_release(&self) -> Result<ReleaseInfo, UpdateCheckError>;
}

pub(crate) struct GitHubReleaseSource {
    client: reqwest::Client,
    endpoint: String,
}

impl GitHubReleaseSource {
    pub(crate) fn new(
        api_base: &str,
        repository: &str,
        timeout: Duration,
    ) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .user_agent(UPDATE_CHECK_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|error| format!("Failed to build release http client: {error}"))?;
        Ok(Self {
            client,
            endpoint: latest_release_endpoint(api_base, repository),
        })
    }

    pub(crate) fn from_config(config: &ShellConfig) -> Result<Self, String> {
        Self::new(
            &config.release_api_base,
            &config.release_repository,
            config.update_check_timeout,
        )
    }
}

#[async_trait]
impl ReleaseSource for GitHubReleaseSource {
    async fn latest_release(&self) -> Result<ReleaseInfo, UpdateCheckError> {
        debug!("requesting latest release from {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(UpdateCheckError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpdateCheckError::HttpStatus(status));
        }

        let body = response.text().await.map_err(UpdateCheckError::Request)?;
        parse_latest_release(&body)
    }
}

pub(crate) fn latest_release_endpoint(api_base: &str, repository: &str) -> String {
    format!(
        "{}/repos/{}/releases/latest",
        api_base.trim_end_matches('/'),
        repository.trim_matches('/')
    )
}

fn parse_latest_release(body: &str) -> Result<ReleaseInfo, UpdateCheckError> {
    serde_json::from_str::<LatestReleasePayload>(body)
        .map(ReleaseInfo::from)
        .map_err(|error| UpdateCheckError::Parse(error.to_string()))
}

/// Drops one leading non-numeric character, so `v2.0.0` and `2.0.0` compare
/// the same.
pub(crate) fn normalize_release_tag(tag: &str) -> &str {
    let trimmed = tag.trim();
    match trimmed.chars().next() {
        Some(first) if !first.is_ascii_digit() => &trimmed[first.len_utf8()..],
        _ => trimmed,
    }
}

fn parse_version(raw: &str) -> Result<Version, UpdateCheckError> {
    Version::parse(raw).map_err(|error| UpdateCheckError::InvalidVersion {
        version: raw.to_string(),
        reason: error.to_string(),
    })
}

pub(crate) fn evaluate_release(
    current_version: &str,
    release: &ReleaseInfo,
) -> Result<UpdateCheckOutcome, UpdateCheckError> {
    let latest_raw = normalize_release_tag(&release.version);
    let latest = parse_version(latest_raw)?;
    let current = parse_version(current_version.trim())?;

    // Build metadata carries no precedence.
    if latest.cmp_precedence(&current) == Ordering::Greater {
        Ok(UpdateCheckOutcome::UpdateAvailable {
            current_version: current.to_string(),
            latest_version: latest.to_string(),
            release_url: release.url.clone(),
        })
    } else {
        Ok(UpdateCheckOutcome::UpToDate {
            current_version: current.to_string(),
            latest_version: latest.to_string(),
        })
    }
}

/// Runs one update check. Every failure, including a fetch that outlives
/// `timeout`, becomes [`UpdateCheckOutcome::Failed`].
pub(crate) async fn check_for_updates<S>(
    source: &S,
    current_version: &str,
    timeout: Duration,
) -> UpdateCheckOutcome
where
    S: ReleaseSource + ?Sized,
{
    let result = match tokio::time::timeout(timeout, source.latest_release()).await {
        Ok(fetched) => fetched.and_then(|release| evaluate_release(current_version, &release)),
        Err(_) => Err(UpdateCheckError::Timeout(timeout)),
    };

    match result {
        Ok(outcome) => {
            info!("update check finished: {outcome:?}");
            outcome
        }
        Err(error) => {
            warn!("update check failed: {error}");
            UpdateCheckOutcome::Failed {
                reason: error.to_string(),
            }
        }
    }
}
