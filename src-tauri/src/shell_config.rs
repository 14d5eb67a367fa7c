use std::{env, path::PathBuf, time::Duration};

use log::LevelFilter;
use url::Url;

use crate::{
    DEFAULT_APP_URL, DEFAULT_RELEASE_API_BASE, DEFAULT_UPDATE_CHECK_TIMEOUT, LOG_LEVEL_ENV,
    OVERRIDE_DIR_ENV, RELEASE_API_ENV, RELEASE_REPOSITORY, UPDATE_TIMEOUT_ENV, URL_ENV,
};

/// Runtime configuration of the shell, resolved once at startup.
#[derive(Debug, Clone)]
pub(crate) struct ShellConfig {
    pub(crate) app_url: Url,
    pub(crate) override_dir: Option<PathBuf>,
    pub(crate) release_api_base: String,
    pub(crate) release_repository: String,
    pub(crate) update_check_timeout: Duration,
    pub(crate) log_level: LevelFilter,
}

impl ShellConfig {
    pub(crate) fn from_env() -> Self {
        let read = |key: &str| {
            env::var(key)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            app_url: normalize_app_url(read(URL_ENV).as_deref().unwrap_or(DEFAULT_APP_URL)),
            override_dir: read(OVERRIDE_DIR_ENV).map(PathBuf::from),
            release_api_base: normalize_api_base(read(RELEASE_API_ENV).as_deref()),
            release_repository: RELEASE_REPOSITORY.to_string(),
            update_check_timeout: parse_timeout_ms(read(UPDATE_TIMEOUT_ENV).as_deref()),
            log_level: parse_log_level(read(LOG_LEVEL_ENV).as_deref()),
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            app_url: default_app_url(),
            override_dir: None,
            release_api_base: DEFAULT_RELEASE_API_BASE.to_string(),
            release_repository: RELEASE_REPOSITORY.to_string(),
            update_check_timeout: DEFAULT_UPDATE_CHECK_TIMEOUT,
            log_level: LevelFilter::Info,
        }
    }
}

fn default_app_url() -> Url {
    // DEFAULT_APP_URL is a compile-time literal known to parse.
    Url::parse(DEFAULT_APP_URL).expect("default app url is valid")
}

pub(crate) fn normalize_app_url(raw: &str) -> Url {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default_app_url();
    }

    match Url::parse(trimmed) {
        Ok(mut parsed) if matches!(parsed.scheme(), "http" | "https") => {
            if parsed.path().is_empty() {
                parsed.set_path("/");
            }
            parsed
        }
        _ => default_app_url(),
    }
}

fn normalize_api_base(raw: Option<&str>) -> String {
    raw.map(|value| value.trim_end_matches('/'))
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_RELEASE_API_BASE)
        .to_string()
}

pub(crate) fn parse_timeout_ms(raw: Option<&str>) -> Duration {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|millis| *millis > 0)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_UPDATE_CHECK_TIMEOUT)
}

pub(crate) fn parse_log_level(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|value| value.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}
