use std::time::Duration;

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_APP_URL: &str = "https://beqare.de/share";
pub const MAIN_WINDOW_LABEL: &str = "main";
pub const MAIN_WINDOW_TITLE: &str = "beShare";
pub const MAIN_WINDOW_WIDTH: f64 = 800.0;
pub const MAIN_WINDOW_HEIGHT: f64 = 600.0;
pub const MAIN_WINDOW_MIN_WIDTH: f64 = 800.0;
pub const MAIN_WINDOW_MIN_HEIGHT: f64 = 600.0;

pub const OVERRIDE_RESOURCE_DIR: &str = "overrides";
pub const OVERRIDE_STYLESHEET_FILE: &str = "override.css";
pub const OVERRIDE_SCRIPT_FILE: &str = "override.js";
pub const OVERRIDE_STYLE_ELEMENT_ID: &str = "beshare-override-style";

pub const RELEASE_REPOSITORY: &str = "beqare/beShare";
pub const DEFAULT_RELEASE_API_BASE: &str = "https://api.github.com";
pub const REPOSITORY_URL: &str = "https://github.com/beqare/beShare";
pub const DISCORD_URL: &str = "https://discord.gg/beqare";
pub const UPDATE_CHECK_USER_AGENT: &str =
    concat!("beshare-desktop/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_UPDATE_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

pub const LOG_FILE_NAME: &str = "beshare.log";

pub const URL_ENV: &str = "BESHARE_URL";
pub const OVERRIDE_DIR_ENV: &str = "BESHARE_OVERRIDE_DIR";
pub const RELEASE_API_ENV: &str = "BESHARE_RELEASE_API";
pub const UPDATE_TIMEOUT_ENV: &str = "BESHARE_UPDATE_TIMEOUT_MS";
pub const LOG_LEVEL_ENV: &str = "BESHARE_LOG";
