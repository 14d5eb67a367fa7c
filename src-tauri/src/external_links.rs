use std::process::{Command, Stdio};

use url::Url;

/// Hands a URL to whatever the OS uses to open links.
pub(crate) trait ExternalOpener {
    fn open_external(&self, url: &str) -> Result<(), String>;
}

pub(crate) struct SystemBrowser;

impl ExternalOpener for SystemBrowser {
    fn open_external(&self, url: &str) -> Result<(), String> {
        let parsed = parse_openable_url(url)?;
        open_url_with_system_browser(parsed.as_str())
    }
}

pub(crate) fn parse_openable_url(raw_url: &str) -> Result<Url, String> {
    let trimmed = raw_url.trim();
    if trimmed.is_empty() {
        return Err("Missing external URL.".to_string());
    }

    let parsed = Url::parse(trimmed).map_err(|error| format!("Invalid URL: {error}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(format!(
            "Unsupported URL scheme '{scheme}', only http/https are allowed."
        )),
    }
}

fn spawn_detached(program: &str, args: &[&str]) -> Result<(), String> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run '{program}': {error}"))
}

#[cfg(target_os = "macos")]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    spawn_detached("open", &[url])
}

#[cfg(target_os = "windows")]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    spawn_detached("rundll32", &["url.dll,FileProtocolHandler", url])
}

#[cfg(all(unix, not(target_os = "macos")))]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    spawn_detached("xdg-open", &[url])
}

#[cfg(not(any(target_os = "macos", target_os = "windows", unix)))]
fn open_url_with_system_browser(_url: &str) -> Result<(), String> {
    Err("Opening external URLs is not supported on this platform.".to_string())
}

#[cfg(test)]
mod tests {
    use super::parse_openable_url;

    #[test]
    fn parse_openable_url_accepts_http_and_https() {
        assert!(parse_openable_url("https://github.com/beqare/beShare").is_ok());
        assert!(parse_openable_url(" http://example.com ").is_ok());
    }

    #[test]
    fn parse_openable_url_rejects_other_schemes_and_blank_input() {
        assert_eq!(
            parse_openable_url("file:///etc/hosts").unwrap_err(),
            "Unsupported URL scheme 'file', only http/https are allowed."
        );
        assert_eq!(
            parse_openable_url("   ").unwrap_err(),
            "Missing external URL."
        );
        assert!(parse_openable_url("github.com").is_err());
    }
}
