use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use log::{debug, error, info, warn};
use tauri::{path::BaseDirectory, AppHandle, Manager, Runtime, WebviewWindow};

use crate::{
    shell_config::ShellConfig, OVERRIDE_RESOURCE_DIR, OVERRIDE_SCRIPT_FILE,
    OVERRIDE_STYLESHEET_FILE, OVERRIDE_STYLE_ELEMENT_ID,
};

/// The displayed page a local override is applied to.
pub(crate) trait RenderSurface {
    fn insert_style(&self, css: &str) -> Result<(), String>;
    fn execute_script(&self, script: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OverrideKind {
    Stylesheet,
    Script,
}

impl fmt::Display for OverrideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stylesheet => f.write_str("stylesheet override"),
            Self::Script => f.write_str("script override"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OverrideOutcome {
    Applied,
    NotFound(PathBuf),
    ReadError { path: PathBuf, error: String },
    InjectError { path: PathBuf, error: String },
}

impl OverrideOutcome {
    pub(crate) fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OverrideReport {
    pub(crate) stylesheet: OverrideOutcome,
    pub(crate) script: OverrideOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OverridePaths {
    pub(crate) stylesheet: PathBuf,
    pub(crate) script: PathBuf,
}

impl OverridePaths {
    pub(crate) fn in_dir(dir: &Path) -> Self {
        Self {
            stylesheet: dir.join(OVERRIDE_STYLESHEET_FILE),
            script: dir.join(OVERRIDE_SCRIPT_FILE),
        }
    }

    /// Configured directory first, then the bundled resource directory, then
    /// the directory of the running executable.
    pub(crate) fn resolve<R: Runtime>(app_handle: &AppHandle<R>, config: &ShellConfig) -> Self {
        if let Some(dir) = &config.override_dir {
            return Self::in_dir(dir);
        }

        if let Ok(dir) = app_handle
            .path()
            .resolve(OVERRIDE_RESOURCE_DIR, BaseDirectory::Resource)
        {
            return Self::in_dir(&dir);
        }

        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        Self::in_dir(&exe_dir)
    }
}

fn apply_one<S>(surface: &S, kind: OverrideKind, path: &Path) -> OverrideOutcome
where
    S: RenderSurface + ?Sized,
{
    if !path.exists() {
        return OverrideOutcome::NotFound(path.to_path_buf());
    }

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) => {
            return OverrideOutcome::ReadError {
                path: path.to_path_buf(),
                error: error.to_string(),
            };
        }
    };

    let injected = match kind {
        OverrideKind::Stylesheet => surface.insert_style(&text),
        OverrideKind::Script => surface.execute_script(&text),
    };
    match injected {
        Ok(()) => OverrideOutcome::Applied,
        Err(error) => OverrideOutcome::InjectError {
            path: path.to_path_buf(),
            error,
        },
    }
}

/// Reads both override files fresh and applies them, stylesheet before script.
/// A failure on one resource never skips the other.
pub(crate) fn apply_overrides<S>(surface: &S, paths: &OverridePaths) -> OverrideReport
where
    S: RenderSurface + ?Sized,
{
    let stylesheet = apply_one(surface, OverrideKind::Stylesheet, &paths.stylesheet);
    let script = apply_one(surface, OverrideKind::Script, &paths.script);
    OverrideReport { stylesheet, script }
}

fn log_outcome(kind: OverrideKind, outcome: &OverrideOutcome) {
    match outcome {
        OverrideOutcome::Applied => info!("{kind} applied"),
        OverrideOutcome::NotFound(path) => {
            warn!("{kind} not found: {}", path.display())
        }
        OverrideOutcome::ReadError { path, error } => {
            error!("failed to read {kind} {}: {error}", path.display())
        }
        OverrideOutcome::InjectError { path, error } => {
            error!("failed to inject {kind} {}: {error}", path.display())
        }
    }
}

pub(crate) fn log_override_report(report: &OverrideReport) {
    log_outcome(OverrideKind::Stylesheet, &report.stylesheet);
    log_outcome(OverrideKind::Script, &report.script);
    debug!(
        "overrides applied: stylesheet={} script={}",
        report.stylesheet.is_applied(),
        report.script.is_applied()
    );
}

/// Script that places `css` in a single shell-owned constructed stylesheet,
/// replacing whatever an earlier application left there. Adopted sheets are
/// not subject to the page's `style-src`; engines without constructable
/// stylesheets get a `<style>` element instead.
pub(crate) fn style_injection_script(css: &str) -> Result<String, String> {
    let css_literal = serde_json::to_string(css)
        .map_err(|error| format!("Failed to encode stylesheet: {error}"))?;
    let id_literal = serde_json::to_string(OVERRIDE_STYLE_ELEMENT_ID)
        .map_err(|error| format!("Failed to encode style element id: {error}"))?;

    Ok(format!(
        r#"(() => {{
  const id = {id_literal};
  const css = {css_literal};
  if (typeof CSSStyleSheet === "function" && "adoptedStyleSheets" in Document.prototype) {{
    let sheet = window[id];
    if (!(sheet instanceof CSSStyleSheet)) {{
      sheet = new CSSStyleSheet();
      window[id] = sheet;
    }}
    sheet.replaceSync(css);
    if (!document.adoptedStyleSheets.includes(sheet)) {{
      document.adoptedStyleSheets = [...document.adoptedStyleSheets, sheet];
    }}
    return;
  }}
  let style = document.getElementById(id);
  if (!style) {{
    style = document.createElement("style");
    style.id = id;
    (document.head || document.documentElement).appendChild(style);
  }}
  style.textContent = css;
}})();"#
    ))
}

impl<R: Runtime> RenderSurface for WebviewWindow<R> {
    fn insert_style(&self, css: &str) -> Result<(), String> {
        let script = style_injection_script(css)?;
        self.eval(&script).map_err(|error| error.to_string())
    }

    fn execute_script(&self, script: &str) -> Result<(), String> {
        self.eval(script).map_err(|error| error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct RecordingSurface {
        calls: RefCell<Vec<(OverrideKind, String)>>,
        reject_styles: bool,
    }

    impl RenderSurface for RecordingSurface {
        fn insert_style(&self, css: &str) -> Result<(), String> {
            if self.reject_styles {
                return Err("style injection rejected".to_string());
            }
            self.calls
                .borrow_mut()
                .push((OverrideKind::Stylesheet, css.to_string()));
            Ok(())
        }

        fn execute_script(&self, script: &str) -> Result<(), String> {
            self.calls
                .borrow_mut()
                .push((OverrideKind::Script, script.to_string()));
            Ok(())
        }
    }

    fn write_overrides(dir: &Path, css: Option<&str>, js: Option<&str>) -> OverridePaths {
        let paths = OverridePaths::in_dir(dir);
        if let Some(css) = css {
            fs::write(&paths.stylesheet, css).expect("write stylesheet");
        }
        if let Some(js) = js {
            fs::write(&paths.script, js).expect("write script");
        }
        paths
    }

    #[test]
    fn apply_overrides_covers_every_presence_combination() {
        for (css, js) in [
            (None, None),
            (Some("body{}"), None),
            (None, Some("void 0;")),
            (Some("body{}"), Some("void 0;")),
        ] {
            let dir = tempfile::tempdir().expect("tempdir");
            let paths = write_overrides(dir.path(), css, js);
            let surface = RecordingSurface::default();

            let report = apply_overrides(&surface, &paths);

            assert_eq!(report.stylesheet.is_applied(), css.is_some());
            assert_eq!(report.script.is_applied(), js.is_some());
            if css.is_none() {
                assert_eq!(
                    report.stylesheet,
                    OverrideOutcome::NotFound(paths.stylesheet.clone())
                );
            }
            if js.is_none() {
                assert_eq!(report.script, OverrideOutcome::NotFound(paths.script.clone()));
            }

            let expected: Vec<(OverrideKind, String)> = css
                .map(|text| (OverrideKind::Stylesheet, text.to_string()))
                .into_iter()
                .chain(js.map(|text| (OverrideKind::Script, text.to_string())))
                .collect();
            assert_eq!(*surface.calls.borrow(), expected);
        }
    }

    #[test]
    fn apply_overrides_keeps_going_after_inject_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = write_overrides(dir.path(), Some("body{}"), Some("void 0;"));
        let surface = RecordingSurface {
            reject_styles: true,
            ..RecordingSurface::default()
        };

        let report = apply_overrides(&surface, &paths);

        assert_eq!(
            report.stylesheet,
            OverrideOutcome::InjectError {
                path: paths.stylesheet.clone(),
                error: "style injection rejected".to_string(),
            }
        );
        assert!(report.script.is_applied());
    }

    #[test]
    fn apply_overrides_reports_read_error_for_unreadable_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = OverridePaths::in_dir(dir.path());
        fs::create_dir(&paths.stylesheet).expect("create directory in place of file");
        let surface = RecordingSurface::default();

        let report = apply_overrides(&surface, &paths);

        assert!(matches!(report.stylesheet, OverrideOutcome::ReadError { .. }));
        assert!(surface.calls.borrow().is_empty());
    }

    #[test]
    fn apply_overrides_twice_reapplies_identical_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = write_overrides(dir.path(), Some("a{color:red}"), Some("window.x = 1;"));
        let surface = RecordingSurface::default();

        let first = apply_overrides(&surface, &paths);
        let second = apply_overrides(&surface, &paths);

        assert_eq!(first, second);
        let calls = surface.calls.borrow();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[..2], calls[2..]);
    }

    #[test]
    fn style_injection_script_reuses_single_element() {
        let script = style_injection_script("body { content: \"</style>\"; }").expect("script");
        assert!(script.contains("document.getElementById(id)"));
        assert!(script.contains(&format!("\"{OVERRIDE_STYLE_ELEMENT_ID}\"")));
        assert!(script.contains(r#""body { content: \"</style>\"; }""#));
        assert!(script.contains("style.textContent = css;"));
    }

    #[test]
    fn style_injection_script_prefers_adopted_stylesheet() {
        let script = style_injection_script("a{}").expect("script");
        let adopted = script.find("sheet.replaceSync(css)").expect("constructed sheet path");
        let fallback = script.find("createElement(\"style\")").expect("style element fallback");
        assert!(adopted < fallback);
        assert!(script.contains("document.adoptedStyleSheets.includes(sheet)"));
        assert!(script.contains("window[id] = sheet;"));
    }
}
