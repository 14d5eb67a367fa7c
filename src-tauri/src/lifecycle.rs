use log::{error, info};
use tauri::{AppHandle, Manager, RunEvent, Runtime};

use crate::{main_window, shell_config::ShellConfig, MAIN_WINDOW_LABEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitDecision {
    KeepRunning,
    Exit,
}

/// An exit request without a code comes from the last window closing; macOS
/// apps stay alive in that case.
fn decide_exit(exit_code: Option<i32>, keep_alive_without_windows: bool) -> ExitDecision {
    if exit_code.is_none() && keep_alive_without_windows {
        ExitDecision::KeepRunning
    } else {
        ExitDecision::Exit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
pub(crate) enum WindowRequest {
    Startup,
    Reopen,
}

/// Without its first window the process would linger with no way to quit, so
/// a startup failure aborts setup; a failed reopen only logs.
fn settle_window_result(
    request: WindowRequest,
    result: Result<(), String>,
) -> Result<(), String> {
    match (request, result) {
        (_, Ok(())) => Ok(()),
        (WindowRequest::Startup, Err(error)) => Err(error),
        (WindowRequest::Reopen, Err(error)) => {
            error!("{error}");
            Ok(())
        }
    }
}

pub(crate) fn ensure_main_window<R: Runtime>(
    app_handle: &AppHandle<R>,
    request: WindowRequest,
) -> Result<(), String> {
    if app_handle.get_webview_window(MAIN_WINDOW_LABEL).is_some() {
        return Ok(());
    }

    let config = app_handle
        .try_state::<ShellConfig>()
        .map(|state| state.inner().clone())
        .unwrap_or_default();
    let created = main_window::create_main_window(app_handle, &config).map(|_| ());
    settle_window_result(request, created)
}

#[cfg_attr(not(target_os = "macos"), allow(unused_variables))]
pub(crate) fn handle_run_event<R: Runtime>(app_handle: &AppHandle<R>, event: RunEvent) {
    match event {
        RunEvent::ExitRequested { code, api, .. } => {
            match decide_exit(code, cfg!(target_os = "macos")) {
                ExitDecision::KeepRunning => {
                    info!("last window closed, keeping app alive");
                    api.prevent_exit();
                }
                ExitDecision::Exit => info!("exit requested, code={code:?}"),
            }
        }
        #[cfg(target_os = "macos")]
        RunEvent::Reopen {
            has_visible_windows,
            ..
        } => {
            if !has_visible_windows {
                let _ = ensure_main_window(app_handle, WindowRequest::Reopen);
            }
        }
        RunEvent::Exit => info!("desktop process exiting"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::{decide_exit, settle_window_result, ExitDecision, WindowRequest};

    #[test]
    fn decide_exit_keeps_macos_app_alive_after_last_window_closes() {
        assert_eq!(decide_exit(None, true), ExitDecision::KeepRunning);
    }

    #[test]
    fn decide_exit_quits_elsewhere_and_on_explicit_exit() {
        assert_eq!(decide_exit(None, false), ExitDecision::Exit);
        assert_eq!(decide_exit(Some(0), true), ExitDecision::Exit);
    }

    #[test]
    fn startup_window_failure_aborts_setup() {
        assert_eq!(
            settle_window_result(WindowRequest::Startup, Err("no display".to_string())),
            Err("no display".to_string())
        );
        assert_eq!(settle_window_result(WindowRequest::Startup, Ok(())), Ok(()));
    }

    #[test]
    fn reopen_window_failure_is_logged_only() {
        assert_eq!(
            settle_window_result(WindowRequest::Reopen, Err("no display".to_string())),
            Ok(())
        );
    }
}
