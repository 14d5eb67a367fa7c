use std::{future::Future, sync::atomic::AtomicBool, time::Duration};

use log::{error, info};
use tauri::{AppHandle, Manager, Runtime};

use crate::{
    external_links::SystemBrowser,
    shell_config::ShellConfig,
    update_check::{self, GitHubReleaseSource, ReleaseSource, UpdateCheckOutcome},
    update_prompt::{self, TauriDialogs},
    AtomicFlagGuard, UpdateCheckState, APP_VERSION,
};

/// Runs a check and hands its outcome to `present`, holding `gate` until the
/// presentation returns. Returns `false` when another check already holds it.
pub(crate) async fn run_guarded_check<S, P, Fut>(
    gate: &AtomicBool,
    source: &S,
    current_version: &str,
    timeout: Duration,
    present: P,
) -> bool
where
    S: ReleaseSource + ?Sized,
    P: FnOnce(UpdateCheckOutcome) -> Fut,
    Fut: Future<Output = ()>,
{
    let Some(_guard) = AtomicFlagGuard::try_set(gate) else {
        return false;
    };
    let outcome = update_check::check_for_updates(source, current_version, timeout).await;
    present(outcome).await;
    true
}

async fn present_on_blocking_thread<R: Runtime>(
    app_handle: AppHandle<R>,
    outcome: UpdateCheckOutcome,
) {
    let presented = tauri::async_runtime::spawn_blocking(move || {
        let dialogs = TauriDialogs::new(app_handle);
        update_prompt::present_update_outcome(&outcome, &dialogs, &SystemBrowser);
    })
    .await;
    if let Err(error) = presented {
        error!("failed to present update check result: {error}");
    }
}

pub(crate) fn spawn_update_check<R: Runtime>(app_handle: &AppHandle<R>) {
    let app_handle = app_handle.clone();
    tauri::async_runtime::spawn(async move {
        let config = app_handle
            .try_state::<ShellConfig>()
            .map(|state| state.inner().clone())
            .unwrap_or_default();
        let Some(state) = app_handle.try_state::<UpdateCheckState>() else {
            error!("update check skipped: update check state is not managed");
            return;
        };

        let ran = match GitHubReleaseSource::from_config(&config) {
            Ok(source) => {
                info!("checking for updates, current_version={APP_VERSION}");
                run_guarded_check(
                    &state.in_flight,
                    &source,
                    APP_VERSION,
                    config.update_check_timeout,
                    |outcome| present_on_blocking_thread(app_handle.clone(), outcome),
                )
                .await
            }
            Err(reason) => {
                error!("{reason}");
                let outcome = UpdateCheckOutcome::Failed { reason };
                present_on_blocking_thread(app_handle.clone(), outcome).await;
                true
            }
        };
        if !ran {
            info!("update check ignored: another check is already in progress");
        }
    });
}
