use log::{info, warn};
use tauri::{AppHandle, Manager, Runtime};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};

use crate::{
    external_links::ExternalOpener, update_check::UpdateCheckOutcome, MAIN_WINDOW_LABEL,
};

pub(crate) const UPDATE_FAILED_TITLE: &str = "Update Check Failed";
pub(crate) const UPDATE_FAILED_MESSAGE: &str =
    "Could not check for updates. Please check your internet connection and try again.";
pub(crate) const UPDATE_AVAILABLE_TITLE: &str = "Update Available";
pub(crate) const UP_TO_DATE_TITLE: &str = "No Updates";
pub(crate) const ACKNOWLEDGE_LABEL: &str = "OK";
pub(crate) const DOWNLOAD_LABEL: &str = "Download";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DialogKind {
    Info,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DialogButtons {
    Acknowledge,
    AcknowledgeOrDownload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DialogRequest {
    pub(crate) kind: DialogKind,
    pub(crate) title: String,
    pub(crate) message: String,
    pub(crate) buttons: DialogButtons,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DialogResponse {
    Acknowledged,
    DownloadRequested,
}

/// Modal dialog host; `show` blocks until the user picks a control.
pub(crate) trait UpdateDialogs {
    fn show(&self, request: &DialogRequest) -> DialogResponse;
}

pub(crate) fn dialog_for_outcome(outcome: &UpdateCheckOutcome) -> DialogRequest {
    match outcome {
        UpdateCheckOutcome::UpdateAvailable {
            current_version,
            latest_version,
            ..
        } => DialogRequest {
            kind: DialogKind::Info,
            title: UPDATE_AVAILABLE_TITLE.to_string(),
            message: format!(
                "A new version is available.\n\nCurrent version: {current_version}\nLatest version: {latest_version}"
            ),
            buttons: DialogButtons::AcknowledgeOrDownload,
        },
        UpdateCheckOutcome::UpToDate {
            current_version,
            latest_version,
        } => DialogRequest {
            kind: DialogKind::Info,
            title: UP_TO_DATE_TITLE.to_string(),
            message: format!(
                "You are running the latest version.\n\nCurrent version: {current_version}\nLatest release: {latest_version}"
            ),
            buttons: DialogButtons::Acknowledge,
        },
        UpdateCheckOutcome::Failed { .. } => DialogRequest {
            kind: DialogKind::Error,
            title: UPDATE_FAILED_TITLE.to_string(),
            message: UPDATE_FAILED_MESSAGE.to_string(),
            buttons: DialogButtons::Acknowledge,
        },
    }
}

/// Shows exactly one dialog for `outcome` and follows the user's choice.
pub(crate) fn present_update_outcome<D, O>(
    outcome: &UpdateCheckOutcome,
    dialogs: &D,
    opener: &O,
)
where
    D: UpdateDialogs + ?Sized,
    O: ExternalOpener + ?Sized,
{
    if let UpdateCheckOutcome::Failed { reason } = outcome {
        info!("presenting update check failure: {reason}");
    }
    let request = dialog_for_outcome(outcome);
    let response = dialogs.show(&request);

    let UpdateCheckOutcome::UpdateAvailable { release_url, .. } = outcome else {
        return;
    };
    if response != DialogResponse::DownloadRequested {
        info!("update dialog dismissed without download");
        return;
    }

    info!("opening release page {release_url}");
    if let Err(error) = opener.open_external(release_url) {
        warn!("failed to open release page {release_url}: {error}");
    }
}

pub(crate) fn response_for(buttons: DialogButtons, confirmed: bool) -> DialogResponse {
    match (buttons, confirmed) {
        (DialogButtons::AcknowledgeOrDownload, true) => DialogResponse::DownloadRequested,
        _ => DialogResponse::Acknowledged,
    }
}

pub(crate) struct TauriDialogs<R: Runtime> {
    app_handle: AppHandle<R>,
}

impl<R: Runtime> TauriDialogs<R> {
    pub(crate) fn new(app_handle: AppHandle<R>) -> Self {
        Self { app_handle }
    }
}

impl<R: Runtime> UpdateDialogs for TauriDialogs<R> {
    fn show(&self, request: &DialogRequest) -> DialogResponse {
        let kind = match request.kind {
            DialogKind::Info => MessageDialogKind::Info,
            DialogKind::Error => MessageDialogKind::Error,
        };
        let buttons = match request.buttons {
            DialogButtons::Acknowledge => {
                MessageDialogButtons::OkCustom(ACKNOWLEDGE_LABEL.to_string())
            }
            DialogButtons::AcknowledgeOrDownload => MessageDialogButtons::OkCancelCustom(
                DOWNLOAD_LABEL.to_string(),
                ACKNOWLEDGE_LABEL.to_string(),
            ),
        };

        let mut builder = self
            .app_handle
            .dialog()
            .message(request.message.as_str())
            .title(request.title.as_str())
            .kind(kind)
            .buttons(buttons);
        // Owned by the main window so the dialog is modal to it.
        if let Some(window) = self.app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
            builder = builder.parent(&window);
        }

        response_for(request.buttons, builder.blocking_show())
    }
}
