use log::{error, info};
use tauri::Manager;

use crate::{
    lifecycle, logging, shell_config::ShellConfig, UpdateCheckState, APP_VERSION, LOG_FILE_NAME,
};

pub(crate) fn run() {
    let config = ShellConfig::from_env();
    let log_level = config.log_level;

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(config)
        .manage(UpdateCheckState::default())
        .setup(move |app| {
            let app_handle = app.handle().clone();
            let log_path = logging::resolve_desktop_log_path(
                app_handle.path().app_log_dir().ok(),
                LOG_FILE_NAME,
            );
            if let Err(error) = logging::setup_logger(log_level, &log_path) {
                eprintln!("beShare logging disabled: {error}");
            }

            info!("desktop process starting, version={APP_VERSION}");
            info!("desktop log path: {}", log_path.display());
            lifecycle::ensure_main_window(&app_handle, lifecycle::WindowRequest::Startup)
                .map_err(|reason| {
                    error!("startup aborted: {reason}");
                    reason
                })?;
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| lifecycle::handle_run_event(app_handle, event));
}
