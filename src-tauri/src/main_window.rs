use log::{debug, info};
use tauri::{
    utils::config::Color, webview::PageLoadEvent, AppHandle, Manager, Runtime, WebviewUrl,
    WebviewWindow, WebviewWindowBuilder,
};

use crate::{
    menu_handler, menu_setup,
    override_injector::{self, OverridePaths},
    shell_config::ShellConfig,
    MAIN_WINDOW_HEIGHT, MAIN_WINDOW_LABEL, MAIN_WINDOW_MIN_HEIGHT, MAIN_WINDOW_MIN_WIDTH,
    MAIN_WINDOW_TITLE, MAIN_WINDOW_WIDTH,
};

/// Overrides are applied once per finished load; nothing else runs on page
/// load, in particular no update check.
pub(crate) fn should_apply_overrides(event: PageLoadEvent) -> bool {
    matches!(event, PageLoadEvent::Finished)
}

pub(crate) fn create_main_window<R: Runtime>(
    app_handle: &AppHandle<R>,
    config: &ShellConfig,
) -> Result<WebviewWindow<R>, String> {
    let descriptor = menu_setup::default_menu_descriptor();
    let menu = menu_setup::build_menu(app_handle, &descriptor)?;
    let links = descriptor.links;
    let override_paths = OverridePaths::resolve(app_handle, config);
    debug!(
        "override paths: stylesheet={} script={}",
        override_paths.stylesheet.display(),
        override_paths.script.display()
    );

    let mut builder = WebviewWindowBuilder::new(
        app_handle,
        MAIN_WINDOW_LABEL,
        WebviewUrl::External(config.app_url.clone()),
    )
    .title(MAIN_WINDOW_TITLE)
    .inner_size(MAIN_WINDOW_WIDTH, MAIN_WINDOW_HEIGHT)
    .min_inner_size(MAIN_WINDOW_MIN_WIDTH, MAIN_WINDOW_MIN_HEIGHT)
    .center()
    .background_color(Color(0, 0, 0, 255))
    .decorations(true)
    .fullscreen(false)
    .visible(true)
    .menu(menu)
    .on_menu_event(move |window, event| {
        menu_handler::handle_menu_event(
            window.app_handle(),
            window.label(),
            &links,
            event.id().as_ref(),
        )
    })
    .on_page_load(move |window, payload| {
        if should_apply_overrides(payload.event()) {
            debug!("page-load finished: {}", payload.url());
            let report = override_injector::apply_overrides(&window, &override_paths);
            override_injector::log_override_report(&report);
        }
    });

    if let Some(icon) = app_handle.default_window_icon() {
        builder = builder
            .icon(icon.clone())
            .map_err(|error| format!("Failed to set main window icon: {error}"))?;
    }

    let window = builder
        .build()
        .map_err(|error| format!("Failed to create main window: {error}"))?;
    info!("main window created for {}", config.app_url);
    Ok(window)
}

#[cfg(test)]
mod tests {
    use tauri::webview::PageLoadEvent;

    use super::should_apply_overrides;

    #[test]
    fn overrides_run_only_after_load_finishes() {
        assert!(!should_apply_overrides(PageLoadEvent::Started));
        assert!(should_apply_overrides(PageLoadEvent::Finished));
    }
}
