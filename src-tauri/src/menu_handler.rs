use log::{info, warn};
use tauri::{AppHandle, Manager, Runtime};

use crate::{
    external_links::{ExternalOpener, SystemBrowser},
    menu_actions::{self, MenuAction},
    menu_setup::MenuLinks,
    update_flow,
};

const RELOAD_PAGE_SCRIPT: &str = "window.location.reload();";

#[derive(Debug, Clone, PartialEq, Eq)]
enum MenuCommand {
    CheckForUpdates,
    OpenExternal(String),
    ReloadPage,
    RelaunchClient,
}

fn command_for_action(action: MenuAction, links: &MenuLinks) -> MenuCommand {
    match action {
        MenuAction::CheckForUpdates => MenuCommand::CheckForUpdates,
        MenuAction::OpenRepository => MenuCommand::OpenExternal(links.repository_url.clone()),
        MenuAction::OpenDiscord => MenuCommand::OpenExternal(links.discord_url.clone()),
        MenuAction::ReloadWeb => MenuCommand::ReloadPage,
        MenuAction::ReloadClient => MenuCommand::RelaunchClient,
    }
}

pub(crate) fn handle_menu_event<R: Runtime>(
    app_handle: &AppHandle<R>,
    window_label: &str,
    links: &MenuLinks,
    menu_id: &str,
) {
    let Some(action) = menu_actions::action_from_menu_id(menu_id) else {
        return;
    };

    match command_for_action(action, links) {
        MenuCommand::CheckForUpdates => {
            info!("menu requested update check");
            update_flow::spawn_update_check(app_handle);
        }
        MenuCommand::OpenExternal(url) => {
            if let Err(error) = SystemBrowser.open_external(&url) {
                warn!("failed to open {url}: {error}");
            }
        }
        MenuCommand::ReloadPage => {
            let Some(window) = app_handle.get_webview_window(window_label) else {
                warn!("reload skipped: window {window_label} not found");
                return;
            };
            if let Err(error) = window.eval(RELOAD_PAGE_SCRIPT) {
                warn!("failed to reload window {window_label}: {error}");
            }
        }
        MenuCommand::RelaunchClient => {
            info!("menu requested client relaunch");
            app_handle.request_restart();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ACTIONS: [MenuAction; 5] = [
        MenuAction::CheckForUpdates,
        MenuAction::OpenRepository,
        MenuAction::OpenDiscord,
        MenuAction::ReloadWeb,
        MenuAction::ReloadClient,
    ];

    #[test]
    fn link_actions_open_their_configured_urls() {
        let links = MenuLinks {
            repository_url: "https://example.com/repo".to_string(),
            discord_url: "https://example.com/chat".to_string(),
        };

        assert_eq!(
            command_for_action(MenuAction::OpenRepository, &links),
            MenuCommand::OpenExternal("https://example.com/repo".to_string())
        );
        assert_eq!(
            command_for_action(MenuAction::OpenDiscord, &links),
            MenuCommand::OpenExternal("https://example.com/chat".to_string())
        );
    }

    #[test]
    fn only_check_for_updates_action_starts_update_check() {
        let links = MenuLinks::default();
        let triggering: Vec<_> = ALL_ACTIONS
            .into_iter()
            .filter(|action| command_for_action(*action, &links) == MenuCommand::CheckForUpdates)
            .collect();

        assert_eq!(triggering, vec![MenuAction::CheckForUpdates]);
    }

    #[test]
    fn reload_actions_map_to_page_and_client_reload() {
        let links = MenuLinks::default();
        assert_eq!(
            command_for_action(MenuAction::ReloadWeb, &links),
            MenuCommand::ReloadPage
        );
        assert_eq!(
            command_for_action(MenuAction::ReloadClient, &links),
            MenuCommand::RelaunchClient
        );
    }
}
