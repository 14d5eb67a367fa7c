pub const MENU_CHECK_FOR_UPDATES: &str = "menu_check_for_updates";
pub const MENU_OPEN_REPOSITORY: &str = "menu_open_repository";
pub const MENU_OPEN_DISCORD: &str = "menu_open_discord";
pub const MENU_RELOAD_WEB: &str = "menu_reload_web";
pub const MENU_RELOAD_CLIENT: &str = "menu_reload_client";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    CheckForUpdates,
    OpenRepository,
    OpenDiscord,
    ReloadWeb,
    ReloadClient,
}

pub fn action_from_menu_id(menu_id: &str) -> Option<MenuAction> {
    match menu_id {
        MENU_CHECK_FOR_UPDATES => Some(MenuAction::CheckForUpdates),
        MENU_OPEN_REPOSITORY => Some(MenuAction::OpenRepository),
        MENU_OPEN_DISCORD => Some(MenuAction::OpenDiscord),
        MENU_RELOAD_WEB => Some(MenuAction::ReloadWeb),
        MENU_RELOAD_CLIENT => Some(MenuAction::ReloadClient),
        _ => None,
    }
}
