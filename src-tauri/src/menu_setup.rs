use tauri::{
    menu::{IsMenuItem, Menu, MenuItem, Submenu},
    Manager, Runtime,
};

use crate::{menu_actions, DISCORD_URL, MAIN_WINDOW_TITLE, REPOSITORY_URL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MenuLinks {
    pub(crate) repository_url: String,
    pub(crate) discord_url: String,
}

impl Default for MenuLinks {
    fn default() -> Self {
        Self {
            repository_url: REPOSITORY_URL.to_string(),
            discord_url: DISCORD_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MenuEntry {
    Action {
        id: &'static str,
        label: &'static str,
    },
    Submenu {
        label: &'static str,
        items: Vec<MenuEntry>,
    },
}

/// Everything a window needs to build its menu and answer its events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MenuDescriptor {
    pub(crate) entries: Vec<MenuEntry>,
    pub(crate) links: MenuLinks,
}

pub(crate) fn default_menu_descriptor() -> MenuDescriptor {
    MenuDescriptor {
        entries: vec![
            MenuEntry::Action {
                id: menu_actions::MENU_CHECK_FOR_UPDATES,
                label: "Check for Updates",
            },
            MenuEntry::Action {
                id: menu_actions::MENU_OPEN_REPOSITORY,
                label: "Repository",
            },
            MenuEntry::Action {
                id: menu_actions::MENU_OPEN_DISCORD,
                label: "Discord",
            },
            MenuEntry::Submenu {
                label: "Reload",
                items: vec![
                    MenuEntry::Action {
                        id: menu_actions::MENU_RELOAD_WEB,
                        label: "Web",
                    },
                    MenuEntry::Action {
                        id: menu_actions::MENU_RELOAD_CLIENT,
                        label: "Client",
                    },
                ],
            },
        ],
        links: MenuLinks::default(),
    }
}

/// macOS only shows submenus in the menu bar, so loose top-level actions are
/// gathered under an app-named submenu there.
pub(crate) fn platform_entries(
    entries: &[MenuEntry],
    nest_top_level_actions: bool,
) -> Vec<MenuEntry> {
    if !nest_top_level_actions {
        return entries.to_vec();
    }

    let (actions, submenus): (Vec<_>, Vec<_>) = entries
        .iter()
        .cloned()
        .partition(|entry| matches!(entry, MenuEntry::Action { .. }));
    if actions.is_empty() {
        return submenus;
    }

    let mut nested = vec![MenuEntry::Submenu {
        label: MAIN_WINDOW_TITLE,
        items: actions,
    }];
    nested.extend(submenus);
    nested
}

fn build_entry<R, M>(manager: &M, entry: &MenuEntry) -> Result<Box<dyn IsMenuItem<R>>, String>
where
    R: Runtime,
    M: Manager<R>,
{
    match entry {
        MenuEntry::Action { id, label } => {
            let item = MenuItem::with_id(manager, *id, *label, true, None::<&str>)
                .map_err(|error| format!("Failed to create menu item {id}: {error}"))?;
            Ok(Box::new(item))
        }
        MenuEntry::Submenu { label, items } => {
            let submenu = Submenu::new(manager, *label, true)
                .map_err(|error| format!("Failed to create submenu {label}: {error}"))?;
            for child in items {
                let child_item = build_entry(manager, child)?;
                submenu
                    .append(child_item.as_ref())
                    .map_err(|error| format!("Failed to append to submenu {label}: {error}"))?;
            }
            Ok(Box::new(submenu))
        }
    }
}

pub(crate) fn build_menu<R, M>(
    manager: &M,
    descriptor: &MenuDescriptor,
) -> Result<Menu<R>, String>
where
    R: Runtime,
    M: Manager<R>,
{
    let menu = Menu::new(manager).map_err(|error| format!("Failed to create menu: {error}"))?;
    for entry in platform_entries(&descriptor.entries, cfg!(target_os = "macos")) {
        let item = build_entry(manager, &entry)?;
        menu.append(item.as_ref())
            .map_err(|error| format!("Failed to build menu: {error}"))?;
    }
    Ok(menu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu_actions::{action_from_menu_id, MenuAction};

    fn action_ids(entries: &[MenuEntry]) -> Vec<&'static str> {
        entries
            .iter()
            .flat_map(|entry| match entry {
                MenuEntry::Action { id, .. } => vec![*id],
                MenuEntry::Submenu { items, .. } => action_ids(items),
            })
            .collect()
    }

    #[test]
    fn default_menu_descriptor_exposes_every_action_once() {
        let descriptor = default_menu_descriptor();
        let actions: Vec<_> = action_ids(&descriptor.entries)
            .into_iter()
            .map(action_from_menu_id)
            .collect();

        assert_eq!(
            actions,
            vec![
                Some(MenuAction::CheckForUpdates),
                Some(MenuAction::OpenRepository),
                Some(MenuAction::OpenDiscord),
                Some(MenuAction::ReloadWeb),
                Some(MenuAction::ReloadClient),
            ]
        );
    }

    #[test]
    fn reload_entries_live_in_reload_submenu() {
        let descriptor = default_menu_descriptor();
        let Some(MenuEntry::Submenu { label, items }) = descriptor.entries.last() else {
            panic!("last entry should be the reload submenu");
        };
        assert_eq!(*label, "Reload");
        assert_eq!(
            action_ids(items),
            vec![menu_actions::MENU_RELOAD_WEB, menu_actions::MENU_RELOAD_CLIENT]
        );
    }

    #[test]
    fn platform_entries_nests_loose_actions_when_requested() {
        let entries = default_menu_descriptor().entries;

        assert_eq!(platform_entries(&entries, false), entries);

        let nested = platform_entries(&entries, true);
        assert_eq!(nested.len(), 2);
        assert!(matches!(
            &nested[0],
            MenuEntry::Submenu { label, items } if *label == MAIN_WINDOW_TITLE && items.len() == 3
        ));
        assert_eq!(action_ids(&nested), action_ids(&entries));
    }
}
