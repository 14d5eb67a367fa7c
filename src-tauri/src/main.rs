#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_runtime;
mod app_types;
mod external_links;
mod lifecycle;
mod logging;
mod main_window;
mod menu_actions;
mod menu_handler;
mod menu_setup;
mod override_injector;
mod shell_config;
mod update_check;
mod update_flow;
mod update_prompt;

pub(crate) use app_constants::*;
pub(crate) use app_types::{AtomicFlagGuard, UpdateCheckState};

fn main() {
    app_runtime::run();
}
