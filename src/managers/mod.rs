// ShyNav state managers
// Managers own mutable shell state: tabs and their surfaces, the event and
// command paths between them, history, downloads and shortcuts.

pub mod command_router;
pub mod download_manager;
pub mod event_bridge;
pub mod history_manager;
pub mod notification_bus;
pub mod shortcut_manager;
pub mod tab;
pub mod tab_registry;
