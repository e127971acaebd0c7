//! ShyNav: a minimal multi-tab browser shell.
//!
//! The core is the tab registry and the two paths that keep it consistent:
//! navigation commands going down to each tab's surface and surface events
//! coming back up as UI notifications. Everything else (history, downloads,
//! shortcuts, the command palette, context menus) is shell policy around it.

pub mod app;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod surface;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
