// ShyNav shared type definitions
// Each submodule defines types used across the application.

pub mod command;
pub mod context_menu;
pub mod download;
pub mod errors;
pub mod history;
pub mod notification;
pub mod settings;
pub mod surface;
pub mod tab;
