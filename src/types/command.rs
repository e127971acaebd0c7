use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Navigation command addressed to a single tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "url", rename_all = "snake_case")]
pub enum NavCommand {
    Navigate(String),
    Back,
    Forward,
    Reload,
    Stop,
}

/// Parameterless tab actions issued from toolbar buttons and menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabAction {
    Back,
    Forward,
    Reload,
    Stop,
}

impl From<TabAction> for NavCommand {
    fn from(action: TabAction) -> Self {
        match action {
            TabAction::Back => NavCommand::Back,
            TabAction::Forward => NavCommand::Forward,
            TabAction::Reload => NavCommand::Reload,
            TabAction::Stop => NavCommand::Stop,
        }
    }
}

impl FromStr for TabAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "back" => Ok(TabAction::Back),
            "forward" => Ok(TabAction::Forward),
            "reload" => Ok(TabAction::Reload),
            "stop" => Ok(TabAction::Stop),
            other => Err(format!("unknown tab action: {}", other)),
        }
    }
}

impl fmt::Display for TabAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TabAction::Back => "back",
            TabAction::Forward => "forward",
            TabAction::Reload => "reload",
            TabAction::Stop => "stop",
        };
        f.write_str(name)
    }
}

/// Shell-level actions reachable from accelerators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellAction {
    OpenPalette,
    ToggleSidebar,
    CloseTab,
    Reload,
    Back,
    Forward,
    StopLoading,
    NextTab,
    PrevTab,
}

impl ShellAction {
    pub const ALL: [ShellAction; 9] = [
        ShellAction::OpenPalette,
        ShellAction::ToggleSidebar,
        ShellAction::CloseTab,
        ShellAction::Reload,
        ShellAction::Back,
        ShellAction::Forward,
        ShellAction::StopLoading,
        ShellAction::NextTab,
        ShellAction::PrevTab,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShellAction::OpenPalette => "open_palette",
            ShellAction::ToggleSidebar => "toggle_sidebar",
            ShellAction::CloseTab => "close_tab",
            ShellAction::Reload => "reload",
            ShellAction::Back => "back",
            ShellAction::Forward => "forward",
            ShellAction::StopLoading => "stop_loading",
            ShellAction::NextTab => "next_tab",
            ShellAction::PrevTab => "prev_tab",
        }
    }

    pub fn from_name(name: &str) -> Option<ShellAction> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}
