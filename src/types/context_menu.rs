use serde::{Deserialize, Serialize};

/// Clipboard capabilities of the element under the cursor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditFlags {
    pub can_cut: bool,
    pub can_copy: bool,
    pub can_paste: bool,
    pub can_select_all: bool,
}

/// What the surface reports when the user requests a context menu.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextParams {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub edit_flags: EditFlags,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub src_url: Option<String>,
    #[serde(default)]
    pub selection_text: Option<String>,
}

/// Action behind a context menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuAction {
    Back,
    Forward,
    Reload,
    Cut,
    Copy,
    Paste,
    SelectAll,
    OpenLinkInNewTab { url: String },
    CopyLinkAddress { url: String },
    CopyImage { x: i32, y: i32 },
    CopyImageAddress { url: String },
    SearchSelection { text: String },
    InspectElement { x: i32, y: i32 },
}

/// One row of a context menu, ready for the host to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuEntry {
    Item {
        label: String,
        accelerator: Option<String>,
        action: MenuAction,
    },
    Separator,
}

/// Work the shell cannot do itself and hands back to the host window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostRequest {
    /// Run an edit command on the tab's surface.
    EditCommand { command: String },
    WriteClipboard { text: String },
    CopyImageAt { x: i32, y: i32 },
    InspectElement { x: i32, y: i32 },
}
