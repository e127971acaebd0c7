//! Page context menu model.
//!
//! Builds the entries for a right-click on a surface. Rendering the menu is
//! the host window's job; the shell executes the chosen action.

use crate::types::context_menu::{ContextParams, MenuAction, MenuEntry};

const SEARCH_LABEL_CHARS: usize = 20;

fn item(label: &str, accelerator: Option<&str>, action: MenuAction) -> MenuEntry {
    MenuEntry::Item {
        label: label.to_string(),
        accelerator: accelerator.map(|a| a.to_string()),
        action,
    }
}

/// Label for the search entry, truncated to the first 20 characters.
pub fn search_label(selection: &str) -> String {
    let mut chars = selection.chars();
    let head: String = chars.by_ref().take(SEARCH_LABEL_CHARS).collect();
    let ellipsis = if chars.next().is_some() { "..." } else { "" };
    format!("Search Google for \"{}{}\"", head, ellipsis)
}

/// Drops leading, trailing and repeated separators.
fn tidy(entries: Vec<MenuEntry>) -> Vec<MenuEntry> {
    let mut out: Vec<MenuEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry == MenuEntry::Separator
            && matches!(out.last(), None | Some(MenuEntry::Separator))
        {
            continue;
        }
        out.push(entry);
    }
    while out.last() == Some(&MenuEntry::Separator) {
        out.pop();
    }
    out
}

/// Entries for a context menu on a tab whose surface reports `params`.
pub fn build_menu(
    params: &ContextParams,
    can_go_back: bool,
    can_go_forward: bool,
    developer_mode: bool,
) -> Vec<MenuEntry> {
    let mut entries = Vec::new();

    if can_go_back || can_go_forward {
        if can_go_back {
            entries.push(item("Back", Some("Alt+Left"), MenuAction::Back));
        }
        if can_go_forward {
            entries.push(item("Forward", Some("Alt+Right"), MenuAction::Forward));
        }
        entries.push(item("Reload", Some("CmdOrCtrl+R"), MenuAction::Reload));
        entries.push(MenuEntry::Separator);
    }

    let flags = &params.edit_flags;
    if flags.can_cut {
        entries.push(item("Cut", Some("CmdOrCtrl+X"), MenuAction::Cut));
    }
    if flags.can_copy {
        entries.push(item("Copy", Some("CmdOrCtrl+C"), MenuAction::Copy));
    }
    if flags.can_paste {
        entries.push(item("Paste", Some("CmdOrCtrl+V"), MenuAction::Paste));
    }
    if flags.can_select_all {
        entries.push(MenuEntry::Separator);
        entries.push(item("Select All", Some("CmdOrCtrl+A"), MenuAction::SelectAll));
    }

    if let Some(link) = params.link_url.as_deref().filter(|l| !l.is_empty()) {
        entries.push(MenuEntry::Separator);
        entries.push(item(
            "Open Link in New Tab",
            None,
            MenuAction::OpenLinkInNewTab { url: link.to_string() },
        ));
        entries.push(item(
            "Copy Link Address",
            None,
            MenuAction::CopyLinkAddress { url: link.to_string() },
        ));
    }

    let is_image = params.media_type.as_deref() == Some("image");
    if let Some(src) = params.src_url.as_deref().filter(|s| is_image && !s.is_empty()) {
        entries.push(MenuEntry::Separator);
        entries.push(item(
            "Copy Image",
            None,
            MenuAction::CopyImage { x: params.x, y: params.y },
        ));
        entries.push(item(
            "Copy Image Address",
            None,
            MenuAction::CopyImageAddress { url: src.to_string() },
        ));
    }

    if let Some(text) = params.selection_text.as_deref().filter(|t| !t.is_empty()) {
        entries.push(MenuEntry::Separator);
        entries.push(item(
            &search_label(text),
            None,
            MenuAction::SearchSelection { text: text.to_string() },
        ));
    }

    if developer_mode {
        entries.push(MenuEntry::Separator);
        entries.push(item(
            "Inspect Element",
            None,
            MenuAction::InspectElement { x: params.x, y: params.y },
        ));
    }

    tidy(entries)
}
