use shynav::services::context_menu::{build_menu, search_label};
use shynav::types::context_menu::{ContextParams, EditFlags, MenuAction, MenuEntry};

fn actions(entries: &[MenuEntry]) -> Vec<Option<&MenuAction>> {
    entries
        .iter()
        .map(|e| match e {
            MenuEntry::Item { action, .. } => Some(action),
            MenuEntry::Separator => None,
        })
        .collect()
}

#[test]
fn test_empty_context_gives_empty_menu() {
    assert!(build_menu(&ContextParams::default(), false, false, false).is_empty());
}

#[test]
fn test_navigation_section() {
    let menu = build_menu(&ContextParams::default(), true, false, false);
    assert_eq!(
        actions(&menu),
        vec![Some(&MenuAction::Back), Some(&MenuAction::Reload)]
    );
}

#[test]
fn test_edit_flags_and_separators() {
    let params = ContextParams {
        edit_flags: EditFlags {
            can_cut: true,
            can_copy: true,
            can_paste: false,
            can_select_all: true,
        },
        ..ContextParams::default()
    };
    let menu = build_menu(&params, true, true, false);
    assert_eq!(
        actions(&menu),
        vec![
            Some(&MenuAction::Back),
            Some(&MenuAction::Forward),
            Some(&MenuAction::Reload),
            None,
            Some(&MenuAction::Cut),
            Some(&MenuAction::Copy),
            None,
            Some(&MenuAction::SelectAll),
        ]
    );
}

#[test]
fn test_link_image_and_selection_entries() {
    let params = ContextParams {
        x: 10,
        y: 20,
        link_url: Some("https://l.test/".into()),
        media_type: Some("image".into()),
        src_url: Some("https://i.test/p.png".into()),
        selection_text: Some("word".into()),
        ..ContextParams::default()
    };
    let menu = build_menu(&params, false, false, true);
    assert_eq!(menu.first(), Some(&MenuEntry::Item {
        label: "Open Link in New Tab".into(),
        accelerator: None,
        action: MenuAction::OpenLinkInNewTab { url: "https://l.test/".into() },
    }));
    let all = actions(&menu);
    assert!(all.contains(&Some(&MenuAction::CopyImage { x: 10, y: 20 })));
    assert!(all.contains(&Some(&MenuAction::CopyImageAddress { url: "https://i.test/p.png".into() })));
    assert!(all.contains(&Some(&MenuAction::SearchSelection { text: "word".into() })));
    assert_eq!(all.last(), Some(&Some(&MenuAction::InspectElement { x: 10, y: 20 })));
    assert_ne!(menu.last(), Some(&MenuEntry::Separator));
}

#[test]
fn test_image_entries_need_image_media() {
    let params = ContextParams {
        media_type: Some("video".into()),
        src_url: Some("https://v.test/v.mp4".into()),
        ..ContextParams::default()
    };
    assert!(build_menu(&params, false, false, false).is_empty());
}

#[test]
fn test_search_label_truncates_long_selection() {
    assert_eq!(search_label("short"), "Search Google for \"short\"");
    assert_eq!(
        search_label("abcdefghijklmnopqrstuvwxyz"),
        "Search Google for \"abcdefghijklmnopqrst...\""
    );
}
