use tempfile::TempDir;

use shynav::app::App;
use shynav::managers::download_manager::DownloadManagerTrait;
use shynav::managers::history_manager::HistoryManagerTrait;
use shynav::services::settings_engine::SettingsEngine;
use shynav::surface::headless::{HeadlessProbe, HeadlessSurfaceProvider, SurfaceCall};
use shynav::types::command::{ShellAction, TabAction};
use shynav::types::context_menu::{ContextParams, HostRequest, MenuAction, MenuEntry};
use shynav::types::notification::Notification;
use shynav::types::surface::SurfaceEvent;
use shynav::types::tab::TabId;

fn engine(dir: &TempDir) -> SettingsEngine {
    let path = dir.path().join("settings.json").to_string_lossy().to_string();
    SettingsEngine::new(Some(path))
}

/// Surfaces only emit what the test pushes through the probe.
fn quiet_app() -> (App, HeadlessProbe, TempDir) {
    let dir = TempDir::new().unwrap();
    let provider = HeadlessSurfaceProvider::new();
    let probe = provider.probe();
    let app = App::new(Box::new(provider), engine(&dir));
    (app, probe, dir)
}

/// Surfaces replay a full load cycle for every navigation.
fn live_app() -> (App, HeadlessProbe, TempDir) {
    let dir = TempDir::new().unwrap();
    let (app, probe) = App::with_headless(engine(&dir));
    (app, probe, dir)
}

fn active(app: &App) -> Option<TabId> {
    app.get_active_tab().map(|t| t.id)
}

#[test]
fn test_create_then_load_cycle() {
    let (mut app, probe, _dir) = quiet_app();
    let id = app.create_tab(Some("https://example.com")).unwrap();

    let tabs = app.get_all_tabs();
    assert_eq!(tabs.len(), 1);
    assert!(tabs[0].is_active);
    assert!(!tabs[0].is_loading);

    probe.emit(id, SurfaceEvent::LoadStarted);
    app.pump_events();
    assert!(app.get_active_tab().unwrap().is_loading);

    probe.emit(id, SurfaceEvent::LoadStopped);
    app.pump_events();
    assert!(!app.get_active_tab().unwrap().is_loading);
}

#[test]
fn test_switching_tabs_keeps_background_state() {
    let (mut app, probe, _dir) = quiet_app();
    let a = app.create_tab(Some("https://a.test/")).unwrap();
    let b = app.create_tab(Some("https://b.test/")).unwrap();
    assert_eq!(active(&app), Some(b));

    probe.emit(b, SurfaceEvent::TitleChanged { title: "Bee".into() });
    app.pump_events();

    assert!(app.set_active_tab(a));
    assert_eq!(active(&app), Some(a));
    assert!(!probe.is_visible(b));
    assert!(probe.is_visible(a));

    let b_snap = app.get_all_tabs().into_iter().find(|t| t.id == b).unwrap();
    assert_eq!(b_snap.url, "https://b.test/");
    assert_eq!(b_snap.title, "Bee");
    assert!(!b_snap.is_active);
}

#[test]
fn test_closing_active_middle_tab_elects_shifted_tab() {
    let (mut app, _probe, _dir) = quiet_app();
    let a = app.create_tab(None).unwrap();
    let b = app.create_tab(None).unwrap();
    let c = app.create_tab(None).unwrap();
    // Order [c, b, a].
    app.set_active_tab(b);
    assert!(app.close_tab(b));
    assert_eq!(active(&app), Some(a));

    let ids: Vec<TabId> = app.get_all_tabs().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![c, a]);
}

#[test]
fn test_closing_inactive_middle_tab_keeps_active() {
    let (mut app, _probe, _dir) = quiet_app();
    app.create_tab(None).unwrap();
    let b = app.create_tab(None).unwrap();
    let c = app.create_tab(None).unwrap();
    assert!(app.close_tab(b));
    assert_eq!(active(&app), Some(c));
}

#[test]
fn test_closing_last_tab_opens_palette() {
    let (mut app, _probe, _dir) = quiet_app();
    assert!(!app.is_palette_open());
    let a = app.create_tab(None).unwrap();
    assert!(app.close_tab(a));
    assert!(app.is_palette_open());
    assert!(app.get_active_tab().is_none());

    app.create_tab(None).unwrap();
    assert!(!app.is_palette_open());
}

#[test]
fn test_blank_input_opens_new_tab_page_without_history() {
    let (mut app, _probe, _dir) = quiet_app();
    let id = app.create_tab(Some("  ")).unwrap();
    assert_eq!(app.get_active_tab().unwrap().url, "about:blank");
    assert_eq!(active(&app), Some(id));
    assert!(app.history.list_history().is_empty());
}

#[test]
fn test_typed_input_is_resolved_and_recorded() {
    let (mut app, _probe, _dir) = quiet_app();
    app.create_tab(Some("example.com")).unwrap();
    assert_eq!(app.get_active_tab().unwrap().url, "https://example.com");
    let history = app.history.list_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].url, "https://example.com");
}

#[test]
fn test_navigate_tab_searches_free_text() {
    let (mut app, probe, _dir) = quiet_app();
    let id = app.create_tab(None).unwrap();
    assert!(app.navigate_tab(id, "rust lang"));
    let expected = "https://www.google.com/search?q=rust+lang";
    assert_eq!(probe.current_url(id).as_deref(), Some(expected));
    assert_eq!(app.get_active_tab().unwrap().url, expected);
}

#[test]
fn test_navigate_closed_tab_is_dropped() {
    let (mut app, probe, _dir) = quiet_app();
    let a = app.create_tab(None).unwrap();
    app.close_tab(a);
    assert!(!app.navigate_tab(a, "example.com"));
    assert_eq!(probe.navigate_count(a), 0);
    assert!(app.history.list_history().is_empty());
}

#[test]
fn test_navigation_is_recorded_when_the_surface_commits() {
    let (mut app, probe, _dir) = quiet_app();
    let id = app.create_tab(None).unwrap();

    assert!(app.navigate_tab(id, "https://two.test/"));
    assert!(app.history.list_history().is_empty());

    probe.emit(id, SurfaceEvent::Navigated { url: "https://two.test/".into() });
    app.pump_events();
    let history = app.history.list_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].url, "https://two.test/");
}

#[test]
fn test_refused_navigation_leaves_no_history() {
    let (mut app, probe, _dir) = quiet_app();
    let id = app.create_tab(None).unwrap();
    probe.fail_navigation_to("https://broken.test/");

    assert!(app.navigate_tab(id, "https://broken.test/"));
    app.pump_events();
    assert!(app.history.list_history().is_empty());
    assert_ne!(app.get_active_tab().unwrap().url, "https://broken.test/");
}

#[test]
fn test_navigate_active_opens_tab_when_empty() {
    let (mut app, _probe, _dir) = quiet_app();
    let id = app.navigate_active("example.com").unwrap();
    assert_eq!(active(&app), Some(id));

    let same = app.navigate_active("example.org").unwrap();
    assert_eq!(same, id);
    assert_eq!(app.get_all_tabs().len(), 1);
}

#[test]
fn test_back_and_forward_follow_surface_history() {
    let (mut app, probe, _dir) = live_app();
    let id = app.create_tab(Some("https://one.test/")).unwrap();
    app.navigate_tab(id, "https://two.test/");
    app.pump_events();

    assert!(app.tab_action(id, TabAction::Back));
    app.pump_events();
    assert_eq!(app.get_active_tab().unwrap().url, "https://one.test/");

    assert!(app.tab_action(id, TabAction::Forward));
    app.pump_events();
    assert_eq!(app.get_active_tab().unwrap().url, "https://two.test/");
    assert_eq!(probe.current_url(id).as_deref(), Some("https://two.test/"));
}

#[test]
fn test_live_load_fills_title_favicon_and_history() {
    let (mut app, _probe, _dir) = live_app();
    app.create_tab(Some("www.example.com")).unwrap();
    app.pump_events();

    let tab = app.get_active_tab().unwrap();
    assert_eq!(tab.title, "example.com");
    assert!(tab.favicon.contains("domain=www.example.com"));
    assert!(!tab.is_loading);

    // The typed visit and the committed navigation are the same URL.
    let history = app.history.list_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].title, "example.com");
}

#[test]
fn test_late_events_for_closed_tab_change_nothing() {
    let (mut app, probe, _dir) = quiet_app();
    let a = app.create_tab(Some("https://a.test/")).unwrap();
    let b = app.create_tab(Some("https://b.test/")).unwrap();
    let sink = probe.sink(a).unwrap();
    app.close_tab(a);

    assert!(!sink.emit(SurfaceEvent::TitleChanged { title: "ghost".into() }));
    assert!(!app.inject_surface_event(a, SurfaceEvent::LoadStarted));
    assert!(app.pump_events().is_empty());

    let tabs = app.get_all_tabs();
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs[0].id, b);
    assert_eq!(tabs[0].title, "New Tab");
}

#[test]
fn test_injected_events_are_applied() {
    let (mut app, _probe, _dir) = quiet_app();
    let id = app.create_tab(None).unwrap();
    assert!(app.inject_surface_event(id, SurfaceEvent::TitleChanged { title: "Hello".into() }));
    let published = app.pump_events();
    assert_eq!(published, vec![Notification::TitleChanged { id, title: "Hello".into() }]);
}

#[test]
fn test_downloads_are_listed() {
    let (mut app, _probe, _dir) = quiet_app();
    let id = app.create_tab(None).unwrap();
    app.inject_surface_event(
        id,
        SurfaceEvent::DownloadStarted {
            filename: "report.pdf".into(),
            url: "https://a.test/report.pdf".into(),
            total_bytes: 2048,
        },
    );
    app.pump_events();
    let downloads = app.downloads.list_downloads();
    assert_eq!(downloads.len(), 1);
    assert_eq!(downloads[0].filename, "report.pdf");
    assert_eq!(downloads[0].tab_id, id);
}

#[test]
fn test_subscribe_with_snapshot_has_no_replay() {
    let (mut app, _probe, _dir) = quiet_app();
    let a = app.create_tab(None).unwrap();
    let (tabs, mut rx) = app.subscribe_with_snapshot();
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs[0].id, a);
    assert!(rx.try_recv().is_err());

    app.close_tab(a);
    assert_eq!(rx.try_recv().unwrap(), Notification::TabClosed { id: a });
}

#[test]
fn test_accelerators_run_shell_actions() {
    let (mut app, _probe, _dir) = quiet_app();
    let a = app.create_tab(None).unwrap();

    assert_eq!(app.handle_accelerator("Ctrl+S"), Some(ShellAction::ToggleSidebar));
    assert!(app.is_sidebar_collapsed());

    assert_eq!(app.handle_accelerator("Ctrl+T"), Some(ShellAction::OpenPalette));
    assert!(app.is_palette_open());

    assert_eq!(app.handle_accelerator("Ctrl+W"), Some(ShellAction::CloseTab));
    assert!(app.get_all_tabs().iter().all(|t| t.id != a));

    assert_eq!(app.handle_accelerator("Ctrl+Q"), None);
}

#[test]
fn test_tab_actions_without_active_tab_do_nothing() {
    let (mut app, _probe, _dir) = quiet_app();
    assert!(!app.execute_action(ShellAction::CloseTab));
    assert!(!app.execute_action(ShellAction::Reload));
    assert!(!app.execute_action(ShellAction::NextTab));
    assert!(app.execute_action(ShellAction::OpenPalette));
}

#[test]
fn test_next_and_prev_tab_cycle() {
    let (mut app, _probe, _dir) = quiet_app();
    let a = app.create_tab(None).unwrap();
    let b = app.create_tab(None).unwrap();
    // Order [b, a], b active.
    assert!(app.execute_action(ShellAction::NextTab));
    assert_eq!(active(&app), Some(a));
    assert!(app.execute_action(ShellAction::PrevTab));
    assert_eq!(active(&app), Some(b));
}

#[test]
fn test_rebinding_shortcut_takes_effect() {
    let (mut app, _probe, _dir) = quiet_app();
    app.update_setting("shortcuts.toggle_sidebar", serde_json::json!("Ctrl+B"))
        .unwrap();
    assert_eq!(app.handle_accelerator("Ctrl+B"), Some(ShellAction::ToggleSidebar));
    assert_eq!(app.handle_accelerator("Ctrl+S"), None);
}

#[test]
fn test_palette_filter_and_select() {
    let (mut app, _probe, _dir) = quiet_app();
    let a = app.create_tab(None).unwrap();
    let b = app.create_tab(None).unwrap();
    app.inject_surface_event(a, SurfaceEvent::TitleChanged { title: "Rust docs".into() });
    app.inject_surface_event(b, SurfaceEvent::TitleChanged { title: "News".into() });
    app.pump_events();

    let hits = app.palette_filter("RUST");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, a);
    assert_eq!(app.palette_filter("").len(), 2);

    app.open_palette();
    assert_eq!(app.palette_submit("", Some(a)).unwrap(), Some(a));
    assert_eq!(active(&app), Some(a));
    assert!(!app.is_palette_open());
}

#[test]
fn test_palette_query_opens_new_tab() {
    let (mut app, _probe, _dir) = quiet_app();
    let a = app.create_tab(None).unwrap();
    app.open_palette();
    let opened = app.palette_submit("example.com", Some(a)).unwrap().unwrap();
    assert_ne!(opened, a);
    assert_eq!(active(&app), Some(opened));
    assert_eq!(app.get_active_tab().unwrap().url, "https://example.com");
    assert!(!app.is_palette_open());

    assert_eq!(app.palette_submit("", None).unwrap(), None);
}

#[test]
fn test_context_menu_for_closed_tab_is_none() {
    let (mut app, _probe, _dir) = quiet_app();
    let a = app.create_tab(None).unwrap();
    app.close_tab(a);
    assert!(app.context_menu(a, &ContextParams::default()).is_none());
    assert!(app.activate_menu_item(a, MenuAction::Copy).is_none());
}

#[test]
fn test_context_menu_reflects_history_and_selection() {
    let (mut app, _probe, _dir) = quiet_app();
    let a = app.create_tab(Some("https://one.test/")).unwrap();
    let params = ContextParams {
        selection_text: Some("ferris".into()),
        ..ContextParams::default()
    };
    let menu = app.context_menu(a, &params).unwrap();
    assert!(!menu.iter().any(|e| matches!(e, MenuEntry::Item { action: MenuAction::Back, .. })));
    assert!(menu.iter().any(|e| matches!(e, MenuEntry::Item { action: MenuAction::SearchSelection { .. }, .. })));

    app.navigate_tab(a, "https://two.test/");
    let menu = app.context_menu(a, &ContextParams::default()).unwrap();
    assert!(matches!(menu[0], MenuEntry::Item { action: MenuAction::Back, .. }));
}

#[test]
fn test_menu_items_run_or_return_host_requests() {
    let (mut app, _probe, _dir) = quiet_app();
    let a = app.create_tab(None).unwrap();

    assert_eq!(
        app.activate_menu_item(a, MenuAction::SelectAll),
        Some(HostRequest::EditCommand { command: "selectAll".into() })
    );
    assert_eq!(
        app.activate_menu_item(a, MenuAction::CopyLinkAddress { url: "https://x.test/".into() }),
        Some(HostRequest::WriteClipboard { text: "https://x.test/".into() })
    );

    assert!(app
        .activate_menu_item(a, MenuAction::OpenLinkInNewTab { url: "https://x.test/".into() })
        .is_none());
    assert_eq!(app.get_active_tab().unwrap().url, "https://x.test/");

    app.activate_menu_item(a, MenuAction::SearchSelection { text: "hello world".into() });
    assert_eq!(
        app.get_active_tab().unwrap().url,
        "https://www.google.com/search?q=hello+world"
    );
    assert_eq!(app.get_all_tabs().len(), 3);
}

#[test]
fn test_window_open_from_live_and_closed_opener() {
    let (mut app, _probe, _dir) = quiet_app();
    let a = app.create_tab(None).unwrap();
    let popup = app.handle_window_open(a, "https://popup.test/").unwrap().unwrap();
    assert_eq!(active(&app), Some(popup));

    app.close_tab(a);
    assert_eq!(app.handle_window_open(a, "https://again.test/").unwrap(), None);
    assert_eq!(app.get_all_tabs().len(), 1);
}

#[test]
fn test_failed_creation_is_reported() {
    let (mut app, probe, _dir) = quiet_app();
    probe.fail_next_create();
    assert!(app.create_tab(Some("example.com")).is_err());
    assert!(app.get_all_tabs().is_empty());
    assert!(app.history.list_history().is_empty());
}

#[test]
fn test_shutdown_releases_every_surface() {
    let (mut app, probe, _dir) = quiet_app();
    let a = app.create_tab(None).unwrap();
    app.create_tab(None).unwrap();
    app.shutdown();
    app.shutdown();
    assert_eq!(probe.live_count(), 0);
    assert!(app.get_all_tabs().is_empty());
    assert!(probe.calls_for(a).contains(&SurfaceCall::Destroy));
}
