use tokio::sync::mpsc::UnboundedReceiver;

use shynav::managers::event_bridge::SurfaceEventBridge;
use shynav::managers::tab_registry::{TabRegistry, TabRegistryTrait};
use shynav::surface::headless::{HeadlessProbe, HeadlessSurfaceProvider};
use shynav::types::notification::Notification;
use shynav::types::surface::{SurfaceEnvelope, SurfaceEvent};
use shynav::types::tab::{TabId, UNTITLED};

struct Harness {
    registry: TabRegistry,
    events: UnboundedReceiver<SurfaceEnvelope>,
    probe: HeadlessProbe,
}

impl Harness {
    fn new() -> Self {
        let provider = HeadlessSurfaceProvider::new();
        let probe = provider.probe();
        let (registry, events) = TabRegistry::with_event_receiver(Box::new(provider));
        Self { registry, events, probe }
    }

    fn pump(&mut self) -> Vec<Notification> {
        SurfaceEventBridge::drain(&mut self.registry, &mut self.events)
    }
}

#[test]
fn test_load_cycle_toggles_loading() {
    let mut h = Harness::new();
    let id = h.registry.create_tab(Some("https://example.com")).unwrap();
    assert!(!h.registry.get_tab_by_id(id).unwrap().is_loading());

    h.probe.emit(id, SurfaceEvent::LoadStarted);
    let seen = h.pump();
    assert_eq!(seen, vec![Notification::LoadingChanged { id, is_loading: true }]);
    assert!(h.registry.get_tab_by_id(id).unwrap().is_loading());

    h.probe.emit(id, SurfaceEvent::LoadStopped);
    h.pump();
    assert!(!h.registry.get_tab_by_id(id).unwrap().is_loading());
}

#[test]
fn test_navigated_updates_url_and_history_flags() {
    let mut h = Harness::new();
    let id = h.registry.create_tab(Some("https://a.test/")).unwrap();
    h.registry.get_tab_mut(id).unwrap().load_url("https://b.test/");

    h.probe.emit(id, SurfaceEvent::Navigated { url: "https://b.test/final".into() });
    let seen = h.pump();
    assert_eq!(
        seen,
        vec![Notification::NavigationChanged {
            id,
            url: "https://b.test/final".into(),
            can_go_back: true,
            can_go_forward: false,
        }]
    );
    assert_eq!(h.registry.get_tab_by_id(id).unwrap().url(), "https://b.test/final");
}

#[test]
fn test_empty_title_becomes_untitled() {
    let mut h = Harness::new();
    let id = h.registry.create_tab(None).unwrap();
    h.probe.emit(id, SurfaceEvent::TitleChanged { title: "  ".into() });
    h.pump();
    assert_eq!(h.registry.get_tab_by_id(id).unwrap().title(), UNTITLED);

    h.probe.emit(id, SurfaceEvent::TitleChanged { title: "Example".into() });
    let seen = h.pump();
    assert_eq!(seen, vec![Notification::TitleChanged { id, title: "Example".into() }]);
}

#[test]
fn test_favicon_takes_first_icon_and_empty_report_keeps_it() {
    let mut h = Harness::new();
    let id = h.registry.create_tab(None).unwrap();
    h.probe.emit(
        id,
        SurfaceEvent::FaviconChanged {
            icons: vec!["https://a.test/icon.png".into(), "https://a.test/other.png".into()],
        },
    );
    h.pump();
    assert_eq!(h.registry.get_tab_by_id(id).unwrap().favicon(), "https://a.test/icon.png");

    h.probe.emit(id, SurfaceEvent::FaviconChanged { icons: vec![] });
    let seen = h.pump();
    assert_eq!(
        seen,
        vec![Notification::FaviconChanged {
            id,
            favicon: "https://a.test/icon.png".into(),
        }]
    );
    assert_eq!(h.registry.get_tab_by_id(id).unwrap().favicon(), "https://a.test/icon.png");
}

#[test]
fn test_download_without_name_gets_default() {
    let mut h = Harness::new();
    let id = h.registry.create_tab(None).unwrap();
    h.probe.emit(
        id,
        SurfaceEvent::DownloadStarted {
            filename: String::new(),
            url: "https://a.test/file".into(),
            total_bytes: 10,
        },
    );
    let seen = h.pump();
    assert_eq!(
        seen,
        vec![Notification::DownloadStarted {
            id,
            filename: "download".into(),
            url: "https://a.test/file".into(),
            total_bytes: 10,
        }]
    );
}

#[test]
fn test_events_for_closed_tab_are_dropped() {
    let mut h = Harness::new();
    let a = h.registry.create_tab(Some("https://a.test/")).unwrap();
    let b = h.registry.create_tab(Some("https://b.test/")).unwrap();
    let mut rx = h.registry.subscribe();

    // Queued before close, applied after.
    h.probe.emit(a, SurfaceEvent::TitleChanged { title: "late".into() });
    h.registry.close_tab(a);
    let seen = h.pump();
    assert!(seen.is_empty());

    // Emitted after close: the sink is detached.
    let sink = h.probe.sink(a).unwrap();
    assert!(!sink.emit(SurfaceEvent::LoadStarted));

    let untouched = h.registry.get_tab_by_id(b).unwrap();
    assert_eq!(untouched.title(), "New Tab");
    while let Ok(n) = rx.try_recv() {
        assert!(!matches!(n, Notification::TitleChanged { .. }));
    }
}

#[test]
fn test_apply_unknown_tab_returns_none() {
    let mut h = Harness::new();
    let envelope = SurfaceEnvelope {
        tab_id: TabId(77),
        event: SurfaceEvent::LoadStarted,
    };
    assert!(SurfaceEventBridge::apply(&mut h.registry, envelope).is_none());
}

#[test]
fn test_events_only_touch_their_own_tab() {
    let mut h = Harness::new();
    let a = h.registry.create_tab(None).unwrap();
    let b = h.registry.create_tab(None).unwrap();
    h.probe.emit(b, SurfaceEvent::TitleChanged { title: "Bee".into() });
    h.probe.emit(b, SurfaceEvent::LoadStarted);
    h.pump();

    let tab_a = h.registry.get_tab_by_id(a).unwrap();
    assert_eq!(tab_a.title(), "New Tab");
    assert!(!tab_a.is_loading());
    let tab_b = h.registry.get_tab_by_id(b).unwrap();
    assert_eq!(tab_b.title(), "Bee");
    assert!(tab_b.is_loading());
}

#[test]
fn test_notifications_reach_subscribers_in_order() {
    let mut h = Harness::new();
    let id = h.registry.create_tab(None).unwrap();
    let mut rx = h.registry.subscribe();
    h.probe.emit(id, SurfaceEvent::LoadStarted);
    h.probe.emit(id, SurfaceEvent::TitleChanged { title: "T".into() });
    h.probe.emit(id, SurfaceEvent::LoadStopped);
    h.pump();

    let mut seen = Vec::new();
    while let Ok(n) = rx.try_recv() {
        seen.push(n);
    }
    assert_eq!(
        seen,
        vec![
            Notification::LoadingChanged { id, is_loading: true },
            Notification::TitleChanged { id, title: "T".into() },
            Notification::LoadingChanged { id, is_loading: false },
        ]
    );
}
