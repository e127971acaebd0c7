//! ShyNav: a minimal multi-tab browser shell.
//!
//! With the `gui` feature this opens the desktop window. Without it, runs a
//! console demo that drives the shell on the headless surface provider.

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[cfg(feature = "gui")]
fn main() {
    init_logging();
    if let Err(e) = shynav::ui::webview_app::run() {
        eprintln!("shynav: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn main() {
    use shynav::services::settings_engine::SettingsEngine;

    init_logging();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                  ShyNav v{} (headless demo)               ║", env!("CARGO_PKG_VERSION"));
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    // Demo settings are never written, so point them at a scratch path.
    let scratch = std::env::temp_dir().join("shynav-demo-settings.json");
    let engine = SettingsEngine::with_settings(
        scratch.to_string_lossy().to_string(),
        Default::default(),
    );
    let (mut app, probe) = shynav::app::App::with_headless(engine);
    let mut notifications = app.subscribe();

    if let Err(e) = demo::run(&mut app, &probe) {
        eprintln!("demo failed: {}", e);
        std::process::exit(1);
    }

    println!();
    section("Notifications seen by the UI");
    while let Ok(notification) = notifications.try_recv() {
        match serde_json::to_string(&notification) {
            Ok(line) => println!("  {}", line),
            Err(e) => println!("  <unencodable: {}>", e),
        }
    }

    app.shutdown();
    println!();
    println!("  live surfaces after shutdown: {}", probe.live_count());
}

#[cfg(not(feature = "gui"))]
fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

#[cfg(not(feature = "gui"))]
mod demo {
    use shynav::app::App;
    use shynav::managers::history_manager::HistoryManagerTrait;
    use shynav::surface::headless::HeadlessProbe;
    use shynav::types::command::TabAction;
    use shynav::types::errors::SurfaceError;
    use shynav::types::surface::SurfaceEvent;

    use super::section;

    fn print_tabs(app: &App) {
        for tab in app.get_all_tabs() {
            let marker = if tab.is_active { "*" } else { " " };
            println!("  {} [{}] {:<24} {}", marker, tab.id, tab.title, tab.url);
        }
    }

    pub fn run(app: &mut App, probe: &HeadlessProbe) -> Result<(), SurfaceError> {
        section("Open a tab and follow its first load");
        let a = app.create_tab(Some("example.com"))?;
        app.pump_events();
        print_tabs(app);
        println!();

        section("Open a second tab, switch back");
        let b = app.create_tab(Some("rust lang"))?;
        app.pump_events();
        app.set_active_tab(a);
        print_tabs(app);
        println!("  tab {} visible: {}", b, probe.is_visible(b));
        println!();

        section("Navigate, go back, go forward");
        app.navigate_tab(a, "https://www.rust-lang.org/learn");
        app.pump_events();
        app.tab_action(a, TabAction::Back);
        app.pump_events();
        let snapshot = app.get_active_tab();
        println!("  after back: {:?}", snapshot.map(|t| t.url));
        app.tab_action(a, TabAction::Forward);
        app.pump_events();
        print_tabs(app);
        println!();

        section("Late event for a closed tab");
        let sink = probe.sink(b);
        app.close_tab(b);
        let delivered = sink
            .map(|s| s.emit(SurfaceEvent::TitleChanged { title: "ghost".into() }))
            .unwrap_or(false);
        app.pump_events();
        println!("  event accepted by closed tab's sink: {}", delivered);
        print_tabs(app);
        println!();

        section("Keyboard shortcuts");
        for keys in ["Ctrl+S", "Ctrl+T", "Ctrl+W"] {
            let action = app.handle_accelerator(keys);
            println!("  {:<8} -> {:?}", keys, action.map(|a| a.name()));
        }
        println!(
            "  sidebar collapsed: {}, palette open: {}, tabs left: {}",
            app.is_sidebar_collapsed(),
            app.is_palette_open(),
            app.get_all_tabs().len()
        );
        println!();

        section("History");
        for entry in app.history.list_history() {
            println!("  {:<28} {}", entry.title, entry.url);
        }
        Ok(())
    }
}
