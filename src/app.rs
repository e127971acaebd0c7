//! App Core for ShyNav.
//!
//! Composition root: owns the tab registry and the shell-level state around
//! it (history, downloads, shortcuts, settings, palette and sidebar flags),
//! and implements the UI policies that sit above the registry.

use tokio::sync::mpsc::UnboundedReceiver;

use crate::managers::command_router::NavigationCommandRouter;
use crate::managers::download_manager::DownloadManager;
use crate::managers::event_bridge::SurfaceEventBridge;
use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait};
use crate::managers::tab_registry::{TabRegistry, TabRegistryTrait};
use crate::services::command_palette::{self, PaletteOutcome};
use crate::services::context_menu;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::url_resolver;
use crate::surface::headless::{HeadlessProbe, HeadlessSurfaceProvider};
use crate::surface::SurfaceProvider;
use crate::types::command::{NavCommand, ShellAction, TabAction};
use crate::types::context_menu::{ContextParams, HostRequest, MenuAction, MenuEntry};
use crate::types::errors::{SettingsError, SurfaceError};
use crate::types::notification::Notification;
use crate::types::settings::ShellSettings;
use crate::types::surface::{SurfaceEnvelope, SurfaceEvent};
use crate::types::tab::{TabId, TabSnapshot};

/// Central application struct.
///
/// Everything runs on one logical thread: UI commands and [`App::pump_events`]
/// are never interleaved mid-operation, so no state here needs a lock.
pub struct App {
    registry: TabRegistry,
    events_rx: UnboundedReceiver<SurfaceEnvelope>,
    pub history: HistoryManager,
    pub downloads: DownloadManager,
    pub shortcuts: ShortcutManager,
    pub settings_engine: SettingsEngine,
    palette_open: bool,
    sidebar_collapsed: bool,
}

impl App {
    /// Builds the shell around `provider`, configured from the settings the
    /// engine currently holds. The caller decides whether to `load()` first.
    pub fn new(provider: Box<dyn SurfaceProvider>, settings_engine: SettingsEngine) -> Self {
        let (registry, events_rx) = TabRegistry::with_event_receiver(provider);
        let settings = settings_engine.get_settings();
        let history = HistoryManager::new(&settings.history);
        let downloads = DownloadManager::new(settings.downloads.limit);
        let shortcuts = ShortcutManager::from_bindings(&settings.shortcuts);

        Self {
            registry,
            events_rx,
            history,
            downloads,
            shortcuts,
            settings_engine,
            palette_open: false,
            sidebar_collapsed: false,
        }
    }

    /// Shell backed by the in-process headless provider, plus a probe to
    /// observe and drive its surfaces.
    pub fn with_headless(settings_engine: SettingsEngine) -> (Self, HeadlessProbe) {
        let provider = HeadlessSurfaceProvider::with_auto_events();
        let probe = provider.probe();
        (Self::new(Box::new(provider), settings_engine), probe)
    }

    pub fn settings(&self) -> &ShellSettings {
        self.settings_engine.get_settings()
    }

    /// Changes one setting by dot path and persists it. Shortcut edits take
    /// effect immediately; limits apply from the next start.
    pub fn update_setting(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        self.settings_engine.set_value(key, value)?;
        if key.starts_with("shortcuts.") {
            self.shortcuts = ShortcutManager::from_bindings(&self.settings().shortcuts);
        }
        Ok(())
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TabRegistry {
        &mut self.registry
    }

    fn resolve_input(&self, input: &str) -> String {
        url_resolver::normalize_url(input, &self.settings().general.search_url)
    }

    // ─── Tab lifecycle ───

    /// Opens a tab and makes it active. Blank input opens the configured new
    /// tab page; anything else goes through address resolution first.
    pub fn create_tab(&mut self, input: Option<&str>) -> Result<TabId, SurfaceError> {
        let typed = input.map(str::trim).filter(|s| !s.is_empty());
        let url = match typed {
            Some(text) => self.resolve_input(text),
            None => self.settings().general.new_tab_url.clone(),
        };

        let id = self.registry.create_tab(Some(&url))?;
        self.registry.set_active_tab(id);
        self.palette_open = false;
        if typed.is_some() {
            self.history.record_visit(&url, None);
        }
        Ok(id)
    }

    /// Closes a tab. Closing the last one brings up the palette.
    pub fn close_tab(&mut self, tab_id: TabId) -> bool {
        let closed = self.registry.close_tab(tab_id);
        if closed && self.registry.is_empty() {
            self.palette_open = true;
        }
        closed
    }

    pub fn set_active_tab(&mut self, tab_id: TabId) -> bool {
        self.registry.set_active_tab(tab_id)
    }

    pub fn get_all_tabs(&self) -> Vec<TabSnapshot> {
        self.registry.get_all_tabs()
    }

    pub fn get_active_tab(&self) -> Option<TabSnapshot> {
        self.registry
            .active_id()
            .and_then(|id| self.registry.snapshot(id))
    }

    // ─── Navigation ───

    /// Resolves `input` and navigates the addressed tab. False when the tab
    /// is gone. History is written once the surface reports the navigation.
    pub fn navigate_tab(&mut self, tab_id: TabId, input: &str) -> bool {
        let url = self.resolve_input(input);
        NavigationCommandRouter::dispatch(&mut self.registry, tab_id, NavCommand::Navigate(url))
    }

    /// Address bar submit: navigates the active tab, or opens one if none is
    /// active.
    pub fn navigate_active(&mut self, input: &str) -> Result<TabId, SurfaceError> {
        match self.registry.active_id() {
            Some(id) => {
                self.navigate_tab(id, input);
                Ok(id)
            }
            None => self.create_tab(Some(input)),
        }
    }

    pub fn tab_action(&mut self, tab_id: TabId, action: TabAction) -> bool {
        NavigationCommandRouter::dispatch(&mut self.registry, tab_id, action.into())
    }

    /// A page asked for a new window. It opens as a new active tab, unless
    /// the requesting tab has been closed in the meantime.
    pub fn handle_window_open(
        &mut self,
        opener: TabId,
        url: &str,
    ) -> Result<Option<TabId>, SurfaceError> {
        if !self.registry.contains(opener) {
            log::debug!("ignoring window.open from closed tab {}", opener);
            return Ok(None);
        }
        self.create_tab(Some(url)).map(Some)
    }

    // ─── Surface events ───

    pub fn subscribe(&mut self) -> UnboundedReceiver<Notification> {
        self.registry.subscribe()
    }

    /// Current tabs plus a receiver for every change after them. Nothing is
    /// replayed, so this is how a late subscriber catches up.
    pub fn subscribe_with_snapshot(&mut self) -> (Vec<TabSnapshot>, UnboundedReceiver<Notification>) {
        let rx = self.registry.subscribe();
        (self.registry.get_all_tabs(), rx)
    }

    /// Queues an event as if the tab's surface had emitted it. Returns false
    /// for unknown tabs.
    pub fn inject_surface_event(&mut self, tab_id: TabId, event: SurfaceEvent) -> bool {
        if !self.registry.contains(tab_id) {
            return false;
        }
        self.registry
            .event_sender()
            .send(SurfaceEnvelope { tab_id, event })
            .is_ok()
    }

    /// Applies all queued surface events, then feeds history and downloads.
    pub fn pump_events(&mut self) -> Vec<Notification> {
        let published = SurfaceEventBridge::drain(&mut self.registry, &mut self.events_rx);
        for notification in &published {
            match notification {
                Notification::NavigationChanged { url, .. } => {
                    self.history.record_visit(url, None);
                }
                Notification::TitleChanged { id, title } => {
                    if let Some(tab) = self.registry.get_tab_by_id(*id) {
                        self.history.retitle(tab.url(), title);
                    }
                }
                Notification::DownloadStarted { .. } => {
                    self.downloads.observe(notification);
                }
                _ => {}
            }
        }
        published
    }

    // ─── Shell chrome ───

    pub fn is_palette_open(&self) -> bool {
        self.palette_open
    }

    pub fn open_palette(&mut self) {
        self.palette_open = true;
    }

    pub fn close_palette(&mut self) {
        self.palette_open = false;
    }

    pub fn is_sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.sidebar_collapsed
    }

    pub fn palette_filter(&self, query: &str) -> Vec<TabSnapshot> {
        let tabs = self.registry.get_all_tabs();
        command_palette::filter_tabs(&tabs, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Palette submit: a query always opens in a new tab; otherwise the
    /// highlighted tab is activated. Closes the palette either way.
    pub fn palette_submit(
        &mut self,
        query: &str,
        selected: Option<TabId>,
    ) -> Result<Option<TabId>, SurfaceError> {
        let outcome = command_palette::submit(query, selected, &self.settings().general.search_url);
        self.palette_open = false;
        match outcome {
            PaletteOutcome::Open(url) => self.create_tab(Some(&url)).map(Some),
            PaletteOutcome::Select(id) => Ok(self.set_active_tab(id).then_some(id)),
            PaletteOutcome::Nothing => Ok(None),
        }
    }

    /// Looks up the accelerator and runs its action. Returns the action that
    /// ran, or `None` when the keys are unbound.
    pub fn handle_accelerator(&mut self, keys: &str) -> Option<ShellAction> {
        let action = self.shortcuts.resolve(keys)?;
        log::debug!("accelerator {} -> {}", keys, action.name());
        self.execute_action(action);
        Some(action)
    }

    /// Runs a shell action. Tab-scoped actions with no active tab do nothing.
    pub fn execute_action(&mut self, action: ShellAction) -> bool {
        let active = self.registry.active_id();
        match action {
            ShellAction::OpenPalette => {
                self.open_palette();
                true
            }
            ShellAction::ToggleSidebar => {
                self.toggle_sidebar();
                true
            }
            ShellAction::CloseTab => active.is_some_and(|id| self.close_tab(id)),
            ShellAction::Reload => active.is_some_and(|id| self.tab_action(id, TabAction::Reload)),
            ShellAction::Back => active.is_some_and(|id| self.tab_action(id, TabAction::Back)),
            ShellAction::Forward => active.is_some_and(|id| self.tab_action(id, TabAction::Forward)),
            ShellAction::StopLoading => active.is_some_and(|id| self.tab_action(id, TabAction::Stop)),
            ShellAction::NextTab => self.registry.activate_adjacent(true),
            ShellAction::PrevTab => self.registry.activate_adjacent(false),
        }
    }

    // ─── Context menu ───

    /// Menu for a right-click in `tab_id`, or `None` if the tab is gone.
    pub fn context_menu(&self, tab_id: TabId, params: &ContextParams) -> Option<Vec<MenuEntry>> {
        let tab = self.registry.get_tab_by_id(tab_id)?;
        Some(context_menu::build_menu(
            params,
            tab.can_go_back(),
            tab.can_go_forward(),
            self.settings().general.developer_mode,
        ))
    }

    /// Carries out a chosen menu item. Work only the host can do comes back
    /// as a [`HostRequest`].
    pub fn activate_menu_item(&mut self, tab_id: TabId, action: MenuAction) -> Option<HostRequest> {
        if !self.registry.contains(tab_id) {
            return None;
        }
        let edit = |command: &str| {
            Some(HostRequest::EditCommand {
                command: command.to_string(),
            })
        };
        match action {
            MenuAction::Back => {
                self.tab_action(tab_id, TabAction::Back);
                None
            }
            MenuAction::Forward => {
                self.tab_action(tab_id, TabAction::Forward);
                None
            }
            MenuAction::Reload => {
                self.tab_action(tab_id, TabAction::Reload);
                None
            }
            MenuAction::Cut => edit("cut"),
            MenuAction::Copy => edit("copy"),
            MenuAction::Paste => edit("paste"),
            MenuAction::SelectAll => edit("selectAll"),
            MenuAction::OpenLinkInNewTab { url } => {
                self.open_in_new_tab(&url);
                None
            }
            MenuAction::CopyLinkAddress { url } | MenuAction::CopyImageAddress { url } => {
                Some(HostRequest::WriteClipboard { text: url })
            }
            MenuAction::CopyImage { x, y } => Some(HostRequest::CopyImageAt { x, y }),
            MenuAction::SearchSelection { text } => {
                let url = url_resolver::search_url_for(&text, &self.settings().general.search_url);
                self.open_in_new_tab(&url);
                None
            }
            MenuAction::InspectElement { x, y } => Some(HostRequest::InspectElement { x, y }),
        }
    }

    fn open_in_new_tab(&mut self, url: &str) {
        if let Err(e) = self.create_tab(Some(url)) {
            log::warn!("could not open {} in a new tab: {}", url, e);
        }
    }

    /// Tears down every tab. Safe to call more than once.
    pub fn shutdown(&mut self) {
        log::info!("shutting down with {} open tab(s)", self.registry.tab_count());
        self.registry.destroy();
    }
}
