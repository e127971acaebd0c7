//! In-process surface provider without a rendering engine.
//!
//! Keeps a per-surface session history so back/forward availability behaves
//! like a real webview, records every command it receives, and can optionally
//! replay the event sequence a webview emits for a navigation. Used by the
//! console demo, the RPC server and the test suite.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::services::url_resolver;
use crate::surface::{EventSink, Surface, SurfaceProvider};
use crate::types::errors::SurfaceError;
use crate::types::surface::SurfaceEvent;
use crate::types::tab::{TabId, DEFAULT_TAB_URL};

/// A command received by a headless surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Create(String),
    Navigate(String),
    Back,
    Forward,
    Reload,
    Stop,
    Show,
    Hide,
    Destroy,
}

#[derive(Debug)]
struct SurfaceRecord {
    history: Vec<String>,
    index: usize,
    visible: bool,
    destroyed: bool,
    sink: EventSink,
}

impl SurfaceRecord {
    fn current_url(&self) -> &str {
        self.history
            .get(self.index)
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_TAB_URL)
    }
}

#[derive(Debug, Default)]
struct HeadlessState {
    surfaces: HashMap<TabId, SurfaceRecord>,
    calls: Vec<(TabId, SurfaceCall)>,
    auto_events: bool,
    fail_next_create: bool,
    failing_urls: HashSet<String>,
}

fn lock(state: &Mutex<HeadlessState>) -> MutexGuard<'_, HeadlessState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Emits the event sequence a webview produces when it commits `url`.
fn emit_load_cycle(sink: &EventSink, url: &str) {
    sink.emit(SurfaceEvent::LoadStarted);
    sink.emit(SurfaceEvent::Navigated {
        url: url.to_string(),
    });
    sink.emit(SurfaceEvent::TitleChanged {
        title: url_resolver::domain_name(url),
    });
    let favicon = url_resolver::favicon_url(url);
    if !favicon.is_empty() {
        sink.emit(SurfaceEvent::FaviconChanged {
            icons: vec![favicon],
        });
    }
    sink.emit(SurfaceEvent::LoadStopped);
}

/// Surface provider backed by in-memory records.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurfaceProvider {
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessSurfaceProvider {
    /// A provider that only records commands; events are injected through the probe.
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider whose surfaces emit load/navigate/title events for every navigation.
    pub fn with_auto_events() -> Self {
        let provider = Self::default();
        lock(&provider.state).auto_events = true;
        provider
    }

    /// Handle for inspecting and driving the surfaces this provider created.
    pub fn probe(&self) -> HeadlessProbe {
        HeadlessProbe {
            state: self.state.clone(),
        }
    }
}

impl SurfaceProvider for HeadlessSurfaceProvider {
    fn create(&mut self, url: &str, sink: EventSink) -> Result<Box<dyn Surface>, SurfaceError> {
        let tab_id = sink.tab_id();
        let mut state = lock(&self.state);
        if state.fail_next_create {
            state.fail_next_create = false;
            return Err(SurfaceError::CreationFailed(format!(
                "headless surface for tab {} refused",
                tab_id
            )));
        }

        state.calls.push((tab_id, SurfaceCall::Create(url.to_string())));
        if state.auto_events && url != DEFAULT_TAB_URL {
            emit_load_cycle(&sink, url);
        }
        state.surfaces.insert(
            tab_id,
            SurfaceRecord {
                history: vec![url.to_string()],
                index: 0,
                visible: false,
                destroyed: false,
                sink,
            },
        );

        Ok(Box::new(HeadlessSurface {
            tab_id,
            state: self.state.clone(),
        }))
    }
}

struct HeadlessSurface {
    tab_id: TabId,
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessSurface {
    /// Runs `f` on this surface's record, failing once the surface is destroyed.
    fn with_record<T>(
        &self,
        call: SurfaceCall,
        f: impl FnOnce(&mut SurfaceRecord, bool) -> Result<T, SurfaceError>,
    ) -> Result<T, SurfaceError> {
        let mut state = lock(&self.state);
        state.calls.push((self.tab_id, call));
        let auto = state.auto_events;
        match state.surfaces.get_mut(&self.tab_id) {
            Some(record) if !record.destroyed => f(record, auto),
            _ => Err(SurfaceError::Destroyed),
        }
    }

    fn read<T: Default>(&self, f: impl FnOnce(&SurfaceRecord) -> T) -> T {
        let state = lock(&self.state);
        match state.surfaces.get(&self.tab_id) {
            Some(record) if !record.destroyed => f(record),
            _ => T::default(),
        }
    }
}

impl Surface for HeadlessSurface {
    fn navigate(&mut self, url: &str) -> Result<(), SurfaceError> {
        let failing = lock(&self.state).failing_urls.contains(url);
        self.with_record(SurfaceCall::Navigate(url.to_string()), |record, auto| {
            if failing {
                return Err(SurfaceError::NavigationFailed(url.to_string()));
            }
            record.history.truncate(record.index + 1);
            record.history.push(url.to_string());
            record.index = record.history.len() - 1;
            if auto {
                emit_load_cycle(&record.sink, url);
            }
            Ok(())
        })
    }

    fn go_back(&mut self) -> Result<(), SurfaceError> {
        self.with_record(SurfaceCall::Back, |record, auto| {
            if record.index > 0 {
                record.index -= 1;
                if auto {
                    let url = record.current_url().to_string();
                    emit_load_cycle(&record.sink, &url);
                }
            }
            Ok(())
        })
    }

    fn go_forward(&mut self) -> Result<(), SurfaceError> {
        self.with_record(SurfaceCall::Forward, |record, auto| {
            if record.index + 1 < record.history.len() {
                record.index += 1;
                if auto {
                    let url = record.current_url().to_string();
                    emit_load_cycle(&record.sink, &url);
                }
            }
            Ok(())
        })
    }

    fn reload(&mut self) -> Result<(), SurfaceError> {
        self.with_record(SurfaceCall::Reload, |record, auto| {
            if auto {
                record.sink.emit(SurfaceEvent::LoadStarted);
                record.sink.emit(SurfaceEvent::LoadStopped);
            }
            Ok(())
        })
    }

    fn stop(&mut self) -> Result<(), SurfaceError> {
        self.with_record(SurfaceCall::Stop, |_, _| Ok(()))
    }

    fn can_go_back(&self) -> bool {
        self.read(|record| record.index > 0)
    }

    fn can_go_forward(&self) -> bool {
        self.read(|record| record.index + 1 < record.history.len())
    }

    fn set_visible(&mut self, visible: bool) {
        let call = if visible {
            SurfaceCall::Show
        } else {
            SurfaceCall::Hide
        };
        let _ = self.with_record(call, |record, _| {
            record.visible = visible;
            Ok(())
        });
    }

    fn destroy(&mut self) {
        let mut state = lock(&self.state);
        state.calls.push((self.tab_id, SurfaceCall::Destroy));
        if let Some(record) = state.surfaces.get_mut(&self.tab_id) {
            record.destroyed = true;
            record.visible = false;
        }
    }
}

/// Test and host-side view into a [`HeadlessSurfaceProvider`].
#[derive(Debug, Clone)]
pub struct HeadlessProbe {
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessProbe {
    /// Every command received so far, in order.
    pub fn calls(&self) -> Vec<(TabId, SurfaceCall)> {
        lock(&self.state).calls.clone()
    }

    pub fn calls_for(&self, tab_id: TabId) -> Vec<SurfaceCall> {
        lock(&self.state)
            .calls
            .iter()
            .filter(|(id, _)| *id == tab_id)
            .map(|(_, call)| call.clone())
            .collect()
    }

    pub fn navigate_count(&self, tab_id: TabId) -> usize {
        self.calls_for(tab_id)
            .iter()
            .filter(|call| matches!(call, SurfaceCall::Navigate(_)))
            .count()
    }

    pub fn is_visible(&self, tab_id: TabId) -> bool {
        lock(&self.state)
            .surfaces
            .get(&tab_id)
            .map(|r| r.visible)
            .unwrap_or(false)
    }

    pub fn is_destroyed(&self, tab_id: TabId) -> bool {
        lock(&self.state)
            .surfaces
            .get(&tab_id)
            .map(|r| r.destroyed)
            .unwrap_or(false)
    }

    /// Number of surfaces created and not yet destroyed.
    pub fn live_count(&self) -> usize {
        lock(&self.state)
            .surfaces
            .values()
            .filter(|r| !r.destroyed)
            .count()
    }

    /// Address the surface is currently showing, if it exists.
    pub fn current_url(&self, tab_id: TabId) -> Option<String> {
        lock(&self.state)
            .surfaces
            .get(&tab_id)
            .map(|r| r.current_url().to_string())
    }

    /// Pushes an event through the surface's own sink, as the host would.
    /// Returns false if the surface is unknown or its tab unsubscribed.
    pub fn emit(&self, tab_id: TabId, event: SurfaceEvent) -> bool {
        let state = lock(&self.state);
        match state.surfaces.get(&tab_id) {
            Some(record) => record.sink.emit(event),
            None => false,
        }
    }

    /// Clone of the sink a surface was created with, for emitting after teardown.
    pub fn sink(&self, tab_id: TabId) -> Option<EventSink> {
        lock(&self.state)
            .surfaces
            .get(&tab_id)
            .map(|r| r.sink.clone())
    }

    pub fn fail_next_create(&self) {
        lock(&self.state).fail_next_create = true;
    }

    /// Makes every future navigation to `url` fail at the surface.
    pub fn fail_navigation_to(&self, url: &str) {
        lock(&self.state).failing_urls.insert(url.to_string());
    }
}
