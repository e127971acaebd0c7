//! `Surface` implementation backed by a `wry` child webview.
//!
//! The webview reports page loads, title changes and downloads through wry's
//! builder callbacks. Those forward into the tab's [`EventSink`] and wake the
//! `tao` event loop so the shell pumps them on its own thread.

use std::cell::RefCell;
use std::path::Path;
use std::rc::{Rc, Weak};
use std::sync::{Arc, Mutex};

use tao::event_loop::EventLoopProxy;
use tao::window::Window;
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::{NewWindowResponse, PageLoadEvent, Rect, WebView, WebViewBuilder};

use crate::surface::{EventSink, Surface, SurfaceProvider};
use crate::types::errors::SurfaceError;
use crate::types::surface::SurfaceEvent;
use crate::types::tab::TabId;

/// Wake-ups sent from webview callbacks to the event loop.
#[derive(Debug)]
pub enum UserEvent {
    /// Something was queued on a surface event sink.
    SurfaceActivity,
    /// Message from the chrome webview.
    ChromeIpc(String),
    WindowOpen { opener: TabId, url: String },
}

/// Area of the window the content webviews occupy, in logical pixels.
#[derive(Debug, Clone, Copy)]
pub struct ContentBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ContentBounds {
    pub fn to_rect(self) -> Rect {
        Rect {
            position: LogicalPosition::new(self.x, self.y).into(),
            size: LogicalSize::new(self.width, self.height).into(),
        }
    }
}

/// Content area plus every content webview, so a resize can reach them all.
#[derive(Debug)]
pub struct ContentLayout {
    bounds: ContentBounds,
    views: Vec<Weak<WebView>>,
}

impl ContentLayout {
    pub fn new(bounds: ContentBounds) -> Self {
        Self { bounds, views: Vec::new() }
    }

    pub fn resize(&mut self, bounds: ContentBounds) {
        self.bounds = bounds;
        self.views.retain(|view| match view.upgrade() {
            Some(view) => {
                if let Err(e) = view.set_bounds(bounds.to_rect()) {
                    log::warn!("could not resize content view: {}", e);
                }
                true
            }
            None => false,
        });
    }
}

/// Back/forward stack reconstructed from committed page loads. The webview
/// itself does not expose its session history.
#[derive(Debug)]
struct NavHistory {
    entries: Vec<String>,
    index: usize,
}

impl NavHistory {
    fn new(url: &str) -> Self {
        Self { entries: vec![url.to_string()], index: 0 }
    }

    fn commit(&mut self, url: &str) {
        if self.entries.get(self.index).map(String::as_str) == Some(url) {
            return;
        }
        if self.index > 0 && self.entries[self.index - 1] == url {
            self.index -= 1;
        } else if self.entries.get(self.index + 1).map(String::as_str) == Some(url) {
            self.index += 1;
        } else {
            self.entries.truncate(self.index + 1);
            self.entries.push(url.to_string());
            self.index = self.entries.len() - 1;
        }
    }

    fn can_go_back(&self) -> bool {
        self.index > 0
    }

    fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }
}

fn lock(history: &Mutex<NavHistory>) -> std::sync::MutexGuard<'_, NavHistory> {
    history.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn download_name(url: &str, path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .filter(|n| !n.is_empty())
        .or_else(|| url.rsplit('/').next().map(str::to_string).filter(|n| !n.is_empty()))
        .unwrap_or_default()
}

/// Builds one child webview per tab inside the shell window.
pub struct WrySurfaceProvider {
    window: Rc<Window>,
    proxy: EventLoopProxy<UserEvent>,
    layout: Rc<RefCell<ContentLayout>>,
}

impl WrySurfaceProvider {
    pub fn new(
        window: Rc<Window>,
        proxy: EventLoopProxy<UserEvent>,
        layout: Rc<RefCell<ContentLayout>>,
    ) -> Self {
        Self { window, proxy, layout }
    }
}

impl SurfaceProvider for WrySurfaceProvider {
    fn create(&mut self, url: &str, sink: EventSink) -> Result<Box<dyn Surface>, SurfaceError> {
        let tab_id = sink.tab_id();
        let history = Arc::new(Mutex::new(NavHistory::new(url)));

        let load_sink = sink.clone();
        let load_proxy = self.proxy.clone();
        let load_history = history.clone();
        let title_sink = sink.clone();
        let title_proxy = self.proxy.clone();
        let download_sink = sink;
        let download_proxy = self.proxy.clone();
        let popup_proxy = self.proxy.clone();

        let bounds = self.layout.borrow().bounds;
        let webview = WebViewBuilder::new()
            .with_url(url)
            .with_bounds(bounds.to_rect())
            .with_visible(false)
            .with_on_page_load_handler(move |event, url| {
                match event {
                    PageLoadEvent::Started => {
                        load_sink.emit(SurfaceEvent::LoadStarted);
                    }
                    PageLoadEvent::Finished => {
                        lock(&load_history).commit(&url);
                        load_sink.emit(SurfaceEvent::Navigated { url });
                        load_sink.emit(SurfaceEvent::LoadStopped);
                    }
                }
                let _ = load_proxy.send_event(UserEvent::SurfaceActivity);
            })
            .with_document_title_changed_handler(move |title| {
                title_sink.emit(SurfaceEvent::TitleChanged { title });
                let _ = title_proxy.send_event(UserEvent::SurfaceActivity);
            })
            .with_download_started_handler(move |url, path| {
                let filename = download_name(&url, path);
                download_sink.emit(SurfaceEvent::DownloadStarted {
                    filename,
                    url,
                    total_bytes: 0,
                });
                let _ = download_proxy.send_event(UserEvent::SurfaceActivity);
                true
            })
            .with_new_window_req_handler(move |url, _features| {
                let _ = popup_proxy.send_event(UserEvent::WindowOpen { opener: tab_id, url });
                NewWindowResponse::Deny
            })
            .build_as_child(self.window.as_ref())
            .map_err(|e| SurfaceError::CreationFailed(e.to_string()))?;

        let webview = Rc::new(webview);
        self.layout.borrow_mut().views.push(Rc::downgrade(&webview));
        log::debug!("tab {}: webview created", tab_id);

        Ok(Box::new(WrySurface {
            webview: Some(webview),
            history,
        }))
    }
}

pub struct WrySurface {
    webview: Option<Rc<WebView>>,
    history: Arc<Mutex<NavHistory>>,
}

impl WrySurface {
    fn view(&self) -> Result<&WebView, SurfaceError> {
        self.webview.as_deref().ok_or(SurfaceError::Destroyed)
    }

    fn script(&self, js: &str) -> Result<(), SurfaceError> {
        self.view()?
            .evaluate_script(js)
            .map_err(|e| SurfaceError::Host(e.to_string()))
    }
}

impl Surface for WrySurface {
    fn navigate(&mut self, url: &str) -> Result<(), SurfaceError> {
        self.view()?
            .load_url(url)
            .map_err(|e| SurfaceError::NavigationFailed(e.to_string()))
    }

    fn go_back(&mut self) -> Result<(), SurfaceError> {
        self.script("history.back()")
    }

    fn go_forward(&mut self) -> Result<(), SurfaceError> {
        self.script("history.forward()")
    }

    fn reload(&mut self) -> Result<(), SurfaceError> {
        self.view()?
            .reload()
            .map_err(|e| SurfaceError::Host(e.to_string()))
    }

    fn stop(&mut self) -> Result<(), SurfaceError> {
        self.script("window.stop()")
    }

    fn can_go_back(&self) -> bool {
        lock(&self.history).can_go_back()
    }

    fn can_go_forward(&self) -> bool {
        lock(&self.history).can_go_forward()
    }

    fn set_visible(&mut self, visible: bool) {
        if let Some(view) = &self.webview {
            if let Err(e) = view.set_visible(visible) {
                log::warn!("set_visible({}) failed: {}", visible, e);
            }
        }
    }

    fn destroy(&mut self) {
        // Dropping the last strong reference removes the child webview.
        self.webview = None;
    }
}
