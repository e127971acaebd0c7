//! One tab: the binding between a browsing context and its content surface.

use crate::surface::{Subscription, Surface};
use crate::types::tab::{TabId, TabSnapshot, NEW_TAB_TITLE};

/// A live tab and the last state its surface reported.
///
/// The tab exclusively owns its surface. Dropping or destroying the tab
/// detaches the event subscription and releases the surface.
pub struct Tab {
    id: TabId,
    url: String,
    title: String,
    favicon: String,
    is_loading: bool,
    surface: Option<Box<dyn Surface>>,
    subscription: Subscription,
}

impl Tab {
    /// Binds a freshly created surface. `url` is the address it was created with.
    pub fn new(id: TabId, url: &str, surface: Box<dyn Surface>, subscription: Subscription) -> Self {
        Self {
            id,
            url: url.to_string(),
            title: NEW_TAB_TITLE.to_string(),
            favicon: String::new(),
            is_loading: false,
            surface: Some(surface),
            subscription,
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn favicon(&self) -> &str {
        &self.favicon
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_destroyed(&self) -> bool {
        self.surface.is_none()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_active()
    }

    pub fn snapshot(&self, is_active: bool) -> TabSnapshot {
        TabSnapshot {
            id: self.id,
            url: self.url.clone(),
            title: self.title.clone(),
            favicon: self.favicon.clone(),
            is_loading: self.is_loading,
            is_active,
        }
    }

    /// Navigates the surface to `url` unless it is already the cached address.
    ///
    /// The cached URL is updated before the surface confirms. If the surface
    /// refuses outright the previous address is restored and the failure only
    /// logged; otherwise the next navigation event carries the real address.
    pub fn load_url(&mut self, url: &str) {
        if url == self.url {
            log::debug!("tab {}: skipping redundant navigation to {}", self.id, url);
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let previous = std::mem::replace(&mut self.url, url.to_string());
        if let Err(e) = surface.navigate(url) {
            log::warn!("tab {}: failed to load {}: {}", self.id, url, e);
            self.url = previous;
        }
    }

    pub fn go_back(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            if surface.can_go_back() {
                if let Err(e) = surface.go_back() {
                    log::warn!("tab {}: back failed: {}", self.id, e);
                }
            }
        }
    }

    pub fn go_forward(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            if surface.can_go_forward() {
                if let Err(e) = surface.go_forward() {
                    log::warn!("tab {}: forward failed: {}", self.id, e);
                }
            }
        }
    }

    pub fn reload(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            if let Err(e) = surface.reload() {
                log::warn!("tab {}: reload failed: {}", self.id, e);
            }
        }
    }

    pub fn stop(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            if let Err(e) = surface.stop() {
                log::warn!("tab {}: stop failed: {}", self.id, e);
            }
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.surface.as_ref().map(|s| s.can_go_back()).unwrap_or(false)
    }

    pub fn can_go_forward(&self) -> bool {
        self.surface
            .as_ref()
            .map(|s| s.can_go_forward())
            .unwrap_or(false)
    }

    pub fn show(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.set_visible(true);
        }
    }

    pub fn hide(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.set_visible(false);
        }
    }

    /// Detaches from surface events, then releases the surface. Idempotent.
    pub fn destroy(&mut self) {
        self.subscription.unsubscribe();
        if let Some(mut surface) = self.surface.take() {
            surface.destroy();
            log::debug!("tab {}: surface released", self.id);
        }
        self.is_loading = false;
    }

    // Setters used by the event bridge. Surface events are the only writers
    // of title, favicon and loading state.

    pub(crate) fn set_committed_url(&mut self, url: &str) {
        self.url = url.to_string();
    }

    pub(crate) fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub(crate) fn set_favicon(&mut self, favicon: &str) {
        self.favicon = favicon.to_string();
    }

    pub(crate) fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }
}

impl Drop for Tab {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl std::fmt::Debug for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tab")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("title", &self.title)
            .field("favicon", &self.favicon)
            .field("is_loading", &self.is_loading)
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}
