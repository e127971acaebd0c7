//! Surface event bridge.
//!
//! Applies raw surface events to the owning tab's cached state and publishes
//! the matching UI notification. Events are resolved by tab id at apply time;
//! anything addressed to a tab that is no longer registered is discarded.

use tokio::sync::mpsc::UnboundedReceiver;

use crate::managers::tab_registry::{TabRegistry, TabRegistryTrait};
use crate::types::notification::Notification;
use crate::types::surface::{SurfaceEnvelope, SurfaceEvent};
use crate::types::tab::UNTITLED;

const DEFAULT_DOWNLOAD_NAME: &str = "download";

pub struct SurfaceEventBridge;

impl SurfaceEventBridge {
    /// Applies one event. Returns the notification that was published, if any.
    pub fn apply(registry: &mut TabRegistry, envelope: SurfaceEnvelope) -> Option<Notification> {
        let SurfaceEnvelope { tab_id, event } = envelope;
        let Some(tab) = registry.get_tab_mut(tab_id) else {
            log::debug!("dropping {:?} for closed tab {}", event, tab_id);
            return None;
        };

        let notification = match event {
            SurfaceEvent::Navigated { url } => {
                tab.set_committed_url(&url);
                Notification::NavigationChanged {
                    id: tab_id,
                    url,
                    can_go_back: tab.can_go_back(),
                    can_go_forward: tab.can_go_forward(),
                }
            }
            SurfaceEvent::TitleChanged { title } => {
                let title = if title.trim().is_empty() {
                    UNTITLED.to_string()
                } else {
                    title
                };
                tab.set_title(&title);
                Notification::TitleChanged { id: tab_id, title }
            }
            SurfaceEvent::FaviconChanged { icons } => {
                // An empty report republishes the last known icon.
                let favicon = match icons.into_iter().next().filter(|icon| !icon.is_empty()) {
                    Some(icon) => {
                        tab.set_favicon(&icon);
                        icon
                    }
                    None => tab.favicon().to_string(),
                };
                Notification::FaviconChanged {
                    id: tab_id,
                    favicon,
                }
            }
            SurfaceEvent::LoadStarted => {
                tab.set_loading(true);
                Notification::LoadingChanged {
                    id: tab_id,
                    is_loading: true,
                }
            }
            SurfaceEvent::LoadStopped => {
                tab.set_loading(false);
                Notification::LoadingChanged {
                    id: tab_id,
                    is_loading: false,
                }
            }
            SurfaceEvent::DownloadStarted {
                filename,
                url,
                total_bytes,
            } => {
                let filename = if filename.is_empty() {
                    DEFAULT_DOWNLOAD_NAME.to_string()
                } else {
                    filename
                };
                Notification::DownloadStarted {
                    id: tab_id,
                    filename,
                    url,
                    total_bytes,
                }
            }
        };

        registry.publish(&notification);
        Some(notification)
    }

    /// Applies every queued event without waiting for more.
    pub fn drain(
        registry: &mut TabRegistry,
        receiver: &mut UnboundedReceiver<SurfaceEnvelope>,
    ) -> Vec<Notification> {
        let mut published = Vec::new();
        while let Ok(envelope) = receiver.try_recv() {
            if let Some(notification) = Self::apply(registry, envelope) {
                published.push(notification);
            }
        }
        published
    }
}
