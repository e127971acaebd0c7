//! Tab registry: sole owner of tab identity and of the active-tab selection.

use std::collections::HashMap;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::managers::notification_bus::NotificationBus;
use crate::managers::tab::Tab;
use crate::surface::{EventSink, SurfaceProvider};
use crate::types::errors::SurfaceError;
use crate::types::notification::Notification;
use crate::types::surface::SurfaceEnvelope;
use crate::types::tab::{TabId, TabSnapshot, DEFAULT_TAB_URL};

/// Trait defining the tab lifecycle interface.
pub trait TabRegistryTrait {
    fn create_tab(&mut self, url: Option<&str>) -> Result<TabId, SurfaceError>;
    fn set_active_tab(&mut self, tab_id: TabId) -> bool;
    fn close_tab(&mut self, tab_id: TabId) -> bool;
    fn get_tab_by_id(&self, tab_id: TabId) -> Option<&Tab>;
    fn get_tab_mut(&mut self, tab_id: TabId) -> Option<&mut Tab>;
    fn get_all_tabs(&self) -> Vec<TabSnapshot>;
    fn get_active_tab(&self) -> Option<&Tab>;
    fn destroy(&mut self);
    fn tab_count(&self) -> usize;
    fn tab_order(&self) -> &[TabId];
}

/// Ordered set of live tabs plus the single active selection.
///
/// Display order is most-recent-first; identity lookups go through the id map.
/// Created with an injected [`SurfaceProvider`], so several independent
/// registries can coexist.
pub struct TabRegistry {
    provider: Box<dyn SurfaceProvider>,
    tabs: HashMap<TabId, Tab>,
    order: Vec<TabId>,
    active_id: Option<TabId>,
    next_id: u64,
    events_tx: UnboundedSender<SurfaceEnvelope>,
    events_rx: Option<UnboundedReceiver<SurfaceEnvelope>>,
    bus: NotificationBus,
}

impl TabRegistry {
    pub fn new(provider: Box<dyn SurfaceProvider>) -> Self {
        let (mut registry, events_rx) = Self::with_event_receiver(provider);
        registry.events_rx = Some(events_rx);
        registry
    }

    /// Registry together with the receiving end of its surfaces' events.
    pub fn with_event_receiver(
        provider: Box<dyn SurfaceProvider>,
    ) -> (Self, UnboundedReceiver<SurfaceEnvelope>) {
        let (events_tx, events_rx) = unbounded_channel();
        let registry = Self {
            provider,
            tabs: HashMap::new(),
            order: Vec::new(),
            active_id: None,
            next_id: 0,
            events_tx,
            events_rx: None,
            bus: NotificationBus::new(),
        };
        (registry, events_rx)
    }

    /// Receiving end of every surface's event stream. Handed out once.
    pub fn take_event_receiver(&mut self) -> Option<UnboundedReceiver<SurfaceEnvelope>> {
        self.events_rx.take()
    }

    /// Sender surfaces of this registry post their events on.
    pub fn event_sender(&self) -> UnboundedSender<SurfaceEnvelope> {
        self.events_tx.clone()
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<Notification> {
        self.bus.subscribe()
    }

    pub(crate) fn publish(&mut self, notification: &Notification) {
        self.bus.publish(notification);
    }

    pub fn active_id(&self) -> Option<TabId> {
        self.active_id
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, tab_id: TabId) -> bool {
        self.tabs.contains_key(&tab_id)
    }

    pub fn snapshot(&self, tab_id: TabId) -> Option<TabSnapshot> {
        self.tabs
            .get(&tab_id)
            .map(|tab| tab.snapshot(self.active_id == Some(tab_id)))
    }

    /// Activates the neighbour of the active tab in display order, wrapping
    /// around. Returns false when there is nothing to switch to.
    pub fn activate_adjacent(&mut self, forward: bool) -> bool {
        let len = self.order.len();
        let Some(active) = self.active_id else {
            return false;
        };
        if len < 2 {
            return false;
        }
        let Some(position) = self.order.iter().position(|id| *id == active) else {
            return false;
        };
        let next = if forward {
            (position + 1) % len
        } else {
            (position + len - 1) % len
        };
        let target = self.order[next];
        self.set_active_tab(target)
    }
}

impl TabRegistryTrait for TabRegistry {
    /// Creates a tab bound to a new surface loading `url` and puts it first
    /// in display order. The first tab of an empty registry becomes active.
    fn create_tab(&mut self, url: Option<&str>) -> Result<TabId, SurfaceError> {
        // Advance before creating the surface so a failed attempt never
        // hands its id to a later tab.
        self.next_id += 1;
        let id = TabId(self.next_id);
        let url = url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_TAB_URL);

        let (sink, subscription) = EventSink::new(id, self.events_tx.clone());
        let surface = self.provider.create(url, sink).map_err(|e| {
            log::warn!("tab {}: surface creation failed: {}", id, e);
            e
        })?;

        let mut tab = Tab::new(id, url, surface, subscription);
        tab.hide();
        let snapshot = tab.snapshot(false);
        self.tabs.insert(id, tab);
        self.order.insert(0, id);
        log::info!("tab {} created at {}", id, url);

        self.bus.publish(&Notification::TabCreated { tab: snapshot });
        if self.active_id.is_none() {
            self.set_active_tab(id);
        }
        Ok(id)
    }

    /// Makes `tab_id` the active tab, hiding the previous one without touching
    /// its state. Returns false and changes nothing if the tab is unknown.
    fn set_active_tab(&mut self, tab_id: TabId) -> bool {
        if !self.tabs.contains_key(&tab_id) {
            log::debug!("activate: tab {} is not in the registry", tab_id);
            return false;
        }
        if self.active_id == Some(tab_id) {
            return true;
        }

        if let Some(previous) = self.active_id.and_then(|id| self.tabs.get_mut(&id)) {
            previous.hide();
        }
        self.active_id = Some(tab_id);
        if let Some(tab) = self.tabs.get_mut(&tab_id) {
            tab.show();
        }
        self.bus
            .publish(&Notification::ActiveTabChanged { id: tab_id });
        true
    }

    /// Tears the tab down and, if it was active, elects the tab now occupying
    /// its position, else the new last tab, else nothing.
    fn close_tab(&mut self, tab_id: TabId) -> bool {
        let Some(position) = self.order.iter().position(|id| *id == tab_id) else {
            return false;
        };
        let was_active = self.active_id == Some(tab_id);

        if let Some(mut tab) = self.tabs.remove(&tab_id) {
            tab.destroy();
        }
        self.order.remove(position);
        log::info!("tab {} closed", tab_id);
        self.bus.publish(&Notification::TabClosed { id: tab_id });

        if was_active {
            self.active_id = None;
            let successor = self.order.get(position).or(self.order.last()).copied();
            if let Some(next) = successor {
                self.set_active_tab(next);
            }
        }
        true
    }

    fn get_tab_by_id(&self, tab_id: TabId) -> Option<&Tab> {
        self.tabs.get(&tab_id)
    }

    fn get_tab_mut(&mut self, tab_id: TabId) -> Option<&mut Tab> {
        self.tabs.get_mut(&tab_id)
    }

    fn get_all_tabs(&self) -> Vec<TabSnapshot> {
        self.order
            .iter()
            .filter_map(|id| self.snapshot(*id))
            .collect()
    }

    fn get_active_tab(&self) -> Option<&Tab> {
        self.active_id.and_then(|id| self.tabs.get(&id))
    }

    /// Closes every tab through the normal teardown. Safe to call repeatedly.
    fn destroy(&mut self) {
        self.active_id = None;
        let ids: Vec<TabId> = self.order.clone();
        for id in ids {
            self.close_tab(id);
        }
    }

    fn tab_count(&self) -> usize {
        self.order.len()
    }

    fn tab_order(&self) -> &[TabId] {
        &self.order
    }
}

impl Drop for TabRegistry {
    fn drop(&mut self) {
        self.destroy();
    }
}
