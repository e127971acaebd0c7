//! Content surface capability.
//!
//! A surface is the embedded rendering unit behind a tab. The shell only sees
//! it through [`Surface`]: one-way commands plus an event stream pushed into an
//! [`EventSink`]. Results of commands are never returned synchronously; they
//! show up later as [`SurfaceEvent`]s.

pub mod headless;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::types::errors::SurfaceError;
use crate::types::surface::{SurfaceEnvelope, SurfaceEvent};
use crate::types::tab::TabId;

/// Commands a live surface must accept. Every method is required.
pub trait Surface {
    fn navigate(&mut self, url: &str) -> Result<(), SurfaceError>;
    fn go_back(&mut self) -> Result<(), SurfaceError>;
    fn go_forward(&mut self) -> Result<(), SurfaceError>;
    fn reload(&mut self) -> Result<(), SurfaceError>;
    fn stop(&mut self) -> Result<(), SurfaceError>;
    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;
    fn set_visible(&mut self, visible: bool);
    /// Release host resources. Called at most once by the owning tab.
    fn destroy(&mut self);
}

/// Factory for surfaces, injected into the tab registry.
pub trait SurfaceProvider {
    /// Create a surface loading `url` that reports its events through `sink`.
    fn create(&mut self, url: &str, sink: EventSink) -> Result<Box<dyn Surface>, SurfaceError>;
}

/// Per-surface event emitter handed to the provider on creation.
///
/// Cloneable and `Send`, so host callbacks running off the orchestration
/// thread can hold one. Emitting after the owning tab unsubscribed is a no-op.
#[derive(Debug, Clone)]
pub struct EventSink {
    tab_id: TabId,
    tx: UnboundedSender<SurfaceEnvelope>,
    attached: Arc<AtomicBool>,
}

impl EventSink {
    /// Creates a sink for `tab_id` together with the subscription that detaches it.
    pub fn new(tab_id: TabId, tx: UnboundedSender<SurfaceEnvelope>) -> (EventSink, Subscription) {
        let attached = Arc::new(AtomicBool::new(true));
        let sink = EventSink {
            tab_id,
            tx,
            attached: attached.clone(),
        };
        (sink, Subscription { attached: Some(attached) })
    }

    pub fn tab_id(&self) -> TabId {
        self.tab_id
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    /// Queues an event for the orchestration thread. Returns false if the
    /// subscription was detached or the receiving side is gone.
    pub fn emit(&self, event: SurfaceEvent) -> bool {
        if !self.is_attached() {
            return false;
        }
        self.tx
            .send(SurfaceEnvelope {
                tab_id: self.tab_id,
                event,
            })
            .is_ok()
    }
}

/// Detach handle for a surface's event sink. Owned by the tab.
#[derive(Debug, Default)]
pub struct Subscription {
    attached: Option<Arc<AtomicBool>>,
}

impl Subscription {
    /// A subscription that was never attached to anything.
    pub fn detached() -> Self {
        Self { attached: None }
    }

    pub fn is_active(&self) -> bool {
        self.attached
            .as_ref()
            .map(|flag| flag.load(Ordering::Acquire))
            .unwrap_or(false)
    }

    /// Stops the sink from forwarding further events. Safe to repeat.
    pub fn unsubscribe(&mut self) {
        if let Some(flag) = self.attached.take() {
            flag.store(false, Ordering::Release);
        }
    }
}
