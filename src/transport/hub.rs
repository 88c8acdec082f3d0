use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use futures_util::StreamExt;
use serde_json::Value;

pub type EventHandler = Arc<dyn Fn(&Value) + Send + Sync>;

struct Listener {
    id: u64,
    handler: EventHandler,
}

#[derive(Default)]
struct HubState {
    next_id: u64,
    listeners: HashMap<String, Vec<Listener>>,
}

struct QueuedEvent {
    name: String,
    payload: Value,
}

/// Named-event emitter shared between native code and subscribers.
///
/// Native code posts into an unbounded queue; the host drains it either
/// synchronously with [`EventHub::drain`] or on a task with [`EventHub::run`].
/// Delivery order per event name is the posting order.
#[derive(Clone)]
pub struct EventHub {
    state: Arc<Mutex<HubState>>,
    tx: flume::Sender<QueuedEvent>,
    rx: flume::Receiver<QueuedEvent>,
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHub {
    pub fn new() -> Self {
        let (tx, rx) = flume::unbounded();
        Self {
            state: Arc::new(Mutex::new(HubState::default())),
            tx,
            rx,
        }
    }

    pub fn add_listener(&self, event: &str, handler: EventHandler) -> ListenerHandle {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.next_id += 1;
        let id = state.next_id;
        state
            .listeners
            .entry(event.to_string())
            .or_default()
            .push(Listener { id, handler });
        ListenerHandle {
            state: Arc::downgrade(&self.state),
            event: event.to_string(),
            id,
        }
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .get(event)
            .map_or(0, Vec::len)
    }

    /// Queues an event for later delivery.
    pub fn post(&self, event: impl Into<String>, payload: Value) {
        let queued = QueuedEvent {
            name: event.into(),
            payload,
        };
        if self.tx.send(queued).is_err() {
            tracing::debug!("event queue closed; dropping event");
        }
    }

    /// Delivers immediately to current listeners. Returns how many ran.
    pub fn emit(&self, event: &str, payload: &Value) -> usize {
        // Handlers run outside the lock so they may add or remove listeners.
        let handlers: Vec<EventHandler> = {
            let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state
                .listeners
                .get(event)
                .map(|listeners| listeners.iter().map(|l| Arc::clone(&l.handler)).collect())
                .unwrap_or_default()
        };
        for handler in &handlers {
            handler(payload);
        }
        handlers.len()
    }

    /// Delivers every queued event. Returns how many events were taken off the queue.
    pub fn drain(&self) -> usize {
        let mut delivered = 0;
        while let Ok(queued) = self.rx.try_recv() {
            self.emit(&queued.name, &queued.payload);
            delivered += 1;
        }
        delivered
    }

    /// Pumps the queue until the owning task is dropped or aborted.
    pub async fn run(&self) {
        let mut stream = self.rx.stream();
        while let Some(queued) = stream.next().await {
            self.emit(&queued.name, &queued.payload);
        }
    }
}

/// Removes one listener from its hub.
#[derive(Debug)]
pub struct ListenerHandle {
    state: Weak<Mutex<HubState>>,
    event: String,
    id: u64,
}

impl ListenerHandle {
    pub fn event(&self) -> &str {
        &self.event
    }

    pub fn remove(self) -> bool {
        let Some(state) = self.state.upgrade() else {
            return false;
        };
        let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(listeners) = state.listeners.get_mut(&self.event) else {
            return false;
        };
        let before = listeners.len();
        listeners.retain(|listener| listener.id != self.id);
        let removed = listeners.len() != before;
        if listeners.is_empty() {
            state.listeners.remove(&self.event);
        }
        removed
    }
}
