use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{BridgeError, BridgeResult};
use crate::session::{SessionId, ViewReference};
use crate::transport::{EmitterProbe, EventHandler, ListenerHandle, Transport};

use super::events::{EventEnvelope, should_deliver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterState {
    Idle,
    Subscribed,
    TornDown,
}

/// Per-view subscription manager.
///
/// Holds at most one native listener per event name and forwards only the
/// `data` of envelopes addressed to this view.
pub struct NotificationCenter {
    reference: ViewReference,
    transport: Arc<dyn Transport>,
    subscriptions: HashMap<String, ListenerHandle>,
    torn_down: bool,
}

impl NotificationCenter {
    pub fn new(reference: ViewReference, transport: Arc<dyn Transport>) -> Self {
        Self {
            reference,
            transport,
            subscriptions: HashMap::new(),
            torn_down: false,
        }
    }

    /// Identifier events must carry to reach this view's callbacks.
    pub fn component_id(&self) -> Option<SessionId> {
        self.reference.resolve()
    }

    pub fn state(&self) -> RouterState {
        if self.torn_down {
            RouterState::TornDown
        } else if self.subscriptions.is_empty() {
            RouterState::Idle
        } else {
            RouterState::Subscribed
        }
    }

    pub fn is_subscribed(&self, event: &str) -> bool {
        self.subscriptions.contains_key(event)
    }

    pub fn subscribed_events(&self) -> Vec<String> {
        let mut events: Vec<String> = self.subscriptions.keys().cloned().collect();
        events.sort();
        events
    }

    /// Registers `callback` for `event`, replacing an existing subscription.
    pub async fn subscribe<F>(&mut self, event: &str, callback: F) -> BridgeResult<()>
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        if self.torn_down {
            return Err(BridgeError::NotificationCenterClosed);
        }

        let emitter = match self.transport.probe_emitter(event) {
            EmitterProbe::TypedEmitterAvailable(emitter) => emitter,
            EmitterProbe::Unavailable => self.transport.generic_emitter().clone(),
        };

        let reference = self.reference.clone();
        let event_name = event.to_string();
        let handler: EventHandler = Arc::new(move |payload: &Value| {
            let envelope = match EventEnvelope::deserialize(payload) {
                Ok(envelope) => envelope,
                Err(err) => {
                    tracing::debug!(event = %event_name, error = %err, "dropping malformed event");
                    return;
                }
            };
            if should_deliver(&event_name, envelope.component_id, reference.resolve()) {
                callback(&envelope.data);
            }
        });

        let handle = emitter.add_listener(event, handler);
        if let Some(previous) = self.subscriptions.insert(event.to_string(), handle) {
            previous.remove();
            tracing::debug!(event, "replaced existing subscription");
        }

        let component_id = self.component_id();
        tracing::debug!(event, component = ?component_id, "subscribed");
        self.transport
            .notify_listener_added(event, component_id)
            .await
    }

    /// Returns `false` without touching native code when nothing was subscribed.
    pub async fn unsubscribe(&mut self, event: &str) -> BridgeResult<bool> {
        let Some(handle) = self.subscriptions.remove(event) else {
            return Ok(false);
        };
        handle.remove();

        let component_id = self.component_id();
        tracing::debug!(event, component = ?component_id, "unsubscribed");
        self.transport
            .notify_listener_removed(event, component_id)
            .await?;
        Ok(true)
    }

    /// Drops every subscription and closes the center. Safe to repeat.
    pub async fn unsubscribe_all_events(&mut self) -> BridgeResult<()> {
        self.torn_down = true;
        for event in self.subscribed_events() {
            self.unsubscribe(&event).await?;
        }
        Ok(())
    }
}
