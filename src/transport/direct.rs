use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::command::{ArgEncoding, ViewCommand, encode_args};
use crate::error::BridgeResult;
use crate::native::{GeneratedEventModule, NativeEventModule, NativeViewModule};
use crate::session::SessionId;

use super::{EmitterProbe, EventHub, Transport, TransportKind};

/// Keyed RPC addressed by the layer-chosen session identifier.
pub struct DirectTransport {
    module: Arc<dyn NativeViewModule>,
    event_module: Arc<dyn NativeEventModule>,
    generated: Option<Arc<dyn GeneratedEventModule>>,
    events: EventHub,
}

impl DirectTransport {
    /// `generated` is `None` when the typed event module is not present
    /// under the running architecture.
    pub fn new(
        module: Arc<dyn NativeViewModule>,
        event_module: Arc<dyn NativeEventModule>,
        generated: Option<Arc<dyn GeneratedEventModule>>,
        events: EventHub,
    ) -> Self {
        Self {
            module,
            event_module,
            generated,
            events,
        }
    }
}

#[async_trait]
impl Transport for DirectTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Direct
    }

    async fn dispatch_command(
        &self,
        target: SessionId,
        command: &ViewCommand,
    ) -> BridgeResult<Value> {
        let args = encode_args(command, ArgEncoding::JsonString)?;
        self.module
            .invoke(&target.native_id(), command.id().as_str(), args)
            .await
    }

    fn probe_emitter(&self, event: &str) -> EmitterProbe {
        let Some(generated) = self.generated.as_ref() else {
            tracing::debug!(event, "generated event module not loaded; using generic emitter");
            return EmitterProbe::Unavailable;
        };
        match generated.emitter_for(event) {
            Some(emitter) => EmitterProbe::TypedEmitterAvailable(emitter),
            None => {
                tracing::debug!(event, "no typed emitter; using generic emitter");
                EmitterProbe::Unavailable
            }
        }
    }

    fn generic_emitter(&self) -> &EventHub {
        &self.events
    }

    async fn notify_listener_added(
        &self,
        event: &str,
        component_id: Option<SessionId>,
    ) -> BridgeResult<()> {
        self.event_module
            .handle_listener_added(event, component_id)
            .await
    }

    async fn notify_listener_removed(
        &self,
        event: &str,
        component_id: Option<SessionId>,
    ) -> BridgeResult<()> {
        self.event_module
            .handle_listener_removed(event, component_id)
            .await
    }
}
