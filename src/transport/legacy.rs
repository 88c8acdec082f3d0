use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::command::{ArgEncoding, ViewCommand, encode_args};
use crate::error::BridgeResult;
use crate::native::{NativeEventModule, NativeViewManager};
use crate::session::SessionId;

use super::{EmitterProbe, EventHub, Transport, TransportKind};

/// Command queue keyed by the resolved native view handle.
pub struct LegacyTransport {
    manager: Arc<dyn NativeViewManager>,
    event_module: Arc<dyn NativeEventModule>,
    events: EventHub,
}

impl LegacyTransport {
    pub fn new(
        manager: Arc<dyn NativeViewManager>,
        event_module: Arc<dyn NativeEventModule>,
        events: EventHub,
    ) -> Self {
        Self {
            manager,
            event_module,
            events,
        }
    }
}

#[async_trait]
impl Transport for LegacyTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Legacy
    }

    async fn dispatch_command(
        &self,
        target: SessionId,
        command: &ViewCommand,
    ) -> BridgeResult<Value> {
        let args = encode_args(command, ArgEncoding::Structured)?;
        self.manager
            .dispatch_view_manager_command(target, command.id().as_str(), args)
            .await
    }

    fn probe_emitter(&self, _event: &str) -> EmitterProbe {
        EmitterProbe::Unavailable
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

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::command::ViewCommand;
    use crate::native::testing::{NativeCall, RecordingEvents, RecordingViewManager};
    use crate::session::SessionId;
    use crate::transport::{EventHub, Transport, TransportKind};

    use super::LegacyTransport;

    #[tokio::test]
    async fn passes_structured_arguments_keyed_by_handle() {
        let manager = Arc::new(RecordingViewManager::default());
        let transport = LegacyTransport::new(
            manager.clone(),
            Arc::new(RecordingEvents::default()),
            EventHub::new(),
        );

        transport
            .dispatch_command(
                SessionId::new(88),
                &ViewCommand::SelectAnnotations {
                    annotations: vec![json!({"uuid": "A"})],
                    show_context_menu: true,
                },
            )
            .await
            .expect("dispatch succeeds");

        assert_eq!(transport.kind(), TransportKind::Legacy);
        assert!(!transport.probe_emitter("documentLoaded").is_available());
        assert_eq!(
            manager.calls(),
            vec![NativeCall::new(
                "88",
                "selectAnnotations",
                vec![json!([{"uuid": "A"}]), json!(true)]
            )]
        );
    }
}
