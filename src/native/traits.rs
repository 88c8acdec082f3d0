use async_trait::async_trait;
use serde_json::Value;

use crate::error::BridgeResult;
use crate::session::SessionId;
use crate::transport::EventHub;

/// Legacy command queue addressed by a discovered view handle.
#[async_trait]
pub trait NativeViewManager: Send + Sync {
    async fn dispatch_view_manager_command(
        &self,
        handle: SessionId,
        command: &str,
        args: Vec<Value>,
    ) -> BridgeResult<Value>;
}

/// New-architecture keyed RPC module.
///
/// `reference` is the session identifier in string form. Arguments are
/// scalars or JSON strings; open-shaped values never cross this boundary.
#[async_trait]
pub trait NativeViewModule: Send + Sync {
    async fn invoke(&self, reference: &str, method: &str, args: Vec<Value>) -> BridgeResult<Value>;
}

/// Document-scoped queries keyed by the view reference.
#[async_trait]
pub trait NativeDocumentManager: Send + Sync {
    async fn invoke(
        &self,
        reference: SessionId,
        method: &str,
        args: Vec<Value>,
    ) -> BridgeResult<Value>;
}

/// Lifecycle hooks that let native code start and stop producing events.
#[async_trait]
pub trait NativeEventModule: Send + Sync {
    async fn handle_listener_added(
        &self,
        event: &str,
        component_id: Option<SessionId>,
    ) -> BridgeResult<()>;

    async fn handle_listener_removed(
        &self,
        event: &str,
        component_id: Option<SessionId>,
    ) -> BridgeResult<()>;
}

/// Optional per-event typed emitters generated for the new architecture.
pub trait GeneratedEventModule: Send + Sync {
    fn emitter_for(&self, event: &str) -> Option<EventHub>;
}
