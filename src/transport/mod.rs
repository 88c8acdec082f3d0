mod direct;
mod hub;
mod legacy;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::command::ViewCommand;
use crate::error::BridgeResult;
use crate::session::SessionId;

pub use direct::DirectTransport;
pub use hub::{EventHandler, EventHub, ListenerHandle};
pub use legacy::LegacyTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Legacy,
    Direct,
}

impl TransportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Direct => "direct",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of looking for a generated per-event emitter.
#[derive(Clone)]
pub enum EmitterProbe {
    TypedEmitterAvailable(EventHub),
    Unavailable,
}

impl EmitterProbe {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::TypedEmitterAvailable(_))
    }
}

/// One native channel for commands and events, chosen once per view.
///
/// The dispatcher and notification center only talk to this trait.
#[async_trait]
pub trait Transport: Send + Sync {
    fn kind(&self) -> TransportKind;

    /// Sends `command` to the view addressed by `target`.
    async fn dispatch_command(&self, target: SessionId, command: &ViewCommand)
    -> BridgeResult<Value>;

    /// Looks for a typed emitter for `event`. Evaluated per subscribe call.
    fn probe_emitter(&self, event: &str) -> EmitterProbe;

    /// Named-event emitter every transport falls back to.
    fn generic_emitter(&self) -> &EventHub;

    async fn notify_listener_added(
        &self,
        event: &str,
        component_id: Option<SessionId>,
    ) -> BridgeResult<()>;

    async fn notify_listener_removed(
        &self,
        event: &str,
        component_id: Option<SessionId>,
    ) -> BridgeResult<()>;
}
