use std::fmt;
use std::sync::Arc;

use crate::error::{BridgeError, BridgeResult};

use super::id::SessionId;

/// Looks up the host-assigned handle of a mounted component.
///
/// Returns `None` while the component is not attached.
pub trait NativeHandleResolver: Send + Sync {
    fn find_node_handle(&self) -> Option<SessionId>;
}

/// How a proxy object addresses its native view.
#[derive(Clone)]
pub enum ViewReference {
    /// Identifier chosen by this layer; already the routing key.
    Session(SessionId),
    /// Component reference resolved on every use, never cached.
    Component(Arc<dyn NativeHandleResolver>),
}

impl ViewReference {
    pub fn resolve(&self) -> Option<SessionId> {
        match self {
            Self::Session(id) => Some(*id),
            Self::Component(resolver) => resolver.find_node_handle(),
        }
    }

    pub fn require(&self) -> BridgeResult<SessionId> {
        self.resolve().ok_or(BridgeError::NativeHandleUnavailable)
    }

    pub fn is_session(&self) -> bool {
        matches!(self, Self::Session(_))
    }
}

impl fmt::Debug for ViewReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session(id) => f.debug_tuple("Session").field(id).finish(),
            Self::Component(_) => f.write_str("Component(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::error::BridgeError;
    use crate::session::SessionId;

    use super::{NativeHandleResolver, ViewReference};

    struct CountingResolver {
        handle: Option<SessionId>,
        lookups: AtomicUsize,
    }

    impl NativeHandleResolver for CountingResolver {
        fn find_node_handle(&self) -> Option<SessionId> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.handle
        }
    }

    #[test]
    fn session_reference_never_resolves_a_handle() {
        let reference = ViewReference::Session(SessionId::new(1234));
        assert_eq!(reference.resolve(), Some(SessionId::new(1234)));
        assert!(reference.is_session());
    }

    #[test]
    fn component_reference_resolves_on_every_call() {
        let resolver = Arc::new(CountingResolver {
            handle: Some(SessionId::new(7)),
            lookups: AtomicUsize::new(0),
        });
        let reference = ViewReference::Component(resolver.clone());

        assert_eq!(reference.resolve(), Some(SessionId::new(7)));
        assert_eq!(reference.resolve(), Some(SessionId::new(7)));
        assert_eq!(resolver.lookups.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unattached_component_yields_none_without_fallback() {
        let reference = ViewReference::Component(Arc::new(CountingResolver {
            handle: None,
            lookups: AtomicUsize::new(0),
        }));
        assert_eq!(reference.resolve(), None);
        assert!(matches!(
            reference.require(),
            Err(BridgeError::NativeHandleUnavailable)
        ));
    }
}
