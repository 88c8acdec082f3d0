use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::id::SessionId;

/// Proof of one particular registration; required to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationToken(u64);

struct Entry<V> {
    token: RegistrationToken,
    view: V,
}

struct RegistryInner<V> {
    next_token: u64,
    views: HashMap<SessionId, Entry<V>>,
}

/// Identifier → native view map consulted by native code.
///
/// Teardown is compare-and-remove: a view torn down after its identifier
/// was claimed again (fast refresh) cannot evict the newer registration.
pub struct ViewRegistry<V> {
    inner: Mutex<RegistryInner<V>>,
}

impl<V> Default for ViewRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ViewRegistry<V> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                next_token: 1,
                views: HashMap::new(),
            }),
        }
    }

    /// Stores `view` under `id`, replacing any previous registration.
    pub fn register(&self, id: SessionId, view: V) -> RegistrationToken {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let token = RegistrationToken(inner.next_token);
        inner.next_token += 1;
        let replaced = inner.views.insert(id, Entry { token, view }).is_some();
        tracing::debug!(
            session = %id,
            replaced,
            total = inner.views.len(),
            "registered native view"
        );
        token
    }

    /// Removes the registration only if it is still the one `token` names.
    pub fn unregister(&self, id: SessionId, token: RegistrationToken) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        match inner.views.get(&id) {
            Some(entry) if entry.token == token => {
                inner.views.remove(&id);
                tracing::debug!(session = %id, total = inner.views.len(), "unregistered native view");
                true
            }
            Some(_) => {
                tracing::debug!(session = %id, "skipped unregister; identifier was claimed again");
                false
            }
            None => false,
        }
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .views
            .contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .views
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> ViewRegistry<V> {
    /// `None` means the native side is not ready yet.
    pub fn resolve(&self, id: SessionId) -> Option<V> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let view = inner.views.get(&id).map(|entry| entry.view.clone());
        if view.is_none() {
            tracing::debug!(session = %id, "no native view registered");
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use crate::session::SessionId;

    use super::ViewRegistry;

    #[test]
    fn register_overwrites_previous_mapping() {
        let registry = ViewRegistry::new();
        let id = SessionId::new(11);

        registry.register(id, "first");
        registry.register(id, "second");

        assert_eq!(registry.resolve(id), Some("second"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn stale_teardown_keeps_newer_registration() {
        let registry = ViewRegistry::new();
        let id = SessionId::new(42);

        let old = registry.register(id, "old-view");
        let new = registry.register(id, "new-view");

        assert!(!registry.unregister(id, old));
        assert_eq!(registry.resolve(id), Some("new-view"));

        assert!(registry.unregister(id, new));
        assert_eq!(registry.resolve(id), None);
    }

    #[test]
    fn unregister_unknown_identifier_is_noop() {
        let registry: ViewRegistry<&str> = ViewRegistry::new();
        let other = ViewRegistry::new();
        let token = other.register(SessionId::new(1), "x");

        assert!(!registry.unregister(SessionId::new(1), token));
        assert!(registry.is_empty());
        assert_eq!(registry.resolve(SessionId::new(1)), None);
    }
}
