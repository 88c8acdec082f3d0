use std::sync::{Mutex, PoisonError};

use super::detector::is_new_architecture_enabled;
use super::flags::RuntimeFlags;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchitectureInfo {
    pub is_new_architecture: bool,
    pub fabric_component_available: bool,
}

impl ArchitectureInfo {
    pub const LEGACY: Self = Self {
        is_new_architecture: false,
        fabric_component_available: false,
    };
}

/// Once-per-view-type memo of the architecture decision.
///
/// Shared by every instance of the owning view; `reset` exists for tests
/// and hot reload.
#[derive(Debug, Default)]
pub struct ArchitectureCache {
    slot: Mutex<Option<ArchitectureInfo>>,
}

impl ArchitectureCache {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached info, probing `flags` only on the first call.
    ///
    /// `load_component` reports whether the new-architecture view can be
    /// created; when it cannot, the view falls back to the legacy path.
    pub fn resolve(
        &self,
        flags: &dyn RuntimeFlags,
        load_component: impl FnOnce() -> bool,
    ) -> ArchitectureInfo {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(info) = *slot {
            return info;
        }

        let info = if is_new_architecture_enabled(flags) {
            if load_component() {
                ArchitectureInfo {
                    is_new_architecture: true,
                    fabric_component_available: true,
                }
            } else {
                tracing::error!("failed to load new-architecture view component; using legacy");
                ArchitectureInfo::LEGACY
            }
        } else {
            ArchitectureInfo::LEGACY
        };
        tracing::debug!(
            is_new_architecture = info.is_new_architecture,
            "cached view architecture"
        );
        *slot = Some(info);
        info
    }

    pub fn cached(&self) -> Option<ArchitectureInfo> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn reset(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::architecture::{RuntimeFlags, StaticFlags};

    use super::{ArchitectureCache, ArchitectureInfo};

    struct CountingFlags {
        inner: StaticFlags,
        reads: AtomicUsize,
    }

    impl CountingFlags {
        fn new(inner: StaticFlags) -> Self {
            Self {
                inner,
                reads: AtomicUsize::new(0),
            }
        }

        fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    impl RuntimeFlags for CountingFlags {
        fn fabric(&self) -> Option<bool> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.fabric
        }

        fn turbo_modules(&self) -> Option<bool> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.turbo_modules
        }

        fn bridgeless(&self) -> Option<bool> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.bridgeless
        }
    }

    #[test]
    fn detection_is_cached_after_first_call() {
        let cache = ArchitectureCache::new();
        let flags = CountingFlags::new(StaticFlags::legacy());

        let first = cache.resolve(&flags, || true);
        let reads_after_first = flags.reads();
        let second = cache.resolve(&flags, || true);

        assert_eq!(first, ArchitectureInfo::LEGACY);
        assert_eq!(first, second);
        assert!(reads_after_first > 0);
        assert_eq!(flags.reads(), reads_after_first);
    }

    #[test]
    fn reset_picks_up_changed_flags() {
        let cache = ArchitectureCache::new();
        let legacy = StaticFlags::legacy();
        let fabric = StaticFlags::new(true, false, false);

        assert!(!cache.resolve(&legacy, || true).is_new_architecture);
        assert!(!cache.resolve(&fabric, || true).is_new_architecture);

        cache.reset();
        assert_eq!(cache.cached(), None);
        assert!(cache.resolve(&fabric, || true).is_new_architecture);
    }

    #[test]
    fn component_load_failure_falls_back_to_legacy() {
        let cache = ArchitectureCache::new();
        let flags = StaticFlags::new(true, true, false);

        let info = cache.resolve(&flags, || false);

        assert_eq!(info, ArchitectureInfo::LEGACY);
        assert!(!info.fabric_component_available);
    }
}
