//! Scoped input listener registration.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerKind {
    Keyboard,
    Touch,
}

/// Tracks which input channels currently have a listener. Input for a channel
/// with no listener is dropped by the caller.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    active: Arc<Mutex<BTreeMap<ListenerKind, usize>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<ListenerKind, usize>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `kinds` until the returned guard is dropped.
    #[must_use = "listeners are released as soon as the guard is dropped"]
    pub fn register(&self, kinds: &[ListenerKind]) -> ListenerGuard {
        let mut active = self.lock();
        for kind in kinds {
            *active.entry(*kind).or_insert(0) += 1;
        }
        tracing::debug!(?kinds, "input listeners registered");
        ListenerGuard {
            registry: self.clone(),
            kinds: kinds.to_vec(),
        }
    }

    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.lock().get(&kind).is_some_and(|count| *count > 0)
    }

    pub fn active_count(&self) -> usize {
        self.lock().values().sum()
    }

    fn release(&self, kinds: &[ListenerKind]) {
        let mut active = self.lock();
        for kind in kinds {
            if let Some(count) = active.get_mut(kind) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    active.remove(kind);
                }
            }
        }
        tracing::debug!(?kinds, "input listeners released");
    }
}

#[derive(Debug)]
pub struct ListenerGuard {
    registry: ListenerRegistry,
    kinds: Vec<ListenerKind>,
}

impl ListenerGuard {
    pub fn kinds(&self) -> &[ListenerKind] {
        &self.kinds
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.registry.release(&self.kinds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_releases_on_drop() {
        let registry = ListenerRegistry::new();
        {
            let _guard = registry.register(&[ListenerKind::Keyboard, ListenerKind::Touch]);
            assert!(registry.is_listening(ListenerKind::Keyboard));
            assert!(registry.is_listening(ListenerKind::Touch));
        }
        assert!(!registry.is_listening(ListenerKind::Keyboard));
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn guard_releases_on_early_return() {
        fn mount_then_bail(registry: &ListenerRegistry) -> Result<(), &'static str> {
            let _guard = registry.register(&[ListenerKind::Touch]);
            Err("navigated away")
        }

        let registry = ListenerRegistry::new();
        assert!(mount_then_bail(&registry).is_err());
        assert!(!registry.is_listening(ListenerKind::Touch));
    }

    #[test]
    fn overlapping_guards_are_counted() {
        let registry = ListenerRegistry::new();
        let first = registry.register(&[ListenerKind::Keyboard]);
        let second = registry.register(&[ListenerKind::Keyboard]);
        drop(first);
        assert!(registry.is_listening(ListenerKind::Keyboard));
        drop(second);
        assert!(!registry.is_listening(ListenerKind::Keyboard));
    }
}
