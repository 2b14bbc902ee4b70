use std::any::{type_name, Any, TypeId};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use parking_lot::ReentrantMutex;
use tracing::debug;

// ---------------------------------------------------------------------------
// InstanceRegistry
// ---------------------------------------------------------------------------

/// Lazily created, shared instances keyed by concrete type.
///
/// Intended for operations, but any `Default + Send + Sync` type can be
/// cached; nothing requires `O` to implement [`Operation`](crate::Operation).
///
/// Lookups go straight to the map. On a miss the creation lock is taken, the
/// map re-checked, and only then is `O::default()` run, so each type is
/// constructed at most once per registry. The lock is re-entrant: a `Default`
/// impl may itself request other types from the same registry on the same
/// thread. Requesting the type being constructed recurses without end.
///
/// The lock stays held while `O::default()` runs. If the `Default` impls of
/// two registries request types from each other, first requests made from
/// two threads at once can deadlock.
///
/// Entries are never removed.
pub struct InstanceRegistry {
    /// `TypeId` -> `Arc<O>` erased to `Arc<dyn Any + Send + Sync>`.
    instances: DashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    /// Serializes construction of missing instances.
    creation: ReentrantMutex<()>,
}

impl InstanceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            instances: DashMap::new(),
            creation: ReentrantMutex::new(()),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static InstanceRegistry {
        static GLOBAL: OnceLock<InstanceRegistry> = OnceLock::new();
        GLOBAL.get_or_init(InstanceRegistry::new)
    }

    /// Returns the shared instance of `O`, creating it on first request.
    ///
    /// The creation lock is held while `O::default()` runs; see the type-level
    /// notes on requesting from another registry inside `Default`.
    pub fn instance<O>(&self) -> Arc<O>
    where
        O: Default + Send + Sync + 'static,
    {
        if let Some(existing) = self.lookup::<O>() {
            return existing;
        }

        let _guard = self.creation.lock();
        if let Some(existing) = self.lookup::<O>() {
            return existing;
        }

        let created = Arc::new(O::default());
        self.instances.insert(TypeId::of::<O>(), created.clone());
        debug!(type_name = type_name::<O>(), "instance created");
        created
    }

    /// Always constructs a new, unshared `O`.
    #[must_use]
    pub fn fresh<O: Default>() -> O {
        O::default()
    }

    /// Whether an instance of `O` has been created.
    pub fn contains<O: 'static>(&self) -> bool {
        self.instances.contains_key(&TypeId::of::<O>())
    }

    /// Number of instances created so far.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    fn lookup<O>(&self) -> Option<Arc<O>>
    where
        O: Send + Sync + 'static,
    {
        self.instances
            .get(&TypeId::of::<O>())
            .and_then(|entry| entry.value().clone().downcast::<O>().ok())
    }
}

impl Default for InstanceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use verdict_core::Outcome;

    use super::*;
    use crate::error::Fault;
    use crate::operation::Operation;

    /// Operation counting its own invocations.
    #[derive(Debug, Default)]
    struct Counter {
        calls: AtomicUsize,
    }

    impl Operation for Counter {
        type Output = usize;

        fn invoke(&self, (): ()) -> Result<Outcome<usize>, Fault> {
            Ok(Outcome::from_value(self.calls.fetch_add(1, Ordering::SeqCst) + 1))
        }
    }

    #[derive(Debug, Default)]
    struct Other;

    #[test]
    fn repeated_requests_share_one_instance() {
        let registry = InstanceRegistry::new();
        assert!(registry.is_empty());

        let first = registry.instance::<Counter>();
        let second = registry.instance::<Counter>();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);

        first.invoke(()).unwrap();
        assert_eq!(second.invoke(()).unwrap().value, 2);
    }

    #[test]
    fn distinct_types_get_distinct_entries() {
        let registry = InstanceRegistry::new();
        assert!(!registry.contains::<Other>());

        registry.instance::<Counter>();
        registry.instance::<Other>();

        assert!(registry.contains::<Counter>());
        assert!(registry.contains::<Other>());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn fresh_is_never_shared() {
        let registry = InstanceRegistry::new();
        let shared = registry.instance::<Counter>();
        shared.invoke(()).unwrap();

        let fresh = InstanceRegistry::fresh::<Counter>();
        assert_eq!(fresh.invoke(()).unwrap().value, 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn separate_registries_are_isolated() {
        let a = InstanceRegistry::new();
        let b = InstanceRegistry::new();
        assert!(!Arc::ptr_eq(&a.instance::<Counter>(), &b.instance::<Counter>()));
    }

    static CONCURRENT_BUILDS: AtomicUsize = AtomicUsize::new(0);

    struct Concurrent;

    impl Default for Concurrent {
        fn default() -> Self {
            CONCURRENT_BUILDS.fetch_add(1, Ordering::SeqCst);
            std::thread::yield_now();
            Self
        }
    }

    #[test]
    fn concurrent_first_requests_construct_once() {
        let registry = &InstanceRegistry::new();

        let instances: Vec<Arc<Concurrent>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(move || registry.instance::<Concurrent>()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(CONCURRENT_BUILDS.load(Ordering::SeqCst), 1);
        assert!(instances.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[derive(Default)]
    struct Leaf;

    struct Composite {
        leaf: Arc<Leaf>,
    }

    impl Default for Composite {
        fn default() -> Self {
            Self {
                leaf: InstanceRegistry::global().instance::<Leaf>(),
            }
        }
    }

    #[test]
    fn construction_may_request_other_types() {
        let global = InstanceRegistry::global();
        let composite = global.instance::<Composite>();

        assert!(global.contains::<Leaf>());
        assert!(Arc::ptr_eq(&composite.leaf, &global.instance::<Leaf>()));
        assert!(std::ptr::eq(global, InstanceRegistry::global()));
    }

    #[test]
    fn construction_may_request_from_another_registry() {
        let local = InstanceRegistry::new();
        let composite = local.instance::<Composite>();

        assert!(local.contains::<Composite>());
        assert!(!local.contains::<Leaf>());
        assert!(Arc::ptr_eq(&composite.leaf, &InstanceRegistry::global().instance::<Leaf>()));
    }

    #[test]
    fn caches_types_that_are_not_operations() {
        let registry = InstanceRegistry::new();
        let names = registry.instance::<Vec<String>>();

        assert!(names.is_empty());
        assert!(Arc::ptr_eq(&names, &registry.instance::<Vec<String>>()));
    }
}
