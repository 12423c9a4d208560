//! Metric definition storage.
use std::sync::{PoisonError, RwLock};

use indexmap::IndexMap;
use tracing::debug;

use crate::{builtin, definition::MetricDefinition, error::RegisterError};

/// A catalog of metric definitions, keyed by identifier.
///
/// `MetricRegistry` holds at most one definition per identifier. Registering a definition under
/// an identifier that is already present replaces the previous definition, and readers observe
/// either the old or the new definition, never both.
///
/// The registry is meant to be created once at startup, shared via [`Arc`][std::sync::Arc] with
/// whatever needs to render metrics, and kept for the lifetime of the process.
///
/// ## Ordering
///
/// Snapshots list definitions in the order their identifiers were first registered. Replacing a
/// definition keeps its position.
///
/// ## Performance
///
/// The whole map sits behind a single reader-writer lock. Registration is rare and takes the
/// lock exclusively, while snapshots only take it shared, so concurrent render passes do not
/// block each other.
#[derive(Debug, Default)]
pub struct MetricRegistry {
    definitions: RwLock<IndexMap<String, MetricDefinition>>,
}

impl MetricRegistry {
    /// Creates a new, empty `MetricRegistry`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `MetricRegistry` pre-populated with the built-in definitions.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        {
            let mut definitions =
                registry.definitions.write().unwrap_or_else(PoisonError::into_inner);
            for definition in builtin::definitions() {
                definitions.insert(definition.id().to_owned(), definition);
            }
        }
        registry
    }

    /// Registers a definition, replacing any existing definition with the same identifier.
    ///
    /// # Errors
    ///
    /// If the definition has an empty identifier or an empty label key, an error is returned and
    /// the registry is left unchanged.
    pub fn register(&self, definition: MetricDefinition) -> Result<(), RegisterError> {
        if definition.id().is_empty() {
            return Err(RegisterError::EmptyId);
        }
        if definition.label_key().is_empty() {
            return Err(RegisterError::EmptyLabelKey { id: definition.id().to_owned() });
        }

        let id = definition.id().to_owned();
        let previous = {
            let mut definitions = self.definitions.write().unwrap_or_else(PoisonError::into_inner);
            definitions.insert(id.clone(), definition)
        };

        if previous.is_some() {
            debug!(metric_id = id.as_str(), "Replaced existing metric definition.");
        }

        Ok(())
    }

    /// Removes the definition with the given identifier.
    ///
    /// Returns the removed definition, if one was registered.
    pub fn unregister(&self, id: &str) -> Option<MetricDefinition> {
        let mut definitions = self.definitions.write().unwrap_or_else(PoisonError::into_inner);
        definitions.shift_remove(id)
    }

    /// Gets a snapshot of all registered definitions.
    ///
    /// The returned definitions are detached from the registry: registering or removing
    /// definitions afterwards does not change an already-returned snapshot.
    pub fn list_all(&self) -> Vec<MetricDefinition> {
        let definitions = self.definitions.read().unwrap_or_else(PoisonError::into_inner);
        definitions.values().cloned().collect()
    }

    /// Gets the definition with the given identifier.
    pub fn get(&self, id: &str) -> Option<MetricDefinition> {
        let definitions = self.definitions.read().unwrap_or_else(PoisonError::into_inner);
        definitions.get(id).cloned()
    }

    /// Returns `true` if a definition with the given identifier is registered.
    pub fn contains(&self, id: &str) -> bool {
        let definitions = self.definitions.read().unwrap_or_else(PoisonError::into_inner);
        definitions.contains_key(id)
    }

    /// Gets the number of registered definitions.
    pub fn len(&self) -> usize {
        self.definitions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if no definitions are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::MetricRegistry;
    use crate::{definition::MetricDefinition, error::RegisterError, metric::Metric};

    fn constant(id: &'static str, value: &'static str) -> MetricDefinition {
        MetricDefinition::new(id, "Label", move |_| Ok(Some(Metric::new(value))))
    }

    #[test]
    fn register_and_list() {
        let registry = MetricRegistry::new();
        assert!(registry.is_empty());

        registry.register(constant("a:count", "1")).expect("valid");
        registry.register(constant("b:count", "2")).expect("valid");

        let ids = registry.list_all().iter().map(|d| d.id().to_owned()).collect::<Vec<_>>();
        assert_eq!(ids, ["a:count", "b:count"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("a:count"));
        assert!(!registry.contains("c:count"));
    }

    #[test]
    fn register_replaces_in_place() {
        let registry = MetricRegistry::new();
        let original = constant("a:count", "1");
        let replacement = constant("a:count", "2");

        registry.register(original.clone()).expect("valid");
        registry.register(constant("b:count", "3")).expect("valid");
        registry.register(replacement.clone()).expect("valid");

        let snapshot = registry.list_all();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].id(), "a:count");
        assert!(snapshot[0].same_computation(&replacement));
        assert!(!snapshot[0].same_computation(&original));
    }

    #[test]
    fn register_same_definition_is_idempotent() {
        let registry = MetricRegistry::new();
        let definition = constant("a:count", "1");

        registry.register(definition.clone()).expect("valid");
        registry.register(definition.clone()).expect("valid");

        let snapshot = registry.list_all();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot[0].same_computation(&definition));
    }

    #[test]
    fn invalid_registration_leaves_registry_unchanged() {
        let registry = MetricRegistry::new();
        registry.register(constant("a:count", "1")).expect("valid");

        let empty_id = MetricDefinition::new("", "Label", |_| Ok(None));
        assert_eq!(registry.register(empty_id), Err(RegisterError::EmptyId));

        let empty_label = MetricDefinition::new("a:count", "", |_| Ok(None));
        assert_eq!(
            registry.register(empty_label),
            Err(RegisterError::EmptyLabelKey { id: "a:count".into() })
        );

        let snapshot = registry.list_all();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].label_key(), "Label");
    }

    #[test]
    fn snapshot_is_detached() {
        let registry = MetricRegistry::new();
        registry.register(constant("a:count", "1")).expect("valid");

        let snapshot = registry.list_all();
        registry.register(constant("b:count", "2")).expect("valid");
        let _ = registry.unregister("a:count");

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id(), "a:count");

        let ids = registry.list_all().iter().map(|d| d.id().to_owned()).collect::<Vec<_>>();
        assert_eq!(ids, ["b:count"]);
    }

    #[test]
    fn unregister_and_get() {
        let registry = MetricRegistry::new();
        registry.register(constant("a:count", "1")).expect("valid");

        assert_eq!(registry.get("a:count").map(|d| d.id().to_owned()), Some("a:count".into()));
        assert!(registry.unregister("a:count").is_some());
        assert!(registry.unregister("a:count").is_none());
        assert!(registry.get("a:count").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn with_builtins() {
        let registry = MetricRegistry::with_builtins();
        assert_eq!(registry.len(), 10);
        assert!(registry.contains("servers:count"));
        assert!(registry.contains("retries:count"));
        assert!(registry.contains("received_failed:count-or-null"));
    }

    #[test]
    fn concurrent_readers_and_writers() {
        let registry = Arc::new(MetricRegistry::new());
        let writers = (0..4)
            .map(|w| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for i in 0..50 {
                        let id = format!("writer{w}:metric{i}");
                        registry
                            .register(MetricDefinition::new(id, "Label", |_| Ok(None)))
                            .expect("valid");
                    }
                })
            })
            .collect::<Vec<_>>();
        let readers = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for _ in 0..50 {
                        let snapshot = registry.list_all();
                        assert!(snapshot.len() <= 200);
                    }
                })
            })
            .collect::<Vec<_>>();

        for handle in writers.into_iter().chain(readers) {
            handle.join().expect("thread panicked");
        }

        assert_eq!(registry.len(), 200);
    }
}
