//! Per-provider normalizer registry. A registered normalizer replaces the
//! provider's default translation for one event kind.

use std::collections::HashMap;
use std::fmt;

use crate::context::ContextData;
use crate::events::{CanonicalEvent, EventKind};

/// Custom translation for one event kind. Receives the event's properties and
/// action payload through the [`CanonicalEvent`] variant.
pub type Normalizer = Box<dyn Fn(&CanonicalEvent) -> ContextData + Send + Sync>;

/// Mapping from event kind to an optional custom normalizer.
#[derive(Default)]
pub struct EventNormalizers {
    entries: HashMap<EventKind, Normalizer>,
}

impl EventNormalizers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<F>(mut self, kind: EventKind, normalizer: F) -> Self
    where
        F: Fn(&CanonicalEvent) -> ContextData + Send + Sync + 'static,
    {
        self.register(kind, normalizer);
        self
    }

    /// Register a normalizer, replacing any previous one for `kind`.
    pub fn register<F>(&mut self, kind: EventKind, normalizer: F)
    where
        F: Fn(&CanonicalEvent) -> ContextData + Send + Sync + 'static,
    {
        self.entries.insert(kind, Box::new(normalizer));
    }

    pub fn remove(&mut self, kind: EventKind) -> Option<Normalizer> {
        self.entries.remove(&kind)
    }

    pub fn get(&self, kind: EventKind) -> Option<&Normalizer> {
        self.entries.get(&kind)
    }

    pub fn contains(&self, kind: EventKind) -> bool {
        self.entries.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<EventKind> {
        let mut kinds: Vec<EventKind> = self.entries.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Apply the normalizer registered for `kind`, if any.
    pub fn normalize(&self, kind: EventKind, event: &CanonicalEvent) -> Option<ContextData> {
        self.entries.get(&kind).map(|normalizer| normalizer(event))
    }
}

impl fmt::Debug for EventNormalizers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventNormalizers")
            .field("kinds", &self.kinds())
            .finish()
    }
}
