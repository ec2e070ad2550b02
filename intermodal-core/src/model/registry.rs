//! Mapping between persisted record ids and graph handles

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::{DbId, Error, RecordKind};

/// Write-once map from external ids of one record kind to graph handles.
///
/// Reverse lookups go through the graph itself: every vertex and edge
/// weight stores the id it was created from.
#[derive(Debug, Clone)]
pub struct IdRegistry<H> {
    kind: RecordKind,
    handles: HashMap<DbId, H>,
}

impl<H: Copy> IdRegistry<H> {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            handles: HashMap::new(),
        }
    }

    pub fn with_capacity(kind: RecordKind, capacity: usize) -> Self {
        Self {
            kind,
            handles: HashMap::with_capacity(capacity),
        }
    }

    /// Record kind this registry indexes
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Records a new mapping.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateId`] if `id` is already registered; the existing
    /// mapping is left untouched.
    pub fn register(&mut self, id: DbId, handle: H) -> Result<(), Error> {
        match self.handles.entry(id) {
            Entry::Occupied(_) => Err(Error::DuplicateId {
                kind: self.kind,
                id,
            }),
            Entry::Vacant(entry) => {
                entry.insert(handle);
                Ok(())
            }
        }
    }

    /// Handle registered for `id`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownId`] if nothing was registered under `id`.
    pub fn resolve(&self, id: DbId) -> Result<H, Error> {
        self.get(id).ok_or(Error::UnknownId {
            kind: self.kind,
            id,
        })
    }

    pub fn get(&self, id: DbId) -> Option<H> {
        self.handles.get(&id).copied()
    }

    pub fn contains(&self, id: DbId) -> bool {
        self.handles.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DbId, H)> + '_ {
        self.handles.iter().map(|(&id, &handle)| (id, handle))
    }
}

#[cfg(test)]
mod tests {
    use petgraph::graph::NodeIndex;

    use super::*;

    #[test]
    fn register_then_resolve() {
        let mut registry: IdRegistry<NodeIndex> = IdRegistry::new(RecordKind::RoadNode);
        registry.register(42, NodeIndex::new(0)).unwrap();
        registry.register(7, NodeIndex::new(1)).unwrap();

        assert_eq!(registry.resolve(42).unwrap(), NodeIndex::new(0));
        assert_eq!(registry.resolve(7).unwrap(), NodeIndex::new(1));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn duplicate_registration_keeps_first_handle() {
        let mut registry: IdRegistry<NodeIndex> = IdRegistry::new(RecordKind::Stop);
        registry.register(1, NodeIndex::new(0)).unwrap();

        let err = registry.register(1, NodeIndex::new(5)).unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateId {
                kind: RecordKind::Stop,
                id: 1
            }
        ));
        assert_eq!(registry.resolve(1).unwrap(), NodeIndex::new(0));
    }

    #[test]
    fn unknown_id_is_an_error() {
        let registry: IdRegistry<NodeIndex> = IdRegistry::new(RecordKind::RoadSection);
        assert!(matches!(
            registry.resolve(999),
            Err(Error::UnknownId {
                kind: RecordKind::RoadSection,
                id: 999
            })
        ));
        assert!(registry.get(999).is_none());
    }
}
