use std::collections::HashMap;

use lumen_graph::ComponentId;

use crate::render::ObjectId;

#[derive(Debug, Clone)]
struct Entry {
    parent: Option<ObjectId>,
    component: Option<ComponentId>,
    index: Option<u32>,
}

/// Table of pickable objects and their index-pass indices.
///
/// Indices start at 1 (0 is the background) and are never reused, so a stale
/// readback from a frame rendered before an unregister cannot resolve to the
/// wrong object.
#[derive(Debug, Default)]
pub struct PickRegistry {
    entries: HashMap<ObjectId, Entry>,
    by_index: HashMap<u32, ObjectId>,
    next_index: u32,
}

impl PickRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            by_index: HashMap::new(),
            next_index: 1,
        }
    }

    /// Registers an object. Returns its pick index when `pickable`.
    ///
    /// `parent` links the object into the resolution chain; `component` marks
    /// it as owned by a graph component. Re-registering an object replaces
    /// its links but keeps the index it already had.
    pub fn register(
        &mut self,
        object: ObjectId,
        parent: Option<ObjectId>,
        component: Option<ComponentId>,
        pickable: bool,
    ) -> Option<u32> {
        let existing = self.entries.get(&object).and_then(|e| e.index);
        let index = match (existing, pickable) {
            (Some(ix), _) => Some(ix),
            (None, true) => {
                let ix = self.next_index;
                self.next_index += 1;
                self.by_index.insert(ix, object);
                Some(ix)
            }
            (None, false) => None,
        };
        self.entries.insert(
            object,
            Entry {
                parent,
                component,
                index,
            },
        );
        index
    }

    /// Removes an object. Its index is retired, not recycled.
    pub fn unregister(&mut self, object: ObjectId) {
        if let Some(entry) = self.entries.remove(&object) {
            if let Some(ix) = entry.index {
                self.by_index.remove(&ix);
            }
        }
    }

    #[inline]
    pub fn contains(&self, object: ObjectId) -> bool {
        self.entries.contains_key(&object)
    }

    #[inline]
    pub fn object_by_index(&self, index: u32) -> Option<ObjectId> {
        self.by_index.get(&index).copied()
    }

    #[inline]
    pub fn index_of(&self, object: ObjectId) -> Option<u32> {
        self.entries.get(&object).and_then(|e| e.index)
    }

    /// Resolves the component owning an object by walking the parent chain.
    /// Returns `None` when the chain ends without a component link.
    pub fn resolve_component(&self, object: ObjectId) -> Option<ComponentId> {
        let mut current = Some(object);
        while let Some(obj) = current {
            let entry = self.entries.get(&obj)?;
            if let Some(component) = entry.component {
                return Some(component);
            }
            current = entry.parent;
        }
        None
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_index.clear();
    }
}
