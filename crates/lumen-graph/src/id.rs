/// Arena key for a node.
///
/// Slots are never reused; a removed node's id stays dead for the lifetime of
/// the graph, so stale ids resolve to `None` instead of aliasing a newcomer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

/// Arena key for a component.
///
/// Same no-reuse policy as [`NodeId`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }

    /// Rebuilds an id from a raw index, e.g. one stored in an external table.
    /// The id is only meaningful against the graph that issued the index.
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

impl ComponentId {
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }

    /// See [`NodeId::from_raw`].
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}
