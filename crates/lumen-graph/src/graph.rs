use crate::id::{ComponentId, NodeId};

struct NodeData {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    components: Vec<ComponentId>,
}

struct ComponentEntry<C> {
    node: NodeId,
    value: C,
}

/// Node/component arena with deterministic traversal.
///
/// Structure:
/// - nodes form a forest; `add_child` links a node under a parent
/// - each node carries an ordered list of components
/// - traversal is depth-first, parents before children, siblings and
///   components in insertion order, stable for a fixed tree shape
///
/// Every structural change (node or component add/remove, reparent) bumps
/// [`revision`]. Callers that cache derived data (e.g. render-hook lists)
/// compare revisions instead of subscribing to change events.
pub struct Graph<C> {
    nodes: Vec<Option<NodeData>>,
    components: Vec<Option<ComponentEntry<C>>>,
    /// Live components in creation order (drives the update pass).
    order: Vec<ComponentId>,
    roots: Vec<NodeId>,
    revision: u64,
}

impl<C> Graph<C> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            components: Vec::new(),
            order: Vec::new(),
            roots: Vec::new(),
            revision: 0,
        }
    }

    /// Monotonic counter bumped on every structural change.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ── nodes ─────────────────────────────────────────────────────────────

    /// Creates a root-level node. Link it with [`add_child`] as needed.
    pub fn create_node(&mut self, name: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(NodeData {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            components: Vec::new(),
        }));
        self.roots.push(id);
        self.revision += 1;
        id
    }

    /// Links `child` under `parent`.
    ///
    /// # Panics
    /// Panics if either id is stale, if `child` already has a parent, or if
    /// the link would create a cycle.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        assert!(self.node(parent).is_some(), "add_child: stale parent id");
        let data = self.node(child).expect("add_child: stale child id");
        assert!(data.parent.is_none(), "add_child: node already has a parent");
        assert!(
            parent != child && !self.is_descendant(child, parent),
            "add_child: link would create a cycle"
        );

        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
        self.roots.retain(|&r| r != child);
        self.revision += 1;
    }

    /// Removes `node` and its whole subtree, dropping their components.
    ///
    /// # Panics
    /// Panics if the id is stale.
    pub fn remove_node(&mut self, node: NodeId) {
        assert!(self.node(node).is_some(), "remove_node: stale node id");

        if let Some(parent) = self.node(node).and_then(|n| n.parent) {
            self.node_mut(parent).children.retain(|&c| c != node);
        }
        self.roots.retain(|&r| r != node);
        log::trace!("removing subtree at node {}", node.0);
        self.remove_subtree(node);
        self.revision += 1;
    }

    fn remove_subtree(&mut self, node: NodeId) {
        let data = self.nodes[node.0 as usize].take().expect("stale node id");
        for id in data.components {
            self.components[id.0 as usize] = None;
            self.order.retain(|&c| c != id);
        }
        for child in data.children {
            self.remove_subtree(child);
        }
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    pub fn node_name(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.name.as_str())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Iterates the parent chain of `node`, nearest ancestor first.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.parent(node);
        std::iter::from_fn(move || {
            let next = current?;
            current = self.parent(next);
            Some(next)
        })
    }

    fn is_descendant(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    // ── components ────────────────────────────────────────────────────────

    /// Attaches a component to `node`.
    ///
    /// # Panics
    /// Panics if the node id is stale.
    pub fn add_component(&mut self, node: NodeId, value: C) -> ComponentId {
        assert!(self.node(node).is_some(), "add_component: stale node id");

        let id = ComponentId(self.components.len() as u32);
        self.components.push(Some(ComponentEntry { node, value }));
        self.node_mut(node).components.push(id);
        self.order.push(id);
        self.revision += 1;
        id
    }

    /// Detaches and returns a component.
    ///
    /// # Panics
    /// Panics if the id is stale.
    pub fn remove_component(&mut self, id: ComponentId) -> C {
        let entry = self.components[id.0 as usize]
            .take()
            .expect("remove_component: stale component id");
        self.node_mut(entry.node).components.retain(|&c| c != id);
        self.order.retain(|&c| c != id);
        self.revision += 1;
        entry.value
    }

    pub fn component(&self, id: ComponentId) -> Option<&C> {
        self.components.get(id.0 as usize)?.as_ref().map(|e| &e.value)
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut C> {
        self.components
            .get_mut(id.0 as usize)?
            .as_mut()
            .map(|e| &mut e.value)
    }

    /// Node a component is attached to.
    pub fn node_of(&self, id: ComponentId) -> Option<NodeId> {
        self.components.get(id.0 as usize)?.as_ref().map(|e| e.node)
    }

    /// Components attached to `node`, in attachment order.
    pub fn components_on(&self, node: NodeId) -> &[ComponentId] {
        self.node(node).map(|n| n.components.as_slice()).unwrap_or(&[])
    }

    /// Live components in creation order.
    pub fn component_ids(&self) -> Vec<ComponentId> {
        self.order.clone()
    }

    /// Depth-first traversal from `root`: a node's components in attachment
    /// order, then each child subtree in insertion order.
    pub fn traverse_down(&self, root: NodeId, f: &mut impl FnMut(NodeId, ComponentId, &C)) {
        let Some(data) = self.node(root) else { return };
        for &id in &data.components {
            if let Some(entry) = self.components[id.0 as usize].as_ref() {
                f(root, id, &entry.value);
            }
        }
        for &child in &data.children {
            self.traverse_down(child, f);
        }
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0 as usize)?.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        self.nodes[id.0 as usize].as_mut().expect("stale node id")
    }
}

impl<C> Default for Graph<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (Graph<&'static str>, NodeId, NodeId, NodeId) {
        let mut g = Graph::new();
        let root = g.create_node("root");
        let a = g.create_node("a");
        let b = g.create_node("b");
        g.add_child(root, a);
        g.add_child(root, b);
        (g, root, a, b)
    }

    // ── traversal ─────────────────────────────────────────────────────────

    #[test]
    fn traversal_is_depth_first_parents_before_children() {
        let (mut g, root, a, b) = tree();
        let c = g.create_node("c");
        g.add_child(a, c);

        let r0 = g.add_component(root, "r0");
        let a0 = g.add_component(a, "a0");
        let c0 = g.add_component(c, "c0");
        let b0 = g.add_component(b, "b0");

        let mut seen = Vec::new();
        g.traverse_down(root, &mut |_, id, _| seen.push(id));
        assert_eq!(seen, vec![r0, a0, c0, b0]);
    }

    #[test]
    fn traversal_is_stable_across_calls() {
        let (mut g, root, a, _) = tree();
        g.add_component(a, "x");
        g.add_component(root, "y");

        let mut first = Vec::new();
        g.traverse_down(root, &mut |_, id, _| first.push(id));
        let mut second = Vec::new();
        g.traverse_down(root, &mut |_, id, _| second.push(id));
        assert_eq!(first, second);
    }

    // ── revision ──────────────────────────────────────────────────────────

    #[test]
    fn structural_changes_bump_revision() {
        let mut g: Graph<()> = Graph::new();
        let r0 = g.revision();
        let n = g.create_node("n");
        assert!(g.revision() > r0);

        let r1 = g.revision();
        let c = g.add_component(n, ());
        assert!(g.revision() > r1);

        let r2 = g.revision();
        g.remove_component(c);
        assert!(g.revision() > r2);
    }

    #[test]
    fn reads_do_not_bump_revision() {
        let (g, root, _, _) = tree();
        let r = g.revision();
        let _ = g.children(root);
        let _ = g.components_on(root);
        g.traverse_down(root, &mut |_, _, _| {});
        assert_eq!(g.revision(), r);
    }

    // ── hierarchy ─────────────────────────────────────────────────────────

    #[test]
    fn ancestors_walk_toward_root() {
        let (mut g, root, a, _) = tree();
        let c = g.create_node("c");
        g.add_child(a, c);

        let chain: Vec<_> = g.ancestors(c).collect();
        assert_eq!(chain, vec![a, root]);
    }

    #[test]
    fn remove_node_drops_subtree_and_components() {
        let (mut g, root, a, _) = tree();
        let c = g.create_node("c");
        g.add_child(a, c);
        let cc = g.add_component(c, "cc");

        g.remove_node(a);
        assert!(!g.contains_node(a));
        assert!(!g.contains_node(c));
        assert!(g.component(cc).is_none());
        assert_eq!(g.children(root), &[tree_b(&g)]);
    }

    fn tree_b<C>(g: &Graph<C>) -> NodeId {
        // In `tree()` node "b" is the third created node.
        g.roots()
            .iter()
            .copied()
            .flat_map(|r| g.children(r).to_vec())
            .find(|&n| g.node_name(n) == Some("b"))
            .unwrap()
    }

    #[test]
    #[should_panic(expected = "cycle")]
    fn add_child_rejects_cycles() {
        let (mut g, root, a, _) = tree();
        g.add_child(a, root);
    }

    #[test]
    fn removed_component_id_stays_dead() {
        let mut g = Graph::new();
        let n = g.create_node("n");
        let c = g.add_component(n, 1u8);
        g.remove_component(c);
        let c2 = g.add_component(n, 2u8);
        assert_ne!(c, c2);
        assert!(g.component(c).is_none());
    }
}
