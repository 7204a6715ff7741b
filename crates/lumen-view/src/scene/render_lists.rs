use lumen_graph::{ComponentId, NodeId};

use crate::component::SceneGraph;

/// Cached pre/post render-hook lists for one scene subtree.
///
/// Lists are rebuilt lazily: the graph revision they were built against is
/// recorded, and any structural change to the graph bumps its revision and
/// invalidates them. Components appear in depth-first traversal order.
#[derive(Debug, Clone, Default)]
pub struct RenderLists {
    pub pre: Vec<ComponentId>,
    pub post: Vec<ComponentId>,
    revision: Option<u64>,
}

impl RenderLists {
    /// Whether the lists match the graph's current revision.
    #[inline]
    pub fn is_current(&self, graph: &SceneGraph) -> bool {
        self.revision == Some(graph.revision())
    }

    /// Collects the hook lists for the subtree rooted at `root`.
    pub fn build(graph: &SceneGraph, root: NodeId) -> Self {
        let mut pre = Vec::new();
        let mut post = Vec::new();
        graph.traverse_down(root, &mut |_node, id, component| {
            let hooks = component.render_hooks();
            if hooks.pre {
                pre.push(id);
            }
            if hooks.post {
                post.push(id);
            }
        });
        Self {
            pre,
            post,
            revision: Some(graph.revision()),
        }
    }
}
