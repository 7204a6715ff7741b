//! Component contract for the view layer.
//!
//! The graph stores components type-erased; this trait is the seam every
//! scene-side component implements. Hooks are opted into explicitly via
//! [`render_hooks`] so the scene coordinator can build its cached pre/post
//! render lists without probing for overridden defaults.

use std::any::Any;

use lumen_graph::{ComponentId, Graph, NodeId};

use crate::input::{PointerEvent, TriggerEvent};
use crate::render::RenderPassCtx;
use crate::system::PulseTime;

/// The component graph used by the view layer.
pub type SceneGraph = Graph<Box<dyn ViewComponent>>;

/// Render-hook capability flags.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RenderHooks {
    pub pre: bool,
    pub post: bool,
}

impl RenderHooks {
    pub const NONE: RenderHooks = RenderHooks { pre: false, post: false };
    pub const PRE: RenderHooks = RenderHooks { pre: true, post: false };
    pub const POST: RenderHooks = RenderHooks { pre: false, post: true };
    pub const BOTH: RenderHooks = RenderHooks { pre: true, post: true };
}

/// Deferred side effects requested during a component update.
///
/// Components cannot reach the coordinator while the graph is borrowed for
/// the update pass; they queue actions instead, applied right after.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Action {
    ActivateScene(ComponentId),
    ActivateCamera(ComponentId),
}

/// Context for one component update.
pub struct UpdateCtx<'a> {
    pub time: PulseTime,
    pub node: NodeId,
    pub component: ComponentId,
    pub actions: &'a mut Vec<Action>,
}

/// Contract implemented by every component participating in the view layer.
pub trait ViewComponent: 'static {
    fn type_name(&self) -> &'static str;

    /// Per-pulse update. Return `true` when state changed and a redraw is
    /// warranted.
    fn update(&mut self, _ctx: &mut UpdateCtx<'_>) -> bool {
        false
    }

    /// Which render hooks this component wants. Queried when render lists
    /// are rebuilt, not per frame.
    fn render_hooks(&self) -> RenderHooks {
        RenderHooks::NONE
    }

    fn pre_render(&mut self, _ctx: &mut RenderPassCtx<'_>) {}

    fn post_render(&mut self, _ctx: &mut RenderPassCtx<'_>) {}

    /// Pointer events routed to this component (directly or by bubbling).
    /// Set `event.stop_propagation` to consume.
    fn on_pointer(&mut self, _event: &mut PointerEvent) {}

    /// Trigger events routed to this component.
    fn on_trigger(&mut self, _event: &mut TriggerEvent) {}

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
