//! Event routing: raw input to targeted events, and component dispatch.
//!
//! Routing resolves which viewport and which picked object an event belongs
//! to. The policy differs by event phase:
//!
//! * `Hover` hit-tests viewports but never runs a GPU pick.
//! * `Down` with the primary button hit-tests and picks, updating all sticky
//!   targets.
//! * Triggers (wheel, double-click, context menu) hit-test and pick.
//! * Everything else reuses the sticky targets, so a drag keeps its viewport
//!   and object even when the pointer leaves the viewport rect.
//!
//! An event whose policy yields no viewport is cancelled. A pick requested
//! while no scene/camera pair is active leaves the sticky object untouched.

use lumen_graph::NodeId;

use crate::camera::CameraState;
use crate::component::SceneGraph;
use crate::coords::Vec2;
use crate::input::{PointerEvent, PointerInput, PointerKind, TriggerEvent, TriggerInput};
use crate::pick::PickRegistry;
use crate::render::ObjectId;
use crate::view::RenderView;

/// Active scene context a pick needs; `None` parts skip the pick.
pub(crate) struct RouteCtx<'a> {
    pub registry: &'a PickRegistry,
    pub scene_root: Option<ObjectId>,
    pub camera: Option<CameraState>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Policy {
    HitTest,
    HitTestAndPick,
    Sticky,
}

fn pointer_policy(input: &PointerInput) -> Policy {
    match input.kind {
        PointerKind::Hover => Policy::HitTest,
        PointerKind::Down if input.is_primary => Policy::HitTestAndPick,
        _ => Policy::Sticky,
    }
}

/// Resolves the target viewport per policy; updates the sticky viewport on
/// hit-tests. `None` cancels the event.
fn resolve_viewport(view: &mut RenderView, policy: Policy, local: Vec2) -> Option<usize> {
    match policy {
        Policy::Sticky => view.active_viewport,
        Policy::HitTest | Policy::HitTestAndPick => {
            let ix = view.hit_test(local)?;
            view.active_viewport = Some(ix);
            Some(ix)
        }
    }
}

/// Runs the index pick and updates the sticky object/component.
///
/// A background hit clears them (click-to-deselect); a missing scene/camera
/// pair or a failed pick preserves them.
fn update_pick_targets(view: &mut RenderView, ctx: &RouteCtx<'_>, viewport: usize, local: Vec2) {
    let (Some(scene), Some(camera)) = (ctx.scene_root, ctx.camera.as_ref()) else {
        return;
    };
    match view.pick(ctx.registry, scene, camera, viewport, local) {
        Ok(Some(hit)) => {
            view.active_object = Some(hit.object);
            view.active_component = hit.component;
        }
        Ok(None) => {
            view.active_object = None;
            view.active_component = None;
        }
        Err(err) => {
            log::warn!("pick failed: {err}");
        }
    }
}

pub(crate) fn route_pointer(
    view: &mut RenderView,
    ctx: &RouteCtx<'_>,
    input: PointerInput,
) -> Option<PointerEvent> {
    let policy = pointer_policy(&input);
    let viewport = resolve_viewport(view, policy, input.local)?;
    if policy == Policy::HitTestAndPick {
        update_pick_targets(view, ctx, viewport, input.local);
    }
    let vp = view.viewport(viewport);
    Some(PointerEvent {
        kind: input.kind,
        is_primary: input.is_primary,
        is_dragging: input.is_dragging,
        buttons: input.buttons,
        modifiers: input.modifiers,
        local: input.local,
        movement: input.movement,
        device: Vec2::new(vp.device_x(input.local.x), vp.device_y(input.local.y)),
        viewport,
        object: view.active_object,
        component: view.active_component,
        node: None,
        stop_propagation: false,
    })
}

pub(crate) fn route_trigger(
    view: &mut RenderView,
    ctx: &RouteCtx<'_>,
    input: TriggerInput,
) -> Option<TriggerEvent> {
    let viewport = resolve_viewport(view, Policy::HitTestAndPick, input.local)?;
    update_pick_targets(view, ctx, viewport, input.local);
    let vp = view.viewport(viewport);
    Some(TriggerEvent {
        kind: input.kind,
        wheel: input.wheel,
        modifiers: input.modifiers,
        local: input.local,
        device: Vec2::new(vp.device_x(input.local.x), vp.device_y(input.local.y)),
        viewport,
        object: view.active_object,
        component: view.active_component,
        node: None,
        stop_propagation: false,
    })
}

/// Ancestor nodes' components, in bubbling order.
fn bubble_chain(graph: &SceneGraph, node: NodeId) -> Vec<lumen_graph::ComponentId> {
    let ancestors: Vec<NodeId> = graph.ancestors(node).collect();
    let mut chain = Vec::new();
    for ancestor in ancestors {
        chain.extend_from_slice(graph.components_on(ancestor));
    }
    chain
}

/// Delivers a pointer event to its component, then bubbles through ancestor
/// components until one sets `stop_propagation`.
pub(crate) fn dispatch_pointer(graph: &mut SceneGraph, event: &mut PointerEvent) {
    let Some(component) = event.component else {
        return;
    };
    event.node = graph.node_of(component);
    if let Some(target) = graph.component_mut(component) {
        target.on_pointer(event);
    }
    if event.stop_propagation {
        return;
    }
    let Some(node) = event.node else { return };
    for id in bubble_chain(graph, node) {
        if let Some(target) = graph.component_mut(id) {
            target.on_pointer(event);
            if event.stop_propagation {
                return;
            }
        }
    }
}

/// Trigger counterpart of [`dispatch_pointer`].
pub(crate) fn dispatch_trigger(graph: &mut SceneGraph, event: &mut TriggerEvent) {
    let Some(component) = event.component else {
        return;
    };
    event.node = graph.node_of(component);
    if let Some(target) = graph.component_mut(component) {
        target.on_trigger(event);
    }
    if event.stop_propagation {
        return;
    }
    let Some(node) = event.node else { return };
    for id in bubble_chain(graph, node) {
        if let Some(target) = graph.component_mut(id) {
            target.on_trigger(event);
            if event.stop_propagation {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ViewComponent;
    use crate::input::{Modifiers, TriggerKind};
    use crate::pick::PickRegistry;
    use crate::testing::mock_backend;
    use glam::Mat4;
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::camera::Projection;

    fn pointer(kind: PointerKind, local: Vec2) -> PointerInput {
        PointerInput {
            kind,
            is_primary: true,
            is_dragging: false,
            buttons: crate::input::buttons::LEFT,
            modifiers: Modifiers::default(),
            local,
            movement: Vec2::zero(),
        }
    }

    fn camera() -> CameraState {
        CameraState::new(Mat4::IDENTITY, Projection::perspective(52.0))
    }

    fn full_view() -> RenderView {
        let (backend, _state) = mock_backend(800, 600);
        let mut view = RenderView::new(backend);
        view.add_viewport();
        view
    }

    // ── routing policy ────────────────────────────────────────────────────

    #[test]
    fn hover_updates_viewport_without_picking() {
        let (backend, state) = mock_backend(800, 600);
        let mut view = RenderView::new(backend);
        view.add_viewport();
        let registry = PickRegistry::new();
        let ctx = RouteCtx {
            registry: &registry,
            scene_root: Some(ObjectId(0)),
            camera: Some(camera()),
        };

        let ev = route_pointer(
            &mut view,
            &ctx,
            pointer(PointerKind::Hover, Vec2::new(10.0, 10.0)),
        )
        .unwrap();
        assert_eq!(ev.viewport, 0);
        assert_eq!(view.active_viewport(), Some(0));
        assert!(state.borrow().last_pick_point.is_none());
    }

    #[test]
    fn primary_down_picks_and_sets_sticky_targets() {
        let (backend, state) = mock_backend(800, 600);
        let mut view = RenderView::new(backend);
        view.add_viewport();
        let mut registry = PickRegistry::new();
        let index = registry.register(ObjectId(9), None, None, true).unwrap();
        state.borrow_mut().pick_index = index;
        let ctx = RouteCtx {
            registry: &registry,
            scene_root: Some(ObjectId(0)),
            camera: Some(camera()),
        };

        let ev = route_pointer(
            &mut view,
            &ctx,
            pointer(PointerKind::Down, Vec2::new(100.0, 100.0)),
        )
        .unwrap();
        assert_eq!(ev.object, Some(ObjectId(9)));
        assert_eq!(view.active_object(), Some(ObjectId(9)));
    }

    #[test]
    fn drag_sticks_to_the_down_viewport_and_object() {
        let (backend, state) = mock_backend(800, 600);
        let mut view = RenderView::new(backend);
        view.add_viewport();
        view.viewport_mut(0).set_size(0.0, 0.0, 0.5, 1.0);
        let mut registry = PickRegistry::new();
        let index = registry.register(ObjectId(9), None, None, true).unwrap();
        state.borrow_mut().pick_index = index;
        let ctx = RouteCtx {
            registry: &registry,
            scene_root: Some(ObjectId(0)),
            camera: Some(camera()),
        };

        route_pointer(
            &mut view,
            &ctx,
            pointer(PointerKind::Down, Vec2::new(100.0, 100.0)),
        )
        .unwrap();
        // Moves outside every viewport still route to the down target.
        let ev = route_pointer(
            &mut view,
            &ctx,
            pointer(PointerKind::Move, Vec2::new(700.0, 100.0)),
        )
        .unwrap();
        assert_eq!(ev.viewport, 0);
        assert_eq!(ev.object, Some(ObjectId(9)));
    }

    #[test]
    fn event_outside_every_viewport_is_cancelled() {
        let mut view = full_view();
        view.viewport_mut(0).set_size(0.0, 0.0, 0.5, 1.0);
        let registry = PickRegistry::new();
        let ctx = RouteCtx {
            registry: &registry,
            scene_root: None,
            camera: None,
        };
        assert!(
            route_pointer(
                &mut view,
                &ctx,
                pointer(PointerKind::Hover, Vec2::new(700.0, 100.0)),
            )
            .is_none()
        );
    }

    #[test]
    fn background_pick_clears_sticky_object() {
        let (backend, state) = mock_backend(800, 600);
        let mut view = RenderView::new(backend);
        view.add_viewport();
        view.active_object = Some(ObjectId(9));
        state.borrow_mut().pick_index = 0;
        let registry = PickRegistry::new();
        let ctx = RouteCtx {
            registry: &registry,
            scene_root: Some(ObjectId(0)),
            camera: Some(camera()),
        };

        route_pointer(
            &mut view,
            &ctx,
            pointer(PointerKind::Down, Vec2::new(10.0, 10.0)),
        )
        .unwrap();
        assert_eq!(view.active_object(), None);
    }

    #[test]
    fn pick_without_scene_preserves_sticky_object() {
        let mut view = full_view();
        view.active_object = Some(ObjectId(9));
        let registry = PickRegistry::new();
        let ctx = RouteCtx {
            registry: &registry,
            scene_root: None,
            camera: None,
        };

        let ev = route_pointer(
            &mut view,
            &ctx,
            pointer(PointerKind::Down, Vec2::new(10.0, 10.0)),
        )
        .unwrap();
        assert_eq!(ev.object, Some(ObjectId(9)));
        assert_eq!(view.active_object(), Some(ObjectId(9)));
    }

    #[test]
    fn triggers_hit_test_and_pick() {
        let (backend, state) = mock_backend(800, 600);
        let mut view = RenderView::new(backend);
        view.add_viewport();
        let mut registry = PickRegistry::new();
        let index = registry.register(ObjectId(4), None, None, true).unwrap();
        state.borrow_mut().pick_index = index;
        let ctx = RouteCtx {
            registry: &registry,
            scene_root: Some(ObjectId(0)),
            camera: Some(camera()),
        };

        let ev = route_trigger(
            &mut view,
            &ctx,
            TriggerInput {
                kind: TriggerKind::Wheel,
                wheel: 1.0,
                modifiers: Modifiers::default(),
                local: Vec2::new(50.0, 50.0),
            },
        )
        .unwrap();
        assert_eq!(ev.object, Some(ObjectId(4)));
    }

    // ── dispatch ──────────────────────────────────────────────────────────

    struct Recorder {
        log: Rc<RefCell<Vec<&'static str>>>,
        name: &'static str,
        consume: bool,
    }

    impl ViewComponent for Recorder {
        fn type_name(&self) -> &'static str {
            "Recorder"
        }
        fn on_pointer(&mut self, event: &mut PointerEvent) {
            self.log.borrow_mut().push(self.name);
            if self.consume {
                event.stop_propagation = true;
            }
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn routed_pointer(component: lumen_graph::ComponentId) -> PointerEvent {
        PointerEvent {
            kind: PointerKind::Down,
            is_primary: true,
            is_dragging: false,
            buttons: crate::input::buttons::LEFT,
            modifiers: Modifiers::default(),
            local: Vec2::zero(),
            movement: Vec2::zero(),
            device: Vec2::zero(),
            viewport: 0,
            object: Some(ObjectId(1)),
            component: Some(component),
            node: None,
            stop_propagation: false,
        }
    }

    #[test]
    fn dispatch_bubbles_to_ancestor_components() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut graph = SceneGraph::new();
        let root = graph.create_node("root");
        let mid = graph.create_node("mid");
        let leaf = graph.create_node("leaf");
        graph.add_child(root, mid);
        graph.add_child(mid, leaf);

        graph.add_component(
            root,
            Box::new(Recorder { log: log.clone(), name: "root", consume: false }),
        );
        graph.add_component(
            mid,
            Box::new(Recorder { log: log.clone(), name: "mid", consume: false }),
        );
        let target = graph.add_component(
            leaf,
            Box::new(Recorder { log: log.clone(), name: "leaf", consume: false }),
        );

        let mut ev = routed_pointer(target);
        dispatch_pointer(&mut graph, &mut ev);
        assert_eq!(*log.borrow(), vec!["leaf", "mid", "root"]);
        assert_eq!(ev.node, graph.node_of(target));
    }

    #[test]
    fn stop_propagation_halts_the_bubble() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut graph = SceneGraph::new();
        let root = graph.create_node("root");
        let leaf = graph.create_node("leaf");
        graph.add_child(root, leaf);

        graph.add_component(
            root,
            Box::new(Recorder { log: log.clone(), name: "root", consume: false }),
        );
        let target = graph.add_component(
            leaf,
            Box::new(Recorder { log: log.clone(), name: "leaf", consume: true }),
        );

        let mut ev = routed_pointer(target);
        dispatch_pointer(&mut graph, &mut ev);
        assert_eq!(*log.borrow(), vec!["leaf"]);
    }

    #[test]
    fn dispatch_without_component_is_a_no_op() {
        let mut graph = SceneGraph::new();
        let mut ev = routed_pointer(lumen_graph::ComponentId::from_raw(0));
        ev.component = None;
        dispatch_pointer(&mut graph, &mut ev);
        assert!(ev.node.is_none());
    }
}
