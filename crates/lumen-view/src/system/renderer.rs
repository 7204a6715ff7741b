use lumen_graph::ComponentId;

use crate::camera::CameraState;
use crate::component::{Action, SceneGraph, UpdateCtx};
use crate::input::{PointerEvent, PointerInput, TriggerEvent, TriggerInput};
use crate::pick::PickRegistry;
use crate::render::{Capabilities, ObjectId, RenderError};
use crate::scene::{camera_component, scene_component, scene_component_mut};
use crate::view::router::{self, RouteCtx};
use crate::view::{RenderView, SnapshotFormat};

use super::Pulse;

/// Handle to a view attached to the system.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

/// Activation changes, drained by the host via [`RenderSystem::take_events`].
///
/// Scene changes always come paired with a camera event, even when the
/// camera component happens to stay the same, so hosts tracking only
/// cameras stay in sync.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SystemEvent {
    ActiveScene {
        previous: Option<ComponentId>,
        next: Option<ComponentId>,
    },
    ActiveCamera {
        previous: Option<ComponentId>,
        next: Option<ComponentId>,
    },
}

type PointerListener = Box<dyn FnMut(&mut PointerEvent)>;
type TriggerListener = Box<dyn FnMut(&mut TriggerEvent)>;

/// Coordinates views, the active scene/camera pair, picking and the render
/// loop.
///
/// The system owns its attached [`RenderView`]s; the component graph stays
/// outside and is passed into each entry point, so hosts keep full control
/// over graph mutation between frames.
pub struct RenderSystem {
    views: Vec<(ViewId, RenderView)>,
    next_view_id: u64,
    active_scene: Option<ComponentId>,
    pick_registry: PickRegistry,
    capabilities: Option<Capabilities>,
    events: Vec<SystemEvent>,
    pointer_listeners: Vec<PointerListener>,
    trigger_listeners: Vec<TriggerListener>,
    pulse: Pulse,
    force_render: bool,
}

impl RenderSystem {
    pub fn new() -> Self {
        Self {
            views: Vec::new(),
            next_view_id: 0,
            active_scene: None,
            pick_registry: PickRegistry::new(),
            capabilities: None,
            events: Vec::new(),
            pointer_listeners: Vec::new(),
            trigger_listeners: Vec::new(),
            pulse: Pulse::new(),
            force_render: false,
        }
    }

    // ── views ─────────────────────────────────────────────────────────────

    /// Attaches a view; the system owns it until [`detach_view`].
    ///
    /// Renderer capabilities are recorded from the first attached view.
    ///
    /// [`detach_view`]: RenderSystem::detach_view
    pub fn attach_view(&mut self, view: RenderView) -> ViewId {
        let id = ViewId(self.next_view_id);
        self.next_view_id += 1;
        if self.capabilities.is_none() {
            self.capabilities = Some(view.capabilities());
        }
        self.views.push((id, view));
        self.force_render = true;
        id
    }

    /// Detaches a view and hands it back.
    ///
    /// # Panics
    /// Panics if the view is not attached.
    pub fn detach_view(&mut self, id: ViewId) -> RenderView {
        let ix = self.view_index(id);
        self.views.remove(ix).1
    }

    /// # Panics
    /// Panics if the view is not attached.
    pub fn view(&self, id: ViewId) -> &RenderView {
        let ix = self.view_index(id);
        &self.views[ix].1
    }

    /// # Panics
    /// Panics if the view is not attached.
    pub fn view_mut(&mut self, id: ViewId) -> &mut RenderView {
        let ix = self.view_index(id);
        &mut self.views[ix].1
    }

    pub fn view_ids(&self) -> Vec<ViewId> {
        self.views.iter().map(|(id, _)| *id).collect()
    }

    fn view_index(&self, id: ViewId) -> usize {
        self.views
            .iter()
            .position(|(vid, _)| *vid == id)
            .unwrap_or_else(|| panic!("render view not attached: {id:?}"))
    }

    /// Capabilities of the backend, known once a view has been attached.
    pub fn capabilities(&self) -> Option<Capabilities> {
        self.capabilities
    }

    // ── active scene and camera ───────────────────────────────────────────

    pub fn active_scene(&self) -> Option<ComponentId> {
        self.active_scene
    }

    /// The active scene's remembered camera, if any.
    pub fn active_camera(&self, graph: &SceneGraph) -> Option<ComponentId> {
        self.read_camera(graph, self.active_scene)
    }

    /// Switches the active scene. A no-op when `next` is already active;
    /// otherwise emits an `ActiveScene` event and, in the same batch, an
    /// `ActiveCamera` event for the scenes' remembered cameras.
    ///
    /// # Panics
    /// Panics if `next` does not refer to a scene component.
    pub fn set_active_scene(&mut self, graph: &SceneGraph, next: Option<ComponentId>) {
        if next == self.active_scene {
            return;
        }
        if let Some(id) = next {
            assert!(
                scene_component(graph, id).is_some(),
                "set_active_scene: {id:?} is not a scene component"
            );
        }
        let previous = self.active_scene;
        let previous_camera = self.read_camera(graph, previous);
        self.active_scene = next;
        let next_camera = self.read_camera(graph, next);
        self.events.push(SystemEvent::ActiveScene { previous, next });
        self.events.push(SystemEvent::ActiveCamera {
            previous: previous_camera,
            next: next_camera,
        });
        self.force_render = true;
    }

    /// Makes `camera` the remembered camera of its owning scene (the nearest
    /// scene component on its node or an ancestor). Emits an `ActiveCamera`
    /// event when that scene is the active one.
    pub fn activate_camera(&mut self, graph: &mut SceneGraph, camera: ComponentId) {
        let Some(node) = graph.node_of(camera) else {
            log::warn!("activate_camera: component {camera:?} is not in the graph");
            return;
        };
        let owning_scene = std::iter::once(node)
            .chain(graph.ancestors(node))
            .flat_map(|n| graph.components_on(n).iter().copied())
            .find(|&id| scene_component(graph, id).is_some());
        let Some(scene_id) = owning_scene else {
            log::warn!("activate_camera: camera {camera:?} has no owning scene");
            return;
        };

        let previous = scene_component(graph, scene_id).and_then(|s| s.active_camera());
        if previous == Some(camera) {
            return;
        }
        if let Some(scene) = scene_component_mut(graph, scene_id) {
            scene.set_active_camera(Some(camera));
        }
        if self.active_scene == Some(scene_id) {
            self.events.push(SystemEvent::ActiveCamera {
                previous,
                next: Some(camera),
            });
            self.force_render = true;
        }
    }

    /// Clears system state referring to a component about to be removed:
    /// an active scene is deactivated, a remembered camera is forgotten.
    pub fn dispose_component(&mut self, graph: &mut SceneGraph, id: ComponentId) {
        if self.active_scene == Some(id) {
            self.set_active_scene(graph, None);
        }
        for scene_id in graph.component_ids() {
            let remembered = scene_component(graph, scene_id)
                .and_then(|s| s.active_camera())
                .filter(|&cam| cam == id);
            if remembered.is_none() {
                continue;
            }
            if let Some(scene) = scene_component_mut(graph, scene_id) {
                scene.set_active_camera(None);
            }
            if self.active_scene == Some(scene_id) {
                self.events.push(SystemEvent::ActiveCamera {
                    previous: Some(id),
                    next: None,
                });
                self.force_render = true;
            }
        }
    }

    fn read_camera(&self, graph: &SceneGraph, scene: Option<ComponentId>) -> Option<ComponentId> {
        scene
            .and_then(|id| scene_component(graph, id))
            .and_then(|s| s.active_camera())
    }

    /// Active `(scene, camera state)` pair, if both halves resolve.
    fn active_pair(&self, graph: &SceneGraph) -> Option<(ComponentId, CameraState)> {
        let scene_id = self.active_scene?;
        let camera_id = scene_component(graph, scene_id)?.active_camera()?;
        let camera = camera_component(graph, camera_id)?.camera_state();
        Some((scene_id, camera))
    }

    fn active_scene_root(&self, graph: &SceneGraph) -> Option<ObjectId> {
        scene_component(graph, self.active_scene?).map(|s| s.root())
    }

    // ── picking registry ──────────────────────────────────────────────────

    /// Registers a backend object for picking; see [`PickRegistry::register`].
    pub fn register_object(
        &mut self,
        object: ObjectId,
        parent: Option<ObjectId>,
        component: Option<ComponentId>,
        pickable: bool,
    ) -> Option<u32> {
        self.pick_registry.register(object, parent, component, pickable)
    }

    pub fn unregister_object(&mut self, object: ObjectId) {
        self.pick_registry.unregister(object);
    }

    pub fn pick_registry(&self) -> &PickRegistry {
        &self.pick_registry
    }

    // ── events and listeners ──────────────────────────────────────────────

    /// Drains the pending activation events.
    pub fn take_events(&mut self) -> Vec<SystemEvent> {
        std::mem::take(&mut self.events)
    }

    /// Adds a listener invoked for routed pointer events after component
    /// dispatch, unless a component consumed the event. Listeners may set
    /// `stop_propagation` themselves to keep the event from the viewport
    /// manipulator.
    pub fn add_pointer_listener(&mut self, listener: impl FnMut(&mut PointerEvent) + 'static) {
        self.pointer_listeners.push(Box::new(listener));
    }

    pub fn add_trigger_listener(&mut self, listener: impl FnMut(&mut TriggerEvent) + 'static) {
        self.trigger_listeners.push(Box::new(listener));
    }

    // ── frame loop ────────────────────────────────────────────────────────

    /// Requests a redraw on the next pulse regardless of component updates.
    pub fn request_render(&mut self) {
        self.force_render = true;
    }

    /// Resets the pulse baseline, e.g. after resuming from suspension.
    pub fn reset_clock(&mut self) {
        self.pulse.reset();
    }

    /// Runs one pulse: updates every component, applies queued activations,
    /// and renders all views when something changed or a render was forced.
    pub fn render_frame(&mut self, graph: &mut SceneGraph) -> Result<(), RenderError> {
        let time = self.pulse.advance();

        let mut actions: Vec<Action> = Vec::new();
        let mut updated = false;
        for id in graph.component_ids() {
            let Some(node) = graph.node_of(id) else {
                continue;
            };
            if let Some(component) = graph.component_mut(id) {
                let mut ctx = UpdateCtx {
                    time,
                    node,
                    component: id,
                    actions: &mut actions,
                };
                updated |= component.update(&mut ctx);
            }
        }
        for action in actions {
            match action {
                Action::ActivateScene(id) => self.set_active_scene(graph, Some(id)),
                Action::ActivateCamera(id) => self.activate_camera(graph, id),
            }
        }

        if updated || self.force_render {
            let pair = self.active_pair(graph);
            for (id, view) in &mut self.views {
                view.render(*id, graph, pair.clone())?;
            }
            self.force_render = false;
        }
        Ok(())
    }

    /// Renders a snapshot of the active scene through one view.
    pub fn render_image(
        &mut self,
        id: ViewId,
        graph: &mut SceneGraph,
        width: u32,
        height: u32,
        format: SnapshotFormat,
    ) -> anyhow::Result<Vec<u8>> {
        let pair = self.active_pair(graph);
        let ix = self.view_index(id);
        self.views[ix]
            .1
            .render_image(id, graph, pair, width, height, format)
    }

    // ── input ─────────────────────────────────────────────────────────────

    /// Routes a pointer event through one view. Returns `false` when the
    /// event resolved to no viewport and was cancelled.
    ///
    /// # Panics
    /// Panics if the view is not attached.
    pub fn on_pointer(
        &mut self,
        id: ViewId,
        graph: &mut SceneGraph,
        input: PointerInput,
    ) -> bool {
        let ix = self.view_index(id);
        let ctx = RouteCtx {
            registry: &self.pick_registry,
            scene_root: self.active_scene_root(graph),
            camera: self.active_pair(graph).map(|(_, cam)| cam),
        };
        let Some(mut event) = router::route_pointer(&mut self.views[ix].1, &ctx, input) else {
            return false;
        };

        router::dispatch_pointer(graph, &mut event);
        if !event.stop_propagation {
            for listener in &mut self.pointer_listeners {
                listener(&mut event);
            }
        }
        // Listeners may have consumed the event, check again.
        if !event.stop_propagation {
            let view = &mut self.views[ix].1;
            if view.viewport_mut(event.viewport).on_pointer(&event) {
                self.force_render = true;
            }
        }
        true
    }

    /// Trigger counterpart of [`on_pointer`].
    ///
    /// # Panics
    /// Panics if the view is not attached.
    ///
    /// [`on_pointer`]: RenderSystem::on_pointer
    pub fn on_trigger(
        &mut self,
        id: ViewId,
        graph: &mut SceneGraph,
        input: TriggerInput,
    ) -> bool {
        let ix = self.view_index(id);
        let ctx = RouteCtx {
            registry: &self.pick_registry,
            scene_root: self.active_scene_root(graph),
            camera: self.active_pair(graph).map(|(_, cam)| cam),
        };
        let Some(mut event) = router::route_trigger(&mut self.views[ix].1, &ctx, input) else {
            return false;
        };

        router::dispatch_trigger(graph, &mut event);
        if !event.stop_propagation {
            for listener in &mut self.trigger_listeners {
                listener(&mut event);
            }
        }
        // Listeners may have consumed the event, check again.
        if !event.stop_propagation {
            let view = &mut self.views[ix].1;
            if view.viewport_mut(event.viewport).on_trigger(&event) {
                self.force_render = true;
            }
        }
        true
    }

    /// Convenience for hosts forwarding translated platform input.
    pub fn dispatch_input(
        &mut self,
        id: ViewId,
        graph: &mut SceneGraph,
        input: crate::input::ViewInput,
    ) -> bool {
        match input {
            crate::input::ViewInput::Pointer(p) => self.on_pointer(id, graph, p),
            crate::input::ViewInput::Trigger(t) => self.on_trigger(id, graph, t),
        }
    }
}

impl Default for RenderSystem {
    fn default() -> Self {
        Self::new()
    }
}
