use std::io::Cursor;

use anyhow::Context;
use lumen_graph::ComponentId;

use crate::camera::CameraState;
use crate::component::SceneGraph;
use crate::coords::Vec2;
use crate::pick::{GpuPicker, PickHit, PickRegistry};
use crate::render::{Capabilities, ObjectId, RenderBackend, RenderError, RenderPassCtx};
use crate::scene::scene_component_mut;
use crate::system::ViewId;
use crate::viewport::Viewport;

/// Encoding for snapshot rendering.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SnapshotFormat {
    Png,
    Jpeg { quality: u8 },
}

/// One canvas with its backend, viewports and sticky event targets.
///
/// A view renders the system's active scene through each enabled viewport
/// and remembers the last routed viewport/object/component so drags keep
/// their target even when the pointer leaves the viewport.
pub struct RenderView {
    backend: Box<dyn RenderBackend>,
    viewports: Vec<Viewport>,
    picker: GpuPicker,
    pub(crate) active_viewport: Option<usize>,
    pub(crate) active_object: Option<ObjectId>,
    pub(crate) active_component: Option<ComponentId>,
    pending_size: Option<(u32, u32)>,
}

impl RenderView {
    pub fn new(backend: Box<dyn RenderBackend>) -> Self {
        Self {
            backend,
            viewports: Vec::new(),
            picker: GpuPicker,
            active_viewport: None,
            active_object: None,
            active_component: None,
            pending_size: None,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.backend.capabilities()
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        self.backend.canvas_size()
    }

    // ── viewports ─────────────────────────────────────────────────────────

    /// Adds a full-canvas viewport; returns its index.
    pub fn add_viewport(&mut self) -> usize {
        let (w, h) = self.backend.canvas_size();
        let mut vp = Viewport::new();
        vp.set_canvas_size(w, h);
        self.viewports.push(vp);
        self.viewports.len() - 1
    }

    /// Removes a viewport.
    ///
    /// # Panics
    /// Panics if the index is out of range.
    pub fn remove_viewport(&mut self, index: usize) {
        assert!(
            index < self.viewports.len(),
            "remove_viewport: index {index} out of range"
        );
        self.viewports.remove(index);
        // Later indices shift down; the removed pane loses its sticky role.
        self.active_viewport = match self.active_viewport {
            Some(ix) if ix == index => None,
            Some(ix) if ix > index => Some(ix - 1),
            other => other,
        };
    }

    /// # Panics
    /// Panics if the index is out of range.
    pub fn viewport(&self, index: usize) -> &Viewport {
        &self.viewports[index]
    }

    /// # Panics
    /// Panics if the index is out of range.
    pub fn viewport_mut(&mut self, index: usize) -> &mut Viewport {
        &mut self.viewports[index]
    }

    pub fn viewports(&self) -> &[Viewport] {
        &self.viewports
    }

    pub fn enable_viewport(&mut self, index: usize, enabled: bool) {
        self.viewports[index].enabled = enabled;
    }

    /// First enabled viewport containing the canvas position.
    pub fn hit_test(&self, local: Vec2) -> Option<usize> {
        self.viewports
            .iter()
            .position(|vp| vp.enabled && vp.is_inside(local))
    }

    // ── sticky targets ────────────────────────────────────────────────────

    pub fn active_viewport(&self) -> Option<usize> {
        self.active_viewport
    }

    pub fn active_object(&self) -> Option<ObjectId> {
        self.active_object
    }

    pub fn active_component(&self) -> Option<ComponentId> {
        self.active_component
    }

    // ── sizing ────────────────────────────────────────────────────────────

    /// Requests a canvas resize, applied at the start of the next render.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.pending_size = Some((width, height));
    }

    fn apply_size(&mut self, width: u32, height: u32) {
        self.backend.set_size(width, height);
        for vp in &mut self.viewports {
            vp.set_canvas_size(width, height);
        }
    }

    // ── rendering ─────────────────────────────────────────────────────────

    /// Renders one frame of the active scene.
    ///
    /// A missing scene/camera pair is a no-op: the canvas keeps its last
    /// contents and the deferred resize stays pending.
    pub fn render(
        &mut self,
        view: ViewId,
        graph: &mut SceneGraph,
        pair: Option<(ComponentId, CameraState)>,
    ) -> Result<(), RenderError> {
        let Some((scene_id, camera)) = pair else {
            return Ok(());
        };

        if let Some((w, h)) = self.pending_size.take() {
            self.apply_size(w, h);
        }

        let root_node = graph.node_of(scene_id);
        let (scene_root, mut lists) = {
            let Some(scene) = scene_component_mut(graph, scene_id) else {
                return Ok(());
            };
            (scene.root(), scene.take_lists())
        };
        // Refresh the scene's cached hook lists if the graph changed.
        if let Some(root) = root_node {
            if !lists.is_current(graph) {
                lists = crate::scene::RenderLists::build(graph, root);
            }
        }

        self.backend.clear();
        let result = self.render_viewports(view, graph, scene_root, &camera, &lists);

        if let Some(scene) = scene_component_mut(graph, scene_id) {
            scene.set_lists(lists);
        }
        result
    }

    fn render_viewports(
        &mut self,
        view: ViewId,
        graph: &mut SceneGraph,
        scene_root: ObjectId,
        camera: &CameraState,
        lists: &crate::scene::RenderLists,
    ) -> Result<(), RenderError> {
        for index in 0..self.viewports.len() {
            let vp = &self.viewports[index];
            if !vp.enabled {
                continue;
            }
            let rect = vp.pixel_rect();
            if rect.width == 0 || rect.height == 0 {
                continue;
            }
            let Some(pass_camera) = vp.update_camera(Some(camera)) else {
                continue;
            };

            self.backend.apply_viewport(rect);

            for &id in &lists.pre {
                if let Some(component) = graph.component_mut(id) {
                    let mut ctx = RenderPassCtx {
                        view,
                        viewport: index,
                        viewport_rect: rect,
                        backend: self.backend.as_mut(),
                        scene: scene_root,
                        camera: &pass_camera,
                    };
                    component.pre_render(&mut ctx);
                }
            }

            self.backend.render(scene_root, &pass_camera)?;

            for &id in &lists.post {
                if let Some(component) = graph.component_mut(id) {
                    let mut ctx = RenderPassCtx {
                        view,
                        viewport: index,
                        viewport_rect: rect,
                        backend: self.backend.as_mut(),
                        scene: scene_root,
                        camera: &pass_camera,
                    };
                    component.post_render(&mut ctx);
                }
            }
        }
        Ok(())
    }

    /// Renders at the given size and encodes the canvas contents.
    ///
    /// The canvas is restored to its previous size afterwards.
    pub fn render_image(
        &mut self,
        view: ViewId,
        graph: &mut SceneGraph,
        pair: Option<(ComponentId, CameraState)>,
        width: u32,
        height: u32,
        format: SnapshotFormat,
    ) -> anyhow::Result<Vec<u8>> {
        let (old_w, old_h) = self.backend.canvas_size();
        self.apply_size(width, height);
        let image = self
            .render(view, graph, pair)
            .and_then(|()| self.backend.read_image());
        self.apply_size(old_w, old_h);
        let image = image.context("rendering snapshot")?;

        let mut bytes = Vec::new();
        match format {
            SnapshotFormat::Png => {
                image::DynamicImage::ImageRgba8(image)
                    .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
                    .context("encoding snapshot as png")?;
            }
            SnapshotFormat::Jpeg { quality } => {
                let rgb = image::DynamicImage::ImageRgba8(image).into_rgb8();
                let mut encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, quality);
                encoder
                    .encode_image(&rgb)
                    .context("encoding snapshot as jpeg")?;
            }
        }
        Ok(bytes)
    }

    // ── picking ───────────────────────────────────────────────────────────

    /// Runs an index-pass pick in one viewport.
    pub(crate) fn pick(
        &mut self,
        registry: &PickRegistry,
        scene: ObjectId,
        camera: &CameraState,
        viewport: usize,
        local: Vec2,
    ) -> Result<Option<PickHit>, RenderError> {
        self.picker.pick(
            self.backend.as_mut(),
            registry,
            scene,
            camera,
            &self.viewports[viewport],
            local,
        )
    }
}
