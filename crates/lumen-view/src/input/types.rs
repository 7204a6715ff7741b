use lumen_graph::{ComponentId, NodeId};

use crate::coords::Vec2;
use crate::render::ObjectId;

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Held-button bitmask carried on pointer events (DOM-style bits).
pub mod buttons {
    pub const LEFT: u32 = 1;
    pub const RIGHT: u32 = 2;
    pub const MIDDLE: u32 = 4;
}

/// Pointer event phase.
///
/// `Hover` is a move without any held button; `Move` is a move during a
/// press. The distinction drives the router's hit-test policy.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PointerKind {
    Hover,
    Down,
    Move,
    Up,
}

/// Trigger (non-pointer) event kind.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TriggerKind {
    Wheel,
    DblClick,
    ContextMenu,
}

/// Either kind of translated view input.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewInput {
    Pointer(PointerInput),
    Trigger(TriggerInput),
}

/// Raw pointer input, before viewport routing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerInput {
    pub kind: PointerKind,
    /// Primary pointer (left button / first touch).
    pub is_primary: bool,
    /// A press-move-release gesture is in progress.
    pub is_dragging: bool,
    /// Held buttons at event time, see [`buttons`].
    pub buttons: u32,
    pub modifiers: Modifiers,
    /// Canvas position in logical pixels (top-left origin).
    pub local: Vec2,
    /// Delta since the previous pointer event.
    pub movement: Vec2,
}

/// Raw trigger input, before viewport routing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TriggerInput {
    pub kind: TriggerKind,
    /// Wheel delta; positive scrolls down/away.
    pub wheel: f32,
    pub modifiers: Modifiers,
    pub local: Vec2,
}

/// Pointer event envelope after routing.
///
/// Carries the resolved viewport (index into the view's list), the picked
/// 3D object and owning component if any, and the propagation flag handlers
/// set to consume the event.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub is_primary: bool,
    pub is_dragging: bool,
    pub buttons: u32,
    pub modifiers: Modifiers,
    pub local: Vec2,
    pub movement: Vec2,
    /// Normalized device coordinates within the resolved viewport.
    pub device: Vec2,
    pub viewport: usize,
    pub object: Option<ObjectId>,
    pub component: Option<ComponentId>,
    pub node: Option<NodeId>,
    pub stop_propagation: bool,
}

/// Trigger event envelope after routing.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerEvent {
    pub kind: TriggerKind,
    pub wheel: f32,
    pub modifiers: Modifiers,
    pub local: Vec2,
    pub device: Vec2,
    pub viewport: usize,
    pub object: Option<ObjectId>,
    pub component: Option<ComponentId>,
    pub node: Option<NodeId>,
    pub stop_propagation: bool,
}
