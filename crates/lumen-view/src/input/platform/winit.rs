use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::ModifiersState;
use winit::window::Window;

use crate::coords::Vec2;
use crate::input::{
    Modifiers, PointerInput, PointerKind, TriggerInput, TriggerKind, ViewInput, buttons,
};

/// Tracks pointer state across winit events and translates them into view
/// input.
///
/// winit 0.30 does not expose cursor or modifier queries on the window, so
/// the tracker carries position, held buttons and modifiers between events.
/// Double-click and context-menu triggers have no winit equivalent; hosts
/// that need them synthesize [`TriggerInput`] themselves.
#[derive(Debug, Default)]
pub struct PointerTracker {
    position: Vec2,
    held: u32,
    modifiers: Modifiers,
    dragging: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates a winit `WindowEvent` into view input.
    ///
    /// Returns `None` for events the view layer does not consume.
    pub fn translate(&mut self, window: &Window, event: &WindowEvent) -> Option<ViewInput> {
        match event {
            WindowEvent::ModifiersChanged(m) => {
                let ms: ModifiersState = m.state();
                self.modifiers = Modifiers {
                    shift: ms.shift_key(),
                    ctrl: ms.control_key(),
                    alt: ms.alt_key(),
                    meta: ms.super_key(),
                };
                None
            }

            WindowEvent::CursorMoved { position, .. } => {
                let local = to_logical(window, *position);
                let movement = local - self.position;
                self.position = local;
                let kind = if self.held != 0 {
                    self.dragging = true;
                    PointerKind::Move
                } else {
                    PointerKind::Hover
                };
                Some(ViewInput::Pointer(PointerInput {
                    kind,
                    is_primary: self.held & buttons::LEFT != 0,
                    is_dragging: self.dragging,
                    buttons: self.held,
                    modifiers: self.modifiers,
                    local,
                    movement,
                }))
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let bit = match button {
                    WinitMouseButton::Left => buttons::LEFT,
                    WinitMouseButton::Right => buttons::RIGHT,
                    WinitMouseButton::Middle => buttons::MIDDLE,
                    _ => return None,
                };
                let kind = match state {
                    ElementState::Pressed => {
                        self.held |= bit;
                        PointerKind::Down
                    }
                    ElementState::Released => {
                        self.held &= !bit;
                        if self.held == 0 {
                            self.dragging = false;
                        }
                        PointerKind::Up
                    }
                };
                Some(ViewInput::Pointer(PointerInput {
                    kind,
                    is_primary: bit == buttons::LEFT,
                    is_dragging: self.dragging,
                    buttons: self.held,
                    modifiers: self.modifiers,
                    local: self.position,
                    movement: Vec2::zero(),
                }))
            }

            WindowEvent::MouseWheel { delta, .. } => {
                // Positive means scrolling down/away, matching wheel zoom-out.
                let wheel = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y,
                    MouseScrollDelta::PixelDelta(p) => {
                        let logical = to_logical(window, *p);
                        -logical.y / 40.0
                    }
                };
                Some(ViewInput::Trigger(TriggerInput {
                    kind: TriggerKind::Wheel,
                    wheel,
                    modifiers: self.modifiers,
                    local: self.position,
                }))
            }

            WindowEvent::CursorLeft { .. } => {
                self.dragging = false;
                None
            }

            _ => None,
        }
    }
}

fn to_logical(window: &Window, pos: PhysicalPosition<f64>) -> Vec2 {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    Vec2::new(logical.x as f32, logical.y as f32)
}
