//! Input events and platform translation.
//!
//! Raw platform events are translated into [`PointerInput`]/[`TriggerInput`]
//! and routed per view; routing resolves a viewport and (for picking phases)
//! the 3D object under the cursor, producing [`PointerEvent`]/[`TriggerEvent`]
//! envelopes that components and listeners receive.

pub mod platform;
mod types;

pub use types::{
    Modifiers, PointerEvent, PointerInput, PointerKind, TriggerEvent, TriggerInput, TriggerKind,
    ViewInput, buttons,
};
