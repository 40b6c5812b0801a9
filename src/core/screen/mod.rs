//=========================================================================
// Screen System
//=========================================================================
//
// Screen identity, behaviour hooks and the per-screen state machine.
//
// Architecture:
//   BaseScreen<K>
//     ├─ key: K                       (ScreenKey, one instance per key)
//     ├─ state: ScreenState           (7-state lifecycle)
//     ├─ screen: Box<dyn Screen>      (logic hooks)
//     ├─ view: Box<dyn ScreenView>    (render collaborator)
//     └─ components                   (optional per-frame extensions)
//
// Flow:
//   open/show/hide/close() → ScreenSwitchStateHandler
//     → set_switch_state_progress() → complete_switch_state()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::fmt::Debug;
use std::hash::Hash;

//=== Module Declarations =================================================

mod base_screen;
mod component;
mod order_shift;
mod registry;
mod state;
mod view;

//=== Public API ==========================================================

pub use base_screen::{BaseScreen, ScreenStateChanged};
pub(crate) use base_screen::SharedObservers;
pub use component::ScreenComponent;
pub use order_shift::{apply_order_shifts, OrderShift, OrderWidth};
pub use registry::ScreenRegistry;
pub use state::ScreenState;
pub use view::{ScreenView, ScreenViewSettings};

//=== Screen Key Trait ====================================================

/// Marker trait for screen identifiers.
///
/// Screen keys name screen kinds in the pool, the stack and the defined
/// transitions table. Typically implemented by an application enum.
pub trait ScreenKey: Clone + Copy + Eq + Hash + Debug + 'static {}

//=== Screen Trait ========================================================

/// Screen logic with lifecycle hooks.
///
/// Every hook has an empty default. `as_any`/`as_any_mut` give the manager
/// typed access to the concrete screen behind a key.
///
/// # Minimal Implementation
///
/// ```rust
/// # use std::any::Any;
/// # use aetheric_ui::prelude::*;
/// struct Inventory;
///
/// impl Screen for Inventory {
///     fn as_any(&self) -> &dyn Any { self }
///     fn as_any_mut(&mut self) -> &mut dyn Any { self }
/// }
/// ```
pub trait Screen: 'static {
    /// Called every frame while the screen is visible.
    fn on_update(&mut self, _delta_time: f32) {}

    fn on_opening(&mut self) {}

    fn on_open(&mut self) {}

    fn on_showing(&mut self) {}

    fn on_show(&mut self) {}

    fn on_hiding(&mut self) {}

    fn on_hide(&mut self) {}

    fn on_closing(&mut self) {}

    fn on_close(&mut self) {}

    /// Called once when the pool drops the screen for good.
    fn on_utilize(&mut self) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

//=== ScreenData Trait ====================================================

/// Screens that receive data when opened.
pub trait ScreenData: Screen {
    type Data;

    /// Stores the data handed to [`ScreenManager::open_with`](crate::ScreenManager::open_with).
    ///
    /// Called before the screen is pushed and before any lifecycle hook.
    fn set_data(&mut self, data: Self::Data);
}
