//=========================================================================
// Screen Components
//=========================================================================
//
// Optional behaviour attached to a screen alongside its logic.
//
// Lifecycle:
//   created with the screen → on_initialized (all) → on_ready (all)
//   every visible frame     → on_update
//   pool teardown           → on_clean_up
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Screen;

//=== ScreenComponent =====================================================

/// Per-frame behaviour owned by one screen.
///
/// Every component of a screen is initialized before any of them is told
/// it is ready, so `on_ready` may rely on its siblings being set up.
pub trait ScreenComponent: 'static {
    /// Called once, when the owning screen is created.
    fn on_initialized(&mut self, _owner: &mut dyn Screen) {}

    fn on_ready(&mut self) {}

    /// Called every frame after the owner's logic and view.
    fn on_update(&mut self, delta_time: f32);

    /// Called when the owning screen is utilized.
    fn on_clean_up(&mut self) {}
}
