//=========================================================================
// Core Systems
//=========================================================================
//
// Building blocks of the screen manager.
//
//   screen      per-screen identity, hooks, view seam and state machine
//   transition  timed switches between an outgoing and incoming screen
//   stack       layered ordering with derived visibility, order, input
//   pool        singleton-per-key instance cache over a ScreenFactory
//   settings    construction-time configuration
//
//=========================================================================

//=== Module Declarations =================================================

pub mod pool;
pub mod screen;
pub mod settings;
pub mod stack;
pub mod transition;

#[cfg(test)]
pub(crate) mod test_support;

//=== Public API ==========================================================

pub use pool::{ScreenFactory, ScreenParts, ScreenPool};
pub use screen::{
    BaseScreen, OrderShift, OrderWidth, Screen, ScreenComponent, ScreenData, ScreenKey,
    ScreenRegistry, ScreenState, ScreenStateChanged, ScreenView, ScreenViewSettings,
};
pub use settings::{ScreenConfig, ScreenSettings};
pub use stack::ScreenStack;
pub use transition::{
    DefinedTransitionEntry, DefinedTransitions, ScreensTransition, TransitionEdge,
    TransitionType, TransitionsOrder,
};
