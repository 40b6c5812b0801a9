//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_ui::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Manager facade
pub use crate::{ScreenManager, ScreenManagerBuilder};

// Errors
pub use crate::error::{ScreenError, ScreenResult};

// Screens and views
pub use crate::core::screen::{
    OrderShift, OrderWidth, Screen, ScreenComponent, ScreenData, ScreenKey, ScreenState,
    ScreenStateChanged, ScreenView, ScreenViewSettings,
};

// Instances
pub use crate::core::pool::{ScreenFactory, ScreenParts};

// Configuration
pub use crate::core::settings::{ScreenConfig, ScreenSettings};
pub use crate::core::transition::{DefinedTransitions, TransitionEdge, TransitionType};
