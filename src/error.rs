//=========================================================================
// Screen Errors
//=========================================================================
//
// Error type shared by the screen stack, pool and manager.
//
// Every variant is a contract violation or a collaborator failure. None
// of them is retried: the operation that produced it is aborted and the
// error is handed back to the caller.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::screen::ScreenState;

//=== ScreenError =========================================================

/// Failures surfaced by screen management operations.
///
/// Screen keys are carried in their `Debug` form so the error type stays
/// independent of the application's `ScreenKey` enum.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// The external factory could not produce a screen for this key.
    #[error("screen factory failed for {key}: {reason}")]
    Factory { key: String, reason: String },

    /// The key is not known to the pool (never acquired or already reset).
    #[error("unknown screen {0}")]
    UnknownScreen(String),

    /// The screen is already pushed; one live instance per key.
    #[error("screen {0} is already in the stack")]
    AlreadyInStack(String),

    /// The pool already handed out the single instance for this key.
    #[error("screen {0} is already taken from the pool")]
    AlreadyTaken(String),

    /// A state switch was completed while the screen was not animating.
    #[error("screen {key} has no state switch to complete (state: {state:?})")]
    NotSwitching { key: String, state: ScreenState },

    /// A layer index outside `0..layers_count`.
    #[error("layer {layer} is out of range (layers: {layers_count})")]
    LayerOutOfRange { layer: usize, layers_count: usize },

    /// Typed access asked for a concrete screen type the key is not bound to.
    #[error("screen {0} does not have the requested type")]
    KindMismatch(String),

    /// Pool reset while screens were still handed out.
    #[error("{0} screens are still taken from the pool")]
    ScreensStillTaken(usize),

    /// Settings or defined transitions failed validation.
    #[error("invalid screen settings: {0}")]
    InvalidSettings(String),

    /// Settings text could not be parsed.
    #[error("failed to parse screen settings: {0}")]
    SettingsParse(#[from] toml::de::Error),
}

/// Result alias used across the crate.
pub type ScreenResult<T> = Result<T, ScreenError>;

//=========================================================================
// Tests
//=========================================================================
