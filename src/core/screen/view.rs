//=========================================================================
// Screen View
//=========================================================================
//
// Capability set the renderer provides for one screen.
//
// The stack and the state machine never draw anything themselves. They
// read durations, transparency and order width from the view, and push
// back three imperative flags: active (drawn or not), input enabled and
// sorting order. Progress setters receive normalized animation time.
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::order_shift::OrderWidth;
use crate::core::transition::TransitionType;

//=== ScreenViewSettings ==================================================

/// Static per-view configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenViewSettings {
    /// Screens below a transparent screen stay visible.
    pub transparent: bool,

    /// Layer the screen is pushed to.
    pub default_layer: usize,

    pub prefer_open_transition: TransitionType,
    pub prefer_show_transition: TransitionType,
    pub prefer_hide_transition: TransitionType,
    pub prefer_close_transition: TransitionType,

    /// Extra sorting-order room reserved above the screen.
    pub spare_up_width: i32,

    /// Extra sorting-order room reserved below the screen.
    pub spare_down_width: i32,
}

impl ScreenViewSettings {
    /// Settings for an opaque screen on `layer` with instant transitions.
    pub fn on_layer(layer: usize) -> Self {
        Self {
            default_layer: layer,
            ..Self::default()
        }
    }

    /// Marks the screen as transparent.
    pub fn transparent(mut self) -> Self {
        self.transparent = true;
        self
    }

    /// Uses `transition` for all four lifecycle edges.
    pub fn with_transitions(mut self, transition: TransitionType) -> Self {
        self.prefer_open_transition = transition;
        self.prefer_show_transition = transition;
        self.prefer_hide_transition = transition;
        self.prefer_close_transition = transition;
        self
    }
}

//=== ScreenView Trait ====================================================

/// Render-side collaborator of a screen.
///
/// Only the settings and the three setters are required. Durations default
/// to zero, which makes every state change instant.
pub trait ScreenView {
    fn settings(&self) -> &ScreenViewSettings;

    /// Enables or disables drawing of the whole screen.
    fn set_active(&mut self, active: bool);

    /// Enables or disables pointer input for the screen.
    fn set_input_enabled(&mut self, enabled: bool);

    fn set_sorting_order(&mut self, order: i32);

    fn open_duration(&self) -> f32 {
        0.0
    }

    fn show_duration(&self) -> f32 {
        0.0
    }

    fn hide_duration(&self) -> f32 {
        0.0
    }

    fn close_duration(&self) -> f32 {
        0.0
    }

    /// Sorting-order room needed by child elements.
    ///
    /// Defaults to the spare widths from the settings. Views with
    /// [`OrderShift`](super::OrderShift) children should fold them in via
    /// [`OrderWidth::from_shifts`].
    fn order_width(&self) -> OrderWidth {
        let settings = self.settings();
        OrderWidth::new(settings.spare_up_width, settings.spare_down_width)
    }

    fn set_opening_progress(&mut self, _normalized_time: f32) {}

    fn set_showing_progress(&mut self, _normalized_time: f32) {}

    fn set_hiding_progress(&mut self, _normalized_time: f32) {}

    fn set_closing_progress(&mut self, _normalized_time: f32) {}

    /// Per-frame view update, called only while the screen is visible.
    fn update_view(&mut self, _delta_time: f32) {}

    /// Releases render resources when the pool is torn down.
    fn destroy(&mut self) {}
}

//=========================================================================
// Tests
//=========================================================================
