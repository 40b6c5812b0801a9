//=========================================================================
// Screen Settings
//=========================================================================
//
// Construction-time configuration of the screen manager.
//
// Settings are plain serde data so an application can embed them in its
// own TOML config or build them in code. Validation happens once, when
// the manager is built.
//
// Example:
//   layers = ["background", "windows", "popups", "hints"]
//   sorting_order_space = 10
//   non_blocking_layers = [3]
//   transition_order = ["instant", "sequential", "parallel"]
//
//   [[defined_transitions]]
//   from = "MainMenu"
//   to = "Settings"
//   edge = "open"
//   transition = "parallel"
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use crate::core::screen::ScreenKey;
use crate::core::transition::{
    DefinedTransitionEntry, DefinedTransitions, TransitionType, TransitionsOrder,
};
use crate::error::{ScreenError, ScreenResult};

//=== ScreenSettings ======================================================

/// Layer layout, sorting-order spacing, input blocking and transition ranking.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScreenSettings {
    /// Layer names, bottom → top. The count fixes the stack's layer count.
    pub layers: Vec<String>,

    /// Gap added between the sorting-order bands of neighbouring screens.
    pub sorting_order_space: i32,

    /// Layers whose screens never take exclusive input.
    pub non_blocking_layers: Vec<usize>,

    /// Transition types from most to least preferred.
    pub transition_order: Vec<TransitionType>,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            layers: vec!["main".to_string()],
            sorting_order_space: 10,
            non_blocking_layers: Vec::new(),
            transition_order: vec![
                TransitionType::Instant,
                TransitionType::Sequential,
                TransitionType::Parallel,
            ],
        }
    }
}

impl ScreenSettings {
    /// Parses and validates settings from TOML text.
    pub fn from_toml_str(text: &str) -> ScreenResult<Self> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> ScreenResult<()> {
        if self.layers.is_empty() {
            return Err(ScreenError::InvalidSettings(
                "at least one layer is required".to_string(),
            ));
        }

        if self.sorting_order_space < 0 {
            return Err(ScreenError::InvalidSettings(format!(
                "sorting order space must not be negative, got {}",
                self.sorting_order_space
            )));
        }

        if let Some(layer) = self
            .non_blocking_layers
            .iter()
            .find(|layer| **layer >= self.layers.len())
        {
            return Err(ScreenError::InvalidSettings(format!(
                "non-blocking layer {} is out of range (layers: {})",
                layer,
                self.layers.len()
            )));
        }

        let mut seen = HashSet::new();
        for transition in &self.transition_order {
            if !seen.insert(*transition) {
                return Err(ScreenError::InvalidSettings(format!(
                    "transition {:?} is ranked twice",
                    transition
                )));
            }
        }

        Ok(())
    }

    pub fn layers_count(&self) -> usize {
        self.layers.len()
    }

    /// Index of the layer called `name`.
    pub fn layer_index(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer == name)
    }

    pub fn transitions_order(&self) -> TransitionsOrder {
        TransitionsOrder::new(&self.transition_order)
    }
}

//=== ScreenConfig ========================================================

/// Settings plus the override table, as loaded from one TOML document.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "K: DeserializeOwned"))]
pub struct ScreenConfig<K> {
    #[serde(flatten)]
    pub settings: ScreenSettings,

    #[serde(default)]
    pub defined_transitions: Vec<DefinedTransitionEntry<K>>,
}

impl<K: ScreenKey + DeserializeOwned> ScreenConfig<K> {
    pub fn from_toml_str(text: &str) -> ScreenResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.settings.validate()?;
        debug!(
            "Loaded screen config: {} layers, {} defined transitions",
            config.settings.layers_count(),
            config.defined_transitions.len()
        );
        Ok(config)
    }

    /// Splits into validated settings and the override table.
    pub fn into_parts(self) -> ScreenResult<(ScreenSettings, DefinedTransitions<K>)> {
        let defined = DefinedTransitions::from_entries(self.defined_transitions)?;
        Ok((self.settings, defined))
    }
}

//=========================================================================
// Tests
//=========================================================================
