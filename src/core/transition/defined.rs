//=========================================================================
// Defined Transitions
//=========================================================================
//
// Transition resolution policy.
//
// Resolution order for a switch from `outgoing` to `incoming`:
//   1. No outgoing screen      → incoming's own Open/Show preference
//   2. Override for the pair   → the override
//   3. No incoming screen      → outgoing's own Hide/Close preference
//   4. Otherwise               → the better-ranked of the two preferences
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use super::{TransitionEdge, TransitionType, TransitionsOrder};
use crate::core::screen::{ScreenKey, ScreenViewSettings};
use crate::error::{ScreenError, ScreenResult};

//=== DefinedTransitionEntry ==============================================

/// One override row as it appears in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DefinedTransitionEntry<K> {
    pub from: K,
    pub to: K,
    pub edge: TransitionEdge,
    pub transition: TransitionType,
}

//=== DefinedTransitions ==================================================

/// Explicit overrides keyed by `(outgoing, incoming, edge)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinedTransitions<K: ScreenKey> {
    overrides: HashMap<(K, K, TransitionEdge), TransitionType>,
}

impl<K: ScreenKey> DefinedTransitions<K> {
    pub fn new() -> Self {
        Self {
            overrides: HashMap::new(),
        }
    }

    /// Adds or replaces an override. Chainable.
    pub fn define(
        mut self,
        from: K,
        to: K,
        edge: TransitionEdge,
        transition: TransitionType,
    ) -> Self {
        self.overrides.insert((from, to, edge), transition);
        self
    }

    /// Builds the table from configuration rows. Duplicate rows are rejected.
    pub fn from_entries<I>(entries: I) -> ScreenResult<Self>
    where
        I: IntoIterator<Item = DefinedTransitionEntry<K>>,
    {
        let mut overrides = HashMap::new();
        for entry in entries {
            let slot = (entry.from, entry.to, entry.edge);
            if overrides.insert(slot, entry.transition).is_some() {
                return Err(ScreenError::InvalidSettings(format!(
                    "transition {:?} -> {:?} ({:?}) is defined twice",
                    entry.from, entry.to, entry.edge
                )));
            }
        }
        Ok(Self { overrides })
    }

    pub fn get(&self, from: K, to: K, edge: TransitionEdge) -> Option<TransitionType> {
        self.overrides.get(&(from, to, edge)).copied()
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl<K: ScreenKey> Default for DefinedTransitions<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=== ScreensTransitionData ===============================================

/// Everything needed to pick a transition type for a screen switch.
#[derive(Debug, Clone)]
pub struct ScreensTransitionData<K: ScreenKey> {
    defined: DefinedTransitions<K>,
    order: TransitionsOrder,
}

impl<K: ScreenKey> ScreensTransitionData<K> {
    pub fn new(defined: DefinedTransitions<K>, order: TransitionsOrder) -> Self {
        Self { defined, order }
    }

    pub fn defined(&self) -> &DefinedTransitions<K> {
        &self.defined
    }

    pub fn order(&self) -> &TransitionsOrder {
        &self.order
    }

    /// Picks the transition type for a switch along `edge`.
    ///
    /// With neither screen present the switch is instant.
    pub fn resolve(
        &self,
        outgoing: Option<(K, &ScreenViewSettings)>,
        incoming: Option<(K, &ScreenViewSettings)>,
        edge: TransitionEdge,
    ) -> TransitionType {
        let Some((outgoing_key, outgoing_settings)) = outgoing else {
            return match (incoming, edge) {
                (Some((_, settings)), TransitionEdge::Open) => settings.prefer_open_transition,
                (Some((_, settings)), TransitionEdge::Close) => settings.prefer_show_transition,
                (None, _) => TransitionType::Instant,
            };
        };

        if let Some((incoming_key, _)) = incoming {
            if let Some(defined) = self.defined.get(outgoing_key, incoming_key, edge) {
                debug!(
                    "Using defined transition {:?} for {:?} -> {:?} ({:?})",
                    defined, outgoing_key, incoming_key, edge
                );
                return defined;
            }
        }

        match edge {
            TransitionEdge::Open => {
                let hide = outgoing_settings.prefer_hide_transition;
                let Some((_, incoming_settings)) = incoming else {
                    return hide;
                };
                let open = incoming_settings.prefer_open_transition;
                if self.order.rank(open) < self.order.rank(hide) {
                    open
                } else {
                    hide
                }
            }
            TransitionEdge::Close => {
                let close = outgoing_settings.prefer_close_transition;
                let Some((_, incoming_settings)) = incoming else {
                    return close;
                };
                let show = incoming_settings.prefer_show_transition;
                if self.order.rank(close) < self.order.rank(show) {
                    close
                } else {
                    show
                }
            }
        }
    }
}

impl<K: ScreenKey> Default for ScreensTransitionData<K> {
    fn default() -> Self {
        Self::new(DefinedTransitions::new(), TransitionsOrder::default())
    }
}

//=========================================================================
// Tests
//=========================================================================
