//=========================================================================
// Transition Types
//=========================================================================
//
// Static policy data: transition styles, the edge a switch runs along,
// and the configured ranking used to break preference conflicts.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

//=== TransitionType ======================================================

/// How the outgoing and incoming screen animations are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionType {
    /// No animation; every state change commits synchronously.
    #[default]
    Instant,

    /// Both screens animate on the same ticks.
    Parallel,

    /// The incoming screen animates first, then the outgoing one.
    Sequential,
}

//=== TransitionEdge ======================================================

/// Direction of a screen switch.
///
/// `Open` pairs an outgoing Hide with an incoming Open; `Close` pairs an
/// outgoing Close with an incoming Show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionEdge {
    Open,
    Close,
}

//=== TransitionsOrder ====================================================

/// Total order over transition types built from a ranking list.
///
/// Earlier entries are preferred. Types missing from the list rank after
/// every listed type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionsOrder {
    ranks: HashMap<TransitionType, usize>,
}

impl TransitionsOrder {
    /// Builds the ranking from an ordered list. Duplicates keep their first rank.
    pub fn new(order: &[TransitionType]) -> Self {
        let mut ranks = HashMap::with_capacity(order.len());
        for (rank, transition) in order.iter().enumerate() {
            ranks.entry(*transition).or_insert(rank);
        }
        Self { ranks }
    }

    /// Rank of a transition type; lower is preferred.
    pub fn rank(&self, transition: TransitionType) -> usize {
        self.ranks.get(&transition).copied().unwrap_or(usize::MAX)
    }
}

impl Default for TransitionsOrder {
    fn default() -> Self {
        Self::new(&[
            TransitionType::Instant,
            TransitionType::Sequential,
            TransitionType::Parallel,
        ])
    }
}

//=========================================================================
// Tests
//=========================================================================
