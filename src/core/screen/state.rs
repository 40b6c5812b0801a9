//=========================================================================
// Screen State
//=========================================================================
//
// Seven-state lifecycle of a single screen.
//
//   Closed ─► Opening ─► Opened ─► Hiding ─► Hidden
//     ▲                    ▲ │                 │
//     │                    │ ▼                 ▼
//     └──── Closing ◄──────┘ └─◄── Showing ◄───┘
//
// Opened, Hidden and Closed are quiescent. The other four are animated
// and always settle into a quiescent state.
//
//=========================================================================

//=== ScreenState =========================================================

/// Lifecycle state of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenState {
    /// Inert: not drawn, no input. Initial state and reusable idle state.
    #[default]
    Closed,
    Opening,
    Opened,
    Hiding,
    Hidden,
    Showing,
    Closing,
}

impl ScreenState {
    /// Returns `true` for the animated states.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            Self::Opening | Self::Showing | Self::Hiding | Self::Closing
        )
    }

    /// Quiescent state an animated state settles into.
    ///
    /// Returns `None` for states that are already quiescent.
    pub fn settled(self) -> Option<ScreenState> {
        match self {
            Self::Opening | Self::Showing => Some(Self::Opened),
            Self::Hiding => Some(Self::Hidden),
            Self::Closing => Some(Self::Closed),
            Self::Closed | Self::Opened | Self::Hidden => None,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
