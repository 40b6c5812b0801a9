//=========================================================================
// Transition System
//=========================================================================
//
// Timed screen switches.
//
// Architecture:
//   ScreensTransition<K, C>
//     ├─ data: ScreensTransitionData<K>   (overrides + ranking)
//     ├─ current: Option<Transition>      (at most one in flight)
//     │    ├─ outgoing: ScreenSwitchStateHandler
//     │    └─ incoming: ScreenSwitchStateHandler
//     └─ completed: Vec<C>                (tokens awaiting drain)
//
//=========================================================================

//=== Module Declarations =================================================

mod defined;
mod screens_transition;
mod switch_handler;
#[allow(clippy::module_inception)]
mod transition;
mod transition_type;

//=== Public API ==========================================================

pub use defined::{DefinedTransitionEntry, DefinedTransitions, ScreensTransitionData};
pub use screens_transition::ScreensTransition;
pub use switch_handler::ScreenSwitchStateHandler;
pub use transition::Transition;
pub use transition_type::{TransitionEdge, TransitionType, TransitionsOrder};
