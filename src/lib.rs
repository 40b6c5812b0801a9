//=========================================================================
// Aetheric UI - Library Root
//
// Layered screen stack and timed screen transitions for UIs driven by a
// frame loop.
//
// Responsibilities:
// - Expose the screen manager facade (`ScreenManager`)
// - Expose the core building blocks (stack, transitions, pool) for
//   applications that compose them differently
// - Keep rendering out: views are supplied through the `ScreenView` trait
//
// Typical usage:
// ```text
//     let mut screens = ScreenManagerBuilder::new(factory).build()?;
//     screens.open(Ui::MainMenu, false)?;
//
//     loop {
//         screens.update(delta_time);
//     }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the screen state machine, the stack, the transition driver,
// the pool and settings. Most applications only need the facade and the
// prelude.
//
pub mod core;
pub mod error;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------

mod manager;

//--- Public Exports ------------------------------------------------------

pub use error::{ScreenError, ScreenResult};
pub use manager::{ScreenManager, ScreenManagerBuilder};
