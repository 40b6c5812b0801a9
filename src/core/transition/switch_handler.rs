//=========================================================================
// Screen Switch State Handler
//=========================================================================
//
// Timer for one animated state of one screen (e.g. Opening → Opened).
//
// The handler only references the screen by key. Each update resolves the
// key through a ScreenRegistry, forwards normalized progress and settles
// the screen once the duration has elapsed.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::screen::{ScreenKey, ScreenRegistry, ScreenState};

//=== ScreenSwitchStateHandler ============================================

/// Drives one screen through one animated state.
///
/// A handler created by [`ScreenSwitchStateHandler::none`] stands in for an
/// instant switch: it is never in progress and touches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSwitchStateHandler<K: ScreenKey> {
    screen: Option<K>,
    duration: f32,
    state: ScreenState,
    timer: f32,
    completed: bool,
}

impl<K: ScreenKey> ScreenSwitchStateHandler<K> {
    //--- Construction -----------------------------------------------------

    /// Handler animating `screen` through the transient `state`.
    pub fn new(screen: K, duration: f32, state: ScreenState) -> Self {
        Self {
            screen: Some(screen),
            duration,
            state,
            timer: 0.0,
            completed: false,
        }
    }

    /// Already-completed handler for switches that happened instantly.
    pub fn none() -> Self {
        Self {
            screen: None,
            duration: 0.0,
            state: ScreenState::Closed,
            timer: 0.0,
            completed: true,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn in_progress(&self) -> bool {
        !self.completed && self.timer < self.duration
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn screen(&self) -> Option<K> {
        self.screen
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Animated state this handler owns.
    pub fn state(&self) -> ScreenState {
        self.state
    }

    /// Normalized progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.completed || self.duration <= 0.0 {
            1.0
        } else {
            (self.timer / self.duration).clamp(0.0, 1.0)
        }
    }

    //--- Update -----------------------------------------------------------

    /// Advances the timer and pushes progress to the screen.
    ///
    /// Settles the screen on the tick the duration is reached. A handler
    /// that is no longer in progress but never completed is forced.
    pub fn update<R>(&mut self, delta_time: f32, screens: &mut R)
    where
        R: ScreenRegistry<K> + ?Sized,
    {
        if !self.in_progress() {
            if !self.completed {
                self.force_complete(screens);
            }
            return;
        }

        let Some(key) = self.screen else {
            self.completed = true;
            return;
        };

        self.timer += delta_time.max(0.0);
        let progress = (self.timer / self.duration).clamp(0.0, 1.0);

        match screens.screen_mut(key) {
            Some(screen) if screen.state() == self.state => {
                screen.set_switch_state_progress(progress);

                if self.timer >= self.duration {
                    self.completed = true;
                    if let Err(err) = screen.complete_switch_state() {
                        warn!("Switch handler for {:?} could not settle: {}", key, err);
                    }
                }
            }
            Some(screen) => {
                debug!(
                    "Screen {:?} left {:?} (now {:?}), dropping its switch handler",
                    key,
                    self.state,
                    screen.state()
                );
                self.finish();
            }
            None => {
                warn!("Screen {:?} is not registered, dropping its switch handler", key);
                self.finish();
            }
        }
    }

    /// Jumps to the end: progress 1.0 and the screen settles.
    ///
    /// Idempotent. A screen that already left the owned state is left alone.
    pub fn force_complete<R>(&mut self, screens: &mut R)
    where
        R: ScreenRegistry<K> + ?Sized,
    {
        if self.completed {
            return;
        }
        self.finish();

        let Some(key) = self.screen else {
            return;
        };

        match screens.screen_mut(key) {
            Some(screen) if screen.state() == self.state => {
                screen.set_switch_state_progress(1.0);
                if let Err(err) = screen.complete_switch_state() {
                    warn!("Switch handler for {:?} could not settle: {}", key, err);
                }
            }
            Some(_) => debug!("Screen {:?} already left {:?}", key, self.state),
            None => warn!("Screen {:?} is not registered, nothing to complete", key),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn finish(&mut self) {
        self.completed = true;
        self.timer = self.timer.max(self.duration);
    }
}

impl<K: ScreenKey> Default for ScreenSwitchStateHandler<K> {
    fn default() -> Self {
        Self::none()
    }
}

//=========================================================================
// Tests
//=========================================================================
