//=========================================================================
// Screens Transition
//=========================================================================
//
// Owns the single in-flight Transition.
//
// Starting a new transition force-completes the current one first, so
// two switches never overlap. There is no queue: the newest request
// always wins immediately.
//
// Completion tokens of finished transitions are collected here and taken
// by the owner with drain_completed() after each call.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::{ScreensTransitionData, Transition, TransitionEdge, TransitionType};
use crate::core::screen::{ScreenKey, ScreenRegistry, ScreenState};
use crate::error::{ScreenError, ScreenResult};

//=== ScreensTransition ===================================================

/// Serializes screen switches; at most one transition is in flight.
pub struct ScreensTransition<K: ScreenKey, C> {
    data: ScreensTransitionData<K>,
    current: Option<Transition<K, C>>,
    completed: Vec<C>,
}

impl<K: ScreenKey, C> ScreensTransition<K, C> {
    pub fn new(data: ScreensTransitionData<K>) -> Self {
        Self {
            data,
            current: None,
            completed: Vec::new(),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn in_progress(&self) -> bool {
        self.current.as_ref().is_some_and(Transition::in_progress)
    }

    pub fn current(&self) -> Option<&Transition<K, C>> {
        self.current.as_ref()
    }

    pub fn data(&self) -> &ScreensTransitionData<K> {
        &self.data
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the in-flight transition.
    pub fn update<R>(&mut self, delta_time: f32, screens: &mut R)
    where
        R: ScreenRegistry<K> + ?Sized,
    {
        let Some(transition) = self.current.as_mut() else {
            return;
        };

        if let Some(callback) = transition.update(delta_time, screens) {
            self.completed.push(callback);
        }

        if !transition.in_progress() {
            self.current = None;
        }
    }

    /// Takes the completion tokens collected so far.
    pub fn drain_completed(&mut self) -> Vec<C> {
        std::mem::take(&mut self.completed)
    }

    //--- Starting Transitions ---------------------------------------------

    /// Hides `outgoing` (if it is `Opened`) and opens `incoming`.
    pub fn start_open_transition<R>(
        &mut self,
        outgoing: Option<K>,
        incoming: K,
        instant: bool,
        on_complete: Option<C>,
        screens: &mut R,
    ) -> ScreenResult<()>
    where
        R: ScreenRegistry<K> + ?Sized,
    {
        self.try_force_complete(screens);

        if screens.screen(incoming).is_none() {
            return Err(ScreenError::UnknownScreen(format!("{:?}", incoming)));
        }

        let transition_type = if instant {
            TransitionType::Instant
        } else {
            self.resolve(outgoing, Some(incoming), TransitionEdge::Open, screens)
        };
        let instant = transition_type == TransitionType::Instant;
        debug!(
            "Open transition {:?} -> {:?} ({:?})",
            outgoing, incoming, transition_type
        );

        let incoming_handler = screens
            .screen_mut(incoming)
            .map(|screen| screen.open(instant))
            .unwrap_or_default();

        let outgoing_handler = outgoing
            .and_then(|key| screens.screen_mut(key))
            .filter(|screen| screen.state() == ScreenState::Opened)
            .map(|screen| screen.hide(instant))
            .unwrap_or_default();

        self.begin(Transition::new(
            transition_type,
            outgoing_handler,
            incoming_handler,
            on_complete,
        ));
        Ok(())
    }

    /// Closes `outgoing` and shows `incoming` (if it is `Hidden`).
    pub fn start_close_transition<R>(
        &mut self,
        outgoing: K,
        incoming: Option<K>,
        instant: bool,
        on_complete: Option<C>,
        screens: &mut R,
    ) -> ScreenResult<()>
    where
        R: ScreenRegistry<K> + ?Sized,
    {
        self.try_force_complete(screens);

        if screens.screen(outgoing).is_none() {
            return Err(ScreenError::UnknownScreen(format!("{:?}", outgoing)));
        }

        let transition_type = if instant {
            TransitionType::Instant
        } else {
            self.resolve(Some(outgoing), incoming, TransitionEdge::Close, screens)
        };
        let instant = transition_type == TransitionType::Instant;
        debug!(
            "Close transition {:?} -> {:?} ({:?})",
            outgoing, incoming, transition_type
        );

        let outgoing_handler = screens
            .screen_mut(outgoing)
            .map(|screen| screen.close(instant))
            .unwrap_or_default();

        let incoming_handler = incoming
            .and_then(|key| screens.screen_mut(key))
            .filter(|screen| screen.state() == ScreenState::Hidden)
            .map(|screen| screen.show(instant))
            .unwrap_or_default();

        self.begin(Transition::new(
            transition_type,
            outgoing_handler,
            incoming_handler,
            on_complete,
        ));
        Ok(())
    }

    /// Settles the in-flight transition, if any.
    pub fn try_force_complete<R>(&mut self, screens: &mut R)
    where
        R: ScreenRegistry<K> + ?Sized,
    {
        if let Some(mut transition) = self.current.take() {
            debug!("Force-completing {:?} transition", transition.transition_type());
            if let Some(callback) = transition.force_complete(screens) {
                self.completed.push(callback);
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn begin(&mut self, mut transition: Transition<K, C>) {
        if transition.in_progress() {
            self.current = Some(transition);
        } else if let Some(callback) = transition.take_callback() {
            self.completed.push(callback);
        }
    }

    fn resolve<R>(
        &self,
        outgoing: Option<K>,
        incoming: Option<K>,
        edge: TransitionEdge,
        screens: &R,
    ) -> TransitionType
    where
        R: ScreenRegistry<K> + ?Sized,
    {
        let outgoing = outgoing.and_then(|key| screens.screen(key).map(|s| (key, s.settings())));
        let incoming = incoming.and_then(|key| screens.screen(key).map(|s| (key, s.settings())));
        self.data.resolve(outgoing, incoming, edge)
    }
}

//=========================================================================
// Tests
//=========================================================================
