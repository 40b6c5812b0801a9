//=========================================================================
// Transition
//=========================================================================
//
// Pairs the outgoing and incoming switch handlers of one screen switch
// and schedules them according to the transition type.
//
//   Parallel:   outgoing + incoming every tick
//   Sequential: incoming until done, then outgoing
//   Instant:    both forced on the first tick
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{ScreenSwitchStateHandler, TransitionType};
use crate::core::screen::{ScreenKey, ScreenRegistry};

//=== Transition ==========================================================

/// One in-flight screen switch.
///
/// `C` is the completion token handed back exactly once when both
/// handlers are done.
#[derive(Debug)]
pub struct Transition<K: ScreenKey, C> {
    transition_type: TransitionType,
    outgoing: ScreenSwitchStateHandler<K>,
    incoming: ScreenSwitchStateHandler<K>,
    callback: Option<C>,
}

impl<K: ScreenKey, C> Transition<K, C> {
    pub fn new(
        transition_type: TransitionType,
        outgoing: ScreenSwitchStateHandler<K>,
        incoming: ScreenSwitchStateHandler<K>,
        callback: Option<C>,
    ) -> Self {
        Self {
            transition_type,
            outgoing,
            incoming,
            callback,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn in_progress(&self) -> bool {
        self.outgoing.in_progress() || self.incoming.in_progress()
    }

    pub fn transition_type(&self) -> TransitionType {
        self.transition_type
    }

    pub fn outgoing(&self) -> &ScreenSwitchStateHandler<K> {
        &self.outgoing
    }

    pub fn incoming(&self) -> &ScreenSwitchStateHandler<K> {
        &self.incoming
    }

    //--- Update -----------------------------------------------------------

    /// Advances the scheduled handlers.
    ///
    /// Returns the completion token on the call where the transition is
    /// found finished; `None` before that and on every later call.
    pub fn update<R>(&mut self, delta_time: f32, screens: &mut R) -> Option<C>
    where
        R: ScreenRegistry<K> + ?Sized,
    {
        if self.in_progress() {
            match self.transition_type {
                TransitionType::Parallel => {
                    self.outgoing.update(delta_time, screens);
                    self.incoming.update(delta_time, screens);
                }
                TransitionType::Sequential => {
                    if self.incoming.in_progress() {
                        self.incoming.update(delta_time, screens);
                    } else {
                        self.outgoing.update(delta_time, screens);
                    }
                }
                TransitionType::Instant => {
                    self.outgoing.force_complete(screens);
                    self.incoming.force_complete(screens);
                }
            }
        }

        if self.in_progress() {
            None
        } else {
            self.callback.take()
        }
    }

    /// Settles both screens immediately and returns the completion token.
    pub fn force_complete<R>(&mut self, screens: &mut R) -> Option<C>
    where
        R: ScreenRegistry<K> + ?Sized,
    {
        self.outgoing.force_complete(screens);
        self.incoming.force_complete(screens);
        self.callback.take()
    }

    /// Takes the completion token if the transition is finished.
    pub fn take_callback(&mut self) -> Option<C> {
        if self.in_progress() {
            None
        } else {
            self.callback.take()
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::screen::ScreenState;
    use crate::core::screen::BaseScreen;
    use crate::core::test_support::{registry, Probe, TestKey};

    fn opened(probe: &Probe, key: TestKey, duration: f32) -> BaseScreen<TestKey> {
        let mut screen = probe.base_screen(key, 0, duration);
        screen.open(true);
        screen
    }

    #[test]
    fn parallel_updates_both_handlers() {
        let out_probe = Probe::default();
        let in_probe = Probe::default();
        let mut screens = registry(vec![
            opened(&out_probe, TestKey::A, 1.0),
            in_probe.base_screen(TestKey::B, 0, 1.0),
        ]);
        let outgoing = screens.get_mut(&TestKey::A).unwrap().hide(false);
        let incoming = screens.get_mut(&TestKey::B).unwrap().open(false);
        let mut transition =
            Transition::new(TransitionType::Parallel, outgoing, incoming, Some("done"));

        assert_eq!(transition.update(0.5, &mut screens), None);
        assert_eq!(out_probe.view().progress, vec![("hiding", 0.5)]);
        assert_eq!(in_probe.view().progress, vec![("opening", 0.5)]);

        assert_eq!(transition.update(0.5, &mut screens), Some("done"));
        assert_eq!(screens[&TestKey::A].state(), ScreenState::Hidden);
        assert_eq!(screens[&TestKey::B].state(), ScreenState::Opened);

        assert_eq!(transition.update(0.5, &mut screens), None);
    }

    #[test]
    fn sequential_runs_incoming_before_outgoing() {
        let out_probe = Probe::default();
        let in_probe = Probe::default();
        let mut screens = registry(vec![
            opened(&out_probe, TestKey::A, 1.0),
            in_probe.base_screen(TestKey::B, 0, 1.0),
        ]);
        let outgoing = screens.get_mut(&TestKey::A).unwrap().hide(false);
        let incoming = screens.get_mut(&TestKey::B).unwrap().open(false);
        let mut transition =
            Transition::new(TransitionType::Sequential, outgoing, incoming, Some(7));

        transition.update(0.5, &mut screens);
        transition.update(0.5, &mut screens);

        assert_eq!(screens[&TestKey::B].state(), ScreenState::Opened);
        assert_eq!(screens[&TestKey::A].state(), ScreenState::Hiding);
        assert!(out_probe.view().progress.is_empty());

        assert_eq!(transition.update(0.5, &mut screens), None);
        assert_eq!(out_probe.view().progress, vec![("hiding", 0.5)]);

        assert_eq!(transition.update(0.5, &mut screens), Some(7));
        assert_eq!(screens[&TestKey::A].state(), ScreenState::Hidden);
    }

    #[test]
    fn force_complete_settles_both_and_yields_callback() {
        let mut screens = registry(vec![
            opened(&Probe::default(), TestKey::A, 1.0),
            Probe::default().base_screen(TestKey::B, 0, 1.0),
        ]);
        let outgoing = screens.get_mut(&TestKey::A).unwrap().hide(false);
        let incoming = screens.get_mut(&TestKey::B).unwrap().open(false);
        let mut transition =
            Transition::new(TransitionType::Sequential, outgoing, incoming, Some(()));

        assert_eq!(transition.force_complete(&mut screens), Some(()));
        assert!(!transition.in_progress());
        assert_eq!(screens[&TestKey::A].state(), ScreenState::Hidden);
        assert_eq!(screens[&TestKey::B].state(), ScreenState::Opened);
        assert_eq!(transition.force_complete(&mut screens), None);
    }

    #[test]
    fn instant_handlers_are_finished_on_creation() {
        let mut transition: Transition<TestKey, u8> = Transition::new(
            TransitionType::Instant,
            ScreenSwitchStateHandler::none(),
            ScreenSwitchStateHandler::none(),
            Some(1),
        );

        assert!(!transition.in_progress());
        assert_eq!(transition.take_callback(), Some(1));
        assert_eq!(transition.take_callback(), None);
    }
}
