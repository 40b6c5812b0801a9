//=========================================================================
// Base Screen
//=========================================================================
//
// Per-screen state machine.
//
// `open`/`show`/`hide`/`close` either settle the screen immediately
// (instant or zero duration) or move it into the matching animated state
// and hand back a ScreenSwitchStateHandler that drives it to completion.
//
// Draw and input flags are derived, not stored on the view directly:
//   active = in_view && state != Closed
//   input  = input_granted && in_view && state == Opened
// `in_view` and `input_granted` are owned by the ScreenStack.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::debug;

//=== Internal Dependencies ===============================================

use super::{
    OrderWidth, Screen, ScreenComponent, ScreenKey, ScreenState, ScreenView, ScreenViewSettings,
};
use crate::core::transition::ScreenSwitchStateHandler;
use crate::error::{ScreenError, ScreenResult};

//=== ScreenStateChanged ==================================================

/// Notification sent after every effective state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenStateChanged<K: ScreenKey> {
    pub key: K,
    pub previous: ScreenState,
    pub current: ScreenState,
}

/// Senders shared by every screen of one pool. A disconnected sender
/// found by any screen is dropped for all of them.
pub(crate) type SharedObservers<K> = Rc<RefCell<Vec<Sender<ScreenStateChanged<K>>>>>;

//=== BaseScreen ==========================================================

/// A screen instance: identity, lifecycle state, logic and view.
pub struct BaseScreen<K: ScreenKey> {
    key: K,
    state: ScreenState,
    screen: Box<dyn Screen>,
    view: Box<dyn ScreenView>,
    components: Vec<Box<dyn ScreenComponent>>,

    //--- Stack-owned flags ------------------------------------------------
    in_view: bool,
    input_granted: bool,

    observers: Vec<Sender<ScreenStateChanged<K>>>,
    shared: Option<SharedObservers<K>>,
}

impl<K: ScreenKey> BaseScreen<K> {
    //--- Construction -----------------------------------------------------

    /// Wraps a screen and its view. The screen starts `Closed` and inactive.
    pub fn new(key: K, screen: Box<dyn Screen>, view: Box<dyn ScreenView>) -> Self {
        let mut base = Self {
            key,
            state: ScreenState::Closed,
            screen,
            view,
            components: Vec::new(),
            in_view: true,
            input_granted: true,
            observers: Vec::new(),
            shared: None,
        };
        base.refresh_view();
        base
    }

    /// Attaches components, initializing all of them before readying any.
    pub fn with_components(mut self, components: Vec<Box<dyn ScreenComponent>>) -> Self {
        for mut component in components {
            component.on_initialized(self.screen.as_mut());
            self.components.push(component);
        }
        for component in &mut self.components {
            component.on_ready();
        }
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn key(&self) -> K {
        self.key
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn screen(&self) -> &dyn Screen {
        self.screen.as_ref()
    }

    pub fn screen_mut(&mut self) -> &mut dyn Screen {
        self.screen.as_mut()
    }

    pub fn view(&self) -> &dyn ScreenView {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> &mut dyn ScreenView {
        self.view.as_mut()
    }

    pub fn settings(&self) -> &ScreenViewSettings {
        self.view.settings()
    }

    pub fn is_transparent(&self) -> bool {
        self.view.settings().transparent
    }

    pub fn default_layer(&self) -> usize {
        self.view.settings().default_layer
    }

    pub fn order_width(&self) -> OrderWidth {
        self.view.order_width()
    }

    /// Whether the view is currently drawn.
    pub fn is_active(&self) -> bool {
        self.in_view && self.state != ScreenState::Closed
    }

    /// Whether the view currently receives input.
    pub fn is_input_enabled(&self) -> bool {
        self.input_granted && self.in_view && self.state == ScreenState::Opened
    }

    //--- Observers --------------------------------------------------------

    /// Returns a receiver for this screen's state changes.
    pub fn subscribe(&mut self) -> Receiver<ScreenStateChanged<K>> {
        let (sender, receiver) = unbounded();
        self.observers.push(sender);
        receiver
    }

    /// Attaches an existing sender, e.g. a manager-wide feed.
    pub fn attach_observer(&mut self, sender: Sender<ScreenStateChanged<K>>) {
        self.observers.push(sender);
    }

    pub(crate) fn share_observers(&mut self, shared: SharedObservers<K>) {
        self.shared = Some(shared);
    }

    //--- Lifecycle --------------------------------------------------------

    /// Starts opening. Settles on `Opened` at once if instant or the open duration is not positive.
    pub fn open(&mut self, instant: bool) -> ScreenSwitchStateHandler<K> {
        let duration = self.view.open_duration();
        if instant || duration <= 0.0 {
            self.set_state(ScreenState::Opened);
            self.screen.on_open();
            return ScreenSwitchStateHandler::none();
        }

        self.set_state(ScreenState::Opening);
        self.screen.on_opening();
        ScreenSwitchStateHandler::new(self.key, duration, ScreenState::Opening)
    }

    /// Starts showing a hidden screen. Settles on `Opened`.
    pub fn show(&mut self, instant: bool) -> ScreenSwitchStateHandler<K> {
        let duration = self.view.show_duration();
        if instant || duration <= 0.0 {
            self.set_state(ScreenState::Opened);
            self.screen.on_show();
            return ScreenSwitchStateHandler::none();
        }

        self.set_state(ScreenState::Showing);
        self.screen.on_showing();
        ScreenSwitchStateHandler::new(self.key, duration, ScreenState::Showing)
    }

    /// Starts hiding. Settles on `Hidden`; input stays disabled afterwards.
    pub fn hide(&mut self, instant: bool) -> ScreenSwitchStateHandler<K> {
        let duration = self.view.hide_duration();
        if instant || duration <= 0.0 {
            self.set_state(ScreenState::Hidden);
            self.screen.on_hide();
            return ScreenSwitchStateHandler::none();
        }

        self.set_state(ScreenState::Hiding);
        self.screen.on_hiding();
        ScreenSwitchStateHandler::new(self.key, duration, ScreenState::Hiding)
    }

    /// Starts closing. Settles on `Closed`, which deactivates the view.
    pub fn close(&mut self, instant: bool) -> ScreenSwitchStateHandler<K> {
        let duration = self.view.close_duration();
        if instant || duration <= 0.0 {
            self.set_state(ScreenState::Closed);
            self.screen.on_close();
            return ScreenSwitchStateHandler::none();
        }

        self.set_state(ScreenState::Closing);
        self.screen.on_closing();
        ScreenSwitchStateHandler::new(self.key, duration, ScreenState::Closing)
    }

    /// Forwards normalized animation time to the view's progress setter.
    ///
    /// Ignored outside the animated states.
    pub fn set_switch_state_progress(&mut self, normalized_time: f32) {
        match self.state {
            ScreenState::Opening => self.view.set_opening_progress(normalized_time),
            ScreenState::Showing => self.view.set_showing_progress(normalized_time),
            ScreenState::Hiding => self.view.set_hiding_progress(normalized_time),
            ScreenState::Closing => self.view.set_closing_progress(normalized_time),
            ScreenState::Closed | ScreenState::Opened | ScreenState::Hidden => {}
        }
    }

    /// Settles an animated state and fires the matching completion hook.
    ///
    /// Fails if the screen is not in an animated state.
    pub fn complete_switch_state(&mut self) -> ScreenResult<()> {
        match self.state {
            ScreenState::Opening => {
                self.set_state(ScreenState::Opened);
                self.screen.on_open();
            }
            ScreenState::Showing => {
                self.set_state(ScreenState::Opened);
                self.screen.on_show();
            }
            ScreenState::Hiding => {
                self.set_state(ScreenState::Hidden);
                self.screen.on_hide();
            }
            ScreenState::Closing => {
                self.set_state(ScreenState::Closed);
                self.screen.on_close();
            }
            state @ (ScreenState::Closed | ScreenState::Opened | ScreenState::Hidden) => {
                return Err(ScreenError::NotSwitching {
                    key: format!("{:?}", self.key),
                    state,
                });
            }
        }
        Ok(())
    }

    //--- Frame Update -----------------------------------------------------

    pub(crate) fn update(&mut self, delta_time: f32) {
        self.screen.on_update(delta_time);
        self.view.update_view(delta_time);
        for component in &mut self.components {
            component.on_update(delta_time);
        }
    }

    //--- Stack Hooks ------------------------------------------------------

    pub(crate) fn set_in_view(&mut self, in_view: bool) {
        self.in_view = in_view;
        self.refresh_view();
    }

    pub(crate) fn set_input_granted(&mut self, granted: bool) {
        self.input_granted = granted;
        self.refresh_view();
    }

    pub(crate) fn set_sorting_order(&mut self, order: i32) {
        self.view.set_sorting_order(order);
    }

    /// Final teardown when the pool drops the screen.
    pub(crate) fn utilize(&mut self) {
        self.screen.on_utilize();
        for component in &mut self.components {
            component.on_clean_up();
        }
        self.components.clear();
        self.view.destroy();
        self.observers.clear();
        self.shared = None;
    }

    //--- Internal Helpers -------------------------------------------------

    fn set_state(&mut self, state: ScreenState) {
        if state == self.state {
            return;
        }

        let previous = self.state;
        self.state = state;
        debug!("Screen {:?}: {:?} -> {:?}", self.key, previous, state);

        self.refresh_view();

        let change = ScreenStateChanged {
            key: self.key,
            previous,
            current: state,
        };
        self.observers.retain(|observer| observer.send(change).is_ok());
        if let Some(shared) = &self.shared {
            shared
                .borrow_mut()
                .retain(|observer| observer.send(change).is_ok());
        }
    }

    fn refresh_view(&mut self) {
        let active = self.is_active();
        let input = self.is_input_enabled();
        self.view.set_active(active);
        self.view.set_input_enabled(input);
    }
}

//=========================================================================
// Tests
//=========================================================================
