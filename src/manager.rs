//=========================================================================
// Screen Manager
//=========================================================================
//
// Facade composing the pool, the stack and the transition driver into
// open/close operations and a per-frame update.
//
// Architecture:
// ```text
//     ScreenManagerBuilder ──build()──> ScreenManager
//         │                               ├─ pool: ScreenPool        (instances)
//         ├─ with_settings()              ├─ stack: ScreenStack      (keys per layer)
//         ├─ with_layers()                └─ transition: ScreensTransition
//         └─ with_defined_transitions()
// ```
//
// Every open/close first flushes the in-flight transition, so a screen
// whose close animation was cut short is detached before the new request
// runs.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::pool::{ScreenFactory, ScreenPool};
use crate::core::screen::{
    BaseScreen, Screen, ScreenData, ScreenKey, ScreenRegistry, ScreenState, ScreenStateChanged,
};
use crate::core::settings::ScreenSettings;
use crate::core::stack::ScreenStack;
use crate::core::transition::{DefinedTransitions, ScreensTransition, ScreensTransitionData};
use crate::error::{ScreenError, ScreenResult};

//=== ScreenManagerBuilder ================================================

/// Builder for configuring and constructing a [`ScreenManager`].
///
/// # Default Values
///
/// - **Layers**: one layer named `main`
/// - **Sorting order space**: 10
/// - **Transition order**: Instant, Sequential, Parallel
///
/// # Examples
///
/// ```no_run
/// use std::any::Any;
/// use aetheric_ui::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Ui { MainMenu, Settings }
/// impl ScreenKey for Ui {}
///
/// struct Menu;
/// impl Screen for Menu {
///     fn as_any(&self) -> &dyn Any { self }
///     fn as_any_mut(&mut self) -> &mut dyn Any { self }
/// }
///
/// struct MenuView(ScreenViewSettings);
/// impl ScreenView for MenuView {
///     fn settings(&self) -> &ScreenViewSettings { &self.0 }
///     fn set_active(&mut self, _active: bool) {}
///     fn set_input_enabled(&mut self, _enabled: bool) {}
///     fn set_sorting_order(&mut self, _order: i32) {}
/// }
///
/// let mut screens = ScreenManagerBuilder::new(|_key: Ui| -> ScreenResult<ScreenParts> {
///     Ok(ScreenParts::new(Menu, MenuView(ScreenViewSettings::on_layer(0))))
/// })
/// .with_layers(["windows", "popups"])
/// .build()
/// .unwrap();
///
/// screens.open(Ui::MainMenu, false).unwrap();
/// screens.update(1.0 / 60.0);
/// ```
pub struct ScreenManagerBuilder<K: ScreenKey> {
    pool: ScreenPool<K>,
    settings: ScreenSettings,
    defined: DefinedTransitions<K>,
}

impl<K: ScreenKey> ScreenManagerBuilder<K> {
    /// Creates a builder around the factory that produces screen instances.
    pub fn new(factory: impl ScreenFactory<K> + 'static) -> Self {
        Self {
            pool: ScreenPool::new(factory),
            settings: ScreenSettings::default(),
            defined: DefinedTransitions::new(),
        }
    }

    /// Replaces all settings at once, e.g. with ones loaded from TOML.
    pub fn with_settings(mut self, settings: ScreenSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the layer names, bottom → top.
    ///
    /// # Panics
    ///
    /// Panics if no layer is given.
    pub fn with_layers<I, S>(mut self, layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let layers: Vec<String> = layers.into_iter().map(Into::into).collect();
        assert!(!layers.is_empty(), "At least one layer is required");
        self.settings.layers = layers;
        self
    }

    /// Sets the gap between neighbouring sorting-order bands.
    ///
    /// Default: 10
    ///
    /// # Panics
    ///
    /// Panics if `space < 0`.
    pub fn with_sorting_order_space(mut self, space: i32) -> Self {
        assert!(space >= 0, "Sorting order space must not be negative, got {}", space);
        self.settings.sorting_order_space = space;
        self
    }

    /// Marks layers whose screens never take exclusive input.
    pub fn with_non_blocking_layers(mut self, layers: &[usize]) -> Self {
        self.settings.non_blocking_layers = layers.to_vec();
        self
    }

    pub fn with_defined_transitions(mut self, defined: DefinedTransitions<K>) -> Self {
        self.defined = defined;
        self
    }

    /// Validates the settings and builds the manager.
    pub fn build(self) -> ScreenResult<ScreenManager<K>> {
        self.settings.validate()?;

        let stack = ScreenStack::new(
            self.settings.layers_count(),
            self.settings.sorting_order_space,
            &self.settings.non_blocking_layers,
        );
        let transition = ScreensTransition::new(ScreensTransitionData::new(
            self.defined,
            self.settings.transitions_order(),
        ));

        info!(
            "Screen manager ready: layers {:?}, {} defined transitions",
            self.settings.layers,
            transition.data().defined().len()
        );

        Ok(ScreenManager {
            settings: self.settings,
            pool: self.pool,
            stack,
            transition,
        })
    }
}

//=== Detach ==============================================================

/// Completion token of a close transition: the screen leaves the stack
/// and returns to the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Detach<K>(K);

//=== ScreenManager =======================================================

/// Owns every screen and drives opening, closing and per-frame updates.
pub struct ScreenManager<K: ScreenKey> {
    settings: ScreenSettings,
    pool: ScreenPool<K>,
    stack: ScreenStack<K>,
    transition: ScreensTransition<K, Detach<K>>,
}

impl<K: ScreenKey> ScreenManager<K> {
    //--- Frame Update -----------------------------------------------------

    /// Ticks visible screens, then advances the running transition.
    pub fn update(&mut self, delta_time: f32) {
        self.stack.update(delta_time, &mut self.pool);
        self.transition.update(delta_time, &mut self.pool);
        self.process_completed();
    }

    //--- Opening ----------------------------------------------------------

    /// Opens the screen for `key` on its default layer.
    pub fn open(&mut self, key: K, instant: bool) -> ScreenResult<()> {
        self.flush();
        self.acquire(key)?;
        self.push_and_open(key, instant)
    }

    /// Opens a data-carrying screen and returns its typed logic.
    ///
    /// The data is set before the screen is pushed or any hook runs.
    pub fn open_with<T>(&mut self, key: K, data: T::Data, instant: bool) -> ScreenResult<&mut T>
    where
        T: ScreenData,
    {
        self.flush();
        self.acquire(key)?;

        let accepted = match self.typed_mut::<T>(key) {
            Some(screen) => {
                screen.set_data(data);
                true
            }
            None => false,
        };
        if !accepted {
            self.pool.release(key)?;
            return Err(ScreenError::KindMismatch(format!("{:?}", key)));
        }

        self.push_and_open(key, instant)?;
        self.typed_mut::<T>(key)
            .ok_or_else(|| ScreenError::KindMismatch(format!("{:?}", key)))
    }

    /// Pushes a screen straight into `Opened` on `layer`, with no transition.
    pub fn create_container_screen(&mut self, key: K, layer: usize) -> ScreenResult<()> {
        self.flush();
        self.acquire(key)?;

        if let Err(err) = self.stack.add(key, Some(layer), &mut self.pool) {
            self.pool.release(key)?;
            return Err(err);
        }
        if let Some(screen) = self.pool.screen_mut(key) {
            screen.open(true);
        }
        debug!("Created container screen {:?} on layer {}", key, layer);
        Ok(())
    }

    //--- Closing ----------------------------------------------------------

    /// Closes the screen for `key`.
    ///
    /// An `Opened` screen on top of its layer animates out against the
    /// screen below it, which is shown again. Anything else closes at once.
    /// Either way the screen is detached when its close completes.
    pub fn close(&mut self, key: K, instant: bool) -> ScreenResult<()> {
        self.flush();

        let Some(layer) = self.stack.layer_of(key) else {
            warn!("Screen {:?} is not in the stack, nothing to close", key);
            return Ok(());
        };

        let state = self.screen_state(key);
        let on_top = self.stack.try_get_current(layer) == Some(key);

        if state == Some(ScreenState::Opened) && on_top {
            let previous = self.stack.try_get_previous(layer);
            self.transition.start_close_transition(
                key,
                previous,
                instant,
                Some(Detach(key)),
                &mut self.pool,
            )?;
        } else {
            if let Some(screen) = self.pool.screen_mut(key) {
                screen.close(true);
            }
            self.detach(key);
        }

        self.process_completed();
        Ok(())
    }

    /// Closes every screen on every layer instantly.
    pub fn close_all(&mut self) -> ScreenResult<()> {
        for layer in 0..self.stack.layers_count() {
            let keys = self.stack.layer_screens(layer).to_vec();
            for key in keys {
                self.close(key, true)?;
            }
        }
        Ok(())
    }

    /// Closes everything and tears down the pool.
    ///
    /// The manager stays usable; screens are recreated on the next open.
    pub fn reset(&mut self) -> ScreenResult<()> {
        self.flush();
        self.close_all()?;
        self.pool.reset()?;
        info!("Screen manager reset");
        Ok(())
    }

    //--- Stack Queries ----------------------------------------------------

    pub fn try_get_current_screen(&self, layer: usize) -> Option<K> {
        self.stack.try_get_current(layer)
    }

    pub fn try_get_previous_screen(&self, layer: usize) -> Option<K> {
        self.stack.try_get_previous(layer)
    }

    pub fn screens_on_layer(&self, layer: usize) -> usize {
        self.stack.screens_on_layer(layer)
    }

    /// Screens on `layer`, bottom → top.
    pub fn layer_screens(&self, layer: usize) -> Vec<K> {
        self.stack.layer_screens(layer).to_vec()
    }

    pub fn is_screen_in_stack(&self, key: K) -> bool {
        self.stack.is_screen_in_stack(key)
    }

    /// Whether the screen is pushed and not occluded.
    pub fn is_screen_opened(&self, key: K) -> bool {
        self.stack.is_screen_opened(key)
    }

    /// Visible screens, top → bottom.
    pub fn visible_screens(&self) -> &[K] {
        self.stack.visible()
    }

    pub fn is_transition_in_progress(&self) -> bool {
        self.transition.in_progress()
    }

    pub fn settings(&self) -> &ScreenSettings {
        &self.settings
    }

    //--- Screen Access ----------------------------------------------------

    /// Lifecycle state of a pooled screen.
    pub fn screen_state(&self, key: K) -> Option<ScreenState> {
        self.pool.screen(key).map(BaseScreen::state)
    }

    pub fn base_screen(&self, key: K) -> Option<&BaseScreen<K>> {
        self.pool.screen(key)
    }

    /// Typed access to the logic of a pooled screen.
    pub fn screen<T: Screen>(&self, key: K) -> Option<&T> {
        self.pool.screen(key)?.screen().as_any().downcast_ref::<T>()
    }

    pub fn screen_mut<T: Screen>(&mut self, key: K) -> Option<&mut T> {
        self.typed_mut::<T>(key)
    }

    //--- Notifications ----------------------------------------------------

    /// State-change feed covering every screen, current and future.
    pub fn subscribe(&mut self) -> Receiver<ScreenStateChanged<K>> {
        let (sender, receiver) = unbounded();
        self.pool.attach_observer(sender);
        receiver
    }

    //--- Internal Helpers -------------------------------------------------

    fn acquire(&mut self, key: K) -> ScreenResult<()> {
        if self.stack.is_screen_in_stack(key) {
            return Err(ScreenError::AlreadyInStack(format!("{:?}", key)));
        }
        self.pool.get_screen(key)?;
        Ok(())
    }

    fn push_and_open(&mut self, key: K, instant: bool) -> ScreenResult<()> {
        let layer = self
            .pool
            .screen(key)
            .map(BaseScreen::default_layer)
            .ok_or_else(|| ScreenError::UnknownScreen(format!("{:?}", key)))?;
        let current = self.stack.try_get_current(layer);

        if let Err(err) = self.stack.add(key, None, &mut self.pool) {
            self.pool.release(key)?;
            return Err(err);
        }

        self.transition
            .start_open_transition(current, key, instant, None, &mut self.pool)?;
        self.process_completed();
        Ok(())
    }

    fn typed_mut<T: Screen>(&mut self, key: K) -> Option<&mut T> {
        self.pool
            .screen_mut(key)?
            .screen_mut()
            .as_any_mut()
            .downcast_mut::<T>()
    }

    fn flush(&mut self) {
        self.transition.try_force_complete(&mut self.pool);
        self.process_completed();
    }

    fn process_completed(&mut self) {
        for Detach(key) in self.transition.drain_completed() {
            self.detach(key);
        }
    }

    fn detach(&mut self, key: K) {
        self.stack.remove(key, &mut self.pool);
        if let Err(err) = self.pool.release(key) {
            warn!("Could not release screen {:?}: {}", key, err);
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
