//=========================================================================
// Screen Pool
//=========================================================================
//
// Singleton-per-key cache of screen instances.
//
// A screen is created through the ScreenFactory the first time its key
// is requested and reused for every later open. Taken screens are
// handed back with release(); reset() tears the cache down.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crossbeam_channel::Sender;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::screen::{
    BaseScreen, Screen, ScreenComponent, ScreenKey, ScreenRegistry, ScreenStateChanged,
    ScreenView, SharedObservers,
};
use crate::error::{ScreenError, ScreenResult};

//=== ScreenParts =========================================================

/// Logic, view and components produced by a factory for one key.
pub struct ScreenParts {
    pub screen: Box<dyn Screen>,
    pub view: Box<dyn ScreenView>,
    pub components: Vec<Box<dyn ScreenComponent>>,
}

impl ScreenParts {
    pub fn new(screen: impl Screen, view: impl ScreenView + 'static) -> Self {
        Self {
            screen: Box::new(screen),
            view: Box::new(view),
            components: Vec::new(),
        }
    }

    pub fn with_component(mut self, component: impl ScreenComponent) -> Self {
        self.components.push(Box::new(component));
        self
    }
}

//=== ScreenFactory =======================================================

/// External collaborator that resolves assets into screen instances.
///
/// Any `FnMut(K) -> ScreenResult<ScreenParts>` closure is a factory.
pub trait ScreenFactory<K: ScreenKey> {
    fn create(&mut self, key: K) -> ScreenResult<ScreenParts>;
}

impl<K, F> ScreenFactory<K> for F
where
    K: ScreenKey,
    F: FnMut(K) -> ScreenResult<ScreenParts>,
{
    fn create(&mut self, key: K) -> ScreenResult<ScreenParts> {
        self(key)
    }
}

//=== ScreenPool ==========================================================

pub struct ScreenPool<K: ScreenKey> {
    factory: Box<dyn ScreenFactory<K>>,
    screens: HashMap<K, BaseScreen<K>>,
    taken: HashSet<K>,

    /// Senders shared with every screen, including ones created later.
    observers: SharedObservers<K>,
}

impl<K: ScreenKey> ScreenPool<K> {
    pub fn new(factory: impl ScreenFactory<K> + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            screens: HashMap::new(),
            taken: HashSet::new(),
            observers: Rc::default(),
        }
    }

    //--- Acquire / Release ------------------------------------------------

    /// Takes the instance for `key`, creating it on first use.
    ///
    /// Fails if the factory fails or the instance is already taken.
    pub fn get_screen(&mut self, key: K) -> ScreenResult<&mut BaseScreen<K>> {
        if self.taken.contains(&key) {
            return Err(ScreenError::AlreadyTaken(format!("{:?}", key)));
        }

        if !self.screens.contains_key(&key) {
            let parts = self.factory.create(key)?;
            let mut screen =
                BaseScreen::new(key, parts.screen, parts.view).with_components(parts.components);
            screen.share_observers(Rc::clone(&self.observers));
            debug!("Created screen {:?}", key);
            self.screens.insert(key, screen);
        }

        self.taken.insert(key);
        self.screens
            .get_mut(&key)
            .ok_or_else(|| ScreenError::UnknownScreen(format!("{:?}", key)))
    }

    /// Returns a taken screen to the free set.
    pub fn release(&mut self, key: K) -> ScreenResult<()> {
        if !self.screens.contains_key(&key) {
            return Err(ScreenError::UnknownScreen(format!("{:?}", key)));
        }
        if self.taken.remove(&key) {
            debug!("Released screen {:?}", key);
        }
        Ok(())
    }

    /// Utilizes and drops every cached screen.
    ///
    /// Fails without touching anything while screens are still taken.
    pub fn reset(&mut self) -> ScreenResult<()> {
        if !self.taken.is_empty() {
            return Err(ScreenError::ScreensStillTaken(self.taken.len()));
        }

        let count = self.screens.len();
        for (_, mut screen) in self.screens.drain() {
            screen.utilize();
        }
        info!("Screen pool reset ({} screens utilized)", count);
        Ok(())
    }

    //--- Observers --------------------------------------------------------

    /// Attaches `sender` to every existing and future screen.
    ///
    /// The sender is dropped once a state change finds its receiver gone.
    pub fn attach_observer(&mut self, sender: Sender<ScreenStateChanged<K>>) {
        self.observers.borrow_mut().push(sender);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    //--- Queries ----------------------------------------------------------

    pub fn contains(&self, key: K) -> bool {
        self.screens.contains_key(&key)
    }

    pub fn is_taken(&self, key: K) -> bool {
        self.taken.contains(&key)
    }

    pub fn taken_count(&self) -> usize {
        self.taken.len()
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}

impl<K: ScreenKey> ScreenRegistry<K> for ScreenPool<K> {
    fn screen(&self, key: K) -> Option<&BaseScreen<K>> {
        self.screens.get(&key)
    }

    fn screen_mut(&mut self, key: K) -> Option<&mut BaseScreen<K>> {
        self.screens.get_mut(&key)
    }
}

//=========================================================================
// Tests
//=========================================================================
