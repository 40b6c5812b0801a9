//=========================================================================
// Test Support
//=========================================================================
//
// Recording test doubles shared by the unit tests.
//
// A Probe is a handle onto what a TestScreen/TestView pair has seen: the
// flags and sorting order last pushed to the view, every progress value,
// and the order of lifecycle hooks.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Deserialize;

//=== Internal Dependencies ===============================================

use crate::core::pool::ScreenParts;
use crate::core::screen::{
    BaseScreen, Screen, ScreenData, ScreenKey, ScreenView, ScreenViewSettings,
};

//=== TestKey =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum TestKey {
    A,
    B,
    C,
    D,
}

impl ScreenKey for TestKey {}

//=== ViewLog =============================================================

/// Last known view flags plus everything the view was told.
#[derive(Debug, Clone, Default)]
pub struct ViewLog {
    pub active: bool,
    pub input: bool,
    pub order: i32,
    pub progress: Vec<(&'static str, f32)>,
    pub updates: usize,
    pub destroyed: bool,
}

//=== Probe ===============================================================

#[derive(Debug, Clone, Default)]
pub struct Probe {
    view: Rc<RefCell<ViewLog>>,
    hooks: Rc<RefCell<Vec<&'static str>>>,
}

impl Probe {
    pub fn view(&self) -> ViewLog {
        self.view.borrow().clone()
    }

    pub fn hooks(&self) -> Vec<&'static str> {
        self.hooks.borrow().clone()
    }

    /// Opaque screen on `layer` with instant transitions and the same
    /// duration for all four animated states.
    pub fn base_screen(&self, key: TestKey, layer: usize, duration: f32) -> BaseScreen<TestKey> {
        self.build(key, ScreenViewSettings::on_layer(layer), duration)
    }

    pub fn build(
        &self,
        key: TestKey,
        settings: ScreenViewSettings,
        duration: f32,
    ) -> BaseScreen<TestKey> {
        let parts = self.parts_with(settings, duration);
        BaseScreen::new(key, parts.screen, parts.view).with_components(parts.components)
    }

    pub fn parts(&self, layer: usize, duration: f32) -> ScreenParts {
        self.parts_with(ScreenViewSettings::on_layer(layer), duration)
    }

    pub fn parts_with(&self, settings: ScreenViewSettings, duration: f32) -> ScreenParts {
        ScreenParts::new(
            TestScreen {
                data: None,
                updates: 0,
                hooks: self.hooks.clone(),
            },
            TestView {
                settings,
                duration,
                log: self.view.clone(),
            },
        )
    }
}

/// Collects screens into a registry map keyed by their own keys.
pub fn registry(screens: Vec<BaseScreen<TestKey>>) -> HashMap<TestKey, BaseScreen<TestKey>> {
    screens.into_iter().map(|screen| (screen.key(), screen)).collect()
}

//=== TestScreen ==========================================================

pub struct TestScreen {
    pub data: Option<u32>,
    pub updates: usize,
    hooks: Rc<RefCell<Vec<&'static str>>>,
}

impl TestScreen {
    fn record(&self, hook: &'static str) {
        self.hooks.borrow_mut().push(hook);
    }
}

impl Screen for TestScreen {
    fn on_update(&mut self, _delta_time: f32) {
        self.updates += 1;
    }

    fn on_opening(&mut self) {
        self.record("opening");
    }

    fn on_open(&mut self) {
        self.record("open");
    }

    fn on_showing(&mut self) {
        self.record("showing");
    }

    fn on_show(&mut self) {
        self.record("show");
    }

    fn on_hiding(&mut self) {
        self.record("hiding");
    }

    fn on_hide(&mut self) {
        self.record("hide");
    }

    fn on_closing(&mut self) {
        self.record("closing");
    }

    fn on_close(&mut self) {
        self.record("close");
    }

    fn on_utilize(&mut self) {
        self.record("utilize");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl ScreenData for TestScreen {
    type Data = u32;

    fn set_data(&mut self, data: u32) {
        self.record("data");
        self.data = Some(data);
    }
}

//=== TestView ============================================================

pub struct TestView {
    settings: ScreenViewSettings,
    duration: f32,
    log: Rc<RefCell<ViewLog>>,
}

impl ScreenView for TestView {
    fn settings(&self) -> &ScreenViewSettings {
        &self.settings
    }

    fn set_active(&mut self, active: bool) {
        self.log.borrow_mut().active = active;
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.log.borrow_mut().input = enabled;
    }

    fn set_sorting_order(&mut self, order: i32) {
        self.log.borrow_mut().order = order;
    }

    fn open_duration(&self) -> f32 {
        self.duration
    }

    fn show_duration(&self) -> f32 {
        self.duration
    }

    fn hide_duration(&self) -> f32 {
        self.duration
    }

    fn close_duration(&self) -> f32 {
        self.duration
    }

    fn set_opening_progress(&mut self, normalized_time: f32) {
        self.log.borrow_mut().progress.push(("opening", normalized_time));
    }

    fn set_showing_progress(&mut self, normalized_time: f32) {
        self.log.borrow_mut().progress.push(("showing", normalized_time));
    }

    fn set_hiding_progress(&mut self, normalized_time: f32) {
        self.log.borrow_mut().progress.push(("hiding", normalized_time));
    }

    fn set_closing_progress(&mut self, normalized_time: f32) {
        self.log.borrow_mut().progress.push(("closing", normalized_time));
    }

    fn update_view(&mut self, _delta_time: f32) {
        self.log.borrow_mut().updates += 1;
    }

    fn destroy(&mut self) {
        self.log.borrow_mut().destroyed = true;
    }
}
