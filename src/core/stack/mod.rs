//=========================================================================
// Screen Stack
//=========================================================================
//
// Authoritative per-layer ordering of pushed screens.
//
// Every push and removal recomputes three derived properties:
//
//   1. Visibility: layers are scanned top → bottom, each layer front →
//      back. Screens are visible until the first opaque screen, which is
//      the last visible one. Everything below is taken out of view.
//   2. Sorting order: visible screens get increasing orders top → bottom,
//      each band sized by the screen's OrderWidth plus a fixed gap.
//   3. Input: the walk from the top grants input to screens on
//      non-blocking layers and stops after the first blocking screen.
//
// The stack stores keys only. Screen instances are reached through a
// ScreenRegistry passed into every mutating call.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::screen::{ScreenKey, ScreenRegistry};
use crate::error::{ScreenError, ScreenResult};

//=== ScreenStack =========================================================

/// Layered stack of screen keys with derived visibility, order and input.
#[derive(Debug, Clone)]
pub struct ScreenStack<K: ScreenKey> {
    /// Per layer, bottom → top.
    layers: Vec<Vec<K>>,

    /// Visible screens, top → bottom.
    visible: Vec<K>,

    non_blocking_layers: HashSet<usize>,
    screen_layers: HashMap<K, usize>,
    sorting_order_space: i32,
}

impl<K: ScreenKey> ScreenStack<K> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty stack with a fixed number of layers.
    ///
    /// A negative `sorting_order_space` is treated as 0.
    pub fn new(
        layers_count: usize,
        sorting_order_space: i32,
        non_blocking_layers: &[usize],
    ) -> Self {
        Self {
            layers: vec![Vec::new(); layers_count],
            visible: Vec::new(),
            non_blocking_layers: non_blocking_layers.iter().copied().collect(),
            screen_layers: HashMap::new(),
            sorting_order_space: sorting_order_space.max(0),
        }
    }

    //--- Mutation ---------------------------------------------------------

    /// Pushes `key` on top of `layer`, or of the screen's default layer.
    ///
    /// Returns the layer the screen landed on.
    pub fn add<R>(&mut self, key: K, layer: Option<usize>, screens: &mut R) -> ScreenResult<usize>
    where
        R: ScreenRegistry<K> + ?Sized,
    {
        let Some(screen) = screens.screen(key) else {
            return Err(ScreenError::UnknownScreen(format!("{:?}", key)));
        };

        let layer = layer.unwrap_or_else(|| screen.default_layer());
        if layer >= self.layers.len() {
            return Err(ScreenError::LayerOutOfRange {
                layer,
                layers_count: self.layers.len(),
            });
        }

        if self.screen_layers.contains_key(&key) {
            return Err(ScreenError::AlreadyInStack(format!("{:?}", key)));
        }

        self.layers[layer].push(key);
        self.screen_layers.insert(key, layer);
        debug!("Pushed {:?} to layer {} (depth {})", key, layer, self.layers[layer].len());

        self.recompute(screens);
        Ok(layer)
    }

    /// Removes `key` from its layer. Returns `false` if it was not pushed.
    ///
    /// The removed screen is taken out of view.
    pub fn remove<R>(&mut self, key: K, screens: &mut R) -> bool
    where
        R: ScreenRegistry<K> + ?Sized,
    {
        let Some(layer) = self.screen_layers.remove(&key) else {
            warn!("Screen {:?} is not in the stack, nothing to remove", key);
            return false;
        };

        self.layers[layer].retain(|pushed| *pushed != key);
        debug!("Removed {:?} from layer {}", key, layer);

        if let Some(screen) = screens.screen_mut(key) {
            screen.set_in_view(false);
            screen.set_input_granted(false);
        }

        self.recompute(screens);
        true
    }

    //--- Queries ----------------------------------------------------------

    /// Top screen of `layer`.
    pub fn try_get_current(&self, layer: usize) -> Option<K> {
        self.layers.get(layer)?.last().copied()
    }

    /// Screen directly below the top of `layer`.
    pub fn try_get_previous(&self, layer: usize) -> Option<K> {
        let screens = self.layers.get(layer)?;
        screens.len().checked_sub(2).map(|index| screens[index])
    }

    /// Screens on `layer`, bottom → top.
    pub fn layer_screens(&self, layer: usize) -> &[K] {
        self.layers.get(layer).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn screens_on_layer(&self, layer: usize) -> usize {
        self.layer_screens(layer).len()
    }

    pub fn layer_of(&self, key: K) -> Option<usize> {
        self.screen_layers.get(&key).copied()
    }

    pub fn is_screen_in_stack(&self, key: K) -> bool {
        self.screen_layers.contains_key(&key)
    }

    /// Whether `key` is currently visible.
    pub fn is_screen_opened(&self, key: K) -> bool {
        self.visible.contains(&key)
    }

    /// Visible screens, top → bottom.
    pub fn visible(&self) -> &[K] {
        &self.visible
    }

    pub fn layers_count(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screen_layers.is_empty()
    }

    pub fn is_non_blocking_layer(&self, layer: usize) -> bool {
        self.non_blocking_layers.contains(&layer)
    }

    //--- Frame Update -----------------------------------------------------

    /// Ticks visible screens, top → bottom. Occluded screens do not tick.
    pub fn update<R>(&self, delta_time: f32, screens: &mut R)
    where
        R: ScreenRegistry<K> + ?Sized,
    {
        for key in &self.visible {
            if let Some(screen) = screens.screen_mut(*key) {
                screen.update(delta_time);
            }
        }
    }

    //--- Recomputation ----------------------------------------------------

    fn recompute<R>(&mut self, screens: &mut R)
    where
        R: ScreenRegistry<K> + ?Sized,
    {
        self.update_visibility(screens);
        self.update_order(screens);
        self.update_input(screens);
    }

    fn update_visibility<R>(&mut self, screens: &mut R)
    where
        R: ScreenRegistry<K> + ?Sized,
    {
        self.visible.clear();
        let mut see_through = true;

        for layer in self.layers.iter().rev() {
            for key in layer.iter().rev() {
                let Some(screen) = screens.screen_mut(*key) else {
                    warn!("Screen {:?} is pushed but not registered", key);
                    continue;
                };

                screen.set_in_view(see_through);
                if see_through {
                    self.visible.push(*key);
                    see_through = screen.is_transparent();
                }
            }
        }
    }

    fn update_order<R>(&self, screens: &mut R)
    where
        R: ScreenRegistry<K> + ?Sized,
    {
        let mut reserved: i32 = 0;

        for (index, key) in self.visible.iter().enumerate() {
            let Some(screen) = screens.screen_mut(*key) else {
                continue;
            };

            let width = screen.order_width();
            let band = i32::try_from(index)
                .unwrap_or(i32::MAX)
                .saturating_mul(self.sorting_order_space);
            let order = reserved
                .saturating_add(band)
                .saturating_add(width.max_down_shift);
            screen.set_sorting_order(order);
            reserved = reserved.saturating_add(width.total());
        }
    }

    fn update_input<R>(&self, screens: &mut R)
    where
        R: ScreenRegistry<K> + ?Sized,
    {
        let mut blocked = false;

        for key in &self.visible {
            let granted = !blocked;
            if granted {
                let non_blocking = self
                    .layer_of(*key)
                    .is_some_and(|layer| self.is_non_blocking_layer(layer));
                blocked = !non_blocking;
            }

            if let Some(screen) = screens.screen_mut(*key) {
                screen.set_input_granted(granted);
            }
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::screen::{BaseScreen, ScreenViewSettings};
    use crate::core::test_support::{registry, Probe, TestKey};

    use proptest::prelude::*;

    fn opaque(probe: &Probe, key: TestKey, layer: usize) -> BaseScreen<TestKey> {
        probe.build(key, ScreenViewSettings::on_layer(layer), 0.0)
    }

    fn transparent(probe: &Probe, key: TestKey, layer: usize) -> BaseScreen<TestKey> {
        probe.build(key, ScreenViewSettings::on_layer(layer).transparent(), 0.0)
    }

    //--- Push / Remove ----------------------------------------------------

    #[test]
    fn add_uses_default_layer_and_tracks_current() {
        let mut screens = registry(vec![
            opaque(&Probe::default(), TestKey::A, 1),
            opaque(&Probe::default(), TestKey::B, 1),
        ]);
        let mut stack = ScreenStack::new(2, 10, &[]);

        assert_eq!(stack.add(TestKey::A, None, &mut screens).unwrap(), 1);
        assert_eq!(stack.try_get_current(1), Some(TestKey::A));
        assert_eq!(stack.try_get_previous(1), None);

        stack.add(TestKey::B, None, &mut screens).unwrap();
        assert_eq!(stack.try_get_current(1), Some(TestKey::B));
        assert_eq!(stack.try_get_previous(1), Some(TestKey::A));
        assert_eq!(stack.screens_on_layer(1), 2);
        assert_eq!(stack.layer_screens(1), &[TestKey::A, TestKey::B]);
        assert_eq!(stack.try_get_current(0), None);
    }

    #[test]
    fn explicit_layer_overrides_default() {
        let mut screens = registry(vec![opaque(&Probe::default(), TestKey::A, 0)]);
        let mut stack = ScreenStack::new(3, 10, &[]);

        stack.add(TestKey::A, Some(2), &mut screens).unwrap();

        assert_eq!(stack.layer_of(TestKey::A), Some(2));
        assert_eq!(stack.try_get_current(0), None);
    }

    #[test]
    fn add_rejects_bad_requests() {
        let mut screens = registry(vec![opaque(&Probe::default(), TestKey::A, 0)]);
        let mut stack = ScreenStack::new(1, 10, &[]);

        assert!(matches!(
            stack.add(TestKey::B, None, &mut screens),
            Err(ScreenError::UnknownScreen(_))
        ));
        assert!(matches!(
            stack.add(TestKey::A, Some(1), &mut screens),
            Err(ScreenError::LayerOutOfRange {
                layer: 1,
                layers_count: 1
            })
        ));

        stack.add(TestKey::A, None, &mut screens).unwrap();
        assert!(matches!(
            stack.add(TestKey::A, None, &mut screens),
            Err(ScreenError::AlreadyInStack(_))
        ));
        assert_eq!(stack.screens_on_layer(0), 1);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut screens = registry(vec![]);
        let mut stack = ScreenStack::<TestKey>::new(1, 10, &[]);

        assert!(!stack.remove(TestKey::A, &mut screens));
    }

    #[test]
    fn remove_takes_screen_out_of_view() {
        let probe = Probe::default();
        let mut screens = registry(vec![opaque(&probe, TestKey::A, 0)]);
        screens.get_mut(&TestKey::A).unwrap().open(true);
        let mut stack = ScreenStack::new(1, 10, &[]);
        stack.add(TestKey::A, None, &mut screens).unwrap();
        assert!(probe.view().input);

        assert!(stack.remove(TestKey::A, &mut screens));

        assert!(stack.is_empty());
        assert!(!stack.is_screen_in_stack(TestKey::A));
        assert!(!probe.view().active);
        assert!(!probe.view().input);
    }

    //--- Visibility -------------------------------------------------------

    #[test]
    fn opaque_screen_occludes_everything_below() {
        let bottom = Probe::default();
        let mut screens = registry(vec![
            opaque(&bottom, TestKey::A, 0),
            opaque(&Probe::default(), TestKey::B, 0),
            transparent(&Probe::default(), TestKey::C, 1),
        ]);
        for screen in screens.values_mut() {
            screen.open(true);
        }
        let mut stack = ScreenStack::new(2, 10, &[]);

        stack.add(TestKey::A, None, &mut screens).unwrap();
        assert!(bottom.view().active);

        stack.add(TestKey::B, None, &mut screens).unwrap();
        stack.add(TestKey::C, None, &mut screens).unwrap();

        assert_eq!(stack.visible(), &[TestKey::C, TestKey::B]);
        assert!(stack.is_screen_opened(TestKey::B));
        assert!(!stack.is_screen_opened(TestKey::A));
        assert!(stack.is_screen_in_stack(TestKey::A));
        assert!(!bottom.view().active);

        stack.remove(TestKey::B, &mut screens);
        assert_eq!(stack.visible(), &[TestKey::C, TestKey::A]);
        assert!(bottom.view().active);
    }

    //--- Sorting Order ----------------------------------------------------

    #[test]
    fn orders_reserve_child_bands() {
        let top = Probe::default();
        let bottom = Probe::default();
        let mut top_settings = ScreenViewSettings::on_layer(1).transparent();
        top_settings.spare_up_width = 4;
        top_settings.spare_down_width = 2;
        let mut screens = registry(vec![
            bottom.build(TestKey::A, ScreenViewSettings::on_layer(0), 0.0),
            top.build(TestKey::B, top_settings, 0.0),
        ]);
        let mut stack = ScreenStack::new(2, 10, &[]);

        stack.add(TestKey::A, None, &mut screens).unwrap();
        stack.add(TestKey::B, None, &mut screens).unwrap();

        // B: 0 + 0 * 10 + 2; A: (4 + 2) + 1 * 10 + 0
        assert_eq!(top.view().order, 2);
        assert_eq!(bottom.view().order, 16);
    }

    #[test]
    fn extreme_spacing_keeps_top_screen_lowest() {
        for space in [-20, i32::MAX] {
            let top = Probe::default();
            let bottom = Probe::default();
            let mut screens = registry(vec![
                opaque(&bottom, TestKey::A, 0),
                transparent(&top, TestKey::B, 1),
            ]);
            let mut stack = ScreenStack::new(2, space, &[]);

            stack.add(TestKey::A, None, &mut screens).unwrap();
            stack.add(TestKey::B, None, &mut screens).unwrap();

            assert_eq!(top.view().order, 0);
            assert!(bottom.view().order >= top.view().order);
        }
    }

    //--- Input Blocking ---------------------------------------------------

    #[test]
    fn non_blocking_overlay_keeps_input_below() {
        let a = Probe::default();
        let b = Probe::default();
        let mut screens = registry(vec![
            opaque(&a, TestKey::A, 0),
            transparent(&b, TestKey::B, 1),
        ]);
        for screen in screens.values_mut() {
            screen.open(true);
        }
        let mut stack = ScreenStack::new(2, 10, &[1]);

        stack.add(TestKey::A, None, &mut screens).unwrap();
        stack.add(TestKey::B, None, &mut screens).unwrap();

        assert_eq!(stack.visible(), &[TestKey::B, TestKey::A]);
        assert!(b.view().input);
        assert!(a.view().input);
        assert!(b.view().order < a.view().order);
    }

    #[test]
    fn blocking_overlay_takes_input() {
        let a = Probe::default();
        let b = Probe::default();
        let mut screens = registry(vec![
            opaque(&a, TestKey::A, 0),
            transparent(&b, TestKey::B, 1),
        ]);
        for screen in screens.values_mut() {
            screen.open(true);
        }
        let mut stack = ScreenStack::new(2, 10, &[]);

        stack.add(TestKey::A, None, &mut screens).unwrap();
        stack.add(TestKey::B, None, &mut screens).unwrap();

        assert!(b.view().input);
        assert!(!a.view().input);
        assert!(a.view().active);
    }

    //--- Frame Update -----------------------------------------------------

    #[test]
    fn update_ticks_visible_screens_only() {
        let a = Probe::default();
        let b = Probe::default();
        let mut screens = registry(vec![opaque(&a, TestKey::A, 0), opaque(&b, TestKey::B, 0)]);
        let mut stack = ScreenStack::new(1, 10, &[]);
        stack.add(TestKey::A, None, &mut screens).unwrap();
        stack.add(TestKey::B, None, &mut screens).unwrap();

        stack.update(0.1, &mut screens);
        stack.update(0.1, &mut screens);

        assert_eq!(b.view().updates, 2);
        assert_eq!(a.view().updates, 0);
    }

    //--- Properties -------------------------------------------------------

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize),
        Remove(usize),
    }

    const KEYS: [TestKey; 4] = [TestKey::A, TestKey::B, TestKey::C, TestKey::D];

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..KEYS.len()).prop_map(Op::Add),
            (0..KEYS.len()).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn derived_state_matches_scan(
            layers in proptest::collection::vec(0usize..3, KEYS.len()),
            transparency in proptest::collection::vec(any::<bool>(), KEYS.len()),
            ops in proptest::collection::vec(op(), 1..24),
        ) {
            let probes: Vec<Probe> = KEYS.iter().map(|_| Probe::default()).collect();
            let mut screens = registry(
                KEYS.iter()
                    .enumerate()
                    .map(|(i, key)| {
                        let mut settings = ScreenViewSettings::on_layer(layers[i]);
                        settings.transparent = transparency[i];
                        settings.spare_up_width = i as i32;
                        settings.spare_down_width = 1;
                        let mut screen = probes[i].build(*key, settings, 0.0);
                        screen.open(true);
                        screen
                    })
                    .collect(),
            );
            let mut stack = ScreenStack::new(3, 5, &[2]);

            for op in ops {
                match op {
                    Op::Add(i) => {
                        let _ = stack.add(KEYS[i], None, &mut screens);
                    }
                    Op::Remove(i) => {
                        stack.remove(KEYS[i], &mut screens);
                    }
                }

                // Visible set equals the reference scan.
                let mut expected = Vec::new();
                'scan: for layer in (0..3).rev() {
                    for key in stack.layer_screens(layer).iter().rev() {
                        expected.push(*key);
                        if !screens[key].is_transparent() {
                            break 'scan;
                        }
                    }
                }
                prop_assert_eq!(stack.visible(), expected.as_slice());

                // Orders strictly increase top → bottom and bands never overlap.
                let orders: Vec<i32> = stack
                    .visible()
                    .iter()
                    .map(|key| probes[KEYS.iter().position(|k| k == key).unwrap()].view().order)
                    .collect();
                for (pair, keys) in orders.windows(2).zip(stack.visible().windows(2)) {
                    prop_assert!(pair[0] < pair[1]);
                    let upper = screens[&keys[0]].order_width();
                    let lower = screens[&keys[1]].order_width();
                    prop_assert!(pair[0] + upper.max_up_shift < pair[1] - lower.max_down_shift);
                }

                // At most one blocking screen has input, and it is the first
                // blocking one from the top.
                let blocking_with_input: Vec<TestKey> = stack
                    .visible()
                    .iter()
                    .copied()
                    .filter(|key| stack.layer_of(*key) != Some(2))
                    .filter(|key| screens[key].is_input_enabled())
                    .collect();
                prop_assert!(blocking_with_input.len() <= 1);
                let first_blocking = stack
                    .visible()
                    .iter()
                    .copied()
                    .find(|key| stack.layer_of(*key) != Some(2));
                prop_assert_eq!(blocking_with_input.first().copied(), first_blocking);

                // Pushed screens are drawn exactly when visible.
                for (i, key) in KEYS.iter().enumerate() {
                    if stack.is_screen_in_stack(*key) {
                        let visible = stack.visible().contains(key);
                        prop_assert_eq!(probes[i].view().active, visible);
                    }
                }
            }
        }
    }
}
