//=========================================================================
// Screen Registry
//=========================================================================
//
// Lookup seam between key-based bookkeeping (stack, transitions) and the
// storage that owns screen instances (pool, or a plain map in tests).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{BaseScreen, ScreenKey};

//=== ScreenRegistry ======================================================

/// Resolves screen keys to live screen instances.
pub trait ScreenRegistry<K: ScreenKey> {
    fn screen(&self, key: K) -> Option<&BaseScreen<K>>;

    fn screen_mut(&mut self, key: K) -> Option<&mut BaseScreen<K>>;
}

impl<K: ScreenKey> ScreenRegistry<K> for HashMap<K, BaseScreen<K>> {
    fn screen(&self, key: K) -> Option<&BaseScreen<K>> {
        self.get(&key)
    }

    fn screen_mut(&mut self, key: K) -> Option<&mut BaseScreen<K>> {
        self.get_mut(&key)
    }
}
