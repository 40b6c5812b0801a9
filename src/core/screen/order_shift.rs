//=========================================================================
// Order Shifts
//=========================================================================
//
// Child visual elements whose draw order is an offset from the order of
// the screen that owns them. The stack reserves room around each screen
// so these offsets never reach into a neighbouring screen's band.
//
//=========================================================================

//=== OrderShift ==========================================================

/// A child element drawn at `screen order + shift`.
pub trait OrderShift {
    /// Offset from the owning screen's sorting order. May be negative.
    fn shift(&self) -> i32;

    /// Applies the absolute sorting order.
    fn set_order(&mut self, order: i32);
}

//=== OrderWidth ==========================================================

/// Room a screen needs above and below its own sorting order.
///
/// Both values are non-negative distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderWidth {
    pub max_up_shift: i32,
    pub max_down_shift: i32,
}

impl OrderWidth {
    pub fn new(max_up_shift: i32, max_down_shift: i32) -> Self {
        Self {
            max_up_shift: max_up_shift.max(0),
            max_down_shift: max_down_shift.max(0),
        }
    }

    /// Computes the width from child shifts plus spare room on each side.
    pub fn from_shifts<I>(shifts: I, spare_up: i32, spare_down: i32) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        let mut up = 0;
        let mut down = 0;
        for shift in shifts {
            if shift > 0 {
                up = up.max(shift);
            } else {
                down = down.max(-shift);
            }
        }
        Self::new(up + spare_up, down + spare_down)
    }

    /// Total reserved width.
    pub fn total(&self) -> i32 {
        self.max_up_shift.saturating_add(self.max_down_shift)
    }
}

/// Moves every child element to `order + shift`.
pub fn apply_order_shifts(shifts: &mut [Box<dyn OrderShift>], order: i32) {
    for child in shifts.iter_mut() {
        let shift = child.shift();
        child.set_order(order + shift);
    }
}

//=========================================================================
// Tests
//=========================================================================
