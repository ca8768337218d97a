//! # Key Input
//!
//! `KEYINPUT` (`0x0400_0130`) reports the ten buttons, one bit each, with a
//! pressed button reading as 0. [`poll_keys`] inverts that so a set bit in
//! [`Keys`] means "held down".
//!
//! [`Controller`] keeps the previous poll around for edge detection:
//!
//! | Query            | Previous | Current |
//! |------------------|----------|---------|
//! | `just_pressed`   | up       | down    |
//! | `held`           | down     | down    |
//! | `just_released`  | down     | up      |
//!
//! ```ignore
//! let mut pad = Controller::new();
//! loop {
//!     pad.poll(display.bus());
//!     if pad.just_pressed(Keys::START) {
//!         paused = !paused;
//!     }
//!     wait_for_vblank(&display);
//! }
//! ```

use crate::Point;
use crate::bus::Bus;
use crate::memory::KEYINPUT;

bitflags::bitflags! {
    /// Buttons, set bit = pressed.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct Keys: u16 {
        const A      = 1 << 0;
        const B      = 1 << 1;
        const SELECT = 1 << 2;
        const START  = 1 << 3;
        const RIGHT  = 1 << 4;
        const LEFT   = 1 << 5;
        const UP     = 1 << 6;
        const DOWN   = 1 << 7;
        const R      = 1 << 8;
        const L      = 1 << 9;

        const DPAD = Self::RIGHT.bits() | Self::LEFT.bits() | Self::UP.bits() | Self::DOWN.bits();
    }
}

/// Read `KEYINPUT` once.
#[inline]
pub fn poll_keys<B: Bus + ?Sized>(bus: &B) -> Keys {
    Keys::from_bits_truncate(!bus.read_u16(KEYINPUT))
}

/// Key state of the current and the previous poll.
#[derive(Debug, Copy, Clone, Default)]
pub struct Controller {
    pub keys: Keys,
    pub keys_last: Keys,
}

impl Controller {
    pub const fn new() -> Self {
        Self {
            keys: Keys::empty(),
            keys_last: Keys::empty(),
        }
    }

    /// Call once per frame.
    #[inline]
    pub fn poll<B: Bus + ?Sized>(&mut self, bus: &B) {
        self.update(poll_keys(bus));
    }

    /// Shift `keys` in as the newest state.
    #[inline]
    pub fn update(&mut self, keys: Keys) {
        self.keys_last = self.keys;
        self.keys = keys;
    }

    /// All of `keys` are down now.
    #[inline]
    pub fn is_pressed(&self, keys: Keys) -> bool {
        self.keys.contains(keys)
    }

    #[inline]
    pub fn was_pressed(&self, keys: Keys) -> bool {
        self.keys_last.contains(keys)
    }

    /// Keys that went down since the last poll.
    #[inline]
    pub fn pressed(&self) -> Keys {
        self.keys & !self.keys_last
    }

    /// Keys down in both polls.
    #[inline]
    pub fn held(&self) -> Keys {
        self.keys & self.keys_last
    }

    /// Keys that came up since the last poll.
    #[inline]
    pub fn released(&self) -> Keys {
        self.keys_last & !self.keys
    }

    #[inline]
    pub fn just_pressed(&self, keys: Keys) -> bool {
        self.pressed().contains(keys)
    }

    #[inline]
    pub fn just_released(&self, keys: Keys) -> bool {
        self.released().contains(keys)
    }

    /// Unit step of the held d-pad keys, y pointing down. Opposite keys
    /// cancel out.
    pub fn direction(&self) -> Point {
        let dpad = self.keys & Keys::DPAD;
        let axis = |plus: Keys, minus: Keys| {
            dpad.contains(plus) as i32 - dpad.contains(minus) as i32
        };
        Point::new(axis(Keys::RIGHT, Keys::LEFT), axis(Keys::DOWN, Keys::UP))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{FakeBus, KEYS_RELEASED};

    #[test]
    fn nothing_pressed_reads_empty() {
        let bus = FakeBus::new();
        assert_eq!(bus.read_u16(KEYINPUT), KEYS_RELEASED);
        assert_eq!(poll_keys(&bus), Keys::empty());

        bus.write_u16(KEYINPUT, 0xFFFF);
        assert_eq!(poll_keys(&bus), Keys::empty());
    }

    #[test]
    fn lines_are_active_low() {
        let bus = FakeBus::new();
        bus.write_u16(KEYINPUT, KEYS_RELEASED & !(Keys::A | Keys::LEFT).bits());
        assert_eq!(poll_keys(&bus), Keys::A | Keys::LEFT);

        // the unused upper bits never show up as keys
        bus.write_u16(KEYINPUT, 0x0000);
        assert_eq!(poll_keys(&bus), Keys::all());
    }

    #[test]
    fn edges_between_polls() {
        let mut pad = Controller::new();
        pad.update(Keys::A | Keys::UP);
        assert!(pad.just_pressed(Keys::A));
        assert_eq!(pad.held(), Keys::empty());

        pad.update(Keys::A | Keys::B);
        assert_eq!(pad.pressed(), Keys::B);
        assert_eq!(pad.held(), Keys::A);
        assert_eq!(pad.released(), Keys::UP);
        assert!(pad.just_released(Keys::UP));
        assert!(pad.is_pressed(Keys::A | Keys::B));
        assert!(pad.was_pressed(Keys::UP));
    }

    #[test]
    fn poll_reads_the_bus() {
        let bus = FakeBus::new();
        let mut pad = Controller::new();
        bus.write_u16(KEYINPUT, KEYS_RELEASED & !Keys::START.bits());
        pad.poll(&bus);
        assert!(pad.just_pressed(Keys::START));
        pad.poll(&bus);
        assert!(!pad.just_pressed(Keys::START));
        assert!(pad.held().contains(Keys::START));
    }

    #[test]
    fn direction_follows_the_dpad() {
        let mut pad = Controller::new();
        assert_eq!(pad.direction(), Point::new(0, 0));

        pad.update(Keys::RIGHT | Keys::A);
        assert_eq!(pad.direction(), Point::new(1, 0));

        pad.update(Keys::UP | Keys::LEFT);
        assert_eq!(pad.direction(), Point::new(-1, -1));

        pad.update(Keys::DPAD);
        assert_eq!(pad.direction(), Point::new(0, 0));
    }
}
