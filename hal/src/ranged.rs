//! Range-bounded integers.
//!
//! Register fields that only accept part of their bit range (a 5-bit screen
//! block index, a scanline 0–227) take a [`Ranged`] so an illegal value is
//! caught where it is made, not where it reaches the hardware.

use core::fmt;

/// An integer known to lie in `MIN..=MAX`.
///
/// Building one out of range is a contract violation: it panics when
/// `hal_assert!` is active (debug builds, or the `checked` feature) and is
/// stored unchecked otherwise.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Ranged<const MIN: u16, const MAX: u16>(u16);

impl<const MIN: u16, const MAX: u16> Ranged<MIN, MAX> {
    #[inline]
    #[track_caller]
    pub fn new(value: u16) -> Self {
        hal_assert!(
            value >= MIN && value <= MAX,
            "value {} outside of {}..={}",
            value,
            MIN,
            MAX
        );
        Self(value)
    }

    /// `None` when `value` is out of range, regardless of build settings.
    #[inline]
    pub const fn try_new(value: u16) -> Option<Self> {
        if value >= MIN && value <= MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Wrap `value` without looking at the bounds.
    ///
    /// Used when decoding a field whose bit width already limits the value.
    #[inline(always)]
    pub const fn new_unchecked(value: u16) -> Self {
        Self(value)
    }

    #[inline(always)]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl<const MIN: u16, const MAX: u16> From<Ranged<MIN, MAX>> for u16 {
    fn from(value: Ranged<MIN, MAX>) -> u16 {
        value.0
    }
}

impl<const MIN: u16, const MAX: u16> fmt::Debug for Ranged<MIN, MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}..={})", self.0, MIN, MAX)
    }
}

/// Drawing priority of a background, 0 is drawn on top.
pub type Priority = Ranged<0, 3>;
/// Character (tile data) block, 16 KiB each.
pub type CharBlock = Ranged<0, 3>;
/// Screen (tile map) block, 2 KiB each.
pub type ScreenBlock = Ranged<0, 31>;
/// One of the sixteen 16-color palette banks.
pub type PaletteBank = Ranged<0, 15>;
/// A visible or v-blank scanline.
pub type Scanline = Ranged<0, 227>;
/// One 5-bit color channel.
pub type Channel = Ranged<0, 31>;
/// Tile number in a text background map entry.
pub type TileIndex = Ranged<0, 1023>;
