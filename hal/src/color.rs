//! 15-bit colors as stored in palette RAM and in mode 3/5 bitmaps.
//!
//! ```text
//! 15      10 9       5 4       0
//! | x | blue  | green  |  red   |
//! ```

use crate::field::{Field, FieldValue};
use crate::ranged::Channel;

type Red = Field<u16, Channel, 5, 0>;
type Green = Field<u16, Channel, 5, 5>;
type Blue = Field<u16, Channel, 5, 10>;

/// A packed 5-5-5 color. Bit 15 is unused and always zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Rgb15(u16);

impl Rgb15 {
    pub const BLACK: Rgb15 = Rgb15(0x0000);
    pub const WHITE: Rgb15 = Rgb15(0x7FFF);
    pub const RED: Rgb15 = Rgb15(0x001F);
    pub const GREEN: Rgb15 = Rgb15(0x03E0);
    pub const BLUE: Rgb15 = Rgb15(0x7C00);

    /// Each channel must be at most 31.
    #[inline]
    #[track_caller]
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        let mut raw = 0u16;
        Red::set(&mut raw, Channel::new(red as u16));
        Green::set(&mut raw, Channel::new(green as u16));
        Blue::set(&mut raw, Channel::new(blue as u16));
        Rgb15(raw)
    }

    /// Bit 15 is dropped.
    #[inline(always)]
    pub const fn from_raw(raw: u16) -> Self {
        Rgb15(raw & 0x7FFF)
    }

    #[inline(always)]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn red(self) -> u8 {
        Red::extract(self.0).get() as u8
    }

    #[inline]
    pub fn green(self) -> u8 {
        Green::extract(self.0).get() as u8
    }

    #[inline]
    pub fn blue(self) -> u8 {
        Blue::extract(self.0).get() as u8
    }

    #[inline]
    #[track_caller]
    pub fn set_red(&mut self, red: u8) {
        Red::set(&mut self.0, Channel::new(red as u16));
    }

    #[inline]
    #[track_caller]
    pub fn set_green(&mut self, green: u8) {
        Green::set(&mut self.0, Channel::new(green as u16));
    }

    #[inline]
    #[track_caller]
    pub fn set_blue(&mut self, blue: u8) {
        Blue::set(&mut self.0, Channel::new(blue as u16));
    }
}

impl From<Rgb15> for u16 {
    fn from(color: Rgb15) -> u16 {
        color.0
    }
}

impl From<u16> for Rgb15 {
    fn from(raw: u16) -> Rgb15 {
        Rgb15::from_raw(raw)
    }
}

impl FieldValue for Rgb15 {
    #[inline(always)]
    fn into_bits(self) -> u32 {
        self.0 as u32
    }

    #[inline(always)]
    fn from_bits(bits: u32) -> Self {
        Rgb15::from_raw(bits as u16)
    }
}
