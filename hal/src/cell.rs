//! # Storage Cells
//!
//! A bit-field is always packed into some storage word. Where that word lives
//! decides how it is accessed:
//!
//! | Storage            | Access                                           |
//! |--------------------|--------------------------------------------------|
//! | a plain `u16`      | ordinary loads/stores, freely cached by the compiler |
//! | [`Mmio`]           | one bus transaction per load and per store       |
//!
//! The codec in [`field`](crate::field) is generic over [`Storage`], so the
//! same descriptor works on a local copy and on the live register. Choosing
//! between them is how callers batch writes:
//!
//! ```ignore
//! // three bus round trips
//! Priority::set(&mut live, p);
//! Mosaic::set(&mut live, true);
//! ScreenBase::set(&mut live, sb);
//!
//! // one read, one write
//! let mut word = live.load();
//! Priority::set(&mut word, p);
//! Mosaic::set(&mut word, true);
//! ScreenBase::set(&mut word, sb);
//! live.store(word);
//! ```

use core::marker::PhantomData;

use bit_field::BitField;

use crate::bus::Bus;

/// An unsigned integer usable as register storage.
pub trait RegisterWord: BitField + Copy + Eq + core::fmt::Debug {
    const BITS: u32;

    /// Keep the low `Self::BITS` bits of `value`.
    fn truncate(value: u32) -> Self;
    fn widen(self) -> u32;

    fn load<B: Bus + ?Sized>(bus: &B, address: usize) -> Self;
    fn store<B: Bus + ?Sized>(self, bus: &B, address: usize);
}

impl RegisterWord for u8 {
    const BITS: u32 = 8;

    #[inline(always)]
    fn truncate(value: u32) -> Self {
        value as u8
    }

    #[inline(always)]
    fn widen(self) -> u32 {
        self as u32
    }

    #[inline(always)]
    fn load<B: Bus + ?Sized>(bus: &B, address: usize) -> Self {
        bus.read_u8(address)
    }

    #[inline(always)]
    fn store<B: Bus + ?Sized>(self, bus: &B, address: usize) {
        bus.write_u8(address, self)
    }
}

impl RegisterWord for u16 {
    const BITS: u32 = 16;

    #[inline(always)]
    fn truncate(value: u32) -> Self {
        value as u16
    }

    #[inline(always)]
    fn widen(self) -> u32 {
        self as u32
    }

    #[inline(always)]
    fn load<B: Bus + ?Sized>(bus: &B, address: usize) -> Self {
        bus.read_u16(address)
    }

    #[inline(always)]
    fn store<B: Bus + ?Sized>(self, bus: &B, address: usize) {
        bus.write_u16(address, self)
    }
}

impl RegisterWord for u32 {
    const BITS: u32 = 32;

    #[inline(always)]
    fn truncate(value: u32) -> Self {
        value
    }

    #[inline(always)]
    fn widen(self) -> u32 {
        self
    }

    #[inline(always)]
    fn load<B: Bus + ?Sized>(bus: &B, address: usize) -> Self {
        bus.read_u32(address)
    }

    #[inline(always)]
    fn store<B: Bus + ?Sized>(self, bus: &B, address: usize) {
        bus.write_u32(address, self)
    }
}

/// Somewhere a register word can be loaded from and stored to.
pub trait Storage<S: RegisterWord> {
    fn load(&self) -> S;
    fn store(&mut self, value: S);
}

/// A plain word is its own storage.
impl<S: RegisterWord> Storage<S> for S {
    #[inline(always)]
    fn load(&self) -> S {
        *self
    }

    #[inline(always)]
    fn store(&mut self, value: S) {
        *self = value;
    }
}

/// A word of width `S` at a fixed address on a bus.
///
/// Every [`load`](Storage::load) and [`store`](Storage::store) is a separate
/// bus transaction. Holding an `Mmio` does not cache anything.
pub struct Mmio<'a, B: Bus, S: RegisterWord> {
    bus: &'a B,
    address: usize,
    _word: PhantomData<S>,
}

impl<'a, B: Bus, S: RegisterWord> Mmio<'a, B, S> {
    #[inline(always)]
    pub fn new(bus: &'a B, address: usize) -> Self {
        Self {
            bus,
            address,
            _word: PhantomData,
        }
    }

    #[inline(always)]
    pub fn address(&self) -> usize {
        self.address
    }

    #[inline(always)]
    pub fn bus(&self) -> &'a B {
        self.bus
    }

    #[inline(always)]
    pub fn read(&self) -> S {
        <S as RegisterWord>::load(self.bus, self.address)
    }

    #[inline(always)]
    pub fn write(&self, value: S) {
        RegisterWord::store(value, self.bus, self.address)
    }

    /// Read once, apply `f` to a local copy, write once.
    #[inline(always)]
    pub fn modify<F: FnOnce(S) -> S>(&self, f: F) {
        self.write(f(self.read()))
    }
}

impl<B: Bus, S: RegisterWord> Clone for Mmio<'_, B, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Bus, S: RegisterWord> Copy for Mmio<'_, B, S> {}

impl<B: Bus, S: RegisterWord> Storage<S> for Mmio<'_, B, S> {
    #[inline(always)]
    fn load(&self) -> S {
        self.read()
    }

    #[inline(always)]
    fn store(&mut self, value: S) {
        self.write(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::FakeBus;
    use crate::memory::VRAM_BASE;

    #[test]
    fn mmio_goes_through_the_bus() {
        let bus = FakeBus::new();
        let mut cell = Mmio::<_, u16>::new(&bus, VRAM_BASE + 4);
        cell.store(0x1234);
        assert_eq!(bus.read_u16(VRAM_BASE + 4), 0x1234);

        bus.write_u16(VRAM_BASE + 4, 0x4321);
        assert_eq!(cell.load(), 0x4321);
    }

    #[test]
    fn modify_is_one_read_one_write() {
        let bus = FakeBus::new();
        let cell = Mmio::<_, u32>::new(&bus, VRAM_BASE);
        cell.write(0x0000_00F0);
        cell.modify(|v| v | 0x0F);
        assert_eq!(cell.read(), 0xFF);
    }

    #[test]
    fn words_truncate_to_their_width() {
        assert_eq!(u8::truncate(0x1FF), 0xFF);
        assert_eq!(u16::truncate(0x1_0001), 1);
        assert_eq!(0xABCDu16.widen(), 0xABCD);
    }
}
