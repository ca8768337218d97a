//! # Bus Access
//!
//! Every register, palette entry and VRAM cell is reached through a [`Bus`].
//! The HAL never hands out raw pointers; views keep an address and go through
//! the bus for each load and store.
//!
//! Two buses ship with the crate:
//!
//! - [`Hardware`]: volatile loads/stores against the real memory map, one bus
//!   transaction per call, never cached or reordered.
//! - [`FakeBus`]: an in-memory copy of the IO registers, palette RAM and VRAM,
//!   used to run the HAL on a host.
//!
//! ```ignore
//! let display = Display::new(unsafe { Hardware::new() });   // on the console
//! let display = Display::new(FakeBus::new());               // in tests
//! ```

use core::cell::Cell;

use log::{trace, warn};
use volatile_register::RW;

use crate::memory::{
    IO_BASE, IO_SIZE, KEYINPUT, PALETTE_BASE, PALETTE_SIZE, VRAM_BASE, VRAM_SIZE,
};

/// Width-correct, ordered access to the console's address space.
///
/// Methods take `&self`: the hardware is global state and any number of
/// handles may alias the same register.
pub trait Bus {
    fn read_u8(&self, address: usize) -> u8;
    fn write_u8(&self, address: usize, value: u8);
    fn read_u16(&self, address: usize) -> u16;
    fn write_u16(&self, address: usize, value: u16);
    fn read_u32(&self, address: usize) -> u32;
    fn write_u32(&self, address: usize, value: u32);
}

impl<B: Bus + ?Sized> Bus for &B {
    #[inline(always)]
    fn read_u8(&self, address: usize) -> u8 {
        (**self).read_u8(address)
    }

    #[inline(always)]
    fn write_u8(&self, address: usize, value: u8) {
        (**self).write_u8(address, value)
    }

    #[inline(always)]
    fn read_u16(&self, address: usize) -> u16 {
        (**self).read_u16(address)
    }

    #[inline(always)]
    fn write_u16(&self, address: usize, value: u16) {
        (**self).write_u16(address, value)
    }

    #[inline(always)]
    fn read_u32(&self, address: usize) -> u32 {
        (**self).read_u32(address)
    }

    #[inline(always)]
    fn write_u32(&self, address: usize, value: u32) {
        (**self).write_u32(address, value)
    }
}

/// The console's real memory map.
#[derive(Debug, Copy, Clone)]
pub struct Hardware {
    _private: (),
}

impl Hardware {
    /// # Safety
    ///
    /// Only valid when running on the console itself: every access turns into
    /// a volatile load or store at a fixed physical address.
    pub const unsafe fn new() -> Hardware {
        Hardware { _private: () }
    }

    #[inline(always)]
    fn reg<T: Copy>(&self, address: usize) -> &'static RW<T> {
        // Hardware can only be built through the unsafe constructor, which
        // promises the fixed addresses are mapped.
        unsafe { &*(address as *const RW<T>) }
    }
}

impl Bus for Hardware {
    #[inline(always)]
    fn read_u8(&self, address: usize) -> u8 {
        self.reg::<u8>(address).read()
    }

    #[inline(always)]
    fn write_u8(&self, address: usize, value: u8) {
        unsafe { self.reg::<u8>(address).write(value) }
    }

    #[inline(always)]
    fn read_u16(&self, address: usize) -> u16 {
        self.reg::<u16>(address).read()
    }

    #[inline(always)]
    fn write_u16(&self, address: usize, value: u16) {
        unsafe { self.reg::<u16>(address).write(value) }
    }

    #[inline(always)]
    fn read_u32(&self, address: usize) -> u32 {
        self.reg::<u32>(address).read()
    }

    #[inline(always)]
    fn write_u32(&self, address: usize, value: u32) {
        unsafe { self.reg::<u32>(address).write(value) }
    }
}

/// Raw `KEYINPUT` value with no buttons held (the lines are active-low).
pub const KEYS_RELEASED: u16 = 0x03FF;

/// In-memory stand-in for the IO block, palette RAM and VRAM.
///
/// Starts zeroed except for `KEYINPUT`, which reads as "nothing pressed".
/// Accesses outside the three regions are logged and read back as zero.
pub struct FakeBus {
    io: [Cell<u8>; IO_SIZE],
    palette: [Cell<u8>; PALETTE_SIZE],
    vram: [Cell<u8>; VRAM_SIZE],
}

impl FakeBus {
    pub fn new() -> FakeBus {
        let bus = FakeBus {
            io: [const { Cell::new(0) }; IO_SIZE],
            palette: [const { Cell::new(0) }; PALETTE_SIZE],
            vram: [const { Cell::new(0) }; VRAM_SIZE],
        };
        bus.write_u16(KEYINPUT, KEYS_RELEASED);
        bus
    }

    fn slot(&self, address: usize) -> Option<&Cell<u8>> {
        region(address, IO_BASE, &self.io)
            .or_else(|| region(address, PALETTE_BASE, &self.palette))
            .or_else(|| region(address, VRAM_BASE, &self.vram))
    }

    fn load(&self, address: usize, buf: &mut [u8]) {
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = match self.slot(address + i) {
                Some(cell) => cell.get(),
                None => {
                    warn!("read from unmapped address: {:#010X}", address + i);
                    0
                }
            };
        }
    }

    fn store(&self, address: usize, bytes: &[u8]) {
        trace!("write {:02X?} at {:#010X}", bytes, address);
        for (i, byte) in bytes.iter().enumerate() {
            match self.slot(address + i) {
                Some(cell) => cell.set(*byte),
                None => warn!("write to unmapped address: {:#010X}", address + i),
            }
        }
    }
}

#[inline(always)]
fn region(address: usize, base: usize, cells: &[Cell<u8>]) -> Option<&Cell<u8>> {
    cells.get(address.checked_sub(base)?)
}

impl Default for FakeBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for FakeBus {
    fn read_u8(&self, address: usize) -> u8 {
        let mut buf = [0; 1];
        self.load(address, &mut buf);
        buf[0]
    }

    fn write_u8(&self, address: usize, value: u8) {
        self.store(address, &[value]);
    }

    fn read_u16(&self, address: usize) -> u16 {
        let mut buf = [0; 2];
        self.load(address, &mut buf);
        u16::from_le_bytes(buf)
    }

    fn write_u16(&self, address: usize, value: u16) {
        self.store(address, &value.to_le_bytes());
    }

    fn read_u32(&self, address: usize) -> u32 {
        let mut buf = [0; 4];
        self.load(address, &mut buf);
        u32::from_le_bytes(buf)
    }

    fn write_u32(&self, address: usize, value: u32) {
        self.store(address, &value.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{BG_PALETTE, DISPCNT};

    #[test]
    fn fake_bus_is_little_endian() {
        let bus = FakeBus::new();
        bus.write_u16(VRAM_BASE, 0xBEEF);
        assert_eq!(bus.read_u8(VRAM_BASE), 0xEF);
        assert_eq!(bus.read_u8(VRAM_BASE + 1), 0xBE);

        bus.write_u32(BG_PALETTE, 0x1234_5678);
        assert_eq!(bus.read_u16(BG_PALETTE), 0x5678);
        assert_eq!(bus.read_u16(BG_PALETTE + 2), 0x1234);
    }

    #[test]
    fn fake_bus_starts_with_keys_released() {
        let bus = FakeBus::new();
        assert_eq!(bus.read_u16(KEYINPUT), KEYS_RELEASED);
        assert_eq!(bus.read_u16(DISPCNT), 0);
    }

    #[test]
    fn unmapped_accesses_read_as_zero() {
        let bus = FakeBus::new();
        bus.write_u16(0x0200_0000, 0xFFFF);
        assert_eq!(bus.read_u16(0x0200_0000), 0);
        // last byte of VRAM is mapped, the one after is not
        bus.write_u16(VRAM_BASE + VRAM_SIZE - 1, 0xAAAA);
        assert_eq!(bus.read_u8(VRAM_BASE + VRAM_SIZE - 1), 0xAA);
    }

    #[test]
    fn references_are_buses_too() {
        let bus = FakeBus::new();
        let by_ref: &FakeBus = &bus;
        by_ref.write_u16(DISPCNT, 3);
        assert_eq!(bus.read_u16(DISPCNT), 3);
    }
}
