//! Display status (`DISPSTAT`, `0x0400_0004`) and the vertical counter
//! (`VCOUNT`, `0x0400_0006`).
//!
//! | Bits | Field                         | Access |
//! |------|-------------------------------|--------|
//! | 0    | in v-blank                    | R      |
//! | 1    | in h-blank                    | R      |
//! | 2    | v-counter match               | R      |
//! | 3    | v-blank IRQ enable            | RW     |
//! | 4    | h-blank IRQ enable            | RW     |
//! | 5    | v-counter IRQ enable          | RW     |
//! | 8-15 | v-count setting (0-227)       | RW     |

use crate::bus::Bus;
use crate::cell::Mmio;
use crate::field::Field;
use crate::memory::{DISPSTAT, VCOUNT};
use crate::ranged::Scanline;

pub type InVBlank = Field<u16, bool, 1, 0>;
pub type InHBlank = Field<u16, bool, 1, 1>;
pub type VCountMatch = Field<u16, bool, 1, 2>;
pub type VBlankIrq = Field<u16, bool, 1, 3>;
pub type HBlankIrq = Field<u16, bool, 1, 4>;
pub type VCountIrq = Field<u16, bool, 1, 5>;
pub type VCountSetting = Field<u16, Scanline, 8, 8>;
pub type CurrentScanline = Field<u16, Scanline, 8, 0>;

/// A `DISPSTAT` value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct DisplayStatus(u16);

impl DisplayStatus {
    #[inline(always)]
    pub const fn from_raw(raw: u16) -> Self {
        DisplayStatus(raw)
    }

    #[inline(always)]
    pub const fn raw(self) -> u16 {
        self.0
    }

    pub fn in_vblank(self) -> bool {
        InVBlank::extract(self.0)
    }

    pub fn in_hblank(self) -> bool {
        InHBlank::extract(self.0)
    }

    pub fn vcount_match(self) -> bool {
        VCountMatch::extract(self.0)
    }

    pub fn vblank_irq(self) -> bool {
        VBlankIrq::extract(self.0)
    }

    pub fn hblank_irq(self) -> bool {
        HBlankIrq::extract(self.0)
    }

    pub fn vcount_irq(self) -> bool {
        VCountIrq::extract(self.0)
    }

    pub fn vcount_setting(self) -> Scanline {
        VCountSetting::extract(self.0)
    }

    pub fn with_vblank_irq(mut self, enabled: bool) -> Self {
        VBlankIrq::set(&mut self.0, enabled);
        self
    }

    pub fn with_hblank_irq(mut self, enabled: bool) -> Self {
        HBlankIrq::set(&mut self.0, enabled);
        self
    }

    pub fn with_vcount_irq(mut self, enabled: bool) -> Self {
        VCountIrq::set(&mut self.0, enabled);
        self
    }

    pub fn with_vcount_setting(mut self, line: Scanline) -> Self {
        VCountSetting::set(&mut self.0, line);
        self
    }
}

/// Live handle on `DISPSTAT`.
///
/// The three status bits are driven by the display; writing them has no
/// effect on the hardware.
pub struct DisplayStatusRegister<'a, B: Bus> {
    cell: Mmio<'a, B, u16>,
}

impl<'a, B: Bus> DisplayStatusRegister<'a, B> {
    pub fn new(bus: &'a B) -> Self {
        Self {
            cell: Mmio::new(bus, DISPSTAT),
        }
    }

    #[inline(always)]
    pub fn read(&self) -> DisplayStatus {
        DisplayStatus(self.cell.read())
    }

    #[inline(always)]
    pub fn write(&self, value: DisplayStatus) {
        self.cell.write(value.0)
    }

    #[inline]
    pub fn modify<F: FnOnce(DisplayStatus) -> DisplayStatus>(&self, f: F) {
        self.write(f(self.read()))
    }

    pub fn in_vblank(&self) -> bool {
        InVBlank::get(&self.cell)
    }

    pub fn in_hblank(&self) -> bool {
        InHBlank::get(&self.cell)
    }

    pub fn vcount_match(&self) -> bool {
        VCountMatch::get(&self.cell)
    }

    pub fn set_vblank_irq(&self, enabled: bool) {
        let mut cell = self.cell;
        VBlankIrq::set(&mut cell, enabled);
    }

    pub fn set_hblank_irq(&self, enabled: bool) {
        let mut cell = self.cell;
        HBlankIrq::set(&mut cell, enabled);
    }

    pub fn set_vcount_irq(&self, enabled: bool) {
        let mut cell = self.cell;
        VCountIrq::set(&mut cell, enabled);
    }

    pub fn vcount_setting(&self) -> Scanline {
        VCountSetting::get(&self.cell)
    }

    /// Scanline at which the v-counter match flag is raised.
    pub fn set_vcount_setting(&self, line: Scanline) {
        let mut cell = self.cell;
        VCountSetting::set(&mut cell, line);
    }
}

/// Read-only handle on `VCOUNT`.
pub struct VerticalCounter<'a, B: Bus> {
    cell: Mmio<'a, B, u16>,
}

impl<'a, B: Bus> VerticalCounter<'a, B> {
    pub fn new(bus: &'a B) -> Self {
        Self {
            cell: Mmio::new(bus, VCOUNT),
        }
    }

    /// The scanline being drawn, 0-227. Lines 160 and up are v-blank.
    #[inline(always)]
    pub fn read(&self) -> Scanline {
        CurrentScanline::get(&self.cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::FakeBus;

    #[test]
    fn status_bits_are_decoded() {
        let status = DisplayStatus::from_raw(0xA315);
        assert!(status.in_vblank());
        assert!(!status.in_hblank());
        assert!(status.vcount_match());
        assert!(!status.vblank_irq());
        assert!(status.hblank_irq());
        assert!(!status.vcount_irq());
        assert_eq!(status.vcount_setting().get(), 0xA3);
    }

    #[test]
    fn irq_enables_leave_the_setting_alone() {
        let bus = FakeBus::new();
        let reg = DisplayStatusRegister::new(&bus);
        reg.set_vcount_setting(Scanline::new(100));
        reg.set_vblank_irq(true);
        reg.set_vcount_irq(true);
        reg.set_vblank_irq(false);
        assert_eq!(bus.read_u16(DISPSTAT), 100 << 8 | 0x20);
        assert_eq!(reg.vcount_setting().get(), 100);
    }

    #[test]
    fn vertical_counter_reads_the_low_byte() {
        let bus = FakeBus::new();
        bus.write_u16(VCOUNT, 0xFF00 | 159);
        assert_eq!(VerticalCounter::new(&bus).read().get(), 159);
    }

    #[test]
    fn builder_and_live_handle_agree() {
        let bus = FakeBus::new();
        let reg = DisplayStatusRegister::new(&bus);
        reg.modify(|s| s.with_hblank_irq(true).with_vcount_setting(Scanline::new(227)));
        assert_eq!(reg.read().raw(), 0xE310);
    }
}
