//! Background control (`BG0CNT`-`BG3CNT`, `0x0400_0008` + 2 × layer).
//!
//! | Bits  | Field                                        |
//! |-------|----------------------------------------------|
//! | 0-1   | priority, 0 drawn on top                     |
//! | 2-3   | character base block (16 KiB units)          |
//! | 6     | mosaic                                       |
//! | 7     | palette mode, 16×16 or 1×256                 |
//! | 8-12  | screen base block (2 KiB units)              |
//! | 13    | affine overflow: transparent or wraparound   |
//! | 14-15 | screen size                                  |

use crate::bus::Bus;
use crate::cell::Mmio;
use crate::field::Field;
use crate::memory::bgcnt;
use crate::mode::Layer;
use crate::ranged::{CharBlock, Priority, ScreenBlock};

pub type PriorityField = Field<u16, Priority, 2, 0>;
pub type CharacterBase = Field<u16, CharBlock, 2, 2>;
pub type Mosaic = Field<u16, bool, 1, 6>;
pub type PaletteModeField = Field<u16, PaletteMode, 1, 7>;
pub type ScreenBase = Field<u16, ScreenBlock, 5, 8>;
pub type Overflow = Field<u16, bool, 1, 13>;
pub type ScreenSize = Field<u16, MapSize, 2, 14>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum PaletteMode {
    /// 4 bits per pixel, sixteen palettes of sixteen colors.
    Color16 = 0,
    /// 8 bits per pixel, one palette of 256 colors.
    Color256 = 1,
}

field_enum!(PaletteMode { 0 => Color16, _ => Color256 });

/// Screen size code. Its meaning depends on the layer kind.
///
/// | Code    | Text (pixels) | Affine (pixels) |
/// |---------|---------------|-----------------|
/// | `Small` | 256×256       | 128×128         |
/// | `Wide`  | 512×256       | 256×256         |
/// | `Tall`  | 256×512       | 512×512         |
/// | `Large` | 512×512       | 1024×1024       |
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum MapSize {
    Small = 0,
    Wide = 1,
    Tall = 2,
    Large = 3,
}

field_enum!(MapSize { 0 => Small, 1 => Wide, 2 => Tall, _ => Large });

/// A `BGxCNT` value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct BackgroundControl(u16);

impl BackgroundControl {
    #[inline(always)]
    pub const fn from_raw(raw: u16) -> Self {
        BackgroundControl(raw)
    }

    #[inline(always)]
    pub const fn raw(self) -> u16 {
        self.0
    }

    pub fn priority(self) -> Priority {
        PriorityField::extract(self.0)
    }

    pub fn character_base_block(self) -> CharBlock {
        CharacterBase::extract(self.0)
    }

    pub fn mosaic(self) -> bool {
        Mosaic::extract(self.0)
    }

    pub fn palette_mode(self) -> PaletteMode {
        PaletteModeField::extract(self.0)
    }

    pub fn screen_base_block(self) -> ScreenBlock {
        ScreenBase::extract(self.0)
    }

    pub fn overflow(self) -> bool {
        Overflow::extract(self.0)
    }

    pub fn screen_size(self) -> MapSize {
        ScreenSize::extract(self.0)
    }

    #[track_caller]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        PriorityField::set(&mut self.0, priority);
        self
    }

    #[track_caller]
    pub fn with_character_base_block(mut self, block: CharBlock) -> Self {
        CharacterBase::set(&mut self.0, block);
        self
    }

    pub fn with_mosaic(mut self, enabled: bool) -> Self {
        Mosaic::set(&mut self.0, enabled);
        self
    }

    pub fn with_palette_mode(mut self, mode: PaletteMode) -> Self {
        PaletteModeField::set(&mut self.0, mode);
        self
    }

    #[track_caller]
    pub fn with_screen_base_block(mut self, block: ScreenBlock) -> Self {
        ScreenBase::set(&mut self.0, block);
        self
    }

    pub fn with_overflow(mut self, wrap: bool) -> Self {
        Overflow::set(&mut self.0, wrap);
        self
    }

    pub fn with_screen_size(mut self, size: MapSize) -> Self {
        ScreenSize::set(&mut self.0, size);
        self
    }
}

/// Live handle on the control register of one background layer.
///
/// Several handles on the same layer may exist at once; the last write wins.
pub struct BackgroundControlRegister<'a, B: Bus> {
    cell: Mmio<'a, B, u16>,
    layer: Layer,
}

impl<'a, B: Bus> BackgroundControlRegister<'a, B> {
    pub fn new(bus: &'a B, layer: Layer) -> Self {
        Self {
            cell: Mmio::new(bus, bgcnt(layer.index())),
            layer,
        }
    }

    #[inline(always)]
    pub fn layer(&self) -> Layer {
        self.layer
    }

    #[inline(always)]
    pub fn read(&self) -> BackgroundControl {
        BackgroundControl(self.cell.read())
    }

    #[inline(always)]
    pub fn write(&self, value: BackgroundControl) {
        self.cell.write(value.0)
    }

    #[inline]
    pub fn modify<F: FnOnce(BackgroundControl) -> BackgroundControl>(&self, f: F) {
        self.write(f(self.read()))
    }

    #[track_caller]
    pub fn set_priority(&self, priority: Priority) {
        let mut cell = self.cell;
        PriorityField::set(&mut cell, priority);
    }

    #[track_caller]
    pub fn set_character_base_block(&self, block: CharBlock) {
        let mut cell = self.cell;
        CharacterBase::set(&mut cell, block);
    }

    pub fn set_mosaic(&self, enabled: bool) {
        let mut cell = self.cell;
        Mosaic::set(&mut cell, enabled);
    }

    pub fn set_palette_mode(&self, mode: PaletteMode) {
        let mut cell = self.cell;
        PaletteModeField::set(&mut cell, mode);
    }

    #[track_caller]
    pub fn set_screen_base_block(&self, block: ScreenBlock) {
        let mut cell = self.cell;
        ScreenBase::set(&mut cell, block);
    }

    pub fn set_overflow(&self, wrap: bool) {
        let mut cell = self.cell;
        Overflow::set(&mut cell, wrap);
    }

    pub fn set_screen_size(&self, size: MapSize) {
        let mut cell = self.cell;
        ScreenSize::set(&mut cell, size);
    }
}
