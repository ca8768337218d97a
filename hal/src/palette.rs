//! # Palette RAM
//!
//! Palette RAM holds two tables of 256 [`Rgb15`] colors, one for backgrounds
//! and one for objects. A background in 16-color mode picks one of sixteen
//! banks of sixteen entries; in 256-color mode it sees the whole table.
//!
//! ```text
//! 0x0500_0000  bank 0  [0..16) | bank 1 [0..16) | ... | bank 15  (background)
//! 0x0500_0200  bank 0  [0..16) | bank 1 [0..16) | ... | bank 15  (object)
//! ```
//!
//! Entry `i` of bank `b` lives at `base + b * 0x20 + i * 2`. Entry indices are
//! not checked: an index past the end of a bank lands in the next bank, and
//! one past the end of the table lands in the other region.

use core::marker::PhantomData;

use crate::bus::Bus;
use crate::cell::Mmio;
use crate::color::Rgb15;
use crate::field::Field;
use crate::memory::{BG_PALETTE, OBJ_PALETTE, PALETTE_BANK_STRIDE};
use crate::ranged::PaletteBank;
use crate::register::PaletteMode;
use crate::tile::{Tile4, Tile8, TileData};

/// Background or object half of palette RAM.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PaletteRegion {
    Background,
    Object,
}

impl PaletteRegion {
    #[inline(always)]
    pub const fn base(self) -> usize {
        match self {
            PaletteRegion::Background => BG_PALETTE,
            PaletteRegion::Object => OBJ_PALETTE,
        }
    }
}

/// How tiles index into the palette.
pub trait PaletteFormat {
    /// Value of the background control palette bit.
    const MODE: PaletteMode;
    /// Colors addressable from one tile.
    const ENTRIES: usize;
    /// Pixel data of one 8×8 tile.
    type Tile: TileData;
}

/// 4 bits per pixel, a bank chosen per tile.
#[derive(Debug, Copy, Clone, Default)]
pub struct Color16;

/// 8 bits per pixel, one shared palette.
#[derive(Debug, Copy, Clone, Default)]
pub struct Color256;

impl PaletteFormat for Color16 {
    const MODE: PaletteMode = PaletteMode::Color16;
    const ENTRIES: usize = 16;
    type Tile = Tile4;
}

impl PaletteFormat for Color256 {
    const MODE: PaletteMode = PaletteMode::Color256;
    const ENTRIES: usize = 256;
    type Tile = Tile8;
}

/// One palette cell. Bit 15 is unused.
pub type Entry = Field<u16, Rgb15, 15, 0>;

/// Indexed access to one palette bank.
pub struct PaletteView<'a, B: Bus, F: PaletteFormat> {
    bus: &'a B,
    base: usize,
    _format: PhantomData<F>,
}

impl<'a, B: Bus> PaletteView<'a, B, Color16> {
    /// One of the sixteen 16-color banks of `region`.
    pub fn bank(bus: &'a B, region: PaletteRegion, bank: PaletteBank) -> Self {
        Self {
            bus,
            base: region.base() + bank.get() as usize * PALETTE_BANK_STRIDE,
            _format: PhantomData,
        }
    }
}

impl<'a, B: Bus> PaletteView<'a, B, Color256> {
    /// The whole 256-color table of `region`.
    pub fn new(bus: &'a B, region: PaletteRegion) -> Self {
        Self {
            bus,
            base: region.base(),
            _format: PhantomData,
        }
    }
}

impl<'a, B: Bus, F: PaletteFormat> PaletteView<'a, B, F> {
    #[inline(always)]
    pub fn base(&self) -> usize {
        self.base
    }

    #[inline(always)]
    fn address(&self, index: usize) -> usize {
        self.base + index * 2
    }

    /// The bus-backed cell of entry `index`.
    #[inline(always)]
    pub fn cell(&self, index: usize) -> Mmio<'a, B, u16> {
        Mmio::new(self.bus, self.address(index))
    }

    #[inline]
    pub fn get(&self, index: usize) -> Rgb15 {
        Entry::get(&self.cell(index))
    }

    #[inline]
    pub fn set(&self, index: usize, color: Rgb15) {
        self.cell(index).write(Entry::insert(0, color))
    }

    /// Write `colors` to consecutive entries starting at 0. At most
    /// `F::ENTRIES` colors fit.
    #[track_caller]
    pub fn load(&self, colors: &[Rgb15]) {
        hal_assert!(
            colors.len() <= F::ENTRIES,
            "{} colors do not fit a {} entry palette",
            colors.len(),
            F::ENTRIES
        );
        for (index, color) in colors.iter().enumerate() {
            self.set(index, *color);
        }
    }
}
