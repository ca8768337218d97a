//! # Tiles
//!
//! Pixel data lives in character blocks as 8×8 tiles; tile maps in screen
//! blocks refer to them by number.
//!
//! | Type          | Stored in        | Contents                                    |
//! |---------------|------------------|---------------------------------------------|
//! | [`Tile4`]     | character block  | 64 pixels, 4 bits each (32 bytes)           |
//! | [`Tile8`]     | character block  | 64 pixels, 8 bits each (64 bytes)           |
//! | [`TextTile`]  | text screen block| tile number, flips, palette bank (16 bits)  |
//! | [`AffineTile`]| affine map       | tile number only (8 bits)                   |
//!
//! Text and affine map entries are distinct types; a text map never accepts an
//! affine entry or the other way round.

use crate::field::Field;
use crate::ranged::{PaletteBank, TileIndex};

/// Pixel data of one 8×8 tile.
pub trait TileData: Copy + Default {
    /// Bytes per tile.
    const SIZE: usize;

    fn bytes(&self) -> &[u8];
    fn bytes_mut(&mut self) -> &mut [u8];
}

/// 8×8 pixels at 4 bits per pixel. The low nibble of each byte is the left
/// pixel of the pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(C, align(4))]
pub struct Tile4(pub [u8; 32]);

impl Tile4 {
    pub const EMPTY: Tile4 = Tile4([0; 32]);

    /// Pack 64 palette indices, row by row. Each index must be below 16.
    #[track_caller]
    pub fn from_indices(pixels: &[u8; 64]) -> Self {
        let mut tile = Tile4::EMPTY;
        for (i, &pixel) in pixels.iter().enumerate() {
            tile.set_pixel(i % 8, i / 8, pixel);
        }
        tile
    }

    /// A tile filled with one color.
    #[track_caller]
    pub fn solid(index: u8) -> Self {
        Self::from_indices(&[index; 64])
    }

    #[track_caller]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        hal_assert!(x < 8 && y < 8, "pixel ({}, {}) outside an 8x8 tile", x, y);
        let byte = self.0[(y * 8 + x) / 2];
        if x % 2 == 0 { byte & 0x0F } else { byte >> 4 }
    }

    #[track_caller]
    pub fn set_pixel(&mut self, x: usize, y: usize, index: u8) {
        hal_assert!(index < 16, "4bpp palette index {} out of range", index);
        hal_assert!(x < 8 && y < 8, "pixel ({}, {}) outside an 8x8 tile", x, y);
        let byte = &mut self.0[(y * 8 + x) / 2];
        if x % 2 == 0 {
            *byte = (*byte & 0xF0) | (index & 0x0F);
        } else {
            *byte = (*byte & 0x0F) | ((index & 0x0F) << 4);
        }
    }
}

impl Default for Tile4 {
    fn default() -> Self {
        Tile4::EMPTY
    }
}

impl TileData for Tile4 {
    const SIZE: usize = 32;

    fn bytes(&self) -> &[u8] {
        &self.0
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

/// 8×8 pixels at 8 bits per pixel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(C, align(4))]
pub struct Tile8(pub [u8; 64]);

impl Tile8 {
    pub const EMPTY: Tile8 = Tile8([0; 64]);

    pub const fn from_indices(pixels: &[u8; 64]) -> Self {
        Tile8(*pixels)
    }

    pub const fn solid(index: u8) -> Self {
        Tile8([index; 64])
    }

    #[track_caller]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        hal_assert!(x < 8 && y < 8, "pixel ({}, {}) outside an 8x8 tile", x, y);
        self.0[y * 8 + x]
    }

    #[track_caller]
    pub fn set_pixel(&mut self, x: usize, y: usize, index: u8) {
        hal_assert!(x < 8 && y < 8, "pixel ({}, {}) outside an 8x8 tile", x, y);
        self.0[y * 8 + x] = index;
    }
}

impl Default for Tile8 {
    fn default() -> Self {
        Tile8::EMPTY
    }
}

impl TileData for Tile8 {
    const SIZE: usize = 64;

    fn bytes(&self) -> &[u8] {
        &self.0
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

type Index = Field<u16, TileIndex, 10, 0>;
type HFlip = Field<u16, bool, 1, 10>;
type VFlip = Field<u16, bool, 1, 11>;
type Bank = Field<u16, PaletteBank, 4, 12>;

/// A text background map entry.
///
/// ```text
/// 15  12 11 10 9            0
/// | bank | V | H | tile number |
/// ```
///
/// The palette bank is ignored by 256-color backgrounds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct TextTile(u16);

impl TextTile {
    #[track_caller]
    pub fn new(index: u16) -> Self {
        let mut raw = 0u16;
        Index::set(&mut raw, TileIndex::new(index));
        TextTile(raw)
    }

    #[inline(always)]
    pub const fn from_raw(raw: u16) -> Self {
        TextTile(raw)
    }

    #[inline(always)]
    pub const fn raw(self) -> u16 {
        self.0
    }

    pub fn index(self) -> u16 {
        Index::extract(self.0).get()
    }

    pub fn hflip(self) -> bool {
        HFlip::extract(self.0)
    }

    pub fn vflip(self) -> bool {
        VFlip::extract(self.0)
    }

    pub fn palette_bank(self) -> PaletteBank {
        Bank::extract(self.0)
    }

    pub fn with_hflip(mut self, flip: bool) -> Self {
        HFlip::set(&mut self.0, flip);
        self
    }

    pub fn with_vflip(mut self, flip: bool) -> Self {
        VFlip::set(&mut self.0, flip);
        self
    }

    pub fn with_palette_bank(mut self, bank: PaletteBank) -> Self {
        Bank::set(&mut self.0, bank);
        self
    }
}

/// An affine background map entry: a bare tile number.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct AffineTile(u8);

impl AffineTile {
    #[inline(always)]
    pub const fn new(index: u8) -> Self {
        AffineTile(index)
    }

    #[inline(always)]
    pub const fn index(self) -> u8 {
        self.0
    }
}
