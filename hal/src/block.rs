//! # Character and Screen Blocks
//!
//! In the tiled modes VRAM is addressed two ways at once:
//!
//! - as four 16 KiB **character blocks** holding tile pixel data
//!   ([`CharacterBlockView`]);
//! - as thirty-two 2 KiB **screen blocks** holding tile maps
//!   ([`ScreenBlockView`] for text backgrounds, [`AffineMapView`] for affine
//!   ones).
//!
//! The two overlap: screen block 8 is the start of character block 1. Keeping
//! them apart is up to the caller.
//!
//! A text map larger than 256×256 pixels spans several screen blocks, each a
//! 32×32 tile quadrant:
//!
//! ```text
//!   512×256      256×512      512×512
//! +----+----+    +----+    +----+----+
//! | 0  | 1  |    | 0  |    | 0  | 1  |
//! +----+----+    +----+    +----+----+
//!                | 1  |    | 2  | 3  |
//!                +----+    +----+----+
//! ```
//!
//! [`ScreenBlockView::index_of`] turns tile coordinates into the entry index
//! across that layout.
//!
//! VRAM ignores 8-bit stores, so every write in this module is 16 bits wide.

use core::marker::PhantomData;

use crate::bus::Bus;
use crate::memory::{CHAR_BLOCK_STRIDE, SCREEN_BLOCK_STRIDE, VRAM_BASE};
use crate::palette::PaletteFormat;
use crate::ranged::{CharBlock, ScreenBlock};
use crate::register::MapSize;
use crate::tile::{AffineTile, TextTile, TileData};

/// Tiles per side of one screen block.
pub const QUADRANT: usize = 32;

/// Size of a text background map.
pub trait TextScreenSize {
    const SIZE: MapSize;
    /// Width in tiles.
    const WIDTH: usize;
    /// Height in tiles.
    const HEIGHT: usize;
    const ENTRIES: usize = Self::WIDTH * Self::HEIGHT;
}

/// Size of an affine background map. Affine maps are always square.
pub trait AffineScreenSize {
    const SIZE: MapSize;
    /// Width and height in tiles.
    const WIDTH: usize;
    const ENTRIES: usize = Self::WIDTH * Self::WIDTH;
}

macro_rules! text_sizes {
    ($($name:ident: $code:ident, $w:literal x $h:literal;)*) => {
        $(
            #[derive(Debug, Copy, Clone, Default)]
            pub struct $name;

            impl TextScreenSize for $name {
                const SIZE: MapSize = MapSize::$code;
                const WIDTH: usize = $w;
                const HEIGHT: usize = $h;
            }
        )*
    };
}

text_sizes! {
    Size256x256: Small, 32 x 32;
    Size512x256: Wide, 64 x 32;
    Size256x512: Tall, 32 x 64;
    Size512x512: Large, 64 x 64;
}

macro_rules! affine_sizes {
    ($($name:ident: $code:ident, $w:literal;)*) => {
        $(
            #[derive(Debug, Copy, Clone, Default)]
            pub struct $name;

            impl AffineScreenSize for $name {
                const SIZE: MapSize = MapSize::$code;
                const WIDTH: usize = $w;
            }
        )*
    };
}

affine_sizes! {
    Affine128: Small, 16;
    Affine256: Wide, 32;
    Affine512: Tall, 64;
    Affine1024: Large, 128;
}

/// Tile pixel data starting at a character block.
///
/// Tile indices are not checked and may run into the following blocks.
pub struct CharacterBlockView<'a, B: Bus, F: PaletteFormat> {
    bus: &'a B,
    base: usize,
    _format: PhantomData<F>,
}

impl<'a, B: Bus, F: PaletteFormat> CharacterBlockView<'a, B, F> {
    pub fn new(bus: &'a B, block: CharBlock) -> Self {
        Self {
            bus,
            base: VRAM_BASE + block.get() as usize * CHAR_BLOCK_STRIDE,
            _format: PhantomData,
        }
    }

    #[inline(always)]
    pub fn base(&self) -> usize {
        self.base
    }

    #[inline(always)]
    fn address(&self, index: usize) -> usize {
        self.base + index * <F::Tile as TileData>::SIZE
    }

    pub fn set(&self, index: usize, tile: &F::Tile) {
        let address = self.address(index);
        for (i, pair) in tile.bytes().chunks_exact(2).enumerate() {
            self.bus
                .write_u16(address + i * 2, u16::from_le_bytes([pair[0], pair[1]]));
        }
    }

    pub fn get(&self, index: usize) -> F::Tile {
        let address = self.address(index);
        let mut tile = F::Tile::default();
        for (i, pair) in tile.bytes_mut().chunks_exact_mut(2).enumerate() {
            pair.copy_from_slice(&self.bus.read_u16(address + i * 2).to_le_bytes());
        }
        tile
    }

    /// Write `tiles` to consecutive slots starting at `first`.
    pub fn load(&self, first: usize, tiles: &[F::Tile]) {
        for (i, tile) in tiles.iter().enumerate() {
            self.set(first + i, tile);
        }
    }
}

/// Tile map of a text background, starting at a screen block.
pub struct ScreenBlockView<'a, B: Bus, S: TextScreenSize> {
    bus: &'a B,
    base: usize,
    _size: PhantomData<S>,
}

impl<'a, B: Bus, S: TextScreenSize> ScreenBlockView<'a, B, S> {
    pub fn new(bus: &'a B, block: ScreenBlock) -> Self {
        Self {
            bus,
            base: VRAM_BASE + block.get() as usize * SCREEN_BLOCK_STRIDE,
            _size: PhantomData,
        }
    }

    #[inline(always)]
    pub fn base(&self) -> usize {
        self.base
    }

    /// Entry index of tile `(x, y)`, following the screen block quadrants.
    pub fn index_of(x: usize, y: usize) -> usize {
        let quadrants_per_row = S::WIDTH / QUADRANT;
        let quadrant = (y / QUADRANT) * quadrants_per_row + x / QUADRANT;
        quadrant * QUADRANT * QUADRANT + (y % QUADRANT) * QUADRANT + x % QUADRANT
    }

    #[inline(always)]
    #[track_caller]
    fn address(&self, index: usize) -> usize {
        hal_assert!(
            index < S::ENTRIES,
            "map entry {} outside a {}x{} map",
            index,
            S::WIDTH,
            S::HEIGHT
        );
        self.base + index * 2
    }

    #[track_caller]
    pub fn get(&self, index: usize) -> TextTile {
        TextTile::from_raw(self.bus.read_u16(self.address(index)))
    }

    #[track_caller]
    pub fn set(&self, index: usize, tile: TextTile) {
        self.bus.write_u16(self.address(index), tile.raw())
    }

    #[track_caller]
    pub fn get_at(&self, x: usize, y: usize) -> TextTile {
        self.get(Self::index_of(x, y))
    }

    #[track_caller]
    pub fn set_at(&self, x: usize, y: usize, tile: TextTile) {
        self.set(Self::index_of(x, y), tile)
    }

    /// Write `tile` to every entry of the map.
    pub fn fill(&self, tile: TextTile) {
        for index in 0..S::ENTRIES {
            self.set(index, tile);
        }
    }
}

/// Tile map of an affine background: one byte per entry, row-major.
pub struct AffineMapView<'a, B: Bus, S: AffineScreenSize> {
    bus: &'a B,
    base: usize,
    _size: PhantomData<S>,
}

impl<'a, B: Bus, S: AffineScreenSize> AffineMapView<'a, B, S> {
    pub fn new(bus: &'a B, block: ScreenBlock) -> Self {
        Self {
            bus,
            base: VRAM_BASE + block.get() as usize * SCREEN_BLOCK_STRIDE,
            _size: PhantomData,
        }
    }

    #[inline(always)]
    pub fn base(&self) -> usize {
        self.base
    }

    #[inline(always)]
    pub fn index_of(x: usize, y: usize) -> usize {
        y * S::WIDTH + x
    }

    #[inline(always)]
    #[track_caller]
    fn address(&self, index: usize) -> usize {
        hal_assert!(
            index < S::ENTRIES,
            "map entry {} outside a {}x{} affine map",
            index,
            S::WIDTH,
            S::WIDTH
        );
        self.base + index
    }

    #[track_caller]
    pub fn get(&self, index: usize) -> AffineTile {
        AffineTile::new(self.bus.read_u8(self.address(index)))
    }

    /// Read the halfword holding the entry, replace its byte, write it back.
    #[track_caller]
    pub fn set(&self, index: usize, tile: AffineTile) {
        let address = self.address(index);
        let aligned = address & !1;
        let mut bytes = self.bus.read_u16(aligned).to_le_bytes();
        bytes[address & 1] = tile.index();
        self.bus.write_u16(aligned, u16::from_le_bytes(bytes));
    }

    #[track_caller]
    pub fn set_at(&self, x: usize, y: usize, tile: AffineTile) {
        self.set(Self::index_of(x, y), tile)
    }

    pub fn fill(&self, tile: AffineTile) {
        let pair = u16::from_le_bytes([tile.index(), tile.index()]);
        for offset in (0..S::ENTRIES).step_by(2) {
            self.bus.write_u16(self.base + offset, pair);
        }
    }
}
