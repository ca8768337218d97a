//! # Memory Map
//!
//! Fixed addresses of everything the video HAL touches. None of this memory is
//! ever allocated or freed; it exists for as long as the console is powered.
//!
//! | Address       | Region                    | Size     |
//! |---------------|---------------------------|----------|
//! | `0x0400_0000` | IO registers              | 1 KiB    |
//! | `0x0500_0000` | Background palette        | 512 B    |
//! | `0x0500_0200` | Object palette            | 512 B    |
//! | `0x0600_0000` | VRAM                      | 96 KiB   |

pub const IO_BASE: usize = 0x0400_0000;
pub const IO_SIZE: usize = 0x400;

pub const DISPCNT: usize = IO_BASE;
pub const DISPSTAT: usize = IO_BASE + 0x004;
pub const VCOUNT: usize = IO_BASE + 0x006;
pub const BGCNT_BASE: usize = IO_BASE + 0x008;
pub const BGCNT_STRIDE: usize = 2;
pub const KEYINPUT: usize = IO_BASE + 0x130;

pub const PALETTE_BASE: usize = 0x0500_0000;
pub const PALETTE_SIZE: usize = 0x400;
pub const BG_PALETTE: usize = PALETTE_BASE;
pub const OBJ_PALETTE: usize = PALETTE_BASE + 0x200;
/// Bytes between two 16-color palette banks.
pub const PALETTE_BANK_STRIDE: usize = 0x20;

pub const VRAM_BASE: usize = 0x0600_0000;
pub const VRAM_SIZE: usize = 0x1_8000;
/// Bytes per character (tile data) block.
pub const CHAR_BLOCK_STRIDE: usize = 0x4000;
/// Bytes per screen (tile map) block.
pub const SCREEN_BLOCK_STRIDE: usize = 0x800;
/// Start of the second bitmap page in modes 4 and 5.
pub const BITMAP_PAGE_STRIDE: usize = 0xA000;

/// Address of the control register for background `layer` (0–3).
#[inline(always)]
pub const fn bgcnt(layer: usize) -> usize {
    BGCNT_BASE + layer * BGCNT_STRIDE
}
