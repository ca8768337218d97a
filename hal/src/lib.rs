//! # GBA Video HAL
//!
//! Typed access to the video hardware of the Game Boy Advance: the display
//! registers, palette RAM, and VRAM in its tiled and bitmap layouts.
//!
//! ## Quick Start
//!
//! Everything goes through a [`Display`](display::Display), which owns the
//! [`Bus`](bus::Bus) the registers live on:
//!
//! ```ignore
//! use gba_hal::{bus::Hardware, display::Display, mode::Mode0, tile::TextTile};
//! use gba_hal::block::Size256x256;
//! use gba_hal::palette::Color256;
//! use gba_hal::ranged::{CharBlock, ScreenBlock};
//! use gba_hal::Rgb15;
//!
//! let display = Display::new(unsafe { Hardware::new() });
//!
//! let mode = display.set_background_mode::<Mode0>();
//! let bg0 = mode.text_background0::<Size256x256, Color256>();
//! bg0.show();
//! bg0.set_character_base_block(CharBlock::new(0));
//! bg0.set_screen_base_block(ScreenBlock::new(8));
//!
//! bg0.palette().set(1, Rgb15::new(31, 31, 31));
//! bg0.screen_block().set(0, TextTile::new(1));
//! ```
//!
//! ## Video Modes
//!
//! | Mode | BG0  | BG1  | BG2                 | BG3    |
//! |------|------|------|---------------------|--------|
//! | 0    | text | text | text                | text   |
//! | 1    | text | text | affine              | -      |
//! | 2    | -    | -    | affine              | affine |
//! | 3    | -    | -    | 240×160 15-bit      | -      |
//! | 4    | -    | -    | 240×160 8-bit, 2 pages | -   |
//! | 5    | -    | -    | 160×128 15-bit, 2 pages | -  |
//!
//! [`Display::set_background_mode`](display::Display::set_background_mode)
//! returns a [`ModeScope`](display::ModeScope) that only offers the layers the
//! mode actually has. The runtime accessors on `Display` check the mode
//! register instead and return a [`CapabilityError`](error::CapabilityError).
//!
//! ## Testing Off-Device
//!
//! [`FakeBus`](bus::FakeBus) is an in-memory stand-in for the IO registers,
//! palette RAM, and VRAM, so the same code runs under `cargo test` on a host.

#![no_std]

#[macro_use]
mod macros;

pub mod background;
pub mod bitmap;
pub mod block;
pub mod bus;
pub mod cell;
pub mod color;
pub mod display;
pub mod error;
pub mod field;
pub mod frame;
pub mod input;
pub mod memory;
pub mod mode;
pub mod palette;
pub mod ranged;
pub mod register;
pub mod tile;

pub use color::Rgb15;
pub use display::Display;
pub use error::CapabilityError;
pub use ranged::Ranged;

/// A position in pixels or tiles, depending on the view it is handed to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
