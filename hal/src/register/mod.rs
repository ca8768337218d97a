//! # Video Registers
//!
//! Each register comes as a plain `Copy` value type and a live handle bound to
//! a bus.
//!
//! | Register  | Address       | Value                 | Live handle                   |
//! |-----------|---------------|-----------------------|-------------------------------|
//! | `DISPCNT` | `0x0400_0000` | [`DisplayControl`]    | [`DisplayControlRegister`]    |
//! | `DISPSTAT`| `0x0400_0004` | [`DisplayStatus`]     | [`DisplayStatusRegister`]     |
//! | `VCOUNT`  | `0x0400_0006` | [`Scanline`](crate::ranged::Scanline) | [`VerticalCounter`] |
//! | `BGxCNT`  | `0x0400_0008` + 2x | [`BackgroundControl`] | [`BackgroundControlRegister`] |
//!
//! The per-field methods on a live handle are one read and one write each.
//! To change several fields with a single write, use `modify`:
//!
//! ```ignore
//! bg.control().modify(|c| c
//!     .with_priority(Priority::new(1))
//!     .with_screen_base_block(ScreenBlock::new(8)));
//! ```

pub mod background_control;
pub mod display_control;
pub mod display_status;

pub use background_control::{BackgroundControl, BackgroundControlRegister, MapSize, PaletteMode};
pub use display_control::{
    DisplayControl, DisplayControlRegister, DisplayFlags, ObjMapping, Page, Window,
};
pub use display_status::{DisplayStatus, DisplayStatusRegister, VerticalCounter};
