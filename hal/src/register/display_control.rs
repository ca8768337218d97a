//! Display control (`DISPCNT`, `0x0400_0000`).
//!
//! | Bits  | Field                                   |
//! |-------|-----------------------------------------|
//! | 0-2   | background mode                         |
//! | 4     | frame select (modes 4 and 5)            |
//! | 5     | OAM accessible during h-blank           |
//! | 6     | OBJ character mapping, 2D or 1D         |
//! | 7     | forced blank                            |
//! | 8-11  | BG0-BG3 visible                         |
//! | 12    | objects visible                         |
//! | 13-15 | window 0, window 1, object window       |

use crate::bus::Bus;
use crate::cell::Mmio;
use crate::field::Field;
use crate::memory::DISPCNT;
use crate::mode::{Layer, VideoMode};

/// Raw mode field. Codes 6 and 7 can be read back but are not modes.
pub type ModeField = Field<u16, u8, 3, 0>;
pub type FrameSelect = Field<u16, Page, 1, 4>;
pub type ObjMappingField = Field<u16, ObjMapping, 1, 6>;

bitflags::bitflags! {
    /// The single-bit switches of `DISPCNT`.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct DisplayFlags: u16 {
        /// Show page 1 instead of page 0 in modes 4 and 5.
        const FRAME_SELECT   = 1 << 4;
        /// Let the CPU reach OAM during h-blank.
        const HBLANK_FREE    = 1 << 5;
        /// Lay object tiles out one-dimensionally.
        const OBJ_1D_MAPPING = 1 << 6;
        /// Blank the screen and give the CPU full VRAM access.
        const FORCED_BLANK   = 1 << 7;
        const BG0            = 1 << 8;
        const BG1            = 1 << 9;
        const BG2            = 1 << 10;
        const BG3            = 1 << 11;
        const OBJ            = 1 << 12;
        const WIN0           = 1 << 13;
        const WIN1           = 1 << 14;
        const OBJ_WIN        = 1 << 15;
    }
}

impl DisplayFlags {
    /// Visibility bit of `layer`.
    #[inline(always)]
    pub const fn background(layer: Layer) -> DisplayFlags {
        DisplayFlags::from_bits_retain(1 << (8 + layer.index()))
    }
}

/// Which of the two bitmap pages is meant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Page {
    /// `0x0600_0000`
    Front = 0,
    /// `0x0600_A000`
    Back = 1,
}

impl Page {
    #[inline(always)]
    pub const fn other(self) -> Page {
        match self {
            Page::Front => Page::Back,
            Page::Back => Page::Front,
        }
    }
}

field_enum!(Page { 0 => Front, _ => Back });

/// Object character VRAM mapping.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ObjMapping {
    /// Tiles of a multi-tile object are laid out as a 32×32 tile matrix.
    TwoDimensional = 0,
    /// Tiles of a multi-tile object follow each other.
    OneDimensional = 1,
}

field_enum!(ObjMapping { 0 => TwoDimensional, _ => OneDimensional });

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Window {
    Win0,
    Win1,
    Object,
}

impl Window {
    #[inline(always)]
    pub const fn flag(self) -> DisplayFlags {
        match self {
            Window::Win0 => DisplayFlags::WIN0,
            Window::Win1 => DisplayFlags::WIN1,
            Window::Object => DisplayFlags::OBJ_WIN,
        }
    }
}

/// A `DISPCNT` value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct DisplayControl(u16);

impl DisplayControl {
    #[inline(always)]
    pub const fn from_raw(raw: u16) -> Self {
        DisplayControl(raw)
    }

    #[inline(always)]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline(always)]
    pub fn mode_code(self) -> u8 {
        ModeField::extract(self.0)
    }

    pub fn video_mode(self) -> Option<VideoMode> {
        VideoMode::from_code(self.mode_code())
    }

    /// Replace bits 0-2 only.
    #[inline]
    pub fn with_video_mode(mut self, mode: VideoMode) -> Self {
        ModeField::set(&mut self.0, mode.code());
        self
    }

    #[inline(always)]
    pub fn flags(self) -> DisplayFlags {
        DisplayFlags::from_bits_truncate(self.0)
    }

    #[inline]
    pub fn with_flags(self, flags: DisplayFlags, enabled: bool) -> Self {
        if enabled {
            DisplayControl(self.0 | flags.bits())
        } else {
            DisplayControl(self.0 & !flags.bits())
        }
    }

    #[inline(always)]
    pub fn contains(self, flags: DisplayFlags) -> bool {
        self.flags().contains(flags)
    }

    pub fn is_background_visible(self, layer: Layer) -> bool {
        self.contains(DisplayFlags::background(layer))
    }

    /// The page currently being displayed.
    #[inline(always)]
    pub fn frame_select(self) -> Page {
        FrameSelect::extract(self.0)
    }

    #[inline]
    pub fn with_frame_select(mut self, page: Page) -> Self {
        FrameSelect::set(&mut self.0, page);
        self
    }

    #[inline(always)]
    pub fn obj_mapping(self) -> ObjMapping {
        ObjMappingField::extract(self.0)
    }

    #[inline]
    pub fn with_obj_mapping(mut self, mapping: ObjMapping) -> Self {
        ObjMappingField::set(&mut self.0, mapping);
        self
    }
}

/// Live handle on `DISPCNT`.
pub struct DisplayControlRegister<'a, B: Bus> {
    cell: Mmio<'a, B, u16>,
}

impl<'a, B: Bus> DisplayControlRegister<'a, B> {
    pub fn new(bus: &'a B) -> Self {
        Self {
            cell: Mmio::new(bus, DISPCNT),
        }
    }

    #[inline(always)]
    pub fn read(&self) -> DisplayControl {
        DisplayControl(self.cell.read())
    }

    #[inline(always)]
    pub fn write(&self, value: DisplayControl) {
        self.cell.write(value.0)
    }

    /// One read, one write.
    #[inline]
    pub fn modify<F: FnOnce(DisplayControl) -> DisplayControl>(&self, f: F) {
        self.write(f(self.read()))
    }

    #[inline]
    pub fn video_mode(&self) -> Option<VideoMode> {
        self.read().video_mode()
    }

    /// Overwrite the mode field, leaving bits 3-15 as they are.
    #[inline]
    pub fn set_video_mode(&self, mode: VideoMode) {
        let mut cell = self.cell;
        ModeField::set(&mut cell, mode.code());
    }

    #[inline]
    pub fn contains(&self, flags: DisplayFlags) -> bool {
        self.read().contains(flags)
    }

    #[inline]
    pub fn insert(&self, flags: DisplayFlags) {
        self.cell.modify(|v| v | flags.bits())
    }

    #[inline]
    pub fn remove(&self, flags: DisplayFlags) {
        self.cell.modify(|v| v & !flags.bits())
    }

    #[inline]
    pub fn toggle(&self, flags: DisplayFlags) {
        self.cell.modify(|v| v ^ flags.bits())
    }

    pub fn show_background(&self, layer: Layer) {
        self.insert(DisplayFlags::background(layer))
    }

    pub fn hide_background(&self, layer: Layer) {
        self.remove(DisplayFlags::background(layer))
    }

    pub fn show_objects(&self) {
        self.insert(DisplayFlags::OBJ)
    }

    pub fn hide_objects(&self) {
        self.remove(DisplayFlags::OBJ)
    }

    pub fn show_window(&self, window: Window) {
        self.insert(window.flag())
    }

    pub fn hide_window(&self, window: Window) {
        self.remove(window.flag())
    }

    pub fn enable_forced_blank(&self) {
        self.insert(DisplayFlags::FORCED_BLANK)
    }

    pub fn disable_forced_blank(&self) {
        self.remove(DisplayFlags::FORCED_BLANK)
    }

    pub fn set_hblank_free(&self, free: bool) {
        if free {
            self.insert(DisplayFlags::HBLANK_FREE)
        } else {
            self.remove(DisplayFlags::HBLANK_FREE)
        }
    }

    #[inline]
    pub fn frame_select(&self) -> Page {
        self.read().frame_select()
    }

    pub fn set_frame_select(&self, page: Page) {
        let mut cell = self.cell;
        FrameSelect::set(&mut cell, page);
    }

    /// Swap the displayed page, returning the page now shown.
    pub fn flip_frame_select(&self) -> Page {
        let mut cell = self.cell;
        FrameSelect::flip(&mut cell);
        FrameSelect::get(&cell)
    }

    pub fn set_obj_mapping(&self, mapping: ObjMapping) {
        let mut cell = self.cell;
        ObjMappingField::set(&mut cell, mapping);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::FakeBus;

    #[test]
    fn mode_write_keeps_the_flags() {
        let bus = FakeBus::new();
        let reg = DisplayControlRegister::new(&bus);
        reg.insert(DisplayFlags::BG2 | DisplayFlags::OBJ | DisplayFlags::FRAME_SELECT);
        let before = reg.read().raw();

        reg.set_video_mode(VideoMode::Mode4);
        reg.set_video_mode(VideoMode::Mode4);
        assert_eq!(reg.read().raw(), (before & !0x7) | 4);
        assert_eq!(reg.video_mode(), Some(VideoMode::Mode4));
    }

    #[test]
    fn background_flags_follow_the_layer() {
        assert_eq!(DisplayFlags::background(Layer::Bg0), DisplayFlags::BG0);
        assert_eq!(DisplayFlags::background(Layer::Bg3), DisplayFlags::BG3);

        let bus = FakeBus::new();
        let reg = DisplayControlRegister::new(&bus);
        reg.show_background(Layer::Bg1);
        reg.show_background(Layer::Bg3);
        reg.hide_background(Layer::Bg1);
        assert_eq!(bus.read_u16(DISPCNT), 0x0800);
        assert!(reg.read().is_background_visible(Layer::Bg3));
    }

    #[test]
    fn frame_select_flips() {
        let bus = FakeBus::new();
        let reg = DisplayControlRegister::new(&bus);
        assert_eq!(reg.frame_select(), Page::Front);
        assert_eq!(reg.flip_frame_select(), Page::Back);
        assert_eq!(bus.read_u16(DISPCNT), 0x0010);
        assert_eq!(reg.flip_frame_select(), Page::Front);
    }

    #[test]
    fn windows_objects_and_blank() {
        let bus = FakeBus::new();
        let reg = DisplayControlRegister::new(&bus);
        reg.show_objects();
        reg.show_window(Window::Win1);
        reg.show_window(Window::Object);
        reg.enable_forced_blank();
        reg.set_obj_mapping(ObjMapping::OneDimensional);
        assert_eq!(bus.read_u16(DISPCNT), 0xD0C0);

        reg.hide_window(Window::Object);
        reg.disable_forced_blank();
        reg.toggle(DisplayFlags::OBJ);
        assert_eq!(bus.read_u16(DISPCNT), 0x4040);
        assert_eq!(reg.read().obj_mapping(), ObjMapping::OneDimensional);
    }

    #[test]
    fn value_builders() {
        let value = DisplayControl::default()
            .with_video_mode(VideoMode::Mode3)
            .with_flags(DisplayFlags::BG2, true)
            .with_frame_select(Page::Back);
        assert_eq!(value.raw(), 0x0413);
        assert_eq!(value.with_flags(DisplayFlags::BG2, false).raw(), 0x0013);
        assert_eq!(DisplayControl::from_raw(7).video_mode(), None);
    }
}
