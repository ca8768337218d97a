//! # Background Layers
//!
//! [`Background`] is the common handle for one of BG0-BG3: it only knows its
//! layer index and derives the control register address from it. It does not
//! check whether the active mode actually displays that layer; that is what
//! [`ModeScope`](crate::display::ModeScope) and the runtime accessors on
//! [`Display`](crate::display::Display) are for.
//!
//! The typed handles add the VRAM views that make sense for the layer kind:
//!
//! | Handle                | Map view              | Tile data            | Palette            |
//! |-----------------------|-----------------------|----------------------|--------------------|
//! | [`TextBackground`]    | [`ScreenBlockView`]   | `Tile4` or `Tile8`   | bank or full table |
//! | [`AffineBackground`]  | [`AffineMapView`]     | `Tile8`              | full table         |
//! | [`BitmapBackground`]  | -                     | -                    | mode 4: full table |
//!
//! Creating a text or affine handle writes its screen size and palette mode
//! into the layer's control register, in one write. Everything else about the
//! layer is left as it was.
//!
//! Any number of handles may point at the same layer.

use core::marker::PhantomData;
use core::ops::Deref;

use log::debug;

use crate::bitmap::{BitmapFormat, BitmapView};
use crate::block::{
    AffineMapView, AffineScreenSize, CharacterBlockView, ScreenBlockView, TextScreenSize,
};
use crate::bus::Bus;
use crate::mode::{Layer, Mode4};
use crate::palette::{Color16, Color256, PaletteFormat, PaletteRegion, PaletteView};
use crate::ranged::{CharBlock, PaletteBank, Priority, ScreenBlock};
use crate::register::{BackgroundControlRegister, DisplayControlRegister, DisplayFlags, Page};

/// Any background layer, with no knowledge of the active mode.
pub struct Background<'a, B: Bus> {
    bus: &'a B,
    layer: Layer,
}

impl<'a, B: Bus> Background<'a, B> {
    /// Unchecked: works whether or not the current mode displays `layer`.
    pub fn new(bus: &'a B, layer: Layer) -> Self {
        Self { bus, layer }
    }

    #[inline(always)]
    pub fn layer(&self) -> Layer {
        self.layer
    }

    #[inline(always)]
    pub fn bus(&self) -> &'a B {
        self.bus
    }

    #[inline]
    pub fn control(&self) -> BackgroundControlRegister<'a, B> {
        BackgroundControlRegister::new(self.bus, self.layer)
    }

    pub fn show(&self) {
        DisplayControlRegister::new(self.bus).show_background(self.layer)
    }

    pub fn hide(&self) {
        DisplayControlRegister::new(self.bus).hide_background(self.layer)
    }

    pub fn is_visible(&self) -> bool {
        DisplayControlRegister::new(self.bus).contains(DisplayFlags::background(self.layer))
    }

    #[track_caller]
    pub fn set_priority(&self, priority: Priority) {
        self.control().set_priority(priority)
    }

    #[track_caller]
    pub fn set_character_base_block(&self, block: CharBlock) {
        self.control().set_character_base_block(block)
    }

    #[track_caller]
    pub fn set_screen_base_block(&self, block: ScreenBlock) {
        self.control().set_screen_base_block(block)
    }

    pub fn set_mosaic(&self, enabled: bool) {
        self.control().set_mosaic(enabled)
    }

    pub fn character_base_block(&self) -> CharBlock {
        self.control().read().character_base_block()
    }

    pub fn screen_base_block(&self) -> ScreenBlock {
        self.control().read().screen_base_block()
    }
}

impl<B: Bus> Clone for Background<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Bus> Copy for Background<'_, B> {}

/// A tiled, scrolling background of size `S` whose tiles use palette format
/// `F`.
pub struct TextBackground<'a, B: Bus, S: TextScreenSize, F: PaletteFormat> {
    background: Background<'a, B>,
    _format: PhantomData<(S, F)>,
}

impl<'a, B: Bus, S: TextScreenSize, F: PaletteFormat> TextBackground<'a, B, S, F> {
    /// Writes `S`'s size code and `F`'s palette mode to the control register.
    pub fn new(bus: &'a B, layer: Layer) -> Self {
        let background = Background::new(bus, layer);
        background
            .control()
            .modify(|c| c.with_screen_size(S::SIZE).with_palette_mode(F::MODE));
        debug!("{} as {}x{} tile text background", layer, S::WIDTH, S::HEIGHT);
        Self {
            background,
            _format: PhantomData,
        }
    }

    /// Tile data, starting at the current character base block.
    pub fn character_block(&self) -> CharacterBlockView<'a, B, F> {
        CharacterBlockView::new(self.background.bus, self.character_base_block())
    }

    /// Tile map, starting at the current screen base block.
    pub fn screen_block(&self) -> ScreenBlockView<'a, B, S> {
        ScreenBlockView::new(self.background.bus, self.screen_base_block())
    }
}

impl<'a, B: Bus, S: TextScreenSize> TextBackground<'a, B, S, Color16> {
    /// One of the background palette banks a tile can select.
    pub fn palette_bank(&self, bank: PaletteBank) -> PaletteView<'a, B, Color16> {
        PaletteView::bank(self.background.bus, PaletteRegion::Background, bank)
    }
}

impl<'a, B: Bus, S: TextScreenSize> TextBackground<'a, B, S, Color256> {
    pub fn palette(&self) -> PaletteView<'a, B, Color256> {
        PaletteView::new(self.background.bus, PaletteRegion::Background)
    }
}

impl<'a, B: Bus, S: TextScreenSize, F: PaletteFormat> Deref for TextBackground<'a, B, S, F> {
    type Target = Background<'a, B>;

    fn deref(&self) -> &Background<'a, B> {
        &self.background
    }
}

/// A rotation/scaling background of size `S`. Affine tiles are always 8 bits
/// per pixel.
pub struct AffineBackground<'a, B: Bus, S: AffineScreenSize> {
    background: Background<'a, B>,
    _size: PhantomData<S>,
}

impl<'a, B: Bus, S: AffineScreenSize> AffineBackground<'a, B, S> {
    /// Writes `S`'s size code and 256-color mode to the control register.
    pub fn new(bus: &'a B, layer: Layer) -> Self {
        let background = Background::new(bus, layer);
        background
            .control()
            .modify(|c| c.with_screen_size(S::SIZE).with_palette_mode(Color256::MODE));
        debug!("{} as {}x{} tile affine background", layer, S::WIDTH, S::WIDTH);
        Self {
            background,
            _size: PhantomData,
        }
    }

    /// Wrap around at the map edges instead of showing transparency.
    pub fn set_wraparound(&self, wrap: bool) {
        self.control().set_overflow(wrap)
    }

    pub fn character_block(&self) -> CharacterBlockView<'a, B, Color256> {
        CharacterBlockView::new(self.background.bus, self.character_base_block())
    }

    pub fn map(&self) -> AffineMapView<'a, B, S> {
        AffineMapView::new(self.background.bus, self.screen_base_block())
    }

    pub fn palette(&self) -> PaletteView<'a, B, Color256> {
        PaletteView::new(self.background.bus, PaletteRegion::Background)
    }
}

impl<'a, B: Bus, S: AffineScreenSize> Deref for AffineBackground<'a, B, S> {
    type Target = Background<'a, B>;

    fn deref(&self) -> &Background<'a, B> {
        &self.background
    }
}

/// Background 2 in one of the bitmap modes.
pub struct BitmapBackground<'a, B: Bus, M: BitmapFormat> {
    background: Background<'a, B>,
    _mode: PhantomData<M>,
}

impl<'a, B: Bus, M: BitmapFormat> BitmapBackground<'a, B, M> {
    pub fn new(bus: &'a B) -> Self {
        Self {
            background: Background::new(bus, Layer::Bg2),
            _mode: PhantomData,
        }
    }

    /// The page being displayed.
    pub fn bitmap(&self) -> BitmapView<'a, B, M> {
        BitmapView::front(self.background.bus)
    }

    #[track_caller]
    pub fn page(&self, page: Page) -> BitmapView<'a, B, M> {
        BitmapView::new(self.background.bus, page)
    }

    /// The page not being displayed. Modes 4 and 5 only.
    #[track_caller]
    pub fn back_buffer(&self) -> BitmapView<'a, B, M> {
        BitmapView::back(self.background.bus)
    }

    /// Show the other page, returning the page now displayed.
    pub fn flip(&self) -> Page {
        DisplayControlRegister::new(self.background.bus).flip_frame_select()
    }
}

impl<'a, B: Bus> BitmapBackground<'a, B, Mode4> {
    /// Mode 4 pixels index the 256-color background palette.
    pub fn palette(&self) -> PaletteView<'a, B, Color256> {
        PaletteView::new(self.background.bus, PaletteRegion::Background)
    }
}

impl<'a, B: Bus, M: BitmapFormat> Deref for BitmapBackground<'a, B, M> {
    type Target = Background<'a, B>;

    fn deref(&self) -> &Background<'a, B> {
        &self.background
    }
}
