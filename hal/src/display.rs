//! # Display
//!
//! [`Display`] owns the bus and hands out every other view. Choosing a mode
//! goes through it:
//!
//! ```ignore
//! let display = Display::new(unsafe { Hardware::new() });
//!
//! let mode = display.set_background_mode::<Mode1>();
//! let hud = mode.text_background0::<Size256x256, Color16>();
//! let floor = mode.affine_background2::<Affine512>();
//! // mode.text_background2() does not exist: BG2 is affine in mode 1
//! ```
//!
//! ## Two ways to reach a layer
//!
//! | Path                              | Checked against           | On mismatch            |
//! |-----------------------------------|---------------------------|------------------------|
//! | [`ModeScope`] accessors           | the scope's mode type     | does not compile       |
//! | `Display::text_background` & co.  | the live mode register    | `Err(CapabilityError)` |
//! | [`Background::new`]               | nothing                   | writes anyway          |
//!
//! A `ModeScope` only knows which mode it was created for. If something else
//! changes the mode register while it is alive, its accessors keep compiling;
//! the mismatch is caught by `hal_assert!` (debug builds, or the `checked`
//! feature).

use core::marker::PhantomData;

use log::{debug, warn};

use crate::background::{AffineBackground, Background, BitmapBackground, TextBackground};
use crate::bitmap::{BitmapFormat, BitmapView};
use crate::block::{AffineScreenSize, TextScreenSize};
use crate::bus::Bus;
use crate::error::CapabilityError;
use crate::frame::ScanlineSource;
use crate::mode::{
    BackgroundMode, Layer, LayerCapabilities, LayerKind, LayerSet, Mode0, Mode1, Mode2, Mode3,
    Mode4, Mode5, VideoMode,
};
use crate::palette::{Color256, PaletteFormat, PaletteRegion, PaletteView};
use crate::ranged::Scanline;
use crate::register::{DisplayControlRegister, DisplayStatusRegister, VerticalCounter};

/// The video hardware, reached through `B`.
pub struct Display<B: Bus> {
    bus: B,
}

impl<B: Bus> Display<B> {
    pub const fn new(bus: B) -> Self {
        Self { bus }
    }

    #[inline(always)]
    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn into_bus(self) -> B {
        self.bus
    }

    #[inline]
    pub fn control(&self) -> DisplayControlRegister<'_, B> {
        DisplayControlRegister::new(&self.bus)
    }

    #[inline]
    pub fn status(&self) -> DisplayStatusRegister<'_, B> {
        DisplayStatusRegister::new(&self.bus)
    }

    #[inline]
    pub fn vcount(&self) -> Scanline {
        VerticalCounter::new(&self.bus).read()
    }

    /// The mode the register currently holds.
    pub fn current_mode(&self) -> Result<VideoMode, CapabilityError> {
        let code = self.control().read().mode_code();
        VideoMode::from_code(code).ok_or_else(|| {
            warn!("mode register holds prohibited code {}", code);
            CapabilityError::UnknownMode(code)
        })
    }

    /// Switch to mode `M`, leaving every other `DISPCNT` bit and all of VRAM
    /// untouched.
    pub fn set_background_mode<M: BackgroundMode>(&self) -> ModeScope<'_, B, M> {
        let control = self.control();
        let before = control.read().mode_code();
        control.set_video_mode(M::MODE);
        debug!("background mode {} -> {}", before, M::MODE.code());
        ModeScope::new(self)
    }

    /// A scope for the mode already active, without writing anything.
    ///
    /// Asserts that the register really holds `M`.
    #[track_caller]
    pub fn background_mode<M: BackgroundMode>(&self) -> ModeScope<'_, B, M> {
        let scope = ModeScope::new(self);
        scope.check();
        scope
    }

    /// Reads `DISPCNT` once and returns the mode it held with the layer's kind.
    fn layer_kind(&self, layer: Layer) -> Result<(VideoMode, LayerKind), CapabilityError> {
        let mode = self.current_mode()?;
        match mode.layer_kind(layer) {
            Some(kind) => Ok((mode, kind)),
            None => {
                warn!("{} is not displayed in {}", layer, mode);
                Err(CapabilityError::UnsupportedLayer { mode, layer })
            }
        }
    }

    fn expect_kind(&self, layer: Layer, expected: LayerKind) -> Result<(), CapabilityError> {
        let (mode, found) = self.layer_kind(layer)?;
        if found == expected {
            return Ok(());
        }

        warn!("{} is a {} layer in {}, not {}", layer, found, mode, expected);
        Err(CapabilityError::WrongLayerKind {
            mode,
            layer,
            expected,
            found,
        })
    }

    /// The common handle on `layer`, if the current mode displays it.
    pub fn background(&self, layer: Layer) -> Result<Background<'_, B>, CapabilityError> {
        self.layer_kind(layer)?;
        Ok(Background::new(&self.bus, layer))
    }

    /// `layer` as a text background, if it is one in the current mode.
    pub fn text_background<S: TextScreenSize, F: PaletteFormat>(
        &self,
        layer: Layer,
    ) -> Result<TextBackground<'_, B, S, F>, CapabilityError> {
        self.expect_kind(layer, LayerKind::Text)?;
        Ok(TextBackground::new(&self.bus, layer))
    }

    /// `layer` as an affine background, if it is one in the current mode.
    pub fn affine_background<S: AffineScreenSize>(
        &self,
        layer: Layer,
    ) -> Result<AffineBackground<'_, B, S>, CapabilityError> {
        self.expect_kind(layer, LayerKind::Affine)?;
        Ok(AffineBackground::new(&self.bus, layer))
    }

    /// The displayed page of the framebuffer, if the current mode is `M`.
    pub fn bitmap<M: BitmapFormat>(&self) -> Result<BitmapView<'_, B, M>, CapabilityError> {
        self.expect_kind(Layer::Bg2, LayerKind::Bitmap(M::GEOMETRY))?;
        Ok(BitmapView::front(&self.bus))
    }

    pub fn show_background(&self, layer: Layer) -> Result<(), CapabilityError> {
        self.background(layer).map(|bg| bg.show())
    }

    pub fn hide_background(&self, layer: Layer) -> Result<(), CapabilityError> {
        self.background(layer).map(|bg| bg.hide())
    }
}

impl<B: Bus> ScanlineSource for Display<B> {
    #[inline(always)]
    fn scanline(&self) -> u16 {
        self.vcount().get()
    }
}

/// What can be done while mode `M` is active.
///
/// Returned by [`Display::set_background_mode`] and
/// [`Display::background_mode`]. Each mode has its own set of accessors;
/// layers the mode does not display have none.
pub struct ModeScope<'a, B: Bus, M: BackgroundMode> {
    display: &'a Display<B>,
    _mode: PhantomData<M>,
}

impl<'a, B: Bus, M: BackgroundMode> ModeScope<'a, B, M> {
    fn new(display: &'a Display<B>) -> Self {
        Self {
            display,
            _mode: PhantomData,
        }
    }

    #[track_caller]
    fn check(&self) {
        let code = self.display.control().read().mode_code();
        hal_assert!(
            code == M::MODE.code(),
            "{} scope used while the register holds mode {}",
            M::MODE,
            code
        );
    }

    #[inline(always)]
    fn bus(&self) -> &'a B {
        &self.display.bus
    }

    #[inline(always)]
    pub fn mode(&self) -> VideoMode {
        M::MODE
    }

    #[inline(always)]
    pub fn display(&self) -> &'a Display<B> {
        self.display
    }

    pub fn layers(&self) -> LayerSet {
        M::default().layers()
    }

    fn supported(&self, layer: Layer) -> Result<Background<'a, B>, CapabilityError> {
        if self.layers().contains_layer(layer) {
            Ok(Background::new(self.bus(), layer))
        } else {
            warn!("{} is not displayed in {}", layer, M::MODE);
            Err(CapabilityError::UnsupportedLayer {
                mode: M::MODE,
                layer,
            })
        }
    }

    /// Turn on `layer`, if this mode displays it.
    #[track_caller]
    pub fn show_background(&self, layer: Layer) -> Result<(), CapabilityError> {
        self.check();
        self.supported(layer).map(|bg| bg.show())
    }

    #[track_caller]
    pub fn hide_background(&self, layer: Layer) -> Result<(), CapabilityError> {
        self.check();
        self.supported(layer).map(|bg| bg.hide())
    }

    #[track_caller]
    fn text<S: TextScreenSize, F: PaletteFormat>(
        &self,
        layer: Layer,
    ) -> TextBackground<'a, B, S, F> {
        self.check();
        TextBackground::new(self.bus(), layer)
    }

    #[track_caller]
    fn affine<S: AffineScreenSize>(&self, layer: Layer) -> AffineBackground<'a, B, S> {
        self.check();
        AffineBackground::new(self.bus(), layer)
    }
}

impl<'a, B: Bus> ModeScope<'a, B, Mode0> {
    #[track_caller]
    pub fn text_background0<S: TextScreenSize, F: PaletteFormat>(
        &self,
    ) -> TextBackground<'a, B, S, F> {
        self.text(Layer::Bg0)
    }

    #[track_caller]
    pub fn text_background1<S: TextScreenSize, F: PaletteFormat>(
        &self,
    ) -> TextBackground<'a, B, S, F> {
        self.text(Layer::Bg1)
    }

    #[track_caller]
    pub fn text_background2<S: TextScreenSize, F: PaletteFormat>(
        &self,
    ) -> TextBackground<'a, B, S, F> {
        self.text(Layer::Bg2)
    }

    #[track_caller]
    pub fn text_background3<S: TextScreenSize, F: PaletteFormat>(
        &self,
    ) -> TextBackground<'a, B, S, F> {
        self.text(Layer::Bg3)
    }
}

impl<'a, B: Bus> ModeScope<'a, B, Mode1> {
    #[track_caller]
    pub fn text_background0<S: TextScreenSize, F: PaletteFormat>(
        &self,
    ) -> TextBackground<'a, B, S, F> {
        self.text(Layer::Bg0)
    }

    #[track_caller]
    pub fn text_background1<S: TextScreenSize, F: PaletteFormat>(
        &self,
    ) -> TextBackground<'a, B, S, F> {
        self.text(Layer::Bg1)
    }

    #[track_caller]
    pub fn affine_background2<S: AffineScreenSize>(&self) -> AffineBackground<'a, B, S> {
        self.affine(Layer::Bg2)
    }
}

impl<'a, B: Bus> ModeScope<'a, B, Mode2> {
    #[track_caller]
    pub fn affine_background2<S: AffineScreenSize>(&self) -> AffineBackground<'a, B, S> {
        self.affine(Layer::Bg2)
    }

    #[track_caller]
    pub fn affine_background3<S: AffineScreenSize>(&self) -> AffineBackground<'a, B, S> {
        self.affine(Layer::Bg3)
    }
}

macro_rules! bitmap_scope {
    ($($mode:ident),*) => {
        $(
            impl<'a, B: Bus> ModeScope<'a, B, $mode> {
                /// The displayed page of the framebuffer.
                #[track_caller]
                pub fn bitmap(&self) -> BitmapView<'a, B, $mode> {
                    self.check();
                    BitmapView::front(self.bus())
                }

                /// Background 2, the framebuffer layer.
                #[track_caller]
                pub fn background(&self) -> BitmapBackground<'a, B, $mode> {
                    self.check();
                    BitmapBackground::new(self.bus())
                }
            }
        )*
    };
}

bitmap_scope!(Mode3, Mode4, Mode5);

impl<'a, B: Bus> ModeScope<'a, B, Mode4> {
    /// The palette mode 4 pixels index into.
    pub fn palette(&self) -> PaletteView<'a, B, Color256> {
        PaletteView::new(self.bus(), PaletteRegion::Background)
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::block::{Affine128, Size256x256};
    use crate::bus::FakeBus;
    use crate::memory::{DISPCNT, VCOUNT};
    use crate::palette::Color16;
    use crate::register::DisplayFlags;

    /// Counts `DISPCNT` reads on top of a `FakeBus`.
    #[derive(Default)]
    struct CountingBus {
        inner: FakeBus,
        control_reads: Cell<u32>,
    }

    impl Bus for CountingBus {
        fn read_u8(&self, address: usize) -> u8 {
            self.inner.read_u8(address)
        }

        fn write_u8(&self, address: usize, value: u8) {
            self.inner.write_u8(address, value)
        }

        fn read_u16(&self, address: usize) -> u16 {
            if address == DISPCNT {
                self.control_reads.set(self.control_reads.get() + 1);
            }
            self.inner.read_u16(address)
        }

        fn write_u16(&self, address: usize, value: u16) {
            self.inner.write_u16(address, value)
        }

        fn read_u32(&self, address: usize) -> u32 {
            self.inner.read_u32(address)
        }

        fn write_u32(&self, address: usize, value: u32) {
            self.inner.write_u32(address, value)
        }
    }

    #[test]
    fn mode_switch_touches_only_the_mode_bits() {
        let display = Display::new(FakeBus::new());
        display.bus().write_u16(DISPCNT, 0xFF40 | 0x5);
        display.set_background_mode::<Mode3>();
        assert_eq!(display.bus().read_u16(DISPCNT), 0xFF43);
        display.set_background_mode::<Mode3>();
        assert_eq!(display.bus().read_u16(DISPCNT), 0xFF43);
        assert_eq!(display.current_mode(), Ok(VideoMode::Mode3));
    }

    #[test]
    fn mode_switch_keeps_vram() {
        let display = Display::new(FakeBus::new());
        display.bus().write_u16(0x0600_0000, 0x1234);
        display.set_background_mode::<Mode0>();
        display.set_background_mode::<Mode4>();
        assert_eq!(display.bus().read_u16(0x0600_0000), 0x1234);
    }

    #[test]
    fn scope_shows_only_its_layers() {
        let display = Display::new(FakeBus::new());
        let mode = display.set_background_mode::<Mode2>();
        assert_eq!(mode.layers(), LayerSet::BG2 | LayerSet::BG3);
        assert_eq!(mode.show_background(Layer::Bg3), Ok(()));
        assert_eq!(
            mode.show_background(Layer::Bg0),
            Err(CapabilityError::UnsupportedLayer {
                mode: VideoMode::Mode2,
                layer: Layer::Bg0
            })
        );
        assert_eq!(display.control().read().flags(), DisplayFlags::BG3);
    }

    #[test]
    fn mode1_scope_hands_out_text_and_affine() {
        let display = Display::new(FakeBus::new());
        let mode = display.set_background_mode::<Mode1>();
        let text = mode.text_background1::<Size256x256, Color16>();
        let affine = mode.affine_background2::<Affine128>();
        assert_eq!(text.layer(), Layer::Bg1);
        assert_eq!(affine.layer(), Layer::Bg2);
    }

    #[test]
    fn runtime_path_checks_the_register() {
        let display = Display::new(FakeBus::new());
        display.set_background_mode::<Mode3>();

        let err = display
            .text_background::<Size256x256, Color16>(Layer::Bg0)
            .err();
        assert_eq!(
            err,
            Some(CapabilityError::UnsupportedLayer {
                mode: VideoMode::Mode3,
                layer: Layer::Bg0
            })
        );

        let err = display.text_background::<Size256x256, Color16>(Layer::Bg2).err();
        assert!(matches!(
            err,
            Some(CapabilityError::WrongLayerKind {
                found: LayerKind::Bitmap(_),
                ..
            })
        ));

        assert!(display.bitmap::<Mode3>().is_ok());
        assert!(display.bitmap::<Mode4>().is_err());
    }

    #[test]
    fn runtime_path_accepts_matching_layers() {
        let display = Display::new(FakeBus::new());
        display.set_background_mode::<Mode1>();
        assert!(display.text_background::<Size256x256, Color16>(Layer::Bg1).is_ok());
        assert!(display.affine_background::<Affine128>(Layer::Bg2).is_ok());
        assert!(display.affine_background::<Affine128>(Layer::Bg0).is_err());
        assert!(display.background(Layer::Bg3).is_err());
        assert_eq!(display.show_background(Layer::Bg2), Ok(()));
        assert!(display.control().contains(DisplayFlags::BG2));
    }

    #[test]
    fn runtime_refusals_read_the_mode_once() {
        let display = Display::new(CountingBus::default());
        display.set_background_mode::<Mode3>();

        display.bus().control_reads.set(0);
        let err = display.text_background::<Size256x256, Color16>(Layer::Bg2).err();
        assert!(matches!(
            err,
            Some(CapabilityError::WrongLayerKind {
                mode: VideoMode::Mode3,
                ..
            })
        ));
        assert_eq!(display.bus().control_reads.get(), 1);

        display.bus().control_reads.set(0);
        assert!(display.background(Layer::Bg0).is_err());
        assert_eq!(display.bus().control_reads.get(), 1);
    }

    #[test]
    fn prohibited_mode_codes_are_reported() {
        let display = Display::new(FakeBus::new());
        display.bus().write_u16(DISPCNT, 0x0007);
        assert_eq!(display.current_mode(), Err(CapabilityError::UnknownMode(7)));
        assert_eq!(
            display.background(Layer::Bg0).err(),
            Some(CapabilityError::UnknownMode(7))
        );
    }

    #[test]
    fn background_mode_reacquires_without_writing() {
        let display = Display::new(FakeBus::new());
        display.set_background_mode::<Mode4>();
        let scope = display.background_mode::<Mode4>();
        assert_eq!(scope.mode(), VideoMode::Mode4);
        assert_eq!(display.bus().read_u16(DISPCNT), 0x0004);
    }

    #[test]
    #[should_panic]
    fn stale_scope_asserts() {
        let display = Display::new(FakeBus::new());
        let scope = display.set_background_mode::<Mode3>();
        display.control().set_video_mode(VideoMode::Mode0);
        let _ = scope.bitmap();
    }

    #[test]
    #[should_panic]
    fn background_mode_mismatch_asserts() {
        let display = Display::new(FakeBus::new());
        display.set_background_mode::<Mode0>();
        let _ = display.background_mode::<Mode5>();
    }

    #[test]
    fn display_is_a_scanline_source() {
        let display = Display::new(FakeBus::new());
        display.bus().write_u16(VCOUNT, 42);
        assert_eq!(display.scanline(), 42);
    }
}
