//! # Video Modes
//!
//! The low three bits of `DISPCNT` pick one of six background modes. The mode
//! decides which of the four background layers exist and how each of them is
//! stored in VRAM:
//!
//! | Mode | BG0  | BG1  | BG2                       | BG3    |
//! |------|------|------|---------------------------|--------|
//! | 0    | text | text | text                      | text   |
//! | 1    | text | text | affine                    | -      |
//! | 2    | -    | -    | affine                    | affine |
//! | 3    | -    | -    | bitmap 240×160, 15-bit    | -      |
//! | 4    | -    | -    | bitmap 240×160, 8-bit ×2  | -      |
//! | 5    | -    | -    | bitmap 160×128, 15-bit ×2 | -      |
//!
//! The table is available two ways. [`VideoMode`] answers at runtime through
//! [`LayerCapabilities`]; the zero-sized markers [`Mode0`]…[`Mode5`] carry the
//! same answers in the type system and select which
//! [`ModeScope`](crate::display::ModeScope) accessors exist.
//!
//! Changing modes never clears VRAM. Whatever the previous mode left behind is
//! reinterpreted under the new layout until it is overwritten.

use core::fmt;

/// One of the six hardware background modes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VideoMode {
    Mode0 = 0,
    Mode1 = 1,
    Mode2 = 2,
    Mode3 = 3,
    Mode4 = 4,
    Mode5 = 5,
}

impl VideoMode {
    pub const ALL: [VideoMode; 6] = [
        VideoMode::Mode0,
        VideoMode::Mode1,
        VideoMode::Mode2,
        VideoMode::Mode3,
        VideoMode::Mode4,
        VideoMode::Mode5,
    ];

    /// Value of the `DISPCNT` mode field.
    #[inline(always)]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Codes 6 and 7 are prohibited on the hardware and map to `None`.
    pub const fn from_code(code: u8) -> Option<VideoMode> {
        match code {
            0 => Some(VideoMode::Mode0),
            1 => Some(VideoMode::Mode1),
            2 => Some(VideoMode::Mode2),
            3 => Some(VideoMode::Mode3),
            4 => Some(VideoMode::Mode4),
            5 => Some(VideoMode::Mode5),
            _ => None,
        }
    }

    /// Framebuffer layout of layer 2 in the bitmap modes.
    pub const fn bitmap_geometry(self) -> Option<BitmapGeometry> {
        match self {
            VideoMode::Mode3 => Some(BitmapGeometry::MODE3),
            VideoMode::Mode4 => Some(BitmapGeometry::MODE4),
            VideoMode::Mode5 => Some(BitmapGeometry::MODE5),
            _ => None,
        }
    }
}

impl fmt::Display for VideoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mode {}", self.code())
    }
}

/// A background layer, BG0 to BG3.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Layer {
    Bg0 = 0,
    Bg1 = 1,
    Bg2 = 2,
    Bg3 = 3,
}

impl Layer {
    pub const ALL: [Layer; 4] = [Layer::Bg0, Layer::Bg1, Layer::Bg2, Layer::Bg3];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BG{}", self.index())
    }
}

bitflags::bitflags! {
    /// A set of background layers.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct LayerSet: u8 {
        const BG0 = 0b0001;
        const BG1 = 0b0010;
        const BG2 = 0b0100;
        const BG3 = 0b1000;
    }
}

impl LayerSet {
    #[inline(always)]
    pub const fn of(layer: Layer) -> LayerSet {
        LayerSet::from_bits_retain(1 << layer.index())
    }

    pub fn contains_layer(self, layer: Layer) -> bool {
        self.contains(LayerSet::of(layer))
    }
}

/// Pixel encoding of a bitmap layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// One [`Rgb15`](crate::Rgb15) per pixel.
    Direct,
    /// One byte per pixel, an index into the 256-color background palette.
    Indexed,
}

impl PixelFormat {
    #[inline(always)]
    pub const fn bytes(self) -> usize {
        match self {
            PixelFormat::Direct => 2,
            PixelFormat::Indexed => 1,
        }
    }
}

/// Dimensions and encoding of a bitmap framebuffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BitmapGeometry {
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
    /// 1, or 2 for the double-buffered modes.
    pub pages: usize,
}

impl BitmapGeometry {
    pub const MODE3: BitmapGeometry = BitmapGeometry {
        width: 240,
        height: 160,
        format: PixelFormat::Direct,
        pages: 1,
    };
    pub const MODE4: BitmapGeometry = BitmapGeometry {
        width: 240,
        height: 160,
        format: PixelFormat::Indexed,
        pages: 2,
    };
    pub const MODE5: BitmapGeometry = BitmapGeometry {
        width: 160,
        height: 128,
        format: PixelFormat::Direct,
        pages: 2,
    };

    /// Bytes in one page.
    #[inline(always)]
    pub const fn page_size(&self) -> usize {
        self.width * self.height * self.format.bytes()
    }
}

/// How a layer's VRAM is interpreted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Tile map of [`TextTile`](crate::tile::TextTile) entries, scrollable.
    Text,
    /// Tile map of byte entries, rotation/scaling capable.
    Affine,
    /// Direct framebuffer.
    Bitmap(BitmapGeometry),
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerKind::Text => f.write_str("text"),
            LayerKind::Affine => f.write_str("affine"),
            LayerKind::Bitmap(g) => match g.format {
                PixelFormat::Direct => write!(f, "{}x{} direct-color bitmap", g.width, g.height),
                PixelFormat::Indexed => write!(f, "{}x{} paletted bitmap", g.width, g.height),
            },
        }
    }
}

/// Which layers a mode offers, and as what.
pub trait LayerCapabilities {
    /// `None` if the layer is not displayed in this mode.
    fn layer_kind(&self, layer: Layer) -> Option<LayerKind>;

    fn supports(&self, layer: Layer) -> bool {
        self.layer_kind(layer).is_some()
    }

    fn layers(&self) -> LayerSet {
        Layer::ALL
            .into_iter()
            .filter(|&layer| self.supports(layer))
            .fold(LayerSet::empty(), |set, layer| set | LayerSet::of(layer))
    }
}

impl LayerCapabilities for VideoMode {
    fn layer_kind(&self, layer: Layer) -> Option<LayerKind> {
        use Layer::*;
        use LayerKind::*;

        match (self, layer) {
            (VideoMode::Mode0, _) => Some(Text),
            (VideoMode::Mode1, Bg0 | Bg1) => Some(Text),
            (VideoMode::Mode1, Bg2) => Some(Affine),
            (VideoMode::Mode2, Bg2 | Bg3) => Some(Affine),
            (VideoMode::Mode3 | VideoMode::Mode4 | VideoMode::Mode5, Bg2) => {
                self.bitmap_geometry().map(Bitmap)
            }
            _ => None,
        }
    }
}

/// A video mode known at compile time.
pub trait BackgroundMode: LayerCapabilities + Copy + Default {
    const MODE: VideoMode;
}

macro_rules! background_modes {
    ($($(#[$doc:meta])* $name:ident => $mode:ident,)*) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
            pub struct $name;

            impl BackgroundMode for $name {
                const MODE: VideoMode = VideoMode::$mode;
            }

            impl LayerCapabilities for $name {
                #[inline(always)]
                fn layer_kind(&self, layer: Layer) -> Option<LayerKind> {
                    Self::MODE.layer_kind(layer)
                }
            }
        )*
    };
}

background_modes! {
    /// Four text backgrounds.
    Mode0 => Mode0,
    /// Two text backgrounds and one affine background.
    Mode1 => Mode1,
    /// Two affine backgrounds.
    Mode2 => Mode2,
    /// One full-screen 15-bit bitmap.
    Mode3 => Mode3,
    /// Two full-screen 8-bit paletted bitmaps.
    Mode4 => Mode4,
    /// Two reduced-size 15-bit bitmaps.
    Mode5 => Mode5,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for mode in VideoMode::ALL {
            assert_eq!(VideoMode::from_code(mode.code()), Some(mode));
        }
        assert_eq!(VideoMode::from_code(6), None);
        assert_eq!(VideoMode::from_code(7), None);
    }

    #[test]
    fn layer_table() {
        assert_eq!(VideoMode::Mode0.layers(), LayerSet::all());
        assert_eq!(VideoMode::Mode1.layers(), LayerSet::BG0 | LayerSet::BG1 | LayerSet::BG2);
        assert_eq!(VideoMode::Mode2.layers(), LayerSet::BG2 | LayerSet::BG3);
        for mode in [VideoMode::Mode3, VideoMode::Mode4, VideoMode::Mode5] {
            assert_eq!(mode.layers(), LayerSet::BG2);
        }

        assert_eq!(VideoMode::Mode1.layer_kind(Layer::Bg1), Some(LayerKind::Text));
        assert_eq!(VideoMode::Mode1.layer_kind(Layer::Bg2), Some(LayerKind::Affine));
        assert_eq!(VideoMode::Mode1.layer_kind(Layer::Bg3), None);
        assert_eq!(
            VideoMode::Mode4.layer_kind(Layer::Bg2),
            Some(LayerKind::Bitmap(BitmapGeometry::MODE4))
        );
    }

    #[test]
    fn layer_sets_answer_per_layer() {
        let set = VideoMode::Mode1.layers();
        assert!(set.contains_layer(Layer::Bg0));
        assert!(set.contains_layer(Layer::Bg2));
        assert!(!set.contains_layer(Layer::Bg3));
        assert_eq!(LayerSet::of(Layer::Bg3), LayerSet::BG3);
    }

    #[test]
    fn markers_agree_with_runtime_modes() {
        fn check<M: BackgroundMode>(marker: M) {
            for layer in Layer::ALL {
                assert_eq!(marker.layer_kind(layer), M::MODE.layer_kind(layer));
            }
        }
        check(Mode0);
        check(Mode1);
        check(Mode2);
        check(Mode3);
        check(Mode4);
        check(Mode5);
    }

    #[test]
    fn bitmap_pages_fit_their_stride() {
        assert_eq!(BitmapGeometry::MODE3.page_size(), 0x1_2C00);
        assert!(BitmapGeometry::MODE4.page_size() <= crate::memory::BITMAP_PAGE_STRIDE);
        assert!(BitmapGeometry::MODE5.page_size() <= crate::memory::BITMAP_PAGE_STRIDE);
    }
}
