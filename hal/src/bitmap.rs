//! # Bitmap Modes
//!
//! Modes 3, 4 and 5 turn background 2 into a framebuffer at the start of VRAM.
//!
//! | Mode | Size    | Pixel                     | Pages                          |
//! |------|---------|---------------------------|--------------------------------|
//! | 3    | 240×160 | [`Rgb15`]                 | one, `0x0600_0000`             |
//! | 4    | 240×160 | `u8` background palette index | `0x0600_0000`, `0x0600_A000` |
//! | 5    | 160×128 | [`Rgb15`]                 | `0x0600_0000`, `0x0600_A000`   |
//!
//! The page shown is picked by the frame select bit of `DISPCNT`; the other
//! one can be drawn into without tearing and then flipped in.
//!
//! ```ignore
//! let back = BitmapView::<_, Mode4>::back(display.bus());
//! back.fill(0);
//! back.plot_pixel(Point::new(10, 10), 1);
//! display.control().flip_frame_select();
//! ```
//!
//! Positions are not clipped. A point outside the framebuffer writes wherever
//! its offset lands.

use core::marker::PhantomData;

use crate::Point;
use crate::bus::Bus;
use crate::color::Rgb15;
use crate::memory::{BITMAP_PAGE_STRIDE, VRAM_BASE};
use crate::mode::{BackgroundMode, BitmapGeometry, Mode3, Mode4, Mode5};
use crate::register::{DisplayControlRegister, Page};

/// A bitmap mode: its framebuffer layout and how one pixel is stored.
pub trait BitmapFormat: BackgroundMode {
    const GEOMETRY: BitmapGeometry;
    type Pixel: Copy;

    fn load<B: Bus>(bus: &B, address: usize) -> Self::Pixel;
    fn store<B: Bus>(bus: &B, address: usize, pixel: Self::Pixel);
    /// Fill `len` bytes from `address` with one pixel value.
    fn fill<B: Bus>(bus: &B, address: usize, len: usize, pixel: Self::Pixel);
}

fn fill_halfwords<B: Bus>(bus: &B, address: usize, len: usize, value: u16) {
    for offset in (0..len).step_by(2) {
        bus.write_u16(address + offset, value);
    }
}

macro_rules! direct_color {
    ($($mode:ident => $geometry:ident,)*) => {
        $(
            impl BitmapFormat for $mode {
                const GEOMETRY: BitmapGeometry = BitmapGeometry::$geometry;
                type Pixel = Rgb15;

                #[inline(always)]
                fn load<B: Bus>(bus: &B, address: usize) -> Rgb15 {
                    Rgb15::from_raw(bus.read_u16(address))
                }

                #[inline(always)]
                fn store<B: Bus>(bus: &B, address: usize, pixel: Rgb15) {
                    bus.write_u16(address, pixel.raw())
                }

                fn fill<B: Bus>(bus: &B, address: usize, len: usize, pixel: Rgb15) {
                    fill_halfwords(bus, address, len, pixel.raw())
                }
            }
        )*
    };
}

direct_color! {
    Mode3 => MODE3,
    Mode5 => MODE5,
}

impl BitmapFormat for Mode4 {
    const GEOMETRY: BitmapGeometry = BitmapGeometry::MODE4;
    type Pixel = u8;

    #[inline(always)]
    fn load<B: Bus>(bus: &B, address: usize) -> u8 {
        bus.read_u8(address)
    }

    /// VRAM drops byte stores, so the pixel goes in through its halfword.
    #[inline]
    fn store<B: Bus>(bus: &B, address: usize, pixel: u8) {
        let aligned = address & !1;
        let mut pair = bus.read_u16(aligned).to_le_bytes();
        pair[address & 1] = pixel;
        bus.write_u16(aligned, u16::from_le_bytes(pair));
    }

    fn fill<B: Bus>(bus: &B, address: usize, len: usize, pixel: u8) {
        fill_halfwords(bus, address, len, u16::from_le_bytes([pixel, pixel]))
    }
}

/// One page of a bitmap framebuffer.
pub struct BitmapView<'a, B: Bus, M: BitmapFormat> {
    bus: &'a B,
    page: Page,
    _mode: PhantomData<M>,
}

impl<'a, B: Bus, M: BitmapFormat> BitmapView<'a, B, M> {
    /// Mode 3 has a single page; asking it for [`Page::Back`] is a contract
    /// violation.
    #[track_caller]
    pub fn new(bus: &'a B, page: Page) -> Self {
        hal_assert!(
            page == Page::Front || M::GEOMETRY.pages > 1,
            "{} has a single bitmap page",
            M::MODE
        );
        Self {
            bus,
            page,
            _mode: PhantomData,
        }
    }

    fn displayed(bus: &B) -> Page {
        if M::GEOMETRY.pages == 1 {
            Page::Front
        } else {
            DisplayControlRegister::new(bus).frame_select()
        }
    }

    /// The page being displayed.
    pub fn front(bus: &'a B) -> Self {
        Self::new(bus, Self::displayed(bus))
    }

    /// The page not being displayed, according to the frame select bit.
    #[track_caller]
    pub fn back(bus: &'a B) -> Self {
        Self::new(bus, Self::displayed(bus).other())
    }

    #[inline(always)]
    pub fn page(&self) -> Page {
        self.page
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        M::GEOMETRY.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        M::GEOMETRY.height
    }

    /// First byte of this page.
    #[inline(always)]
    pub fn base(&self) -> usize {
        match self.page {
            Page::Front => VRAM_BASE,
            Page::Back => VRAM_BASE + BITMAP_PAGE_STRIDE,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        (0..self.width() as i32).contains(&point.x) && (0..self.height() as i32).contains(&point.y)
    }

    #[inline(always)]
    fn address(&self, point: Point) -> usize {
        let offset = point.x as usize + point.y as usize * M::GEOMETRY.width;
        self.base() + offset * M::GEOMETRY.format.bytes()
    }

    #[inline]
    pub fn plot_pixel(&self, point: Point, pixel: M::Pixel) {
        M::store(self.bus, self.address(point), pixel)
    }

    #[inline]
    pub fn pixel(&self, point: Point) -> M::Pixel {
        M::load(self.bus, self.address(point))
    }

    /// Set every pixel of the page.
    pub fn fill(&self, pixel: M::Pixel) {
        M::fill(self.bus, self.base(), M::GEOMETRY.page_size(), pixel)
    }
}
