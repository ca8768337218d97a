//! End-to-end use of the HAL against the in-memory bus.

use gba_hal::Point;
use gba_hal::background::Background;
use gba_hal::bitmap::BitmapView;
use gba_hal::block::{ScreenBlockView, Size512x512, Size256x256};
use gba_hal::bus::{Bus, FakeBus, KEYS_RELEASED};
use gba_hal::frame::{SteppedScanlines, VBLANK_START, wait_for_vblank};
use gba_hal::input::{Controller, Keys, poll_keys};
use gba_hal::memory::{DISPCNT, KEYINPUT, VRAM_BASE, bgcnt};
use gba_hal::mode::{Layer, Mode0, Mode3, Mode4, VideoMode};
use gba_hal::palette::{Color16, Color256, PaletteRegion, PaletteView};
use gba_hal::ranged::{CharBlock, PaletteBank, Priority, ScreenBlock};
use gba_hal::register::{DisplayFlags, Page};
use gba_hal::tile::{TextTile, Tile4};
use gba_hal::{CapabilityError, Display, Rgb15};

#[test]
fn mode3_from_a_cleared_register() {
    let display = Display::new(FakeBus::new());
    display.set_background_mode::<Mode3>();
    assert_eq!(display.bus().read_u16(DISPCNT), 0x0003);
}

#[test]
fn mode_switch_is_idempotent() {
    let display = Display::new(FakeBus::new());
    display
        .control()
        .insert(DisplayFlags::BG2 | DisplayFlags::OBJ | DisplayFlags::FORCED_BLANK);
    let before = display.bus().read_u16(DISPCNT);

    display.set_background_mode::<Mode3>();
    display.set_background_mode::<Mode3>();

    let after = display.bus().read_u16(DISPCNT);
    assert_eq!(after & 0x7, 3);
    assert_eq!(after & !0x7, before & !0x7);
}

#[test]
fn background_control_scenario() {
    let bus = FakeBus::new();
    let bg = Background::new(&bus, Layer::Bg0);
    bg.set_character_base_block(CharBlock::new(2));
    bg.set_screen_base_block(ScreenBlock::new(5));
    assert_eq!(bus.read_u16(bgcnt(0)), 0x0508);
}

#[test]
fn batched_background_control_is_one_write() {
    let bus = FakeBus::new();
    let bg = Background::new(&bus, Layer::Bg3);
    bg.control().modify(|c| {
        c.with_priority(Priority::new(1))
            .with_character_base_block(CharBlock::new(2))
            .with_screen_base_block(ScreenBlock::new(5))
    });
    assert_eq!(bus.read_u16(bgcnt(3)), 0x0509);
}

#[test]
fn palette_scenario() {
    let bus = FakeBus::new();
    let palette = PaletteView::new(&bus, PaletteRegion::Background);
    palette.set(1, Rgb15::new(1, 2, 3));
    palette.set(3, Rgb15::new(4, 5, 6));

    palette.set(2, Rgb15::new(31, 0, 0));

    let color = palette.get(2);
    assert_eq!(color.red(), 31);
    assert_eq!(color.green(), 0);
    assert_eq!(color.blue(), 0);
    assert_eq!(palette.get(1), Rgb15::new(1, 2, 3));
    assert_eq!(palette.get(3), Rgb15::new(4, 5, 6));
}

#[test]
fn released_keys_poll_as_nothing() {
    let bus = FakeBus::new();
    bus.write_u16(KEYINPUT, KEYS_RELEASED);
    assert_eq!(poll_keys(&bus), Keys::empty());

    bus.write_u16(KEYINPUT, 0xFFFF);
    assert_eq!(poll_keys(&bus), Keys::empty());
}

#[test]
fn runtime_capability_mismatch() {
    let display = Display::new(FakeBus::new());
    display.set_background_mode::<Mode3>();
    let result = display.text_background::<Size256x256, Color16>(Layer::Bg0);
    assert_eq!(
        result.err(),
        Some(CapabilityError::UnsupportedLayer {
            mode: VideoMode::Mode3,
            layer: Layer::Bg0,
        })
    );
}

#[test]
fn vblank_wait_ends_on_the_first_blank_line() {
    for start in [0, 80, 159, 160, 200, 227] {
        let clock = SteppedScanlines::new(start);
        wait_for_vblank(&clock);
        assert_eq!(clock.line(), VBLANK_START, "starting from line {start}");
    }
}

#[test]
fn mode4_plots_keep_their_neighbour() {
    let display = Display::new(FakeBus::new());
    let mode = display.set_background_mode::<Mode4>();
    let page = mode.background().page(Page::Front);
    for x in 0..8 {
        page.plot_pixel(Point::new(x, 0), x as u8 + 1);
    }
    page.plot_pixel(Point::new(5, 0), 0xEE);
    for x in 0..8 {
        let expected = if x == 5 { 0xEE } else { x as u8 + 1 };
        assert_eq!(page.pixel(Point::new(x, 0)), expected);
    }
}

#[test]
fn text_map_quadrants() {
    type Map<'a> = ScreenBlockView<'a, FakeBus, Size512x512>;
    assert_eq!(Map::index_of(10, 10), 10 * 32 + 10);
    assert_eq!(Map::index_of(42, 10), 1024 + 10 * 32 + 10);
    assert_eq!(Map::index_of(10, 42), 2048 + 10 * 32 + 10);
    assert_eq!(Map::index_of(42, 42), 3072 + 10 * 32 + 10);
}

#[test]
fn tiled_scene_setup() {
    let display = Display::new(FakeBus::new());
    let mode = display.set_background_mode::<Mode0>();

    let bg = mode.text_background0::<Size256x256, Color16>();
    bg.set_character_base_block(CharBlock::new(0));
    bg.set_screen_base_block(ScreenBlock::new(31));
    mode.show_background(Layer::Bg0).unwrap();

    bg.palette_bank(PaletteBank::new(1)).set(1, Rgb15::GREEN);
    bg.character_block().set(1, &Tile4::solid(1));
    bg.screen_block()
        .fill(TextTile::new(1).with_palette_bank(PaletteBank::new(1)));

    let bus = display.bus();
    assert_eq!(bus.read_u16(DISPCNT), 0x0100);
    assert_eq!(bus.read_u16(bgcnt(0)), 0x1F00);
    assert_eq!(bus.read_u16(0x0500_0022), 0x03E0);
    assert_eq!(bus.read_u16(VRAM_BASE + 32), 0x1111);
    assert_eq!(bus.read_u16(VRAM_BASE + 31 * 0x800), 0x1001);
    assert_eq!(bus.read_u16(VRAM_BASE + 31 * 0x800 + 0x7FE), 0x1001);
}

/// One frame of a bitmap game loop: poll, draw, flip, wait.
#[test]
fn bitmap_game_frame() {
    let display = Display::new(FakeBus::new());
    let mode = display.set_background_mode::<Mode4>();
    mode.show_background(Layer::Bg2).unwrap();
    mode.palette().set(1, Rgb15::WHITE);

    let mut pad = Controller::new();
    let clock = SteppedScanlines::new(0);
    let mut head = Point::new(10, 10);

    display
        .bus()
        .write_u16(KEYINPUT, KEYS_RELEASED & !Keys::RIGHT.bits());
    for _ in 0..3 {
        pad.poll(display.bus());
        let step = pad.direction();
        head.x += step.x;
        head.y += step.y;

        let back = BitmapView::<_, Mode4>::back(display.bus());
        back.fill(0);
        back.plot_pixel(head, 1);
        display.control().flip_frame_select();
        wait_for_vblank(&clock);
    }

    assert_eq!(head, Point::new(13, 10));
    let shown = display.bitmap::<Mode4>().unwrap();
    assert_eq!(shown.page(), Page::Back);
    assert_eq!(shown.pixel(Point::new(13, 10)), 1);
    assert_eq!(shown.pixel(Point::new(12, 10)), 0);
    assert_eq!(
        PaletteView::<_, Color256>::new(display.bus(), PaletteRegion::Background).get(1),
        Rgb15::WHITE
    );
}
