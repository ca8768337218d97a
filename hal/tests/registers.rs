//! Field-level laws over every register layout the HAL defines.

use gba_hal::field::FieldValue;
use gba_hal::register::background_control as bg;
use gba_hal::register::display_control as dc;
use gba_hal::register::display_status as ds;
use gba_hal::register::DisplayFlags;

/// Raw view of one field: enough to check masks and round trips without
/// knowing its logical type.
struct Layout {
    name: &'static str,
    mask: u16,
    set: fn(u16, u32) -> u16,
    get: fn(u16) -> u32,
    reset: fn(u16) -> u16,
    limit: u32,
}

/// Build a [`Layout`] straight from one of the crate's field aliases.
macro_rules! layout {
    ($field:ty) => {
        Layout {
            name: stringify!($field),
            mask: <$field>::mask(),
            set: |word, raw| <$field>::insert(word, FieldValue::from_bits(raw)),
            get: |word| <$field>::extract(word).into_bits(),
            reset: |word| {
                let mut word = word;
                <$field>::reset(&mut word);
                word
            },
            limit: <$field>::LIMIT,
        }
    };
}

fn display_control() -> [Layout; 3] {
    [
        layout!(dc::ModeField),
        layout!(dc::FrameSelect),
        layout!(dc::ObjMappingField),
    ]
}

fn display_status() -> [Layout; 7] {
    [
        layout!(ds::InVBlank),
        layout!(ds::InHBlank),
        layout!(ds::VCountMatch),
        layout!(ds::VBlankIrq),
        layout!(ds::HBlankIrq),
        layout!(ds::VCountIrq),
        layout!(ds::VCountSetting),
    ]
}

fn vertical_counter() -> [Layout; 1] {
    [layout!(ds::CurrentScanline)]
}

fn background_control() -> [Layout; 7] {
    [
        layout!(bg::PriorityField),
        layout!(bg::CharacterBase),
        layout!(bg::Mosaic),
        layout!(bg::PaletteModeField),
        layout!(bg::ScreenBase),
        layout!(bg::Overflow),
        layout!(bg::ScreenSize),
    ]
}

fn check_register(fields: &[Layout]) {
    for (i, a) in fields.iter().enumerate() {
        for b in &fields[i + 1..] {
            assert_eq!(a.mask & b.mask, 0, "{} overlaps {}", a.name, b.name);
        }
    }

    for background in [0x0000u16, 0xFFFF, 0x5A5A, 0xA5A5] {
        for field in fields {
            for raw in 0..=field.limit {
                let word = (field.set)(background, raw);
                assert_eq!((field.get)(word), raw, "{} round trip", field.name);
                assert_eq!(
                    word & !field.mask,
                    background & !field.mask,
                    "{} leaked outside its mask",
                    field.name
                );
                for other in fields.iter().filter(|f| f.name != field.name) {
                    assert_eq!((other.get)(word), (other.get)(background));
                }
            }
            assert_eq!((field.get)((field.reset)(background)), 0, "{} reset", field.name);
        }
    }
}

fn masks(fields: &[Layout]) -> Vec<(&'static str, u16)> {
    fields.iter().map(|f| (f.name, f.mask)).collect()
}

#[test]
fn display_control_fields() {
    check_register(&display_control());
}

#[test]
fn display_status_fields() {
    check_register(&display_status());
}

#[test]
fn vertical_counter_field() {
    check_register(&vertical_counter());
}

#[test]
fn background_control_fields() {
    check_register(&background_control());
}

#[test]
fn display_control_bit_positions() {
    assert_eq!(
        masks(&display_control()),
        [
            ("dc::ModeField", 0x0007),
            ("dc::FrameSelect", 0x0010),
            ("dc::ObjMappingField", 0x0040),
        ]
    );

    // the flag set covers bits 4-15 and never the mode
    assert_eq!(DisplayFlags::all().bits(), 0xFFF0);
    assert_eq!(DisplayFlags::FRAME_SELECT.bits(), dc::FrameSelect::mask());
    assert_eq!(DisplayFlags::OBJ_1D_MAPPING.bits(), dc::ObjMappingField::mask());
}

#[test]
fn display_status_bit_positions() {
    assert_eq!(
        masks(&display_status()),
        [
            ("ds::InVBlank", 0x0001),
            ("ds::InHBlank", 0x0002),
            ("ds::VCountMatch", 0x0004),
            ("ds::VBlankIrq", 0x0008),
            ("ds::HBlankIrq", 0x0010),
            ("ds::VCountIrq", 0x0020),
            ("ds::VCountSetting", 0xFF00),
        ]
    );
    assert_eq!(masks(&vertical_counter()), [("ds::CurrentScanline", 0x00FF)]);
}

#[test]
fn background_control_bit_positions() {
    assert_eq!(
        masks(&background_control()),
        [
            ("bg::PriorityField", 0x0003),
            ("bg::CharacterBase", 0x000C),
            ("bg::Mosaic", 0x0040),
            ("bg::PaletteModeField", 0x0080),
            ("bg::ScreenBase", 0x1F00),
            ("bg::Overflow", 0x2000),
            ("bg::ScreenSize", 0xC000),
        ]
    );
}
