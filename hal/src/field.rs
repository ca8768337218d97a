//! # Bit-Field Codec
//!
//! A [`Field`] describes where one logical value lives inside a register
//! word: its bit offset, its width, and the type it decodes to. Descriptors
//! are zero-sized; all the information is in the type.
//!
//! ```ignore
//! // bits 8-12 of a 16-bit word, decoded as a screen block index
//! type ScreenBase = Field<u16, ScreenBlock, 5, 8>;
//!
//! let mut word = 0u16;
//! ScreenBase::set(&mut word, ScreenBlock::new(5));
//! assert_eq!(word, 0x0500);
//! ```
//!
//! | Operation     | Effect on the word                          | Fields      |
//! |---------------|---------------------------------------------|-------------|
//! | `set(v)`      | clear the field, then OR in `v << SHIFT`    | any         |
//! | `set_bit()`   | OR in the bit, nothing is cleared           | 1 bit only  |
//! | `reset()`     | AND with the inverted mask                  | any         |
//! | `flip()`      | XOR the bit                                 | 1 bit only  |
//! | `get()`       | AND with the mask, shift down, decode       | any         |
//!
//! A field that does not fit its storage word, or a single-bit operation on a
//! wider field, is rejected when the code is compiled.
//!
//! The `set`/`reset`/`flip`/`get` forms work on any [`Storage`]: on an
//! [`Mmio`](crate::cell::Mmio) cell each call is its own read-modify-write on
//! the bus. `insert`/`extract` work on a bare word for batching.

use core::marker::PhantomData;
use core::ops::Range;

use crate::cell::{RegisterWord, Storage};
use crate::ranged::Ranged;

/// A logical type that can be packed into a bit-field.
pub trait FieldValue: Sized {
    fn into_bits(self) -> u32;
    /// Rebuild a value from bits already masked to the field's width.
    fn from_bits(bits: u32) -> Self;
}

impl FieldValue for bool {
    #[inline(always)]
    fn into_bits(self) -> u32 {
        self as u32
    }

    #[inline(always)]
    fn from_bits(bits: u32) -> Self {
        bits != 0
    }
}

impl FieldValue for u8 {
    #[inline(always)]
    fn into_bits(self) -> u32 {
        self as u32
    }

    #[inline(always)]
    fn from_bits(bits: u32) -> Self {
        bits as u8
    }
}

impl FieldValue for u16 {
    #[inline(always)]
    fn into_bits(self) -> u32 {
        self as u32
    }

    #[inline(always)]
    fn from_bits(bits: u32) -> Self {
        bits as u16
    }
}

impl FieldValue for u32 {
    #[inline(always)]
    fn into_bits(self) -> u32 {
        self
    }

    #[inline(always)]
    fn from_bits(bits: u32) -> Self {
        bits
    }
}

/// Decoding does not re-validate the bounds.
impl<const MIN: u16, const MAX: u16> FieldValue for Ranged<MIN, MAX> {
    #[inline(always)]
    fn into_bits(self) -> u32 {
        self.get() as u32
    }

    #[inline(always)]
    fn from_bits(bits: u32) -> Self {
        Ranged::new_unchecked(bits as u16)
    }
}

/// `WIDTH` bits starting at bit `SHIFT` of an `S`, decoded as a `T`.
pub struct Field<S, T, const WIDTH: u32, const SHIFT: u32>(PhantomData<(S, T)>);

impl<S, T, const WIDTH: u32, const SHIFT: u32> Field<S, T, WIDTH, SHIFT>
where
    S: RegisterWord,
    T: FieldValue,
{
    const FITS: () = assert!(
        WIDTH >= 1 && SHIFT + WIDTH <= S::BITS,
        "bit-field does not fit its storage word"
    );
    const SINGLE_BIT: () = assert!(WIDTH == 1, "operation needs a single-bit field");

    /// Field bits in place, as a `u32`.
    pub const MASK: u32 = (((1u64 << WIDTH) - 1) << SHIFT) as u32;
    /// Largest raw value the field can hold.
    pub const LIMIT: u32 = ((1u64 << WIDTH) - 1) as u32;

    #[inline(always)]
    fn range() -> Range<usize> {
        SHIFT as usize..(SHIFT + WIDTH) as usize
    }

    /// The field's bits in place, as a storage word.
    #[inline(always)]
    pub fn mask() -> S {
        let () = Self::FITS;
        S::truncate(Self::MASK)
    }

    /// `word` with this field replaced by `value`.
    #[inline(always)]
    #[track_caller]
    pub fn insert(word: S, value: T) -> S {
        let () = Self::FITS;
        let bits = value.into_bits();
        hal_assert!(bits <= Self::LIMIT, "value {:#X} wider than {} bits", bits, WIDTH);

        let mut word = word;
        word.set_bits(Self::range(), S::truncate(bits & Self::LIMIT));
        word
    }

    #[inline(always)]
    pub fn extract(word: S) -> T {
        let () = Self::FITS;
        T::from_bits(word.get_bits(Self::range()).widen())
    }

    #[inline(always)]
    #[track_caller]
    pub fn set<C: Storage<S> + ?Sized>(cell: &mut C, value: T) {
        let word = cell.load();
        cell.store(Self::insert(word, value));
    }

    /// OR the single bit in. Other bits, including this one, are not cleared
    /// first.
    #[inline(always)]
    pub fn set_bit<C: Storage<S> + ?Sized>(cell: &mut C) {
        let () = Self::FITS;
        let () = Self::SINGLE_BIT;
        let mut word = cell.load();
        word.set_bit(SHIFT as usize, true);
        cell.store(word);
    }

    #[inline(always)]
    pub fn reset<C: Storage<S> + ?Sized>(cell: &mut C) {
        let () = Self::FITS;
        let mut word = cell.load();
        word.set_bits(Self::range(), S::truncate(0));
        cell.store(word);
    }

    #[inline(always)]
    pub fn flip<C: Storage<S> + ?Sized>(cell: &mut C) {
        let () = Self::FITS;
        let () = Self::SINGLE_BIT;
        let mut word = cell.load();
        let bit = word.get_bit(SHIFT as usize);
        word.set_bit(SHIFT as usize, !bit);
        cell.store(word);
    }

    #[inline(always)]
    pub fn get<C: Storage<S> + ?Sized>(cell: &C) -> T {
        Self::extract(cell.load())
    }
}
