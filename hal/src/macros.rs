/// Contract assertion for the HAL.
///
/// Active in debug builds, or in any build with the `checked` feature.
/// Otherwise the condition is not evaluated and the violating value goes to
/// the hardware as-is.
macro_rules! hal_assert {
    ($($arg:tt)*) => {
        if cfg!(any(debug_assertions, feature = "checked")) {
            assert!($($arg)*);
        }
    };
}

/// Implement [`FieldValue`](crate::field::FieldValue) for a fieldless enum.
///
/// The last arm is the fallback for any bit pattern not listed before it, so
/// decoding never fails.
macro_rules! field_enum {
    ($ty:ident { $($bits:literal => $variant:ident,)* _ => $fallback:ident $(,)? }) => {
        impl $crate::field::FieldValue for $ty {
            #[inline(always)]
            fn into_bits(self) -> u32 {
                self as u32
            }

            #[inline(always)]
            fn from_bits(bits: u32) -> Self {
                match bits {
                    $($bits => $ty::$variant,)*
                    _ => $ty::$fallback,
                }
            }
        }
    };
}
