use std::ops::{BitAnd, Shl};

use num_traits::Unsigned;

/// The low `width` bits of `value`, least significant first. Bits past the
/// width of `T` read as low.
pub fn to_bits<T>(value: T, width: usize) -> Vec<bool>
where
    T: Unsigned + Copy + BitAnd<T, Output = T> + Shl<usize, Output = T>,
{
    let type_bits = std::mem::size_of::<T>() * 8;
    (0..width)
        .map(|bit| bit < type_bits && !(value & (T::one() << bit)).is_zero())
        .collect()
}

/// Reads `bits`, least significant first, back into an integer.
///
/// # Panics
/// If a high bit lies past the width of `T`.
pub fn from_bits<T>(bits: &[bool]) -> T
where
    T: Unsigned + Shl<usize, Output = T>,
{
    let mut sum = T::zero();
    for (bit, active) in bits.iter().enumerate() {
        if *active {
            sum = sum + (T::one() << bit);
        }
    }
    sum
}

pub trait Signed<T> {
    fn to_bits_signed(value: T) -> Vec<bool>;
    fn from_bits_signed(bits: &[bool]) -> T;
}

/// Two's complement views, full width of the integer.
pub struct Word;

macro_rules! signed_word {
    ( $i:ty, $u:ty ) => {
        impl Signed<$i> for Word {
            fn to_bits_signed(value: $i) -> Vec<bool> {
                to_bits(value as $u, <$u>::BITS as usize)
            }

            fn from_bits_signed(bits: &[bool]) -> $i {
                from_bits::<$u>(bits) as $i
            }
        }
    };
}

signed_word!(i8, u8);
signed_word!(i16, u16);
signed_word!(i32, u32);
signed_word!(i64, u64);
