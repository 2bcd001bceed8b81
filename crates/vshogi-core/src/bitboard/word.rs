//! Bitboardの下位表現（機械語ワード）
//!
//! 盤の大きさに応じて `u16`（12マス）、`u32`（25マス）、`u64`（36マス）、
//! `WideWord`（81マス、`u64` 2語）を使い分ける。

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// Bitboardの下位ワードが満たす演算
pub trait BitWord:
    Copy
    + Eq
    + Hash
    + Default
    + Debug
    + Send
    + Sync
    + 'static
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + BitAndAssign
    + BitOrAssign
    + BitXorAssign
{
    /// 保持できるビット数
    const BITS: usize;

    const ZERO: Self;

    /// `index` ビット目だけが立った値
    fn bit(index: usize) -> Self;

    /// 下位 `n` ビットが立った値
    fn low_mask(n: usize) -> Self;

    /// 上位方向へのシフト（桁あふれは捨てる）
    fn shift_up(self, n: u32) -> Self;

    /// 下位方向へのシフト
    fn shift_down(self, n: u32) -> Self;

    /// 立っているビットの数
    fn hamming_weight(self) -> u32;

    /// 最下位の立っているビットの位置
    fn lowest_index(self) -> Option<usize>;

    /// 最下位の立っているビットを落とす
    fn clear_lowest(self) -> Self;

    #[inline]
    fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    #[inline]
    fn test(self, index: usize) -> bool {
        !(self & Self::bit(index)).is_zero()
    }
}

/// ビットを2つずつ、4つずつ…と畳み込む標準的なpopcount
#[inline]
const fn hamming_weight_u64(x: u64) -> u32 {
    let x = x - ((x >> 1) & 0x5555_5555_5555_5555);
    let x = (x & 0x3333_3333_3333_3333) + ((x >> 2) & 0x3333_3333_3333_3333);
    let x = (x + (x >> 4)) & 0x0f0f_0f0f_0f0f_0f0f;
    (x.wrapping_mul(0x0101_0101_0101_0101) >> 56) as u32
}

macro_rules! impl_bit_word {
    ($t:ty) => {
        impl BitWord for $t {
            const BITS: usize = <$t>::BITS as usize;
            const ZERO: Self = 0;

            #[inline]
            fn bit(index: usize) -> Self {
                debug_assert!(index < <Self as BitWord>::BITS);
                1 << index
            }

            #[inline]
            fn low_mask(n: usize) -> Self {
                if n >= <Self as BitWord>::BITS { <$t>::MAX } else { (1 << n) - 1 }
            }

            #[inline]
            fn shift_up(self, n: u32) -> Self {
                self.checked_shl(n).unwrap_or(0)
            }

            #[inline]
            fn shift_down(self, n: u32) -> Self {
                self.checked_shr(n).unwrap_or(0)
            }

            #[inline]
            fn hamming_weight(self) -> u32 {
                hamming_weight_u64(self as u64)
            }

            #[inline]
            fn lowest_index(self) -> Option<usize> {
                if self == 0 { None } else { Some(self.trailing_zeros() as usize) }
            }

            #[inline]
            fn clear_lowest(self) -> Self {
                self & self.wrapping_sub(1)
            }
        }
    };
}

impl_bit_word!(u16);
impl_bit_word!(u32);
impl_bit_word!(u64);

/// `u64` 2語からなる128bitワード。`w[0]` が下位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WideWord {
    w: [u64; 2],
}

impl WideWord {
    #[inline]
    pub const fn new(lo: u64, hi: u64) -> WideWord {
        WideWord { w: [lo, hi] }
    }

    #[inline]
    pub const fn lo(self) -> u64 {
        self.w[0]
    }

    #[inline]
    pub const fn hi(self) -> u64 {
        self.w[1]
    }
}

impl BitAnd for WideWord {
    type Output = WideWord;

    #[inline]
    fn bitand(self, rhs: WideWord) -> WideWord {
        WideWord::new(self.w[0] & rhs.w[0], self.w[1] & rhs.w[1])
    }
}

impl BitOr for WideWord {
    type Output = WideWord;

    #[inline]
    fn bitor(self, rhs: WideWord) -> WideWord {
        WideWord::new(self.w[0] | rhs.w[0], self.w[1] | rhs.w[1])
    }
}

impl BitXor for WideWord {
    type Output = WideWord;

    #[inline]
    fn bitxor(self, rhs: WideWord) -> WideWord {
        WideWord::new(self.w[0] ^ rhs.w[0], self.w[1] ^ rhs.w[1])
    }
}

impl Not for WideWord {
    type Output = WideWord;

    #[inline]
    fn not(self) -> WideWord {
        WideWord::new(!self.w[0], !self.w[1])
    }
}

impl BitAndAssign for WideWord {
    #[inline]
    fn bitand_assign(&mut self, rhs: WideWord) {
        *self = *self & rhs;
    }
}

impl BitOrAssign for WideWord {
    #[inline]
    fn bitor_assign(&mut self, rhs: WideWord) {
        *self = *self | rhs;
    }
}

impl BitXorAssign for WideWord {
    #[inline]
    fn bitxor_assign(&mut self, rhs: WideWord) {
        *self = *self ^ rhs;
    }
}

impl BitWord for WideWord {
    const BITS: usize = 128;
    const ZERO: Self = WideWord::new(0, 0);

    #[inline]
    fn bit(index: usize) -> Self {
        debug_assert!(index < Self::BITS);
        if index < 64 { WideWord::new(1 << index, 0) } else { WideWord::new(0, 1 << (index - 64)) }
    }

    #[inline]
    fn low_mask(n: usize) -> Self {
        match n {
            0 => WideWord::ZERO,
            1..=63 => WideWord::new((1u64 << n) - 1, 0),
            64 => WideWord::new(u64::MAX, 0),
            65..=127 => WideWord::new(u64::MAX, (1u64 << (n - 64)) - 1),
            _ => WideWord::new(u64::MAX, u64::MAX),
        }
    }

    /// 下位語からあふれたビットを上位語へ繰り上げる
    #[inline]
    fn shift_up(self, n: u32) -> Self {
        match n {
            0 => self,
            1..=63 => WideWord::new(self.w[0] << n, (self.w[1] << n) | (self.w[0] >> (64 - n))),
            64..=127 => WideWord::new(0, self.w[0] << (n - 64)),
            _ => WideWord::ZERO,
        }
    }

    /// 上位語からこぼれたビットを下位語へ繰り下げる
    #[inline]
    fn shift_down(self, n: u32) -> Self {
        match n {
            0 => self,
            1..=63 => WideWord::new((self.w[0] >> n) | (self.w[1] << (64 - n)), self.w[1] >> n),
            64..=127 => WideWord::new(self.w[1] >> (n - 64), 0),
            _ => WideWord::ZERO,
        }
    }

    #[inline]
    fn hamming_weight(self) -> u32 {
        hamming_weight_u64(self.w[0]) + hamming_weight_u64(self.w[1])
    }

    #[inline]
    fn lowest_index(self) -> Option<usize> {
        if self.w[0] != 0 {
            Some(self.w[0].trailing_zeros() as usize)
        } else if self.w[1] != 0 {
            Some(64 + self.w[1].trailing_zeros() as usize)
        } else {
            None
        }
    }

    #[inline]
    fn clear_lowest(self) -> Self {
        if self.w[0] != 0 {
            WideWord::new(self.w[0] & self.w[0].wrapping_sub(1), self.w[1])
        } else {
            WideWord::new(0, self.w[1] & self.w[1].wrapping_sub(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hamming_weight() {
        assert_eq!(hamming_weight_u64(0), 0);
        assert_eq!(hamming_weight_u64(u64::MAX), 64);
        assert_eq!(0b1011_0000u16.hamming_weight(), 3);
        assert_eq!(WideWord::new(0b11, 0b111).hamming_weight(), 5);
    }

    #[test]
    fn test_low_mask() {
        assert_eq!(u16::low_mask(12), 0x0fff);
        assert_eq!(u64::low_mask(64), u64::MAX);
        assert_eq!(WideWord::low_mask(81), WideWord::new(u64::MAX, (1 << 17) - 1));
    }

    #[test]
    fn test_primitive_word_width() {
        assert_eq!(<u16 as BitWord>::BITS, 16);
        assert_eq!(<u32 as BitWord>::BITS, 32);
        assert_eq!(<u64 as BitWord>::BITS, 64);
        assert_eq!(u16::low_mask(16), u16::MAX);
        assert_eq!(u32::low_mask(40), u32::MAX);
        assert_eq!(u16::bit(15), 0x8000);
        assert_eq!(u32::bit(24), 1 << 24);
    }

    #[test]
    fn test_wide_shift_carries_across_words() {
        let w = WideWord::bit(63);
        assert_eq!(w.shift_up(1), WideWord::bit(64));
        assert_eq!(w.shift_up(9), WideWord::bit(72));
        assert_eq!(WideWord::bit(64).shift_down(1), WideWord::bit(63));
        assert_eq!(WideWord::bit(80).shift_down(19), WideWord::bit(61));
        assert_eq!(WideWord::bit(5).shift_down(9), WideWord::ZERO);
        assert_eq!(WideWord::bit(3).shift_up(70), WideWord::bit(73));
    }

    #[test]
    fn test_lowest_index() {
        assert_eq!(0u32.lowest_index(), None);
        assert_eq!(0b1000u32.lowest_index(), Some(3));
        let w = WideWord::bit(70) | WideWord::bit(66);
        assert_eq!(w.lowest_index(), Some(66));
        assert_eq!(w.clear_lowest(), WideWord::bit(70));
        assert_eq!(WideWord::bit(2).clear_lowest(), WideWord::ZERO);
    }

    #[test]
    fn test_test_bit() {
        assert!(WideWord::bit(80).test(80));
        assert!(!WideWord::bit(80).test(16));
        assert!(0b100u16.test(2));
    }
}
