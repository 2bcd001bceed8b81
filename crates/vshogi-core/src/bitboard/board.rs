//! Bitboard本体

use std::marker::PhantomData;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use super::BitWord;
use crate::types::{Direction, Square};
use crate::variant::Variant;

/// 盤上のマスの集合
///
/// 盤外のビットは常に0に保つ。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BitBoard<V: Variant> {
    bits: V::Bits,
    _variant: PhantomData<V>,
}

impl<V: Variant> BitBoard<V> {
    #[inline]
    pub fn empty() -> BitBoard<V> {
        BitBoard::from_bits(V::Bits::ZERO)
    }

    /// 盤上の全マス
    #[inline]
    pub fn full() -> BitBoard<V> {
        BitBoard::from_bits(V::Bits::low_mask(V::NUM_SQUARES))
    }

    #[inline]
    pub fn from_square(sq: Square) -> BitBoard<V> {
        BitBoard::from_bits(V::Bits::bit(sq.index()))
    }

    #[inline]
    pub fn from_bits(bits: V::Bits) -> BitBoard<V> {
        BitBoard { bits, _variant: PhantomData }
    }

    #[inline]
    pub fn bits(self) -> V::Bits {
        self.bits
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.bits.is_zero()
    }

    #[inline]
    pub fn contains(self, sq: Square) -> bool {
        self.bits.test(sq.index())
    }

    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.bits |= V::Bits::bit(sq.index());
    }

    #[inline]
    pub fn clear(&mut self, sq: Square) {
        self.bits &= !V::Bits::bit(sq.index());
    }

    /// マスの数
    #[inline]
    pub fn count(self) -> u32 {
        self.bits.hamming_weight()
    }

    /// インデックス最小のマス
    #[inline]
    pub fn lsb(self) -> Option<Square> {
        self.bits.lowest_index().map(|i| Square::new(i as u8))
    }

    /// インデックス最小のマスを取り出す
    #[inline]
    pub fn pop(&mut self) -> Option<Square> {
        let sq = self.lsb()?;
        self.bits = self.bits.clear_lowest();
        Some(sq)
    }

    #[inline]
    pub fn iter(self) -> BitBoardIter<V> {
        BitBoardIter { bb: self }
    }

    /// `dir` 方向へ1つずらす。`mask` はずらしても盤外に出ないマスの集合
    #[inline]
    pub fn shift_masked(self, dir: Direction, mask: V::Bits) -> BitBoard<V> {
        let (dc, dr) = dir.delta();
        let offset = dr * V::NUM_FILES as i32 + dc;
        let bits = self.bits & mask;
        let shifted = if offset >= 0 {
            bits.shift_up(offset as u32)
        } else {
            bits.shift_down((-offset) as u32)
        };
        BitBoard::from_bits(shifted)
    }

    /// `dir` 方向へ1つずらす。盤外に出るマスは消える
    #[inline]
    pub fn shift(self, dir: Direction) -> BitBoard<V> {
        V::tables().shift(self, dir)
    }

    /// 左右反転
    pub fn hflip(self) -> BitBoard<V> {
        self.iter().map(V::hflip_square).collect()
    }
}

impl<V: Variant> std::fmt::Debug for BitBoard<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "BitBoard<{}>", V::NAME)?;
        for row in 0..V::NUM_RANKS {
            for col in 0..V::NUM_FILES {
                let sq = Square::new((row * V::NUM_FILES + col) as u8);
                f.write_str(if self.contains(sq) { "1" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Bitboardのマスを列挙するイテレータ
pub struct BitBoardIter<V: Variant> {
    bb: BitBoard<V>,
}

impl<V: Variant> Iterator for BitBoardIter<V> {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        self.bb.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bb.count() as usize;
        (n, Some(n))
    }
}

impl<V: Variant> IntoIterator for BitBoard<V> {
    type Item = Square;
    type IntoIter = BitBoardIter<V>;

    #[inline]
    fn into_iter(self) -> BitBoardIter<V> {
        self.iter()
    }
}

impl<V: Variant> FromIterator<Square> for BitBoard<V> {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> BitBoard<V> {
        let mut bb = BitBoard::empty();
        for sq in iter {
            bb.set(sq);
        }
        bb
    }
}

impl<V: Variant> BitAnd for BitBoard<V> {
    type Output = BitBoard<V>;

    #[inline]
    fn bitand(self, rhs: BitBoard<V>) -> BitBoard<V> {
        BitBoard::from_bits(self.bits & rhs.bits)
    }
}

impl<V: Variant> BitOr for BitBoard<V> {
    type Output = BitBoard<V>;

    #[inline]
    fn bitor(self, rhs: BitBoard<V>) -> BitBoard<V> {
        BitBoard::from_bits(self.bits | rhs.bits)
    }
}

impl<V: Variant> BitXor for BitBoard<V> {
    type Output = BitBoard<V>;

    #[inline]
    fn bitxor(self, rhs: BitBoard<V>) -> BitBoard<V> {
        BitBoard::from_bits(self.bits ^ rhs.bits)
    }
}

/// 補集合。盤外のビットは立てない
impl<V: Variant> Not for BitBoard<V> {
    type Output = BitBoard<V>;

    #[inline]
    fn not(self) -> BitBoard<V> {
        BitBoard::from_bits(!self.bits & V::Bits::low_mask(V::NUM_SQUARES))
    }
}

impl<V: Variant> BitAndAssign for BitBoard<V> {
    #[inline]
    fn bitand_assign(&mut self, rhs: BitBoard<V>) {
        self.bits &= rhs.bits;
    }
}

impl<V: Variant> BitOrAssign for BitBoard<V> {
    #[inline]
    fn bitor_assign(&mut self, rhs: BitBoard<V>) {
        self.bits |= rhs.bits;
    }
}

impl<V: Variant> BitXorAssign for BitBoard<V> {
    #[inline]
    fn bitxor_assign(&mut self, rhs: BitBoard<V>) {
        self.bits ^= rhs.bits;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{AnimalShogi, Minishogi, Shogi, animal};

    #[test]
    fn test_not_is_masked_to_board() {
        let bb = !BitBoard::<AnimalShogi>::empty();
        assert_eq!(bb, BitBoard::full());
        assert_eq!(bb.count(), 12);
        let bb = !BitBoard::<Shogi>::empty();
        assert_eq!(bb.count(), 81);
    }

    #[test]
    fn test_iter_and_collect() {
        let bb: BitBoard<AnimalShogi> = [animal::A1, animal::B3, animal::C4].into_iter().collect();
        assert_eq!(bb.count(), 3);
        let squares: Vec<Square> = bb.iter().collect();
        assert_eq!(squares, vec![animal::A1, animal::B3, animal::C4]);
    }

    #[test]
    fn test_shift_clears_wrapped_squares() {
        // 左端の列を西へずらすと消える
        let bb = BitBoard::<Minishogi>::from_square(Square::new(5));
        assert!(bb.shift(Direction::W).is_empty());
        assert_eq!(bb.shift(Direction::E), BitBoard::from_square(Square::new(6)));
        assert_eq!(bb.shift(Direction::N), BitBoard::from_square(Square::new(0)));
        assert!(BitBoard::<Minishogi>::from_square(Square::new(0)).shift(Direction::N).is_empty());
    }

    #[test]
    fn test_shift_across_words() {
        // 9x9では下位語と上位語をまたぐ
        let sq = Shogi::parse_square("2h").unwrap();
        let bb = BitBoard::<Shogi>::from_square(sq);
        assert_eq!(bb.shift(Direction::S), BitBoard::from_square(Shogi::parse_square("2i").unwrap()));
        let sq = Shogi::parse_square("1a").unwrap();
        let bb = BitBoard::<Shogi>::from_square(sq);
        assert!(bb.shift(Direction::E).is_empty());
        assert!(bb.shift(Direction::NNW).is_empty());
        assert_eq!(bb.shift(Direction::SSW), BitBoard::from_square(Shogi::parse_square("2c").unwrap()));
    }

    #[test]
    fn test_hflip() {
        let bb: BitBoard<AnimalShogi> = [animal::A1, animal::B2].into_iter().collect();
        let flipped: BitBoard<AnimalShogi> = [animal::C1, animal::B2].into_iter().collect();
        assert_eq!(bb.hflip(), flipped);
    }
}
