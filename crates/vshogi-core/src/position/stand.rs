//! 持ち駒（Stand）
//!
//! 持ち駒の枚数を `u32` にビット詰めで保持する。各フィールドの幅は
//! その駒種の最大枚数から決まる（2枚なら2bit、4枚なら3bit、18枚なら5bit）。

use std::marker::PhantomData;

use crate::types::PieceType;
use crate::variant::Variant;

/// 最大枚数を表せるビット幅
#[inline]
const fn field_width(max: u8) -> u32 {
    u8::BITS - max.leading_zeros()
}

/// 片方の持ち駒
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Stand<V: Variant> {
    packed: u32,
    _variant: PhantomData<V>,
}

impl<V: Variant> Stand<V> {
    #[inline]
    pub fn empty() -> Stand<V> {
        Stand { packed: 0, _variant: PhantomData }
    }

    /// 持ち駒インデックスのフィールド位置とマスク
    #[inline]
    fn field(index: usize) -> (u32, u32) {
        let shift: u32 = V::STAND_MAX[..index].iter().map(|&m| field_width(m)).sum();
        let mask = (1u32 << field_width(V::STAND_MAX[index])) - 1;
        (shift, mask)
    }

    #[inline]
    fn count_at(self, index: usize) -> u8 {
        let (shift, mask) = Self::field(index);
        ((self.packed >> shift) & mask) as u8
    }

    /// 枚数。持ち駒にならない駒種は0
    #[inline]
    pub fn count(self, pt: PieceType) -> u8 {
        V::stand_index(pt).map_or(0, |i| self.count_at(i))
    }

    #[inline]
    pub fn exists(self, pt: PieceType) -> bool {
        self.count(pt) > 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.packed == 0
    }

    /// 1枚加える。最大枚数を超える、または持ち駒にならない駒種なら `false`
    pub fn add(&mut self, pt: PieceType) -> bool {
        let Some(index) = V::stand_index(pt) else {
            return false;
        };
        if self.count_at(index) >= V::STAND_MAX[index] {
            return false;
        }
        let (shift, _) = Self::field(index);
        self.packed += 1 << shift;
        true
    }

    /// 1枚取り除く。持っていなければ `false`
    pub fn remove(&mut self, pt: PieceType) -> bool {
        let Some(index) = V::stand_index(pt) else {
            return false;
        };
        if self.count_at(index) == 0 {
            return false;
        }
        let (shift, _) = Self::field(index);
        self.packed -= 1 << shift;
        true
    }

    /// (駒種, 枚数) を `STAND_TYPES` の順に列挙する
    pub fn iter(self) -> impl Iterator<Item = (PieceType, u8)> {
        V::STAND_TYPES.iter().enumerate().map(move |(i, &pt)| (pt, self.count_at(i)))
    }

    /// 持ち駒の総数
    pub fn total(self) -> u32 {
        self.iter().map(|(_, n)| n as u32).sum()
    }

    /// 入玉宣言の点数
    pub fn points(self) -> u32 {
        self.iter().map(|(pt, n)| V::point(pt) * n as u32).sum()
    }

    /// 詰め込んだ生の値
    #[inline]
    pub fn raw(self) -> u32 {
        self.packed
    }
}

impl<V: Variant> std::fmt::Debug for Stand<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_map();
        for (pt, n) in self.iter().filter(|&(_, n)| n > 0) {
            list.entry(&V::piece_char(pt), &n);
        }
        list.finish()
    }
}
