//! マス（Square）
//!
//! 盤面のマスを一次元インデックスで表す。インデックスは先手から見て
//! 左上を0とし、段ごとに左から右へ並ぶ（`index = row * 筋数 + col`）。
//! 筋・段の解釈は盤の大きさに依存するため、座標変換は [`crate::Variant`] が担う。

/// 盤上のマス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// 扱う盤面の最大マス数（9x9）
    pub const MAX_NUM: usize = 81;

    #[inline]
    pub const fn new(index: u8) -> Square {
        debug_assert!((index as usize) < Square::MAX_NUM);
        Square(index)
    }

    /// 指し手の7bitから復元する。盤内かどうかは呼び出し側が確かめる
    #[inline]
    pub(crate) const fn from_move_bits(raw: u8) -> Square {
        Square(raw)
    }

    /// 範囲外なら `None`
    #[inline]
    pub const fn from_index(index: usize, num_squares: usize) -> Option<Square> {
        if index < num_squares { Some(Square(index as u8)) } else { None }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
