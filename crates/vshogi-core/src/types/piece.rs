//! 駒種（PieceType）と盤上の駒（Piece）
//!
//! すべての変種で共通のビット配置を使う。
//!
//! ```text
//! ___c pkkk
//!    |  |└ 駒の種類（生駒 0-7）
//!    |  └─ 成りビット
//!    └──── 手番ビット（0: 先手, 1: 後手）
//! ```
//!
//! 空きマスは `0b1_1111`（`Piece::VOID`）で表す。駒の種類番号の割り当ては
//! 変種ごとに異なり、各変種モジュールが定数として定義する。

use super::Color;

/// 駒種（先後の区別なし）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceType(u8);

impl PieceType {
    /// 成りビット
    pub const PROMOTION_BIT: u8 = 0b1000;

    /// 生駒の種類を表すビット
    pub const KIND_MASK: u8 = 0b0111;

    /// 駒種の取りうる値の数（テーブルサイズ）
    pub const NUM: usize = 16;

    #[inline]
    pub const fn new(raw: u8) -> PieceType {
        debug_assert!(raw < 16);
        PieceType(raw)
    }

    /// 指し手の7bitから復元する。変種の駒種かどうかは呼び出し側が確かめる
    #[inline]
    pub(crate) const fn from_move_bits(raw: u8) -> PieceType {
        PieceType(raw)
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_promoted(self) -> bool {
        self.0 & Self::PROMOTION_BIT != 0
    }

    /// 成りビットを立てる（成れるかどうかは変種が判断する）
    #[inline]
    pub const fn promote(self) -> PieceType {
        PieceType(self.0 | Self::PROMOTION_BIT)
    }

    /// 成りビットを落とす
    #[inline]
    pub const fn demote(self) -> PieceType {
        PieceType(self.0 & Self::KIND_MASK)
    }
}

/// 盤上の駒（手番付き）。空きマスを含む
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece(u8);

impl Piece {
    /// 手番ビット
    pub const COLOR_BIT: u8 = 0b1_0000;

    /// 空きマス
    pub const VOID: Piece = Piece(0b1_1111);

    /// 駒の取りうる値の数（テーブルサイズ）
    pub const NUM: usize = 32;

    #[inline]
    pub const fn new(color: Color, pt: PieceType) -> Piece {
        match color {
            Color::Black => Piece(pt.raw()),
            Color::White => Piece(pt.raw() | Self::COLOR_BIT),
        }
    }

    #[inline]
    pub const fn from_raw(raw: u8) -> Piece {
        debug_assert!(raw < 32);
        Piece(raw)
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_void(self) -> bool {
        self.0 == Self::VOID.0
    }

    /// 手番。空きマスなら `None`
    #[inline]
    pub const fn color(self) -> Option<Color> {
        if self.is_void() {
            None
        } else if self.0 & Self::COLOR_BIT == 0 {
            Some(Color::Black)
        } else {
            Some(Color::White)
        }
    }

    /// 指定手番の駒か
    #[inline]
    pub const fn is_color(self, c: Color) -> bool {
        match self.color() {
            Some(pc) => pc as u8 == c as u8,
            None => false,
        }
    }

    /// 駒種。空きマスなら `None`
    #[inline]
    pub const fn piece_type(self) -> Option<PieceType> {
        if self.is_void() { None } else { Some(PieceType(self.0 & !Self::COLOR_BIT)) }
    }

    #[inline]
    pub const fn promote(self) -> Piece {
        if self.is_void() { self } else { Piece(self.0 | PieceType::PROMOTION_BIT) }
    }

    #[inline]
    pub const fn demote(self) -> Piece {
        if self.is_void() { self } else { Piece(self.0 & !PieceType::PROMOTION_BIT) }
    }

    /// 手番を反転した駒
    #[inline]
    pub const fn flip_color(self) -> Piece {
        if self.is_void() { self } else { Piece(self.0 ^ Self::COLOR_BIT) }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::VOID
    }
}

impl std::fmt::Debug for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.color(), self.piece_type()) {
            (Some(c), Some(pt)) => write!(f, "Piece({c:?}, {})", pt.raw()),
            _ => write!(f, "Piece(VOID)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promote_demote() {
        let pt = PieceType::new(3);
        assert!(!pt.is_promoted());
        assert!(pt.promote().is_promoted());
        assert_eq!(pt.promote().demote(), pt);
    }

    #[test]
    fn test_piece_packing_is_bijective() {
        for raw in 0..16u8 {
            let pt = PieceType::new(raw);
            for c in Color::ALL {
                let p = Piece::new(c, pt);
                if p.is_void() {
                    continue;
                }
                assert_eq!(p.color(), Some(c));
                assert_eq!(p.piece_type(), Some(pt));
            }
        }
    }

    #[test]
    fn test_void() {
        assert!(Piece::VOID.is_void());
        assert_eq!(Piece::VOID.color(), None);
        assert_eq!(Piece::VOID.piece_type(), None);
        assert_eq!(Piece::VOID.promote(), Piece::VOID);
        assert_eq!(Piece::VOID.demote(), Piece::VOID);
        assert_eq!(Piece::default(), Piece::VOID);
    }

    #[test]
    fn test_flip_color() {
        let p = Piece::new(Color::Black, PieceType::new(2));
        assert_eq!(p.flip_color(), Piece::new(Color::White, PieceType::new(2)));
        assert!(p.is_color(Color::Black));
        assert!(!p.is_color(Color::White));
    }
}
