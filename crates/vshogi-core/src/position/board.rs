//! 盤面（Board）
//!
//! マスごとの駒の配列と、方向に沿って駒を探す問い合わせを提供する。
//! 王手・ピンの判定はすべて [`Board::find_attacker`] と [`Board::find_pinned`] に帰着する。

use std::marker::PhantomData;

use crate::bitboard::BitBoard;
use crate::types::{Color, Direction, Piece, Square};
use crate::variant::Variant;

/// 盤面
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board<V: Variant> {
    cells: [Piece; Square::MAX_NUM],
    _variant: PhantomData<V>,
}

impl<V: Variant> Board<V> {
    /// 駒のない盤
    pub fn empty() -> Board<V> {
        Board { cells: [Piece::VOID; Square::MAX_NUM], _variant: PhantomData }
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Piece {
        self.cells[sq.index()]
    }

    #[inline]
    pub fn set(&mut self, sq: Square, piece: Piece) {
        self.cells[sq.index()] = piece;
    }

    /// マスの駒を空にして返す
    #[inline]
    pub fn take(&mut self, sq: Square) -> Piece {
        std::mem::replace(&mut self.cells[sq.index()], Piece::VOID)
    }

    #[inline]
    pub fn is_empty_at(&self, sq: Square) -> bool {
        self.get(sq).is_void()
    }

    /// (マス, 駒) を盤上の駒について列挙する
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        V::squares().map(|sq| (sq, self.get(sq))).filter(|(_, p)| !p.is_void())
    }

    /// `color` の玉の位置
    pub fn king_location(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, V::KING);
        V::squares().find(|&sq| self.get(sq) == king)
    }

    /// `color` の駒があるマス
    pub fn occupied(&self, color: Color) -> BitBoard<V> {
        self.pieces().filter(|(_, p)| p.is_color(color)).map(|(sq, _)| sq).collect()
    }

    /// 駒のあるマス
    pub fn occupied_all(&self) -> BitBoard<V> {
        self.pieces().map(|(sq, _)| sq).collect()
    }

    /// `sq` にある駒の利き
    #[inline]
    pub fn attacks_from(&self, sq: Square, occupied: BitBoard<V>) -> BitBoard<V> {
        V::tables().attacks(self.get(sq), sq, occupied)
    }

    /// `target` から `dir` 方向に進んで最初に見つかる駒が、`color` の駒で
    /// `target` に利いていればそのマスを返す。`skip` のマスは空きとみなす。
    pub fn find_attacker(
        &self,
        color: Color,
        target: Square,
        dir: Direction,
        skip: Option<Square>,
    ) -> Option<Square> {
        let tables = V::tables();
        let toward_target = dir.rotate();
        let mut adjacent = true;
        let mut cur = target;
        loop {
            cur = V::shift(cur, dir)?;
            let piece = self.get(cur);
            if piece.is_void() || Some(cur) == skip {
                if dir.is_knight() {
                    return None;
                }
                adjacent = false;
                continue;
            }
            if !piece.is_color(color) {
                return None;
            }
            let attacks = (adjacent && tables.steps_toward(piece, toward_target))
                || tables.ranges_toward(piece, toward_target);
            return attacks.then_some(cur);
        }
    }

    /// `king` から `dir` 方向を見て、`pinner_color` の走り駒に釘付けにされた
    /// 相手側の駒があればそのマスを返す
    pub fn find_pinned(
        &self,
        pinner_color: Color,
        king: Square,
        dir: Direction,
    ) -> Option<Square> {
        if dir.is_knight() {
            return None;
        }
        let tables = V::tables();
        let mut pinned = None;
        let mut cur = king;
        loop {
            cur = V::shift(cur, dir)?;
            let piece = self.get(cur);
            if piece.is_void() {
                continue;
            }
            match pinned {
                None => {
                    if piece.is_color(pinner_color) {
                        return None;
                    }
                    pinned = Some(cur);
                }
                Some(sq) => {
                    let pins = piece.is_color(pinner_color)
                        && tables.ranges_toward(piece, dir.rotate());
                    return pins.then_some(sq);
                }
            }
        }
    }

    /// `sq` に `color` の駒が利いているか
    pub fn is_square_attacked(&self, color: Color, sq: Square, skip: Option<Square>) -> bool {
        V::DIRECTIONS.iter().any(|&dir| self.find_attacker(color, sq, dir, skip).is_some())
    }

    /// `sq` に利いている `color` の駒（最大 `Direction::NUM` 個）
    pub fn attackers(&self, color: Color, sq: Square) -> impl Iterator<Item = Square> + '_ {
        V::DIRECTIONS.iter().filter_map(move |&dir| self.find_attacker(color, sq, dir, None))
    }

    /// 左右反転した盤
    pub fn hflip(&self) -> Board<V> {
        let mut out = Board::empty();
        for (sq, piece) in self.pieces() {
            out.set(V::hflip_square(sq), piece);
        }
        out
    }
}

impl<V: Variant> Default for Board<V> {
    fn default() -> Self {
        Board::empty()
    }
}

impl<V: Variant> std::fmt::Debug for Board<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Board<{}>", V::NAME)?;
        for row in 0..V::NUM_RANKS {
            for col in 0..V::NUM_FILES {
                let sq = Square::new((row * V::NUM_FILES + col) as u8);
                let piece = self.get(sq);
                match (piece.color(), piece.piece_type()) {
                    (Some(c), Some(pt)) => {
                        let ch = V::piece_char(pt);
                        let prefix = if pt.is_promoted() { '+' } else { ' ' };
                        let ch = match c {
                            Color::Black => ch.to_ascii_uppercase(),
                            Color::White => ch,
                        };
                        write!(f, "{prefix}{ch}")?;
                    }
                    _ => f.write_str(" .")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
