//! どうぶつしょうぎの可逆ハッシュ
//!
//! ```text
//! bits 0-47 : 盤面。1マス4bit（手番ビット << 3 | 駒種インデックス、空きは 0xF）
//! bits 48-53: 手番側の持ち駒（ひよこ・ぞう・きりん 各2bit）
//! bit  55   : 手番（0: 先手, 1: 後手）
//! ```
//!
//! 相手の持ち駒は盤上と手番側の持ち駒の残りとして復元できる。

use crate::types::{Color, Piece};
use crate::variant::{AnimalShogi, Variant};

use super::{Board, Stand, State};

const SQUARE_BITS: u32 = 4;
const EMPTY_NIBBLE: u64 = 0xF;
const STAND_SHIFT: u32 = 48;
const STAND_MASK: u64 = 0x3F;
const TURN_SHIFT: u32 = 55;

/// 各駒種の総数（にわとりはひよことして数える）
const TOTAL_PIECES: [u8; 3] = [2, 2, 2];

impl State<AnimalShogi> {
    /// 盤面・手番・手番側の持ち駒を詰め込んだ値
    pub fn packed_hash(&self) -> u64 {
        let mut hash = 0u64;
        for sq in AnimalShogi::squares() {
            let pc = self.board().get(sq);
            let nibble = match (pc.color(), pc.piece_type().and_then(AnimalShogi::feature_index)) {
                (Some(c), Some(i)) => ((c.index() as u64) << 3) | i as u64,
                _ => EMPTY_NIBBLE,
            };
            hash |= nibble << (sq.index() as u32 * SQUARE_BITS);
        }
        hash |= (self.stand(self.turn()).raw() as u64 & STAND_MASK) << STAND_SHIFT;
        hash |= (self.turn().index() as u64) << TURN_SHIFT;
        hash
    }

    /// [`State::packed_hash`] から局面を復元する。値が不正なら `None`
    pub fn from_packed_hash(hash: u64) -> Option<State<AnimalShogi>> {
        let turn = if (hash >> TURN_SHIFT) & 1 == 0 { Color::Black } else { Color::White };
        let mut board = Board::empty();
        let mut remaining = TOTAL_PIECES;
        for sq in AnimalShogi::squares() {
            let nibble = (hash >> (sq.index() as u32 * SQUARE_BITS)) & EMPTY_NIBBLE;
            if nibble == EMPTY_NIBBLE {
                continue;
            }
            let color = if nibble & 0b1000 == 0 { Color::Black } else { Color::White };
            let pt = *AnimalShogi::PIECE_TYPES.get((nibble & 0b0111) as usize)?;
            board.set(sq, Piece::new(color, pt));
            if let Some(i) = AnimalShogi::stand_index(pt.demote()) {
                remaining[i] = remaining[i].checked_sub(1)?;
            }
        }

        let mut mover = Stand::empty();
        let mut opponent = Stand::empty();
        let bits = (hash >> STAND_SHIFT) & STAND_MASK;
        for (i, &pt) in AnimalShogi::STAND_TYPES.iter().enumerate() {
            let n = ((bits >> (2 * i)) & 0b11) as u8;
            let rest = remaining[i].checked_sub(n)?;
            for _ in 0..n {
                mover.add(pt);
            }
            for _ in 0..rest {
                opponent.add(pt);
            }
        }
        let mut stands = [Stand::empty(); Color::NUM];
        stands[turn.index()] = mover;
        stands[(!turn).index()] = opponent;
        Some(State::from_parts(board, stands, turn))
    }
}

/// 初期局面の値（テスト・デバッグ用）
pub const INITIAL_PACKED_HASH: u64 = {
    // gle/1c1/1C1/ELG b -
    let cells: [u64; 12] = [10, 11, 9, 15, 8, 15, 15, 0, 15, 1, 3, 2];
    let mut hash = 0u64;
    let mut i = 0;
    while i < cells.len() {
        hash |= cells[i] << (i as u32 * SQUARE_BITS);
        i += 1;
    }
    hash
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Move;
    use crate::variant::animal;

    #[test]
    fn test_initial_position() {
        let s = State::<AnimalShogi>::new();
        assert_eq!(s.packed_hash(), INITIAL_PACKED_HASH);
        assert_eq!(s.hash(), INITIAL_PACKED_HASH);
        assert_eq!(State::from_packed_hash(INITIAL_PACKED_HASH), Some(s));
    }

    #[test]
    fn test_round_trip_with_stands() {
        let mut s = State::<AnimalShogi>::new();
        s.apply(Move::normal(animal::B3, animal::B2, false));
        // 後手番。先手がひよこを持っている
        let restored = State::from_packed_hash(s.packed_hash()).unwrap();
        assert_eq!(restored, s);
        assert_eq!(restored.stand(Color::Black).count(animal::CH), 1);
    }

    #[test]
    fn test_turn_bit() {
        let black = State::<AnimalShogi>::from_sfen("gle/1c1/1C1/ELG b -").unwrap();
        let white = State::<AnimalShogi>::from_sfen("gle/1c1/1C1/ELG w -").unwrap();
        assert_eq!(black.packed_hash() ^ white.packed_hash(), 1 << TURN_SHIFT);
    }

    #[test]
    fn test_invalid_hash() {
        // 3匹目のぞう
        let mut hash = INITIAL_PACKED_HASH;
        hash &= !(0xF << (3 * SQUARE_BITS));
        hash |= 1 << (3 * SQUARE_BITS);
        assert_eq!(State::from_packed_hash(hash), None);
        // 範囲外の駒種インデックス
        let hash = INITIAL_PACKED_HASH & !(0xF << (3 * SQUARE_BITS)) | (6 << (3 * SQUARE_BITS));
        assert_eq!(State::from_packed_hash(hash), None);
    }
}
