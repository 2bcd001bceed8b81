//! どうぶつしょうぎ（3x4）
//!
//! ```text
//!     A   B   C
//!   +---+---+---+
//! 1 | 0 | 1 | 2 |
//!   +---+---+---+
//! 2 | 3 | 4 | 5 |
//!   +---+---+---+
//! 3 | 6 | 7 | 8 |
//!   +---+---+---+
//! 4 | 9 | 10| 11|
//!   +---+---+---+
//! ```
//!
//! ひよこは最奥の段に進むと自動的ににわとりになる。ライオンを取るか、
//! ライオンが最奥の段に到達すると勝ち。

use std::sync::OnceLock;

use super::{
    DIAGONAL, GOLD_STEPS, KING_STEPS, ORTHOGONAL, PAWN_STEPS, Rules, SquareNaming, Variant,
};
use crate::bitboard::AttackTables;
use crate::position::{State, ZobristKeys};
use crate::types::{Direction, PieceType, Square};

/// ひよこ
pub const CH: PieceType = PieceType::new(0);
/// ぞう
pub const EL: PieceType = PieceType::new(1);
/// きりん
pub const GI: PieceType = PieceType::new(2);
/// ライオン
pub const LI: PieceType = PieceType::new(3);
/// にわとり
pub const HE: PieceType = CH.promote();

pub const A1: Square = Square::new(0);
pub const B1: Square = Square::new(1);
pub const C1: Square = Square::new(2);
pub const A2: Square = Square::new(3);
pub const B2: Square = Square::new(4);
pub const C2: Square = Square::new(5);
pub const A3: Square = Square::new(6);
pub const B3: Square = Square::new(7);
pub const C3: Square = Square::new(8);
pub const A4: Square = Square::new(9);
pub const B4: Square = Square::new(10);
pub const C4: Square = Square::new(11);

const ZOBRIST_SEED: u64 = 0x616e_696d_616c_3334;

static TABLES: OnceLock<AttackTables<AnimalShogi>> = OnceLock::new();
static ZOBRIST: OnceLock<ZobristKeys> = OnceLock::new();

/// どうぶつしょうぎ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AnimalShogi;

impl Variant for AnimalShogi {
    type Bits = u16;

    const NAME: &'static str = "animal_shogi";
    const NUM_FILES: usize = 3;
    const NUM_RANKS: usize = 4;
    const DIRECTIONS: &'static [Direction] = &Direction::ADJACENT;
    const NUM_POLICY_DIRECTIONS: usize = 8;
    const PROMOTION_RANKS: usize = 1;
    const RULES: Rules = Rules::Dobutsu;
    const SQUARE_NAMING: SquareNaming = SquareNaming::Dobutsu;
    const KING: PieceType = LI;
    const PAWN: PieceType = CH;
    const PIECE_TYPES: &'static [PieceType] = &[CH, EL, GI, LI, HE];
    const STAND_TYPES: &'static [PieceType] = &[CH, EL, GI];
    const STAND_SFEN_ORDER: &'static [PieceType] = &[GI, EL, CH];
    const STAND_MAX: &'static [u8] = &[2, 2, 2];
    const MAX_ACCEPTABLE_REPETITIONS: usize = 2;
    const DEFAULT_SFEN: &'static str = "gle/1c1/1C1/ELG b - 1";

    fn step_directions(pt: PieceType) -> &'static [Direction] {
        match pt {
            CH => PAWN_STEPS,
            EL => DIAGONAL,
            GI => ORTHOGONAL,
            LI => KING_STEPS,
            HE => GOLD_STEPS,
            _ => &[],
        }
    }

    fn ranging_directions(_pt: PieceType) -> &'static [Direction] {
        &[]
    }

    fn is_promotable(pt: PieceType) -> bool {
        pt == CH
    }

    fn point(_pt: PieceType) -> u32 {
        0
    }

    fn piece_char(pt: PieceType) -> char {
        match pt {
            CH => 'c',
            EL => 'e',
            GI => 'g',
            LI => 'l',
            HE => 'h',
            _ => '?',
        }
    }

    fn piece_from_char(c: char) -> Option<PieceType> {
        match c.to_ascii_lowercase() {
            'c' => Some(CH),
            'e' => Some(EL),
            'g' => Some(GI),
            'l' => Some(LI),
            'h' => Some(HE),
            _ => None,
        }
    }

    fn tables() -> &'static AttackTables<Self> {
        TABLES.get_or_init(AttackTables::build)
    }

    fn zobrist() -> &'static ZobristKeys {
        ZOBRIST.get_or_init(|| ZobristKeys::new(ZOBRIST_SEED))
    }

    /// 盤面と手番側の持ち駒を詰め込んだ可逆なハッシュ
    fn position_hash(state: &State<Self>) -> u64 {
        state.packed_hash()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_constants() {
        assert_eq!(AnimalShogi::parse_square("a1"), Some(A1));
        assert_eq!(AnimalShogi::parse_square("b3"), Some(B3));
        assert_eq!(AnimalShogi::parse_square("c4"), Some(C4));
        assert_eq!(AnimalShogi::NUM_SQUARES, 12);
    }

    #[test]
    fn test_piece_chars() {
        for &pt in AnimalShogi::PIECE_TYPES {
            assert_eq!(AnimalShogi::piece_from_char(AnimalShogi::piece_char(pt)), Some(pt));
        }
        assert_eq!(AnimalShogi::piece_from_char('H'), Some(HE));
        assert_eq!(AnimalShogi::piece_from_char('p'), None);
    }

    #[test]
    fn test_hen_is_promoted_chick() {
        assert!(HE.is_promoted());
        assert_eq!(HE.demote(), CH);
        assert!(AnimalShogi::is_promotable(CH));
        assert!(!AnimalShogi::is_promotable(HE));
    }
}
