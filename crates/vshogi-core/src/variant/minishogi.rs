//! 5五将棋（5x5）
//!
//! 本将棋から香・桂を除いた駒で、敵陣は最奥の1段。

use std::sync::OnceLock;

use super::{
    DIAGONAL, GOLD_STEPS, KING_STEPS, ORTHOGONAL, PAWN_STEPS, Rules, SILVER_STEPS, SquareNaming,
    Variant,
};
use crate::bitboard::AttackTables;
use crate::position::ZobristKeys;
use crate::types::{Direction, PieceType};

pub const FU: PieceType = PieceType::new(0);
pub const GI: PieceType = PieceType::new(1);
pub const KA: PieceType = PieceType::new(2);
pub const HI: PieceType = PieceType::new(3);
pub const KI: PieceType = PieceType::new(4);
pub const OU: PieceType = PieceType::new(5);
pub const TO: PieceType = FU.promote();
pub const NG: PieceType = GI.promote();
pub const UM: PieceType = KA.promote();
pub const RY: PieceType = HI.promote();

const ZOBRIST_SEED: u64 = 0x6d69_6e69_7368_6f67;

static TABLES: OnceLock<AttackTables<Minishogi>> = OnceLock::new();
static ZOBRIST: OnceLock<ZobristKeys> = OnceLock::new();

/// 5五将棋
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Minishogi;

impl Variant for Minishogi {
    type Bits = u32;

    const NAME: &'static str = "minishogi";
    const NUM_FILES: usize = 5;
    const NUM_RANKS: usize = 5;
    const DIRECTIONS: &'static [Direction] = &Direction::ADJACENT;
    const NUM_POLICY_DIRECTIONS: usize = 8;
    const PROMOTION_RANKS: usize = 1;
    const RULES: Rules = Rules::Standard;
    const SQUARE_NAMING: SquareNaming = SquareNaming::Usi;
    const KING: PieceType = OU;
    const PAWN: PieceType = FU;
    const PIECE_TYPES: &'static [PieceType] = &[FU, GI, KA, HI, KI, OU, TO, NG, UM, RY];
    const STAND_TYPES: &'static [PieceType] = &[FU, GI, KA, HI, KI];
    const STAND_SFEN_ORDER: &'static [PieceType] = &[HI, KA, KI, GI, FU];
    const STAND_MAX: &'static [u8] = &[2, 2, 2, 2, 2];
    const MAX_ACCEPTABLE_REPETITIONS: usize = 3;
    const DEFAULT_SFEN: &'static str = "rbsgk/4p/5/P4/KGSBR b - 1";

    fn step_directions(pt: PieceType) -> &'static [Direction] {
        match pt {
            FU => PAWN_STEPS,
            GI => SILVER_STEPS,
            KI | TO | NG => GOLD_STEPS,
            OU => KING_STEPS,
            UM => ORTHOGONAL,
            RY => DIAGONAL,
            _ => &[],
        }
    }

    fn ranging_directions(pt: PieceType) -> &'static [Direction] {
        match pt {
            KA | UM => DIAGONAL,
            HI | RY => ORTHOGONAL,
            _ => &[],
        }
    }

    fn is_promotable(pt: PieceType) -> bool {
        matches!(pt, FU | GI | KA | HI)
    }

    fn point(pt: PieceType) -> u32 {
        match pt {
            OU => 0,
            KA | HI | UM | RY => 5,
            _ => 1,
        }
    }

    fn piece_char(pt: PieceType) -> char {
        match pt.demote() {
            FU => 'p',
            GI => 's',
            KA => 'b',
            HI => 'r',
            KI => 'g',
            OU => 'k',
            _ => '?',
        }
    }

    fn piece_from_char(c: char) -> Option<PieceType> {
        match c.to_ascii_lowercase() {
            'p' => Some(FU),
            's' => Some(GI),
            'b' => Some(KA),
            'r' => Some(HI),
            'g' => Some(KI),
            'k' => Some(OU),
            _ => None,
        }
    }

    fn tables() -> &'static AttackTables<Self> {
        TABLES.get_or_init(AttackTables::build)
    }

    fn zobrist() -> &'static ZobristKeys {
        ZOBRIST.get_or_init(|| ZobristKeys::new(ZOBRIST_SEED))
    }
}
