//! 変種（Variant）
//!
//! 盤の大きさ・駒の種類・ルールの違いを `Variant` トレイトの関連定数と
//! 関連関数で表現する。盤面・局面・対局のロジックはこのトレイトに対して
//! 一度だけ書かれ、変種ごとに単相化される。
//!
//! - [`AnimalShogi`]: どうぶつしょうぎ（3x4）
//! - [`Minishogi`]: 5五将棋（5x5）
//! - [`JudkinsShogi`]: ジャドケンス将棋（6x6）
//! - [`Shogi`]: 本将棋（9x9）

pub mod animal;
pub mod judkins;
pub mod minishogi;
pub mod shogi;

use std::fmt::Debug;
use std::hash::Hash;

use crate::bitboard::{AttackTables, BitWord};
use crate::position::{State, ZobristKeys};
use crate::types::{Color, Direction, PieceType, Square};

pub use animal::AnimalShogi;
pub use judkins::JudkinsShogi;
pub use minishogi::Minishogi;
pub use shogi::Shogi;

/// ルール体系
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rules {
    /// 王手放置禁止・打ち歩詰め・二歩・入玉宣言のある通常ルール
    Standard,
    /// どうぶつしょうぎのルール（ライオンを取るか、トライで勝ち）
    Dobutsu,
}

/// マスの表記法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareNaming {
    /// 筋を数字（右から1）、段を英字（上からa）で表す（例: `7g`）
    Usi,
    /// 筋を英字（左からa）、段を数字（上から1）で表す（例: `b3`）
    Dobutsu,
}

// 先手視点の利きの方向（各変種で共有）
pub(crate) const PAWN_STEPS: &[Direction] = &[Direction::N];
pub(crate) const KNIGHT_STEPS: &[Direction] = &[Direction::NNW, Direction::NNE];
pub(crate) const SILVER_STEPS: &[Direction] =
    &[Direction::NW, Direction::N, Direction::NE, Direction::SW, Direction::SE];
pub(crate) const GOLD_STEPS: &[Direction] =
    &[Direction::NW, Direction::N, Direction::NE, Direction::W, Direction::E, Direction::S];
pub(crate) const KING_STEPS: &[Direction] = &Direction::ADJACENT;
pub(crate) const DIAGONAL: &[Direction] =
    &[Direction::NW, Direction::NE, Direction::SW, Direction::SE];
pub(crate) const ORTHOGONAL: &[Direction] =
    &[Direction::N, Direction::W, Direction::E, Direction::S];

/// 変種の定義
pub trait Variant:
    Copy + Clone + Debug + Default + PartialEq + Eq + Hash + Send + Sync + 'static
{
    /// 盤面Bitboardの下位ワード
    type Bits: BitWord;

    const NAME: &'static str;

    /// 筋の数（盤の幅）
    const NUM_FILES: usize;

    /// 段の数（盤の高さ）
    const NUM_RANKS: usize;

    const NUM_SQUARES: usize = Self::NUM_FILES * Self::NUM_RANKS;

    /// 利きの探索に使う方向（隣接8方向、または桂馬を含む12方向）
    const DIRECTIONS: &'static [Direction];

    /// 方策出力で使う移動方向の数
    const NUM_POLICY_DIRECTIONS: usize;

    /// 敵陣の段数
    const PROMOTION_RANKS: usize;

    const RULES: Rules;

    const SQUARE_NAMING: SquareNaming;

    /// 玉（ライオン）
    const KING: PieceType;

    /// 歩（ひよこ）。二歩・打ち歩詰めの対象
    const PAWN: PieceType;

    /// 盤上に現れうる駒種（特徴量の並び順）
    const PIECE_TYPES: &'static [PieceType];

    /// 持ち駒になる駒種。並び順が持ち駒のインデックスになる
    const STAND_TYPES: &'static [PieceType];

    /// SFENで持ち駒を出力する順序
    const STAND_SFEN_ORDER: &'static [PieceType];

    /// 持ち駒ごとの最大枚数（`STAND_TYPES` と同じ並び）
    const STAND_MAX: &'static [u8];

    /// 同一局面の出現を許す回数。これを超えると千日手
    const MAX_ACCEPTABLE_REPETITIONS: usize;

    /// 平手の初期局面
    const DEFAULT_SFEN: &'static str;

    /// 隣接（桂馬跳びを含む）への利きの方向。先手視点
    fn step_directions(pt: PieceType) -> &'static [Direction];

    /// 走り利きの方向。先手視点
    fn ranging_directions(pt: PieceType) -> &'static [Direction];

    /// 成ることのできる駒種か
    fn is_promotable(pt: PieceType) -> bool;

    /// 入玉宣言の点数
    fn point(pt: PieceType) -> u32;

    /// SFENの駒文字（小文字）。通常ルールの成駒は生駒と同じ文字で、`+` は呼び出し側が付ける
    fn piece_char(pt: PieceType) -> char;

    /// SFENの駒文字から生駒を得る。大文字・小文字は区別しない
    fn piece_from_char(c: char) -> Option<PieceType>;

    /// 利きテーブル（初回アクセス時に構築）
    fn tables() -> &'static AttackTables<Self>;

    /// Zobristキー（初回アクセス時に生成）
    fn zobrist() -> &'static ZobristKeys;

    /// 千日手判定に使う局面のハッシュ値
    fn position_hash(state: &State<Self>) -> u64 {
        state.zobrist_hash()
    }

    // ---- 盤面座標 ----

    #[inline]
    fn col(sq: Square) -> usize {
        sq.index() % Self::NUM_FILES
    }

    #[inline]
    fn row(sq: Square) -> usize {
        sq.index() / Self::NUM_FILES
    }

    /// (列, 段) のマス。盤外なら `None`
    #[inline]
    fn square_at(col: i32, row: i32) -> Option<Square> {
        if col < 0 || row < 0 || col >= Self::NUM_FILES as i32 || row >= Self::NUM_RANKS as i32 {
            return None;
        }
        Some(Square::new((row as usize * Self::NUM_FILES + col as usize) as u8))
    }

    /// `dir` 方向に1つ進んだマス
    #[inline]
    fn shift(sq: Square, dir: Direction) -> Option<Square> {
        let (dc, dr) = dir.delta();
        Self::square_at(Self::col(sq) as i32 + dc, Self::row(sq) as i32 + dr)
    }

    /// `from` から見た `to` の方向。この変種で使わない方向なら `None`
    fn direction(from: Square, to: Square) -> Option<Direction> {
        let dc = Self::col(to) as i32 - Self::col(from) as i32;
        let dr = Self::row(to) as i32 - Self::row(from) as i32;
        Direction::from_displacement(dc, dr).filter(|d| Self::DIRECTIONS.contains(d))
    }

    #[inline]
    fn hflip_square(sq: Square) -> Square {
        let col = Self::NUM_FILES - 1 - Self::col(sq);
        Square::new((Self::row(sq) * Self::NUM_FILES + col) as u8)
    }

    #[inline]
    fn rotate_square(sq: Square) -> Square {
        Square::new((Self::NUM_SQUARES - 1 - sq.index()) as u8)
    }

    /// `color` にとっての敵陣か
    #[inline]
    fn in_promotion_zone(sq: Square, color: Color) -> bool {
        let row = Self::row(sq);
        match color {
            Color::Black => row < Self::PROMOTION_RANKS,
            Color::White => row >= Self::NUM_RANKS - Self::PROMOTION_RANKS,
        }
    }

    /// マスの表記（`7g` や `b3`）
    fn square_name(sq: Square) -> String {
        let col = Self::col(sq);
        let row = Self::row(sq);
        let mut s = String::with_capacity(2);
        match Self::SQUARE_NAMING {
            SquareNaming::Usi => {
                s.push(char::from(b'0' + (Self::NUM_FILES - col) as u8));
                s.push(char::from(b'a' + row as u8));
            }
            SquareNaming::Dobutsu => {
                s.push(char::from(b'a' + col as u8));
                s.push(char::from(b'1' + row as u8));
            }
        }
        s
    }

    /// マスの表記を解析する
    fn parse_square(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let (col, row) = match Self::SQUARE_NAMING {
            SquareNaming::Usi => {
                let file = bytes[0].checked_sub(b'0')? as usize;
                if file == 0 || file > Self::NUM_FILES {
                    return None;
                }
                (Self::NUM_FILES - file, bytes[1].checked_sub(b'a')? as usize)
            }
            SquareNaming::Dobutsu => {
                (bytes[0].checked_sub(b'a')? as usize, bytes[1].checked_sub(b'1')? as usize)
            }
        };
        Self::square_at(col as i32, row as i32)
    }

    /// 全マス（インデックス順）
    fn squares() -> impl Iterator<Item = Square> {
        (0..Self::NUM_SQUARES).map(|i| Square::new(i as u8))
    }

    // ---- 駒種 ----

    /// 持ち駒のインデックス
    #[inline]
    fn stand_index(pt: PieceType) -> Option<usize> {
        Self::STAND_TYPES.iter().position(|&p| p == pt)
    }

    /// 特徴量での駒種のインデックス
    #[inline]
    fn feature_index(pt: PieceType) -> Option<usize> {
        Self::PIECE_TYPES.iter().position(|&p| p == pt)
    }

    /// 1マスあたりの方策チャネル数
    #[inline]
    fn num_policy_per_square() -> usize {
        let promotion = match Self::RULES {
            Rules::Standard => Self::NUM_POLICY_DIRECTIONS,
            Rules::Dobutsu => 0,
        };
        Self::NUM_POLICY_DIRECTIONS + promotion + Self::STAND_TYPES.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_names() {
        let sq = Shogi::parse_square("7g").unwrap();
        assert_eq!(Shogi::col(sq), 2);
        assert_eq!(Shogi::row(sq), 6);
        assert_eq!(Shogi::square_name(sq), "7g");
        assert_eq!(Shogi::parse_square("0a"), None);
        assert_eq!(Shogi::parse_square("1j"), None);
        assert_eq!(AnimalShogi::parse_square("b3"), Some(animal::B3));
        assert_eq!(AnimalShogi::square_name(animal::C4), "c4");
        assert_eq!(AnimalShogi::parse_square("d1"), None);
        assert_eq!(Minishogi::square_name(Square::new(0)), "5a");
        assert_eq!(JudkinsShogi::square_name(Square::new(35)), "1f");
    }

    #[test]
    fn test_shift_and_direction() {
        let sq = Shogi::parse_square("5e").unwrap();
        assert_eq!(Shogi::shift(sq, Direction::N), Shogi::parse_square("5d"));
        assert_eq!(Shogi::shift(sq, Direction::NNE), Shogi::parse_square("4c"));
        let corner = Shogi::parse_square("9a").unwrap();
        assert_eq!(Shogi::shift(corner, Direction::NW), None);
        assert_eq!(Shogi::shift(corner, Direction::W), None);
        let far = Shogi::parse_square("1i").unwrap();
        assert_eq!(Shogi::direction(corner, far), Some(Direction::SE));
        // 5x5には桂馬の方向がない
        let a = Minishogi::parse_square("3c").unwrap();
        let b = Minishogi::parse_square("2a").unwrap();
        assert_eq!(Minishogi::direction(a, b), None);
        let a = JudkinsShogi::parse_square("3c").unwrap();
        let b = JudkinsShogi::parse_square("2a").unwrap();
        assert_eq!(JudkinsShogi::direction(a, b), Some(Direction::NNE));
    }

    #[test]
    fn test_flip_and_rotate_squares() {
        assert_eq!(AnimalShogi::hflip_square(animal::A1), animal::C1);
        assert_eq!(AnimalShogi::hflip_square(animal::B2), animal::B2);
        assert_eq!(AnimalShogi::rotate_square(animal::A1), animal::C4);
        for sq in Shogi::squares() {
            assert_eq!(Shogi::rotate_square(Shogi::rotate_square(sq)), sq);
            assert_eq!(Shogi::hflip_square(Shogi::hflip_square(sq)), sq);
        }
    }

    #[test]
    fn test_promotion_zone() {
        let sq = Shogi::parse_square("1c").unwrap();
        assert!(Shogi::in_promotion_zone(sq, Color::Black));
        assert!(!Shogi::in_promotion_zone(sq, Color::White));
        let sq = Shogi::parse_square("1g").unwrap();
        assert!(Shogi::in_promotion_zone(sq, Color::White));
        let sq = JudkinsShogi::parse_square("1e").unwrap();
        assert!(JudkinsShogi::in_promotion_zone(sq, Color::White));
        assert!(!JudkinsShogi::in_promotion_zone(sq, Color::Black));
        assert!(AnimalShogi::in_promotion_zone(animal::A1, Color::Black));
        assert!(AnimalShogi::in_promotion_zone(animal::A4, Color::White));
    }

    #[test]
    fn test_num_policy() {
        assert_eq!(AnimalShogi::num_policy_per_square(), 8 + 3);
        assert_eq!(Minishogi::num_policy_per_square(), 16 + 5);
        assert_eq!(JudkinsShogi::num_policy_per_square(), 20 + 6);
        assert_eq!(Shogi::num_policy_per_square(), 20 + 7);
    }
}
