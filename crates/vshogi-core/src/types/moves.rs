//! 指し手（Move）
//!
//! 16bitで指し手を表現する。すべての変種で共通の表現を使う。
//!
//! - bits 0-6: 移動先のマス
//! - bits 7-13: 移動元のマス（駒打ちの場合は打つ駒種）
//! - bit 14: 成りフラグ
//! - bit 15: 駒打ちフラグ

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{Color, PieceType, Square};
use crate::error::MoveParseError;
use crate::variant::{Rules, Variant};

/// 合法手リスト。ほとんどの局面で128手未満なのでヒープ確保を避けられる
pub type MoveVec = SmallVec<[Move; 128]>;

/// 指し手の移動元
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveSource {
    /// 盤上のマス
    Board(Square),
    /// 持ち駒（打つ駒種）
    Stand(PieceType),
}

/// 指し手
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Move {
    data: u16,
}

impl Move {
    const DST_MASK: u16 = 0x7f;
    const SRC_SHIFT: u32 = 7;
    const SRC_MASK: u16 = 0x7f;
    const PROMOTE_BIT: u16 = 1 << 14;
    const DROP_BIT: u16 = 1 << 15;

    /// 盤上の駒を動かす手
    #[inline]
    pub const fn normal(from: Square, to: Square, promote: bool) -> Move {
        let mut data = to.raw() as u16;
        data |= (from.raw() as u16) << Self::SRC_SHIFT;
        if promote {
            data |= Self::PROMOTE_BIT;
        }
        Move { data }
    }

    /// 持ち駒を打つ手
    #[inline]
    pub const fn drop(piece_type: PieceType, to: Square) -> Move {
        let mut data = to.raw() as u16;
        data |= (piece_type.raw() as u16) << Self::SRC_SHIFT;
        data |= Self::DROP_BIT;
        Move { data }
    }

    #[inline]
    pub const fn from_u16(data: u16) -> Move {
        Move { data }
    }

    #[inline]
    pub const fn to_u16(self) -> u16 {
        self.data
    }

    #[inline]
    pub const fn to(self) -> Square {
        Square::from_move_bits((self.data & Self::DST_MASK) as u8)
    }

    /// 移動元。駒打ちなら `None`
    #[inline]
    pub const fn from(self) -> Option<Square> {
        if self.is_drop() {
            None
        } else {
            let raw = ((self.data >> Self::SRC_SHIFT) & Self::SRC_MASK) as u8;
            Some(Square::from_move_bits(raw))
        }
    }

    /// 打つ駒種。盤上の手なら `None`
    #[inline]
    pub const fn drop_piece_type(self) -> Option<PieceType> {
        if self.is_drop() {
            let raw = ((self.data >> Self::SRC_SHIFT) & Self::SRC_MASK) as u8;
            Some(PieceType::from_move_bits(raw))
        } else {
            None
        }
    }

    /// 移動元（盤上のマスまたは持ち駒）
    #[inline]
    pub const fn source(self) -> MoveSource {
        let raw = ((self.data >> Self::SRC_SHIFT) & Self::SRC_MASK) as u8;
        if self.is_drop() {
            MoveSource::Stand(PieceType::from_move_bits(raw))
        } else {
            MoveSource::Board(Square::from_move_bits(raw))
        }
    }

    #[inline]
    pub const fn is_drop(self) -> bool {
        self.data & Self::DROP_BIT != 0
    }

    #[inline]
    pub const fn is_promote(self) -> bool {
        self.data & Self::PROMOTE_BIT != 0
    }

    /// 左右反転した手
    pub fn hflip<V: Variant>(self) -> Move {
        let to = V::hflip_square(self.to());
        match self.source() {
            MoveSource::Board(from) => Move::normal(V::hflip_square(from), to, self.is_promote()),
            MoveSource::Stand(pt) => Move::drop(pt, to),
        }
    }

    /// 180度回転した手
    pub fn rotate<V: Variant>(self) -> Move {
        let to = V::rotate_square(self.to());
        match self.source() {
            MoveSource::Board(from) => Move::normal(V::rotate_square(from), to, self.is_promote()),
            MoveSource::Stand(pt) => Move::drop(pt, to),
        }
    }

    /// USI形式の文字列（例: `7g7f`, `2b3a+`, `P*5e`, どうぶつしょうぎでは `b3b2`, `C*a2`）
    pub fn to_usi<V: Variant>(self) -> String {
        let mut s = String::with_capacity(5);
        match self.source() {
            MoveSource::Board(from) => s.push_str(&V::square_name(from)),
            MoveSource::Stand(pt) => {
                s.push(V::piece_char(pt).to_ascii_uppercase());
                s.push('*');
            }
        }
        s.push_str(&V::square_name(self.to()));
        if self.is_promote() {
            s.push('+');
        }
        s
    }

    /// USI形式の文字列から指し手を作る
    pub fn from_usi<V: Variant>(usi: &str) -> Result<Move, MoveParseError> {
        let invalid = || MoveParseError::InvalidUsi(usi.to_string());
        if !usi.is_ascii() || usi.len() < 4 {
            return Err(invalid());
        }
        let (body, promote) = match usi.strip_suffix('+') {
            Some(body) => (body, true),
            None => (usi, false),
        };
        if body.len() != 4 {
            return Err(invalid());
        }
        let to = V::parse_square(&body[2..4]).ok_or_else(invalid)?;
        let bytes = body.as_bytes();
        if bytes[1] == b'*' {
            if promote {
                return Err(invalid());
            }
            let pt = V::piece_from_char(bytes[0] as char).ok_or_else(invalid)?;
            if !V::STAND_TYPES.contains(&pt) {
                return Err(MoveParseError::NotDroppable(usi.to_string()));
            }
            return Ok(Move::drop(pt, to));
        }
        let from = V::parse_square(&body[0..2]).ok_or_else(invalid)?;
        Ok(Move::normal(from, to, promote))
    }

    /// dlshogi形式の方策インデックス。`turn` が後手なら盤面を回転して計算する。
    ///
    /// 移動先から見た移動元の方向（成りなら方向数だけずらす）、または打つ駒種を
    /// マスごとのチャネルに割り当てる。表現できない手は `None`。
    pub fn policy_index<V: Variant>(self, turn: Color) -> Option<usize> {
        let m = match turn {
            Color::Black => self,
            Color::White => self.rotate::<V>(),
        };
        let num_dirs = V::NUM_POLICY_DIRECTIONS;
        let promotion_offset = match V::RULES {
            Rules::Standard => num_dirs,
            Rules::Dobutsu => 0,
        };
        let src_index = match m.source() {
            MoveSource::Board(from) => {
                let dir = V::direction(m.to(), from)?;
                if dir.index() >= num_dirs {
                    return None;
                }
                if m.is_promote() {
                    if promotion_offset == 0 {
                        return None;
                    }
                    dir.index() + promotion_offset
                } else {
                    dir.index()
                }
            }
            MoveSource::Stand(pt) => num_dirs + promotion_offset + V::stand_index(pt)?,
        };
        Some(m.to().index() * V::num_policy_per_square() + src_index)
    }
}

impl std::fmt::Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.source() {
            MoveSource::Board(from) => write!(
                f,
                "Move({} -> {}{})",
                from.index(),
                self.to().index(),
                if self.is_promote() { "+" } else { "" }
            ),
            MoveSource::Stand(pt) => write!(f, "Move(drop {} -> {})", pt.raw(), self.to().index()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{AnimalShogi, Shogi, animal, shogi};

    #[test]
    fn test_normal_move_fields() {
        let m = Move::normal(Square::new(60), Square::new(51), true);
        assert_eq!(m.from(), Some(Square::new(60)));
        assert_eq!(m.to(), Square::new(51));
        assert!(m.is_promote());
        assert!(!m.is_drop());
        assert_eq!(m.drop_piece_type(), None);
    }

    #[test]
    fn test_drop_move_fields() {
        let m = Move::drop(shogi::FU, Square::new(40));
        assert!(m.is_drop());
        assert_eq!(m.from(), None);
        assert_eq!(m.drop_piece_type(), Some(shogi::FU));
        assert_eq!(m.to(), Square::new(40));
    }

    #[test]
    fn test_usi_shogi() {
        let m = Move::from_usi::<Shogi>("7g7f").unwrap();
        assert_eq!(m.to_usi::<Shogi>(), "7g7f");
        assert_eq!(m.from(), Shogi::parse_square("7g"));
        let m = Move::from_usi::<Shogi>("2b3a+").unwrap();
        assert!(m.is_promote());
        assert_eq!(m.to_usi::<Shogi>(), "2b3a+");
        let m = Move::from_usi::<Shogi>("P*5e").unwrap();
        assert_eq!(m.drop_piece_type(), Some(shogi::FU));
        assert_eq!(m.to_usi::<Shogi>(), "P*5e");
        assert!(Move::from_usi::<Shogi>("K*5e").is_err());
        assert!(Move::from_usi::<Shogi>("0a1a").is_err());
        assert!(Move::from_usi::<Shogi>("7g").is_err());
    }

    #[test]
    fn test_usi_animal() {
        let m = Move::normal(animal::B3, animal::B2, false);
        assert_eq!(m.to_usi::<AnimalShogi>(), "b3b2");
        assert_eq!(Move::from_usi::<AnimalShogi>("b3b2").unwrap(), m);
        let d = Move::drop(animal::CH, animal::A2);
        assert_eq!(d.to_usi::<AnimalShogi>(), "C*a2");
    }

    #[test]
    fn test_hflip_and_rotate() {
        let m = Move::normal(animal::A4, animal::A3, false);
        assert_eq!(m.hflip::<AnimalShogi>(), Move::normal(animal::C4, animal::C3, false));
        assert_eq!(m.rotate::<AnimalShogi>(), Move::normal(animal::C1, animal::C2, false));
        let d = Move::drop(animal::GI, animal::B1);
        assert_eq!(d.hflip::<AnimalShogi>(), d);
    }

    #[test]
    fn test_policy_index() {
        // 移動先b2から見て移動元b3は南（S=6）
        let m = Move::normal(animal::B3, animal::B2, false);
        assert_eq!(m.policy_index::<AnimalShogi>(Color::Black), Some(4 * 11 + 6));
        let d = Move::drop(animal::GI, animal::A1);
        assert_eq!(d.policy_index::<AnimalShogi>(Color::Black), Some(8 + 2));
        assert_eq!(AnimalShogi::num_policy_per_square(), 11);
        assert_eq!(Shogi::num_policy_per_square(), 27);
        // 桂馬は移動先から見てSSW/SSE
        let knight = Move::from_usi::<Shogi>("8i7g").unwrap();
        assert_eq!(
            knight.policy_index::<Shogi>(Color::Black),
            Some(Shogi::parse_square("7g").unwrap().index() * 27 + 8)
        );
    }
}
