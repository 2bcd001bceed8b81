//! 方向（Direction）
//!
//! 先手から見た盤面上の方向。左上（NW）から順に8方向、続いて桂馬の4方向。
//! 列は西（左）から東（右）へ、段は北（上）から南（下）へ増える。

use super::Color;

/// 盤面上の方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Direction {
    NW = 0,
    N = 1,
    NE = 2,
    W = 3,
    E = 4,
    SW = 5,
    S = 6,
    SE = 7,
    SSW = 8,
    SSE = 9,
    NNW = 10,
    NNE = 11,
}

impl Direction {
    /// 全方向の数（桂馬方向を含む）
    pub const NUM: usize = 12;

    /// 全方向
    pub const ALL: [Direction; Direction::NUM] = [
        Direction::NW,
        Direction::N,
        Direction::NE,
        Direction::W,
        Direction::E,
        Direction::SW,
        Direction::S,
        Direction::SE,
        Direction::SSW,
        Direction::SSE,
        Direction::NNW,
        Direction::NNE,
    ];

    /// 隣接8方向
    pub const ADJACENT: [Direction; 8] = [
        Direction::NW,
        Direction::N,
        Direction::NE,
        Direction::W,
        Direction::E,
        Direction::SW,
        Direction::S,
        Direction::SE,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn from_index(i: usize) -> Option<Direction> {
        if i < Direction::NUM { Some(Direction::ALL[i]) } else { None }
    }

    /// (列, 段) の変位
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::NW => (-1, -1),
            Direction::N => (0, -1),
            Direction::NE => (1, -1),
            Direction::W => (-1, 0),
            Direction::E => (1, 0),
            Direction::SW => (-1, 1),
            Direction::S => (0, 1),
            Direction::SE => (1, 1),
            Direction::SSW => (-1, 2),
            Direction::SSE => (1, 2),
            Direction::NNW => (-1, -2),
            Direction::NNE => (1, -2),
        }
    }

    /// 180度回転した方向
    #[inline]
    pub const fn rotate(self) -> Direction {
        match self {
            Direction::NW => Direction::SE,
            Direction::N => Direction::S,
            Direction::NE => Direction::SW,
            Direction::W => Direction::E,
            Direction::E => Direction::W,
            Direction::SW => Direction::NE,
            Direction::S => Direction::N,
            Direction::SE => Direction::NW,
            Direction::SSW => Direction::NNE,
            Direction::SSE => Direction::NNW,
            Direction::NNW => Direction::SSE,
            Direction::NNE => Direction::SSW,
        }
    }

    /// 左右反転した方向
    #[inline]
    pub const fn hflip(self) -> Direction {
        match self {
            Direction::NW => Direction::NE,
            Direction::NE => Direction::NW,
            Direction::W => Direction::E,
            Direction::E => Direction::W,
            Direction::SW => Direction::SE,
            Direction::SE => Direction::SW,
            Direction::SSW => Direction::SSE,
            Direction::SSE => Direction::SSW,
            Direction::NNW => Direction::NNE,
            Direction::NNE => Direction::NNW,
            d => d,
        }
    }

    /// 先手視点の方向を指定手番の視点に変換する
    #[inline]
    pub const fn relative(self, c: Color) -> Direction {
        match c {
            Color::Black => self,
            Color::White => self.rotate(),
        }
    }

    /// 桂馬の方向か
    #[inline]
    pub const fn is_knight(self) -> bool {
        matches!(self, Direction::SSW | Direction::SSE | Direction::NNW | Direction::NNE)
    }

    /// 変位 (列, 段) から方向を求める。直線・斜め・桂馬のいずれでもなければ `None`
    pub const fn from_displacement(dc: i32, dr: i32) -> Option<Direction> {
        if dc == 0 && dr == 0 {
            return None;
        }
        if dc == 0 {
            return Some(if dr < 0 { Direction::N } else { Direction::S });
        }
        if dr == 0 {
            return Some(if dc < 0 { Direction::W } else { Direction::E });
        }
        if dc == dr || dc == -dr {
            return Some(match (dc < 0, dr < 0) {
                (true, true) => Direction::NW,
                (false, true) => Direction::NE,
                (true, false) => Direction::SW,
                (false, false) => Direction::SE,
            });
        }
        match (dc, dr) {
            (-1, 2) => Some(Direction::SSW),
            (1, 2) => Some(Direction::SSE),
            (-1, -2) => Some(Direction::NNW),
            (1, -2) => Some(Direction::NNE),
            _ => None,
        }
    }
}
