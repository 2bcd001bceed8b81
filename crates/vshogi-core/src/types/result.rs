//! 対局結果（GameResult）

use serde::{Deserialize, Serialize};

use super::Color;

/// 対局結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    /// 対局中
    #[default]
    Ongoing,
    /// 引き分け（千日手）
    Draw,
    /// 先手勝ち
    BlackWin,
    /// 後手勝ち
    WhiteWin,
}

impl GameResult {
    /// 指定手番の勝ち
    #[inline]
    pub const fn win_for(c: Color) -> GameResult {
        match c {
            Color::Black => GameResult::BlackWin,
            Color::White => GameResult::WhiteWin,
        }
    }

    /// 指定手番の負け
    #[inline]
    pub const fn loss_for(c: Color) -> GameResult {
        GameResult::win_for(c.opponent())
    }

    #[inline]
    pub const fn is_ongoing(self) -> bool {
        matches!(self, GameResult::Ongoing)
    }

    /// 勝者。対局中・引き分けなら `None`
    #[inline]
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameResult::BlackWin => Some(Color::Black),
            GameResult::WhiteWin => Some(Color::White),
            _ => None,
        }
    }
}
