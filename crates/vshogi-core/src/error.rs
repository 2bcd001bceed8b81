//! エラー型

use thiserror::Error;

/// SFENのフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SfenField {
    Board,
    SideToMove,
    Stand,
    Ply,
}

impl std::fmt::Display for SfenField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SfenField::Board => "board",
            SfenField::SideToMove => "side to move",
            SfenField::Stand => "stand",
            SfenField::Ply => "ply",
        };
        f.write_str(name)
    }
}

/// SFEN解析エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SfenError {
    /// 盤面フィールドがない
    #[error("empty sfen")]
    Empty,
    /// 解釈できない文字
    #[error("unexpected character {ch:?} at {position} in {field} field")]
    UnexpectedChar { field: SfenField, position: usize, ch: char },
    /// 盤面の外に駒を置こうとした
    #[error("board overflows at rank {rank}")]
    BoardOverflow { rank: usize },
    /// 持ち駒の枚数が上限を超えた
    #[error("too many pieces on stand: {0}")]
    StandOverflow(String),
}

/// 指し手文字列の解析エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("invalid usi move: {0}")]
    InvalidUsi(String),
    #[error("piece cannot be dropped: {0}")]
    NotDroppable(String),
}

/// 棋譜の復元エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record is for {found}, expected {expected}")]
    VariantMismatch { expected: &'static str, found: String },
    #[error(transparent)]
    Sfen(#[from] SfenError),
    #[error("move {index}: {source}")]
    Move {
        index: usize,
        #[source]
        source: MoveParseError,
    },
}
