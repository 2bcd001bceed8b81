//! 基本型モジュール
//!
//! - `Color`: 手番
//! - `Direction`: 盤上の方向（8方向 + 桂馬の4方向）
//! - `Square`: マス
//! - `PieceType` / `Piece`: 駒種と盤上の駒
//! - `Move`: 指し手
//! - `GameResult`: 対局結果

mod color;
mod direction;
mod moves;
mod piece;
mod result;
mod square;

pub use color::Color;
pub use direction::Direction;
pub use moves::{Move, MoveSource, MoveVec};
pub use piece::{Piece, PieceType};
pub use result::GameResult;
pub use square::Square;
