//! Bitboard
//!
//! 盤のマス集合をビット列で表す。盤の大きさによって下位ワードを切り替え、
//! 9x9では `u64` 2語を繰り上がり付きでシフトする。

mod board;
mod tables;
mod word;

pub use board::{BitBoard, BitBoardIter};
pub use tables::AttackTables;
pub use word::{BitWord, WideWord};
