//! 局面表現
//!
//! - `Board`: 盤面（マスごとの駒）
//! - `Stand`: 持ち駒
//! - `State`: 盤面・持ち駒・手番・王手駒
//! - `ZobristKeys`: Zobristハッシュの乱数表
//! - SFEN形式の解析・出力、どうぶつしょうぎの可逆ハッシュ、NN入力特徴量

mod board;
mod features;
mod packed_hash;
mod sfen;
mod stand;
mod state;
mod zobrist;

pub use board::Board;
pub use features::{attention_matrix, attention_matrix_along};
pub use packed_hash::INITIAL_PACKED_HASH;
pub use sfen::{SfenParse, SkipReason, SkippedChar};
pub use stand::Stand;
pub use state::{MoveEffect, State};
pub use zobrist::{MAX_STAND_TYPES, ZobristKeys};
