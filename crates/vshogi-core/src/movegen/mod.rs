//! 合法手生成
//!
//! 通常ルールでは王手・ピン・二歩・行き所のない駒・打ち歩詰めを考慮した
//! 完全な合法手を生成する。どうぶつしょうぎでは利きのあるマスへの移動と
//! 空きマスへの駒打ちをすべて生成する。

mod drop_pawn_mate;
mod generator;

pub use drop_pawn_mate::is_drop_pawn_mate;
pub use generator::MoveGenerator;

use crate::position::State;
use crate::types::MoveVec;
use crate::variant::Variant;

/// 合法手の一覧
pub fn legal_moves<V: Variant>(state: &State<V>) -> MoveVec {
    MoveGenerator::new(state).generate()
}
