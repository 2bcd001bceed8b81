//! 棋譜（GameRecord）
//!
//! 初期局面のSFEN・USI形式の指し手・結果をまとめた、serdeで読み書きできる棋譜。

use serde::{Deserialize, Serialize};

use super::Game;
use crate::error::RecordError;
use crate::types::{GameResult, Move};
use crate::variant::Variant;

/// 棋譜
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// 変種名（`Variant::NAME`）
    pub variant: String,
    /// 初期局面（手数なし）
    pub initial_sfen: String,
    /// USI形式の指し手
    pub moves: Vec<String>,
    pub result: GameResult,
}

impl<V: Variant> Game<V> {
    /// 棋譜を作る
    pub fn record(&self) -> GameRecord {
        GameRecord {
            variant: V::NAME.to_string(),
            initial_sfen: self.initial_sfen().to_string(),
            moves: self.moves().iter().map(|m| m.to_usi::<V>()).collect(),
            result: self.result(),
        }
    }

    /// 棋譜から対局を再現する。指し手は合法性を確かめながら適用する
    pub fn from_record(record: &GameRecord) -> Result<Game<V>, RecordError> {
        if record.variant != V::NAME {
            return Err(RecordError::VariantMismatch {
                expected: V::NAME,
                found: record.variant.clone(),
            });
        }
        let mut game = Game::from_sfen(&record.initial_sfen)?;
        for (index, usi) in record.moves.iter().enumerate() {
            let mv = Move::from_usi::<V>(usi)
                .map_err(|source| RecordError::Move { index, source })?;
            game.apply(mv);
        }
        if game.result() != record.result && game.result().is_ongoing() {
            // 投了は指し手として残らない
            if record.result == GameResult::loss_for(game.turn()) {
                game.resign();
            }
        }
        Ok(game)
    }
}
