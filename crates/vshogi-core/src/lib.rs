//! 将棋変種のルールエンジン
//!
//! どうぶつしょうぎ（3x4）・5五将棋（5x5）・ジャドケンス将棋（6x6）・本将棋（9x9）を
//! 同じ盤面・局面・対局のロジックで扱う。変種ごとの違いは [`variant::Variant`] に集める。
//!
//! ```
//! use vshogi_core::{Game, GameResult, Move, variant::Minishogi};
//!
//! let mut game = Game::<Minishogi>::new();
//! game.apply(Move::from_usi::<Minishogi>("5d5c").unwrap());
//! assert_eq!(game.result(), GameResult::Ongoing);
//! assert_eq!(game.to_sfen(true), "rbsgk/4p/P4/5/KGSBR w - 2");
//! ```

pub mod bitboard;
pub mod error;
pub mod game;
pub mod movegen;
pub mod position;
pub mod types;
pub mod variant;

pub use error::{MoveParseError, RecordError, SfenError, SfenField};
pub use game::{Game, GameConfig, GameRecord};
pub use position::{Board, Stand, State};
pub use types::{Color, Direction, GameResult, Move, MoveSource, Piece, PieceType, Square};

use variant::{AnimalShogi, JudkinsShogi, Minishogi, Shogi, Variant};

/// 全変種の利きテーブルとZobristキーを構築する
///
/// 呼ばなくても初回使用時に構築されるが、最初の指し手生成の遅延を避けたい場合に使う。
pub fn init_tables() {
    fn init<V: Variant>() {
        V::tables();
        V::zobrist();
    }
    init::<AnimalShogi>();
    init::<Minishogi>();
    init::<JudkinsShogi>();
    init::<Shogi>();
}
