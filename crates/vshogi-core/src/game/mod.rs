//! 対局（Game）
//!
//! 局面に加えて棋譜・合法手・対局結果を保持する。指し手を適用するたびに
//! 合法手を生成し直し、詰み・千日手・入玉宣言・反則から結果を決める。
//!
//! 結果が決まった後も指し手は記録されるが、結果は変わらない。

mod config;
mod entering_king;
mod record;
mod repetition;

pub use config::GameConfig;
pub use entering_king::EnteringKing;
pub use record::GameRecord;
pub use repetition::{count_occurrences, is_repetition};

use log::debug;

use crate::bitboard::BitBoard;
use crate::error::SfenError;
use crate::position::{MoveEffect, State, attention_matrix};
use crate::types::{Color, GameResult, Move, MoveVec, Piece, Square};
use crate::variant::{Rules, Variant};

/// 対局
#[derive(Clone)]
pub struct Game<V: Variant> {
    state: State<V>,
    config: GameConfig,
    /// 初期局面（手数なし）
    initial_sfen: String,
    /// `hashes[i]` は `i` 手目を指す前の局面のハッシュ
    hashes: Vec<u64>,
    moves: Vec<Move>,
    legal_moves: MoveVec,
    result: GameResult,
    entering_king: EnteringKing,
    kings: [Option<Square>; Color::NUM],
    occupied: [BitBoard<V>; Color::NUM],
}

impl<V: Variant> Game<V> {
    /// 平手の初期局面から始める
    pub fn new() -> Game<V> {
        Game::from_state(State::new())
    }

    /// SFENの局面から始める。手数は読み捨てる
    pub fn from_sfen(sfen: &str) -> Result<Game<V>, SfenError> {
        Ok(Game::from_state(State::from_sfen(sfen)?))
    }

    /// 解釈できない文字を読み飛ばしてSFENの局面から始める
    pub fn from_sfen_lossy(sfen: &str) -> Game<V> {
        Game::from_state(State::from_sfen_lossy(sfen))
    }

    pub fn from_state(state: State<V>) -> Game<V> {
        Game::with_config(state, GameConfig::default())
    }

    pub fn with_config(state: State<V>, config: GameConfig) -> Game<V> {
        let board = state.board();
        let kings = [board.king_location(Color::Black), board.king_location(Color::White)];
        let occupied = [board.occupied(Color::Black), board.occupied(Color::White)];
        let mut game = Game {
            initial_sfen: state.to_sfen(),
            legal_moves: state.legal_moves(),
            state,
            config,
            hashes: Vec::new(),
            moves: Vec::new(),
            result: GameResult::Ongoing,
            entering_king: EnteringKing::for_variant::<V>(),
            kings,
            occupied,
        };
        game.update_result();
        game
    }

    // ---- 指し手の適用 ----

    /// 指し手を適用する
    ///
    /// 合法手でなければ指し手を記録したうえで指した側の負けとする。
    pub fn apply(&mut self, mv: Move) -> &mut Self {
        let is_legal = self.legal_moves.contains(&mv);
        self.apply_with_legality(mv, is_legal)
    }

    /// 合法性を確かめずに指し手を適用する
    pub fn apply_nocheck(&mut self, mv: Move) -> &mut Self {
        self.apply_with_legality(mv, true)
    }

    /// 呼び出し側が判定した合法性とともに指し手を適用する
    ///
    /// `is_legal` が偽なら指した側の負け。盤上で指せない形の手は `is_legal` によらず
    /// 反則とし、局面を変えずに記録だけする。
    pub fn apply_with_legality(&mut self, mv: Move, is_legal: bool) -> &mut Self {
        let us = self.turn();
        let playable = self.state.is_pseudo_legal(mv);
        let is_legal = is_legal && playable;
        let immediate = match V::RULES {
            Rules::Dobutsu if is_legal => self.dobutsu_move_result(mv),
            _ => GameResult::Ongoing,
        };
        self.hashes.push(self.state.hash());
        self.moves.push(mv);

        if playable {
            let effect = self.state.apply(mv);
            self.update_occupancy(us, mv, effect);
        }

        if !self.result.is_ongoing() {
            self.legal_moves.clear();
            return self;
        }
        if !is_legal {
            debug!("[Game] illegal move {} by {us:?}", mv.to_usi::<V>());
            self.finish(GameResult::loss_for(us));
            return self;
        }
        if !immediate.is_ongoing() {
            debug!("[Game] lion captured or reached the last rank: {}", mv.to_usi::<V>());
            self.finish(immediate);
            return self;
        }
        self.legal_moves = self.state.legal_moves();
        self.update_result();
        self
    }

    /// 手番側の投了
    pub fn resign(&mut self) -> &mut Self {
        if self.result.is_ongoing() {
            debug!("[Game] {:?} resigned", self.turn());
            self.finish(GameResult::loss_for(self.turn()));
        }
        self
    }

    // ---- 状態の参照 ----

    #[inline]
    pub fn state(&self) -> &State<V> {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.state.turn()
    }

    #[inline]
    pub fn result(&self) -> GameResult {
        self.result
    }

    /// 手番側の合法手。対局が終わっていれば空
    #[inline]
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves.contains(&mv)
    }

    /// 合法手 `mv` が王手になるか
    pub fn is_check_move(&self, mv: Move) -> bool {
        self.state.is_check_move(mv)
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.state.hash()
    }

    #[inline]
    pub fn zobrist_hash(&self) -> u64 {
        self.state.zobrist_hash()
    }

    #[inline]
    pub fn checker_locations(&self) -> [Option<Square>; 2] {
        self.state.checkers()
    }

    #[inline]
    pub fn in_check(&self) -> bool {
        self.state.in_check()
    }

    #[inline]
    pub fn in_double_check(&self) -> bool {
        self.state.in_double_check()
    }

    #[inline]
    pub fn king_location(&self, c: Color) -> Option<Square> {
        self.kings[c.index()]
    }

    #[inline]
    pub fn occupied(&self, c: Color) -> BitBoard<V> {
        self.occupied[c.index()]
    }

    #[inline]
    pub fn occupied_all(&self) -> BitBoard<V> {
        self.occupied[0] | self.occupied[1]
    }

    // ---- 棋譜 ----

    #[inline]
    pub fn initial_sfen(&self) -> &str {
        &self.initial_sfen
    }

    #[inline]
    pub fn record_length(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// `n` 手目の指し手
    pub fn move_at(&self, n: usize) -> Option<Move> {
        self.moves.get(n).copied()
    }

    /// `n` 手目を指す前の局面のSFEN。手数は `n + 1`
    pub fn sfen_at(&self, n: usize, include_move_count: bool) -> Option<String> {
        if n > self.moves.len() {
            return None;
        }
        let mut state = State::<V>::from_sfen_lossy(&self.initial_sfen);
        for &mv in &self.moves[..n] {
            if state.is_pseudo_legal(mv) {
                state.apply(mv);
            }
        }
        Some(if include_move_count {
            state.to_sfen_with_ply(n as u32 + 1)
        } else {
            state.to_sfen()
        })
    }

    /// 現局面のSFEN
    pub fn to_sfen(&self, include_move_count: bool) -> String {
        if include_move_count {
            self.state.to_sfen_with_ply(self.moves.len() as u32 + 1)
        } else {
            self.state.to_sfen()
        }
    }

    /// 現局面を左右反転した新しい対局（棋譜は引き継がない）
    pub fn hflip(&self) -> Game<V> {
        Game::with_config(self.state.hflip(), self.config.clone())
    }

    // ---- ニューラルネットワーク入出力 ----

    pub const fn feature_channels() -> usize {
        State::<V>::feature_channels()
    }

    /// 方策出力の大きさ
    pub fn num_policy() -> usize {
        V::NUM_SQUARES * V::num_policy_per_square()
    }

    pub fn to_feature_map(&self, data: &mut [f32]) {
        self.state.to_feature_map(data);
    }

    pub fn attention_matrix(data: &mut [f32]) {
        attention_matrix::<V>(data);
    }

    // ---- 内部 ----

    fn finish(&mut self, result: GameResult) {
        self.result = result;
        self.legal_moves.clear();
    }

    /// どうぶつしょうぎで指す前に決まる結果（ライオンを取る、トライ）
    fn dobutsu_move_result(&self, mv: Move) -> GameResult {
        let Some(from) = mv.from() else {
            return GameResult::Ongoing;
        };
        let us = self.turn();
        let board = self.state.board();
        if board.get(mv.to()) == Piece::new(!us, V::KING) {
            return GameResult::win_for(us);
        }
        if board.get(from) == Piece::new(us, V::KING) && V::in_promotion_zone(mv.to(), us) {
            return GameResult::win_for(us);
        }
        GameResult::Ongoing
    }

    fn update_occupancy(&mut self, us: Color, mv: Move, effect: MoveEffect) {
        let to = mv.to();
        if let Some(from) = mv.from() {
            self.occupied[us.index()].clear(from);
        }
        self.occupied[us.index()].set(to);
        if let Some(c) = effect.captured.color() {
            self.occupied[c.index()].clear(to);
            if effect.captured.piece_type() == Some(V::KING) {
                self.kings[c.index()] = None;
            }
        }
        if effect.moved.piece_type() == Some(V::KING) {
            self.kings[us.index()] = Some(to);
        }
    }

    fn update_result(&mut self) {
        let turn = self.turn();
        let current = self.state.hash();
        let max = self.config.max_acceptable_repetitions::<V>();
        let result = if self.can_declare() {
            debug!("[Game] {turn:?} declares entering king");
            GameResult::win_for(turn)
        } else if is_repetition(current, &self.hashes, max) {
            // 連続王手の千日手は王手をかけている側の負け
            if V::RULES == Rules::Standard && self.state.in_check() {
                debug!("[Game] perpetual check against {turn:?}");
                GameResult::win_for(turn)
            } else {
                debug!("[Game] repetition draw");
                GameResult::Draw
            }
        } else if self.legal_moves.is_empty() {
            debug!("[Game] {turn:?} has no legal moves");
            GameResult::loss_for(turn)
        } else {
            GameResult::Ongoing
        };
        if !result.is_ongoing() {
            self.finish(result);
        }
    }

    fn can_declare(&self) -> bool {
        let turn = self.turn();
        self.entering_king.can_declare(
            &self.state,
            self.kings[turn.index()],
            self.occupied[turn.index()],
        )
    }
}

impl<V: Variant> Default for Game<V> {
    fn default() -> Self {
        Game::new()
    }
}

impl<V: Variant> std::fmt::Debug for Game<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("sfen", &self.to_sfen(true))
            .field("result", &self.result)
            .finish()
    }
}
