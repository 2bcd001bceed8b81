//! 局面（State）
//!
//! 盤面・両者の持ち駒・手番と、手番側の玉に王手をかけている駒（最大2つ）を保持する。
//! 王手駒は指し手を適用するたびに直接王手と開き王手の両方から求め直す。

use crate::movegen;
use crate::types::{Color, Move, MoveSource, MoveVec, Piece, PieceType, Square};
use crate::variant::{Rules, Variant};

use super::{Board, Stand};

/// 指し手を適用した結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEffect {
    /// 移動先に置かれた駒（成った場合は成駒）
    pub moved: Piece,
    /// 取られた駒。取らなければ `Piece::VOID`
    pub captured: Piece,
}

/// 局面
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct State<V: Variant> {
    board: Board<V>,
    stands: [Stand<V>; Color::NUM],
    turn: Color,
    checkers: [Option<Square>; 2],
    /// 盤上の駒と手番のキー（XOR）
    board_key: u64,
    /// 持ち駒のキー（加算）
    hand_key: u64,
}

impl<V: Variant> State<V> {
    /// 平手の初期局面
    pub fn new() -> State<V> {
        State::from_sfen_lossy(V::DEFAULT_SFEN)
    }

    /// 盤面・持ち駒・手番から局面を作る。ハッシュと王手駒はここで計算する
    pub fn from_parts(board: Board<V>, stands: [Stand<V>; Color::NUM], turn: Color) -> State<V> {
        let mut state = State {
            board,
            stands,
            turn,
            checkers: [None; 2],
            board_key: 0,
            hand_key: 0,
        };
        state.refresh_keys();
        state.refresh_checkers();
        state
    }

    #[inline]
    pub fn board(&self) -> &Board<V> {
        &self.board
    }

    #[inline]
    pub fn stand(&self, c: Color) -> Stand<V> {
        self.stands[c.index()]
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// 手番側の玉に王手をかけている駒のマス
    #[inline]
    pub fn checkers(&self) -> [Option<Square>; 2] {
        self.checkers
    }

    #[inline]
    pub fn in_check(&self) -> bool {
        self.checkers[0].is_some()
    }

    #[inline]
    pub fn in_double_check(&self) -> bool {
        self.checkers[1].is_some()
    }

    /// Zobristハッシュ（両者の持ち駒を含む）
    #[inline]
    pub fn zobrist_hash(&self) -> u64 {
        self.board_key.wrapping_add(self.hand_key)
    }

    /// 千日手判定に使うハッシュ値
    #[inline]
    pub fn hash(&self) -> u64 {
        V::position_hash(self)
    }

    /// 合法手の一覧
    pub fn legal_moves(&self) -> MoveVec {
        movegen::legal_moves(self)
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves().contains(&mv)
    }

    /// 王手放置などを考えず、盤面の上で指せる形の手か
    ///
    /// 駒打ちは持ち駒があって移動先が空いていること、盤上の移動は手番側の駒が
    /// 利きのあるマスへ動き、移動先に自分の駒がないこと。
    pub fn is_pseudo_legal(&self, mv: Move) -> bool {
        if !self.can_apply(mv) {
            return false;
        }
        let to = mv.to();
        match mv.source() {
            MoveSource::Stand(_) => self.board.is_empty_at(to),
            MoveSource::Board(from) => {
                let piece = self.board.get(from);
                !self.board.get(to).is_color(self.turn)
                    && V::tables().attacks(piece, from, self.board.occupied_all()).contains(to)
            }
        }
    }

    /// 移動先が盤内にあり、動かす手番側の駒か打つ持ち駒があるか
    fn can_apply(&self, mv: Move) -> bool {
        if mv.to().index() >= V::NUM_SQUARES {
            return false;
        }
        match mv.source() {
            MoveSource::Stand(pt) => self.stands[self.turn.index()].exists(pt),
            MoveSource::Board(from) => {
                from.index() < V::NUM_SQUARES && self.board.get(from).is_color(self.turn)
            }
        }
    }

    /// 合法手 `mv` が王手になるか
    pub fn is_check_move(&self, mv: Move) -> bool {
        let mut next = self.clone();
        next.apply(mv);
        next.in_check()
    }

    /// 指し手を適用する。`mv` は合法手であること
    ///
    /// 盤外を指す手や、動かす駒・打つ持ち駒がない手では局面を変えない。
    pub fn apply(&mut self, mv: Move) -> MoveEffect {
        if !self.can_apply(mv) {
            return MoveEffect { moved: Piece::VOID, captured: Piece::VOID };
        }
        let us = self.turn;
        let keys = V::zobrist();
        let to = mv.to();
        let source = mv.source();
        let moved = match source {
            MoveSource::Board(from) => {
                let piece = self.board.take(from);
                self.board_key ^= keys.psq(piece, from);
                if self.promotes(piece, to, mv) { piece.promote() } else { piece }
            }
            MoveSource::Stand(pt) => {
                self.remove_from_stand(us, pt);
                Piece::new(us, pt)
            }
        };

        let captured = self.board.take(to);
        if let Some(pt) = captured.piece_type() {
            self.board_key ^= keys.psq(captured, to);
            let pt = pt.demote();
            if pt != V::KING {
                self.add_to_stand(us, pt);
            }
        }

        self.board.set(to, moved);
        self.board_key ^= keys.psq(moved, to);
        self.turn = !us;
        self.board_key ^= keys.side();

        let from = match source {
            MoveSource::Board(from) => Some(from),
            MoveSource::Stand(_) => None,
        };
        match V::RULES {
            Rules::Standard => self.update_checkers(from, to),
            // 王手を放置できるので、動かしていない駒の利きも数える
            Rules::Dobutsu => self.refresh_checkers(),
        }
        MoveEffect { moved, captured }
    }

    /// 左右反転した局面
    pub fn hflip(&self) -> State<V> {
        State::from_parts(self.board.hflip(), self.stands, self.turn)
    }

    fn promotes(&self, piece: Piece, to: Square, mv: Move) -> bool {
        let Some(pt) = piece.piece_type() else {
            return false;
        };
        match V::RULES {
            Rules::Standard => mv.is_promote() && V::is_promotable(pt),
            // ひよこは最奥の段に入ると必ず成る
            Rules::Dobutsu => V::is_promotable(pt) && V::in_promotion_zone(to, self.turn),
        }
    }

    fn add_to_stand(&mut self, c: Color, pt: PieceType) {
        if self.stands[c.index()].add(pt) {
            if let Some(i) = V::stand_index(pt) {
                self.hand_key = self.hand_key.wrapping_add(V::zobrist().hand(c, i));
            }
        }
    }

    fn remove_from_stand(&mut self, c: Color, pt: PieceType) {
        if self.stands[c.index()].remove(pt) {
            if let Some(i) = V::stand_index(pt) {
                self.hand_key = self.hand_key.wrapping_sub(V::zobrist().hand(c, i));
            }
        }
    }

    /// 直前の指し手による直接王手と開き王手から王手駒を求める
    fn update_checkers(&mut self, from: Option<Square>, to: Square) {
        self.checkers = [None; 2];
        let defender = self.turn;
        let attacker = !defender;
        let Some(king) = self.board.king_location(defender) else {
            return;
        };
        let mut found = [None; 2];
        let mut n = 0;
        let to_dir = V::direction(king, to);
        if let Some(dir) = to_dir {
            if self.board.find_attacker(attacker, king, dir, None) == Some(to) {
                found[n] = Some(to);
                n += 1;
            }
        }
        if let Some(dir) = from.and_then(|from| V::direction(king, from)) {
            if !dir.is_knight() && to_dir != Some(dir) {
                if let Some(sq) = self.board.find_attacker(attacker, king, dir, None) {
                    found[n] = Some(sq);
                }
            }
        }
        self.set_checkers(found);
    }

    /// 盤面全体から王手駒を求め直す
    fn refresh_checkers(&mut self) {
        self.checkers = [None; 2];
        let Some(king) = self.board.king_location(self.turn) else {
            return;
        };
        let mut found = [None; 2];
        for (i, sq) in self.board.attackers(!self.turn, king).take(2).enumerate() {
            found[i] = Some(sq);
        }
        self.set_checkers(found);
    }

    /// 王手駒はマスの昇順に並べる
    fn set_checkers(&mut self, mut found: [Option<Square>; 2]) {
        if let [Some(a), Some(b)] = found {
            if b < a {
                found.swap(0, 1);
            }
        }
        self.checkers = found;
    }

    /// ハッシュを盤面全体から計算し直す
    fn refresh_keys(&mut self) {
        let keys = V::zobrist();
        let mut board_key = 0;
        for (sq, piece) in self.board.pieces() {
            board_key ^= keys.psq(piece, sq);
        }
        if self.turn == Color::White {
            board_key ^= keys.side();
        }
        let mut hand_key = 0u64;
        for c in Color::ALL {
            for (i, (_, n)) in self.stands[c.index()].iter().enumerate() {
                hand_key = hand_key.wrapping_add(keys.hand(c, i).wrapping_mul(n as u64));
            }
        }
        self.board_key = board_key;
        self.hand_key = hand_key;
    }
}

impl<V: Variant> Default for State<V> {
    fn default() -> Self {
        State::new()
    }
}

impl<V: Variant> std::fmt::Debug for State<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State").field("sfen", &self.to_sfen()).finish()
    }
}
