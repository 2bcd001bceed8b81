//! 指し手生成器

use smallvec::SmallVec;

use super::drop_pawn_mate::is_drop_pawn_mate;
use crate::bitboard::{AttackTables, BitBoard};
use crate::position::State;
use crate::types::{Color, Direction, Move, MoveVec, Piece, Square};
use crate::variant::{Rules, Variant};

/// 指し手生成器
pub struct MoveGenerator<'a, V: Variant> {
    state: &'a State<V>,
    tables: &'static AttackTables<V>,
    us: Color,
    them: Color,
    king: Option<Square>,
    own: BitBoard<V>,
    occupied: BitBoard<V>,
    /// ピンされた駒と動ける範囲（玉からピンしている駒までの半直線）
    pins: SmallVec<[(Square, BitBoard<V>); 8]>,
    moves: MoveVec,
}

impl<'a, V: Variant> MoveGenerator<'a, V> {
    pub fn new(state: &'a State<V>) -> Self {
        let board = state.board();
        let us = state.turn();
        MoveGenerator {
            state,
            tables: V::tables(),
            us,
            them: !us,
            king: board.king_location(us),
            own: board.occupied(us),
            occupied: board.occupied_all(),
            pins: SmallVec::new(),
            moves: MoveVec::new(),
        }
    }

    /// 合法手をすべて生成する
    pub fn generate(mut self) -> MoveVec {
        match V::RULES {
            Rules::Dobutsu => self.generate_dobutsu(),
            Rules::Standard => self.generate_standard(),
        }
        self.moves
    }

    fn generate_dobutsu(&mut self) {
        let board = self.state.board();
        for from in self.own {
            let piece = board.get(from);
            let targets = self.tables.attacks(piece, from, self.occupied) & !self.own;
            for to in targets {
                self.moves.push(Move::normal(from, to, false));
            }
        }
        let empty = !self.occupied;
        for (pt, n) in self.state.stand(self.us).iter() {
            if n == 0 {
                continue;
            }
            for to in empty {
                self.moves.push(Move::drop(pt, to));
            }
        }
    }

    fn generate_standard(&mut self) {
        let checkers = self.state.checkers();
        if let Some(king) = self.king {
            self.generate_king_moves(king);
            // 両王手は玉が動くしかない
            if self.state.in_double_check() {
                return;
            }
            self.calculate_pins(king);
        }

        let (piece_target, drop_target) = match (self.king, checkers[0]) {
            (Some(king), Some(checker)) => {
                let between = self.tables.between(king, checker);
                (between | BitBoard::from_square(checker), between)
            }
            _ => (!self.own, !self.occupied),
        };

        self.generate_piece_moves(piece_target);
        self.generate_drop_moves(drop_target);
    }

    fn generate_king_moves(&mut self, king: Square) {
        let board = self.state.board();
        let piece = board.get(king);
        let targets = self.tables.step_attacks(piece, king) & !self.own;
        for to in targets {
            // 玉の元の位置は空きとみなして走り利きを調べる
            if !board.is_square_attacked(self.them, to, Some(king)) {
                self.moves.push(Move::normal(king, to, false));
            }
        }
    }

    fn calculate_pins(&mut self, king: Square) {
        let board = self.state.board();
        for dir in Direction::ADJACENT {
            if let Some(pinned) = board.find_pinned(self.them, king, dir) {
                self.pins.push((pinned, self.tables.ray(king, dir)));
            }
        }
    }

    fn pin_ray(&self, sq: Square) -> Option<BitBoard<V>> {
        self.pins.iter().find(|(p, _)| *p == sq).map(|&(_, ray)| ray)
    }

    fn generate_piece_moves(&mut self, target: BitBoard<V>) {
        let board = self.state.board();
        for from in self.own {
            if Some(from) == self.king {
                continue;
            }
            let piece = board.get(from);
            let mut targets = self.tables.attacks(piece, from, self.occupied) & target;
            if let Some(ray) = self.pin_ray(from) {
                targets &= ray;
            }
            for to in targets {
                self.add_piece_moves(piece, from, to);
            }
        }
    }

    fn add_piece_moves(&mut self, piece: Piece, from: Square, to: Square) {
        let Some(pt) = piece.piece_type() else {
            return;
        };
        let in_zone = V::in_promotion_zone(from, self.us) || V::in_promotion_zone(to, self.us);
        if V::is_promotable(pt) && in_zone {
            self.moves.push(Move::normal(from, to, true));
        }
        // 行き所のない駒になる不成は生成しない
        if !self.tables.is_unmovable(piece, to) {
            self.moves.push(Move::normal(from, to, false));
        }
    }

    fn generate_drop_moves(&mut self, target: BitBoard<V>) {
        let stand = self.state.stand(self.us);
        if stand.is_empty() || target.is_empty() {
            return;
        }
        for (pt, n) in stand.iter() {
            if n == 0 {
                continue;
            }
            let piece = Piece::new(self.us, pt);
            let mut targets = target;
            if pt == V::PAWN {
                targets &= !self.pawn_files();
            }
            for to in targets {
                if self.tables.is_unmovable(piece, to) {
                    continue;
                }
                if pt == V::PAWN && is_drop_pawn_mate(self.state, to) {
                    continue;
                }
                self.moves.push(Move::drop(pt, to));
            }
        }
    }

    /// 自分の歩（成っていない）がある筋（二歩）
    fn pawn_files(&self) -> BitBoard<V> {
        let pawn = Piece::new(self.us, V::PAWN);
        let board = self.state.board();
        let mut files = BitBoard::empty();
        for sq in self.own {
            if board.get(sq) == pawn {
                files |= self.tables.file(V::col(sq));
            }
        }
        files
    }
}
