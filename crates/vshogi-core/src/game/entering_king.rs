//! 入玉宣言勝ちの判定
//!
//! 宣言側について以下をすべて満たせば勝ち。
//!
//! 1. 玉が敵陣にいる
//! 2. 王手がかかっていない
//! 3. 敵陣にある自分の駒（玉を含む）が、平手初期局面の駒数の半分より多い
//! 4. 敵陣の駒と持ち駒の点数が、平手初期局面の点数より多い（後手は以上）

use crate::bitboard::BitBoard;
use crate::position::State;
use crate::types::{Color, Square};
use crate::variant::{Rules, Variant};

/// 宣言の基準値（平手初期局面から計算する）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnteringKing {
    half_num_pieces: [u32; Color::NUM],
    initial_points: [u32; Color::NUM],
}

impl EnteringKing {
    /// 変種の平手初期局面から基準値を作る
    pub fn for_variant<V: Variant>() -> EnteringKing {
        EnteringKing::from_state(&State::<V>::new())
    }

    /// 与えた局面の駒数・点数を基準値にする
    pub fn from_state<V: Variant>(state: &State<V>) -> EnteringKing {
        let mut half_num_pieces = [0; Color::NUM];
        let mut initial_points = [0; Color::NUM];
        for c in Color::ALL {
            let stand = state.stand(c);
            let mut pieces = stand.total();
            let mut points = stand.points();
            for (_, piece) in state.board().pieces().filter(|(_, p)| p.is_color(c)) {
                pieces += 1;
                points += piece.piece_type().map_or(0, V::point);
            }
            half_num_pieces[c.index()] = pieces / 2;
            initial_points[c.index()] = points;
        }
        EnteringKing { half_num_pieces, initial_points }
    }

    #[inline]
    pub fn half_num_pieces(&self, c: Color) -> u32 {
        self.half_num_pieces[c.index()]
    }

    #[inline]
    pub fn initial_points(&self, c: Color) -> u32 {
        self.initial_points[c.index()]
    }

    /// 手番側が入玉宣言で勝てるか
    ///
    /// `king` と `occupied` は手番側の玉の位置と駒のあるマス。
    pub fn can_declare<V: Variant>(
        &self,
        state: &State<V>,
        king: Option<Square>,
        occupied: BitBoard<V>,
    ) -> bool {
        if V::RULES == Rules::Dobutsu {
            return false;
        }
        let turn = state.turn();
        let Some(king) = king else {
            return false;
        };
        if !V::in_promotion_zone(king, turn) {
            return false;
        }
        if state.in_check() {
            return false;
        }
        let in_zone = V::tables().promotion_zone(turn) & occupied;
        if in_zone.count() <= self.half_num_pieces(turn) {
            return false;
        }
        let board = state.board();
        let points = in_zone
            .iter()
            .filter_map(|sq| board.get(sq).piece_type())
            .map(V::point)
            .sum::<u32>()
            + state.stand(turn).points();
        match turn {
            Color::Black => points > self.initial_points(turn),
            Color::White => points >= self.initial_points(turn),
        }
    }
}
