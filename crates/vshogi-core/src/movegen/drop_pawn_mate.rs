//! 打ち歩詰めの判定

use crate::position::State;
use crate::types::{Direction, Piece, Square};
use crate::variant::Variant;

/// `to` への歩打ちが打ち歩詰めになるか
///
/// 歩が相手玉に王手をかけ、玉に逃げ場がなく、歩を取れる相手の駒もない場合に真。
pub fn is_drop_pawn_mate<V: Variant>(state: &State<V>, to: Square) -> bool {
    let us = state.turn();
    let them = !us;
    let Some(enemy_king) = V::shift(to, Direction::N.relative(us)) else {
        return false;
    };
    if state.board().get(enemy_king) != Piece::new(them, V::KING) {
        return false;
    }

    let mut board = state.board().clone();
    board.set(to, Piece::new(us, V::PAWN));

    // 玉の逃げ場（歩を取る手を含む）
    for &dir in &Direction::ADJACENT {
        let Some(sq) = V::shift(enemy_king, dir) else {
            continue;
        };
        if board.get(sq).is_color(them) {
            continue;
        }
        if !board.is_square_attacked(us, sq, Some(enemy_king)) {
            return false;
        }
    }

    // 玉以外の駒で歩を取れるか。取った後に自玉が素抜かれないことも確かめる
    let king_dir = V::direction(to, enemy_king);
    for &dir in V::DIRECTIONS {
        if Some(dir) == king_dir {
            continue;
        }
        let Some(attacker) = board.find_attacker(them, to, dir, None) else {
            continue;
        };
        let mut after = board.clone();
        let piece = after.take(attacker);
        after.set(to, piece);
        let exposed = match V::direction(enemy_king, attacker) {
            Some(d) if !d.is_knight() => after.find_attacker(us, enemy_king, d, None).is_some(),
            _ => false,
        };
        if !exposed {
            return false;
        }
    }
    true
}
