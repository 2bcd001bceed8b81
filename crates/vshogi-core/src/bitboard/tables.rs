//! 利きテーブル
//!
//! 変種ごとに一度だけ構築する不変のテーブル。各変種は `static OnceLock` に
//! 保持し、[`Variant::tables`] から参照する。構築中は `Variant::tables()` を
//! 呼ばず、座標計算だけでテーブルを埋める。

use super::{BitBoard, BitWord};
use crate::types::{Color, Direction, Piece, Square};
use crate::variant::Variant;

/// 変種ごとの利きテーブル
pub struct AttackTables<V: Variant> {
    /// 方向ごとの「ずらしても盤外に出ないマス」
    shift_masks: [V::Bits; Direction::NUM],
    /// 近接利き `[piece * NUM_SQUARES + sq]`
    step_attacks: Vec<BitBoard<V>>,
    /// 駒のない盤での走り利き `[dir * NUM_SQUARES + sq]`
    rays: Vec<BitBoard<V>>,
    /// 動けないマス（行き所のない駒）`[piece * NUM_SQUARES + sq]`
    unmovable: Vec<bool>,
    /// 近接利きの方向（`Direction` のビット集合、手番考慮済み）
    step_dirs: [u16; Piece::NUM],
    /// 走り利きの方向
    ranging_dirs: [u16; Piece::NUM],
    promotion_zones: [BitBoard<V>; Color::NUM],
    files: Vec<BitBoard<V>>,
}

impl<V: Variant> AttackTables<V> {
    /// テーブルを構築する
    pub fn build() -> AttackTables<V> {
        log::trace!("building attack tables for {}", V::NAME);
        let n = V::NUM_SQUARES;

        let mut shift_masks = [V::Bits::ZERO; Direction::NUM];
        for dir in Direction::ALL {
            let mut mask = V::Bits::ZERO;
            for sq in V::squares() {
                if V::shift(sq, dir).is_some() {
                    mask |= V::Bits::bit(sq.index());
                }
            }
            shift_masks[dir.index()] = mask;
        }

        let mut rays = vec![BitBoard::empty(); Direction::NUM * n];
        for dir in Direction::ALL {
            if dir.is_knight() {
                continue;
            }
            for sq in V::squares() {
                let mut bb = BitBoard::empty();
                let mut cur = V::shift(sq, dir);
                while let Some(s) = cur {
                    bb.set(s);
                    cur = V::shift(s, dir);
                }
                rays[dir.index() * n + sq.index()] = bb;
            }
        }

        let mut step_dirs = [0u16; Piece::NUM];
        let mut ranging_dirs = [0u16; Piece::NUM];
        let mut step_attacks = vec![BitBoard::empty(); Piece::NUM * n];
        let mut unmovable = vec![false; Piece::NUM * n];
        for raw in 0..Piece::NUM as u8 {
            let piece = Piece::from_raw(raw);
            let (Some(color), Some(pt)) = (piece.color(), piece.piece_type()) else {
                continue;
            };
            if !V::PIECE_TYPES.contains(&pt) {
                continue;
            }
            for &d in V::step_directions(pt) {
                step_dirs[piece.index()] |= 1 << d.relative(color).index();
            }
            for &d in V::ranging_directions(pt) {
                ranging_dirs[piece.index()] |= 1 << d.relative(color).index();
            }
            for sq in V::squares() {
                let mut bb = BitBoard::empty();
                let mut can_move = false;
                for d in Direction::ALL {
                    let bit = 1u16 << d.index();
                    if step_dirs[piece.index()] & bit != 0 {
                        if let Some(to) = V::shift(sq, d) {
                            bb.set(to);
                            can_move = true;
                        }
                    }
                    if ranging_dirs[piece.index()] & bit != 0 && V::shift(sq, d).is_some() {
                        can_move = true;
                    }
                }
                step_attacks[piece.index() * n + sq.index()] = bb;
                unmovable[piece.index() * n + sq.index()] = !can_move;
            }
        }

        let mut promotion_zones = [BitBoard::empty(); Color::NUM];
        for c in Color::ALL {
            promotion_zones[c.index()] =
                V::squares().filter(|&sq| V::in_promotion_zone(sq, c)).collect();
        }

        let files = (0..V::NUM_FILES)
            .map(|col| V::squares().filter(|&sq| V::col(sq) == col).collect())
            .collect();

        AttackTables {
            shift_masks,
            step_attacks,
            rays,
            unmovable,
            step_dirs,
            ranging_dirs,
            promotion_zones,
            files,
        }
    }

    #[inline]
    pub fn shift(&self, bb: BitBoard<V>, dir: Direction) -> BitBoard<V> {
        bb.shift_masked(dir, self.shift_masks[dir.index()])
    }

    /// 近接利き
    #[inline]
    pub fn step_attacks(&self, piece: Piece, sq: Square) -> BitBoard<V> {
        self.step_attacks[piece.index() * V::NUM_SQUARES + sq.index()]
    }

    /// 駒のない盤で `sq` から `dir` 方向に伸びる半直線（`sq` を含まない）
    #[inline]
    pub fn ray(&self, sq: Square, dir: Direction) -> BitBoard<V> {
        self.rays[dir.index() * V::NUM_SQUARES + sq.index()]
    }

    /// `sq` から `dir` 方向の走り利き。最初に駒のあるマスで止まる（そのマスを含む）
    pub fn ray_attack(&self, sq: Square, dir: Direction, occupied: BitBoard<V>) -> BitBoard<V> {
        let mut attacks = BitBoard::empty();
        let mut frontier = self.shift(BitBoard::from_square(sq), dir);
        while !frontier.is_empty() {
            attacks |= frontier;
            if !(frontier & occupied).is_empty() {
                break;
            }
            frontier = self.shift(frontier, dir);
        }
        attacks
    }

    /// 駒の利き
    pub fn attacks(&self, piece: Piece, sq: Square, occupied: BitBoard<V>) -> BitBoard<V> {
        if piece.is_void() {
            return BitBoard::empty();
        }
        let mut bb = self.step_attacks(piece, sq);
        let ranging = self.ranging_dirs[piece.index()];
        if ranging != 0 {
            for dir in Direction::ALL {
                if ranging & (1 << dir.index()) != 0 {
                    bb |= self.ray_attack(sq, dir, occupied);
                }
            }
        }
        bb
    }

    /// 駒が `dir` 方向の隣（桂馬なら跳び先）に利くか
    #[inline]
    pub fn steps_toward(&self, piece: Piece, dir: Direction) -> bool {
        !piece.is_void() && self.step_dirs[piece.index()] & (1 << dir.index()) != 0
    }

    /// 駒が `dir` 方向に走り利きを持つか
    #[inline]
    pub fn ranges_toward(&self, piece: Piece, dir: Direction) -> bool {
        !piece.is_void() && self.ranging_dirs[piece.index()] & (1 << dir.index()) != 0
    }

    /// そのマスに置くと以後動けない駒か（強制成り・打ち禁止の判定）
    #[inline]
    pub fn is_unmovable(&self, piece: Piece, sq: Square) -> bool {
        !piece.is_void() && self.unmovable[piece.index() * V::NUM_SQUARES + sq.index()]
    }

    /// `a` と `b` の間のマス（両端を含まない）。同一直線上になければ空
    pub fn between(&self, a: Square, b: Square) -> BitBoard<V> {
        match V::direction(a, b) {
            Some(dir) if !dir.is_knight() => {
                let target = BitBoard::from_square(b);
                self.ray_attack(a, dir, target) & !target
            }
            _ => BitBoard::empty(),
        }
    }

    #[inline]
    pub fn promotion_zone(&self, c: Color) -> BitBoard<V> {
        self.promotion_zones[c.index()]
    }

    /// 筋（列）のマス
    #[inline]
    pub fn file(&self, col: usize) -> BitBoard<V> {
        self.files[col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{AnimalShogi, JudkinsShogi, Shogi, animal, judkins, shogi};

    fn sq<V: Variant>(name: &str) -> Square {
        V::parse_square(name).unwrap()
    }

    #[test]
    fn test_animal_step_attacks() {
        let t = AnimalShogi::tables();
        let lion = Piece::new(Color::Black, animal::LI);
        assert_eq!(t.step_attacks(lion, animal::B2).count(), 8);
        assert_eq!(t.step_attacks(lion, animal::A1).count(), 3);
        let chick = Piece::new(Color::Black, animal::CH);
        assert_eq!(t.step_attacks(chick, animal::B3), BitBoard::from_square(animal::B2));
        let chick = Piece::new(Color::White, animal::CH);
        assert_eq!(t.step_attacks(chick, animal::B2), BitBoard::from_square(animal::B3));
        let elephant = Piece::new(Color::Black, animal::EL);
        assert_eq!(t.step_attacks(elephant, animal::A4), BitBoard::from_square(animal::B3));
    }

    #[test]
    fn test_ray_attack_stops_at_blocker() {
        let t = Shogi::tables();
        let from = sq::<Shogi>("5e");
        let blocker = BitBoard::from_square(sq::<Shogi>("5b"));
        let bb = t.ray_attack(from, Direction::N, blocker);
        assert_eq!(bb.count(), 3);
        assert!(bb.contains(sq::<Shogi>("5b")));
        assert!(!bb.contains(sq::<Shogi>("5a")));
        assert_eq!(t.ray(from, Direction::N).count(), 4);
    }

    #[test]
    fn test_rook_and_bishop_attacks() {
        let t = Shogi::tables();
        let rook = Piece::new(Color::Black, shogi::HI);
        assert_eq!(t.attacks(rook, sq::<Shogi>("5e"), BitBoard::empty()).count(), 16);
        let dragon = Piece::new(Color::Black, shogi::RY);
        assert_eq!(t.attacks(dragon, sq::<Shogi>("5e"), BitBoard::empty()).count(), 20);
        let bishop = Piece::new(Color::White, shogi::KA);
        assert_eq!(t.attacks(bishop, sq::<Shogi>("9a"), BitBoard::empty()).count(), 8);
    }

    #[test]
    fn test_knight_attacks() {
        let t = JudkinsShogi::tables();
        let knight = Piece::new(Color::Black, judkins::KE);
        let bb = t.step_attacks(knight, sq::<JudkinsShogi>("3c"));
        let expected: BitBoard<JudkinsShogi> =
            [sq::<JudkinsShogi>("4a"), sq::<JudkinsShogi>("2a")].into_iter().collect();
        assert_eq!(bb, expected);
        let knight = Piece::new(Color::White, judkins::KE);
        let bb = t.step_attacks(knight, sq::<JudkinsShogi>("1a"));
        assert_eq!(bb, BitBoard::from_square(sq::<JudkinsShogi>("2c")));
    }

    #[test]
    fn test_unmovable() {
        let t = Shogi::tables();
        let pawn = Piece::new(Color::Black, shogi::FU);
        assert!(t.is_unmovable(pawn, sq::<Shogi>("5a")));
        assert!(!t.is_unmovable(pawn, sq::<Shogi>("5b")));
        let lance = Piece::new(Color::White, shogi::KY);
        assert!(t.is_unmovable(lance, sq::<Shogi>("5i")));
        let knight = Piece::new(Color::Black, shogi::KE);
        assert!(t.is_unmovable(knight, sq::<Shogi>("5b")));
        assert!(!t.is_unmovable(knight, sq::<Shogi>("5c")));
        let gold = Piece::new(Color::Black, shogi::KI);
        assert!(!t.is_unmovable(gold, sq::<Shogi>("5a")));
    }

    #[test]
    fn test_between() {
        let t = Shogi::tables();
        let bb = t.between(sq::<Shogi>("5e"), sq::<Shogi>("5a"));
        assert_eq!(bb.count(), 3);
        assert!(t.between(sq::<Shogi>("5e"), sq::<Shogi>("4c")).is_empty());
        assert!(t.between(sq::<Shogi>("5e"), sq::<Shogi>("5d")).is_empty());
    }

    #[test]
    fn test_zones_and_files() {
        let t = Shogi::tables();
        assert_eq!(t.promotion_zone(Color::Black).count(), 27);
        assert_eq!(t.file(0).count(), 9);
        assert!(t.file(0).contains(sq::<Shogi>("9e")));
        let t = AnimalShogi::tables();
        assert_eq!(t.promotion_zone(Color::White).count(), 3);
        let hen = Piece::new(Color::White, animal::HE);
        assert_eq!(t.step_attacks(hen, animal::B2).count(), 6);
    }
}
