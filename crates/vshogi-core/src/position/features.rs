//! ニューラルネットワーク入力用の特徴量
//!
//! マスごとにチャネルを並べる（`data[sq * channels + ch]`）。1マスのチャネルは
//! 手番側の持ち駒枚数、手番側の駒種one-hot、相手の持ち駒枚数、相手の駒種one-hot の順。
//! 後手番では盤を180度回転し、常に手番側が下から指す向きにする。

use crate::types::{Color, Direction, Square};
use crate::variant::{Rules, Variant};

use super::State;

impl<V: Variant> State<V> {
    /// 特徴量のチャネル数
    pub const fn feature_channels() -> usize {
        2 * (V::PIECE_TYPES.len() + V::STAND_TYPES.len())
    }

    /// 特徴量を書き込む
    ///
    /// # Panics
    ///
    /// `data` の長さが `NUM_SQUARES * feature_channels()` でない場合
    pub fn to_feature_map(&self, data: &mut [f32]) {
        let ch = Self::feature_channels();
        let half = ch / 2;
        let stand_types = V::STAND_TYPES.len();
        assert_eq!(data.len(), V::NUM_SQUARES * ch, "feature buffer has wrong length");

        let us = self.turn();
        let ours = self.stand(us);
        let theirs = self.stand(!us);
        data.fill(0.0);
        for i in 0..V::NUM_SQUARES {
            let cell = &mut data[i * ch..(i + 1) * ch];
            for (k, &pt) in V::STAND_TYPES.iter().enumerate() {
                cell[k] = f32::from(ours.count(pt));
                cell[half + k] = f32::from(theirs.count(pt));
            }
            let sq = Square::new(i as u8);
            let sq = if us == Color::Black { sq } else { V::rotate_square(sq) };
            let pc = self.board().get(sq);
            let (Some(color), Some(pt)) = (pc.color(), pc.piece_type()) else {
                continue;
            };
            let Some(k) = V::feature_index(pt) else {
                continue;
            };
            let offset = if color == us { 0 } else { half };
            cell[offset + stand_types + k] = 1.0;
        }
    }
}

/// マスからマスへの到達可能性（方向に沿った半直線）の行列を書き込む
///
/// 走り駒のない変種では隣接マスのみ。`data[from * NUM_SQUARES + to]`
///
/// # Panics
///
/// `data` の長さが `NUM_SQUARES * NUM_SQUARES` でない場合
pub fn attention_matrix<V: Variant>(data: &mut [f32]) {
    attention_matrix_along::<V>(data, V::DIRECTIONS);
}

/// 方向の一覧を指定した到達可能性行列
///
/// # Panics
///
/// `data` の長さが `NUM_SQUARES * NUM_SQUARES` でない場合
pub fn attention_matrix_along<V: Variant>(data: &mut [f32], directions: &[Direction]) {
    let n = V::NUM_SQUARES;
    assert_eq!(data.len(), n * n, "attention buffer has wrong length");
    data.fill(0.0);
    let tables = V::tables();
    for from in V::squares() {
        let row = &mut data[from.index() * n..(from.index() + 1) * n];
        for &dir in directions {
            if dir.is_knight() || V::RULES == Rules::Dobutsu {
                if let Some(to) = V::shift(from, dir) {
                    row[to.index()] = 1.0;
                }
                continue;
            }
            for to in tables.ray(from, dir) {
                row[to.index()] = 1.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Move;
    use crate::variant::{AnimalShogi, Minishogi, animal};

    #[test]
    fn test_feature_channels() {
        assert_eq!(State::<AnimalShogi>::feature_channels(), 16);
        assert_eq!(State::<Minishogi>::feature_channels(), 2 * (10 + 5));
    }

    #[test]
    fn test_animal_feature_map() {
        let mut s = State::<AnimalShogi>::new();
        let ch = State::<AnimalShogi>::feature_channels();
        let mut data = vec![0.0f32; 12 * ch];
        s.to_feature_map(&mut data);
        // b3の先手ひよこ
        assert_eq!(data[animal::B3.index() * ch + 3], 1.0);
        // b2の後手ひよこ
        assert_eq!(data[animal::B2.index() * ch + 8 + 3], 1.0);
        assert_eq!(data.iter().sum::<f32>(), 8.0);

        s.apply(Move::normal(animal::B3, animal::B2, false));
        s.to_feature_map(&mut data);
        // 後手番なので盤は回転し、先手の持ちひよこは相手側のチャネル
        for i in 0..12 {
            assert_eq!(data[i * ch + 8], 1.0);
            assert_eq!(data[i * ch], 0.0);
        }
        // 後手のライオン（b1）は回転してb4、手番側のチャネル
        assert_eq!(data[animal::B4.index() * ch + 3 + 3], 1.0);
        // 先手のひよこ（b2）は回転してb3、相手側のチャネル
        assert_eq!(data[animal::B3.index() * ch + 8 + 3], 1.0);
    }

    #[test]
    #[should_panic]
    fn test_feature_map_wrong_length() {
        let s = State::<AnimalShogi>::new();
        let mut data = vec![0.0f32; 10];
        s.to_feature_map(&mut data);
    }

    #[test]
    fn test_attention_matrix() {
        let mut data = vec![0.0f32; 12 * 12];
        attention_matrix::<AnimalShogi>(&mut data);
        let row = &data[animal::B2.index() * 12..animal::B2.index() * 12 + 12];
        assert_eq!(row.iter().sum::<f32>(), 8.0);
        assert_eq!(row[animal::B2.index()], 0.0);
        // 走り駒がないので1マス先まで
        attention_matrix_along::<AnimalShogi>(&mut data, &[Direction::N]);
        let row = &data[animal::B4.index() * 12..animal::B4.index() * 12 + 12];
        assert_eq!(row.iter().sum::<f32>(), 1.0);

        let mut data = vec![0.0f32; 25 * 25];
        attention_matrix::<Minishogi>(&mut data);
        // 隅からは縦4 + 横4 + 斜め4
        assert_eq!(data[..25].iter().sum::<f32>(), 12.0);

        attention_matrix_along::<Minishogi>(&mut data, &[Direction::N]);
        assert_eq!(data[..25].iter().sum::<f32>(), 0.0);
        assert_eq!(data[24 * 25..].iter().sum::<f32>(), 4.0);
    }
}
