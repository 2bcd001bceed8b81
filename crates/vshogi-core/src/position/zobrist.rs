//! Zobristハッシュ
//!
//! 盤上の駒は駒×升のキーをXORし、持ち駒は枚数ぶんのキーを加算する。
//! 変種ごとに固定シードで生成するので、同じ局面はプロセスをまたいでも同じ値になる。

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::types::{Color, Piece, Square};

/// 持ち駒の種類数の上限
pub const MAX_STAND_TYPES: usize = 8;

/// Zobristハッシュ用乱数テーブル
pub struct ZobristKeys {
    /// 手番用
    side: u64,
    /// 駒×升 [Square.index()][Piece.index()]
    psq: Vec<[u64; Piece::NUM]>,
    /// 持ち駒（加算型）[Color][持ち駒インデックス]
    hand: [[u64; MAX_STAND_TYPES]; Color::NUM],
}

impl ZobristKeys {
    /// シードからテーブルを生成する
    pub fn new(seed: u64) -> ZobristKeys {
        log::trace!("generating zobrist keys (seed={seed:#x})");
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let side = rng.random::<u64>();
        let mut psq = vec![[0u64; Piece::NUM]; Square::MAX_NUM];
        for keys in psq.iter_mut() {
            for (pc, key) in keys.iter_mut().enumerate() {
                // 空きマスは常に0
                if pc != Piece::VOID.index() {
                    *key = rng.random::<u64>();
                }
            }
        }
        let mut hand = [[0u64; MAX_STAND_TYPES]; Color::NUM];
        for keys in hand.iter_mut() {
            for key in keys.iter_mut() {
                *key = rng.random::<u64>();
            }
        }
        ZobristKeys { side, psq, hand }
    }

    #[inline]
    pub fn side(&self) -> u64 {
        self.side
    }

    #[inline]
    pub fn psq(&self, piece: Piece, sq: Square) -> u64 {
        self.psq[sq.index()][piece.index()]
    }

    /// 持ち駒1枚あたりのキー
    #[inline]
    pub fn hand(&self, c: Color, stand_index: usize) -> u64 {
        self.hand[c.index()][stand_index]
    }
}
