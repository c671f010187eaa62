//! Zobristハッシュ
//!
//! 固定シードの Xoshiro256++ で生成するため、プロセスをまたいでキーが再現する。
//! 駒×升のテーブルは駒割りハッシュ（駒種ごとの枚数を升番号の位置に見立てる）にも流用する。

use std::sync::OnceLock;

use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::types::{Color, PieceType, Square};

/// 乱数シード
const ZOBRIST_SEED: u64 = 0x5851_F42D_4C95_7F2D;

/// Zobristハッシュ用乱数テーブル
pub struct Zobrist {
    /// 手番用（後手番のときに XOR する）
    pub side: u64,
    /// 駒×升 [Color][PieceType][Square]
    pub psq: [[[u64; Square::NUM]; PieceType::NUM]; Color::NUM],
}

impl Zobrist {
    fn new() -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(ZOBRIST_SEED);
        let mut psq = [[[0u64; Square::NUM]; PieceType::NUM]; Color::NUM];

        for c in Color::ALL {
            // index 0（駒種なし）は常に0
            for pt in PieceType::ALL {
                for sq in 0..Square::NUM {
                    psq[c.index()][pt.index()][sq] = rng.next_u64();
                }
            }
        }

        Zobrist {
            side: rng.next_u64(),
            psq,
        }
    }
}

static ZOBRIST: OnceLock<Zobrist> = OnceLock::new();

/// Zobristテーブルを取得
#[inline]
pub fn zobrist() -> &'static Zobrist {
    ZOBRIST.get_or_init(Zobrist::new)
}

/// 駒と升のハッシュを取得
#[inline]
pub fn zobrist_psq(c: Color, pt: PieceType, sq: Square) -> u64 {
    zobrist().psq[c.index()][pt.index()][sq.index()]
}

/// 駒割りハッシュの成分（c の pt が count 枚目）
#[inline]
pub fn zobrist_material(c: Color, pt: PieceType, count: usize) -> u64 {
    debug_assert!(count < Square::NUM);
    zobrist().psq[c.index()][pt.index()][count]
}

/// 手番のハッシュを取得
#[inline]
pub fn zobrist_side() -> u64 {
    zobrist().side
}
