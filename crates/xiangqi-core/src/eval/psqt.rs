//! 駒価値と駒位置スコア（PSQT）
//!
//! 先手（紅）から見たボーナスを定義し、後手は上下反転・符号反転で引く。
//! `psq(c, pt, sq)` は駒価値込みの値で、局面の `psq` スコアはこれを全駒について足したもの。

use crate::options::EngineOptions;
use crate::types::{Color, PieceType, Score, Square, Value};

/// 駒価値と駒位置スコアのテーブル
#[derive(Debug, Clone)]
pub struct PieceSquareTable {
    /// 駒価値（中盤）[PieceType]
    value_mg: [Value; PieceType::NUM],
    /// 駒価値（終盤）[PieceType]
    value_eg: [Value; PieceType::NUM],
    /// [Color][PieceType][Square]
    psq: Box<[[[Score; Square::NUM]; PieceType::NUM]; Color::NUM]>,
}

impl PieceSquareTable {
    /// オプションの駒価値から構築
    pub fn new(options: &EngineOptions) -> Self {
        let mut value_mg = [Value::ZERO; PieceType::NUM];
        let mut value_eg = [Value::ZERO; PieceType::NUM];
        let pairs = [
            (PieceType::Pawn, options.pawn_value_mg, options.pawn_value_eg),
            (PieceType::Bishop, options.bishop_value_mg, options.bishop_value_eg),
            (PieceType::Advisor, options.advisor_value_mg, options.advisor_value_eg),
            (PieceType::Knight, options.knight_value_mg, options.knight_value_eg),
            (PieceType::Cannon, options.cannon_value_mg, options.cannon_value_eg),
            (PieceType::Rook, options.rook_value_mg, options.rook_value_eg),
        ];
        for (pt, mg, eg) in pairs {
            value_mg[pt.index()] = Value::new(mg);
            value_eg[pt.index()] = Value::new(eg);
        }

        let mut psq = Box::new([[[Score::ZERO; Square::NUM]; PieceType::NUM]; Color::NUM]);
        for pt in PieceType::ALL {
            let v = Score::new(value_mg[pt.index()].raw(), value_eg[pt.index()].raw());
            for sq in Square::all() {
                let s = v + bonus(pt, sq);
                psq[Color::White.index()][pt.index()][sq.index()] = s;
                psq[Color::Black.index()][pt.index()][sq.flip().index()] = -s;
            }
        }

        PieceSquareTable {
            value_mg,
            value_eg,
            psq,
        }
    }

    /// 駒価値（中盤）
    #[inline]
    pub fn value_mg(&self, pt: PieceType) -> Value {
        self.value_mg[pt.index()]
    }

    /// 駒価値（終盤）
    #[inline]
    pub fn value_eg(&self, pt: PieceType) -> Value {
        self.value_eg[pt.index()]
    }

    /// 駒価値込みの駒位置スコア（先手から見た値）
    #[inline]
    pub fn psq(&self, c: Color, pt: PieceType, sq: Square) -> Score {
        self.psq[c.index()][pt.index()][sq.index()]
    }
}

impl Default for PieceSquareTable {
    fn default() -> Self {
        Self::new(&EngineOptions::default())
    }
}

/// 先手から見た駒位置ボーナス
///
/// 調整済みの表ではなく、筋・段からの簡単な式で作る。
fn bonus(pt: PieceType, sq: Square) -> Score {
    let file = sq.file() as i32;
    let rank = sq.rank() as i32;
    // e筋からの距離（0..=4）
    let edge = (file - 4).abs();

    match pt {
        PieceType::Pawn => {
            if rank >= 5 {
                // 河を越えた兵は横にも動けるので価値が上がる。最終段は動きが減る。
                let advance = if rank == 9 { 1 } else { rank - 4 };
                Score::new(10 + 6 * advance - 4 * edge, 40 + 8 * advance - 6 * edge)
            } else {
                Score::new(-4 * (edge % 2), 0)
            }
        }
        PieceType::Bishop => {
            // 九宮前の中央（e2）が最も守りに効く
            if file == 4 { Score::new(12, 6) } else { Score::new(-edge, 0) }
        }
        PieceType::Advisor => {
            if file == 4 { Score::new(10, 8) } else { Score::ZERO }
        }
        PieceType::Knight => {
            // 中央寄り・前方ほど利きが増える
            let center_rank = (rank - 5).abs().min(4);
            Score::new(28 - 6 * edge - 5 * center_rank, 20 - 4 * edge - 3 * center_rank)
        }
        PieceType::Cannon => {
            let mg = if file == 4 { 14 } else { 4 - 2 * edge };
            let eg = if rank <= 2 { 6 } else { 0 };
            Score::new(mg + if rank <= 2 { 4 } else { 0 }, eg)
        }
        PieceType::Rook => {
            let file_bonus = if (3..=5).contains(&file) { 8 } else { 2 - edge };
            let rank_bonus = if rank >= 5 { 4 * (rank - 4).min(3) } else { 0 };
            Score::new(file_bonus + rank_bonus, file_bonus / 2 + rank_bonus)
        }
        PieceType::King => {
            // 帥は九宮の底にいる方が安全、終盤は中央に出る
            let mg = if rank == 0 { 6 } else { -6 * rank };
            let eg = (if file == 4 { 6 } else { 0 }) + 4 * rank.min(1);
            Score::new(mg, eg)
        }
    }
}
