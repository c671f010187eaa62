//! 局面状態（StateInfo）

use crate::bitboard::Bitboard;
use crate::types::{Color, PieceType, Score, Value};

/// 局面状態
///
/// do_move時に前の状態を積み、undo_move時に取り除く。
/// 前半のフィールドは do_move 時にそのままコピーしてから差分更新し、
/// 後半のフィールドは指し手ごとに設定し直す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateInfo {
    // === do_move時にコピーされる部分 ===
    /// 兵のハッシュ
    pub pawn_key: u64,
    /// 駒割りハッシュ
    pub material_key: u64,
    /// 兵以外の駒価値の合計（中盤値）[Color]
    pub non_pawn_material: [Value; Color::NUM],
    /// 攻め駒（馬・炮・車）の駒価値の合計（中盤値）[Color]
    pub attack_material: [Value; Color::NUM],
    /// 最後に駒を取ってからの手数
    pub rule50: i32,
    /// null moveからの手数
    pub plies_from_null: i32,
    /// 駒価値込みの駒位置スコア（先手から見た値）
    pub psq: Score,

    // === 再計算される部分 ===
    /// 局面ハッシュ（手番込み）
    pub key: u64,
    /// 手番側の帥に王手している駒
    pub checkers: Bitboard,
    /// 直前の指し手で取った駒種
    pub captured_type: Option<PieceType>,
}

impl StateInfo {
    /// 空の状態
    pub const fn new() -> Self {
        StateInfo {
            pawn_key: 0,
            material_key: 0,
            non_pawn_material: [Value::ZERO; Color::NUM],
            attack_material: [Value::ZERO; Color::NUM],
            rule50: 0,
            plies_from_null: 0,
            psq: Score::ZERO,
            key: 0,
            checkers: Bitboard::EMPTY,
            captured_type: None,
        }
    }

    /// 次の手のための状態（コピー部分のみ引き継ぎ、再計算部分は空）
    #[inline]
    pub fn partial_clone(&self) -> Self {
        StateInfo {
            key: self.key,
            checkers: Bitboard::EMPTY,
            captured_type: None,
            ..self.clone()
        }
    }
}

impl Default for StateInfo {
    fn default() -> Self {
        Self::new()
    }
}
