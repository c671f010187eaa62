//! 局面の整合性チェック
//!
//! 差分更新している値（ハッシュ、駒割り、駒位置スコアなど）を盤面から計算し直して比較する。
//! 不一致は差分更新のバグを意味する。

use thiserror::Error;

use crate::bitboard::{between_bb, rook_pseudo_attacks, square_l90_bb, Bitboard};
use crate::types::{Color, Piece, PieceType, Score, Value};

use super::pos::Position;
use super::zobrist::{zobrist_material, zobrist_psq, zobrist_side};

/// 整合性チェックで最初に失敗した項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("white king is missing")]
    WhiteKing,
    #[error("black king is missing")]
    BlackKing,
    #[error("each side must have exactly one king")]
    KingCount,
    #[error("side to move can capture the opponent king")]
    KingCapture,
    #[error("piece bitboards are inconsistent")]
    Bitboards,
    #[error("position key mismatch")]
    Key,
    #[error("pawn key mismatch")]
    PawnKey,
    #[error("material key mismatch")]
    MaterialKey,
    #[error("piece-square score mismatch")]
    PsqScore,
    #[error("non-pawn material mismatch")]
    NonPawnMaterial,
    #[error("piece counts mismatch")]
    PieceCounts,
    #[error("piece list mismatch")]
    PieceList,
    #[error("kings face each other on an open line")]
    KingsFacing,
}

impl PositionError {
    /// 失敗したチェックの番号（1始まり、手番のチェックが1）
    pub const fn step(self) -> u32 {
        match self {
            PositionError::WhiteKing => 2,
            PositionError::BlackKing => 3,
            PositionError::KingCount => 4,
            PositionError::KingCapture => 5,
            PositionError::Bitboards => 6,
            PositionError::Key => 7,
            PositionError::PawnKey => 8,
            PositionError::MaterialKey => 9,
            PositionError::PsqScore => 10,
            PositionError::NonPawnMaterial => 11,
            PositionError::PieceCounts => 12,
            PositionError::PieceList => 13,
            PositionError::KingsFacing => 14,
        }
    }
}

impl Position {
    // ========== 整合性チェック ==========

    /// 局面の整合性をチェックし、最初に失敗した項目を返す
    pub fn pos_is_ok(&self) -> Result<(), PositionError> {
        let us = self.side_to_move;
        let wk = self.king_square(Color::White);
        let bk = self.king_square(Color::Black);

        if self.piece_on(wk) != Piece::W_KING {
            return Err(PositionError::WhiteKing);
        }
        if self.piece_on(bk) != Piece::B_KING {
            return Err(PositionError::BlackKing);
        }

        let mut king_count = [0; Color::NUM];
        for sq in self.pieces_pt(PieceType::King) {
            king_count[self.piece_on(sq).color().index()] += 1;
        }
        if king_count != [1, 1] {
            return Err(PositionError::KingCount);
        }

        if (self.attackers_to(self.king_square(!us)) & self.pieces_c(us)).is_not_empty() {
            return Err(PositionError::KingCapture);
        }

        if !self.bitboards_ok() {
            return Err(PositionError::Bitboards);
        }

        let st = self.state();
        if st.key != self.compute_key() {
            return Err(PositionError::Key);
        }
        if st.pawn_key != self.compute_pawn_key() {
            return Err(PositionError::PawnKey);
        }
        if st.material_key != self.compute_material_key() {
            return Err(PositionError::MaterialKey);
        }
        if st.psq != self.compute_psq_score() {
            return Err(PositionError::PsqScore);
        }
        for c in Color::ALL {
            if st.non_pawn_material[c.index()] != self.compute_non_pawn_material(c)
                || st.attack_material[c.index()] != self.compute_attack_material(c)
            {
                return Err(PositionError::NonPawnMaterial);
            }
        }

        for c in Color::ALL {
            for pt in PieceType::ALL {
                if self.count(c, pt) != self.pieces(c, pt).count() as usize {
                    return Err(PositionError::PieceCounts);
                }
            }
        }

        for c in Color::ALL {
            for pt in PieceType::ALL {
                let pc = Piece::new(c, pt);
                for (i, &sq) in self.piece_list(c, pt).iter().enumerate() {
                    if self.piece_on(sq) != pc || self.index[sq.index()] as usize != i {
                        return Err(PositionError::PieceList);
                    }
                }
            }
        }

        if rook_pseudo_attacks(wk).contains(bk) && (between_bb(wk, bk) & self.occupied()).is_empty() {
            return Err(PositionError::KingsFacing);
        }

        Ok(())
    }

    /// 局面の整合性チェック（失敗したら警告ログを出す）
    pub fn is_ok(&self) -> bool {
        match self.pos_is_ok() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("pos_is_ok failed at step {}: {} ({})", e.step(), e, self.fen());
                false
            }
        }
    }

    fn bitboards_ok(&self) -> bool {
        let white = self.pieces_c(Color::White);
        let black = self.pieces_c(Color::Black);
        if (white & black).is_not_empty() || (white | black) != self.occupied() {
            return false;
        }

        let mut union = Bitboard::EMPTY;
        let mut rotated = Bitboard::EMPTY;
        for pt in PieceType::ALL {
            let b = self.pieces_pt(pt);
            if (union & b).is_not_empty() {
                return false;
            }
            union |= b;
        }
        for sq in self.occupied() {
            rotated |= square_l90_bb(sq);
        }
        union == self.occupied() && rotated == self.occupied_rl90
    }

    // ========== 盤面からの計算 ==========

    /// 局面のハッシュキーを盤面から計算
    pub fn compute_key(&self) -> u64 {
        let mut k = 0;
        for sq in self.occupied() {
            let pc = self.piece_on(sq);
            k ^= zobrist_psq(pc.color(), pc.piece_type(), sq);
        }
        if self.side_to_move == Color::Black {
            k ^= zobrist_side();
        }
        k
    }

    /// 兵のハッシュキーを盤面から計算
    pub fn compute_pawn_key(&self) -> u64 {
        let mut k = 0;
        for sq in self.pieces_pt(PieceType::Pawn) {
            k ^= zobrist_psq(self.piece_on(sq).color(), PieceType::Pawn, sq);
        }
        k
    }

    /// 駒割りハッシュキーを駒数から計算（帥は含めない）
    pub fn compute_material_key(&self) -> u64 {
        let mut k = 0;
        for c in Color::ALL {
            for pt in PieceType::NON_KING {
                for cnt in 0..self.count(c, pt) {
                    k ^= zobrist_material(c, pt, cnt);
                }
            }
        }
        k
    }

    /// 駒位置スコアを盤面から計算
    pub fn compute_psq_score(&self) -> Score {
        let psqt = self.ctx.psqt();
        let mut score = Score::ZERO;
        for sq in self.occupied() {
            let pc = self.piece_on(sq);
            score += psqt.psq(pc.color(), pc.piece_type(), sq);
        }
        score
    }

    /// 兵以外の駒価値の合計を駒数から計算
    pub fn compute_non_pawn_material(&self, c: Color) -> Value {
        let psqt = self.ctx.psqt();
        PieceType::NON_KING
            .iter()
            .filter(|&&pt| pt != PieceType::Pawn)
            .fold(Value::ZERO, |acc, &pt| acc + psqt.value_mg(pt) * self.count(c, pt) as i32)
    }

    /// 攻め駒（馬・炮・車）の駒価値の合計を駒数から計算
    pub fn compute_attack_material(&self, c: Color) -> Value {
        let psqt = self.ctx.psqt();
        PieceType::NON_KING
            .iter()
            .filter(|pt| pt.is_attacker())
            .fold(Value::ZERO, |acc, &pt| acc + psqt.value_mg(pt) * self.count(c, pt) as i32)
    }
}
