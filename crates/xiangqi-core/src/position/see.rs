//! 静的交換評価（SEE）
//!
//! 1つの升での駒の取り合いを、安い駒から順に取り返すと仮定して評価する。
//! 取り除いた駒の後ろから現れる車・炮の利きは、兵・車・炮を取り除いたときだけ引き直す。

use crate::bitboard::{cannon_control_bb, rook_attacks_bb, square_l90_bb, Bitboard};
use crate::types::{Move, Piece, PieceType, Square, Value};

use super::pos::Position;

/// 取り合いの最大長
const SWAP_LIST_LEN: usize = 32;

impl Position {
    // ========== SEE ==========

    /// 取り合いの結果の符号だけが必要なときのSEE
    ///
    /// 動かす駒が取る駒より安ければ負けることはないので、1を返して計算を省く。
    /// 帥の駒価値は0なので、帥の手は常にここで返る。
    pub fn see_sign(&self, m: Move) -> Value {
        debug_assert!(m.is_ok());

        if self.piece_value_mg(self.moved_piece(m)) <= self.piece_value_mg(self.piece_on(m.to())) {
            return Value::new(1);
        }
        self.see(m, Value::ZERO)
    }

    /// 指し手 m から始まる取り合いの駒得
    ///
    /// `asymm_threshold` が0でないとき、最初と最後の取りを同じ側が行い、その時点の駒得が
    /// 閾値に届かない分岐は大きな損とみなす（手番を1つ失うため）。
    pub fn see(&self, m: Move, asymm_threshold: Value) -> Value {
        debug_assert!(m.is_ok());

        let psqt = self.ctx.psqt();
        let from = m.from();
        let to = m.to();
        let sentinel = psqt.value_mg(PieceType::Rook) * 16;

        let mut swap_list = [Value::ZERO; SWAP_LIST_LEN];
        let mut n = 1;
        swap_list[0] = self.piece_value_mg(self.piece_on(to));

        let mut occ = self.occupied() ^ Bitboard::from_square(from);
        let mut occ_l90 = self.occupied_rl90 ^ square_l90_bb(from);

        // 動かす駒を除いた占有で、to に利く駒（先後両方）
        let mut attackers = self.attackers_to_occ(to, occ, occ_l90) & occ;

        let mut stm = !self.piece_on(from).color();
        let mut stm_attackers = attackers & self.pieces_c(stm);
        if stm_attackers.is_empty() {
            return swap_list[0];
        }

        let mut captured = self.piece_on(from).piece_type();
        loop {
            debug_assert!(n < SWAP_LIST_LEN);

            swap_list[n] = -swap_list[n - 1] + psqt.value_mg(captured);
            n += 1;

            captured = self.min_attacker(to, stm_attackers, &mut occ, &mut occ_l90, &mut attackers);
            stm = !stm;
            stm_attackers = attackers & self.pieces_c(stm);

            // 帥を取る手は評価しない
            if captured == PieceType::King && stm_attackers.is_not_empty() {
                swap_list[n] = sentinel;
                n += 1;
                break;
            }
            if stm_attackers.is_empty() {
                break;
            }
        }

        if asymm_threshold != Value::ZERO {
            for v in swap_list[..n].iter_mut().step_by(2) {
                if *v < asymm_threshold {
                    *v = -sentinel;
                }
            }
        }

        // 後ろから negamax
        while n > 1 {
            n -= 1;
            swap_list[n - 1] = swap_list[n - 1].min(-swap_list[n]);
        }
        swap_list[0]
    }

    /// 最も安い攻め駒を取り除き、その駒種を返す
    ///
    /// 帥は取り除かない（最後の取りになるため）。
    fn min_attacker(
        &self,
        to: Square,
        stm_attackers: Bitboard,
        occ: &mut Bitboard,
        occ_l90: &mut Bitboard,
        attackers: &mut Bitboard,
    ) -> PieceType {
        for pt in PieceType::ALL {
            if pt == PieceType::King {
                break;
            }
            let Some(sq) = (stm_attackers & self.pieces_pt(pt)).lsb() else {
                continue;
            };

            occ.toggle(sq);
            *occ_l90 ^= square_l90_bb(sq);

            match pt {
                PieceType::Pawn | PieceType::Rook => {
                    *attackers |= rook_attacks_bb(to, *occ, *occ_l90) & self.pieces_pt(PieceType::Rook);
                    *attackers |= cannon_control_bb(to, *occ, *occ_l90) & self.pieces_pt(PieceType::Cannon);
                }
                PieceType::Cannon => {
                    *attackers |= cannon_control_bb(to, *occ, *occ_l90) & self.pieces_pt(PieceType::Cannon);
                }
                _ => {}
            }

            *attackers &= *occ;
            return pt;
        }
        PieceType::King
    }

    #[inline]
    fn piece_value_mg(&self, pc: Piece) -> Value {
        pc.type_of().map_or(Value::ZERO, |pt| self.ctx.psqt().value_mg(pt))
    }
}
