//! 王手・ピン・開き王手の判定
//!
//! 炮は砲台の枚数で利きが変わり、馬は脚で塞がれるので、チェスのような
//! 「利きの対称性」は使えない。駒種ごとに専用の判定を行う。

use crate::bitboard::{
    between_bb, cannon_control_bb, knight_attackers_to_bb, knight_attacks_to_bb, knight_leg,
    knight_step_to, line_bb, pawn_no_mask, rook_attacks_bb, rook_pseudo_attacks, square_l90_bb,
    Bitboard,
};
use crate::types::{Color, Move, PieceType, Square};

use super::pos::Position;

/// 王手判定用の情報（指し手生成の呼び出しごとに作る）
#[derive(Debug, Clone)]
pub struct CheckInfo {
    /// 相手の帥（将）の位置
    pub ksq: Square,
    /// 手番側のピンされている駒
    ///
    /// 王手判定では使わない。探索側の合法性の事前判定・指し手順序付け用。
    pub pinned: Bitboard,
    /// 動くと開き王手になる手番側の駒
    pub dc_candidates: Bitboard,
    /// 相手の帥と手番側の炮の間の空き升（駒が入ると炮の王手になる）
    pub forbid: Bitboard,
    /// 駒種ごとの、そこへ動けば王手になる升 [PieceType]
    ///
    /// 炮は相手の帥と同じ筋・段から動く場合に当てはまらないことがあるので、
    /// `move_gives_check` で別に扱う。帥・仕・相は王手をかけられないので空。
    pub check_squares: [Bitboard; PieceType::NUM],
}

impl CheckInfo {
    pub fn new(pos: &Position) -> Self {
        let them = !pos.side_to_move();
        let ksq = pos.king_square(them);
        let occ = pos.occupied();
        let occ_l90 = pos.occupied_rl90();

        let mut check_squares = [Bitboard::EMPTY; PieceType::NUM];
        check_squares[PieceType::Pawn.index()] = pawn_no_mask(them, ksq);
        check_squares[PieceType::Knight.index()] = knight_attacks_to_bb(ksq, occ);
        check_squares[PieceType::Cannon.index()] = cannon_control_bb(ksq, occ, occ_l90);
        check_squares[PieceType::Rook.index()] = rook_attacks_bb(ksq, occ, occ_l90);

        CheckInfo {
            ksq,
            pinned: pos.pinned_pieces(),
            dc_candidates: pos.discovered_check_candidates(),
            forbid: pos.cannon_forbid_bb(them),
            check_squares,
        }
    }
}

impl Position {
    // ========== 王手判定 ==========

    /// 手番側が王手されているか
    pub fn is_in_check(&self) -> bool {
        let us = self.side_to_move;
        let ksq = self.king_square(us);
        let occ = self.occupied();
        let occ_l90 = self.occupied_rl90;
        let line = rook_pseudo_attacks(ksq);

        let cannons = self.pieces(!us, PieceType::Cannon);
        if (line & cannons).is_not_empty() && (cannon_control_bb(ksq, occ, occ_l90) & cannons).is_not_empty() {
            return true;
        }
        let rooks = self.pieces(!us, PieceType::Rook);
        if (line & rooks).is_not_empty() && (rook_attacks_bb(ksq, occ, occ_l90) & rooks).is_not_empty() {
            return true;
        }
        if knight_attackers_to_bb(ksq, self.pieces(!us, PieceType::Knight), occ).is_not_empty() {
            return true;
        }
        (pawn_no_mask(us, ksq) & self.pieces(!us, PieceType::Pawn)).is_not_empty()
    }

    // ========== ピン ==========

    /// 手番側のピンされている駒
    ///
    /// - 車: 帥との間に1枚だけ
    /// - 炮: 帥との間にちょうど2枚（1枚抜けると王手になる）
    /// - 馬: 帥に跳べる馬の脚にいる駒
    /// - 将: 帥と向かい合う筋・段の間に1枚だけ
    pub fn pinned_pieces(&self) -> Bitboard {
        let us = self.side_to_move;
        let ksq = self.king_square(us);
        let occ = self.occupied();
        let line = rook_pseudo_attacks(ksq);
        let mut result = Bitboard::EMPTY;

        for pinner in self.pieces(!us, PieceType::Rook) & line {
            let b = between_bb(ksq, pinner) & occ;
            if !b.more_than_one() {
                result |= b;
            }
        }

        for pinner in self.pieces(!us, PieceType::Cannon) & line {
            let b = between_bb(ksq, pinner) & occ;
            if b.equal_to_two() {
                result |= b;
            }
        }

        result |= self.knight_leg_blockers(self.pieces(!us, PieceType::Knight), ksq);

        for pinner in self.pieces(!us, PieceType::King) & line {
            let b = between_bb(ksq, pinner) & occ;
            if !b.more_than_one() {
                result |= b;
            }
        }

        result & self.pieces_c(us)
    }

    /// c の車・炮・馬から ksq への利きを遮っている、手番側の駒
    ///
    /// ksq が相手の帥なら開き王手の候補、手番側の帥ならピンされた駒になる。
    /// 帥同士の向かい合いは含めない。
    pub fn hidden_checkers(&self, ksq: Square, c: Color) -> Bitboard {
        let occ = self.occupied();
        let line = rook_pseudo_attacks(ksq);
        let mut result = Bitboard::EMPTY;

        for pinner in self.pieces(c, PieceType::Rook) & line {
            let b = between_bb(ksq, pinner) & occ;
            if !b.more_than_one() {
                result |= b;
            }
        }

        for pinner in self.pieces(c, PieceType::Cannon) & line {
            let b = between_bb(ksq, pinner) & occ;
            if b.equal_to_two() {
                result |= b;
            }
        }

        result |= self.knight_leg_blockers(self.pieces(c, PieceType::Knight), ksq);

        result & self.pieces_c(self.side_to_move)
    }

    /// 動くと開き王手になる手番側の駒
    #[inline]
    pub fn discovered_check_candidates(&self) -> Bitboard {
        self.hidden_checkers(self.king_square(!self.side_to_move), self.side_to_move)
    }

    /// c の帥と相手の炮の間の空き升
    ///
    /// 間に駒が1枚もないとき、そこへ駒を入れると炮の砲台になる。
    pub fn cannon_forbid_bb(&self, c: Color) -> Bitboard {
        let ksq = self.king_square(c);
        let mut result = Bitboard::EMPTY;
        for cannon in self.pieces(!c, PieceType::Cannon) & rook_pseudo_attacks(ksq) {
            let b = between_bb(ksq, cannon);
            if (b & self.occupied()).is_empty() {
                result |= b;
            }
        }
        result
    }

    /// knights のうち ksq へ跳べるものの脚にいる駒（占有は見ない）
    fn knight_leg_blockers(&self, knights: Bitboard, ksq: Square) -> Bitboard {
        let mut result = Bitboard::EMPTY;
        for s in knights {
            for dir in 0..4 {
                if knight_step_to(s, dir).contains(ksq) {
                    result |= knight_leg(s, dir) & self.occupied();
                }
            }
        }
        result
    }

    // ========== 指し手の王手判定 ==========

    /// 擬似合法手が王手になるか
    pub fn move_gives_check(&self, m: Move, ci: &CheckInfo) -> bool {
        debug_assert!(m.is_ok());
        debug_assert!(self.moved_piece(m).color() == self.side_to_move);

        let from = m.from();
        let to = m.to();
        let pt = self.piece_on(from).piece_type();

        // 直接の王手
        if pt == PieceType::Cannon {
            // 相手の帥と同じ筋・段から動く炮は、自分が砲台を減らすことがあるので後で判定する
            if !rook_pseudo_attacks(from).contains(ci.ksq) && ci.check_squares[pt.index()].contains(to) {
                return true;
            }
        } else if ci.check_squares[pt.index()].contains(to) {
            return true;
        }

        // 開き王手: 遮っていた駒が相手の帥との筋・段から外れる
        if ci.dc_candidates.contains(from) && !line_bb(from, ci.ksq).contains(to) {
            return true;
        }

        // 炮と相手の帥の間の空き升に入って砲台になる（その炮自身が動く場合を除く）
        if pt != PieceType::Cannon && ci.forbid.contains(to) {
            return true;
        }

        self.move_is_check(m)
    }

    /// 指し手を仮に指した占有で、相手の帥に王手がかかるか
    ///
    /// 動く駒自身の利きと、空いた升・埋まった升による開き王手や砲台の変化をまとめて判定する。
    pub fn move_is_check(&self, m: Move) -> bool {
        let us = self.side_to_move;
        let from = m.from();
        let to = m.to();
        let ksq = self.king_square(!us);

        let mut pawns = self.pieces(us, PieceType::Pawn);
        let mut knights = self.pieces(us, PieceType::Knight);
        let mut cannons = self.pieces(us, PieceType::Cannon);
        let mut rooks = self.pieces(us, PieceType::Rook);
        let from_to = Bitboard::from_square(from) | Bitboard::from_square(to);
        match self.piece_on(from).type_of() {
            Some(PieceType::Pawn) => pawns ^= from_to,
            Some(PieceType::Knight) => knights ^= from_to,
            Some(PieceType::Cannon) => cannons ^= from_to,
            Some(PieceType::Rook) => rooks ^= from_to,
            _ => {}
        }

        let mut occ = self.occupied() ^ Bitboard::from_square(from);
        let mut occ_l90 = self.occupied_rl90 ^ square_l90_bb(from);
        if self.is_empty(to) {
            occ ^= Bitboard::from_square(to);
            occ_l90 ^= square_l90_bb(to);
        }

        let line = rook_pseudo_attacks(ksq);
        if (line & cannons).is_not_empty() && (cannon_control_bb(ksq, occ, occ_l90) & cannons).is_not_empty() {
            return true;
        }
        if (line & rooks).is_not_empty() && (rook_attacks_bb(ksq, occ, occ_l90) & rooks).is_not_empty() {
            return true;
        }
        if knight_attackers_to_bb(ksq, knights, occ).is_not_empty() {
            return true;
        }
        (pawn_no_mask(!us, ksq) & pawns).is_not_empty()
    }
}
