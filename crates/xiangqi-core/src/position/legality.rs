//! 指し手の合法性判定

use crate::bitboard::{
    bishop_attacks_bb, cannon_control_bb, knight_attackers_to_bb, knight_attacks_bb, pawn_no_mask,
    rook_attacks_bb, rook_pseudo_attacks, square_l90_bb, step_attacks, Bitboard,
};
use crate::movegen::{generate, GenType, MoveList};
use crate::types::{Move, MoveParseError, PieceType};

use super::pos::Position;

impl Position {
    // ========== 合法性 ==========

    /// 擬似合法手を指した後、手番側の帥が取られる状態にならないか
    ///
    /// 帥同士が間に駒のない筋・段で向かい合う手も非合法とする。
    pub fn move_is_legal(&self, m: Move) -> bool {
        debug_assert!(m.is_ok());

        let us = self.side_to_move;
        let them = !us;
        let from = m.from();
        let to = m.to();

        let mut pawns = self.pieces(them, PieceType::Pawn);
        let mut knights = self.pieces(them, PieceType::Knight);
        let mut cannons = self.pieces(them, PieceType::Cannon);
        let mut rooks = self.pieces(them, PieceType::Rook);

        let mut occ = self.occupied();
        let mut occ_l90 = self.occupied_rl90;
        occ.clear(from);
        occ_l90 ^= square_l90_bb(from);

        let to_bb = Bitboard::from_square(to);
        match self.piece_on(to).type_of() {
            None => {
                occ ^= to_bb;
                occ_l90 ^= square_l90_bb(to);
            }
            Some(PieceType::Pawn) => pawns ^= to_bb,
            Some(PieceType::Knight) => knights ^= to_bb,
            Some(PieceType::Cannon) => cannons ^= to_bb,
            Some(PieceType::Rook) => rooks ^= to_bb,
            Some(_) => {}
        }

        let mut ksq = self.king_square(us);
        if ksq == from {
            ksq = to;
        }
        let line = rook_pseudo_attacks(ksq);

        if (line & cannons).is_not_empty() && (cannon_control_bb(ksq, occ, occ_l90) & cannons).is_not_empty() {
            return false;
        }

        let rook_line = rook_attacks_bb(ksq, occ, occ_l90);
        if (line & rooks).is_not_empty() && (rook_line & rooks).is_not_empty() {
            return false;
        }

        if knight_attackers_to_bb(ksq, knights, occ).is_not_empty() {
            return false;
        }

        if (pawn_no_mask(us, ksq) & pawns).is_not_empty() {
            return false;
        }

        // 帥の対面
        let their_king = self.king_square(them);
        !(line.contains(their_king) && rook_line.contains(their_king))
    }

    /// 置換表などから取り出した指し手が、この局面で指せる合法手か
    ///
    /// 駒の動きを確かめてから `move_is_legal` に委ねる。
    pub fn is_pseudo_legal(&self, m: Move) -> bool {
        if !m.is_ok() {
            return false;
        }

        let us = self.side_to_move;
        let from = m.from();
        let to = m.to();
        let pc = self.piece_on(from);

        if pc.is_none() || pc.color() != us {
            return false;
        }
        if self.pieces_c(us).contains(to) {
            return false;
        }

        let occ = self.occupied();
        let reachable = match pc.piece_type() {
            PieceType::Rook => rook_attacks_bb(from, occ, self.occupied_rl90),
            PieceType::Cannon => {
                if self.is_empty(to) {
                    rook_attacks_bb(from, occ, self.occupied_rl90)
                } else {
                    cannon_control_bb(from, occ, self.occupied_rl90)
                }
            }
            PieceType::Knight => knight_attacks_bb(from, occ),
            PieceType::Bishop => bishop_attacks_bb(from, occ),
            PieceType::Pawn | PieceType::Advisor | PieceType::King => step_attacks(pc, from),
        };
        if !reachable.contains(to) {
            return false;
        }

        self.move_is_legal(m)
    }

    /// UCI形式の指し手を読み、この局面の合法手と照合する
    pub fn parse_uci_move(&self, s: &str) -> Result<Move, MoveParseError> {
        let m = Move::from_uci(s).ok_or_else(|| MoveParseError::Syntax(s.to_string()))?;
        if m.is_null() {
            return Err(MoveParseError::Illegal(s.to_string()));
        }

        let mut list = MoveList::new();
        generate(self, GenType::Legal, &mut list);
        if list.contains(m) {
            Ok(m)
        } else {
            Err(MoveParseError::Illegal(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::between_bb;
    use crate::position::START_FEN;
    use crate::types::Square;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn mv(s: &str) -> Move {
        Move::from_uci(s).unwrap()
    }

    fn sq(s: &str) -> Square {
        Square::from_uci(s).unwrap()
    }

    fn legal_moves(pos: &Position) -> Vec<String> {
        let mut list = MoveList::new();
        generate(pos, GenType::Legal, &mut list);
        let mut moves: Vec<String> = list.iter().map(|m| m.to_uci()).collect();
        moves.sort();
        moves
    }

    #[test]
    fn test_flying_generals() {
        // 車で王手されている将は、e筋を離れると帥と向かい合う
        let pos = Position::from_fen("3Rk4/9/9/9/9/9/9/9/9/3K5 b - - 0 1");
        assert!(pos.is_in_check());
        assert!(!pos.move_is_legal(mv("e9d9")));
        assert!(!pos.move_is_legal(mv("e9f9")));
        assert!(pos.move_is_legal(mv("e9e8")));
        assert_eq!(legal_moves(&pos), vec!["e9e8".to_string()]);
    }

    #[test]
    fn test_moving_the_only_blocker_between_kings() {
        let pos = Position::from_fen("4k4/9/9/9/4p4/9/9/9/9/4K4 b - - 0 1");
        assert!(!pos.move_is_legal(mv("e5d5")));
        assert!(pos.move_is_legal(mv("e5e4")));
    }

    #[test]
    fn test_rook_pin_restricts_to_file() {
        // e筋の白車は黒車にピンされている
        let pos = Position::from_fen("3kr4/9/9/9/9/9/4R4/9/9/4K4 w - - 0 1");
        assert_eq!(pos.pinned_pieces(), Bitboard::from_square(sq("e3")));

        let rook_moves: Vec<String> = legal_moves(&pos).into_iter().filter(|m| m.starts_with("e3")).collect();
        assert!(!rook_moves.is_empty());
        assert!(rook_moves.iter().all(|m| m.as_bytes()[2] == b'e'));
        assert!(rook_moves.contains(&"e3e9".to_string()));
    }

    #[test]
    fn test_cannon_screen_created_by_capture() {
        // 黒兵を取ると炮との間の駒が1枚だけになる
        let pos = Position::from_fen("3k5/4c4/9/9/4p4/4P4/9/9/9/4K4 w - - 0 1");
        assert!(!pos.move_is_legal(mv("e4e5")));
        assert!(pos.move_is_legal(mv("e0e1")));

        // 2枚の砲台のうち1枚が外れる
        let pos = Position::from_fen("3k5/4c4/9/9/9/4p4/9/9/4A4/4K4 w - - 0 1");
        assert!(!pos.move_is_legal(mv("e1d2")));
    }

    #[test]
    fn test_is_pseudo_legal() {
        let pos = Position::from_fen(START_FEN);
        assert!(pos.is_pseudo_legal(mv("h2e2")));
        assert!(pos.is_pseudo_legal(mv("b2b9")));
        assert!(pos.is_pseudo_legal(mv("b0c2")));
        // 炮は砲台なしで駒を取れない
        assert!(!pos.is_pseudo_legal(mv("b2b7")));
        // 車は味方の駒を越えられない
        assert!(!pos.is_pseudo_legal(mv("a0a5")));
        // 相手の駒・空升からは動かせない
        assert!(!pos.is_pseudo_legal(mv("a9a8")));
        assert!(!pos.is_pseudo_legal(mv("e5e6")));
        // 味方の駒の上には動けない
        assert!(!pos.is_pseudo_legal(mv("e0d0")));
        // 兵は河を越えるまで横に動けない
        assert!(!pos.is_pseudo_legal(mv("e3d3")));
        assert!(!pos.is_pseudo_legal(Move::NULL));
        assert!(!pos.is_pseudo_legal(Move::NONE));
    }

    #[test]
    fn test_is_pseudo_legal_matches_generator() {
        let pos = Position::from_fen("r1bakab1r/9/1cn3nc1/p1p1p1p1p/9/2P6/P3P1P1P/1C2B2C1/9/RN1AKABNR b - - 0 1");
        let mut list = MoveList::new();
        generate(&pos, GenType::Legal, &mut list);
        for from in Square::all() {
            for to in Square::all() {
                if from == to {
                    continue;
                }
                let m = Move::new(from, to);
                assert_eq!(pos.is_pseudo_legal(m), list.contains(m), "{}", m.to_uci());
            }
        }
    }

    #[test]
    fn test_parse_uci_move() {
        let pos = Position::from_fen(START_FEN);
        assert_eq!(pos.parse_uci_move("h2e2"), Ok(mv("h2e2")));
        assert_eq!(pos.parse_uci_move("h2e9"), Err(MoveParseError::Illegal("h2e9".to_string())));
        assert_eq!(pos.parse_uci_move("0000"), Err(MoveParseError::Illegal("0000".to_string())));
        assert_eq!(pos.parse_uci_move("z9"), Err(MoveParseError::Syntax("z9".to_string())));
    }

    /// 駒の動きだけで作った候補を実際に動かし、帥が取られないものを集める
    fn brute_force_legal(pos: &Position) -> Vec<String> {
        let us = pos.side_to_move();
        let them = !us;
        let mut result = Vec::new();

        for from in pos.pieces_c(us) {
            let pc = pos.piece_on(from);
            let targets = if pc.piece_type() == PieceType::Cannon {
                (pos.attacks_from(pc, from) & pos.pieces_c(them))
                    | (rook_attacks_bb(from, pos.occupied(), pos.occupied_rl90()) & !pos.occupied())
            } else {
                pos.attacks_from(pc, from) & !pos.pieces_c(us)
            };

            for to in targets {
                let mut p = pos.clone();
                if let Some(cap) = p.piece_on(to).type_of() {
                    p.remove_piece(to, them, cap);
                }
                p.move_piece(from, to, us, pc.piece_type());

                let ksq = p.king_square(us);
                let their_king = p.king_square(them);
                if (p.attackers_to(ksq) & p.pieces_c(them)).is_not_empty() {
                    continue;
                }
                if ksq.file() == their_king.file() && (between_bb(ksq, their_king) & p.occupied()).is_empty() {
                    continue;
                }
                result.push(Move::new(from, to).to_uci());
            }
        }
        result.sort();
        result
    }

    #[test]
    fn test_legal_moves_match_brute_force() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x1E6A_1000);
        for _ in 0..30 {
            let mut pos = Position::from_fen(START_FEN);
            for _ in 0..120 {
                let legal = legal_moves(&pos);
                assert_eq!(legal, brute_force_legal(&pos), "{}", pos.fen());
                if legal.is_empty() {
                    break;
                }
                let m = mv(&legal[rng.random_range(0..legal.len())]);
                pos.do_move(m);
            }
        }
    }
}
