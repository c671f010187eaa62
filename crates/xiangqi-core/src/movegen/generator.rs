//! 指し手生成器
//!
//! 駒種ごとに利きと生成タイプごとの移動先候補（target）の積を取り、指し手にする。
//! 生成順は 車 → 馬 → 炮 → 兵 → 相 → 仕 → 帥。

use crate::bitboard::{
    bishop_attacks_bb, cannon_control_bb, knight_attacks_bb, rook_attacks_bb, shift_east, shift_up,
    shift_west, step_attacks_of, Bitboard, PAWN_MASK_BB,
};
use crate::position::{CheckInfo, Position};
use crate::types::{Color, Move, PieceType, Square};

use super::movelist::MoveList;
use super::types::GenType;

/// from から targets の各升への指し手を追加
#[inline]
fn add_moves(list: &mut MoveList, from: Square, targets: Bitboard) {
    for to in targets {
        list.push(Move::new(from, to));
    }
}

// ============================================================================
// 駒種別の移動生成
// ============================================================================

/// 車の移動による指し手を生成
fn generate_rook_moves(pos: &Position, list: &mut MoveList, us: Color, target: Bitboard) {
    for from in pos.pieces(us, PieceType::Rook) {
        add_moves(list, from, rook_attacks_bb(from, pos.occupied(), pos.occupied_rl90()) & target);
    }
}

/// 馬の移動による指し手を生成
fn generate_knight_moves(pos: &Position, list: &mut MoveList, us: Color, target: Bitboard) {
    for from in pos.pieces(us, PieceType::Knight) {
        add_moves(list, from, knight_attacks_bb(from, pos.occupied()) & target);
    }
}

/// 炮の移動による指し手を生成
///
/// 取る手は砲台越しの利き、取らない手は車と同じ動きになる。
fn generate_cannon_moves(pos: &Position, list: &mut MoveList, us: Color, target: Bitboard) {
    let occ = pos.occupied();
    let occ_l90 = pos.occupied_rl90();
    let enemy = pos.pieces_c(!us);
    let empty = !occ;

    for from in pos.pieces(us, PieceType::Cannon) {
        let captures = cannon_control_bb(from, occ, occ_l90) & target & enemy;
        let quiets = rook_attacks_bb(from, occ, occ_l90) & empty & target;
        add_moves(list, from, captures | quiets);
    }
}

/// 兵の移動による指し手を生成
///
/// 兵の全体をずらして移動先を求め、移動先から移動元を逆算する。
/// 河を越える前の横移動は `PAWN_MASK_BB` で落ちる。
fn generate_pawn_moves(pos: &Position, list: &mut MoveList, us: Color, target: Bitboard) {
    let pawns = pos.pieces(us, PieceType::Pawn);
    if pawns.is_empty() {
        return;
    }
    let mask = PAWN_MASK_BB[us.index()] & target;
    let up = match us {
        Color::White => Square::DELTA_N,
        Color::Black => Square::DELTA_S,
    };

    let shifted = [
        (shift_up(us, pawns) & mask, up),
        (shift_west(pawns) & mask, Square::DELTA_W),
        (shift_east(pawns) & mask, Square::DELTA_E),
    ];
    for (targets, delta) in shifted {
        for to in targets {
            let from = Square::from_u8_unchecked((to.raw() as i32 - delta) as u8);
            list.push(Move::new(from, to));
        }
    }
}

/// 相の移動による指し手を生成
fn generate_bishop_moves(pos: &Position, list: &mut MoveList, us: Color, target: Bitboard) {
    for from in pos.pieces(us, PieceType::Bishop) {
        add_moves(list, from, bishop_attacks_bb(from, pos.occupied()) & target);
    }
}

/// 仕の移動による指し手を生成
fn generate_advisor_moves(pos: &Position, list: &mut MoveList, us: Color, target: Bitboard) {
    for from in pos.pieces(us, PieceType::Advisor) {
        add_moves(list, from, step_attacks_of(us, PieceType::Advisor, from) & target);
    }
}

/// 帥の移動による指し手を生成
fn generate_king_moves(pos: &Position, list: &mut MoveList, us: Color, target: Bitboard) {
    let ksq = pos.king_square(us);
    add_moves(list, ksq, step_attacks_of(us, PieceType::King, ksq) & target);
}

/// 全駒種の指し手を生成（pseudo-legal）
fn generate_all_pieces(pos: &Position, list: &mut MoveList, target: Bitboard, include_king: bool) {
    let us = pos.side_to_move();
    generate_rook_moves(pos, list, us, target);
    generate_knight_moves(pos, list, us, target);
    generate_cannon_moves(pos, list, us, target);
    generate_pawn_moves(pos, list, us, target);
    generate_bishop_moves(pos, list, us, target);
    generate_advisor_moves(pos, list, us, target);
    if include_king {
        generate_king_moves(pos, list, us, target);
    }
}

// ============================================================================
// メイン生成関数
// ============================================================================

/// GenType に応じた指し手を list の末尾に追加し、list の長さを返す
///
/// - `Captures` / `Quiets` / `NonEvasions`: 擬似合法手（王手されていないこと）
/// - `QuietChecks`: 王手になる取らない手（王手されていないこと、帥の手は含まない）
/// - `Evasions`: 王手回避の合法手（王手されていること）
/// - `Legal`: 合法手
pub fn generate(pos: &Position, gen_type: GenType, list: &mut MoveList) -> usize {
    debug_assert!(!gen_type.forbids_check() || pos.checkers().is_empty());
    debug_assert!(!gen_type.requires_check() || pos.checkers().is_not_empty());

    let us = pos.side_to_move();
    let start = list.len();

    match gen_type {
        GenType::Captures => generate_all_pieces(pos, list, pos.pieces_c(!us), true),
        GenType::Quiets => generate_all_pieces(pos, list, !pos.occupied(), true),
        GenType::NonEvasions => generate_all_pieces(pos, list, !pos.pieces_c(us), true),
        GenType::QuietChecks => {
            generate_all_pieces(pos, list, !pos.occupied(), false);
            let ci = CheckInfo::new(pos);
            list.retain_from(start, |m| pos.move_gives_check(m, &ci));
        }
        GenType::Evasions => generate_evasions(pos, list, start),
        GenType::Legal => {
            if pos.checkers().is_not_empty() {
                generate_evasions(pos, list, start);
            } else {
                generate_all_pieces(pos, list, !pos.pieces_c(us), true);
                list.retain_from(start, |m| pos.move_is_legal(m));
            }
        }
    }
    list.len()
}

/// 王手回避手を生成
///
/// 炮の王手は砲台を動かしても、間に駒を足しても外れるので、移動先を絞らずに生成してから
/// 合法性で落とす。
fn generate_evasions(pos: &Position, list: &mut MoveList, start: usize) {
    let us = pos.side_to_move();
    generate_all_pieces(pos, list, !pos.pieces_c(us), true);
    list.retain_from(start, |m| pos.move_is_legal(m));
}

/// 合法手を生成
#[inline]
pub fn generate_legal(pos: &Position, list: &mut MoveList) -> usize {
    generate(pos, GenType::Legal, list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::START_FEN;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn mv(s: &str) -> Move {
        Move::from_uci(s).unwrap()
    }

    fn sorted(list: &MoveList) -> Vec<Move> {
        let mut moves: Vec<Move> = list.iter().copied().collect();
        moves.sort_by_key(|m| m.raw());
        moves
    }

    fn generated(pos: &Position, gen_type: GenType) -> MoveList {
        let mut list = MoveList::new();
        generate(pos, gen_type, &mut list);
        list
    }

    /// シード固定のランダムな指し手で局面を進め、各局面で f を呼ぶ
    fn for_random_positions<F: FnMut(&Position)>(seed: u64, games: usize, plies: usize, mut f: F) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        for _ in 0..games {
            let mut pos = Position::from_fen(START_FEN);
            for _ in 0..plies {
                f(&pos);
                let legal = generated(&pos, GenType::Legal);
                if legal.is_empty() {
                    break;
                }
                pos.do_move(legal.at(rng.random_range(0..legal.len())));
            }
        }
    }

    #[test]
    fn test_start_position_moves() {
        let pos = Position::from_fen(START_FEN);
        assert_eq!(generated(&pos, GenType::Legal).len(), 44);
        assert_eq!(generated(&pos, GenType::NonEvasions).len(), 44);

        let captures = generated(&pos, GenType::Captures);
        assert_eq!(sorted(&captures), {
            let mut v = vec![mv("b2b9"), mv("h2h9")];
            v.sort_by_key(|m| m.raw());
            v
        });
        assert_eq!(generated(&pos, GenType::Quiets).len(), 42);
        assert!(generated(&pos, GenType::QuietChecks).is_empty());
    }

    #[test]
    fn test_start_position_moves_by_piece() {
        let pos = Position::from_fen(START_FEN);
        let list = generated(&pos, GenType::Legal);
        let count = |pt: PieceType| list.iter().filter(|&&m| pos.moved_piece(m).piece_type() == pt).count();
        assert_eq!(count(PieceType::Cannon), 24);
        assert_eq!(count(PieceType::Pawn), 5);
        assert_eq!(count(PieceType::Rook), 4);
        assert_eq!(count(PieceType::Knight), 4);
        assert_eq!(count(PieceType::Bishop), 4);
        assert_eq!(count(PieceType::Advisor), 2);
        assert_eq!(count(PieceType::King), 1);
    }

    #[test]
    fn test_black_start_position_moves() {
        let pos = Position::from_fen("rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR b - - 0 1");
        let list = generated(&pos, GenType::Legal);
        assert_eq!(list.len(), 44);
        assert!(list.contains(mv("e6e5")));
        assert!(list.contains(mv("b7b0")));
        assert!(!list.contains(mv("e6e7")));
    }

    #[test]
    fn test_pawn_moves_after_river() {
        // 河を越えた兵は横にも動ける。後ろには動けない
        let pos = Position::from_fen("3k5/9/9/9/4P4/P8/9/9/9/4K4 w - - 0 1");
        let list = generated(&pos, GenType::Legal);
        let mut pawn_moves: Vec<String> =
            list.iter().filter(|&&m| pos.moved_piece(m).piece_type() == PieceType::Pawn).map(|m| m.to_uci()).collect();
        pawn_moves.sort();
        assert_eq!(pawn_moves, vec!["a4a5", "e5d5", "e5e6", "e5f5"]);
    }

    #[test]
    fn test_evasions_equal_legal_in_check() {
        let pos = Position::from_fen("3Rk4/9/9/9/9/9/9/9/9/3K5 b - - 0 1");
        let evasions = generated(&pos, GenType::Evasions);
        let legal = generated(&pos, GenType::Legal);
        assert_eq!(sorted(&evasions), sorted(&legal));
        assert_eq!(sorted(&legal), vec![mv("e9e8")]);
    }

    #[test]
    fn test_cannon_check_evasions() {
        // e5 の黒兵を砲台にした王手。兵は前に出ても e筋に残るので、将が f9 へ逃げる手だけが残る
        let pos = Position::from_fen("4k4/9/9/9/4p4/9/9/4C4/3R5/4K4 b - - 0 1");
        assert!(pos.is_in_check());
        let legal = generated(&pos, GenType::Legal);
        assert_eq!(sorted(&legal), vec![mv("e9f9")]);
        assert_eq!(sorted(&generated(&pos, GenType::Evasions)), vec![mv("e9f9")]);

        let mut after = pos.clone();
        after.do_move(mv("e9f9"));
        assert!(after.pos_is_ok().is_ok());
    }

    #[test]
    fn test_legal_equals_filtered_non_evasions() {
        for_random_positions(0x00C0_FFEE, 20, 100, |pos| {
            let legal = generated(pos, GenType::Legal);
            if pos.checkers().is_not_empty() {
                assert_eq!(sorted(&legal), sorted(&generated(pos, GenType::Evasions)), "{}", pos.fen());
                return;
            }
            let pseudo = generated(pos, GenType::NonEvasions);
            let mut filtered: Vec<Move> = pseudo.iter().copied().filter(|&m| pos.move_is_legal(m)).collect();
            filtered.sort_by_key(|m| m.raw());
            assert_eq!(sorted(&legal), filtered, "{}", pos.fen());

            // 取る手と取らない手に分かれる
            let captures = generated(pos, GenType::Captures);
            let quiets = generated(pos, GenType::Quiets);
            assert_eq!(captures.len() + quiets.len(), pseudo.len());
            assert!(captures.iter().all(|&m| pos.is_capture(m)));
            assert!(quiets.iter().all(|&m| !pos.is_capture(m)));
        });
    }

    #[test]
    fn test_quiet_checks_give_check() {
        for_random_positions(0x0BAD_CAFE, 20, 100, |pos| {
            if pos.checkers().is_not_empty() {
                return;
            }
            let checks = generated(pos, GenType::QuietChecks);
            let mut expected = Vec::new();
            for &m in generated(pos, GenType::Quiets).iter() {
                if pos.moved_piece(m).piece_type() == PieceType::King || !pos.move_is_legal(m) {
                    continue;
                }
                let mut p = pos.clone();
                p.do_move(m);
                if p.checkers().is_not_empty() {
                    expected.push(m);
                }
            }
            expected.sort_by_key(|m| m.raw());

            let mut actual: Vec<Move> = checks.iter().copied().filter(|&m| pos.move_is_legal(m)).collect();
            actual.sort_by_key(|m| m.raw());
            assert_eq!(actual, expected, "{}", pos.fen());
        });
    }

    #[test]
    fn test_generate_appends() {
        let pos = Position::from_fen(START_FEN);
        let mut list = MoveList::new();
        list.push(mv("a0a1"));
        assert_eq!(generate_legal(&pos, &mut list), 45);
        assert_eq!(list.at(0), mv("a0a1"));
    }
}
